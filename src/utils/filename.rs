use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Generate the per-frame snapshot filename with format: frame-{YYYYMMDD}-{HH}.png
pub fn frame_snapshot_filename(output_dir: &Path, hour: NaiveDateTime) -> PathBuf {
    output_dir.join(format!("frame-{}.png", hour.format("%Y%m%d-%H")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_frame_snapshot_filename() {
        let hour = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let filename = frame_snapshot_filename(Path::new("output"), hour);

        assert_eq!(filename, PathBuf::from("output").join("frame-20240307-09.png"));
    }
}
