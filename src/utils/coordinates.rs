use crate::utils::constants::{COORDINATE_NOISE, TILE_SIZE};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Strip separator noise (stray commas, semicolons, padding) from a raw coordinate field
///
/// # Examples
/// ```
/// use traffic_heatmap::utils::coordinates::clean_coordinate;
///
/// assert_eq!(clean_coordinate(" 19.432, "), "19.432");
/// ```
pub fn clean_coordinate(raw: &str) -> String {
    raw.chars()
        .filter(|c| !COORDINATE_NOISE.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Parse a raw coordinate field, returning `None` when it is not a finite number
///
/// # Examples
/// ```
/// use traffic_heatmap::utils::coordinates::parse_coordinate;
///
/// assert_eq!(parse_coordinate("19.432,"), Some(19.432));
/// assert_eq!(parse_coordinate("nan"), None);
/// ```
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let cleaned = clean_coordinate(raw);
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Mean position of a set of points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

impl Centroid {
    /// Arithmetic mean of the given `(x, y)` pairs, `None` for an empty set
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut count = 0usize;

        for (x, y) in points {
            sum_x += x;
            sum_y += y;
            count += 1;
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            x: sum_x / count as f64,
            y: sum_y / count as f64,
        })
    }

    /// Longitude of the view centre (x is longitude in the source data)
    pub fn longitude(&self) -> f64 {
        self.x
    }

    /// Latitude of the view centre (y is latitude in the source data)
    pub fn latitude(&self) -> f64 {
        self.y
    }
}

/// Axis-aligned extent of a set of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points.into_iter().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => Self {
                    min_x: x,
                    max_x: x,
                    min_y: y,
                    max_y: y,
                },
                Some(b) => Self {
                    min_x: b.min_x.min(x),
                    max_x: b.max_x.max(x),
                    min_y: b.min_y.min(y),
                    max_y: b.max_y.max(y),
                },
            })
        })
    }
}

/// Project longitude/latitude to Web Mercator world pixels at the given zoom
pub fn mercator_world_pixels(longitude: f64, latitude: f64, zoom: f64) -> (f64, f64) {
    let world_size = TILE_SIZE * 2f64.powf(zoom);
    // Mercator is undefined at the poles
    let lat = latitude.clamp(-85.051129, 85.051129).to_radians();

    let x = (longitude + 180.0) / 360.0 * world_size;
    let y = (1.0 - (PI / 4.0 + lat / 2.0).tan().ln() / PI) / 2.0 * world_size;

    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_coordinate_strips_trailing_separator() {
        assert_eq!(clean_coordinate("19.432,"), "19.432");
        assert_eq!(clean_coordinate("-99.133;"), "-99.133");
        assert_eq!(clean_coordinate("  -99.1,33 "), "-99.133");
    }

    #[test]
    fn test_parse_coordinate() {
        assert!((parse_coordinate("19.432,").unwrap() - 19.432).abs() < 1e-12);
        assert!((parse_coordinate(" -99.1332 ").unwrap() - -99.1332).abs() < 1e-12);
        assert_eq!(parse_coordinate(""), None);
        assert_eq!(parse_coordinate(","), None);
        assert_eq!(parse_coordinate("abc"), None);
        assert_eq!(parse_coordinate("NaN"), None);
        assert_eq!(parse_coordinate("inf"), None);
    }

    #[test]
    fn test_centroid_is_arithmetic_mean() {
        let centroid =
            Centroid::from_points(vec![(-99.0, 19.0), (-99.2, 19.4), (-99.1, 19.2)]).unwrap();
        assert!((centroid.longitude() - -99.1).abs() < 1e-9);
        assert!((centroid.latitude() - 19.2).abs() < 1e-9);

        assert!(Centroid::from_points(Vec::<(f64, f64)>::new()).is_none());
    }

    #[test]
    fn test_bounds() {
        let bounds = Bounds::from_points(vec![(1.0, 5.0), (-2.0, 7.0), (3.0, 6.0)]).unwrap();
        assert_eq!(bounds.min_x, -2.0);
        assert_eq!(bounds.max_x, 3.0);
        assert_eq!(bounds.min_y, 5.0);
        assert_eq!(bounds.max_y, 7.0);
    }

    #[test]
    fn test_mercator_origin_and_orientation() {
        let (x, y) = mercator_world_pixels(0.0, 0.0, 0.0);
        assert!((x - 256.0).abs() < 1e-9);
        assert!((y - 256.0).abs() < 1e-9);

        // North is up: higher latitude means smaller y
        let (_, y_north) = mercator_world_pixels(0.0, 10.0, 0.0);
        assert!(y_north < y);

        // One zoom level doubles the world size
        let (x1, _) = mercator_world_pixels(90.0, 0.0, 1.0);
        assert!((x1 - 768.0).abs() < 1e-9);
    }
}
