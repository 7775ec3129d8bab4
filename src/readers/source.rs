use crate::error::{ProcessingError, Result};
use encoding_rs::Encoding;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Where the traffic table comes from; local and remote sources are interchangeable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    Local(PathBuf),
    Remote(String),
}

impl DataSource {
    /// Interpret a CLI argument: `http(s)://` means remote, anything else is a path
    pub fn parse(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Remote(arg.to_string())
        } else {
            DataSource::Local(PathBuf::from(arg))
        }
    }

    /// Stable key used by the session cache
    pub fn identifier(&self) -> String {
        match self {
            DataSource::Local(path) => path.display().to_string(),
            DataSource::Remote(url) => url.clone(),
        }
    }

    /// Read the raw bytes of the source
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            DataSource::Local(path) => Ok(tokio::fs::read(path).await?),
            DataSource::Remote(url) => {
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(60))
                    .build()?;
                let response = client.get(url).send().await?.error_for_status()?;
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Decode raw bytes using a WHATWG encoding label such as `ISO-8859-1`
///
/// Labels resolve per the WHATWG Encoding Standard, so `ISO-8859-1` and `latin1` decode
/// as windows-1252: bytes 0x80 to 0x9F become printable characters such as `€`
/// instead of C1 control codes. Every other byte matches ISO-8859-1.
pub fn decode_text(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ProcessingError::Encoding(format!("unknown label '{}'", label)))?;

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = encoding.name(), "malformed sequences replaced while decoding");
    }

    Ok(text.into_owned())
}
