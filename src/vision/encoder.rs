// Image to data URL encoding
// Author: kelexine (https://github.com/kelexine)

use super::models::ImageFormat;
use crate::error::{AnalyzerError, Result};
use base64::Engine;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Resolve the MIME type of an image file from its name.
///
/// A generic filename guess is tried first and kept only when it names one of
/// the supported image formats; otherwise the fixed extension table decides.
/// The file itself is never opened.
pub fn resolve_mime_type(path: &Path) -> Result<&'static str> {
    let guessed = mime_guess::from_path(path)
        .first()
        .filter(|mime| mime.type_().as_str() == "image")
        .and_then(|mime| ImageFormat::from_mime_type(mime.essence_str()));

    guessed
        .or_else(|| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .and_then(ImageFormat::from_extension)
        })
        .map(|format| format.mime_type())
        .ok_or_else(|| AnalyzerError::UnsupportedImageType(path.to_path_buf()))
}

/// Read an image file and return it as a base64 data URL.
///
/// The MIME type is resolved before the file is read, so an unsupported
/// extension fails without any I/O. The whole file is loaded into memory.
pub fn image_to_data_url(path: impl AsRef<Path>) -> Result<DataUrl> {
    let path = path.as_ref();
    let mime_type = resolve_mime_type(path)?;

    let bytes = std::fs::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(DataUrl::new(mime_type, &bytes))
}

/// An inline `data:<mime>;base64,<payload>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    url: String,
    payload_start: usize,
}

impl DataUrl {
    /// Encode raw bytes under the given MIME type.
    pub fn new(mime_type: &str, bytes: &[u8]) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        let url = format!("{}{}{}{}", SCHEME, mime_type, BASE64_MARKER, encoded);
        let payload_start = SCHEME.len() + mime_type.len() + BASE64_MARKER.len();
        Self { url, payload_start }
    }

    /// The MIME type between `data:` and `;base64,`.
    pub fn mime_type(&self) -> &str {
        &self.url[SCHEME.len()..self.payload_start - BASE64_MARKER.len()]
    }

    /// The base64 payload.
    pub fn payload(&self) -> &str {
        &self.url[self.payload_start..]
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Decode the payload back into the original bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.payload())
            .map_err(|e| AnalyzerError::InvalidDataUrl(format!("Invalid base64 payload: {}", e)))
    }

    /// First `max_chars` characters, for logging.
    pub fn preview(&self, max_chars: usize) -> &str {
        // the URL is pure ASCII, so byte and char offsets agree
        &self.url[..self.url.len().min(max_chars)]
    }
}

impl FromStr for DataUrl {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .strip_prefix(SCHEME)
            .ok_or_else(|| AnalyzerError::InvalidDataUrl("missing 'data:' scheme".to_string()))?;
        let marker = rest
            .find(BASE64_MARKER)
            .ok_or_else(|| AnalyzerError::InvalidDataUrl("missing ';base64,' marker".to_string()))?;

        let mime_type = &rest[..marker];
        if ImageFormat::from_mime_type(mime_type).is_none() {
            return Err(AnalyzerError::InvalidDataUrl(format!(
                "Unsupported image format: {}",
                mime_type
            )));
        }

        let data_url = Self {
            url: s.to_string(),
            payload_start: SCHEME.len() + marker + BASE64_MARKER.len(),
        };
        data_url.decode()?;
        Ok(data_url)
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
