//! Image attachments: a dropped file becomes a base64 `data:` URL.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chatdeck_types::{ChatError, Result};

/// An image waiting to go out with the next message
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImage {
    pub name: String,
    pub mime: String,
    pub byte_len: usize,
    /// `data:<mime>;base64,<payload>`, sent as `imageBase64`
    pub data_url: String,
}

impl PendingImage {
    /// Encode a file's bytes. The MIME type comes from the browser when it
    /// knows it, otherwise from the file extension; anything that is not
    /// `image/*` is refused.
    pub fn from_bytes(name: &str, mime: Option<&str>, bytes: &[u8]) -> Result<Self> {
        let mime = mime
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .or_else(|| mime_from_name(name))
            .ok_or_else(|| ChatError::Other(format!("{} is not an image", name)))?;

        if !mime.starts_with("image/") {
            return Err(ChatError::Other(format!("{} is not an image ({})", name, mime)));
        }
        if bytes.is_empty() {
            return Err(ChatError::Other(format!("{} is empty", name)));
        }

        Ok(Self {
            name: name.to_string(),
            mime: mime.to_string(),
            byte_len: bytes.len(),
            data_url: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        })
    }

    /// Short label for the attachment chip, e.g. `trace.png (12.3 KB)`
    pub fn label(&self) -> String {
        format!("{} ({:.1} KB)", self.name, self.byte_len as f64 / 1024.0)
    }
}

fn mime_from_name(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
