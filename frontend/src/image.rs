use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("{name} is not an image ({mime})")]
    NotAnImage { name: String, mime: String },
    #[error("could not read {name}: {reason}")]
    Read { name: String, reason: String },
}

/// Whether a declared MIME type is acceptable for analysis.
pub fn is_image_type(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Removes a leading `data:<mime>;base64,` header, if any.
pub fn strip_data_uri_prefix(encoded: &str) -> &str {
    match encoded.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(encoded, |(_, payload)| payload),
        None => encoded,
    }
}

/// The image waiting to be analyzed. The file is read once; the preview and
/// the upload payload are both derived from the same buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingImage {
    name: String,
    mime: String,
    size: usize,
    preview: String,
}

impl PendingImage {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ImageError> {
        let name = name.into();
        let mime = mime.into();
        if !is_image_type(&mime) {
            return Err(ImageError::NotAnImage { name, mime });
        }
        let preview = format!("data:{mime};base64,{}", STANDARD.encode(&bytes));
        Ok(Self { name, mime, size: bytes.len(), preview })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Data URI for an `<img src>`.
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Bare base64 of the file contents, as the analysis endpoint expects.
    pub fn to_base64(&self) -> String {
        strip_data_uri_prefix(&self.preview).to_string()
    }
}

/// Reads a browser `File` into a [`PendingImage`].
pub async fn read_file(file: &web_sys::File) -> Result<PendingImage, ImageError> {
    let name = file.name();
    let mime = file.type_();
    if !is_image_type(&mime) {
        return Err(ImageError::NotAnImage { name, mime });
    }

    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ImageError::Read { name: name.clone(), reason: format!("{e:?}") })?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    PendingImage::new(name, mime, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_image_types_are_accepted() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("image/svg+xml"));
        assert!(!is_image_type("application/pdf"));
        assert!(!is_image_type(""));

        let err = PendingImage::new("notes.txt", "text/plain", b"hi".to_vec()).unwrap_err();
        assert_eq!(
            err,
            ImageError::NotAnImage { name: "notes.txt".into(), mime: "text/plain".into() }
        );
    }

    #[test]
    fn preview_and_payload_share_one_buffer() {
        let img = PendingImage::new("cat.png", "image/png", b"ABC".to_vec()).unwrap();
        assert_eq!(img.preview(), "data:image/png;base64,QUJD");
        assert_eq!(img.to_base64(), "QUJD");
        assert_eq!(strip_data_uri_prefix(img.preview()), img.to_base64());
        assert_eq!(img.size(), 3);
        assert_eq!(img.name(), "cat.png");
    }

    #[test]
    fn strip_leaves_bare_payload_alone() {
        assert_eq!(strip_data_uri_prefix("QUJD"), "QUJD");
        assert_eq!(strip_data_uri_prefix("data:image/jpeg;base64,/9j/"), "/9j/");
    }
}
