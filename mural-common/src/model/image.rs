use thiserror::Error;

pub const IMAGE_MAX_BYTES: usize = 5 * 1024 * 1024;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
}

impl ImageKind {
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(ImageKind::Jpeg),
            "image/png" => Some(ImageKind::Png),
            "image/gif" => Some(ImageKind::Gif),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "png" => Some(ImageKind::Png),
            "gif" => Some(ImageKind::Gif),
            _ => None,
        }
    }

    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
            ImageKind::Gif => "image/gif",
        }
    }
}

/// An image selected for upload, validated on construction so an oversized or
/// non-image file never reaches the blob store.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct ImageUpload {
    file_name: String,
    kind: ImageKind,
    bytes: Vec<u8>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum InvalidImageError {
    #[error("{0} is not an allowed image type (JPEG, PNG or GIF)")]
    UnsupportedType(String),
    #[error("The image is too large: {0} bytes, the limit is {IMAGE_MAX_BYTES}")]
    TooLarge(usize),
}

impl ImageUpload {
    pub fn new(file_name: String, mime: &str, bytes: Vec<u8>) -> Result<Self, InvalidImageError> {
        let kind = ImageKind::from_mime(mime)
            .ok_or_else(|| InvalidImageError::UnsupportedType(mime.to_owned()))?;

        if bytes.len() > IMAGE_MAX_BYTES {
            return Err(InvalidImageError::TooLarge(bytes.len()));
        }

        Ok(Self {
            file_name,
            kind,
            bytes,
        })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
