use std::path::Path;

use crate::{
    assets::decode::{PreparedImage, decode_image, decode_image_file},
    foundation::error::SlidecastResult,
};

/// One source image and its natural pixel size. Immutable once created.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Slide {
    pub source: String,
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    image: PreparedImage,
}

impl Slide {
    pub fn new(source: impl Into<String>, image: PreparedImage) -> Self {
        Self {
            source: source.into(),
            width: image.width,
            height: image.height,
            image,
        }
    }

    pub fn from_bytes(source: impl Into<String>, bytes: &[u8]) -> SlidecastResult<Self> {
        Ok(Self::new(source, decode_image(bytes)?))
    }

    pub fn from_path(path: &Path) -> SlidecastResult<Self> {
        Ok(Self::new(
            path.display().to_string(),
            decode_image_file(path)?,
        ))
    }

    pub fn image(&self) -> &PreparedImage {
        &self.image
    }
}
