use anyhow::Result;
use image::GrayImage;

pub mod tesseract;

/// An OCR engine.
pub trait OcrService: Send + Sync {
    /// Human readable name and version of the engine.
    fn version(&self) -> Result<String>;

    /// Extract the text from an already preprocessed image.
    ///
    /// `language` names the language packs to use, joined with `+` (eg. `rus+eng`).
    fn image_to_string(&self, image: &GrayImage, language: &str) -> Result<String>;
}
