//! OCR fallback for scanned certificates.

#[cfg(feature = "tesseract")]
mod engine;

#[cfg(feature = "tesseract")]
pub use engine::TesseractOcr;

use crate::error::OcrError;
use image::DynamicImage;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Trait for OCR providers.
///
/// `progress` receives the completion fraction in `0.0..=1.0`. Providers
/// without incremental reporting call it at the start and the end only;
/// callers must not assume any particular granularity.
pub trait OcrProvider {
    /// Recognize text in an image.
    fn recognize(&self, image: &DynamicImage, progress: &mut dyn FnMut(f32)) -> Result<String>;
}
