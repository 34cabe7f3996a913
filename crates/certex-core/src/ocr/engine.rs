//! Tesseract-backed OCR provider.

use std::io::Cursor;
use std::path::PathBuf;

use image::DynamicImage;
use tesseract::Tesseract;
use tracing::debug;

use super::{OcrProvider, Result};
use crate::error::OcrError;

/// OCR provider backed by the Tesseract engine.
///
/// Certificates mix Turkish body text with Latin codes and digits, so
/// the default language set is `tur+eng`.
pub struct TesseractOcr {
    languages: String,
    datapath: Option<PathBuf>,
}

impl TesseractOcr {
    /// Create a provider for the given language set specifier
    /// (e.g. `"tur+eng"`).
    pub fn new(languages: impl Into<String>) -> Self {
        Self {
            languages: languages.into(),
            datapath: None,
        }
    }

    /// Use a specific trained-data directory instead of the engine's
    /// default search path.
    pub fn with_datapath(mut self, path: impl Into<PathBuf>) -> Self {
        self.datapath = Some(path.into());
        self
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("tur+eng")
    }
}

impl OcrProvider for TesseractOcr {
    fn recognize(&self, image: &DynamicImage, progress: &mut dyn FnMut(f32)) -> Result<String> {
        progress(0.0);

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        let datapath = self.datapath.as_ref().and_then(|p| p.to_str());

        // The tesseract crate exposes no incremental progress hook, so
        // the fraction jumps from 0.0 straight to 1.0.
        let mut engine = Tesseract::new(datapath, Some(self.languages.as_str()))
            .map_err(|e| OcrError::Init(e.to_string()))?
            .set_image_from_mem(&png)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?
            .recognize()
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        let text = engine
            .get_text()
            .map_err(|e| OcrError::Recognition(e.to_string()))?;

        debug!("OCR recognized {} characters", text.chars().count());
        progress(1.0);

        Ok(text)
    }
}
