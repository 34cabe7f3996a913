//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the certex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CertexConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Export configuration.
    pub export: ExportConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Scale factor used when rendering a page for OCR. Higher values
    /// improve recognition accuracy at the cost of memory.
    pub render_scale: f32,

    /// Minimum embedded text length (trimmed characters) below which
    /// the text layer is considered insufficient and OCR is used.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            render_scale: 3.0,
            min_text_length: 100,
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Language set specifier passed to the OCR engine.
    pub languages: String,

    /// Optional directory containing trained language data. `None`
    /// uses the engine's default search path.
    pub datapath: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: "tur+eng".to_string(),
            datapath: None,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Additional boilerplate words stripped from extracted names, on
    /// top of the built-in list. Compared case-insensitively.
    pub extra_name_boilerplate: Vec<String>,
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Fixed institution label placed in the last export column.
    pub institution: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            institution: "Bey Hekim İlk Yardım Eğitici Eğitim Merkezi".to_string(),
        }
    }
}

impl CertexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_pin_the_pipeline_constants() {
        let config = CertexConfig::default();
        assert_eq!(config.pdf.min_text_length, 100);
        assert_eq!(config.pdf.render_scale, 3.0);
        assert_eq!(config.ocr.languages, "tur+eng");
        assert!(config.extraction.extra_name_boilerplate.is_empty());
        assert!(config.export.institution.contains("İlk Yardım"));
    }

    #[test]
    fn json_round_trip_preserves_values() {
        let mut config = CertexConfig::default();
        config.pdf.min_text_length = 42;
        config.ocr.languages = "eng".to_string();

        let json = serde_json::to_string(&config).unwrap();
        let parsed: CertexConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.pdf.min_text_length, 42);
        assert_eq!(parsed.ocr.languages, "eng");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let parsed: CertexConfig = serde_json::from_str(r#"{"ocr":{"languages":"tur"}}"#).unwrap();
        assert_eq!(parsed.ocr.languages, "tur");
        assert_eq!(parsed.pdf.min_text_length, 100);
    }
}
