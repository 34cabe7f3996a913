//! Core library for Turkish first-aid certificate data extraction.
//!
//! This crate provides:
//! - PDF processing (embedded text layer and page rasterization)
//! - OCR fallback for scanned certificates (Turkish + English)
//! - Field extraction (name, national ID, certificate number, dates)
//! - Batch processing with per-document failure isolation

pub mod acquire;
pub mod batch;
pub mod certificate;
pub mod error;
pub mod models;
pub mod ocr;
pub mod pdf;

pub use acquire::acquire_text;
pub use batch::{Batch, BatchProcessor, Document, NullProgress, ProgressSink, SkippedDocument};
pub use certificate::CertificateParser;
pub use error::{CertexError, Result};
pub use models::config::CertexConfig;
pub use models::record::{CertificateRecord, ExportRow};
pub use ocr::OcrProvider;
pub use pdf::{PdfExtractor, PdfProcessor};

#[cfg(feature = "tesseract")]
pub use ocr::TesseractOcr;
