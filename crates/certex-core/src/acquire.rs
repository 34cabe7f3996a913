//! Text acquisition: embedded text layer with OCR fallback.

use tracing::{debug, info};

use crate::batch::ProgressSink;
use crate::error::Result;
use crate::models::config::CertexConfig;
use crate::ocr::OcrProvider;
use crate::pdf::PdfProcessor;

// OCR progress is mapped into this band; the percentages below it are
// the preparation milestones.
const OCR_BAND_START: u8 = 40;
const OCR_BAND_WIDTH: f32 = 60.0;

/// Obtain the raw text of a loaded document.
///
/// The embedded text layer is read first; when its trimmed length falls
/// below `config.pdf.min_text_length` characters it is considered
/// insufficient, the first page is rendered at the configured scale and
/// handed to the OCR provider instead. Any PDF or OCR failure
/// propagates to the caller; no partial text is returned.
pub fn acquire_text(
    pdf: &impl PdfProcessor,
    ocr: &impl OcrProvider,
    config: &CertexConfig,
    progress: &dyn ProgressSink,
) -> Result<String> {
    let embedded = pdf.extract_text()?;
    let trimmed_len = embedded.trim().chars().count();
    debug!("embedded text layer: {} chars after trimming", trimmed_len);

    if trimmed_len >= config.pdf.min_text_length {
        return Ok(embedded);
    }

    info!(
        "embedded text below {} chars, falling back to OCR",
        config.pdf.min_text_length
    );
    progress.update(30, "preparing OCR");

    let page = pdf.render_page(1, config.pdf.render_scale)?;

    progress.update(OCR_BAND_START, "running OCR");
    let text = ocr.recognize(&page, &mut |fraction| {
        let percent = OCR_BAND_START + (fraction.clamp(0.0, 1.0) * OCR_BAND_WIDTH).round() as u8;
        progress.update(percent.min(100), &format!("OCR: {}%", (fraction * 100.0).round() as u32));
    })?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::NullProgress;
    use crate::error::{CertexError, OcrError, PdfError};
    use crate::ocr;
    use crate::pdf;
    use image::DynamicImage;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    /// PDF stub returning fixed embedded text.
    #[derive(Default)]
    struct StubPdf {
        text: String,
        fail_render: bool,
        rendered: Cell<bool>,
    }

    impl PdfProcessor for StubPdf {
        fn load(&mut self, _data: &[u8]) -> pdf::Result<()> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            1
        }

        fn extract_text(&self) -> pdf::Result<String> {
            Ok(self.text.clone())
        }

        fn extract_page_text(&self, _page: u32) -> pdf::Result<String> {
            Ok(self.text.clone())
        }

        fn render_page(&self, _page: u32, _scale: f32) -> pdf::Result<DynamicImage> {
            if self.fail_render {
                return Err(PdfError::Render("boom".to_string()));
            }
            self.rendered.set(true);
            Ok(DynamicImage::new_rgba8(1, 1))
        }
    }

    /// OCR stub returning fixed recognized text.
    struct StubOcr {
        text: String,
        invoked: Cell<bool>,
    }

    impl StubOcr {
        fn returning(text: &str) -> Self {
            Self {
                text: text.to_string(),
                invoked: Cell::new(false),
            }
        }
    }

    impl OcrProvider for StubOcr {
        fn recognize(
            &self,
            _image: &DynamicImage,
            progress: &mut dyn FnMut(f32),
        ) -> ocr::Result<String> {
            self.invoked.set(true);
            progress(0.0);
            progress(1.0);
            Ok(self.text.clone())
        }
    }

    fn config() -> CertexConfig {
        CertexConfig::default()
    }

    #[test]
    fn sufficient_embedded_text_skips_ocr() {
        let pdf = StubPdf {
            text: "x".repeat(100),
            ..Default::default()
        };
        let ocr = StubOcr::returning("ocr text");

        let text = acquire_text(&pdf, &ocr, &config(), &NullProgress).unwrap();

        assert_eq!(text, "x".repeat(100));
        assert!(!ocr.invoked.get());
        assert!(!pdf.rendered.get());
    }

    #[test]
    fn short_embedded_text_triggers_ocr() {
        let pdf = StubPdf {
            text: "x".repeat(99),
            ..Default::default()
        };
        let ocr = StubOcr::returning("recognized body");

        let text = acquire_text(&pdf, &ocr, &config(), &NullProgress).unwrap();

        assert_eq!(text, "recognized body");
        assert!(ocr.invoked.get());
        assert!(pdf.rendered.get());
    }

    #[test]
    fn trimming_happens_before_the_length_check() {
        // 99 meaningful chars padded with whitespace: still insufficient
        let pdf = StubPdf {
            text: format!("   {}\n\n", "x".repeat(99)),
            ..Default::default()
        };
        let ocr = StubOcr::returning("from ocr");

        let text = acquire_text(&pdf, &ocr, &config(), &NullProgress).unwrap();
        assert_eq!(text, "from ocr");
    }

    #[test]
    fn render_failure_propagates() {
        let pdf = StubPdf {
            text: String::new(),
            fail_render: true,
            ..Default::default()
        };
        let ocr = StubOcr::returning("unused");

        let result = acquire_text(&pdf, &ocr, &config(), &NullProgress);
        assert!(matches!(result, Err(CertexError::Pdf(PdfError::Render(_)))));
    }

    #[test]
    fn ocr_failure_propagates() {
        struct FailingOcr;
        impl OcrProvider for FailingOcr {
            fn recognize(
                &self,
                _image: &DynamicImage,
                _progress: &mut dyn FnMut(f32),
            ) -> ocr::Result<String> {
                Err(OcrError::Recognition("no text".to_string()))
            }
        }

        let pdf = StubPdf::default();
        let result = acquire_text(&pdf, &FailingOcr, &config(), &NullProgress);
        assert!(matches!(result, Err(CertexError::Ocr(_))));
    }
}
