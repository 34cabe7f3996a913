//! Batch coordination: sequential processing with per-document
//! failure isolation.

use std::marker::PhantomData;

use tracing::{info, warn};

use crate::acquire::acquire_text;
use crate::certificate::CertificateParser;
use crate::error::Result;
use crate::models::config::CertexConfig;
use crate::models::record::{CertificateRecord, ExportRow};
use crate::ocr::OcrProvider;
use crate::pdf::PdfProcessor;

/// An input document: raw bytes plus a display name.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub data: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Receives (percentage, status label) pairs during processing.
pub trait ProgressSink {
    fn update(&self, percent: u8, status: &str);
}

/// Progress sink that discards every update.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&self, _percent: u8, _status: &str) {}
}

/// Diagnostic for one document that failed acquisition and was skipped.
#[derive(Debug, Clone)]
pub struct SkippedDocument {
    pub name: String,
    pub reason: String,
}

/// Ordered result set of one batch run.
///
/// Holds one record per successfully processed document, in input
/// order; failed documents appear only in the skipped diagnostics,
/// never as placeholder records. Owned by the coordinator and exposed
/// read-only to display and export collaborators.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    records: Vec<CertificateRecord>,
    skipped: Vec<SkippedDocument>,
}

impl Batch {
    pub fn records(&self) -> &[CertificateRecord] {
        &self.records
    }

    pub fn skipped(&self) -> &[SkippedDocument] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Flatten the records into the fixed seven-column export schema.
    pub fn export_rows(&self, institution: &str) -> Vec<ExportRow> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| ExportRow::from_record(index + 1, record, institution))
            .collect()
    }
}

/// Sequences documents through acquisition, extraction, and assembly.
///
/// Documents are processed strictly one after another; output record
/// order equals input order among the successes. There is no
/// cancellation and no per-step timeout.
pub struct BatchProcessor<P, O> {
    config: CertexConfig,
    parser: CertificateParser,
    ocr: O,
    _pdf: PhantomData<P>,
}

impl<P: PdfProcessor + Default, O: OcrProvider> BatchProcessor<P, O> {
    pub fn new(config: CertexConfig, ocr: O) -> Self {
        let parser = CertificateParser::new()
            .with_extra_name_boilerplate(config.extraction.extra_name_boilerplate.clone());
        Self {
            config,
            parser,
            ocr,
            _pdf: PhantomData,
        }
    }

    /// Process every document in order, isolating failures.
    ///
    /// A document whose acquisition fails is logged, recorded as a
    /// skipped-document diagnostic, and left out of the batch; the run
    /// always continues with the next document.
    pub fn process(&self, documents: &[Document], progress: &dyn ProgressSink) -> Batch {
        let mut batch = Batch::default();
        let total = documents.len().max(1);

        for (index, document) in documents.iter().enumerate() {
            let percent = ((index * 100) / total) as u8;
            progress.update(percent, &format!("processing {}", document.name));

            match self.process_document(document, progress) {
                Ok(record) => batch.records.push(record),
                Err(e) => {
                    warn!("skipping {}: {}", document.name, e);
                    batch.skipped.push(SkippedDocument {
                        name: document.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        progress.update(100, "done");
        info!(
            "batch complete: {} records, {} skipped",
            batch.records.len(),
            batch.skipped.len()
        );
        batch
    }

    fn process_document(
        &self,
        document: &Document,
        progress: &dyn ProgressSink,
    ) -> Result<CertificateRecord> {
        let mut pdf = P::default();
        pdf.load(&document.data)?;
        let text = acquire_text(&pdf, &self.ocr, &self.config, progress)?;
        Ok(self.parser.parse(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::ocr;
    use crate::pdf;
    use image::DynamicImage;
    use pretty_assertions::assert_eq;

    /// PDF stub whose "embedded text" is the document bytes themselves.
    /// A document starting with `FAIL` refuses to load.
    #[derive(Default)]
    struct BytesArePdfText {
        text: String,
    }

    impl PdfProcessor for BytesArePdfText {
        fn load(&mut self, data: &[u8]) -> pdf::Result<()> {
            let text = String::from_utf8_lossy(data).into_owned();
            if text.starts_with("FAIL") {
                return Err(PdfError::Parse("corrupt document".to_string()));
            }
            self.text = text;
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
            Ok(DynamicImage::new_rgba8(1, 1))
        }
    }

    struct EmptyOcr;

    impl OcrProvider for EmptyOcr {
        fn recognize(
            &self,
            _image: &DynamicImage,
            _progress: &mut dyn FnMut(f32),
        ) -> ocr::Result<String> {
            Ok(String::new())
        }
    }

    fn certificate_text(name: &str, id: &str) -> Vec<u8> {
        let body = format!(
            "Sayın: {name} {id} Belge No: SB.12345678.01 \
             Geçerlilik Tarihi: 15/06/2027 \
             kapsamında 01/02/2023 - 03/02/2023"
        );
        // pad above the OCR-fallback threshold
        format!("{body} {}", "belge metni ".repeat(10)).into_bytes()
    }

    fn processor() -> BatchProcessor<BytesArePdfText, EmptyOcr> {
        BatchProcessor::new(CertexConfig::default(), EmptyOcr)
    }

    #[test]
    fn failed_documents_are_skipped_and_order_is_preserved() {
        let documents = vec![
            Document::new("a.pdf", certificate_text("ALİ VELİ", "11111111111")),
            Document::new("b.pdf", b"FAIL".to_vec()),
            Document::new("c.pdf", certificate_text("AYŞE KAYA", "22222222222")),
        ];

        let batch = processor().process(&documents, &NullProgress);

        assert_eq!(batch.len(), 2);
        assert_eq!(
            batch.records()[0].national_id,
            Some("11111111111".to_string())
        );
        assert_eq!(
            batch.records()[1].national_id,
            Some("22222222222".to_string())
        );
        assert_eq!(batch.skipped().len(), 1);
        assert_eq!(batch.skipped()[0].name, "b.pdf");
    }

    #[test]
    fn empty_input_produces_an_empty_batch() {
        let batch = processor().process(&[], &NullProgress);
        assert!(batch.is_empty());
        assert!(batch.skipped().is_empty());
    }

    #[test]
    fn extraction_misses_still_append_a_record() {
        // long enough to skip OCR, but carries no recognizable fields
        let data = "sıradan bir yazı ".repeat(10).into_bytes();
        let batch = processor().process(&[Document::new("plain.pdf", data)], &NullProgress);

        assert_eq!(batch.len(), 1);
        assert!(batch.records()[0].is_empty());
    }

    #[test]
    fn export_rows_number_sequentially_from_one() {
        let documents = vec![
            Document::new("a.pdf", certificate_text("ALİ VELİ", "11111111111")),
            Document::new("b.pdf", certificate_text("AYŞE KAYA", "22222222222")),
        ];

        let batch = processor().process(&documents, &NullProgress);
        let rows = batch.export_rows("Merkez");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sequence, 1);
        assert_eq!(rows[1].sequence, 2);
        assert_eq!(rows[0].full_name, "ALİ VELİ");
        assert_eq!(rows[0].issued_date, "03/02/2023");
        assert_eq!(rows[1].institution, "Merkez");
    }
}
