//! Parser assembling the six field extractors into one record.

use tracing::debug;

use crate::models::record::CertificateRecord;

use super::rules::{
    extract_certificate_number, extract_full_name_with, extract_national_id,
    extract_training_dates, extract_validity_date, normalize,
};

/// Produces one [`CertificateRecord`] per document text.
///
/// The extractors are independent and order-insensitive; assembly is
/// pure aggregation with no cross-field validation.
#[derive(Debug, Clone, Default)]
pub struct CertificateParser {
    extra_name_boilerplate: Vec<String>,
}

impl CertificateParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the name extractor's boilerplate list with configured
    /// entries.
    pub fn with_extra_name_boilerplate(mut self, words: Vec<String>) -> Self {
        self.extra_name_boilerplate = words;
        self
    }

    /// Normalize the raw text and run every field extractor over it.
    ///
    /// A field extractor miss leaves its field `None`; parsing itself
    /// never fails.
    pub fn parse(&self, text: &str) -> CertificateRecord {
        let clean = normalize(text);

        let training = extract_training_dates(&clean);
        let record = CertificateRecord {
            full_name: extract_full_name_with(&clean, &self.extra_name_boilerplate),
            national_id: extract_national_id(&clean),
            certificate_number: extract_certificate_number(&clean),
            validity_date: extract_validity_date(&clean),
            training_start_date: training.start,
            training_end_date: training.end,
        };

        debug!(
            "parsed record: name={:?} id={:?} certificate={:?}",
            record.full_name, record.national_id, record.certificate_number
        );
        record
    }
}
