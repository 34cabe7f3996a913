//! Certificate record data model and the flat export row schema.

use serde::{Deserialize, Serialize};

/// Structured data extracted from one certificate document.
///
/// Every field is optional: `None` means the extractor found no
/// well-formed value for it. A populated field is always fully
/// normalized (dates `dd/mm/yyyy`, certificate number `SB.<n>.<n>`,
/// name uppercased with boilerplate stripped) - partially normalized
/// values are never emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Certificate holder's full name.
    pub full_name: Option<String>,

    /// 11-digit national identity number.
    pub national_id: Option<String>,

    /// Certificate number in canonical `SB.<digits>.<digits>` form.
    pub certificate_number: Option<String>,

    /// Validity (expiration) date of the certificate.
    pub validity_date: Option<String>,

    /// Training course start date.
    pub training_start_date: Option<String>,

    /// Training course end date.
    pub training_end_date: Option<String>,
}

impl CertificateRecord {
    /// True when no extractor produced a value.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.national_id.is_none()
            && self.certificate_number.is_none()
            && self.validity_date.is_none()
            && self.training_start_date.is_none()
            && self.training_end_date.is_none()
    }
}

/// One row of the fixed seven-column export schema consumed by the
/// spreadsheet and clipboard writers.
///
/// The issue date column carries the training end date: certificates
/// are issued on the day the course ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    /// 1-based position within the batch.
    pub sequence: usize,
    pub full_name: String,
    pub national_id: String,
    pub certificate_number: String,
    /// Date the certificate was issued (training end date).
    pub issued_date: String,
    pub validity_date: String,
    /// Fixed training-institution label.
    pub institution: String,
}

impl ExportRow {
    /// Column headers, in schema order.
    pub const HEADERS: [&'static str; 7] = [
        "No",
        "Ad Soyad",
        "TC Kimlik No",
        "Belge No",
        "Belgenin Verildiği Tarih",
        "Belge Geçerlilik Tarihi",
        "Eğitim Merkezi",
    ];

    /// Flatten a record into a row; absent fields become empty cells.
    pub fn from_record(sequence: usize, record: &CertificateRecord, institution: &str) -> Self {
        Self {
            sequence,
            full_name: record.full_name.clone().unwrap_or_default(),
            national_id: record.national_id.clone().unwrap_or_default(),
            certificate_number: record.certificate_number.clone().unwrap_or_default(),
            issued_date: record.training_end_date.clone().unwrap_or_default(),
            validity_date: record.validity_date.clone().unwrap_or_default(),
            institution: institution.to_string(),
        }
    }

    /// Cell values in schema order.
    pub fn fields(&self) -> [String; 7] {
        [
            self.sequence.to_string(),
            self.full_name.clone(),
            self.national_id.clone(),
            self.certificate_number.clone(),
            self.issued_date.clone(),
            self.validity_date.clone(),
            self.institution.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn export_row_maps_training_end_to_issued_date() {
        let record = CertificateRecord {
            full_name: Some("ÖMER ASLAN".to_string()),
            national_id: Some("12345678901".to_string()),
            certificate_number: Some("SB.12345678.01".to_string()),
            validity_date: Some("15/06/2027".to_string()),
            training_start_date: Some("01/02/2023".to_string()),
            training_end_date: Some("03/02/2023".to_string()),
        };

        let row = ExportRow::from_record(1, &record, "Merkez");
        assert_eq!(row.issued_date, "03/02/2023");
        assert_eq!(row.validity_date, "15/06/2027");
        assert_eq!(row.sequence, 1);
    }

    #[test]
    fn export_row_uses_empty_cells_for_missing_fields() {
        let record = CertificateRecord::default();
        assert!(record.is_empty());

        let row = ExportRow::from_record(3, &record, "Merkez");
        let fields = row.fields();
        assert_eq!(fields[0], "3");
        assert_eq!(fields[1], "");
        assert_eq!(fields[6], "Merkez");
    }
}
