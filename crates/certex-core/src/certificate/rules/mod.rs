//! Rule-based field extractors for certificate text.
//!
//! Each extractor is independent of the others and operates on the
//! same normalized text; a miss yields `None`, never an error.

pub mod certificate_no;
pub mod dates;
pub mod name;
pub mod national_id;
pub mod patterns;

pub use certificate_no::extract_certificate_number;
pub use dates::{TrainingDates, extract_training_dates, extract_validity_date, normalize_date};
pub use name::{extract_full_name, extract_full_name_with};
pub use national_id::extract_national_id;

/// Collapse every whitespace run (including newlines) into a single
/// space and trim the ends. Pure and total; the field patterns assume
/// this canonical form.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
