//! Data models for certificate extraction.

pub mod config;
pub mod record;

pub use config::CertexConfig;
pub use record::{CertificateRecord, ExportRow};
