//! National identity number extraction.

use super::patterns::NATIONAL_ID;

/// Extract the 11-digit national identity number.
///
/// The digits must stand alone as a bounded token; an 11-digit window
/// inside a longer digit run never matches. The marker prefix
/// (`TC`/`T.C.`/`Kimlik`) is optional and no checksum validation is
/// applied.
pub fn extract_national_id(text: &str) -> Option<String> {
    NATIONAL_ID.captures(text).map(|caps| caps[1].to_string())
}
