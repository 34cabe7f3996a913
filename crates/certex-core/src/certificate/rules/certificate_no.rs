//! Certificate number extraction and canonicalization.

use super::patterns::{CERT_NO_CANONICAL, CERT_NO_LABELED, CERT_NO_RESHAPE, CERT_NO_STANDALONE, DOT_RUN};

/// Extract the certificate number in canonical `SB.<digits>.<digits>`
/// form.
///
/// The labeled pattern (`Belge No: SB...`) is tried before the bare
/// code shape. The match is stripped of whitespace and repeated dots;
/// if the result still misses its group separators, the trailing two
/// digits are split off as the sub-sequence number.
pub fn extract_certificate_number(text: &str) -> Option<String> {
    let raw = CERT_NO_LABELED
        .captures(text)
        .or_else(|| CERT_NO_STANDALONE.captures(text))
        .map(|caps| caps[1].to_string())?;

    Some(canonicalize(&raw))
}

fn canonicalize(raw: &str) -> String {
    let collapsed: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let collapsed = DOT_RUN.replace_all(&collapsed, ".").into_owned();

    if CERT_NO_CANONICAL.is_match(&collapsed) {
        return collapsed;
    }

    // Assumes the trailing two digits are the sub-sequence number; the
    // reshape leaves anything else untouched.
    CERT_NO_RESHAPE.replace(&collapsed, "SB.$1.$2").into_owned()
}
