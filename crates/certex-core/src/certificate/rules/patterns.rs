//! Regex patterns for Turkish first-aid certificate extraction.
//!
//! Each field keeps its patterns ordered from most specific to most
//! permissive; the extractors try them in that order and stop at the
//! first match. Case-insensitive matching uses Unicode simple folding,
//! which does not fold the Turkish dotted/dotless i pairs - patterns
//! that must survive all-caps OCR output carry explicit alternations.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Name after the salutation, terminated by a marker known to follow
    // it (ID prefix, "Belge", an 11-digit number, or the scope keyword).
    pub static ref NAME_BOUNDED: Regex = Regex::new(
        r"(?i)Sayın[:\s]+([A-ZÇĞİÖŞÜ][A-ZÇĞİÖŞÜa-zçğıöşü\s]{2,50}?)\s*(?:TC|T\.C|Belge|[0-9]{11}|kapsamında)"
    ).unwrap();

    // Name directly preceding an 11-digit national ID. The explicit
    // SAYIN alternation stays: simple folding does not reach it.
    pub static ref NAME_BEFORE_ID: Regex = Regex::new(
        r"(?i)(?:Sayın|SAYIN)[:\s]+([A-ZÇĞİÖŞÜ\s]+?)\s*\d{11}"
    ).unwrap();

    // Loosest form: any letter run after the salutation.
    pub static ref NAME_LOOSE: Regex = Regex::new(
        r"(?i)(?:Sayın|SAYIN)[:\s]+([A-ZÇĞİÖŞÜ][A-ZÇĞİÖŞÜ\s]+)"
    ).unwrap();

    // 11 digits as a bounded token with an optional ID marker. The word
    // boundaries on both sides keep an 11-digit window inside a longer
    // digit run from matching.
    pub static ref NATIONAL_ID: Regex = Regex::new(
        r"(?i)(?:TC|T\.C\.?|Kimlik)?[:\s]*\b(\d{11})\b"
    ).unwrap();

    // Certificate number with an explicit label.
    pub static ref CERT_NO_LABELED: Regex = Regex::new(
        r"(?i)Belge\s*(?:No|Numarası)?[:\s]*(SB[.\s]*\d+[.\s]*\d+)"
    ).unwrap();

    // Bare certificate code; the first digit group needs at least eight
    // digits to avoid picking up short SB-prefixed tokens.
    pub static ref CERT_NO_STANDALONE: Regex = Regex::new(
        r"(?i)(SB[.\s]*\d{8,}[.\s]*\d+)"
    ).unwrap();

    // Canonical certificate number shape.
    pub static ref CERT_NO_CANONICAL: Regex = Regex::new(
        r"^SB\.\d+\.\d+$"
    ).unwrap();

    // Reshape for codes missing their dots: all but the trailing two
    // digits form the first group, the last two the sub-sequence.
    pub static ref CERT_NO_RESHAPE: Regex = Regex::new(
        r"^SB\.?(\d+)(\d{2})$"
    ).unwrap();

    pub static ref DOT_RUN: Regex = Regex::new(r"\.+").unwrap();

    // Validity date patterns, most specific to loosest. The first two
    // allow a capitalized name run between the label and the date (some
    // templates repeat the holder name there).
    pub static ref VALIDITY_LABELED_FULL: Regex = Regex::new(
        r"(?i)Belge\s+Geçerlilik\s*Tarihi[:\s]*[A-ZÇĞİÖŞÜ\s]+?(\d{2}[/.\-]\d{2}[/.\-]\d{4})"
    ).unwrap();

    pub static ref VALIDITY_LABELED: Regex = Regex::new(
        r"(?i)Geçerlilik\s*Tarihi[:\s]*[A-ZÇĞİÖŞÜ\s]+?(\d{2}[/.\-]\d{2}[/.\-]\d{4})"
    ).unwrap();

    pub static ref VALIDITY_DIRECT: Regex = Regex::new(
        r"(?i)Geçerlilik\s*Tarihi[:\s]*(\d{2}[/.\-]\d{2}[/.\-]\d{4})"
    ).unwrap();

    pub static ref VALIDITY_SHORT: Regex = Regex::new(
        r"(?i)(?:Geçerli|Geçerlilik)[:\s]+(\d{2}[/.\-]\d{2}[/.\-]\d{4})"
    ).unwrap();

    // Any dd/mm/yyyy-shaped date, with /, - or . separators.
    pub static ref DATE_SHAPE: Regex = Regex::new(
        r"\d{2}[/.\-]\d{2}[/.\-]\d{4}"
    ).unwrap();

    // Scope keyword marking the sentence that carries the training
    // period ("... eğitimi kapsamında <start> - <end> ...").
    pub static ref SCOPE_KEYWORD: Regex = Regex::new(
        r"(?i)kapsamında"
    ).unwrap();
}
