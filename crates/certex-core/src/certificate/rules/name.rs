//! Holder name extraction.

use super::patterns::{NAME_BEFORE_ID, NAME_BOUNDED, NAME_LOOSE};

/// Administrative terms that leak from the certificate boilerplate into
/// the salutation line. Spelled in both dotted and OCR-mangled dotless
/// forms.
const BOILERPLATE_WORDS: [&str; 14] = [
    "İLKYARDIM",
    "ILKYARDIM",
    "İLK",
    "ILK",
    "YARDIM",
    "YÖNETMELİĞİ",
    "YONETMELIGI",
    "YÖNETMELIĞI",
    "KAPSAMINDA",
    "KAPSAMI",
    "EĞİTİMİ",
    "EGITIMI",
    "EĞITIM",
    "EGITIM",
];

/// Extract the certificate holder's full name.
///
/// Tries progressively looser patterns after the `Sayın` salutation and
/// stops at the first match. The matched text is uppercased, split into
/// tokens, and every boilerplate token is discarded; the remaining
/// tokens keep their order, supporting two- and three-token names.
pub fn extract_full_name(text: &str) -> Option<String> {
    extract_full_name_with(text, &[])
}

/// Like [`extract_full_name`], with additional boilerplate entries from
/// configuration. Extra entries are compared uppercased, under the same
/// containment rule as the built-in list.
pub fn extract_full_name_with(text: &str, extra: &[String]) -> Option<String> {
    let raw = [&*NAME_BOUNDED, &*NAME_BEFORE_ID, &*NAME_LOOSE]
        .into_iter()
        .find_map(|pattern| pattern.captures(text).map(|caps| caps[1].trim().to_string()))?;

    let extra: Vec<String> = extra.iter().map(|e| e.to_uppercase()).collect();

    let name = raw.to_uppercase();
    let kept: Vec<&str> = name
        .split_whitespace()
        .filter(|word| !is_boilerplate(word) && !extra.iter().any(|e| matches_entry(word, e)))
        .collect();

    let name = kept.join(" ");
    if name.is_empty() { None } else { Some(name) }
}

fn is_boilerplate(word: &str) -> bool {
    BOILERPLATE_WORDS
        .iter()
        .any(|entry| matches_entry(word, entry))
}

// The containment test runs both ways, which can over-strip a
// legitimate token that happens to contain a list entry (e.g. İLKER
// contains İLK). Known limitation kept for template compatibility.
fn matches_entry(word: &str, entry: &str) -> bool {
    word == entry || word.contains(entry) || entry.contains(word)
}
