//! Validity date and training date range extraction.

use super::patterns::{
    DATE_SHAPE, SCOPE_KEYWORD, VALIDITY_DIRECT, VALIDITY_LABELED, VALIDITY_LABELED_FULL,
    VALIDITY_SHORT,
};

/// Training course date range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingDates {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Normalize `-` and `.` date separators to `/`. Idempotent on already
/// normalized dates.
pub fn normalize_date(date: &str) -> String {
    date.replace(['-', '.'], "/")
}

/// Extract the validity (expiration) date.
///
/// Four patterns run in fixed order, from the fully labeled form down
/// to a bare `Geçerli(lik)` prefix; the first match wins.
pub fn extract_validity_date(text: &str) -> Option<String> {
    [
        &*VALIDITY_LABELED_FULL,
        &*VALIDITY_LABELED,
        &*VALIDITY_DIRECT,
        &*VALIDITY_SHORT,
    ]
    .into_iter()
    .find_map(|pattern| pattern.captures(text).map(|caps| normalize_date(&caps[1])))
}

/// Extract the training start and end dates.
///
/// Primary strategy: the first two date shapes following the first
/// occurrence of the scope keyword. Fallback, only when the primary
/// yields nothing: the last two date shapes anywhere in the text.
pub fn extract_training_dates(text: &str) -> TrainingDates {
    let mut dates = TrainingDates::default();

    if let Some(keyword) = SCOPE_KEYWORD.find(text) {
        let after = &text[keyword.start()..];
        let found: Vec<&str> = DATE_SHAPE.find_iter(after).map(|m| m.as_str()).collect();
        if found.len() >= 2 {
            dates.start = Some(normalize_date(found[0]));
            dates.end = Some(normalize_date(found[1]));
        }
    }

    if dates.start.is_none() || dates.end.is_none() {
        let found: Vec<&str> = DATE_SHAPE.find_iter(text).map(|m| m.as_str()).collect();
        if found.len() >= 2 {
            dates.start = Some(normalize_date(found[found.len() - 2]));
            dates.end = Some(normalize_date(found[found.len() - 1]));
        }
    }

    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn date_normalization_maps_separators_to_slashes() {
        assert_eq!(normalize_date("12.05.2023"), "12/05/2023");
        assert_eq!(normalize_date("12-05-2023"), "12/05/2023");
    }

    #[test]
    fn date_normalization_is_idempotent() {
        assert_eq!(normalize_date("12/05/2023"), "12/05/2023");
        let once = normalize_date("12.05-2023");
        assert_eq!(normalize_date(&once), once);
    }

    #[test]
    fn validity_with_full_label_and_name_run() {
        let text = "Belge Geçerlilik Tarihi: ÖMER ASLAN 15.06.2027 tarihine kadar";
        assert_eq!(extract_validity_date(text), Some("15/06/2027".to_string()));
    }

    #[test]
    fn validity_with_direct_date_after_label() {
        let text = "Geçerlilik Tarihi: 15-06-2027";
        assert_eq!(extract_validity_date(text), Some("15/06/2027".to_string()));
    }

    #[test]
    fn validity_short_label() {
        let text = "Geçerli: 15/06/2027";
        assert_eq!(extract_validity_date(text), Some("15/06/2027".to_string()));
    }

    #[test]
    fn validity_absent_yields_none() {
        assert_eq!(extract_validity_date("tarihsiz metin 01/02/2023"), None);
    }

    #[test]
    fn training_dates_follow_the_scope_keyword() {
        let text =
            "İlkyardım Yönetmeliği kapsamında 01/02/2023 - 01/02/2024 tarihleri arasında 15.06.2027";
        let dates = extract_training_dates(text);
        assert_eq!(dates.start, Some("01/02/2023".to_string()));
        assert_eq!(dates.end, Some("01/02/2024".to_string()));
    }

    #[test]
    fn training_dates_ignore_dates_before_the_keyword() {
        let text = "15.06.2027 tarihli yazı kapsamında 01.02.2023 ve 03.02.2023 günleri";
        let dates = extract_training_dates(text);
        assert_eq!(dates.start, Some("01/02/2023".to_string()));
        assert_eq!(dates.end, Some("03/02/2023".to_string()));
    }

    #[test]
    fn fallback_takes_the_last_two_dates_in_document_order() {
        // no scope keyword, four date shapes in total
        let text = "01/01/2020 15/06/2027 01/02/2023 03/02/2023";
        let dates = extract_training_dates(text);
        assert_eq!(dates.start, Some("01/02/2023".to_string()));
        assert_eq!(dates.end, Some("03/02/2023".to_string()));
    }

    #[test]
    fn single_date_after_keyword_falls_back_to_whole_text() {
        let text = "15.06.2027 ile 01.01.2020 sayılı yazı kapsamında 03.02.2023";
        let dates = extract_training_dates(text);
        // primary found only one date, fallback takes the last two overall
        assert_eq!(dates.start, Some("01/01/2020".to_string()));
        assert_eq!(dates.end, Some("03/02/2023".to_string()));
    }

    #[test]
    fn fewer_than_two_dates_yields_empty_range() {
        let dates = extract_training_dates("kapsamında 01/02/2023 tek tarih");
        assert_eq!(dates, TrainingDates::default());
    }
}
