//! Column and key name normalization.

/// Normalizes a header into the canonical form used for lookups.
///
/// Strips a byte-order mark, trims, collapses internal whitespace to single
/// spaces and title-cases every word, so `"  category "` and `"CATEGORY"`
/// both become `"Category"`.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim_matches('\u{feff}').trim();
    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    title_case(&collapsed)
}

/// Upper-cases the first letter of every word and lower-cases the rest.
///
/// A word starts at any letter that does not follow another letter, so
/// `"entry_value"` becomes `"Entry_Value"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous_is_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

/// Position of the first header whose normalized form equals `name`.
pub fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| normalize_header(header) == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("category"), "Category");
        assert_eq!(normalize_header("  VALUE "), "Value");
        assert_eq!(normalize_header("\u{feff}Category"), "Category");
        assert_eq!(normalize_header("entry   value"), "Entry Value");
    }

    #[test]
    fn test_title_case_word_boundaries() {
        assert_eq!(title_case("hrv_ms"), "Hrv_Ms");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("1st value"), "1St Value");
    }

    #[test]
    fn test_find_column() {
        let headers = vec!["value".to_string(), " Category".to_string()];
        assert_eq!(find_column(&headers, "Category"), Some(1));
        assert_eq!(find_column(&headers, "Value"), Some(0));
        assert_eq!(find_column(&headers, "Label"), None);
    }
}
