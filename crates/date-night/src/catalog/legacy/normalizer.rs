pub(crate) fn clean_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| clean_text(&raw))
        .filter(|cleaned| !cleaned.is_empty())
}

pub(crate) fn clean_website(value: Option<String>) -> Option<String> {
    clean_optional(value).map(|url| {
        if url.starts_with("http://") || url.starts_with("https://") {
            url
        } else {
            format!("https://{url}")
        }
    })
}

/// Lookup key for cuisine tags: `"Italian Restaurant"`, `"italian-restaurant"`
/// and `"italian_restaurant"` all collapse to the same key.
pub(crate) fn tag_key(tag: &str) -> String {
    clean_text(tag)
        .to_ascii_lowercase()
        .replace([' ', '-'], "_")
}

pub(crate) fn digits(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace_and_strips_bom() {
        assert_eq!(
            clean_text("\u{feff}  Bestia \n  Restaurant "),
            "Bestia Restaurant"
        );
    }

    #[test]
    fn clean_website_adds_scheme_and_drops_blanks() {
        assert_eq!(
            clean_website(Some("www.bestiala.com".to_string())).as_deref(),
            Some("https://www.bestiala.com")
        );
        assert_eq!(
            clean_website(Some("http://example.com".to_string())).as_deref(),
            Some("http://example.com")
        );
        assert!(clean_website(Some("   ".to_string())).is_none());
    }

    #[test]
    fn tag_key_normalizes_separators() {
        assert_eq!(tag_key("Italian Restaurant"), "italian_restaurant");
        assert_eq!(tag_key("wine-bar"), "wine_bar");
    }
}
