//! Reading and writing the sheet parameter on a full URL
//!
//! Other query pairs are preserved in order; the sheet parameter is always
//! written last so the rest of the URL stays stable across stack changes.

use url::Url;

/// Value of query parameter `name`, if present
pub fn read_param(url: &str, name: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Cannot read '{}' from unparsable URL {}: {}", name, url, e);
            return None;
        }
    };
    parsed
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// `url` with parameter `name` set to `value`, or removed when `value` is empty
pub fn with_param(url: &str, name: &str, value: &str) -> Result<String, url::ParseError> {
    let mut parsed = Url::parse(url)?;
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() && value.is_empty() {
        parsed.set_query(None);
    } else {
        let mut query = parsed.query_pairs_mut();
        query.clear();
        query.extend_pairs(kept.iter());
        if !value.is_empty() {
            query.append_pair(name, value);
        }
    }

    Ok(parsed.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_param_on_bare_url() {
        let url = with_param("https://admin.local/orders", "sheets", "abc").unwrap();
        assert_eq!(url, "https://admin.local/orders?sheets=abc");
        assert_eq!(read_param(&url, "sheets").as_deref(), Some("abc"));
    }

    #[test]
    fn test_other_params_are_preserved() {
        let url =
            with_param("https://admin.local/orders?page=2&q=red", "sheets", "abc").unwrap();
        assert_eq!(url, "https://admin.local/orders?page=2&q=red&sheets=abc");

        let replaced = with_param(&url, "sheets", "xyz").unwrap();
        assert_eq!(replaced, "https://admin.local/orders?page=2&q=red&sheets=xyz");
    }

    #[test]
    fn test_empty_value_removes_param() {
        let url = with_param("https://admin.local/?sheets=abc", "sheets", "").unwrap();
        assert_eq!(url, "https://admin.local/");
        assert_eq!(read_param(&url, "sheets"), None);

        let url = with_param("https://admin.local/?page=3&sheets=abc", "sheets", "").unwrap();
        assert_eq!(url, "https://admin.local/?page=3");
    }

    #[test]
    fn test_json_value_is_percent_encoded_and_read_back() {
        let json = r#"[{"t":"order:view","p":{"id":7}}]"#;
        let url = with_param("https://admin.local/", "sheets", json).unwrap();
        assert!(!url.contains('"'));
        assert_eq!(read_param(&url, "sheets").as_deref(), Some(json));
    }

    #[test]
    fn test_unparsable_url() {
        assert!(with_param("not a url", "sheets", "abc").is_err());
        assert_eq!(read_param("not a url", "sheets"), None);
    }
}
