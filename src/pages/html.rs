// Small helpers for building escaped HTML fragments

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn format_price(price: f64) -> String {
    format!("€{:.2}", price)
}

/// Build `?k=v&...` from the pairs whose value is present. Values are percent-encoded.
pub fn query_string(pairs: &[(&str, Option<&str>)]) -> String {
    let encoded: Vec<String> = pairs
        .iter()
        .filter_map(|(k, v)| v.map(|v| format!("{}={}", k, urlencoding::encode(v))))
        .collect();
    if encoded.is_empty() {
        String::new()
    } else {
        format!("?{}", encoded.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape(r#"<a href="x">Tom's & Co</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom&#39;s &amp; Co&lt;/a&gt;"
        );
    }

    #[test]
    fn formats_price_with_two_decimals() {
        assert_eq!(format_price(12.5), "€12.50");
        assert_eq!(format_price(3.0), "€3.00");
    }

    #[test]
    fn query_string_skips_absent_values() {
        assert_eq!(
            query_string(&[("search", Some("chef knife")), ("category", None), ("page", Some("2"))]),
            "?search=chef%20knife&page=2"
        );
        assert_eq!(query_string(&[("category", None)]), "");
    }
}
