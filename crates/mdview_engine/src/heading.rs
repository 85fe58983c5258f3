use scraper::{Html, Selector};

/// Text of the first `h1`..`h6` element in document order, trimmed.
/// Headings with no text are skipped.
pub fn first_heading(html: &str) -> Option<String> {
    let selector = Selector::parse("h1, h2, h3, h4, h5, h6").ok()?;
    let fragment = Html::parse_fragment(html);
    fragment
        .select(&selector)
        .map(|heading| heading.text().collect::<String>().trim().to_string())
        .find(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::first_heading;

    #[test]
    fn picks_first_heading_in_document_order() {
        let html = "<p>intro</p><h3>Third</h3><h1>First</h1>";
        assert_eq!(first_heading(html).as_deref(), Some("Third"));
    }

    #[test]
    fn collects_nested_text() {
        let html = "<h2>Hello <em>big</em> <code>world</code></h2>";
        assert_eq!(first_heading(html).as_deref(), Some("Hello big world"));
    }

    #[test]
    fn none_without_headings() {
        assert_eq!(first_heading("<p>plain</p>"), None);
    }

    #[test]
    fn empty_heading_is_skipped() {
        assert_eq!(first_heading("<h1> </h1><h2>Real</h2>").as_deref(), Some("Real"));
    }
}
