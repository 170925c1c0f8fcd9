//! Defensive DOM queries shared by both scraping pipelines.
//!
//! Every helper treats a selector that fails to parse and a selector that
//! matches nothing the same way: "not found". One broken entry in a fallback
//! table must never abort the surrounding extraction.

use scraper::{ElementRef, Html, Selector};

/// First element matching `selector`, or `None` on parse failure or no match.
pub fn select_first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel).next()
}

/// Scoped variant of [`select_first`] rooted at an element.
pub fn select_first_in<'a>(root: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    root.select(&sel).next()
}

/// All elements matching the first candidate selector that yields any.
pub fn select_all<'a>(doc: &'a Html, candidates: &[&str]) -> Vec<ElementRef<'a>> {
    for selector in candidates {
        if let Ok(sel) = Selector::parse(selector) {
            let found: Vec<ElementRef> = doc.select(&sel).collect();
            if !found.is_empty() {
                return found;
            }
        }
    }
    Vec::new()
}

/// Scoped variant of [`select_all`].
pub fn select_all_in<'a>(root: ElementRef<'a>, candidates: &[&str]) -> Vec<ElementRef<'a>> {
    for selector in candidates {
        if let Ok(sel) = Selector::parse(selector) {
            let found: Vec<ElementRef> = root.select(&sel).collect();
            if !found.is_empty() {
                return found;
            }
        }
    }
    Vec::new()
}

/// Element text with whitespace collapsed.
pub fn text_of(el: ElementRef) -> String {
    el.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first candidate that matches with non-empty text.
pub fn first_text(doc: &Html, candidates: &[&str]) -> Option<String> {
    for selector in candidates {
        if let Some(el) = select_first(doc, selector) {
            let text = text_of(el);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Scoped variant of [`first_text`].
pub fn first_text_in(root: ElementRef, candidates: &[&str]) -> Option<String> {
    for selector in candidates {
        if let Some(el) = select_first_in(root, selector) {
            let text = text_of(el);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Attribute of the first candidate that matches with the attribute present.
pub fn first_attr(doc: &Html, candidates: &[&str], attr: &str) -> Option<String> {
    for selector in candidates {
        if let Some(el) = select_first(doc, selector) {
            if let Some(value) = el.value().attr(attr) {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Scoped variant of [`first_attr`].
pub fn first_attr_in(root: ElementRef, candidates: &[&str], attr: &str) -> Option<String> {
    for selector in candidates {
        if let Some(el) = select_first_in(root, selector) {
            if let Some(value) = el.value().attr(attr) {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// First-non-null-wins combinator over a fallback table: text of each
/// candidate in order, run through `parse`, first `Some` wins.
pub fn first_parsed<T>(
    doc: &Html,
    candidates: &[&str],
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    for selector in candidates {
        if let Some(el) = select_first(doc, selector) {
            if let Some(value) = parse(&text_of(el)) {
                return Some(value);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
        <html><body>
            <h1 data-testid="name">  Widget   Deluxe </h1>
            <div class="price">Rp25.000</div>
            <img class="pic" src="https://cdn.example.com/a.jpg"/>
            <ul><li class="row">one</li><li class="row">two</li></ul>
        </body></html>
    "#;

    #[test]
    fn test_invalid_selector_is_not_found() {
        let doc = Html::parse_document(DOC);
        assert!(select_first(&doc, ":::garbage:::").is_none());
        assert_eq!(first_text(&doc, &[":::garbage:::"]), None);
    }

    #[test]
    fn test_fallback_order() {
        let doc = Html::parse_document(DOC);
        let text = first_text(&doc, &[".missing", "[data-testid=\"name\"]", ".price"]);
        assert_eq!(text.as_deref(), Some("Widget Deluxe"));
    }

    #[test]
    fn test_first_parsed_skips_unparseable() {
        let doc = Html::parse_document(DOC);
        let price = first_parsed(
            &doc,
            &["[data-testid=\"name\"]", ".price"],
            crate::helpers::extract_integer,
        );
        assert_eq!(price, Some(25_000));
    }

    #[test]
    fn test_select_all_uses_first_matching_candidate() {
        let doc = Html::parse_document(DOC);
        let rows = select_all(&doc, &[".no-rows", ".row"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(text_of(rows[0]), "one");
    }

    #[test]
    fn test_first_attr() {
        let doc = Html::parse_document(DOC);
        assert_eq!(
            first_attr(&doc, &[".pic"], "src").as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
        assert_eq!(first_attr(&doc, &[".pic"], "data-src"), None);
    }
}
