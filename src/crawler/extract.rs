//! Text and link extraction from fetched pages
//!
//! Both extractors are pure functions of their inputs. Malformed markup is
//! not an error: the parser recovers and extraction works with whatever
//! document it produced.

use scraper::{Html, Selector};
use url::Url;

/// Extracts the visible text of a page as one string
///
/// Concatenates every text node in document order with markup stripped.
/// No distinction is made for script or style content; their text is
/// included like any other node's.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document.root_element().text().collect()
}

/// Extracts the crawlable links of a page as absolute URLs
///
/// # Link Rules
///
/// **Include:** every `<a href="...">`, with relative hrefs resolved
/// against `origin`.
///
/// **Exclude:** empty hrefs, fragment-only hrefs (`#...`), `mailto:`,
/// `javascript:`, `tel:` and `data:` hrefs, and anything that does not
/// resolve to an http/https URL.
///
/// Duplicates are permitted in the output; de-duplication is the visited
/// set's responsibility, not the extractor's.
///
/// # Arguments
///
/// * `html` - The page content
/// * `origin` - The URL the page was fetched from, used as the base for
///   resolving relative hrefs
pub fn extract_links(html: &str, origin: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(url) = resolve_href(href, origin) {
                    links.push(url);
                }
            }
        }
    }

    links
}

/// Resolves an href to an absolute URL, or None if it should be excluded
fn resolve_href(href: &str, origin: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("mailto:")
        || href.starts_with("javascript:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let resolved = origin.join(href).ok()?;

    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}
