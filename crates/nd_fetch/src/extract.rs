use nd_core::{Error, Result};
use scraper::{Html, Selector};
use tracing::debug;

pub const MAX_FEED_ENTRIES: usize = 10;
pub const MAX_HEADINGS: usize = 20;
pub const ENTRY_SEPARATOR: &str = "\n---\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub summary: String,
}

/// Parses `body` as RSS, Atom or JSON Feed.
///
/// Anything feed-rs cannot read counts as a feed without entries, so callers
/// fall through to the HTML path instead of failing.
pub fn parse_feed_entries(body: &[u8]) -> Vec<FeedEntry> {
    let feed = match feed_rs::parser::parse(body) {
        Ok(feed) => feed,
        Err(e) => {
            debug!("Body is not a feed: {}", e);
            return Vec::new();
        }
    };

    feed.entries
        .into_iter()
        .take(MAX_FEED_ENTRIES)
        .map(|entry| {
            let title = entry.title.map(|t| t.content).unwrap_or_default();
            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();
            FeedEntry { title, summary }
        })
        .collect()
}

pub fn format_entries(entries: &[FeedEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("TITLE: {}\nSUMMARY: {}\n", entry.title, entry.summary))
        .collect::<Vec<_>>()
        .join(ENTRY_SEPARATOR)
}

/// Text of the first `h1`-`h3` elements, in document order.
pub fn extract_headings(html: &str) -> Result<Vec<String>> {
    let selector = Selector::parse("h1, h2, h3")
        .map_err(|e| Error::Scraping(format!("Invalid selector: {:?}", e)))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .take(MAX_HEADINGS)
        .map(|el| el.text().map(str::trim).collect::<String>())
        .collect())
}
