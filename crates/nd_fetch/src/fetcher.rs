use nd_core::Result;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use crate::extract::{extract_headings, format_entries, parse_feed_entries};
use crate::source::{HttpPageSource, PageSource};

/// Turns a newspaper URL into the article text the analysts read.
#[derive(Clone)]
pub struct Fetcher {
    source: Arc<dyn PageSource>,
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("source", &"<dyn PageSource>")
            .finish()
    }
}

impl Fetcher {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    pub fn http() -> Result<Self> {
        Ok(Self::new(Arc::new(HttpPageSource::new()?)))
    }

    /// Never fails: any error is folded into the returned text so the run
    /// carries on with it as content.
    pub async fn fetch(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!("📭 Failed to fetch {}: {}", url, e);
                format!("Error fetching content: {}", e)
            }
        }
    }

    pub async fn try_fetch(&self, url: &str) -> Result<String> {
        let entries = match self.source.fetch_feed(url).await {
            Ok(body) => parse_feed_entries(&body),
            Err(e) => {
                warn!("📡 Feed request for {} failed: {}", url, e);
                Vec::new()
            }
        };
        if !entries.is_empty() {
            info!("📰 Found {} feed entries at {}", entries.len(), url);
            return Ok(format_entries(&entries));
        }

        info!("🦗 No feed entries at {}, scraping headlines instead", url);
        let html = self.source.fetch_html(url).await?;
        let headings = extract_headings(&html)?;
        info!("📰 Found {} headlines at {}", headings.len(), url);
        Ok(headings.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nd_core::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticSource {
        feed: Vec<u8>,
        html: String,
        html_calls: AtomicUsize,
    }

    impl StaticSource {
        fn new(feed: &str, html: &str) -> Self {
            Self {
                feed: feed.as_bytes().to_vec(),
                html: html.to_string(),
                html_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PageSource for StaticSource {
        async fn fetch_feed(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.feed.clone())
        }

        async fn fetch_html(&self, _url: &str) -> Result<String> {
            self.html_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.html.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl PageSource for BrokenSource {
        async fn fetch_feed(&self, _url: &str) -> Result<Vec<u8>> {
            Err(Error::Scraping("connection refused".to_string()))
        }

        async fn fetch_html(&self, _url: &str) -> Result<String> {
            Err(Error::Scraping("connection refused".to_string()))
        }
    }

    struct HtmlOnlySource;

    #[async_trait]
    impl PageSource for HtmlOnlySource {
        async fn fetch_feed(&self, _url: &str) -> Result<Vec<u8>> {
            Err(Error::Scraping("feed transport failed".to_string()))
        }

        async fn fetch_html(&self, _url: &str) -> Result<String> {
            Ok("<html><body><h1>Headline</h1></body></html>".to_string())
        }
    }

    fn rss(count: usize) -> String {
        let items: String = (1..=count)
            .map(|i| {
                format!(
                    "<item><title>Story {i}</title><description>Summary {i}</description></item>"
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Daily</title><link>https://example.com</link><description>News</description>{}</channel></rss>"#,
            items
        )
    }

    #[tokio::test]
    async fn test_feed_entries_in_order() {
        for count in [1, 3, 10] {
            let source = Arc::new(StaticSource::new(&rss(count), ""));
            let fetcher = Fetcher::new(source.clone());
            let text = fetcher.fetch("https://example.com/rss.xml").await;

            let blocks: Vec<_> = text.split("\n---\n").collect();
            assert_eq!(blocks.len(), count);
            for (i, block) in blocks.iter().enumerate() {
                assert_eq!(
                    *block,
                    format!("TITLE: Story {}\nSUMMARY: Summary {}\n", i + 1, i + 1)
                );
            }
            assert_eq!(source.html_calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_feed_truncated_to_ten() {
        let fetcher = Fetcher::new(Arc::new(StaticSource::new(&rss(15), "")));
        let text = fetcher.fetch("https://example.com/rss.xml").await;

        let blocks: Vec<_> = text.split("\n---\n").collect();
        assert_eq!(blocks.len(), 10);
        assert!(blocks[0].starts_with("TITLE: Story 1\n"));
        assert!(blocks[9].starts_with("TITLE: Story 10\n"));
        assert!(!text.contains("Story 11"));
    }

    #[tokio::test]
    async fn test_empty_feed_falls_back_to_headings() {
        let headings: String = (1..=25).map(|i| format!("<h3>Headline {}</h3>", i)).collect();
        let html = format!("<html><body><h1>Front page</h1>{}</body></html>", headings);
        let source = Arc::new(StaticSource::new(&rss(0), &html));
        let fetcher = Fetcher::new(source.clone());

        let text = fetcher.fetch("https://example.com").await;
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 20);
        assert_eq!(lines[0], "Front page");
        assert_eq!(lines[1], "Headline 1");
        assert_eq!(lines[19], "Headline 19");
        assert_eq!(source.html_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_html_page_falls_back_to_headings() {
        let html = "<html><body><h2>Only headline</h2></body></html>";
        let fetcher = Fetcher::new(Arc::new(StaticSource::new(html, html)));
        assert_eq!(fetcher.fetch("https://example.com").await, "Only headline");
    }

    #[tokio::test]
    async fn test_failure_becomes_placeholder() {
        let fetcher = Fetcher::new(Arc::new(BrokenSource));
        let text = fetcher.fetch("https://example.com/rss.xml").await;
        assert!(text.starts_with("Error fetching content: "));
        assert!(text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_feed_error_still_scrapes_headlines() {
        let fetcher = Fetcher::new(Arc::new(HtmlOnlySource));
        assert_eq!(fetcher.fetch("https://example.com").await, "Headline");
    }
}
