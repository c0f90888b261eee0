use async_trait::async_trait;
use nd_core::{Error, Result};
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use url::Url;

const HTML_USER_AGENT: &str = "Mozilla/5.0";
const HTML_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the fetcher gets its bytes from.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Returns the raw body at `url`, to be parsed as a feed
    async fn fetch_feed(&self, url: &str) -> Result<Vec<u8>>;

    /// Returns the body at `url` as HTML text
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

pub struct HttpPageSource {
    feed_client: Client,
    html_client: Client,
}

impl HttpPageSource {
    pub fn new() -> Result<Self> {
        let html_client = Client::builder()
            .user_agent(HTML_USER_AGENT)
            .timeout(HTML_TIMEOUT)
            .build()?;
        Ok(Self {
            feed_client: Client::new(),
            html_client,
        })
    }
}

impl fmt::Debug for HttpPageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPageSource")
            .field("feed_client", &"<reqwest::Client>")
            .field("html_client", &"<reqwest::Client>")
            .finish()
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_feed(&self, url: &str) -> Result<Vec<u8>> {
        let url = parse_url(url)?;
        let response = self.feed_client.get(url).send().await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        let url = parse_url(url)?;
        let response = self.html_client.get(url).send().await?;
        Ok(response.text().await?)
    }
}
