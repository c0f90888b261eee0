#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedPreset {
    pub key: &'static str,
    pub name: &'static str,
    pub url: &'static str,
}

pub const PRESETS: &[FeedPreset] = &[
    FeedPreset {
        key: "bbc-world",
        name: "BBC News (World)",
        url: "https://feeds.bbci.co.uk/news/rss.xml",
    },
    FeedPreset {
        key: "bbc-sport",
        name: "BBC Sport",
        url: "https://feeds.bbci.co.uk/sport/rss.xml",
    },
    FeedPreset {
        key: "bbc-technology",
        name: "BBC Technology",
        url: "https://feeds.bbci.co.uk/news/technology/rss.xml",
    },
    FeedPreset {
        key: "times-of-india",
        name: "Times of India",
        url: "https://timesofindia.indiatimes.com/rssfeeds/296589292.cms",
    },
];

pub fn default_preset() -> &'static FeedPreset {
    &PRESETS[0]
}

pub fn find_preset(key: &str) -> Option<&'static FeedPreset> {
    let key = key.trim().to_lowercase();
    PRESETS.iter().find(|p| p.key == key)
}
