/// Hard-failure classes of the scrape pipeline. Transport failures pass
/// through untyped as [`reqwest::Error`] inside [`anyhow::Error`];
/// soft outcomes (no fund match, no structure on page) are ordinary
/// [`Scrape`] variants and never reach this enum.
///
/// [`Scrape`]: crate::etf::cbonds::Scrape
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("suggest API returned status {0}")]
    SuggestStatus(reqwest::StatusCode),

    #[error("ETF page returned status {0}")]
    PageStatus(reqwest::StatusCode),

    #[error("failed to parse structure JSON: {0}")]
    MalformedStructure(#[from] serde_json::Error),
}
