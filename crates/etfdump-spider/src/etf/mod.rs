/// ETF fund lookup and detail-page scraping against the [cbonds] site.
///
/// [cbonds]: https://cbonds.com/etf/
pub mod cbonds;

/// Extraction of the `structure` array literal embedded in a detail page.
pub mod extract;

/// Normalization of raw structure records into a canonical holdings report.
pub mod holdings;
