use crate::error::ScrapeError;
use crate::etf::extract;
use crate::etf::holdings::{self, HoldingsReport};
use crate::http::*;
use serde::de::Visitor;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, info};

const SUGGEST_URL: &str = "https://cbonds.com/api/etf/exchange_traded_funds/suggest";
const ETF_URL: &str = "https://cbonds.com/etf";

const SUGGEST_TIMEOUT: Duration = Duration::from_secs(15);
const PAGE_TIMEOUT: Duration = Duration::from_secs(30);

// scrape
// ----------------------------------------------------------------------------

/// Outcome of a full scrape. `NoFund` and `NoStructure` are ordinary
/// empty-report outcomes, distinct from errors; callers map them to a
/// zero exit code.
#[derive(Debug)]
pub enum Scrape {
    Report(HoldingsReport),
    NoFund { isin: String },
    NoStructure { cbonds_id: String },
}

/// Collect the holdings report for `isin`: resolve the cbonds fund id,
/// fetch the fund's detail page, extract the embedded structure records,
/// and normalize them. Strictly sequential, nothing is retried or cached.
pub async fn scrape(http_client: &HttpClient, isin: &str) -> anyhow::Result<Scrape> {
    let time = std::time::Instant::now();

    let cbonds_id = match resolve_id(http_client, isin).await? {
        Some(id) => id,
        None => {
            info!("no cbonds fund found for {isin}");
            return Ok(Scrape::NoFund {
                isin: isin.to_string(),
            });
        }
    };
    debug!("resolved {isin} to cbonds fund {cbonds_id}");

    let html = fetch_page(http_client, &cbonds_id).await?;

    let records = match extract::structure(&html)? {
        Some(records) => records,
        None => {
            info!("no structure data on page for cbonds fund {cbonds_id}");
            return Ok(Scrape::NoStructure { cbonds_id });
        }
    };

    let normalized = holdings::normalize(&records);
    info!(
        "holdings collected for {isin}, time elapsed: {:?}",
        time.elapsed()
    );

    Ok(Scrape::Report(HoldingsReport {
        total_count: normalized.holdings.len(),
        holdings: normalized.holdings,
        cbonds_id,
        available_fields: normalized.available_fields,
    }))
}

/// Resolve an ISIN to a cbonds fund id through the suggest API; `None`
/// means the site knows no fund for that ISIN.
pub async fn resolve_id(http_client: &HttpClient, isin: &str) -> anyhow::Result<Option<String>> {
    let url = format!("{SUGGEST_URL}/{isin}/");

    debug!("fetching cbonds suggest for {isin}");
    let response = http_client
        .get(&url)
        .header(reqwest::header::ACCEPT, "application/json")
        .timeout(SUGGEST_TIMEOUT)
        .send()
        .await
        .map_err(|err| {
            error!("failed to fetch cbonds suggest for {isin}, error({err})");
            err
        })?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        error!("cbonds suggest returned status {status} for {isin}");
        return Err(ScrapeError::SuggestStatus(status).into());
    }

    let suggest: SuggestResponse = response.json().await.map_err(|err| {
        error!("failed to parse cbonds suggest JSON for {isin}, error({err})");
        err
    })?;

    Ok(suggest
        .response
        .items
        .into_iter()
        .next()
        .map(|item| item.id))
}

/// Fetch the raw HTML of a fund's detail page.
pub async fn fetch_page(http_client: &HttpClient, cbonds_id: &str) -> anyhow::Result<String> {
    let url = format!("{ETF_URL}/{cbonds_id}/");

    debug!("fetching cbonds detail page for fund {cbonds_id}");
    let response = http_client
        .get(&url)
        .timeout(PAGE_TIMEOUT)
        .send()
        .await
        .map_err(|err| {
            error!("failed to fetch detail page for fund {cbonds_id}, error({err})");
            err
        })?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        error!("cbonds detail page returned status {status} for fund {cbonds_id}");
        return Err(ScrapeError::PageStatus(status).into());
    }

    let html = response.text().await.map_err(|err| {
        error!("failed to read detail page body for fund {cbonds_id}, error({err})");
        err
    })?;

    Ok(html)
}

// de
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SuggestResponse {
    #[serde(default)]
    response: SuggestBody,
}

#[derive(Debug, Default, Deserialize)]
struct SuggestBody {
    #[serde(default)]
    items: Vec<SuggestItem>,
}

#[derive(Debug, Deserialize)]
struct SuggestItem {
    #[serde(deserialize_with = "de_id")]
    id: String,
}

// the suggest API has served ids both as numbers and as strings
fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a numeric or string fund id")
        }

        fn visit_u64<E: serde::de::Error>(self, id: u64) -> Result<Self::Value, E> {
            Ok(id.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, id: i64) -> Result<Self::Value, E> {
            Ok(id.to_string())
        }

        fn visit_str<E: serde::de::Error>(self, id: &str) -> Result<Self::Value, E> {
            Ok(id.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

// tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::SuggestResponse;

    #[test]
    fn suggest_id_accepts_numbers_and_strings() {
        let de: SuggestResponse =
            serde_json::from_str(r#"{"response":{"items":[{"id":1807}]}}"#).unwrap();
        assert_eq!(de.response.items[0].id, "1807");

        let de: SuggestResponse =
            serde_json::from_str(r#"{"response":{"items":[{"id":"1807"}]}}"#).unwrap();
        assert_eq!(de.response.items[0].id, "1807");
    }

    #[test]
    fn suggest_tolerates_missing_keys() {
        let de: SuggestResponse = serde_json::from_str("{}").unwrap();
        assert!(de.response.items.is_empty());

        let de: SuggestResponse = serde_json::from_str(r#"{"response":{}}"#).unwrap();
        assert!(de.response.items.is_empty());
    }

    #[test]
    fn suggest_takes_the_first_item() {
        let de: SuggestResponse = serde_json::from_str(
            r#"{"response":{"items":[{"id":1807},{"id":2044}]}}"#,
        )
        .unwrap();
        assert_eq!(
            de.response.items.into_iter().next().map(|item| item.id),
            Some("1807".to_string())
        );
    }
}
