pub mod error;
pub mod etf;

/// Shortcut for required API elements.
pub mod http {
    pub use reqwest::Client as HttpClient;
}

use tracing::error;

// cbonds serves browser traffic; the default reqwest agent gets refused
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Build the standard HTTP client used for all cbonds calls.
///
/// The `USER_AGENT` environment variable (or a `.env` entry) overrides the
/// default browser-like agent.
pub fn std_client_build() -> anyhow::Result<http::HttpClient> {
    let user_agent =
        dotenv::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
    let client = reqwest::ClientBuilder::new()
        .user_agent(user_agent)
        .build()
        .map_err(|err| {
            error!("failed to build reqwest client, error({err})");
            err
        })?;
    Ok(client)
}
