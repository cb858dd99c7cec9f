// Azure AI services over plain REST.
//
// Every client shares the same conventions: a subscription key header, a
// trimmed base endpoint, and non-success statuses turned into errors that
// say which service failed and whether it was an authentication problem.

pub mod language;
pub mod translator;
pub mod vision;

use anyhow::{Context, Result};
use reqwest::{Response, StatusCode};

pub use language::AzureLanguage;
pub use translator::AzureTranslator;
pub use vision::AzureVisionOcr;

pub(crate) const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub(crate) const USER_AGENT: &str = concat!("analizador/", env!("CARGO_PKG_VERSION"));

pub(crate) fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

pub(crate) fn base_url(endpoint: &str) -> String {
    endpoint.trim_end_matches('/').to_string()
}

/// Pass successful responses through; turn everything else into a descriptive error.
pub(crate) async fn ensure_success(response: Response, service: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        anyhow::bail!("{service} authentication failed ({status}): {body}");
    }
    anyhow::bail!("{service} returned {status}: {body}");
}
