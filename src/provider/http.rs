//! Shared HTTP plumbing for providers

use super::ProviderError;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// Append percent-encoded path segments to a base URL
pub(crate) fn endpoint(base: &str, segments: &[&str]) -> Result<Url, ProviderError> {
    let mut url = Url::parse(base).map_err(|e| ProviderError::InvalidUrl(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ProviderError::InvalidUrl(format!("{base}: cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// GET a URL and decode the JSON body
///
/// Non-success statuses and undecodable bodies are reported separately so
/// the chain can log why a provider was skipped.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
    query: &[(&str, &str)],
) -> Result<T, ProviderError> {
    tracing::debug!(url = %url, "Requesting quote");

    let response = client.get(url).query(query).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))
}
