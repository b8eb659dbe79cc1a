// Shared HTTP client utilities

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// User-Agent string for all HTTP requests
const USER_AGENT: &str = concat!("modfix/", env!("CARGO_PKG_VERSION"));

/// Build an HTTP client with our User-Agent and a per-request timeout
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Fetch JSON from a URL and deserialize it
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    let response: Response = client.get(url).send().await?;

    if response.status() == StatusCode::NOT_FOUND {
        anyhow::bail!("Resource not found: {}", url);
    }

    if !response.status().is_success() {
        anyhow::bail!("HTTP request failed: {} ({})", url, response.status());
    }

    let result = response.json().await?;
    Ok(result)
}

/// Encode a list as the JSON-array string the Modrinth filters expect
/// (e.g., `["1.20.1"]`), percent-encoded for use in a query string
pub fn json_list_param(values: &[&str]) -> String {
    let list = serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string());
    urlencoding::encode(&list).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_list_param() {
        assert_eq!(json_list_param(&["1.20.1"]), "%5B%221.20.1%22%5D");
        assert_eq!(json_list_param(&[]), "%5B%5D");
    }
}
