//! HTTP GET-over-JSON fetchers.
//!
//! The reference fetcher implementation: fetch a URL, expect a 2xx with a
//! JSON body, decode it into a typed payload. Cancellation is honored by
//! racing the request against the token, so an abandoned request stops
//! consuming the connection as soon as the loader loses interest.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::token::CancelToken;

/// Timeouts for HTTP fetchers. Deserializable so embedding applications
/// can source them from their own configuration files.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpOptions {
    /// Total request timeout in seconds.
    pub timeout_seconds: u64,
    /// Connection establishment timeout in seconds.
    pub connect_timeout_seconds: u64,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 5,
        }
    }
}

impl HttpOptions {
    /// Build a client honoring these timeouts.
    pub fn build_client(&self) -> Result<Client, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .connect_timeout(Duration::from_secs(self.connect_timeout_seconds))
            .build()?;
        Ok(client)
    }
}

/// GET `url` and decode the JSON body, racing against cancellation.
///
/// Non-2xx statuses become [`FetchError::Http`]; an undecodable body
/// becomes [`FetchError::Decode`]; network failures become
/// [`FetchError::Transport`]. A cancelled token aborts the request and
/// resolves with [`FetchError::Cancelled`].
pub async fn get_json<T>(client: &Client, url: &str, token: &CancelToken) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let request = async {
        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        let value = serde_json::from_str(&body)?;
        Ok(value)
    };

    tokio::select! {
        () = token.cancelled() => Err(FetchError::Cancelled),
        outcome = request => outcome,
    }
}

/// Package a GET-JSON call as a single-shot fetcher for a loader.
pub fn json_fetcher<T>(client: Client, url: impl Into<String>) -> impl Fetcher<T>
where
    T: DeserializeOwned + Send + 'static,
{
    let url = url.into();
    move |token: CancelToken| async move { get_json(&client, &url, &token).await }
}
