//! Request plumbing shared by the sub-clients.

use crate::error::{ClientError, Result};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::warn;
use url::Url;

/// Join percent-encoded path segments onto the base URL.
pub(crate) fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", base_url)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Send a request and turn any non-success status into a [`ClientError`].
pub(crate) async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let err = ClientError::from_response(status.as_u16(), &body);
    warn!(status = %status, url = %url, error = %err.message(), "Request failed");
    Err(err)
}

/// Parse a successful response body as JSON.
pub(crate) async fn json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::Parse(format!("Failed to parse {}: {}", what, e)))
}
