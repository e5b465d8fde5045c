//! Response handling shared by the HTTPS providers

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use ov_core::errors::DeliveryError;

use crate::InfrastructureError;

/// Longest slice of an unparseable provider body kept in an error
const BODY_PREVIEW_CHARS: usize = 100;

/// Build the HTTP client a provider sends through
pub(crate) fn build_client(timeout: Duration) -> Result<Client, InfrastructureError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Read a provider reply and turn it into JSON or a delivery error
pub(crate) async fn read_response(
    provider: &str,
    response: Response,
) -> Result<Value, DeliveryError> {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| DeliveryError::transport(provider, e.to_string()))?;

    debug!(provider, status, "Provider responded");
    interpret_response(provider, status, &body)
}

/// Classify a provider reply
///
/// A body that is not JSON is a transport error; a non-2xx status is a
/// rejection carrying the provider's own `message` when it sent one.
pub(crate) fn interpret_response(
    provider: &str,
    status: u16,
    body: &str,
) -> Result<Value, DeliveryError> {
    let data: Value = serde_json::from_str(body).map_err(|_| {
        let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
        DeliveryError::transport(provider, format!("invalid response: {}", preview))
    })?;

    if !(200..300).contains(&status) {
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("API error: {}", status));
        return Err(DeliveryError::rejected(provider, message));
    }

    Ok(data)
}
