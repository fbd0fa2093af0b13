use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::{JsonRpcRequest, JsonRpcResponse, Transport};
use crate::config::{ClientConfig, DEFAULT_TIMEOUT_SECONDS};
use crate::error::{ClientError, Result};

/// JSON-RPC 2.0 over HTTP POST.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    url: Url,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(url: Url) -> Result<Self> {
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECONDS);
        Self::with_timeouts(url, timeout, timeout)
    }

    pub fn with_timeouts(url: Url, connect_timeout: Duration, call_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(call_timeout)
            .build()
            .map_err(|e| ClientError::TransportError(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_timeouts(
            config.rpc_url()?,
            config.connect_timeout(),
            config.call_timeout(),
        )
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(method, id, "sending rpc request");

        let response = self
            .client
            .post(self.url.clone())
            .json(&JsonRpcRequest::new(id, method, &params))
            .send()
            .await
            .map_err(|e| ClientError::TransportError(format!("{method} request failed: {e}")))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            ClientError::TransportError(format!("failed to read {method} response: {e}"))
        })?;
        let envelope: JsonRpcResponse = serde_json::from_slice(&body).map_err(|e| {
            ClientError::TransportError(format!(
                "malformed {method} response (http {status}): {e}"
            ))
        })?;

        envelope.into_result().inspect_err(|e| {
            if let ClientError::RemoteProcedureError(error) = e {
                tracing::warn!(method, id, code = ?error.code(), "rpc error: {error}");
            }
        })
    }
}
