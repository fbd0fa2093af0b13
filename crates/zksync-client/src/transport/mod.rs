//! JSON-RPC transport.
//!
//! A transport performs exactly one round trip per call and never retries.
//! Two failure kinds stay distinct all the way up: [`ClientError::TransportError`]
//! when the exchange itself failed, [`ClientError::RemoteProcedureError`] when
//! the server answered with an error payload.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};

pub mod http;

pub use http::HttpTransport;

/// Error payload reported by the remote side, kept verbatim.
///
/// Servers do not always follow the JSON-RPC error object shape, so any
/// non-null `error` value is accepted and exposed through typed accessors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RpcError(Value);

impl RpcError {
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    pub fn code(&self) -> Option<i64> {
        self.0.get("code").and_then(Value::as_i64)
    }

    /// The `message` field, or the payload itself when the server sent a bare string.
    pub fn message(&self) -> Option<&str> {
        match &self.0 {
            Value::String(message) => Some(message),
            payload => payload.get("message").and_then(Value::as_str),
        }
    }

    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    pub fn payload(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.message(), self.code()) {
            (Some(message), Some(code)) => write!(f, "{message} (code {code})"),
            (Some(message), None) => f.write_str(message),
            _ => write!(f, "{}", self.0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a [Value],
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: &'a [Value]) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    /// An error payload always wins over a result.
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(error) => Err(ClientError::RemoteProcedureError(error)),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// Sends a named remote procedure call with ordered parameters.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        (**self).request(method, params).await
    }
}

#[async_trait]
impl<T> Transport for Box<T>
where
    T: Transport + ?Sized,
{
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        (**self).request(method, params).await
    }
}
