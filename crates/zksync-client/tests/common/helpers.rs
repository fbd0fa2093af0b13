use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;
use zksync_client::{ClientError, DefaultProvider, Result, RpcError, Transport};

/// Transport answering from canned per-method replies and recording every call.
#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<String, std::result::Result<Value, RpcError>>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, method: &str, result: Value) -> Self {
        self.replies.insert(method.to_string(), Ok(result));
        self
    }

    pub fn fail(mut self, method: &str, code: i64, message: &str) -> Self {
        self.replies.insert(
            method.to_string(),
            Err(RpcError::new(json!({"code": code, "message": message}))),
        );
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Params of every call to `method`, in order.
    pub fn calls_to(&self, method: &str) -> Vec<Vec<Value>> {
        self.calls()
            .into_iter()
            .filter(|(name, _)| name == method)
            .map(|(_, params)| params)
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));
        match self.replies.get(method) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(error)) => Err(ClientError::RemoteProcedureError(error.clone())),
            None => Err(ClientError::TransportError(format!(
                "no canned reply for {method}"
            ))),
        }
    }
}

pub fn mock_provider(transport: MockTransport) -> (Arc<MockTransport>, DefaultProvider<Arc<MockTransport>>) {
    let transport = Arc::new(transport);
    (Arc::clone(&transport), DefaultProvider::new(transport))
}

/// Serve `reply` as the JSON-RPC envelope for every request, echoing the request id.
/// Returns the stub's url and the request bodies it received.
pub async fn spawn_rpc_stub(reply: Value) -> (Url, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&received);
    let app = Router::new().route(
        "/",
        post(move |Json(body): Json<Value>| {
            let log = Arc::clone(&log);
            let mut reply = reply.clone();
            async move {
                reply["id"] = body["id"].clone();
                log.lock().unwrap().push(body);
                Json(reply)
            }
        }),
    );
    (serve(app).await, received)
}

/// Serve a fixed, possibly non-JSON, body.
pub async fn spawn_raw_stub(body: &'static str) -> Url {
    let app = Router::new().route("/", post(move || async move { body }));
    serve(app).await
}

async fn serve(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Couldn't bind stub listener");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/")).unwrap()
}

/// Url of a local port nothing listens on.
pub async fn closed_port_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/")).unwrap()
}
