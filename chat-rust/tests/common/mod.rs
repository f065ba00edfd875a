#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use llm_chat::ChatConfig;
use serde_json::Value;
use std::{
    error::Error,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

type BoxedError = Box<dyn Error + Send + Sync>;

/// What the mock endpoint answers to every request.
#[derive(Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(body: &Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn raw(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    pub fn text(content: &str) -> Self {
        Self::json(&serde_json::json!({
            "choices": [{ "message": { "content": content } }]
        }))
    }

    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

struct SharedState {
    reply: Reply,
    requests: Mutex<Vec<CapturedRequest>>,
}

/// An in-process chat completion endpoint served under `/v1`.
pub struct MockEndpoint {
    pub base_url: String,
    state: Arc<SharedState>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl MockEndpoint {
    pub async fn start(reply: Reply) -> Result<Self, BoxedError> {
        let state = Arc::new(SharedState {
            reply,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{addr}/v1");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });

            if let Err(err) = server.await {
                eprintln!("mock chat endpoint error: {err}");
            }
        });

        Ok(Self {
            base_url,
            state,
            shutdown: Some(shutdown_tx),
            handle,
        })
    }

    pub fn config(&self) -> ChatConfig {
        ChatConfig {
            base_url: self.base_url.clone(),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let _ = self.handle.await;
    }
}

async fn chat_completions(
    State(state): State<Arc<SharedState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    state.requests.lock().unwrap().push(CapturedRequest {
        authorization,
        body,
    });

    let reply = state.reply.clone();
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    (
        reply.status,
        [("content-type", "application/json")],
        reply.body,
    )
}
