//! In-process doubles and a request helper for handler tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::errors::AppError;
use crate::interview::memory::MemoryInterviewStore;
use crate::llm_client::{CompletionProvider, LlmError};
use crate::routes::build_router;
use crate::state::AppState;

pub const ALICE_TOKEN: &str = "alice-session";
pub const BOB_TOKEN: &str = "bob-session";

/// Fixed session table: token → user id.
pub struct StaticSessions(HashMap<String, String>);

impl StaticSessions {
    fn standard() -> Self {
        Self(HashMap::from([
            (ALICE_TOKEN.to_string(), "user-alice".to_string()),
            (BOB_TOKEN.to_string(), "user-bob".to_string()),
        ]))
    }
}

#[async_trait]
impl SessionStore for StaticSessions {
    async fn resolve(&self, token: &str) -> Result<Option<String>, AppError> {
        Ok(self.0.get(token).cloned())
    }
}

/// Completion provider that records prompts and answers with a canned reply.
pub struct StubCompletion {
    reply: Result<String, (u16, String)>,
    prompts: Mutex<Vec<String>>,
}

impl StubCompletion {
    pub fn reply(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::default(),
        }
    }

    pub fn fail(status: u16, message: &str) -> Self {
        Self {
            reply: Err((status, message.to_string())),
            prompts: Mutex::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(|(status, message)| LlmError::Api { status, message })
    }
}

pub struct TestApp {
    pub router: Router,
    pub interviews: Arc<MemoryInterviewStore>,
    pub completion: Arc<StubCompletion>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_completion(StubCompletion::reply("{\"interviewQuestions\": []}"))
    }

    pub fn with_completion(completion: StubCompletion) -> Self {
        let interviews = Arc::new(MemoryInterviewStore::default());
        let completion = Arc::new(completion);
        let state = AppState {
            interviews: interviews.clone(),
            sessions: Arc::new(StaticSessions::standard()),
            llm: completion.clone(),
            config: Config::for_tests(),
        };
        Self {
            router: build_router(state),
            interviews,
            completion,
        }
    }
}

/// Sends one request through the router and decodes the JSON response body.
pub async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, json)
}
