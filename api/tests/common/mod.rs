use anyhow::Result;
use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use quiz_api::{router, AppState, ServerSettings};
use quiz_generator::{GeneratorConfig, TextGenerator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Answers every prompt with the same reply, or fails every call.
pub struct StubGenerator {
    reply: Option<String>,
    configured: bool,
    pub calls: AtomicUsize,
}

impl StubGenerator {
    pub fn replying(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { reply: Some(reply.into()), configured: true, calls: AtomicUsize::new(0) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { reply: None, configured: true, calls: AtomicUsize::new(0) })
    }

    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self { reply: None, configured: false, calls: AtomicUsize::new(0) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| {
                anyhow::anyhow!("Gemini model not available. Please check API configuration.")
            })
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

pub const TWO_BLOCKS: &str = r#"QUESTION_START
Type: multiple-choice
Question: Which practice supports active learning?
Options:
A) Lecturing only
B) Problem-based learning
C) Silent reading
D) Rote copying
Answer: B
Explanation: Problem-based learning engages students directly.
Difficulty: medium
QUESTION_END
QUESTION_START
Type: true-false
Question: Portfolio assessment is a modern evaluation method.
Answer: True
Explanation: The chapter lists portfolio-based evaluations.
Difficulty: medium
QUESTION_END
"#;

pub fn app(generator: Arc<StubGenerator>) -> Router {
    let config = GeneratorConfig::default().with_api_key("test-key");
    router(AppState::new(generator, &config, ServerSettings::default()))
}

pub async fn send(
    app: Router,
    request: Request<Body>,
) -> (axum::http::StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.expect("router should respond");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, json)
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request build should succeed")
}
