//! Router tests with test doubles behind the chain

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use insta::assert_yaml_snapshot;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use ragapi_core::{
    Error, GenerationResult, LLMProvider, PromptTemplate, Result, RetrievedDocument, Retriever,
};
use ragapi_rag::RagChain;

use super::{create_router, AppState};

struct StubRetriever {
    documents: Vec<&'static str>,
    error: Option<&'static str>,
    calls: AtomicUsize,
}

#[async_trait]
impl Retriever for StubRetriever {
    async fn retrieve(&self, _question: &str) -> Result<Vec<RetrievedDocument>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.error {
            Some(message) => Err(Error::VectorStore(message.to_string())),
            None => Ok(self.documents.iter().map(|d| RetrievedDocument::new(*d)).collect()),
        }
    }
}

struct StubLlm {
    answer: &'static str,
    error: Option<&'static str>,
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl LLMProvider for StubLlm {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.error {
            Some(message) => Err(Error::LLMProvider(message.to_string())),
            None => Ok(GenerationResult {
                text: self.answer.to_string(),
                model_id: "stub".to_string(),
                tokens_used: None,
            }),
        }
    }

    fn model_id(&self) -> &str {
        "stub"
    }
}

struct Harness {
    router: Router,
    retriever: Arc<StubRetriever>,
    llm: Arc<StubLlm>,
}

fn harness(retrieval_error: Option<&'static str>, generation_error: Option<&'static str>) -> Harness {
    let retriever = Arc::new(StubRetriever {
        documents: vec!["doc1 text", "doc2 text"],
        error: retrieval_error,
        calls: AtomicUsize::new(0),
    });
    let llm = Arc::new(StubLlm {
        answer: "X is a placeholder.",
        error: generation_error,
        prompts: Mutex::new(Vec::new()),
    });
    let template = PromptTemplate::parse("Q: {question}\nC: {context}\nA:").unwrap();
    let chain = RagChain::new(retriever.clone(), llm.clone(), template);

    Harness {
        router: create_router(AppState::new(chain)),
        retriever,
        llm,
    }
}

fn post_ask(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/ask")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_root_returns_welcome() {
    let h = harness(None, None);
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, body) = send(h.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_yaml_snapshot!(body, @r###"
    return: welcome
    "###);
}

#[tokio::test]
async fn test_root_ignores_backend_health() {
    let h = harness(Some("qdrant down"), Some("llm down"));
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, body) = send(h.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["return"], "welcome");
    assert_eq!(h.retriever.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_ask_end_to_end() {
    let h = harness(None, None);

    let (status, body) = send(h.router, post_ask(r#"{"question": "What is X?"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "answer": "X is a placeholder." }));
    assert_eq!(
        *h.llm.prompts.lock().unwrap(),
        vec!["Q: What is X?\nC: doc1 text\n\ndoc2 text\nA:".to_string()]
    );
}

#[tokio::test]
async fn test_ask_with_empty_question_runs_pipeline() {
    let h = harness(None, None);

    let (status, _) = send(h.router, post_ask(r#"{"question": ""}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.retriever.calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.llm.prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_retrieval_failure_is_500_without_generation() {
    let h = harness(Some("connection refused"), None);

    let (status, body) = send(h.router, post_ask(r#"{"question": "What is X?"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Vector store error: connection refused");
    assert!(h.llm.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_generation_failure_is_500_with_detail() {
    let h = harness(None, Some("upstream returned 502"));

    let (status, body) = send(h.router, post_ask(r#"{"question": "What is X?"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_yaml_snapshot!(body, @r###"
    detail: "LLM provider error: upstream returned 502"
    "###);
}

#[tokio::test]
async fn test_missing_question_is_client_error() {
    let h = harness(None, None);

    let (status, body) = send(h.router, post_ask(r#"{"query": "What is X?"}"#)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("question"));
    assert_eq!(h.retriever.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_body_is_client_error() {
    let h = harness(None, None);

    let (status, _) = send(h.router, post_ask("{not json")).await;

    assert!(status.is_client_error());
    assert_eq!(h.retriever.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_non_string_question_is_client_error() {
    let h = harness(None, None);

    let (status, _) = send(h.router, post_ask(r#"{"question": 42}"#)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_cors_preflight_allows_listed_origin() {
    let h = harness(None, None);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/ask")
        .header(header::ORIGIN, "http://127.0.0.1:5500")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = h.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://127.0.0.1:5500"
    );
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(), "*");
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "*");
}

#[tokio::test]
async fn test_cors_rejects_unlisted_origin() {
    let h = harness(None, None);
    let request = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = h.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
