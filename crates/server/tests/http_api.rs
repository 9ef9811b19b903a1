use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use server::{AppState, router};
use services::{AiError, GeneratedProblem, ProblemAi, ProblemService};
use storage::repository::{InMemoryRepository, SessionRepository};
use tutor_core::model::{ProblemSession, RawAnswer, SessionId};
use tutor_core::time::{fixed_clock, fixed_now};

const PROBLEM_TEXT: &str = "A bakery sold 45 cupcakes in the morning and 30 in the afternoon. \
                            How many more did it sell in the morning?";

/// Scripted AI endpoint double with call counters, so tests can assert the
/// adapter was never reached on validation failures.
#[derive(Default)]
struct ScriptedAi {
    fail_generate: bool,
    generate_calls: AtomicUsize,
    feedback_calls: AtomicUsize,
}

#[async_trait]
impl ProblemAi for ScriptedAi {
    async fn generate_problem(&self) -> Result<GeneratedProblem, AiError> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_generate {
            // The adapter classifies a non-success upstream status this way.
            return Err(AiError::NoOutput);
        }
        Ok(GeneratedProblem {
            problem_text: PROBLEM_TEXT.into(),
            final_answer: 15.0,
        })
    }

    async fn generate_feedback(
        &self,
        _problem_text: &str,
        _correct_answer: f64,
        _submitted: &RawAnswer,
    ) -> Result<String, AiError> {
        self.feedback_calls.fetch_add(1, Ordering::SeqCst);
        Ok("Great effort! Keep practicing.".into())
    }
}

struct TestServer {
    app: Router,
    repo: InMemoryRepository,
    ai: Arc<ScriptedAi>,
}

fn setup(ai: ScriptedAi) -> TestServer {
    let repo = InMemoryRepository::new();
    let ai = Arc::new(ai);
    let problems = ProblemService::new(
        fixed_clock(),
        ai.clone(),
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
    );
    let app = router(AppState::new(Arc::new(problems)));
    TestServer { app, repo, ai }
}

fn json_request(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

async fn seed_session(repo: &InMemoryRepository, correct_answer: f64) -> SessionId {
    let session = ProblemSession::new(
        SessionId::generate(),
        PROBLEM_TEXT,
        correct_answer,
        fixed_now(),
    )
    .unwrap();
    repo.insert_session(&session).await.unwrap();
    session.id()
}

async fn submit(app: Router, session_id: &str, user_answer: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/math-problem/submit",
            Some(json!({ "session_id": session_id, "user_answer": user_answer })),
        ))
        .await
        .expect("submit");
    let status = response.status();
    (status, read_json(response).await)
}

#[tokio::test]
async fn health_endpoint_answers() {
    let server = setup(ScriptedAi::default());
    let response = server
        .app
        .oneshot(json_request(Method::GET, "/health", None))
        .await
        .expect("health");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn generate_returns_the_stored_session() {
    let server = setup(ScriptedAi::default());

    let response = server
        .app
        .clone()
        .oneshot(json_request(Method::POST, "/math-problem", None))
        .await
        .expect("generate");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    let session = &body["session"];
    assert!(!session["problem_text"].as_str().unwrap().is_empty());
    assert_eq!(session["correct_answer"], 15.0);

    let id: SessionId = session["id"].as_str().unwrap().parse().unwrap();
    let stored = server.repo.get_session(id).await.expect("stored session");
    assert_eq!(stored.problem_text(), PROBLEM_TEXT);
    assert_eq!(server.ai.generate_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn generate_failure_returns_500_and_creates_no_session() {
    let server = setup(ScriptedAi {
        fail_generate: true,
        ..ScriptedAi::default()
    });

    let response = server
        .app
        .clone()
        .oneshot(json_request(Method::POST, "/math-problem", None))
        .await
        .expect("generate");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = read_json(response).await;
    assert_eq!(body["error"], "ai returned no usable output");
    assert_eq!(server.repo.session_count(), 0);
}

#[tokio::test]
async fn submit_with_empty_body_is_a_validation_error() {
    let server = setup(ScriptedAi::default());

    let response = server
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/math-problem/submit",
            Some(json!({})),
        ))
        .await
        .expect("submit");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(body["error"], "Missing fields");
    // Neither the adapter nor the store was reached.
    assert_eq!(server.ai.feedback_calls.load(Ordering::SeqCst), 0);
    assert_eq!(server.repo.submission_count(), 0);
}

#[tokio::test]
async fn submit_with_one_missing_field_is_a_validation_error() {
    let server = setup(ScriptedAi::default());
    let session_id = seed_session(&server.repo, 15.0).await;

    let response = server
        .app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/math-problem/submit",
            Some(json!({ "session_id": session_id.to_string() })),
        ))
        .await
        .expect("submit");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "Missing fields");
}

#[tokio::test]
async fn submit_against_unknown_session_is_a_server_error() {
    let server = setup(ScriptedAi::default());

    let (status, body) = submit(
        server.app.clone(),
        &SessionId::generate().to_string(),
        json!("15"),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "not found");
    assert_eq!(server.repo.submission_count(), 0);
}

#[tokio::test]
async fn submit_grades_exact_numeric_equality() {
    let server = setup(ScriptedAi::default());
    let session_id = seed_session(&server.repo, 15.0).await;
    let id = session_id.to_string();

    let (status, body) = submit(server.app.clone(), &id, json!("15")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission"]["is_correct"], true);
    assert_eq!(body["submission"]["user_answer"], "15");

    let (_, body) = submit(server.app.clone(), &id, json!(15)).await;
    assert_eq!(body["submission"]["is_correct"], true);

    let (_, body) = submit(server.app.clone(), &id, json!(10)).await;
    assert_eq!(body["submission"]["is_correct"], false);

    let (_, body) = submit(server.app.clone(), &id, json!("abc")).await;
    assert_eq!(body["submission"]["is_correct"], false);
    assert_eq!(body["submission"]["user_answer"], "abc");

    assert_eq!(server.repo.submission_count(), 4);
}

#[tokio::test]
async fn generate_then_submit_own_answer_round_trips() {
    let server = setup(ScriptedAi::default());

    let response = server
        .app
        .clone()
        .oneshot(json_request(Method::POST, "/math-problem", None))
        .await
        .expect("generate");
    let body = read_json(response).await;
    let id = body["session"]["id"].as_str().unwrap().to_string();
    let correct_answer = body["session"]["correct_answer"].as_f64().unwrap();

    // The answer exactly as a client would echo it back, as text.
    let (status, body) = submit(server.app.clone(), &id, json!(correct_answer.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["submission"]["is_correct"], true);

    // Alternate numeric formatting still matches.
    let (_, body) = submit(server.app.clone(), &id, json!("15.0")).await;
    assert_eq!(body["submission"]["is_correct"], true);
    assert_eq!(body["submission"]["session_id"], id);
}
