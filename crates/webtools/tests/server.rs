use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde::{Deserialize, Serialize};
use tower::ServiceExt;
use webtools::Tools;
use webtools::json::{JsonResponse, WriteJsonError, write_json};
use webtools::server::StrictJson;
use webtools::slugify;

#[derive(Debug, Deserialize, Serialize)]
struct Title {
    title: String,
}

async fn slug_handler(StrictJson(body): StrictJson<Title>) -> Result<Response, WriteJsonError> {
    match slugify(&body.title) {
        Ok(slug) => {
            write_json(StatusCode::OK, &JsonResponse::ok("slugified").with_data(slug), None)
        }
        Err(err) => Ok(err.into_response()),
    }
}

fn app(tools: Tools) -> Router {
    Router::new().route("/slug", post(slug_handler)).with_state(tools)
}

fn request(content_type: Option<&str>, body: &'static str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri("/slug");
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body)).expect("request should build")
}

async fn call(tools: Tools, req: Request<Body>) -> (StatusCode, JsonResponse) {
    let response = app(tools).oneshot(req).await.expect("router is infallible");
    let status = response.status();
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body should be readable");
    (status, serde_json::from_slice(&bytes).expect("envelope should decode"))
}

#[tokio::test]
async fn accepted_body_reaches_handler() {
    let req = request(Some("application/json"), r#"{"title": "Hello World"}"#);
    let (status, envelope) = call(Tools::default(), req).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!envelope.error);
    assert_eq!(envelope.data, Some(serde_json::json!("hello-world")));
}

#[tokio::test]
async fn unknown_field_is_rejected_with_envelope() {
    let req = request(Some("application/json"), r#"{"title": "x", "extra": 1}"#);
    let (status, envelope) = call(Tools::default(), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(envelope.error);
    assert_eq!(envelope.message, r#"body contains unknown key "extra""#);
}

#[tokio::test]
async fn unknown_field_passes_when_allowed() {
    let req = request(None, r#"{"title": "x", "extra": 1}"#);
    let (status, _) = call(Tools::default().with_unknown_fields(true), req).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn oversized_body_is_413() {
    let req = request(Some("application/json"), r#"{"title": "far too long for the limit"}"#);
    let (status, envelope) = call(Tools::default().with_max_json_size(8), req).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(envelope.message, "body must not be larger than 8 bytes");
}

#[tokio::test]
async fn wrong_content_type_is_415() {
    let req = request(Some("text/plain"), r#"{"title": "x"}"#);
    let (status, envelope) = call(Tools::default(), req).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(envelope.error);
}

#[tokio::test]
async fn empty_body_is_rejected() {
    let (status, envelope) = call(Tools::default(), request(None, "")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(envelope.message, "body must not be empty");
}

#[tokio::test]
async fn slug_errors_become_envelopes() {
    let req = request(None, r#"{"title": "こんにちは世界"}"#);
    let (status, envelope) = call(Tools::default(), req).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(envelope.message, "after removing characters, slug is zero length");
}

#[tokio::test]
async fn read_request_matches_sync_reader() {
    let tools = Tools::default();
    let req = request(Some("APPLICATION/JSON"), r#"{"title": "a"} {"title": "b"}"#);
    let err = tools.read_request::<Title>(req).await.unwrap_err();
    assert_eq!(err.to_string(), "body must only contain a single JSON value");
}
