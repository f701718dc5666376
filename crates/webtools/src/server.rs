//! axum glue: a strict JSON extractor and `IntoResponse` for the crate's errors.
//!
//! ```rust
//! use axum::{Router, routing::post};
//! use axum::http::StatusCode;
//! use axum::response::Response;
//! use webtools::Tools;
//! use webtools::json::{JsonResponse, WriteJsonError, write_json};
//! use webtools::server::StrictJson;
//!
//! #[derive(serde::Deserialize)]
//! struct Rename {
//!     title: String,
//! }
//!
//! async fn rename(StrictJson(body): StrictJson<Rename>) -> Result<Response, WriteJsonError> {
//!     let slug = webtools::slugify(&body.title).unwrap_or_default();
//!     write_json(StatusCode::OK, &JsonResponse::ok("renamed").with_data(slug), None)
//! }
//!
//! let app: Router = Router::new()
//!     .route("/rename", post(rename))
//!     .with_state(Tools::default().with_max_json_size(4096));
//! ```
use crate::Tools;
use crate::json::{ReadJsonError, WriteJsonError, error_json};
use crate::slug::SlugError;
use axum::extract::{FromRef, FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use std::fmt::Display;
use tracing::debug;

/// Extractor that decodes the body with the [`Tools`] found in router state.
///
/// Rejections are [`ReadJsonError`]s, answered with the JSON error envelope and the status
/// attached to the variant (`415`, `413`, `400` or `500`).
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJson<T>(pub T);

impl<T, S> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    Tools: FromRef<S>,
{
    type Rejection = ReadJsonError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let tools = Tools::from_ref(state);
        tools.read_request(req).await.map(Self)
    }
}

impl IntoResponse for ReadJsonError {
    fn into_response(self) -> Response {
        debug!(status = %self.status(), error = %self, "Rejected JSON request body");
        envelope_response(&self, self.status())
    }
}

impl IntoResponse for WriteJsonError {
    fn into_response(self) -> Response {
        envelope_response(&self, self.status())
    }
}

impl IntoResponse for SlugError {
    fn into_response(self) -> Response {
        envelope_response(&self, self.status())
    }
}

fn envelope_response(err: &impl Display, status: StatusCode) -> Response {
    error_json(err, Some(status)).unwrap_or_else(|fallback| {
        (StatusCode::INTERNAL_SERVER_ERROR, fallback.to_string()).into_response()
    })
}
