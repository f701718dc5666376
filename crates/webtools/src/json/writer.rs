use super::envelope::JsonResponse;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::Display;

#[webtools_derive::webtools_error]
pub enum WriteJsonError {
    /// The value could not be represented as JSON.
    #[status(INTERNAL_SERVER_ERROR)]
    #[error("failed to encode JSON response{}: {source}", format_context(.context))]
    Serialize { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

/// Serializes `data` into an `application/json` response with the given status.
///
/// Serialization happens first; on failure nothing is built. Caller headers are copied in
/// before `Content-Type` is set, and a caller header replaces every value of the same name.
///
/// # Errors
/// Returns [`WriteJsonError::Serialize`] when `data` cannot be encoded, e.g. a map whose
/// keys do not serialize to strings.
pub fn write_json<T>(
    status: StatusCode,
    data: &T,
    headers: Option<&HeaderMap>,
) -> Result<Response, WriteJsonError>
where
    T: Serialize + ?Sized,
{
    let out = serde_json::to_vec(data)?;

    let mut response = Response::new(Body::empty());
    if let Some(extra) = headers {
        let target = response.headers_mut();
        for name in extra.keys() {
            target.remove(name);
            for value in extra.get_all(name) {
                target.append(name.clone(), value.clone());
            }
        }
    }

    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    *response.status_mut() = status;
    *response.body_mut() = Body::from(out);

    Ok(response)
}

/// Sends `err` to the client as `{ "error": true, "message": <err> }`.
///
/// `status` defaults to `400 Bad Request`.
///
/// # Errors
/// Propagates [`write_json`] failures.
pub fn error_json<E>(err: &E, status: Option<StatusCode>) -> Result<Response, WriteJsonError>
where
    E: Display + ?Sized,
{
    let payload: JsonResponse = JsonResponse::error(err.to_string());
    write_json(status.unwrap_or(StatusCode::BAD_REQUEST), &payload, None)
}
