use std::borrow::Cow;

/// Reasons a request body was rejected by the JSON reader.
///
/// Every variant renders a message that is safe to return to the client.
#[webtools_derive::webtools_error]
pub enum ReadJsonError {
    /// `Content-Type` was present and not `application/json`.
    #[status(UNSUPPORTED_MEDIA_TYPE)]
    #[error("the Content-Type header is not application/json (got {found:?})")]
    ContentType { found: String },

    /// The body exceeded the configured size limit.
    #[status(PAYLOAD_TOO_LARGE)]
    #[error("body must not be larger than {limit} bytes")]
    TooLarge { limit: usize },

    /// Syntactically invalid JSON.
    #[error("body contains badly-formed JSON (at character {offset})")]
    Syntax { offset: usize },

    /// Input ended in the middle of a value.
    #[error("body contains badly-formed JSON")]
    Truncated { context: Option<Cow<'static, str>> },

    /// A value did not fit the type of the field it was decoded into.
    #[error("body contains incorrect JSON type for field {field:?} at offset {offset}")]
    TypeMismatch { field: String, offset: usize },

    /// Empty or whitespace-only body.
    #[error("body must not be empty")]
    Empty { context: Option<Cow<'static, str>> },

    /// Key without a counterpart in the target type while unknown fields are disallowed.
    #[error("body contains unknown key {field:?}")]
    UnknownField { field: String },

    /// Anything but whitespace after the first JSON value.
    #[error("body must only contain a single JSON value")]
    MultipleValues { context: Option<Cow<'static, str>> },

    /// The caller supplied no target to decode into.
    #[status(INTERNAL_SERVER_ERROR)]
    #[error("error unmarshalling json: cannot unmarshal into non-pointer/invalid target")]
    InvalidTarget { context: Option<Cow<'static, str>> },

    /// Reading the body stream failed.
    #[error("failed to read body{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The request body stream reported an error.
    #[error("failed to read body{}: {source}", format_context(.context))]
    Body { source: axum::Error, context: Option<Cow<'static, str>> },

    /// Any other decoder failure, passed through unchanged.
    #[error("{source}")]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
