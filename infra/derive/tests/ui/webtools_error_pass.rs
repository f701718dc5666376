use std::borrow::Cow;
use webtools_derive::webtools_error;

#[webtools_error]
pub enum DemoError {
    #[status(INTERNAL_SERVER_ERROR)]
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Rejected{}: {reason}", format_context(.context))]
    Rejected { reason: String, context: Option<Cow<'static, str>> },

    #[status(NOT_FOUND)]
    #[error("missing")]
    Missing {},
}

fn main() {
    let err = DemoError::Missing {};
    assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
}
