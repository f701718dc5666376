use webtools_derive::webtools_error;

#[webtools_error]
pub enum DemoError {
    #[status(NOT_FOUND)]
    #[status(GONE)]
    #[error("missing")]
    Missing { context: Option<std::borrow::Cow<'static, str>> },
}

fn main() {}
