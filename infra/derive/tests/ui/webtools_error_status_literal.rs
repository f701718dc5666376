use webtools_derive::webtools_error;

#[webtools_error]
pub enum DemoError {
    #[status(404)]
    #[error("missing")]
    Missing { context: Option<std::borrow::Cow<'static, str>> },
}

fn main() {}
