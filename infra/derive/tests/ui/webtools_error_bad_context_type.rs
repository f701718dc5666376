use webtools_derive::webtools_error;

#[webtools_error]
pub enum DemoError {
    #[error("IO error: {source}")]
    Io { source: std::io::Error, context: String },
}

fn main() {}
