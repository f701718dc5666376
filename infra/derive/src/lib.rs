#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the `webtools` crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! webtools-derive = { path = "../../infra/derive" }
//! thiserror = "2"
//! axum = { version = "0.8", default-features = false }
//! ```
//!
//! The expansion refers to `::thiserror` and `::axum::http::StatusCode`, so consumers need both
//! crates in their own dependency table.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining error enums that can be turned into HTTP responses.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `#[source]` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **HTTP Status**: Each variant may carry `#[status(NAME)]`, where `NAME` is an associated
///   constant of `axum::http::StatusCode`. The macro generates `fn status(&self) -> StatusCode`;
///   unannotated variants map to `BAD_REQUEST`.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`), plus a `context` field.
/// 4. Tuple or unit variants are rejected; use `Variant { context: Option<Cow<'static, str>> }`
///    for variants without data.
/// 5. A module may hold only one annotated enum, since the expansion emits a module-level
///    `format_context` helper.
///
/// # Example
///
/// ```rust,ignore
/// use webtools_derive::webtools_error;
/// use std::borrow::Cow;
///
/// #[webtools_error]
/// pub enum UploadError {
///     #[status(PAYLOAD_TOO_LARGE)]
///     #[error("upload exceeds {limit} bytes")]
///     TooLarge { limit: usize },
///
///     #[status(INTERNAL_SERVER_ERROR)]
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
/// }
///
/// fn store(bytes: &[u8]) -> Result<(), UploadError> {
///     std::fs::write("upload.bin", bytes).context("Writing upload")?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn webtools_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
