//! Helpers for axum handlers: strict JSON request decoding, JSON responses with a standard
//! envelope, URL slugs and random strings.
//! Every function is independent; the only state is the [`Tools`] decoder configuration,
//! which is `Copy` and owned by the caller.
//!
//! ## Reading and writing JSON
//! ```rust
//! use axum::http::{HeaderMap, StatusCode};
//! use webtools::{Tools, json};
//!
//! #[derive(serde::Deserialize)]
//! struct Signup {
//!     email: String,
//! }
//!
//! let tools = Tools::default().with_max_json_size(1024);
//! let signup: Signup = tools.read_json(&HeaderMap::new(), &br#"{"email":"a@b.c"}"#[..])?;
//! assert_eq!(signup.email, "a@b.c");
//!
//! let created = json::JsonResponse::<()>::ok("created");
//! let response = json::write_json(StatusCode::CREATED, &created, None)?;
//! assert_eq!(response.status(), StatusCode::CREATED);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Slugs and random strings
//! ```rust
//! assert_eq!(webtools::slugify("Now is the time!").unwrap(), "now-is-the-time");
//! assert_eq!(webtools::random_string(16).len(), 16);
//! ```
pub mod config;
pub mod json;
pub mod random;
pub mod server;
pub mod slug;
mod tools;

pub use random::{RANDOM_STRING_ALPHABET, random_string};
pub use slug::{SlugError, slugify};
pub use tools::{DEFAULT_MAX_JSON_SIZE, Tools};
