//! JSON request decoding and response encoding.
//!
//! * [`Tools::read_json`](crate::Tools::read_json) and friends decode request bodies and
//!   classify failures as [`ReadJsonError`].
//! * [`write_json`] and [`error_json`] build `application/json` responses around the
//!   [`JsonResponse`] envelope.
mod envelope;
mod error;
mod reader;
mod replay;
mod writer;

pub use envelope::JsonResponse;
pub use error::{ReadJsonError, ReadJsonErrorExt};
pub use writer::{WriteJsonError, WriteJsonErrorExt, error_json, write_json};
