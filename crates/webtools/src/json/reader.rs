use super::error::ReadJsonError;
use super::replay::{FailureKind, Replay, ReplayError};
use crate::Tools;
use axum::extract::Request;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use futures::StreamExt;
use serde::de::{self, DeserializeOwned};
use serde_json::Value;
use serde_json::error::Category;
use std::io::Read;

const JSON_MIME: &str = "application/json";

impl Tools {
    /// Decodes exactly one JSON value from `body`.
    ///
    /// `headers` is only consulted for `Content-Type`: when present and non-empty it must be
    /// `application/json` (any letter case). The body is read up to
    /// [`Tools::effective_max_json_size`] bytes.
    ///
    /// # Errors
    /// Returns the [`ReadJsonError`] variant describing why the body was rejected.
    pub fn read_json<T>(&self, headers: &HeaderMap, body: impl Read) -> Result<T, ReadJsonError>
    where
        T: DeserializeOwned,
    {
        check_content_type(headers)?;
        let bytes = read_bounded(body, self.effective_max_json_size())?;
        decode(&bytes, self.allow_unknown_fields)
    }

    /// Decodes the body into an existing value, replacing it only on success.
    ///
    /// `None` stands for a missing target and is reported as
    /// [`ReadJsonError::InvalidTarget`] before the body is touched.
    ///
    /// # Errors
    /// Same as [`Tools::read_json`], plus `InvalidTarget`.
    pub fn read_json_into<T>(
        &self,
        headers: &HeaderMap,
        body: impl Read,
        target: Option<&mut T>,
    ) -> Result<(), ReadJsonError>
    where
        T: DeserializeOwned,
    {
        let Some(target) = target else {
            return Err(ReadJsonError::InvalidTarget { context: None });
        };
        *target = self.read_json(headers, body)?;
        Ok(())
    }

    /// Async counterpart of [`Tools::read_json`] for a whole axum request.
    ///
    /// The body is collected chunk by chunk and rejected as soon as it passes the limit.
    ///
    /// # Errors
    /// Returns the [`ReadJsonError`] variant describing why the body was rejected.
    pub async fn read_request<T>(&self, request: Request) -> Result<T, ReadJsonError>
    where
        T: DeserializeOwned,
    {
        check_content_type(request.headers())?;

        let limit = self.effective_max_json_size();
        let mut stream = request.into_body().into_data_stream();
        let mut bytes = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if bytes.len() + chunk.len() > limit {
                return Err(ReadJsonError::TooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }

        decode(&bytes, self.allow_unknown_fields)
    }
}

fn check_content_type(headers: &HeaderMap) -> Result<(), ReadJsonError> {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return Ok(());
    };
    if value.is_empty() {
        return Ok(());
    }

    match value.to_str() {
        Ok(found) if found.eq_ignore_ascii_case(JSON_MIME) => Ok(()),
        Ok(found) => Err(ReadJsonError::ContentType { found: found.to_owned() }),
        Err(_) => Err(ReadJsonError::ContentType {
            found: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        }),
    }
}

fn read_bounded(body: impl Read, limit: usize) -> Result<Vec<u8>, ReadJsonError> {
    let mut bytes = Vec::new();
    // One byte past the limit tells an exact fit apart from an overflow.
    let cap = u64::try_from(limit).map_or(u64::MAX, |limit| limit.saturating_add(1));
    body.take(cap).read_to_end(&mut bytes)?;
    if bytes.len() > limit {
        return Err(ReadJsonError::TooLarge { limit });
    }
    Ok(bytes)
}

/// Decodes a complete body, enforcing the single-value and unknown-field rules.
///
/// The first value is parsed in full before any typed decoding, so a syntax error anywhere in it
/// wins over type and unknown-field errors.
pub(crate) fn decode<T>(bytes: &[u8], allow_unknown_fields: bool) -> Result<T, ReadJsonError>
where
    T: DeserializeOwned,
{
    if bytes.iter().all(|b| is_json_whitespace(*b)) {
        return Err(ReadJsonError::Empty { context: None });
    }

    let mut values = serde_json::Deserializer::from_slice(bytes).into_iter::<Value>();
    let parsed = match values.next() {
        Some(Ok(parsed)) => parsed,
        Some(Err(err)) => return Err(classify_syntax(bytes, err)),
        None => return Err(ReadJsonError::Empty { context: None }),
    };
    let rest = &bytes[values.byte_offset()..];

    let mut unknown = None;
    let decoded = {
        let mut on_ignored = |path: serde_ignored::Path<'_>| {
            if unknown.is_none() {
                unknown = Some(path.to_string());
            }
        };
        let tracked = serde_ignored::Deserializer::new(Replay(&parsed), &mut on_ignored);
        serde_path_to_error::deserialize::<_, T>(tracked)
    };

    // Keys are replayed in document order, so an unknown key seen here precedes any failure.
    if !allow_unknown_fields {
        if let Some(field) = unknown {
            return Err(ReadJsonError::UnknownField { field });
        }
    }

    let value = decoded.map_err(|err| classify_typed::<T>(bytes, &err))?;
    if !rest.iter().all(|b| is_json_whitespace(*b)) {
        return Err(ReadJsonError::MultipleValues { context: None });
    }

    Ok(value)
}

fn classify_syntax(bytes: &[u8], err: serde_json::Error) -> ReadJsonError {
    match err.classify() {
        Category::Syntax => {
            ReadJsonError::Syntax { offset: byte_offset(bytes, err.line(), err.column()) }
        }
        Category::Eof => ReadJsonError::Truncated { context: None },
        Category::Data | Category::Io => err.into(),
    }
}

fn classify_typed<T>(bytes: &[u8], err: &serde_path_to_error::Error<ReplayError>) -> ReadJsonError
where
    T: DeserializeOwned,
{
    if err.inner().kind != FailureKind::Mismatch {
        return <serde_json::Error as de::Error>::custom(err).into();
    }

    let field = if err.path().iter().next().is_some() {
        err.path().to_string()
    } else {
        String::new()
    };
    ReadJsonError::TypeMismatch { field, offset: mismatch_offset::<T>(bytes) }
}

/// Position where decoding `T` straight from the bytes gives up.
fn mismatch_offset<T>(bytes: &[u8]) -> usize
where
    T: DeserializeOwned,
{
    let mut de = serde_json::Deserializer::from_slice(bytes);
    match T::deserialize(&mut de) {
        Err(err) => byte_offset(bytes, err.line(), err.column()),
        Ok(_) => bytes.len(),
    }
}

/// Converts a `serde_json` line/column position into a byte offset within `bytes`.
///
/// `serde_json` lines start at 1 and columns count bytes since the last newline.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        bytes
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .nth(line - 2)
            .map_or(bytes.len(), |(idx, _)| idx + 1)
    };
    (line_start + column).min(bytes.len())
}

const fn is_json_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Foo {
        foo: String,
    }

    #[derive(Debug, Deserialize)]
    struct Outer {
        inner: Foo,
    }

    fn strict<T: DeserializeOwned>(json: &str) -> Result<T, ReadJsonError> {
        decode(json.as_bytes(), false)
    }

    #[test]
    fn byte_offset_tracks_lines() {
        let body = b"{\n  \"a\": 1,\n  oops\n}";
        assert_eq!(byte_offset(body, 1, 0), 0);
        assert_eq!(byte_offset(body, 1, 1), 1);
        assert_eq!(byte_offset(body, 3, 3), 15);
        assert_eq!(byte_offset(body, 9, 9), body.len());
    }

    #[test]
    fn syntax_error_reports_offset() {
        let err = strict::<Foo>(r#"{"foo": "bar",}"#).unwrap_err();
        let ReadJsonError::Syntax { offset } = err else { panic!("unexpected {err:?}") };
        assert!((14..=15).contains(&offset), "offset {offset}");
    }

    #[test]
    fn type_mismatch_names_nested_field() {
        let err = strict::<Outer>(r#"{"inner": {"foo": 12}}"#).unwrap_err();
        let ReadJsonError::TypeMismatch { field, offset } = err else {
            panic!("unexpected {err:?}")
        };
        assert_eq!(field, "inner.foo");
        assert!((18..=20).contains(&offset), "offset {offset}");
    }

    #[test]
    fn unknown_nested_field_uses_dotted_path() {
        let err = strict::<Outer>(r#"{"inner": {"foo": "x", "bar": 1}}"#).unwrap_err();
        assert!(
            matches!(&err, ReadJsonError::UnknownField { field } if field == "inner.bar"),
            "unexpected {err:?}"
        );
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(matches!(strict::<Foo>(" \r\n\t"), Err(ReadJsonError::Empty { .. })));
    }

    #[test]
    fn trailing_whitespace_is_accepted() {
        assert_eq!(strict::<Foo>("{\"foo\": \"bar\"}\n").unwrap().foo, "bar");
    }

    #[derive(Debug, Deserialize)]
    struct Required {
        #[allow(dead_code)]
        id: u32,
    }

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        #[allow(dead_code)]
        item: Required,
    }

    #[test]
    fn missing_fields_pass_through_at_any_depth() {
        let err = strict::<Required>("{}").unwrap_err();
        assert!(matches!(err, ReadJsonError::Decode { .. }), "unexpected {err:?}");
        assert_eq!(err.to_string(), "missing field `id`");

        let err = strict::<Wrapper>(r#"{"item": {}}"#).unwrap_err();
        assert!(matches!(err, ReadJsonError::Decode { .. }), "unexpected {err:?}");
        assert_eq!(err.to_string(), "item: missing field `id`");
    }

    #[test]
    fn type_mismatch_at_root_has_empty_field() {
        let err = strict::<Foo>("42").unwrap_err();
        assert!(
            matches!(&err, ReadJsonError::TypeMismatch { field, .. } if field.is_empty()),
            "unexpected {err:?}"
        );

        let err = strict::<Wrapper>(r#"{"item": {"id": -1}}"#).unwrap_err();
        assert!(
            matches!(&err, ReadJsonError::TypeMismatch { field, .. } if field == "item.id"),
            "unexpected {err:?}"
        );
    }

    #[test]
    fn syntax_errors_win_over_typed_failures() {
        let err = strict::<Foo>(r#"{"foo": 1"}"#).unwrap_err();
        let ReadJsonError::Syntax { offset } = err else { panic!("unexpected {err:?}") };
        assert!((9..=10).contains(&offset), "offset {offset}");

        let err = strict::<Foo>(r#"{"x":1,"foo": }"#).unwrap_err();
        assert!(matches!(err, ReadJsonError::Syntax { .. }), "unexpected {err:?}");
    }

    #[test]
    fn unknown_key_is_reported_in_document_order() {
        let err = strict::<Foo>(r#"{"zeta": 1, "foo": 5}"#).unwrap_err();
        assert!(
            matches!(&err, ReadJsonError::UnknownField { field } if field == "zeta"),
            "unexpected {err:?}"
        );

        let err = strict::<Foo>(r#"{"foo": 5, "zeta": 1}"#).unwrap_err();
        assert!(matches!(err, ReadJsonError::TypeMismatch { .. }), "unexpected {err:?}");
    }

    #[test]
    fn duplicate_keys_keep_the_last_value() {
        let decoded = strict::<Foo>(r#"{"foo": "a", "foo": "b"}"#).unwrap();
        assert_eq!(decoded.foo, "b");
    }

    #[test]
    fn content_type_is_case_insensitive_and_optional() {
        let mut headers = HeaderMap::new();
        assert!(check_content_type(&headers).is_ok());

        headers.insert(CONTENT_TYPE, "Application/JSON".parse().unwrap());
        assert!(check_content_type(&headers).is_ok());

        headers.insert(CONTENT_TYPE, "".parse().unwrap());
        assert!(check_content_type(&headers).is_ok());

        headers.insert(CONTENT_TYPE, "text/plain".parse().unwrap());
        let err = check_content_type(&headers).unwrap_err();
        assert!(matches!(&err, ReadJsonError::ContentType { found } if found == "text/plain"));
    }

    #[test]
    fn bounded_read_allows_exact_fit() {
        assert_eq!(read_bounded(&b"12345"[..], 5).unwrap(), b"12345");
        assert!(matches!(
            read_bounded(&b"123456"[..], 5),
            Err(ReadJsonError::TooLarge { limit: 5 })
        ));
    }
}
