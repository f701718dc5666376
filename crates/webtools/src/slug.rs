use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static NON_SLUG_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

#[webtools_derive::webtools_error]
pub enum SlugError {
    #[error("empty string not permitted")]
    EmptyInput { context: Option<Cow<'static, str>> },

    #[status(UNPROCESSABLE_ENTITY)]
    #[error("after removing characters, slug is zero length{}", format_context(.context))]
    ZeroLength { context: Option<Cow<'static, str>> },
}

/// Builds a lowercase, hyphen-separated slug from free text.
///
/// Every run of characters outside `a-z0-9` (after lowercasing) becomes a single hyphen and
/// hyphens are trimmed from both ends. Non-ASCII text is dropped, not transliterated.
///
/// ```rust
/// assert_eq!(webtools::slugify("Fish & Chips, 2 for 1!").unwrap(), "fish-chips-2-for-1");
/// ```
///
/// # Errors
/// [`SlugError::EmptyInput`] for an empty string, [`SlugError::ZeroLength`] when nothing
/// survives the filtering.
pub fn slugify(input: &str) -> Result<String, SlugError> {
    if input.is_empty() {
        return Err(SlugError::EmptyInput { context: None });
    }

    let lowered = input.to_lowercase();
    let slug = NON_SLUG_RUN.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        return Err(SlugError::ZeroLength { context: None });
    }

    Ok(slug.to_owned())
}
