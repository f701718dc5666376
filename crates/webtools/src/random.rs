use nanoid::nanoid;

/// Characters used by [`random_string`]: ASCII letters, digits, `_` and `+` (64 in total).
pub const RANDOM_STRING_ALPHABET: &[char; 64] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L',
    'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '9', '8', '7', '6',
    '5', '4', '3', '2', '1', '_', '+',
];

/// Returns `n` characters drawn uniformly from [`RANDOM_STRING_ALPHABET`].
///
/// Bytes come from an OS-seeded CSPRNG; the alphabet size is a power of two, so masking
/// introduces no bias.
///
/// ```rust
/// let token = webtools::random_string(24);
/// assert_eq!(token.len(), 24);
/// assert!(token.chars().all(|c| webtools::RANDOM_STRING_ALPHABET.contains(&c)));
/// ```
#[must_use]
pub fn random_string(n: usize) -> String {
    // nanoid never terminates for a zero length.
    if n == 0 {
        return String::new();
    }
    nanoid!(n, RANDOM_STRING_ALPHABET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn alphabet_has_no_duplicates() {
        let unique: HashSet<_> = RANDOM_STRING_ALPHABET.iter().collect();
        assert_eq!(unique.len(), 64);
    }

    #[test]
    fn zero_length_is_empty() {
        assert!(random_string(0).is_empty());
    }

    #[test]
    fn consecutive_calls_differ() {
        assert_ne!(random_string(32), random_string(32));
    }
}
