//! Text fragments flowing through the formatter

/// An immutable fragment of template text.
///
/// Decomposable tokens may still be split by later rules; atomic tokens
/// are final and pass through every remaining rule untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    value: String,
    decomposable: bool,
}

impl Token {
    pub fn new(value: impl Into<String>, decomposable: bool) -> Self {
        Self {
            value: value.into(),
            decomposable,
        }
    }

    /// A final token that no rule will rescan
    pub fn atomic(value: impl Into<String>) -> Self {
        Self::new(value, false)
    }

    /// A token later rules may still split
    pub fn decomposable(value: impl Into<String>) -> Self {
        Self::new(value, true)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_decomposable(&self) -> bool {
        self.decomposable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_structural_equality() {
        assert_eq!(Token::atomic("{"), Token::new("{", false));
        assert_ne!(Token::atomic("{"), Token::decomposable("{"));
        assert_ne!(Token::atomic("{"), Token::atomic("}"));
    }

    #[test]
    fn test_hash_matches_equality() {
        let set: HashSet<_> = [
            Token::atomic("a"),
            Token::new("a", false),
            Token::decomposable("a"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_accessors() {
        let token = Token::decomposable("foo{date}");
        assert_eq!(token.value(), "foo{date}");
        assert!(token.is_decomposable());
        assert!(!Token::atomic("").is_decomposable());
    }
}
