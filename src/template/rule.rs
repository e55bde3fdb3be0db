//! Substitution rules for the token formatter

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::event::Event;
use crate::extractor::{self, PropertyExtractor};

use super::token::Token;
use super::types::TemplateResult;

lazy_static! {
    static ref OPEN_ESCAPE: Regex = Regex::new(r"\{\{").unwrap();
    static ref CLOSE_ESCAPE: Regex = Regex::new(r"\}\}").unwrap();
    static ref DATE_MARKER: Regex = Regex::new(r"\{date\}").unwrap();
    static ref BARE_BRACE: Regex = Regex::new(r"[{}]").unwrap();
}

/// What a rule puts in place of each match
#[derive(Clone)]
pub enum Replacement {
    /// A fixed token
    Token(Token),
    /// An atomic token holding the extractor's output for the current event
    Property(PropertyExtractor),
}

impl Replacement {
    /// Resolve the replacement token for one formatting call
    pub fn resolve(&self, event: &Event) -> Token {
        match self {
            Replacement::Token(token) => token.clone(),
            Replacement::Property(extractor) => Token::atomic(extractor(event)),
        }
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Token(token) => f.debug_tuple("Token").field(token).finish(),
            Replacement::Property(_) => f.write_str("Property(..)"),
        }
    }
}

/// A `(pattern, replacement)` pair
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pattern: Regex,
    replacement: Replacement,
}

impl SubstitutionRule {
    /// Rule from a raw regular expression
    pub fn new(pattern: &str, replacement: Replacement) -> TemplateResult<Self> {
        Ok(Self::from_regex(Regex::new(pattern)?, replacement))
    }

    pub fn from_regex(pattern: Regex, replacement: Replacement) -> Self {
        Self {
            pattern,
            replacement,
        }
    }

    /// Rule matching `literal` verbatim
    pub fn literal(literal: &str, replacement: Replacement) -> TemplateResult<Self> {
        Self::new(&regex::escape(literal), replacement)
    }

    /// Rule replacing `{name}` with an extracted property
    pub fn marker(name: &str, extractor: PropertyExtractor) -> TemplateResult<Self> {
        Self::literal(&format!("{{{}}}", name), Replacement::Property(extractor))
    }

    /// `{{` becomes a literal `{`
    pub fn open_escape() -> Self {
        Self::from_regex(OPEN_ESCAPE.clone(), Replacement::Token(Token::atomic("{")))
    }

    /// `}}` becomes a literal `}`
    pub fn close_escape() -> Self {
        Self::from_regex(CLOSE_ESCAPE.clone(), Replacement::Token(Token::atomic("}")))
    }

    /// `{date}` becomes the event's full date
    pub fn date_marker() -> Self {
        Self::from_regex(
            DATE_MARKER.clone(),
            Replacement::Property(extractor::full_date),
        )
    }

    /// Any leftover `{` or `}` is dropped
    pub fn bare_brace() -> Self {
        Self::from_regex(BARE_BRACE.clone(), Replacement::Token(Token::atomic("")))
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_literal_escapes_pattern_characters() {
        let rule = SubstitutionRule::literal("a.b", Replacement::Token(Token::atomic("x"))).unwrap();
        assert!(rule.pattern().is_match("a.b"));
        assert!(!rule.pattern().is_match("axb"));
    }

    #[test]
    fn test_marker_pattern() {
        let rule = SubstitutionRule::marker("band", extractor::band).unwrap();
        assert!(rule.pattern().is_match("{band}"));
        assert!(!rule.pattern().is_match("band"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = SubstitutionRule::new("(", Replacement::Token(Token::atomic("")));
        assert!(result.is_err());
    }

    #[test]
    fn test_property_replacement_is_atomic() {
        let event = Event::builder()
            .date(NaiveDate::from_ymd_opt(2018, 2, 5).unwrap())
            .build();

        let token = SubstitutionRule::date_marker().replacement().resolve(&event);
        assert_eq!(token, Token::atomic("Monday February 5"));

        let empty = SubstitutionRule::date_marker()
            .replacement()
            .resolve(&Event::default());
        assert_eq!(empty, Token::atomic(""));
    }
}
