//! Token-rescanning template formatter.
//!
//! The template starts life as one decomposable token. Each rule in turn
//! splits every decomposable token around its matches, putting the rule's
//! replacement token in place of each match and re-wrapping the text in
//! between as fresh decomposable tokens. Atomic tokens pass through
//! untouched. After the last rule the token values are concatenated.

use tracing::debug;

use crate::event::Event;
use crate::extractor::PropertyExtractor;

use super::rule::SubstitutionRule;
use super::token::Token;
use super::types::{TemplateError, TemplateResult};

/// Formats `{marker}` templates against an event.
///
/// Rules are fixed at construction, so one formatter can be shared across
/// threads and reused for any number of calls.
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    rules: Vec<SubstitutionRule>,
}

impl Default for TemplateFormatter {
    fn default() -> Self {
        Self::standard()
    }
}

impl TemplateFormatter {
    /// `{{`, `}}`, `{date}`, then bare-brace deletion
    pub fn standard() -> Self {
        Self::from_rules(vec![
            SubstitutionRule::open_escape(),
            SubstitutionRule::close_escape(),
            SubstitutionRule::date_marker(),
            SubstitutionRule::bare_brace(),
        ])
    }

    /// Formatter over an explicit rule list, applied in the given order
    pub fn from_rules(rules: Vec<SubstitutionRule>) -> Self {
        Self { rules }
    }

    pub fn builder() -> TemplateFormatterBuilder {
        TemplateFormatterBuilder::default()
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    /// Substitute every marker in `template`
    pub fn format(&self, template: &str, event: &Event) -> String {
        let tokens = self.tokenize(template, event);
        let output = stringify(&tokens);

        debug!(
            template_len = template.len(),
            tokens = tokens.len(),
            output_len = output.len(),
            "Formatted template"
        );

        output
    }

    /// [`format`](Self::format) for callers holding optional inputs
    pub fn format_checked(
        &self,
        template: Option<&str>,
        event: Option<&Event>,
    ) -> TemplateResult<String> {
        let template = template.ok_or(TemplateError::InvalidArgument("template"))?;
        let event = event.ok_or(TemplateError::InvalidArgument("event"))?;
        Ok(self.format(template, event))
    }

    /// Final token list for `template`
    pub fn tokenize(&self, template: &str, event: &Event) -> Vec<Token> {
        self.rules
            .iter()
            .fold(vec![Token::decomposable(template)], |tokens, rule| {
                apply_rule(rule, tokens, event)
            })
    }
}

/// One rescanning pass of `rule` over `tokens`
pub fn apply_rule(rule: &SubstitutionRule, tokens: Vec<Token>, event: &Event) -> Vec<Token> {
    let mut replacement: Option<Token> = None;
    let mut output = Vec::with_capacity(tokens.len());

    for token in tokens {
        if !token.is_decomposable() || !rule.pattern().is_match(token.value()) {
            output.push(token);
            continue;
        }

        let replacement = replacement.get_or_insert_with(|| rule.replacement().resolve(event));
        let text = token.value();
        let mut last = 0;

        for found in rule.pattern().find_iter(text) {
            if found.start() > last {
                output.push(Token::decomposable(&text[last..found.start()]));
            }
            output.push(replacement.clone());
            last = found.end();
        }

        if last < text.len() {
            output.push(Token::decomposable(&text[last..]));
        }
    }

    output
}

/// Concatenate token values in order
pub fn stringify(tokens: &[Token]) -> String {
    tokens.iter().map(Token::value).collect()
}

/// Builds a formatter with extra `{name}` markers on top of `{date}`.
///
/// Whatever the registration order, the built rule list is: escapes,
/// `{date}` (unless a `date` marker is registered), markers in
/// registration order, then bare-brace deletion.
#[derive(Default)]
pub struct TemplateFormatterBuilder {
    markers: Vec<(String, PropertyExtractor)>,
}

impl TemplateFormatterBuilder {
    /// Register a `{name}` marker
    pub fn marker(mut self, name: impl Into<String>, extractor: PropertyExtractor) -> Self {
        self.markers.push((name.into(), extractor));
        self
    }

    pub fn build(self) -> TemplateResult<TemplateFormatter> {
        let mut rules = Vec::with_capacity(self.markers.len() + 4);
        rules.push(SubstitutionRule::open_escape());
        rules.push(SubstitutionRule::close_escape());
        if !self.markers.iter().any(|(name, _)| name == "date") {
            rules.push(SubstitutionRule::date_marker());
        }
        for (name, extractor) in &self.markers {
            rules.push(SubstitutionRule::marker(name, *extractor)?);
        }
        rules.push(SubstitutionRule::bare_brace());

        Ok(TemplateFormatter::from_rules(rules))
    }
}
