//! Single-pass `<name>` marker substitution.
//!
//! Rules run in registration order over the whole string. Extractor output
//! is inserted verbatim and never rescanned by the rules that already ran.

use regex::{NoExpand, Regex};
use tracing::debug;

use crate::event::Event;
use crate::extractor::{PropertyExtractor, PropertyRegistry};

use super::types::{TemplateError, TemplateResult};

#[derive(Clone)]
struct MarkerRule {
    name: String,
    pattern: Regex,
    extractor: PropertyExtractor,
}

/// Replaces `<name>` markers with extracted event properties
#[derive(Clone, Default)]
pub struct RuleTransformer {
    rules: Vec<MarkerRule>,
}

impl std::fmt::Debug for RuleTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTransformer")
            .field("rules", &self.rule_names().collect::<Vec<_>>())
            .finish()
    }
}

impl RuleTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transformer with a `<name>` rule for every built-in extractor
    pub fn standard() -> TemplateResult<Self> {
        Self::from_registry(&PropertyRegistry::standard())
    }

    /// One rule per registry entry, in registry order
    pub fn from_registry(registry: &PropertyRegistry) -> TemplateResult<Self> {
        let mut transformer = Self::new();
        for (name, extractor) in registry.iter() {
            transformer.add_rule(name, extractor)?;
        }
        Ok(transformer)
    }

    /// Register a rule for `<name>`; an existing rule keeps its position
    pub fn add_rule(&mut self, name: &str, extractor: PropertyExtractor) -> TemplateResult<()> {
        let pattern = Regex::new(&regex::escape(&format!("<{}>", name)))?;
        let rule = MarkerRule {
            name: name.to_string(),
            pattern,
            extractor,
        };

        match self.rules.iter_mut().find(|r| r.name == name) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        Ok(())
    }

    /// Drop the rule for `name`, if any
    pub fn remove_rule(&mut self, name: &str) {
        self.rules.retain(|r| r.name != name);
    }

    /// Rule names in application order
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Apply every rule to `input`
    pub fn transform(&self, event: &Event, input: &str) -> String {
        let output = self.rules.iter().fold(input.to_string(), |text, rule| {
            if !rule.pattern.is_match(&text) {
                return text;
            }
            let value = (rule.extractor)(event);
            rule.pattern
                .replace_all(&text, NoExpand(&value))
                .into_owned()
        });

        debug!(
            input_len = input.len(),
            output_len = output.len(),
            rules = self.rules.len(),
            "Transformed template"
        );

        output
    }

    /// [`transform`](Self::transform) for callers holding optional inputs
    pub fn transform_checked(
        &self,
        event: Option<&Event>,
        input: Option<&str>,
    ) -> TemplateResult<String> {
        let event = event.ok_or(TemplateError::InvalidArgument("event"))?;
        let input = input.ok_or(TemplateError::InvalidArgument("input"))?;
        Ok(self.transform(event, input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Person;
    use crate::extractor;

    fn expands_to_marker_a(_: &Event) -> String {
        "see <a>".to_string()
    }

    fn dollar_text(_: &Event) -> String {
        "$1 ${name} \\0".to_string()
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let mut transformer = RuleTransformer::new();
        transformer.add_rule("manager", extractor::manager_name_all_caps).unwrap();

        let event = Event::builder().manager(Person::new("Ada", "", "")).build();
        assert_eq!(
            transformer.transform(&event, "<manager>, <manager>!"),
            "ADA, ADA!"
        );
    }

    #[test]
    fn test_replacement_is_literal() {
        let mut transformer = RuleTransformer::new();
        transformer.add_rule("price", dollar_text).unwrap();

        assert_eq!(
            transformer.transform(&Event::default(), "Cost: <price>"),
            "Cost: $1 ${name} \\0"
        );
    }

    #[test]
    fn test_single_pass_does_not_reexpand() {
        let mut transformer = RuleTransformer::new();
        transformer.add_rule("a", extractor::band).unwrap();
        transformer.add_rule("b", expands_to_marker_a).unwrap();

        let event = Event::builder().property("Band", "Reelers").build();
        assert_eq!(
            transformer.transform(&event, "<a> / <b>"),
            "Reelers / see <a>"
        );
    }

    #[test]
    fn test_add_rule_replaces_in_place_and_remove() {
        let mut transformer = RuleTransformer::new();
        transformer.add_rule("a", extractor::band).unwrap();
        transformer.add_rule("b", extractor::prices).unwrap();
        transformer.add_rule("a", extractor::instructors).unwrap();
        assert_eq!(transformer.rule_names().collect::<Vec<_>>(), vec!["a", "b"]);

        transformer.remove_rule("a");
        transformer.remove_rule("missing");
        assert_eq!(transformer.rule_names().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_empty_name_matches_empty_marker() {
        let mut transformer = RuleTransformer::new();
        transformer.add_rule("", extractor::band).unwrap();

        let event = Event::builder().property("Band", "X").build();
        assert_eq!(transformer.transform(&event, "<><a>"), "X<a>");
    }

    #[test]
    fn test_marker_names_are_literal() {
        let mut transformer = RuleTransformer::new();
        transformer.add_rule("a.b", extractor::band).unwrap();

        let event = Event::builder().property("Band", "X").build();
        assert_eq!(transformer.transform(&event, "<a.b><axb>"), "X<axb>");
    }

    #[test]
    fn test_transform_checked() {
        let transformer = RuleTransformer::standard().unwrap();
        assert!(matches!(
            transformer.transform_checked(None, Some("<date>")),
            Err(TemplateError::InvalidArgument("event"))
        ));
        assert!(matches!(
            transformer.transform_checked(Some(&Event::default()), None),
            Err(TemplateError::InvalidArgument("input"))
        ));
        assert_eq!(
            transformer
                .transform_checked(Some(&Event::default()), Some("[<date>]"))
                .unwrap(),
            "[]"
        );
    }
}
