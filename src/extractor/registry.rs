//! Named table of property extractors

use std::fmt;

use crate::event::Event;
use crate::template::{TemplateError, TemplateResult};

use super::properties;
use super::PropertyExtractor;

/// Insertion-ordered `name -> extractor` table.
///
/// Populated once by the configuring layer and read-only afterwards.
#[derive(Clone, Default)]
pub struct PropertyRegistry {
    entries: Vec<(String, PropertyExtractor)>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in extractor
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (name, extractor) in STANDARD_EXTRACTORS {
            registry.insert(*name, *extractor);
        }
        registry
    }

    /// Register an extractor, replacing any existing entry in place
    pub fn insert(&mut self, name: impl Into<String>, extractor: PropertyExtractor) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = extractor,
            None => self.entries.push((name, extractor)),
        }
    }

    pub fn get(&self, name: &str) -> Option<PropertyExtractor> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, extractor)| *extractor)
    }

    /// Names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, PropertyExtractor)> {
        self.entries.iter().map(|(name, ext)| (name.as_str(), *ext))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run a named extractor against an event that may be absent
    pub fn extract(&self, name: &str, event: Option<&Event>) -> TemplateResult<String> {
        let event = event.ok_or(TemplateError::InvalidArgument("event"))?;
        let extractor = self
            .get(name)
            .ok_or_else(|| TemplateError::UnknownProperty(name.to_string()))?;
        Ok(extractor(event))
    }
}

impl fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

const STANDARD_EXTRACTORS: &[(&str, PropertyExtractor)] = &[
    ("date", properties::full_date),
    ("subject", properties::subject_with_date),
    ("manager", properties::manager_name_all_caps),
    ("managers", properties::both_manager_names_all_caps),
    ("managers_are", properties::managers_are),
    ("manager_name", properties::manager_name),
    ("manager_first_name", properties::manager_first_name),
    ("manager_email", properties::manager_email),
    ("manager_phone", properties::manager_phone),
    ("email_addresses", properties::email_addresses),
    ("volunteers", properties::volunteer_shifts_sequential),
    ("volunteers_compact", properties::volunteer_shifts_compact),
    ("band", properties::band),
    ("prices", properties::prices),
    ("instructors", properties::instructors),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Person;

    #[test]
    fn test_standard_registry_order() {
        let registry = PropertyRegistry::standard();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.first(), Some(&"date"));
        assert_eq!(names.len(), STANDARD_EXTRACTORS.len());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut registry = PropertyRegistry::new();
        registry.insert("a", properties::band);
        registry.insert("b", properties::prices);
        registry.insert("a", properties::instructors);

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["a", "b"]);

        let event = Event::builder().property("Instructors", "Kim").build();
        assert_eq!(registry.extract("a", Some(&event)).unwrap(), "Kim");
    }

    #[test]
    fn test_extract_requires_event() {
        let registry = PropertyRegistry::standard();
        for name in registry.names() {
            assert!(matches!(
                registry.extract(name, None),
                Err(TemplateError::InvalidArgument("event"))
            ));
        }
    }

    #[test]
    fn test_extract_unknown_property() {
        let registry = PropertyRegistry::standard();
        assert!(matches!(
            registry.extract("nope", Some(&Event::default())),
            Err(TemplateError::UnknownProperty(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_every_standard_extractor_is_total_on_empty_event() {
        let registry = PropertyRegistry::standard();
        let empty = Event::default();
        for (name, extractor) in registry.iter() {
            let value = extractor(&empty);
            if name == "subject" {
                assert_eq!(value, properties::SUBJECT_PREFIX);
            } else {
                assert_eq!(value, "", "extractor {} on empty event", name);
            }
        }

        let managed = Event::builder()
            .manager(Person::new("Ada", "", ""))
            .build();
        assert_eq!(registry.extract("manager", Some(&managed)).unwrap(), "ADA");
    }
}
