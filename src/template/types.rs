//! Template types and error definitions

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Template-specific error type
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A required argument was absent or empty; a caller-side defect
    #[error("Invalid argument: {0} must be provided")]
    InvalidArgument(&'static str),

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid template ID: {0}")]
    InvalidId(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Failed to load template {path}: {message}")]
    Load { path: String, message: String },
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Which marker grammar a template is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSyntax {
    /// `{date}` markers with `{{` / `}}` escapes
    #[default]
    Braces,
    /// Legacy `<name>` markers, substituted in a single pass
    AngleMarkers,
}

/// A stored email template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    /// Unique template identifier (alphanumeric, dash, underscore)
    pub id: String,

    /// Human-readable template name
    pub name: String,

    /// Subject line template
    #[serde(default)]
    pub subject: String,

    /// Body template
    #[serde(default)]
    pub body: String,

    /// Marker grammar used by subject and body
    #[serde(default)]
    pub syntax: TemplateSyntax,
}

impl EmailTemplate {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subject: subject.into(),
            body: body.into(),
            syntax: TemplateSyntax::default(),
        }
    }

    /// Switch the marker grammar
    pub fn with_syntax(mut self, syntax: TemplateSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Validate the template
    pub fn validate(&self) -> TemplateResult<()> {
        if self.id.is_empty() || self.id.len() > 64 {
            return Err(TemplateError::InvalidId(
                "ID must be 1-64 characters".to_string(),
            ));
        }

        if !self
            .id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(TemplateError::InvalidId(
                "ID must contain only alphanumeric, dash, or underscore".to_string(),
            ));
        }

        if self.name.is_empty() || self.name.len() > 256 {
            return Err(TemplateError::InvalidTemplate(
                "Name must be 1-256 characters".to_string(),
            ));
        }

        Ok(())
    }
}

/// Request to update an existing template
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub syntax: Option<TemplateSyntax>,
}

/// A fully substituted email, ready for the mailer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    pub subject: String,
    pub body: String,
    /// Comma-space separated, de-duplicated addresses
    pub recipients: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_id() {
        let ok = EmailTemplate::new("weekly-schedule_1", "Weekly", "", "");
        assert!(ok.validate().is_ok());

        let bad = EmailTemplate::new("weekly schedule", "Weekly", "", "");
        assert!(matches!(bad.validate(), Err(TemplateError::InvalidId(_))));

        let empty = EmailTemplate::new("", "Weekly", "", "");
        assert!(matches!(empty.validate(), Err(TemplateError::InvalidId(_))));
    }

    #[test]
    fn test_validate_name() {
        let template = EmailTemplate::new("weekly", "", "", "");
        assert!(matches!(
            template.validate(),
            Err(TemplateError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_syntax_defaults_to_braces() {
        let template: EmailTemplate = serde_json::from_value(json!({
            "id": "weekly",
            "name": "Weekly",
            "body": "Hi {date}"
        }))
        .unwrap();
        assert_eq!(template.syntax, TemplateSyntax::Braces);

        let legacy: EmailTemplate = serde_json::from_value(json!({
            "id": "legacy",
            "name": "Legacy",
            "syntax": "angle_markers"
        }))
        .unwrap();
        assert_eq!(legacy.syntax, TemplateSyntax::AngleMarkers);
    }
}
