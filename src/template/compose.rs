//! Turns a stored email template plus an event into a ready-to-send email

use tracing::debug;

use crate::event::Event;
use crate::extractor;

use super::formatter::TemplateFormatter;
use super::transformer::RuleTransformer;
use super::types::{
    EmailTemplate, RenderedEmail, TemplateError, TemplateResult, TemplateSyntax,
};

/// Both template engines, configured once and shared read-only
#[derive(Debug, Clone)]
pub struct MailComposer {
    formatter: TemplateFormatter,
    transformer: RuleTransformer,
}

impl MailComposer {
    pub fn new(formatter: TemplateFormatter, transformer: RuleTransformer) -> Self {
        Self {
            formatter,
            transformer,
        }
    }

    /// Standard `{date}` formatter and the built-in `<name>` rules
    pub fn standard() -> TemplateResult<Self> {
        Ok(Self::new(
            TemplateFormatter::standard(),
            RuleTransformer::standard()?,
        ))
    }

    pub fn formatter(&self) -> &TemplateFormatter {
        &self.formatter
    }

    pub fn transformer(&self) -> &RuleTransformer {
        &self.transformer
    }

    /// Render one template string with the engine `syntax` selects
    pub fn render_text(&self, syntax: TemplateSyntax, text: &str, event: &Event) -> String {
        match syntax {
            TemplateSyntax::Braces => self.formatter.format(text, event),
            TemplateSyntax::AngleMarkers => self.transformer.transform(event, text),
        }
    }

    /// Render subject and body, and collect the recipients.
    ///
    /// Either argument missing is a caller defect and fails before any
    /// rendering happens.
    pub fn compose(
        &self,
        template: Option<&EmailTemplate>,
        event: Option<&Event>,
    ) -> TemplateResult<RenderedEmail> {
        let template = template.ok_or(TemplateError::InvalidArgument("template"))?;
        let event = event.ok_or(TemplateError::InvalidArgument("event"))?;

        debug!(template_id = %template.id, syntax = ?template.syntax, "Composing email");

        Ok(RenderedEmail {
            subject: self.render_text(template.syntax, &template.subject, event),
            body: self.render_text(template.syntax, &template.body, event),
            recipients: extractor::email_addresses(event),
        })
    }
}
