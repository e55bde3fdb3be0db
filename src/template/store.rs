//! Email template storage with CRUD operations

use std::fs;
use std::path::Path;

use dashmap::DashMap;
use tracing::{info, warn};

use crate::event::Event;

use super::compose::MailComposer;
use super::types::{
    EmailTemplate, RenderedEmail, TemplateError, TemplateResult, UpdateTemplateRequest,
};

/// In-memory email template storage
pub struct TemplateStore {
    templates: DashMap<String, EmailTemplate>,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore {
    /// Create a new template store
    pub fn new() -> Self {
        Self {
            templates: DashMap::new(),
        }
    }

    /// Create a new template
    pub fn create(&self, template: EmailTemplate) -> TemplateResult<EmailTemplate> {
        template.validate()?;

        if self.templates.contains_key(&template.id) {
            return Err(TemplateError::AlreadyExists(template.id));
        }

        info!(template_id = %template.id, "Template created");
        self.templates.insert(template.id.clone(), template.clone());

        Ok(template)
    }

    /// Get a template by ID
    pub fn get(&self, id: &str) -> TemplateResult<EmailTemplate> {
        self.templates
            .get(id)
            .map(|t| t.clone())
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    /// List all templates, sorted by ID
    pub fn list(&self) -> Vec<EmailTemplate> {
        let mut templates: Vec<_> = self
            .templates
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        templates.sort_by(|a, b| a.id.cmp(&b.id));
        templates
    }

    /// Update an existing template
    pub fn update(
        &self,
        id: &str,
        updates: UpdateTemplateRequest,
    ) -> TemplateResult<EmailTemplate> {
        let mut template = self.get(id)?;

        if let Some(name) = updates.name {
            template.name = name;
        }

        if let Some(subject) = updates.subject {
            template.subject = subject;
        }

        if let Some(body) = updates.body {
            template.body = body;
        }

        if let Some(syntax) = updates.syntax {
            template.syntax = syntax;
        }

        template.validate()?;

        self.templates.insert(id.to_string(), template.clone());
        info!(template_id = %id, "Template updated");

        Ok(template)
    }

    /// Delete a template by ID
    pub fn delete(&self, id: &str) -> TemplateResult<()> {
        self.templates
            .remove(id)
            .map(|_| info!(template_id = %id, "Template deleted"))
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    /// Check if a template exists
    pub fn exists(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Get the number of templates
    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Render a stored template against an event
    pub fn render(
        &self,
        id: &str,
        event: Option<&Event>,
        composer: &MailComposer,
    ) -> TemplateResult<RenderedEmail> {
        let template = self.get(id)?;
        composer.compose(Some(&template), event)
    }

    /// Load every `*.json` template record in `dir`.
    ///
    /// Unreadable or invalid files are skipped with a warning. Returns the
    /// number of templates loaded.
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> TemplateResult<usize> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| TemplateError::Load {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            match load_file(&path).and_then(|template| self.create(template)) {
                Ok(_) => loaded += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping template file"),
            }
        }

        info!(dir = %dir.display(), loaded, "Templates loaded");
        Ok(loaded)
    }
}

fn load_file(path: &Path) -> TemplateResult<EmailTemplate> {
    let load_error = |message: String| TemplateError::Load {
        path: path.display().to_string(),
        message,
    };

    let contents = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| load_error(e.to_string()))
}
