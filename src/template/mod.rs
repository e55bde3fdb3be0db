//! Email template engines.
//!
//! This module provides:
//! - A token-rescanning formatter for `{date}` templates with `{{` / `}}` escapes
//! - A single-pass `<name>` marker transformer for legacy templates
//! - Email template records, in-memory storage and composition
//!
//! # Example
//!
//! ```ignore
//! let formatter = TemplateFormatter::standard();
//! let event = Event::builder()
//!     .date(NaiveDate::from_ymd_opt(2018, 2, 5).unwrap())
//!     .build();
//!
//! assert_eq!(
//!     formatter.format("{{date}} is {date}", &event),
//!     "{date} is Monday February 5"
//! );
//! ```

mod compose;
mod formatter;
mod rule;
mod store;
mod token;
mod transformer;
mod types;

pub use compose::MailComposer;
pub use formatter::{apply_rule, stringify, TemplateFormatter, TemplateFormatterBuilder};
pub use rule::{Replacement, SubstitutionRule};
pub use store::TemplateStore;
pub use token::Token;
pub use transformer::RuleTransformer;
pub use types::{
    EmailTemplate, RenderedEmail, TemplateError, TemplateResult, TemplateSyntax,
    UpdateTemplateRequest,
};
