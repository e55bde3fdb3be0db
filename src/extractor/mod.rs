//! Property extractors.
//!
//! An extractor maps an [`Event`] to a single display string. Extractors
//! are plain functions: stateless, side-effect free and independent of the
//! order they are called in.

mod properties;
mod registry;

use crate::event::Event;

pub use properties::{
    band, both_manager_names_all_caps, email_addresses, full_date, instructors, manager_email,
    manager_first_name, manager_name, manager_name_all_caps, manager_phone, managers_are, prices,
    subject_with_date, volunteer_shifts_compact, volunteer_shifts_sequential, OPEN_SLOT,
    SUBJECT_PREFIX,
};
pub use registry::PropertyRegistry;

/// A pure `(Event) -> String` property extractor
pub type PropertyExtractor = fn(&Event) -> String;
