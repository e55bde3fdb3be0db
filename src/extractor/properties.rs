//! Built-in property extractors.
//!
//! Every function here is total: missing managers, dates or volunteers
//! turn into an empty string (or the `(open)` placeholder for shifts).

use std::collections::HashSet;

use crate::event::{Event, Person, Shift};

/// Placeholder shown for a shift with nobody assigned
pub const OPEN_SLOT: &str = "(open)";

/// Prefix of the schedule email subject line
pub const SUBJECT_PREFIX: &str = "BSC Volunteer Schedule for ";

/// `"<weekday> <month> <day>"`, e.g. `"Friday January 2"`
pub fn full_date(event: &Event) -> String {
    event
        .date
        .map(|date| date.format("%A %B %-d").to_string())
        .unwrap_or_default()
}

/// Subject line for the schedule email
pub fn subject_with_date(event: &Event) -> String {
    format!("{}{}", SUBJECT_PREFIX, full_date(event))
}

pub fn manager_name(event: &Event) -> String {
    manager_field(event, |m| m.name.clone())
}

pub fn manager_name_all_caps(event: &Event) -> String {
    manager_field(event, |m| m.name.to_uppercase())
}

pub fn manager_first_name(event: &Event) -> String {
    manager_field(event, |m| m.first_name().to_string())
}

pub fn manager_email(event: &Event) -> String {
    manager_field(event, |m| m.email.clone())
}

pub fn manager_phone(event: &Event) -> String {
    manager_field(event, |m| m.phone.clone())
}

/// `"MANAGER"` or `"MANAGER and ASSISTANT"`, upper-cased
pub fn both_manager_names_all_caps(event: &Event) -> String {
    match (&event.manager, &event.assistant_manager) {
        (None, _) => String::new(),
        (Some(manager), None) => manager.name.to_uppercase(),
        (Some(manager), Some(assistant)) => format!(
            "{} and {}",
            manager.name.to_uppercase(),
            assistant.name.to_uppercase()
        ),
    }
}

/// Lead-in phrase agreeing in number with the managers present
pub fn managers_are(event: &Event) -> String {
    match (&event.manager, &event.assistant_manager) {
        (None, _) => String::new(),
        (Some(_), None) => "House Manager for this event is".to_string(),
        (Some(_), Some(_)) => "House Managers for this event are".to_string(),
    }
}

/// Every address involved in the event, first occurrence wins.
///
/// Order is manager, assistant manager, then volunteers in shift order.
/// Blank addresses are skipped.
pub fn email_addresses(event: &Event) -> String {
    let managers = [&event.manager, &event.assistant_manager]
        .into_iter()
        .flatten()
        .map(|m| m.email.as_str());
    let volunteers = event.assigned_volunteers().map(|v| v.email.as_str());

    let mut seen = HashSet::new();
    managers
        .chain(volunteers)
        .map(str::trim)
        .filter(|email| !email.is_empty() && seen.insert(*email))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One `"<description>: <volunteer>"` line per shift
pub fn volunteer_shifts_sequential(event: &Event) -> String {
    event
        .shifts
        .iter()
        .map(|shift| format!("{}: {}", shift.description, assignee(shift)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Like [`volunteer_shifts_sequential`], but consecutive shifts with the
/// same description share one line.
pub fn volunteer_shifts_compact(event: &Event) -> String {
    let mut lines: Vec<(&str, Vec<&str>)> = Vec::new();

    for shift in &event.shifts {
        let continues_line = lines
            .last()
            .is_some_and(|(description, _)| *description == shift.description);

        if !continues_line {
            lines.push((shift.description.as_str(), Vec::new()));
        }
        if let Some((_, names)) = lines.last_mut() {
            names.push(assignee(shift));
        }
    }

    lines
        .into_iter()
        .map(|(description, names)| format!("{}: {}", description, names.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn band(event: &Event) -> String {
    event_property(event, "Band")
}

pub fn prices(event: &Event) -> String {
    event_property(event, "Prices")
}

pub fn instructors(event: &Event) -> String {
    event_property(event, "Instructors")
}

fn event_property(event: &Event, name: &str) -> String {
    event.property(name).unwrap_or_default().to_string()
}

fn manager_field(event: &Event, field: impl Fn(&Person) -> String) -> String {
    event.manager.as_ref().map(field).unwrap_or_default()
}

fn assignee(shift: &Shift) -> &str {
    shift
        .volunteer
        .as_ref()
        .map(|v| v.name.as_str())
        .unwrap_or(OPEN_SLOT)
}
