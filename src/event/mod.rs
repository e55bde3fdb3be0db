//! Event records read by the template engines.
//!
//! The persistence layer owns these records; the engines only ever borrow
//! them immutably. Everything derives serde so events can be handed over
//! as JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheduled event with its staff and volunteer shifts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Day the event takes place (optional)
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// House manager (optional)
    #[serde(default)]
    pub manager: Option<Person>,

    /// Assistant house manager (optional)
    #[serde(default)]
    pub assistant_manager: Option<Person>,

    /// Shifts in schedule order
    #[serde(default)]
    pub shifts: Vec<Shift>,

    /// Free-form named values such as band or prices
    #[serde(default)]
    pub properties: Vec<EventProperty>,
}

impl Event {
    /// Create a builder for an event
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    /// Look up a named property value.
    ///
    /// Names compare case-insensitively and the first matching entry wins.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.value.as_str())
    }

    /// Volunteers assigned to shifts, in shift order
    pub fn assigned_volunteers(&self) -> impl Iterator<Item = &Volunteer> {
        self.shifts.iter().filter_map(|s| s.volunteer.as_ref())
    }
}

/// A manager role holder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl Person {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Text before the first whitespace of the name
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// A volunteer assigned to a shift
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Volunteer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// One shift slot on the schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Role description, e.g. "Door" or "Kitchen"
    pub description: String,

    /// Assigned volunteer, `None` while the slot is open
    #[serde(default)]
    pub volunteer: Option<Volunteer>,
}

impl Shift {
    pub fn open(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            volunteer: None,
        }
    }

    pub fn assigned(description: impl Into<String>, volunteer: Volunteer) -> Self {
        Self {
            description: description.into(),
            volunteer: Some(volunteer),
        }
    }
}

/// A named event property and its current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventProperty {
    pub name: String,
    pub value: String,
}

/// Builder for creating events
#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    /// Set the event date
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.event.date = Some(date);
        self
    }

    /// Set the house manager
    pub fn manager(mut self, manager: Person) -> Self {
        self.event.manager = Some(manager);
        self
    }

    /// Set the assistant house manager
    pub fn assistant_manager(mut self, assistant: Person) -> Self {
        self.event.assistant_manager = Some(assistant);
        self
    }

    /// Append a shift
    pub fn shift(mut self, shift: Shift) -> Self {
        self.event.shifts.push(shift);
        self
    }

    /// Append a named property
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.event.properties.push(EventProperty {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Build the event
    pub fn build(self) -> Event {
        self.event
    }
}
