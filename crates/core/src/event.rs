// SPDX-License-Identifier: MIT

//!
//! The Timescape event type
//!

use crate::CalendarDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can arise in relation to an [`Event`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event `{0}` has an invalid date: {1}")]
    Date(EventId, crate::DateError),

    #[error("Event `{0}` ends before it starts")]
    EndsBeforeStart(EventId),
}

/// The unique identifier of an [`Event`]
#[rustfmt::skip]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(derive_more::Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl EventId {
    /// Get the underlying `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single event as supplied by the host.  Timescape only ever reads the
/// dates (and the milestone flag); any other fields in the source JSON are
/// ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Event {
    /// The event's ID
    pub id: EventId,

    /// When the event started (`[-]YYYY[-MM[-DD]]`)
    pub date_start: String,

    /// When the event ended, if it spans time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<String>,

    /// Milestones are kept visually apart from ordinary events
    #[serde(default)]
    pub milestone: bool,
}

impl Event {
    /// A point-in-time event
    pub fn new<S: ToString>(id: S, date_start: S) -> Self {
        Self {
            id: EventId::from(id.to_string()),
            date_start: date_start.to_string(),
            date_end: None,
            milestone: false,
        }
    }

    /// Create an event, rejecting unparseable dates and end dates that are
    /// before the start date
    pub fn checked<S: ToString>(id: S, date_start: S, date_end: Option<S>) -> Result<Self, EventError> {
        let id = EventId::from(id.to_string());
        let start: CalendarDate = date_start
            .to_string()
            .parse()
            .map_err(|error| EventError::Date(id.clone(), error))?;
        if let Some(date_end) = &date_end {
            let end: CalendarDate = date_end
                .to_string()
                .parse()
                .map_err(|error| EventError::Date(id.clone(), error))?;
            if end < start {
                return Err(EventError::EndsBeforeStart(id));
            }
        }
        Ok(Self {
            id,
            date_start: date_start.to_string(),
            date_end: date_end.map(|end| end.to_string()),
            milestone: false,
        })
    }

    /// Set the end date
    pub fn with_end<S: ToString>(mut self, date_end: S) -> Self {
        self.date_end = Some(date_end.to_string());
        self
    }

    /// Mark the event as a milestone
    pub fn as_milestone(mut self) -> Self {
        self.milestone = true;
        self
    }

    /// The (softly parsed) start date
    pub fn start(&self) -> CalendarDate {
        CalendarDate::parse(&self.date_start)
    }

    /// The (softly parsed) end date, if there is one
    pub fn end(&self) -> Option<CalendarDate> {
        self.date_end.as_deref().map(CalendarDate::parse)
    }

    /// The end date, falling back to the start date
    pub fn end_or_start(&self) -> CalendarDate {
        self.end().unwrap_or_else(|| self.start())
    }
}
