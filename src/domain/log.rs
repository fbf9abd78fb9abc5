//! In-memory event snapshot owned by the surrounding application.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{common::MonthKey, event::Event};

/// Insertion-ordered collection of events. Serialises as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn event(&self, id: Uuid) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn add_event(&mut self, event: Event) -> Uuid {
        let id = event.id;
        self.events.push(event);
        id
    }

    /// Swaps in `event` for the stored event with the same id, keeping its
    /// position. Returns the previous version.
    pub fn replace_event(&mut self, event: Event) -> Option<Event> {
        let slot = self.events.iter_mut().find(|stored| stored.id == event.id)?;
        Some(std::mem::replace(slot, event))
    }

    pub fn remove_event(&mut self, id: Uuid) -> Option<Event> {
        let position = self.events.iter().position(|event| event.id == id)?;
        Some(self.events.remove(position))
    }

    /// Drops every event outside `month`, returning how many were removed.
    pub fn retain_month(&mut self, month: MonthKey) -> usize {
        let before = self.events.len();
        self.events.retain(|event| month.contains(event.date));
        before - self.events.len()
    }

    pub fn dated(&self, date: NaiveDate) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |event| event.date == date)
    }
}

impl From<Vec<Event>> for EventLog {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl FromIterator<Event> for EventLog {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
