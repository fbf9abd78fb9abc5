//! Domain models for expenses and workout sessions.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_EXPENSE_DESCRIPTION: &str = "Fast food";
pub const DEFAULT_SESSION_DESCRIPTION: &str = "Workout session";

/// A dated expense or workout session.
///
/// `amount` is a monetary value for expenses and a duration in whole minutes
/// for sessions. One unit spent counts as one minute owed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    /// Standard session length in effect when the session was recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_standard: Option<u32>,
}

impl Event {
    pub fn expense(amount: f64, date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: EventKind::Expense,
            amount,
            date,
            description: description_or(description.into(), DEFAULT_EXPENSE_DESCRIPTION),
            target_standard: None,
        }
    }

    /// Records a session, capturing `standard` so later settings changes do
    /// not rewrite its credit.
    pub fn session(
        minutes: u32,
        date: NaiveDate,
        description: impl Into<String>,
        standard: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: EventKind::Session,
            amount: f64::from(minutes),
            date,
            description: description_or(description.into(), DEFAULT_SESSION_DESCRIPTION),
            target_standard: Some(standard),
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EventKind::Expense
    }

    pub fn is_session(&self) -> bool {
        self.kind == EventKind::Session
    }

    /// Standard duration used to score this session. A missing or zero
    /// `target_standard` falls back to `fallback`.
    pub fn effective_standard(&self, fallback: u32) -> u32 {
        self.target_standard
            .filter(|standard| *standard > 0)
            .unwrap_or(fallback)
    }

    /// Minutes beyond the effective standard. Zero for expenses and for
    /// sessions at or under the standard.
    pub fn credit(&self, fallback_standard: u32) -> f64 {
        match self.kind {
            EventKind::Expense => 0.0,
            EventKind::Session => {
                let standard = f64::from(self.effective_standard(fallback_standard));
                (self.amount - standard).max(0.0)
            }
        }
    }
}

fn description_or(description: String, fallback: &str) -> String {
    if description.trim().is_empty() {
        fallback.to_string()
    } else {
        description
    }
}

/// Discriminates what an event's `amount` measures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EventKind {
    #[serde(rename = "expense")]
    Expense,
    #[serde(rename = "sport")]
    Session,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::Expense => "Expense",
            EventKind::Session => "Session",
        };
        f.write_str(label)
    }
}
