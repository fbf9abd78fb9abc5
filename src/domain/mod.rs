//! Pure domain models: events, schedule, settings and the event log.
//! No I/O, no storage.

pub mod common;
pub mod event;
pub mod log;
pub mod schedule;

pub use common::MonthKey;
pub use event::{Event, EventKind};
pub use log::EventLog;
pub use schedule::{DayIndex, Schedule, ScheduleEntry, ScheduleError, Settings};
