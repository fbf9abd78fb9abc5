#![doc(test(attr(deny(warnings))))]

//! Sweat Debt turns fast-food spending into minutes of exercise owed and
//! workout sessions into credit that pays the debt down.
//!
//! The [`accounting`] module holds the pure monthly engine and calendar
//! projection; [`services`] wraps them for frontends that own the event log.

pub mod accounting;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod utils;

pub use accounting::{compute_month_summary, project_month, MonthSummary};
pub use domain::{Event, EventKind, EventLog, MonthKey, Settings};
pub use errors::TrackerError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Sweat Debt tracing initialized.");
    });
}
