//! Day-by-day debt balance for charting a month.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::accounting::month::exact_sum;
use crate::domain::{common::MonthKey, event::Event, schedule::Settings};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtPoint {
    pub day: u32,
    pub date: NaiveDate,
    pub debt: f64,
}

/// Running debt at the end of each day of `month`.
///
/// Starts from the unrounded balance of earlier months clamped at zero,
/// applies each day's expenses and session credit, and clamps at zero again
/// after every day. For the month containing `today` the curve stops at
/// `today`.
pub fn debt_curve(
    events: &[Event],
    month: impl Into<MonthKey>,
    settings: &Settings,
    today: NaiveDate,
) -> Vec<DebtPoint> {
    let month = month.into();
    let standard = settings.standard_duration;

    let carried = exact_sum(
        events
            .iter()
            .filter(|e| month.starts_after(e.date))
            .map(|e| signed_debt(e, standard)),
    );
    let mut balance = carried.max(0.0);

    let last_day = if month.contains(today) {
        today.day()
    } else {
        month.days_in_month()
    };

    let mut points = Vec::with_capacity(last_day as usize);
    for date in month.days().take(last_day as usize) {
        let delta = exact_sum(
            events
                .iter()
                .filter(|e| e.date == date)
                .map(|e| signed_debt(e, standard)),
        );
        balance = (balance + delta).max(0.0);
        points.push(DebtPoint {
            day: date.day(),
            date,
            debt: balance,
        });
    }
    points
}

fn signed_debt(event: &Event, standard: u32) -> f64 {
    if event.is_expense() {
        event.amount
    } else {
        -event.credit(standard)
    }
}
