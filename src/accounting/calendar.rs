//! Projection of a month onto a Monday-first calendar grid.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::domain::{
    common::MonthKey,
    event::Event,
    schedule::{DayIndex, Schedule, ScheduleEntry},
};

/// Start time used for sessions on unscheduled weekdays.
pub const DEFAULT_SESSION_TIME: (u32, u32) = (18, 0);

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DayCell {
    /// Padding before the first day so it lands in its weekday column.
    Placeholder,
    Day(CalendarDay),
}

impl DayCell {
    pub fn day(&self) -> Option<&CalendarDay> {
        match self {
            DayCell::Placeholder => None,
            DayCell::Day(day) => Some(day),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub day: u32,
    pub date: NaiveDate,
    pub schedule: Option<ScheduleEntry>,
    pub is_today: bool,
    pub session: Option<Event>,
}

impl CalendarDay {
    pub fn is_done(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_scheduled(&self) -> bool {
        self.schedule.is_some()
    }
}

/// Number of placeholder cells before `first` in a Monday-first grid.
pub fn leading_blanks(first: NaiveDate) -> usize {
    DayIndex::of(first).column() as usize
}

/// Expands `month` into grid cells: leading placeholders followed by one
/// cell per day annotated with its schedule slot and recorded session.
pub fn project_month(
    month: impl Into<MonthKey>,
    schedule: &Schedule,
    sessions_by_date: &BTreeMap<NaiveDate, Event>,
    today: NaiveDate,
) -> Vec<DayCell> {
    let month = month.into();
    let blanks = leading_blanks(month.first_day());
    let mut cells = Vec::with_capacity(blanks + month.days_in_month() as usize);
    cells.extend(std::iter::repeat(DayCell::Placeholder).take(blanks));
    cells.extend(month.days().map(|date| {
        DayCell::Day(CalendarDay {
            day: date.day(),
            date,
            schedule: schedule.entry_for(date),
            is_today: date == today,
            session: sessions_by_date.get(&date).cloned(),
        })
    }));
    cells
}

/// Start and end of a session for exporting to an external calendar: the
/// session date at its weekday's scheduled time, lasting `amount` minutes.
///
/// `None` for expenses and for durations that leave chrono's range.
pub fn session_window(event: &Event, schedule: &Schedule) -> Option<(NaiveDateTime, NaiveDateTime)> {
    if !event.is_session() {
        return None;
    }
    let time = schedule
        .entry_for(event.date)
        .map(|entry| entry.time)
        .or_else(|| NaiveTime::from_hms_opt(DEFAULT_SESSION_TIME.0, DEFAULT_SESSION_TIME.1, 0))?;
    let start = event.date.and_time(time);
    let minutes = event.amount.round();
    if !minutes.is_finite() {
        return None;
    }
    let end = start.checked_add_signed(Duration::try_minutes(minutes as i64)?)?;
    Some((start, end))
}
