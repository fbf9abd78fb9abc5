//! Monthly debt and credit accounting.
//!
//! Expenses create debt (one unit spent = one minute owed) and every session
//! minute above the effective standard pays one minute back. Debt carried in
//! from earlier months is rounded up, and the remaining debt of the month is
//! spread over the scheduled sessions still ahead.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    common::MonthKey,
    event::Event,
    schedule::{Schedule, Settings},
};

/// Derived statistics for one calendar month. Recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month: String,
    /// Debt carried in from every month strictly before this one.
    pub accumulated_debt: i64,
    pub total_debt_for_month: i64,
    /// Unpaid debt after this month's expenses and credit. Never negative.
    pub remaining_debt: f64,
    pub sessions_done_count: u32,
    pub total_scheduled_sessions: u32,
    pub remaining_sessions: u32,
    pub suggested_duration: i64,
    /// Share of `suggested_duration` above the standard duration. With no
    /// scheduled session left it is the whole remaining debt, rounded up to
    /// whole minutes like every other duration here.
    pub bonus_per_session: i64,
    pub current_expenses_total: f64,
    pub current_credit: f64,
    /// Events of the month, most recent date first.
    pub history: Vec<Event>,
    /// One session per date; a later session on the same date replaces an
    /// earlier one here while both stay in `history`.
    pub sessions_by_date: BTreeMap<NaiveDate, Event>,
    /// Number of sessions recorded this month. Not a consecutive-days streak.
    pub current_streak: u32,
}

/// Computes the summary of `month` from a snapshot of the event log.
///
/// Total over any input: `events` may be empty or unsorted, and a zero
/// standard duration yields degenerate but defined figures.
pub fn compute_month_summary(
    events: &[Event],
    month: impl Into<MonthKey>,
    settings: &Settings,
) -> MonthSummary {
    let month = month.into();
    let standard = settings.standard_duration;

    let past_expenses = exact_sum(
        events
            .iter()
            .filter(|e| e.is_expense() && month.starts_after(e.date))
            .map(|e| e.amount),
    );
    let past_credit = exact_sum(
        events
            .iter()
            .filter(|e| e.is_session() && month.starts_after(e.date))
            .map(|e| e.credit(standard)),
    );
    let accumulated_debt = (past_expenses - past_credit).ceil() as i64;
    let total_debt_for_month = accumulated_debt.max(0);

    let current_expenses = exact_sum(
        events
            .iter()
            .filter(|e| e.is_expense() && month.contains(e.date))
            .map(|e| e.amount),
    );

    let mut sessions: Vec<&Event> = events
        .iter()
        .filter(|e| e.is_session() && month.contains(e.date))
        .collect();
    sessions.sort_by_key(|e| e.date);
    let current_credit = exact_sum(sessions.iter().map(|e| e.credit(standard)));

    let total_scheduled_sessions = scheduled_sessions(month, &settings.schedule);
    let sessions_done_count = sessions.len() as u32;
    let remaining_sessions = total_scheduled_sessions.saturating_sub(sessions_done_count);

    let net_debt = accumulated_debt as f64 + current_expenses - current_credit;
    let remaining_debt = net_debt.max(0.0);

    let bonus_per_session = if remaining_sessions > 0 {
        (remaining_debt / f64::from(remaining_sessions)).ceil() as i64
    } else {
        remaining_debt.ceil() as i64
    };
    let suggested_duration = i64::from(standard) + bonus_per_session;

    let mut history: Vec<Event> = events
        .iter()
        .filter(|e| month.contains(e.date))
        .cloned()
        .collect();
    history.sort_by(|a, b| b.date.cmp(&a.date));

    let mut sessions_by_date = BTreeMap::new();
    for session in &sessions {
        sessions_by_date.insert(session.date, (*session).clone());
    }

    MonthSummary {
        month: month.prefix(),
        accumulated_debt,
        total_debt_for_month,
        remaining_debt,
        sessions_done_count,
        total_scheduled_sessions,
        remaining_sessions,
        suggested_duration,
        bonus_per_session,
        current_expenses_total: current_expenses,
        current_credit,
        history,
        sessions_by_date,
        current_streak: sessions_done_count,
    }
}

/// Counts the days of `month` whose weekday carries a schedule entry.
pub fn scheduled_sessions(month: MonthKey, schedule: &Schedule) -> u32 {
    month.days().filter(|day| schedule.is_scheduled(*day)).count() as u32
}

/// Sums in ascending order so the result does not depend on the order of
/// the event log.
pub(crate) fn exact_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schedule::ScheduleEntry;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn settings(standard: u32, days: &[u8]) -> Settings {
        let schedule = Schedule::from_entries(
            days.iter()
                .map(|day| ScheduleEntry::parse(*day, "18:00").unwrap()),
        )
        .unwrap();
        Settings::new(standard, schedule)
    }

    #[test]
    fn counts_scheduled_weekdays() {
        // June 2025 starts on a Sunday: 5 Mondays, 4 Thursdays.
        let june = MonthKey::new(2025, 6).unwrap();
        assert_eq!(scheduled_sessions(june, &settings(60, &[1]).schedule), 5);
        assert_eq!(scheduled_sessions(june, &settings(60, &[1, 4]).schedule), 9);
        assert_eq!(scheduled_sessions(june, &Schedule::new()), 0);
        let every_day = settings(60, &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(scheduled_sessions(june, &every_day.schedule), 30);
    }

    #[test]
    fn past_credit_offsets_past_expenses() {
        let events = vec![
            Event::expense(50.5, date(2025, 4, 10), "Burger"),
            Event::session(80, date(2025, 4, 12), "Run", 60),
        ];
        let summary = compute_month_summary(&events, date(2025, 5, 1), &settings(60, &[]));
        // 50.5 - 20 = 30.5, rounded up.
        assert_eq!(summary.accumulated_debt, 31);
        assert_eq!(summary.total_debt_for_month, 31);
        assert!(summary.history.is_empty());
    }

    #[test]
    fn surplus_credit_leaves_negative_accumulated_debt() {
        let events = vec![Event::session(150, date(2025, 4, 12), "Hike", 60)];
        let summary = compute_month_summary(&events, date(2025, 5, 20), &settings(60, &[]));
        assert_eq!(summary.accumulated_debt, -90);
        assert_eq!(summary.total_debt_for_month, 0);
        assert_eq!(summary.remaining_debt, 0.0);
        assert_eq!(summary.suggested_duration, 60);
    }

    #[test]
    fn remaining_debt_is_spread_over_remaining_sessions() {
        // May 2025: Mondays on 5, 12, 19, 26.
        let events = vec![
            Event::expense(100.0, date(2025, 4, 2), "Pizza"),
            Event::expense(3.0, date(2025, 5, 3), "Fries"),
            Event::session(60, date(2025, 5, 5), "Gym", 60),
        ];
        let summary = compute_month_summary(&events, date(2025, 5, 15), &settings(60, &[1]));
        assert_eq!(summary.total_scheduled_sessions, 4);
        assert_eq!(summary.sessions_done_count, 1);
        assert_eq!(summary.remaining_sessions, 3);
        assert_eq!(summary.remaining_debt, 103.0);
        assert_eq!(summary.bonus_per_session, 35);
        assert_eq!(summary.suggested_duration, 95);
    }

    #[test]
    fn sessions_beyond_schedule_do_not_underflow() {
        let events: Vec<Event> = (1..=6)
            .map(|d| Event::session(60, date(2025, 5, d), "Gym", 60))
            .collect();
        let summary = compute_month_summary(&events, date(2025, 5, 1), &settings(60, &[1]));
        assert_eq!(summary.remaining_sessions, 0);
        assert_eq!(summary.current_streak, 6);
    }

    #[test]
    fn zero_standard_duration_is_defined() {
        let events = vec![Event::session(30, date(2025, 5, 2), "Yoga", 0)];
        let summary = compute_month_summary(&events, date(2025, 5, 2), &settings(0, &[]));
        assert_eq!(summary.current_credit, 30.0);
        assert_eq!(summary.suggested_duration, 0);
    }

    #[test]
    fn history_is_most_recent_first() {
        let events = vec![
            Event::expense(1.0, date(2025, 5, 2), "a"),
            Event::expense(2.0, date(2025, 5, 20), "b"),
            Event::expense(3.0, date(2025, 5, 9), "c"),
        ];
        let summary = compute_month_summary(&events, date(2025, 5, 1), &settings(60, &[]));
        let days: Vec<_> = summary.history.iter().map(|e| e.date).collect();
        assert_eq!(
            days,
            vec![date(2025, 5, 20), date(2025, 5, 9), date(2025, 5, 2)]
        );
        assert_eq!(summary.month, "2025-05");
    }

    #[test]
    fn last_supported_month_is_computable() {
        let summary = compute_month_summary(&[], NaiveDate::MAX, &Settings::default());
        assert_eq!(summary.remaining_debt, 0.0);
        assert!(summary.total_scheduled_sessions >= 8);
        assert_eq!(summary.suggested_duration, 60);
    }

    #[test]
    fn exact_sum_ignores_input_order() {
        let forward = exact_sum([0.1, 0.2, 0.3, 1e16, -1e16].into_iter());
        let backward = exact_sum([-1e16, 1e16, 0.3, 0.2, 0.1].into_iter());
        assert_eq!(forward.to_bits(), backward.to_bits());
    }
}
