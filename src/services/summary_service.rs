use serde::Serialize;

use crate::accounting::{
    calendar::{project_month, DayCell},
    month::{compute_month_summary, MonthSummary},
    progress::{debt_curve, DebtPoint},
    time::Clock,
};
use crate::domain::{common::MonthKey, log::EventLog, schedule::Settings};

/// Everything a month screen renders, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: MonthSummary,
    pub calendar: Vec<DayCell>,
    pub curve: Vec<DebtPoint>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn month(log: &EventLog, month: MonthKey, settings: &Settings) -> MonthSummary {
        let summary = compute_month_summary(log.events(), month, settings);
        tracing::debug!(
            month = %month,
            remaining_debt = summary.remaining_debt,
            suggested_duration = summary.suggested_duration,
            "month summary computed"
        );
        summary
    }

    pub fn calendar(
        log: &EventLog,
        month: MonthKey,
        settings: &Settings,
        clock: &dyn Clock,
    ) -> Vec<DayCell> {
        let summary = compute_month_summary(log.events(), month, settings);
        project_month(
            month,
            &settings.schedule,
            &summary.sessions_by_date,
            clock.today(),
        )
    }

    pub fn curve(
        log: &EventLog,
        month: MonthKey,
        settings: &Settings,
        clock: &dyn Clock,
    ) -> Vec<DebtPoint> {
        debt_curve(log.events(), month, settings, clock.today())
    }

    pub fn dashboard(
        log: &EventLog,
        month: MonthKey,
        settings: &Settings,
        clock: &dyn Clock,
    ) -> Dashboard {
        let today = clock.today();
        let summary = Self::month(log, month, settings);
        let calendar = project_month(month, &settings.schedule, &summary.sessions_by_date, today);
        let curve = debt_curve(log.events(), month, settings, today);
        Dashboard {
            summary,
            calendar,
            curve,
        }
    }

    /// Month containing the clock's current date.
    pub fn current_month(clock: &dyn Clock) -> MonthKey {
        MonthKey::containing(clock.today())
    }
}
