//! Business logic helpers for managing the event log.

use uuid::Uuid;

use crate::domain::{common::MonthKey, event::Event, log::EventLog};

use super::{ServiceError, ServiceResult};

/// Provides validated CRUD helpers for logged expenses and sessions.
pub struct EventService;

impl EventService {
    /// Appends a new event and returns its identifier.
    pub fn add(log: &mut EventLog, event: Event) -> ServiceResult<Uuid> {
        validate(&event)?;
        let id = log.add_event(event);
        tracing::info!(event_id = %id, "event added");
        Ok(id)
    }

    /// Replaces the stored event carrying the same id as `event`.
    pub fn update(log: &mut EventLog, event: Event) -> ServiceResult<Event> {
        validate(&event)?;
        let id = event.id;
        let previous = log
            .replace_event(event)
            .ok_or(ServiceError::EventNotFound(id))?;
        tracing::info!(event_id = %id, "event updated");
        Ok(previous)
    }

    /// Removes the event identified by `id`, returning the removed instance.
    pub fn remove(log: &mut EventLog, id: Uuid) -> ServiceResult<Event> {
        let removed = log.remove_event(id).ok_or(ServiceError::EventNotFound(id))?;
        tracing::info!(event_id = %id, "event removed");
        Ok(removed)
    }

    /// Forgets every event outside `current`, wiping carried-over debt and
    /// credit. Returns the number of events dropped.
    pub fn reset_history(log: &mut EventLog, current: MonthKey) -> usize {
        let removed = log.retain_month(current);
        tracing::info!(month = %current, removed, "history reset");
        removed
    }

    /// Returns a snapshot of the log's events.
    pub fn list(log: &EventLog) -> Vec<&Event> {
        log.events().iter().collect()
    }
}

fn validate(event: &Event) -> ServiceResult<()> {
    if !event.amount.is_finite() || event.amount < 0.0 {
        tracing::warn!(event_id = %event.id, amount = event.amount, "rejected event amount");
        return Err(ServiceError::Invalid(format!(
            "amount must be a non-negative number, got {}",
            event.amount
        )));
    }
    if event.is_session() && event.amount.fract() != 0.0 {
        tracing::warn!(event_id = %event.id, amount = event.amount, "rejected session duration");
        return Err(ServiceError::Invalid(
            "session duration must be whole minutes".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn update_fails_for_missing_event() {
        let mut log = EventLog::new();
        let err = EventService::update(&mut log, Event::expense(4.0, date(1, 1), "Soda"))
            .expect_err("update must fail for unknown id");
        assert!(
            matches!(err, ServiceError::EventNotFound(_)),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn remove_returns_deleted_event() {
        let mut log = EventLog::new();
        let event = Event::session(45, date(1, 2), "Swim", 60);
        let id = EventService::add(&mut log, event).unwrap();

        let removed = EventService::remove(&mut log, id).unwrap();
        assert_eq!(removed.id, id);
        assert!(log.event(id).is_none());
    }

    #[test]
    fn rejects_negative_and_fractional_amounts() {
        let mut log = EventLog::new();
        let err = EventService::add(&mut log, Event::expense(-1.0, date(1, 1), "Refund"))
            .expect_err("negative expense");
        assert!(err.to_string().contains("non-negative"), "{err}");

        let mut session = Event::session(30, date(1, 1), "Walk", 60);
        session.amount = 30.5;
        assert!(EventService::add(&mut log, session).is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn reset_history_keeps_current_month_only() {
        let mut log = EventLog::new();
        EventService::add(&mut log, Event::expense(9.0, date(1, 30), "Wings")).unwrap();
        EventService::add(&mut log, Event::expense(6.0, date(2, 2), "Shake")).unwrap();

        let removed = EventService::reset_history(&mut log, MonthKey::containing(date(2, 14)));
        assert_eq!(removed, 1);
        assert_eq!(EventService::list(&log).len(), 1);
    }
}
