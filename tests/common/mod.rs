#![allow(dead_code)]

use chrono::NaiveDate;
use sweat_debt::domain::{
    schedule::{Schedule, ScheduleEntry},
    Event, Settings,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn expense(amount: f64, on: NaiveDate) -> Event {
    Event::expense(amount, on, "")
}

pub fn session(minutes: u32, on: NaiveDate, standard: u32) -> Event {
    Event::session(minutes, on, "", standard)
}

/// Settings training on the given Monday-first day indexes at 18:00.
pub fn settings(standard: u32, days: &[u8]) -> Settings {
    let schedule = Schedule::from_entries(
        days.iter()
            .map(|day| ScheduleEntry::parse(*day, "18:00").expect("valid entry")),
    )
    .expect("distinct days");
    Settings::new(standard, schedule)
}

/// Deterministic permutation without pulling in an RNG crate.
pub fn shuffled<T: Clone>(items: &[T], seed: usize) -> Vec<T> {
    let mut out: Vec<T> = items.to_vec();
    let len = out.len();
    for i in 0..len {
        let j = (i * 7 + seed * 13 + 3) % len;
        out.swap(i, j);
    }
    out
}
