//! Weekly training schedule and the settings the accounting engine honours.
//!
//! Every conversion between chrono's weekday numbering and the
//! Monday-first `1..=7` day index lives in [`DayIndex`].

use std::{collections::BTreeMap, fmt};

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::TrackerError;

pub const DEFAULT_STANDARD_DURATION: u32 = 60;
const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("day index {0} is outside 1..=7")]
    DayOutOfRange(u8),
    #[error("day {0} is scheduled more than once")]
    DuplicateDay(DayIndex),
    #[error("invalid time `{0}`, expected HH:MM")]
    InvalidTime(String),
}

/// Day of the week numbered Monday=1 through Sunday=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayIndex(u8);

impl DayIndex {
    pub const MONDAY: DayIndex = DayIndex(1);
    pub const THURSDAY: DayIndex = DayIndex(4);
    pub const SUNDAY: DayIndex = DayIndex(7);

    pub fn new(value: u8) -> Result<Self, ScheduleError> {
        if (1..=7).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ScheduleError::DayOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        Self(weekday.number_from_monday() as u8)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    pub fn weekday(self) -> Weekday {
        match self.0 {
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }

    /// Zero-based column in a Monday-first week grid.
    pub fn column(self) -> u32 {
        u32::from(self.0 - 1)
    }

    /// Sunday-first numbering (Sunday=1 .. Saturday=7) used by reminder
    /// schedulers.
    pub fn sunday_first(self) -> u8 {
        self.0 % 7 + 1
    }

    pub fn all() -> impl Iterator<Item = DayIndex> {
        (1..=7).map(DayIndex)
    }
}

impl TryFrom<u8> for DayIndex {
    type Error = ScheduleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DayIndex::new(value)
    }
}

impl From<DayIndex> for u8 {
    fn from(day: DayIndex) -> Self {
        day.0
    }
}

impl fmt::Display for DayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.weekday())
    }
}

/// A scheduled training slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub day_index: DayIndex,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
}

impl ScheduleEntry {
    pub fn new(day_index: DayIndex, time: NaiveTime) -> Self {
        Self { day_index, time }
    }

    pub fn parse(day_index: u8, time: &str) -> Result<Self, ScheduleError> {
        Ok(Self {
            day_index: DayIndex::new(day_index)?,
            time: parse_time(time)?,
        })
    }

    pub fn time_label(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT)
        .map_err(|_| ScheduleError::InvalidTime(raw.to_string()))
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(super::TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(D::Error::custom)
    }
}

/// Set of schedule entries with at most one entry per day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ScheduleEntry>", into = "Vec<ScheduleEntry>")]
pub struct Schedule {
    entries: BTreeMap<DayIndex, NaiveTime>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = ScheduleEntry>,
    ) -> Result<Self, ScheduleError> {
        let mut schedule = Self::new();
        for entry in entries {
            if schedule.entries.contains_key(&entry.day_index) {
                return Err(ScheduleError::DuplicateDay(entry.day_index));
            }
            schedule.entries.insert(entry.day_index, entry.time);
        }
        Ok(schedule)
    }

    /// Schedules `day` at `time`, replacing any previous slot for that day.
    pub fn set(&mut self, day: DayIndex, time: NaiveTime) -> Option<NaiveTime> {
        self.entries.insert(day, time)
    }

    pub fn remove(&mut self, day: DayIndex) -> Option<NaiveTime> {
        self.entries.remove(&day)
    }

    pub fn entry(&self, day: DayIndex) -> Option<ScheduleEntry> {
        self.entries
            .get(&day)
            .map(|time| ScheduleEntry::new(day, *time))
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<ScheduleEntry> {
        self.entry(DayIndex::of(date))
    }

    pub fn is_scheduled(&self, date: NaiveDate) -> bool {
        self.entries.contains_key(&DayIndex::of(date))
    }

    pub fn entries(&self) -> impl Iterator<Item = ScheduleEntry> + '_ {
        self.entries
            .iter()
            .map(|(day, time)| ScheduleEntry::new(*day, *time))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<ScheduleEntry>> for Schedule {
    type Error = ScheduleError;

    fn try_from(entries: Vec<ScheduleEntry>) -> Result<Self, Self::Error> {
        Schedule::from_entries(entries)
    }
}

impl From<Schedule> for Vec<ScheduleEntry> {
    fn from(schedule: Schedule) -> Self {
        schedule.entries().collect()
    }
}

/// Values the accounting engine reads from user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Baseline session length in minutes.
    pub standard_duration: u32,
    #[serde(default)]
    pub schedule: Schedule,
}

impl Settings {
    pub fn new(standard_duration: u32, schedule: Schedule) -> Self {
        Self {
            standard_duration,
            schedule,
        }
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.standard_duration == 0 {
            return Err(TrackerError::InvalidInput(
                "standard duration must be at least one minute".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        let mut schedule = Schedule::new();
        schedule.set(
            DayIndex::MONDAY,
            NaiveTime::from_hms_opt(18, 0, 0).expect("valid time"),
        );
        schedule.set(
            DayIndex::THURSDAY,
            NaiveTime::from_hms_opt(19, 0, 0).expect("valid time"),
        );
        Self {
            standard_duration: DEFAULT_STANDARD_DURATION,
            schedule,
        }
    }
}
