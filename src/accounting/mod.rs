//! Pure accounting over event snapshots: monthly summary, calendar grid and
//! debt curve. Nothing here performs I/O or mutates its inputs.

pub mod calendar;
pub mod format;
pub mod month;
pub mod progress;
pub mod time;

pub use calendar::{leading_blanks, project_month, session_window, CalendarDay, DayCell};
pub use format::format_elapsed;
pub use month::{compute_month_summary, scheduled_sessions, MonthSummary};
pub use progress::{debt_curve, DebtPoint};
pub use time::{Clock, FixedClock, SystemClock};
