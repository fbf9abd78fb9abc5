//! Service layer used by frontends: mutations of the event log and the
//! read-side views computed from it.

pub mod event_service;
pub mod summary_service;

pub use event_service::EventService;
pub use summary_service::{Dashboard, SummaryService};

use uuid::Uuid;

use crate::errors::TrackerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error("Event not found: {0}")]
    EventNotFound(Uuid),
    #[error("{0}")]
    Invalid(String),
}
