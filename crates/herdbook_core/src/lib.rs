//! Core domain logic for herdbook.
//! This crate is the single source of truth for directory invariants:
//! contact identity uniqueness and per-contact meeting overlap rules.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{
    tag_set, Address, Contact, ContactId, ContactPatch, ContactValidationError, Email, Major,
    Name, Phone, Role, Tag,
};
pub use model::meeting::{Meeting, MeetingPatch, MeetingValidationError, TIME_FORMAT};
pub use model::Identified;
pub use repo::directory::{Directory, DirectoryError};
pub use repo::schedule_book::{ScheduleBook, ScheduleError, NO_MEETINGS_MESSAGE};
pub use repo::unique_list::{UniqueList, UniqueListError};
pub use service::directory_service::{DirectoryService, ServiceError};
pub use service::filter::{name_contains_keywords, ContactFilter, ContactPredicate};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
