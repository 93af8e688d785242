//! Meeting domain model.
//!
//! # Responsibility
//! - Define the scheduled-interval value object tied to a contact.
//! - Provide the half-open overlap rule and interval validation.
//! - Provide the patch structure for partial edits.
//!
//! # Invariants
//! - `end` is strictly after `start`.
//! - `location` is never blank.
//! - Intervals are half-open `[start, end)`; touching endpoints do not
//!   overlap.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::contact::ContactId;
use crate::model::Identified;

/// Display format for meeting times, matching the command input format.
pub const TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Constraint violation raised while constructing or patching a meeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingValidationError {
    /// End does not lie strictly after start.
    Interval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    EmptyLocation,
}

impl Display for MeetingValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interval { start, end } => write!(
                f,
                "meeting end {} must be after start {}",
                end.format(TIME_FORMAT),
                start.format(TIME_FORMAT)
            ),
            Self::EmptyLocation => write!(f, "meeting location cannot be blank"),
        }
    }
}

impl Error for MeetingValidationError {}

/// One scheduled interval with a contact.
///
/// References its contact by stable id, not by display name, so the record
/// survives contact renames untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub contact: ContactId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
}

impl Meeting {
    /// Creates a meeting, rejecting empty intervals and blank locations.
    pub fn new(
        contact: ContactId,
        start: NaiveDateTime,
        end: NaiveDateTime,
        location: impl Into<String>,
    ) -> Result<Self, MeetingValidationError> {
        if !Self::is_valid_interval(start, end) {
            return Err(MeetingValidationError::Interval { start, end });
        }
        let location = location.into();
        if location.trim().is_empty() {
            return Err(MeetingValidationError::EmptyLocation);
        }
        Ok(Self {
            contact,
            start,
            end,
            location,
        })
    }

    /// True when `start` lies strictly before `end`.
    pub fn is_valid_interval(start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < end
    }

    /// Half-open interval intersection; meaningful for meetings of the
    /// same contact.
    pub fn overlaps(&self, other: &Meeting) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns a copy with the patch's present fields overlaid.
    ///
    /// The merged candidate is re-validated, so a patch can never produce
    /// an invalid meeting.
    pub fn apply_patch(&self, patch: &MeetingPatch) -> Result<Meeting, MeetingValidationError> {
        Meeting::new(
            patch.contact.unwrap_or(self.contact),
            patch.start.unwrap_or(self.start),
            patch.end.unwrap_or(self.end),
            patch
                .location
                .clone()
                .unwrap_or_else(|| self.location.clone()),
        )
    }
}

impl Identified for Meeting {
    /// Two meetings are the same appointment when they target the same
    /// contact at the same location with intersecting intervals.
    fn same_identity(&self, other: &Self) -> bool {
        self.contact == other.contact && self.location == other.location && self.overlaps(other)
    }
}

impl Display for Meeting {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Start Time: {}; End Time: {}",
            self.location,
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

/// Partial edit for a meeting; present fields replace existing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingPatch {
    pub contact: Option<ContactId>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub location: Option<String>,
}

impl MeetingPatch {
    /// True when no field is set; such a patch edits nothing.
    pub fn is_empty(&self) -> bool {
        self.contact.is_none()
            && self.start.is_none()
            && self.end.is_none()
            && self.location.is_none()
    }
}
