//! Normalized meeting store.
//!
//! # Responsibility
//! - Hold every scheduled meeting, grouped into per-contact buckets.
//! - Enforce the no-overlap rule within each contact's bucket.
//! - Derive the flat global view and global indexing from bucket
//!   concatenation order.
//!
//! # Invariants
//! - For a fixed contact, no two meetings overlap.
//! - A meeting exists in exactly one bucket; there is no second copy to
//!   keep in sync.
//! - Buckets appear in the order their contact first received a meeting;
//!   empty buckets are dropped.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::model::contact::ContactId;
use crate::model::meeting::Meeting;

/// Listing output when the book holds no meetings.
pub const NO_MEETINGS_MESSAGE: &str = "No meetings scheduled.";

/// Semantic failure of a schedule operation. State is unchanged on error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The meeting overlaps an existing meeting of the same contact.
    TimeClash,
    /// No value-equal meeting exists in the book.
    MeetingNotFound,
    /// Global index outside `[0, count)`.
    IndexOutOfRange { index: usize, count: usize },
    /// An incoming batch contains same-contact overlapping meetings.
    OverlappingBatch,
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeClash => write!(f, "meeting times overlap for this contact"),
            Self::MeetingNotFound => write!(f, "no such meeting in the schedule"),
            Self::IndexOutOfRange { index, count } => write!(
                f,
                "meeting index {index} is out of range for {count} scheduled meetings"
            ),
            Self::OverlappingBatch => {
                write!(f, "incoming meetings overlap for at least one contact")
            }
        }
    }
}

impl Error for ScheduleError {}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Bucket {
    contact: ContactId,
    meetings: Vec<Meeting>,
}

/// All meetings across all contacts, one bucket per contact.
///
/// The "global list" views (`iter`, `get`, `len`, `roster`) are computed
/// from the buckets; there is no separately stored flat copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleBook {
    buckets: Vec<Bucket>,
}

impl ScheduleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `meeting` to its contact's bucket.
    ///
    /// Overlap is checked only against that contact's other meetings;
    /// cross-contact overlap is allowed by design.
    pub fn add(&mut self, meeting: Meeting) -> Result<(), ScheduleError> {
        if self.clashes(&meeting, None) {
            return Err(ScheduleError::TimeClash);
        }
        self.append_to_bucket(meeting);
        Ok(())
    }

    /// Removes the first meeting value-equal to `meeting`.
    pub fn remove(&mut self, meeting: &Meeting) -> Result<(), ScheduleError> {
        let (bucket_index, slot) = self
            .position(meeting)
            .ok_or(ScheduleError::MeetingNotFound)?;
        self.buckets[bucket_index].meetings.remove(slot);
        if self.buckets[bucket_index].meetings.is_empty() {
            self.buckets.remove(bucket_index);
        }
        Ok(())
    }

    /// Substitutes `new` for `old`.
    ///
    /// When both target the same contact the overlap re-check excludes the
    /// meeting being replaced; when the contact differs this is a move and
    /// `new` is validated against its full destination bucket. Both halves
    /// are validated before any mutation.
    pub fn replace(&mut self, old: &Meeting, new: Meeting) -> Result<(), ScheduleError> {
        let position = self.position(old).ok_or(ScheduleError::MeetingNotFound)?;

        let exclude = if old.contact == new.contact {
            Some(old)
        } else {
            None
        };
        if self.clashes(&new, exclude) {
            return Err(ScheduleError::TimeClash);
        }

        let (bucket_index, slot) = position;
        if old.contact == new.contact {
            self.buckets[bucket_index].meetings[slot] = new;
        } else {
            self.buckets[bucket_index].meetings.remove(slot);
            if self.buckets[bucket_index].meetings.is_empty() {
                self.buckets.remove(bucket_index);
            }
            self.append_to_bucket(new);
        }
        Ok(())
    }

    /// Value-equality membership test over all buckets.
    pub fn contains(&self, meeting: &Meeting) -> bool {
        self.position(meeting).is_some()
    }

    /// Replaces the whole book atomically.
    pub fn set_all(&mut self, meetings: Vec<Meeting>) -> Result<(), ScheduleError> {
        let mut replacement = ScheduleBook::new();
        for meeting in meetings {
            replacement
                .add(meeting)
                .map_err(|_| ScheduleError::OverlappingBatch)?;
        }
        *self = replacement;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.meetings.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Meeting at `index` in bucket-concatenation order.
    pub fn get(&self, index: usize) -> Result<&Meeting, ScheduleError> {
        self.iter().nth(index).ok_or(ScheduleError::IndexOutOfRange {
            index,
            count: self.len(),
        })
    }

    /// Flat view of every meeting, in bucket-concatenation order.
    pub fn iter(&self) -> impl Iterator<Item = &Meeting> {
        self.buckets.iter().flat_map(|b| b.meetings.iter())
    }

    /// The contact's own ordered meetings; empty when none are scheduled.
    pub fn meetings_of(&self, contact: ContactId) -> &[Meeting] {
        self.bucket(contact)
            .map(|b| b.meetings.as_slice())
            .unwrap_or(&[])
    }

    /// Drops the contact's whole bucket, returning its meetings.
    pub fn remove_contact(&mut self, contact: ContactId) -> Vec<Meeting> {
        match self.buckets.iter().position(|b| b.contact == contact) {
            Some(index) => self.buckets.remove(index).meetings,
            None => Vec::new(),
        }
    }

    /// Keeps only buckets whose contact satisfies `keep`.
    pub fn retain_contacts<F: Fn(&ContactId) -> bool>(&mut self, keep: F) {
        self.buckets.retain(|b| keep(&b.contact));
    }

    /// Human-readable listing, one line per meeting.
    pub fn roster(&self) -> String {
        if self.is_empty() {
            return NO_MEETINGS_MESSAGE.to_string();
        }
        self.iter()
            .map(|meeting| meeting.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn bucket(&self, contact: ContactId) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.contact == contact)
    }

    fn append_to_bucket(&mut self, meeting: Meeting) {
        match self.buckets.iter().position(|b| b.contact == meeting.contact) {
            Some(index) => self.buckets[index].meetings.push(meeting),
            None => self.buckets.push(Bucket {
                contact: meeting.contact,
                meetings: vec![meeting],
            }),
        }
    }

    fn position(&self, meeting: &Meeting) -> Option<(usize, usize)> {
        self.buckets.iter().enumerate().find_map(|(i, bucket)| {
            bucket
                .meetings
                .iter()
                .position(|m| m == meeting)
                .map(|slot| (i, slot))
        })
    }

    /// True when `meeting` overlaps another meeting of its contact,
    /// ignoring at most one excluded occurrence.
    fn clashes(&self, meeting: &Meeting, exclude: Option<&Meeting>) -> bool {
        let mut skipped = false;
        self.meetings_of(meeting.contact).iter().any(|existing| {
            if !skipped && Some(existing) == exclude {
                skipped = true;
                return false;
            }
            existing.overlaps(meeting)
        })
    }
}
