//! Directory facade over the contact list and the meeting schedule.
//!
//! # Responsibility
//! - Own both collections and expose the directory-level API used by
//!   services and external collaborators (persistence, search, display).
//! - Enforce referential integrity: a meeting always targets a contact
//!   that exists in the directory.
//! - Track a revision counter so presentation layers can observe change
//!   without the core depending on them.
//!
//! # Invariants
//! - No two contacts are same-identity.
//! - Removing a contact cascade-removes its meetings.
//! - Bulk loads are atomic: a rejected batch leaves prior state unchanged.

use std::collections::HashSet;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::model::contact::{Contact, ContactId};
use crate::model::meeting::Meeting;
use crate::repo::schedule_book::{ScheduleBook, ScheduleError};
use crate::repo::unique_list::{UniqueList, UniqueListError};

/// Semantic failure of a directory operation. State is unchanged on error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// An identity-equal contact already exists.
    DuplicateContact,
    /// The targeted contact is not in the directory.
    ContactNotFound,
    /// The targeted meeting is not in the directory.
    MeetingNotFound,
    /// The meeting overlaps an existing meeting of the same contact.
    TimeClash,
    /// Global meeting index outside `[0, count)`.
    MeetingIndex { index: usize, count: usize },
    /// A bulk load violated a structural rule; the batch was rejected.
    StructuralViolation(String),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateContact => write!(f, "this contact already exists in the directory"),
            Self::ContactNotFound => write!(f, "no such contact in the directory"),
            Self::MeetingNotFound => write!(f, "no such meeting in the directory"),
            Self::TimeClash => write!(f, "meeting times overlap for this contact"),
            Self::MeetingIndex { index, count } => write!(
                f,
                "meeting index {index} is out of range for {count} scheduled meetings"
            ),
            Self::StructuralViolation(reason) => write!(f, "load rejected: {reason}"),
        }
    }
}

impl Error for DirectoryError {}

impl From<UniqueListError> for DirectoryError {
    fn from(value: UniqueListError) -> Self {
        match value {
            UniqueListError::Duplicate => Self::DuplicateContact,
            UniqueListError::NotFound => Self::ContactNotFound,
        }
    }
}

impl From<ScheduleError> for DirectoryError {
    fn from(value: ScheduleError) -> Self {
        match value {
            ScheduleError::TimeClash => Self::TimeClash,
            ScheduleError::MeetingNotFound => Self::MeetingNotFound,
            ScheduleError::IndexOutOfRange { index, count } => Self::MeetingIndex { index, count },
            ScheduleError::OverlappingBatch => {
                Self::StructuralViolation("incoming meetings overlap for a contact".to_string())
            }
        }
    }
}

/// All directory data: the unique contact list plus the meeting schedule.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    contacts: UniqueList<Contact>,
    schedule: ScheduleBook,
    revision: u64,
}

/// Two directories are equal when they hold the same data; the revision
/// counter is observation metadata and does not participate.
impl PartialEq for Directory {
    fn eq(&self, other: &Self) -> bool {
        self.contacts == other.contacts && self.schedule == other.schedule
    }
}

impl Eq for Directory {}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic change counter, bumped on every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // =========================================================================
    // Contact operations
    // =========================================================================

    /// True iff an identity-equal contact exists.
    pub fn has_contact(&self, contact: &Contact) -> bool {
        self.contacts.contains(contact)
    }

    pub fn has_contact_id(&self, id: ContactId) -> bool {
        self.contact_by_id(id).is_some()
    }

    pub fn contact_by_id(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn add_contact(&mut self, contact: Contact) -> Result<(), DirectoryError> {
        self.contacts.add(contact)?;
        self.revision += 1;
        Ok(())
    }

    /// Replaces `old` with `new` in place.
    ///
    /// When the replacement carries a different id the old id's meetings
    /// are cascade-removed, matching contact deletion.
    pub fn set_contact(&mut self, old: &Contact, new: Contact) -> Result<(), DirectoryError> {
        let old_id = old.id;
        let new_id = new.id;
        self.contacts.replace(old, new)?;
        if old_id != new_id {
            self.schedule.remove_contact(old_id);
        }
        self.revision += 1;
        Ok(())
    }

    /// Removes the value-equal contact, cascade-removing its meetings.
    ///
    /// Returns the meetings that were dropped with it.
    pub fn remove_contact(&mut self, contact: &Contact) -> Result<Vec<Meeting>, DirectoryError> {
        self.contacts.remove(contact)?;
        let dropped = self.schedule.remove_contact(contact.id);
        self.revision += 1;
        Ok(dropped)
    }

    /// Ordered, identity-deduplicated live view of all contacts.
    pub fn contacts(&self) -> &[Contact] {
        self.contacts.as_slice()
    }

    /// Atomic bulk replacement of the contact list.
    ///
    /// Schedule buckets of contacts absent from the new list are pruned
    /// under the same cascade rule as deletion.
    pub fn set_contacts(&mut self, contacts: Vec<Contact>) -> Result<(), DirectoryError> {
        self.contacts.set_all(contacts).map_err(|_| {
            DirectoryError::StructuralViolation("duplicate contact identities in load".to_string())
        })?;
        let keep: HashSet<ContactId> = self.contacts.iter().map(|c| c.id).collect();
        self.schedule.retain_contacts(|id| keep.contains(id));
        self.revision += 1;
        Ok(())
    }

    // =========================================================================
    // Meeting operations
    // =========================================================================

    /// Value-equality membership test.
    pub fn has_meeting(&self, meeting: &Meeting) -> bool {
        self.schedule.contains(meeting)
    }

    /// Adds a meeting for a known contact; overlap is scoped per contact.
    pub fn add_meeting(&mut self, meeting: Meeting) -> Result<(), DirectoryError> {
        if !self.has_contact_id(meeting.contact) {
            return Err(DirectoryError::ContactNotFound);
        }
        self.schedule.add(meeting)?;
        self.revision += 1;
        Ok(())
    }

    pub fn delete_meeting(&mut self, meeting: &Meeting) -> Result<(), DirectoryError> {
        self.schedule.remove(meeting)?;
        self.revision += 1;
        Ok(())
    }

    /// Replaces `old` with `new`, moving it between contacts when their
    /// ids differ.
    pub fn set_meeting(&mut self, old: &Meeting, new: Meeting) -> Result<(), DirectoryError> {
        if !self.has_contact_id(new.contact) {
            return Err(DirectoryError::ContactNotFound);
        }
        self.schedule.replace(old, new)?;
        self.revision += 1;
        Ok(())
    }

    pub fn meeting_at(&self, index: usize) -> Result<&Meeting, DirectoryError> {
        Ok(self.schedule.get(index)?)
    }

    pub fn meeting_count(&self) -> usize {
        self.schedule.len()
    }

    /// Flat view of every meeting, in bucket-concatenation order.
    pub fn meetings(&self) -> impl Iterator<Item = &Meeting> {
        self.schedule.iter()
    }

    /// The contact's own ordered meetings.
    pub fn meetings_of(&self, contact: ContactId) -> &[Meeting] {
        self.schedule.meetings_of(contact)
    }

    /// Atomic bulk replacement of the schedule.
    ///
    /// Rejects the whole batch when any meeting targets an unknown contact
    /// or overlaps another meeting of the same contact.
    pub fn set_meetings(&mut self, meetings: Vec<Meeting>) -> Result<(), DirectoryError> {
        if let Some(meeting) = meetings.iter().find(|m| !self.has_contact_id(m.contact)) {
            return Err(DirectoryError::StructuralViolation(format!(
                "meeting at {} references an unknown contact",
                meeting.location
            )));
        }
        self.schedule.set_all(meetings)?;
        self.revision += 1;
        Ok(())
    }

    /// Replaces all directory data in one atomic step.
    ///
    /// Both halves are validated against fresh collections before either
    /// is swapped in, so a bad load never leaves a partially-populated
    /// directory.
    pub fn reset(
        &mut self,
        contacts: Vec<Contact>,
        meetings: Vec<Meeting>,
    ) -> Result<(), DirectoryError> {
        let mut replacement = Directory::new();
        replacement.set_contacts(contacts)?;
        replacement.set_meetings(meetings)?;
        replacement.revision = self.revision + 1;
        *self = replacement;
        Ok(())
    }

    /// Human-readable meeting listing; see [`ScheduleBook::roster`].
    pub fn roster(&self) -> String {
        self.schedule.roster()
    }
}
