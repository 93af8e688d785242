//! Directory use-case service.
//!
//! # Responsibility
//! - Provide the command-level operations over the directory: contact
//!   add/edit/delete, meeting schedule/edit/delete, listing and filtering.
//! - Resolve user-visible indexes (filtered contact index, global meeting
//!   index) into records.
//! - Keep the filtered view's predicate state.
//!
//! # Invariants
//! - All mutation goes through this layer; operations are all-or-nothing.
//! - Contact edits keep the stable id, so the schedule never needs a
//!   cascade on rename.
//! - Adding or editing a contact resets the filter to show-all.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use chrono::NaiveDateTime;
use log::info;

use crate::model::contact::{Contact, ContactPatch};
use crate::model::meeting::{Meeting, MeetingPatch, MeetingValidationError};
use crate::model::Identified;
use crate::repo::directory::{Directory, DirectoryError};
use crate::service::filter::{ContactFilter, ContactPredicate};

/// User-correctable failure of a directory operation.
///
/// None of these are fatal; callers present the message and let the user
/// retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Filtered contact index outside the displayed list.
    ContactIndex { index: usize, count: usize },
    /// Global meeting index outside the schedule.
    MeetingIndex { index: usize, count: usize },
    /// An edit patch with no fields set.
    EmptyPatch,
    DuplicateContact,
    DuplicateMeeting,
    ContactNotFound,
    MeetingNotFound,
    /// The meeting would overlap an existing meeting of the same contact;
    /// recoverable by choosing a different timing.
    TimeClash,
    /// Interval or field constraint violation.
    Validation(MeetingValidationError),
    /// A bulk load was rejected; prior state is unchanged.
    LoadRejected(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContactIndex { .. } => write!(f, "the contact index provided is invalid"),
            Self::MeetingIndex { .. } => write!(f, "the meeting index provided is invalid"),
            Self::EmptyPatch => write!(f, "at least one field to edit must be provided"),
            Self::DuplicateContact => {
                write!(f, "this contact already exists in the directory")
            }
            Self::DuplicateMeeting => write!(f, "this meeting already exists"),
            Self::ContactNotFound => write!(f, "the stated contact does not exist"),
            Self::MeetingNotFound => write!(f, "no such meeting in the directory"),
            Self::TimeClash => write!(
                f,
                "another meeting with this contact occurs at that time; \
                 reschedule to a timing when you are available"
            ),
            Self::Validation(err) => write!(f, "{err}"),
            Self::LoadRejected(reason) => write!(f, "load rejected: {reason}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MeetingValidationError> for ServiceError {
    fn from(value: MeetingValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DirectoryError> for ServiceError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::DuplicateContact => Self::DuplicateContact,
            DirectoryError::ContactNotFound => Self::ContactNotFound,
            DirectoryError::MeetingNotFound => Self::MeetingNotFound,
            DirectoryError::TimeClash => Self::TimeClash,
            DirectoryError::MeetingIndex { index, count } => Self::MeetingIndex { index, count },
            DirectoryError::StructuralViolation(reason) => Self::LoadRejected(reason),
        }
    }
}

/// Command-level operations over one directory instance.
pub struct DirectoryService {
    directory: Directory,
    filter: ContactFilter,
}

impl Default for DirectoryService {
    fn default() -> Self {
        Self::new(Directory::new())
    }
}

impl DirectoryService {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            filter: ContactFilter::show_all(),
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    // =========================================================================
    // Filtered view
    // =========================================================================

    /// Live projection of the contact list under the active predicate,
    /// recomputed on every read.
    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        self.directory
            .contacts()
            .iter()
            .filter(|c| self.filter.matches(c))
            .collect()
    }

    /// Replaces the active filter predicate.
    pub fn update_filter(&mut self, predicate: ContactPredicate) {
        self.filter = ContactFilter::new(predicate);
    }

    fn reset_filter(&mut self) {
        self.filter = ContactFilter::show_all();
    }

    // =========================================================================
    // Contact operations
    // =========================================================================

    /// Inserts a new contact and resets the filter to show-all.
    pub fn add_contact(&mut self, contact: Contact) -> Result<(), ServiceError> {
        let id = contact.id;
        self.directory.add_contact(contact)?;
        self.reset_filter();
        info!("event=contact_added module=service status=ok id={id}");
        Ok(())
    }

    /// Edits the contact at `index` in the filtered list by overlaying the
    /// patch's present fields, then resets the filter to show-all.
    ///
    /// Returns the edited record. The contact's id and its meetings are
    /// untouched even when the name changes.
    pub fn edit_contact(
        &mut self,
        index: usize,
        patch: &ContactPatch,
    ) -> Result<Contact, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::EmptyPatch);
        }

        let original = self.contact_at(index)?.clone();
        let candidate = original.apply_patch(patch);

        if !original.same_identity(&candidate) && self.directory.has_contact(&candidate) {
            return Err(ServiceError::DuplicateContact);
        }

        self.directory.set_contact(&original, candidate.clone())?;
        self.reset_filter();
        info!("event=contact_edited module=service status=ok id={}", candidate.id);
        Ok(candidate)
    }

    /// Removes the value-equal contact, cascade-removing its meetings.
    ///
    /// Returns the meetings dropped with it.
    pub fn remove_contact(&mut self, contact: &Contact) -> Result<Vec<Meeting>, ServiceError> {
        let dropped = self.directory.remove_contact(contact)?;
        info!(
            "event=contact_removed module=service status=ok id={} cascaded_meetings={}",
            contact.id,
            dropped.len()
        );
        Ok(dropped)
    }

    // =========================================================================
    // Meeting operations
    // =========================================================================

    /// Schedules a meeting with the contact at `index` in the filtered
    /// list.
    ///
    /// Fails without mutation on an empty interval, a blank location, or a
    /// time clash with the contact's own meetings.
    pub fn schedule(
        &mut self,
        contact_index: usize,
        start: NaiveDateTime,
        end: NaiveDateTime,
        location: impl Into<String>,
    ) -> Result<Meeting, ServiceError> {
        let contact_id = self.contact_at(contact_index)?.id;
        let meeting = Meeting::new(contact_id, start, end, location)?;
        self.directory.add_meeting(meeting.clone())?;
        info!(
            "event=meeting_scheduled module=service status=ok contact={contact_id}"
        );
        Ok(meeting)
    }

    /// Edits the meeting at global `index` by overlaying the patch's
    /// present fields.
    ///
    /// Changing the target contact is a logical move: the new contact must
    /// exist and the meeting re-runs the schedule validation path under it.
    pub fn edit_meeting(
        &mut self,
        index: usize,
        patch: &MeetingPatch,
    ) -> Result<Meeting, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::EmptyPatch);
        }

        let original = self.directory.meeting_at(index)?.clone();
        let candidate = original.apply_patch(patch)?;

        if candidate.contact != original.contact
            && !self.directory.has_contact_id(candidate.contact)
        {
            return Err(ServiceError::ContactNotFound);
        }
        if candidate != original && self.directory.has_meeting(&candidate) {
            return Err(ServiceError::DuplicateMeeting);
        }

        let moved = candidate.contact != original.contact;
        self.directory.set_meeting(&original, candidate.clone())?;
        info!(
            "event=meeting_edited module=service status=ok contact={} moved={moved}",
            candidate.contact
        );
        Ok(candidate)
    }

    /// Deletes the meeting at global `index`, returning the removed record.
    pub fn delete_meeting(&mut self, index: usize) -> Result<Meeting, ServiceError> {
        let meeting = self.directory.meeting_at(index)?.clone();
        self.directory.delete_meeting(&meeting)?;
        info!(
            "event=meeting_deleted module=service status=ok contact={}",
            meeting.contact
        );
        Ok(meeting)
    }

    pub fn meeting_count(&self) -> usize {
        self.directory.meeting_count()
    }

    /// Human-readable listing of every meeting, or the no-meetings
    /// sentinel.
    pub fn meeting_roster(&self) -> String {
        self.directory.roster()
    }

    // =========================================================================
    // Bulk load (persistence collaborator entry points)
    // =========================================================================

    /// Atomically replaces the contact list; rejects the whole batch on
    /// any identity duplicate. Resets the filter to show-all.
    pub fn load_contacts(&mut self, contacts: Vec<Contact>) -> Result<(), ServiceError> {
        let count = contacts.len();
        self.directory.set_contacts(contacts)?;
        self.reset_filter();
        info!("event=contacts_loaded module=service status=ok count={count}");
        Ok(())
    }

    /// Atomically replaces the schedule; rejects the whole batch on an
    /// unknown contact or a same-contact overlap.
    pub fn load_meetings(&mut self, meetings: Vec<Meeting>) -> Result<(), ServiceError> {
        let count = meetings.len();
        self.directory.set_meetings(meetings)?;
        info!("event=meetings_loaded module=service status=ok count={count}");
        Ok(())
    }

    fn contact_at(&self, index: usize) -> Result<&Contact, ServiceError> {
        let filtered = self.filtered_contacts();
        let count = filtered.len();
        filtered
            .into_iter()
            .nth(index)
            .ok_or(ServiceError::ContactIndex { index, count })
    }
}
