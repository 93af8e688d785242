//! Predicate-driven contact view.
//!
//! # Responsibility
//! - Hold the active filter predicate for the contact listing.
//! - Provide the name-keyword search predicate.
//!
//! # Invariants
//! - The view is a live projection; it holds no contact data of its own.
//! - The default predicate shows every contact.

use std::fmt::{self, Debug, Formatter};

use crate::model::contact::Contact;

/// Caller-supplied filter over contacts.
pub type ContactPredicate = Box<dyn Fn(&Contact) -> bool>;

/// The active filter for the contact listing.
pub struct ContactFilter {
    predicate: ContactPredicate,
}

impl ContactFilter {
    /// Filter matching every contact.
    pub fn show_all() -> Self {
        Self {
            predicate: Box::new(|_| true),
        }
    }

    pub fn new(predicate: ContactPredicate) -> Self {
        Self { predicate }
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        (self.predicate)(contact)
    }
}

impl Default for ContactFilter {
    fn default() -> Self {
        Self::show_all()
    }
}

impl Debug for ContactFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("ContactFilter(..)")
    }
}

/// Predicate matching contacts whose name contains any of the keywords as
/// a whole word, case-insensitively.
pub fn name_contains_keywords<I, S>(keywords: I) -> ContactPredicate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
    Box::new(move |contact| {
        contact.name.as_str().split_whitespace().any(|word| {
            keywords
                .iter()
                .any(|keyword| word.eq_ignore_ascii_case(keyword))
        })
    })
}
