//! Contact domain model.
//!
//! # Responsibility
//! - Define the contact record and its validated field types.
//! - Provide the identity relation used for duplicate detection.
//! - Provide the patch structure for partial edits.
//!
//! # Invariants
//! - `id` is stable and never reused for another contact.
//! - All string fields satisfy their constraint at construction.
//! - `same_identity` compares names only; `PartialEq` compares every field.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Identified;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9+_.-]*@[A-Za-z0-9]+([.-][A-Za-z0-9]+)*\.[A-Za-z]{2,}$")
        .expect("valid email regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid tag regex"));

/// Stable identifier for a contact.
///
/// Meetings reference contacts through this key, never through the display
/// name, so renaming a contact cannot detach its schedule.
pub type ContactId = Uuid;

/// Field constraint violation raised while constructing contact values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    Name(String),
    Phone(String),
    Email(String),
    Role(String),
    Major(String),
    Address,
    Tag(String),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(value) => write!(
                f,
                "invalid name `{value}`: names are alphanumeric words separated by single spaces"
            ),
            Self::Phone(value) => {
                write!(f, "invalid phone `{value}`: phones are at least 3 digits")
            }
            Self::Email(value) => write!(f, "invalid email `{value}`"),
            Self::Role(value) => write!(f, "invalid role `{value}`: expected peer|mentor"),
            Self::Major(value) => write!(f, "invalid major `{value}`: expected cs|bza|isys"),
            Self::Address => write!(f, "address cannot be blank"),
            Self::Tag(value) => write!(f, "invalid tag `{value}`: tags are single alphanumeric words"),
        }
    }
}

impl Error for ContactValidationError {}

macro_rules! string_field {
    ($name:ident, $re:ident, $err:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ContactValidationError> {
                let value = value.into();
                if $re.is_match(&value) {
                    Ok(Self(value))
                } else {
                    Err(ContactValidationError::$err(value))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ContactValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_field!(Name, NAME_RE, Name);
string_field!(Phone, PHONE_RE, Phone);
string_field!(Email, EMAIL_RE, Email);
string_field!(Tag, TAG_RE, Tag);

/// Free-text postal address; the only constraint is non-blankness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Result<Self, ContactValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(ContactValidationError::Address)
        } else {
            Ok(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Address {
    type Error = ContactValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> String {
        value.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relationship of the contact to the directory owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Peer,
    Mentor,
}

impl FromStr for Role {
    type Err = ContactValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "peer" => Ok(Self::Peer),
            "mentor" => Ok(Self::Mentor),
            other => Err(ContactValidationError::Role(other.to_string())),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Peer => "peer",
            Self::Mentor => "mentor",
        })
    }
}

/// Course of study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Major {
    Cs,
    Bza,
    Isys,
}

impl FromStr for Major {
    type Err = ContactValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cs" => Ok(Self::Cs),
            "bza" => Ok(Self::Bza),
            "isys" => Ok(Self::Isys),
            other => Err(ContactValidationError::Major(other.to_string())),
        }
    }
}

impl Display for Major {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cs => "cs",
            Self::Bza => "bza",
            Self::Isys => "isys",
        })
    }
}

/// Builds a deduplicated tag set from raw labels.
pub fn tag_set<I, S>(labels: I) -> Result<BTreeSet<Tag>, ContactValidationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels.into_iter().map(Tag::new).collect()
}

/// One person in the directory.
///
/// The record is an immutable value object; edits produce a new record via
/// [`Contact::apply_patch`] with the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: Name,
    pub phone: Phone,
    pub email: Email,
    pub role: Role,
    pub major: Major,
    pub address: Address,
    pub tags: BTreeSet<Tag>,
}

impl Contact {
    /// Creates a contact with a freshly generated stable id.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        role: Role,
        major: Major,
        address: Address,
        tags: BTreeSet<Tag>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), name, phone, email, role, major, address, tags)
    }

    /// Creates a contact with a caller-provided id.
    ///
    /// Used by load paths where identity already exists externally. The
    /// provided `id` must remain stable for this contact's lifetime.
    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        id: ContactId,
        name: Name,
        phone: Phone,
        email: Email,
        role: Role,
        major: Major,
        address: Address,
        tags: BTreeSet<Tag>,
    ) -> Self {
        Self {
            id,
            name,
            phone,
            email,
            role,
            major,
            address,
            tags,
        }
    }

    /// Returns a copy with the patch's present fields overlaid.
    ///
    /// The id is always preserved; unset patch fields keep original values.
    pub fn apply_patch(&self, patch: &ContactPatch) -> Contact {
        Contact {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            phone: patch.phone.clone().unwrap_or_else(|| self.phone.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            role: patch.role.unwrap_or(self.role),
            major: patch.major.unwrap_or(self.major),
            address: patch
                .address
                .clone()
                .unwrap_or_else(|| self.address.clone()),
            tags: patch.tags.clone().unwrap_or_else(|| self.tags.clone()),
        }
    }
}

impl Identified for Contact {
    /// Two contacts are the same person when their names match.
    fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Display for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Role: {}; Major: {}; Address: {}; Tags: ",
            self.name, self.phone, self.email, self.role, self.major, self.address
        )?;
        for tag in &self.tags {
            write!(f, "[{tag}]")?;
        }
        Ok(())
    }
}

/// Partial edit for a contact; present fields replace existing ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub role: Option<Role>,
    pub major: Option<Major>,
    pub address: Option<Address>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl ContactPatch {
    /// True when no field is set; such a patch edits nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.major.is_none()
            && self.address.is_none()
            && self.tags.is_none()
    }
}
