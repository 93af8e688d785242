//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use herdbook_core::{tag_set, Address, Contact, Email, Major, Meeting, Name, Phone, Role};

pub fn contact(name: &str) -> Contact {
    contact_with(
        name,
        "94351253",
        "contact@example.com",
        "peer",
        "cs",
        "Blk 30 Geylang Street 29, #06-40",
        &["friends"],
    )
}

pub fn contact_with(
    name: &str,
    phone: &str,
    email: &str,
    role: &str,
    major: &str,
    address: &str,
    tags: &[&str],
) -> Contact {
    Contact::new(
        Name::new(name).unwrap(),
        Phone::new(phone).unwrap(),
        Email::new(email).unwrap(),
        role.parse::<Role>().unwrap(),
        major.parse::<Major>().unwrap(),
        Address::new(address).unwrap(),
        tag_set(tags.iter().copied()).unwrap(),
    )
}

/// A timestamp on 2024-10-`day` at `hour`:`minute`.
pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn meeting(contact: &Contact, start: NaiveDateTime, end: NaiveDateTime, location: &str) -> Meeting {
    Meeting::new(contact.id, start, end, location).unwrap()
}

/// The sample contacts the app ships with, trimmed to three.
pub fn typical_contacts() -> Vec<Contact> {
    vec![
        contact_with(
            "Alex Yeoh",
            "87438807",
            "alexyeoh@example.com",
            "peer",
            "cs",
            "Blk 30 Geylang Street 29, #06-40",
            &["friends"],
        ),
        contact_with(
            "Bernice Yu",
            "99272758",
            "berniceyu@example.com",
            "mentor",
            "bza",
            "Blk 30 Lorong 3 Serangoon Gardens, #07-18",
            &["colleagues", "friends"],
        ),
        contact_with(
            "Charlotte Oliveiro",
            "93210283",
            "charlotte@example.com",
            "peer",
            "isys",
            "Blk 11 Ang Mo Kio Street 74, #11-04",
            &["neighbours"],
        ),
    ]
}
