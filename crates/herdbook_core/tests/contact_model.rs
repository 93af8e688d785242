mod common;

use common::{contact, contact_with};
use herdbook_core::{
    tag_set, Address, Contact, ContactPatch, ContactValidationError, Email, Identified, Major,
    Name, Phone, Role,
};

#[test]
fn name_accepts_alphanumeric_words() {
    assert!(Name::new("Alex Yeoh").is_ok());
    assert!(Name::new("David Li 2nd").is_ok());
}

#[test]
fn name_rejects_blank_and_symbols() {
    assert!(matches!(
        Name::new(""),
        Err(ContactValidationError::Name(_))
    ));
    assert!(matches!(
        Name::new(" leading space"),
        Err(ContactValidationError::Name(_))
    ));
    assert!(matches!(
        Name::new("R@chel"),
        Err(ContactValidationError::Name(_))
    ));
}

#[test]
fn phone_requires_at_least_three_digits() {
    assert!(Phone::new("911").is_ok());
    assert!(matches!(
        Phone::new("91"),
        Err(ContactValidationError::Phone(_))
    ));
    assert!(matches!(
        Phone::new("9011p041"),
        Err(ContactValidationError::Phone(_))
    ));
}

#[test]
fn email_requires_local_part_and_dotted_domain() {
    assert!(Email::new("alexyeoh@example.com").is_ok());
    assert!(Email::new("a.b+c@u.nus.edu").is_ok());
    assert!(Email::new("missing-at.example.com").is_err());
    assert!(Email::new("alex@nodot").is_err());
}

#[test]
fn address_rejects_blank() {
    assert!(Address::new("Blk 45 Aljunied Street 85, #11-31").is_ok());
    assert!(matches!(
        Address::new("   "),
        Err(ContactValidationError::Address)
    ));
}

#[test]
fn role_and_major_parse_closed_sets() {
    assert_eq!("peer".parse::<Role>().unwrap(), Role::Peer);
    assert_eq!("mentor".parse::<Role>().unwrap(), Role::Mentor);
    assert!("boss".parse::<Role>().is_err());

    assert_eq!("cs".parse::<Major>().unwrap(), Major::Cs);
    assert_eq!("bza".parse::<Major>().unwrap(), Major::Bza);
    assert_eq!("isys".parse::<Major>().unwrap(), Major::Isys);
    assert!("law".parse::<Major>().is_err());
}

#[test]
fn tag_set_deduplicates_and_validates() {
    let tags = tag_set(["friends", "friends", "colleagues"]).unwrap();
    assert_eq!(tags.len(), 2);

    assert!(matches!(
        tag_set(["two words"]),
        Err(ContactValidationError::Tag(_))
    ));
}

#[test]
fn same_identity_compares_names_only() {
    let alice = contact("Alice Pauline");
    let alice_moved = contact_with(
        "Alice Pauline",
        "84351253",
        "alice@example.com",
        "mentor",
        "bza",
        "124, Jurong East Ave 1, #01-111",
        &[],
    );
    let bob = contact("Bob Choo");

    assert!(alice.same_identity(&alice_moved));
    assert!(!alice.same_identity(&bob));
    // Different ids and fields, so the records are not value-equal.
    assert_ne!(alice, alice_moved);
}

#[test]
fn apply_patch_overlays_present_fields_and_keeps_id() {
    let original = contact("Alex Yeoh");
    let patch = ContactPatch {
        phone: Some(Phone::new("80000001").unwrap()),
        major: Some(Major::Isys),
        ..ContactPatch::default()
    };

    let edited = original.apply_patch(&patch);

    assert_eq!(edited.id, original.id);
    assert_eq!(edited.phone, Phone::new("80000001").unwrap());
    assert_eq!(edited.major, Major::Isys);
    assert_eq!(edited.name, original.name);
    assert_eq!(edited.email, original.email);
    assert_eq!(edited.tags, original.tags);
}

#[test]
fn empty_patch_is_detectable() {
    assert!(ContactPatch::default().is_empty());
    let patch = ContactPatch {
        role: Some(Role::Mentor),
        ..ContactPatch::default()
    };
    assert!(!patch.is_empty());
}

#[test]
fn display_lists_labeled_fields() {
    let rendered = contact("Alex Yeoh").to_string();
    assert!(rendered.starts_with("Alex Yeoh; Phone: 94351253"));
    assert!(rendered.contains("; Role: peer; Major: cs;"));
    assert!(rendered.ends_with("Tags: [friends]"));
}

#[test]
fn serde_round_trips_a_contact() {
    let original = contact_with(
        "Bernice Yu",
        "99272758",
        "berniceyu@example.com",
        "mentor",
        "bza",
        "Blk 30 Lorong 3 Serangoon Gardens, #07-18",
        &["colleagues", "friends"],
    );

    let json = serde_json::to_string(&original).unwrap();
    let loaded: Contact = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn serde_rejects_invalid_field_values() {
    let contact = contact("Alex Yeoh");
    let json = serde_json::to_string(&contact).unwrap();
    let corrupted = json.replace("94351253", "not a phone");

    assert!(serde_json::from_str::<Contact>(&corrupted).is_err());
}
