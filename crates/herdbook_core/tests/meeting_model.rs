mod common;

use common::{at, contact, meeting};
use herdbook_core::{Identified, Meeting, MeetingPatch, MeetingValidationError};

#[test]
fn interval_must_be_strictly_increasing() {
    let bob = contact("Bob Choo");

    assert!(Meeting::new(bob.id, at(9, 9, 0), at(9, 10, 0), "Room A").is_ok());
    assert!(matches!(
        Meeting::new(bob.id, at(9, 9, 0), at(9, 9, 0), "Room A"),
        Err(MeetingValidationError::Interval { .. })
    ));
    assert!(matches!(
        Meeting::new(bob.id, at(9, 10, 0), at(9, 9, 0), "Room A"),
        Err(MeetingValidationError::Interval { .. })
    ));
}

#[test]
fn location_must_not_be_blank() {
    let bob = contact("Bob Choo");
    assert!(matches!(
        Meeting::new(bob.id, at(9, 9, 0), at(9, 10, 0), "  "),
        Err(MeetingValidationError::EmptyLocation)
    ));
}

#[test]
fn overlap_uses_half_open_intervals() {
    let bob = contact("Bob Choo");
    let nine_to_ten = meeting(&bob, at(9, 9, 0), at(9, 10, 0), "Room A");
    let half_past = meeting(&bob, at(9, 9, 30), at(9, 10, 30), "Room B");
    let ten_to_eleven = meeting(&bob, at(9, 10, 0), at(9, 11, 0), "Room A");
    let containing = meeting(&bob, at(9, 8, 0), at(9, 12, 0), "Hall");

    assert!(nine_to_ten.overlaps(&half_past));
    assert!(half_past.overlaps(&nine_to_ten));
    assert!(containing.overlaps(&nine_to_ten));
    // Touching endpoints do not overlap.
    assert!(!nine_to_ten.overlaps(&ten_to_eleven));
    assert!(!ten_to_eleven.overlaps(&nine_to_ten));
}

#[test]
fn same_identity_needs_contact_location_and_intersection() {
    let bob = contact("Bob Choo");
    let carol = contact("Carol Heng");

    let base = meeting(&bob, at(9, 9, 0), at(9, 10, 0), "Room A");
    let shifted_same_room = meeting(&bob, at(9, 9, 30), at(9, 10, 30), "Room A");
    let shifted_other_room = meeting(&bob, at(9, 9, 30), at(9, 10, 30), "Room B");
    let other_contact = meeting(&carol, at(9, 9, 0), at(9, 10, 0), "Room A");
    let later_same_room = meeting(&bob, at(9, 10, 0), at(9, 11, 0), "Room A");

    assert!(base.same_identity(&shifted_same_room));
    assert!(!base.same_identity(&shifted_other_room));
    assert!(!base.same_identity(&other_contact));
    assert!(!base.same_identity(&later_same_room));
    // Identity equality is weaker than value equality.
    assert_ne!(base, shifted_same_room);
}

#[test]
fn apply_patch_overlays_and_revalidates() {
    let bob = contact("Bob Choo");
    let carol = contact("Carol Heng");
    let original = meeting(&bob, at(9, 9, 0), at(9, 10, 0), "Room A");

    let moved = original
        .apply_patch(&MeetingPatch {
            contact: Some(carol.id),
            location: Some("Room B".to_string()),
            ..MeetingPatch::default()
        })
        .unwrap();
    assert_eq!(moved.contact, carol.id);
    assert_eq!(moved.location, "Room B");
    assert_eq!(moved.start, original.start);
    assert_eq!(moved.end, original.end);

    let inverted = original.apply_patch(&MeetingPatch {
        start: Some(at(9, 11, 0)),
        ..MeetingPatch::default()
    });
    assert!(matches!(
        inverted,
        Err(MeetingValidationError::Interval { .. })
    ));
}

#[test]
fn display_matches_roster_line_format() {
    let bob = contact("Bob Choo");
    let rendered = meeting(&bob, at(9, 9, 0), at(9, 10, 0), "The Terrace").to_string();
    assert_eq!(
        rendered,
        "The Terrace; Start Time: 09-10-2024 09:00; End Time: 09-10-2024 10:00"
    );
}
