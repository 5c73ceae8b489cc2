//! Tests for strongly-typed identifiers

use core_kernel::{ClaimIdentity, ClaimRef, LobCode, PolicyRef, YearOfAccount};

#[test]
fn test_policy_ref_round_trip() {
    let policy = PolicyRef::new("POL-2023-0001");
    assert_eq!(policy.as_str(), "POL-2023-0001");
    assert_eq!(policy.to_string(), "POL-2023-0001");
}

#[test]
fn test_refs_are_distinct_types() {
    // Identical raw strings compare equal within a type, and the newtypes
    // stop a ClaimRef being passed where a PolicyRef is expected.
    let a = ClaimRef::new("REF-1");
    let b = ClaimRef::from("REF-1");
    assert_eq!(a, b);
}

#[test]
fn test_lob_code_uppercases_and_trims() {
    assert_eq!(LobCode::new("motor").as_str(), "MOTOR");
    assert_eq!(LobCode::new("  Property "), LobCode::new("PROPERTY"));
}

#[test]
fn test_lob_code_ordering_is_lexicographic() {
    let mut lobs = vec![
        LobCode::new("PROPERTY"),
        LobCode::new("CASUALTY"),
        LobCode::new("MOTOR"),
    ];
    lobs.sort();
    assert_eq!(
        lobs,
        vec![
            LobCode::new("CASUALTY"),
            LobCode::new("MOTOR"),
            LobCode::new("PROPERTY"),
        ]
    );
}

#[test]
fn test_identity_equality_across_snapshots() {
    let at_january = ClaimIdentity::new(
        PolicyRef::new("P1"),
        ClaimRef::new("C1"),
        YearOfAccount::new(2023),
    );
    let at_february = ClaimIdentity::new(
        PolicyRef::new("P1"),
        ClaimRef::new("C1"),
        YearOfAccount::new(2023),
    );
    assert_eq!(at_january, at_february);
}

#[test]
fn test_identity_differs_on_any_component() {
    let base = ClaimIdentity::new(
        PolicyRef::new("P1"),
        ClaimRef::new("C1"),
        YearOfAccount::new(2023),
    );
    let other_yoa = ClaimIdentity::new(
        PolicyRef::new("P1"),
        ClaimRef::new("C1"),
        YearOfAccount::new(2022),
    );
    assert_ne!(base, other_yoa);
}

#[test]
fn test_incomplete_identity_detection() {
    let incomplete = ClaimIdentity::new(
        PolicyRef::new(""),
        ClaimRef::new("C1"),
        YearOfAccount::new(2023),
    );
    assert!(incomplete.is_incomplete());

    let complete = ClaimIdentity::new(
        PolicyRef::new("P1"),
        ClaimRef::new("C1"),
        YearOfAccount::new(2023),
    );
    assert!(!complete.is_incomplete());
}

#[test]
fn test_serde_transparent_representation() {
    let lob = LobCode::new("MOTOR");
    assert_eq!(serde_json::to_string(&lob).unwrap(), "\"MOTOR\"");

    let yoa = YearOfAccount::new(2023);
    assert_eq!(serde_json::to_string(&yoa).unwrap(), "2023");

    let parsed: YearOfAccount = serde_json::from_str("2023").unwrap();
    assert_eq!(parsed, yoa);
}

#[test]
fn test_identity_is_usable_as_map_key() {
    use std::collections::HashSet;

    let mut seen = HashSet::new();
    seen.insert(ClaimIdentity::new(
        PolicyRef::new("P1"),
        ClaimRef::new("C1"),
        YearOfAccount::new(2023),
    ));
    assert!(seen.contains(&ClaimIdentity::new(
        PolicyRef::new("P1"),
        ClaimRef::new("C1"),
        YearOfAccount::new(2023),
    )));
    assert!(!seen.contains(&ClaimIdentity::new(
        PolicyRef::new("P2"),
        ClaimRef::new("C1"),
        YearOfAccount::new(2023),
    )));
}
