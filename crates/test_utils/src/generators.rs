//! Property-Based Test Generators
//!
//! Proptest strategies for generating random claim data that maintains
//! domain invariants (non-blank references, snapshot-consistent dates).

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{ClaimRef, LobCode, PolicyRef, YearOfAccount};
use domain_reporting::{ClaimRecord, Snapshot};

/// Strategy for generating lines of business
pub fn lob_strategy() -> impl Strategy<Value = LobCode> {
    prop_oneof![
        Just(LobCode::new("MOTOR")),
        Just(LobCode::new("PROPERTY")),
        Just(LobCode::new("CASUALTY")),
        Just(LobCode::new("MARINE")),
    ]
}

/// Strategy for generating incurred amounts, occasionally NULL and
/// frequently negative, in line with real bordereaux data
pub fn incurred_strategy() -> impl Strategy<Value = Option<Decimal>> {
    proptest::option::weighted(0.9, -100_000_000i64..100_000_000i64)
        .prop_map(|cents| cents.map(|c| Decimal::new(c, 2)))
}

/// Strategy for generating years of account
pub fn yoa_strategy() -> impl Strategy<Value = YearOfAccount> {
    (2020i32..2025i32).prop_map(YearOfAccount::new)
}

/// Strategy for generating claim records observed at `as_at_date`
///
/// Identities are drawn from a small pool so that generated snapshot pairs
/// overlap, exercising both the novelty and the movement paths.
pub fn claim_record_strategy(as_at_date: NaiveDate) -> impl Strategy<Value = ClaimRecord> {
    (0u32..20, lob_strategy(), yoa_strategy(), incurred_strategy()).prop_map(
        move |(id, major_lob, yoa, total_incurred)| ClaimRecord {
            policy_ref: PolicyRef::new(format!("POL-{:04}", id)),
            claim_ref: ClaimRef::new(format!("CLM-{:04}", id)),
            yoa,
            major_lob,
            as_at_date,
            total_incurred,
        },
    )
}

/// Strategy for generating whole snapshots of up to `max_records` records
pub fn snapshot_strategy(
    as_at_date: NaiveDate,
    max_records: usize,
) -> impl Strategy<Value = Snapshot> {
    proptest::collection::vec(claim_record_strategy(as_at_date), 0..max_records).prop_map(
        move |records| {
            Snapshot::from_records(as_at_date, records)
                .expect("generated records are snapshot-consistent")
        },
    )
}
