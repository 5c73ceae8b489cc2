//! Movement calculation between snapshots
//!
//! What the warehouse expresses as a two-date pivot becomes an explicit
//! two-pass aggregation into identity-keyed maps, a merge producing paired
//! values, and a filter requiring both sides present. The both-present
//! contract is the deliberate mirror image of novelty detection: movement
//! covers exactly the claims novelty excludes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{ClaimIdentity, ClaimRef, LobCode, PolicyRef, YearOfAccount};

use crate::ranking::{self, RankMode, Rankable, RankedResult, SortDirection};
use crate::record::Snapshot;

/// One claim's metric movement between two snapshots
///
/// Only built for claims present in both snapshots, so both values and the
/// delta are always concrete. `delta` retains its sign (positive = increase);
/// `abs_delta` exists for ranking and is never a substitute for `delta`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub policy_ref: PolicyRef,
    pub claim_ref: ClaimRef,
    pub yoa: YearOfAccount,
    pub major_lob: LobCode,
    pub current_value: Decimal,
    pub previous_value: Decimal,
    pub delta: Decimal,
    pub abs_delta: Decimal,
}

impl MovementRecord {
    fn new(
        identity: ClaimIdentity,
        major_lob: LobCode,
        current_value: Decimal,
        previous_value: Decimal,
    ) -> Self {
        let delta = current_value - previous_value;
        Self {
            policy_ref: identity.policy_ref,
            claim_ref: identity.claim_ref,
            yoa: identity.yoa,
            major_lob,
            current_value,
            previous_value,
            delta,
            abs_delta: delta.abs(),
        }
    }
}

impl Rankable for MovementRecord {
    fn group(&self) -> &LobCode {
        &self.major_lob
    }

    fn metric(&self) -> Option<Decimal> {
        Some(self.abs_delta)
    }
}

/// One side of the alignment: the aggregated value and the line of business
/// it was observed under.
struct Side {
    major_lob: LobCode,
    value: Option<Decimal>,
}

/// Ranks claims by how far their metric moved between two snapshots
///
/// Each snapshot is aggregated by identity triple, the aggregates are aligned
/// over the union of identities, and pairs missing either side are dropped:
/// a claim must exist at both dates to have a movement. Survivors rank by
/// `abs_delta` descending — globally or per line of business depending on
/// `mode`. The line of business is taken from the current snapshot, falling
/// back to the previous one for identities that have since disappeared
/// (those never survive the filter anyway).
pub fn rank_by_movement(
    current: &Snapshot,
    previous: &Snapshot,
    n: usize,
    mode: RankMode,
) -> RankedResult<MovementRecord> {
    let current_side = aggregate_side(current);
    let previous_side = aggregate_side(previous);

    let mut movements = Vec::new();
    // BTreeMap union: deterministic identity order feeds the stable sort
    for (identity, side) in &current_side {
        let Some(previous_entry) = previous_side.get(identity) else {
            continue;
        };
        let (Some(current_value), Some(previous_value)) = (side.value, previous_entry.value)
        else {
            continue;
        };
        movements.push(MovementRecord::new(
            identity.clone(),
            side.major_lob.clone(),
            current_value,
            previous_value,
        ));
    }

    match mode {
        RankMode::PerGroup => ranking::top_n_by_group(movements, n, SortDirection::Descending),
        RankMode::Global => ranking::top_n_global(movements, n, SortDirection::Descending),
    }
}

fn aggregate_side(snapshot: &Snapshot) -> BTreeMap<ClaimIdentity, Side> {
    let mut side = BTreeMap::new();
    for total in snapshot.aggregate_totals() {
        side.insert(
            total.identity(),
            Side {
                major_lob: total.major_lob,
                value: total.total_incurred,
            },
        );
    }
    side
}
