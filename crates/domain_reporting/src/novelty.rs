//! Novelty detection between snapshots
//!
//! A claim is "new" when its identity triple appears in the current snapshot
//! but not in the previous one. This is a set difference over identity keys,
//! not a value comparison: the previous snapshot's amounts are irrelevant.

use crate::ranking::{self, RankedResult, SortDirection};
use crate::record::{ClaimTotal, Snapshot};

/// Returns the claims present in `current` but absent from `previous`,
/// ranked per line of business by aggregated `total_incurred` descending.
///
/// The current snapshot is pre-aggregated by identity triple before the
/// comparison, using the same aggregation policy as the movement calculator,
/// so novelty and movement partition the current snapshot's claim universe
/// between them.
///
/// An empty `previous` snapshot means every current claim is new.
pub fn new_in_current(
    current: &Snapshot,
    previous: &Snapshot,
    n: usize,
) -> RankedResult<ClaimTotal> {
    let previous_identities = previous.identity_set();

    let fresh: Vec<ClaimTotal> = current
        .aggregate_totals()
        .into_iter()
        .filter(|total| !previous_identities.contains(&total.identity()))
        .collect();

    ranking::top_n_by_group(fresh, n, SortDirection::Descending)
}
