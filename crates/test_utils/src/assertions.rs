//! Custom Test Assertions
//!
//! Specialized assertion helpers for ranked results that give more
//! meaningful error messages than standard assertions.

use core_kernel::LobCode;
use domain_reporting::{Rankable, RankedResult};

/// Asserts that ranks are 1-based and contiguous within each group
///
/// # Panics
///
/// Panics if any group's rank sequence has a gap or does not start at 1
pub fn assert_ranks_contiguous<T: Rankable>(result: &RankedResult<T>) {
    let mut current_group = None;
    let mut expected_rank = 0u32;

    for row in result.iter() {
        if current_group != Some(row.record.group().clone()) {
            current_group = Some(row.record.group().clone());
            expected_rank = 1;
        } else {
            expected_rank += 1;
        }
        assert_eq!(
            row.rank,
            expected_rank,
            "Rank gap in group {}: expected {}, found {}",
            row.record.group(),
            expected_rank,
            row.rank
        );
    }
}

/// Asserts that the metric never increases within a group and that NULL
/// metrics only appear at the bottom of their group
pub fn assert_metric_non_increasing<T: Rankable>(result: &RankedResult<T>) {
    let mut previous: Option<(_, Option<rust_decimal::Decimal>)> = None;

    for row in result.iter() {
        let group = row.record.group().clone();
        let metric = row.record.metric();

        if let Some((prev_group, prev_metric)) = previous {
            if prev_group == group {
                match (prev_metric, metric) {
                    (Some(a), Some(b)) => assert!(
                        a >= b,
                        "Metric increased within group {}: {} then {}",
                        group,
                        a,
                        b
                    ),
                    (None, Some(b)) => panic!(
                        "NULL metric ranked above {} in group {}",
                        b, group
                    ),
                    _ => {}
                }
            }
        }
        previous = Some((group, metric));
    }
}

/// Asserts that groups appear in lexicographic order and are not interleaved
pub fn assert_groups_in_order<T: Rankable>(result: &RankedResult<T>) {
    let mut runs: Vec<LobCode> = Vec::new();
    for row in result.iter() {
        let group = row.record.group();
        if runs.last() != Some(group) {
            runs.push(group.clone());
        }
    }

    for pair in runs.windows(2) {
        assert!(
            pair[0] < pair[1],
            "Groups out of order or interleaved: {} before {}",
            pair[0],
            pair[1]
        );
    }
}

/// Asserts that no group holds more than `n` rows
pub fn assert_group_sizes_at_most<T: Rankable>(result: &RankedResult<T>, n: usize) {
    for row in result.iter() {
        assert!(
            (row.rank as usize) <= n,
            "Group {} exceeds top-{} with rank {}",
            row.record.group(),
            n,
            row.rank
        );
    }
}
