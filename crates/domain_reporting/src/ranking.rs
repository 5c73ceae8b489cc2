//! Grouped top-N ranking
//!
//! What a warehouse expresses as a window function (`ROW_NUMBER() OVER
//! (PARTITION BY ... ORDER BY ...)`) becomes an explicit group-by, a stable
//! sort, and a truncation. The stability rule matters: equal metric values
//! keep their relative input order, so identical input always produces an
//! identical report.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use core_kernel::LobCode;

/// Rows kept per group (or overall, in global mode) unless stated otherwise
pub const DEFAULT_TOP_N: usize = 10;

/// A row that can be fed through the ranker
///
/// This is the seam between the ranking algorithm and the row shapes it
/// serves: raw claim records, per-claim aggregates, and movement records all
/// rank the same way.
pub trait Rankable {
    /// The grouping key (line of business)
    fn group(&self) -> &LobCode;

    /// The ordering metric; `None` models a NULL metric in the source
    fn metric(&self) -> Option<Decimal>;
}

/// Sort direction for the ordering metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Descending,
    Ascending,
}

/// Whether ranks are assigned within each line of business or globally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankMode {
    PerGroup,
    Global,
}

/// One ranked output row: the record plus its 1-based rank
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow<T> {
    pub rank: u32,
    #[serde(flatten)]
    pub record: T,
}

/// An ordered sequence of ranked rows
///
/// Rows are grouped by line of business (lexicographic) and ordered by the
/// metric within each group; in global mode there is a single rank sequence.
/// Ranks are 1-based and contiguous per group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult<T> {
    rows: Vec<RankedRow<T>>,
}

impl<T> RankedResult<T> {
    pub(crate) fn from_rows(rows: Vec<RankedRow<T>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[RankedRow<T>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<RankedRow<T>> {
        self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedRow<T>> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T> IntoIterator for RankedResult<T> {
    type Item = RankedRow<T>;
    type IntoIter = std::vec::IntoIter<RankedRow<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Metric comparison with NULLs sorting last in either direction
///
/// NULL metrics are never dropped; they lose every comparison so they fall
/// to the bottom of their group regardless of direction.
fn compare_metrics(a: Option<Decimal>, b: Option<Decimal>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match direction {
            SortDirection::Descending => y.cmp(&x),
            SortDirection::Ascending => x.cmp(&y),
        },
    }
}

fn rank_slice<T: Rankable>(
    mut rows: Vec<T>,
    n: usize,
    direction: SortDirection,
) -> Vec<RankedRow<T>> {
    // Vec::sort_by is stable: ties keep input order
    rows.sort_by(|a, b| compare_metrics(a.metric(), b.metric(), direction));
    rows.truncate(n);
    rows.into_iter()
        .enumerate()
        .map(|(i, record)| RankedRow {
            rank: (i + 1) as u32,
            record,
        })
        .collect()
}

/// Returns the top `n` rows per line of business
///
/// Groups are emitted in lexicographic `LobCode` order; within a group rows
/// are ordered by the metric in the requested direction. A group with fewer
/// than `n` members yields all of its members, no padding.
pub fn top_n_by_group<T: Rankable>(
    rows: Vec<T>,
    n: usize,
    direction: SortDirection,
) -> RankedResult<T> {
    let mut groups: BTreeMap<LobCode, Vec<T>> = BTreeMap::new();
    for row in rows {
        let key = row.group().clone();
        groups.entry(key).or_default().push(row);
    }

    let mut ranked = Vec::new();
    for (_, members) in groups {
        ranked.extend(rank_slice(members, n, direction));
    }
    RankedResult::from_rows(ranked)
}

/// Returns the top `n` rows over the whole row set, ignoring the group key
///
/// Same algorithm as [`top_n_by_group`] without the partition; a single
/// 1-based rank sequence covers the result.
pub fn top_n_global<T: Rankable>(
    rows: Vec<T>,
    n: usize,
    direction: SortDirection,
) -> RankedResult<T> {
    RankedResult::from_rows(rank_slice(rows, n, direction))
}
