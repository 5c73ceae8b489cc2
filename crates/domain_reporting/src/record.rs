//! Claim records and snapshots
//!
//! A `ClaimRecord` is one claim's state as observed at a given snapshot date;
//! a `Snapshot` is the set of records sharing one as-at date, already filtered
//! to valid (non-archived, non-deprecated) source rows by the data source.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use core_kernel::{ClaimIdentity, ClaimRef, LobCode, PolicyRef, YearOfAccount};

use crate::error::ReportingError;
use crate::ranking::Rankable;

/// One claim's state as observed at a given snapshot date
///
/// The (policy_ref, claim_ref, yoa) triple identifies the claim across time.
/// `total_incurred` mirrors the source column: it may be negative (recoveries
/// exceeding payments) and may be missing entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub policy_ref: PolicyRef,
    pub claim_ref: ClaimRef,
    pub yoa: YearOfAccount,
    pub major_lob: LobCode,
    pub as_at_date: NaiveDate,
    pub total_incurred: Option<Decimal>,
}

impl ClaimRecord {
    /// Returns the identity triple for this record
    pub fn identity(&self) -> ClaimIdentity {
        ClaimIdentity::new(
            self.policy_ref.clone(),
            self.claim_ref.clone(),
            self.yoa,
        )
    }

    fn validate(&self) -> Result<(), ReportingError> {
        if self.policy_ref.is_blank() {
            return Err(ReportingError::validation(format!(
                "policy_ref is blank for claim_ref '{}'",
                self.claim_ref
            )));
        }
        if self.claim_ref.is_blank() {
            return Err(ReportingError::validation(format!(
                "claim_ref is blank for policy_ref '{}'",
                self.policy_ref
            )));
        }
        Ok(())
    }
}

impl Rankable for ClaimRecord {
    fn group(&self) -> &LobCode {
        &self.major_lob
    }

    fn metric(&self) -> Option<Decimal> {
        self.total_incurred
    }
}

/// One identity triple's aggregated metric within a single snapshot
///
/// Multiple underlying transaction rows for one claim on one date are summed
/// into a single total, never silently overwritten. After aggregation an
/// identity triple appears at most once per snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimTotal {
    pub policy_ref: PolicyRef,
    pub claim_ref: ClaimRef,
    pub yoa: YearOfAccount,
    pub major_lob: LobCode,
    pub total_incurred: Option<Decimal>,
}

impl ClaimTotal {
    /// Returns the identity triple for this aggregate
    pub fn identity(&self) -> ClaimIdentity {
        ClaimIdentity::new(
            self.policy_ref.clone(),
            self.claim_ref.clone(),
            self.yoa,
        )
    }
}

impl Rankable for ClaimTotal {
    fn group(&self) -> &LobCode {
        &self.major_lob
    }

    fn metric(&self) -> Option<Decimal> {
        self.total_incurred
    }
}

/// Null-aware metric addition: a missing side contributes nothing, and a
/// total is only missing when every contributing row was missing.
pub(crate) fn add_metric(acc: Option<Decimal>, value: Option<Decimal>) -> Option<Decimal> {
    match (acc, value) {
        (None, v) => v,
        (v, None) => v,
        (Some(a), Some(b)) => Some(a + b),
    }
}

/// The set of claim records sharing one as-at date
///
/// Snapshots are immutable once constructed and are never shared across
/// invocations that mutate them (they never do). Construction is the
/// validation boundary: blank identity components or records carrying a
/// different as-at date are rejected before any ranking can run.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    as_at_date: NaiveDate,
    records: Vec<ClaimRecord>,
}

impl Snapshot {
    /// Creates an empty snapshot for a date with no matching records
    ///
    /// A date with no data is a valid, empty snapshot, not an error.
    pub fn empty(as_at_date: NaiveDate) -> Self {
        Self {
            as_at_date,
            records: Vec::new(),
        }
    }

    /// Builds a snapshot from loaded records, validating each one
    pub fn from_records(
        as_at_date: NaiveDate,
        records: Vec<ClaimRecord>,
    ) -> Result<Self, ReportingError> {
        for record in &records {
            record.validate()?;
            if record.as_at_date != as_at_date {
                return Err(ReportingError::DateMismatch {
                    record: record.as_at_date,
                    snapshot: as_at_date,
                });
            }
        }
        Ok(Self {
            as_at_date,
            records,
        })
    }

    /// The as-at date every record in this snapshot reflects
    pub fn as_at_date(&self) -> NaiveDate {
        self.as_at_date
    }

    /// The records in source order
    pub fn records(&self) -> &[ClaimRecord] {
        &self.records
    }

    /// Consumes the snapshot, returning its records
    pub fn into_records(self) -> Vec<ClaimRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The set of identity triples observed in this snapshot
    ///
    /// Values are irrelevant here; this is the key set the novelty
    /// anti-join runs against.
    pub fn identity_set(&self) -> HashSet<ClaimIdentity> {
        self.records.iter().map(ClaimRecord::identity).collect()
    }

    /// Sums `total_incurred` per identity triple
    ///
    /// Output preserves first-seen order, which keeps downstream ranking
    /// deterministic. The line of business of the first row observed for an
    /// identity is carried onto the aggregate.
    pub fn aggregate_totals(&self) -> Vec<ClaimTotal> {
        let mut index: HashMap<ClaimIdentity, usize> = HashMap::new();
        let mut totals: Vec<ClaimTotal> = Vec::new();

        for record in &self.records {
            let identity = record.identity();
            match index.get(&identity) {
                Some(&i) => {
                    totals[i].total_incurred =
                        add_metric(totals[i].total_incurred, record.total_incurred);
                }
                None => {
                    index.insert(identity, totals.len());
                    totals.push(ClaimTotal {
                        policy_ref: record.policy_ref.clone(),
                        claim_ref: record.claim_ref.clone(),
                        yoa: record.yoa,
                        major_lob: record.major_lob.clone(),
                        total_incurred: record.total_incurred,
                    });
                }
            }
        }

        totals
    }
}
