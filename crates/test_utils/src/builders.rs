//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the relevant fields and take defaults for the rest.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimRef, LobCode, PolicyRef, YearOfAccount};
use domain_reporting::{ClaimRecord, Snapshot};

use crate::fixtures::DateFixtures;

/// Builder for constructing test claim records
pub struct ClaimRecordBuilder {
    policy_ref: PolicyRef,
    claim_ref: ClaimRef,
    yoa: YearOfAccount,
    major_lob: LobCode,
    as_at_date: NaiveDate,
    total_incurred: Option<Decimal>,
}

impl Default for ClaimRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRecordBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            policy_ref: PolicyRef::new("POL-0001"),
            claim_ref: ClaimRef::new("CLM-0001"),
            yoa: YearOfAccount::new(2023),
            major_lob: LobCode::new("MOTOR"),
            as_at_date: DateFixtures::january_eom(),
            total_incurred: Some(dec!(10000.00)),
        }
    }

    /// Sets the policy reference
    pub fn with_policy_ref(mut self, policy_ref: impl Into<PolicyRef>) -> Self {
        self.policy_ref = policy_ref.into();
        self
    }

    /// Sets the claim reference
    pub fn with_claim_ref(mut self, claim_ref: impl Into<ClaimRef>) -> Self {
        self.claim_ref = claim_ref.into();
        self
    }

    /// Sets the year of account
    pub fn with_yoa(mut self, yoa: i32) -> Self {
        self.yoa = YearOfAccount::new(yoa);
        self
    }

    /// Sets the line of business
    pub fn with_lob(mut self, lob: impl Into<LobCode>) -> Self {
        self.major_lob = lob.into();
        self
    }

    /// Sets the as-at date
    pub fn with_as_at_date(mut self, as_at_date: NaiveDate) -> Self {
        self.as_at_date = as_at_date;
        self
    }

    /// Sets the total incurred amount
    pub fn with_total_incurred(mut self, amount: Decimal) -> Self {
        self.total_incurred = Some(amount);
        self
    }

    /// Clears the total incurred amount (NULL metric)
    pub fn without_total_incurred(mut self) -> Self {
        self.total_incurred = None;
        self
    }

    /// Builds the claim record
    pub fn build(self) -> ClaimRecord {
        ClaimRecord {
            policy_ref: self.policy_ref,
            claim_ref: self.claim_ref,
            yoa: self.yoa,
            major_lob: self.major_lob,
            as_at_date: self.as_at_date,
            total_incurred: self.total_incurred,
        }
    }
}

/// Builder for constructing test snapshots
pub struct SnapshotBuilder {
    as_at_date: NaiveDate,
    records: Vec<ClaimRecord>,
}

impl SnapshotBuilder {
    /// Creates a new builder for the given as-at date
    pub fn new(as_at_date: NaiveDate) -> Self {
        Self {
            as_at_date,
            records: Vec::new(),
        }
    }

    /// Adds a fully specified record
    pub fn with_record(mut self, record: ClaimRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Adds a claim with the given references, line of business, and amount
    pub fn with_claim(
        mut self,
        policy: &str,
        claim: &str,
        lob: &str,
        amount: Decimal,
    ) -> Self {
        self.records.push(
            ClaimRecordBuilder::new()
                .with_policy_ref(policy)
                .with_claim_ref(claim)
                .with_lob(lob)
                .with_as_at_date(self.as_at_date)
                .with_total_incurred(amount)
                .build(),
        );
        self
    }

    /// Builds the snapshot
    ///
    /// # Panics
    ///
    /// Panics if a record fails snapshot validation; test data is expected
    /// to be well-formed unless a test constructs bad records on purpose.
    pub fn build(self) -> Snapshot {
        Snapshot::from_records(self.as_at_date, self.records)
            .expect("test snapshot should be valid")
    }
}
