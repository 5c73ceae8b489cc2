//! Reporting Domain Ports
//!
//! This module defines the port interface between the reporting domain and
//! its snapshot data source, enabling swappable implementations:
//!
//! - **Internal Adapter**: reads the claims warehouse (infra_db)
//! - **Mock Adapter**: in-memory rows for testing without a database
//!
//! The core depends only on this capability, not on any particular
//! warehouse, connection protocol, or credential mechanism.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{DomainPort, HealthCheckable, OperationMetadata, PortError};

use crate::record::ClaimRecord;

/// The port trait for snapshot data access
///
/// Implementations own the validity filter: rows whose originating metadata
/// is archived or deprecated must never be returned. That filter defines
/// "valid" data for every downstream stage and is not renegotiable per call.
#[async_trait]
pub trait SnapshotSource: DomainPort + HealthCheckable {
    /// Retrieves all valid claim records observed at any of the given dates
    ///
    /// Dates with no matching records simply contribute no rows; the caller
    /// partitions the result into per-date snapshots.
    async fn fetch_records(
        &self,
        as_at_dates: &[NaiveDate],
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<ClaimRecord>, PortError>;

    /// Returns up to `count` distinct snapshot dates at or before `as_of`,
    /// newest first
    ///
    /// Used to resolve "the two most recent snapshots" for movement reports
    /// anchored to a requested date rather than an exact date pair.
    async fn snapshot_dates_up_to(
        &self,
        as_of: NaiveDate,
        count: usize,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<NaiveDate>, PortError>;
}

/// Mock implementation of SnapshotSource for testing
///
/// Stores rows in memory together with their source metadata flags, so tests
/// can assert that archived and deprecated rows never surface through the
/// port contract.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    struct SourceRow {
        record: ClaimRecord,
        archived_by: Option<String>,
        deprecated: bool,
    }

    impl SourceRow {
        fn is_valid(&self) -> bool {
            self.archived_by.is_none() && !self.deprecated
        }
    }

    /// In-memory mock implementation of SnapshotSource
    #[derive(Default)]
    pub struct MockSnapshotSource {
        rows: Arc<RwLock<Vec<SourceRow>>>,
    }

    impl MockSnapshotSource {
        /// Creates a new empty mock source
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with valid records
        pub async fn with_records(records: Vec<ClaimRecord>) -> Self {
            let source = Self::new();
            for record in records {
                source.push(record).await;
            }
            source
        }

        /// Adds a valid record
        pub async fn push(&self, record: ClaimRecord) {
            self.rows.write().await.push(SourceRow {
                record,
                archived_by: None,
                deprecated: false,
            });
        }

        /// Adds a record whose source dataset has been archived
        pub async fn push_archived(&self, record: ClaimRecord, archived_by: impl Into<String>) {
            self.rows.write().await.push(SourceRow {
                record,
                archived_by: Some(archived_by.into()),
                deprecated: false,
            });
        }

        /// Adds a record whose source dataset is deprecated
        pub async fn push_deprecated(&self, record: ClaimRecord) {
            self.rows.write().await.push(SourceRow {
                record,
                archived_by: None,
                deprecated: true,
            });
        }
    }

    impl DomainPort for MockSnapshotSource {}

    #[async_trait]
    impl HealthCheckable for MockSnapshotSource {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-snapshot-source".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl SnapshotSource for MockSnapshotSource {
        async fn fetch_records(
            &self,
            as_at_dates: &[NaiveDate],
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<ClaimRecord>, PortError> {
            let rows = self.rows.read().await;
            Ok(rows
                .iter()
                .filter(|row| row.is_valid())
                .filter(|row| as_at_dates.contains(&row.record.as_at_date))
                .map(|row| row.record.clone())
                .collect())
        }

        async fn snapshot_dates_up_to(
            &self,
            as_of: NaiveDate,
            count: usize,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<NaiveDate>, PortError> {
            let rows = self.rows.read().await;
            let mut dates: Vec<NaiveDate> = rows
                .iter()
                .filter(|row| row.is_valid())
                .map(|row| row.record.as_at_date)
                .filter(|date| *date <= as_of)
                .collect();
            dates.sort_unstable();
            dates.dedup();
            dates.reverse();
            dates.truncate(count);
            Ok(dates)
        }
    }
}
