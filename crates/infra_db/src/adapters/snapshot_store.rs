//! PostgreSQL Snapshot Store Adapter
//!
//! The internal (database) implementation of the reporting domain's
//! `SnapshotSource` port. It:
//!
//! - Translates port requests into repository queries
//! - Converts warehouse rows into domain claim records
//! - Handles error translation between database and port errors
//!
//! ```rust,ignore
//! use infra_db::PgSnapshotStore;
//! use domain_reporting::{SnapshotReportService, SnapshotSource};
//! use std::sync::Arc;
//!
//! let store = PgSnapshotStore::new(pool);
//! let service = SnapshotReportService::new(Arc::new(store));
//! ```

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ClaimRef, DomainPort, HealthCheckResult, HealthCheckable, LobCode,
    OperationMetadata, PolicyRef, PortError, YearOfAccount,
};
use domain_reporting::{ClaimRecord, SnapshotSource};

use crate::error::DatabaseError;
use crate::repositories::snapshots::{ClaimSnapshotRow, SnapshotRepository};

/// PostgreSQL-backed implementation of the SnapshotSource port
///
/// The validity filter (non-archived, non-deprecated datasets) is enforced
/// by the repository's SQL, so every record leaving this adapter is already
/// valid in the metadata sense. Identity validation happens here: a row with
/// a NULL identity column is rejected rather than silently coerced.
#[derive(Debug, Clone)]
pub struct PgSnapshotStore {
    repository: SnapshotRepository,
    pool: PgPool,
}

impl PgSnapshotStore {
    /// Creates a new PostgreSQL snapshot store
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SnapshotRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &SnapshotRepository {
        &self.repository
    }
}

impl DomainPort for PgSnapshotStore {}

#[async_trait]
impl HealthCheckable for PgSnapshotStore {
    /// Checks warehouse connectivity with a trivial query
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "pg-snapshot-store".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "pg-snapshot-store".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(e.to_string()),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl SnapshotSource for PgSnapshotStore {
    #[instrument(skip(self, _metadata), fields(dates = ?as_at_dates))]
    async fn fetch_records(
        &self,
        as_at_dates: &[NaiveDate],
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<ClaimRecord>, PortError> {
        let rows = self
            .repository
            .fetch_rows_for_dates(as_at_dates)
            .await
            .map_err(map_db_error)?;
        debug!(row_count = rows.len(), "Fetched snapshot rows");

        rows.into_iter()
            .map(|row| row_to_record(row).map_err(map_db_error))
            .collect()
    }

    #[instrument(skip(self, _metadata))]
    async fn snapshot_dates_up_to(
        &self,
        as_of: NaiveDate,
        count: usize,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<NaiveDate>, PortError> {
        self.repository
            .distinct_dates_up_to(as_of, count as i64)
            .await
            .map_err(map_db_error)
    }
}

/// Converts a warehouse row into a domain claim record
///
/// NULL identity columns make the row unusable for ranking or alignment, so
/// they fail the whole fetch rather than producing a crippled record.
fn row_to_record(row: ClaimSnapshotRow) -> Result<ClaimRecord, DatabaseError> {
    let policy_ref = row
        .policy_ref
        .ok_or_else(|| DatabaseError::malformed_row("policy_ref", "NULL value"))?;
    let claim_ref = row
        .claim_ref
        .ok_or_else(|| DatabaseError::malformed_row("claim_ref", "NULL value"))?;
    let yoa = row
        .yoa
        .ok_or_else(|| DatabaseError::malformed_row("yoa", "NULL value"))?;
    let major_lob = row
        .major_lob
        .ok_or_else(|| DatabaseError::malformed_row("major_lob", "NULL value"))?;

    Ok(ClaimRecord {
        policy_ref: PolicyRef::new(policy_ref),
        claim_ref: ClaimRef::new(claim_ref),
        yoa: YearOfAccount::new(yoa),
        major_lob: LobCode::new(major_lob),
        as_at_date: row.as_at_date,
        total_incurred: row.total_incurred,
    })
}

/// Translates database errors to port errors
fn map_db_error(error: DatabaseError) -> PortError {
    match error {
        DatabaseError::ConnectionFailed(message) => PortError::Connection {
            message,
            source: None,
        },
        DatabaseError::PoolExhausted => PortError::ServiceUnavailable {
            service: "warehouse".to_string(),
        },
        DatabaseError::MalformedRow(message) => PortError::Transformation { message },
        other => PortError::Internal {
            message: other.to_string(),
            source: Some(Box::new(other)),
        },
    }
}
