//! Snapshot repository
//!
//! Read-only access to the claim snapshot tables. Every query joins the
//! dataset metadata and excludes archived and deprecated datasets - that
//! filter defines "valid" data for the whole reporting pipeline and is
//! applied here, before anything downstream can see a row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::DatabaseError;

/// Warehouse row for one claim observation at one snapshot date
///
/// Identity columns are fetched as `Option` so that NULLs surface as
/// validation failures in the adapter instead of decode panics here.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimSnapshotRow {
    pub policy_ref: Option<String>,
    pub claim_ref: Option<String>,
    pub yoa: Option<i32>,
    pub major_lob: Option<String>,
    pub as_at_date: NaiveDate,
    pub total_incurred: Option<Decimal>,
}

/// Repository for claim snapshot data
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: PgPool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches all valid claim rows observed at any of the given dates
    pub async fn fetch_rows_for_dates(
        &self,
        as_at_dates: &[NaiveDate],
    ) -> Result<Vec<ClaimSnapshotRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimSnapshotRow>(
            r#"
            SELECT
                c.policy_ref,
                c.claim_ref,
                c.yoa,
                c.major_lob,
                c.as_at_date,
                c.total_incurred
            FROM claim_snapshots c
            JOIN dataset_meta m ON c.dataset_id = m.id
            WHERE m.archived_by IS NULL
              AND m.deprecated = FALSE
              AND c.as_at_date = ANY($1)
            ORDER BY c.as_at_date, c.major_lob, c.policy_ref, c.claim_ref
            "#,
        )
        .bind(as_at_dates)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns up to `count` distinct snapshot dates at or before `as_of`,
    /// newest first, considering valid datasets only
    pub async fn distinct_dates_up_to(
        &self,
        as_of: NaiveDate,
        count: i64,
    ) -> Result<Vec<NaiveDate>, DatabaseError> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT DISTINCT c.as_at_date
            FROM claim_snapshots c
            JOIN dataset_meta m ON c.dataset_id = m.id
            WHERE m.archived_by IS NULL
              AND m.deprecated = FALSE
              AND c.as_at_date <= $1
            ORDER BY c.as_at_date DESC
            LIMIT $2
            "#,
        )
        .bind(as_of)
        .bind(count)
        .fetch_all(&self.pool)
        .await?;

        Ok(dates)
    }
}
