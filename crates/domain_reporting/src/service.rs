//! Snapshot report service
//!
//! Orchestrates the pipeline: load the snapshot(s) a report needs through
//! the [`SnapshotSource`] port, then delegate to the pure ranking, novelty,
//! and movement stages. Each invocation is independent and request-scoped;
//! nothing is cached or shared across calls.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::ReportingError;
use crate::movement::{self, MovementRecord};
use crate::novelty;
use crate::ports::SnapshotSource;
use crate::ranking::{self, RankMode, RankedResult, SortDirection};
use crate::record::{ClaimRecord, ClaimTotal, Snapshot};

/// Report service over a snapshot data source
///
/// ```rust,ignore
/// let service = SnapshotReportService::new(Arc::new(PgSnapshotStore::new(pool)));
/// let report = service.top_claims(as_at, DEFAULT_TOP_N).await?;
/// ```
pub struct SnapshotReportService {
    source: Arc<dyn SnapshotSource>,
}

impl SnapshotReportService {
    /// Creates a new service reading from the given source
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self { source }
    }

    /// Loads one snapshot per requested date
    ///
    /// A requested date with no matching records yields an empty snapshot.
    /// Every returned record is validated on its way into a snapshot; a
    /// record dated outside the requested set is a malformed response.
    async fn load(
        &self,
        as_at_dates: &[NaiveDate],
    ) -> Result<BTreeMap<NaiveDate, Snapshot>, ReportingError> {
        let mut requested: Vec<NaiveDate> = as_at_dates.to_vec();
        requested.sort_unstable();
        requested.dedup();

        let records = self.source.fetch_records(&requested, None).await?;
        debug!(
            dates = ?requested,
            record_count = records.len(),
            "Loaded snapshot records"
        );

        let mut by_date: BTreeMap<NaiveDate, Vec<ClaimRecord>> = BTreeMap::new();
        for record in records {
            if !requested.contains(&record.as_at_date) {
                return Err(ReportingError::validation(format!(
                    "source returned record dated {} outside the requested dates",
                    record.as_at_date
                )));
            }
            by_date.entry(record.as_at_date).or_default().push(record);
        }

        let mut snapshots = BTreeMap::new();
        for date in requested {
            let snapshot = match by_date.remove(&date) {
                Some(records) => Snapshot::from_records(date, records)?,
                None => Snapshot::empty(date),
            };
            snapshots.insert(date, snapshot);
        }
        Ok(snapshots)
    }

    async fn load_pair(
        &self,
        current_as_at: NaiveDate,
        previous_as_at: NaiveDate,
    ) -> Result<(Snapshot, Snapshot), ReportingError> {
        let mut snapshots = self.load(&[current_as_at, previous_as_at]).await?;
        // load() guarantees an entry per requested date
        let current = snapshots
            .remove(&current_as_at)
            .unwrap_or_else(|| Snapshot::empty(current_as_at));
        let previous = snapshots
            .remove(&previous_as_at)
            .unwrap_or_else(|| Snapshot::empty(previous_as_at));
        Ok((current, previous))
    }

    /// Top `limit` claims per line of business by reported `total_incurred`
    pub async fn top_claims(
        &self,
        as_at: NaiveDate,
        limit: usize,
    ) -> Result<RankedResult<ClaimRecord>, ReportingError> {
        let mut snapshots = self.load(&[as_at]).await?;
        let snapshot = snapshots
            .remove(&as_at)
            .unwrap_or_else(|| Snapshot::empty(as_at));

        Ok(ranking::top_n_by_group(
            snapshot.into_records(),
            limit,
            SortDirection::Descending,
        ))
    }

    /// Top `limit` claims per line of business on identity-aggregated totals
    ///
    /// Multiple source rows per claim are summed before ranking, so each
    /// claim appears once regardless of how many transaction rows back it.
    pub async fn top_claim_totals(
        &self,
        as_at: NaiveDate,
        limit: usize,
    ) -> Result<RankedResult<ClaimTotal>, ReportingError> {
        let mut snapshots = self.load(&[as_at]).await?;
        let snapshot = snapshots
            .remove(&as_at)
            .unwrap_or_else(|| Snapshot::empty(as_at));

        Ok(ranking::top_n_by_group(
            snapshot.aggregate_totals(),
            limit,
            SortDirection::Descending,
        ))
    }

    /// Claims observed at `current_as_at` but not at `previous_as_at`,
    /// ranked per line of business
    pub async fn top_new_claims(
        &self,
        current_as_at: NaiveDate,
        previous_as_at: NaiveDate,
        limit: usize,
    ) -> Result<RankedResult<ClaimTotal>, ReportingError> {
        let (current, previous) = self.load_pair(current_as_at, previous_as_at).await?;
        Ok(novelty::new_in_current(&current, &previous, limit))
    }

    /// The `limit` biggest absolute movements between two snapshots, ranked
    /// globally across all lines of business
    pub async fn biggest_movements(
        &self,
        current_as_at: NaiveDate,
        previous_as_at: NaiveDate,
        limit: usize,
    ) -> Result<RankedResult<MovementRecord>, ReportingError> {
        let (current, previous) = self.load_pair(current_as_at, previous_as_at).await?;
        Ok(movement::rank_by_movement(
            &current,
            &previous,
            limit,
            RankMode::Global,
        ))
    }

    /// The `limit` biggest absolute movements per line of business
    pub async fn biggest_movements_by_lob(
        &self,
        current_as_at: NaiveDate,
        previous_as_at: NaiveDate,
        limit: usize,
    ) -> Result<RankedResult<MovementRecord>, ReportingError> {
        let (current, previous) = self.load_pair(current_as_at, previous_as_at).await?;
        Ok(movement::rank_by_movement(
            &current,
            &previous,
            limit,
            RankMode::PerGroup,
        ))
    }

    /// Global movement ranking over the two most recent snapshots at or
    /// before `as_of`
    ///
    /// Resolves the date pair through the source rather than trusting the
    /// caller to know the snapshot cadence. Fails if fewer than two snapshot
    /// dates exist at or before the anchor.
    pub async fn latest_movements(
        &self,
        as_of: NaiveDate,
        limit: usize,
    ) -> Result<RankedResult<MovementRecord>, ReportingError> {
        let dates = self.source.snapshot_dates_up_to(as_of, 2, None).await?;
        if dates.len() < 2 {
            return Err(ReportingError::InsufficientSnapshots {
                as_of,
                required: 2,
                found: dates.len(),
            });
        }
        debug!(current = %dates[0], previous = %dates[1], "Resolved latest snapshot pair");
        self.biggest_movements(dates[0], dates[1], limit).await
    }
}
