//! Snapshot Comparison & Ranking Domain
//!
//! This crate implements the analytical core of the bordereaux reporting
//! system: given one or two point-in-time snapshots of claim records, it
//! produces ranked, grouped, top-N result sets.
//!
//! # Pipeline
//!
//! ```text
//! SnapshotSource -> Snapshot -> { ranking | novelty | movement } -> RankedResult
//! ```
//!
//! All three consumers share the same loaded snapshot; only the
//! transformation differs. Every transformation is a pure function of its
//! snapshot inputs, so the whole pipeline is unit-testable without a data
//! source.

pub mod error;
pub mod movement;
pub mod novelty;
pub mod ports;
pub mod ranking;
pub mod record;
pub mod service;

pub use error::ReportingError;
pub use movement::{rank_by_movement, MovementRecord};
pub use novelty::new_in_current;
pub use ports::SnapshotSource;
pub use ranking::{
    top_n_by_group, top_n_global, RankMode, Rankable, RankedResult, RankedRow, SortDirection,
    DEFAULT_TOP_N,
};
pub use record::{ClaimRecord, ClaimTotal, Snapshot};
pub use service::SnapshotReportService;
