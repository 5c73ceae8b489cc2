//! Reporting domain errors

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the reporting domain
///
/// Data source failures are surfaced unchanged; validation failures are
/// raised before a malformed record can corrupt a ranking or movement
/// computation. An empty snapshot or an empty result set is never an error.
#[derive(Debug, Error)]
pub enum ReportingError {
    #[error("Data source error: {0}")]
    Source(#[from] PortError),

    #[error("Invalid claim record: {0}")]
    Validation(String),

    #[error("Record dated {record} cannot belong to snapshot as at {snapshot}")]
    DateMismatch { record: NaiveDate, snapshot: NaiveDate },

    #[error("At least {required} snapshot dates required at or before {as_of}, found {found}")]
    InsufficientSnapshots {
        as_of: NaiveDate,
        required: usize,
        found: usize,
    },
}

impl ReportingError {
    pub fn validation(message: impl Into<String>) -> Self {
        ReportingError::Validation(message.into())
    }
}
