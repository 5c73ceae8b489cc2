//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! bordereaux reporting test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for ranked results
//! - `generators`: Property-based test data generators
//! - `telemetry`: One-time tracing initialisation for tests

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod telemetry;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use telemetry::*;

// Re-exported so integration tests outside domain_reporting get the mock
// without enabling the feature themselves.
pub use domain_reporting::ports::mock::MockSnapshotSource;
