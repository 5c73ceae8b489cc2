//! Adapter implementations bridging domain ports to the warehouse

pub mod snapshot_store;

pub use snapshot_store::PgSnapshotStore;
