//! Warehouse infrastructure layer
//!
//! Provides the internal (database) side of the reporting system:
//! - Connection pool management for the claims warehouse
//! - Environment-driven warehouse configuration
//! - The snapshot repository applying the mandatory validity filter in SQL
//! - The `PgSnapshotStore` adapter implementing the domain's
//!   `SnapshotSource` port

pub mod adapters;
pub mod config;
pub mod error;
pub mod pool;
pub mod repositories;

pub use adapters::PgSnapshotStore;
pub use config::WarehouseConfig;
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::snapshots::{ClaimSnapshotRow, SnapshotRepository};
