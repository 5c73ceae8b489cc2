//! Warehouse configuration
//!
//! Each client's claim data lives in its own warehouse database named after
//! the client. Connection settings come from the environment with the
//! `WAREHOUSE_` prefix (a `.env` file is honoured when present).

use serde::Deserialize;

use crate::pool::DatabaseConfig;

fn default_schema() -> String {
    "public".to_string()
}

fn default_max_connections() -> u32 {
    10
}

/// Warehouse connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    /// PostgreSQL connection string
    pub database_url: String,
    /// Client name the reporting run is for
    pub client: String,
    /// Schema holding the snapshot tables
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Maximum pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl WarehouseConfig {
    /// Loads configuration from `WAREHOUSE_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        config::Config::builder()
            .add_source(config::Environment::with_prefix("WAREHOUSE"))
            .build()?
            .try_deserialize()
    }

    /// The per-client database name, following the warehouse convention
    /// `<client>_data` with hyphens normalised to underscores
    pub fn database_name(&self) -> String {
        format!("{}_data", self.client.replace('-', "_").to_lowercase())
    }

    /// Pool configuration derived from these settings
    pub fn pool_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone()).max_connections(self.max_connections)
    }
}
