//! Sink configuration.

use crate::error::SinkError;

/// Connection settings for the time-series database.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Database name points are written into.
    pub database: String,
    /// Username for basic auth.
    pub username: String,
    /// Password for basic auth.
    pub password: String,
    /// Base address of the database, e.g. `http://localhost:8086`.
    pub address: String,
}

impl SinkConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::InvalidConfig`] when the database name is
    /// empty or the address is not an http(s) URL.
    pub fn validate(&self) -> Result<(), SinkError> {
        if self.database.is_empty() {
            return Err(SinkError::InvalidConfig(
                "Database name must not be empty".to_string(),
            ));
        }
        if !self.address.starts_with("http://") && !self.address.starts_with("https://") {
            return Err(SinkError::InvalidConfig(format!(
                "Address must be an http(s) URL, got: {}",
                self.address
            )));
        }
        Ok(())
    }

    /// The write endpoint for this configuration.
    pub fn write_url(&self) -> String {
        format!(
            "{}/write?db={}&precision=s",
            self.address.trim_end_matches('/'),
            self.database
        )
    }
}

impl Default for SinkConfig {
    /// The historical deployment defaults.
    fn default() -> Self {
        Self {
            database: "prometheus".to_string(),
            username: "prom".to_string(),
            password: "prom".to_string(),
            address: "http://localhost:8086".to_string(),
        }
    }
}
