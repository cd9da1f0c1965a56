//! Builder for creating and configuring Tracker instances.

use std::path::{Path, PathBuf};

use log::info;

use super::Tracker;
use crate::{
    error::{Result, TallyError},
    invoice::BillingSettings,
};

/// Builder for creating and configuring Tracker instances.
#[derive(Debug, Clone, Default)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    billing: BillingSettings,
}

impl TrackerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tally/tally.db` or `~/.local/share/tally/tally.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the hourly rate, currency, payment terms and issuer.
    pub fn with_billing(mut self, billing: BillingSettings) -> Self {
        self.billing = billing;
        self
    }

    /// Builds the configured tracker, creating the database if needed.
    ///
    /// # Errors
    ///
    /// Returns `TallyError::InvalidInput` for invalid billing settings,
    /// `TallyError::FileSystem` if the database directory cannot be created
    /// and `TallyError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Tracker> {
        self.billing.validate()?;

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TallyError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let tracker = Tracker::new(db_path, self.billing);
        tracker.with_database(|_| Ok(())).await?;
        info!("Using database at {}", tracker.db_path.display());

        Ok(tracker)
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("tally")
            .place_data_file("tally.db")
            .map_err(|e| TallyError::XdgDirectory(e.to_string()))
    }
}

