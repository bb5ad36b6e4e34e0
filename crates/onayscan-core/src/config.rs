//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths to all OnayScan data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Document uploads directory (`data/uploads/`).
    pub uploads: PathBuf,
    /// Generated report downloads (`data/reports/`).
    pub reports: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            uploads: root.join("uploads"),
            reports: root.join("reports"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.uploads)?;
        std::fs::create_dir_all(&self.reports)?;
        Ok(())
    }
}

/// Top-level OnayScan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnayscanConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Override for the risk lexicon file (`ONAYSCAN_LEXICON`).
    pub lexicon_path: Option<PathBuf>,
    /// Override for the approval tier table file (`ONAYSCAN_TIERS`).
    pub tiers_path: Option<PathBuf>,
}

impl OnayscanConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3010);

        let data_paths = DataPaths::new(data_dir)?;
        let lexicon_path = std::env::var("ONAYSCAN_LEXICON").ok().map(PathBuf::from);
        let tiers_path = std::env::var("ONAYSCAN_TIERS").ok().map(PathBuf::from);

        Ok(Self {
            port,
            data_paths,
            lexicon_path,
            tiers_path,
        })
    }
}
