//! Persistence for the previous run's argument values
//!
//! The report is run weekly against the same five exports and output
//! directory, so argument values are cached between runs and used as
//! defaults. The store location is explicit so tests and callers can inject
//! their own file instead of relying on the process working directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Argument values persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredArgs {
    pub rvr_iopd: Option<PathBuf>,
    pub jef_iopd: Option<PathBuf>,
    pub top_750: Option<PathBuf>,
    pub rvr_firm_orders: Option<PathBuf>,
    pub jef_firm_orders: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// JSON-file backed store for `StoredArgs`
#[derive(Debug, Clone)]
pub struct ArgStore {
    path: PathBuf,
}

impl ArgStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ArgStore { path: path.into() }
    }

    /// Default location under the per-user config directory
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("No config directory available on this platform")?;
        Ok(base.join("qmi-cli").join("args.json"))
    }

    /// Load stored arguments; a missing file yields empty defaults
    pub fn load(&self) -> Result<StoredArgs> {
        if !self.path.exists() {
            return Ok(StoredArgs::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read stored arguments: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid stored arguments file: {}", self.path.display()))
    }

    /// Persist the arguments for the next run
    pub fn save(&self, args: &StoredArgs) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = serde_json::to_string_pretty(args).context("Failed to serialize arguments")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write stored arguments: {}", self.path.display()))
    }
}
