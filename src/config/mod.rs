#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PACKAGE: &str = "utschooldata";

// First fetches make the backend download source files from USBE, which can
// take minutes on a cold cache.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Runtime settings for the R bridge. Everything has a default; the crate
/// works with no configuration on a machine where `Rscript` is on PATH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub rscript_path: Option<PathBuf>,
    pub package: String,
    pub timeout_secs: u64,
    pub lib_paths: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rscript_path: None,
            package: DEFAULT_PACKAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            lib_paths: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("UTSCHOOLDATA_RSCRIPT") {
            config.rscript_path = Some(PathBuf::from(path));
        }
        if let Some(secs) = lookup("UTSCHOOLDATA_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            config.timeout_secs = secs;
        }
        if let Some(libs) = lookup("UTSCHOOLDATA_R_LIBS") {
            config.lib_paths = std::env::split_paths(&libs)
                .map(|p| p.to_string_lossy().into_owned())
                .filter(|p| !p.is_empty())
                .collect();
        }

        config
    }
}

impl ConfigProvider for RuntimeConfig {
    fn rscript_path(&self) -> Option<&Path> {
        self.rscript_path.as_deref()
    }

    fn package(&self) -> &str {
        &self.package
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn lib_paths(&self) -> &[String] {
        &self.lib_paths
    }
}

impl Validate for RuntimeConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_package_name("package", &self.package)?;
        validation::validate_range("timeout_secs", self.timeout_secs, 1, 86_400)?;

        if let Some(path) = &self.rscript_path {
            validation::validate_path("rscript_path", &path.to_string_lossy())?;
        }
        for lib_path in &self.lib_paths {
            validation::validate_path("lib_paths", lib_path)?;
        }

        Ok(())
    }
}
