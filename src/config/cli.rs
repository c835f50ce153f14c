use crate::config::toml_config::TomlConfig;
use crate::config::RuntimeConfig;
use crate::domain::model;
use crate::utils::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "utschooldata")]
#[command(about = "Utah school enrollment data, via the utschooldata R package")]
#[command(version)]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the Rscript binary (defaults to Rscript on PATH)
    #[arg(long, global = true)]
    pub rscript: Option<PathBuf>,

    /// Seconds to wait for the backend before giving up
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the end years the backend can fetch
    Years,

    /// Fetch fall enrollment for one school year
    Enr {
        /// School year, named by its ending calendar year
        #[arg(long, default_value_t = model::current_end_year())]
        end_year: i32,

        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Verify the R runtime and the wrapped package are usable
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl CliConfig {
    /// Merge precedence: defaults < environment < config file < flags.
    pub fn runtime_config(&self) -> Result<RuntimeConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.runtime_config(),
            None => RuntimeConfig::from_env(),
        };

        if let Some(rscript) = &self.rscript {
            config.rscript_path = Some(rscript.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }

        Ok(config)
    }
}
