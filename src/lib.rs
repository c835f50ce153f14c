pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::RuntimeConfig;
pub use core::rscript::RscriptEngine;
pub use core::session::{BackendInfo, Session};
pub use domain::model::EnrollmentRecord;
pub use domain::ports::{ConfigProvider, Engine};
pub use utils::error::{Result, SchoolDataError};

/// Crate version, the counterpart of the wrapped package's version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Session over a local `Rscript`, configured from the environment.
/// Construction is cheap and spawns nothing; the first operation does.
pub fn default_session() -> Session<RscriptEngine<RuntimeConfig>> {
    let config = RuntimeConfig::from_env();
    let package = config.package.clone();
    Session::new(RscriptEngine::new(config), package)
}

pub async fn fetch_enr(end_year: i32) -> Result<Vec<EnrollmentRecord>> {
    default_session().fetch_enr(end_year).await
}

pub async fn get_available_years() -> Result<Vec<i32>> {
    default_session().get_available_years().await
}
