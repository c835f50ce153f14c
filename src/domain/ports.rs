use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Seam to the R runtime that hosts the wrapped package. `eval` runs one
/// snippet and returns whatever it wrote to stdout; `version` reports the
/// interpreter version. Production code uses `RscriptEngine`; tests swap in
/// mocks.
#[async_trait]
pub trait Engine: Send + Sync {
    async fn eval(&self, script: &str) -> Result<Vec<u8>>;
    async fn version(&self) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn rscript_path(&self) -> Option<&Path>;
    fn package(&self) -> &str;
    fn timeout(&self) -> Duration;
    fn lib_paths(&self) -> &[String];
}
