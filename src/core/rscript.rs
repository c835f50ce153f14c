use crate::domain::ports::{ConfigProvider, Engine};
use crate::utils::error::{Result, SchoolDataError};
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

pub const DEFAULT_PROGRAM: &str = "Rscript";

// Keep error messages readable: R tracebacks can run to hundreds of lines.
const STDERR_TAIL_LINES: usize = 12;

/// `Engine` backed by an `Rscript` subprocess. One process per evaluation,
/// no state shared between calls; `--vanilla` keeps user profiles and site
/// files out of the picture.
pub struct RscriptEngine<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> RscriptEngine<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    fn program(&self) -> String {
        self.config
            .rscript_path()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(self.program());
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let lib_paths = self.config.lib_paths();
        if !lib_paths.is_empty() {
            match std::env::join_paths(lib_paths.iter().map(PathBuf::from)) {
                Ok(joined) => {
                    cmd.env("R_LIBS_USER", joined);
                }
                Err(e) => {
                    tracing::warn!("ignoring lib_paths, not joinable: {}", e);
                }
            }
        }
        cmd
    }
}

#[async_trait]
impl<C: ConfigProvider> Engine for RscriptEngine<C> {
    async fn eval(&self, script: &str) -> Result<Vec<u8>> {
        let program = self.program();
        let mut cmd = self.command();
        cmd.arg("--vanilla").arg("-e").arg(script);

        tracing::debug!("spawning {} for a {}-byte snippet", program, script.len());
        let child = cmd.spawn().map_err(|e| spawn_error(&program, e))?;

        let timeout = self.config.timeout();
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(SchoolDataError::Timeout {
                    seconds: timeout.as_secs(),
                })
            }
        };

        if !output.status.success() {
            let status = output.status.code().unwrap_or(-1);
            tracing::debug!("{} exited with status {}", program, status);
            return Err(SchoolDataError::EvalFailed {
                status,
                stderr: stderr_tail(&output.stderr, STDERR_TAIL_LINES),
            });
        }

        Ok(output.stdout)
    }

    async fn version(&self) -> Result<String> {
        let program = self.program();
        let mut cmd = self.command();
        cmd.arg("--version");

        let output = cmd.output().await.map_err(|e| spawn_error(&program, e))?;

        // The banner moved from stderr to stdout in R 4.2; read both.
        let mut banner = String::from_utf8_lossy(&output.stdout).into_owned();
        banner.push_str(&String::from_utf8_lossy(&output.stderr));

        parse_version(&banner).ok_or_else(|| SchoolDataError::OutputError {
            message: format!("unrecognised version banner from {}", program),
        })
    }
}

fn spawn_error(program: &str, err: std::io::Error) -> SchoolDataError {
    if err.kind() == std::io::ErrorKind::NotFound {
        SchoolDataError::RuntimeNotFound {
            program: program.to_string(),
        }
    } else {
        SchoolDataError::IoError(err)
    }
}

fn stderr_tail(raw: &[u8], lines: usize) -> String {
    let text = String::from_utf8_lossy(raw);
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

fn parse_version(banner: &str) -> Option<String> {
    let re = Regex::new(r"(\d+\.\d+\.\d+)").unwrap();
    re.captures(banner).map(|caps| caps[1].to_string())
}
