use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchoolDataError {
    #[error("R runtime not found: {program}")]
    RuntimeNotFound { program: String },

    #[error("R evaluation failed with status {status}: {stderr}")]
    EvalFailed { status: i32, stderr: String },

    #[error("R evaluation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("R package '{package}' is not installed")]
    PackageMissing { package: String },

    #[error("Unexpected backend output: {message}")]
    OutputError { message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl SchoolDataError {
    /// Actionable hint printed by the CLI alongside the error itself.
    pub fn recovery_suggestion(&self) -> String {
        match self {
            SchoolDataError::RuntimeNotFound { program } => format!(
                "Install R (https://cran.r-project.org) or point UTSCHOOLDATA_RSCRIPT at an existing '{}' binary",
                program
            ),
            SchoolDataError::PackageMissing { package } => format!(
                "Install the wrapped package from an R session: remotes::install_github(\"{}\")",
                package
            ),
            SchoolDataError::Timeout { seconds } => format!(
                "The backend did not answer within {}s; raise timeout_secs (first fetches download source files)",
                seconds
            ),
            SchoolDataError::EvalFailed { .. } => {
                "Re-run with --verbose to see the full R stderr".to_string()
            }
            SchoolDataError::ConfigError { .. } | SchoolDataError::InvalidConfigValue { .. } => {
                "Check the configuration file and command-line flags".to_string()
            }
            _ => "Re-run with --verbose for more detail".to_string(),
        }
    }

    /// Process exit code used by the CLI. Environment problems (2) are
    /// distinguished from evaluation failures (1) and timeouts (3).
    pub fn exit_code(&self) -> i32 {
        match self {
            SchoolDataError::RuntimeNotFound { .. } | SchoolDataError::PackageMissing { .. } => 2,
            SchoolDataError::Timeout { .. } => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SchoolDataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        let not_found = SchoolDataError::RuntimeNotFound {
            program: "Rscript".to_string(),
        };
        let missing = SchoolDataError::PackageMissing {
            package: "utschooldata".to_string(),
        };
        let timeout = SchoolDataError::Timeout { seconds: 30 };
        let eval = SchoolDataError::EvalFailed {
            status: 1,
            stderr: "Error".to_string(),
        };

        assert_eq!(not_found.exit_code(), 2);
        assert_eq!(missing.exit_code(), 2);
        assert_eq!(timeout.exit_code(), 3);
        assert_eq!(eval.exit_code(), 1);
    }

    #[test]
    fn test_suggestions_mention_the_offender() {
        let missing = SchoolDataError::PackageMissing {
            package: "utschooldata".to_string(),
        };
        assert!(missing.recovery_suggestion().contains("utschooldata"));

        let not_found = SchoolDataError::RuntimeNotFound {
            program: "Rscript".to_string(),
        };
        assert!(not_found.recovery_suggestion().contains("Rscript"));
    }
}
