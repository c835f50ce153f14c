use crate::config::RuntimeConfig;
use crate::utils::error::{Result, SchoolDataError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub runtime: Option<RuntimeSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeSection {
    pub rscript_path: Option<String>,
    pub package: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub lib_paths: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SchoolDataError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SchoolDataError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Collapse the file onto a `RuntimeConfig`, starting from environment
    /// defaults so a partial file only overrides what it names.
    pub fn runtime_config(&self) -> RuntimeConfig {
        let mut config = RuntimeConfig::from_env();

        if let Some(runtime) = &self.runtime {
            if let Some(path) = &runtime.rscript_path {
                config.rscript_path = Some(PathBuf::from(path));
            }
            if let Some(package) = &runtime.package {
                config.package = package.clone();
            }
            if let Some(secs) = runtime.timeout_seconds {
                config.timeout_secs = secs;
            }
            if let Some(lib_paths) = &runtime.lib_paths {
                config.lib_paths = lib_paths.clone();
            }
        }

        config
    }

    pub fn output_format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.format.as_deref())
    }
}

/// Replace `${VAR_NAME}` occurrences with the variable's value; unset
/// variables are left as-is so validation can point at them.
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;

    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.runtime_config().validate()?;

        if let Some(output) = &self.output {
            if let Some(path) = &output.path {
                validation::validate_path("output.path", path)?;
            }

            let valid_formats = ["csv", "json"];
            if let Some(format) = &output.format {
                if !valid_formats.contains(&format.as_str()) {
                    return Err(SchoolDataError::InvalidConfigValue {
                        field: "output.format".to_string(),
                        value: format.clone(),
                        reason: format!(
                            "Unsupported format. Valid formats: {}",
                            valid_formats.join(", ")
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}
