use crate::core::script;
use crate::domain::model::EnrollmentRecord;
use crate::domain::ports::Engine;
use crate::utils::error::{Result, SchoolDataError};
use crate::utils::validation;

/// Versions of the two halves of the binding's backend, as reported by
/// `Session::verify`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInfo {
    pub r_version: String,
    pub package_version: String,
}

/// A handle on the wrapped R package. Mirrors its public surface one
/// operation per function; everything behind `fetch_enr` and
/// `get_available_years` (download, tidy, cache) stays inside the package.
pub struct Session<E: Engine> {
    engine: E,
    package: String,
}

impl<E: Engine> Session<E> {
    pub fn new(engine: E, package: impl Into<String>) -> Self {
        Self {
            engine,
            package: package.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Fall enrollment for the school year ending in `end_year`, one row per
    /// school and grade level.
    pub async fn fetch_enr(&self, end_year: i32) -> Result<Vec<EnrollmentRecord>> {
        validation::validate_package_name("package", &self.package)?;
        validation::validate_end_year("end_year", end_year)?;

        tracing::debug!("fetching enrollment for end year {}", end_year);
        let stdout = self.eval(&script::fetch_enr(&self.package, end_year)).await?;
        let records = parse_enrollment_csv(&stdout)?;
        tracing::debug!("backend returned {} enrollment rows", records.len());
        Ok(records)
    }

    /// End years the backend can currently fetch.
    pub async fn get_available_years(&self) -> Result<Vec<i32>> {
        validation::validate_package_name("package", &self.package)?;

        let stdout = self.eval(&script::available_years(&self.package)).await?;
        parse_years(&stdout)
    }

    /// Version string of the wrapped R package.
    pub async fn package_version(&self) -> Result<String> {
        validation::validate_package_name("package", &self.package)?;

        let stdout = self.eval(&script::package_version(&self.package)).await?;
        let version = String::from_utf8_lossy(&stdout).trim().to_string();
        if version.is_empty() {
            return Err(SchoolDataError::OutputError {
                message: "backend reported an empty package version".to_string(),
            });
        }
        Ok(version)
    }

    /// Confirm the backend is usable: the R runtime answers and the wrapped
    /// package loads. Failure here means a packaging or environment problem,
    /// not a data problem.
    pub async fn verify(&self) -> Result<BackendInfo> {
        let r_version = self.engine.version().await?;
        let package_version = self.package_version().await?;
        Ok(BackendInfo {
            r_version,
            package_version,
        })
    }

    async fn eval(&self, snippet: &str) -> Result<Vec<u8>> {
        self.engine.eval(snippet).await.map_err(|e| match e {
            SchoolDataError::EvalFailed { status, .. }
                if status == script::PACKAGE_MISSING_STATUS =>
            {
                SchoolDataError::PackageMissing {
                    package: self.package.clone(),
                }
            }
            other => other,
        })
    }
}

fn parse_enrollment_csv(raw: &[u8]) -> Result<Vec<EnrollmentRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw);

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

fn parse_years(raw: &[u8]) -> Result<Vec<i32>> {
    let text = String::from_utf8(raw.to_vec()).map_err(|e| SchoolDataError::OutputError {
        message: format!("years listing is not UTF-8: {}", e),
    })?;

    let mut years = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let year = line
            .parse::<i32>()
            .map_err(|_| SchoolDataError::OutputError {
                message: format!("expected a year, got '{}'", line),
            })?;
        years.push(year);
    }
    Ok(years)
}
