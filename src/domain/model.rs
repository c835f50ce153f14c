use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the tidy enrollment frame returned by `fetch_enr` in the
/// wrapped R package: one record per school and grade level for a given
/// school year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub end_year: i32,
    pub district_id: String,
    pub district_name: String,
    pub school_id: String,
    pub school_name: String,
    pub grade_level: String,
    /// Headcount for the row. Suppressed counts arrive from the backend as
    /// NA (an empty CSV field) and map to `None`.
    #[serde(deserialize_with = "deserialize_count")]
    pub enrollment: Option<u32>,
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() || raw == "NA" {
        return Ok(None);
    }
    raw.parse::<u32>().map(Some).map_err(serde::de::Error::custom)
}

/// End year of the school year containing `date`. Fall enrollment snapshots
/// belong to the academic year named by its ending calendar year, so from
/// July onward the current school year ends in the next calendar year.
pub fn end_year_for(date: NaiveDate) -> i32 {
    if date.month() >= 7 {
        date.year() + 1
    } else {
        date.year()
    }
}

pub fn current_end_year() -> i32 {
    end_year_for(chrono::Local::now().date_naive())
}
