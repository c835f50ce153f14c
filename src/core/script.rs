//! Builders for the short R snippets the binding evaluates. Results come
//! back over stdout: CSV for data frames, one value per line otherwise.

/// Reserved exit status the guard prologue uses when the wrapped package is
/// not installed, so callers can tell "package missing" apart from an
/// ordinary R error without parsing locale-dependent messages.
pub const PACKAGE_MISSING_STATUS: i32 = 23;

fn guard(package: &str) -> String {
    format!(
        "if (!requireNamespace(\"{}\", quietly = TRUE)) quit(save = \"no\", status = {})",
        package, PACKAGE_MISSING_STATUS
    )
}

pub fn fetch_enr(package: &str, end_year: i32) -> String {
    format!(
        "{}\nsuppressPackageStartupMessages(library({}))\n\
         df <- {}::fetch_enr(end_year = {}L)\n\
         write.csv(df, file = stdout(), row.names = FALSE, na = \"\")",
        guard(package),
        package,
        package,
        end_year
    )
}

pub fn available_years(package: &str) -> String {
    format!(
        "{}\nsuppressPackageStartupMessages(library({}))\n\
         cat({}::get_available_years(), sep = \"\\n\")",
        guard(package),
        package,
        package
    )
}

pub fn package_version(package: &str) -> String {
    format!(
        "{}\ncat(as.character(utils::packageVersion(\"{}\")))",
        guard(package),
        package
    )
}
