//! End-to-end coverage of the Rscript bridge against fake `Rscript`
//! binaries (shell shims in a temp dir), so no R installation is needed.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use utschooldata::{RscriptEngine, RuntimeConfig, SchoolDataError, Session};

fn fake_rscript(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("Rscript");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();

    path
}

fn session_for(shim: &Path, timeout_secs: u64) -> Session<RscriptEngine<RuntimeConfig>> {
    let config = RuntimeConfig {
        rscript_path: Some(shim.to_path_buf()),
        timeout_secs,
        ..RuntimeConfig::default()
    };
    let package = config.package.clone();
    Session::new(RscriptEngine::new(config), package)
}

#[tokio::test]
async fn fetch_enr_parses_shim_csv() {
    let dir = TempDir::new().unwrap();
    let shim = fake_rscript(
        &dir,
        r#"cat <<'EOF'
end_year,district_id,district_name,school_id,school_name,grade_level,enrollment
2024,01,Alpine,100,Alpine Elementary,K,73
2024,01,Alpine,100,Alpine Elementary,1,
EOF"#,
    );

    let session = session_for(&shim, 30);
    let records = session.fetch_enr(2024).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].district_name, "Alpine");
    assert_eq!(records[0].enrollment, Some(73));
    assert_eq!(records[1].enrollment, None);
}

#[tokio::test]
async fn get_available_years_reads_lines() {
    let dir = TempDir::new().unwrap();
    let shim = fake_rscript(&dir, "printf '2019\\n2020\\n2021\\n'");

    let session = session_for(&shim, 30);
    let years = session.get_available_years().await.unwrap();

    assert_eq!(years, vec![2019, 2020, 2021]);
}

#[tokio::test]
async fn failing_eval_surfaces_status_and_stderr() {
    let dir = TempDir::new().unwrap();
    let shim = fake_rscript(
        &dir,
        "echo 'Error in fetch_enr(end_year = 2024L) : boom' >&2\nexit 1",
    );

    let session = session_for(&shim, 30);
    let result = session.fetch_enr(2024).await;

    match result {
        Err(SchoolDataError::EvalFailed { status, stderr }) => {
            assert_eq!(status, 1);
            assert!(stderr.contains("boom"));
        }
        other => panic!("expected EvalFailed, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn guard_exit_maps_to_package_missing() {
    let dir = TempDir::new().unwrap();
    let shim = fake_rscript(&dir, "exit 23");

    let session = session_for(&shim, 30);
    let result = session.fetch_enr(2024).await;

    match result {
        Err(SchoolDataError::PackageMissing { package }) => {
            assert_eq!(package, "utschooldata");
        }
        other => panic!("expected PackageMissing, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn missing_binary_maps_to_runtime_not_found() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no-such-Rscript");

    let session = session_for(&missing, 30);
    let result = session.get_available_years().await;

    match result {
        Err(SchoolDataError::RuntimeNotFound { program }) => {
            assert!(program.contains("no-such-Rscript"));
        }
        other => panic!("expected RuntimeNotFound, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn slow_backend_times_out() {
    let dir = TempDir::new().unwrap();
    let shim = fake_rscript(&dir, "sleep 5");

    let session = session_for(&shim, 1);
    let result = session.get_available_years().await;

    assert!(matches!(
        result,
        Err(SchoolDataError::Timeout { seconds: 1 })
    ));
}

#[tokio::test]
async fn verify_reports_runtime_and_package_versions() {
    let dir = TempDir::new().unwrap();
    // Pre-4.2 style: the version banner lands on stderr.
    let shim = fake_rscript(
        &dir,
        r#"if [ "$1" = "--version" ]; then
  echo 'Rscript (R) scripting front-end version 4.4.1 (2024-06-14)' >&2
  exit 0
fi
printf '0.3.1'"#,
    );

    let session = session_for(&shim, 30);
    let info = session.verify().await.unwrap();

    assert_eq!(info.r_version, "4.4.1");
    assert_eq!(info.package_version, "0.3.1");
}

#[tokio::test]
async fn snippet_reaches_the_interpreter() {
    let dir = TempDir::new().unwrap();
    // Echo the -e payload back so the test can see what R would evaluate.
    let shim = fake_rscript(&dir, "shift\nprintf '%s' \"$2\" >&2\nexit 9");

    let session = session_for(&shim, 30);
    let result = session.fetch_enr(2024).await;

    match result {
        Err(SchoolDataError::EvalFailed { status, stderr }) => {
            assert_eq!(status, 9);
            assert!(stderr.contains("fetch_enr(end_year = 2024L)"));
        }
        other => panic!("expected EvalFailed, got {:?}", other.err()),
    }
}
