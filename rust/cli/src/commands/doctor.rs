//! Environment diagnostics and health checks command.
//!
//! The `doctor` command validates the local environment before a session is
//! started and reports results in JSON format.
//!
//! ## Checks Performed
//!
//! - **Solver**: The configured solver executable exists and is runnable
//! - **Startup File**: The startup-hands file, if present, parses cleanly
//! - **Startup Dir**: The directory holding the startup file is writable

use crate::config;
use crate::error::CliError;
use crate::ui;
use doukit_core::protocol;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Represents a single diagnostic check result.
struct DoctorCheck {
    name: &'static str,
    ok: bool,
    detail: String,
    error: Option<String>,
}

impl DoctorCheck {
    /// Create a passing check result.
    fn ok(name: &'static str, detail: impl Into<String>) -> Self {
        DoctorCheck {
            name,
            ok: true,
            detail: detail.into(),
            error: None,
        }
    }

    /// Create a failing check result.
    fn fail(name: &'static str, detail: impl Into<String>, error: impl Into<String>) -> Self {
        DoctorCheck {
            name,
            ok: false,
            detail: detail.into(),
            error: Some(error.into()),
        }
    }

    /// Convert check result to JSON value.
    fn to_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(
            "status".into(),
            serde_json::Value::String(if self.ok { "ok" } else { "fail" }.into()),
        );
        map.insert(
            "detail".into(),
            serde_json::Value::String(self.detail.clone()),
        );
        if let Some(err) = &self.error {
            map.insert("error".into(), serde_json::Value::String(err.clone()));
        }
        serde_json::Value::Object(map)
    }
}

/// Generate a unique suffix for temporary file names.
fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros()
}

/// Resolve a bare executable name against `PATH` the way the shell would.
fn locate_executable(path: &Path) -> Option<PathBuf> {
    if path.components().count() > 1 {
        return path.is_file().then(|| path.to_path_buf());
    }
    let dirs = std::env::var_os("PATH")?;
    std::env::split_paths(&dirs)
        .map(|dir| dir.join(path))
        .find(|candidate| candidate.is_file())
}

#[cfg(unix)]
fn is_runnable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_runnable(_path: &Path) -> bool {
    true
}

/// Check that the configured solver executable exists and is runnable.
fn check_solver(path: &Path) -> DoctorCheck {
    match locate_executable(path) {
        Some(found) if is_runnable(&found) => DoctorCheck::ok(
            "solver",
            format!("Solver executable found at {}", found.display()),
        ),
        Some(found) => DoctorCheck::fail(
            "solver",
            format!("Solver probe at {}", found.display()),
            format!(
                "Solver check failed: {} is not executable",
                found.display()
            ),
        ),
        None => DoctorCheck::fail(
            "solver",
            format!("Solver probe for {}", path.display()),
            format!("Solver check failed: {} not found", path.display()),
        ),
    }
}

/// Check that the startup-hands file, if present, parses cleanly.
fn check_startup_file(path: &Path) -> DoctorCheck {
    if !path.exists() {
        return DoctorCheck::ok(
            "startup_file",
            format!(
                "Startup file {} absent; default hands will be used",
                path.display()
            ),
        );
    }
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            return DoctorCheck::fail(
                "startup_file",
                format!("Startup file read attempt at {}", path.display()),
                format!("Startup file check failed: {}", e),
            );
        }
    };
    let mut lines = text.lines();
    let parsed = match (lines.next(), lines.next()) {
        (Some(first), Some(second)) => protocol::parse_hand_line(first)
            .and_then(|ours| protocol::parse_hand_line(second).map(|theirs| (ours, theirs))),
        _ => {
            return DoctorCheck::fail(
                "startup_file",
                format!("Startup file parse attempt at {}", path.display()),
                "Startup file check failed: expected two hand lines".to_string(),
            );
        }
    };
    match parsed {
        Ok((ours, theirs)) => DoctorCheck::ok(
            "startup_file",
            format!(
                "Startup file {} parsed ({} vs {} cards)",
                path.display(),
                ours.len(),
                theirs.len()
            ),
        ),
        Err(e) => DoctorCheck::fail(
            "startup_file",
            format!("Startup file parse attempt at {}", path.display()),
            format!("Startup file check failed: {}", e),
        ),
    }
}

/// Check write permissions in the directory holding the startup file.
fn check_startup_dir(startup_file: &Path) -> DoctorCheck {
    let dir = match startup_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let probe = dir.join(format!("doukit-doctor-{}.tmp", unique_suffix()));
    match std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&probe)
    {
        Ok(mut file) => {
            if let Err(e) = file.write_all(b"ok") {
                let _ = std::fs::remove_file(&probe);
                return DoctorCheck::fail(
                    "startup_dir",
                    format!("Startup dir write attempt in {}", dir.display()),
                    format!("Startup dir check failed: {}", e),
                );
            }
            drop(file);
            let _ = std::fs::remove_file(&probe);
            DoctorCheck::ok(
                "startup_dir",
                format!("Startup dir '{}' is writable", dir.display()),
            )
        }
        Err(e) => DoctorCheck::fail(
            "startup_dir",
            format!("Startup dir write attempt in {}", dir.display()),
            format!("Startup dir check failed: {}", e),
        ),
    }
}

/// Handle the doctor command.
///
/// Outputs a JSON report of check results on `out`; failing checks also get
/// a line on `err`. Returns `Err(CliError::Config)` if any check fails.
pub fn handle_doctor_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let cfg = config::load().map_err(|e| CliError::Config(e.to_string()))?;

    let checks = vec![
        check_solver(&cfg.executable),
        check_startup_file(&cfg.startup_file),
        check_startup_dir(&cfg.startup_file),
    ];

    let mut report = serde_json::Map::new();
    let mut ok_all = true;
    for check in checks {
        if !check.ok {
            ok_all = false;
            if let Some(msg) = &check.error {
                ui::write_error(err, msg)?;
            }
        }
        report.insert(check.name.to_string(), check.to_value());
    }

    let output = serde_json::json!({
        "checks": serde_json::Value::Object(report)
    });

    let json_output = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize doctor report: {}", e)))?;
    writeln!(out, "{}", json_output)?;

    if ok_all {
        Ok(())
    } else {
        Err(CliError::Config(
            "Environment diagnostics failed".to_string(),
        ))
    }
}
