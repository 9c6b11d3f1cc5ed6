//! End-to-end tests for the `run` entry point: argument handling, exit
//! codes, and the cfg/doctor reports under different environments.

use doukit_cli::run;
use serial_test::serial;

struct TempEnvVar {
    key: &'static str,
    previous: Option<String>,
}

impl TempEnvVar {
    fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe { std::env::set_var(key, value) };
        Self { key, previous }
    }

    fn unset(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe { std::env::remove_var(key) };
        Self { key, previous }
    }
}

impl Drop for TempEnvVar {
    fn drop(&mut self) {
        unsafe {
            if let Some(prev) = &self.previous {
                std::env::set_var(self.key, prev);
            } else {
                std::env::remove_var(self.key);
            }
        }
    }
}

fn clean_env() -> Vec<TempEnvVar> {
    vec![
        TempEnvVar::unset("DOUKIT_CONFIG"),
        TempEnvVar::unset("DOUKIT_SOLVER"),
        TempEnvVar::unset("DOUKIT_INPUT"),
    ]
}

#[test]
#[serial]
fn help_lists_expected_commands() {
    let _env = clean_env();
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();

    let code = run(["doukit", "--help"], &mut out, &mut err);
    assert_eq!(code, 0);

    let stdout = String::from_utf8_lossy(&out);
    for cmd in ["play", "edit", "cfg", "doctor"] {
        assert!(stdout.contains(cmd), "help should list subcommand `{}`", cmd);
    }
}

#[test]
#[serial]
fn unknown_commands_exit_2_with_usage_on_stderr() {
    let _env = clean_env();
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();

    let code = run(["doukit", "shuffle"], &mut out, &mut err);
    assert_eq!(code, 2);

    let stderr = String::from_utf8_lossy(&err);
    assert!(stderr.contains("Usage: doukit"));
    assert!(stderr.contains("Commands:"));
}

#[test]
#[serial]
fn cfg_shows_default_settings() {
    let _env = clean_env();
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();

    let code = run(["doukit", "cfg"], &mut out, &mut err);
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["solver"]["value"], "dou_solver");
    assert_eq!(json["solver"]["source"], "default");
    assert_eq!(json["input"]["value"], "input.txt");
    assert_eq!(json["input"]["source"], "default");
}

#[test]
#[serial]
fn cfg_shows_environment_overrides() {
    let _env = clean_env();
    let _solver = TempEnvVar::set("DOUKIT_SOLVER", "/opt/dou/bin/dou_solver");
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();

    let code = run(["doukit", "cfg"], &mut out, &mut err);
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["solver"]["value"], "/opt/dou/bin/dou_solver");
    assert_eq!(json["solver"]["source"], "env");
    assert_eq!(json["input"]["source"], "default");
}

#[test]
#[serial]
fn cfg_shows_file_values_and_env_precedence() {
    let _env = clean_env();
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("doukit.toml");
    std::fs::write(&cfg_path, "solver = \"from-file\"\ninput = \"file-input.txt\"\n").unwrap();

    let _cfg = TempEnvVar::set("DOUKIT_CONFIG", cfg_path.to_str().unwrap());
    let _input = TempEnvVar::set("DOUKIT_INPUT", "env-input.txt");
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();

    let code = run(["doukit", "cfg"], &mut out, &mut err);
    assert_eq!(code, 0);

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["solver"]["value"], "from-file");
    assert_eq!(json["solver"]["source"], "file");
    assert_eq!(json["input"]["value"], "env-input.txt");
    assert_eq!(json["input"]["source"], "env");
}

#[cfg(unix)]
fn write_executable(path: &std::path::Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::write(path, body).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
#[serial]
fn doctor_passes_in_a_prepared_environment() {
    let _env = clean_env();
    let dir = tempfile::tempdir().unwrap();
    let solver = dir.path().join("dou_solver");
    write_executable(&solver, "#!/bin/sh\nexit 0\n");
    let input = dir.path().join("input.txt");
    std::fs::write(&input, "3 3 0\n7 0\n").unwrap();

    let _solver = TempEnvVar::set("DOUKIT_SOLVER", solver.to_str().unwrap());
    let _input = TempEnvVar::set("DOUKIT_INPUT", input.to_str().unwrap());
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();

    let code = run(["doukit", "doctor"], &mut out, &mut err);
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    for check in ["solver", "startup_file", "startup_dir"] {
        assert_eq!(json["checks"][check]["status"], "ok", "check `{}`", check);
    }
}

#[test]
#[serial]
fn doctor_fails_when_the_solver_is_missing() {
    let _env = clean_env();
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("no-such-solver");

    let _solver = TempEnvVar::set("DOUKIT_SOLVER", absent.to_str().unwrap());
    let _input = TempEnvVar::set("DOUKIT_INPUT", dir.path().join("input.txt").to_str().unwrap());
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();

    let code = run(["doukit", "doctor"], &mut out, &mut err);
    assert_eq!(code, 2);

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["checks"]["solver"]["status"], "fail");
    assert!(String::from_utf8_lossy(&err).contains("Solver check failed"));
}

#[test]
#[serial]
fn doctor_flags_a_malformed_startup_file() {
    let _env = clean_env();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    std::fs::write(&input, "3 pickle 0\n7 0\n").unwrap();

    let _input = TempEnvVar::set("DOUKIT_INPUT", input.to_str().unwrap());
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();

    let code = run(["doukit", "doctor"], &mut out, &mut err);
    assert_eq!(code, 2);

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["checks"]["startup_file"]["status"], "fail");
}

#[test]
#[serial]
fn play_reports_a_spawn_failure_with_exit_2() {
    let _env = clean_env();
    let dir = tempfile::tempdir().unwrap();

    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(
        [
            "doukit",
            "play",
            "--solver",
            dir.path().join("absent").to_str().unwrap(),
            "--input",
            dir.path().join("input.txt").to_str().unwrap(),
        ],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 2);
    assert!(String::from_utf8_lossy(&err).contains("failed to launch solver"));
}

#[cfg(unix)]
#[test]
#[serial]
fn play_runs_a_scripted_session_end_to_end() {
    let _env = clean_env();
    let dir = tempfile::tempdir().unwrap();
    let solver = dir.path().join("fake_solver");
    write_executable(
        &solver,
        concat!(
            "#!/bin/sh\n",
            "read hand_a\n",
            "read hand_b\n",
            "echo solver ready\n",
            "echo '{\"turn\":\"B\",\"winner\":\"B\",\"hand_b\":[]}'\n",
        ),
    );

    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(
        [
            "doukit",
            "play",
            "--solver",
            solver.to_str().unwrap(),
            "--input",
            dir.path().join("input.txt").to_str().unwrap(),
        ],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));

    let stdout = String::from_utf8_lossy(&out);
    assert!(stdout.contains("game over: opponent wins"));
}
