// Process-backed tests using a scripted stand-in for the solver binary.
#![cfg(unix)]

use doukit_core::config::SolverConfig;
use doukit_core::errors::SolverError;
use doukit_core::hand::{Party, Turn};
use doukit_core::session::{Session, SessionNotice};
use doukit_core::supervisor::SupervisorState;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Write an executable shell script that first consumes the two startup
/// lines, then runs `body`.
fn fake_solver(dir: &Path, body: &str) -> PathBuf {
    fake_solver_at(&dir.join("fake_solver.sh"), body)
}

fn fake_solver_at(path: &Path, body: &str) -> PathBuf {
    fs::write(
        path,
        format!("#!/bin/sh\nread hand_a\nread hand_b\n{body}\n"),
    )
    .unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
    path.to_path_buf()
}

fn config(dir: &Path, solver: PathBuf) -> SolverConfig {
    SolverConfig {
        executable: solver,
        startup_file: dir.join("input.txt"),
    }
}

/// Pump the session until `done` says so or five seconds pass.
fn collect_until(
    session: &mut Session,
    mut done: impl FnMut(&[SessionNotice]) -> bool,
) -> Vec<SessionNotice> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut all = Vec::new();
    while Instant::now() < deadline {
        all.extend(session.wait(Duration::from_millis(100)));
        if done(&all) {
            break;
        }
    }
    all
}

fn latest_state(notices: &[SessionNotice]) -> Option<&doukit_core::session::SessionState> {
    notices.iter().rev().find_map(|n| match n {
        SessionNotice::State(state) => Some(state),
        SessionNotice::Crashed { .. } => None,
    })
}

#[test]
fn full_exchange_with_the_solver() {
    let dir = tempfile::tempdir().unwrap();
    let solver = fake_solver(
        dir.path(),
        concat!(
            "echo 'analysis start ......'\n",
            "echo '{bad json'\n",
            "echo '{\"turn\":\"A\",\"options\":[{\"id\":1,\"desc\":\"play 3\",\"win\":true}]}'\n",
            "read move\n",
            "echo '{\"hand_a\":[4,4,4,5,5,6,6],\"turn\":\"B\"}'",
        ),
    );
    let mut session = Session::new(config(dir.path(), solver));
    session.start().unwrap();
    assert_eq!(session.supervisor_state(), SupervisorState::Running);

    // The diagnostic and the malformed brace line are skipped; the
    // well-formed event after them still arrives.
    let notices = collect_until(&mut session, |all| {
        latest_state(all).is_some_and(|s| !s.options.is_empty())
    });
    let state = latest_state(&notices).expect("an options event");
    assert_eq!(state.turn, Turn::Us);
    assert_eq!(state.options.len(), 1);
    assert_eq!(state.options[0].id, 1);
    assert_eq!(state.options[0].desc, "play 3");

    session.select_move(1).unwrap();

    let notices = collect_until(&mut session, |all| {
        latest_state(all).is_some_and(|s| s.turn == Turn::Opponent)
    });
    let state = latest_state(&notices).expect("a hand update");
    assert_eq!(
        state
            .hand_ours
            .ranks()
            .iter()
            .map(|r| r.as_u8())
            .collect::<Vec<_>>(),
        vec![4, 4, 4, 5, 5, 6, 6]
    );

    // The script then exits with no winner declared: that is surfaced
    // as a possible crash.
    let notices = collect_until(&mut session, |all| {
        all.iter().any(|n| matches!(n, SessionNotice::Crashed { .. }))
    });
    assert!(notices
        .iter()
        .any(|n| matches!(n, SessionNotice::Crashed { .. })));
    assert_eq!(session.supervisor_state(), SupervisorState::Crashed);
}

#[test]
fn clean_finish_after_winner_is_not_a_crash() {
    let dir = tempfile::tempdir().unwrap();
    let solver = fake_solver(dir.path(), "echo '{\"winner\":\"A\"}'");
    let mut session = Session::new(config(dir.path(), solver));
    session.start().unwrap();

    let notices = collect_until(&mut session, |all| {
        latest_state(all).is_some_and(|s| s.is_over())
    });
    let state = latest_state(&notices).unwrap();
    assert_eq!(state.winner, Some(Party::Us));
    assert!(state.options.is_empty());

    // Drain the end-of-stream; the supervisor winds down normally.
    collect_until(&mut session, |_| false);
    assert!(notices
        .iter()
        .chain(session.poll().iter())
        .all(|n| !matches!(n, SessionNotice::Crashed { .. })));
    assert_eq!(session.supervisor_state(), SupervisorState::Stopped);
}

#[test]
fn startup_file_is_written_before_spawn() {
    let dir = tempfile::tempdir().unwrap();
    let solver = fake_solver(dir.path(), "sleep 5");
    let cfg = config(dir.path(), solver);
    let startup_file = cfg.startup_file.clone();
    let mut session = Session::new(cfg);
    session.start().unwrap();

    let recorded = fs::read_to_string(&startup_file).unwrap();
    assert_eq!(recorded, "3 3 3 4 4 4 5 5 6 6 0\n7 0\n");
    session.stop();
}

#[test]
fn stop_is_idempotent_and_nonblocking() {
    let dir = tempfile::tempdir().unwrap();
    let solver = fake_solver(dir.path(), "sleep 30");
    let mut session = Session::new(config(dir.path(), solver));
    session.start().unwrap();

    let before = Instant::now();
    session.stop();
    session.stop();
    // stop() must not wait out a solver that ignores the request.
    assert!(before.elapsed() < Duration::from_secs(5));
    assert_eq!(session.supervisor_state(), SupervisorState::Stopped);
    assert!(session.poll().is_empty());
}

#[test]
fn spawn_failure_crashes_and_allows_retry() {
    let dir = tempfile::tempdir().unwrap();
    let solver_path = dir.path().join("late_solver.sh");
    let mut session = Session::new(config(dir.path(), solver_path.clone()));

    let err = session.start().unwrap_err();
    assert!(matches!(err, SolverError::Spawn { .. }));
    assert_eq!(session.supervisor_state(), SupervisorState::Crashed);

    // Once the executable exists, the same session starts again.
    fake_solver_at(&solver_path, "echo '{\"winner\":\"B\"}'");
    session.start().unwrap();
    assert_eq!(session.supervisor_state(), SupervisorState::Running);
    session.stop();
}

#[test]
fn restart_replaces_the_previous_process() {
    let dir = tempfile::tempdir().unwrap();
    let solver = fake_solver(dir.path(), "sleep 30");
    let mut session = Session::new(config(dir.path(), solver));
    session.start().unwrap();
    session.start().unwrap();
    assert_eq!(session.supervisor_state(), SupervisorState::Running);
    session.stop();
}

#[test]
fn moves_require_a_running_solver() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(config(dir.path(), dir.path().join("unused")));
    assert!(matches!(
        session.select_move(1),
        Err(SolverError::NotRunning)
    ));
}
