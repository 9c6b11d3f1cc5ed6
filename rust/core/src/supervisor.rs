//! Ownership of the solver child process, its pipes, and the single
//! background thread that reads its stdout.
//!
//! The reader thread is the only place solver output is read or decoded.
//! Decoded events cross to the session owner over a bounded channel;
//! diagnostics and decode anomalies go to the log and never stop the
//! loop. `stop` requests termination without waiting: the kill unblocks
//! a pending read, the run flag makes the loop exit at its next return,
//! and reaping happens on a detached thread.

use crate::config::SolverConfig;
use crate::errors::SolverError;
use crate::hand::Hand;
use crate::persist;
use crate::protocol::{self, SolverEvent, SolverLine};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;
use std::thread;

/// Bounded buffer between the reader thread and the session owner. The
/// reader blocks when the owner falls this far behind; events are never
/// dropped.
const READER_CHANNEL_BUFFER: usize = 256;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SupervisorState {
    Idle,
    Starting,
    Running,
    Stopping,
    Stopped,
    /// Absorbing failure state: spawn failed, a pipe broke, or the
    /// solver exited before declaring a winner. `start` is the only way
    /// out.
    Crashed,
}

/// One message from the background reader to the session owner.
#[derive(Debug)]
pub enum ReaderNotice {
    Event(Box<SolverEvent>),
    /// stdout reached end of stream and the reader exited.
    StreamEnded,
}

/// Owns at most one live solver process. Starting a new session fully
/// stops any prior process first; no two solver processes ever run under
/// one supervisor.
#[derive(Debug)]
pub struct Supervisor {
    config: SolverConfig,
    state: SupervisorState,
    stdin: Option<ChildStdin>,
    child: Option<Child>,
    run_flag: Arc<AtomicBool>,
}

impl Supervisor {
    pub fn new(config: SolverConfig) -> Self {
        Supervisor {
            config,
            state: SupervisorState::Idle,
            stdin: None,
            child: None,
            run_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Persist the startup hands, spawn the solver, feed it the startup
    /// block, and hand back the receiving end of the reader channel.
    pub fn start(
        &mut self,
        ours: &Hand,
        theirs: &Hand,
    ) -> Result<Receiver<ReaderNotice>, SolverError> {
        self.stop();
        self.state = SupervisorState::Starting;

        if let Err(source) = persist::save_startup(&self.config.startup_file, ours, theirs) {
            self.state = SupervisorState::Crashed;
            return Err(SolverError::Persist {
                path: self.config.startup_file.clone(),
                source,
            });
        }

        let mut command = Command::new(&self.config.executable);
        command
            .arg("--json")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(source) => {
                self.state = SupervisorState::Crashed;
                tracing::error!(
                    executable = %self.config.executable.display(),
                    error = %source,
                    "failed to spawn solver"
                );
                return Err(SolverError::Spawn {
                    path: self.config.executable.clone(),
                    source,
                });
            }
        };
        let mut stdin = child.stdin.take().expect("solver stdin was piped");
        let stdout = child.stdout.take().expect("solver stdout was piped");
        let stderr = child.stderr.take().expect("solver stderr was piped");

        let startup = protocol::encode_startup(ours, theirs);
        if let Err(source) = stdin
            .write_all(startup.as_bytes())
            .and_then(|()| stdin.flush())
        {
            self.state = SupervisorState::Crashed;
            let _ = child.kill();
            thread::spawn(move || {
                let _ = child.wait();
            });
            return Err(SolverError::Write {
                payload: "startup hands".to_string(),
                source,
            });
        }

        self.run_flag = Arc::new(AtomicBool::new(true));
        let (tx, rx) = mpsc::sync_channel(READER_CHANNEL_BUFFER);
        let flag = Arc::clone(&self.run_flag);
        thread::spawn(move || read_loop(stdout, tx, flag));
        thread::spawn(move || drain_stderr(stderr));

        self.stdin = Some(stdin);
        self.child = Some(child);
        self.state = SupervisorState::Running;
        tracing::info!(
            executable = %self.config.executable.display(),
            "solver started"
        );
        Ok(rx)
    }

    /// Write one move id to the solver's stdin and flush immediately.
    pub fn send_move(&mut self, id: i64) -> Result<(), SolverError> {
        if self.state != SupervisorState::Running {
            return Err(SolverError::NotRunning);
        }
        let stdin = self.stdin.as_mut().ok_or(SolverError::NotRunning)?;
        let payload = protocol::encode_move(id);
        if let Err(source) = stdin
            .write_all(payload.as_bytes())
            .and_then(|()| stdin.flush())
        {
            tracing::error!(move_id = id, error = %source, "solver input pipe failed");
            self.mark_crashed("input pipe failed");
            return Err(SolverError::Write {
                payload: payload.trim().to_string(),
                source,
            });
        }
        tracing::debug!(move_id = id, "move sent to solver");
        Ok(())
    }

    /// Idempotent. Clears the run flag, requests termination, and
    /// returns without waiting for the solver to exit; a wedged solver
    /// cannot block the caller.
    pub fn stop(&mut self) {
        self.run_flag.store(false, Ordering::SeqCst);
        // Dropping stdin closes the pipe, which nudges a solver that is
        // blocked reading a move.
        self.stdin = None;
        if let Some(mut child) = self.child.take() {
            self.state = SupervisorState::Stopping;
            if let Err(e) = child.kill() {
                tracing::debug!(error = %e, "kill request failed; solver may have exited already");
            }
            thread::spawn(move || {
                let _ = child.wait();
            });
        }
        self.state = SupervisorState::Stopped;
    }

    /// Transition into the absorbing failure state, tearing down any
    /// process remnants. Used on pipe failures and on end-of-stream
    /// before a winner.
    pub(crate) fn mark_crashed(&mut self, reason: &str) {
        tracing::error!(reason, "solver crashed");
        self.run_flag.store(false, Ordering::SeqCst);
        self.stdin = None;
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            thread::spawn(move || {
                let _ = child.wait();
            });
        }
        self.state = SupervisorState::Crashed;
    }
}

impl Drop for Supervisor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_loop(stdout: ChildStdout, tx: SyncSender<ReaderNotice>, run_flag: Arc<AtomicBool>) {
    let reader = BufReader::new(stdout);
    for line in reader.lines() {
        if !run_flag.load(Ordering::SeqCst) {
            return;
        }
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = %e, "solver stdout read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match protocol::classify_line(&line) {
            Ok(SolverLine::Event(event)) => {
                if tx.send(ReaderNotice::Event(Box::new(event))).is_err() {
                    // Owner went away; nothing left to deliver to.
                    return;
                }
            }
            Ok(SolverLine::Log(text)) => {
                tracing::info!(target: "solver", "{}", text);
            }
            Err(e) => {
                tracing::warn!(target: "solver", error = %e, "ignoring unparseable event line");
            }
        }
    }
    if run_flag.load(Ordering::SeqCst) {
        let _ = tx.send(ReaderNotice::StreamEnded);
    }
}

// stderr is captured but carries no protocol; it is drained to the log
// so a chatty solver cannot fill the pipe and stall.
fn drain_stderr(stderr: ChildStderr) {
    let reader = BufReader::new(stderr);
    for line in reader.lines() {
        match line {
            Ok(line) => {
                if !line.trim().is_empty() {
                    tracing::debug!(target: "solver", "stderr: {}", line.trim());
                }
            }
            Err(_) => break,
        }
    }
}
