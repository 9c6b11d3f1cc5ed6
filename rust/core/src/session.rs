//! The authoritative turn/winner/options state and the controller that
//! owns it.
//!
//! Decoded events arrive from the reader thread over the supervisor's
//! bounded channel; they are applied here, on the caller's context, and
//! only whole-event snapshots are handed out. The presentation layer
//! never sees a live reference into the state and never observes a
//! half-applied event.

use crate::config::SolverConfig;
use crate::errors::SolverError;
use crate::hand::{Hand, Party, Turn};
use crate::persist;
use crate::protocol::{MoveOption, SolverEvent};
use crate::supervisor::{ReaderNotice, Supervisor, SupervisorState};
use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// Snapshot of the in-memory game view. Hands are replaced wholesale by
/// engine-reported updates; `options` is what the solver currently
/// offers, empty once a winner is declared.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub hand_ours: Hand,
    pub hand_theirs: Hand,
    pub turn: Turn,
    pub winner: Option<Party>,
    pub options: Vec<MoveOption>,
}

impl SessionState {
    pub fn with_hands(ours: Hand, theirs: Hand) -> Self {
        SessionState {
            hand_ours: ours,
            hand_theirs: theirs,
            ..Default::default()
        }
    }

    /// Terminal once a winner is set; no further options are meaningful.
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Apply one decoded event. Fields absent from the event are left
    /// unchanged. Setting a winner clears any previously offered options
    /// in the same update, and the winner is sticky: options arriving in
    /// later events are ignored.
    pub fn apply(&mut self, event: &SolverEvent) {
        if let Some(hand) = &event.hand_ours {
            self.hand_ours = hand.clone();
        }
        if let Some(hand) = &event.hand_theirs {
            self.hand_theirs = hand.clone();
        }
        if let Some(turn) = event.turn {
            self.turn = turn.into();
        }
        if let Some(winner) = event.winner {
            self.winner = Some(winner);
        }
        if self.winner.is_some() {
            self.options.clear();
        } else if let Some(options) = &event.options {
            self.options = options.clone();
        }
    }
}

/// What the session owner reports to the presentation layer after
/// draining the reader channel.
#[derive(Debug, Clone)]
pub enum SessionNotice {
    /// A fresh snapshot, published only after the whole event applied.
    State(SessionState),
    /// The solver went away before declaring a winner.
    Crashed { reason: String },
}

/// The session controller: owns the supervisor and the state, and is the
/// sole mutator of that state.
#[derive(Debug)]
pub struct Session {
    supervisor: Supervisor,
    state: SessionState,
    notices: Option<Receiver<ReaderNotice>>,
}

impl Session {
    /// Create a session with the hands recorded in the startup file, or
    /// the default pair when the file is absent or malformed.
    pub fn new(config: SolverConfig) -> Self {
        let (ours, theirs) = persist::load_startup(&config.startup_file);
        Self::with_hands(config, ours, theirs)
    }

    pub fn with_hands(config: SolverConfig, ours: Hand, theirs: Hand) -> Self {
        Session {
            supervisor: Supervisor::new(config),
            state: SessionState::with_hands(ours, theirs),
            notices: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Immutable copy for cross-thread hand-off.
    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn supervisor_state(&self) -> SupervisorState {
        self.supervisor.state()
    }

    /// Replace the starting hands, typically with an editor's committed
    /// pair. Resets turn, winner, and options; takes effect at the next
    /// `start`.
    pub fn set_hands(&mut self, ours: Hand, theirs: Hand) {
        self.state = SessionState::with_hands(ours, theirs);
    }

    /// Start (or restart) the solver on the current hands.
    pub fn start(&mut self) -> Result<(), SolverError> {
        self.notices = None;
        let rx = self
            .supervisor
            .start(&self.state.hand_ours, &self.state.hand_theirs)?;
        self.state.turn = Turn::Unknown;
        self.state.winner = None;
        self.state.options.clear();
        self.notices = Some(rx);
        Ok(())
    }

    /// Relay a selected option id to the solver, unmodified.
    pub fn select_move(&mut self, id: i64) -> Result<(), SolverError> {
        self.supervisor.send_move(id)
    }

    /// Drain everything the reader has delivered without blocking.
    pub fn poll(&mut self) -> Vec<SessionNotice> {
        self.wait(Duration::ZERO)
    }

    /// Block up to `timeout` for the first reader message, then drain
    /// whatever else is already queued.
    pub fn wait(&mut self, timeout: Duration) -> Vec<SessionNotice> {
        let mut out = Vec::new();
        let Some(rx) = self.notices.take() else {
            return out;
        };
        let mut keep = true;
        match rx.recv_timeout(timeout) {
            Ok(notice) => keep = self.handle_notice(notice, &mut out),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => keep = false,
        }
        while keep {
            match rx.try_recv() {
                Ok(notice) => keep = self.handle_notice(notice, &mut out),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => keep = false,
            }
        }
        if keep {
            self.notices = Some(rx);
        }
        out
    }

    /// Tear the session down. Idempotent, like the supervisor's `stop`.
    pub fn stop(&mut self) {
        self.notices = None;
        self.supervisor.stop();
    }

    // Returns whether the channel is still worth listening to.
    fn handle_notice(&mut self, notice: ReaderNotice, out: &mut Vec<SessionNotice>) -> bool {
        match notice {
            ReaderNotice::Event(event) => {
                self.state.apply(&event);
                out.push(SessionNotice::State(self.state.clone()));
                true
            }
            ReaderNotice::StreamEnded => {
                if self.state.winner.is_none()
                    && self.supervisor.state() == SupervisorState::Running
                {
                    let reason = "solver output ended before a winner was declared".to_string();
                    self.supervisor.mark_crashed(&reason);
                    out.push(SessionNotice::Crashed { reason });
                } else {
                    self.supervisor.stop();
                }
                false
            }
        }
    }
}
