//! # doukit-core: Dou Dizhu Solver Session Controller
//!
//! The session controller behind an interactive front end for a
//! two-player dou dizhu endgame solver. The solver is an external
//! process reached only through its line-delimited protocol; this crate
//! owns its lifecycle, keeps an authoritative view of both hands and
//! turn state in sync with its output, and exposes a non-blocking
//! interface for a presentation layer to drive.
//!
//! ## Core Modules
//!
//! - [`cards`] - Rank representation and deck constants
//! - [`deck`] - Remaining-availability counts over two hands
//! - [`hand`] - Sorted hands, parties, and turn state
//! - [`editor`] - Interactive two-party hand allocation
//! - [`protocol`] - Startup/move encoding and output-line decoding
//! - [`supervisor`] - Solver process lifecycle and the background reader
//! - [`session`] - The state machine driven by decoded solver events
//! - [`persist`] - Startup-file recording and recovery
//! - [`config`] - Supervisor configuration values
//! - [`errors`] - Error types for solver, protocol, and editor failures
//!
//! ## Quick Start
//!
//! ```no_run
//! use doukit_core::config::SolverConfig;
//! use doukit_core::session::{Session, SessionNotice};
//! use std::time::Duration;
//!
//! let mut session = Session::new(SolverConfig::default());
//! session.start().expect("solver launches");
//! loop {
//!     for notice in session.wait(Duration::from_millis(200)) {
//!         match notice {
//!             SessionNotice::State(state) => {
//!                 if let Some(option) = state.options.first() {
//!                     session.select_move(option.id).expect("pipe open");
//!                 }
//!                 if state.is_over() {
//!                     return;
//!                 }
//!             }
//!             SessionNotice::Crashed { reason } => panic!("{reason}"),
//!         }
//!     }
//! }
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod editor;
pub mod errors;
pub mod hand;
pub mod persist;
pub mod protocol;
pub mod session;
pub mod supervisor;
