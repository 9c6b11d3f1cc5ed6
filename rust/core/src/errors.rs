use crate::cards::Rank;
use crate::hand::Party;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the solver process itself or its pipes. Spawn and write
/// failures leave the supervisor in `Crashed`; the caller is expected to
/// surface them and offer a restart.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to launch solver {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to record startup hands to {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("solver input pipe failed while sending {payload:?}: {source}")]
    Write {
        payload: String,
        #[source]
        source: std::io::Error,
    },
    #[error("solver is not running")]
    NotRunning,
}

/// A line that announced itself as a structured event but did not decode,
/// or a startup line with a bad token. Never fatal to a running session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unparseable event line {line:?}: {reason}")]
    Malformed { line: String, reason: String },
    #[error("invalid rank token {token:?} in startup line")]
    BadRank { token: String },
}

/// Editor preconditions. Deck over-allocation is structurally impossible
/// through the editor's operations, so the only reportable failure is
/// removing a card that is not there.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("no {rank} in the {party:?} hand to remove")]
    NotInHand { rank: Rank, party: Party },
}
