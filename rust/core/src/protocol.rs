//! Line codec for the solver's stdin/stdout protocol.
//!
//! Startup hands go out as space-separated ascending ranks terminated by
//! a literal `0`, one hand per line, self hand first. Moves go out as a
//! bare integer id per line. Every line coming back is either a JSON
//! event object (first character `{`) or a free-text diagnostic.

use crate::cards::Rank;
use crate::errors::ProtocolError;
use crate::hand::{Hand, Party};
use serde::{Deserialize, Serialize};

/// Literal terminator the solver expects after each startup hand line.
pub const HAND_TERMINATOR: &str = "0";

/// Encode one hand as its wire line, without the trailing newline.
pub fn encode_hand(hand: &Hand) -> String {
    let mut parts: Vec<String> = hand
        .ranks()
        .iter()
        .map(|rank| rank.as_u8().to_string())
        .collect();
    parts.push(HAND_TERMINATOR.to_string());
    parts.join(" ")
}

/// The two-line startup block written to the solver before any moves.
pub fn encode_startup(ours: &Hand, theirs: &Hand) -> String {
    format!("{}\n{}\n", encode_hand(ours), encode_hand(theirs))
}

/// A selected move: its id alone, echoed back to the solver verbatim.
pub fn encode_move(id: i64) -> String {
    format!("{}\n", id)
}

/// Parse one startup-format line back into a hand. Tokens after the
/// terminator are ignored, matching what the solver itself does.
pub fn parse_hand_line(line: &str) -> Result<Hand, ProtocolError> {
    let mut ranks = Vec::new();
    for token in line.split_whitespace() {
        if token == HAND_TERMINATOR {
            break;
        }
        let value: u8 = token.parse().map_err(|_| ProtocolError::BadRank {
            token: token.to_string(),
        })?;
        let rank = Rank::from_u8(value).ok_or_else(|| ProtocolError::BadRank {
            token: token.to_string(),
        })?;
        ranks.push(rank);
    }
    Ok(Hand::from_ranks(ranks))
}

/// One engine-offered choice. The id is meaningful only to the solver
/// and must be echoed back unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOption {
    pub id: i64,
    pub desc: String,
    /// Set when the side to move after this option is winning, i.e. the
    /// solver assesses the option as losing for the party that plays it.
    pub win: bool,
}

impl MoveOption {
    /// Whether playing this option is assessed as winning for the mover.
    pub fn favorable(&self) -> bool {
        !self.win
    }
}

/// A decoded event record. Absent fields mean "unchanged" to the state
/// machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolverEvent {
    #[serde(default, rename = "hand_a", skip_serializing_if = "Option::is_none")]
    pub hand_ours: Option<Hand>,
    #[serde(default, rename = "hand_b", skip_serializing_if = "Option::is_none")]
    pub hand_theirs: Option<Hand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<MoveOption>>,
}

/// One classified line of solver stdout.
#[derive(Debug, Clone)]
pub enum SolverLine {
    Event(SolverEvent),
    /// Anything that does not start with `{`: forwarded to diagnostics,
    /// never applied to state.
    Log(String),
}

/// Classify a single output line. Only a brace line that fails to decode
/// is an error, and that error is a non-fatal anomaly to the caller.
pub fn classify_line(line: &str) -> Result<SolverLine, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.starts_with('{') {
        serde_json::from_str::<SolverEvent>(trimmed)
            .map(SolverLine::Event)
            .map_err(|e| ProtocolError::Malformed {
                line: trimmed.to_string(),
                reason: e.to_string(),
            })
    } else {
        Ok(SolverLine::Log(trimmed.to_string()))
    }
}
