//! Parsing of interactive user input.

use doukit_core::cards::Rank;

/// Parse a rank the way a user types it: the wire number (3..=17) or the
/// card label (j/q/k/a, 2, sj/bj). Case-insensitive.
pub fn parse_rank(token: &str) -> Option<Rank> {
    match token.to_ascii_lowercase().as_str() {
        "j" => Some(Rank::Jack),
        "q" => Some(Rank::Queen),
        "k" => Some(Rank::King),
        "a" => Some(Rank::Ace),
        // The card named "2" ranks above the ace; 15 is its wire value.
        "2" => Some(Rank::Two),
        "sj" => Some(Rank::SmallJoker),
        "bj" => Some(Rank::BigJoker),
        other => other.parse::<u8>().ok().and_then(Rank::from_u8),
    }
}

/// One parsed selection from the play prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Selection {
    Quit,
    Move(i64),
    Invalid,
}

pub fn parse_selection(line: &str) -> Selection {
    match line {
        "q" | "quit" => Selection::Quit,
        other => match other.parse::<i64>() {
            Ok(id) => Selection::Move(id),
            Err(_) => Selection::Invalid,
        },
    }
}
