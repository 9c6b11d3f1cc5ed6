use crate::cards::Rank;
use crate::hand::Hand;
use crate::protocol::{encode_startup, parse_hand_line};
use std::fs;
use std::io;
use std::path::Path;

/// Fallback pair used when no startup file exists yet: a small endgame
/// position that finishes quickly.
pub fn default_hands() -> (Hand, Hand) {
    let ours = Hand::from_ranks([
        Rank::Three,
        Rank::Three,
        Rank::Three,
        Rank::Four,
        Rank::Four,
        Rank::Four,
        Rank::Five,
        Rank::Five,
        Rank::Six,
        Rank::Six,
    ]);
    let theirs = Hand::from_ranks([Rank::Seven]);
    (ours, theirs)
}

/// Record the startup block verbatim so a later launch can resume with
/// the same starting hands. Written before every session start.
pub fn save_startup(path: &Path, ours: &Hand, theirs: &Hand) -> io::Result<()> {
    fs::write(path, encode_startup(ours, theirs))
}

/// Load the last configured hands, falling back to the defaults when the
/// file is absent or malformed.
pub fn load_startup(path: &Path) -> (Hand, Hand) {
    match try_load(path) {
        Some(hands) => hands,
        None => {
            tracing::debug!(path = %path.display(), "no usable startup file, using default hands");
            default_hands()
        }
    }
}

fn try_load(path: &Path) -> Option<(Hand, Hand)> {
    let text = fs::read_to_string(path).ok()?;
    let mut lines = text.lines();
    let ours = parse_hand_line(lines.next()?).ok()?;
    let theirs = parse_hand_line(lines.next()?).ok()?;
    Some((ours, theirs))
}
