//! Terminal formatting for hands, the editing pool, and solver options.
//!
//! Pure functions only; everything here renders to plain ASCII so piped
//! output stays readable.

use doukit_core::cards::{all_ranks, Rank};
use doukit_core::editor::HandEditor;
use doukit_core::hand::{Hand, Turn};
use doukit_core::protocol::MoveOption;

/// Format a hand as its rank labels, ascending, or a placeholder when
/// empty.
pub fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.ranks()
        .iter()
        .map(|r| r.label())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_turn(turn: Turn) -> &'static str {
    match turn {
        Turn::Us => "our move",
        Turn::Opponent => "opponent's move",
        Turn::Unknown => "waiting for the solver",
    }
}

/// One selectable option line: `[id] WIN/LOSS description`.
pub fn format_option(option: &MoveOption) -> String {
    let verdict = if option.favorable() { "WIN " } else { "LOSS" };
    format!("[{:>3}] {} {}", option.id, verdict, option.desc)
}

/// Remaining pool counts for the editor, one `label:count` pair per
/// rank, with exhausted ranks marked by a dash.
pub fn format_pool(editor: &HandEditor) -> String {
    all_ranks()
        .iter()
        .map(|&rank| {
            let left = editor.available(rank);
            if left == 0 {
                format!("{}:-", rank.label())
            } else {
                format!("{}:{}", rank.label(), left)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
