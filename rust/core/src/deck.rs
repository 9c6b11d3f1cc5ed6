use crate::cards::{all_ranks, Rank, RANK_COUNT};
use crate::hand::Hand;

/// Remaining availability per rank given the cards already allocated to
/// the two hands. A pure value computed from scratch on demand; it holds
/// no reference to the hands it was derived from.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeckCounts {
    counts: [u8; RANK_COUNT],
}

impl DeckCounts {
    /// Counts of an untouched 54-card deck.
    pub fn full() -> Self {
        let mut counts = [0u8; RANK_COUNT];
        for rank in all_ranks() {
            counts[rank.index()] = rank.capacity();
        }
        DeckCounts { counts }
    }

    /// Full-deck counts minus every card held across both hands.
    pub fn remaining(ours: &Hand, theirs: &Hand) -> Self {
        let mut deck = Self::full();
        for &rank in ours.ranks().iter().chain(theirs.ranks()) {
            debug_assert!(deck.counts[rank.index()] > 0, "deck over-allocated");
            deck.counts[rank.index()] = deck.counts[rank.index()].saturating_sub(1);
        }
        deck
    }

    pub fn available(&self, rank: Rank) -> u8 {
        self.counts[rank.index()]
    }

    pub fn is_available(&self, rank: Rank) -> bool {
        self.available(rank) > 0
    }
}
