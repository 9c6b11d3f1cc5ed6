use crate::cards::Rank;
use crate::deck::DeckCounts;
use crate::errors::EditorError;
use crate::hand::{Hand, Party};

/// Interactive allocator for the two starting hands. Works on value
/// copies independent of any running session, so edits can be thrown
/// away by dropping the editor; `commit` hands back the final pair.
///
/// Availability is global: a rank is addable only while the combined
/// count across both working hands is below its deck capacity, which
/// makes over-allocation unreachable through this interface.
#[derive(Debug, Clone, Default)]
pub struct HandEditor {
    ours: Hand,
    theirs: Hand,
}

impl HandEditor {
    pub fn new(ours: Hand, theirs: Hand) -> Self {
        HandEditor { ours, theirs }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Add one card of `rank` to `target`. A no-op returning `false`
    /// when no copies are left in the combined pool; otherwise the card
    /// is inserted in sorted position.
    pub fn add_card(&mut self, rank: Rank, target: Party) -> bool {
        if !DeckCounts::remaining(&self.ours, &self.theirs).is_available(rank) {
            return false;
        }
        self.hand_mut(target).insert(rank);
        true
    }

    /// Remove exactly one occurrence of `rank` from `party`. A correctly
    /// rendered front end only offers removal of cards that are present,
    /// so the error is a precondition violation rather than user input
    /// to tolerate.
    pub fn remove_card(&mut self, rank: Rank, party: Party) -> Result<(), EditorError> {
        if self.hand_mut(party).remove(rank) {
            Ok(())
        } else {
            Err(EditorError::NotInHand { rank, party })
        }
    }

    pub fn clear(&mut self) {
        self.ours.clear();
        self.theirs.clear();
    }

    pub fn hand(&self, party: Party) -> &Hand {
        match party {
            Party::Us => &self.ours,
            Party::Opponent => &self.theirs,
        }
    }

    /// Copies of `rank` still available to either hand. Front ends use
    /// this to disable exhausted pool entries.
    pub fn available(&self, rank: Rank) -> u8 {
        DeckCounts::remaining(&self.ours, &self.theirs).available(rank)
    }

    /// The final pair as independent values, self hand first.
    pub fn commit(&self) -> (Hand, Hand) {
        (self.ours.clone(), self.theirs.clone())
    }

    fn hand_mut(&mut self, party: Party) -> &mut Hand {
        match party {
            Party::Us => &mut self.ours,
            Party::Opponent => &mut self.theirs,
        }
    }
}
