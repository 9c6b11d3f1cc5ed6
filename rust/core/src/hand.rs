use crate::cards::Rank;
use serde::{Deserialize, Deserializer, Serialize};

/// One party's held cards: a multiset of ranks kept sorted ascending at
/// all times. Serialized on the wire as a plain array of rank values.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Hand(Vec<Rank>);

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ranks<I: IntoIterator<Item = Rank>>(ranks: I) -> Self {
        let mut cards: Vec<Rank> = ranks.into_iter().collect();
        cards.sort();
        Hand(cards)
    }

    /// Insert one card, preserving ascending order.
    pub fn insert(&mut self, rank: Rank) {
        let at = self.0.partition_point(|&r| r <= rank);
        self.0.insert(at, rank);
    }

    /// Remove exactly one occurrence of `rank`. Returns whether a card
    /// was actually removed.
    pub fn remove(&mut self, rank: Rank) -> bool {
        match self.0.iter().position(|&r| r == rank) {
            Some(at) => {
                self.0.remove(at);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, rank: Rank) -> usize {
        self.0.iter().filter(|&&r| r == rank).count()
    }

    pub fn ranks(&self) -> &[Rank] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

// Incoming arrays are re-sorted rather than trusted, so a hand is sorted
// no matter where it came from.
impl<'de> Deserialize<'de> for Hand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ranks = Vec::<Rank>::deserialize(deserializer)?;
        Ok(Hand::from_ranks(ranks))
    }
}

impl FromIterator<Rank> for Hand {
    fn from_iter<I: IntoIterator<Item = Rank>>(iter: I) -> Self {
        Hand::from_ranks(iter)
    }
}

/// The two participants. `Us` is the hand the front end plays for, the
/// solver calls it `"A"`; the opponent is `"B"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Party {
    #[serde(rename = "A")]
    Us,
    #[serde(rename = "B")]
    Opponent,
}

impl Party {
    pub fn other(self) -> Party {
        match self {
            Party::Us => Party::Opponent,
            Party::Opponent => Party::Us,
        }
    }
}

/// Whose move it is. `Unknown` is the state before the solver has said
/// anything, distinct from either party so the presentation layer can
/// tell "no turn info yet" apart from an actual turn.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Turn {
    Us,
    Opponent,
    #[default]
    Unknown,
}

impl Turn {
    pub fn party(self) -> Option<Party> {
        match self {
            Turn::Us => Some(Party::Us),
            Turn::Opponent => Some(Party::Opponent),
            Turn::Unknown => None,
        }
    }
}

impl From<Party> for Turn {
    fn from(party: Party) -> Self {
        match party {
            Party::Us => Turn::Us,
            Party::Opponent => Turn::Opponent,
        }
    }
}
