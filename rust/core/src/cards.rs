use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of distinct ranks in a dou dizhu deck (3 through big joker).
pub const RANK_COUNT: usize = 15;

/// Total cards in a full deck: four of each rank 3..=2 plus the two jokers.
pub const DECK_SIZE: usize = 54;

/// Represents the rank of a dou dizhu card. The discriminants match the
/// solver's wire encoding: 3..=10 are the literal ranks, then J, Q, K, A,
/// the rank 2, and the two jokers. Ordering is numeric ascending, so the
/// jokers sort highest.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rank {
    Three = 3,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
    /// The rank 2 (15), highest non-joker card
    Two,
    /// Small joker (16)
    SmallJoker,
    /// Big joker (17)
    BigJoker,
}

impl Rank {
    pub fn from_u8(v: u8) -> Option<Rank> {
        match v {
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            15 => Some(Rank::Two),
            16 => Some(Rank::SmallJoker),
            17 => Some(Rank::BigJoker),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Position of this rank in count tables indexed 0..RANK_COUNT.
    pub fn index(self) -> usize {
        self.as_u8() as usize - 3
    }

    /// Copies of this rank present in a full deck: four for 3 through 2,
    /// one for each joker.
    pub fn capacity(self) -> u8 {
        match self {
            Rank::SmallJoker | Rank::BigJoker => 1,
            _ => 4,
        }
    }

    pub fn is_joker(self) -> bool {
        matches!(self, Rank::SmallJoker | Rank::BigJoker)
    }

    /// Short display label: literal digits for 3..=10, letters for the
    /// court cards and the 2, SJ/BJ for the jokers.
    pub fn label(self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::SmallJoker => "SJ",
            Rank::BigJoker => "BJ",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Rank::from_u8(v).ok_or_else(|| format!("rank {} outside 3..=17", v))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.as_u8()
    }
}

pub fn all_ranks() -> [Rank; RANK_COUNT] {
    [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
        Rank::SmallJoker,
        Rank::BigJoker,
    ]
}
