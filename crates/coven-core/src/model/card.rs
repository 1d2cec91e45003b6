use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A playing card. Trump carries no suit or rank; every trump copy is
/// interchangeable and outranks every suited card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Trump,
    Suited { suit: Suit, rank: Rank },
}

impl Card {
    pub const fn suited(suit: Suit, rank: Rank) -> Self {
        Card::Suited { suit, rank }
    }

    pub const fn is_trump(self) -> bool {
        matches!(self, Card::Trump)
    }

    pub const fn suit(self) -> Option<Suit> {
        match self {
            Card::Trump => None,
            Card::Suited { suit, .. } => Some(suit),
        }
    }

    pub const fn rank(self) -> Option<Rank> {
        match self {
            Card::Trump => None,
            Card::Suited { rank, .. } => Some(rank),
        }
    }

    /// Whether this card beats `other` in a trick led with `lead_suit`.
    /// Trump beats everything non-trump; among suited cards only the
    /// lead suit competes, higher rank winning. Equal trumps never beat
    /// each other, so the earlier play stands.
    pub fn beats(self, other: Card, lead_suit: Option<Suit>) -> bool {
        match (self, other) {
            (Card::Trump, Card::Trump) => false,
            (Card::Trump, Card::Suited { .. }) => true,
            (Card::Suited { .. }, Card::Trump) => false,
            (
                Card::Suited { suit: a, rank: ra },
                Card::Suited { suit: b, rank: rb },
            ) => match lead_suit {
                Some(lead) => a == lead && (b != lead || ra > rb),
                None => false,
            },
        }
    }

    /// Sort key used for hand display: suits grouped, trump last.
    pub fn sort_key(self) -> (u8, u8) {
        match self {
            Card::Suited { suit, rank } => (suit as u8, rank.value()),
            Card::Trump => (4, 0),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Trump => f.write_str("T"),
            Card::Suited { suit, rank } => write!(f, "{}{}", suit.letter(), rank),
        }
    }
}
