use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;
use serde::Serialize;
use std::fmt;

/// One trick in progress: an ordered list of plays starting at the leader.
#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn { expected: Seat, actual: Seat },
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl Trick {
    pub fn new(leader: Seat) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    /// The suit to follow. A trump lead imposes no follow obligation.
    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().and_then(|play| play.card.suit())
    }

    pub fn lead_card(&self) -> Option<Card> {
        self.plays.first().map(|play| play.card)
    }

    pub fn expected_seat(&self) -> Seat {
        self.plays
            .last()
            .map(|play| play.seat.next())
            .unwrap_or(self.leader)
    }

    pub fn play(&mut self, seat: Seat, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }
        let expected = self.expected_seat();
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// Winner of a complete trick. Any trump beats every suited card and
    /// the earliest trump played stands; otherwise the highest rank of
    /// the lead suit wins. A trump lead with no later trump therefore
    /// stays with the leader.
    pub fn winner(&self) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        let lead_suit = self.lead_suit();
        let mut best = self.plays.first()?;
        for play in &self.plays[1..] {
            if play.card.beats(best.card, lead_suit) {
                best = play;
            }
        }
        Some(best.seat)
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;

    fn suited(suit: Suit, rank: u8) -> Card {
        Card::suited(suit, Rank::new(rank).unwrap())
    }

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::new(Seat::North);
        assert!(trick.play(Seat::North, suited(Suit::Club, 2)).is_ok());
        assert!(matches!(
            trick.play(Seat::South, suited(Suit::Club, 3)),
            Err(TrickError::OutOfTurn { .. })
        ));
    }

    #[test]
    fn winner_is_highest_card_of_lead_suit() {
        let mut trick = Trick::new(Seat::North);
        trick.play(Seat::North, suited(Suit::Club, 10)).unwrap();
        trick.play(Seat::East, suited(Suit::Club, 12)).unwrap();
        trick.play(Seat::South, suited(Suit::Club, 4)).unwrap();
        trick.play(Seat::West, suited(Suit::Spade, 13)).unwrap();
        assert_eq!(trick.winner(), Some(Seat::East));
    }

    #[test]
    fn any_trump_beats_lead_suit() {
        let mut trick = Trick::new(Seat::North);
        trick.play(Seat::North, suited(Suit::Heart, 13)).unwrap();
        trick.play(Seat::East, suited(Suit::Heart, 5)).unwrap();
        trick.play(Seat::South, Card::Trump).unwrap();
        trick.play(Seat::West, suited(Suit::Heart, 12)).unwrap();
        assert_eq!(trick.winner(), Some(Seat::South));
    }

    #[test]
    fn earliest_trump_wins_among_several() {
        let mut trick = Trick::new(Seat::North);
        trick.play(Seat::North, suited(Suit::Diamond, 8)).unwrap();
        trick.play(Seat::East, Card::Trump).unwrap();
        trick.play(Seat::South, Card::Trump).unwrap();
        trick.play(Seat::West, suited(Suit::Diamond, 13)).unwrap();
        assert_eq!(trick.winner(), Some(Seat::East));
    }

    #[test]
    fn trump_lead_stays_with_leader_when_unchallenged() {
        let mut trick = Trick::new(Seat::West);
        trick.play(Seat::West, Card::Trump).unwrap();
        trick.play(Seat::North, suited(Suit::Spade, 13)).unwrap();
        trick.play(Seat::East, suited(Suit::Heart, 13)).unwrap();
        trick.play(Seat::South, suited(Suit::Club, 13)).unwrap();
        assert_eq!(trick.winner(), Some(Seat::West));
    }

    #[test]
    fn incomplete_trick_has_no_winner() {
        let mut trick = Trick::new(Seat::North);
        trick.play(Seat::North, suited(Suit::Club, 2)).unwrap();
        assert_eq!(trick.winner(), None);
    }
}
