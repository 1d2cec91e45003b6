use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// The round deck: a configured number of copies of every suit/rank
/// combination plus a fixed count of trump cards. Rebuilt and reshuffled
/// from scratch every round.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn build(copies: u8, trump_count: u8) -> Self {
        let mut cards = Vec::with_capacity(copies as usize * 52 + trump_count as usize);
        for _ in 0..copies {
            for suit in Suit::ALL.iter().copied() {
                for rank in Rank::all() {
                    cards.push(Card::suited(suit, rank));
                }
            }
        }
        for _ in 0..trump_count {
            cards.push(Card::Trump);
        }
        Self { cards }
    }

    pub fn shuffled_with_seed(copies: u8, trump_count: u8, seed: u64) -> Self {
        let mut deck = Self::build(copies, trump_count);
        let mut rng = StdRng::seed_from_u64(seed);
        deck.cards.shuffle(&mut rng);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Deal `hand_size` cards to each of the four seats from the top.
    /// The undealt remainder stays in the deck as the round's draw pile.
    pub fn deal(&mut self, hand_size: usize) -> [Vec<Card>; 4] {
        let mut hands: [Vec<Card>; 4] = Default::default();
        for _ in 0..hand_size {
            for hand in hands.iter_mut() {
                if let Some(card) = self.cards.pop() {
                    hand.push(card);
                }
            }
        }
        hands
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }
}
