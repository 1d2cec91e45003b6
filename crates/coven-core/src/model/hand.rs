use crate::model::card::Card;

/// A seat's current cards, kept sorted for stable display and iteration.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// How many copies of `card` are held. The deck carries duplicates,
    /// so membership alone is not enough when validating multi-card picks.
    pub fn count(&self, card: Card) -> usize {
        self.cards.iter().filter(|&&c| c == card).count()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn sort(&mut self) {
        self.cards.sort_by_key(|c| c.sort_key());
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn suited(suit: Suit, rank: u8) -> Card {
        Card::suited(suit, Rank::new(rank).unwrap())
    }

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = suited(Suit::Club, 3);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
    }

    #[test]
    fn duplicates_are_counted_and_removed_one_at_a_time() {
        let card = suited(Suit::Heart, 9);
        let mut hand = Hand::with_cards(vec![card, card]);
        assert_eq!(hand.count(card), 2);
        assert!(hand.remove(card));
        assert_eq!(hand.count(card), 1);
    }

    #[test]
    fn cards_sort_with_trump_last() {
        let hand = Hand::with_cards(vec![
            Card::Trump,
            suited(Suit::Club, 2),
            suited(Suit::Spade, 13),
        ]);
        assert_eq!(hand.cards()[0], suited(Suit::Spade, 13));
        assert_eq!(hand.cards()[2], Card::Trump);
    }
}
