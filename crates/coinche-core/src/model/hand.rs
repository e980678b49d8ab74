use crate::model::card::Card;
use crate::model::suit::{Suit, Trump};
use serde::{Deserialize, Serialize};
use std::vec::Vec;

/// A player's cards. Stored sorted by suit then rank; never holds the same
/// card twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self::new();
        for card in cards {
            hand.add(card);
        }
        hand
    }

    pub fn add(&mut self, card: Card) {
        if !self.contains(card) {
            self.cards.push(card);
            self.sort();
        }
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    /// Copy of the hand with `card` taken out.
    pub fn without(&self, card: Card) -> Hand {
        let mut next = self.clone();
        next.remove(card);
        next
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
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

    pub fn of_suit(&self, suit: Suit) -> Vec<Card> {
        self.cards.iter().copied().filter(|c| c.suit == suit).collect()
    }

    pub fn trumps(&self, trump: Trump) -> Vec<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|c| c.is_trump(trump))
            .collect()
    }

    fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank)));
    }
}

#[cfg(test)]
mod tests {
    use super::Hand;
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::{Suit, Trump};

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = Card::new(Rank::Eight, Suit::Clubs);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
    }

    #[test]
    fn duplicates_are_ignored() {
        let card = Card::new(Rank::Ace, Suit::Hearts);
        let hand = Hand::with_cards(vec![card, card]);
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn without_leaves_original_untouched() {
        let card = Card::new(Rank::King, Suit::Spades);
        let hand = Hand::with_cards(vec![card, Card::new(Rank::Seven, Suit::Clubs)]);
        let smaller = hand.without(card);
        assert_eq!(smaller.len(), 1);
        assert!(hand.contains(card));
    }

    #[test]
    fn cards_are_sorted_by_suit_then_rank() {
        let mut hand = Hand::new();
        hand.add(Card::new(Rank::King, Suit::Spades));
        hand.add(Card::new(Rank::Seven, Suit::Clubs));
        hand.add(Card::new(Rank::Ace, Suit::Clubs));
        let ordered: Vec<_> = hand.iter().copied().collect();
        assert_eq!(ordered[0], Card::new(Rank::Seven, Suit::Clubs));
        assert_eq!(ordered[1], Card::new(Rank::Ace, Suit::Clubs));
        assert_eq!(ordered[2], Card::new(Rank::King, Suit::Spades));
    }

    #[test]
    fn trumps_filter_by_declared_suit() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Jack, Suit::Hearts),
            Card::new(Rank::Nine, Suit::Hearts),
            Card::new(Rank::Ace, Suit::Clubs),
        ]);
        assert_eq!(hand.trumps(Trump::Suit(Suit::Hearts)).len(), 2);
        assert!(hand.trumps(Trump::NoTrump).is_empty());
        assert_eq!(hand.of_suit(Suit::Clubs).len(), 1);
    }
}
