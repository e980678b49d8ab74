use crate::error::RuleError;
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// One trick in progress, together with the hands as they stand after the
/// cards already played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    leader: PlayerPosition,
    plays: Vec<Play>,
    hands: [Hand; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

impl Trick {
    pub fn new(leader: PlayerPosition, hands: [Hand; 4]) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(4),
            hands,
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|play| play.card)
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    /// Seat whose turn it is: the leader advanced by the cards already down.
    pub fn current_position(&self) -> PlayerPosition {
        self.leader + self.plays.len()
    }

    /// Hand of the seat to move, or `None` once all four have played.
    pub fn current_hand(&self) -> Option<&Hand> {
        if self.is_complete() {
            None
        } else {
            Some(self.hand(self.current_position()))
        }
    }

    pub fn card_of(&self, seat: PlayerPosition) -> Option<Card> {
        self.plays
            .iter()
            .find(|play| play.position == seat)
            .map(|play| play.card)
    }

    pub fn position_of(&self, card: Card) -> Option<PlayerPosition> {
        self.plays
            .iter()
            .find(|play| play.card == card)
            .map(|play| play.position)
    }

    /// New trick with `card` played by the current seat. Only checks turn
    /// bookkeeping and ownership; suit/trump legality lives in
    /// [`crate::rules::play::advance_trick`].
    pub fn with_card(&self, card: Card) -> Result<Trick, RuleError> {
        if self.is_complete() {
            return Err(RuleError::TrickComplete);
        }
        let seat = self.current_position();
        if !self.hand(seat).contains(card) {
            return Err(RuleError::CardNotInHand { seat, card });
        }

        let mut next = self.clone();
        next.hands[seat.index()] = self.hand(seat).without(card);
        next.plays.push(Play {
            position: seat,
            card,
        });
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::Trick;
    use crate::error::RuleError;
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::player::PlayerPosition;

    #[test]
    fn plays_follow_turn_order() {
        let hands = Deck::standard().deal();
        let trick = Trick::new(PlayerPosition::East, hands);
        assert_eq!(trick.current_position(), PlayerPosition::East);

        let card = trick.hand(PlayerPosition::East).cards()[0];
        let next = trick.with_card(card).unwrap();
        assert_eq!(next.current_position(), PlayerPosition::South);
        assert_eq!(next.plays()[0].position, PlayerPosition::East);
        assert!(!next.hand(PlayerPosition::East).contains(card));
        assert!(trick.hand(PlayerPosition::East).contains(card));
    }

    #[test]
    fn card_must_come_from_current_hand() {
        let hands = Deck::standard().deal();
        let trick = Trick::new(PlayerPosition::North, hands);
        let foreign: Card = trick.hand(PlayerPosition::West).cards()[0];
        assert!(matches!(
            trick.with_card(foreign),
            Err(RuleError::CardNotInHand { seat: PlayerPosition::North, .. })
        ));
    }

    #[test]
    fn completed_trick_has_no_current_hand() {
        let hands = Deck::standard().deal();
        let mut trick = Trick::new(PlayerPosition::West, hands);
        for _ in 0..4 {
            let card = trick.current_hand().unwrap().cards()[0];
            trick = trick.with_card(card).unwrap();
        }
        assert!(trick.is_complete());
        assert!(trick.current_hand().is_none());
        let any = trick.hand(PlayerPosition::North).cards()[0];
        assert_eq!(trick.with_card(any), Err(RuleError::TrickComplete));
        assert_eq!(
            trick.position_of(trick.plays()[2].card),
            Some(PlayerPosition::East)
        );
    }
}
