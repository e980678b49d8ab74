use coinche_core::game::agent::Agent;
use coinche_core::game::events::GameEvent;
use coinche_core::model::bid::{BiddingEntry, BiddingStep};
use coinche_core::model::card::Card;
use coinche_core::model::player::PlayerPosition;
use std::collections::VecDeque;

/// Replays queued decisions in order. Once a queue runs dry it passes or
/// plays the first legal card. Queued cards are returned as-is, legal or
/// not, which makes it handy for exercising rejections.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    bids: VecDeque<BiddingStep>,
    cards: VecDeque<Card>,
    events_seen: usize,
}

impl ScriptedAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bids<I: IntoIterator<Item = BiddingStep>>(mut self, bids: I) -> Self {
        self.bids.extend(bids);
        self
    }

    pub fn with_cards<I: IntoIterator<Item = Card>>(mut self, cards: I) -> Self {
        self.cards.extend(cards);
        self
    }

    pub fn events_seen(&self) -> usize {
        self.events_seen
    }
}

impl Agent for ScriptedAgent {
    fn propose_bid(&mut self, _seat: PlayerPosition, _history: &[BiddingEntry]) -> BiddingStep {
        self.bids.pop_front().unwrap_or(BiddingStep::Pass)
    }

    fn propose_card(&mut self, _seat: PlayerPosition, legal: &[Card]) -> Card {
        match self.cards.pop_front() {
            Some(card) => card,
            None => legal[0],
        }
    }

    fn on_state_changed(&mut self, _event: &GameEvent) {
        self.events_seen += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::ScriptedAgent;
    use coinche_core::game::agent::Agent;
    use coinche_core::model::bid::{Bid, BiddingStep};
    use coinche_core::model::card::Card;
    use coinche_core::model::player::PlayerPosition;
    use coinche_core::model::rank::Rank;
    use coinche_core::model::suit::{Suit, Trump};

    #[test]
    fn replays_then_falls_back() {
        let bid = BiddingStep::Bid(Bid::contract(PlayerPosition::West, Trump::NoTrump, 90));
        let queued = Card::new(Rank::Ace, Suit::Hearts);
        let legal = [Card::new(Rank::Seven, Suit::Clubs)];
        let mut agent = ScriptedAgent::new().with_bids([bid]).with_cards([queued]);

        assert_eq!(agent.propose_bid(PlayerPosition::West, &[]), bid);
        assert!(agent.propose_bid(PlayerPosition::West, &[]).is_pass());
        assert_eq!(agent.propose_card(PlayerPosition::West, &legal), queued);
        assert_eq!(agent.propose_card(PlayerPosition::West, &legal), legal[0]);
    }
}
