//! Property tests over randomly dealt and randomly played rounds.

use std::collections::HashSet;

use coinche_core::model::bid::{Bid, BiddingStep};
use coinche_core::model::card::Card;
use coinche_core::model::deck::{DECK_SIZE, Deck, HAND_SIZE};
use coinche_core::model::player::PlayerPosition;
use coinche_core::model::round::RoundState;
use coinche_core::model::suit::{Suit, Trump};
use coinche_core::rules::bidding::BiddingRules;
use coinche_core::rules::{play, scoring};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn trump_strategy() -> impl Strategy<Value = Trump> {
    prop_oneof![
        (0usize..4).prop_map(|i| Trump::Suit(Suit::ALL[i])),
        Just(Trump::NoTrump),
    ]
}

fn seat_strategy() -> impl Strategy<Value = PlayerPosition> {
    (0usize..4).prop_map(|i| PlayerPosition::LOOP[i])
}

fn contracted_round(seed: u64, opener: PlayerPosition, trump: Trump) -> RoundState {
    let mut round = RoundState::deal(&Deck::shuffled_with_seed(seed), opener);
    let steps = [
        BiddingStep::Bid(Bid::contract(opener, trump, 80)),
        BiddingStep::Pass,
        BiddingStep::Pass,
        BiddingStep::Pass,
    ];
    for step in steps {
        round = round
            .with_bidding_step(step, BiddingRules::default())
            .expect("valid auction");
    }
    round
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Dealing yields four disjoint eight-card hands covering the deck.
    #[test]
    fn prop_deal_partitions_the_deck(seed in any::<u64>()) {
        let hands = Deck::shuffled_with_seed(seed).deal();
        let mut seen: HashSet<Card> = HashSet::new();
        for hand in &hands {
            prop_assert_eq!(hand.len(), HAND_SIZE);
            for card in hand.iter() {
                prop_assert!(seen.insert(*card), "{} dealt twice", card);
            }
        }
        prop_assert_eq!(seen.len(), DECK_SIZE);
    }

    /// Random legal play: every legal set is a non-empty subset of the hand,
    /// each trick has a single winner and the round always tallies 162.
    #[test]
    fn prop_random_round_keeps_invariants(
        seed in any::<u64>(),
        opener in seat_strategy(),
        trump in trump_strategy(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
        let mut round = contracted_round(seed, opener, trump);

        while !round.is_done() {
            round = round.with_new_trick().expect("trick opens");
            for _ in 0..4 {
                let trick = round.current_trick().expect("open trick");
                let hand = trick.current_hand().expect("seat to move").clone();
                let legal = play::legal_cards(trick, trump).expect("legal cards");
                prop_assert!(!legal.is_empty());
                prop_assert!(legal.iter().all(|card| hand.contains(*card)));

                let card = *legal.choose(&mut rng).expect("non-empty");
                round = round.play_card(card).expect("legal card accepted");
            }

            let trick = round.current_trick().expect("complete trick");
            let winning = play::winning_card(trick, trump).expect("winner");
            let holders = trick.plays().iter().filter(|p| p.card == winning).count();
            prop_assert_eq!(holders, 1);

            round = round.settle_trick().expect("settles").0;
        }

        prop_assert_eq!(round.points().total(), scoring::DECK_POINTS);
        let first = scoring::round_score(&round).expect("scored");
        let second = scoring::round_score(&round).expect("scored");
        prop_assert_eq!(first, second);
        prop_assert!(first.total() > 0);
    }
}
