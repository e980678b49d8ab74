use super::{BotParams, count_cards_in_suit};
use coinche_core::model::bid::{Bid, BidKind, BiddingEntry, BiddingStep, CoincheStatus};
use coinche_core::model::card::Card;
use coinche_core::model::hand::Hand;
use coinche_core::model::player::PlayerPosition;
use coinche_core::model::rank::Rank;
use coinche_core::model::suit::{Suit, Trump};
use coinche_core::rules::bidding;

/// Picks a bidding step from the hand alone.
pub struct BidPlanner;

impl BidPlanner {
    pub fn choose(
        seat: PlayerPosition,
        hand: &Hand,
        history: &[BiddingEntry],
        params: &BotParams,
    ) -> BiddingStep {
        let standing = bidding::standing_bid(history);
        let (trump, estimate) = best_trump(hand, params);

        match standing {
            None => Self::open(seat, trump, estimate, params),
            Some(standing) if standing.position.team() == seat.team() => {
                Self::support(standing, hand, params)
            }
            Some(standing) => Self::contest(seat, standing, trump, estimate, hand, params),
        }
    }

    fn open(seat: PlayerPosition, trump: Trump, estimate: u32, params: &BotParams) -> BiddingStep {
        match contract_for(estimate, params) {
            Some(kind) => BiddingStep::Bid(Bid::new(seat, trump, kind)),
            None => BiddingStep::Pass,
        }
    }

    /// Partner holds the contract: surcoinche if the opponents doubled a
    /// contract this hand makes comfortably, else stay quiet.
    fn support(standing: &Bid, hand: &Hand, params: &BotParams) -> BiddingStep {
        if standing.coinche != CoincheStatus::Coinche {
            return BiddingStep::Pass;
        }
        let BidKind::Contract(target) = standing.kind else {
            return BiddingStep::Pass;
        };
        let estimate = estimate_points(hand, standing.trump, params) + params.partner_allowance;
        if estimate >= target + params.surcoinche_margin {
            BiddingStep::Bid(standing.with_coinche(CoincheStatus::Surcoinche))
        } else {
            BiddingStep::Pass
        }
    }

    fn contest(
        seat: PlayerPosition,
        standing: &Bid,
        trump: Trump,
        estimate: u32,
        hand: &Hand,
        params: &BotParams,
    ) -> BiddingStep {
        if standing.coinche != CoincheStatus::None {
            return BiddingStep::Pass;
        }

        if let Some(kind) = contract_for(estimate, params) {
            if outranks(kind, standing.kind) {
                return BiddingStep::Bid(Bid::new(seat, trump, kind));
            }
        }

        if defensive_strength(hand, standing.trump) >= params.coinche_threshold {
            return BiddingStep::Bid(standing.with_coinche(CoincheStatus::Coinche));
        }
        BiddingStep::Pass
    }
}

/// Rough trick points this hand brings with `trump`, before any help from
/// partner.
pub fn estimate_points(hand: &Hand, trump: Trump, params: &BotParams) -> u32 {
    let mut points = 0;
    for suit in Suit::ALL {
        let held: Vec<Card> = hand.of_suit(suit);
        if trump.is_trump(suit) {
            points += held.iter().map(|card| card.points(trump)).sum::<u32>();
            let extra = held.len().saturating_sub(3) as u32;
            points += extra * params.trump_length_bonus;
            let has = |rank: Rank| held.iter().any(|card| card.rank == rank);
            if has(Rank::Queen) && has(Rank::King) {
                points += 20;
            }
        } else {
            points += side_suit_points(&held, trump);
        }
    }
    points
}

/// Aces count, and a ten counts when its ace is held too.
fn side_suit_points(held: &[Card], trump: Trump) -> u32 {
    let ace = held.iter().find(|card| card.rank == Rank::Ace);
    let ten = held.iter().find(|card| card.rank == Rank::Ten);
    match (ace, ten) {
        (Some(ace), Some(ten)) => ace.points(trump) + ten.points(trump),
        (Some(ace), None) => ace.points(trump),
        _ => 0,
    }
}

/// How well this hand defends against a contract in `trump`.
fn defensive_strength(hand: &Hand, trump: Trump) -> u32 {
    let mut strength = 0;
    for card in hand.iter() {
        if card.is_trump(trump) && matches!(card.rank, Rank::Jack | Rank::Nine | Rank::Ace) {
            strength += card.points(trump);
        } else if !card.is_trump(trump) && card.rank == Rank::Ace {
            strength += card.points(trump);
        }
    }
    if let Some(suit) = trump.suit() {
        if count_cards_in_suit(hand, suit) >= 3 {
            strength += 10;
        }
    }
    strength
}

fn best_trump(hand: &Hand, params: &BotParams) -> (Trump, u32) {
    let mut best = (Trump::NoTrump, estimate_points(hand, Trump::NoTrump, params));
    for suit in Suit::ALL {
        let trump = Trump::Suit(suit);
        let estimate = estimate_points(hand, trump, params);
        if estimate > best.1 {
            best = (trump, estimate);
        }
    }
    best
}

fn contract_for(estimate: u32, params: &BotParams) -> Option<BidKind> {
    let total = estimate + params.partner_allowance;
    if total >= params.capot_threshold {
        return Some(BidKind::Capot);
    }
    let step = bidding::CONTRACT_STEP;
    let ceiling = params.max_contract.min(bidding::MAX_CONTRACT) / step * step;
    let rounded = (total / step * step).min(ceiling);
    (rounded >= params.min_contract.max(bidding::MIN_CONTRACT))
        .then_some(BidKind::Contract(rounded))
}

fn outranks(kind: BidKind, standing: BidKind) -> bool {
    match (kind, standing) {
        (BidKind::Contract(ours), BidKind::Contract(theirs)) => ours > theirs,
        (BidKind::Capot, BidKind::Contract(_)) => true,
        (BidKind::Generale, BidKind::Contract(_) | BidKind::Capot) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(cards: &[(Rank, Suit)]) -> Hand {
        Hand::with_cards(cards.iter().map(|&(r, s)| Card::new(r, s)).collect())
    }

    fn entry(seat: PlayerPosition, step: BiddingStep) -> BiddingEntry {
        BiddingEntry::new(seat, step)
    }

    fn strong_spades() -> Hand {
        hand(&[
            (Rank::Jack, Suit::Spades),
            (Rank::Nine, Suit::Spades),
            (Rank::Ace, Suit::Spades),
            (Rank::Ten, Suit::Spades),
            (Rank::Seven, Suit::Spades),
            (Rank::Ace, Suit::Hearts),
            (Rank::Eight, Suit::Clubs),
            (Rank::Seven, Suit::Diamonds),
        ])
    }

    fn weak() -> Hand {
        hand(&[
            (Rank::Seven, Suit::Spades),
            (Rank::Eight, Suit::Spades),
            (Rank::Seven, Suit::Hearts),
            (Rank::Eight, Suit::Hearts),
            (Rank::Seven, Suit::Clubs),
            (Rank::Eight, Suit::Clubs),
            (Rank::Seven, Suit::Diamonds),
            (Rank::Queen, Suit::Diamonds),
        ])
    }

    #[test]
    fn strong_trump_hand_opens_in_that_suit() {
        let params = BotParams::default();
        let step = BidPlanner::choose(PlayerPosition::South, &strong_spades(), &[], &params);
        let bid = step.bid().copied().expect("opens");
        assert_eq!(bid.trump, Trump::Suit(Suit::Spades));
        assert_eq!(bid.position, PlayerPosition::South);
        assert!(matches!(bid.kind, BidKind::Contract(points) if points >= 80));
    }

    #[test]
    fn weak_hand_passes() {
        let params = BotParams::default();
        let step = BidPlanner::choose(PlayerPosition::North, &weak(), &[], &params);
        assert!(step.is_pass());
    }

    #[test]
    fn partner_contract_is_left_alone() {
        let params = BotParams::default();
        let history = [
            entry(
                PlayerPosition::North,
                BiddingStep::Bid(Bid::contract(PlayerPosition::North, Trump::Suit(Suit::Clubs), 80)),
            ),
            entry(PlayerPosition::East, BiddingStep::Pass),
        ];
        let step = BidPlanner::choose(PlayerPosition::South, &strong_spades(), &history, &params);
        assert!(step.is_pass());
    }

    #[test]
    fn strong_defence_coinches_high_opposing_contract() {
        let params = BotParams::default();
        let standing = Bid::contract(PlayerPosition::North, Trump::Suit(Suit::Spades), 160);
        let history = [entry(PlayerPosition::North, BiddingStep::Bid(standing))];
        let step = BidPlanner::choose(PlayerPosition::East, &strong_spades(), &history, &params);
        assert_eq!(
            step,
            BiddingStep::Bid(standing.with_coinche(CoincheStatus::Coinche))
        );
    }

    #[test]
    fn overbid_only_when_it_outranks() {
        assert!(outranks(BidKind::Contract(100), BidKind::Contract(90)));
        assert!(!outranks(BidKind::Contract(90), BidKind::Contract(90)));
        assert!(outranks(BidKind::Capot, BidKind::Contract(160)));
        assert!(!outranks(BidKind::Contract(160), BidKind::Capot));
    }

    #[test]
    fn estimate_counts_belote_and_length() {
        let params = BotParams::default();
        let cards = hand(&[
            (Rank::Queen, Suit::Hearts),
            (Rank::King, Suit::Hearts),
            (Rank::Seven, Suit::Hearts),
            (Rank::Eight, Suit::Hearts),
        ]);
        // 3 + 4 trump points, one extra trump, belote.
        assert_eq!(
            estimate_points(&cards, Trump::Suit(Suit::Hearts), &params),
            3 + 4 + 10 + 20
        );
    }

    #[test]
    fn contracts_stay_on_the_biddable_ladder() {
        let loose = BotParams {
            min_contract: 40,
            max_contract: 255,
            capot_threshold: u32::MAX,
            ..BotParams::default()
        };
        assert_eq!(contract_for(300, &loose), Some(BidKind::Contract(180)));
        assert_eq!(contract_for(40, &loose), None);
        assert_eq!(contract_for(130, &loose), Some(BidKind::Contract(150)));
    }
}
