/// Tunable weights shared by the bid and play planners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotParams {
    /// Points assumed to come from partner when evaluating a hand.
    pub partner_allowance: u32,
    /// Bonus per trump held beyond the third.
    pub trump_length_bonus: u32,
    /// Lowest contract worth opening.
    pub min_contract: u32,
    /// Highest point contract a bot will ever name.
    pub max_contract: u32,
    /// Estimate at or above which a bot announces capot instead.
    pub capot_threshold: u32,
    /// Defensive strength in the opponents' trump needed to coinche.
    pub coinche_threshold: u32,
    /// Margin over the contract needed to surcoinche.
    pub surcoinche_margin: u32,
    pub play_win_bonus: i32,
    pub play_feed_partner_mult: i32,
    pub play_waste_trump_penalty: i32,
    pub play_discard_points_mult: i32,
    pub play_lead_master_bonus: i32,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            partner_allowance: 25,
            trump_length_bonus: 10,
            min_contract: 80,
            max_contract: 160,
            capot_threshold: 190,
            coinche_threshold: 45,
            surcoinche_margin: 20,
            play_win_bonus: 40,
            play_feed_partner_mult: 3,
            play_waste_trump_penalty: -25,
            play_discard_points_mult: -4,
            play_lead_master_bonus: 30,
        }
    }
}
