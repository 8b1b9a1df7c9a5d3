//! Transfer Offer Generator tuning

use serde::{Deserialize, Serialize};

/// Values indexed by transfer pressure: none / agitating / forced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ByPressure<T> {
    pub calm: T,
    pub agitating: T,
    pub forced: T,
}

/// Transfer Offer Generator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferParams {
    /// How far under a club's squad strength the player may be and still interest it
    pub interest_slack: ByPressure<u8>,
    pub interest_probability: ByPressure<f64>,
    pub max_offers: ByPressure<usize>,
    /// Calm window: minimum reputation gain over the current club (default: 5)
    pub reputation_margin: u8,
    /// Calm window: minimum wage ratio over the current wage (default: 1.1)
    pub wage_margin: f64,
    /// Forced fallback: widest slack and number of fallback clubs
    pub fallback_slack: u8,
    pub fallback_count: usize,
    /// Loan eligibility
    pub loan_max_age: u8,
    pub loan_gap: u8,
    /// An offer is strictly better when wage exceeds this ratio (default: 1.5)
    pub better_wage_ratio: f64,
    /// ...or reputation exceeds the current club by this margin (default: 10)
    pub better_reputation_margin: u8,
    /// Highest negotiated wage relative to the club proposal (default: 1.25)
    pub negotiation_ceiling: f64,
    pub free_agent_wage: i64,
}

impl Default for TransferParams {
    fn default() -> Self {
        Self {
            interest_slack: ByPressure { calm: 3, agitating: 6, forced: 10 },
            interest_probability: ByPressure { calm: 0.35, agitating: 0.6, forced: 0.85 },
            max_offers: ByPressure { calm: 2, agitating: 4, forced: 6 },
            reputation_margin: 5,
            wage_margin: 1.1,
            fallback_slack: 15,
            fallback_count: 3,
            loan_max_age: 22,
            loan_gap: 4,
            better_wage_ratio: 1.5,
            better_reputation_margin: 10,
            negotiation_ceiling: 1.25,
            free_agent_wage: 500,
        }
    }
}

impl TransferParams {
    pub fn validate(&self) -> Result<(), String> {
        let probs = [
            self.interest_probability.calm,
            self.interest_probability.agitating,
            self.interest_probability.forced,
        ];
        if probs.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err("transfer.interest_probability must be probabilities".into());
        }
        if self.max_offers.calm > self.max_offers.agitating
            || self.max_offers.agitating > self.max_offers.forced
        {
            return Err("transfer.max_offers must grow with pressure".into());
        }
        if self.negotiation_ceiling < 1.0 {
            return Err("transfer.negotiation_ceiling must be at least 1.0".into());
        }
        Ok(())
    }
}
