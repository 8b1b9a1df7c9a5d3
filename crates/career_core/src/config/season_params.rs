//! Season Simulator tuning

use serde::{Deserialize, Serialize};

/// Season Simulator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonParams {
    /// League fixtures per tier, index 0 = top flight
    pub league_matches: [u32; 4],
    /// Maximum domestic cup rounds (default: 6)
    pub cup_rounds: u32,
    /// Club reputation needed for the continental cup (default: 75)
    pub continental_reputation: u8,
    /// Club reputation needed for the secondary continental cup (default: 62)
    pub secondary_continental_reputation: u8,
    pub continental_matches: u32,
    pub secondary_continental_matches: u32,
    /// Rating-point scale of the selection sigmoid (default: 5.0)
    pub selection_scale: f64,
    /// Share of non-decisive results (default: 0.25)
    pub draw_band: f64,
    /// Share of the wage reaching the bank balance (default: 0.5)
    pub income_share: f64,
    /// Overall needed for a national-team call-up (default: 74)
    pub call_up_overall: u8,
    /// Base per-season injury probability (default: 0.12)
    pub injury_risk: f64,
    /// Approval below which the club lets an expiring contract run out (default: 45)
    pub renewal_approval: u8,
    /// Overall gap under squad strength that gets a player released (default: 10)
    pub release_gap: u8,
    /// Share under which a season counts as benched (default: 0.35)
    pub benched_share: f32,
}

impl Default for SeasonParams {
    fn default() -> Self {
        Self {
            league_matches: [38, 46, 46, 46],
            cup_rounds: 6,
            continental_reputation: 75,
            secondary_continental_reputation: 62,
            continental_matches: 13,
            secondary_continental_matches: 11,
            selection_scale: 5.0,
            draw_band: 0.25,
            income_share: 0.5,
            call_up_overall: 74,
            injury_risk: 0.12,
            renewal_approval: 45,
            release_gap: 10,
            benched_share: 0.35,
        }
    }
}

impl SeasonParams {
    pub fn league_matches_for(&self, tier: u8) -> u32 {
        let idx = (tier.clamp(1, 4) - 1) as usize;
        self.league_matches[idx]
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.selection_scale <= 0.0 {
            return Err("season.selection_scale must be positive".into());
        }
        if !(0.0..1.0).contains(&self.draw_band) {
            return Err("season.draw_band must be in [0, 1)".into());
        }
        if !(0.0..=1.0).contains(&self.injury_risk) {
            return Err("season.injury_risk must be a probability".into());
        }
        if self.cup_rounds == 0 {
            return Err("season.cup_rounds must be at least 1".into());
        }
        // Six group games plus at least a final
        if self.continental_matches < 7 || self.secondary_continental_matches < 7 {
            return Err("season continental competitions need at least 7 matches".into());
        }
        if self.secondary_continental_reputation > self.continental_reputation {
            return Err("season.secondary_continental_reputation above continental".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitions_need_fixtures() {
        assert!(SeasonParams::default().validate().is_ok());

        let params = SeasonParams { cup_rounds: 0, ..SeasonParams::default() };
        assert!(params.validate().is_err());

        let params = SeasonParams { continental_matches: 6, ..SeasonParams::default() };
        assert!(params.validate().is_err());

        let params = SeasonParams { secondary_continental_matches: 3, ..SeasonParams::default() };
        assert!(params.validate().is_err());

        let params = SeasonParams { cup_rounds: 1, continental_matches: 7, ..SeasonParams::default() };
        assert!(params.validate().is_ok());
    }
}
