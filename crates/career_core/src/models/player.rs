//! Player/career state: the aggregate every engine reads and mutates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attributes::{PlayerAttributes, Position};
use super::flags::FlagSet;
use super::personality::{Personality, Trait};
use super::team::{Team, TeamId};
use crate::training::TrainingPlan;
use crate::transfers::Offer;

/// Ordered morale scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Morale {
    Furious,
    Unhappy,
    Content,
    Happy,
    Delighted,
}

impl Morale {
    pub fn step_up(self) -> Self {
        match self {
            Morale::Furious => Morale::Unhappy,
            Morale::Unhappy => Morale::Content,
            Morale::Content => Morale::Happy,
            Morale::Happy | Morale::Delighted => Morale::Delighted,
        }
    }

    pub fn step_down(self) -> Self {
        match self {
            Morale::Furious | Morale::Unhappy => Morale::Furious,
            Morale::Content => Morale::Unhappy,
            Morale::Happy => Morale::Content,
            Morale::Delighted => Morale::Happy,
        }
    }

    /// Selection modifier in rating points
    pub fn selection_modifier(&self) -> f64 {
        match self {
            Morale::Furious => -4.0,
            Morale::Unhappy => -2.0,
            Morale::Content => 0.0,
            Morale::Happy => 1.0,
            Morale::Delighted => 2.0,
        }
    }
}

/// Who decides training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareerMode {
    /// Engine picks training automatically
    Dynamic,
    /// Caller supplies training choices
    Tactical,
}

/// Cumulative career totals (club + qualifying international)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerTotals {
    pub matches: u32,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
}

/// Temporary spell away from the parent club
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSpell {
    pub parent_club: TeamId,
    pub parent_wage: i64,
    /// Last season played on loan; the player returns afterwards
    pub ends_after_season: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: Uuid,
    pub name: String,
    pub age: u8,
    /// Age at the first professional season, for longevity
    pub start_age: u8,
    pub position: Position,
    pub nationality: String,
    pub attributes: PlayerAttributes,
    pub potential: u8,
    pub peak_overall: u8,
    /// 0-100
    pub reputation: u8,
    pub personality: Personality,

    pub totals: CareerTotals,
    /// Senior national-team appearances, friendlies excluded
    #[serde(default)]
    pub international_caps: u32,
    /// Selected for the national team at least once
    #[serde(default)]
    pub called_up: bool,

    pub morale: Morale,
    /// 0-100
    pub team_chemistry: u8,
    /// 0-100
    pub club_approval: u8,
    /// Years remaining
    pub contract_length: u8,
    /// Per season
    pub wage: i64,
    pub bank_balance: i64,

    pub club: TeamId,
    #[serde(default)]
    pub loan: Option<LoanSpell>,

    pub training: TrainingPlan,
    pub mode: CareerMode,
    #[serde(default)]
    pub flags: FlagSet,

    #[serde(default)]
    pub transfer_offers: Vec<Offer>,
    #[serde(default)]
    pub agitating_for_transfer: bool,
    #[serde(default)]
    pub is_forced_to_move: bool,

    /// 1 = first professional season
    pub current_season: u32,
    /// Calendar year of season 0
    pub first_year: i32,
    #[serde(default)]
    retired: bool,
}

impl PlayerState {
    /// Academy graduate signing a first professional contract at `club`
    pub fn rookie(name: &str, position: Position, nationality: &str, club: &Team) -> Self {
        let attributes = PlayerAttributes::baseline(position, 54);
        let overall = attributes.overall(position);
        let age = 17;
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            age,
            start_age: age,
            position,
            nationality: nationality.to_string(),
            potential: overall.saturating_add(28).min(94),
            peak_overall: overall,
            reputation: 10,
            attributes,
            personality: Personality::default(),
            totals: CareerTotals::default(),
            international_caps: 0,
            called_up: false,
            morale: Morale::Content,
            team_chemistry: 50,
            club_approval: 50,
            contract_length: 3,
            wage: market_wage(overall, age),
            bank_balance: 20_000,
            club: club.id,
            loan: None,
            training: TrainingPlan::default(),
            mode: CareerMode::Tactical,
            flags: FlagSet::new(),
            transfer_offers: Vec::new(),
            agitating_for_transfer: false,
            is_forced_to_move: false,
            current_season: 1,
            first_year: 2024,
            retired: false,
        }
    }

    pub fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = personality;
        self
    }

    pub fn with_attributes(mut self, attributes: PlayerAttributes) -> Self {
        self.attributes = attributes;
        self.peak_overall = self.peak_overall.max(self.overall());
        if self.potential < self.overall() {
            self.potential = self.overall();
        }
        self
    }

    pub fn with_mode(mut self, mode: CareerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn overall(&self) -> u8 {
        self.attributes.overall(self.position)
    }

    /// Refresh derived values after attributes changed
    pub fn recalculate(&mut self) {
        let overall = self.overall();
        self.peak_overall = self.peak_overall.max(overall);
        self.potential = self.potential.max(overall);
    }

    pub fn has_trait(&self, t: Trait) -> bool {
        self.personality.has(t)
    }

    pub fn is_first_professional_season(&self) -> bool {
        self.current_season == 1
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// Retirement is terminal; there is no way back
    pub fn retire(&mut self) {
        self.retired = true;
    }

    /// Years since the first professional season
    pub fn career_years(&self) -> u8 {
        self.age.saturating_sub(self.start_age)
    }

    pub fn market_value(&self) -> i64 {
        market_value(self.overall(), self.potential, self.age)
    }

    pub fn market_wage(&self) -> i64 {
        market_wage(self.overall(), self.age)
    }

    pub fn adjust_chemistry(&mut self, delta: i32) {
        self.team_chemistry = (self.team_chemistry as i32 + delta).clamp(0, 100) as u8;
    }

    pub fn adjust_approval(&mut self, delta: i32) {
        self.club_approval = (self.club_approval as i32 + delta).clamp(0, 100) as u8;
    }

    pub fn is_on_loan(&self) -> bool {
        self.loan.is_some()
    }
}

/// Season wage a player commands on the open market
pub fn market_wage(overall: u8, age: u8) -> i64 {
    let base = 10_000.0 * 1.09f64.powi(overall as i32 - 40);
    let age_factor = match age {
        0..=30 => 1.0,
        31..=33 => 0.8,
        _ => 0.6,
    };
    (base * age_factor).round() as i64
}

/// Transfer market value in currency units
pub fn market_value(overall: u8, potential: u8, age: u8) -> i64 {
    let base = 100_000.0 * 1.12f64.powi(overall as i32 - 40);
    let age_factor = match age {
        0..=21 => 1.5,
        22..=25 => 1.3,
        26..=29 => 1.0,
        30..=32 => 0.6,
        _ => 0.3,
    };
    let upside = if age <= 23 { 1.0 + potential.saturating_sub(overall) as f64 * 0.02 } else { 1.0 };
    (base * age_factor * upside).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn club() -> Team {
        Team::new(1, "Test FC", "England", 1, 70)
    }

    #[test]
    fn test_morale_steps_saturate() {
        assert_eq!(Morale::Delighted.step_up(), Morale::Delighted);
        assert_eq!(Morale::Furious.step_down(), Morale::Furious);
        assert_eq!(Morale::Content.step_down(), Morale::Unhappy);
        assert!(Morale::Happy > Morale::Content);
    }

    #[test]
    fn test_rookie_defaults() {
        let player = PlayerState::rookie("Kid", Position::Forward, "England", &club());
        assert!(player.is_first_professional_season());
        assert!(!player.is_retired());
        assert!(player.potential > player.overall());
        assert!(player.bank_balance >= 0);
        assert_eq!(player.peak_overall, player.overall());
    }

    #[test]
    fn test_retirement_is_monotone() {
        let mut player = PlayerState::rookie("Kid", Position::Forward, "England", &club());
        player.retire();
        player.retire();
        assert!(player.is_retired());
    }

    #[test]
    fn test_market_value_rewards_youth_and_quality() {
        assert!(market_value(80, 85, 22) > market_value(80, 80, 31));
        assert!(market_value(85, 85, 27) > market_value(75, 75, 27));
        assert!(market_wage(80, 25) > market_wage(80, 34));
    }
}
