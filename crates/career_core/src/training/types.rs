// Training vocabulary: focuses, intensities, trainers, sessions and results
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Attribute, Position};

/// Area a training session works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrainingFocus {
    Pace,
    Shooting,
    Passing,
    Dribbling,
    Defending,
    Physical,
    Goalkeeping,
    Mental,
}

impl TrainingFocus {
    pub const ALL: [TrainingFocus; 8] = [
        TrainingFocus::Pace,
        TrainingFocus::Shooting,
        TrainingFocus::Passing,
        TrainingFocus::Dribbling,
        TrainingFocus::Defending,
        TrainingFocus::Physical,
        TrainingFocus::Goalkeeping,
        TrainingFocus::Mental,
    ];

    /// Attribute receiving the full gain
    pub fn primary(&self) -> Attribute {
        match self {
            TrainingFocus::Pace => Attribute::Pace,
            TrainingFocus::Shooting => Attribute::Shooting,
            TrainingFocus::Passing => Attribute::Passing,
            TrainingFocus::Dribbling => Attribute::Dribbling,
            TrainingFocus::Defending => Attribute::Defending,
            TrainingFocus::Physical => Attribute::Physical,
            TrainingFocus::Goalkeeping => Attribute::Goalkeeping,
            TrainingFocus::Mental => Attribute::Mental,
        }
    }

    /// Attribute receiving the spill-over gain
    pub fn secondary(&self) -> Attribute {
        match self {
            TrainingFocus::Pace => Attribute::Physical,
            TrainingFocus::Shooting => Attribute::Dribbling,
            TrainingFocus::Passing => Attribute::Mental,
            TrainingFocus::Dribbling => Attribute::Pace,
            TrainingFocus::Defending => Attribute::Physical,
            TrainingFocus::Physical => Attribute::Pace,
            TrainingFocus::Goalkeeping => Attribute::Mental,
            TrainingFocus::Mental => Attribute::Passing,
        }
    }

    /// Base session cost before scaling
    pub fn base_cost(&self) -> i64 {
        match self {
            TrainingFocus::Pace => 12_000,
            TrainingFocus::Shooting => 15_000,
            TrainingFocus::Passing => 12_000,
            TrainingFocus::Dribbling => 14_000,
            TrainingFocus::Defending => 12_000,
            TrainingFocus::Physical => 10_000,
            TrainingFocus::Goalkeeping => 15_000,
            TrainingFocus::Mental => 8_000,
        }
    }

    pub fn is_eligible(&self, position: Position) -> bool {
        if position.is_goalkeeper() {
            matches!(
                self,
                TrainingFocus::Goalkeeping
                    | TrainingFocus::Passing
                    | TrainingFocus::Physical
                    | TrainingFocus::Mental
                    | TrainingFocus::Pace
            )
        } else {
            *self != TrainingFocus::Goalkeeping
        }
    }

    /// Focuses a player in `position` may train
    pub fn eligible_for(position: Position) -> Vec<TrainingFocus> {
        Self::ALL.iter().copied().filter(|f| f.is_eligible(position)).collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            TrainingFocus::Pace => "pace",
            TrainingFocus::Shooting => "shooting",
            TrainingFocus::Passing => "passing",
            TrainingFocus::Dribbling => "dribbling",
            TrainingFocus::Defending => "defending",
            TrainingFocus::Physical => "physical",
            TrainingFocus::Goalkeeping => "goalkeeping",
            TrainingFocus::Mental => "mental",
        }
    }
}

/// Training load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Intensity {
    Light,
    #[default]
    Normal,
    Intense,
}

impl Intensity {
    pub fn cost_multiplier(&self) -> f64 {
        match self {
            Intensity::Light => 0.6,
            Intensity::Normal => 1.0,
            Intensity::Intense => 1.5,
        }
    }

    pub fn effect_multiplier(&self) -> f32 {
        match self {
            Intensity::Light => 0.7,
            Intensity::Normal => 1.0,
            Intensity::Intense => 1.35,
        }
    }
}

/// Private coach hired on top of club training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrainerTier {
    Assistant,
    Specialist,
    Elite,
    WorldClass,
}

impl TrainerTier {
    /// Cheapest first
    pub const ALL: [TrainerTier; 4] =
        [TrainerTier::Assistant, TrainerTier::Specialist, TrainerTier::Elite, TrainerTier::WorldClass];

    /// Flat fee added to every session
    pub fn surcharge(&self) -> i64 {
        match self {
            TrainerTier::Assistant => 5_000,
            TrainerTier::Specialist => 15_000,
            TrainerTier::Elite => 40_000,
            TrainerTier::WorldClass => 90_000,
        }
    }

    pub fn bonus(&self) -> f32 {
        match self {
            TrainerTier::Assistant => 0.05,
            TrainerTier::Specialist => 0.12,
            TrainerTier::Elite => 0.20,
            TrainerTier::WorldClass => 0.30,
        }
    }

    /// Elite staff can run one more concurrent session
    pub fn grants_extra_slot(&self) -> bool {
        matches!(self, TrainerTier::Elite | TrainerTier::WorldClass)
    }
}

/// The player's chosen training for the coming season
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub focuses: Vec<TrainingFocus>,
    pub intensity: Intensity,
    pub trainer: Option<TrainerTier>,
}

impl TrainingPlan {
    pub fn new(focuses: Vec<TrainingFocus>, intensity: Intensity, trainer: Option<TrainerTier>) -> Self {
        Self { focuses, intensity, trainer }
    }

    pub fn is_empty(&self) -> bool {
        self.focuses.is_empty()
    }
}

/// One planned session; `session_index` orders it among concurrent sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub focus: TrainingFocus,
    pub intensity: Intensity,
    pub trainer: Option<TrainerTier>,
    pub duration_weeks: u8,
    pub started_season: u32,
    pub session_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Excellent,
    Good,
    Neutral,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub focus: TrainingFocus,
    pub deltas: BTreeMap<Attribute, i16>,
    pub expected_gain: f32,
    pub actual_gain: f32,
    pub cost_total: i64,
    pub outcome: Outcome,
}

impl TrainingResult {
    /// Net attribute change
    pub fn total_delta(&self) -> i16 {
        self.deltas.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goalkeeper_eligibility() {
        let gk = TrainingFocus::eligible_for(Position::Goalkeeper);
        assert_eq!(gk.len(), 5);
        assert!(gk.contains(&TrainingFocus::Goalkeeping));
        assert!(!gk.contains(&TrainingFocus::Shooting));

        let fw = TrainingFocus::eligible_for(Position::Forward);
        assert_eq!(fw.len(), 7);
        assert!(!fw.contains(&TrainingFocus::Goalkeeping));
    }

    #[test]
    fn test_secondary_differs_from_primary() {
        for focus in TrainingFocus::ALL {
            assert_ne!(focus.primary(), focus.secondary());
        }
    }

    #[test]
    fn test_trainer_tiers_scale() {
        for pair in TrainerTier::ALL.windows(2) {
            assert!(pair[0].surcharge() < pair[1].surcharge());
            assert!(pair[0].bonus() < pair[1].bonus());
        }
    }
}
