//! Skill attributes and their reduction to a scalar `overall` rating.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const ATTRIBUTE_MIN: u8 = 1;
pub const ATTRIBUTE_MAX: u8 = 99;

/// Playing position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }

    /// Positions that keep clean sheets
    pub fn keeps_clean_sheets(&self) -> bool {
        matches!(self, Position::Goalkeeper | Position::Defender)
    }

    /// Attribute weights used for the overall rating, summing to 1.0
    pub fn weights(&self) -> &'static [(Attribute, f32)] {
        match self {
            Position::Goalkeeper => &[
                (Attribute::Goalkeeping, 0.55),
                (Attribute::Mental, 0.15),
                (Attribute::Physical, 0.10),
                (Attribute::Passing, 0.10),
                (Attribute::Pace, 0.10),
            ],
            Position::Defender => &[
                (Attribute::Defending, 0.35),
                (Attribute::Physical, 0.20),
                (Attribute::Pace, 0.15),
                (Attribute::Mental, 0.15),
                (Attribute::Passing, 0.10),
                (Attribute::Dribbling, 0.05),
            ],
            Position::Midfielder => &[
                (Attribute::Passing, 0.30),
                (Attribute::Mental, 0.20),
                (Attribute::Dribbling, 0.15),
                (Attribute::Shooting, 0.10),
                (Attribute::Defending, 0.10),
                (Attribute::Physical, 0.10),
                (Attribute::Pace, 0.05),
            ],
            Position::Forward => &[
                (Attribute::Shooting, 0.35),
                (Attribute::Pace, 0.20),
                (Attribute::Dribbling, 0.20),
                (Attribute::Physical, 0.10),
                (Attribute::Mental, 0.10),
                (Attribute::Passing, 0.05),
            ],
        }
    }

    /// Relevance of an attribute for this position (0.0 when unused)
    pub fn relevance(&self, attribute: Attribute) -> f32 {
        self.weights().iter().find(|(a, _)| *a == attribute).map(|(_, w)| *w).unwrap_or(0.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DF",
            Position::Midfielder => "MF",
            Position::Forward => "FW",
        };
        write!(f, "{}", label)
    }
}

/// Individual skill attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    Pace,
    Shooting,
    Passing,
    Dribbling,
    Defending,
    Physical,
    Goalkeeping,
    Mental,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Attribute::Pace,
        Attribute::Shooting,
        Attribute::Passing,
        Attribute::Dribbling,
        Attribute::Defending,
        Attribute::Physical,
        Attribute::Goalkeeping,
        Attribute::Mental,
    ];
}

/// Skill attribute set (1-99 each)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAttributes {
    pub pace: u8,
    pub shooting: u8,
    pub passing: u8,
    pub dribbling: u8,
    pub defending: u8,
    pub physical: u8,
    pub goalkeeping: u8,
    pub mental: u8,
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self::uniform(50)
    }
}

impl PlayerAttributes {
    pub fn uniform(value: u8) -> Self {
        let v = value.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX);
        Self {
            pace: v,
            shooting: v,
            passing: v,
            dribbling: v,
            defending: v,
            physical: v,
            goalkeeping: v,
            mental: v,
        }
    }

    /// Baseline attributes for an academy graduate at the given position
    pub fn baseline(position: Position, level: u8) -> Self {
        let mut attrs = Self::uniform(level.saturating_sub(12));
        for (attribute, weight) in position.weights() {
            let boost = (weight * 40.0).round() as u8;
            attrs.set(*attribute, level.saturating_add(boost).saturating_sub(8));
        }
        attrs
    }

    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Pace => self.pace,
            Attribute::Shooting => self.shooting,
            Attribute::Passing => self.passing,
            Attribute::Dribbling => self.dribbling,
            Attribute::Defending => self.defending,
            Attribute::Physical => self.physical,
            Attribute::Goalkeeping => self.goalkeeping,
            Attribute::Mental => self.mental,
        }
    }

    /// Set an attribute, clamped to the valid range
    pub fn set(&mut self, attribute: Attribute, value: u8) {
        let v = value.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX);
        match attribute {
            Attribute::Pace => self.pace = v,
            Attribute::Shooting => self.shooting = v,
            Attribute::Passing => self.passing = v,
            Attribute::Dribbling => self.dribbling = v,
            Attribute::Defending => self.defending = v,
            Attribute::Physical => self.physical = v,
            Attribute::Goalkeeping => self.goalkeeping = v,
            Attribute::Mental => self.mental = v,
        }
    }

    /// Apply a signed delta, returning the change actually applied after clamping
    pub fn apply_delta(&mut self, attribute: Attribute, delta: i16) -> i16 {
        let before = self.get(attribute) as i16;
        let after = (before + delta).clamp(ATTRIBUTE_MIN as i16, ATTRIBUTE_MAX as i16);
        self.set(attribute, after as u8);
        after - before
    }

    /// Position-weighted overall rating
    pub fn overall(&self, position: Position) -> u8 {
        let weighted: f32 =
            position.weights().iter().map(|(a, w)| self.get(*a) as f32 * w).sum();
        (weighted.round() as u8).clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_weights_sum_to_one() {
        for position in
            [Position::Goalkeeper, Position::Defender, Position::Midfielder, Position::Forward]
        {
            let total: f32 = position.weights().iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-4, "{} weights sum to {}", position, total);
        }
    }

    #[test]
    fn test_uniform_overall_matches_value() {
        let attrs = PlayerAttributes::uniform(70);
        assert_eq!(attrs.overall(Position::Forward), 70);
        assert_eq!(attrs.overall(Position::Goalkeeper), 70);
    }

    #[test]
    fn test_overall_follows_position() {
        let mut attrs = PlayerAttributes::uniform(50);
        attrs.shooting = 90;
        assert!(attrs.overall(Position::Forward) > attrs.overall(Position::Defender));
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut attrs = PlayerAttributes::uniform(98);
        let applied = attrs.apply_delta(Attribute::Pace, 5);
        assert_eq!(applied, 1);
        assert_eq!(attrs.pace, 99);

        let applied = attrs.apply_delta(Attribute::Mental, -200);
        assert_eq!(attrs.mental, 1);
        assert_eq!(applied, -97);
    }
}
