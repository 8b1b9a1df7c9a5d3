// Team tactics and their effect on individual output
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tactic {
    #[default]
    Balanced,
    Attacking,
    Defensive,
    Possession,
    CounterAttack,
}

impl Tactic {
    pub const ALL: [Tactic; 5] = [
        Tactic::Balanced,
        Tactic::Attacking,
        Tactic::Defensive,
        Tactic::Possession,
        Tactic::CounterAttack,
    ];

    /// Multiplier on the player's goal rate
    pub fn goal_factor(&self) -> f64 {
        match self {
            Tactic::Balanced => 1.0,
            Tactic::Attacking => 1.2,
            Tactic::Defensive => 0.8,
            Tactic::Possession => 1.05,
            Tactic::CounterAttack => 1.1,
        }
    }

    pub fn assist_factor(&self) -> f64 {
        match self {
            Tactic::Balanced => 1.0,
            Tactic::Attacking => 1.1,
            Tactic::Defensive => 0.85,
            Tactic::Possession => 1.25,
            Tactic::CounterAttack => 1.0,
        }
    }

    pub fn clean_sheet_factor(&self) -> f64 {
        match self {
            Tactic::Balanced => 1.0,
            Tactic::Attacking => 0.8,
            Tactic::Defensive => 1.3,
            Tactic::Possession => 1.1,
            Tactic::CounterAttack => 0.95,
        }
    }

    /// Rating points added to the team's strength
    pub fn strength_bias(&self) -> f64 {
        match self {
            Tactic::Balanced => 0.0,
            Tactic::Attacking => 0.5,
            Tactic::Defensive => -0.5,
            Tactic::Possession => 0.3,
            Tactic::CounterAttack => 0.0,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let key: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        match key.to_ascii_lowercase().as_str() {
            "balanced" => Some(Tactic::Balanced),
            "attacking" => Some(Tactic::Attacking),
            "defensive" => Some(Tactic::Defensive),
            "possession" => Some(Tactic::Possession),
            "counterattack" | "counter" => Some(Tactic::CounterAttack),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(Tactic::parse("Counter-Attack"), Some(Tactic::CounterAttack));
        assert_eq!(Tactic::parse("DEFENSIVE"), Some(Tactic::Defensive));
        assert_eq!(Tactic::parse("park the bus"), None);
    }

    #[test]
    fn test_defensive_trades_goals_for_clean_sheets() {
        let d = Tactic::Defensive;
        assert!(d.goal_factor() < Tactic::Balanced.goal_factor());
        assert!(d.clean_sheet_factor() > Tactic::Balanced.clean_sheet_factor());
    }
}
