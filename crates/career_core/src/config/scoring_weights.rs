//! Career Scorer weights

use serde::{Deserialize, Serialize};

use crate::models::{Award, Trophy, WeightTable};

/// Linear weights of the legacy score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub overall: i64,
    pub potential: i64,
    pub goal: i64,
    pub assist: i64,
    pub appearance: i64,
    pub clean_sheet: i64,
    pub reputation: i64,
    pub market_value_per_million: i64,
    pub longevity_per_year: i64,
    pub trophies: WeightTable<Trophy>,
    pub awards: WeightTable<Award>,
    /// Entries kept per leaderboard category (default: 10)
    pub leaderboard_size: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            overall: 40,
            potential: 15,
            goal: 4,
            assist: 3,
            appearance: 1,
            clean_sheet: 2,
            reputation: 3,
            market_value_per_million: 2,
            longevity_per_year: 10,
            trophies: [
                (Trophy::LeagueTitle, 120),
                (Trophy::DomesticCup, 60),
                (Trophy::ContinentalCup, 300),
                (Trophy::SecondaryContinentalCup, 180),
                (Trophy::ContinentalChampionship, 280),
                (Trophy::ClubWorldCup, 350),
                (Trophy::WorldCup, 500),
            ]
            .into_iter()
            .collect(),
            awards: [
                (Award::BallonDor, 400),
                (Award::GoldenBoot, 120),
                (Award::GoalkeeperOfTheYear, 120),
                (Award::YoungPlayerOfTheYear, 60),
                (Award::TeamOfTheYear, 30),
                (Award::ClubPlayerOfTheSeason, 25),
            ]
            .into_iter()
            .collect(),
            leaderboard_size: 10,
        }
    }
}

impl ScoringWeights {
    pub fn trophy_weight(&self, trophy: Trophy) -> i64 {
        self.trophies.get(&trophy).copied().unwrap_or(0)
    }

    /// Every trophy of a higher prestige tier must outweigh every trophy of a lower one
    pub fn validate(&self) -> Result<(), String> {
        for a in Trophy::ALL {
            for b in Trophy::ALL {
                if a.prestige() > b.prestige() && self.trophy_weight(a) <= self.trophy_weight(b) {
                    return Err(format!("scoring.trophies: {:?} must outweigh {:?}", a, b));
                }
            }
        }
        if self.leaderboard_size == 0 {
            return Err("scoring.leaderboard_size must be positive".into());
        }
        Ok(())
    }
}
