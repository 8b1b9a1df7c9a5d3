//! Career Scorer: a pure, linear legacy score over totals, silverware and
//! reputation.

use serde::{Deserialize, Serialize};

use crate::config::ScoringWeights;
use crate::models::{weighted_sum, History, PlayerState};
use crate::scoring::tier::LegacyTier;

/// Score components, summed into `total`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub ability: i64,
    pub output: i64,
    pub trophies: i64,
    pub awards: i64,
    pub reputation: i64,
    pub market_value: i64,
    pub longevity: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Default)]
pub struct CareerScorer {
    weights: ScoringWeights,
}

impl CareerScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Counters come from `state.totals`, silverware from `history`.
    /// Ability uses the peak overall so late-career decline does not erase a legacy.
    pub fn breakdown(&self, state: &PlayerState, history: &History) -> ScoreBreakdown {
        let w = &self.weights;
        let totals = &state.totals;

        let ability = w.overall * state.peak_overall as i64 + w.potential * state.potential as i64;
        let output = w.goal * totals.goals as i64
            + w.assist * totals.assists as i64
            + w.appearance * totals.matches as i64
            + w.clean_sheet * totals.clean_sheets as i64;
        let trophies = weighted_sum(&history.trophies(), &w.trophies);
        let awards = weighted_sum(&history.awards(), &w.awards);
        let reputation = w.reputation * state.reputation as i64;
        let market_value = w.market_value_per_million * (state.market_value() / 1_000_000);
        let longevity = w.longevity_per_year * state.career_years() as i64;

        ScoreBreakdown {
            ability,
            output,
            trophies,
            awards,
            reputation,
            market_value,
            longevity,
            total: ability + output + trophies + awards + reputation + market_value + longevity,
        }
    }

    pub fn score(&self, state: &PlayerState, history: &History) -> i64 {
        self.breakdown(state, history).total
    }

    pub fn tier(&self, state: &PlayerState, history: &History) -> LegacyTier {
        LegacyTier::from_score(self.score(state, history), state.peak_overall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::KeyLocalizer;
    use crate::models::{Award, Position, SeasonLog, SeasonStats, Tally, Team, TeamId, Trophy};

    fn career() -> (PlayerState, History) {
        let team = Team::new(1, "A", "England", 1, 80);
        let mut state = PlayerState::rookie("P", Position::Forward, "England", &team);
        state.totals.goals = 120;
        state.totals.matches = 300;
        state.age = 30;
        let mut history = History::baseline(TeamId(100), "Academy", 16, 2024, &KeyLocalizer);
        history.push(SeasonLog {
            season: 1,
            age: 17,
            club: TeamId(1),
            club_name: "A".into(),
            is_youth: false,
            stats: SeasonStats::default(),
            international: Vec::new(),
            events: Vec::new(),
            trophies: [Trophy::LeagueTitle, Trophy::WorldCup].into_iter().collect(),
            awards: [Award::GoldenBoot].into_iter().collect::<Tally<Award>>(),
            started_on: "2025-08-01".into(),
        });
        (state, history)
    }

    #[test]
    fn test_score_is_pure() {
        let (state, history) = career();
        let scorer = CareerScorer::default();
        assert_eq!(scorer.score(&state, &history), scorer.score(&state, &history));
    }

    #[test]
    fn test_goal_adds_goal_weight() {
        let (mut state, history) = career();
        let scorer = CareerScorer::default();
        let before = scorer.score(&state, &history);
        state.totals.goals += 1;
        assert_eq!(scorer.score(&state, &history) - before, scorer.weights().goal);
    }

    #[test]
    fn test_breakdown_components() {
        let (state, history) = career();
        let b = CareerScorer::default().breakdown(&state, &history);
        assert_eq!(b.trophies, 120 + 500);
        assert_eq!(b.awards, 120);
        assert_eq!(b.longevity, 10 * 13);
        assert_eq!(
            b.total,
            b.ability + b.output + b.trophies + b.awards + b.reputation + b.market_value + b.longevity
        );
    }
}
