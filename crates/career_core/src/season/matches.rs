//! Single-match sampling: team result plus the player's individual line.

use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};

use crate::models::Position;
use crate::season::tactic::Tactic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Win,
    Draw,
    Loss,
}

impl MatchResult {
    pub fn points(&self) -> u32 {
        match self {
            MatchResult::Win => 3,
            MatchResult::Draw => 1,
            MatchResult::Loss => 0,
        }
    }
}

/// Individual contribution in one appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchLine {
    pub goals: u32,
    pub assists: u32,
    pub clean_sheet: bool,
    pub rating: f32,
}

/// Everything the sampler needs about one fixture
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub team_strength: f64,
    pub opponent_strength: f64,
    pub tactic: Tactic,
}

impl Fixture {
    pub fn differential(&self) -> f64 {
        self.team_strength + self.tactic.strength_bias() - self.opponent_strength
    }
}

pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Chance the stronger side takes the decisive result
pub fn win_probability(team: f64, opponent: f64) -> f64 {
    logistic((team - opponent) / 8.0)
}

/// Per-match goal and assist rates at overall 75
pub fn base_rates(position: Position) -> (f64, f64) {
    match position {
        Position::Forward => (0.42, 0.18),
        Position::Midfielder => (0.14, 0.22),
        Position::Defender => (0.04, 0.06),
        Position::Goalkeeper => (0.0, 0.01),
    }
}

pub fn sample_result<R: Rng + ?Sized>(fixture: &Fixture, draw_band: f64, rng: &mut R) -> MatchResult {
    if rng.gen_bool(draw_band.clamp(0.0, 1.0)) {
        return MatchResult::Draw;
    }
    let p = win_probability(fixture.team_strength + fixture.tactic.strength_bias(), fixture.opponent_strength);
    if rng.gen_bool(p.clamp(0.0, 1.0)) {
        MatchResult::Win
    } else {
        MatchResult::Loss
    }
}

fn poisson<R: Rng + ?Sized>(rate: f64, rng: &mut R) -> u32 {
    if rate <= 0.0 {
        return 0;
    }
    match Poisson::new(rate) {
        Ok(dist) => {
            let draws: f64 = dist.sample(rng);
            draws as u32
        }
        Err(_) => 0,
    }
}

/// Sample the player's line for a fixture whose result is already known
pub fn sample_line<R: Rng + ?Sized>(
    fixture: &Fixture,
    result: MatchResult,
    position: Position,
    overall: u8,
    rng: &mut R,
) -> MatchLine {
    let diff = fixture.differential();
    let quality = (overall as f64 / 75.0).powi(2);
    let form = (1.0 + diff / 40.0).clamp(0.5, 1.5);
    let (goal_rate, assist_rate) = base_rates(position);

    let goals = poisson(goal_rate * quality * fixture.tactic.goal_factor() * form, rng);
    let assists = poisson(assist_rate * quality * fixture.tactic.assist_factor() * form, rng);

    let clean_sheet = position.keeps_clean_sheets() && result != MatchResult::Loss && {
        let chance = (0.22 + 0.02 * diff).clamp(0.05, 0.6) * fixture.tactic.clean_sheet_factor();
        rng.gen_bool(chance.clamp(0.0, 1.0))
    };

    let win = if result == MatchResult::Win { 1.0 } else { 0.0 };
    let mean = 6.4
        + (overall as f64 - 70.0) / 20.0
        + 0.6 * goals as f64
        + 0.35 * assists as f64
        + 0.4 * if clean_sheet { 1.0 } else { 0.0 }
        + 0.2 * win;
    let rating = Normal::new(mean, 0.45).map(|n| n.sample(rng)).unwrap_or(mean).clamp(3.0, 10.0);

    MatchLine { goals, assists, clean_sheet, rating: rating as f32 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fixture(team: f64, opponent: f64) -> Fixture {
        Fixture { team_strength: team, opponent_strength: opponent, tactic: Tactic::Balanced }
    }

    #[test]
    fn test_win_probability_is_symmetric() {
        assert!((win_probability(70.0, 70.0) - 0.5).abs() < 1e-9);
        let p = win_probability(80.0, 70.0);
        assert!((p + win_probability(70.0, 80.0) - 1.0).abs() < 1e-9);
        assert!(p > 0.7);
    }

    #[test]
    fn test_goalkeepers_do_not_score() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let line = sample_line(&fixture(75.0, 70.0), MatchResult::Win, Position::Goalkeeper, 90, &mut rng);
            assert_eq!(line.goals, 0);
            assert!((3.0..=10.0).contains(&line.rating));
        }
    }

    #[test]
    fn test_no_clean_sheet_in_a_defeat() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..200 {
            let line = sample_line(&fixture(60.0, 80.0), MatchResult::Loss, Position::Defender, 70, &mut rng);
            assert!(!line.clean_sheet);
        }
    }

    #[test]
    fn test_forward_scoring_rate_near_base() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let n = 4_000;
        let goals: u32 = (0..n)
            .map(|_| sample_line(&fixture(70.0, 70.0), MatchResult::Draw, Position::Forward, 75, &mut rng).goals)
            .sum();
        let rate = goals as f64 / n as f64;
        assert!((rate - 0.42).abs() < 0.05, "rate {}", rate);
    }

    #[test]
    fn test_draw_band_share() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let n = 4_000;
        let draws = (0..n)
            .filter(|_| sample_result(&fixture(70.0, 70.0), 0.25, &mut rng) == MatchResult::Draw)
            .count();
        let share = draws as f64 / n as f64;
        assert!((share - 0.25).abs() < 0.03);
    }
}
