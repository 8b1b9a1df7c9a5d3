//! Career Scorer
//!
//! Pure scoring of a career, its legacy tier, the real-totals filter shared
//! by commit and leaderboard, and the leaderboard itself.

pub mod leaderboard;
pub mod scorer;
pub mod tier;
pub mod totals;

pub use leaderboard::{Leaderboard, LeaderboardCategory, LeaderboardEntry};
pub use scorer::{CareerScorer, ScoreBreakdown};
pub use tier::LegacyTier;
pub use totals::{is_friendly, normalize_competition, RealTotals};

use crate::models::{History, PlayerState};

/// `CareerScorer::score` with default weights
pub fn score_career(state: &PlayerState, history: &History) -> i64 {
    CareerScorer::default().score(state, history)
}
