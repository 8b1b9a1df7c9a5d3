//! Hooks for hosts that want to react to career milestones.
//!
//! Observers see read-only snapshots after a change has been committed; the
//! cycle never looks at what they do.

use crate::models::{History, PlayerState, SeasonLog};

pub trait CareerObserver {
    fn on_season_end(&mut self, _state: &PlayerState, _log: &SeasonLog) {}

    fn on_retirement(&mut self, _state: &PlayerState, _history: &History, _score: i64) {}
}

/// Writes a one-line summary of each milestone to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl CareerObserver for LoggingObserver {
    fn on_season_end(&mut self, state: &PlayerState, log: &SeasonLog) {
        log::info!(
            "Season {} | {} (age {}) at {} | {} apps {} goals {} assists | overall {}",
            log.season,
            state.name,
            log.age,
            log.club_name,
            log.stats.matches,
            log.stats.goals,
            log.stats.assists,
            state.overall()
        );
    }

    fn on_retirement(&mut self, state: &PlayerState, history: &History, score: i64) {
        log::info!(
            "{} retired at {} after {} season(s) with a legacy score of {}",
            state.name,
            state.age,
            history.len().saturating_sub(1),
            score
        );
    }
}
