// Session pricing
use crate::models::PlayerState;
use crate::training::types::TrainingSession;

/// Price of one session. The first professional season is paid by the club.
pub fn cost_of(state: &PlayerState, session: &TrainingSession) -> i64 {
    if state.is_first_professional_season() {
        return 0;
    }
    let scale = 1.0 + state.overall() as f64 / 100.0;
    let base = session.focus.base_cost() as f64 * scale * session.intensity.cost_multiplier();
    base.round() as i64 + session.trainer.map_or(0, |t| t.surcharge())
}

/// Price of a whole set of sessions
pub fn plan_cost(state: &PlayerState, sessions: &[TrainingSession]) -> i64 {
    sessions.iter().map(|s| cost_of(state, s)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerAttributes, Position, Team};
    use crate::training::types::{Intensity, TrainerTier, TrainingFocus};

    fn session(focus: TrainingFocus, intensity: Intensity, trainer: Option<TrainerTier>) -> TrainingSession {
        TrainingSession {
            focus,
            intensity,
            trainer,
            duration_weeks: 12,
            started_season: 2,
            session_index: 0,
        }
    }

    fn veteran() -> PlayerState {
        let team = Team::new(1, "A", "England", 1, 70);
        let mut player = PlayerState::rookie("P", Position::Midfielder, "England", &team)
            .with_attributes(PlayerAttributes::uniform(50));
        player.current_season = 2;
        player
    }

    #[test]
    fn test_cost_formula() {
        let player = veteran();
        let overall = player.overall() as f64;
        let expected = (15_000.0 * (1.0 + overall / 100.0) * 1.5).round() as i64 + 40_000;
        let s = session(TrainingFocus::Shooting, Intensity::Intense, Some(TrainerTier::Elite));
        assert_eq!(cost_of(&player, &s), expected);
    }

    #[test]
    fn test_first_professional_season_is_free() {
        let mut player = veteran();
        player.current_season = 1;
        let s = session(TrainingFocus::Goalkeeping, Intensity::Intense, Some(TrainerTier::WorldClass));
        assert_eq!(cost_of(&player, &s), 0);
    }

    #[test]
    fn test_light_is_cheaper_than_intense() {
        let player = veteran();
        let light = cost_of(&player, &session(TrainingFocus::Pace, Intensity::Light, None));
        let intense = cost_of(&player, &session(TrainingFocus::Pace, Intensity::Intense, None));
        assert!(light < intense);
    }
}
