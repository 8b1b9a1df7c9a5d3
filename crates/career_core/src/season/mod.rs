//! Season Simulator
//!
//! - [`tactic`]: team tactics and their output factors
//! - [`matches`]: per-fixture result and player line sampling
//! - [`competitions`]: league table, cups, national team, awards
//! - [`simulator`]: the season loop producing a [`SeasonOutcome`]

pub mod competitions;
pub mod matches;
pub mod simulator;
pub mod tactic;

#[cfg(test)]
mod tests;

pub use competitions::{Competition, LeagueTable};
pub use matches::{MatchLine, MatchResult};
pub use simulator::{SeasonOutcome, SeasonSimulator, GOAL_MILESTONES, MATCH_MILESTONES};
pub use tactic::Tactic;

use rand::Rng;

use crate::error::Result;
use crate::localization::Localize;
use crate::models::{PlayerState, WorldTeams};

/// `SeasonSimulator::simulate` with default parameters
pub fn simulate_season<R: Rng + ?Sized>(
    state: &PlayerState,
    tactic: Tactic,
    world: &WorldTeams,
    localize: &dyn Localize,
    rng: &mut R,
) -> Result<SeasonOutcome> {
    SeasonSimulator::default().simulate(state, tactic, world, localize, rng)
}
