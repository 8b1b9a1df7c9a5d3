//! Training Engine
//!
//! Turns a [`TrainingPlan`] into priced [`TrainingSession`]s, rolls them with
//! an injected RNG and applies the results to the player state.

pub mod cost;
pub mod effects;
pub mod engine;
pub mod types;


pub use cost::{cost_of, plan_cost};
pub use effects::{age_curve, diminishing, effectiveness_of, expected_gain, headroom};
pub use engine::{max_slots, TrainingContext, TrainingEngine};
pub use types::{
    Intensity, Outcome, TrainerTier, TrainingFocus, TrainingPlan, TrainingResult, TrainingSession,
};

use rand::Rng;

use crate::error::Result;
use crate::models::PlayerState;

/// `TrainingEngine::apply_training` with default parameters
pub fn apply_training<R: Rng + ?Sized>(
    state: &PlayerState,
    plan: &TrainingPlan,
    ctx: &TrainingContext,
    rng: &mut R,
) -> Result<(PlayerState, Vec<TrainingResult>)> {
    TrainingEngine::default().apply_training(state, plan, ctx, rng)
}
