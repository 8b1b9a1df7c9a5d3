// Training effect model: effectiveness, expected gain, stochastic execution
use rand::Rng;
use std::collections::BTreeMap;

use crate::config::TrainingParams;
use crate::models::{Attribute, PlayerState, Team};
use crate::training::cost::cost_of;
use crate::training::types::{Intensity, Outcome, TrainingResult, TrainingSession};

/// Growth multiplier by age
pub fn age_curve(age: u8) -> f32 {
    match age {
        0..=18 => 1.30,
        19..=21 => 1.15,
        22..=24 => 1.00,
        25..=27 => 0.80,
        28..=30 => 0.55,
        31..=33 => 0.30,
        _ => 0.15,
    }
}

/// Weight of the n-th concurrent session; later sessions reuse the last value
pub fn diminishing(params: &TrainingParams, session_index: usize) -> f32 {
    params
        .diminishing
        .get(session_index)
        .or_else(|| params.diminishing.last())
        .copied()
        .unwrap_or(0.0)
}

/// Fraction of the nominal gain still available below potential
pub fn headroom(state: &PlayerState) -> f32 {
    let gap = state.potential as f32 - state.overall() as f32;
    (gap / 10.0).clamp(0.1, 1.0)
}

pub fn effectiveness_of(
    params: &TrainingParams,
    state: &PlayerState,
    team: &Team,
    session: &TrainingSession,
) -> f32 {
    let facility = 1.0 + (team.facility_tier.max(1) - 1) as f32 * params.facility_bonus_per_tier;
    let trainer = 1.0 + session.trainer.map_or(0.0, |t| t.bonus());
    age_curve(state.age) * facility * trainer * diminishing(params, session.session_index)
}

pub fn expected_gain(
    params: &TrainingParams,
    state: &PlayerState,
    team: &Team,
    session: &TrainingSession,
) -> f32 {
    params.base_gain
        * session.intensity.effect_multiplier()
        * effectiveness_of(params, state, team, session)
        * headroom(state)
}

/// Round with probability equal to the fractional part
fn stochastic_round<R: Rng + ?Sized>(value: f32, rng: &mut R) -> i16 {
    let floor = value.floor();
    let frac = value - floor;
    let up = if frac > 0.0 && rng.gen::<f32>() < frac { 1 } else { 0 };
    floor as i16 + up
}

fn outcome_for(params: &TrainingParams, expected: f32, actual: f32) -> Outcome {
    if expected <= f32::EPSILON {
        return Outcome::Neutral;
    }
    let ratio = actual / expected;
    if ratio >= params.excellent_ratio {
        Outcome::Excellent
    } else if ratio >= params.good_ratio {
        Outcome::Good
    } else if ratio >= params.neutral_ratio {
        Outcome::Neutral
    } else {
        Outcome::Poor
    }
}

/// Roll one session. Pure with respect to `state`; see `TrainingEngine::apply`.
pub fn execute<R: Rng + ?Sized>(
    params: &TrainingParams,
    state: &PlayerState,
    team: &Team,
    session: &TrainingSession,
    rng: &mut R,
) -> TrainingResult {
    let expected = expected_gain(params, state, team, session);
    let variance = rng.gen_range(params.variance_min..=params.variance_max);
    let actual = expected * variance;

    let mut deltas: BTreeMap<Attribute, i16> = BTreeMap::new();
    let primary = stochastic_round(actual, rng);
    let secondary = stochastic_round(actual * params.secondary_weight, rng);
    if primary != 0 {
        *deltas.entry(session.focus.primary()).or_insert(0) += primary;
    }
    if secondary != 0 {
        *deltas.entry(session.focus.secondary()).or_insert(0) += secondary;
    }

    // Fatigue
    if session.intensity == Intensity::Intense && variance < params.fatigue_threshold {
        *deltas.entry(Attribute::Physical).or_insert(0) -= 1;
    }
    deltas.retain(|_, d| *d != 0);

    TrainingResult {
        focus: session.focus,
        deltas,
        expected_gain: expected,
        actual_gain: actual,
        cost_total: cost_of(state, session),
        outcome: outcome_for(params, expected, actual),
    }
}
