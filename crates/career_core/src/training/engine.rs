//! Training Engine: selection rules, planning and all-or-nothing application.

use rand::Rng;
use std::collections::BTreeSet;

use crate::config::TrainingParams;
use crate::error::{CareerError, Result};
use crate::models::{Flag, PlayerState, Team};
use crate::training::cost::{cost_of, plan_cost};
use crate::training::effects;
use crate::training::types::{
    Intensity, TrainerTier, TrainingFocus, TrainingPlan, TrainingResult, TrainingSession,
};

/// Club context a training plan runs in
#[derive(Debug, Clone, Copy)]
pub struct TrainingContext<'a> {
    pub team: &'a Team,
}

impl<'a> TrainingContext<'a> {
    pub fn new(team: &'a Team) -> Self {
        Self { team }
    }
}

/// Concurrent sessions the facilities and staff can support
pub fn max_slots(facility_tier: u8, trainer: Option<TrainerTier>) -> usize {
    let base = match facility_tier {
        0..=2 => 2,
        3..=4 => 3,
        _ => 4,
    };
    base + usize::from(trainer.map_or(false, |t| t.grants_extra_slot()))
}

#[derive(Debug, Clone, Default)]
pub struct TrainingEngine {
    params: TrainingParams,
}

impl TrainingEngine {
    pub fn new(params: TrainingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TrainingParams {
        &self.params
    }

    pub fn max_slots(&self, ctx: &TrainingContext, trainer: Option<TrainerTier>) -> usize {
        max_slots(ctx.team.facility_tier, trainer)
    }

    /// Reject duplicates, ineligible focuses and over-limit selections
    pub fn validate_plan(&self, state: &PlayerState, plan: &TrainingPlan, ctx: &TrainingContext) -> Result<()> {
        let mut seen = BTreeSet::new();
        for focus in &plan.focuses {
            if !seen.insert(*focus) {
                return Err(CareerError::DuplicateFocus(*focus));
            }
            if !focus.is_eligible(state.position) {
                return Err(CareerError::IneligibleFocus(*focus));
            }
        }
        let max = self.max_slots(ctx, plan.trainer);
        if plan.focuses.len() > max {
            return Err(CareerError::SlotLimitExceeded { max });
        }
        Ok(())
    }

    /// Add one focus to the player's stored plan
    pub fn select_focus(&self, state: &mut PlayerState, focus: TrainingFocus, ctx: &TrainingContext) -> Result<()> {
        let mut plan = state.training.clone();
        plan.focuses.push(focus);
        self.validate_plan(state, &plan, ctx)?;
        state.training = plan;
        Ok(())
    }

    pub fn deselect_focus(&self, state: &mut PlayerState, focus: TrainingFocus) -> bool {
        let before = state.training.focuses.len();
        state.training.focuses.retain(|f| *f != focus);
        state.training.focuses.len() != before
    }

    pub fn plan_sessions(
        &self,
        state: &PlayerState,
        plan: &TrainingPlan,
        ctx: &TrainingContext,
    ) -> Result<Vec<TrainingSession>> {
        self.validate_plan(state, plan, ctx)?;
        Ok(plan
            .focuses
            .iter()
            .enumerate()
            .map(|(session_index, focus)| TrainingSession {
                focus: *focus,
                intensity: plan.intensity,
                trainer: plan.trainer,
                duration_weeks: self.params.duration_weeks,
                started_season: state.current_season,
                session_index,
            })
            .collect())
    }

    pub fn cost_of(&self, state: &PlayerState, session: &TrainingSession) -> i64 {
        cost_of(state, session)
    }

    pub fn effectiveness_of(&self, state: &PlayerState, team: &Team, session: &TrainingSession) -> f32 {
        effects::effectiveness_of(&self.params, state, team, session)
    }

    pub fn execute<R: Rng + ?Sized>(
        &self,
        state: &PlayerState,
        team: &Team,
        session: &TrainingSession,
        rng: &mut R,
    ) -> TrainingResult {
        effects::execute(&self.params, state, team, session, rng)
    }

    /// Debit the session cost and apply its attribute deltas
    pub fn apply(&self, state: &mut PlayerState, result: &TrainingResult) -> Result<()> {
        if result.cost_total > state.bank_balance {
            return Err(CareerError::InsufficientFunds {
                required: result.cost_total,
                available: state.bank_balance,
            });
        }
        state.bank_balance -= result.cost_total;
        for (attribute, delta) in &result.deltas {
            state.attributes.apply_delta(*attribute, *delta);
        }
        state.recalculate();
        debug_assert!(state.bank_balance >= 0);
        Ok(())
    }

    /// Plan, price, execute and apply a whole selection.
    ///
    /// The total cost is checked before anything is rolled, so an unaffordable
    /// plan leaves the caller's state untouched. An empty plan is a no-op.
    pub fn apply_training<R: Rng + ?Sized>(
        &self,
        state: &PlayerState,
        plan: &TrainingPlan,
        ctx: &TrainingContext,
        rng: &mut R,
    ) -> Result<(PlayerState, Vec<TrainingResult>)> {
        if state.is_retired() {
            return Err(CareerError::Retired);
        }
        let sessions = self.plan_sessions(state, plan, ctx)?;
        let required = plan_cost(state, &sessions);
        if required > state.bank_balance {
            return Err(CareerError::InsufficientFunds { required, available: state.bank_balance });
        }

        let mut next = state.clone();
        let mut results = Vec::with_capacity(sessions.len());
        for session in &sessions {
            let mut result = self.execute(&next, ctx.team, session, rng);
            // Priced against the pre-training state so the total matches `required`
            result.cost_total = cost_of(state, session);
            self.apply(&mut next, &result)?;
            results.push(result);
        }

        match plan.intensity {
            Intensity::Intense if !sessions.is_empty() => next.flags.raise(Flag::IntenseTraining, state.current_season),
            Intensity::Light if !sessions.is_empty() => next.flags.raise(Flag::LightTraining, state.current_season),
            _ => {}
        }
        next.training = plan.clone();

        log::debug!(
            "{} trained {} focus(es) for {} (balance {} -> {})",
            state.name,
            sessions.len(),
            required,
            state.bank_balance,
            next.bank_balance
        );
        Ok((next, results))
    }

    /// Dynamic-mode plan: weakest relevant focuses, best affordable trainer
    pub fn auto_select(&self, state: &PlayerState, ctx: &TrainingContext) -> TrainingPlan {
        let mut ranked = TrainingFocus::eligible_for(state.position);
        let need = |focus: &TrainingFocus| {
            let value = state.attributes.get(focus.primary()) as f32;
            (100.0 - value) * (0.25 + state.position.relevance(focus.primary()))
        };
        ranked.sort_by(|a, b| need(b).total_cmp(&need(a)));

        let trainers = TrainerTier::ALL.iter().rev().copied().map(Some);
        for trainer in trainers {
            let slots = self.max_slots(ctx, trainer).min(ranked.len());
            let plan = TrainingPlan::new(ranked[..slots].to_vec(), Intensity::Normal, trainer);
            if self.plan_cost(state, &plan, ctx) <= state.bank_balance {
                return plan;
            }
        }

        let slots = self.max_slots(ctx, None).min(ranked.len());
        let mut plan = TrainingPlan::new(ranked[..slots].to_vec(), Intensity::Normal, None);
        while !plan.focuses.is_empty() && self.plan_cost(state, &plan, ctx) > state.bank_balance {
            plan.focuses.pop();
        }
        plan
    }

    fn plan_cost(&self, state: &PlayerState, plan: &TrainingPlan, ctx: &TrainingContext) -> i64 {
        match self.plan_sessions(state, plan, ctx) {
            Ok(sessions) => plan_cost(state, &sessions),
            Err(_) => i64::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, PlayerAttributes, Position};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn club(facility: u8) -> Team {
        Team::new(1, "Test FC", "England", 1, 70).with_facility(facility)
    }

    fn player(season: u32, balance: i64) -> PlayerState {
        let team = club(3);
        let mut p = PlayerState::rookie("P", Position::Forward, "England", &team);
        p.current_season = season;
        p.bank_balance = balance;
        p
    }

    #[test]
    fn test_max_slots_by_facility_and_trainer() {
        assert_eq!(max_slots(1, None), 2);
        assert_eq!(max_slots(2, Some(TrainerTier::Specialist)), 2);
        assert_eq!(max_slots(3, None), 3);
        assert_eq!(max_slots(5, None), 4);
        assert_eq!(max_slots(5, Some(TrainerTier::WorldClass)), 5);
        assert_eq!(max_slots(1, Some(TrainerTier::Elite)), 3);
    }

    #[test]
    fn test_third_focus_rejected_at_two_slots() {
        let engine = TrainingEngine::default();
        let team = club(1);
        let ctx = TrainingContext::new(&team);
        let mut p = player(2, 1_000_000);
        engine.select_focus(&mut p, TrainingFocus::Pace, &ctx).unwrap();
        engine.select_focus(&mut p, TrainingFocus::Shooting, &ctx).unwrap();
        let err = engine.select_focus(&mut p, TrainingFocus::Passing, &ctx).unwrap_err();
        assert_eq!(err, CareerError::SlotLimitExceeded { max: 2 });
        assert_eq!(p.training.focuses.len(), 2);
    }

    #[test]
    fn test_duplicate_and_ineligible_rejected() {
        let engine = TrainingEngine::default();
        let team = club(5);
        let ctx = TrainingContext::new(&team);
        let mut p = player(2, 1_000_000);
        engine.select_focus(&mut p, TrainingFocus::Pace, &ctx).unwrap();
        assert_eq!(
            engine.select_focus(&mut p, TrainingFocus::Pace, &ctx),
            Err(CareerError::DuplicateFocus(TrainingFocus::Pace))
        );
        assert_eq!(
            engine.select_focus(&mut p, TrainingFocus::Goalkeeping, &ctx),
            Err(CareerError::IneligibleFocus(TrainingFocus::Goalkeeping))
        );
        assert!(engine.deselect_focus(&mut p, TrainingFocus::Pace));
        assert!(p.training.focuses.is_empty());
    }

    #[test]
    fn test_unaffordable_plan_leaves_state_unchanged() {
        let engine = TrainingEngine::default();
        let team = club(3);
        let ctx = TrainingContext::new(&team);
        let p = player(3, 10_000);
        let plan = TrainingPlan::new(
            vec![TrainingFocus::Shooting, TrainingFocus::Pace],
            Intensity::Intense,
            Some(TrainerTier::Specialist),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let before = p.clone();
        let err = engine.apply_training(&p, &plan, &ctx, &mut rng).unwrap_err();
        assert!(matches!(err, CareerError::InsufficientFunds { available: 10_000, .. }));
        assert_eq!(p, before);
    }

    #[test]
    fn test_first_season_training_is_free() {
        let engine = TrainingEngine::default();
        let team = club(3);
        let ctx = TrainingContext::new(&team);
        let p = player(1, 0);
        let plan = TrainingPlan::new(
            vec![TrainingFocus::Shooting, TrainingFocus::Dribbling, TrainingFocus::Pace],
            Intensity::Intense,
            None,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let (next, results) = engine.apply_training(&p, &plan, &ctx, &mut rng).unwrap();
        assert_eq!(next.bank_balance, 0);
        assert!(results.iter().all(|r| r.cost_total == 0));
        assert!(next.flags.is_raised(Flag::IntenseTraining, 1));
    }

    #[test]
    fn test_balance_drops_by_total_cost() {
        let engine = TrainingEngine::default();
        let team = club(3);
        let ctx = TrainingContext::new(&team);
        let p = player(4, 500_000);
        let plan = TrainingPlan::new(vec![TrainingFocus::Shooting, TrainingFocus::Mental], Intensity::Normal, None);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let (next, results) = engine.apply_training(&p, &plan, &ctx, &mut rng).unwrap();
        let spent: i64 = results.iter().map(|r| r.cost_total).sum();
        assert!(spent > 0);
        assert_eq!(next.bank_balance, p.bank_balance - spent);
        assert_eq!(next.totals, p.totals);
        assert_eq!(next.contract_length, p.contract_length);
    }

    #[test]
    fn test_auto_select_prefers_weak_relevant_attributes() {
        let engine = TrainingEngine::default();
        let team = club(3);
        let ctx = TrainingContext::new(&team);
        let mut attrs = PlayerAttributes::uniform(70);
        attrs.set(Attribute::Shooting, 40);
        let p = player(1, 0).with_attributes(attrs);
        let plan = engine.auto_select(&p, &ctx);
        assert_eq!(plan.focuses.first(), Some(&TrainingFocus::Shooting));
        // Free season: the best trainer and every slot
        assert_eq!(plan.trainer, Some(TrainerTier::WorldClass));
        assert_eq!(plan.focuses.len(), 4);
    }

    #[test]
    fn test_auto_select_fits_budget() {
        let engine = TrainingEngine::default();
        let team = club(3);
        let ctx = TrainingContext::new(&team);
        for balance in [0, 9_000, 30_000, 120_000] {
            let p = player(5, balance);
            let plan = engine.auto_select(&p, &ctx);
            assert!(engine.plan_cost(&p, &plan, &ctx) <= balance);
        }
    }
}
