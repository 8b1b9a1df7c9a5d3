//! Transfer Offer Generator
//!
//! Reads the player's transfer pressure (calm, agitating or forced) and the
//! world registry, and produces a ranked list of offers.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{ByPressure, TransferParams};
use crate::error::{CareerError, Result};
use crate::models::{PlayerState, Team, TeamId, WorldTeams};
use crate::transfers::offer::{offer_id, prune_stale, Offer};

/// How hard the player is pushing for a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pressure {
    Calm,
    Agitating,
    Forced,
}

impl Pressure {
    pub fn from_flags(agitating: bool, forced: bool) -> Self {
        if forced {
            Pressure::Forced
        } else if agitating {
            Pressure::Agitating
        } else {
            Pressure::Calm
        }
    }

    fn pick<T: Copy>(&self, values: &ByPressure<T>) -> T {
        match self {
            Pressure::Calm => values.calm,
            Pressure::Agitating => values.agitating,
            Pressure::Forced => values.forced,
        }
    }
}

/// Contract years a club offers at a given age
pub fn contract_years<R: Rng + ?Sized>(age: u8, rng: &mut R) -> u8 {
    match age {
        0..=24 => rng.gen_range(4..=5),
        25..=29 => rng.gen_range(3..=4),
        30..=32 => 2,
        _ => 1,
    }
}

#[derive(Debug, Clone, Default)]
pub struct OfferGenerator {
    params: TransferParams,
}

impl OfferGenerator {
    pub fn new(params: TransferParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TransferParams {
        &self.params
    }

    pub fn generate_offers<R: Rng + ?Sized>(
        &self,
        state: &PlayerState,
        world: &WorldTeams,
        agitating: bool,
        forced: bool,
        rng: &mut R,
    ) -> Result<Vec<Offer>> {
        if state.is_retired() {
            return Err(CareerError::Retired);
        }
        let current = world.get(state.club).ok_or(CareerError::UnknownTeam(state.club))?;
        let pressure = Pressure::from_flags(agitating, forced);
        let overall = state.overall() as i32;
        let market = state.market_wage();

        let excluded: Vec<TeamId> =
            std::iter::once(state.club).chain(state.loan.as_ref().map(|l| l.parent_club)).collect();
        let candidates: Vec<&Team> =
            world.iter().filter(|t| !t.is_youth && !excluded.contains(&t.id)).collect();

        let slack = pressure.pick(&self.params.interest_slack) as i32;
        let probability = pressure.pick(&self.params.interest_probability).clamp(0.0, 1.0);
        let passes: Vec<&Team> = candidates
            .iter()
            .copied()
            .filter(|t| overall + slack >= t.squad_strength as i32)
            .filter(|t| pressure != Pressure::Calm || self.is_step_up(state, current, t))
            .collect();
        let mut interested: Vec<&Team> = passes.into_iter().filter(|_| rng.gen_bool(probability)).collect();

        if pressure == Pressure::Forced && interested.is_empty() {
            interested = self.fallback_clubs(overall, &candidates);
        }

        let mut offers: Vec<Offer> =
            interested.iter().map(|team| self.transfer_offer(state, team, rng)).collect();

        if pressure != Pressure::Forced && self.loan_candidate(state, current) {
            let mut lenders: Vec<&Team> = candidates
                .iter()
                .copied()
                .filter(|t| t.reputation < current.reputation && overall + slack >= t.squad_strength as i32)
                .collect();
            lenders.shuffle(rng);
            for team in lenders.into_iter().take(2) {
                let share = rng.gen_range(0.5..=1.0);
                offers.push(Offer::loan(team, share, state.wage, state.current_season).with_id(offer_id(rng)));
            }
        }

        let score = |offer: &Offer| {
            let reputation = world.get(offer.team).map_or(0, |t| t.reputation);
            offer.attractiveness(reputation, market)
        };
        offers.sort_by(|a, b| score(b).total_cmp(&score(a)));
        offers.truncate(pressure.pick(&self.params.max_offers));
        let offers = prune_stale(offers, world, state.current_season);

        log::debug!(
            "{} offer(s) for {} ({:?}, overall {}, club {})",
            offers.len(),
            state.name,
            pressure,
            overall,
            current.name
        );
        Ok(offers)
    }

    /// Without pressure only a clear step up in prestige and pay tempts the player
    fn is_step_up(&self, state: &PlayerState, current: &Team, team: &Team) -> bool {
        let expected_wage = state.market_wage() as f64 * team.wage_factor();
        team.reputation as i32 >= current.reputation as i32 + self.params.reputation_margin as i32
            && expected_wage > state.wage as f64 * self.params.wage_margin
    }

    /// Weakest clubs that would still take the player
    fn fallback_clubs<'a>(&self, overall: i32, candidates: &[&'a Team]) -> Vec<&'a Team> {
        let mut fallback: Vec<&Team> = candidates
            .iter()
            .copied()
            .filter(|t| overall + self.params.fallback_slack as i32 >= t.squad_strength as i32)
            .collect();
        fallback.sort_by_key(|t| (t.squad_strength, t.id));
        fallback.truncate(self.params.fallback_count);
        fallback
    }

    fn loan_candidate(&self, state: &PlayerState, current: &Team) -> bool {
        state.age <= self.params.loan_max_age
            && (state.overall() as i32) + (self.params.loan_gap as i32) < current.squad_strength as i32
    }

    fn transfer_offer<R: Rng + ?Sized>(&self, state: &PlayerState, team: &Team, rng: &mut R) -> Offer {
        let wage = state.market_wage() as f64 * team.wage_factor() * rng.gen_range(0.9..=1.15);
        let fee = if state.contract_length == 0 {
            0
        } else {
            (state.market_value() as f64 * rng.gen_range(0.8..=1.2)).round() as i64
        };
        let years = contract_years(state.age, rng);
        Offer::transfer(team, fee, wage.round() as i64, years, state.current_season).with_id(offer_id(rng))
    }
}
