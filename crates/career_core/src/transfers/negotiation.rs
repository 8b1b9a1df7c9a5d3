//! Transfer window decisions: accepting an offer, staying, renewing and
//! falling back to free agency.
//!
//! Every operation takes the current state and history by reference and
//! returns new values; the caller commits them only on success.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TransferParams;
use crate::error::{CareerError, Result};
use crate::localization::Localize;
use crate::models::{
    append_event, Event, EventKind, Flag, History, LoanSpell, PlayerState, Team, Trait, WorldTeams,
};
use crate::transfers::offer::{Offer, OfferKind};

/// Terms the player asks for when renewing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTerms {
    pub wage: i64,
    pub years: u8,
}

/// Contract length a club proposes at renewal
pub fn proposed_years(age: u8) -> u8 {
    match age {
        0..=24 => 4,
        25..=29 => 3,
        30..=32 => 2,
        _ => 1,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Negotiator {
    params: TransferParams,
}

impl Negotiator {
    pub fn new(params: TransferParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TransferParams {
        &self.params
    }

    /// Strictly better than the current situation: much higher pay or a
    /// clearly bigger club
    pub fn is_strictly_better(&self, offer: &Offer, state: &PlayerState, world: &WorldTeams) -> bool {
        let current_reputation = world.get(state.club).map_or(0, |t| t.reputation) as i32;
        let offered_reputation = world.get(offer.team).map_or(0, |t| t.reputation) as i32;
        offer.wage as f64 > state.wage as f64 * self.params.better_wage_ratio
            || offered_reputation >= current_reputation + self.params.better_reputation_margin as i32
    }

    pub fn accept_offer(
        &self,
        state: &PlayerState,
        history: &History,
        world: &WorldTeams,
        offer_id: Uuid,
        localize: &dyn Localize,
    ) -> Result<(PlayerState, History)> {
        if state.is_retired() {
            return Err(CareerError::Retired);
        }
        let offer = state
            .transfer_offers
            .iter()
            .find(|o| o.id == offer_id && o.is_valid(state.current_season))
            .ok_or_else(|| CareerError::OfferNotFound(offer_id.to_string()))?;
        let buyer = world.get(offer.team).ok_or_else(|| CareerError::OfferNotFound(offer_id.to_string()))?;
        let from = club_name(world, state);

        let mut next = state.clone();
        let kind = match offer.kind {
            OfferKind::Transfer { fee } => {
                next.loan = None;
                next.club = buyer.id;
                next.wage = offer.wage;
                next.contract_length = offer.contract_length;
                if state.contract_length == 0 {
                    EventKind::FreeAgentSigning { club: buyer.name.clone() }
                } else {
                    EventKind::Transfer { from, to: buyer.name.clone(), fee }
                }
            }
            OfferKind::Loan { .. } => {
                if state.contract_length == 0 {
                    return Err(CareerError::ContractExpired);
                }
                // A loan from a loan keeps the original parent
                let (parent_club, parent_wage) = match &state.loan {
                    Some(loan) => (loan.parent_club, loan.parent_wage),
                    None => (state.club, state.wage),
                };
                next.loan = Some(LoanSpell {
                    parent_club,
                    parent_wage,
                    ends_after_season: state.current_season,
                });
                next.club = buyer.id;
                next.wage = offer.wage;
                EventKind::LoanMove { from, to: buyer.name.clone() }
            }
        };

        next.transfer_offers.clear();
        next.is_forced_to_move = false;
        next.agitating_for_transfer = false;
        next.team_chemistry = 40;
        next.club_approval = 50;
        next.flags.clear(Flag::WantsTransfer);

        log::info!("{} accepted an offer from {} ({:?})", state.name, buyer.name, offer.kind);
        let history = commit_event(history, state, kind, localize);
        Ok((next, history))
    }

    pub fn stay_at_club(
        &self,
        state: &PlayerState,
        history: &History,
        world: &WorldTeams,
        terms: Option<ContractTerms>,
        localize: &dyn Localize,
    ) -> Result<(PlayerState, History)> {
        if state.is_retired() {
            return Err(CareerError::Retired);
        }
        if state.is_forced_to_move {
            return Err(CareerError::ForcedToMove);
        }

        let (mut next, mut history) = if state.contract_length <= 1 {
            let terms = terms.ok_or(CareerError::NegotiationRequired)?;
            self.renew_contract(state, history, world, Some(terms.wage), Some(terms.years), localize)?
        } else {
            (state.clone(), history.clone())
        };

        let pending: Vec<&Offer> =
            state.transfer_offers.iter().filter(|o| o.is_valid(state.current_season)).collect();
        if !pending.is_empty() {
            if next.has_trait(Trait::Ambitious) && pending.iter().any(|o| self.is_strictly_better(o, state, world)) {
                next.morale = next.morale.step_down();
            }
            if next.has_trait(Trait::Loyal) || next.has_trait(Trait::OneClub) {
                next.morale = next.morale.step_up();
                next.adjust_chemistry(5);
            }
            history = commit_event(&history, state, EventKind::StayedLoyal, localize);
        }
        next.transfer_offers.clear();

        log::debug!("{} stays at {} (morale {:?})", state.name, club_name(world, state), next.morale);
        Ok((next, history))
    }

    /// What the club puts on the table before any negotiation
    pub fn club_proposal(&self, state: &PlayerState, world: &WorldTeams) -> Result<ContractTerms> {
        let club = contracting_club(state, world)?;
        let current = state.loan.as_ref().map_or(state.wage, |l| l.parent_wage);
        let market = (state.market_wage() as f64 * club.wage_factor()).round() as i64;
        Ok(ContractTerms { wage: current.max(market), years: proposed_years(state.age) })
    }

    pub fn renew_contract(
        &self,
        state: &PlayerState,
        history: &History,
        world: &WorldTeams,
        wage: Option<i64>,
        years: Option<u8>,
        localize: &dyn Localize,
    ) -> Result<(PlayerState, History)> {
        if state.is_retired() {
            return Err(CareerError::Retired);
        }
        if state.is_forced_to_move {
            return Err(CareerError::ForcedToMove);
        }
        let proposal = self.club_proposal(state, world)?;
        let wage = wage.unwrap_or(proposal.wage);
        let years = years.unwrap_or(proposal.years);

        let ceiling = (proposal.wage as f64 * self.params.negotiation_ceiling).floor() as i64;
        if wage > ceiling {
            return Err(CareerError::NegotiationRejected(format!(
                "wage {} is above the club's limit of {}",
                wage, ceiling
            )));
        }
        if wage <= 0 {
            return Err(CareerError::NegotiationRejected(format!("wage {} must be positive", wage)));
        }
        if !(1..=5).contains(&years) {
            return Err(CareerError::NegotiationRejected(format!(
                "contract length {} must be between 1 and 5 years",
                years
            )));
        }

        let mut next = state.clone();
        match next.loan.as_mut() {
            Some(loan) => loan.parent_wage = wage,
            None => next.wage = wage,
        }
        next.contract_length = years;

        log::info!("{} renewed for {} year(s) at {}", state.name, years, wage);
        let history = commit_event(history, state, EventKind::ContractRenewed { years, wage }, localize);
        Ok((next, history))
    }

    /// Terminal fallback for a forced player nobody wants: the weakest senior
    /// club of the player's country signs them on a one-year minimum deal
    pub fn release_to_free_agency(
        &self,
        state: &PlayerState,
        history: &History,
        world: &WorldTeams,
        localize: &dyn Localize,
    ) -> Result<(PlayerState, History)> {
        if state.is_retired() {
            return Err(CareerError::Retired);
        }
        let senior = || world.iter().filter(|t| !t.is_youth && t.id != state.club);
        let club = senior()
            .filter(|t| t.country == state.nationality)
            .min_by_key(|t| (t.reputation, t.id))
            .or_else(|| senior().min_by_key(|t| (t.reputation, t.id)))
            .ok_or(CareerError::UnknownTeam(state.club))?;

        let mut next = state.clone();
        next.loan = None;
        next.club = club.id;
        next.contract_length = 1;
        next.wage = self.params.free_agent_wage.max(state.market_wage() / 4);
        next.transfer_offers.clear();
        next.is_forced_to_move = false;
        next.agitating_for_transfer = false;
        next.team_chemistry = 40;
        next.club_approval = 50;

        log::warn!("{} had no offers and signs for {} as a free agent", state.name, club.name);
        let history =
            commit_event(history, state, EventKind::FreeAgentSigning { club: club.name.clone() }, localize);
        Ok((next, history))
    }
}

/// The club holding the player's registration
fn contracting_club<'a>(state: &PlayerState, world: &'a WorldTeams) -> Result<&'a Team> {
    let id = state.loan.as_ref().map_or(state.club, |l| l.parent_club);
    world.get(id).ok_or(CareerError::UnknownTeam(id))
}

fn club_name(world: &WorldTeams, state: &PlayerState) -> String {
    world.get(state.club).map_or_else(|| state.club.to_string(), |t| t.name.clone())
}

/// Window events belong to the season that just ended
fn commit_event(history: &History, state: &PlayerState, kind: EventKind, localize: &dyn Localize) -> History {
    let season = state.current_season.saturating_sub(1);
    let event = Event::described(season, kind, localize);
    match history.last_index() {
        Some(index) => append_event(history, index, event),
        None => history.clone(),
    }
}
