//! Transfer Offer Generator
//!
//! - [`offer`]: the `Offer` value and staleness filtering
//! - [`generator`]: interest rolls, fallback clubs, loans and ranking
//! - [`negotiation`]: accepting, staying, renewing and free agency

pub mod generator;
pub mod negotiation;
pub mod offer;


pub use generator::{contract_years, OfferGenerator, Pressure};
pub use negotiation::{proposed_years, ContractTerms, Negotiator};
pub use offer::{offer_id, prune_stale, Offer, OfferKind};

use rand::Rng;
use uuid::Uuid;

use crate::error::Result;
use crate::localization::Localize;
use crate::models::{History, PlayerState, WorldTeams};

/// `OfferGenerator::generate_offers` with default parameters
pub fn generate_offers<R: Rng + ?Sized>(
    state: &PlayerState,
    world: &WorldTeams,
    agitating: bool,
    forced: bool,
    rng: &mut R,
) -> Result<Vec<Offer>> {
    OfferGenerator::default().generate_offers(state, world, agitating, forced, rng)
}

pub fn accept_offer(
    state: &PlayerState,
    history: &History,
    world: &WorldTeams,
    offer_id: Uuid,
    localize: &dyn Localize,
) -> Result<(PlayerState, History)> {
    Negotiator::default().accept_offer(state, history, world, offer_id, localize)
}

pub fn stay_at_club(
    state: &PlayerState,
    history: &History,
    world: &WorldTeams,
    terms: Option<ContractTerms>,
    localize: &dyn Localize,
) -> Result<(PlayerState, History)> {
    Negotiator::default().stay_at_club(state, history, world, terms, localize)
}

pub fn renew_contract(
    state: &PlayerState,
    history: &History,
    world: &WorldTeams,
    wage: Option<i64>,
    years: Option<u8>,
    localize: &dyn Localize,
) -> Result<(PlayerState, History)> {
    Negotiator::default().renew_contract(state, history, world, wage, years, localize)
}

pub fn release_to_free_agency(
    state: &PlayerState,
    history: &History,
    world: &WorldTeams,
    localize: &dyn Localize,
) -> Result<(PlayerState, History)> {
    Negotiator::default().release_to_free_agency(state, history, world, localize)
}
