//! Career orchestration
//!
//! `CareerCycle` owns one career and drives the engines through the season
//! phases `Training → Simulated → Offers → Training`. Every step works on
//! copies and commits only when the engine succeeded, so a failed step leaves
//! the career exactly as it was.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::observer::CareerObserver;
use super::repository::CareerRepository;
use crate::config::CareerConfig;
use crate::error::{CareerError, Result};
use crate::localization::Localize;
use crate::models::{
    append_event, CareerMode, Event, EventKind, History, PlayerState, SeasonLog, WorldTeams,
};
use crate::rng::{stream_rng, Stream};
use crate::save::CareerSave;
use crate::scoring::{CareerScorer, Leaderboard, LeaderboardEntry, LegacyTier, RealTotals, ScoreBreakdown};
use crate::season::{SeasonSimulator, Tactic};
use crate::training::{Outcome, TrainingContext, TrainingEngine, TrainingFocus, TrainingPlan, TrainingResult};
use crate::transfers::{ContractTerms, Negotiator, Offer, OfferGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CyclePhase {
    /// Training may run, then the season is simulated
    Training,
    /// Season committed, transfer window not yet opened
    Simulated,
    /// Offers on the table, waiting for a decision
    Offers,
}

impl CyclePhase {
    pub fn name(&self) -> &'static str {
        match self {
            CyclePhase::Training => "training",
            CyclePhase::Simulated => "simulated",
            CyclePhase::Offers => "offers",
        }
    }
}

impl fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the transfer window ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDecision {
    Accepted(Uuid),
    Stayed,
    Renewed,
    Released,
}

/// The four engines configured from one `CareerConfig`
#[derive(Debug, Clone, Default)]
pub struct Engines {
    pub training: TrainingEngine,
    pub season: SeasonSimulator,
    pub offers: OfferGenerator,
    pub negotiator: Negotiator,
    pub scorer: CareerScorer,
}

impl Engines {
    pub fn from_config(config: &CareerConfig) -> Self {
        Self {
            training: TrainingEngine::new(config.training.clone()),
            season: SeasonSimulator::new(config.season.clone()),
            offers: OfferGenerator::new(config.transfer.clone()),
            negotiator: Negotiator::new(config.transfer.clone()),
            scorer: CareerScorer::new(config.scoring.clone()),
        }
    }
}

pub struct CareerCycle {
    state: PlayerState,
    history: History,
    world: WorldTeams,
    tactic: Tactic,
    seed: u64,
    phase: CyclePhase,
    trained: bool,
    breakthroughs: Vec<TrainingFocus>,
    leaderboard: Leaderboard,
    engines: Engines,
    localizer: Box<dyn Localize>,
    observers: Vec<Box<dyn CareerObserver>>,
}

impl fmt::Debug for CareerCycle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CareerCycle")
            .field("player", &self.state.name)
            .field("season", &self.state.current_season)
            .field("phase", &self.phase)
            .field("seed", &self.seed)
            .finish()
    }
}

impl CareerCycle {
    /// Start a career. The history opens with the academy of the player's
    /// country, or the club itself when the country has none.
    pub fn new(
        state: PlayerState,
        world: WorldTeams,
        seed: u64,
        config: &CareerConfig,
        localizer: Box<dyn Localize>,
    ) -> Result<Self> {
        let club = world.get(state.club).ok_or(CareerError::UnknownTeam(state.club))?;
        let academy = world.academy(&state.nationality).unwrap_or(club);
        let history = History::baseline(
            academy.id,
            &academy.name,
            state.age.saturating_sub(1),
            state.first_year,
            localizer.as_ref(),
        );
        log::info!("New career for {} at {} (seed {})", state.name, club.name, seed);

        Ok(Self {
            state,
            history,
            world,
            tactic: Tactic::default(),
            seed,
            phase: CyclePhase::Training,
            trained: false,
            breakthroughs: Vec::new(),
            leaderboard: Leaderboard::new(config.scoring.leaderboard_size),
            engines: Engines::from_config(config),
            localizer,
            observers: Vec::new(),
        })
    }

    /// Resume a saved career. Pending offers reopen the transfer window.
    pub fn from_save(save: CareerSave, config: &CareerConfig, localizer: Box<dyn Localize>) -> Result<Self> {
        save.validate()?;
        let phase = if save.player.transfer_offers.is_empty() { CyclePhase::Training } else { CyclePhase::Offers };
        Ok(Self {
            state: save.player,
            history: save.history,
            world: save.world,
            tactic: save.tactic,
            seed: save.seed,
            phase,
            trained: save.trained,
            breakthroughs: save.breakthroughs,
            leaderboard: save.leaderboard,
            engines: Engines::from_config(config),
            localizer,
            observers: Vec::new(),
        })
    }

    pub fn to_save(&self) -> CareerSave {
        CareerSave::new(
            self.state.clone(),
            self.history.clone(),
            self.world.clone(),
            self.tactic,
            self.seed,
            self.leaderboard.clone(),
        )
        .with_training(self.trained, self.breakthroughs.clone())
    }

    pub fn save_to(&self, repository: &mut dyn CareerRepository, key: &str) -> Result<()> {
        repository.save(key, &self.to_save())?;
        Ok(())
    }

    pub fn load_from(
        repository: &dyn CareerRepository,
        key: &str,
        config: &CareerConfig,
        localizer: Box<dyn Localize>,
    ) -> Result<Self> {
        let save = repository.load(key)?;
        Self::from_save(save, config, localizer)
    }

    pub fn with_observer(mut self, observer: Box<dyn CareerObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn CareerObserver>) {
        self.observers.push(observer);
    }

    pub fn with_leaderboard(mut self, leaderboard: Leaderboard) -> Self {
        self.leaderboard = leaderboard;
        self
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn world(&self) -> &WorldTeams {
        &self.world
    }

    pub fn tactic(&self) -> Tactic {
        self.tactic
    }

    pub fn set_tactic(&mut self, tactic: Tactic) {
        self.tactic = tactic;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn engines(&self) -> &Engines {
        &self.engines
    }

    pub fn offers(&self) -> &[Offer] {
        &self.state.transfer_offers
    }

    fn require_phase(&self, expected: CyclePhase) -> Result<()> {
        if self.state.is_retired() {
            return Err(CareerError::Retired);
        }
        if self.phase != expected {
            return Err(CareerError::InvalidPhase(self.phase.name()));
        }
        Ok(())
    }

    /// Apply a training plan for the coming season. One plan per season.
    pub fn train(&mut self, plan: &TrainingPlan) -> Result<Vec<TrainingResult>> {
        self.require_phase(CyclePhase::Training)?;
        if self.trained {
            return Err(CareerError::InvalidPhase(self.phase.name()));
        }
        let team = self.world.get(self.state.club).ok_or(CareerError::UnknownTeam(self.state.club))?;
        let ctx = TrainingContext::new(team);
        let mut rng = stream_rng(self.seed, self.state.current_season, Stream::Training);

        let (next, results) = self.engines.training.apply_training(&self.state, plan, &ctx, &mut rng)?;
        self.state = next;
        self.trained = true;
        self.breakthroughs
            .extend(results.iter().filter(|r| r.outcome == Outcome::Excellent).map(|r| r.focus));
        Ok(results)
    }

    /// Dynamic-mode training: the engine picks an affordable plan
    pub fn auto_train(&mut self) -> Result<Vec<TrainingResult>> {
        self.require_phase(CyclePhase::Training)?;
        let team = self.world.get(self.state.club).ok_or(CareerError::UnknownTeam(self.state.club))?;
        let plan = self.engines.training.auto_select(&self.state, &TrainingContext::new(team));
        self.train(&plan)
    }

    /// Simulate the season and commit it. Engine errors and panics leave the
    /// career untouched; panics surface as `SimulationFailed`.
    pub fn simulate_season(&mut self) -> Result<&SeasonLog> {
        self.require_phase(CyclePhase::Training)?;
        let snapshot = (self.state.clone(), self.trained, self.breakthroughs.clone());
        if self.state.mode == CareerMode::Dynamic && !self.trained {
            if let Err(err) = self.auto_train() {
                log::warn!("Automatic training skipped: {}", err);
            }
        }

        let season = self.state.current_season;
        let mut rng = stream_rng(self.seed, season, Stream::Season);
        let simulator = &self.engines.season;
        let (state, tactic, world, localizer) = (&self.state, self.tactic, &self.world, self.localizer.as_ref());
        let outcome = match catch_unwind(AssertUnwindSafe(|| simulator.simulate(state, tactic, world, localizer, &mut rng))) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                log::warn!("Season {} for {} not simulated: {}", season, self.state.name, err);
                (self.state, self.trained, self.breakthroughs) = snapshot;
                return Err(err);
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!("Season {} simulation panicked: {}", season, message);
                (self.state, self.trained, self.breakthroughs) = snapshot;
                return Err(CareerError::SimulationFailed(message));
            }
        };

        let mut log = outcome.log;
        for focus in self.breakthroughs.drain(..) {
            log.events.push(Event::described(
                log.season,
                EventKind::TrainingBreakthrough { focus },
                self.localizer.as_ref(),
            ));
        }
        self.history.push(log);
        self.state = outcome.state;
        self.world = outcome.world;

        let totals = RealTotals::from_history(&self.history).combined();
        debug_assert!(totals.matches >= self.state.totals.matches);
        self.state.totals = totals;

        self.trained = false;
        self.phase = CyclePhase::Simulated;

        let log = self.history.last().ok_or_else(|| CareerError::SimulationFailed("empty history".into()))?;
        for observer in self.observers.iter_mut() {
            observer.on_season_end(&self.state, log);
        }
        Ok(log)
    }

    /// Generate offers for the window. A forced player nobody wants is
    /// released to free agency straight away and the window closes.
    pub fn open_transfer_window(&mut self) -> Result<&[Offer]> {
        if self.state.is_retired() {
            return Err(CareerError::Retired);
        }
        self.require_phase(CyclePhase::Simulated)?;

        let mut rng = stream_rng(self.seed, self.state.current_season, Stream::Transfers);
        let offers = self.engines.offers.generate_offers(
            &self.state,
            &self.world,
            self.state.agitating_for_transfer,
            self.state.is_forced_to_move,
            &mut rng,
        )?;

        if offers.is_empty() && self.state.is_forced_to_move {
            let (state, history) = self.engines.negotiator.release_to_free_agency(
                &self.state,
                &self.history,
                &self.world,
                self.localizer.as_ref(),
            )?;
            self.state = state;
            self.history = history;
            self.phase = CyclePhase::Training;
            return Ok(&[]);
        }

        self.state.transfer_offers = offers;
        self.phase = CyclePhase::Offers;
        Ok(&self.state.transfer_offers)
    }

    pub fn accept_offer(&mut self, offer_id: Uuid) -> Result<()> {
        self.require_phase(CyclePhase::Offers)?;
        let (state, history) = self.engines.negotiator.accept_offer(
            &self.state,
            &self.history,
            &self.world,
            offer_id,
            self.localizer.as_ref(),
        )?;
        self.state = state;
        self.history = history;
        self.phase = CyclePhase::Training;
        Ok(())
    }

    pub fn stay_at_club(&mut self, terms: Option<ContractTerms>) -> Result<()> {
        self.require_phase(CyclePhase::Offers)?;
        let (state, history) = self.engines.negotiator.stay_at_club(
            &self.state,
            &self.history,
            &self.world,
            terms,
            self.localizer.as_ref(),
        )?;
        self.state = state;
        self.history = history;
        self.phase = CyclePhase::Training;
        Ok(())
    }

    /// Renew with the current club, during the window or before training
    pub fn renew_contract(&mut self, wage: Option<i64>, years: Option<u8>) -> Result<()> {
        if self.state.is_retired() {
            return Err(CareerError::Retired);
        }
        if self.phase == CyclePhase::Simulated {
            return Err(CareerError::InvalidPhase(self.phase.name()));
        }
        let (state, history) = self.engines.negotiator.renew_contract(
            &self.state,
            &self.history,
            &self.world,
            wage,
            years,
            self.localizer.as_ref(),
        )?;
        self.state = state;
        self.history = history;
        Ok(())
    }

    /// Dynamic-mode window: a player who must or wants to leave takes the
    /// most attractive offer, everyone else stays and renews when needed
    pub fn resolve_window(&mut self) -> Result<WindowDecision> {
        if self.phase == CyclePhase::Simulated {
            self.open_transfer_window()?;
            if self.phase == CyclePhase::Training {
                return Ok(WindowDecision::Released);
            }
        }
        self.require_phase(CyclePhase::Offers)?;

        let best = self
            .state
            .transfer_offers
            .iter()
            .find(|o| !(o.is_loan() && self.state.contract_length == 0))
            .map(|o| o.id);
        if let Some(id) = best {
            if self.state.is_forced_to_move || self.state.agitating_for_transfer {
                self.accept_offer(id)?;
                return Ok(WindowDecision::Accepted(id));
            }
        }
        if self.state.is_forced_to_move {
            // Only unusable offers left
            self.state.transfer_offers.clear();
            let (state, history) = self.engines.negotiator.release_to_free_agency(
                &self.state,
                &self.history,
                &self.world,
                self.localizer.as_ref(),
            )?;
            self.state = state;
            self.history = history;
            self.phase = CyclePhase::Training;
            return Ok(WindowDecision::Released);
        }

        if self.state.contract_length <= 1 {
            let proposal = self.engines.negotiator.club_proposal(&self.state, &self.world)?;
            self.stay_at_club(Some(proposal))?;
            return Ok(WindowDecision::Renewed);
        }
        self.stay_at_club(None)?;
        Ok(WindowDecision::Stayed)
    }

    /// End the career, submit it to the leaderboard and return the final score
    pub fn retire(&mut self) -> Result<i64> {
        if self.state.is_retired() {
            return Err(CareerError::Retired);
        }
        let mut next = self.state.clone();
        next.retire();
        next.transfer_offers.clear();

        let event = Event::described(next.current_season.saturating_sub(1), EventKind::Retired, self.localizer.as_ref());
        let history = match self.history.last_index() {
            Some(index) => append_event(&self.history, index, event),
            None => self.history.clone(),
        };

        self.state = next;
        self.history = history;
        self.phase = CyclePhase::Training;

        let score = self.engines.scorer.score(&self.state, &self.history);
        self.leaderboard.submit(LeaderboardEntry::from_career(&self.state, &self.history, &self.engines.scorer));
        log::info!("{} retired with score {}", self.state.name, score);

        for observer in self.observers.iter_mut() {
            observer.on_retirement(&self.state, &self.history, score);
        }
        Ok(score)
    }

    pub fn score(&self) -> i64 {
        self.engines.scorer.score(&self.state, &self.history)
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        self.engines.scorer.breakdown(&self.state, &self.history)
    }

    pub fn tier(&self) -> LegacyTier {
        self.engines.scorer.tier(&self.state, &self.history)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
