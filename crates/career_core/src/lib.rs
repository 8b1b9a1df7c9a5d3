//! # career_core - Deterministic Football Career Progression Engine
//!
//! Simulates a footballer's career from academy graduate to retirement.
//!
//! ## Engines
//! - Training: attribute growth from a weekly plan
//! - Season: appearances, stats, competitions, awards and events
//! - Transfers: offers, loans, renewals and free agency
//! - Scoring: a single career score and legacy tier
//!
//! Every random draw comes from a seeded ChaCha stream, so the same seed and
//! the same decisions always replay the same career.
//!
//! ```rust
//! use career_core::models::{Position, PlayerState, TeamId, WorldTeams};
//! use career_core::{CareerConfig, CareerCycle, KeyLocalizer};
//!
//! let world = WorldTeams::sample();
//! let club = world.get(TeamId(16)).unwrap().clone();
//! let rookie = PlayerState::rookie("Sam Carter", Position::Forward, "England", &club);
//! let mut career =
//!     CareerCycle::new(rookie, world, 42, &CareerConfig::default(), Box::new(KeyLocalizer)).unwrap();
//! career.auto_train().unwrap();
//! career.simulate_season().unwrap();
//! assert_eq!(career.history().len(), 2);
//! ```

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Engine entry points take the whole career context
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod career;
pub mod config;
pub mod error;
pub mod localization;
pub mod models;
pub mod rng;
pub mod save;
pub mod scoring;
pub mod season;
pub mod training;
pub mod transfers;

// Re-export main API functions
pub use api::{offers_json, score_json, simulate_season_json, train_json, ApiError, ApiResponse};
pub use error::{CareerError, Result};

// Orchestration
pub use career::{
    CareerCycle, CareerObserver, CareerRepository, CyclePhase, LoggingObserver, MemoryRepository,
    WindowDecision,
};
pub use config::{CareerConfig, ConfigError};
pub use localization::{FluentLocalizer, KeyLocalizer, Localize};

// Engines
pub use scoring::{CareerScorer, LegacyTier, ScoreBreakdown};
pub use season::{SeasonOutcome, SeasonSimulator, Tactic};
pub use training::{TrainingEngine, TrainingPlan};
pub use transfers::{Negotiator, Offer, OfferGenerator};

// Save system
pub use save::{CareerSave, FileRepository, SaveError, SAVE_VERSION};
