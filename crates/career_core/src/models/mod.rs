//! Player/career state model
//!
//! - `PlayerState` with attributes, finances, contract and flags
//! - `Team` / `WorldTeams` registry
//! - `History` of immutable `SeasonLog`s
//! - `Tally` records for trophies and awards

pub mod attributes;
pub mod flags;
pub mod history;
pub mod personality;
pub mod player;
pub mod tally;
pub mod team;

pub use attributes::{Attribute, PlayerAttributes, Position};
pub use flags::{is_active, EventFlag, Flag, FlagSet};
pub use history::{
    append_event, season_start_date, Event, EventKind, History, InternationalEntry, SeasonLog,
    SeasonStats,
};
pub use personality::{Personality, PersonalityArchetype, Trait};
pub use player::{market_value, market_wage, CareerMode, CareerTotals, LoanSpell, Morale, PlayerState};
pub use tally::{weighted_sum, Award, Prestige, Tally, Trophy, WeightTable};
pub use team::{Team, TeamId, WorldTeams};
