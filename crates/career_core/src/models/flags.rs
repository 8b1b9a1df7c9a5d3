//! Season-stamped event flags
//!
//! A flag is a transient signal raised during one season and lapsing after
//! the next one. Expiry is a pure function of the issuing season.

use serde::{Deserialize, Serialize};

/// Number of seasons after issue during which a flag stays active
pub const FLAG_LIFETIME: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Flag {
    WantsTransfer,
    ManagerConflict,
    TeammateConflict,
    IntenseTraining,
    LightTraining,
    Benched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFlag {
    pub flag: Flag,
    pub issued_season: u32,
}

impl EventFlag {
    pub fn new(flag: Flag, issued_season: u32) -> Self {
        Self { flag, issued_season }
    }
}

/// Active iff issued this season or the one before
pub fn is_active(flag: &EventFlag, current_season: u32) -> bool {
    current_season >= flag.issued_season
        && current_season - flag.issued_season <= FLAG_LIFETIME
}

/// Flag collection carried by the player state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSet {
    entries: Vec<EventFlag>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise a flag; re-raising refreshes the issuing season
    pub fn raise(&mut self, flag: Flag, season: u32) {
        match self.entries.iter_mut().find(|e| e.flag == flag) {
            Some(entry) => entry.issued_season = entry.issued_season.max(season),
            None => self.entries.push(EventFlag::new(flag, season)),
        }
    }

    pub fn clear(&mut self, flag: Flag) {
        self.entries.retain(|e| e.flag != flag);
    }

    pub fn is_raised(&self, flag: Flag, current_season: u32) -> bool {
        self.entries.iter().any(|e| e.flag == flag && is_active(e, current_season))
    }

    /// Issued exactly in the given season
    pub fn raised_in(&self, flag: Flag, season: u32) -> bool {
        self.entries.iter().any(|e| e.flag == flag && e.issued_season == season)
    }

    /// Drop flags no longer active
    pub fn prune(&mut self, current_season: u32) {
        self.entries.retain(|e| is_active(e, current_season));
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventFlag> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
