//! Career history: one immutable `SeasonLog` per season, append-only.
//!
//! Index 0 is the pre-career baseline ("joined academy").

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::tally::{Award, Tally, Trophy};
use super::team::TeamId;
use crate::training::TrainingFocus;

/// Aggregated club statistics for one season
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    pub matches: u32,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheets: u32,
    pub average_rating: f32,
    /// Fraction of available fixtures the player appeared in
    pub minutes_share: f32,
}

/// National-team contribution for one competition in one season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternationalEntry {
    pub competition: String,
    pub matches: u32,
    pub goals: u32,
    pub assists: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventKind {
    JoinedAcademy { club: String },
    Debut,
    GoalMilestone { goals: u32 },
    MatchMilestone { matches: u32 },
    Injury { weeks: u8 },
    ManagerConflict,
    TeammateConflict,
    Benched,
    TrophyWon { trophy: Trophy },
    AwardWon { award: Award },
    InternationalCallUp { country: String },
    TrainingBreakthrough { focus: TrainingFocus },
    Transfer { from: String, to: String, fee: i64 },
    LoanMove { from: String, to: String },
    LoanReturn { to: String },
    ContractRenewed { years: u8, wage: i64 },
    ContractExpired,
    Released,
    FreeAgentSigning { club: String },
    Promoted,
    Relegated,
    StayedLoyal,
    Retired,
}

impl EventKind {
    /// Localization key of the narrative line
    pub fn key(&self) -> &'static str {
        match self {
            EventKind::JoinedAcademy { .. } => "event-joined-academy",
            EventKind::Debut => "event-debut",
            EventKind::GoalMilestone { .. } => "event-goal-milestone",
            EventKind::MatchMilestone { .. } => "event-match-milestone",
            EventKind::Injury { .. } => "event-injury",
            EventKind::ManagerConflict => "event-manager-conflict",
            EventKind::TeammateConflict => "event-teammate-conflict",
            EventKind::Benched => "event-benched",
            EventKind::TrophyWon { .. } => "event-trophy",
            EventKind::AwardWon { .. } => "event-award",
            EventKind::InternationalCallUp { .. } => "event-call-up",
            EventKind::TrainingBreakthrough { .. } => "event-training-breakthrough",
            EventKind::Transfer { .. } => "event-transfer",
            EventKind::LoanMove { .. } => "event-loan",
            EventKind::LoanReturn { .. } => "event-loan-return",
            EventKind::ContractRenewed { .. } => "event-contract-renewed",
            EventKind::ContractExpired => "event-contract-expired",
            EventKind::Released => "event-released",
            EventKind::FreeAgentSigning { .. } => "event-free-agent",
            EventKind::Promoted => "event-promoted",
            EventKind::Relegated => "event-relegated",
            EventKind::StayedLoyal => "event-stayed",
            EventKind::Retired => "event-retired",
        }
    }

    /// Arguments for the localized message
    pub fn args(&self) -> Vec<(&'static str, String)> {
        match self {
            EventKind::JoinedAcademy { club } => vec![("club", club.clone())],
            EventKind::GoalMilestone { goals } => vec![("goals", goals.to_string())],
            EventKind::MatchMilestone { matches } => vec![("matches", matches.to_string())],
            EventKind::Injury { weeks } => vec![("weeks", weeks.to_string())],
            EventKind::TrophyWon { trophy } => vec![("trophy", trophy.key().to_string())],
            EventKind::AwardWon { award } => vec![("award", award.key().to_string())],
            EventKind::InternationalCallUp { country } => vec![("country", country.clone())],
            EventKind::TrainingBreakthrough { focus } => {
                vec![("focus", format!("{:?}", focus).to_lowercase())]
            }
            EventKind::Transfer { from, to, fee } => {
                vec![("from", from.clone()), ("to", to.clone()), ("fee", fee.to_string())]
            }
            EventKind::LoanMove { from, to } => vec![("from", from.clone()), ("to", to.clone())],
            EventKind::LoanReturn { to } => vec![("to", to.clone())],
            EventKind::ContractRenewed { years, wage } => {
                vec![("years", years.to_string()), ("wage", wage.to_string())]
            }
            EventKind::FreeAgentSigning { club } => vec![("club", club.clone())],
            _ => Vec::new(),
        }
    }
}

/// Narrative event; `description` is resolved through the injected localizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub season: u32,
    pub kind: EventKind,
    #[serde(default)]
    pub description: String,
}

impl Event {
    pub fn new(season: u32, kind: EventKind) -> Self {
        Self { season, kind, description: String::new() }
    }

    pub fn described(season: u32, kind: EventKind, localize: &dyn crate::Localize) -> Self {
        let args = kind.args();
        let description = localize.localize(kind.key(), &args);
        Self { season, kind, description }
    }
}

/// Immutable record of one season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonLog {
    pub season: u32,
    pub age: u8,
    pub club: TeamId,
    pub club_name: String,
    /// Youth/academy entries never count toward career totals
    pub is_youth: bool,
    pub stats: SeasonStats,
    #[serde(default)]
    pub international: Vec<InternationalEntry>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub trophies: Tally<Trophy>,
    #[serde(default)]
    pub awards: Tally<Award>,
    /// ISO-8601 date the season started
    pub started_on: String,
}

impl SeasonLog {
    pub fn has_event(&self, key: &str) -> bool {
        self.events.iter().any(|e| e.kind.key() == key)
    }
}

/// Start date of a season as an ISO string (seasons open on 1 August)
pub fn season_start_date(first_year: i32, season: u32) -> String {
    NaiveDate::from_ymd_opt(first_year + season as i32, 8, 1)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Ordered, append-only sequence of season logs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    seasons: Vec<SeasonLog>,
}

impl History {
    /// History holding only the pre-career baseline entry
    pub fn baseline(
        academy: TeamId,
        academy_name: &str,
        age: u8,
        first_year: i32,
        localize: &dyn crate::Localize,
    ) -> Self {
        let event = Event::described(
            0,
            EventKind::JoinedAcademy { club: academy_name.to_string() },
            localize,
        );
        let log = SeasonLog {
            season: 0,
            age,
            club: academy,
            club_name: academy_name.to_string(),
            is_youth: true,
            stats: SeasonStats::default(),
            international: Vec::new(),
            events: vec![event],
            trophies: Tally::new(),
            awards: Tally::new(),
            started_on: season_start_date(first_year, 0),
        };
        Self { seasons: vec![log] }
    }

    pub fn push(&mut self, log: SeasonLog) {
        self.seasons.push(log);
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SeasonLog> {
        self.seasons.get(index)
    }

    pub fn last(&self) -> Option<&SeasonLog> {
        self.seasons.last()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.seasons.len().checked_sub(1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeasonLog> {
        self.seasons.iter()
    }

    /// Trophies across every season, youth included
    pub fn trophies(&self) -> Tally<Trophy> {
        let mut all = Tally::new();
        for log in &self.seasons {
            all.merge(&log.trophies);
        }
        all
    }

    pub fn awards(&self) -> Tally<Award> {
        let mut all = Tally::new();
        for log in &self.seasons {
            all.merge(&log.awards);
        }
        all
    }

    /// Seasons in which the player was at the given club (non-youth)
    pub fn seasons_at(&self, club: TeamId) -> usize {
        self.seasons.iter().filter(|l| !l.is_youth && l.club == club).count()
    }
}

/// Return a new history with `event` appended to the log at `season_index`.
/// An out-of-range index leaves the history unchanged.
pub fn append_event(history: &History, season_index: usize, event: Event) -> History {
    let mut next = history.clone();
    if let Some(log) = next.seasons.get_mut(season_index) {
        log.events.push(event);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::KeyLocalizer;

    #[test]
    fn test_baseline_is_youth_entry() {
        let history = History::baseline(TeamId(100), "Academy", 16, 2024, &KeyLocalizer);
        assert_eq!(history.len(), 1);
        let base = history.get(0).unwrap();
        assert!(base.is_youth);
        assert!(base.has_event("event-joined-academy"));
        assert_eq!(base.started_on, "2024-08-01");
    }

    #[test]
    fn test_append_event_returns_new_history() {
        let history = History::baseline(TeamId(100), "Academy", 16, 2024, &KeyLocalizer);
        let next = append_event(&history, 0, Event::new(0, EventKind::Debut));
        assert_eq!(history.get(0).unwrap().events.len(), 1);
        assert_eq!(next.get(0).unwrap().events.len(), 2);

        let unchanged = append_event(&history, 9, Event::new(0, EventKind::Debut));
        assert_eq!(unchanged, history);
    }
}
