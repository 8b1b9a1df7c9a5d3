//! Career totals that actually count: no youth football, no friendlies.

use serde::{Deserialize, Serialize};

use crate::models::{CareerTotals, History};

/// Lowercase ASCII letters only, with friendly aliases folded together
pub fn normalize_competition(name: &str) -> String {
    let letters: String = name.chars().filter(|c| c.is_alphabetic()).flat_map(char::to_lowercase).collect();
    match letters.as_str() {
        "friendlies" | "internationalfriendly" | "internationalfriendlies" => "friendly".to_string(),
        _ => letters,
    }
}

pub fn is_friendly(name: &str) -> bool {
    normalize_competition(name) == "friendly"
}

/// Totals split into club and competitive international contributions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealTotals {
    pub club: CareerTotals,
    pub international: CareerTotals,
}

impl RealTotals {
    pub fn from_history(history: &History) -> Self {
        let mut totals = Self::default();
        for log in history.iter().filter(|l| !l.is_youth) {
            totals.club.matches += log.stats.matches;
            totals.club.goals += log.stats.goals;
            totals.club.assists += log.stats.assists;
            totals.club.clean_sheets += log.stats.clean_sheets;
            for entry in log.international.iter().filter(|e| !is_friendly(&e.competition)) {
                totals.international.matches += entry.matches;
                totals.international.goals += entry.goals;
                totals.international.assists += entry.assists;
            }
        }
        totals
    }

    pub fn combined(&self) -> CareerTotals {
        CareerTotals {
            matches: self.club.matches + self.international.matches,
            goals: self.club.goals + self.international.goals,
            assists: self.club.assists + self.international.assists,
            clean_sheets: self.club.clean_sheets + self.international.clean_sheets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::KeyLocalizer;
    use crate::models::{InternationalEntry, SeasonLog, SeasonStats, Tally, TeamId};

    fn log(season: u32, is_youth: bool, goals: u32, international: Vec<InternationalEntry>) -> SeasonLog {
        SeasonLog {
            season,
            age: 18,
            club: TeamId(1),
            club_name: "A".into(),
            is_youth,
            stats: SeasonStats { matches: 10, goals, ..Default::default() },
            international,
            events: Vec::new(),
            trophies: Tally::new(),
            awards: Tally::new(),
            started_on: "2025-08-01".into(),
        }
    }

    fn entry(competition: &str, goals: u32) -> InternationalEntry {
        InternationalEntry { competition: competition.into(), matches: 2, goals, assists: 0 }
    }

    #[test]
    fn test_normalize_competition() {
        assert_eq!(normalize_competition("World Cup"), "worldcup");
        assert_eq!(normalize_competition("Friendlies"), "friendly");
        assert_eq!(normalize_competition("International Friendly"), "friendly");
        assert_eq!(normalize_competition("friendly-2"), "friendly");
        assert!(!is_friendly("Continental Championship"));
    }

    #[test]
    fn test_youth_and_friendlies_excluded() {
        let mut history = History::baseline(TeamId(100), "Academy", 16, 2024, &KeyLocalizer);
        history.push(log(1, true, 30, vec![]));
        history.push(log(2, false, 12, vec![entry("Friendly", 5), entry("World Cup", 3)]));
        history.push(log(3, false, 8, vec![entry("International Friendlies", 4)]));

        let totals = RealTotals::from_history(&history);
        assert_eq!(totals.club.goals, 20);
        assert_eq!(totals.club.matches, 20);
        assert_eq!(totals.international.goals, 3);
        assert_eq!(totals.international.matches, 2);
        assert_eq!(totals.combined().goals, 23);
    }
}
