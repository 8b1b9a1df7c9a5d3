//! Retired-career leaderboard: top-N per category.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{weighted_sum, History, PlayerState, Position};
use crate::scoring::scorer::CareerScorer;
use crate::scoring::tier::LegacyTier;
use crate::scoring::totals::RealTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaderboardCategory {
    Score,
    Goals,
    Assists,
    Matches,
}

impl LeaderboardCategory {
    pub const ALL: [LeaderboardCategory; 4] = [
        LeaderboardCategory::Score,
        LeaderboardCategory::Goals,
        LeaderboardCategory::Assists,
        LeaderboardCategory::Matches,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: Uuid,
    pub name: String,
    pub position: Position,
    pub score: i64,
    pub tier: LegacyTier,
    pub peak_overall: u8,
    pub matches: u32,
    pub goals: u32,
    pub assists: u32,
    /// Weighted silverware, on the scoring scale
    pub trophy_points: i64,
    pub seasons: u32,
}

impl LeaderboardEntry {
    /// Entry for a finished career; counters come from the history itself
    pub fn from_career(state: &PlayerState, history: &History, scorer: &CareerScorer) -> Self {
        let totals = RealTotals::from_history(history).combined();
        let score = scorer.score(state, history);
        Self {
            player_id: state.id,
            name: state.name.clone(),
            position: state.position,
            score,
            tier: LegacyTier::from_score(score, state.peak_overall),
            peak_overall: state.peak_overall,
            matches: totals.matches,
            goals: totals.goals,
            assists: totals.assists,
            trophy_points: weighted_sum(&history.trophies(), &scorer.weights().trophies),
            seasons: history.iter().filter(|l| !l.is_youth).count() as u32,
        }
    }

    fn value(&self, category: LeaderboardCategory) -> i64 {
        match category {
            LeaderboardCategory::Score => self.score,
            LeaderboardCategory::Goals => self.goals as i64,
            LeaderboardCategory::Assists => self.assists as i64,
            LeaderboardCategory::Matches => self.matches as i64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<LeaderboardEntry>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self { capacity: capacity.max(1), entries: Vec::new() }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a retirement. A career submitted twice replaces its earlier entry.
    pub fn submit(&mut self, entry: LeaderboardEntry) {
        self.entries.retain(|e| e.player_id != entry.player_id);
        self.entries.push(entry);
        self.recompute();
    }

    /// Top entries of one category, best first
    pub fn top(&self, category: LeaderboardCategory) -> Vec<&LeaderboardEntry> {
        let mut ranked: Vec<&LeaderboardEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.value(category).cmp(&a.value(category)).then_with(|| a.name.cmp(&b.name)));
        ranked.truncate(self.capacity);
        ranked
    }

    /// Rebuild entries from stored careers, e.g. after a scoring change
    pub fn backfill<'a, I>(&mut self, careers: I, scorer: &CareerScorer)
    where
        I: IntoIterator<Item = (&'a PlayerState, &'a History)>,
    {
        for (state, history) in careers {
            let entry = LeaderboardEntry::from_career(state, history, scorer);
            self.entries.retain(|e| e.player_id != entry.player_id);
            self.entries.push(entry);
        }
        self.recompute();
    }

    /// Keep only entries that still place in at least one category
    fn recompute(&mut self) {
        let keep: Vec<Uuid> = LeaderboardCategory::ALL
            .iter()
            .flat_map(|c| self.top(*c).into_iter().map(|e| e.player_id))
            .collect();
        self.entries.retain(|e| keep.contains(&e.player_id));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: i64, goals: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            player_id: Uuid::new_v4(),
            name: name.to_string(),
            position: Position::Forward,
            score,
            tier: LegacyTier::from_score(score, 85),
            peak_overall: 85,
            matches: 300,
            goals,
            assists: 50,
            trophy_points: 0,
            seasons: 15,
        }
    }

    #[test]
    fn test_top_n_per_category() {
        let mut board = Leaderboard::new(2);
        board.submit(entry("A", 9_000, 10));
        board.submit(entry("B", 3_000, 300));
        board.submit(entry("C", 8_000, 20));
        board.submit(entry("D", 1_000, 5));

        let scores: Vec<&str> = board.top(LeaderboardCategory::Score).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(scores, vec!["A", "C"]);
        let goals: Vec<&str> = board.top(LeaderboardCategory::Goals).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(goals, vec!["B", "C"]);
        // D places in no category
        assert_eq!(board.len(), 3);
        assert!(board.top(LeaderboardCategory::Matches).iter().all(|e| e.name != "D"));
    }

    #[test]
    fn test_resubmission_replaces_entry() {
        let mut board = Leaderboard::new(5);
        let mut e = entry("A", 5_000, 10);
        board.submit(e.clone());
        e.score = 6_000;
        board.submit(e);
        assert_eq!(board.len(), 1);
        assert_eq!(board.top(LeaderboardCategory::Score)[0].score, 6_000);
    }
}
