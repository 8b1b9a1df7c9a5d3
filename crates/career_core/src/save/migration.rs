use super::error::SaveError;
use super::format::CareerSave;
use super::SAVE_VERSION;
use crate::scoring::{is_friendly, RealTotals};

/// Migrate save data from older versions to the current version
pub fn migrate_save(mut save: CareerSave) -> Result<CareerSave, SaveError> {
    let original_version = save.version;

    save = match save.version {
        1 => migrate_v1_to_v2(save)?,
        2 => save,
        v if v > SAVE_VERSION => {
            // Future version - might be compatible
            log::warn!("Loading save from future version {} (current: {})", v, SAVE_VERSION);
            save
        }
        _ => {
            return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
        }
    };

    save.version = SAVE_VERSION;
    save.update_timestamp();

    if original_version != SAVE_VERSION {
        log::info!("Migrated save from version {} to {}", original_version, SAVE_VERSION);
    }

    Ok(save)
}

/// Version 1 saves predate international caps and stored totals that
/// counted friendlies
fn migrate_v1_to_v2(mut save: CareerSave) -> Result<CareerSave, SaveError> {
    log::info!("Migrating save from version 1 to 2");

    save.player.international_caps = save
        .history
        .iter()
        .filter(|log| !log.is_youth)
        .flat_map(|log| log.international.iter())
        .filter(|entry| !is_friendly(&entry.competition))
        .map(|entry| entry.matches)
        .sum();

    save.player.called_up =
        save.history.iter().any(|log| !log.is_youth && !log.international.is_empty());

    save.player.totals = RealTotals::from_history(&save.history).combined();

    if save.player.potential < save.player.overall() {
        save.player.potential = save.player.overall();
    }
    save.player.peak_overall = save.player.peak_overall.max(save.player.overall());

    Ok(save)
}

pub fn needs_migration(save: &CareerSave) -> bool {
    save.version < SAVE_VERSION
}

pub fn migration_description(from_version: u32, to_version: u32) -> String {
    match (from_version, to_version) {
        (1, 2) => "Recounting international caps and career totals".to_string(),
        _ => format!("Updating save format from version {} to {}", from_version, to_version),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::KeyLocalizer;
    use crate::models::{
        CareerTotals, History, InternationalEntry, PlayerState, Position, SeasonLog, SeasonStats,
        TeamId, WorldTeams,
    };
    use crate::scoring::Leaderboard;
    use crate::season::Tactic;

    fn v1_save() -> CareerSave {
        let world = WorldTeams::sample();
        let club = world.get(TeamId(3)).unwrap();
        let player = PlayerState::rookie("Old Save", Position::Forward, "England", club);
        let mut history = History::baseline(TeamId(100), "Royal Albion Academy", 17, 2024, &KeyLocalizer);
        history.push(SeasonLog {
            season: 1,
            age: 17,
            club: TeamId(3),
            club_name: club.name.clone(),
            is_youth: false,
            stats: SeasonStats { matches: 30, goals: 10, assists: 4, clean_sheets: 0, average_rating: 7.0, minutes_share: 0.8 },
            international: vec![
                InternationalEntry { competition: "World Cup".into(), matches: 5, goals: 2, assists: 1 },
                InternationalEntry { competition: "Friendlies".into(), matches: 3, goals: 1, assists: 0 },
            ],
            events: Vec::new(),
            trophies: Default::default(),
            awards: Default::default(),
            started_on: "2025-08-01".into(),
        });
        let mut save = CareerSave::new(player, history, world, Tactic::Balanced, 7, Leaderboard::default());
        save.version = 1;
        save.player.totals = CareerTotals { matches: 38, goals: 13, assists: 5, clean_sheets: 0 };
        save
    }

    #[test]
    fn test_migrate_v1_to_v2() {
        let migrated = migrate_save(v1_save()).unwrap();
        assert_eq!(migrated.version, SAVE_VERSION);
        assert_eq!(migrated.player.international_caps, 5);
        assert!(migrated.player.called_up);
        assert_eq!(migrated.player.totals.matches, 35);
        assert_eq!(migrated.player.totals.goals, 12);
    }

    #[test]
    fn test_no_migration_needed() {
        let mut save = v1_save();
        save.version = SAVE_VERSION;
        let result = migrate_save(save.clone()).unwrap();
        assert_eq!(result.player, save.player);
        assert!(!needs_migration(&result));
    }

    #[test]
    fn test_unknown_old_version_rejected() {
        let mut save = v1_save();
        save.version = 0;
        assert!(matches!(migrate_save(save), Err(SaveError::VersionMismatch { found: 0, .. })));
    }

    #[test]
    fn test_future_version_warning() {
        let mut save = v1_save();
        save.version = 999;
        assert!(migrate_save(save).is_ok());
    }
}
