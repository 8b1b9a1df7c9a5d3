use super::error::SaveError;
use super::format::{decompress_and_deserialize, format_timestamp, serialize_and_compress, CareerSave};
use super::migration::migrate_save;
use crate::career::repository::{validate_key, CareerRepository};

use std::fs::{create_dir_all, read_dir, remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const EXTENSION: &str = "career";

/// Career saves stored as one file per key in a directory
#[derive(Debug, Clone)]
pub struct FileRepository {
    dir: PathBuf,
}

impl FileRepository {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, EXTENSION))
    }

    /// Save metadata for listings
    pub fn info(&self, key: &str) -> Result<Option<SaveInfo>, SaveError> {
        validate_key(key)?;
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let save = load_from_path(&path)?;
        Ok(Some(SaveInfo {
            key: key.to_string(),
            timestamp: save.timestamp,
            version: save.version,
            player_name: save.player.name.clone(),
            age: save.player.age,
            season: save.player.current_season,
            retired: save.player.is_retired(),
        }))
    }

    /// All readable saves, most recent first
    pub fn all_info(&self) -> Vec<SaveInfo> {
        let mut infos: Vec<SaveInfo> =
            self.keys().iter().filter_map(|key| self.info(key).ok().flatten()).collect();
        infos.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        infos
    }
}

impl CareerRepository for FileRepository {
    fn save(&mut self, key: &str, save: &CareerSave) -> Result<(), SaveError> {
        validate_key(key)?;
        let path = self.path_for(key);
        save_to_path(&path, save)?;
        log::info!("Career saved to {}", key);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<CareerSave, SaveError> {
        validate_key(key)?;
        let path = self.path_for(key);
        if !path.exists() {
            return Err(SaveError::NotFound { key: key.to_string() });
        }
        let save = load_from_path(&path)?;
        log::info!("Career loaded from {}", key);
        Ok(save)
    }

    fn exists(&self, key: &str) -> bool {
        validate_key(key).is_ok() && self.path_for(key).exists()
    }

    fn delete(&mut self, key: &str) -> Result<(), SaveError> {
        validate_key(key)?;
        let path = self.path_for(key);
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted save {}", key);
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        let Ok(entries) = read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        keys.sort();
        keys
    }
}

fn save_to_path(path: &Path, save: &CareerSave) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let data = serialize_and_compress(save)?;

    // Atomic save: write to temp file, then rename
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.flush()?;
        file.sync_all()?;
    }
    rename(&temp_path, path)?;

    log::debug!("Saved {} bytes to {:?}", data.len(), path);
    Ok(())
}

fn load_from_path(path: &Path) -> Result<CareerSave, SaveError> {
    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;

    let save = migrate_save(decompress_and_deserialize(&data)?)?;

    log::debug!("Loaded {} bytes from {:?}", data.len(), path);
    Ok(save)
}

#[derive(Debug, Clone)]
pub struct SaveInfo {
    pub key: String,
    pub timestamp: u64,
    pub version: u32,
    pub player_name: String,
    pub age: u8,
    pub season: u32,
    pub retired: bool,
}

impl SaveInfo {
    pub fn format_timestamp(&self) -> String {
        format_timestamp(self.timestamp)
    }

    pub fn display_text(&self) -> String {
        let status = if self.retired { "retired" } else { "active" };
        format!("{}: {} (age {}, season {}, {})", self.key, self.player_name, self.age, self.season, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::KeyLocalizer;
    use crate::models::{History, PlayerState, Position, TeamId, WorldTeams};
    use crate::scoring::Leaderboard;
    use crate::season::Tactic;
    use tempfile::TempDir;

    fn save() -> CareerSave {
        let world = WorldTeams::sample();
        let player = PlayerState::rookie("File Test", Position::Goalkeeper, "Spain", world.get(TeamId(25)).unwrap());
        let history = History::baseline(TeamId(101), "Real Costa Cantera", 17, 2024, &KeyLocalizer);
        CareerSave::new(player, history, world, Tactic::Defensive, 9, Leaderboard::default())
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = FileRepository::new(temp_dir.path());
        let original = save();

        repo.save("slot_a", &original).unwrap();
        let loaded = repo.load("slot_a").unwrap();

        assert_eq!(loaded.player, original.player);
        assert_eq!(loaded.history, original.history);
        assert_eq!(loaded.world, original.world);
        assert_eq!(loaded.seed, 9);
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = FileRepository::new(temp_dir.path().join("nested"));
        repo.save("slot_b", &save()).unwrap();

        let path = repo.path_for("slot_b");
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_listing_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = FileRepository::new(temp_dir.path());
        repo.save("one", &save()).unwrap();
        repo.save("two", &save()).unwrap();

        assert_eq!(repo.keys(), vec!["one".to_string(), "two".to_string()]);
        assert_eq!(repo.all_info().len(), 2);
        assert_eq!(repo.info("one").unwrap().unwrap().player_name, "File Test");

        repo.delete("one").unwrap();
        assert!(!repo.exists("one"));
        assert!(matches!(repo.load("one"), Err(SaveError::NotFound { .. })));
        assert!(matches!(repo.save("../escape", &save()), Err(SaveError::InvalidKey { .. })));
    }

    #[test]
    fn test_corrupted_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut repo = FileRepository::new(temp_dir.path());
        repo.save("bad", &save()).unwrap();
        std::fs::write(repo.path_for("bad"), b"definitely not a save file, but long enough to pass").unwrap();
        assert!(matches!(repo.load("bad"), Err(SaveError::ChecksumMismatch)));
    }
}
