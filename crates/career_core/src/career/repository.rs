//! Where careers are kept between sessions.

use std::collections::BTreeMap;

use crate::save::{decompress_and_deserialize, migrate_save, serialize_and_compress, CareerSave, SaveError};

/// Storage for career saves, passed to the orchestrator rather than held globally
pub trait CareerRepository {
    fn save(&mut self, key: &str, save: &CareerSave) -> Result<(), SaveError>;
    fn load(&self, key: &str) -> Result<CareerSave, SaveError>;
    fn exists(&self, key: &str) -> bool;
    fn delete(&mut self, key: &str) -> Result<(), SaveError>;
    fn keys(&self) -> Vec<String>;
}

/// Keys become file names, so only a conservative character set is allowed
pub fn validate_key(key: &str) -> Result<(), SaveError> {
    let valid = !key.is_empty()
        && key.len() <= 64
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SaveError::InvalidKey { key: key.to_string() })
    }
}

/// In-memory repository holding the encoded bytes, for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryRepository {
    saves: BTreeMap<String, Vec<u8>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.saves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saves.is_empty()
    }
}

impl CareerRepository for MemoryRepository {
    fn save(&mut self, key: &str, save: &CareerSave) -> Result<(), SaveError> {
        validate_key(key)?;
        let bytes = serialize_and_compress(save)?;
        log::debug!("Stored {} bytes under {}", bytes.len(), key);
        self.saves.insert(key.to_string(), bytes);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<CareerSave, SaveError> {
        validate_key(key)?;
        let bytes = self.saves.get(key).ok_or_else(|| SaveError::NotFound { key: key.to_string() })?;
        migrate_save(decompress_and_deserialize(bytes)?)
    }

    fn exists(&self, key: &str) -> bool {
        self.saves.contains_key(key)
    }

    fn delete(&mut self, key: &str) -> Result<(), SaveError> {
        validate_key(key)?;
        self.saves.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.saves.keys().cloned().collect()
    }
}
