use super::error::SaveError;
use super::SAVE_VERSION;
use crate::models::{History, PlayerState, WorldTeams};
use crate::scoring::Leaderboard;
use crate::season::Tactic;
use crate::training::TrainingFocus;
use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Everything needed to resume a career
///
/// The structure is a plain tree: teams are referenced by id only, so the
/// same value serializes to JSON and to the binary format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CareerSave {
    /// Save format version for migration
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub timestamp: u64,

    pub player: PlayerState,
    pub history: History,
    pub world: WorldTeams,
    #[serde(default)]
    pub tactic: Tactic,

    /// Master seed of the career's random streams
    pub seed: u64,

    #[serde(default)]
    pub leaderboard: Leaderboard,

    /// A plan was applied for the season about to be simulated
    #[serde(default)]
    pub trained: bool,

    /// Excellent sessions waiting for the next season log
    #[serde(default)]
    pub breakthroughs: Vec<TrainingFocus>,
}

impl CareerSave {
    pub fn new(
        player: PlayerState,
        history: History,
        world: WorldTeams,
        tactic: Tactic,
        seed: u64,
        leaderboard: Leaderboard,
    ) -> Self {
        Self {
            version: SAVE_VERSION,
            timestamp: current_timestamp(),
            player,
            history,
            world,
            tactic,
            seed,
            leaderboard,
            trained: false,
            breakthroughs: Vec::new(),
        }
    }

    /// Record training done ahead of the next simulation
    pub fn with_training(mut self, trained: bool, breakthroughs: Vec<TrainingFocus>) -> Self {
        self.trained = trained;
        self.breakthroughs = breakthroughs;
        self
    }

    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    /// Timestamp as an RFC 3339 string
    pub fn saved_at(&self) -> String {
        format_timestamp(self.timestamp)
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.history.is_empty() {
            return Err(SaveError::Corrupted("history has no baseline entry".into()));
        }
        if !self.world.contains(self.player.club) {
            return Err(SaveError::Corrupted(format!("player club {} missing from world", self.player.club)));
        }
        if let Some(loan) = &self.player.loan {
            if !self.world.contains(loan.parent_club) {
                return Err(SaveError::Corrupted(format!("loan parent {} missing from world", loan.parent_club)));
            }
        }
        if self.player.bank_balance < 0 {
            return Err(SaveError::Corrupted("negative bank balance".into()));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        let save: CareerSave = serde_json::from_str(json)?;
        save.validate()?;
        Ok(save)
    }
}

/// Serialize and compress a career save
pub fn serialize_and_compress(save: &CareerSave) -> Result<Vec<u8>, SaveError> {
    save.validate()?;

    // MessagePack with field names, LZ4 with the size prepended, then SHA-256
    let msgpack = to_vec_named(save).map_err(SaveError::Encode)?;
    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);

    Ok(result)
}

/// Decompress and deserialize a career save
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<CareerSave, SaveError> {
    // Header + checksum
    if bytes.len() < 4 + 32 {
        return Err(SaveError::Corrupted(format!("{} bytes is too short", bytes.len())));
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - 32);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();

    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;
    let save: CareerSave = from_slice(&msgpack).map_err(SaveError::Decode)?;

    if save.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }

    Ok(save)
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}

pub fn format_timestamp(timestamp: u64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(timestamp as i128 * 1_000_000)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::KeyLocalizer;
    use crate::models::{Position, TeamId};
    use crate::transfers::Offer;

    fn sample_save() -> CareerSave {
        let world = WorldTeams::sample();
        let club = world.get(TeamId(8)).unwrap();
        let mut player = PlayerState::rookie("Save Test", Position::Defender, "England", club);
        player.transfer_offers.push(Offer::loan(world.get(TeamId(12)).unwrap(), 0.6, 9_000, 1));
        let history = History::baseline(TeamId(100), "Royal Albion Academy", 17, 2024, &KeyLocalizer);
        CareerSave::new(player, history, world, Tactic::Attacking, 42, Leaderboard::default())
    }

    #[test]
    fn test_binary_roundtrip() {
        let save = sample_save();
        let bytes = serialize_and_compress(&save).unwrap();
        let restored = decompress_and_deserialize(&bytes).unwrap();
        assert_eq!(restored, save);
    }

    #[test]
    fn test_json_roundtrip() {
        let save = sample_save();
        let json = save.to_json().unwrap();
        assert!(json.contains("\"started_on\": \"2024-08-01\""));
        assert_eq!(CareerSave::from_json(&json).unwrap(), save);
    }

    #[test]
    fn test_checksum_validation() {
        let mut bytes = serialize_and_compress(&sample_save()).unwrap();
        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }
        assert!(matches!(decompress_and_deserialize(&bytes), Err(SaveError::ChecksumMismatch)));
        assert!(matches!(decompress_and_deserialize(&bytes[..10]), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_validate_rejects_dangling_club() {
        let mut save = sample_save();
        save.player.club = TeamId(4242);
        assert!(matches!(serialize_and_compress(&save), Err(SaveError::Corrupted(_))));
    }

    #[test]
    fn test_timestamp_formats_as_rfc3339() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00Z");
    }
}
