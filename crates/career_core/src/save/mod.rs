// Career persistence
// MessagePack + LZ4 compression with versioning and integrity checks, plus a
// JSON form of the same structure

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;

pub use error::SaveError;
pub use format::{decompress_and_deserialize, serialize_and_compress, CareerSave};
pub use manager::{FileRepository, SaveInfo};
pub use migration::migrate_save;

pub const SAVE_VERSION: u32 = 2;
