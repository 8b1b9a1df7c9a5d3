//! Deterministic random streams
//!
//! A career carries one master seed. Each season and each engine draws from
//! its own ChaCha8 stream so that, for example, changing the training plan
//! never shifts the match results of the same season.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Independent consumers of randomness within one season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Training,
    Season,
    Transfers,
}

impl Stream {
    fn salt(self) -> u64 {
        match self {
            Stream::Training => 0x7472_6169_6e00_0001,
            Stream::Season => 0x7365_6173_6f6e_0002,
            Stream::Transfers => 0x7472_616e_7300_0003,
        }
    }
}

/// SplitMix64 finaliser
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seed of one stream in one season
pub fn stream_seed(master: u64, season: u32, stream: Stream) -> u64 {
    mix(master ^ (season as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ stream.salt())
}

pub fn stream_rng(master: u64, season: u32, stream: Stream) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(stream_seed(master, season, stream))
}
