use std::fmt;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{Color, Piece, ShapeKind};

/// Seed for a reproducible piece stream.
///
/// 128 bits, serialised as a 32-character hex string. Two streams built from the
/// same seed yield the same pieces in the same order, which is what makes a
/// game (and therefore a fitness value) repeatable.
///
/// # Example
///
/// ```
/// use gentris_engine::{PieceSeed, PieceStream};
///
/// let seed = PieceSeed::from(42);
/// let mut a = PieceStream::with_seed(seed);
/// let mut b = PieceStream::with_seed(seed);
/// for _ in 0..10 {
///     assert_eq!(a.next_piece(), b.next_piece());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl From<u64> for PieceSeed {
    fn from(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Lets `rng.random()` produce seeds, e.g. per-game seeds drawn from a master RNG.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Endless source of spawned pieces.
///
/// Each piece gets a uniformly random shape, a random rotation among that
/// shape's states and one of [`Color::COUNT`] colours, and starts at the spawn
/// position.
#[derive(Debug, Clone)]
pub struct PieceStream {
    rng: Pcg32,
}

impl Default for PieceStream {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceStream {
    /// Creates a stream seeded from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws the next piece, positioned at the spawn point.
    pub fn next_piece(&mut self) -> Piece {
        let shape: ShapeKind = self.rng.random();
        let rotation = self.rng.random_range(0..shape.rotation_count());
        let color = Color::new(self.rng.random_range(0..Color::COUNT));
        Piece::new(shape, rotation, color)
    }
}

impl Iterator for PieceStream {
    type Item = Piece;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_piece())
    }
}
