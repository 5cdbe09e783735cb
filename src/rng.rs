//! Seeded piece generator.
//!
//! A linear congruential generator with GCC's constants. Each pull advances
//! an accumulator and scales the new hash into `[0, 6]`; the reducer rounds
//! that value to a catalog index. Same seed, same pulls, same pieces.

use crate::piece::TetrominoType;

const M: u64 = 0x8000_0000; // 2^31
const A: u64 = 1_103_515_245;
const C: u64 = 12_345;

/// Largest valid catalog index.
pub const MAX_PIECE_INDEX: usize = TetrominoType::ALL.len() - 1;

/// One LCG step: `(a * seed + c) mod m`.
pub fn hash(seed: u64) -> u64 {
    (A.wrapping_mul(seed % M) + C) % M
}

/// Maps a hash onto `[0, 6]`.
pub fn scale(hash: u64) -> f64 {
    let value = (2.0 * hash as f64) / (M - 1) as f64 - 1.0;
    (value + 1.0) * 3.0
}

/// Rounds a scaled value to the nearest catalog index, clamped into range.
pub fn piece_index(random: f64) -> usize {
    if !random.is_finite() || random <= 0.0 {
        return 0;
    }
    (random.round() as usize).min(MAX_PIECE_INDEX)
}

/// Stream of scaled values; one `pull` per timer tick.
#[derive(Clone, Debug)]
pub struct RngStream {
    acc: u64,
}

impl RngStream {
    pub fn new(seed: u32) -> Self {
        Self { acc: seed as u64 }
    }

    pub fn pull(&mut self) -> f64 {
        self.acc = hash(self.acc);
        scale(self.acc)
    }
}

impl Iterator for RngStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.pull())
    }
}
