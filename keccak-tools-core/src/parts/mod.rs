//! Rows, slices and lanes of the Keccak-f state.
//!
//! A row is 5 bits along x at fixed (y, z), a slice is the 25 bits at fixed z and a lane is the
//! `laneSize` bits at fixed (x, y). The packed types below follow this geometry:
//!
//! - `RowValue` keeps a row in the 5 least significant bits of a byte, bit x for position x.
//! - `SliceValue` keeps row y of a slice in bits `5y .. 5y + 4`.
//! - `LaneValue` keeps position z of a lane in bit z.
//! - `PackedParities` keeps the parity of slice z in bits `5z .. 5z + 4`.

use core::fmt;

use crate::{
    try_or,
    Errors::*,
    Result,
};

mod display;
mod parity;
mod rows;
mod state;
mod weight;

pub use display::*;
pub use parity::*;
pub use rows::*;
pub use state::*;
pub use weight::*;

/// The number of rows and columns in Keccak-f.
pub const NR_ROWS_AND_COLUMNS: u32 = 5;

/// The number of lanes in a state.
pub const NR_LANES: usize = 25;

/// 5 bits of a row, in the least significant bits.
pub type RowValue = u8;

/// 5 rows of a slice, row y at `row * 32^y`.
pub type SliceValue = u32;

/// Bits of a lane, position z at bit z.
pub type LaneValue = u64;

/// Up to 8 row parities, the parity of slice z at `parity * 32^z`.
pub type PackedParities = u64;

/// The lane size of a Keccak-f instance, which is also its number of slices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LaneSize(u32);

impl LaneSize {
    /// All the lane sizes of the Keccak-f family, from Keccak-f[25] to Keccak-f[1600].
    pub const ALL: [LaneSize; 7] = [
        LaneSize(1),
        LaneSize(2),
        LaneSize(4),
        LaneSize(8),
        LaneSize(16),
        LaneSize(32),
        LaneSize(64),
    ];

    pub fn new(lane_size: u32) -> Result<Self> {
        try_or!(Self::is_valid(lane_size), InvalidLaneSize(lane_size))?;
        Ok(Self(lane_size))
    }

    /// Lane size of the Keccak-f instance with the given width in bits.
    pub fn from_width(width: u32) -> Result<Self> {
        try_or!(width % 25 == 0 && Self::is_valid(width / 25), InvalidWidth(width))?;
        Ok(Self(width / 25))
    }

    fn is_valid(lane_size: u32) -> bool {
        lane_size.is_power_of_two() && lane_size <= 64
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Width of the permutation in bits.
    pub fn width(self) -> u32 {
        25 * self.0
    }

    /// The ℓ parameter, `laneSize = 2^ℓ`.
    pub fn log2(self) -> u32 {
        self.0.trailing_zeros()
    }

    /// Number of rounds of Keccak-f at this lane size, `12 + 2ℓ`.
    pub fn nominal_rounds(self) -> u32 {
        12 + 2 * self.log2()
    }

    /// Mask of the meaningful bits of a `LaneValue`.
    pub fn mask(self) -> LaneValue {
        if self.0 == 64 {
            LaneValue::MAX
        } else {
            (1 << self.0) - 1
        }
    }
}

impl Default for LaneSize {
    fn default() -> Self {
        Self(64)
    }
}

impl fmt::Display for LaneSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Keccak-f[{}]", self.width())
    }
}

/// Cyclic rotation of a lane towards higher z by `offset` positions.
#[inline]
pub fn rotate_lane(lane: LaneValue, offset: u32, lane_size: LaneSize) -> LaneValue {
    let n = lane_size.get();
    let offset = offset % n;
    if offset == 0 {
        lane
    } else {
        ((lane << offset) | (lane >> (n - offset))) & lane_size.mask()
    }
}

#[cfg(test)]
mod tests;
