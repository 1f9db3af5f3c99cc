//! The Keccak-f permutations and their step mappings.
//!
//! All step mappings are pure functions on `LaneState`. A round is `ι ∘ χ ∘ π ∘ ρ ∘ θ`; every
//! step has an inverse, and θ also has a transpose for the propagation of linear masks.

use core::ops::Range;

use crate::{
    parts::{
        LaneSize,
        LaneState,
        LaneValue,
    },
    try_or,
    Errors::*,
    Result,
};

mod chi;
mod constants;
mod gf2;
mod steps;
mod theta;

pub use chi::*;
pub use constants::*;
pub use steps::*;
pub use theta::*;

/// Keccak-f with a given lane size, possibly reduced to its last `nr_rounds` rounds (Keccak-p).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeccakF {
    lane_size: LaneSize,
    nr_rounds: u32,
}

impl KeccakF {
    /// The full permutation, `12 + 2ℓ` rounds.
    pub fn new(lane_size: LaneSize) -> Self {
        Self {
            lane_size,
            nr_rounds: lane_size.nominal_rounds(),
        }
    }

    /// The permutation made of the last `nr_rounds` rounds. More rounds than nominal are allowed
    /// and extend the round indices below zero.
    pub fn reduced(lane_size: LaneSize, nr_rounds: u32) -> Result<Self> {
        try_or!(nr_rounds >= 1, InvalidRoundCount(nr_rounds))?;
        Ok(Self { lane_size, nr_rounds })
    }

    pub fn from_width(width: u32) -> Result<Self> {
        Ok(Self::new(LaneSize::from_width(width)?))
    }

    pub fn lane_size(&self) -> LaneSize {
        self.lane_size
    }

    pub fn nr_rounds(&self) -> u32 {
        self.nr_rounds
    }

    pub fn name(&self) -> String {
        if self.nr_rounds == self.lane_size.nominal_rounds() {
            format!("Keccak-f[{}]", self.lane_size.width())
        } else {
            format!("Keccak-p[{}, nr={}]", self.lane_size.width(), self.nr_rounds)
        }
    }

    /// Indices of the rounds applied by `permute`, in order.
    pub fn round_indices(&self) -> Range<i32> {
        let last = self.lane_size.nominal_rounds() as i32;
        last - self.nr_rounds as i32..last
    }

    pub fn round_constant(&self, round_index: i32) -> LaneValue {
        round_constant(self.lane_size, round_index)
    }

    /// Adds the round constant to lane (0, 0); ι is its own inverse.
    pub fn iota(&self, state: &LaneState, round_index: i32) -> LaneState {
        let mut result = *state;
        result.set_lane(state.lane(0, 0) ^ self.round_constant(round_index), 0, 0);
        result
    }

    pub fn round(&self, state: &LaneState, round_index: i32) -> LaneState {
        self.iota(&chi(&lambda(state)), round_index)
    }

    pub fn inverse_round(&self, state: &LaneState, round_index: i32) -> LaneState {
        inverse_lambda(&inverse_chi(&self.iota(state, round_index)))
    }

    pub fn permute(&self, state: &LaneState) -> Result<LaneState> {
        self.check_lane_size(state)?;
        Ok(self
            .round_indices()
            .fold(*state, |s, round_index| self.round(&s, round_index)))
    }

    pub fn inverse_permute(&self, state: &LaneState) -> Result<LaneState> {
        self.check_lane_size(state)?;
        Ok(self
            .round_indices()
            .rev()
            .fold(*state, |s, round_index| self.inverse_round(&s, round_index)))
    }

    fn check_lane_size(&self, state: &LaneState) -> Result<()> {
        try_or!(
            state.lane_size() == self.lane_size,
            LaneSizeMismatch(self.lane_size.get(), state.lane_size().get())
        )
    }
}

impl Default for KeccakF {
    fn default() -> Self {
        Self::new(LaneSize::default())
    }
}

#[cfg(test)]
mod tests;
