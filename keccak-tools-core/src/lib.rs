//! # Keccak tools core
//! The `keccak-tools-core` crate houses the low-level algebra of the Keccak-f state. A state of
//! `25 * laneSize` bits can be viewed as 25 lanes (`LaneState`, one machine word per (x, y)) or
//! as `laneSize` slices (`SliceState`, one 25-bit word per z), and the `parts` module converts
//! between the two, translates rows and slices, and measures weights and parities.
//!
//! The `keccakf` module applies the step mappings of the permutation and their inverses on these
//! packed forms.

#![allow(clippy::module_inception)]

#[cfg(not(feature = "err-location-log"))]
pub const LOCATION_LOG: bool = false;

#[cfg(feature = "err-location-log")]
pub const LOCATION_LOG: bool = true;

pub use anyhow::{
    anyhow,
    bail,
    ensure,
    Error,
    Result,
};

pub mod errors;
pub mod keccakf;
pub mod parts;

pub use errors::{
    error_handler::*,
    error_messages::*,
};
