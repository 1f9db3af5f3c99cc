//! # Keccak tools trails
//! The `keccak-tools-trails` crate searches the differential and linear trail cores of Keccak-f.
//!
//! The `propagation` module holds the χ tables, `trail` the trail cores and their consistency
//! checks, `search` the parallel branch-and-bound search and `report` the text rendering of its
//! results.

pub mod propagation;
pub mod report;
pub mod search;
pub mod trail;

pub use propagation::TrailKind;
pub use search::{
    search,
    SearchOutcome,
    SearchParams,
};
pub use trail::{
    Trail,
    TrailRound,
};
