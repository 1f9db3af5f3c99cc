//! Structural analysis of the Keccak-f permutations.
//!
//! ## Searching trail cores
//! ```no_run
//! use keccak_tools::keccak_tools_trails::{search, SearchParams, TrailKind};
//!
//! let params = SearchParams::builder(TrailKind::Linear).rounds(3).build()?;
//! let outcome = search(&params)?;
//! println!("minimum weight: {:?}", outcome.minimum_weight);
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Rows, slices and lanes of the state, and the Keccak-f round engine.
pub use keccak_tools_core;
/// Propagation tables, trail cores, trail search and reports.
pub use keccak_tools_trails;
