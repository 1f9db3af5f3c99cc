//! Branch-and-bound search for minimum-weight trail cores.
//!
//! The search starts from every single-column kernel anchor (see `kernel_anchors`) and grows
//! cores round by round with an explicit stack. Anchors are explored in parallel; they share
//! nothing but the weight bound, which every completed core lowers to its weight.

use core::sync::atomic::AtomicU32;

use rayon::prelude::*;

use keccak_tools_core::{
    parts::LaneSize,
    try_or,
    wrapped_err,
    Errors::*,
    Result,
    WrappedError,
};

use crate::{
    propagation::TrailKind,
    trail::Trail,
};

mod anchors;
mod frontier;

pub use anchors::*;
pub use frontier::AnchorResult;

pub const DEFAULT_LANE_SIZE: u32 = 64;
pub const DEFAULT_NR_ROUNDS: u32 = 3;
pub const DEFAULT_MAX_WEIGHT: u32 = 64;
pub const DEFAULT_MAX_TRAILS: usize = 16;

/// Validated parameters of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    kind: TrailKind,
    lane_size: LaneSize,
    nr_rounds: u32,
    max_weight: u32,
    max_trails: usize,
    threads: Option<usize>,
}

impl SearchParams {
    pub fn builder(kind: TrailKind) -> SearchParamsBuilder {
        SearchParamsBuilder::new(kind)
    }

    pub fn kind(&self) -> TrailKind {
        self.kind
    }

    pub fn lane_size(&self) -> LaneSize {
        self.lane_size
    }

    pub fn nr_rounds(&self) -> u32 {
        self.nr_rounds
    }

    /// Cores heavier than this are not reported.
    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    /// Maximum number of cores kept in the outcome.
    pub fn max_trails(&self) -> usize {
        self.max_trails
    }

    /// Size of the dedicated thread pool, `None` for the global rayon pool.
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }
}

#[derive(Clone, Debug)]
pub struct SearchParamsBuilder {
    kind: TrailKind,
    lane_size: u32,
    nr_rounds: u32,
    max_weight: u32,
    max_trails: usize,
    threads: Option<usize>,
}

impl SearchParamsBuilder {
    fn new(kind: TrailKind) -> Self {
        Self {
            kind,
            lane_size: DEFAULT_LANE_SIZE,
            nr_rounds: DEFAULT_NR_ROUNDS,
            max_weight: DEFAULT_MAX_WEIGHT,
            max_trails: DEFAULT_MAX_TRAILS,
            threads: None,
        }
    }

    pub fn lane_size(mut self, lane_size: u32) -> Self {
        self.lane_size = lane_size;
        self
    }

    pub fn rounds(mut self, nr_rounds: u32) -> Self {
        self.nr_rounds = nr_rounds;
        self
    }

    pub fn max_weight(mut self, max_weight: u32) -> Self {
        self.max_weight = max_weight;
        self
    }

    pub fn max_trails(mut self, max_trails: usize) -> Self {
        self.max_trails = max_trails;
        self
    }

    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn build(self) -> Result<SearchParams> {
        try_or!(self.nr_rounds >= 1, InvalidRoundCount(self.nr_rounds))?;
        let lane_size = LaneSize::new(self.lane_size)?;
        try_or!(self.max_trails >= 1, InvalidTrailCount(self.max_trails))?;
        if let Some(threads) = self.threads {
            try_or!(threads >= 1, InvalidThreadCount(threads))?;
        }
        Ok(SearchParams {
            kind: self.kind,
            lane_size,
            nr_rounds: self.nr_rounds,
            max_weight: self.max_weight,
            max_trails: self.max_trails,
            threads: self.threads,
        })
    }
}

/// What a search found.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub params: SearchParams,
    /// Weight of the lightest cores, `None` if no core is within the maximum weight.
    pub minimum_weight: Option<u32>,
    /// Cores at the minimum weight, by anchor then discovery order, at most `max_trails`.
    pub trails: Vec<Trail>,
    /// Number of cores at the minimum weight, including the ones not kept.
    pub total_at_minimum: usize,
    pub nodes_visited: u64,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }
}

/// Runs the search, in a dedicated thread pool if the parameters ask for one.
pub fn search(params: &SearchParams) -> Result<SearchOutcome> {
    match params.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| wrapped_err!(ThreadPoolCreationFailure, WrappedError(e)))?;
            pool.install(|| run(params))
        }
        None => run(params),
    }
}

fn run(params: &SearchParams) -> Result<SearchOutcome> {
    let anchors = kernel_anchors(params.lane_size);
    let bound = AtomicU32::new(params.max_weight);
    let results: Vec<AnchorResult> = anchors
        .par_iter()
        .map(|anchor| frontier::explore(params, anchor, &bound))
        .collect();
    merge(params, results)
}

fn merge(params: &SearchParams, results: Vec<AnchorResult>) -> Result<SearchOutcome> {
    let minimum_weight = results.iter().filter_map(|r| r.minimum_weight).min();
    let nodes_visited = results.iter().map(|r| r.nodes_visited).sum();
    let mut trails = Vec::new();
    let mut total_at_minimum = 0;
    for result in results {
        if result.minimum_weight.is_none() || result.minimum_weight != minimum_weight {
            continue;
        }
        total_at_minimum += result.nr_at_minimum;
        for rounds in result.cores {
            if trails.len() < params.max_trails {
                trails.push(Trail::new(params.kind, params.lane_size, rounds)?);
            }
        }
    }
    Ok(SearchOutcome {
        params: params.clone(),
        minimum_weight,
        trails,
        total_at_minimum,
        nodes_visited,
    })
}
