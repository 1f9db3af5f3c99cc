//! Depth-first exploration of the trail cores grown from one anchor.

use core::sync::atomic::{
    AtomicU32,
    Ordering,
};

use keccak_tools_core::{
    keccakf::{
        inverse_lambda_transposed,
        inverse_pi,
        inverse_rho,
        lambda,
        theta_gap,
        theta_transposed_gap,
    },
    parts::SliceState,
};

use super::SearchParams;
use crate::{
    propagation::{
        CompatibleStates,
        TrailKind,
    },
    trail::TrailRound,
};

/// The cores at the lowest weight reached from one anchor.
#[derive(Clone, Debug, Default)]
pub struct AnchorResult {
    pub minimum_weight: Option<u32>,
    /// Rounds of the first cores at `minimum_weight`, in discovery order, at most `max_trails`.
    pub cores: Vec<Vec<TrailRound>>,
    /// Number of cores at `minimum_weight`, including the ones not kept.
    pub nr_at_minimum: usize,
    pub nodes_visited: u64,
}

impl AnchorResult {
    fn record(&mut self, kind: TrailKind, path: &[TrailRound], weight: u32, max_trails: usize, bound: &AtomicU32) {
        if weight > bound.load(Ordering::Relaxed) {
            return;
        }
        bound.fetch_min(weight, Ordering::Relaxed);
        match self.minimum_weight {
            Some(minimum) if weight > minimum => return,
            Some(minimum) if weight == minimum => {}
            _ => {
                self.minimum_weight = Some(weight);
                self.cores.clear();
                self.nr_at_minimum = 0;
            }
        }
        self.nr_at_minimum += 1;
        if self.cores.len() < max_trails {
            let mut rounds = path.to_vec();
            // masks are listed from the last round of the permutation back to the first
            if kind == TrailKind::Linear {
                rounds.reverse();
            }
            self.cores.push(rounds);
        }
    }
}

// Round `depth` of the permutation whose χ input is fixed: its χ outputs are enumerated lazily.
struct Frame {
    depth: usize,
    before_chi: SliceState,
    theta_gap: u32,
    // weight of the rounds before this one
    weight: u32,
    // lightest weight this round can take
    min_weight: u32,
    children: CompatibleStates,
}

struct Explorer<'a> {
    kind: TrailKind,
    nr_rounds: usize,
    max_trails: usize,
    bound: &'a AtomicU32,
    // rounds 0, 1, ... of the permutation fixed on the current branch
    path: Vec<TrailRound>,
    frames: Vec<Frame>,
    result: AnchorResult,
}

// Whether a branch weighing `weight` up to round `depth` cannot stay within the bound, given
// that every later round weighs at least 2.
fn prunes(bound: &AtomicU32, nr_rounds: usize, weight: u32, depth: usize) -> bool {
    let later_rounds = (nr_rounds - depth - 1) as u32;
    weight + 2 * later_rounds > bound.load(Ordering::Relaxed)
}

impl<'a> Explorer<'a> {
    // χ input of round `depth` from the χ output of round `depth - 1`, with the θ-gap of the
    // linear layer in between.
    fn next_input(&self, after_chi: &SliceState) -> (SliceState, u32) {
        let a = after_chi.to_lanes();
        match self.kind {
            TrailKind::Differential => (lambda(&a).to_slices(), theta_gap(&a)),
            TrailKind::Linear => {
                let b = inverse_lambda_transposed(&a);
                let gap = theta_transposed_gap(&inverse_rho(&inverse_pi(&b)));
                (b.to_slices(), gap)
            }
        }
    }

    // Fixes the χ input of round `depth` that follows `after_chi`, then either completes the
    // core or opens a frame over the χ outputs of that round.
    fn grow(&mut self, depth: usize, after_chi: &SliceState, weight: u32) {
        let (before_chi, theta_gap) = self.next_input(after_chi);
        // differences: every output has the weight of the input; masks: the lightest output
        let min_weight = match self.kind {
            TrailKind::Differential => self.kind.weight(&before_chi),
            TrailKind::Linear => self.kind.rev_weight(&before_chi),
        };
        if prunes(self.bound, self.nr_rounds, weight + min_weight, depth) {
            return;
        }

        if depth + 1 == self.nr_rounds {
            self.path.truncate(depth);
            self.path.push(TrailRound {
                weight: min_weight,
                active_rows: before_chi.nr_active_rows(),
                before_chi: Some(before_chi),
                after_chi: None,
                theta_gap: Some(theta_gap),
            });
            self.result
                .record(self.kind, &self.path, weight + min_weight, self.max_trails, self.bound);
            return;
        }

        let children = self.kind.output_states(&before_chi);
        self.frames.push(Frame {
            depth,
            before_chi,
            theta_gap,
            weight,
            min_weight,
            children,
        });
    }

    fn run(mut self, anchor: &SliceState) -> AnchorResult {
        let weight = match self.kind {
            TrailKind::Differential => self.kind.rev_weight(anchor),
            TrailKind::Linear => self.kind.weight(anchor),
        };
        self.result.nodes_visited += 1;
        self.path.push(TrailRound {
            weight,
            active_rows: anchor.nr_active_rows(),
            before_chi: None,
            after_chi: Some(anchor.clone()),
            theta_gap: None,
        });
        if self.nr_rounds == 1 {
            self.result
                .record(self.kind, &self.path, weight, self.max_trails, self.bound);
            return self.result;
        }
        self.grow(1, anchor, weight);

        while let Some(frame) = self.frames.last_mut() {
            let (depth, weight) = (frame.depth, frame.weight);
            // the bound may have dropped since the frame was opened
            if prunes(self.bound, self.nr_rounds, weight + frame.min_weight, depth) {
                self.frames.pop();
                continue;
            }
            let after_chi = match frame.children.next() {
                Some(after_chi) => after_chi,
                None => {
                    self.frames.pop();
                    continue;
                }
            };
            let round_weight = match self.kind {
                TrailKind::Differential => frame.min_weight,
                TrailKind::Linear => self.kind.weight(&after_chi),
            };
            if prunes(self.bound, self.nr_rounds, weight + round_weight, depth) {
                continue;
            }

            let round = TrailRound {
                weight: round_weight,
                active_rows: frame.before_chi.nr_active_rows(),
                before_chi: Some(frame.before_chi.clone()),
                after_chi: Some(after_chi.clone()),
                theta_gap: Some(frame.theta_gap),
            };
            self.result.nodes_visited += 1;
            self.path.truncate(depth);
            self.path.push(round);
            self.grow(depth + 1, &after_chi, weight + round_weight);
        }
        self.result
    }
}

/// Explores every core anchored at `anchor` whose weight does not exceed the shared bound.
///
/// The anchor is the χ output of the first round of the permutation, for both kinds. The
/// bound only decreases, so cores at the final minimum are never pruned: a branch is cut only
/// when even the lightest completion would be strictly heavier than the bound. Memory stays
/// proportional to the number of rounds: one frame per round, each enumerating its children
/// lazily, and one shared path of rounds.
pub fn explore(params: &SearchParams, anchor: &SliceState, bound: &AtomicU32) -> AnchorResult {
    let nr_rounds = params.nr_rounds() as usize;
    Explorer {
        kind: params.kind(),
        nr_rounds,
        max_trails: params.max_trails(),
        bound,
        path: Vec::with_capacity(nr_rounds),
        frames: Vec::with_capacity(nr_rounds),
        result: AnchorResult::default(),
    }
    .run(anchor)
}
