use keccak_tools_core::{
    err,
    keccakf::{
        inverse_lambda,
        inverse_pi,
        inverse_rho,
        lambda,
        lambda_transposed,
        theta_gap,
        theta_transposed_gap,
    },
    parts::{
        LaneSize,
        SliceState,
    },
    try_or,
    Errors::*,
    Result,
};

use crate::propagation::TrailKind;

/// One round of a trail core, centered on its nonlinear step.
///
/// `before_chi` and `after_chi` are the difference (or mask) at the input and output of χ. The
/// first and last rounds of a core may lack one of them. The θ-gap is that of the θ step in the
/// linear layer next to `before_chi`, so it is known exactly when `before_chi` is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrailRound {
    pub weight: u32,
    pub active_rows: u32,
    pub before_chi: Option<SliceState>,
    pub after_chi: Option<SliceState>,
    pub theta_gap: Option<u32>,
}

impl TrailRound {
    /// Round made of the given snapshots, with weight, active rows and θ-gap derived from them.
    pub fn new(kind: TrailKind, before_chi: Option<SliceState>, after_chi: Option<SliceState>) -> Result<Self> {
        let weight = match round_weight(kind, before_chi.as_ref(), after_chi.as_ref()) {
            Some(weight) => weight,
            None => return err!(EmptyRound),
        };
        let active_rows = before_chi
            .as_ref()
            .or_else(|| after_chi.as_ref())
            .map_or(0, SliceState::nr_active_rows);
        let theta_gap = before_chi.as_ref().map(|b| gap_before(kind, b));
        Ok(Self {
            weight,
            active_rows,
            before_chi,
            after_chi,
            theta_gap,
        })
    }

    /// Whether θ acted as the identity before this round.
    pub fn is_in_kernel(&self) -> Option<bool> {
        self.theta_gap.map(|gap| gap == 0)
    }
}

// Weight of χ given the snapshots available around it.
fn round_weight(kind: TrailKind, before: Option<&SliceState>, after: Option<&SliceState>) -> Option<u32> {
    match (kind, before, after) {
        (TrailKind::Differential, Some(b), _) => Some(kind.weight(b)),
        (TrailKind::Differential, None, Some(a)) => Some(kind.rev_weight(a)),
        (TrailKind::Linear, _, Some(a)) => Some(kind.weight(a)),
        (TrailKind::Linear, Some(b), None) => Some(kind.rev_weight(b)),
        (_, None, None) => None,
    }
}

// θ-gap of the θ step next to `before_chi`: the one of λ for differences, the one of λᵀ for masks.
pub(crate) fn gap_before(kind: TrailKind, before_chi: &SliceState) -> u32 {
    let b = before_chi.to_lanes();
    match kind {
        TrailKind::Differential => theta_gap(&inverse_lambda(&b)),
        TrailKind::Linear => theta_transposed_gap(&inverse_rho(&inverse_pi(&b))),
    }
}

/// A differential or linear trail core: consecutive rounds connected by the linear layer.
///
/// Rounds are listed in the direction the core propagates. Differences travel forward through
/// the permutation: the output of χ in round i goes through λ to become the input of χ in round
/// i + 1, so round 0 lacks `before_chi` and the last round lacks `after_chi`. Masks travel
/// backward: the transpose of λ maps the input mask of χ in round i to the output mask of χ in
/// round i + 1, so round 0 is the last round of the permutation, it lacks `after_chi`, and the
/// last round lacks `before_chi`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trail {
    kind: TrailKind,
    lane_size: LaneSize,
    rounds: Vec<TrailRound>,
}

impl Trail {
    pub fn new(kind: TrailKind, lane_size: LaneSize, rounds: Vec<TrailRound>) -> Result<Self> {
        try_or!(!rounds.is_empty(), EmptyTrail)?;
        for (i, round) in rounds.iter().enumerate() {
            for state in round.before_chi.iter().chain(round.after_chi.iter()) {
                try_or!(
                    state.lane_size() == lane_size,
                    LaneSizeMismatch(lane_size.get(), state.lane_size().get())
                )?;
            }
            try_or!(round.before_chi.is_some() || round.after_chi.is_some(), MissingSnapshot(i))?;
        }
        Ok(Self { kind, lane_size, rounds })
    }

    pub fn kind(&self) -> TrailKind {
        self.kind
    }

    pub fn lane_size(&self) -> LaneSize {
        self.lane_size
    }

    pub fn rounds(&self) -> &[TrailRound] {
        &self.rounds
    }

    pub fn nr_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn total_weight(&self) -> u32 {
        self.rounds.iter().map(|r| r.weight).sum()
    }

    pub fn weights(&self) -> Vec<u32> {
        self.rounds.iter().map(|r| r.weight).collect()
    }

    pub fn active_rows(&self) -> Vec<u32> {
        self.rounds.iter().map(|r| r.active_rows).collect()
    }

    pub fn theta_gaps(&self) -> Vec<Option<u32>> {
        self.rounds.iter().map(|r| r.theta_gap).collect()
    }

    /// The same core with every state translated along z by `dz`.
    pub fn translated_along_z(&self, dz: u32) -> Self {
        let rounds = self
            .rounds
            .iter()
            .map(|r| TrailRound {
                before_chi: r.before_chi.as_ref().map(|s| s.translated_along_z(dz)),
                after_chi: r.after_chi.as_ref().map(|s| s.translated_along_z(dz)),
                ..r.clone()
            })
            .collect();
        Self {
            kind: self.kind,
            lane_size: self.lane_size,
            rounds,
        }
    }

    /// Recomputes every weight, active row count and θ-gap, and checks that χ and λ connect the
    /// snapshots. Returns the first inconsistency found.
    pub fn verify(&self) -> Result<()> {
        let n = self.rounds.len();
        for (i, round) in self.rounds.iter().enumerate() {
            let (needs_before, needs_after) = match self.kind {
                TrailKind::Differential => (i > 0, i + 1 < n),
                TrailKind::Linear => (i + 1 < n, i > 0),
            };
            if (needs_before && round.before_chi.is_none()) || (needs_after && round.after_chi.is_none()) {
                return err!(MissingSnapshot(i));
            }

            let weight = match round_weight(self.kind, round.before_chi.as_ref(), round.after_chi.as_ref()) {
                Some(weight) => weight,
                None => return err!(MissingSnapshot(i)),
            };
            try_or!(weight == round.weight, TrailWeightMismatch(i, weight, round.weight))?;

            let active_rows = round
                .before_chi
                .as_ref()
                .or_else(|| round.after_chi.as_ref())
                .map_or(0, SliceState::nr_active_rows);
            try_or!(
                active_rows == round.active_rows,
                ActiveRowsMismatch(i, active_rows, round.active_rows)
            )?;

            if let (Some(b), Some(a)) = (&round.before_chi, &round.after_chi) {
                try_or!(self.kind.is_compatible(b, a), IncompatibleTransition(i))?;
                try_or!(
                    b.nr_active_rows() == a.nr_active_rows(),
                    ActiveRowsMismatch(i, b.nr_active_rows(), a.nr_active_rows())
                )?;
            }

            let gap = round.before_chi.as_ref().map(|b| gap_before(self.kind, b));
            try_or!(gap == round.theta_gap, ThetaGapMismatch(i))?;

            if let Some(next) = self.rounds.get(i + 1) {
                let (from, to) = match self.kind {
                    TrailKind::Differential => (&round.after_chi, &next.before_chi),
                    TrailKind::Linear => (&round.before_chi, &next.after_chi),
                };
                let (from, to) = match (from, to) {
                    (Some(from), Some(to)) => (from.to_lanes(), to.to_lanes()),
                    (_, None) => return err!(MissingSnapshot(i + 1)),
                    (None, _) => return err!(MissingSnapshot(i)),
                };
                let connected = match self.kind {
                    TrailKind::Differential => lambda(&from) == to,
                    TrailKind::Linear => lambda_transposed(&from) == to,
                };
                try_or!(connected, BrokenDiffusion(i + 1))?;
            }
        }
        Ok(())
    }
}
