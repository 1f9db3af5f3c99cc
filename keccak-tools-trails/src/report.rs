//! Plain text reports of trail cores and search outcomes.

use core::fmt::{
    self,
    Write,
};

use keccak_tools_core::{
    keccakf::KeccakF,
    parts::{
        display_state,
        display_transition,
        SliceState,
    },
    Result,
};

use crate::{
    search::SearchOutcome,
    trail::{
        Trail,
        TrailRound,
    },
};

const ROUND_SEPARATOR: &str = "========================================";
const CHI_SEPARATOR: &str = "----------------------------------------";

/// What to show next to the grids.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Add a line with the column parities under every grid.
    pub parity: bool,
    /// Add the lanes of every state in hexadecimal.
    pub lanes: bool,
}

fn join<T: ToString>(values: impl Iterator<Item = T>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}

fn round_header(i: usize, round: &TrailRound) -> String {
    let gap = round.theta_gap.map_or_else(|| "-".to_string(), |g| g.to_string());
    let kernel = match round.is_in_kernel() {
        Some(true) => "in kernel",
        Some(false) => "outside kernel",
        None => "-",
    };
    format!(
        "round {}: weight {}, active rows {}, theta-gap {}, {}",
        i, round.weight, round.active_rows, gap, kernel
    )
}

fn push_state(out: &mut String, state: &SliceState, options: &ReportOptions) -> fmt::Result {
    out.push_str(&display_state(state, options.parity));
    if options.lanes {
        writeln!(out, "lanes: {}", state.to_lanes().to_hex())?;
    }
    Ok(())
}

/// Header, weight summary and per-round grids of a trail core.
///
/// A round with both snapshots shows the input of χ, a line of `-`, then the output of χ drawn
/// as a transition: `+` for bits only in the output, `O` for bits only in the input.
pub fn render_trail(trail: &Trail, options: &ReportOptions) -> Result<String> {
    let permutation = KeccakF::new(trail.lane_size());
    let mut out = String::new();
    writeln!(
        out,
        "{} trail core, {} rounds, {}, total weight {}",
        trail.kind(),
        trail.nr_rounds(),
        permutation.name(),
        trail.total_weight()
    )?;
    writeln!(out, "weights: {}", join(trail.weights().into_iter()))?;
    writeln!(out, "active rows: {}", join(trail.active_rows().into_iter()))?;

    for (i, round) in trail.rounds().iter().enumerate() {
        writeln!(out, "{}", ROUND_SEPARATOR)?;
        writeln!(out, "{}", round_header(i, round))?;
        match (&round.before_chi, &round.after_chi) {
            (Some(before), Some(after)) => {
                push_state(&mut out, before, options)?;
                writeln!(out, "{}", CHI_SEPARATOR)?;
                out.push_str(&display_transition(before, after, options.parity)?);
                if options.lanes {
                    writeln!(out, "lanes: {}", after.to_lanes().to_hex())?;
                }
            }
            (Some(state), None) | (None, Some(state)) => push_state(&mut out, state, options)?,
            (None, None) => {}
        }
    }
    Ok(out)
}

/// Summary of a search followed by the report of every core kept.
pub fn render_outcome(outcome: &SearchOutcome, options: &ReportOptions) -> Result<String> {
    let params = &outcome.params;
    let mut out = String::new();
    writeln!(
        out,
        "{} trail cores of {} over {} rounds, maximum weight {}",
        params.kind(),
        KeccakF::new(params.lane_size()).name(),
        params.nr_rounds(),
        params.max_weight()
    )?;
    match outcome.minimum_weight {
        None => writeln!(out, "no trail core within weight {}", params.max_weight())?,
        Some(minimum) => writeln!(
            out,
            "minimum weight {}, {} cores at minimum, {} reported",
            minimum,
            outcome.total_at_minimum,
            outcome.trails.len()
        )?,
    }
    writeln!(out, "nodes visited: {}", outcome.nodes_visited)?;
    for (i, trail) in outcome.trails.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "trail {} of {}", i + 1, outcome.trails.len())?;
        out.push_str(&render_trail(trail, options)?);
    }
    Ok(out)
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let options = ReportOptions {
            parity: f.alternate(),
            lanes: false,
        };
        f.write_str(&render_trail(self, &options).map_err(|_| fmt::Error)?)
    }
}
