//! Propagation of differences and linear masks through χ, row by row.
//!
//! χ acts on every row independently, so its propagation properties reduce to tables over the
//! 32 row values. For a difference entering χ, all compatible output differences are equally
//! likely; for a mask leaving χ, all compatible input masks have the same correlation in
//! absolute value. Hence each table gives a single weight per row value, and the number of
//! compatible rows is 2 to the power of that weight.

use core::{
    fmt,
    str::FromStr,
};
use std::sync::OnceLock;

use keccak_tools_core::{
    err,
    keccakf::chi_row,
    parts::{
        RowValue,
        SliceState,
    },
    Error,
    Errors::*,
};

/// Whether a trail propagates differences or linear masks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TrailKind {
    Differential,
    Linear,
}

impl fmt::Display for TrailKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrailKind::Differential => write!(f, "differential"),
            TrailKind::Linear => write!(f, "linear"),
        }
    }
}

impl FromStr for TrailKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "differential" | "diff" | "d" => Ok(TrailKind::Differential),
            "linear" | "lin" | "l" => Ok(TrailKind::Linear),
            _ => err!(UnknownTrailKind(s.to_string())),
        }
    }
}

struct RowTables {
    weight: [u32; 32],
    rev_weight: [u32; 32],
    // rows on the other side of χ from the side that determines the weight
    compatible: Vec<Vec<RowValue>>,
    // χ outputs for every χ input
    outputs: Vec<Vec<RowValue>>,
}

#[inline]
fn row_parity(row: u32) -> u32 {
    row.count_ones() & 1
}

fn differential_tables() -> &'static RowTables {
    static TABLES: OnceLock<RowTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let mut ddt = [[0u32; 32]; 32];
        for a in 0..32u8 {
            for d in 0..32u8 {
                ddt[d as usize][(chi_row(a) ^ chi_row(a ^ d)) as usize] += 1;
            }
        }
        let compatible: Vec<Vec<RowValue>> = ddt
            .iter()
            .map(|outputs| (0..32).filter(|o| outputs[*o as usize] != 0).collect())
            .collect();
        let mut weight = [0; 32];
        for (d, w) in weight.iter_mut().enumerate() {
            let count = ddt[d][compatible[d][0] as usize];
            *w = 5 - count.trailing_zeros();
        }
        let mut rev_weight = [u32::MAX; 32];
        for (d, outputs) in compatible.iter().enumerate() {
            for o in outputs {
                let rw = &mut rev_weight[*o as usize];
                *rw = (*rw).min(weight[d]);
            }
        }
        RowTables {
            weight,
            rev_weight,
            outputs: compatible.clone(),
            compatible,
        }
    })
}

fn linear_tables() -> &'static RowTables {
    static TABLES: OnceLock<RowTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        // lat[u][v]: correlation of input mask u with output mask v, times 32
        let mut lat = [[0i32; 32]; 32];
        for (u, row) in lat.iter_mut().enumerate() {
            for (v, entry) in row.iter_mut().enumerate() {
                *entry = (0..32u8)
                    .map(|a| {
                        let input = row_parity(u as u32 & a as u32);
                        let output = row_parity(v as u32 & chi_row(a) as u32);
                        if input == output {
                            1
                        } else {
                            -1
                        }
                    })
                    .sum();
            }
        }
        let compatible: Vec<Vec<RowValue>> = (0..32)
            .map(|v| (0..32).filter(|u| lat[*u as usize][v] != 0).collect())
            .collect();
        let mut weight = [0; 32];
        for (v, w) in weight.iter_mut().enumerate() {
            let c = lat[compatible[v][0] as usize][v].unsigned_abs();
            *w = 2 * (5 - c.trailing_zeros());
        }
        let mut rev_weight = [u32::MAX; 32];
        for (v, inputs) in compatible.iter().enumerate() {
            for u in inputs {
                let rw = &mut rev_weight[*u as usize];
                *rw = (*rw).min(weight[v]);
            }
        }
        let outputs: Vec<Vec<RowValue>> = lat
            .iter()
            .map(|row| (0..32).filter(|v| row[*v as usize] != 0).collect())
            .collect();
        RowTables {
            weight,
            rev_weight,
            compatible,
            outputs,
        }
    })
}

/// Weight of χ for the input difference `row`, the same for all compatible outputs.
pub fn differential_weight(row: RowValue) -> u32 {
    differential_tables().weight[row as usize]
}

/// Minimum weight over the input differences that can produce the output difference `row`.
pub fn differential_rev_weight(row: RowValue) -> u32 {
    differential_tables().rev_weight[row as usize]
}

/// Correlation weight of χ for the output mask `row`, the same for all compatible inputs.
pub fn linear_weight(row: RowValue) -> u32 {
    linear_tables().weight[row as usize]
}

/// Minimum weight over the output masks correlated with the input mask `row`.
pub fn linear_rev_weight(row: RowValue) -> u32 {
    linear_tables().rev_weight[row as usize]
}

/// Output differences reachable from the input difference `row`, ascending.
pub fn compatible_outputs(row: RowValue) -> &'static [RowValue] {
    &differential_tables().compatible[row as usize]
}

/// Input masks with nonzero correlation to the output mask `row`, ascending.
pub fn compatible_inputs(row: RowValue) -> &'static [RowValue] {
    &linear_tables().compatible[row as usize]
}

/// Output masks with nonzero correlation to the input mask `row`, ascending.
pub fn correlated_outputs(row: RowValue) -> &'static [RowValue] {
    &linear_tables().outputs[row as usize]
}

impl TrailKind {
    fn tables(self) -> &'static RowTables {
        match self {
            TrailKind::Differential => differential_tables(),
            TrailKind::Linear => linear_tables(),
        }
    }

    /// Weight of a row on the side of χ that determines it: the input for differences, the
    /// output for masks.
    pub fn row_weight(self, row: RowValue) -> u32 {
        self.tables().weight[row as usize]
    }

    /// Minimum weight of a row on the other side of χ.
    pub fn row_rev_weight(self, row: RowValue) -> u32 {
        self.tables().rev_weight[row as usize]
    }

    /// Rows on the other side of χ compatible with `row`.
    pub fn compatible_rows(self, row: RowValue) -> &'static [RowValue] {
        &self.tables().compatible[row as usize]
    }

    pub fn weight(self, state: &SliceState) -> u32 {
        state.active_rows().map(|(_, _, row)| self.row_weight(row)).sum()
    }

    pub fn rev_weight(self, state: &SliceState) -> u32 {
        state.active_rows().map(|(_, _, row)| self.row_rev_weight(row)).sum()
    }

    /// Outputs of χ compatible with the input row `row`.
    pub fn output_rows(self, row: RowValue) -> &'static [RowValue] {
        &self.tables().outputs[row as usize]
    }

    /// All states compatible with `state` through χ, on the other side from the one that
    /// determines the weight. See `CompatibleStates`.
    pub fn compatible_states(self, state: &SliceState) -> CompatibleStates {
        CompatibleStates::new(state, |row| self.compatible_rows(row))
    }

    /// All outputs of χ compatible with the input `state`.
    pub fn output_states(self, state: &SliceState) -> CompatibleStates {
        CompatibleStates::new(state, |row| self.output_rows(row))
    }

    /// Whether χ can turn `before` into `after`: as differences, or as correlated masks.
    pub fn is_compatible(self, before: &SliceState, after: &SliceState) -> bool {
        if before.lane_size() != after.lane_size() {
            return false;
        }
        let lane_size = before.lane_size().get();
        (0..lane_size).all(|z| {
            (0..5).all(|y| {
                let (b, a) = (before.row(y, z), after.row(y, z));
                match self {
                    TrailKind::Differential => compatible_outputs(b).contains(&a),
                    TrailKind::Linear => compatible_inputs(a).contains(&b),
                }
            })
        })
    }
}

/// Iterator over the states compatible with a given state through χ.
///
/// The active rows are ordered by z then y, and the states are enumerated like an odometer:
/// the last active row varies fastest, each row running through its compatible values in
/// ascending order. Inactive rows stay inactive.
pub struct CompatibleStates {
    current: SliceState,
    rows: Vec<(u32, u32, &'static [RowValue])>,
    indices: Vec<usize>,
    done: bool,
}

impl CompatibleStates {
    fn new<F>(state: &SliceState, choices: F) -> Self
    where
        F: Fn(RowValue) -> &'static [RowValue],
    {
        let rows: Vec<_> = state
            .active_rows()
            .map(|(y, z, row)| (y, z, choices(row)))
            .collect();
        let mut current = SliceState::zero(state.lane_size());
        for (y, z, choices) in rows.iter() {
            current.set_row(choices[0], *y, *z);
        }
        Self {
            current,
            indices: vec![0; rows.len()],
            rows,
            done: false,
        }
    }
}

impl Iterator for CompatibleStates {
    type Item = SliceState;

    fn next(&mut self) -> Option<SliceState> {
        if self.done {
            return None;
        }
        let item = self.current.clone();
        let mut k = self.rows.len();
        loop {
            if k == 0 {
                self.done = true;
                break;
            }
            k -= 1;
            let (y, z, choices) = self.rows[k];
            self.indices[k] += 1;
            if self.indices[k] < choices.len() {
                self.current.set_row(choices[self.indices[k]], y, z);
                break;
            }
            self.indices[k] = 0;
            self.current.set_row(choices[0], y, z);
        }
        Some(item)
    }
}
