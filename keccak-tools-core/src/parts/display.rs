use core::fmt;

use super::{
    parity,
    SliceState,
    NR_ROWS_AND_COLUMNS,
};
use crate::{
    try_or,
    Errors::*,
    Result,
};

/// Number of slices drawn next to each other before starting a new band.
pub const SLICES_PER_BAND: u32 = 16;

fn render_grid<F, P>(lane_size: u32, cell: F, parity_cell: Option<P>) -> String
where
    F: Fn(u32, u32, u32) -> char,
    P: Fn(u32, u32) -> char,
{
    let mut out = String::new();
    let mut z0 = 0;
    while z0 < lane_size {
        let zs = z0..core::cmp::min(z0 + SLICES_PER_BAND, lane_size);
        if z0 > 0 {
            out.push('\n');
        }
        let mut line = String::from("   ");
        for z in zs.clone() {
            line.push_str(&format!("{:<5} ", format!("z={}", z)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
        for y in 0..NR_ROWS_AND_COLUMNS {
            let mut line = format!("y{} ", y);
            for z in zs.clone() {
                line.extend((0..NR_ROWS_AND_COLUMNS).map(|x| cell(x, y, z)));
                line.push(' ');
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        if let Some(parity_cell) = &parity_cell {
            out.push_str("---\n");
            let mut line = String::from(" p ");
            for z in zs.clone() {
                line.extend((0..NR_ROWS_AND_COLUMNS).map(|x| parity_cell(x, z)));
                line.push(' ');
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        z0 += SLICES_PER_BAND;
    }
    out
}

fn parity_char(odd: bool) -> char {
    if odd {
        'O'
    } else {
        '.'
    }
}

/// ASCII grid of a single slice.
pub fn display_slice(slice: super::SliceValue, show_parity: bool) -> String {
    let p = parity(slice);
    render_grid(
        1,
        |x, y, _| {
            if (super::row_from_slice(slice, y) >> x) & 1 == 1 {
                'X'
            } else {
                '.'
            }
        },
        if show_parity {
            Some(|x: u32, _: u32| parity_char((p >> x) & 1 == 1))
        } else {
            None
        },
    )
}

/// ASCII grid of a state, slices side by side, `X` for active bits.
pub fn display_state(state: &SliceState, show_parity: bool) -> String {
    let parities = state.parities();
    render_grid(
        state.lane_size().get(),
        |x, y, z| if state.bit(x, y, z) { 'X' } else { '.' },
        if show_parity {
            Some(|x: u32, z: u32| parity_char((parities[z as usize] >> x) & 1 == 1))
        } else {
            None
        },
    )
}

/// Grids of several states next to each other, each state in its own column.
pub fn display_states(states: &[SliceState], show_parity: bool) -> String {
    let grids: Vec<Vec<String>> = states
        .iter()
        .map(|state| display_state(state, show_parity).lines().map(String::from).collect())
        .collect();
    let height = grids.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = grids
        .iter()
        .map(|lines| lines.iter().map(|l| l.chars().count()).max().unwrap_or(0))
        .collect();
    let mut out = String::new();
    for i in 0..height {
        let mut line = String::new();
        for (lines, width) in grids.iter().zip(widths.iter()) {
            let cell = lines.get(i).map(String::as_str).unwrap_or("");
            line.push_str(&format!("{:<width$}   ", cell, width = *width));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Grid of the bits changed by a nonlinear step: `+` after only, `O` before only, `X` both.
pub fn display_transition(before: &SliceState, after: &SliceState, show_parity: bool) -> Result<String> {
    try_or!(
        before.lane_size() == after.lane_size(),
        LaneSizeMismatch(before.lane_size().get(), after.lane_size().get())
    )?;
    let parities = after.parities();
    Ok(render_grid(
        before.lane_size().get(),
        |x, y, z| match (before.bit(x, y, z), after.bit(x, y, z)) {
            (true, true) => 'X',
            (true, false) => 'O',
            (false, true) => '+',
            (false, false) => '.',
        },
        if show_parity {
            Some(|x: u32, z: u32| parity_char((parities[z as usize] >> x) & 1 == 1))
        } else {
            None
        },
    ))
}

impl fmt::Display for SliceState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&display_state(self, f.alternate()))
    }
}
