use std::sync::OnceLock;

use crate::parts::{
    LaneState,
    RowValue,
    NR_ROWS_AND_COLUMNS,
    ROW_MASK,
};

/// χ on a single row: `b[x] = a[x] + (a[x + 1] + 1) a[x + 2]`.
#[inline]
pub fn chi_row(row: RowValue) -> RowValue {
    let rotated_1 = ((row >> 1) | (row << 4)) & ROW_MASK;
    let rotated_2 = ((row >> 2) | (row << 3)) & ROW_MASK;
    row ^ (!rotated_1 & rotated_2 & ROW_MASK)
}

/// Inverse of `chi_row`, χ being a permutation of the 32 row values.
pub fn inverse_chi_row(row: RowValue) -> RowValue {
    static INVERSE: OnceLock<[RowValue; 32]> = OnceLock::new();
    INVERSE.get_or_init(|| {
        let mut inverse = [0; 32];
        for a in 0..32 {
            inverse[chi_row(a) as usize] = a;
        }
        inverse
    })[(row & ROW_MASK) as usize]
}

/// Applies χ lane-wise on all rows.
pub fn chi(state: &LaneState) -> LaneState {
    let a = state.lanes();
    let mut b = *a;
    for y in 0..5 {
        for x in 0..5 {
            let a1 = a[5 * y + (x + 1) % 5];
            let a2 = a[5 * y + (x + 2) % 5];
            b[5 * y + x] ^= !a1 & a2;
        }
    }
    LaneState::from_array(b, state.lane_size())
}

pub fn inverse_chi(state: &LaneState) -> LaneState {
    let mut result = *state;
    for z in 0..state.lane_size().get() {
        for y in 0..NR_ROWS_AND_COLUMNS {
            result.set_row(inverse_chi_row(state.row(y, z)), y, z);
        }
    }
    result
}
