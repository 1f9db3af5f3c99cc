use keccak_tools_core::parts::{
    LaneSize,
    SliceState,
    NR_ROWS_AND_COLUMNS,
};

/// Column values with an even number of active bits, the columns in the kernel of θ.
pub fn even_columns() -> impl Iterator<Item = u32> {
    (1..32u32).filter(|c| c.count_ones() % 2 == 0)
}

/// Single-column kernel states at z = 0: column x takes every even value in ascending order,
/// for x = 0, ..., 4.
///
/// Every trail core found from these anchors is canonical with respect to translation along z.
pub fn kernel_anchors(lane_size: LaneSize) -> Vec<SliceState> {
    (0..NR_ROWS_AND_COLUMNS)
        .flat_map(|x| even_columns().map(move |column| (x, column)))
        .map(|(x, column)| {
            (0..NR_ROWS_AND_COLUMNS)
                .filter(|y| (column >> y) & 1 == 1)
                .fold(SliceState::zero(lane_size), |state, y| state.with_row(1 << x, y, 0))
        })
        .collect()
}
