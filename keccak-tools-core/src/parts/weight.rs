use super::{
    row_from_slice,
    LaneState,
    LaneValue,
    RowValue,
    SliceState,
    SliceValue,
    NR_ROWS_AND_COLUMNS,
};

#[inline]
pub fn hamming_weight_row(row: RowValue) -> u32 {
    row.count_ones()
}

#[inline]
pub fn hamming_weight_slice(slice: SliceValue) -> u32 {
    slice.count_ones()
}

#[inline]
pub fn hamming_weight_lane(lane: LaneValue) -> u32 {
    lane.count_ones()
}

/// Number of nonzero rows in a slice.
pub fn nr_active_rows_slice(slice: SliceValue) -> u32 {
    (0..NR_ROWS_AND_COLUMNS)
        .filter(|y| row_from_slice(slice, *y) != 0)
        .count() as u32
}

impl SliceState {
    pub fn hamming_weight(&self) -> u32 {
        self.slices().iter().map(|slice| hamming_weight_slice(*slice)).sum()
    }

    pub fn nr_active_rows(&self) -> u32 {
        self.slices().iter().map(|slice| nr_active_rows_slice(*slice)).sum()
    }

    /// Number of slices with at least one bit set.
    pub fn nr_active_slices(&self) -> u32 {
        self.slices().iter().filter(|slice| **slice != 0).count() as u32
    }
}

impl LaneState {
    pub fn hamming_weight(&self) -> u32 {
        self.lanes().iter().map(|lane| hamming_weight_lane(*lane)).sum()
    }

    pub fn nr_active_rows(&self) -> u32 {
        (0..self.lane_size().get())
            .map(|z| nr_active_rows_slice(self.slice(z)))
            .sum()
    }
}
