use super::{
    row_from_slice,
    LaneSize,
    LaneState,
    LaneValue,
    PackedParities,
    RowValue,
    SliceState,
    SliceValue,
    NR_ROWS_AND_COLUMNS,
    ROW_MASK,
};
use crate::{
    try_or,
    Errors::*,
    Result,
};

/// Maximum number of parities that fit in a `PackedParities`.
pub const MAX_PACKED_PARITIES: usize = 8;

/// Column parities of a slice, bit x set iff column x has an odd number of active bits.
#[inline]
pub fn parity(slice: SliceValue) -> RowValue {
    (0..NR_ROWS_AND_COLUMNS).fold(0, |p, y| p ^ row_from_slice(slice, y))
}

/// Packed parities with all slices even except slice z, which gets `parity`.
#[inline]
pub fn parities_from_parity(parity: RowValue, z: u32) -> PackedParities {
    ((parity & ROW_MASK) as PackedParities) << (5 * z)
}

/// Parity of slice z in packed parities.
#[inline]
pub fn parity_from_parities(parities: PackedParities, z: u32) -> RowValue {
    ((parities >> (5 * z)) as RowValue) & ROW_MASK
}

/// Parities given per slice turned into 5 sheet lanes: bit z of lane x is bit x of `parities[z]`.
pub fn slices_to_lanes_parities(parities: &[RowValue]) -> Result<[LaneValue; 5]> {
    try_or!(
        parities.len() <= 64,
        ValueOutOfRange(64, parities.len() as u64)
    )?;
    let mut lanes = [0; 5];
    for (z, p) in parities.iter().enumerate() {
        for (x, lane) in lanes.iter_mut().enumerate() {
            *lane |= (((p >> x) & 1) as LaneValue) << z;
        }
    }
    Ok(lanes)
}

/// Inverse of `slices_to_lanes_parities`.
pub fn lanes_to_slices_parities(lanes: &[LaneValue; 5], lane_size: LaneSize) -> Vec<RowValue> {
    (0..lane_size.get())
        .map(|z| {
            lanes
                .iter()
                .enumerate()
                .fold(0, |p, (x, lane)| p | ((((lane >> z) & 1) as RowValue) << x))
        })
        .collect()
}

impl SliceState {
    pub fn parities(&self) -> Vec<RowValue> {
        self.slices().iter().map(|slice| parity(*slice)).collect()
    }

    /// Parities packed in one word; only for states of at most 8 slices.
    pub fn packed_parities(&self) -> Result<PackedParities> {
        let n = self.slices().len();
        try_or!(
            n <= MAX_PACKED_PARITIES,
            ValueOutOfRange(MAX_PACKED_PARITIES as u64, n as u64)
        )?;
        Ok(self
            .slices()
            .iter()
            .enumerate()
            .fold(0, |packed, (z, slice)| packed | parities_from_parity(parity(*slice), z as u32)))
    }
}

impl LaneState {
    /// Column parities as sheet lanes, lane x is the XOR of the 5 lanes of sheet x.
    pub fn parities(&self) -> [LaneValue; 5] {
        let mut sheets = [0; 5];
        for (x, sheet) in sheets.iter_mut().enumerate() {
            *sheet = (0..NR_ROWS_AND_COLUMNS).fold(0, |p, y| p ^ self.lane(x as u32, y));
        }
        sheets
    }
}
