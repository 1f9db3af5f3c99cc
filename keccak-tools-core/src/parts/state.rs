use core::fmt;

use super::{
    rotate_lane,
    row_from_slice,
    slice_from_row,
    LaneSize,
    LaneValue,
    RowValue,
    SliceValue,
    MAX_SLICE_VALUE,
    NR_LANES,
    NR_ROWS_AND_COLUMNS,
    ROW_MASK,
};
use crate::{
    try_or,
    Errors::*,
    Result,
};

#[inline]
fn lane_index(x: u32, y: u32) -> usize {
    (NR_ROWS_AND_COLUMNS * y + x) as usize
}

fn gather_slice(lanes: &[LaneValue], z: u32) -> SliceValue {
    lanes
        .iter()
        .enumerate()
        .fold(0, |slice, (i, lane)| slice | ((((lane >> z) & 1) as SliceValue) << i))
}

fn scatter_slices(slices: &[SliceValue]) -> [LaneValue; NR_LANES] {
    let mut lanes = [0; NR_LANES];
    for (z, slice) in slices.iter().enumerate() {
        for (i, lane) in lanes.iter_mut().enumerate() {
            *lane |= (((slice >> i) & 1) as LaneValue) << z;
        }
    }
    lanes
}

/// Slices of a state given as 25 lanes, index `5y + x`. Every lane must fit in `lane_size` bits.
pub fn lanes_to_slices(lanes: &[LaneValue], lane_size: LaneSize) -> Result<Vec<SliceValue>> {
    try_or!(lanes.len() == NR_LANES, LengthMismatch(NR_LANES, lanes.len()))?;
    for lane in lanes {
        try_or!(*lane <= lane_size.mask(), ValueOutOfRange(lane_size.mask(), *lane))?;
    }
    Ok((0..lane_size.get()).map(|z| gather_slice(lanes, z)).collect())
}

/// Lanes of a state given as slices; the number of slices is the lane size.
pub fn slices_to_lanes(slices: &[SliceValue]) -> Result<[LaneValue; NR_LANES]> {
    LaneSize::new(slices.len() as u32)?;
    for slice in slices {
        try_or!(
            *slice <= MAX_SLICE_VALUE,
            ValueOutOfRange(MAX_SLICE_VALUE as u64, *slice as u64)
        )?;
    }
    Ok(scatter_slices(slices))
}

/// A state as a sequence of slices, one per z.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SliceState {
    slices: Vec<SliceValue>,
}

impl SliceState {
    pub fn zero(lane_size: LaneSize) -> Self {
        Self {
            slices: vec![0; lane_size.as_usize()],
        }
    }

    pub fn from_slices(slices: Vec<SliceValue>) -> Result<Self> {
        LaneSize::new(slices.len() as u32)?;
        for slice in &slices {
            try_or!(
                *slice <= MAX_SLICE_VALUE,
                ValueOutOfRange(MAX_SLICE_VALUE as u64, *slice as u64)
            )?;
        }
        Ok(Self { slices })
    }

    pub fn from_lanes(lanes: &[LaneValue], lane_size: LaneSize) -> Result<Self> {
        Ok(Self {
            slices: lanes_to_slices(lanes, lane_size)?,
        })
    }

    pub fn lane_size(&self) -> LaneSize {
        LaneSize(self.slices.len() as u32)
    }

    pub fn slices(&self) -> &[SliceValue] {
        &self.slices
    }

    pub fn slice(&self, z: u32) -> SliceValue {
        self.slices[z as usize]
    }

    pub fn set_slice(&mut self, slice: SliceValue, z: u32) {
        self.slices[z as usize] = slice & MAX_SLICE_VALUE;
    }

    pub fn row(&self, y: u32, z: u32) -> RowValue {
        row_from_slice(self.slices[z as usize], y)
    }

    pub fn set_row(&mut self, row: RowValue, y: u32, z: u32) {
        let slice = &mut self.slices[z as usize];
        *slice &= !slice_from_row(ROW_MASK, y);
        *slice |= slice_from_row(row & ROW_MASK, y);
    }

    /// Copy of this state with row (y, z) replaced.
    pub fn with_row(mut self, row: RowValue, y: u32, z: u32) -> Self {
        self.set_row(row, y, z);
        self
    }

    pub fn bit(&self, x: u32, y: u32, z: u32) -> bool {
        (self.row(y, z) >> x) & 1 == 1
    }

    pub fn is_zero(&self) -> bool {
        self.slices.iter().all(|slice| *slice == 0)
    }

    /// Nonzero rows as `(y, z, row)`, z first then y.
    pub fn active_rows(&self) -> impl Iterator<Item = (u32, u32, RowValue)> + '_ {
        self.slices.iter().enumerate().flat_map(|(z, slice)| {
            (0..NR_ROWS_AND_COLUMNS).filter_map(move |y| {
                let row = row_from_slice(*slice, y);
                if row != 0 {
                    Some((y, z as u32, row))
                } else {
                    None
                }
            })
        })
    }

    /// Translation along z: slice z moves to slice `z + dz`.
    pub fn translated_along_z(&self, dz: u32) -> Self {
        let n = self.slices.len();
        let dz = dz as usize % n;
        let mut slices = vec![0; n];
        for (z, slice) in self.slices.iter().enumerate() {
            slices[(z + dz) % n] = *slice;
        }
        Self { slices }
    }

    /// Translation along the three axes, any positive or negative amounts.
    pub fn translated(&self, dx: i32, dy: i32, dz: i32) -> Self {
        let n = self.slices.len() as i32;
        let slices = self
            .slices
            .iter()
            .map(|slice| super::translate_slice_safely(*slice, dx, dy))
            .collect();
        Self { slices }.translated_along_z(dz.rem_euclid(n) as u32)
    }

    pub fn to_lanes(&self) -> LaneState {
        LaneState {
            lane_size: self.lane_size(),
            lanes: scatter_slices(&self.slices),
        }
    }
}

impl From<&LaneState> for SliceState {
    fn from(state: &LaneState) -> Self {
        state.to_slices()
    }
}

impl fmt::Debug for SliceState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SliceState[")?;
        for (z, slice) in self.slices.iter().enumerate() {
            if z > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:07x}", slice)?;
        }
        write!(f, "]")
    }
}

/// A state as 25 lanes, lane (x, y) at index `5y + x`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct LaneState {
    lane_size: LaneSize,
    lanes: [LaneValue; NR_LANES],
}

impl LaneState {
    pub fn zero(lane_size: LaneSize) -> Self {
        Self {
            lane_size,
            lanes: [0; NR_LANES],
        }
    }

    /// State made of the given lanes, which must fit in `lane_size` bits.
    pub fn from_lanes(lanes: &[LaneValue], lane_size: LaneSize) -> Result<Self> {
        try_or!(lanes.len() == NR_LANES, LengthMismatch(NR_LANES, lanes.len()))?;
        let mut state = Self::zero(lane_size);
        for (dst, lane) in state.lanes.iter_mut().zip(lanes.iter()) {
            try_or!(*lane <= lane_size.mask(), ValueOutOfRange(lane_size.mask(), *lane))?;
            *dst = *lane;
        }
        Ok(state)
    }

    /// State made of the given lanes truncated to `lane_size` bits.
    pub fn from_array(lanes: [LaneValue; NR_LANES], lane_size: LaneSize) -> Self {
        let mask = lane_size.mask();
        let mut state = Self { lane_size, lanes };
        state.lanes.iter_mut().for_each(|lane| *lane &= mask);
        state
    }

    pub fn lane_size(&self) -> LaneSize {
        self.lane_size
    }

    pub fn lanes(&self) -> &[LaneValue; NR_LANES] {
        &self.lanes
    }

    pub fn into_lanes(self) -> [LaneValue; NR_LANES] {
        self.lanes
    }

    pub fn lane(&self, x: u32, y: u32) -> LaneValue {
        self.lanes[lane_index(x, y)]
    }

    pub fn set_lane(&mut self, lane: LaneValue, x: u32, y: u32) {
        self.lanes[lane_index(x, y)] = lane & self.lane_size.mask();
    }

    pub fn row(&self, y: u32, z: u32) -> RowValue {
        (0..NR_ROWS_AND_COLUMNS).fold(0, |row, x| {
            row | ((((self.lane(x, y) >> z) & 1) as RowValue) << x)
        })
    }

    pub fn set_row(&mut self, row: RowValue, y: u32, z: u32) {
        for x in 0..NR_ROWS_AND_COLUMNS {
            let lane = &mut self.lanes[lane_index(x, y)];
            *lane &= !(1 << z);
            *lane |= (((row >> x) & 1) as LaneValue) << z;
        }
    }

    pub fn slice(&self, z: u32) -> SliceValue {
        gather_slice(&self.lanes, z)
    }

    pub fn set_slice(&mut self, slice: SliceValue, z: u32) {
        for (i, lane) in self.lanes.iter_mut().enumerate() {
            *lane &= !(1 << z);
            *lane |= (((slice >> i) & 1) as LaneValue) << z;
        }
    }

    pub fn is_zero(&self) -> bool {
        self.lanes.iter().all(|lane| *lane == 0)
    }

    /// Translation along z: every lane is rotated by `dz` positions.
    pub fn translated_along_z(&self, dz: u32) -> Self {
        let mut state = *self;
        for lane in state.lanes.iter_mut() {
            *lane = rotate_lane(*lane, dz, self.lane_size);
        }
        state
    }

    pub fn to_slices(&self) -> SliceState {
        SliceState {
            slices: (0..self.lane_size.get()).map(|z| self.slice(z)).collect(),
        }
    }

    /// Lanes as big-endian hexadecimal words, lane 0 first.
    pub fn to_hex(&self) -> String {
        let nr_bytes = ((self.lane_size.get() + 7) / 8) as usize;
        self.lanes
            .iter()
            .map(|lane| hex::encode(&lane.to_be_bytes()[8 - nr_bytes..]))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<&SliceState> for LaneState {
    fn from(state: &SliceState) -> Self {
        state.to_lanes()
    }
}

impl fmt::Debug for LaneState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LaneState({}: {})", self.lane_size, self.to_hex())
    }
}
