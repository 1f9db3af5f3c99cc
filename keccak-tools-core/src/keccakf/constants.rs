use std::sync::OnceLock;

use crate::parts::{
    LaneSize,
    LaneValue,
};

/// Rotation offsets of ρ for lane size 64, lane (x, y) at index `5y + x`.
/// Smaller lane sizes take them modulo the lane size.
pub const RHO_OFFSETS: [u32; 25] = [
    0, 1, 62, 28, 27, //
    36, 44, 6, 55, 20, //
    3, 10, 43, 25, 39, //
    41, 45, 15, 21, 8, //
    18, 2, 61, 56, 14,
];

/// Period of the round constant LFSR.
pub const LFSR_PERIOD: usize = 255;

/// Output bits of the LFSR `x^8 + x^6 + x^5 + x^4 + 1` over one period.
fn lfsr_bits() -> &'static [bool; LFSR_PERIOD] {
    static BITS: OnceLock<[bool; LFSR_PERIOD]> = OnceLock::new();
    BITS.get_or_init(|| {
        let mut bits = [false; LFSR_PERIOD];
        let mut r: u32 = 1;
        for bit in bits.iter_mut() {
            *bit = r & 1 == 1;
            r <<= 1;
            if r & 0x100 != 0 {
                r ^= 0x171;
            }
        }
        bits
    })
}

/// Bit `t` of the LFSR sequence, for any integer t.
pub fn lfsr_bit(t: i64) -> bool {
    lfsr_bits()[t.rem_euclid(LFSR_PERIOD as i64) as usize]
}

/// Round constant of round `round_index`, which may be negative for Keccak-p with more rounds
/// than nominal.
pub fn round_constant(lane_size: LaneSize, round_index: i32) -> LaneValue {
    (0..=lane_size.log2()).fold(0, |rc, j| {
        if lfsr_bit(j as i64 + 7 * round_index as i64) {
            rc | (1 << ((1 << j) - 1))
        } else {
            rc
        }
    })
}

/// ρ offset of lane (x, y) for the given lane size.
#[inline]
pub fn rho_offset(x: u32, y: u32, lane_size: LaneSize) -> u32 {
    RHO_OFFSETS[(5 * y + x) as usize] % lane_size.get()
}
