use std::sync::OnceLock;

use super::gf2::{
    solve,
    Equation,
};
use crate::parts::{
    rotate_lane,
    LaneSize,
    LaneState,
    LaneValue,
};

/// θ itself or its transpose, used to propagate linear masks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Transposed,
}

/// Columns flipped by θ for the given column parities (sheet lanes).
pub fn theta_effect(parities: &[LaneValue; 5], lane_size: LaneSize) -> [LaneValue; 5] {
    effect(parities, lane_size, Direction::Forward)
}

/// Columns flipped by the transpose of θ.
pub fn theta_transposed_effect(parities: &[LaneValue; 5], lane_size: LaneSize) -> [LaneValue; 5] {
    effect(parities, lane_size, Direction::Transposed)
}

fn effect(parities: &[LaneValue; 5], lane_size: LaneSize, direction: Direction) -> [LaneValue; 5] {
    let mut e = [0; 5];
    for (x, ex) in e.iter_mut().enumerate() {
        let left = parities[(x + 4) % 5];
        let right = parities[(x + 1) % 5];
        *ex = match direction {
            Direction::Forward => left ^ rotate_lane(right, 1, lane_size),
            Direction::Transposed => right ^ rotate_lane(left, lane_size.get() - 1, lane_size),
        };
    }
    e
}

fn add_effect(state: &LaneState, e: &[LaneValue; 5]) -> LaneState {
    let mut lanes = state.into_lanes();
    for (i, lane) in lanes.iter_mut().enumerate() {
        *lane ^= e[i % 5];
    }
    LaneState::from_array(lanes, state.lane_size())
}

/// Applies θ: every bit gets the parities of columns (x - 1, z) and (x + 1, z - 1).
pub fn theta(state: &LaneState) -> LaneState {
    add_effect(state, &theta_effect(&state.parities(), state.lane_size()))
}

/// Applies the transpose of θ: every bit gets the parities of columns (x + 1, z) and
/// (x - 1, z + 1).
pub fn theta_transposed(state: &LaneState) -> LaneState {
    add_effect(state, &theta_transposed_effect(&state.parities(), state.lane_size()))
}

pub fn inverse_theta(state: &LaneState) -> LaneState {
    invert(state, Direction::Forward)
}

pub fn inverse_theta_transposed(state: &LaneState) -> LaneState {
    invert(state, Direction::Transposed)
}

// On the parity plane θ maps p to (I + E) p. The parities before θ are recovered from the
// inverse of (I + E), which commutes with translations along x and z and is thus given by its
// response to a single odd column at (0, 0).
fn invert(state: &LaneState, direction: Direction) -> LaneState {
    let lane_size = state.lane_size();
    let response = impulse_response(lane_size, direction);
    let parities = state.parities();
    let mut before = [0; 5];
    for (x, p) in parities.iter().enumerate() {
        for z in (0..lane_size.get()).filter(|z| (p >> z) & 1 == 1) {
            for (dx, r) in response.iter().enumerate() {
                before[(dx + x) % 5] ^= rotate_lane(*r, z, lane_size);
            }
        }
    }
    add_effect(state, &effect(&before, lane_size, direction))
}

fn impulse_response(lane_size: LaneSize, direction: Direction) -> &'static [LaneValue; 5] {
    static RESPONSES: OnceLock<Vec<[[LaneValue; 5]; 2]>> = OnceLock::new();
    let responses = RESPONSES.get_or_init(|| {
        LaneSize::ALL
            .iter()
            .map(|s| {
                [
                    solve_impulse_response(*s, Direction::Forward),
                    solve_impulse_response(*s, Direction::Transposed),
                ]
            })
            .collect()
    });
    &responses[lane_size.log2() as usize][direction as usize]
}

fn solve_impulse_response(lane_size: LaneSize, direction: Direction) -> [LaneValue; 5] {
    let w = lane_size.as_usize();
    let n = 5 * w;
    let var = |x: usize, z: usize| x * w + z;
    let equations = (0..5)
        .flat_map(|x| (0..w).map(move |z| (x, z)))
        .map(|(x, z)| {
            let mut eq = Equation::new(n);
            eq.toggle(var(x, z));
            match direction {
                Direction::Forward => {
                    eq.toggle(var((x + 4) % 5, z));
                    eq.toggle(var((x + 1) % 5, (z + w - 1) % w));
                }
                Direction::Transposed => {
                    eq.toggle(var((x + 1) % 5, z));
                    eq.toggle(var((x + 4) % 5, (z + 1) % w));
                }
            }
            if (x, z) == (0, 0) {
                eq.toggle(n);
            }
            eq
        })
        .collect();

    let mut response = [0; 5];
    for (i, bit) in solve(equations, n).into_iter().enumerate() {
        if bit {
            response[i / w] |= 1 << (i % w);
        }
    }
    response
}

/// Half the number of columns flipped by θ, i.e. the number of runs in the parity plane.
pub fn theta_gap(state: &LaneState) -> u32 {
    gap(&theta_effect(&state.parities(), state.lane_size()))
}

/// Same as `theta_gap` for the transpose of θ.
pub fn theta_transposed_gap(state: &LaneState) -> u32 {
    gap(&theta_transposed_effect(&state.parities(), state.lane_size()))
}

fn gap(e: &[LaneValue; 5]) -> u32 {
    e.iter().map(|lane| lane.count_ones()).sum::<u32>() / 2
}

/// Whether θ acts as the identity on the state.
pub fn is_in_kernel(state: &LaneState) -> bool {
    theta_effect(&state.parities(), state.lane_size())
        .iter()
        .all(|e| *e == 0)
}

