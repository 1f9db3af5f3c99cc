use super::{
    constants::rho_offset,
    theta::{
        inverse_theta,
        theta,
        theta_transposed,
        inverse_theta_transposed,
    },
};
use crate::parts::{
    rotate_lane,
    LaneState,
    NR_ROWS_AND_COLUMNS,
};

pub fn rho(state: &LaneState) -> LaneState {
    rotate_lanes(state, false)
}

pub fn inverse_rho(state: &LaneState) -> LaneState {
    rotate_lanes(state, true)
}

fn rotate_lanes(state: &LaneState, inverse: bool) -> LaneState {
    let lane_size = state.lane_size();
    let mut result = *state;
    for y in 0..NR_ROWS_AND_COLUMNS {
        for x in 0..NR_ROWS_AND_COLUMNS {
            let offset = rho_offset(x, y, lane_size);
            let offset = if inverse {
                (lane_size.get() - offset) % lane_size.get()
            } else {
                offset
            };
            result.set_lane(rotate_lane(state.lane(x, y), offset, lane_size), x, y);
        }
    }
    result
}

/// Position of lane (x, y) after π.
#[inline]
pub fn pi_position(x: u32, y: u32) -> (u32, u32) {
    (y, (2 * x + 3 * y) % 5)
}

pub fn pi(state: &LaneState) -> LaneState {
    let mut result = *state;
    for y in 0..NR_ROWS_AND_COLUMNS {
        for x in 0..NR_ROWS_AND_COLUMNS {
            let (px, py) = pi_position(x, y);
            result.set_lane(state.lane(x, y), px, py);
        }
    }
    result
}

pub fn inverse_pi(state: &LaneState) -> LaneState {
    let mut result = *state;
    for y in 0..NR_ROWS_AND_COLUMNS {
        for x in 0..NR_ROWS_AND_COLUMNS {
            let (px, py) = pi_position(x, y);
            result.set_lane(state.lane(px, py), x, y);
        }
    }
    result
}

/// The linear part of the round, `π ∘ ρ ∘ θ`.
pub fn lambda(state: &LaneState) -> LaneState {
    pi(&rho(&theta(state)))
}

pub fn inverse_lambda(state: &LaneState) -> LaneState {
    inverse_theta(&inverse_rho(&inverse_pi(state)))
}

/// Transpose of λ, `θᵀ ∘ ρ⁻¹ ∘ π⁻¹`, mapping masks after λ to masks before it.
pub fn lambda_transposed(state: &LaneState) -> LaneState {
    theta_transposed(&inverse_rho(&inverse_pi(state)))
}

pub fn inverse_lambda_transposed(state: &LaneState) -> LaneState {
    pi(&rho(&inverse_theta_transposed(state)))
}
