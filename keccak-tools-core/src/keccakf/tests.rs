use rand::{
    rngs::StdRng,
    Rng,
    SeedableRng,
};

use super::*;
use crate::parts::{
    LaneSize,
    LaneState,
    LaneValue,
    SliceState,
};

fn random_state<R: Rng>(rng: &mut R, lane_size: LaneSize) -> LaneState {
    let mut lanes = [0; 25];
    for lane in lanes.iter_mut() {
        *lane = rng.gen::<LaneValue>();
    }
    LaneState::from_array(lanes, lane_size)
}

fn each_lane_size_random_states(seed: u64, n: usize, f: impl Fn(&LaneState)) {
    let mut rng = StdRng::seed_from_u64(seed);
    for lane_size in LaneSize::ALL.iter().copied() {
        for _ in 0..n {
            f(&random_state(&mut rng, lane_size));
        }
    }
}

fn inner_product(a: &LaneState, b: &LaneState) -> u32 {
    a.lanes()
        .iter()
        .zip(b.lanes().iter())
        .map(|(x, y)| (x & y).count_ones())
        .sum::<u32>()
        % 2
}

#[test]
fn zero_state_vector() {
    let f = KeccakF::default();
    let out = f.permute(&LaneState::zero(LaneSize::default())).unwrap();
    assert_eq!(out.lane(0, 0), 0xF1258F7940E1DDE7);
    assert_eq!(f.name(), "Keccak-f[1600]");
}

#[test]
fn round_constants() {
    let f = KeccakF::default();
    assert_eq!(f.round_constant(0), 0x1);
    assert_eq!(f.round_constant(1), 0x8082);
    assert_eq!(f.round_constant(2), 0x800000000000808a);
    assert_eq!(f.round_constant(23), 0x8000000080008008);
    assert_eq!(f.round_constant(-1), 0x8a);
    assert_eq!(f.round_constant(23 + 255), f.round_constant(23));
    let f200 = KeccakF::new(LaneSize::new(8).unwrap());
    assert_eq!(f200.round_constant(1), 0x82);
}

#[test]
fn round_indices() {
    let f = KeccakF::reduced(LaneSize::default(), 3).unwrap();
    assert_eq!(f.round_indices(), 21..24);
    assert_eq!(f.name(), "Keccak-p[1600, nr=3]");
    let f = KeccakF::reduced(LaneSize::new(1).unwrap(), 14).unwrap();
    assert_eq!(f.round_indices(), -2..12);
    assert!(KeccakF::reduced(LaneSize::default(), 0).is_err());
    assert!(KeccakF::from_width(1000).is_err());
}

#[test]
fn agrees_with_keccak_crate() {
    let mut rng = StdRng::seed_from_u64(1600);
    for _ in 0..10 {
        let lanes: [u64; 25] = rng.gen();
        let mut expected = lanes;
        keccak::f1600(&mut expected);
        let state = LaneState::from_array(lanes, LaneSize::new(64).unwrap());
        let out = KeccakF::from_width(1600).unwrap().permute(&state).unwrap();
        assert_eq!(out.lanes(), &expected);

        let mut expected = [0u32; 25];
        expected.iter_mut().zip(lanes.iter()).for_each(|(e, l)| *e = *l as u32);
        let state = LaneState::from_array(lanes, LaneSize::new(32).unwrap());
        keccak::f800(&mut expected);
        let out = KeccakF::from_width(800).unwrap().permute(&state).unwrap();
        assert!(out.lanes().iter().zip(expected.iter()).all(|(o, e)| *o == *e as u64));

        let mut expected = [0u16; 25];
        expected.iter_mut().zip(lanes.iter()).for_each(|(e, l)| *e = *l as u16);
        let state = LaneState::from_array(lanes, LaneSize::new(16).unwrap());
        keccak::f400(&mut expected);
        let out = KeccakF::from_width(400).unwrap().permute(&state).unwrap();
        assert!(out.lanes().iter().zip(expected.iter()).all(|(o, e)| *o == *e as u64));

        let mut expected = [0u8; 25];
        expected.iter_mut().zip(lanes.iter()).for_each(|(e, l)| *e = *l as u8);
        let state = LaneState::from_array(lanes, LaneSize::new(8).unwrap());
        keccak::f200(&mut expected);
        let out = KeccakF::from_width(200).unwrap().permute(&state).unwrap();
        assert!(out.lanes().iter().zip(expected.iter()).all(|(o, e)| *o == *e as u64));
    }
}

#[test]
fn step_inverses() {
    each_lane_size_random_states(1, 8, |a| {
        assert_eq!(&inverse_theta(&theta(a)), a);
        assert_eq!(&theta(&inverse_theta(a)), a);
        assert_eq!(&inverse_theta_transposed(&theta_transposed(a)), a);
        assert_eq!(&inverse_rho(&rho(a)), a);
        assert_eq!(&rho(&inverse_rho(a)), a);
        assert_eq!(&inverse_pi(&pi(a)), a);
        assert_eq!(&pi(&inverse_pi(a)), a);
        assert_eq!(&inverse_chi(&chi(a)), a);
        assert_eq!(&chi(&inverse_chi(a)), a);
        assert_eq!(&inverse_lambda(&lambda(a)), a);
        assert_eq!(&inverse_lambda_transposed(&lambda_transposed(a)), a);
    });
}

#[test]
fn round_inverses() {
    let mut rng = StdRng::seed_from_u64(2);
    for lane_size in LaneSize::ALL.iter().copied() {
        let f = KeccakF::new(lane_size);
        let a = random_state(&mut rng, lane_size);
        for round_index in f.round_indices() {
            assert_eq!(f.inverse_round(&f.round(&a, round_index), round_index), a);
            assert_eq!(f.round(&f.inverse_round(&a, round_index), round_index), a);
            assert_eq!(f.iota(&f.iota(&a, round_index), round_index), a);
        }
        let out = f.permute(&a).unwrap();
        assert_eq!(f.inverse_permute(&out).unwrap(), a);
    }
    let f = KeccakF::default();
    assert!(f.permute(&LaneState::zero(LaneSize::new(1).unwrap())).is_err());
}

#[test]
fn theta_transposed_is_transpose() {
    let mut rng = StdRng::seed_from_u64(3);
    for lane_size in LaneSize::ALL.iter().copied() {
        for _ in 0..8 {
            let a = random_state(&mut rng, lane_size);
            let b = random_state(&mut rng, lane_size);
            assert_eq!(inner_product(&theta(&a), &b), inner_product(&a, &theta_transposed(&b)));
            assert_eq!(
                inner_product(&lambda(&a), &b),
                inner_product(&a, &lambda_transposed(&b))
            );
        }
    }
}

#[test]
fn chi_rows() {
    assert_eq!(chi_row(0), 0);
    assert_eq!(chi_row(1), 9);
    assert_eq!(chi_row(31), 31);
    let mut seen = [false; 32];
    for row in 0..32 {
        assert_eq!(inverse_chi_row(chi_row(row)), row);
        seen[chi_row(row) as usize] = true;
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn kernel_and_gap() {
    let lane_size = LaneSize::default();
    let column = SliceState::zero(lane_size).with_row(0b00100, 1, 5).with_row(0b00100, 3, 5);
    let state = column.to_lanes();
    assert!(is_in_kernel(&state));
    assert_eq!(theta_gap(&state), 0);
    assert_eq!(theta_transposed_gap(&state), 0);
    assert_eq!(theta(&state), state);
    assert_eq!(theta_transposed(&state), state);

    let single = SliceState::zero(lane_size).with_row(0b00100, 1, 5).to_lanes();
    assert!(!is_in_kernel(&single));
    assert_eq!(theta_gap(&single), 1);
    let effect = theta_effect(&single.parities(), lane_size);
    assert_eq!(effect[3], 1 << 5);
    assert_eq!(effect[1], 1 << 6);

    let two_runs = SliceState::zero(lane_size)
        .with_row(0b00001, 0, 0)
        .with_row(0b00001, 0, 20)
        .to_lanes();
    assert_eq!(theta_gap(&two_runs), 2);
}
