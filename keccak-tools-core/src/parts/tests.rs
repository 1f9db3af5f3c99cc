use rand::{
    rngs::StdRng,
    Rng,
    SeedableRng,
};

use super::*;

fn random_lanes<R: Rng>(rng: &mut R, lane_size: LaneSize) -> [LaneValue; NR_LANES] {
    let mut lanes = [0; NR_LANES];
    for lane in lanes.iter_mut() {
        *lane = rng.gen::<LaneValue>() & lane_size.mask();
    }
    lanes
}

fn random_state<R: Rng>(rng: &mut R, lane_size: LaneSize) -> LaneState {
    LaneState::from_array(random_lanes(rng, lane_size), lane_size)
}

#[test]
fn lane_sizes() {
    assert_eq!(
        LaneSize::ALL.iter().map(|s| s.width()).collect::<Vec<_>>(),
        vec![25, 50, 100, 200, 400, 800, 1600]
    );
    assert_eq!(LaneSize::default().nominal_rounds(), 24);
    assert_eq!(LaneSize::new(1).unwrap().nominal_rounds(), 12);
    assert_eq!(LaneSize::from_width(200).unwrap(), LaneSize::new(8).unwrap());
    assert!(LaneSize::new(3).is_err());
    assert!(LaneSize::new(128).is_err());
    assert!(LaneSize::from_width(1601).is_err());
    assert_eq!(LaneSize::new(8).unwrap().to_string(), "Keccak-f[200]");
}

#[test]
fn lanes_slices_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for lane_size in LaneSize::ALL.iter().copied() {
        for _ in 0..20 {
            let lanes = random_lanes(&mut rng, lane_size);
            let slices = lanes_to_slices(&lanes, lane_size).unwrap();
            assert_eq!(slices.len(), lane_size.as_usize());
            assert_eq!(slices_to_lanes(&slices).unwrap(), lanes);

            let state = LaneState::from_lanes(&lanes, lane_size).unwrap();
            assert_eq!(state.to_slices().to_lanes(), state);
            assert_eq!(LaneState::from(&SliceState::from(&state)), state);
        }
    }
}

#[test]
fn conversion_rejects_bad_dimensions() {
    assert!(lanes_to_slices(&[0; 24], LaneSize::default()).is_err());
    assert!(slices_to_lanes(&[0; 3]).is_err());
    assert!(slices_to_lanes(&[MAX_SLICE_VALUE + 1]).is_err());
    assert!(SliceState::from_slices(vec![0; 5]).is_err());
    assert!(LaneState::from_lanes(&[0x100; 25], LaneSize::new(8).unwrap()).is_err());
}

#[test]
fn lanes_wider_than_lane_size_are_rejected() {
    let lane_size = LaneSize::new(8).unwrap();
    let mut lanes = [0; NR_LANES];
    lanes[0] = 1 << 40;
    assert!(matches!(
        lanes_to_slices(&lanes, lane_size).unwrap_err().downcast::<crate::Errors>().unwrap(),
        crate::Errors::ValueOutOfRange(0xff, v) if v == 1 << 40
    ));
    assert!(SliceState::from_lanes(&lanes, lane_size).is_err());

    lanes[0] = 0x80;
    let slices = lanes_to_slices(&lanes, lane_size).unwrap();
    assert_eq!(slices[7], 1);
    assert_eq!(slices_to_lanes(&slices).unwrap(), lanes);
}

#[test]
fn set_row_only_touches_its_row() {
    let mut rng = StdRng::seed_from_u64(7);
    let lane_size = LaneSize::new(8).unwrap();
    let state = random_state(&mut rng, lane_size);
    let slices = state.to_slices();
    for z in 0..lane_size.get() {
        for y in 0..5 {
            for row in 0..32u8 {
                let changed = slices.clone().with_row(row, y, z);
                assert_eq!(changed.row(y, z), row);
                for zz in 0..lane_size.get() {
                    for yy in 0..5 {
                        if (yy, zz) != (y, z) {
                            assert_eq!(changed.row(yy, zz), slices.row(yy, zz));
                        }
                    }
                }

                let mut lanes = state;
                lanes.set_row(row, y, z);
                assert_eq!(lanes.row(y, z), row);
                assert_eq!(lanes.to_slices(), changed);
            }
        }
    }
}

#[test]
fn slice_accessors_agree() {
    let mut rng = StdRng::seed_from_u64(11);
    let state = random_state(&mut rng, LaneSize::new(16).unwrap());
    let slices = state.to_slices();
    for z in 0..16 {
        assert_eq!(state.slice(z), slices.slice(z));
        let mut other = LaneState::zero(state.lane_size());
        other.set_slice(slices.slice(z), z);
        assert_eq!(other.slice(z), slices.slice(z));
        assert_eq!(other.hamming_weight(), hamming_weight_slice(slices.slice(z)));
    }
    assert_eq!(
        slice_value([1, 2, 3, 4, 5]),
        1 | (2 << 5) | (3 << 10) | (4 << 15) | (5 << 20)
    );
}

#[test]
fn translate_slice_group_law() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let slice = rng.gen_range(0..=MAX_SLICE_VALUE);
        let (dx1, dy1, dx2, dy2) = (
            rng.gen_range(0..5),
            rng.gen_range(0..5),
            rng.gen_range(0..5),
            rng.gen_range(0..5),
        );
        assert_eq!(
            translate_slice(translate_slice(slice, dx1, dy1), dx2, dy2),
            translate_slice(slice, (dx1 + dx2) % 5, (dy1 + dy2) % 5)
        );
    }
}

#[test]
fn safe_translations_normalize() {
    for row in 0..32u8 {
        for dx in 0..5 {
            assert_eq!(translate_row_safely(row, dx as i32), translate_row(row, dx));
            assert_eq!(translate_row_safely(row, dx as i32 - 5), translate_row(row, dx));
            assert_eq!(translate_row_safely(row, dx as i32 + 10), translate_row(row, dx));
        }
    }
    assert_eq!(translate_row(0b00001, 1), 0b00010);
    assert_eq!(translate_row(0b10000, 1), 0b00001);
    let slice = slice_value([1, 0, 0, 0, 0]);
    assert_eq!(translate_slice(slice, 0, 1), slice_value([0, 1, 0, 0, 0]));
    assert_eq!(translate_slice_safely(slice, -1, -1), slice_value([0, 0, 0, 0, 0b10000]));
}

#[test]
fn translation_along_z() {
    let lane_size = LaneSize::new(8).unwrap();
    let state = SliceState::zero(lane_size).with_row(0b101, 2, 6);
    let moved = state.translated_along_z(3);
    assert_eq!(moved.row(2, 1), 0b101);
    assert_eq!(moved.nr_active_rows(), 1);
    assert_eq!(moved.to_lanes(), state.to_lanes().translated_along_z(3));
    assert_eq!(state.translated(0, 0, -6).row(2, 0), 0b101);
    assert_eq!(state.translated(1, 1, 2).row(3, 0), 0b1010);
}

#[test]
fn weights_and_active_rows() {
    let mut rng = StdRng::seed_from_u64(5);
    assert_eq!(hamming_weight_slice(0), 0);
    assert_eq!(nr_active_rows_slice(0), 0);
    for _ in 0..500 {
        let slice = rng.gen_range(1..=MAX_SLICE_VALUE);
        let w = hamming_weight_slice(slice);
        let r = nr_active_rows_slice(slice);
        assert!(w > 0 && r > 0);
        assert!(w >= r);
    }
    let state = SliceState::zero(LaneSize::new(4).unwrap())
        .with_row(0b11, 0, 0)
        .with_row(0b1, 4, 0)
        .with_row(0b10101, 1, 3);
    assert_eq!(state.hamming_weight(), 6);
    assert_eq!(state.nr_active_rows(), 3);
    assert_eq!(state.nr_active_slices(), 2);
    assert_eq!(state.to_lanes().nr_active_rows(), 3);
    assert_eq!(
        state.active_rows().collect::<Vec<_>>(),
        vec![(0, 0, 0b11), (4, 0, 0b1), (1, 3, 0b10101)]
    );
}

#[test]
fn parity_properties() {
    let mut rng = StdRng::seed_from_u64(9);
    for row in 0..32u8 {
        assert_eq!(parity(slice_value([row, row, 0, 0, 0])), 0);
        assert_eq!(parity(slice_value([row, 0, row, row, row])), 0);
        assert_eq!(parity(slice_value([row; 5])), row);
    }
    for _ in 0..200 {
        let slice = rng.gen_range(0..=MAX_SLICE_VALUE);
        let row: RowValue = rng.gen_range(0..32);
        let mixed = slice ^ slice_value([row; 5]);
        assert_eq!(parity(mixed), parity(slice) ^ row);
        let mixed_twice = slice ^ slice_value([row, row, 0, 0, 0]);
        assert_eq!(parity(mixed_twice), parity(slice));
    }
}

#[test]
fn parity_packing() {
    let state = SliceState::zero(LaneSize::new(4).unwrap())
        .with_row(0b00011, 0, 1)
        .with_row(0b00001, 3, 1)
        .with_row(0b10000, 2, 3);
    assert_eq!(state.parities(), vec![0, 0b00010, 0, 0b10000]);
    let packed = state.packed_parities().unwrap();
    assert_eq!(packed, parities_from_parity(0b10, 1) | parities_from_parity(0b10000, 3));
    assert_eq!(parity_from_parities(packed, 1), 0b10);
    assert_eq!(parity_from_parities(packed, 3), 0b10000);
    assert!(SliceState::zero(LaneSize::new(16).unwrap()).packed_parities().is_err());

    let sheets = slices_to_lanes_parities(&state.parities()).unwrap();
    assert_eq!(sheets, state.to_lanes().parities());
    assert_eq!(sheets, [0, 0b0010, 0, 0, 0b1000]);
    assert_eq!(lanes_to_slices_parities(&sheets, state.lane_size()), state.parities());
}

#[test]
fn hex_dump() {
    let mut state = LaneState::zero(LaneSize::new(16).unwrap());
    state.set_lane(0xbeef, 0, 0);
    state.set_lane(0x1234, 4, 4);
    let hex = state.to_hex();
    assert!(hex.starts_with("beef 0000"));
    assert!(hex.ends_with("0000 1234"));
    assert_eq!(hex.split(' ').count(), 25);
}

#[test]
fn grids() {
    let state = SliceState::zero(LaneSize::new(2).unwrap())
        .with_row(0b00001, 0, 0)
        .with_row(0b00011, 4, 1);
    assert_eq!(
        display_state(&state, true),
        "   z=0   z=1\n\
         y0 X.... .....\n\
         y1 ..... .....\n\
         y2 ..... .....\n\
         y3 ..... .....\n\
         y4 ..... XX...\n\
         ---\n \
         p O.... OO...\n"
    );

    let after = state.clone().with_row(0b00110, 4, 1);
    assert_eq!(
        display_transition(&state, &after, false).unwrap().lines().nth(5),
        Some("y4 ..... OX+..")
    );
    assert!(display_transition(&state, &SliceState::zero(LaneSize::new(4).unwrap()), false).is_err());

    let wide = SliceState::zero(LaneSize::new(32).unwrap());
    let grid = display_state(&wide, false);
    assert_eq!(grid.lines().count(), 13);
    assert!(grid.lines().nth(7).unwrap_or("").starts_with("   z=16"));

    let both = display_states(&[state.clone(), after], false);
    assert!(both.lines().nth(5).unwrap_or("").ends_with("XX...   y4 ..... .XX.."));
}
