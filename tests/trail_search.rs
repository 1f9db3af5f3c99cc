use keccak_tools::{
    keccak_tools_core::{
        keccakf::{
            inverse_lambda_transposed,
            is_in_kernel,
            lambda,
            lambda_transposed,
        },
        parts::LaneSize,
    },
    keccak_tools_trails::{
        report::{
            render_outcome,
            ReportOptions,
        },
        search,
        SearchParams,
        TrailKind,
    },
};

fn search_1600(kind: TrailKind, nr_rounds: u32) -> keccak_tools::keccak_tools_trails::SearchOutcome {
    let params = SearchParams::builder(kind).rounds(nr_rounds).build().unwrap();
    search(&params).unwrap()
}

#[test]
fn differential_three_rounds() {
    let outcome = search_1600(TrailKind::Differential, 3);
    assert_eq!(outcome.minimum_weight, Some(32));
    assert_eq!(outcome.total_at_minimum, 1);
    assert_eq!(outcome.trails.len(), 1);

    let trail = &outcome.trails[0];
    trail.verify().unwrap();
    assert_eq!(trail.lane_size(), LaneSize::default());
    assert_eq!(trail.total_weight(), 32);
    assert_eq!(trail.weights(), vec![4, 4, 24]);
    assert_eq!(trail.active_rows(), vec![2, 2, 12]);
    assert_eq!(trail.theta_gaps(), vec![None, Some(0), Some(1)]);

    let a1 = trail.rounds()[0].after_chi.clone().unwrap().to_lanes();
    let a2 = trail.rounds()[1].after_chi.clone().unwrap().to_lanes();
    assert!(is_in_kernel(&a1));
    assert!(!is_in_kernel(&a2));
    assert_eq!(lambda(&a1), trail.rounds()[1].before_chi.clone().unwrap().to_lanes());
}

#[test]
fn linear_three_rounds() {
    let outcome = search_1600(TrailKind::Linear, 3);
    assert_eq!(outcome.minimum_weight, Some(26));
    assert_eq!(outcome.total_at_minimum, 1);
    assert_eq!(outcome.trails.len(), 1);

    let trail = &outcome.trails[0];
    trail.verify().unwrap();
    assert_eq!(trail.total_weight(), 26);
    assert_eq!(trail.weights(), vec![18, 4, 4]);
    assert_eq!(trail.active_rows(), vec![9, 2, 2]);
    assert_eq!(trail.active_rows()[1..], [2, 2]);
    assert_eq!(trail.theta_gaps(), vec![Some(1), Some(0), None]);
    assert_eq!(trail.rounds()[0].is_in_kernel(), Some(false));
    assert_eq!(trail.rounds()[1].is_in_kernel(), Some(true));

    // masks are listed in λᵀ order, the anchor last
    let anchor = trail.rounds()[2].after_chi.clone().unwrap().to_lanes();
    let b1 = trail.rounds()[1].before_chi.clone().unwrap().to_lanes();
    assert!(is_in_kernel(&anchor));
    assert!(trail.rounds()[2].before_chi.is_none());
    assert_eq!(lambda_transposed(&b1), anchor);
    assert_eq!(inverse_lambda_transposed(&anchor), b1);
}

#[test]
fn two_rounds_ties() {
    for kind in [TrailKind::Differential, TrailKind::Linear].iter().copied() {
        let outcome = search_1600(kind, 2);
        assert_eq!(outcome.minimum_weight, Some(8));
        assert_eq!(outcome.total_at_minimum, 50);
        assert_eq!(outcome.trails.len(), 16);
        for trail in outcome.trails.iter() {
            trail.verify().unwrap();
            assert_eq!(trail.weights(), vec![4, 4]);
        }
    }
}

#[test]
fn report_of_linear_search() {
    let outcome = search_1600(TrailKind::Linear, 3);
    let text = render_outcome(&outcome, &ReportOptions::default()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("linear trail cores of Keccak-f[1600] over 3 rounds, maximum weight 64")
    );
    assert_eq!(lines.next(), Some("minimum weight 26, 1 cores at minimum, 1 reported"));
    assert!(text.contains("linear trail core, 3 rounds, Keccak-f[1600], total weight 26\n"));
    assert!(text.contains("weights: 18 4 4\nactive rows: 9 2 2\n"));
    assert!(text.contains("round 0: weight 18, active rows 9, theta-gap 1, outside kernel\n"));
    assert!(text.contains("round 1: weight 4, active rows 2, theta-gap 0, in kernel\n"));
    assert!(text.contains("round 2: weight 4, active rows 2, theta-gap -, -\n"));
    assert!(text.contains("   z=48  z=49"));
}

#[test]
fn four_rounds_under_a_low_ceiling() {
    // every 3-round prefix weighs at least 32, so nothing fits under 20
    let params = SearchParams::builder(TrailKind::Differential)
        .rounds(4)
        .max_weight(20)
        .threads(1)
        .build()
        .unwrap();
    let outcome = search(&params).unwrap();
    assert!(outcome.is_empty());
    assert_eq!(outcome.minimum_weight, None);
    assert_eq!(outcome.total_at_minimum, 0);
    assert!(outcome.nodes_visited > 75);
}
