use super::*;

fn timing(fps: f64, spp: f64, duration: Option<f64>) -> Timing {
    Timing {
        fps,
        seconds_per_item: spp,
        duration,
    }
}

#[test]
fn frame_count_from_seconds_per_item() {
    assert_eq!(timing(1.0, 2.0, None).frame_count(5), 10);
    assert_eq!(timing(30.0, 1.5, None).frame_count(3), 135);
}

#[test]
fn duration_overrides_seconds_per_item() {
    assert_eq!(timing(24.0, 2.0, Some(10.0)).frame_count(5), 240);
    assert_eq!(timing(24.0, 2.0, Some(0.0)).frame_count(5), 240);
}

#[test]
fn frame_count_rounds_and_floors_at_one() {
    assert_eq!(timing(1.0, 0.25, None).frame_count(1), 1);
    assert_eq!(timing(1.0, 0.0, None).frame_count(4), 1);
    assert_eq!(timing(2.5, 1.0, None).frame_count(1), 3);
}

#[test]
fn reference_plan_matches_expected_numbers() {
    let plan = MotionPlan::new(3000, 720, &timing(1.0, 2.0, None), 5, false);
    assert_eq!(plan.frame_count, 10);
    assert_eq!(plan.distance, 2280);
    assert_eq!(plan.pixels_per_frame, 228.0);
    assert_eq!(plan.offset(0), 0);
    assert_eq!(plan.offset(9), 2052);
    assert!(plan.offsets().all(|o| o <= 2280));
}

#[test]
fn reversed_direction_mirrors_forward() {
    let t = timing(3.0, 1.7, None);
    for (style, mirror) in [(Style::Up, Style::Down), (Style::Left, Style::Right)] {
        let (axis_a, fwd) = MotionPlan::for_style(style, 1999, 480, &t, 4).unwrap();
        let (axis_b, rev) = MotionPlan::for_style(mirror, 1999, 480, &t, 4).unwrap();
        assert_eq!(axis_a, axis_b);
        assert_eq!(fwd.frame_count, rev.frame_count);
        for i in 0..fwd.frame_count {
            assert_eq!(rev.offset(i), fwd.distance - fwd.offset(i));
        }
    }
}

#[test]
fn reversed_starts_at_the_far_end() {
    let plan = MotionPlan::new(3000, 720, &timing(1.0, 2.0, None), 5, true);
    assert_eq!(plan.offset(0), 2280);
    assert_eq!(plan.offset(9), 228);
}

#[test]
fn zero_distance_holds_every_frame_at_zero() {
    let plan = MotionPlan::new(720, 720, &timing(2.0, 1.0, None), 3, false);
    assert_eq!(plan.distance, 0);
    assert_eq!(plan.pixels_per_frame, 1.0);
    assert_eq!(plan.offsets().count(), 6);
    assert!(plan.offsets().all(|o| o == 0));

    let rev = MotionPlan::new(500, 720, &timing(2.0, 1.0, None), 3, true);
    assert_eq!(rev.distance, 0);
    assert!(rev.offsets().all(|o| o == 0));
}

#[test]
fn offsets_are_monotonic_and_clamped() {
    let plan = MotionPlan::new(10_000, 720, &timing(30.0, 0.7, None), 7, false);
    let offsets: Vec<u32> = plan.offsets().collect();
    assert_eq!(offsets.len() as u64, plan.frame_count);
    assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
    assert!(offsets.iter().all(|&o| o <= plan.distance));
}

#[test]
fn frames_style_has_no_motion_plan() {
    let err = MotionPlan::for_style(Style::Frames, 100, 10, &timing(1.0, 1.0, None), 1);
    assert!(err.unwrap_err().is_config());
}
