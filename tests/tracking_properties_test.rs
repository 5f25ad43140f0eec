//! Property tests for selection, stabilization and motion mapping

use eyeball_tracker::{
    geometry::{Circle, EyePoint, Rect, ScreenPoint},
    motion::{Bounds, CursorState, MotionMapper},
    selection::{intensity_sum, select_leftmost_eye, select_pupil},
    stabilizer::{stabilize, PositionHistory, PositionStabilizer},
};
use image::{GrayImage, Luma};
use proptest::prelude::*;

fn eye_rects() -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec((0..500i32, 0..500i32, 1..100i32, 1..100i32), 1..6)
        .prop_map(|v| v.into_iter().map(|(x, y, w, h)| Rect::new(x, y, w, h)).collect())
}

fn eye_points() -> impl Strategy<Value = Vec<EyePoint>> {
    prop::collection::vec((0.0..200.0f64, 0.0..200.0f64), 0..20)
        .prop_map(|v| v.into_iter().map(|(x, y)| EyePoint::new(x, y)).collect())
}

proptest! {
    #[test]
    fn prop_leftmost_eye_has_minimal_x(eyes in eye_rects()) {
        let chosen = select_leftmost_eye(&eyes).unwrap();
        prop_assert!(eyes.iter().all(|e| chosen.x <= e.x));
        // Ties resolve to the earliest rectangle
        let first = eyes.iter().position(|e| e.x == chosen.x).unwrap();
        prop_assert_eq!(chosen, eyes[first]);
    }

    #[test]
    fn prop_pupil_is_darkest_candidate(
        seed in 0u8..=255,
        circles in prop::collection::vec((0.0..40.0f32, 0.0..30.0f32, 0.0..12.0f32), 1..6)
    ) {
        let eye = GrayImage::from_fn(40, 30, |x, y| {
            Luma([seed.wrapping_add((x * 7 + y * 13) as u8)])
        });
        let circles: Vec<Circle> = circles.into_iter().map(|(x, y, r)| Circle::new(x, y, r)).collect();

        let pupil = select_pupil(&eye, &circles).unwrap();
        let best = intensity_sum(&eye, &pupil);
        prop_assert!(circles.iter().all(|c| best <= intensity_sum(&eye, c)));
    }

    #[test]
    fn prop_stabilized_point_within_window_extent(points in eye_points(), window in 1usize..10) {
        let result = stabilize(&points, window);
        let tail: Vec<_> = points.iter().rev().take(window).collect();

        if tail.is_empty() {
            prop_assert_eq!(result, EyePoint::zero());
        } else {
            let min_x = tail.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
            let max_x = tail.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(result.x >= min_x - 1e-9 && result.x <= max_x + 1e-9);
        }
    }

    #[test]
    fn prop_history_smoothing_matches_slice(points in eye_points(), window in 1usize..10) {
        let mut history = PositionHistory::new(64);
        for p in &points {
            history.push(*p);
        }
        let smoothed = PositionStabilizer::new(window).smooth(&history);
        let direct = stabilize(&points, window);
        prop_assert!((smoothed.x - direct.x).abs() < 1e-9);
        prop_assert!((smoothed.y - direct.y).abs() < 1e-9);
    }

    #[test]
    fn prop_cursor_stays_in_bounds(
        points in eye_points(),
        gain_x in -500.0..500.0f64,
        gain_y in -500.0..500.0f64,
        width in 1u32..4000,
        height in 1u32..4000
    ) {
        let mapper = MotionMapper::new(gain_x, gain_y);
        let bounds = Bounds::new(width, height);
        let mut state = CursorState::default();

        for p in points {
            let cursor = mapper.update(&mut state, p, bounds);
            prop_assert!(cursor.x >= 0.0 && cursor.x <= f64::from(width));
            prop_assert!(cursor.y >= 0.0 && cursor.y <= f64::from(height));
            prop_assert_eq!(state.previous, Some(p));
        }
    }
}

#[test]
fn test_window_scenario() {
    let points: Vec<EyePoint> = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0]
        .iter()
        .map(|&x| EyePoint::new(x, 10.0))
        .collect();
    assert_eq!(stabilize(&points, 5), EyePoint::new(16.0, 10.0));
}

#[test]
fn test_mapper_scenarios() {
    let mapper = MotionMapper::default();
    let screen = Bounds::new(1920, 1080);

    let mut state = CursorState::new(ScreenPoint::new(800.0, 800.0));
    state.previous = Some(EyePoint::new(14.0, 10.0));
    assert_eq!(
        mapper.update(&mut state, EyePoint::new(16.0, 10.0), screen),
        ScreenPoint::new(1000.0, 800.0)
    );

    // Vertical gain is negative: moving down moves the cursor up
    let mut state = CursorState::new(ScreenPoint::new(800.0, 800.0));
    state.previous = Some(EyePoint::new(10.0, 10.0));
    assert_eq!(
        mapper.update(&mut state, EyePoint::new(10.0, 12.0), screen),
        ScreenPoint::new(800.0, 640.0)
    );

    // Large jumps clamp to the surface
    let mut state = CursorState::new(ScreenPoint::new(1900.0, 10.0));
    state.previous = Some(EyePoint::new(10.0, 10.0));
    assert_eq!(
        mapper.update(&mut state, EyePoint::new(20.0, 20.0), screen),
        ScreenPoint::new(1920.0, 0.0)
    );
}
