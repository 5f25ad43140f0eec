//! Mapping stabilized pupil motion to cursor displacement.

use crate::{
    constants::{DEFAULT_GAIN_X, DEFAULT_GAIN_Y, DEFAULT_INITIAL_CURSOR},
    geometry::{EyePoint, ScreenPoint},
};
use log::debug;

/// Size of the surface the cursor is clamped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Largest valid x
    pub width: u32,
    /// Largest valid y
    pub height: u32,
}

impl Bounds {
    /// Create new bounds
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Clamp each axis of `point` independently to `[0, bound]`
    #[must_use]
    pub fn clamp(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            point.x.clamp(0.0, f64::from(self.width)),
            point.y.clamp(0.0, f64::from(self.height)),
        )
    }
}

/// Cursor position plus the last stabilized pupil center it was driven by
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    /// Current cursor position
    pub cursor: ScreenPoint,
    /// Previous stabilized pupil center, `None` until the first observation
    pub previous: Option<EyePoint>,
}

impl CursorState {
    /// Start at `cursor` with no pupil observation yet
    #[must_use]
    pub const fn new(cursor: ScreenPoint) -> Self {
        Self {
            cursor,
            previous: None,
        }
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new(ScreenPoint::new(DEFAULT_INITIAL_CURSOR.0, DEFAULT_INITIAL_CURSOR.1))
    }
}

/// Converts pupil deltas into cursor displacement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionMapper {
    gain_x: f64,
    gain_y: f64,
}

impl MotionMapper {
    /// Create a mapper with signed per-axis gains
    #[must_use]
    pub const fn new(gain_x: f64, gain_y: f64) -> Self {
        Self { gain_x, gain_y }
    }

    /// Negate the gain on the selected axes
    #[must_use]
    pub fn inverted(self, invert_x: bool, invert_y: bool) -> Self {
        let flip = |gain: f64, invert: bool| if invert { -gain } else { gain };
        Self::new(flip(self.gain_x, invert_x), flip(self.gain_y, invert_y))
    }

    /// Effective horizontal gain
    #[must_use]
    pub const fn gain_x(&self) -> f64 {
        self.gain_x
    }

    /// Effective vertical gain
    #[must_use]
    pub const fn gain_y(&self) -> f64 {
        self.gain_y
    }

    /// Cursor displacement for a pupil delta
    #[must_use]
    pub fn displacement(&self, current: EyePoint, previous: EyePoint) -> ScreenPoint {
        let delta = current - previous;
        ScreenPoint::new(delta.x * self.gain_x, delta.y * self.gain_y)
    }

    /// Advance `state` with a new stabilized pupil center
    ///
    /// The first observation only seeds `state.previous`; later ones move the
    /// cursor by the scaled delta. The cursor is clamped to `bounds` either way
    /// and the clamped position is returned.
    pub fn update(&self, state: &mut CursorState, current: EyePoint, bounds: Bounds) -> ScreenPoint {
        if let Some(previous) = state.previous {
            let displacement = self.displacement(current, previous);
            state.cursor = state.cursor + displacement;
            debug!("Pupil moved {:?}, cursor displaced by {:?}", current - previous, displacement);
        }
        state.previous = Some(current);
        state.cursor = bounds.clamp(state.cursor);
        state.cursor
    }
}

impl Default for MotionMapper {
    fn default() -> Self {
        Self::new(DEFAULT_GAIN_X, DEFAULT_GAIN_Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Bounds = Bounds::new(1920, 1080);

    #[test]
    fn test_first_observation_seeds_only() {
        let mapper = MotionMapper::default();
        let mut state = CursorState::default();

        let cursor = mapper.update(&mut state, EyePoint::new(14.0, 10.0), SCREEN);
        assert_eq!(cursor, ScreenPoint::new(800.0, 800.0));
        assert_eq!(state.previous, Some(EyePoint::new(14.0, 10.0)));
    }

    #[test]
    fn test_gains_applied() {
        let mapper = MotionMapper::default();
        let mut state = CursorState::default();
        state.previous = Some(EyePoint::new(14.0, 10.0));

        let cursor = mapper.update(&mut state, EyePoint::new(16.0, 11.0), SCREEN);
        assert_eq!(cursor, ScreenPoint::new(1000.0, 720.0));
    }

    #[test]
    fn test_zero_delta_keeps_cursor() {
        let mapper = MotionMapper::default();
        let mut state = CursorState::default();
        state.previous = Some(EyePoint::new(5.0, 5.0));

        let cursor = mapper.update(&mut state, EyePoint::new(5.0, 5.0), SCREEN);
        assert_eq!(cursor, ScreenPoint::new(800.0, 800.0));
    }

    #[test]
    fn test_clamped_to_bounds() {
        let mapper = MotionMapper::default();
        let mut state = CursorState::default();
        state.previous = Some(EyePoint::new(0.0, 0.0));

        let cursor = mapper.update(&mut state, EyePoint::new(50.0, -50.0), SCREEN);
        assert_eq!(cursor, ScreenPoint::new(1920.0, 1080.0));

        let cursor = mapper.update(&mut state, EyePoint::new(-50.0, 50.0), SCREEN);
        assert_eq!(cursor, ScreenPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_inversion() {
        let mapper = MotionMapper::default().inverted(true, true);
        assert_eq!(mapper.gain_x(), -100.0);
        assert_eq!(mapper.gain_y(), 80.0);

        let unchanged = MotionMapper::default().inverted(false, false);
        assert_eq!(unchanged, MotionMapper::default());
    }
}
