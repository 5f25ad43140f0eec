//! Geometric primitives shared by the detectors and the tracking pipeline.
//!
//! Points carry a zero-sized coordinate-space marker so that a pupil center in
//! eye-crop coordinates cannot be mixed up with a frame or screen position.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

/// Axis-aligned rectangle in integer pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (exclusive)
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive)
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Center point in the rectangle's own coordinate frame
    #[must_use]
    pub fn center(&self) -> FramePoint {
        FramePoint::new(
            f64::from(self.x) + f64::from(self.width) / 2.0,
            f64::from(self.y) + f64::from(self.height) / 2.0,
        )
    }

    /// True when the rectangle covers no pixels
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Shift the rectangle by the top-left corner of `origin`
    ///
    /// Used to lift an eye rectangle from face-local into frame coordinates.
    #[must_use]
    pub const fn offset_by(&self, origin: &Self) -> Self {
        Self::new(
            self.x.saturating_add(origin.x),
            self.y.saturating_add(origin.y),
            self.width,
            self.height,
        )
    }
}

/// Circle candidate returned by a circle finder
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Circle {
    /// Center x
    pub x: f32,
    /// Center y
    pub y: f32,
    /// Radius
    pub radius: f32,
}

impl Circle {
    /// Create a new circle
    #[must_use]
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    /// Center of the circle in eye-crop coordinates
    #[must_use]
    pub fn center(&self) -> EyePoint {
        EyePoint::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Coordinates relative to the tracked eye crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EyeSpace;

/// Coordinates relative to the full camera frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSpace;

/// Coordinates on the cursor's target surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenSpace;

/// 2D point tagged with the coordinate space it lives in
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Point<S> {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
    space: PhantomData<S>,
}

/// Point inside the eye crop
pub type EyePoint = Point<EyeSpace>;

/// Point inside the camera frame
pub type FramePoint = Point<FrameSpace>;

/// Cursor position
pub type ScreenPoint = Point<ScreenSpace>;

impl<S> Point<S> {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    /// The origin of this space
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl<S> fmt::Debug for Point<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl<S> Add for Point<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<S> Sub for Point<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl EyePoint {
    /// Lift an eye-crop point into frame coordinates
    ///
    /// `eye_origin` is the tracked eye rectangle already expressed in frame
    /// coordinates.
    #[must_use]
    pub fn to_frame(self, eye_origin: &Rect) -> FramePoint {
        FramePoint::new(
            self.x + f64::from(eye_origin.x),
            self.y + f64::from(eye_origin.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_offset() {
        let face = Rect::new(100, 50, 200, 200);
        let eye = Rect::new(20, 30, 40, 40);

        let lifted = eye.offset_by(&face);
        assert_eq!(lifted, Rect::new(120, 80, 40, 40));
        assert_eq!(lifted.right(), 160);
        assert_eq!(lifted.bottom(), 120);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = EyePoint::new(14.0, 10.0);
        let b = EyePoint::new(16.0, 10.0);
        let delta = b - a;
        assert_eq!(delta, EyePoint::new(2.0, 0.0));
        assert_eq!(a + delta, b);
    }

    #[test]
    fn test_eye_point_to_frame() {
        let eye_in_frame = Rect::new(120, 80, 40, 40);
        let center = EyePoint::new(10.5, 12.0);
        let frame = center.to_frame(&eye_in_frame);
        assert_eq!(frame, FramePoint::new(130.5, 92.0));
    }

    #[test]
    fn test_extreme_rect_edges_saturate() {
        let rect = Rect::new(i32::MAX - 10, i32::MAX - 5, 100, 100);
        assert_eq!(rect.right(), i32::MAX);
        assert_eq!(rect.bottom(), i32::MAX);

        let lifted = Rect::new(i32::MAX, 0, 10, 10).offset_by(&Rect::new(50, 0, 1, 1));
        assert_eq!(lifted.x, i32::MAX);
    }

    #[test]
    fn test_rect_center() {
        assert_eq!(Rect::new(100, 50, 200, 150).center(), FramePoint::new(200.0, 125.0));
    }

    #[test]
    fn test_empty_rect() {
        assert!(Rect::new(0, 0, 0, 10).is_empty());
        assert!(Rect::new(0, 0, 10, -1).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }
}
