//! Pupil position stabilization over a trailing window.
//!
//! Raw pupil centers jump by a few pixels from frame to frame even when the
//! eye is still. The stabilizer keeps a short history of centers and reports
//! their moving average.

use crate::geometry::EyePoint;
use std::collections::VecDeque;

/// Mean of the last `min(window, points.len())` points
///
/// An empty input or a zero window yields the zero point.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Window sizes are tiny
pub fn stabilize<'a, I>(points: I, window: usize) -> EyePoint
where
    I: IntoIterator<Item = &'a EyePoint>,
    I::IntoIter: DoubleEndedIterator,
{
    let (sum_x, sum_y, count) = points
        .into_iter()
        .rev()
        .take(window)
        .fold((0.0, 0.0, 0usize), |(sx, sy, n), p| (sx + p.x, sy + p.y, n + 1));

    if count == 0 {
        return EyePoint::zero();
    }
    EyePoint::new(sum_x / count as f64, sum_y / count as f64)
}

/// Ordered history of pupil centers for one tracking session
#[derive(Debug, Clone)]
pub struct PositionHistory {
    capacity: usize,
    points: VecDeque<EyePoint>,
}

impl PositionHistory {
    /// Create a history retaining at most `capacity` points (at least one)
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a point, dropping the oldest when full
    pub fn push(&mut self, point: EyePoint) {
        if self.points.len() >= self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Raise the retention limit to at least `min_capacity`
    pub fn ensure_capacity(&mut self, min_capacity: usize) {
        if min_capacity > self.capacity {
            self.capacity = min_capacity;
            self.points.reserve(min_capacity - self.points.len());
        }
    }

    /// Maximum number of retained points
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained points
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no point has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Retained points, oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &EyePoint> {
        self.points.iter()
    }

    /// Drop all points
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Moving-average stabilizer with a fixed window
#[derive(Debug, Clone, Copy)]
pub struct PositionStabilizer {
    window: usize,
}

impl PositionStabilizer {
    /// Create a stabilizer averaging over `window` samples
    #[must_use]
    pub const fn new(window: usize) -> Self {
        Self { window }
    }

    /// Window size
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Smoothed estimate for the current history
    #[must_use]
    pub fn smooth(&self, history: &PositionHistory) -> EyePoint {
        stabilize(history.iter(), self.window)
    }
}

impl Default for PositionStabilizer {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_STABILIZATION_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<EyePoint> {
        coords.iter().map(|&(x, y)| EyePoint::new(x, y)).collect()
    }

    #[test]
    fn test_empty_history_is_zero() {
        let empty: Vec<EyePoint> = Vec::new();
        assert_eq!(stabilize(&empty, 5), EyePoint::zero());
    }

    #[test]
    fn test_zero_window_is_zero() {
        let history = points(&[(3.0, 4.0)]);
        assert_eq!(stabilize(&history, 0), EyePoint::zero());
    }

    #[test]
    fn test_short_history_averages_everything() {
        let history = points(&[(10.0, 10.0), (12.0, 14.0), (14.0, 12.0)]);
        assert_eq!(stabilize(&history, 5), EyePoint::new(12.0, 12.0));
    }

    #[test]
    fn test_long_history_uses_trailing_window() {
        let history = points(&[
            (10.0, 10.0),
            (12.0, 10.0),
            (14.0, 10.0),
            (16.0, 10.0),
            (18.0, 10.0),
            (20.0, 10.0),
        ]);
        assert_eq!(stabilize(&history, 5), EyePoint::new(16.0, 10.0));
    }

    #[test]
    fn test_history_capacity() {
        let mut history = PositionHistory::new(3);
        for i in 0..5 {
            history.push(EyePoint::new(f64::from(i), 0.0));
        }
        assert_eq!(history.len(), 3);
        let xs: Vec<f64> = history.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_ensure_capacity_only_grows() {
        let mut history = PositionHistory::new(2);
        history.ensure_capacity(5);
        assert_eq!(history.capacity(), 5);
        history.ensure_capacity(3);
        assert_eq!(history.capacity(), 5);

        for i in 0..6 {
            history.push(EyePoint::new(f64::from(i), 0.0));
        }
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn test_stabilizer_over_history() {
        let stabilizer = PositionStabilizer::new(2);
        let mut history = PositionHistory::new(10);
        history.push(EyePoint::new(0.0, 0.0));
        history.push(EyePoint::new(4.0, 2.0));
        history.push(EyePoint::new(6.0, 4.0));
        assert_eq!(stabilizer.smooth(&history), EyePoint::new(5.0, 3.0));
    }
}
