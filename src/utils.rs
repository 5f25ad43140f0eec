//! Utility functions for rectangle clipping and numeric conversions.

pub mod safe_cast;
#[cfg(feature = "opencv")]
pub mod image_conversion;

use crate::geometry::Rect;

/// Clip a rectangle to the bounds of a `max_width` x `max_height` image
///
/// Returns `None` when nothing of the rectangle lies inside the image.
#[must_use]
pub fn clip_rect(rect: &Rect, max_width: u32, max_height: u32) -> Option<Rect> {
    let max_x = i32::try_from(max_width).unwrap_or(i32::MAX);
    let max_y = i32::try_from(max_height).unwrap_or(i32::MAX);

    let x0 = rect.x.clamp(0, max_x);
    let y0 = rect.y.clamp(0, max_y);
    let x1 = rect.right().clamp(0, max_x);
    let y1 = rect.bottom().clamp(0, max_y);

    let clipped = Rect::new(x0, y0, x1 - x0, y1 - y0);
    if clipped.is_empty() {
        None
    } else {
        Some(clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_rect_extreme_detector_output() {
        let rect = Rect::new(150, 150, i32::MAX, i32::MAX);
        assert_eq!(clip_rect(&rect, 200, 200), Some(Rect::new(150, 150, 50, 50)));
    }

    #[test]
    fn test_clip_rect_inside() {
        let rect = Rect::new(10, 10, 50, 50);
        assert_eq!(clip_rect(&rect, 200, 200), Some(rect));
    }

    #[test]
    fn test_clip_rect_partial() {
        let rect = Rect::new(-10, 190, 30, 30);
        let clipped = clip_rect(&rect, 200, 200).unwrap();
        assert_eq!(clipped, Rect::new(0, 190, 20, 10));
    }

    #[test]
    fn test_clip_rect_outside() {
        assert_eq!(clip_rect(&Rect::new(300, 300, 10, 10), 200, 200), None);
        assert_eq!(clip_rect(&Rect::new(-20, 0, 10, 10), 200, 200), None);
    }

    #[test]
    fn test_clip_rect_degenerate() {
        assert_eq!(clip_rect(&Rect::new(10, 10, 0, 5), 200, 200), None);
    }
}
