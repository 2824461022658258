//! Common utilities shared by component models.

use crate::error::{ComponentError, ComponentResult};
use serde::{Deserialize, Serialize};
use tl_core::numeric::ensure_finite;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })?;
    Ok(())
}

/// Ensure a value is finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> ComponentResult<()> {
    check_finite(value, what)?;
    if value < 0.0 {
        return Err(ComponentError::NonPhysical { what });
    }
    Ok(())
}

/// Diagram coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle on the plant diagram (top-left origin, y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Mid-point of the top edge.
    pub fn top_mid(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y)
    }

    /// Mid-point of the bottom edge.
    pub fn bottom_mid(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h)
    }
}

/// Orthogonal route from `from` to `to`: vertical, horizontal at the
/// mid height, vertical again.
pub fn l_path(from: Point, to: Point) -> Vec<Point> {
    let mid_y = (from.y + to.y) / 2.0;
    vec![
        from,
        Point::new(from.x, mid_y),
        Point::new(to.x, mid_y),
        to,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_non_negative() {
        assert!(check_non_negative(0.0, "test").is_ok());
        assert!(check_non_negative(-0.1, "test").is_err());
    }

    #[test]
    fn rect_ports() {
        let r = Rect::new(60.0, 70.0, 110.0, 150.0);
        assert_eq!(r.top_mid(), Point::new(115.0, 70.0));
        assert_eq!(r.bottom_mid(), Point::new(115.0, 220.0));
    }

    #[test]
    fn l_path_has_four_orthogonal_points() {
        let path = l_path(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(
            path,
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 10.0),
                Point::new(10.0, 10.0),
                Point::new(10.0, 20.0),
            ]
        );
        for seg in path.windows(2) {
            assert!(seg[0].x == seg[1].x || seg[0].y == seg[1].y);
        }
    }
}
