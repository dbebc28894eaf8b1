use serde::{Deserialize, Serialize};

use crate::precision::{clamp_percent, round2};

/// A position in percentage-of-container units.
///
/// Map-facing values are kept in `[0, 100]` per axis by the stores that own
/// them; the type itself does not enforce the range so the geometry engine can
/// accept arbitrary input.
///
/// Serialized as a two-element array `[x, y]`, which is the trail snapshot
/// format.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamps both axes into `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self::new(clamp_percent(self.x), clamp_percent(self.y))
    }

    /// Rounds both axes to 2 decimal digits.
    pub fn rounded(self) -> Self {
        Self::new(round2(self.x), round2(self.y))
    }

    pub fn is_in_range(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

impl std::ops::Add for Point2D {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Point2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::Point2D;

    #[test]
    fn add_sub_scale() {
        let a = Point2D::new(1.0, 2.0);
        let b = Point2D::new(-0.5, 4.0);
        assert_eq!(a + b, Point2D::new(0.5, 6.0));
        assert_eq!(a - b, Point2D::new(1.5, -2.0));
        assert_eq!(a.scale(2.0), Point2D::new(2.0, 4.0));
    }

    #[test]
    fn clamped_pins_both_ends() {
        let p = Point2D::new(-12.5, 140.0).clamped();
        assert_eq!(p, Point2D::new(0.0, 100.0));
        assert!(p.is_in_range());
        assert!(p.x.is_sign_positive());
    }

    #[test]
    fn serializes_as_pair() {
        let json = serde_json::to_string(&Point2D::new(4.5, 75.25)).unwrap();
        assert_eq!(json, "[4.5,75.25]");
        let back: Point2D = serde_json::from_str("[10,20.5]").unwrap();
        assert_eq!(back, Point2D::new(10.0, 20.5));
    }
}
