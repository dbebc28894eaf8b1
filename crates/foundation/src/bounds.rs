use crate::point::Point2D;

/// Axis-aligned box in client (device pixel) space, as reported by the host
/// for the map image or the viewer dialog.
#[derive(Copy, Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, client: Point2D) -> bool {
        client.x >= self.left
            && client.x <= self.right()
            && client.y >= self.top
            && client.y <= self.bottom()
    }

    /// Maps a client position to percentage-of-box coordinates, clamped into
    /// `[0, 100]` per axis.
    ///
    /// Returns `None` for a degenerate (zero or negative sized) box.
    pub fn to_percent(&self, client: Point2D) -> Option<Point2D> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        let x = (client.x - self.left) / self.width * 100.0;
        let y = (client.y - self.top) / self.height * 100.0;
        Some(Point2D::new(x, y).clamped())
    }
}
