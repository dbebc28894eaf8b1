use foundation::point::Point2D;

/// Storage key the widget has always used for its trail snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "futurecreek_trail_points";

/// Built-in trail, traced by hand over the base map.
pub const DEFAULT_TRAIL: [Point2D; 15] = [
    Point2D::new(4.5, 75.0),
    Point2D::new(10.8, 79.2),
    Point2D::new(18.5, 82.3),
    Point2D::new(27.4, 83.1),
    Point2D::new(36.0, 80.4),
    Point2D::new(45.0, 75.2),
    Point2D::new(54.3, 69.8),
    Point2D::new(62.5, 63.6),
    Point2D::new(69.4, 55.1),
    Point2D::new(74.8, 46.6),
    Point2D::new(79.2, 38.7),
    Point2D::new(83.2, 30.7),
    Point2D::new(87.6, 24.0),
    Point2D::new(92.4, 20.2),
    Point2D::new(98.3, 19.2),
];

pub fn default_trail() -> Vec<Point2D> {
    DEFAULT_TRAIL.to_vec()
}
