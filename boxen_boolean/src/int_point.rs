/// Fixed-point scale factor: one engine millimeter is this many integer
/// units. `10_000` gives sub-micron precision for the dimensions panels
/// actually use, matching the engine's integer-scaled clipping convention.
pub const SCALE: f64 = 10_000.0;

/// An integer-scaled 2D point, used internally by the clipper so that edge
/// intersection and orientation tests are exact instead of float-fuzzy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

impl IntPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn from_point(p: boxen_geom::Point) -> Self {
        Self {
            x: (p.x * SCALE).round() as i64,
            y: (p.y * SCALE).round() as i64,
        }
    }

    pub fn to_point(self) -> boxen_geom::Point {
        boxen_geom::Point::new(self.x as f64 / SCALE, self.y as f64 / SCALE)
    }
}

pub fn scale_polygon(points: &[boxen_geom::Point]) -> Vec<IntPoint> {
    points.iter().map(|&p| IntPoint::from_point(p)).collect()
}

pub fn unscale_polygon(points: &[IntPoint]) -> Vec<boxen_geom::Point> {
    points.iter().map(|&p| p.to_point()).collect()
}
