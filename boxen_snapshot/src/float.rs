/// Round to 6 fractional digits so repeated serialization of the same value
/// is byte-identical regardless of how it was accumulated.
pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

pub fn round6_point(p: boxen_geom::Point) -> [f64; 2] {
    [round6(p.x), round6(p.y)]
}
