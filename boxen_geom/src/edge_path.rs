/// A point on a custom edge path: `t` normalized along the edge (`0.0` at the
/// edge's start, `1.0` at its end), `offset` perpendicular to the edge in
/// millimeters (positive is outward from the panel body).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgePathPoint {
    pub t: f64,
    pub offset: f64,
}

impl EdgePathPoint {
    pub fn new(t: f64, offset: f64) -> Self {
        Self { t, offset }
    }

    /// Mirror this point about `t = 0.5`, used when a [`super::EdgePathPoint`]
    /// sequence is authored for only the first half of an edge and the engine
    /// emits the mirror for the second half.
    pub fn mirrored(self) -> Self {
        Self {
            t: 1.0 - self.t,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_reflects_about_half() {
        let p = EdgePathPoint::new(0.1, 3.0);
        let m = p.mirrored();
        assert_eq!(m.t, 0.9);
        assert_eq!(m.offset, 3.0);
    }
}
