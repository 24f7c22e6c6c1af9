/// Material constants shared by every panel in an assembly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub thickness: f64,
    pub finger_width: f64,
    /// Corner-gap multiplier. Must be `>= 1.0`.
    pub finger_gap: f64,
}

impl Material {
    pub fn finger_params(self) -> boxen_joints::FingerParams {
        boxen_joints::FingerParams {
            mt: self.thickness,
            fw: self.finger_width,
            fg: self.finger_gap,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            thickness: 3.0,
            finger_width: 10.0,
            finger_gap: 1.5,
        }
    }
}

/// The three box dimensions, named the way the action catalog names them
/// rather than after any one axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dimensions {
    pub w: f64,
    pub h: f64,
    pub d: f64,
}

impl Dimensions {
    pub fn new(w: f64, h: f64, d: f64) -> Self {
        Self { w, h, d }
    }

    pub fn on_axis(self, axis: boxen_joints::Axis) -> f64 {
        match axis {
            boxen_joints::Axis::X => self.w,
            boxen_joints::Axis::Y => self.h,
            boxen_joints::Axis::Z => self.d,
        }
    }
}
