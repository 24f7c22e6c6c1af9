use core::fmt;

/// Error taxonomy for a rejected mutation. Every variant is a no-op: on
/// `Err`, the scene is left exactly as it was before the call.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionError {
    NotFound,
    InvalidArgument(&'static str),
    ConflictingCrossLap,
    InvalidBooleanResult(boxen_boolean::BooleanError),
    SafeAreaViolation,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "target id not found in the active scene"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::ConflictingCrossLap => {
                write!(f, "subdivision would place a cross-lap slot within 2*mt of an existing one")
            }
            Self::InvalidBooleanResult(e) => write!(f, "boolean operation failed: {e}"),
            Self::SafeAreaViolation => write!(f, "cutout is not strictly inside the panel's safe area"),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<boxen_boolean::BooleanError> for ActionError {
    fn from(e: boxen_boolean::BooleanError) -> Self {
        Self::InvalidBooleanResult(e)
    }
}
