//! Crate error type
//!
//! The simulation itself never fails; errors only surface while setting a
//! session up (play-field dimensions, tuning data).

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The host could not provide a drawing surface to size the field from
    MissingPlayField,
    /// Play-field dimensions are not finite and positive
    InvalidPlayField { width: f32, height: f32 },
    /// A tuning value is out of its allowed range
    InvalidTuning { field: &'static str, reason: String },
    /// Tuning data is not valid JSON for [`crate::Tuning`]
    TuningParse(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPlayField => write!(f, "no play-field surface available"),
            Self::InvalidPlayField { width, height } => {
                write!(f, "invalid play-field size: {width}x{height}")
            }
            Self::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning value `{field}`: {reason}")
            }
            Self::TuningParse(msg) => write!(f, "failed to parse tuning: {msg}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::TuningParse(err.to_string())
    }
}
