use thiserror::Error;

use crate::color::Color;

/// Rejected starting configuration. No partial board is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board position: {position}")]
    InvalidPosition { position: i32 },

    #[error("{color} camel appears twice in input")]
    DuplicateCamel { color: Color },

    #[error("{color} camel is not placed on the board")]
    MissingCamel { color: Color },

    #[error("invalid cheer position {position}, not empty")]
    OccupiedCheer { position: i32 },

    #[error("invalid boo position {position}, not empty")]
    OccupiedBoo { position: i32 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DieError {
    #[error("out of dice")]
    OutOfDice,

    #[error("{color} die is not in the pyramid")]
    NotInPyramid { color: Color },
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Die(#[from] DieError),

    #[error("Scenario parse error: {0}")]
    Scenario(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl CoreError {
    /// Only a malformed scenario or parameter can be fixed by the caller; the
    /// other variants come from a broken board or leg contract.
    pub fn is_input_error(&self) -> bool {
        match self {
            CoreError::Board(_) => true,
            CoreError::Scenario(_) => true,
            CoreError::InvalidParameter(_) => true,
            CoreError::Die(DieError::NotInPyramid { .. }) => true,
            CoreError::Die(DieError::OutOfDice) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
