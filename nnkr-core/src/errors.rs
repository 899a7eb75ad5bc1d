use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NnkrError {
    /// Tile id outside 0..=33
    OutOfRange { id: u32 },
    /// Tile or hand notation that cannot be parsed
    Parse { input: String, message: String },
    /// Hand contents violating the tile-count rules
    InvalidHand { message: String },
    /// Rejection sampling gave up before finding an acceptable hand
    GenerationExhausted { attempts: u32 },
}

impl fmt::Display for NnkrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NnkrError::OutOfRange { id } => {
                write!(f, "tile id {} out of range (0-33)", id)
            }
            NnkrError::Parse { input, message } => {
                write!(f, "Parse error on '{}': {}", input, message)
            }
            NnkrError::InvalidHand { message } => {
                write!(f, "Invalid hand: {}", message)
            }
            NnkrError::GenerationExhausted { attempts } => {
                write!(f, "Problem generation exhausted after {} attempts", attempts)
            }
        }
    }
}

impl std::error::Error for NnkrError {}

pub type NnkrResult<T> = Result<T, NnkrError>;
