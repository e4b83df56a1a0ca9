use std::fmt;

/// Error types for Savitzky-Golay filter operations.
///
/// Every variant is an invalid-parameter condition detected before any
/// computation starts; no partial output is ever produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SavitzkyGolayError {
    /// Window size must be odd and at least 5
    InvalidWindowSize(usize),
    /// Polynomial degree must be at least 1 and less than the window size
    InvalidPolynomialOrder {
        polynomial: usize,
        window_size: usize,
    },
    /// Input data is shorter than the window
    InsufficientData { data_len: usize, window_size: usize },
    /// No sample positions were given (empty coordinate sequence)
    MissingPositions,
    /// Coordinate sequence does not have one entry per sample
    PositionsLengthMismatch { positions_len: usize, data_len: usize },
    /// Constant step is not finite, or is zero while differentiating
    InvalidStep(f64),
}

impl SavitzkyGolayError {
    /// True for errors caused by a parameter outside its allowed range.
    pub fn is_range_error(&self) -> bool {
        !self.is_missing()
    }

    /// True when a required input was not supplied.
    pub fn is_missing(&self) -> bool {
        matches!(self, SavitzkyGolayError::MissingPositions)
    }
}

impl fmt::Display for SavitzkyGolayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavitzkyGolayError::InvalidWindowSize(size) => {
                write!(
                    f,
                    "Invalid window size: {}. Window size must be an odd integer of at least 5",
                    size
                )
            }
            SavitzkyGolayError::InvalidPolynomialOrder {
                polynomial,
                window_size,
            } => {
                write!(
                    f,
                    "Invalid polynomial degree: {}. Must be at least 1 and less than window size ({})",
                    polynomial, window_size
                )
            }
            SavitzkyGolayError::InsufficientData {
                data_len,
                window_size,
            } => {
                write!(
                    f,
                    "Window size is higher than the data length {}>{}",
                    window_size, data_len
                )
            }
            SavitzkyGolayError::MissingPositions => {
                write!(f, "Sample positions must be defined")
            }
            SavitzkyGolayError::PositionsLengthMismatch {
                positions_len,
                data_len,
            } => {
                write!(
                    f,
                    "Positions length {} does not match data length {}",
                    positions_len, data_len
                )
            }
            SavitzkyGolayError::InvalidStep(step) => {
                write!(
                    f,
                    "Invalid sample step: {}. Step must be finite and non-zero when differentiating",
                    step
                )
            }
        }
    }
}

impl std::error::Error for SavitzkyGolayError {}

/// Result type for Savitzky-Golay operations
pub type Result<T> = std::result::Result<T, SavitzkyGolayError>;
