use crate::error::{Result, SavitzkyGolayError};

/// Sample positions of a signal.
///
/// A scalar step selects constant spacing; a coordinate slice (one entry per
/// sample, assumed increasing) selects irregular spacing with a locally
/// estimated step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Positions<'a> {
    /// Constant step `h` between consecutive samples
    Step(f64),
    /// Explicit sample coordinates
    Coordinates(&'a [f64]),
}

impl From<f64> for Positions<'_> {
    fn from(step: f64) -> Self {
        Positions::Step(step)
    }
}

impl<'a> From<&'a [f64]> for Positions<'a> {
    fn from(coordinates: &'a [f64]) -> Self {
        Positions::Coordinates(coordinates)
    }
}

impl<'a> From<&'a Vec<f64>> for Positions<'a> {
    fn from(coordinates: &'a Vec<f64>) -> Self {
        Positions::Coordinates(coordinates.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [f64; N]> for Positions<'a> {
    fn from(coordinates: &'a [f64; N]) -> Self {
        Positions::Coordinates(coordinates.as_slice())
    }
}

impl Positions<'_> {
    /// Checks the positions against a signal of `data_len` samples.
    pub fn validate(&self, data_len: usize, derivative: usize) -> Result<()> {
        match *self {
            Positions::Step(step) => {
                if !step.is_finite() || (derivative > 0 && step == 0.0) {
                    return Err(SavitzkyGolayError::InvalidStep(step));
                }
            }
            Positions::Coordinates(coordinates) => {
                if coordinates.is_empty() {
                    return Err(SavitzkyGolayError::MissingPositions);
                }
                if coordinates.len() != data_len {
                    return Err(SavitzkyGolayError::PositionsLengthMismatch {
                        positions_len: coordinates.len(),
                        data_len,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Mean distance between consecutive coordinates over `[center - half, center + half)`,
/// clipped to valid indices.
pub fn mean_step(coordinates: &[f64], center: usize, half: usize) -> f64 {
    let start = center.saturating_sub(half);
    let end = (center + half).min(coordinates.len().saturating_sub(1));
    if end <= start {
        return f64::NAN;
    }
    let total: f64 = coordinates[start..=end]
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .sum();
    total / (end - start) as f64
}

/// Divisor that converts raw convolution output into derivative units.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SpacingNormalizer<'a> {
    /// `h^derivative`, exact for every sample
    Constant(f64),
    /// Mean local step raised to `derivative`, re-estimated per sample
    Irregular {
        coordinates: &'a [f64],
        half: usize,
        derivative: i32,
    },
}

impl<'a> SpacingNormalizer<'a> {
    pub(crate) fn new(positions: Positions<'a>, half: usize, derivative: usize) -> Self {
        let derivative = derivative as i32;
        match positions {
            Positions::Step(step) => SpacingNormalizer::Constant(step.powi(derivative)),
            Positions::Coordinates(coordinates) => SpacingNormalizer::Irregular {
                coordinates,
                half,
                derivative,
            },
        }
    }

    /// Scaling divisor `hs` for the output sample at `center`.
    pub(crate) fn divisor(&self, center: usize) -> f64 {
        match *self {
            SpacingNormalizer::Constant(hs) => hs,
            SpacingNormalizer::Irregular {
                coordinates,
                half,
                derivative,
            } => mean_step(coordinates, center, half).powi(derivative),
        }
    }
}
