use crate::coefficients::{build_weight_matrix, WeightCache, WeightMatrix};
use crate::error::{Result, SavitzkyGolayError};
use crate::spacing::{Positions, SpacingNormalizer};

/// Polynomial degrees at or above this value trigger an oscillation advisory.
const ADVISORY_POLYNOMIAL: usize = 6;

/// Configuration for the Savitzky-Golay filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Size of the filter window (odd, at least 5)
    pub window_size: usize,
    /// Derivative order, 0 for smoothing
    pub derivative: usize,
    /// Degree of the local polynomial fit
    pub polynomial: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            window_size: 9,
            derivative: 0,
            polynomial: 3,
        }
    }
}

impl FilterOptions {
    /// Creates smoothing options with the given window size and polynomial degree
    pub fn new(window_size: usize, polynomial: usize) -> Self {
        Self {
            window_size,
            polynomial,
            ..Self::default()
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_derivative(mut self, derivative: usize) -> Self {
        self.derivative = derivative;
        self
    }

    pub fn with_polynomial(mut self, polynomial: usize) -> Self {
        self.polynomial = polynomial;
        self
    }

    /// Half-window `(window_size - 1) / 2`.
    pub fn half(&self) -> usize {
        self.window_size / 2
    }

    /// Checks the options on their own, independent of any data.
    ///
    /// Degrees of 6 and above are accepted but logged as a warning.
    pub fn validate(&self) -> Result<()> {
        self.validate_window()?;
        self.validate_polynomial()
    }

    fn validate_window(&self) -> Result<()> {
        if self.window_size % 2 == 0 || self.window_size < 5 {
            return Err(SavitzkyGolayError::InvalidWindowSize(self.window_size));
        }
        Ok(())
    }

    fn validate_polynomial(&self) -> Result<()> {
        if self.polynomial < 1 || self.polynomial >= self.window_size {
            return Err(SavitzkyGolayError::InvalidPolynomialOrder {
                polynomial: self.polynomial,
                window_size: self.window_size,
            });
        }
        if self.polynomial >= ADVISORY_POLYNOMIAL {
            log::warn!(
                "You should not use polynomial grade higher than 5 if you are not sure that \
                 your data arises from such a model. Possible polynomial oscillation problems \
                 (polynomial={})",
                self.polynomial
            );
        }
        Ok(())
    }
}

/// Validates options, data and positions together, failing on the first problem.
fn validate_inputs(signal: &[f64], positions: &Positions<'_>, options: &FilterOptions) -> Result<()> {
    options.validate_window()?;
    if let Positions::Coordinates(coordinates) = positions {
        if coordinates.is_empty() {
            return Err(SavitzkyGolayError::MissingPositions);
        }
    }
    if options.window_size > signal.len() {
        return Err(SavitzkyGolayError::InsufficientData {
            data_len: signal.len(),
            window_size: options.window_size,
        });
    }
    options.validate_polynomial()?;
    positions.validate(signal.len(), options.derivative)
}

/// Applies precomputed weights across the whole signal.
///
/// The first and last `half` outputs evaluate the polynomial fitted to the
/// nearest full window at an off-center point; interior outputs use the center
/// row of a sliding window. Every output index is written exactly once.
fn convolve(signal: &[f64], weights: &WeightMatrix, spacing: &SpacingNormalizer<'_>) -> Vec<f64> {
    let n = signal.len();
    let window_size = weights.window_size();
    let half = weights.half();
    let mut result = vec![0.0; n];

    let head = &signal[..window_size];
    let tail = &signal[n - window_size..];
    for i in 0..half {
        let left = half - i - 1;
        let right = n - half + i;
        result[left] = weights.dot_row(half - i - 1, head) / spacing.divisor(left);
        result[right] = weights.dot_row(half + i + 1, tail) / spacing.divisor(right);
    }

    for (start, window) in signal.windows(window_size).enumerate() {
        let center = start + half;
        result[center] = weights.dot_row(half, window) / spacing.divisor(center);
    }

    result
}

/// Smooths or differentiates `signal` with a Savitzky-Golay filter.
///
/// # Arguments
///
/// * `signal` - The input samples (at least `window_size` of them)
/// * `positions` - A constant step (`f64`) or one coordinate per sample
/// * `options` - Window size, derivative order and polynomial degree
///
/// # Returns
///
/// One filtered value per input sample, or the first validation error.
///
/// # Example
///
/// ```rust
/// use savgol_gram::{savitzky_golay, FilterOptions};
///
/// let data = [2.0, 3.0, 5.0, 4.0, 3.0, 4.0, 6.0, 7.0, 8.0];
/// let smoothed = savitzky_golay(&data, 1.0, &FilterOptions::new(5, 2)).unwrap();
/// assert_eq!(smoothed.len(), data.len());
/// ```
pub fn savitzky_golay<'a>(
    signal: &[f64],
    positions: impl Into<Positions<'a>>,
    options: &FilterOptions,
) -> Result<Vec<f64>> {
    let positions = positions.into();
    validate_inputs(signal, &positions, options)?;

    let weights = build_weight_matrix(options.window_size, options.polynomial, options.derivative)?;
    let spacing = SpacingNormalizer::new(positions, options.half(), options.derivative);
    Ok(convolve(signal, &weights, &spacing))
}

/// A reusable Savitzky-Golay filter that keeps its weight matrices cached.
#[derive(Debug)]
pub struct SavitzkyGolayFilter {
    options: FilterOptions,
    cache: WeightCache,
}

impl SavitzkyGolayFilter {
    /// Creates a smoothing filter with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `window_size` - Size of the filter window (odd, at least 5)
    /// * `polynomial` - Degree of the polynomial to fit (1 <= polynomial < window_size)
    ///
    /// # Example
    ///
    /// ```rust
    /// use savgol_gram::SavitzkyGolayFilter;
    ///
    /// let filter = SavitzkyGolayFilter::new(5, 2).expect("Valid parameters");
    /// ```
    pub fn new(window_size: usize, polynomial: usize) -> Result<Self> {
        Self::with_options(FilterOptions::new(window_size, polynomial))
    }

    /// Creates a filter with custom options
    pub fn with_options(options: FilterOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            cache: WeightCache::new(),
        })
    }

    /// Applies the filter with its configured derivative order.
    pub fn apply<'a>(&self, signal: &[f64], positions: impl Into<Positions<'a>>) -> Result<Vec<f64>> {
        self.run(signal, positions.into(), self.options)
    }

    /// Smooths unit-spaced data.
    ///
    /// # Example
    ///
    /// ```rust
    /// use savgol_gram::SavitzkyGolayFilter;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0];
    /// let filter = SavitzkyGolayFilter::new(5, 2).expect("Valid parameters");
    /// let smoothed = filter.smooth(&data).unwrap();
    /// assert_eq!(smoothed.len(), data.len());
    /// ```
    pub fn smooth(&self, signal: &[f64]) -> Result<Vec<f64>> {
        self.run(signal, Positions::Step(1.0), self.options.with_derivative(0))
    }

    /// Computes the `order`-th derivative of data sampled every `step` units.
    pub fn derivative(&self, signal: &[f64], order: usize, step: f64) -> Result<Vec<f64>> {
        self.run(signal, Positions::Step(step), self.options.with_derivative(order))
    }

    fn run(&self, signal: &[f64], positions: Positions<'_>, options: FilterOptions) -> Result<Vec<f64>> {
        validate_inputs(signal, &positions, &options)?;
        let weights = self
            .cache
            .get_or_build(options.window_size, options.polynomial, options.derivative)?;
        let spacing = SpacingNormalizer::new(positions, options.half(), options.derivative);
        Ok(convolve(signal, &weights, &spacing))
    }

    /// Returns the filter options
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Returns the weight cache
    pub fn cache(&self) -> &WeightCache {
        &self.cache
    }
}
