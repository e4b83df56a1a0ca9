//! # Savitzky-Golay Filter (Gram polynomial method)
//!
//! Smoothing and numerical differentiation of sampled signals with the
//! Savitzky-Golay convolution method. At every sample a polynomial of the
//! requested degree is fitted over a window of neighbouring samples and the
//! polynomial (or one of its derivatives) is evaluated there.
//!
//! Convolution weights come in closed form from Gram polynomials, so no
//! least-squares system is solved per window.
//!
//! ## Features
//!
//! - Full `window × window` weight matrix built once per filter invocation
//! - Boundaries evaluated from the nearest full window at an off-center point,
//!   so polynomials up to the fitted degree are reproduced at every index
//! - Constant spacing (`f64` step) or irregular sample coordinates
//! - Thread-safe weight cache for repeated filtering
//!
//! ## Example
//!
//! ```rust
//! use savgol_gram::{savitzky_golay, FilterOptions};
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0];
//! let options = FilterOptions::new(5, 2);
//! let smoothed = savitzky_golay(&data, 1.0, &options).expect("Invalid parameters");
//! assert_eq!(smoothed.len(), data.len());
//! ```

mod coefficients;
mod csv_utils;
mod error;
mod filter;
mod spacing;

pub use coefficients::{
    build_weight_matrix, generalized_factorial, gram_polynomial, weight, WeightCache, WeightMatrix,
};
pub use csv_utils::{read_csv_column, read_csv_column_by_index, read_column, ColumnSelector};
pub use error::{Result, SavitzkyGolayError};
pub use filter::{savitzky_golay, FilterOptions, SavitzkyGolayFilter};
pub use spacing::{mean_step, Positions};

/// Smooths unit-spaced data with the default options
/// (window size 9, cubic polynomial).
///
/// # Arguments
///
/// * `data` - The input signal data, at least 9 samples
///
/// # Example
///
/// ```rust
/// use savgol_gram::smooth;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0];
/// let smoothed = smooth(&data).unwrap();
/// ```
pub fn smooth(data: &[f64]) -> Result<Vec<f64>> {
    savitzky_golay(data, 1.0, &FilterOptions::default())
}

/// Computes the first derivative of data sampled every `step` units.
///
/// # Arguments
///
/// * `data` - The input signal data
/// * `window_size` - The size of the filter window (odd, at least 5)
/// * `polynomial` - The degree of the polynomial (must be less than window_size)
/// * `step` - Distance between consecutive samples
pub fn derivative(data: &[f64], window_size: usize, polynomial: usize, step: f64) -> Result<Vec<f64>> {
    let options = FilterOptions::new(window_size, polynomial).with_derivative(1);
    savitzky_golay(data, step, &options)
}
