use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use nalgebra::DMatrix;

use crate::error::{Result, SavitzkyGolayError};

/// Generalized factorial `a * (a - 1) * ... * (a - b + 1)` (`b` terms).
///
/// Returns `1.0` when `a < b`. Accumulated in `f64` since the products used for
/// weight normalization overflow `u64` already at moderate window sizes.
pub fn generalized_factorial(a: usize, b: usize) -> f64 {
    if a < b {
        return 1.0;
    }
    (a - b + 1..=a).fold(1.0, |acc, j| acc * j as f64)
}

/// Evaluates the Gram polynomials of orders `0..=max_order` at offset `i`.
///
/// The recurrence is run bottom-up over derivative levels `0..=derivative`, so
/// `result[k]` is the `derivative`-th derivative of the order-`k` Gram polynomial
/// for half-window `m`. Orders below zero contribute `0`.
fn gram_orders(i: isize, m: usize, max_order: usize, derivative: usize) -> Vec<f64> {
    let x = i as f64;
    let two_m = 2.0 * m as f64;
    let mut lower: Vec<f64> = Vec::new();

    for s in 0..=derivative {
        let mut level = vec![0.0; max_order + 1];
        level[0] = if s == 0 { 1.0 } else { 0.0 };

        for k in 1..=max_order {
            let kf = k as f64;
            let denom = kf * (two_m - kf + 1.0);
            let a = (4.0 * kf - 2.0) / denom;
            let b = (kf - 1.0) * (two_m + kf) / denom;

            let prev = level[k - 1];
            let prev_lower = if s > 0 { lower[k - 1] } else { 0.0 };
            // G(k - 2) with k - 2 < 0 vanishes
            let prev2 = if k >= 2 { level[k - 2] } else { 0.0 };

            level[k] = a * (x * prev + s as f64 * prev_lower) - b * prev2;
        }

        lower = level;
    }

    lower
}

/// Gram polynomial of order `k`, derivative `s`, at offset `i` for half-window `m`.
///
/// Base cases: `k < 0` gives `0`, `k == 0` gives `1` for `s == 0` and `0` otherwise.
/// For `k > 0` the three-term recurrence
///
/// ```text
/// G(i,m,k,s) = A * (i * G(i,m,k-1,s) + s * G(i,m,k-1,s-1)) - B * G(i,m,k-2,s)
/// A = (4k - 2) / (k (2m - k + 1))
/// B = (k - 1)(2m + k) / (k (2m - k + 1))
/// ```
///
/// is applied. `k` must not exceed `2m`.
pub fn gram_polynomial(i: isize, m: usize, k: isize, s: usize) -> f64 {
    if k < 0 {
        return 0.0;
    }
    let k = k as usize;
    gram_orders(i, m, k, s)[k]
}

/// Normalization `(2k + 1) * GenFact(2m, k) / GenFact(2m + k + 1, k + 1)`.
fn order_factor(m: usize, k: usize) -> f64 {
    (2 * k + 1) as f64 * generalized_factorial(2 * m, k)
        / generalized_factorial(2 * m + k + 1, k + 1)
}

/// Convolution weight of window sample `i` for evaluation point `t`.
///
/// Both offsets are relative to the window center; `m` is the half-window,
/// `n` the polynomial degree and `s` the derivative order.
pub fn weight(i: isize, t: isize, m: usize, n: usize, s: usize) -> f64 {
    (0..=n)
        .map(|k| {
            let order = k as isize;
            order_factor(m, k) * gram_polynomial(i, m, order, 0) * gram_polynomial(t, m, order, s)
        })
        .sum()
}

/// Full Savitzky-Golay weight matrix for one `(window_size, polynomial, derivative)`.
///
/// Row `t + half` holds the weights that evaluate the fitted polynomial (or its
/// derivative) at offset `t` from the window center; column `j + half` is the
/// contribution of the sample at offset `j`. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    matrix: DMatrix<f64>,
    polynomial: usize,
    derivative: usize,
}

impl WeightMatrix {
    /// Number of samples in the window (rows and columns).
    pub fn window_size(&self) -> usize {
        self.matrix.nrows()
    }

    /// Half-window `(window_size - 1) / 2`.
    pub fn half(&self) -> usize {
        (self.window_size() - 1) / 2
    }

    pub fn polynomial(&self) -> usize {
        self.polynomial
    }

    pub fn derivative(&self) -> usize {
        self.derivative
    }

    /// Single weight; `row` and `col` are matrix indices, not offsets.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.matrix[(row, col)]
    }

    /// Copy of one row.
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.matrix.row(row).iter().copied().collect()
    }

    /// Weights used for interior points (evaluation at the window center).
    pub fn center_row(&self) -> Vec<f64> {
        self.row(self.half())
    }

    /// Dot product of row `row` with a window of `window_size` samples.
    pub fn dot_row(&self, row: usize, window: &[f64]) -> f64 {
        debug_assert_eq!(window.len(), self.window_size());
        self.matrix
            .row(row)
            .iter()
            .zip(window)
            .map(|(w, y)| w * y)
            .sum()
    }

    /// Underlying matrix.
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}

/// Builds the weight matrix for the given window size, polynomial degree and
/// derivative order.
///
/// # Arguments
///
/// * `window_size` - Number of samples in the window (must be odd)
/// * `polynomial` - Degree of the local fit (must be < window_size)
/// * `derivative` - Derivative order, 0 for smoothing
///
/// A derivative order above the polynomial degree yields an all-zero matrix.
pub fn build_weight_matrix(
    window_size: usize,
    polynomial: usize,
    derivative: usize,
) -> Result<WeightMatrix> {
    if window_size % 2 == 0 || window_size == 0 {
        return Err(SavitzkyGolayError::InvalidWindowSize(window_size));
    }
    if polynomial >= window_size {
        return Err(SavitzkyGolayError::InvalidPolynomialOrder {
            polynomial,
            window_size,
        });
    }

    let half = (window_size - 1) / 2;
    let offsets = -(half as isize)..=half as isize;

    // Every weight reuses the same Gram values, so evaluate them once per offset.
    let factors: Vec<f64> = (0..=polynomial).map(|k| order_factor(half, k)).collect();
    let samples: Vec<Vec<f64>> = offsets
        .clone()
        .map(|j| gram_orders(j, half, polynomial, 0))
        .collect();
    let evaluations: Vec<Vec<f64>> = offsets
        .map(|t| gram_orders(t, half, polynomial, derivative))
        .collect();

    let matrix = DMatrix::from_fn(window_size, window_size, |row, col| {
        factors
            .iter()
            .zip(&samples[col])
            .zip(&evaluations[row])
            .map(|((c, g_sample), g_eval)| c * g_sample * g_eval)
            .sum::<f64>()
    });

    log::debug!(
        "built Savitzky-Golay weights: window={}, polynomial={}, derivative={}",
        window_size,
        polynomial,
        derivative
    );

    Ok(WeightMatrix {
        matrix,
        polynomial,
        derivative,
    })
}

type CacheKey = (usize, usize, usize);

/// Read-through cache of weight matrices keyed by
/// `(window_size, polynomial, derivative)`.
///
/// Matrices are fully built before insertion and shared as `Arc`, so concurrent
/// readers never see a partially constructed matrix.
#[derive(Debug, Default)]
pub struct WeightCache {
    weights: RwLock<HashMap<CacheKey, Arc<WeightMatrix>, ahash::RandomState>>,
}

impl WeightCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets weights from the cache or builds and stores them if absent.
    pub fn get_or_build(
        &self,
        window_size: usize,
        polynomial: usize,
        derivative: usize,
    ) -> Result<Arc<WeightMatrix>> {
        let key = (window_size, polynomial, derivative);

        if let Some(found) = self
            .weights
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            log::trace!("weight cache hit for {:?}", key);
            return Ok(Arc::clone(found));
        }

        // Built outside the lock; if another thread raced us, its matrix wins.
        let built = Arc::new(build_weight_matrix(window_size, polynomial, derivative)?);
        let mut weights = self.weights.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(weights.entry(key).or_insert(built)))
    }

    /// Whether weights for this key are cached.
    pub fn contains(&self, window_size: usize, polynomial: usize, derivative: usize) -> bool {
        self.weights
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&(window_size, polynomial, derivative))
    }

    pub fn len(&self) -> usize {
        self.weights
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
