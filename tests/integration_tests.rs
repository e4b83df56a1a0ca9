use approx::{assert_abs_diff_eq, assert_relative_eq};
use savgol_gram::{
    derivative, savitzky_golay, smooth, FilterOptions, Positions, SavitzkyGolayError,
    SavitzkyGolayFilter,
};

#[test]
fn test_impulse_response_is_weight_column() {
    // For a 5-point quadratic filter the center weights are [-3, 12, 17, 12, -3] / 35
    let filter = SavitzkyGolayFilter::new(5, 2).unwrap();
    let impulse = vec![0.0, 0.0, 1.0, 0.0, 0.0];
    let result = filter.smooth(&impulse).unwrap();

    let expected = [-3.0, 12.0, 17.0, 12.0, -3.0].map(|w| w / 35.0);
    for (actual, expected) in result.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(actual, expected, epsilon = 1e-12);
    }
}

#[test]
fn test_polynomial_preservation_everywhere() {
    let options = FilterOptions::new(7, 3);

    // f(x) = x^3 - 2x^2 + x + 1
    let data: Vec<f64> = (0..15)
        .map(|i| {
            let x = i as f64;
            x.powi(3) - 2.0 * x.powi(2) + x + 1.0
        })
        .collect();

    let filtered = savitzky_golay(&data, 1.0, &options).unwrap();
    for (original, filtered) in data.iter().zip(filtered.iter()) {
        assert_abs_diff_eq!(original, filtered, epsilon = 1e-8);
    }
}

#[test]
fn test_linear_trend_preserved_at_boundaries() {
    for &(window, poly) in &[(5, 1), (5, 2), (9, 3), (11, 5)] {
        let linear_data: Vec<f64> = (0..12).map(|i| 2.0 * i as f64 + 3.0).collect();
        let filtered = savitzky_golay(&linear_data, 1.0, &FilterOptions::new(window, poly)).unwrap();

        for (original, filtered) in linear_data.iter().zip(filtered.iter()) {
            assert_abs_diff_eq!(original, filtered, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_constant_preservation() {
    let filter = SavitzkyGolayFilter::new(7, 3).unwrap();
    let constant_data = vec![5.0; 20];

    for &value in &filter.smooth(&constant_data).unwrap() {
        assert_abs_diff_eq!(value, 5.0, epsilon = 1e-12);
    }
    for &value in &filter.derivative(&constant_data, 1, 0.5).unwrap() {
        assert_abs_diff_eq!(value, 0.0, epsilon = 1e-12);
    }
}

#[test]
fn test_derivative_computation() {
    let filter = SavitzkyGolayFilter::new(7, 4).unwrap();

    // f(x) = x^4, f'(x) = 4x^3
    let step = 0.1;
    let data: Vec<f64> = (0..20).map(|i| (i as f64 * step).powi(4)).collect();
    let first_derivative = filter.derivative(&data, 1, step).unwrap();

    for (i, value) in first_derivative.iter().enumerate() {
        let x = i as f64 * step;
        assert_abs_diff_eq!(*value, 4.0 * x.powi(3), epsilon = 1e-9);
    }
}

#[test]
fn test_derivative_constant_and_coordinate_spacing_agree() {
    let step = 0.2;
    let xs: Vec<f64> = (0..25).map(|i| i as f64 * step).collect();
    let data: Vec<f64> = xs.iter().map(|x| (1.3 * x).sin()).collect();
    let options = FilterOptions::new(9, 4).with_derivative(1);

    let with_step = savitzky_golay(&data, step, &options).unwrap();
    let with_coordinates = savitzky_golay(&data, &xs, &options).unwrap();

    for (a, b) in with_step.iter().zip(with_coordinates.iter()) {
        assert_relative_eq!(a, b, epsilon = 1e-9, max_relative = 1e-9);
    }
}

#[test]
fn test_irregular_spacing_uses_local_mean_step() {
    // Linear data on irregular coordinates: interior windows see a mean step of 1.0
    let xs = [0.0, 0.5, 1.5, 2.0, 3.0, 3.5, 4.5, 5.0, 6.0, 6.5];
    let data: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
    let options = FilterOptions::new(5, 2).with_derivative(1);

    let result = savitzky_golay(&data, &xs, &options).unwrap();
    assert_eq!(result.len(), xs.len());
    for value in &result[2..8] {
        assert_abs_diff_eq!(*value, 2.0, epsilon = 1e-9);
    }
    // Edges average fewer steps and pick up the local irregularity
    assert_abs_diff_eq!(result[0], 34.0 / 21.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result[1], 57.0 / 28.0, epsilon = 1e-9);
}

#[test]
fn test_noise_reduction() {
    let true_signal: Vec<f64> = (0..50).map(|i| (i as f64 * 0.1).sin()).collect();

    // Deterministic "noise" for reproducible testing
    let noisy_signal: Vec<f64> = true_signal
        .iter()
        .enumerate()
        .map(|(i, v)| v + 0.1 * (i as f64 * 1.7).sin())
        .collect();

    let smoothed = SavitzkyGolayFilter::new(9, 3).unwrap().smooth(&noisy_signal).unwrap();

    let mse = |other: &[f64]| {
        true_signal
            .iter()
            .zip(other.iter())
            .map(|(t, v)| (t - v).powi(2))
            .sum::<f64>()
            / true_signal.len() as f64
    };

    assert!(mse(&smoothed) < mse(&noisy_signal));
}

#[test]
fn test_convenience_functions() {
    let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0];

    let smoothed = smooth(&data).unwrap();
    assert_eq!(smoothed.len(), data.len());

    let deriv = derivative(&data, 7, 2, 1.0).unwrap();
    assert_eq!(deriv.len(), data.len());
}

#[test]
fn test_validation_errors() {
    let data = vec![1.0; 10];

    // Even window, whatever the rest
    for options in [FilterOptions::new(4, 2), FilterOptions::new(4, 0).with_derivative(3)] {
        assert_eq!(
            savitzky_golay(&data, 1.0, &options),
            Err(SavitzkyGolayError::InvalidWindowSize(4))
        );
    }
    assert!(savitzky_golay(&data, 1.0, &FilterOptions::new(3, 1)).is_err());

    // Window larger than data
    let err = savitzky_golay(&[1.0, 2.0, 3.0], 1.0, &FilterOptions::new(5, 2)).unwrap_err();
    assert!(matches!(err, SavitzkyGolayError::InsufficientData { .. }));
    assert!(err.is_range_error());

    // Missing positions
    let err = savitzky_golay(&data, Positions::Coordinates(&[]), &FilterOptions::default()).unwrap_err();
    assert!(err.is_missing());

    // Positions not matching the data
    let xs = vec![0.0, 1.0, 2.0];
    assert!(matches!(
        savitzky_golay(&data, &xs, &FilterOptions::new(5, 2)),
        Err(SavitzkyGolayError::PositionsLengthMismatch { .. })
    ));

    // Degree zero or at/above window size
    assert!(savitzky_golay(&data, 1.0, &FilterOptions::new(5, 0)).is_err());
    assert!(savitzky_golay(&data, 1.0, &FilterOptions::new(5, 5)).is_err());
}

#[test]
fn test_high_polynomial_is_advisory_only() {
    let data: Vec<f64> = (0..30).map(|i| (i as f64 * 0.3).cos()).collect();
    let result = savitzky_golay(&data, 1.0, &FilterOptions::new(15, 7)).unwrap();
    assert_eq!(result.len(), data.len());
    assert!(result.iter().all(|v| v.is_finite()));
}

#[test]
fn test_derivative_above_degree_is_zero() {
    let data: Vec<f64> = (0..12).map(|i| (i as f64).powi(2)).collect();
    let options = FilterOptions::new(5, 2).with_derivative(3);
    for value in savitzky_golay(&data, 1.0, &options).unwrap() {
        assert_abs_diff_eq!(value, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_shared_filter_across_threads() {
    let filter = SavitzkyGolayFilter::new(9, 3).unwrap();
    let data: Vec<f64> = (0..200).map(|i| (i as f64 * 0.05).sin()).collect();
    let expected = filter.smooth(&data).unwrap();

    std::thread::scope(|scope| {
        for order in 0..4 {
            let filter = &filter;
            let data = &data;
            let expected = &expected;
            scope.spawn(move || {
                let result = filter.derivative(data, order, 0.05).unwrap();
                assert_eq!(result.len(), data.len());
                if order == 0 {
                    assert_eq!(&result, expected);
                }
            });
        }
    });

    assert_eq!(filter.cache().len(), 4);
}

#[test]
fn test_numerical_stability() {
    let extreme_data = vec![
        1e-10,
        1e10,
        -1e10,
        1e-10,
        0.0,
        f64::MIN_POSITIVE,
        f64::MAX / 1e10,
        -f64::MAX / 1e10,
    ];

    let result = savitzky_golay(&extreme_data, 1.0, &FilterOptions::new(5, 2)).unwrap();
    for &value in &result {
        assert!(value.is_finite(), "Got non-finite value: {}", value);
    }
}
