use std::time::Instant;

use savgol_gram::{build_weight_matrix, SavitzkyGolayFilter};

fn main() {
    println!("=== Savitzky-Golay Filter Benchmarks ===\n");

    let sizes = vec![100, 1_000, 10_000, 100_000];

    for size in sizes {
        println!("Benchmarking with {} data points:", size);

        let data: Vec<f64> = (0..size)
            .map(|i| {
                let x = i as f64 * 0.01;
                x.sin() + 0.5 * (2.0 * x).cos() + 0.1 * (5.0 * x).sin()
            })
            .collect();

        let configs = vec![
            (5, 2, "5-point quadratic"),
            (9, 3, "9-point cubic"),
            (15, 4, "15-point quartic"),
            (31, 5, "31-point quintic"),
        ];

        for (window_size, polynomial, description) in configs {
            let filter = SavitzkyGolayFilter::new(window_size, polynomial).expect("Valid parameters");

            // Warm up the weight cache
            let _ = filter.smooth(&data);

            let start = Instant::now();
            let _smoothed = filter.smooth(&data);
            let smooth_duration = start.elapsed();

            let start = Instant::now();
            let _derivative = filter.derivative(&data, 1, 0.01);
            let deriv_duration = start.elapsed();

            println!(
                "  {}: smooth={:?}, derivative={:?}",
                description, smooth_duration, deriv_duration
            );
        }

        println!();
    }

    println!("Weight matrix construction:");
    for &(window_size, polynomial) in &[(9, 3), (25, 5), (51, 8), (101, 10)] {
        let start = Instant::now();
        let _weights = build_weight_matrix(window_size, polynomial, 0).expect("Valid parameters");
        println!("  window={}, polynomial={}: {:?}", window_size, polynomial, start.elapsed());
    }
}
