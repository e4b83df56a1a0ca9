//! Example usage of the Savitzky-Golay filter crate

use savgol_gram::{derivative, savitzky_golay, smooth, FilterOptions, SavitzkyGolayFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Savitzky-Golay Filter Examples ===\n");

    // Create some noisy test data
    let step = 0.05;
    let clean_signal: Vec<f64> = (0..40)
        .map(|i| {
            let x = i as f64 * step;
            (2.0 * std::f64::consts::PI * x).sin() + 0.5 * (4.0 * std::f64::consts::PI * x).cos()
        })
        .collect();

    let mut noisy_signal = clean_signal.clone();
    for (i, value) in noisy_signal.iter_mut().enumerate() {
        if i % 3 == 0 {
            *value += 0.3 * (i as f64 % 2.0 - 0.5);
        }
    }

    println!("Original noisy signal:");
    print_signal(&noisy_signal);

    // 1: Default options (window=9, cubic)
    println!("\n1. Default smoothing (window=9, polynomial=3):");
    print_signal(&smooth(&noisy_signal)?);

    // 2: Reusable filter
    println!("\n2. Custom smoothing (window=7, polynomial=2):");
    let filter = SavitzkyGolayFilter::new(7, 2)?;
    print_signal(&filter.smooth(&noisy_signal)?);

    // 3: First derivative with physical step
    println!("\n3. First derivative:");
    print_signal(&derivative(&clean_signal, 7, 3, step)?);

    // 4: Second derivative on irregular coordinates
    println!("\n4. Second derivative on irregular positions:");
    let xs: Vec<f64> = (0..40).map(|i| i as f64 * step + 0.01 * (i % 2) as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|x| x * x).collect();
    let options = FilterOptions::new(9, 3).with_derivative(2);
    print_signal(&savitzky_golay(&ys, &xs, &options)?);

    // 5: Linear trend is reproduced everywhere, boundaries included
    println!("\n5. Linear trend preservation:");
    let linear: Vec<f64> = (0..10).map(|i| 2.0 * i as f64 + 3.0).collect();
    let filtered = savitzky_golay(&linear, 1.0, &FilterOptions::new(5, 2))?;
    for (i, (orig, filt)) in linear.iter().zip(filtered.iter()).enumerate() {
        println!("  [{}]: {:.6} -> {:.6} (diff: {:.2e})", i, orig, filt, orig - filt);
    }

    Ok(())
}

fn print_signal(signal: &[f64]) {
    for (i, &value) in signal.iter().enumerate() {
        print!("{:7.3}", value);
        if (i + 1) % 8 == 0 {
            println!();
        }
    }
    if signal.len() % 8 != 0 {
        println!();
    }
}
