use savgol_gram::{build_weight_matrix, SavitzkyGolayFilter};

fn main() {
    // Diagnostic: print the weight matrix for window=7, polynomial=4, derivative=1
    let window = 7;
    let poly = 4;
    let deriv = 1;

    let weights = build_weight_matrix(window, poly, deriv).expect("build weights failed");
    println!("weights (window={}, poly={}, deriv={}):", window, poly, deriv);
    for row in 0..window {
        let offset = row as isize - weights.half() as isize;
        let formatted: Vec<String> = weights.row(row).iter().map(|w| format!("{:10.6}", w)).collect();
        println!("  t={:+}: {}", offset, formatted.join(" "));
    }

    // f(x) = x^4 sampled at step = 0.1
    let step = 0.1;
    let n = 20;
    let data: Vec<f64> = (0..n).map(|i| (i as f64 * step).powi(4)).collect();

    let filter = SavitzkyGolayFilter::new(window, poly).expect("valid params");
    let result = filter.derivative(&data, deriv, step).expect("derivative failed");

    println!("\n{:>4} {:>16} {:>16}", "i", "filtered", "expected 4x^3");
    for (i, value) in result.iter().enumerate() {
        let x = i as f64 * step;
        println!("{:>4} {:>16.12} {:>16.12}", i, value, 4.0 * x.powi(3));
    }
}
