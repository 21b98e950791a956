//! Example: minimizing the chained Rosenbrock function.
//!
//! Run with logging enabled to follow the iterations:
//!
//! ```text
//! RUST_LOG=info cargo run --example rosenbrock
//! ```

use lbfgslite::prelude::*;

/// Chained Rosenbrock function, minimum 0 at (1, ..., 1).
#[derive(Debug)]
struct Rosenbrock;

impl CostFunction<f64> for Rosenbrock {
    fn cost_and_gradient(&mut self, x: &DVector<f64>, g: &mut DVector<f64>) -> f64 {
        let mut fx = 0.0;
        for i in (0..x.len()).step_by(2) {
            let t1 = 1.0 - x[i];
            let t2 = 10.0 * (x[i + 1] - x[i] * x[i]);
            g[i + 1] = 20.0 * t2;
            g[i] = -2.0 * (x[i] * g[i + 1] + t1);
            fx += t1 * t1 + t2 * t2;
        }
        fx
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let n = 100;
    let mut x = DVector::from_fn(n, |i, _| if i % 2 == 0 { -1.2 } else { 1.0 });

    let lbfgs = Lbfgs::new(
        LbfgsParameters::new()
            .with_mem_size(8)
            .with_g_epsilon(1e-6)
            .with_delta_test(3, 1e-10),
    );
    let result = lbfgs.minimize_with_callback(&mut x, &mut Rosenbrock, &mut LogProgressCallback::new(10))?;

    println!("L-BFGS terminated with the status code = {}", result.code());
    println!("  {}", result.status);
    println!("  fx = {:.6e}, x[0] = {:.6}, x[1] = {:.6}", result.value, x[0], x[1]);
    println!(
        "  {} iterations, {} evaluations in {:?}",
        result.iterations, result.evaluations, result.duration
    );
    Ok(())
}
