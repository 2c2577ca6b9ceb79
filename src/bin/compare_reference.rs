//! Compare the engine's C = m = 1 projection with the classical Fibonacci sequence
//! Test case: B0=1, Y0=1, horizon=20

use herd_projection::projection::{project, ProjectionParameters};

fn main() {
    env_logger::init();

    let params = ProjectionParameters::new(1.0, 1.0, 1.0, 1.0, 20);
    let points = match project(&params) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("Projection failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("Engine vs Fibonacci (B0=1, Y0=1, C=1, m=1)");
    println!("{:<6} {:<14} {:<14} {:<10}", "Year", "Engine_Total", "Fib(n+3)", "Diff");

    // Total_t = F(t+3) with F(1) = F(2) = 1
    let (mut a, mut b) = (1.0f64, 2.0f64);
    for point in &points {
        let diff = point.total - b;
        println!("{:<6} {:<14.1} {:<14.1} {:<10.1}", point.period, point.total, b, diff);
        let next = a + b;
        a = b;
        b = next;
    }
}
