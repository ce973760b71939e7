//! A Gaussian pulse travelling along a bar clamped at both ends.
//!
//! The displacement satisfies $\ddot u = c^2 u''$ on $[0, 1]$ and is discretized with quadratic
//! Lagrange elements. Pass a Courant number as the first argument to experiment with the CFL
//! bound; values close to one make the energy check fail.
use lagrange_fem::basis::{LagrangeBasis, NodeDistribution};
use lagrange_fem::interpolate::evaluate_fe_function;
use lagrange_fem::mesh::procedural::create_unit_interval_uniform_mesh;
use lagrange_fem::wave::{simulate_wave, WaveSettings};

fn main() -> eyre::Result<()> {
    let courant: f64 = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 0.2,
    };

    let num_elements = 10;
    let degree = 2;
    let mesh = create_unit_interval_uniform_mesh::<f64>(num_elements, degree);
    let basis = LagrangeBasis::new(degree, NodeDistribution::Uniform)?;
    let settings = WaveSettings::new(100.0, 0.02)
        .with_cfl_safety_factor(courant)
        .with_energy_growth_limit(10.0);

    let solution = simulate_wave(&mesh, &basis, &settings, |x| (-100.0 * (x - 0.5) * (x - 0.5)).exp(), |_| 0.0)?;
    println!("dt = {:e}, Nt = {}", solution.dt(), solution.num_steps());
    println!("max |u| = {:.6}", solution.max_abs_displacement());

    let report_interval = (solution.num_steps() / 5).max(1);
    for (step, (t, u)) in solution
        .times()
        .into_iter()
        .zip(solution.displacements())
        .enumerate()
        .step_by(report_interval)
    {
        let midpoint = evaluate_fe_function(&mesh, &basis, u, &0.5)?;
        println!("step {:5}  t = {:.5}  u(0.5) = {:+.6}", step, t, midpoint);
    }
    Ok(())
}
