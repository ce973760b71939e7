use crate::unit_tests::fem_error;
use lagrange_fem::basis::{LagrangeBasis, NodeDistribution};
use lagrange_fem::error::FemError;
use lagrange_fem::mesh::procedural::create_unit_interval_uniform_mesh;
use lagrange_fem::mesh::Mesh1d;
use lagrange_fem::transient::num_time_steps;
use lagrange_fem::wave::{simulate_wave, WaveSettings};

fn gaussian_pulse(x: f64) -> f64 {
    (-100.0 * (x - 0.5) * (x - 0.5)).exp()
}

#[test]
fn settings_json_round_trip() {
    let settings = WaveSettings::new(2.0, 0.5).with_energy_growth_limit(4.0);
    let json = serde_json::to_string(&settings).unwrap();
    assert_eq!(serde_json::from_str::<WaveSettings<f64>>(&json).unwrap(), settings);
}

#[test]
fn settings_defaults_are_filled_in() {
    let settings: WaveSettings<f64> = serde_json::from_str(r#"{ "wave_speed": 100.0, "total_time": 2.0 }"#).unwrap();
    assert_eq!(settings.cfl_safety_factor, 0.9);
    assert_eq!(settings.energy_growth_limit, None);
    assert_eq!(settings, WaveSettings::default());
}

#[test]
fn gaussian_pulse_stays_bounded_below_cfl_bound() {
    let mesh = create_unit_interval_uniform_mesh(20, 1);
    let basis = LagrangeBasis::new(1, NodeDistribution::Uniform).unwrap();
    // Consistent linear elements are stable for Courant numbers below 1 / sqrt(3)
    let settings = WaveSettings::new(1.0, 1.0)
        .with_cfl_safety_factor(0.5)
        .with_energy_growth_limit(1.5);

    let solution = simulate_wave(&mesh, &basis, &settings, gaussian_pulse, |_| 0.0).unwrap();
    assert_eq!(solution.num_steps(), num_time_steps(1.0, solution.dt()).unwrap());
    assert!(solution.dt() * solution.num_steps() as f64 >= 1.0);
    assert!(solution.max_abs_displacement() < 1.5);

    let left = gaussian_pulse(0.0);
    for u in solution.displacements() {
        assert_eq!(u[0], left);
    }
}

#[test]
fn energy_guard_catches_courant_number_above_stable_range() {
    let mesh = create_unit_interval_uniform_mesh(20, 1);
    let basis = LagrangeBasis::new(1, NodeDistribution::Uniform).unwrap();
    let settings = WaveSettings::new(1.0, 2.0).with_energy_growth_limit(10.0);

    let err = simulate_wave(&mesh, &basis, &settings, gaussian_pulse, |_| 0.0).unwrap_err();
    assert!(matches!(fem_error(&err), FemError::NumericalInstability { .. }));
}

#[test]
fn invalid_settings_are_rejected() {
    let mesh = create_unit_interval_uniform_mesh(4, 1);
    let basis = LagrangeBasis::new(1, NodeDistribution::Uniform).unwrap();
    let settings = WaveSettings::new(-1.0, 1.0);
    let err = simulate_wave(&mesh, &basis, &settings, |_| 0.0, |_| 0.0).unwrap_err();
    assert!(matches!(fem_error(&err), FemError::InvalidConfiguration(_)));
}

#[test]
fn mesh_with_missing_node_is_rejected() {
    let mesh = Mesh1d::from_vertices_and_connectivity(vec![0.0, 0.5, 1.0], vec![vec![0, 1], vec![1, 3]]);
    let basis = LagrangeBasis::new(1, NodeDistribution::Uniform).unwrap();
    let err = simulate_wave(&mesh, &basis, &WaveSettings::new(1.0, 1.0), |_| 0.0, |_| 0.0).unwrap_err();
    assert!(matches!(fem_error(&err), FemError::InvalidConfiguration(_)));
}
