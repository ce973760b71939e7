//! The vibrating bar $\ddot u = c^2 u''$ with both ends clamped.
use crate::assembly::{assemble_mass, assemble_stiffness};
use crate::basis::LagrangeBasis;
use crate::dirichlet::DofPartition;
use crate::error::FemError;
use crate::interpolate::interpolate_nodal;
use crate::mesh::Mesh1d;
use crate::transient::{cfl_time_step, num_time_steps, CentralDifferenceIntegrator, TransientSolution};
use crate::Real;
use log::info;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Parameters of a wave simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: crate::Real + Deserialize<'de>"))]
pub struct WaveSettings<T> {
    pub wave_speed: T,
    pub total_time: T,
    /// The Courant number $C$ in $\Delta t = C h_{\min} / c$.
    #[serde(default = "default_cfl_safety_factor")]
    pub cfl_safety_factor: T,
    #[serde(default)]
    pub energy_growth_limit: Option<T>,
}

#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
fn default_cfl_safety_factor<T: Real>() -> T {
    0.9
}

impl Default for WaveSettings<f64> {
    fn default() -> Self {
        Self {
            wave_speed: 100.0,
            total_time: 2.0,
            cfl_safety_factor: default_cfl_safety_factor(),
            energy_growth_limit: None,
        }
    }
}

impl<T: Real> WaveSettings<T> {
    pub fn new(wave_speed: T, total_time: T) -> Self {
        Self {
            wave_speed,
            total_time,
            cfl_safety_factor: default_cfl_safety_factor(),
            energy_growth_limit: None,
        }
    }

    pub fn with_cfl_safety_factor(self, cfl_safety_factor: T) -> Self {
        Self {
            cfl_safety_factor,
            ..self
        }
    }

    pub fn with_energy_growth_limit(self, limit: T) -> Self {
        Self {
            energy_growth_limit: Some(limit),
            ..self
        }
    }
}

/// Simulates the bar with initial displacement `u0` and initial velocity `v0`.
///
/// The time step is the CFL step for the smallest node spacing of the mesh, and the number of
/// steps is chosen to cover `settings.total_time`. The end points of the bar are held at the
/// values of `u0` there.
pub fn simulate_wave<T, U0, V0>(
    mesh: &Mesh1d<T>,
    basis: &LagrangeBasis<T>,
    settings: &WaveSettings<T>,
    u0: U0,
    v0: V0,
) -> eyre::Result<TransientSolution<T>>
where
    T: Real,
    U0: Fn(T) -> T,
    V0: Fn(T) -> T,
{
    let mass = assemble_mass(mesh, basis)?;
    let stiffness = assemble_stiffness(mesh, basis)? * (settings.wave_speed * settings.wave_speed);
    let partition = DofPartition::from_mesh_boundary(mesh);

    let min_spacing = mesh
        .min_node_spacing()
        .ok_or_else(|| FemError::invalid_configuration("Mesh has no node spacing"))?;
    let dt = cfl_time_step(min_spacing, settings.wave_speed, settings.cfl_safety_factor)?;
    let num_steps = num_time_steps(settings.total_time, dt)?;
    info!(
        "Simulating wave on {} nodes with dt = {} and {} time steps",
        mesh.num_nodes(),
        dt,
        num_steps
    );

    let u0 = interpolate_nodal(mesh, u0);
    let v0 = interpolate_nodal(mesh, v0);

    let integrator = match settings.energy_growth_limit {
        Some(limit) => CentralDifferenceIntegrator::new().with_energy_growth_limit(limit),
        None => CentralDifferenceIntegrator::new(),
    };
    integrator.integrate(&mass, &stiffness, partition.fixed(), &u0, &v0, dt, num_steps)
}
