//! Explicit central difference time integration of $M \ddot u + K u = 0$.
use crate::dirichlet::DofPartition;
use crate::error::FemError;
use crate::Real;
use log::{debug, warn};
use nalgebra::{DMatrix, DVector, Scalar};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Computes the time step $\Delta t = C \\, h_{\min} / c$.
///
/// The explicit scheme is only stable for time steps below a bound proportional to the mesh
/// spacing divided by the wave speed, and the safety factor $C$ must lie in $(0, 1)$.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn cfl_time_step<T: Real>(min_spacing: T, wave_speed: T, safety_factor: T) -> eyre::Result<T> {
    if !(min_spacing > 0.0) || !min_spacing.is_finite() {
        return Err(FemError::invalid_configuration(format!("Mesh spacing must be positive, got {}", min_spacing)).into());
    }
    if !(wave_speed > 0.0) || !wave_speed.is_finite() {
        return Err(FemError::invalid_configuration(format!("Wave speed must be positive, got {}", wave_speed)).into());
    }
    if !(safety_factor > 0.0 && safety_factor < 1.0) {
        return Err(FemError::invalid_configuration(format!(
            "CFL safety factor must lie in (0, 1), got {}",
            safety_factor
        ))
        .into());
    }
    Ok(safety_factor * min_spacing / wave_speed)
}

/// The number of steps $\lceil T / \Delta t \rceil$ needed to cover the simulation time.
///
/// A ratio that differs from an integer only by floating point rounding is taken to be that
/// integer.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn num_time_steps<T: Real>(total_time: T, dt: T) -> eyre::Result<usize> {
    if !(dt > 0.0) || !dt.is_finite() {
        return Err(FemError::invalid_configuration(format!("Time step must be positive, got {}", dt)).into());
    }
    if !(total_time >= 0.0) || !total_time.is_finite() {
        return Err(FemError::invalid_configuration(format!(
            "Total time must be non-negative, got {}",
            total_time
        ))
        .into());
    }
    let ratio = total_time / dt;
    let nearest = ratio.round();
    // Ratios within rounding error of an integer, such as 1.1 / 0.1, count as that integer
    let num_steps = if (ratio - nearest).abs() <= 4.0 * T::default_epsilon() * nearest.max(1.0) {
        nearest
    } else {
        ratio.ceil()
    };
    num_steps
        .to_usize()
        .ok_or_else(|| FemError::invalid_configuration("Number of time steps does not fit in usize").into())
}

/// The displacement history produced by the integrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransientSolution<T: Scalar> {
    dt: T,
    displacements: Vec<DVector<T>>,
}

impl<T: Real> TransientSolution<T> {
    pub fn dt(&self) -> T {
        self.dt
    }

    /// Displacements $u^0, \dots, u^{N_t}$, one full vector per time level.
    pub fn displacements(&self) -> &[DVector<T>] {
        &self.displacements
    }

    pub fn into_displacements(self) -> Vec<DVector<T>> {
        self.displacements
    }

    pub fn num_steps(&self) -> usize {
        self.displacements.len().saturating_sub(1)
    }

    pub fn times(&self) -> Vec<T> {
        (0..self.displacements.len())
            .map(|n| T::from_usize(n).expect("Step index must fit in T") * self.dt)
            .collect()
    }

    pub fn final_displacement(&self) -> Option<&DVector<T>> {
        self.displacements.last()
    }

    /// The largest absolute displacement over all DOFs and time levels.
    ///
    /// The first non-finite value is returned as is, so an overflowing simulation reports infinity
    /// or NaN.
    pub fn max_abs_displacement(&self) -> T {
        let mut max = T::zero();
        for x in self.displacements.iter().flat_map(|u| u.iter()) {
            let magnitude = x.abs();
            if !magnitude.is_finite() {
                return magnitude;
            }
            if magnitude > max {
                max = magnitude;
            }
        }
        max
    }
}

/// Central difference integrator with an optional energy-based instability check.
///
/// Without a limit the integrator trusts the caller to respect the CFL bound: a time step above
/// the bound is not detected and shows up as unbounded growth of the displacements.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralDifferenceIntegrator<T> {
    energy_growth_limit: Option<T>,
}

impl<T> Default for CentralDifferenceIntegrator<T> {
    fn default() -> Self {
        Self {
            energy_growth_limit: None,
        }
    }
}

impl<T: Real> CentralDifferenceIntegrator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the integration once the discrete energy exceeds `limit` times its initial value.
    ///
    /// The monitored energy $\frac{1}{2} \bar v^T M \bar v + \frac{1}{2} u^T K u$ uses the centred
    /// velocity $\bar v^n = (u^{n+1} - u^{n-1}) / (2 \Delta t)$, which the central difference scheme
    /// does not conserve. Even for a stable time step it oscillates around its initial value, and
    /// close to the stability bound the oscillation is large: a single mode with frequency
    /// $\omega$ and $\cos \theta = 1 - (\omega \Delta t)^2 / 2$ can reach
    /// $(\omega \Delta t)^2 / \sin^2 \theta$ times the energy of an initial velocity, about 5 at
    /// $\omega \Delta t = 1.8$. Limits close to 1 therefore report stable runs as unstable.
    pub fn with_energy_growth_limit(self, limit: T) -> Self {
        Self {
            energy_growth_limit: Some(limit),
        }
    }

    pub fn energy_growth_limit(&self) -> Option<T> {
        self.energy_growth_limit
    }

    /// Advances $M \ddot u + K u = 0$ for `num_steps` steps of size `dt`.
    ///
    /// The DOFs in `fixed_dofs` keep their values from `u0` at every time level. On the free DOFs
    /// the initial acceleration solves $M_f a^0 = -K_f u^0_f + f$, the first step is the Taylor
    /// step $u^1 = u^0 + \Delta t v^0 + \frac{1}{2} \Delta t^2 a^0$ and subsequent steps solve
    ///
    /// $$
    /// M_f u^{n+1} = \Delta t^2 (-K_f u^n + f) + M_f (2 u^n - u^{n-1}),
    /// $$
    ///
    /// where $f = -K_{fc} u_c$ is the constant force exerted by the fixed values, which vanishes
    /// for homogeneous boundary conditions. $M_f$ is factorized once.
    ///
    /// Returns `num_steps + 1` displacement vectors, starting with `u0`.
    #[allow(non_snake_case)]
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn integrate(
        &self,
        mass: &DMatrix<T>,
        stiffness: &DMatrix<T>,
        fixed_dofs: &[usize],
        u0: &DVector<T>,
        v0: &DVector<T>,
        dt: T,
        num_steps: usize,
    ) -> eyre::Result<TransientSolution<T>> {
        let n = u0.len();
        for (name, matrix) in [("Mass", mass), ("Stiffness", stiffness)] {
            if matrix.nrows() != n || matrix.ncols() != n {
                return Err(FemError::invalid_configuration(format!(
                    "{} matrix is {}x{}, but there are {} DOFs",
                    name,
                    matrix.nrows(),
                    matrix.ncols(),
                    n
                ))
                .into());
            }
        }
        if v0.len() != n {
            return Err(FemError::invalid_configuration(format!(
                "Initial velocity has length {}, but there are {} DOFs",
                v0.len(),
                n
            ))
            .into());
        }
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(FemError::invalid_configuration(format!("Time step must be positive, got {}", dt)).into());
        }

        let partition = DofPartition::new(n, fixed_dofs.iter().copied())?;
        let mut displacements = Vec::with_capacity(num_steps + 1);
        displacements.push(u0.clone());

        if partition.free().is_empty() {
            warn!("All DOFs are fixed; the displacement stays constant");
            displacements.resize(num_steps + 1, u0.clone());
            return Ok(TransientSolution { dt, displacements });
        }

        let M = partition.restrict_matrix(mass);
        let K = partition.restrict_matrix(stiffness);
        let u_fixed = partition.fixed_values(u0);
        let f = -(partition.coupling_matrix(stiffness) * &u_fixed);

        let M_factor = M
            .clone()
            .cholesky()
            .ok_or_else(|| FemError::singular_system("Free block of the mass matrix is not positive definite"))?;

        let u0_free = partition.restrict_vector(u0);
        let v0_free = partition.restrict_vector(v0);
        let a0 = M_factor.solve(&(&f - &K * &u0_free));

        if num_steps == 0 {
            return Ok(TransientSolution { dt, displacements });
        }

        let energy = |u: &DVector<T>, v: &DVector<T>| 0.5 * v.dot(&(&M * v)) + 0.5 * u.dot(&(&K * u)) - f.dot(u);
        let initial_energy = energy(&u0_free, &v0_free);
        let energy_reference = initial_energy.abs().max(T::default_epsilon());

        let dt2 = dt * dt;
        let mut u_prev = u0_free;
        let mut u_current = &u_prev + &v0_free * dt + &a0 * (0.5 * dt2);
        displacements.push(partition.expand(&u_current, &u_fixed));

        let report_interval = (num_steps / 10).max(1);
        for step in 1..num_steps {
            let rhs = (&f - &K * &u_current) * dt2 + &M * (&u_current * 2.0 - &u_prev);
            let u_next = M_factor.solve(&rhs);

            if let Some(limit) = self.energy_growth_limit {
                let v_centered = (&u_next - &u_prev) / (2.0 * dt);
                let current_energy = energy(&u_current, &v_centered);
                let ratio = current_energy / energy_reference;
                if !(current_energy <= limit * energy_reference) {
                    return Err(FemError::NumericalInstability {
                        step,
                        energy_ratio: ratio.to_f64().unwrap_or(f64::INFINITY),
                    }
                    .into());
                }
            }

            displacements.push(partition.expand(&u_next, &u_fixed));
            u_prev = u_current;
            u_current = u_next;

            if step % report_interval == 0 {
                debug!("Step {}/{}", step, num_steps);
            }
        }

        Ok(TransientSolution { dt, displacements })
    }
}

/// Integrates with the default (unchecked) [`CentralDifferenceIntegrator`].
pub fn integrate<T: Real>(
    mass: &DMatrix<T>,
    stiffness: &DMatrix<T>,
    fixed_dofs: &[usize],
    u0: &DVector<T>,
    v0: &DVector<T>,
    dt: T,
    num_steps: usize,
) -> eyre::Result<TransientSolution<T>> {
    CentralDifferenceIntegrator::new().integrate(mass, stiffness, fixed_dofs, u0, v0, dt, num_steps)
}

/// The discrete energy $\frac{1}{2} v^T M v + \frac{1}{2} u^T K u$ of a full state.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
pub fn discrete_energy<T: Real>(mass: &DMatrix<T>, stiffness: &DMatrix<T>, u: &DVector<T>, v: &DVector<T>) -> T {
    0.5 * (v.dot(&(mass * v)) + u.dot(&(stiffness * u)))
}
