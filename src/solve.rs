//! Dense linear solvers for assembled static problems.
use crate::assembly::local::SourceFunction;
use crate::assembly::{assemble, OperatorKind};
use crate::basis::LagrangeBasis;
use crate::dirichlet::DofPartition;
use crate::error::FemError;
use crate::mesh::Mesh1d;
use crate::FieldScalar;
use log::debug;
use nalgebra::{DMatrix, DVector};
use num::BigRational;

/// Scalars for which dense linear systems can be solved.
///
/// Floating point types are solved by LU factorization with partial pivoting. Exact rationals are
/// solved by Gaussian elimination without any rounding, so the solution is the exact solution of
/// the assembled system.
pub trait LinearSolve: FieldScalar {
    fn solve_dense(matrix: &DMatrix<Self>, rhs: &DVector<Self>) -> Result<DVector<Self>, FemError>;
}

macro_rules! impl_float_linear_solve {
    ($($t:ty),*) => {
        $(
            impl LinearSolve for $t {
                fn solve_dense(matrix: &DMatrix<$t>, rhs: &DVector<$t>) -> Result<DVector<$t>, FemError> {
                    let n = matrix.nrows();
                    let lu = matrix.clone().lu();
                    let u = lu.u();
                    // Each pivot is relative to the largest entry of its own column
                    let is_zero_pivot = |i: usize| {
                        let column_scale = matrix.column(i).amax() as f64;
                        u[(i, i)].is_negligible(n as f64 * column_scale)
                    };
                    if let Some(i) = (0..n).find(|&i| is_zero_pivot(i)) {
                        return Err(FemError::singular_system(format!(
                            "Zero pivot encountered in column {} of LU factorization",
                            i
                        )));
                    }
                    lu.solve(rhs)
                        .ok_or_else(|| FemError::singular_system("LU factorization is not invertible"))
                }
            }
        )*
    };
}

impl_float_linear_solve!(f32, f64);

impl LinearSolve for BigRational {
    fn solve_dense(matrix: &DMatrix<Self>, rhs: &DVector<Self>) -> Result<DVector<Self>, FemError> {
        gaussian_elimination(matrix, rhs)
    }
}

/// Solves $A x = b$ by Gaussian elimination with row pivoting on the largest magnitude.
///
/// Only exact zeros are rejected as pivots when `T` is exact.
pub fn gaussian_elimination<T: FieldScalar>(matrix: &DMatrix<T>, rhs: &DVector<T>) -> Result<DVector<T>, FemError> {
    let n = matrix.nrows();
    assert_eq!(matrix.ncols(), n, "Matrix must be square");
    assert_eq!(rhs.len(), n, "Right-hand side dimension mismatch");

    let magnitude = |x: &T| x.to_f64().map(f64::abs).unwrap_or(0.0);

    let mut a = matrix.clone();
    let mut b = rhs.clone();
    for col in 0..n {
        let scale = matrix.column(col).iter().map(magnitude).fold(0.0, f64::max);
        let pivot_row = (col..n)
            .filter(|&row| !a[(row, col)].is_negligible(n as f64 * scale))
            .max_by(|&i, &j| magnitude(&a[(i, col)]).total_cmp(&magnitude(&a[(j, col)])))
            .ok_or_else(|| FemError::singular_system(format!("No pivot available in column {}", col)))?;
        if pivot_row != col {
            a.swap_rows(pivot_row, col);
            b.swap_rows(pivot_row, col);
        }

        let pivot = a[(col, col)].clone();
        for row in (col + 1)..n {
            if a[(row, col)].is_zero() {
                continue;
            }
            let factor = a[(row, col)].clone() / pivot.clone();
            for k in col..n {
                let update = factor.clone() * a[(col, k)].clone();
                a[(row, k)] -= update;
            }
            let update = factor * b[col].clone();
            b[row] -= update;
        }
    }

    let mut x = DVector::<T>::zeros(n);
    for row in (0..n).rev() {
        let mut sum = b[row].clone();
        for k in (row + 1)..n {
            sum -= a[(row, k)].clone() * x[k].clone();
        }
        x[row] = sum / a[(row, row)].clone();
    }
    Ok(x)
}

/// Solves `operator * u = load` for an operator that has already been made non-singular, for
/// example by restriction to the free DOFs.
pub fn solve<T: LinearSolve>(operator: &DMatrix<T>, load: &DVector<T>) -> eyre::Result<DVector<T>> {
    check_system_dims(operator, load)?;
    if operator.nrows() == 0 {
        return Err(FemError::singular_system("The system has no unknowns").into());
    }
    debug!(
        "Solving {0}x{0} system ({1} arithmetic)",
        operator.nrows(),
        if T::is_exact() { "exact" } else { "floating point" }
    );
    Ok(T::solve_dense(operator, load)?)
}

/// Solves the global system with the DOFs in `partition.fixed()` prescribed to `prescribed`.
///
/// The fixed DOFs are eliminated: the free block is solved with the load lifted by the
/// free-fixed coupling, and the prescribed values are reinserted into the returned full vector.
pub fn solve_with_dirichlet<T: LinearSolve>(
    operator: &DMatrix<T>,
    load: &DVector<T>,
    partition: &DofPartition,
    prescribed: &DVector<T>,
) -> eyre::Result<DVector<T>> {
    check_system_dims(operator, load)?;
    if operator.nrows() != partition.num_dofs() {
        return Err(FemError::invalid_configuration(format!(
            "Partition has {} DOFs, but the operator is {}x{}",
            partition.num_dofs(),
            operator.nrows(),
            operator.ncols()
        ))
        .into());
    }
    if prescribed.len() != partition.fixed().len() {
        return Err(FemError::invalid_configuration(format!(
            "Expected {} prescribed values, got {}",
            partition.fixed().len(),
            prescribed.len()
        ))
        .into());
    }

    if partition.free().is_empty() {
        return if load.iter().all(|b| b.is_zero()) {
            Ok(partition.expand(&DVector::zeros(0), prescribed))
        } else {
            Err(FemError::singular_system("All DOFs are fixed, but the load is non-zero").into())
        };
    }

    let a_free = partition.restrict_matrix(operator);
    let a_coupling = partition.coupling_matrix(operator);
    let b_free = partition.restrict_vector(load) - &a_coupling * prescribed;
    let u_free = solve(&a_free, &b_free)?;
    Ok(partition.expand(&u_free, prescribed))
}

/// Computes the $L^2$ projection of `source` onto the finite element space of the mesh.
///
/// The coefficients solve $M c = b$ with the global mass matrix $M$ and the load vector $b$ of the
/// source. No boundary conditions are imposed. A source that already lies in the space, such as
/// a polynomial of at most the basis degree, is reproduced exactly in exact arithmetic.
pub fn l2_projection<T: LinearSolve>(
    mesh: &Mesh1d<T>,
    basis: &LagrangeBasis<T>,
    source: &dyn SourceFunction<T>,
) -> eyre::Result<DVector<T>> {
    let (mass, load) = assemble(mesh, basis, Some(source), OperatorKind::Mass)?;
    solve(&mass, &load)
}

fn check_system_dims<T: FieldScalar>(operator: &DMatrix<T>, load: &DVector<T>) -> Result<(), FemError> {
    if !operator.is_square() || operator.nrows() != load.len() {
        return Err(FemError::invalid_configuration(format!(
            "Incompatible system dimensions: operator is {}x{}, load has length {}",
            operator.nrows(),
            operator.ncols(),
            load.len()
        )));
    }
    Ok(())
}
