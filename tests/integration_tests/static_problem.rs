use lagrange_fem::assembly::local::SourceFunction;
use lagrange_fem::assembly::{assemble, OperatorKind};
use lagrange_fem::basis::{basis, LagrangeBasis, NodeDistribution, Representation};
use lagrange_fem::dirichlet::DofPartition;
use lagrange_fem::mesh::procedural::create_unit_interval_uniform_mesh;
use lagrange_fem::mesh::Mesh1d;
use lagrange_fem::polynomial::Polynomial;
use lagrange_fem::solve::{solve_with_dirichlet, LinearSolve};
use lagrange_fem::FieldScalar;
use matrixcompare::assert_scalar_eq;
use nalgebra::DVector;
use num::BigRational;

fn rational(numer: i64, denom: i64) -> BigRational {
    BigRational::new(numer.into(), denom.into())
}

/// Solves $-u'' = f$ on the mesh with homogeneous Dirichlet conditions at both ends.
fn solve_poisson<T: LinearSolve>(mesh: &Mesh1d<T>, basis: &LagrangeBasis<T>, f: &Polynomial<T>) -> DVector<T> {
    let (stiffness, load) = assemble(mesh, basis, Some(f as &dyn SourceFunction<T>), OperatorKind::Stiffness).unwrap();
    let partition = DofPartition::from_mesh_boundary(mesh);
    solve_with_dirichlet(&stiffness, &load, &partition, &DVector::zeros(partition.fixed().len())).unwrap()
}

/// $f(x) = x (1 - x)$.
fn bubble_source<T: FieldScalar>() -> Polynomial<T> {
    Polynomial::from_coefficients(vec![T::zero(), T::one(), -T::one()])
}

/// The solution $u(x) = x^4 / 12 - x^3 / 6 + x / 12$ of $-u'' = x (1 - x)$, $u(0) = u(1) = 0$.
fn bubble_solution(x: &BigRational) -> BigRational {
    let x2 = x.clone() * x.clone();
    let x3 = x2.clone() * x.clone();
    let x4 = x2.clone() * x2;
    x4 / rational(12, 1) - x3 / rational(6, 1) + x.clone() / rational(12, 1)
}

#[test]
fn two_element_linear_regression() {
    // Nodes {0, 1/2, 1}, elements [0, 1] and [1, 2]
    let mesh = Mesh1d::from_vertices_and_connectivity(
        vec![rational(0, 1), rational(1, 2), rational(1, 1)],
        vec![vec![0, 1], vec![1, 2]],
    );
    let exact_basis = basis(1, NodeDistribution::Uniform, Representation::Exact)
        .unwrap()
        .into_exact()
        .unwrap();
    let u = solve_poisson(&mesh, &exact_basis, &bubble_source());
    assert_eq!(u, DVector::from_vec(vec![rational(0, 1), rational(5, 192), rational(0, 1)]));

    let mesh = Mesh1d::from_vertices_and_connectivity(vec![0.0, 0.5, 1.0], vec![vec![0, 1], vec![1, 2]]);
    let numeric_basis = basis(1, NodeDistribution::Uniform, Representation::Numeric)
        .unwrap()
        .into_numeric()
        .unwrap();
    let u = solve_poisson(&mesh, &numeric_basis, &bubble_source());
    assert_scalar_eq!(u[1], 5.0 / 192.0, comp = abs, tol = 1e-15);
}

#[test]
fn quadratic_elements_recover_quadratic_solution_exactly() {
    // -u'' = 2 has the solution u = x (1 - x), which lies in the quadratic space
    let mesh = create_unit_interval_uniform_mesh::<BigRational>(3, 2);
    let basis = LagrangeBasis::new(2, NodeDistribution::Uniform).unwrap();
    let u = solve_poisson(&mesh, &basis, &Polynomial::constant(rational(2, 1)));

    for (x, u_x) in mesh.vertices().iter().zip(u.iter()) {
        assert_eq!(*u_x, x.clone() * (rational(1, 1) - x.clone()));
    }
}

#[test]
fn nodal_values_are_exact_for_polynomial_source() {
    for degree in 1..=3 {
        let mesh = create_unit_interval_uniform_mesh::<BigRational>(4, degree);
        let basis = LagrangeBasis::new(degree, NodeDistribution::Uniform).unwrap();
        let u = solve_poisson(&mesh, &basis, &bubble_source());

        // Nodal superconvergence in 1D: element end points are exact for any degree
        for e in 0..=4 {
            let node = e * degree;
            assert_eq!(u[node], bubble_solution(&mesh.vertices()[node]), "degree {degree}, node {node}");
        }
    }
}

#[test]
fn numeric_solution_matches_exact_solution() {
    let exact_mesh = create_unit_interval_uniform_mesh::<BigRational>(5, 3);
    let exact_basis = LagrangeBasis::new(3, NodeDistribution::Chebyshev).unwrap();
    let exact = solve_poisson(&exact_mesh, &exact_basis, &bubble_source());

    let mesh = create_unit_interval_uniform_mesh::<f64>(5, 3);
    let basis = LagrangeBasis::new(3, NodeDistribution::Chebyshev).unwrap();
    let numeric = solve_poisson(&mesh, &basis, &bubble_source());

    for (e, n) in exact.iter().zip(numeric.iter()) {
        assert_scalar_eq!(num::ToPrimitive::to_f64(e).unwrap(), *n, comp = abs, tol = 1e-12);
    }
}
