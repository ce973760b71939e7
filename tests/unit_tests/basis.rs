use crate::unit_tests::{fem_error, rational};
use lagrange_fem::basis::{basis, Basis, LagrangeBasis, NodeDistribution, Representation};
use lagrange_fem::error::FemError;
use lagrange_fem::polynomial::Polynomial;
use matrixcompare::assert_scalar_eq;
use num::{BigRational, One, Zero};
use proptest::prelude::*;

#[test]
fn linear_uniform_basis_has_closed_form() {
    let basis = LagrangeBasis::<BigRational>::new(1, NodeDistribution::Uniform).unwrap();
    assert_eq!(basis.nodes(), &[rational(-1, 1), rational(1, 1)]);
    assert_eq!(basis.functions()[0].to_string(), "1/2 - 1/2*X");
    assert_eq!(basis.functions()[1].to_string(), "1/2 + 1/2*X");
}

#[test]
fn quadratic_uniform_basis_has_closed_form() {
    let basis = LagrangeBasis::<BigRational>::new(2, NodeDistribution::Uniform).unwrap();
    let half = rational(1, 2);
    assert_eq!(
        basis.functions()[0],
        Polynomial::from_coefficients(vec![BigRational::zero(), -half.clone(), half.clone()])
    );
    assert_eq!(
        basis.functions()[1],
        Polynomial::from_coefficients(vec![BigRational::one(), BigRational::zero(), -BigRational::one()])
    );
    assert_eq!(
        basis.functions()[2],
        Polynomial::from_coefficients(vec![BigRational::zero(), half.clone(), half])
    );
}

#[test]
fn degree_zero_basis_is_constant_one() {
    let basis = LagrangeBasis::<f64>::new(0, NodeDistribution::Uniform).unwrap();
    assert_eq!(basis.len(), 1);
    assert_eq!(basis.nodes(), &[0.0]);
    assert_eq!(basis.functions()[0], Polynomial::constant(1.0));
    assert!(basis.derivatives()[0].is_zero());
}

#[test]
fn exact_basis_is_kronecker_delta_at_nodes() {
    for distribution in [NodeDistribution::Uniform, NodeDistribution::Chebyshev] {
        for degree in 1..=5 {
            let basis = LagrangeBasis::<BigRational>::new(degree, distribution).unwrap();
            for (i, phi) in basis.functions().iter().enumerate() {
                for (j, node) in basis.nodes().iter().enumerate() {
                    let expected = if i == j { BigRational::one() } else { BigRational::zero() };
                    assert_eq!(phi.evaluate(node), expected, "degree {degree}, phi_{i} at node {j}");
                }
            }
        }
    }
}

#[test]
fn exact_basis_is_partition_of_unity() {
    for distribution in [NodeDistribution::Uniform, NodeDistribution::Chebyshev] {
        for degree in 0..=6 {
            let basis = LagrangeBasis::<BigRational>::new(degree, distribution).unwrap();
            let sum = basis
                .functions()
                .iter()
                .fold(Polynomial::zero(), |acc, phi| &acc + phi);
            assert_eq!(sum, Polynomial::constant(BigRational::one()));
        }
    }
}

#[test]
fn numeric_basis_is_kronecker_delta_at_nodes() {
    for distribution in [NodeDistribution::Uniform, NodeDistribution::Chebyshev] {
        for degree in 1..=6 {
            let basis = LagrangeBasis::<f64>::new(degree, distribution).unwrap();
            for (i, phi) in basis.functions().iter().enumerate() {
                for (j, node) in basis.nodes().iter().enumerate() {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_scalar_eq!(phi.evaluate(node), expected, comp = abs, tol = 1e-12);
                }
            }
        }
    }
}

#[test]
fn chebyshev_nodes_are_ascending_and_interior() {
    for degree in 1..=8 {
        let nodes = NodeDistribution::Chebyshev.reference_nodes::<f64>(degree).unwrap();
        assert_eq!(nodes.len(), degree + 1);
        assert!(nodes.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(nodes.iter().all(|&x| -1.0 < x && x < 1.0));
        // Symmetric about the origin
        for (a, b) in nodes.iter().zip(nodes.iter().rev()) {
            assert_scalar_eq!(*a, -*b, comp = abs, tol = 1e-15);
        }
    }
}

#[test]
fn exact_and_numeric_bases_agree() {
    for distribution in [NodeDistribution::Uniform, NodeDistribution::Chebyshev] {
        for degree in 0..=5 {
            let exact = basis(degree, distribution, Representation::Exact).unwrap();
            let numeric = basis(degree, distribution, Representation::Numeric).unwrap();
            assert_eq!(exact.representation(), Representation::Exact);
            assert_eq!(numeric.representation(), Representation::Numeric);
            assert_eq!(exact.len(), numeric.len());

            for xi in [-1.0, -0.7, -0.1, 0.0, 0.35, 0.9, 1.0] {
                let exact_values = exact.evaluate_f64(xi).unwrap();
                let numeric_values = numeric.evaluate_f64(xi).unwrap();
                for (e, n) in exact_values.iter().zip(&numeric_values) {
                    assert_scalar_eq!(*e, *n, comp = abs, tol = 1e-12);
                }
            }
        }
    }
}

#[test]
fn runtime_basis_exposes_its_representation() {
    let exact = basis(2, NodeDistribution::Uniform, Representation::Exact).unwrap();
    assert!(exact.as_exact().is_some());
    assert!(exact.as_numeric().is_none());
    assert!(exact.clone().into_numeric().is_err());
    assert_eq!(exact.into_exact().unwrap().degree(), 2);

    let numeric = basis(3, NodeDistribution::Chebyshev, Representation::Numeric).unwrap();
    assert!(matches!(numeric, Basis::Numeric(_)));
    assert_eq!(numeric.degree(), 3);
    assert_eq!(numeric.into_numeric().unwrap().distribution(), NodeDistribution::Chebyshev);
}

#[test]
fn negative_degree_is_invalid_configuration() {
    let err = basis(-1, NodeDistribution::Uniform, Representation::Numeric).unwrap_err();
    assert!(matches!(fem_error(&err), FemError::InvalidConfiguration(_)));
}

#[test]
fn populate_basis_matches_evaluate() {
    let basis = LagrangeBasis::<f64>::new(3, NodeDistribution::Uniform).unwrap();
    let mut values = vec![0.0; 4];
    basis.populate_basis(&mut values, &0.25);
    assert_eq!(values, basis.evaluate(&0.25));
}

proptest! {
    #[test]
    fn numeric_basis_is_partition_of_unity(degree in 0..=8usize, xi in -1.0..=1.0f64) {
        for distribution in [NodeDistribution::Uniform, NodeDistribution::Chebyshev] {
            let basis = LagrangeBasis::<f64>::new(degree, distribution).unwrap();
            let sum: f64 = basis.evaluate(&xi).iter().sum();
            prop_assert!((sum - 1.0).abs() <= 1e-10);

            let derivative_sum: f64 = basis.derivatives().iter().map(|dphi| dphi.evaluate(&xi)).sum();
            prop_assert!(derivative_sum.abs() <= 1e-9);
        }
    }
}
