//! Lagrange basis functions on the reference interval $[-1, 1]$.
use crate::error::FemError;
use crate::polynomial::Polynomial;
use crate::FieldScalar;
use eyre::eyre;
use num::BigRational;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Placement of the interpolation nodes on the reference interval.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeDistribution {
    /// Equidistant nodes including both end points.
    Uniform,
    /// Chebyshev points $-\cos\left(\frac{(2i + 1)\pi}{2(d + 1)}\right)$, $i = 0, \dots, d$.
    ///
    /// The points are computed in double precision. In exact mode they are represented exactly
    /// as the rationals equal to those doubles, so the resulting basis is still an exact Lagrange
    /// basis for its (rational) nodes.
    Chebyshev,
}

impl Default for NodeDistribution {
    fn default() -> Self {
        Self::Uniform
    }
}

impl NodeDistribution {
    /// Returns the `degree + 1` reference nodes in ascending order.
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn reference_nodes<T: FieldScalar>(&self, degree: usize) -> eyre::Result<Vec<T>> {
        if degree == 0 {
            return Ok(vec![0.0]);
        }
        match self {
            Self::Uniform => {
                let d = T::from_usize(degree).ok_or_else(|| eyre!("Degree {} does not fit in scalar type", degree))?;
                let nodes = (0..=degree)
                    .map(|i| {
                        let i = T::from_usize(i).expect("i <= degree fits whenever degree fits");
                        -1.0 + 2.0 * i / d.clone()
                    })
                    .collect();
                Ok(nodes)
            }
            Self::Chebyshev => (0..=degree)
                .map(|i| {
                    let theta = (2 * i + 1) as f64 * PI / (2 * (degree + 1)) as f64;
                    T::from_f64(-theta.cos()).ok_or_else(|| {
                        FemError::invalid_configuration(format!("Chebyshev node {} is not representable", i)).into()
                    })
                })
                .collect(),
        }
    }
}

/// Selects between exact rational arithmetic and floating point arithmetic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Representation {
    Exact,
    Numeric,
}

/// An ordered set of Lagrange basis functions of a fixed degree.
///
/// Basis function $\phi_i$ is the unique polynomial of degree $d$ with
/// $\phi_i(\xi_j) = \delta_{ij}$ for the reference nodes $\xi_0, \dots, \xi_d$.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagrangeBasis<T> {
    degree: usize,
    distribution: NodeDistribution,
    nodes: Vec<T>,
    functions: Vec<Polynomial<T>>,
}

impl<T: FieldScalar> LagrangeBasis<T> {
    pub fn new(degree: usize, distribution: NodeDistribution) -> eyre::Result<Self> {
        let nodes = distribution.reference_nodes(degree)?;
        let functions = if degree == 0 {
            vec![Polynomial::constant(T::one())]
        } else {
            (0..=degree)
                .map(|i| lagrange_polynomial(i, &nodes))
                .collect::<eyre::Result<_>>()?
        };
        Ok(Self {
            degree,
            distribution,
            nodes,
            functions,
        })
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn distribution(&self) -> NodeDistribution {
        self.distribution
    }

    /// The number of basis functions, $d + 1$.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    pub fn functions(&self) -> &[Polynomial<T>] {
        &self.functions
    }

    /// Reference derivatives $\mathrm{d}\phi_i / \mathrm{d}X$.
    pub fn derivatives(&self) -> Vec<Polynomial<T>> {
        self.functions.iter().map(Polynomial::derivative).collect()
    }

    /// Evaluates every basis function at the reference coordinate `xi`.
    pub fn evaluate(&self, xi: &T) -> Vec<T> {
        let mut values = vec![T::zero(); self.len()];
        self.populate_basis(&mut values, xi);
        values
    }

    /// Stores the value of every basis function at `xi` in `output`.
    ///
    /// # Panics
    ///
    /// Panics if `output` does not have one entry per basis function.
    pub fn populate_basis(&self, output: &mut [T], xi: &T) {
        assert_eq!(output.len(), self.len(), "Output length must match number of basis functions");
        for (value, phi) in output.iter_mut().zip(&self.functions) {
            *value = phi.evaluate(xi);
        }
    }
}

/// Builds $\prod_{k \neq i} (X - \xi_k) / (\xi_i - \xi_k)$.
fn lagrange_polynomial<T: FieldScalar>(i: usize, nodes: &[T]) -> eyre::Result<Polynomial<T>> {
    let mut p = Polynomial::constant(T::one());
    for (k, node_k) in nodes.iter().enumerate() {
        if k == i {
            continue;
        }
        let denominator = nodes[i].clone() - node_k.clone();
        if denominator.is_zero() {
            return Err(FemError::invalid_configuration(format!("Reference nodes {} and {} coincide", i, k)).into());
        }
        let factor = Polynomial::linear(-node_k.clone() / denominator.clone(), T::one() / denominator);
        p = &p * &factor;
    }
    Ok(p)
}

/// A basis set in either exact or numeric representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Basis {
    Exact(LagrangeBasis<BigRational>),
    Numeric(LagrangeBasis<f64>),
}

impl Basis {
    pub fn representation(&self) -> Representation {
        match self {
            Self::Exact(_) => Representation::Exact,
            Self::Numeric(_) => Representation::Numeric,
        }
    }

    pub fn degree(&self) -> usize {
        match self {
            Self::Exact(basis) => basis.degree(),
            Self::Numeric(basis) => basis.degree(),
        }
    }

    pub fn len(&self) -> usize {
        self.degree() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Evaluates every basis function at a floating point reference coordinate.
    pub fn evaluate_f64(&self, xi: f64) -> eyre::Result<Vec<f64>> {
        match self {
            Self::Numeric(basis) => Ok(basis.evaluate(&xi)),
            Self::Exact(basis) => {
                let xi = BigRational::from_float(xi)
                    .ok_or_else(|| FemError::invalid_configuration(format!("Cannot represent {} exactly", xi)))?;
                Ok(basis.evaluate(&xi).iter().map(to_f64).collect())
            }
        }
    }

    pub fn as_exact(&self) -> Option<&LagrangeBasis<BigRational>> {
        match self {
            Self::Exact(basis) => Some(basis),
            Self::Numeric(_) => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&LagrangeBasis<f64>> {
        match self {
            Self::Numeric(basis) => Some(basis),
            Self::Exact(_) => None,
        }
    }

    pub fn into_exact(self) -> eyre::Result<LagrangeBasis<BigRational>> {
        match self {
            Self::Exact(basis) => Ok(basis),
            Self::Numeric(_) => Err(eyre!("Expected an exact basis, but the basis is numeric")),
        }
    }

    pub fn into_numeric(self) -> eyre::Result<LagrangeBasis<f64>> {
        match self {
            Self::Numeric(basis) => Ok(basis),
            Self::Exact(_) => Err(eyre!("Expected a numeric basis, but the basis is exact")),
        }
    }
}

fn to_f64(value: &BigRational) -> f64 {
    num::ToPrimitive::to_f64(value).unwrap_or(f64::NAN)
}

/// Builds the `degree + 1` Lagrange basis functions for the given node distribution.
///
/// The degree is signed so that callers forwarding user input get a domain error instead of a
/// wrapped value.
pub fn basis(degree: i64, distribution: NodeDistribution, representation: Representation) -> eyre::Result<Basis> {
    let degree = usize::try_from(degree).map_err(|_| {
        FemError::invalid_configuration(format!("Polynomial degree must be non-negative, got {}", degree))
    })?;
    match representation {
        Representation::Exact => Ok(Basis::Exact(LagrangeBasis::new(degree, distribution)?)),
        Representation::Numeric => Ok(Basis::Numeric(LagrangeBasis::new(degree, distribution)?)),
    }
}
