//! Gauss–Legendre quadrature on the reference interval.
//!
//! Element operators of polynomial integrands never need quadrature. It is only used to
//! integrate source terms given as arbitrary closures, see
//! [`QuadratureSource`](crate::assembly::local::QuadratureSource).
use crate::error::FemError;
use crate::Real;
use fenris_quadrature::univariate;
use itertools::izip;

/// A quadrature rule on $[-1, 1]$ given by weights and points.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendre<T> {
    weights: Vec<T>,
    points: Vec<T>,
}

impl<T: Real> GaussLegendre<T> {
    /// Constructs the `n`-point rule, which integrates polynomials of degree $2n - 1$ exactly.
    ///
    /// Points are sorted in ascending order.
    pub fn new(n: usize) -> Result<Self, FemError> {
        if n == 0 {
            return Err(FemError::invalid_configuration(
                "Gauss-Legendre rule needs at least one point",
            ));
        }

        let (weights, points) = univariate::gauss(n);
        let mut pairs: Vec<_> = izip!(weights, points).map(|(w, [x])| (x, w)).collect();
        pairs.sort_by(|(x1, _), (x2, _)| x1.total_cmp(x2));

        let convert = |value: f64| T::from_f64(value).expect("Quadrature value must fit in T");
        let (points, weights): (Vec<T>, Vec<T>) = pairs
            .into_iter()
            .map(|(x, w)| (convert(x), convert(w)))
            .unzip();
        Ok(Self { weights, points })
    }

    pub fn weights(&self) -> &[T] {
        &self.weights
    }

    pub fn points(&self) -> &[T] {
        &self.points
    }

    /// Approximates $\int_{-1}^1 f(X) \\, \mathrm{d}X$.
    pub fn integrate(&self, f: impl Fn(T) -> T) -> T {
        izip!(&self.weights, &self.points).fold(T::zero(), |acc, (&w, &x)| acc + w * f(x))
    }
}
