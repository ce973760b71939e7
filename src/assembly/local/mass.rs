use crate::assembly::local::ReferenceOperators;
use crate::basis::LagrangeBasis;
use crate::element::IntervalElement;
use crate::FieldScalar;
use nalgebra::DMatrix;

/// Computes the element mass matrix of a basis on the interval `[a, b]`.
///
/// Given a basis with $n = d + 1$ functions, the element mass matrix is the symmetric matrix
/// $M^K \in \mathbb{R}^{n \times n}$ with entries
///
/// $$
/// M^K_{rs} := \int_{-1}^1 \phi_r(X) \\, \phi_s(X) \\, \frac{h}{2} \\, \mathrm{d}X
/// \qquad r, s = 0, \dots, d,
/// $$
///
/// where $h = b - a$ and $h / 2$ is the Jacobian of the affine map from the reference interval.
/// The integrals are polynomial and are evaluated exactly. Since the basis forms a partition of
/// unity, every row of $M^K$ sums to $h$.
///
/// Fails with a degenerate geometry error if $h \leq 0$.
pub fn element_mass<T: FieldScalar>(basis: &LagrangeBasis<T>, interval: [T; 2]) -> eyre::Result<DMatrix<T>> {
    let element = IntervalElement::from_interval(interval)?;
    Ok(ReferenceOperators::from_basis(basis).element_mass(&element))
}
