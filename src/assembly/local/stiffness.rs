use crate::assembly::local::ReferenceOperators;
use crate::basis::LagrangeBasis;
use crate::element::IntervalElement;
use crate::FieldScalar;
use nalgebra::DMatrix;

/// Computes the element stiffness matrix of a basis on the interval `[a, b]`.
///
/// The entries are
///
/// $$
/// K^K_{rs} := \int_{-1}^1 \frac{\mathrm{d}\phi_r}{\mathrm{d}X} \\, \frac{\mathrm{d}\phi_s}{\mathrm{d}X}
/// \\, \frac{2}{h} \\, \mathrm{d}X,
/// $$
///
/// since each physical derivative carries a factor $\mathrm{d}X / \mathrm{d}x = 2 / h$ and the
/// change of variables contributes $h / 2$. The rows of $K^K$ sum to zero.
///
/// Fails with a degenerate geometry error if $h \leq 0$.
pub fn element_stiffness<T: FieldScalar>(basis: &LagrangeBasis<T>, interval: [T; 2]) -> eyre::Result<DMatrix<T>> {
    let element = IntervalElement::from_interval(interval)?;
    Ok(ReferenceOperators::from_basis(basis).element_stiffness(&element))
}
