//! Element-level operators computed by exact integration on the reference element.
use crate::basis::LagrangeBasis;
use crate::element::IntervalElement;
use crate::util::clone_upper_to_lower;
use crate::FieldScalar;
use nalgebra::DMatrix;

mod mass;
mod source;
mod stiffness;

pub use mass::*;
pub use source::*;
pub use stiffness::*;

/// The $h$-independent reference integrals of a basis.
///
/// The element mass matrix is $M^K = \frac{h}{2} \hat M$ and the element stiffness matrix is
/// $K^K = \frac{2}{h} \hat K$ with
///
/// $$
/// \hat M_{rs} = \int_{-1}^1 \phi_r \phi_s \\, \mathrm{d}X, \qquad
/// \hat K_{rs} = \int_{-1}^1 \phi_r' \phi_s' \\, \mathrm{d}X,
/// $$
///
/// so both only need to be integrated once per basis.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceOperators<T: FieldScalar> {
    mass: DMatrix<T>,
    stiffness: DMatrix<T>,
}

impl<T: FieldScalar> ReferenceOperators<T> {
    pub fn from_basis(basis: &LagrangeBasis<T>) -> Self {
        let derivatives = basis.derivatives();
        Self {
            mass: reference_gram_matrix(basis.functions()),
            stiffness: reference_gram_matrix(&derivatives),
        }
    }

    pub fn reference_mass(&self) -> &DMatrix<T> {
        &self.mass
    }

    pub fn reference_stiffness(&self) -> &DMatrix<T> {
        &self.stiffness
    }

    pub fn element_mass(&self, element: &IntervalElement<T>) -> DMatrix<T> {
        self.mass.map(|m| m * element.reference_jacobian())
    }

    pub fn element_stiffness(&self, element: &IntervalElement<T>) -> DMatrix<T> {
        self.stiffness.map(|k| k * element.inverse_jacobian())
    }
}

/// Computes $\int_{-1}^1 p_r p_s \\, \mathrm{d}X$ for all pairs, integrating only the upper triangle.
fn reference_gram_matrix<T: FieldScalar>(polynomials: &[crate::polynomial::Polynomial<T>]) -> DMatrix<T> {
    let n = polynomials.len();
    let mut matrix = DMatrix::zeros(n, n);
    for r in 0..n {
        for s in r..n {
            matrix[(r, s)] = (&polynomials[r] * &polynomials[s]).integrate_reference();
        }
    }
    clone_upper_to_lower(&mut matrix);
    matrix
}
