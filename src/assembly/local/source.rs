use crate::basis::LagrangeBasis;
use crate::element::IntervalElement;
use crate::error::FemError;
use crate::polynomial::Polynomial;
use crate::quadrature::GaussLegendre;
use crate::{FieldScalar, Real};
use nalgebra::DVector;

/// A source term $f(x)$ that can be integrated against reference polynomials on an element.
pub trait SourceFunction<T: FieldScalar> {
    /// Computes $\int_{-1}^1 f(x(X)) \\, p(X) \\, \mathrm{d}X$, where $x(X)$ is the affine map of
    /// the element.
    fn integrate_reference_product(&self, element: &IntervalElement<T>, p: &Polynomial<T>) -> eyre::Result<T>;
}

/// Polynomial sources in the physical coordinate $x$ are integrated exactly.
impl<T: FieldScalar> SourceFunction<T> for Polynomial<T> {
    fn integrate_reference_product(&self, element: &IntervalElement<T>, p: &Polynomial<T>) -> eyre::Result<T> {
        // x(X) = midpoint + (h / 2) X
        let pulled_back = self.compose_affine(&element.midpoint(), &element.reference_jacobian());
        Ok((&pulled_back * p).integrate_reference())
    }
}

impl<'a, T: FieldScalar, S: SourceFunction<T> + ?Sized> SourceFunction<T> for &'a S {
    fn integrate_reference_product(&self, element: &IntervalElement<T>, p: &Polynomial<T>) -> eyre::Result<T> {
        (**self).integrate_reference_product(element, p)
    }
}

/// A source given by an arbitrary function, integrated with Gauss–Legendre quadrature.
///
/// The integral is exact whenever $f(x(X)) p(X)$ is a polynomial of degree at most
/// $2n - 1$ for an $n$-point rule, and an approximation otherwise.
#[derive(Debug, Clone)]
pub struct QuadratureSource<T, F> {
    function: F,
    rule: GaussLegendre<T>,
}

impl<T: Real, F: Fn(T) -> T> QuadratureSource<T, F> {
    pub fn new(function: F, num_points: usize) -> Result<Self, FemError> {
        Ok(Self {
            function,
            rule: GaussLegendre::new(num_points)?,
        })
    }

    pub fn rule(&self) -> &GaussLegendre<T> {
        &self.rule
    }
}

impl<T: Real, F: Fn(T) -> T> SourceFunction<T> for QuadratureSource<T, F> {
    fn integrate_reference_product(&self, element: &IntervalElement<T>, p: &Polynomial<T>) -> eyre::Result<T> {
        let value = self
            .rule
            .integrate(|xi| (self.function)(element.map_reference_coords(&xi)) * p.evaluate(&xi));
        if value.is_finite() {
            Ok(value)
        } else {
            Err(eyre::eyre!("Source function produced a non-finite integral on element {:?}", element.interval()))
        }
    }
}

/// Computes the element load vector
///
/// $$
/// b^K_r := \int_{-1}^1 f(x(X)) \\, \phi_r(X) \\, \frac{h}{2} \\, \mathrm{d}X, \qquad r = 0, \dots, d.
/// $$
///
/// Fails with a degenerate geometry error if $h \leq 0$.
pub fn element_load<T, S>(source: &S, basis: &LagrangeBasis<T>, interval: [T; 2]) -> eyre::Result<DVector<T>>
where
    T: FieldScalar,
    S: SourceFunction<T> + ?Sized,
{
    let element = IntervalElement::from_interval(interval)?;
    assemble_element_load(source, basis, &element)
}

pub(crate) fn assemble_element_load<T, S>(
    source: &S,
    basis: &LagrangeBasis<T>,
    element: &IntervalElement<T>,
) -> eyre::Result<DVector<T>>
where
    T: FieldScalar,
    S: SourceFunction<T> + ?Sized,
{
    let jacobian = element.reference_jacobian();
    let entries = basis
        .functions()
        .iter()
        .map(|phi| -> eyre::Result<T> { Ok(source.integrate_reference_product(element, phi)? * jacobian.clone()) })
        .collect::<eyre::Result<Vec<_>>>()?;
    Ok(DVector::from_vec(entries))
}
