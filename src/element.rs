//! Element geometry: the affine map between the reference interval and a physical interval.
use crate::error::FemError;
use crate::FieldScalar;
use numeric_literals::replace_float_literals;
use serde::Serialize;

/// A non-degenerate interval $[a, b]$ with $a < b$.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntervalElement<T> {
    a: T,
    b: T,
}

impl<T: FieldScalar> IntervalElement<T> {
    /// Constructs the element, failing with [`FemError::DegenerateGeometry`] if `b <= a`.
    pub fn from_interval(interval: [T; 2]) -> Result<Self, FemError> {
        let [a, b] = interval;
        let length = b.clone() - a.clone();
        if length > T::zero() {
            Ok(Self { a, b })
        } else {
            Err(FemError::DegenerateGeometry {
                element: None,
                length: length.to_string(),
            })
        }
    }

    pub fn interval(&self) -> [T; 2] {
        [self.a.clone(), self.b.clone()]
    }

    pub fn length(&self) -> T {
        self.b.clone() - self.a.clone()
    }

    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn midpoint(&self) -> T {
        (self.a.clone() + self.b.clone()) / 2.0
    }

    /// The Jacobian $\mathrm{d}x / \mathrm{d}X = h / 2$.
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn reference_jacobian(&self) -> T {
        self.length() / 2.0
    }

    /// The inverse Jacobian $\mathrm{d}X / \mathrm{d}x = 2 / h$.
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn inverse_jacobian(&self) -> T {
        2.0 / self.length()
    }

    /// Maps $X \in [-1, 1]$ to $x = a (1 - X) / 2 + b (1 + X) / 2$.
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn map_reference_coords(&self, xi: &T) -> T {
        self.a.clone() * (1.0 - xi.clone()) / 2.0 + self.b.clone() * (1.0 + xi.clone()) / 2.0
    }

    /// Inverse of [`map_reference_coords`](Self::map_reference_coords).
    pub fn map_physical_coords(&self, x: &T) -> T {
        (x.clone() - self.midpoint()) * self.inverse_jacobian()
    }

    pub fn contains(&self, x: &T) -> bool {
        self.a <= *x && *x <= self.b
    }
}
