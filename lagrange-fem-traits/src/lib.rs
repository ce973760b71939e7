//! Scalar traits shared by the `lagrange-fem` crates.
//!
//! Every routine of the engine is generic over a [`FieldScalar`], which is implemented both for
//! floating point types (numeric mode) and for [`BigRational`] (exact mode). The choice is made at
//! compile time through the type parameter, so a single assembled operator never mixes the two
//! representations.
use nalgebra::{ClosedAdd, ClosedDiv, ClosedMul, ClosedSub, RealField, Scalar};
use num::traits::{FromPrimitive, One, ToPrimitive, Zero};
use num::{BigRational, Signed};
use std::fmt::Display;
use std::ops::Neg;

pub use nalgebra;
pub use num;

/// A scalar type forming an ordered field.
pub trait FieldScalar:
    Scalar
    + Zero
    + One
    + ClosedAdd
    + ClosedSub
    + ClosedMul
    + ClosedDiv
    + Neg<Output = Self>
    + PartialOrd
    + FromPrimitive
    + ToPrimitive
    + Display
{
    /// Whether arithmetic in this type is exact (no rounding).
    fn is_exact() -> bool;

    /// Whether the value should be treated as zero relative to the given magnitude.
    ///
    /// Exact types only consider zero itself negligible.
    fn is_negligible(&self, scale: f64) -> bool;

    fn abs_value(&self) -> Self {
        if *self < Self::zero() {
            -self.clone()
        } else {
            self.clone()
        }
    }
}

macro_rules! impl_float_field_scalar {
    ($($t:ty),*) => {
        $(
            impl FieldScalar for $t {
                fn is_exact() -> bool {
                    false
                }

                fn is_negligible(&self, scale: f64) -> bool {
                    (self.abs() as f64) <= (<$t>::EPSILON as f64) * scale
                }
            }
        )*
    };
}

impl_float_field_scalar!(f32, f64);

impl FieldScalar for BigRational {
    fn is_exact() -> bool {
        true
    }

    fn is_negligible(&self, _scale: f64) -> bool {
        self.is_zero()
    }

    fn abs_value(&self) -> Self {
        self.abs()
    }
}

/// A floating point field scalar supported by `nalgebra`'s decompositions.
pub trait Real: RealField + Copy + FieldScalar {}

impl<T: RealField + Copy + FieldScalar> Real for T {}
