//! One-dimensional Lagrange finite elements.
//!
//! The crate builds Lagrange bases on the reference interval $[-1, 1]$, integrates element mass,
//! stiffness and load operators exactly, assembles them over index-based meshes and solves either
//! the static problem $K u = b$ or the semi-discrete wave equation $M \ddot u + K u = 0$ with an
//! explicit central difference scheme.
//!
//! All routines are generic over a [`FieldScalar`]. Using [`num::BigRational`] gives exact
//! rational results, while `f64` gives the usual floating point computations.
pub mod assembly;
pub mod basis;
pub mod dirichlet;
pub mod element;
pub mod error;
pub mod interpolate;
pub mod mesh;
pub mod polynomial;
pub mod quadrature;
pub mod solve;
pub mod transient;
pub mod util;
pub mod wave;

#[cfg(feature = "proptest-support")]
pub mod proptest;

pub extern crate nalgebra;
pub extern crate num;

pub use lagrange_fem_traits::{FieldScalar, Real};
