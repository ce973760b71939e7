//! Error categories reported by the engine.
//!
//! Public operations return [`eyre::Result`]. Failures originating in the engine carry a
//! [`FemError`], which can be recovered with `report.downcast_ref::<FemError>()`.
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FemError {
    /// Invalid input detected before any numerical work, such as a negative polynomial degree or
    /// an element referencing a node that does not exist.
    InvalidConfiguration(String),
    /// An element with zero or negative length.
    DegenerateGeometry { element: Option<usize>, length: String },
    /// A linear system that cannot be solved.
    SingularSystem(String),
    /// The discrete energy of a transient simulation grew beyond the configured limit.
    NumericalInstability { step: usize, energy_ratio: f64 },
}

impl FemError {
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub fn singular_system(message: impl Into<String>) -> Self {
        Self::SingularSystem(message.into())
    }
}

impl Display for FemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Self::DegenerateGeometry {
                element: Some(index),
                length,
            } => {
                write!(f, "Element {} is degenerate (length {}).", index, length)
            }
            Self::DegenerateGeometry { element: None, length } => {
                write!(f, "Degenerate element interval (length {}).", length)
            }
            Self::SingularSystem(msg) => write!(f, "Singular system: {}", msg),
            Self::NumericalInstability { step, energy_ratio } => {
                write!(
                    f,
                    "Discrete energy grew by a factor {:e} at step {}. Is the time step above the CFL bound?",
                    energy_ratio, step
                )
            }
        }
    }
}

impl Error for FemError {}
