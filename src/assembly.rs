//! Local and global assembly of finite element operators.
//!
//! Element operators are computed on the reference interval by exact integration
//! ([`local`]) and scatter-added into dense global operators indexed by node ([`global`]).
//! Assembly is sequential: neighboring elements write to shared end point nodes.
pub mod global;
pub mod local;

pub use global::{assemble, assemble_load, assemble_mass, assemble_stiffness, GlobalAccumulator, OperatorKind};
