//! Dirichlet boundary conditions by elimination of fixed degrees of freedom.
use crate::error::FemError;
use crate::mesh::Mesh1d;
use crate::util::{extract_by_node_index, extract_submatrix};
use crate::FieldScalar;
use nalgebra::{DMatrix, DVector, Scalar};
use num::Zero;
use serde::{Deserialize, Serialize};

/// A split of the DOFs $\\{0, \dots, N - 1\\}$ into fixed and free indices, both sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DofPartition {
    num_dofs: usize,
    fixed: Vec<usize>,
    free: Vec<usize>,
}

impl DofPartition {
    /// Partitions `num_dofs` DOFs given the fixed indices. Duplicates are ignored.
    pub fn new(num_dofs: usize, fixed: impl IntoIterator<Item = usize>) -> Result<Self, FemError> {
        let mut is_fixed = vec![false; num_dofs];
        for idx in fixed {
            let flag = is_fixed.get_mut(idx).ok_or_else(|| {
                FemError::invalid_configuration(format!(
                    "Fixed DOF {} out of bounds for {} DOFs",
                    idx, num_dofs
                ))
            })?;
            *flag = true;
        }
        let (fixed, free): (Vec<_>, Vec<_>) = (0..num_dofs).partition(|&i| is_fixed[i]);
        Ok(Self { num_dofs, fixed, free })
    }

    /// Fixes the end points of the mesh, as for a bar clamped at both ends.
    pub fn from_mesh_boundary<T: FieldScalar>(mesh: &Mesh1d<T>) -> Self {
        Self::new(mesh.num_nodes(), mesh.boundary_nodes()).expect("Boundary nodes are always in bounds")
    }

    pub fn num_dofs(&self) -> usize {
        self.num_dofs
    }

    pub fn fixed(&self) -> &[usize] {
        &self.fixed
    }

    pub fn free(&self) -> &[usize] {
        &self.free
    }

    /// The free-free block of a global operator.
    pub fn restrict_matrix<T: Scalar + Zero>(&self, matrix: &DMatrix<T>) -> DMatrix<T> {
        self.assert_matrix_dims(matrix);
        extract_submatrix(matrix, &self.free, &self.free)
    }

    /// The free-fixed block of a global operator.
    pub fn coupling_matrix<T: Scalar + Zero>(&self, matrix: &DMatrix<T>) -> DMatrix<T> {
        self.assert_matrix_dims(matrix);
        extract_submatrix(matrix, &self.free, &self.fixed)
    }

    pub fn restrict_vector<T: Scalar>(&self, vector: &DVector<T>) -> DVector<T> {
        assert_eq!(vector.len(), self.num_dofs, "Vector dimension mismatch");
        extract_by_node_index(vector, &self.free)
    }

    pub fn fixed_values<T: Scalar>(&self, vector: &DVector<T>) -> DVector<T> {
        assert_eq!(vector.len(), self.num_dofs, "Vector dimension mismatch");
        extract_by_node_index(vector, &self.fixed)
    }

    /// Combines free and fixed values into a full vector.
    ///
    /// # Panics
    ///
    /// Panics if the lengths do not match the partition.
    pub fn expand<T: Scalar + Zero>(&self, free_values: &DVector<T>, fixed_values: &DVector<T>) -> DVector<T> {
        assert_eq!(free_values.len(), self.free.len(), "Free value count mismatch");
        assert_eq!(fixed_values.len(), self.fixed.len(), "Fixed value count mismatch");
        let mut full = DVector::zeros(self.num_dofs);
        for (value, &idx) in free_values.iter().zip(&self.free) {
            full[idx] = value.clone();
        }
        for (value, &idx) in fixed_values.iter().zip(&self.fixed) {
            full[idx] = value.clone();
        }
        full
    }

    fn assert_matrix_dims<T: Scalar>(&self, matrix: &DMatrix<T>) {
        assert_eq!(matrix.nrows(), self.num_dofs, "Matrix dimension mismatch");
        assert_eq!(matrix.ncols(), self.num_dofs, "Matrix dimension mismatch");
    }
}
