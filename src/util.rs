use nalgebra::storage::StorageMut;
use nalgebra::{DMatrix, DVector, Dim, Matrix, Scalar};
use num::Zero;

/// Clones the upper triangle entries into the lower triangle entries.
///
/// The primary use case for this is to construct a full symmetric matrix from a symmetric
/// matrix represented only by its upper triangular entries.
pub(crate) fn clone_upper_to_lower<T, R, C, S>(matrix: &mut Matrix<T, R, C, S>)
where
    T: Scalar,
    R: Dim,
    C: Dim,
    S: StorageMut<T, R, C>,
{
    for j in 0..matrix.ncols() {
        for i in (j + 1)..matrix.nrows() {
            matrix[(i, j)] = matrix[(j, i)].clone();
        }
    }
}

/// Extracts the entries of `u` with the given indices, in order.
///
/// # Panics
///
/// Panics if an index is out of bounds.
pub fn extract_by_node_index<T: Scalar>(u: &DVector<T>, node_indices: &[usize]) -> DVector<T> {
    DVector::from_iterator(node_indices.len(), node_indices.iter().map(|&i| u[i].clone()))
}

/// Extracts the submatrix with the given row and column indices.
///
/// # Panics
///
/// Panics if an index is out of bounds.
pub fn extract_submatrix<T: Scalar + Zero>(matrix: &DMatrix<T>, rows: &[usize], cols: &[usize]) -> DMatrix<T> {
    DMatrix::from_fn(rows.len(), cols.len(), |i, j| matrix[(rows[i], cols[j])].clone())
}

/// Whether the square matrix equals its transpose entry by entry.
pub fn is_symmetric<T: Scalar>(matrix: &DMatrix<T>) -> bool {
    matrix.is_square() && (0..matrix.nrows()).all(|i| (0..i).all(|j| matrix[(i, j)] == matrix[(j, i)]))
}
