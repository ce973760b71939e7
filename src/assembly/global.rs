//! Assembly of global operators from element operators.
use crate::assembly::local::{assemble_element_load, ReferenceOperators, SourceFunction};
use crate::basis::LagrangeBasis;
use crate::error::FemError;
use crate::mesh::Mesh1d;
use crate::FieldScalar;
use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// The element operator scattered into the global matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    Mass,
    Stiffness,
}

/// Accumulates element contributions into a global matrix and load vector.
///
/// The accumulator owns the global storage while elements are scattered into it, and hands it
/// over with [`into_parts`](Self::into_parts) once assembly is complete. Contributions are
/// purely additive, so the result does not depend on the order in which elements are added.
#[derive(Debug, Clone)]
pub struct GlobalAccumulator<T: FieldScalar> {
    matrix: DMatrix<T>,
    vector: DVector<T>,
}

impl<T: FieldScalar> GlobalAccumulator<T> {
    pub fn new(num_dofs: usize) -> Self {
        Self {
            matrix: DMatrix::zeros(num_dofs, num_dofs),
            vector: DVector::zeros(num_dofs),
        }
    }

    pub fn num_dofs(&self) -> usize {
        self.vector.len()
    }

    /// Adds the element matrix entry $(r, s)$ to the global entry $(g(r), g(s))$.
    ///
    /// # Panics
    ///
    /// Panics if the element matrix is not $n \times n$ for $n$ element nodes, or if a node index
    /// is out of bounds.
    pub fn add_element_matrix(&mut self, element_nodes: &[usize], element_matrix: &DMatrix<T>) {
        let n = element_nodes.len();
        assert_eq!(element_matrix.nrows(), n, "Element matrix dimension mismatch");
        assert_eq!(element_matrix.ncols(), n, "Element matrix dimension mismatch");
        for (r, &global_r) in element_nodes.iter().enumerate() {
            for (s, &global_s) in element_nodes.iter().enumerate() {
                self.matrix[(global_r, global_s)] += element_matrix[(r, s)].clone();
            }
        }
    }

    /// Adds the element vector entry $r$ to the global entry $g(r)$.
    ///
    /// # Panics
    ///
    /// Panics if the lengths disagree or if a node index is out of bounds.
    pub fn add_element_vector(&mut self, element_nodes: &[usize], element_vector: &DVector<T>) {
        assert_eq!(element_vector.len(), element_nodes.len(), "Element vector dimension mismatch");
        for (r, &global_r) in element_nodes.iter().enumerate() {
            self.vector[global_r] += element_vector[r].clone();
        }
    }

    pub fn into_parts(self) -> (DMatrix<T>, DVector<T>) {
        (self.matrix, self.vector)
    }
}

/// Assembles the global mass or stiffness matrix and, if a source is given, the global load
/// vector.
///
/// The mesh is validated against the basis before any numerical work: every element must list
/// exactly `basis.len()` in-bounds nodes. Without a source the returned load vector is zero.
pub fn assemble<T: FieldScalar>(
    mesh: &Mesh1d<T>,
    basis: &LagrangeBasis<T>,
    source: Option<&dyn SourceFunction<T>>,
    kind: OperatorKind,
) -> eyre::Result<(DMatrix<T>, DVector<T>)> {
    validate_for_assembly(mesh, basis)?;

    debug!(
        "Assembling {:?} operator{} over {} elements and {} nodes",
        kind,
        if source.is_some() { " and load" } else { "" },
        mesh.num_elements(),
        mesh.num_nodes()
    );

    let reference = ReferenceOperators::from_basis(basis);
    let mut accumulator = GlobalAccumulator::new(mesh.num_nodes());
    for (element_index, element_nodes) in mesh.connectivity().iter().enumerate() {
        let element = mesh.element(element_index)?;
        let element_matrix = match kind {
            OperatorKind::Mass => reference.element_mass(&element),
            OperatorKind::Stiffness => reference.element_stiffness(&element),
        };
        accumulator.add_element_matrix(element_nodes, &element_matrix);

        if let Some(source) = source {
            let element_load = assemble_element_load(source, basis, &element)?;
            accumulator.add_element_vector(element_nodes, &element_load);
        }
    }

    Ok(accumulator.into_parts())
}

pub fn assemble_mass<T: FieldScalar>(mesh: &Mesh1d<T>, basis: &LagrangeBasis<T>) -> eyre::Result<DMatrix<T>> {
    Ok(assemble(mesh, basis, None, OperatorKind::Mass)?.0)
}

pub fn assemble_stiffness<T: FieldScalar>(mesh: &Mesh1d<T>, basis: &LagrangeBasis<T>) -> eyre::Result<DMatrix<T>> {
    Ok(assemble(mesh, basis, None, OperatorKind::Stiffness)?.0)
}

/// Assembles only the global load vector of the source.
pub fn assemble_load<T: FieldScalar>(
    mesh: &Mesh1d<T>,
    basis: &LagrangeBasis<T>,
    source: &dyn SourceFunction<T>,
) -> eyre::Result<DVector<T>> {
    validate_for_assembly(mesh, basis)?;
    let mut accumulator = GlobalAccumulator::new(mesh.num_nodes());
    for (element_index, element_nodes) in mesh.connectivity().iter().enumerate() {
        let element = mesh.element(element_index)?;
        accumulator.add_element_vector(element_nodes, &assemble_element_load(source, basis, &element)?);
    }
    Ok(accumulator.into_parts().1)
}

fn validate_for_assembly<T: FieldScalar>(mesh: &Mesh1d<T>, basis: &LagrangeBasis<T>) -> Result<(), FemError> {
    if basis.degree() == 0 {
        return Err(FemError::invalid_configuration(
            "Degree-zero elements carry a single node and cannot describe their own interval",
        ));
    }
    mesh.validate(basis.len())
}
