use crate::element::IntervalElement;
use crate::error::FemError;
use crate::FieldScalar;
use eyre::eyre;
use serde::{Deserialize, Serialize};

pub mod procedural;

/// Index-based one-dimensional mesh.
///
/// Each element is given by the ordered list of its global node indices. The first and last
/// local node determine the physical interval of the element, and consecutive elements share
/// their end point nodes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Mesh1d<T> {
    vertices: Vec<T>,
    connectivity: Vec<Vec<usize>>,
}

impl<T: FieldScalar> Mesh1d<T> {
    pub fn from_vertices_and_connectivity(vertices: Vec<T>, connectivity: Vec<Vec<usize>>) -> Self {
        Self { vertices, connectivity }
    }

    pub fn vertices(&self) -> &[T] {
        &self.vertices
    }

    pub fn connectivity(&self) -> &[Vec<usize>] {
        &self.connectivity
    }

    pub fn num_nodes(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_elements(&self) -> usize {
        self.connectivity.len()
    }

    /// Checks that the mesh has elements, that every element has `nodes_per_element` nodes and
    /// that all node indices are in bounds.
    pub fn validate(&self, nodes_per_element: usize) -> Result<(), FemError> {
        if self.connectivity.is_empty() {
            return Err(FemError::invalid_configuration("Mesh has no elements"));
        }
        for (element_index, nodes) in self.connectivity.iter().enumerate() {
            if nodes.len() != nodes_per_element {
                return Err(FemError::invalid_configuration(format!(
                    "Element {} has {} nodes, but the basis requires {}",
                    element_index,
                    nodes.len(),
                    nodes_per_element
                )));
            }
            if let Some(&idx) = nodes.iter().find(|&&idx| idx >= self.num_nodes()) {
                return Err(FemError::invalid_configuration(format!(
                    "Element {} references node {}, but the mesh only has {} nodes",
                    element_index,
                    idx,
                    self.num_nodes()
                )));
            }
        }
        Ok(())
    }

    /// Returns the physical interval spanned by the first and last node of the element.
    ///
    /// # Panics
    ///
    /// Panics if the element index or its node indices are out of bounds.
    pub fn element_interval(&self, element_index: usize) -> [T; 2] {
        let nodes = &self.connectivity[element_index];
        let first = nodes.first().expect("Elements must have at least one node");
        let last = nodes.last().expect("Elements must have at least one node");
        [self.vertices[*first].clone(), self.vertices[*last].clone()]
    }

    pub fn element(&self, element_index: usize) -> eyre::Result<IntervalElement<T>> {
        if element_index >= self.num_elements() {
            return Err(eyre!("Element index {} out of bounds", element_index));
        }
        let nodes = &self.connectivity[element_index];
        if nodes.is_empty() || nodes.iter().any(|&idx| idx >= self.num_nodes()) {
            return Err(FemError::invalid_configuration(format!(
                "Element {} has no nodes or references a missing node",
                element_index
            ))
            .into());
        }
        let element =
            IntervalElement::from_interval(self.element_interval(element_index)).map_err(|err| match err {
                FemError::DegenerateGeometry { length, .. } => FemError::DegenerateGeometry {
                    element: Some(element_index),
                    length,
                },
                other => other,
            })?;
        Ok(element)
    }

    /// The smallest distance between consecutive local nodes of any element.
    ///
    /// This is the mesh spacing that enters the CFL bound. Returns `None` for meshes without
    /// any pair of consecutive nodes.
    ///
    /// # Panics
    ///
    /// Panics if an element references a node index that is out of bounds. Use
    /// [`validate`](Self::validate) first for meshes from untrusted input.
    pub fn min_node_spacing(&self) -> Option<T> {
        self.connectivity
            .iter()
            .flat_map(|nodes| nodes.windows(2))
            .map(|pair| (self.vertices[pair[1]].clone() - self.vertices[pair[0]].clone()).abs_value())
            .fold(None, |min: Option<T>, spacing| match min {
                Some(current) if current <= spacing => Some(current),
                _ => Some(spacing),
            })
    }

    /// Indices of the nodes with the smallest and largest coordinate.
    ///
    /// Returns a single index if the mesh has only one node and an empty vector for an empty mesh.
    pub fn boundary_nodes(&self) -> Vec<usize> {
        let mut indices = (0..self.num_nodes()).collect::<Vec<_>>();
        let argmin = indices
            .iter()
            .copied()
            .reduce(|i, j| if self.vertices[j] < self.vertices[i] { j } else { i });
        let argmax = indices
            .iter()
            .copied()
            .reduce(|i, j| if self.vertices[j] > self.vertices[i] { j } else { i });
        indices.clear();
        indices.extend(argmin);
        indices.extend(argmax.filter(|max| Some(*max) != argmin));
        indices
    }
}
