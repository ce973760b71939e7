//! Uniform partitioning of intervals.
use crate::mesh::Mesh1d;
use crate::FieldScalar;

/// Partitions $[a, b]$ into `num_elements` equal elements of the given polynomial degree.
///
/// Node $j$ is placed at $a + (b - a) j / (n d)$ and element $e$ owns nodes $e d, \dots, e d + d$,
/// so neighboring elements share their end point node. For degree zero every element is given
/// by its left end point only.
pub fn create_uniform_interval_mesh<T>(a: T, b: T, num_elements: usize, degree: usize) -> Mesh1d<T>
where
    T: FieldScalar,
{
    if num_elements == 0 {
        return Mesh1d::from_vertices_and_connectivity(Vec::new(), Vec::new());
    }

    // Degree-zero elements still need both end points for their geometry
    let nodes_per_element_span = degree.max(1);
    let num_segments = num_elements * nodes_per_element_span;
    let n = T::from_usize(num_segments).expect("Number of nodes must fit in T");
    let vertices = (0..=num_segments)
        .map(|j| {
            let j = T::from_usize(j).expect("Node index must fit in T");
            a.clone() + (b.clone() - a.clone()) * j / n.clone()
        })
        .collect();

    let connectivity = (0..num_elements)
        .map(|e| {
            let start = e * nodes_per_element_span;
            (start..=start + degree).collect()
        })
        .collect();

    Mesh1d::from_vertices_and_connectivity(vertices, connectivity)
}

pub fn create_unit_interval_uniform_mesh<T>(num_elements: usize, degree: usize) -> Mesh1d<T>
where
    T: FieldScalar,
{
    create_uniform_interval_mesh(T::zero(), T::one(), num_elements, degree)
}
