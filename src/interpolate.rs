//! Evaluation and interpolation of finite element functions.
use crate::basis::LagrangeBasis;
use crate::error::FemError;
use crate::mesh::Mesh1d;
use crate::FieldScalar;
use nalgebra::DVector;

/// Evaluates $u_h(x) = \sum_r \phi_r(X(x)) \\, c_{g(r)}$ on the element containing `x`.
///
/// If `x` lies on the boundary between two elements, the first element in the connectivity
/// is used. Both elements agree there whenever the end point node is shared.
pub fn evaluate_fe_function<T: FieldScalar>(
    mesh: &Mesh1d<T>,
    basis: &LagrangeBasis<T>,
    coefficients: &DVector<T>,
    x: &T,
) -> eyre::Result<T> {
    mesh.validate(basis.len())?;
    if coefficients.len() != mesh.num_nodes() {
        return Err(FemError::invalid_configuration(format!(
            "Expected {} coefficients, got {}",
            mesh.num_nodes(),
            coefficients.len()
        ))
        .into());
    }

    for (element_index, element_nodes) in mesh.connectivity().iter().enumerate() {
        let element = mesh.element(element_index)?;
        if element.contains(x) {
            let xi = element.map_physical_coords(x);
            let value = basis
                .evaluate(&xi)
                .into_iter()
                .zip(element_nodes)
                .fold(T::zero(), |acc, (phi, &node)| acc + phi * coefficients[node].clone());
            return Ok(value);
        }
    }

    Err(FemError::invalid_configuration(format!("Point {} is outside the mesh", x)).into())
}

/// Samples `f` at the mesh vertices.
pub fn interpolate_nodal<T: FieldScalar>(mesh: &Mesh1d<T>, f: impl Fn(T) -> T) -> DVector<T> {
    DVector::from_iterator(mesh.num_nodes(), mesh.vertices().iter().cloned().map(f))
}
