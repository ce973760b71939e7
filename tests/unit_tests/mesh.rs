use crate::unit_tests::rational;
use lagrange_fem::error::FemError;
use lagrange_fem::mesh::procedural::{create_uniform_interval_mesh, create_unit_interval_uniform_mesh};
use lagrange_fem::mesh::Mesh1d;
use num::BigRational;

#[test]
fn uniform_quadratic_mesh_shares_end_nodes() {
    let mesh = create_unit_interval_uniform_mesh::<BigRational>(3, 2);
    assert_eq!(mesh.num_nodes(), 7);
    assert_eq!(mesh.num_elements(), 3);
    assert_eq!(mesh.connectivity(), &[vec![0, 1, 2], vec![2, 3, 4], vec![4, 5, 6]]);
    assert_eq!(mesh.vertices()[1], rational(1, 6));
    assert_eq!(mesh.element_interval(1), [rational(1, 3), rational(2, 3)]);
    assert_eq!(mesh.min_node_spacing(), Some(rational(1, 6)));
    assert!(mesh.validate(3).is_ok());
}

#[test]
fn uniform_mesh_of_general_interval() {
    let mesh = create_uniform_interval_mesh(-1.0, 3.0, 4, 1);
    assert_eq!(mesh.vertices(), &[-1.0, 0.0, 1.0, 2.0, 3.0]);
    assert_eq!(mesh.connectivity()[3], vec![3, 4]);
    assert_eq!(mesh.boundary_nodes(), vec![0, 4]);
}

#[test]
fn empty_mesh_fails_validation() {
    let mesh = create_unit_interval_uniform_mesh::<f64>(0, 1);
    assert_eq!(mesh.num_nodes(), 0);
    assert!(matches!(mesh.validate(2), Err(FemError::InvalidConfiguration(_))));
    assert_eq!(mesh.min_node_spacing(), None);
    assert!(mesh.boundary_nodes().is_empty());
}

#[test]
fn validation_detects_bad_connectivity() {
    let wrong_count = Mesh1d::from_vertices_and_connectivity(vec![0.0, 0.5, 1.0], vec![vec![0, 1], vec![1, 2, 0]]);
    assert!(matches!(wrong_count.validate(2), Err(FemError::InvalidConfiguration(_))));

    let out_of_bounds = Mesh1d::from_vertices_and_connectivity(vec![0.0, 0.5, 1.0], vec![vec![0, 1], vec![1, 3]]);
    assert!(matches!(out_of_bounds.validate(2), Err(FemError::InvalidConfiguration(_))));
}

#[test]
fn degenerate_element_reports_its_index() {
    let mesh = Mesh1d::from_vertices_and_connectivity(vec![0.0, 1.0, 1.0], vec![vec![0, 1], vec![1, 2]]);
    assert!(mesh.element(0).is_ok());
    let err = mesh.element(1).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FemError>(),
        Some(FemError::DegenerateGeometry { element: Some(1), .. })
    ));
    assert!(mesh.element(2).is_err());
}

#[test]
fn boundary_nodes_of_unordered_vertices() {
    let mesh = Mesh1d::from_vertices_and_connectivity(vec![0.5, 0.0, 1.0], vec![vec![1, 0], vec![0, 2]]);
    assert_eq!(mesh.boundary_nodes(), vec![1, 2]);
    assert_eq!(mesh.min_node_spacing(), Some(0.5));
}

#[test]
fn mesh_json_round_trip() {
    let mesh = create_unit_interval_uniform_mesh::<f64>(2, 1);
    let json = serde_json::to_string(&mesh).unwrap();
    let deserialized: Mesh1d<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, mesh);
}
