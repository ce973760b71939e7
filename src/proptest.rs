use crate::element::IntervalElement;
use crate::mesh::procedural::create_uniform_interval_mesh;
use crate::mesh::Mesh1d;
use ::proptest::prelude::*;

/// Non-degenerate intervals $[a, b]$ with end points in a moderate range.
pub fn interval() -> impl Strategy<Value = [f64; 2]> {
    // Keep lengths away from zero so that Jacobians stay well conditioned
    (-10.0..10.0, 0.1..10.0).prop_map(|(a, length): (f64, f64)| [a, a + length])
}

impl Arbitrary for IntervalElement<f64> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        interval()
            .prop_map(|interval| IntervalElement::from_interval(interval).expect("Interval is non-degenerate"))
            .boxed()
    }
}

/// Uniform meshes of an arbitrary interval with the given degree and up to `max_elements`
/// elements.
pub fn uniform_mesh(degree: usize, max_elements: usize) -> impl Strategy<Value = Mesh1d<f64>> {
    (interval(), 1..=max_elements.max(1))
        .prop_map(move |([a, b], num_elements)| create_uniform_interval_mesh(a, b, num_elements, degree))
}

/// A uniform mesh together with a permutation of its element order.
pub fn uniform_mesh_with_shuffled_elements(
    degree: usize,
    max_elements: usize,
) -> impl Strategy<Value = (Mesh1d<f64>, Mesh1d<f64>)> {
    uniform_mesh(degree, max_elements)
        .prop_flat_map(|mesh| {
            let order = (0..mesh.num_elements()).collect::<Vec<_>>();
            (Just(mesh), Just(order).prop_shuffle())
        })
        .prop_map(|(mesh, order)| {
            let connectivity = order
                .iter()
                .map(|&e| mesh.connectivity()[e].clone())
                .collect();
            let shuffled = Mesh1d::from_vertices_and_connectivity(mesh.vertices().to_vec(), connectivity);
            (mesh, shuffled)
        })
}
