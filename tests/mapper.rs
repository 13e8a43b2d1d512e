#![allow(clippy::unwrap_used)]

use approx::assert_abs_diff_eq;
use meshnode::math::{Aabb, Point3, Vector3};
use meshnode::{
    MapperConfig, NodeId, NodePair, Point2MeshMapper, Polygon, PolygonKey, SceneMesh, Streamline,
    VoxelScene,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn empty_scene() -> VoxelScene {
    VoxelScene::new(
        Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(9.0, 9.0, 9.0)),
        Vector3::repeat(1.0),
    )
    .unwrap()
}

/// Two meshes with distinct vertex-index triplets:
/// a unit quad at z = 1 split into two triangles, and one triangle at z = 5.
fn two_mesh_scene() -> VoxelScene {
    let mut scene = empty_scene();
    scene.add_mesh(
        SceneMesh::new(
            vec![
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(2.0, 1.0, 1.0),
                Point3::new(1.0, 2.0, 1.0),
                Point3::new(2.0, 2.0, 1.0),
            ],
            vec![Polygon::new(0, 1, 2), Polygon::new(1, 3, 2)],
        )
        .unwrap(),
    );
    scene.add_mesh(
        SceneMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(5.0, 5.0, 5.0),
                Point3::new(6.0, 5.0, 5.0),
                Point3::new(5.0, 6.0, 5.0),
            ],
            vec![Polygon::new(3, 4, 5)],
        )
        .unwrap(),
    );
    scene
}

fn unit_triangle() -> SceneMesh {
    SceneMesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![Polygon::new(0, 1, 2)],
    )
    .unwrap()
}

#[test]
fn node_count_is_polygon_count_plus_one() {
    init_tracing();
    let scene = two_mesh_scene();
    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(2.0)).unwrap();
    assert_eq!(mapper.node_count(), 4);
    assert_eq!(mapper.registry().collisions(), 0);
}

#[test]
fn ids_follow_enumeration_order() {
    let scene = two_mesh_scene();
    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(2.0)).unwrap();
    let registry = mapper.registry();
    assert_eq!(registry.lookup(&PolygonKey([0, 1, 2])).unwrap(), NodeId(1));
    assert_eq!(registry.lookup(&PolygonKey([1, 3, 2])).unwrap(), NodeId(2));
    assert_eq!(registry.lookup(&PolygonKey([3, 4, 5])).unwrap(), NodeId(3));
}

#[test]
fn point_on_polygon_resolves_to_its_node() {
    let scene = two_mesh_scene();
    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(2.0)).unwrap();

    let point = Point3::new(1.75, 1.75, 1.0);
    let nearest = mapper.find_nearest(&point).unwrap();
    assert_abs_diff_eq!(nearest.distance, 0.0, epsilon = 1e-6);
    assert_eq!(nearest.polygon, Polygon::new(1, 3, 2));
    assert_eq!(mapper.find_node(&point).unwrap(), NodeId(2));

    let point = Point3::new(5.25, 5.25, 5.0);
    assert_eq!(mapper.find_node(&point).unwrap(), NodeId(3));
}

#[test]
fn far_point_is_unmatched() {
    let scene = two_mesh_scene();
    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(1.5)).unwrap();
    assert_eq!(
        mapper.find_node(&Point3::new(8.5, 8.5, -0.5)).unwrap(),
        NodeId::UNMATCHED
    );
    assert!(mapper.find_nearest(&Point3::new(8.5, 8.5, -0.5)).is_none());
}

#[test]
fn node_pairs_are_ordered() {
    let scene = two_mesh_scene();
    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(2.0)).unwrap();
    let pair = mapper
        .resolve(&Point3::new(5.25, 5.25, 5.5), &Point3::new(1.25, 1.25, 1.0))
        .unwrap();
    assert_eq!(pair.first(), NodeId(1));
    assert_eq!(pair.second(), NodeId(3));

    let pair = mapper
        .resolve(&Point3::new(5.25, 5.25, 5.5), &Point3::new(8.5, 8.5, 8.5))
        .unwrap();
    assert_eq!(pair, NodePair::new(NodeId::UNMATCHED, NodeId(3)));
    assert!(pair.first() <= pair.second());
    assert!(pair.has_unmatched());
}

#[test]
fn repeated_queries_agree() {
    let scene = two_mesh_scene();
    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(2.0)).unwrap();
    let point = Point3::new(1.4, 1.6, 1.3);
    let first = mapper.find_nearest(&point);
    let second = mapper.find_nearest(&point);
    assert_eq!(first, second);
    assert_eq!(mapper.find_node(&point).unwrap(), mapper.find_node(&point).unwrap());
}

#[test]
fn larger_limit_keeps_matches() {
    let scene = two_mesh_scene();
    let point = Point3::new(5.25, 5.25, 6.5);
    let mut previous = NodeId::UNMATCHED;
    for limit in [0.5, 1.0, 1.5, 2.0, 4.0, 8.0, f32::INFINITY] {
        let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(limit)).unwrap();
        let node = mapper.find_node(&point).unwrap();
        if !previous.is_unmatched() {
            assert_eq!(node, previous, "limit {limit} changed the match");
        }
        previous = node;
    }
    assert_eq!(previous, NodeId(3));
}

#[test]
fn single_triangle_streamline_maps_to_node_one() {
    let mut scene = empty_scene();
    scene.add_mesh(unit_triangle());
    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(1.0)).unwrap();

    let inside = Point3::new(0.25, 0.25, 0.0);
    let nearest = mapper.find_nearest(&inside).unwrap();
    assert_abs_diff_eq!(nearest.distance, 0.0, epsilon = 1e-6);

    let streamline = Streamline::new(vec![
        inside,
        Point3::new(0.5, 0.5, 3.0),
        Point3::new(0.125, 0.5, 0.0),
    ]);
    let pair = mapper.find_node_pair(&streamline).unwrap();
    assert_eq!(pair, NodePair::new(NodeId(1), NodeId(1)));
}

#[test]
fn empty_scene_maps_everything_to_unmatched() {
    let scene = empty_scene();
    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(100.0)).unwrap();
    assert_eq!(mapper.node_count(), 1);
    let streamline = Streamline::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 4.0, 4.0)]);
    let pair = mapper.find_node_pair(&streamline).unwrap();
    assert_eq!(pair, NodePair::new(NodeId::UNMATCHED, NodeId::UNMATCHED));
}

#[test]
fn identical_triplets_across_meshes_share_the_later_id() {
    init_tracing();
    let mut scene = empty_scene();
    scene.add_mesh(unit_triangle());
    let base = unit_triangle();
    let shifted = SceneMesh::new(
        base.vertices()
            .iter()
            .map(|p| p + Vector3::new(5.0, 5.0, 5.0))
            .collect(),
        base.polygons().to_vec(),
    )
    .unwrap();
    scene.add_mesh(shifted);

    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(1.0)).unwrap();
    assert_eq!(mapper.node_count(), 2);
    assert_eq!(mapper.registry().collisions(), 1);
    assert_eq!(mapper.registry().max_node_id(), NodeId(2));
    // Both meshes resolve through the shared key, which now holds the second id.
    assert_eq!(mapper.find_node(&Point3::new(0.25, 0.25, 0.0)).unwrap(), NodeId(2));
    assert_eq!(mapper.find_node(&Point3::new(5.25, 5.25, 5.0)).unwrap(), NodeId(2));
}

#[test]
fn parallel_batch_matches_sequential() {
    let scene = two_mesh_scene();
    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(3.0)).unwrap();

    let streamlines: Vec<Streamline> = (0..64u8)
        .map(|i| {
            let t = f32::from(i) / 8.0;
            Streamline::new(vec![
                Point3::new(t, 1.5, 1.0 + t / 4.0),
                Point3::new(5.5, t, 5.0),
            ])
        })
        .collect();

    let batch = mapper.find_node_pairs(&streamlines).unwrap();
    let sequential: Vec<NodePair> = streamlines
        .iter()
        .map(|s| mapper.find_node_pair(s).unwrap())
        .collect();
    assert_eq!(batch, sequential);
    assert!(batch.iter().all(|p| p.first() <= p.second()));
}

#[test]
fn batch_reports_empty_streamline() {
    let scene = two_mesh_scene();
    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(3.0)).unwrap();
    let streamlines = vec![
        Streamline::new(vec![Point3::new(1.5, 1.5, 1.0)]),
        Streamline::default(),
    ];
    assert!(mapper.find_node_pairs(&streamlines).is_err());
}

#[test]
fn node_pairs_fill_a_connectivity_matrix() {
    let scene = two_mesh_scene();
    let mapper = Point2MeshMapper::new(&scene, MapperConfig::new(2.0)).unwrap();
    let streamlines = vec![
        Streamline::new(vec![Point3::new(1.25, 1.25, 1.0), Point3::new(5.25, 5.25, 5.5)]),
        Streamline::new(vec![Point3::new(5.25, 5.25, 5.5), Point3::new(1.25, 1.25, 1.0)]),
        Streamline::new(vec![Point3::new(1.75, 1.75, 1.0), Point3::new(8.5, 8.5, 8.5)]),
    ];

    let n = mapper.node_count();
    let mut matrix = vec![vec![0u32; n]; n];
    for pair in mapper.find_node_pairs(&streamlines).unwrap() {
        matrix[pair.first().index()][pair.second().index()] += 1;
    }
    assert_eq!(matrix[1][3], 2);
    assert_eq!(matrix[0][2], 1);
    assert_eq!(matrix.iter().flatten().sum::<u32>(), 3);
}
