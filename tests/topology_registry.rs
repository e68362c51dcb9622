use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use xdmf_graph::graph::ItemProperty;
use xdmf_graph::model::topology_type::ids;
use xdmf_graph::prelude::*;

fn props(pairs: &[(&str, &str)]) -> PropertyMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn triangle_is_registered_under_0x4() {
    let tri = TopologyType::lookup_by_id(0x4).expect("triangle");
    assert_eq!(tri.name(), "Triangle");
    assert_eq!(tri.nodes_per_element(), 3);
    assert_eq!(tri.faces_per_element(), 0);
    assert_eq!(tri.edges_per_element(), 3);
    assert!(Arc::ptr_eq(&tri, &TopologyType::triangle()));
}

#[test]
fn accessors_return_the_same_instance() {
    assert!(Arc::ptr_eq(&TopologyType::hexahedron(), &TopologyType::hexahedron()));
    assert_eq!(TopologyType::mixed(), TopologyType::mixed());
    assert_ne!(TopologyType::triangle(), TopologyType::quadrilateral());
    assert_ne!(TopologyType::tetrahedron_10(), TopologyType::tetrahedron());
}

#[test]
fn polygons_are_distinct_instances_with_shared_id() {
    let five = TopologyType::polygon(5);
    let seven = TopologyType::polygon(7);
    assert!(!Arc::ptr_eq(&five, &seven));
    assert_eq!(five.nodes_per_element(), 5);
    assert_eq!(seven.nodes_per_element(), 7);
    assert_eq!(five.id(), 0x3);
    assert_eq!(seven.id(), 0x3);
    // Equality is by ID alone.
    assert_eq!(five, seven);
}

#[test]
fn registered_ids_are_unique_and_include_the_documented_set() {
    let registered: Vec<u32> = TopologyType::registered_ids().collect();
    let unique: HashSet<u32> = registered.iter().copied().collect();
    assert_eq!(unique.len(), registered.len());
    for id in [
        ids::NO_TOPOLOGY_TYPE,
        ids::POLYVERTEX,
        ids::POLYLINE,
        ids::POLYGON,
        ids::TRIANGLE,
        ids::QUADRILATERAL,
        ids::TETRAHEDRON,
        ids::PYRAMID,
        ids::WEDGE,
        ids::HEXAHEDRON,
        ids::EDGE_3,
        ids::TRIANGLE_6,
        ids::HEXAHEDRON_1331,
        ids::MIXED,
    ] {
        assert!(unique.contains(&id), "{id:#x} missing");
    }
}

#[test]
fn property_lookup_matches_names_case_insensitively() {
    let hex = TopologyType::lookup_by_properties(&props(&[("TopologyType", "hexahedron")]))
        .expect("hexahedron");
    assert!(Arc::ptr_eq(&hex, &TopologyType::hexahedron()));

    let legacy = TopologyType::lookup_by_properties(&props(&[("Type", "Wedge_15")]))
        .expect("legacy key");
    assert_eq!(legacy.id(), ids::WEDGE_15);

    let line = TopologyType::lookup_by_properties(&props(&[
        ("TopologyType", "Polyline"),
        ("NodesPerElement", "4"),
    ]))
    .expect("polyline");
    assert_eq!(line.nodes_per_element(), 4);
}

#[test]
fn property_lookup_rejects_unknown_names() {
    for pairs in [vec![("TopologyType", "Octahedron")], vec![]] {
        assert!(matches!(
            TopologyType::lookup_by_properties(&props(&pairs)),
            Err(XdmfError::UnknownType { family: "TopologyType", .. })
        ));
    }
}

#[test]
fn property_lookup_rejects_bad_node_counts() {
    for pairs in [
        vec![("TopologyType", "Polygon")],
        vec![("TopologyType", "Polygon"), ("NodesPerElement", "many")],
        vec![("TopologyType", "Polyline"), ("NodesPerElement", "-2")],
    ] {
        match TopologyType::lookup_by_properties(&props(&pairs)) {
            Err(XdmfError::Reconstruction { tag, property, .. }) => {
                assert_eq!(tag, "Topology");
                assert_eq!(property.as_deref(), Some("NodesPerElement"));
            }
            other => panic!("expected reconstruction error, got {other:?}"),
        }
    }
}

#[test]
fn written_properties_resolve_back_to_equal_descriptors() {
    for id in TopologyType::registered_ids() {
        let descriptor = TopologyType::lookup_by_id(id).expect("registered");
        let mut map = PropertyMap::new();
        descriptor.collect_properties(&mut map);
        let resolved = TopologyType::lookup_by_properties(&map).expect("resolves");
        assert_eq!(resolved, descriptor);
    }
}

proptest! {
    #[test]
    fn lookup_is_total_over_registered_ids(index in 0usize..64) {
        let registered: Vec<u32> = TopologyType::registered_ids().collect();
        let id = registered[index % registered.len()];
        let descriptor = TopologyType::lookup_by_id(id).expect("registered id resolves");
        prop_assert_eq!(descriptor.id(), id);
        let again = TopologyType::lookup_by_id(id).expect("registered id resolves");
        prop_assert!(Arc::ptr_eq(&descriptor, &again));
    }

    #[test]
    fn unregistered_ids_fail(id in any::<u32>()) {
        let registered: HashSet<u32> = TopologyType::registered_ids().collect();
        prop_assume!(!registered.contains(&id));
        let is_unknown_type = matches!(
            TopologyType::lookup_by_id(id),
            Err(XdmfError::UnknownType { .. })
        );
        prop_assert!(is_unknown_type);
    }

    #[test]
    fn polygon_node_count_survives_properties(nodes in 1u32..1000) {
        let polygon = TopologyType::polygon(nodes);
        let mut map = PropertyMap::new();
        polygon.collect_properties(&mut map);
        let resolved = TopologyType::lookup_by_properties(&map).expect("resolves");
        prop_assert_eq!(resolved.nodes_per_element(), nodes);
        prop_assert_eq!(resolved.id(), 0x3);
    }
}
