use std::sync::Arc;

use xdmf_graph::graph::visitor::TagCollector;
use xdmf_graph::prelude::*;

fn coordinates() -> Arc<dyn HeavyDataHandle> {
    Arc::new(InMemoryHandle::from_values(
        "mesh.h5:/coords",
        &[0.0f64, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    ))
}

fn sample_items(handle: &Arc<dyn HeavyDataHandle>) -> Vec<ItemRef> {
    let mut info = Information::new("units", "meters");
    info.information_mut()
        .insert(Arc::new(Information::new("nested", "yes")));

    let mut data_item = DataItem::new().with_name("xyz").bound_to(handle);
    data_item.set_format(DataFormat::Hdf);
    data_item.set_dimensions(vec![3, 3]);

    let mut topology = Topology::new(TopologyType::polygon(5));
    topology.set_number_of_elements(1);

    let attribute = Attribute::new("pressure", AttributeType::Scalar, AttributeCenter::Cell)
        .with_data_item(DataItem::new().with_name("p"));
    let mut set = Set::new("inlet", SetType::Face);
    set.attributes_mut().insert(Arc::new(Attribute::new(
        "flux",
        AttributeType::Vector,
        AttributeCenter::Face,
    )));

    let mut grid = Grid::new("block");
    grid.set_geometry(Geometry::new(GeometryType::Xyz).with_data_item(data_item.clone()));
    grid.set_topology(topology.clone());
    grid.set_time(Time::new(0.25));

    let mut collection = GridCollection::new("series", Some(CollectionType::Temporal));
    collection.grids_mut().insert(Arc::new(grid.clone()));

    vec![
        ItemRef::from(info),
        ItemRef::from(data_item),
        ItemRef::from(Time::new(1.5e-3)),
        ItemRef::from(Geometry::new(GeometryType::OriginDxDyDz)),
        ItemRef::from(topology),
        ItemRef::from(attribute),
        ItemRef::from(set),
        ItemRef::from(Map::new().with_name("halo")),
        ItemRef::from(grid),
        ItemRef::from(collection),
        ItemRef::from(Domain::new().with_name("root")),
    ]
}

#[test]
fn every_item_type_round_trips_through_element_trees() {
    let handle = coordinates();
    let reader = Reader::new();
    for item in sample_items(&handle) {
        let element = ElementWriter::new(WriterConfig::default())
            .write(&item)
            .expect("write element");
        let read = reader.read(&element).expect("read element");
        assert_eq!(read.tag(), item.tag(), "tag of {}", item.tag());
        assert_eq!(read.properties(), item.properties(), "properties of {}", item.tag());
        assert_eq!(
            TagCollector::collect(&read).expect("walk read"),
            TagCollector::collect(&item).expect("walk original"),
            "child structure of {}",
            item.tag()
        );
    }
}

#[test]
fn every_item_type_round_trips_through_xml() {
    let handle = coordinates();
    let items = sample_items(&handle);

    let mut output = Vec::new();
    XmlWriter::default()
        .write(&mut output, &items)
        .expect("write xml");
    let read = XmlReader::default()
        .read(output.as_slice())
        .expect("read xml");

    assert_eq!(read.len(), items.len());
    for (original, round_tripped) in items.iter().zip(&read) {
        assert_eq!(round_tripped.tag(), original.tag());
        assert_eq!(round_tripped.properties(), original.properties());
    }
}

#[test]
fn specialized_variants_survive_the_grid_dispatch() {
    let handle = coordinates();
    let items = sample_items(&handle);
    let xml = XmlWriter::default().write_string(&items).expect("write");
    let read = XmlReader::default().read_str(&xml).expect("read");

    assert!(read[8].as_grid().is_some(), "uniform grid stays a Grid");
    let collection = read[9].as_grid_collection().expect("collection");
    assert_eq!(collection.collection_type(), Some(CollectionType::Temporal));
    assert_eq!(collection.grids().len(), 1);

    let topology = read[4].as_topology().expect("topology");
    assert_eq!(topology.topology_type().nodes_per_element(), 5);
    assert_eq!(topology.topology_type().id(), 0x3);
}

#[test]
fn data_item_text_and_scalar_type_are_kept_without_a_resolver() {
    let handle = coordinates();
    let item = ItemRef::from(DataItem::new().bound_to(&handle));
    let element = ElementWriter::new(WriterConfig::default())
        .write(&item)
        .expect("write");
    assert_eq!(element.text.as_deref(), Some("mesh.h5:/coords"));

    let read = Reader::new().read(&element).expect("read");
    let data_item = read.as_data_item().expect("data item");
    assert_eq!(data_item.content().as_deref(), Some("mesh.h5:/coords"));
    assert_eq!(data_item.scalar_type(), Some(ScalarType::F64));
    assert!(!data_item.buffer().is_bound());
}

#[test]
fn writer_emits_the_document_root_and_version() {
    let xml = XmlWriter::new(WriterConfig::default().with_version("2.0"))
        .write_string(&[ItemRef::from(Domain::new())])
        .expect("write");
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<Xdmf Version=\"2.0\">"));
    assert!(xml.contains("<Domain/>"));
}

#[test]
fn absent_optional_keys_stay_absent() {
    let xml = r#"<Xdmf><Set SetType="Node"/><Information Key="k"/></Xdmf>"#;
    let read = XmlReader::default().read_str(xml).expect("read");

    let set = read[0].as_set().expect("set");
    assert!(!set.has_name());
    assert!(!read[0].properties().contains_key("Name"));
    let info = read[1].as_information().expect("information");
    assert_eq!(info.value(), None);
    assert!(!read[1].properties().contains_key("Value"));

    let written = XmlWriter::default().write_string(&read).expect("write");
    assert!(!written.contains("Name="), "{written}");
    assert!(!written.contains("Value="), "{written}");
}

#[test]
fn data_item_content_is_kept_in_trimmed_form() {
    let mut data_item = DataItem::new();
    data_item.set_content("  padded \n");
    assert_eq!(data_item.content().as_deref(), Some("padded"));

    let xml = XmlWriter::default()
        .write_string(&[ItemRef::from(data_item)])
        .expect("write");
    let read = XmlReader::default().read_str(&xml).expect("read");
    let back = read[0].as_data_item().expect("data item");
    assert_eq!(back.content().as_deref(), Some("padded"));
}
