use std::sync::Arc;

use xdmf_graph::graph::item::visit_all;
use xdmf_graph::io::xml::parse_element;
use xdmf_graph::prelude::*;

fn parse(text: &str) -> Element {
    parse_element(text).expect("well-formed xml")
}

#[test]
fn references_resolve_to_one_shared_item() {
    let document = parse(
        r#"<Xdmf Version="3.0">
          <Domain>
            <Grid Name="left">
              <Geometry GeometryType="XYZ" Id="shared-geometry"/>
              <Topology TopologyType="Tetrahedron"/>
            </Grid>
            <Grid Name="right">
              <Geometry Reference="shared-geometry"/>
              <Topology TopologyType="Tetrahedron"/>
            </Grid>
          </Domain>
        </Xdmf>"#,
    );
    let items = Reader::new().read_document(&document).expect("read");
    let domain = items[0].as_domain().expect("domain");
    let left = domain.grids().get_by_name("left").expect("left");
    let right = domain.grids().get_by_name("right").expect("right");
    let left_geometry = left.geometry().expect("left geometry");
    let right_geometry = right.geometry().expect("right geometry");
    assert!(Arc::ptr_eq(left_geometry, right_geometry));
    // Topologies without Id stay separate even though they are equal.
    assert!(!Arc::ptr_eq(
        left.topology().expect("topology"),
        right.topology().expect("topology")
    ));
}

#[test]
fn shared_items_survive_a_write_read_cycle() {
    let geometry = Arc::new(Geometry::new(GeometryType::Xy));
    let mut first = Grid::new("a");
    first.set_geometry(Arc::clone(&geometry));
    first.set_topology(Topology::new(TopologyType::triangle()));
    let mut second = Grid::new("b");
    second.set_geometry(geometry);
    second.set_topology(Topology::new(TopologyType::triangle()));
    let domain = Domain::new().with_grid(first).with_grid(second);

    let xml = XmlWriter::default()
        .write_string(&[ItemRef::from(domain)])
        .expect("write");
    assert_eq!(xml.matches("Reference=").count(), 1);

    let items = XmlReader::default().read_str(&xml).expect("read");
    let domain = items[0].as_domain().expect("domain");
    let a = domain.grids().get(0).expect("a").geometry().expect("geometry");
    let b = domain.grids().get(1).expect("b").geometry().expect("geometry");
    assert!(Arc::ptr_eq(a, b));
}

#[test]
fn unresolved_reference_is_a_reconstruction_error() {
    let document = parse(
        r#"<Xdmf><Domain><Grid><Geometry Reference="nowhere"/></Grid></Domain></Xdmf>"#,
    );
    match Reader::new().read_document(&document) {
        Err(XdmfError::Reconstruction { path, property, reason, .. }) => {
            assert_eq!(path, "Xdmf/Domain[0]/Grid[0]/Geometry[0]");
            assert_eq!(property.as_deref(), Some("Reference"));
            assert!(reason.contains("nowhere"));
        }
        other => panic!("expected reconstruction error, got {other:?}"),
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let document = parse(
        r#"<Xdmf>
          <Information Key="first" Id="dup"/>
          <Information Key="second" Id="dup"/>
        </Xdmf>"#,
    );
    match Reader::new().read_document(&document) {
        Err(XdmfError::Reconstruction { path, reason, .. }) => {
            assert_eq!(path, "Xdmf/Information[1]");
            assert!(reason.contains("duplicate"));
        }
        other => panic!("expected reconstruction error, got {other:?}"),
    }
}

#[test]
fn references_must_name_an_item_of_the_same_tag() {
    let document = parse(
        r#"<Xdmf>
          <Time Value="1" Id="t"/>
          <Geometry Reference="t"/>
        </Xdmf>"#,
    );
    assert!(matches!(
        Reader::new().read_document(&document),
        Err(XdmfError::Reconstruction { .. })
    ));
}

#[test]
fn unknown_tags_fail_by_default() {
    let document = parse(r#"<Xdmf><Domain><Widget/></Domain></Xdmf>"#);
    match Reader::new().read_document(&document) {
        Err(XdmfError::Reconstruction { tag, path, .. }) => {
            assert_eq!(tag, "Widget");
            assert_eq!(path, "Xdmf/Domain[0]/Widget[0]");
        }
        other => panic!("expected reconstruction error, got {other:?}"),
    }
}

#[test]
fn unknown_tags_can_be_skipped() {
    let document = parse(
        r#"<Xdmf>
          <Domain>
            <Widget><Grid Name="hidden"/></Widget>
            <Grid Name="visible">
              <Geometry/>
              <Topology TopologyType="Hexahedron"/>
            </Grid>
          </Domain>
        </Xdmf>"#,
    );
    let reader = Reader::new()
        .with_config(ReaderConfig::default().with_unknown_tags(UnknownTagPolicy::Skip));
    let items = reader.read_document(&document).expect("siblings still read");
    let domain = items[0].as_domain().expect("domain");
    assert_eq!(domain.grids().len(), 1);
    assert!(domain.grids().get_by_name("visible").is_some());
}

#[test]
fn document_root_must_be_xdmf() {
    let document = parse(r#"<Domain/>"#);
    assert!(matches!(
        Reader::new().read_document(&document),
        Err(XdmfError::Reconstruction { .. })
    ));
}

#[test]
fn malformed_and_missing_properties_fail() {
    let cases = [
        r#"<Xdmf><Time/></Xdmf>"#,
        r#"<Xdmf><Information Value="no key"/></Xdmf>"#,
        r#"<Xdmf><Topology NumberOfElements="3"/></Xdmf>"#,
        r#"<Xdmf><Topology TopologyType="Triangle" NumberOfElements="-3"/></Xdmf>"#,
        r#"<Xdmf><Set Name="s"/></Xdmf>"#,
        r#"<Xdmf><Attribute AttributeType="Scalar"/></Xdmf>"#,
        r#"<Xdmf><DataItem Dimensions="3 x"/></Xdmf>"#,
        r#"<Xdmf><DataItem NumberType="Float" Precision="3"/></Xdmf>"#,
        r#"<Xdmf><Topology TopologyType="Polygon" NodesPerElement="five"/></Xdmf>"#,
    ];
    for case in cases {
        let result = Reader::new().read_document(&parse(case));
        assert!(
            matches!(result, Err(XdmfError::Reconstruction { .. })),
            "{case} gave {result:?}"
        );
    }
}

#[test]
fn malformed_node_count_reports_its_location() {
    let document = parse(
        r#"<Xdmf><Domain><Grid><Topology TopologyType="Polygon" NodesPerElement="five"/></Grid></Domain></Xdmf>"#,
    );
    match Reader::new().read_document(&document) {
        Err(XdmfError::Reconstruction { tag, path, property, reason }) => {
            assert_eq!(tag, "Topology");
            assert_eq!(path, "Xdmf/Domain[0]/Grid[0]/Topology[0]");
            assert_eq!(property.as_deref(), Some("NodesPerElement"));
            assert!(reason.contains("five"));
        }
        other => panic!("expected reconstruction error, got {other:?}"),
    }
}

#[test]
fn unknown_descriptor_names_fail_with_unknown_type() {
    let cases = [
        r#"<Xdmf><Topology TopologyType="Octagon"/></Xdmf>"#,
        r#"<Xdmf><Geometry GeometryType="Cylindrical"/></Xdmf>"#,
        r#"<Xdmf><Attribute Name="a" Center="Vertex"/></Xdmf>"#,
        r#"<Xdmf><Set Name="s" SetType="Volume"/></Xdmf>"#,
    ];
    for case in cases {
        let result = Reader::new().read_document(&parse(case));
        assert!(
            matches!(result, Err(XdmfError::UnknownType { .. })),
            "{case} gave {result:?}"
        );
    }
}

#[test]
fn data_items_are_bound_through_the_resolver() {
    let mut store = HeavyDataStore::new();
    store.insert(Arc::new(InMemoryHandle::from_values("mesh.h5:/ids", &[7i64, 8, 9])));
    let store = Arc::new(store);
    let reader = XmlReader::new(Reader::new().with_heavy_data(store.clone()));

    let items = reader
        .read_str(
            r#"<Xdmf>
              <DataItem Format="HDF" NumberType="Int" Precision="8" Dimensions="3">
                mesh.h5:/ids
              </DataItem>
              <DataItem Format="XML">1 2 3</DataItem>
            </Xdmf>"#,
        )
        .expect("read");

    let bound = items[0].as_data_item().expect("data item");
    assert!(bound.buffer().is_bound());
    assert_eq!(bound.buffer().read_values::<i64>().expect("values"), vec![7, 8, 9]);
    assert!(matches!(
        bound.buffer().read_values::<f64>(),
        Err(XdmfError::HeavyData(_))
    ));

    let inline = items[1].as_data_item().expect("data item");
    assert!(!inline.buffer().is_bound());
    assert_eq!(inline.content().as_deref(), Some("1 2 3"));
}

#[derive(Debug, Default)]
struct Note {
    text: String,
    information: ChildCollection<Information>,
}

impl Item for Note {
    fn item_tag(&self) -> &'static str {
        Self::ITEM_TAG
    }

    fn item_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        properties.insert("Text".into(), self.text.clone());
        properties
    }

    fn information(&self) -> &ChildCollection<Information> {
        &self.information
    }

    fn traverse(&self, visitor: &mut dyn Visitor) -> Result<(), XdmfError> {
        visit_all(visitor, &self.information)
    }
}

impl ReadItem for Note {
    const ITEM_TAG: &'static str = "Note";

    fn construct(_properties: &PropertyMap) -> Result<Self, XdmfError> {
        Ok(Self::default())
    }

    fn information_mut(&mut self) -> &mut ChildCollection<Information> {
        &mut self.information
    }

    fn populate_item(
        &mut self,
        properties: &PropertyMap,
        children: &[ItemRef],
        _context: &ReaderContext,
    ) -> Result<(), XdmfError> {
        self.text = properties.get("Text").cloned().unwrap_or_default();
        xdmf_graph::graph::populate_information(&mut self.information, children);
        Ok(())
    }
}

impl From<Note> for ItemRef {
    fn from(note: Note) -> Self {
        ItemRef::Custom(Arc::new(note))
    }
}

#[test]
fn downstream_tags_can_be_registered() {
    let mut reader = Reader::new();
    assert!(reader.register_item::<Note>().is_none());

    let element = parse(r#"<Note Text="hello"><Information Key="lang" Value="en"/></Note>"#);
    let item = reader.read(&element).expect("read note");
    assert!(matches!(item, ItemRef::Custom(_)));
    assert_eq!(item.tag(), "Note");
    assert_eq!(item.properties()["Text"], "hello");
    assert_eq!(item.as_item().information().len(), 1);

    let written = ElementWriter::new(WriterConfig::default())
        .write(&item)
        .expect("write note");
    assert_eq!(written, element);
}

#[cfg(feature = "rayon")]
#[test]
fn documents_can_be_read_in_parallel() {
    let documents: Vec<Element> = (0..8)
        .map(|i| parse(&format!(r#"<Xdmf><Time Value="{i}" Id="t"/></Xdmf>"#)))
        .collect();
    let results = Reader::new().read_documents_par(&documents);
    assert_eq!(results.len(), 8);
    for (i, result) in results.into_iter().enumerate() {
        let items = result.expect("each document has its own context");
        assert_eq!(items[0].as_time().expect("time").value(), i as f64);
    }
}
