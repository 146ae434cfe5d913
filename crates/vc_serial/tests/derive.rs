use std::collections::BTreeMap;

use vc_serial::SerialError;
use vc_serial::checksum::Checksum;
use vc_serial::derive::Serializable;
use vc_serial::dynamics::FactoryRegistry;
use vc_serial::info::{self, Category, MemberKind, Reflected, Signature};

#[derive(Serializable, Default, Debug, PartialEq)]
struct Point {
    x: f32,
    y: f32,
}

#[derive(Serializable, Default, Debug, PartialEq)]
struct Renamed {
    x: f32,
    z: f32,
}

#[derive(Serializable, Default, Debug, PartialEq)]
struct Widened {
    x: f64,
    y: f32,
}

#[derive(Serializable, Default, Debug, PartialEq)]
struct Polyline {
    name: String,
    points: Vec<Point>,
    tags: BTreeMap<String, u32>,
}

#[derive(Serializable, Default, Debug, PartialEq)]
struct Cache {
    key: String,
    #[serial(skip)]
    hits: u32,
}

#[derive(Serializable, Default, Debug, PartialEq)]
#[serial(accessor(name = "label", get = label, set = set_label, ty = String))]
struct Button {
    id: u32,
    #[serial(skip)]
    label: Box<str>,
}

impl Button {
    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: String) {
        self.label = label.into();
    }
}

#[derive(Serializable, Default, Debug, PartialEq)]
struct Pair<A, B> {
    first: A,
    second: B,
}

#[derive(Serializable, Default, Debug, PartialEq, Clone, Copy)]
enum Mode {
    #[default]
    Idle,
    Running = 5,
    Stopped,
}

#[derive(Serializable, Default, Debug, PartialEq)]
struct Machine {
    mode: Mode,
    r#type: u8,
}

#[derive(Serializable, Default, Debug, PartialEq)]
struct Marker;

#[derive(Serializable, Default, Debug, PartialEq)]
struct Grid {
    cells: Vec<Vec<f32>>,
    layers: BTreeMap<String, Vec<Vec<u8>>>,
    corner: Pair<Pair<u8, u8>, u8>,
}

fn assert_consistent<T: Reflected>() {
    let name = T::type_name();
    assert_eq!(T::NAME_CHECKSUM, Checksum::of(name), "{name}");
    assert_eq!(T::CHECKSUM, Checksum::of(&info::shape_string::<T>()), "{name}");
    assert_eq!(T::shape().checksum(), T::CHECKSUM, "{name}");
}

fn round_trip<T: vc_serial::value::Serial + Default>(value: &T) -> T {
    let registry = FactoryRegistry::new();
    let bytes = vc_serial::to_bytes(value).unwrap();
    vc_serial::from_bytes(&bytes, &registry).unwrap()
}

#[test]
fn point_shape() {
    assert_eq!(Point::type_name(), "Point");
    assert_eq!(Point::CATEGORY, Category::Aggregate);
    assert_eq!(info::shape_string::<Point>(), "f32 x; f32 y; ");
    assert_eq!(Point::CHECKSUM, 0x4D09_4F2C_u32);
    assert_eq!(Point::CHECKSUM, Checksum::of("f32 x; f32 y; "));

    let shape = Point::shape();
    assert_eq!(shape.checksum(), Point::CHECKSUM);
    assert_eq!(shape.members().len(), 2);
    assert_eq!(shape.member("y").unwrap().type_name(), "f32");
    assert!(shape.member("z").is_none());
}

#[test]
fn point_wire_layout() {
    let bytes = vc_serial::to_bytes(&Point { x: 1.0, y: 1.0 }).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&0x4D09_4F2C_u32.to_le_bytes());
    expected.extend_from_slice(&1.0_f32.to_le_bytes());
    expected.extend_from_slice(&1.0_f32.to_le_bytes());
    assert_eq!(bytes, expected);

    assert_eq!(round_trip(&Point { x: 1.0, y: 1.0 }), Point { x: 1.0, y: 1.0 });
}

#[test]
fn nested_aggregates() {
    assert_eq!(
        info::shape_string::<Polyline>(),
        "String name; Vec<Point> points; BTreeMap<String, u32> tags; ",
    );

    let line = Polyline {
        name: "route".into(),
        points: vec![Point { x: 0.0, y: 0.5 }, Point { x: -3.0, y: 8.25 }],
        tags: BTreeMap::from([("a".into(), 1), ("b".into(), 2)]),
    };
    assert_eq!(round_trip(&line), line);
}

#[test]
fn renamed_member_is_rejected() {
    assert_ne!(Point::CHECKSUM, Renamed::CHECKSUM);
    assert_ne!(Point::CHECKSUM, Widened::CHECKSUM);

    let registry = FactoryRegistry::new();
    let bytes = vc_serial::to_bytes(&Point { x: 1.0, y: 2.0 }).unwrap();

    let err = vc_serial::from_bytes::<Renamed>(&bytes, &registry).unwrap_err();
    match err {
        SerialError::ChecksumMismatch {
            type_name,
            expected,
            found,
        } => {
            assert_eq!(type_name, "Renamed");
            assert_eq!(expected, Renamed::CHECKSUM);
            assert_eq!(found, Point::CHECKSUM);
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = vc_serial::from_bytes::<Widened>(&bytes, &registry).unwrap_err();
    assert!(matches!(err, SerialError::ChecksumMismatch { .. }));
}

#[test]
fn skipped_fields() {
    assert_eq!(info::shape_string::<Cache>(), "String key; ");

    let cache = Cache {
        key: "users".into(),
        hits: 17,
    };
    assert_eq!(
        round_trip(&cache),
        Cache {
            key: "users".into(),
            hits: 0,
        }
    );
}

#[test]
fn accessor_members() {
    assert_eq!(info::shape_string::<Button>(), "u32 id; String label; ");

    let shape = Button::shape();
    assert_eq!(shape.member("id").unwrap().kind(), MemberKind::Field);
    assert_eq!(shape.member("label").unwrap().kind(), MemberKind::Accessor);

    let button = Button {
        id: 7,
        label: "ok".into(),
    };
    assert_eq!(round_trip(&button), button);
}

#[test]
fn generic_names() {
    type Entry = Pair<u8, String>;

    assert_eq!(Entry::type_name(), "Pair<u8, String>");
    assert_eq!(Entry::NAME_CHECKSUM, Checksum::of("Pair<u8, String>"));
    assert_eq!(info::shape_string::<Entry>(), "u8 first; String second; ");
    assert_eq!(
        Pair::<Vec<u8>, Point>::type_name(),
        "Pair<Vec<u8>, Point>"
    );
    assert_ne!(Entry::CHECKSUM, Pair::<u16, String>::CHECKSUM);

    let entry = Entry {
        first: 3,
        second: "three".into(),
    };
    assert_eq!(round_trip(&entry), entry);
}

#[test]
fn enums() {
    assert_eq!(Mode::type_name(), "Mode");
    assert_eq!(Mode::CATEGORY, Category::Enum);
    assert_eq!(info::shape_string::<Machine>(), "Mode mode; u8 type; ");

    assert_eq!(vc_serial::to_bytes(&Mode::Stopped).unwrap(), 6_i32.to_le_bytes());

    let machine = Machine {
        mode: Mode::Running,
        r#type: 2,
    };
    assert_eq!(round_trip(&machine), machine);

    let registry = FactoryRegistry::new();
    let err = vc_serial::from_bytes::<Mode>(&3_i32.to_le_bytes(), &registry).unwrap_err();
    assert!(matches!(err, SerialError::MalformedData { .. }));
}

#[test]
fn unit_struct() {
    assert_eq!(info::shape_string::<Marker>(), "");
    assert_eq!(Marker::CHECKSUM, Checksum::EMPTY);
    assert_eq!(vc_serial::to_bytes(&Marker).unwrap(), [0, 0, 0, 0]);
    assert_eq!(round_trip(&Marker), Marker);
}

#[test]
fn nested_generics() {
    assert_eq!(
        info::shape_string::<Grid>(),
        "Vec<Vec<f32>> cells; BTreeMap<String, Vec<Vec<u8>>> layers; \
         Pair<Pair<u8, u8>, u8> corner; ",
    );

    let grid = Grid {
        cells: vec![vec![1.0, 2.5], Vec::new(), vec![-4.0]],
        layers: BTreeMap::from([("base".into(), vec![vec![1, 2], vec![3]])]),
        corner: Pair {
            first: Pair {
                first: 1,
                second: 2,
            },
            second: 3,
        },
    };
    assert_eq!(round_trip(&grid), grid);
}

#[test]
fn checksum_matches_shape_string() {
    assert_consistent::<Point>();
    assert_consistent::<Renamed>();
    assert_consistent::<Polyline>();
    assert_consistent::<Cache>();
    assert_consistent::<Button>();
    assert_consistent::<Machine>();
    assert_consistent::<Marker>();
    assert_consistent::<Grid>();
    assert_consistent::<Pair<u8, String>>();
    assert_consistent::<Pair<Pair<u8, u8>, u8>>();
    assert_consistent::<Pair<Vec<Vec<u8>>, BTreeMap<String, Vec<Vec<u8>>>>>();
}
