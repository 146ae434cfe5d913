#![cfg(feature = "json")]

use std::collections::{BTreeMap, HashSet};

use serde_json::json;
use vc_serial::SerialError;
use vc_serial::derive::Serializable;
use vc_serial::dynamics::{DynamicObject, FactoryRegistry};
use vc_serial::info::Reflected;
use vc_serial::stream::MemoryStream;

trait Node: DynamicObject {
    fn weight(&self) -> u16;
}

#[derive(Serializable, Default, Debug, PartialEq)]
#[serial(dynamic, class_name = "tree::Leaf", bases(Node))]
struct Leaf {
    weight: u16,
}

impl Node for Leaf {
    fn weight(&self) -> u16 {
        self.weight
    }
}

#[derive(Serializable, Default, Debug, PartialEq, Clone, Copy)]
enum Color {
    #[default]
    Red,
    Green,
}

#[derive(Serializable, Default)]
struct Document {
    title: String,
    color: Color,
    scores: BTreeMap<String, i64>,
    flags: HashSet<u8>,
    root: Option<Box<dyn Node>>,
}

fn registry() -> FactoryRegistry {
    let mut registry = FactoryRegistry::new();
    registry.register::<Leaf>();
    registry
}

#[test]
fn document_layout() {
    let document = Document {
        title: "notes".into(),
        color: Color::Green,
        scores: BTreeMap::from([("a".into(), -1), ("b".into(), 2)]),
        flags: HashSet::from([4]),
        root: Some(Box::new(Leaf { weight: 9 })),
    };

    let value = vc_serial::to_json(&document).unwrap();
    assert_eq!(
        value,
        json!({
            "_checksum": Document::CHECKSUM.value(),
            "title": "notes",
            "color": 1,
            "scores": [["a", -1], ["b", 2]],
            "flags": [4],
            "root": {
                "_class": "tree::Leaf",
                "_checksum": Leaf::CHECKSUM.value(),
                "weight": 9,
            },
        })
    );

    let back: Document = vc_serial::from_json(&value, &registry()).unwrap();
    assert_eq!(back.title, "notes");
    assert_eq!(back.color, Color::Green);
    assert_eq!(back.scores, document.scores);
    assert_eq!(back.flags, document.flags);
    assert_eq!(back.root.unwrap().weight(), 9);
}

#[test]
fn null_pointer() {
    let value = vc_serial::to_json(&Document::default()).unwrap();
    assert_eq!(value["root"], json!(null));

    let back: Document = vc_serial::from_json(&value, &registry()).unwrap();
    assert!(back.root.is_none());
}

#[test]
fn wrong_checksum() {
    let mut value = vc_serial::to_json(&Leaf { weight: 1 }).unwrap();
    value["_checksum"] = json!(0);

    let err = vc_serial::from_json::<Leaf>(&value, &registry()).unwrap_err();
    match err {
        SerialError::ChecksumMismatch {
            expected, found, ..
        } => {
            assert_eq!(expected, Leaf::CHECKSUM);
            assert_eq!(found, 0_u32);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_member() {
    let value = json!({ "_checksum": Leaf::CHECKSUM.value() });
    let err = vc_serial::from_json::<Leaf>(&value, &FactoryRegistry::new()).unwrap_err();
    assert!(matches!(err, SerialError::MalformedData { position: None, .. }));
}

#[test]
fn unknown_class() {
    let value = json!({
        "root": { "_class": "tree::Branch", "_checksum": 0 },
    });

    let mut document = Document::default();
    let registry = FactoryRegistry::new();
    let mut reader = vc_serial::json::JsonReader::new(&registry);
    let Err(err) = reader.read(&value["root"], &mut document.root) else {
        panic!("`tree::Branch` is not registered");
    };
    assert!(matches!(
        err,
        SerialError::InstantiationFailure { ref class_name, .. } if class_name == "tree::Branch"
    ));
}

#[test]
fn through_stream() {
    let mut stream = MemoryStream::new();
    let value = vc_serial::to_json(&Leaf { weight: 3 }).unwrap();
    vc_serial::json::dump_json(&mut stream, &value).unwrap();

    let parsed = vc_serial::json::parse_json(&mut stream).unwrap();
    assert_eq!(parsed, value);

    let leaf: Leaf = vc_serial::from_json(&parsed, &registry()).unwrap();
    assert_eq!(leaf, Leaf { weight: 3 });

    let mut broken = MemoryStream::from(b"{\"_checksum\": ".to_vec());
    let err = vc_serial::json::parse_json(&mut broken).unwrap_err();
    assert!(matches!(err, SerialError::MalformedData { .. }));
}
