use std::rc::Rc;
use std::sync::Arc;

use vc_serial::SerialError;
use vc_serial::checksum::Checksum;
use vc_serial::derive::Serializable;
use vc_serial::dynamics::{DynamicClass, DynamicObject, FactoryRegistry, Handle, downcast};
use vc_serial::info::{self, Reflected, Signature};

trait Shape: DynamicObject {
    fn area(&self) -> f32;
}

#[derive(Serializable, Default, Debug, PartialEq)]
#[serial(dynamic, class_name = "geo::Circle", bases(Shape))]
struct Circle {
    radius: f32,
}

impl Shape for Circle {
    fn area(&self) -> f32 {
        3.0 * self.radius * self.radius
    }
}

#[derive(Serializable, Default, Debug, PartialEq)]
#[serial(dynamic, class_name = "geo::Rect", bases(Shape))]
struct Rect {
    width: f32,
    height: f32,
}

impl Shape for Rect {
    fn area(&self) -> f32 {
        self.width * self.height
    }
}

#[derive(Serializable, Default, Debug, PartialEq)]
#[serial(dynamic)]
struct Label {
    text: String,
}

#[derive(Serializable, Default)]
struct Scene {
    main: Option<Box<dyn Shape>>,
    layers: Vec<Option<Arc<dyn Shape>>>,
    backup: Option<Rc<dyn Shape>>,
    note: Handle<dyn DynamicObject>,
}

fn registry() -> FactoryRegistry {
    let mut registry = FactoryRegistry::new();
    registry.register::<Circle>();
    registry.register::<Rect>();
    registry.register::<Label>();
    registry
}

fn class_of(shape: &dyn Shape) -> &'static str {
    shape.class_name()
}

#[test]
fn class_names() {
    assert_eq!(Circle::CLASS_NAME, "geo::Circle");
    assert_eq!(Label::CLASS_NAME, "Label");
    assert_eq!(Circle { radius: 1.0 }.class_checksum(), Circle::CHECKSUM);
    assert_eq!(
        info::shape_string::<Scene>(),
        "<unknown> main; Vec<<unknown>> layers; <unknown> backup; <unknown> note; ",
    );
    assert_eq!(<Option<Box<dyn Shape>>>::type_name(), info::UNKNOWN_TYPE_NAME);

    for (checksum, shape) in [
        (Scene::CHECKSUM, info::shape_string::<Scene>()),
        (Circle::CHECKSUM, info::shape_string::<Circle>()),
        (Rect::CHECKSUM, info::shape_string::<Rect>()),
        (Label::CHECKSUM, info::shape_string::<Label>()),
    ] {
        assert_eq!(checksum, Checksum::of(&shape), "{shape}");
    }
    assert_eq!(Scene::NAME_CHECKSUM, Checksum::of(Scene::type_name()));
}

#[test]
fn pointer_wire_layout() {
    let slot: Option<Box<dyn Shape>> = Some(Box::new(Circle { radius: 2.0 }));
    let bytes = vc_serial::to_bytes(&slot).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&12_u64.to_le_bytes());
    expected.extend_from_slice(b"geo::Circle\0");
    expected.extend_from_slice(&Circle::CHECKSUM.value().to_le_bytes());
    expected.extend_from_slice(&2.0_f32.to_le_bytes());
    assert_eq!(bytes, expected);

    let empty: Option<Box<dyn Shape>> = None;
    assert_eq!(vc_serial::to_bytes(&empty).unwrap(), [1, 0, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn concrete_type_survives() {
    let scene = Scene {
        main: Some(Box::new(Rect {
            width: 2.0,
            height: 4.5,
        })),
        layers: vec![
            Some(Arc::new(Circle { radius: 1.0 })),
            None,
            Some(Arc::new(Rect {
                width: 1.0,
                height: 1.0,
            })),
        ],
        backup: Some(Rc::new(Circle { radius: 0.5 })),
        note: Handle::Shared(Arc::new(Label {
            text: "draft".into(),
        })),
    };

    let registry = registry();
    let bytes = vc_serial::to_bytes(&scene).unwrap();
    let back: Scene = vc_serial::from_bytes(&bytes, &registry).unwrap();

    let main = back.main.unwrap();
    assert_eq!(class_of(main.as_ref()), "geo::Rect");
    assert_eq!(main.area(), 9.0);

    assert_eq!(back.layers.len(), 3);
    assert_eq!(class_of(back.layers[0].as_deref().unwrap()), "geo::Circle");
    assert!(back.layers[1].is_none());
    assert_eq!(class_of(back.layers[2].as_deref().unwrap()), "geo::Rect");

    assert_eq!(back.backup.unwrap().area(), 0.75);

    let Handle::Owned(note) = back.note else {
        panic!("decoded handles are owned");
    };
    let note: Box<dyn DynamicObject> = note;
    assert_eq!(
        *downcast::<Label>(note).unwrap(),
        Label {
            text: "draft".into()
        }
    );
}

#[test]
fn null_slots() {
    let registry = FactoryRegistry::new();
    let bytes = vc_serial::to_bytes(&Scene::default()).unwrap();
    let back: Scene = vc_serial::from_bytes(&bytes, &registry).unwrap();

    assert!(back.main.is_none());
    assert!(back.layers.is_empty());
    assert!(back.backup.is_none());
    assert!(back.note.is_none());
}

#[test]
fn unregistered_class() {
    let slot: Option<Box<dyn Shape>> = Some(Box::new(Circle { radius: 2.0 }));
    let bytes = vc_serial::to_bytes(&slot).unwrap();

    let mut registry = FactoryRegistry::new();
    registry.register::<Rect>();

    let Err(err) = vc_serial::from_bytes::<Option<Box<dyn Shape>>>(&bytes, &registry) else {
        panic!("`geo::Circle` is not registered");
    };
    assert!(matches!(
        err,
        SerialError::InstantiationFailure { ref class_name, .. } if class_name == "geo::Circle"
    ));
}

#[test]
fn incompatible_pointee() {
    let slot: Option<Box<dyn DynamicObject>> = Some(Box::new(Label {
        text: "not a shape".into(),
    }));
    let bytes = vc_serial::to_bytes(&slot).unwrap();

    let Err(err) = vc_serial::from_bytes::<Option<Box<dyn Shape>>>(&bytes, &registry()) else {
        panic!("`Label` cannot be viewed as a shape");
    };
    assert!(matches!(
        err,
        SerialError::InstantiationFailure { ref class_name, .. } if class_name == "Label"
    ));

    let back: Option<Box<dyn DynamicObject>> = vc_serial::from_bytes(&bytes, &registry()).unwrap();
    assert_eq!(back.unwrap().class_name(), "Label");
}

#[test]
fn class_checksum_mismatch() {
    fn make_rect() -> Box<dyn DynamicObject> {
        Box::new(Rect::default())
    }

    let slot: Option<Box<dyn Shape>> = Some(Box::new(Circle { radius: 2.0 }));
    let bytes = vc_serial::to_bytes(&slot).unwrap();

    let mut registry = registry();
    registry.register_factory("geo::Circle", make_rect);

    let Err(err) = vc_serial::from_bytes::<Option<Box<dyn Shape>>>(&bytes, &registry) else {
        panic!("the stored class does not match the registered one");
    };
    match err {
        SerialError::ChecksumMismatch {
            expected, found, ..
        } => {
            assert_eq!(expected, Rect::CHECKSUM);
            assert_eq!(found, Circle::CHECKSUM);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[cfg(feature = "auto_register")]
#[test]
fn global_registry() {
    let global = FactoryRegistry::global();
    assert!(global.contains("geo::Circle"));
    assert!(global.contains("geo::Rect"));
    assert!(global.contains("Label"));

    let slot: Option<Box<dyn Shape>> = Some(Box::new(Rect {
        width: 3.0,
        height: 2.0,
    }));
    let bytes = vc_serial::to_bytes(&slot).unwrap();
    let back: Option<Box<dyn Shape>> = vc_serial::from_bytes(&bytes, global).unwrap();
    assert_eq!(back.unwrap().area(), 6.0);
}
