use std::collections::{BTreeMap, VecDeque};

use proptest::prelude::*;
use vc_serial::derive::Serializable;
use vc_serial::dynamics::FactoryRegistry;
use vc_serial::stream::{InputStream, OutputStream};

#[derive(Serializable, Default, Debug, Clone, PartialEq)]
struct Record {
    id: u64,
    offset: i32,
    ratio: f64,
    active: bool,
    initial: char,
    name: String,
    samples: Vec<i16>,
    history: VecDeque<(u8, String)>,
    index: BTreeMap<String, Vec<u32>>,
    window: [u16; 3],
}

fn record() -> impl Strategy<Value = Record> {
    (
        (any::<u64>(), any::<i32>(), -1.0e9..1.0e9_f64, any::<bool>(), any::<char>()),
        ".{0,24}",
        proptest::collection::vec(any::<i16>(), 0..16),
        proptest::collection::vec_deque((any::<u8>(), "[a-z]{0,8}"), 0..8),
        proptest::collection::btree_map(
            "[a-z]{1,6}",
            proptest::collection::vec(any::<u32>(), 0..4),
            0..6,
        ),
        any::<[u16; 3]>(),
    )
        .prop_map(
            |((id, offset, ratio, active, initial), name, samples, history, index, window)| Record {
                id,
                offset,
                ratio,
                active,
                initial,
                name,
                samples,
                history,
                index,
                window,
            },
        )
}

proptest! {
    #[test]
    fn binary(record in record()) {
        let registry = FactoryRegistry::new();
        let bytes = vc_serial::to_bytes(&record).unwrap();
        let back: Record = vc_serial::from_bytes(&bytes, &registry).unwrap();
        prop_assert_eq!(back, record);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json(record in record()) {
        let registry = FactoryRegistry::new();
        let value = vc_serial::to_json(&record).unwrap();
        let back: Record = vc_serial::from_json(&value, &registry).unwrap();
        prop_assert_eq!(back, record);
    }

    #[test]
    fn truncated_input_fails(record in record(), cut in any::<prop::sample::Index>()) {
        let registry = FactoryRegistry::new();
        let bytes = vc_serial::to_bytes(&record).unwrap();
        let cut = cut.index(bytes.len());
        prop_assert!(vc_serial::from_bytes::<Record>(&bytes[..cut], &registry).is_err());
    }
}

#[test]
fn io_streams() {
    let record = Record {
        id: 1,
        name: "io".into(),
        samples: vec![-1, 0, 1],
        ..Record::default()
    };

    let mut sink = Vec::new();
    {
        let mut stream = OutputStream::new(&mut sink);
        vc_serial::binary::BinaryWriter::new(&mut stream)
            .write(&record)
            .unwrap();
        stream.finish().unwrap();
    }
    assert_eq!(sink, vc_serial::to_bytes(&record).unwrap());

    let registry = FactoryRegistry::new();
    let mut stream = InputStream::new(sink.as_slice());
    let mut back = Record::default();
    vc_serial::binary::BinaryReader::new(&mut stream, &registry)
        .read(&mut back)
        .unwrap();
    assert_eq!(back, record);
}
