//! Minimal reader for packed lists, used to check encoder output.

use bytes::Buf;
use nvpack::wire::{LIST_HEADER_SIZE, PAIR_HEADER_SIZE};
use nvpack::{Element, ListHeader, PairHeader, ParameterMap, TypeTag, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Null,
    Bool(bool),
    Number(u64),
    String(String),
    List(Vec<(String, Decoded)>),
    BoolArray(Vec<bool>),
    NumberArray(Vec<u64>),
    StringArray(Vec<String>),
}

/// Decode a whole packed buffer into name/value pairs in wire order.
pub fn unpack(bytes: &[u8]) -> Vec<(String, Decoded)> {
    let header = ListHeader::from_bytes(bytes).expect("valid list header");
    assert_eq!(header.descriptors(), 0, "no descriptors expected");

    let mut body = &bytes[LIST_HEADER_SIZE..];
    assert_eq!(body.len() as u64, header.size(), "size field covers the payload");
    read_pairs(&mut body)
}

/// What [`unpack`] should return for `map`.
pub fn mirror(map: &ParameterMap) -> Vec<(String, Decoded)> {
    map.iter()
        .map(|node| {
            let decoded = match node.value() {
                Value::Null => Decoded::Null,
                Value::Bool(flag) => Decoded::Bool(*flag),
                Value::Number(number) => Decoded::Number(*number),
                Value::String(text) => Decoded::String(text.clone()),
                Value::Nested(child) => Decoded::List(mirror(child)),
                Value::Array(array) => {
                    let mut bools = Vec::new();
                    let mut numbers = Vec::new();
                    let mut strings = Vec::new();
                    for element in array {
                        match element {
                            Element::Bool(flag) => bools.push(*flag),
                            Element::Number(number) => numbers.push(*number),
                            Element::String(text) => strings.push(text.clone()),
                        }
                    }
                    match array.element_type() {
                        nvpack::ElementType::Bool => Decoded::BoolArray(bools),
                        nvpack::ElementType::Number => Decoded::NumberArray(numbers),
                        nvpack::ElementType::String => Decoded::StringArray(strings),
                    }
                }
            };
            (node.name().to_owned(), decoded)
        })
        .collect()
}

fn read_pairs(buf: &mut &[u8]) -> Vec<(String, Decoded)> {
    let mut pairs = Vec::new();
    while buf.has_remaining() {
        let header = PairHeader::from_bytes(buf).expect("valid pair header");
        buf.advance(PAIR_HEADER_SIZE);

        let name = read_cstr(buf, usize::from(header.name_size()));
        let data_size = usize::try_from(header.data_size()).expect("data size fits usize");
        assert!(buf.remaining() >= data_size, "payload of {name} truncated");

        let slice: &[u8] = *buf;
        let (mut data, rest) = slice.split_at(data_size);
        *buf = rest;
        let value = read_value(&header, &mut data);
        assert!(!data.has_remaining(), "payload of {name} not fully consumed");

        pairs.push((name, value));
    }
    pairs
}

fn read_value(header: &PairHeader, data: &mut &[u8]) -> Decoded {
    let items = usize::try_from(header.items()).expect("item count fits usize");
    match header.tag().expect("known type tag") {
        TypeTag::Null => Decoded::Null,
        TypeTag::Bool => Decoded::Bool(read_bool(data)),
        TypeTag::Number => Decoded::Number(data.get_u64_ne()),
        TypeTag::String => {
            let len = data.len();
            Decoded::String(read_cstr(data, len))
        }
        TypeTag::Nested => {
            let pairs = read_pairs(data);
            assert_eq!(pairs.len(), items, "nested item count");
            Decoded::List(pairs)
        }
        TypeTag::BoolArray => Decoded::BoolArray((0..items).map(|_| read_bool(data)).collect()),
        TypeTag::NumberArray => {
            Decoded::NumberArray((0..items).map(|_| data.get_u64_ne()).collect())
        }
        TypeTag::StringArray => Decoded::StringArray(
            (0..items)
                .map(|_| {
                    let len = data
                        .iter()
                        .position(|&byte| byte == 0)
                        .expect("terminated array element")
                        + 1;
                    read_cstr(data, len)
                })
                .collect(),
        ),
    }
}

fn read_bool(data: &mut &[u8]) -> bool {
    match data.get_u8() {
        0 => false,
        1 => true,
        other => panic!("invalid bool byte {other:#04x}"),
    }
}

fn read_cstr(buf: &mut &[u8], size: usize) -> String {
    assert!(size > 0 && buf.remaining() >= size, "string truncated");
    let (text, terminator) = buf[..size].split_at(size - 1);
    assert_eq!(terminator, [0], "missing terminator");
    assert!(!text.contains(&0), "interior NUL");

    let text = String::from_utf8(text.to_vec()).expect("utf-8 string");
    buf.advance(size);
    text
}
