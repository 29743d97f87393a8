use proptest::prelude::*;
use regjson::*;

const KEY: &str = "HKEY_CURRENT_USER\\Software\\RoundTrip";

fn parse_single_value(lines: Vec<String>) -> LoadResult {
    let mut text = vec![REG_HEADER.to_string(), String::new(), format!("[{}]", KEY)];
    text.extend(lines);
    RegistryParser::new()
        .load_from_lines(&text, &mut NullSink)
        .expect("parse")
}

fn value_data() -> impl Strategy<Value = RegistryValueData> {
    // No NUL in strings: embedded NULs are dropped on decode by design.
    let text = "[^\\x00\\r\\n]{0,60}";
    prop_oneof![
        any::<u32>().prop_map(RegistryValueData::Dword),
        any::<u64>().prop_map(RegistryValueData::Qword),
        text.prop_map(RegistryValueData::String),
        proptest::collection::vec(any::<u8>(), 0..300).prop_map(RegistryValueData::Binary),
        text.prop_map(RegistryValueData::ExpandString),
        proptest::collection::vec(text, 0..6).prop_map(RegistryValueData::MultiString),
    ]
}

proptest! {
    #[test]
    fn every_value_type_survives_encode_and_decode(
        name in "[a-zA-Z0-9 _\\\\\"=\\[\\];@-]{0,24}",
        data in value_data(),
    ) {
        let value = RegistryValue::new(name, data);
        let loaded = parse_single_value(encode_value(&value));
        prop_assert!(loaded.warnings.is_empty(), "{:?}", loaded.warnings);
        let key = loaded.root_key.find_key(KEY).unwrap();
        prop_assert_eq!(key.values().len(), 1);
        prop_assert_eq!(&key.values()[0], &value);
    }

    #[test]
    fn hex_encoded_lines_respect_wrap_width(
        bytes in proptest::collection::vec(any::<u8>(), 0..400),
    ) {
        let lines = encode_data(&RegistryValueData::Binary(bytes.clone()));
        for line in &lines[..lines.len() - 1] {
            prop_assert!(line.ends_with('\\'));
            prop_assert!(line.len() <= HEX_WRAP_WIDTH + 4);
        }
        let mut value_lines = lines.clone();
        value_lines[0] = format!("\"b\"={}", value_lines[0]);
        let loaded = parse_single_value(value_lines);
        let key = loaded.root_key.find_key(KEY).unwrap();
        prop_assert_eq!(&key.get_value("b").unwrap().data, &RegistryValueData::Binary(bytes));
    }
}

#[test]
fn embedded_nul_is_lost_for_string_lists() {
    let value = RegistryValue::new(
        "m",
        RegistryValueData::MultiString(vec!["a\0b".into(), "c".into()]),
    );
    let loaded = parse_single_value(encode_value(&value));
    let key = loaded.root_key.find_key(KEY).unwrap();
    assert_eq!(
        key.get_value("m").unwrap().data,
        RegistryValueData::MultiString(vec!["a".into(), "b".into(), "c".into()])
    );
}
