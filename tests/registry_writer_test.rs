use regjson::*;

fn sample_tree() -> RegistryKey {
    let mut root = RegistryKey::create_root();
    let vendor = root.create_key_recursive("HKEY_CURRENT_USER\\Software\\Vendor");
    vendor.set_value(RegistryValue::new("b", RegistryValueData::Dword(1)));
    vendor.set_value(RegistryValue::new("", RegistryValueData::String("def".into())));
    vendor.set_value(RegistryValue::new("a", RegistryValueData::Qword(2)));
    root
}

#[test]
fn writes_header_blocks_and_trailing_blank_line() {
    let text = RegistryWriter::new().write_to_string(&sample_tree(), &mut NullSink);
    let expected = concat!(
        "Windows Registry Editor Version 5.00\n",
        "\n",
        "[HKEY_CURRENT_USER]\n",
        "\n",
        "[HKEY_CURRENT_USER\\Software]\n",
        "\n",
        "[HKEY_CURRENT_USER\\Software\\Vendor]\n",
        "@=\"def\"\n",
        "\"b\"=dword:00000001\n",
        "\"a\"=hex(b):02,00,00,00,00,00,00,00\n",
        "\n",
    );
    assert_eq!(text, expected);
}

#[test]
fn empty_tree_is_just_the_header() {
    let lines = RegistryWriter::new().write_lines(&RegistryKey::create_root(), &mut NullSink);
    assert_eq!(lines, [REG_HEADER, "", ""]);
}

#[test]
fn bytes_start_with_bom_and_are_utf16le() {
    let bytes = RegistryWriter::new().write_to_bytes(&sample_tree(), &mut NullSink);
    assert_eq!(&bytes[..6], &[0xff, 0xfe, b'W', 0, b'i', 0]);
    assert_eq!(bytes.len() % 2, 0);
    let text = RegistryWriter::new().write_to_string(&sample_tree(), &mut NullSink);
    assert_eq!(decode_document(&bytes), text);
}

#[test]
fn children_are_written_depth_first_in_insertion_order() {
    let mut root = RegistryKey::create_root();
    root.create_key_recursive("HKEY_LOCAL_MACHINE\\Zeta\\Inner");
    root.create_key_recursive("HKEY_LOCAL_MACHINE\\Alpha");
    let lines = RegistryWriter::new().write_lines(&root, &mut NullSink);
    let headers: Vec<&str> = lines
        .iter()
        .filter(|l| l.starts_with('['))
        .map(String::as_str)
        .collect();
    assert_eq!(
        headers,
        [
            "[HKEY_LOCAL_MACHINE]",
            "[HKEY_LOCAL_MACHINE\\Zeta]",
            "[HKEY_LOCAL_MACHINE\\Zeta\\Inner]",
            "[HKEY_LOCAL_MACHINE\\Alpha]",
        ]
    );
}

#[test]
fn verbose_write_reports_keys_before_their_values() {
    let mut events: Vec<ConversionEvent> = Vec::new();
    RegistryWriter::with_options(CodecOptions { verbose: true }).write_lines(&sample_tree(), &mut events);
    let summary: Vec<String> = events
        .iter()
        .map(|e| match e {
            ConversionEvent::KeyFound { path } => format!("key {path}"),
            ConversionEvent::ValueFound { name, .. } => format!("value {name}"),
            ConversionEvent::Warning(w) => format!("warning {w}"),
        })
        .collect();
    assert_eq!(
        summary,
        [
            "key HKEY_CURRENT_USER",
            "key HKEY_CURRENT_USER\\Software",
            "key HKEY_CURRENT_USER\\Software\\Vendor",
            "value ",
            "value b",
            "value a",
        ]
    );

    let mut quiet: Vec<ConversionEvent> = Vec::new();
    RegistryWriter::new().write_lines(&sample_tree(), &mut quiet);
    assert!(quiet.is_empty());
}

#[test]
fn written_text_parses_back_to_the_same_tree() {
    let tree = sample_tree();
    let bytes = RegistryWriter::new().write_to_bytes(&tree, &mut NullSink);
    let loaded = RegistryParser::new()
        .load_from_bytes(&bytes, &mut NullSink)
        .expect("reparse");
    assert!(loaded.warnings.is_empty());

    let original = tree.find_key("HKEY_CURRENT_USER\\Software\\Vendor").unwrap();
    let reparsed = loaded
        .root_key
        .find_key("HKEY_CURRENT_USER\\Software\\Vendor")
        .unwrap();
    for value in original.values() {
        assert_eq!(reparsed.get_value(&value.name), Some(value));
    }
    assert_eq!(reparsed.values().len(), original.values().len());
}
