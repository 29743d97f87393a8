use regjson::*;

#[test]
fn should_create_basic_registry_key() {
    let key = RegistryKey::create_root();
    assert!(key.subkeys().is_empty());
    assert!(key.values().is_empty());
    assert!(key.is_empty());
}

#[test]
fn should_create_and_set_string_value() {
    let mut root = RegistryKey::create_root();
    root.set_value(RegistryValue::new(
        "TestValue",
        RegistryValueData::String("Hello World".into()),
    ));
    let retrieved = root.get_value("TestValue").unwrap();
    assert_eq!(
        "Hello World",
        match retrieved.data {
            RegistryValueData::String(ref s) => s,
            _ => panic!("expected string"),
        }
    );
}

#[test]
fn set_value_replaces_existing_name_in_place() {
    let mut key = RegistryKey::new("Key");
    key.set_value(RegistryValue::new("a", RegistryValueData::Dword(1)));
    key.set_value(RegistryValue::new("b", RegistryValueData::Dword(2)));
    key.set_value(RegistryValue::new("a", RegistryValueData::Qword(3)));

    let names: Vec<&str> = key.values().iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["a", "b"]);
    assert_eq!(key.get_value("a").unwrap().data, RegistryValueData::Qword(3));
}

#[test]
fn should_create_subkeys() {
    let mut root = RegistryKey::create_root();
    let child = root.create_subkey("Child");
    assert_eq!("Child", child.name);
    assert!(root.find_key("Child").is_some());
}

#[test]
fn get_or_create_child_builds_intermediate_keys_once() {
    let mut root = RegistryKey::create_root();
    root.get_or_create_child(&["HKEY_CURRENT_USER", "Software", "Vendor"])
        .set_value(RegistryValue::new("", RegistryValueData::String("x".into())));
    root.get_or_create_child(&["HKEY_CURRENT_USER", "Software", "Other"]);

    assert_eq!(root.subkeys().len(), 1);
    let software = root.find_key("HKEY_CURRENT_USER\\Software").unwrap();
    let names: Vec<&str> = software.subkeys().iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, ["Vendor", "Other"]);

    let vendor = root.find_key("HKEY_CURRENT_USER\\Software\\Vendor").unwrap();
    assert!(vendor.default_value().is_some());
    assert!(root.find_key("HKEY_CURRENT_USER\\Missing").is_none());
}

#[test]
fn key_names_are_case_sensitive() {
    let mut root = RegistryKey::create_root();
    root.create_key_recursive("HKEY_LOCAL_MACHINE\\Foo");
    root.create_key_recursive("HKEY_LOCAL_MACHINE\\foo");
    assert_eq!(root.find_key("HKEY_LOCAL_MACHINE").unwrap().subkeys().len(), 2);
}

#[test]
fn type_names_map_both_ways() {
    for ty in [REG_SZ, REG_EXPAND_SZ, REG_BINARY, REG_DWORD, REG_MULTI_SZ, REG_QWORD] {
        let name = type_name(ty).unwrap();
        assert_eq!(type_from_name(name), Some(ty));
    }
    assert_eq!(type_from_name("REG_LINK"), None);
    assert_eq!(type_name(0), None);
}
