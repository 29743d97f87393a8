//! The JSON side of the conversion.
//!
//! A document maps root hive names to nodes shaped as
//! `{"values": {name: {"type": "REG_SZ", "data": ...}}, "keys": {name: node}}`.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use tracing::debug;

use crate::registry_error::{ConversionWarning, RegistryError};
use crate::registry_events::{CodecOptions, EventSink, Reporter};
use crate::registry_key::{join_path, RegistryKey};
use crate::registry_parser::LoadResult;
use crate::registry_value::{
    type_from_name, type_name, RegistryValue, RegistryValueData, REG_BINARY, REG_DWORD,
    REG_EXPAND_SZ, REG_MULTI_SZ, REG_QWORD, REG_SZ,
};

#[derive(Debug, Serialize, Deserialize)]
struct JsonValue {
    #[serde(rename = "type")]
    type_name: String,
    data: Value,
}

/// Builds a tree from JSON text.
///
/// Broken structure (invalid JSON, a node or value table that is not an
/// object) fails the whole load. A value with an unknown type or with data
/// that does not fit its type is reported as a warning and left out.
pub fn tree_from_json(text: &str, sink: &mut dyn EventSink) -> Result<LoadResult, RegistryError> {
    let doc: Value = serde_json::from_str(text)?;
    let hives = doc.as_object().ok_or_else(|| {
        RegistryError::InvalidFormat("top-level JSON must map root key names to keys".into())
    })?;

    // Discoveries are reported by the writer; only warnings come from here.
    let mut reporter = Reporter::new(CodecOptions::default(), sink);
    let mut root = RegistryKey::create_root();
    for (name, node) in hives {
        let hive = root.create_subkey(name);
        load_node(node, hive, name, &mut reporter)?;
    }

    debug!(hives = root.subkeys().len(), "loaded registry tree from JSON");
    Ok(LoadResult {
        root_key: root,
        warnings: reporter.into_warnings(),
    })
}

fn load_node(
    node: &Value,
    key: &mut RegistryKey,
    path: &str,
    reporter: &mut Reporter<'_>,
) -> Result<(), RegistryError> {
    let obj = node
        .as_object()
        .ok_or_else(|| RegistryError::InvalidFormat(format!("key [{}] is not an object", path)))?;

    if let Some(values) = object_field(obj, "values", path)? {
        for (name, entry) in values {
            match decode_json_value(path, name, entry) {
                Ok(data) => key.set_value(RegistryValue::new(name.as_str(), data)),
                Err(warning) => reporter.warn(warning),
            }
        }
    }

    if let Some(keys) = object_field(obj, "keys", path)? {
        for (name, child) in keys {
            let sub = key.create_subkey(name);
            load_node(child, sub, &join_path(path, name), reporter)?;
        }
    }
    Ok(())
}

fn object_field<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<Option<&'a Map<String, Value>>, RegistryError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(RegistryError::InvalidFormat(format!(
            "\"{}\" of key [{}] is not an object",
            field, path
        ))),
    }
}

fn decode_json_value(
    key: &str,
    name: &str,
    entry: &Value,
) -> Result<RegistryValueData, ConversionWarning> {
    let invalid = |reason: String| ConversionWarning::InvalidValueData {
        key: key.to_string(),
        name: name.to_string(),
        reason,
    };

    let entry: JsonValue = serde_json::from_value(entry.clone()).map_err(|e| invalid(e.to_string()))?;
    let ty = type_from_name(&entry.type_name).ok_or_else(|| ConversionWarning::UnknownValueType {
        key: key.to_string(),
        name: name.to_string(),
        type_name: entry.type_name.clone(),
    })?;

    let data = &entry.data;
    let decoded = match ty {
        REG_DWORD => data
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(RegistryValueData::Dword),
        REG_QWORD => data.as_u64().map(RegistryValueData::Qword),
        REG_SZ => data.as_str().map(|s| RegistryValueData::String(s.to_string())),
        REG_EXPAND_SZ => data.as_str().map(|s| RegistryValueData::ExpandString(s.to_string())),
        REG_BINARY => data
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
                    .collect::<Option<Vec<u8>>>()
            })
            .map(RegistryValueData::Binary),
        REG_MULTI_SZ => data
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .map(|s| s.as_str().map(str::to_string))
                    .collect::<Option<Vec<String>>>()
            })
            .map(RegistryValueData::MultiString),
        _ => None,
    };
    decoded.ok_or_else(|| invalid(format!("data does not match {}: {}", entry.type_name, data)))
}

/// Renders the hives below `root` as tab-indented JSON.
pub fn tree_to_json(root: &RegistryKey) -> Result<String, RegistryError> {
    let mut doc = Map::new();
    for hive in root.subkeys() {
        doc.insert(hive.name.clone(), node_to_json(hive)?);
    }

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    Value::Object(doc).serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| RegistryError::InvalidFormat(e.to_string()))
}

fn node_to_json(key: &RegistryKey) -> Result<Value, RegistryError> {
    let mut values = Map::new();
    for value in key.values() {
        let entry = JsonValue {
            type_name: type_name(value.reg_type()).unwrap_or("REG_NONE").to_string(),
            data: data_to_json(&value.data),
        };
        values.insert(value.name.clone(), serde_json::to_value(entry)?);
    }

    let mut keys = Map::new();
    for sub in key.subkeys() {
        keys.insert(sub.name.clone(), node_to_json(sub)?);
    }

    let mut node = Map::new();
    node.insert("values".into(), Value::Object(values));
    node.insert("keys".into(), Value::Object(keys));
    Ok(Value::Object(node))
}

fn data_to_json(data: &RegistryValueData) -> Value {
    match data {
        RegistryValueData::String(s) | RegistryValueData::ExpandString(s) => Value::from(s.as_str()),
        RegistryValueData::MultiString(parts) => Value::from(parts.clone()),
        RegistryValueData::Dword(v) => Value::from(*v),
        RegistryValueData::Qword(v) => Value::from(*v),
        RegistryValueData::Binary(bytes) => Value::from(bytes.clone()),
    }
}
