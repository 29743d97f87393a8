mod registry_value;
mod registry_key;
mod registry_utils;
mod registry_error;
mod registry_events;
mod registry_codec;
mod registry_parser;
mod registry_writer;
mod registry_json;
mod registry_editor;

pub use registry_value::{
    type_from_name, type_name, RegistryValue, RegistryValueData, REG_BINARY, REG_DWORD,
    REG_EXPAND_SZ, REG_MULTI_SZ, REG_QWORD, REG_SZ,
};
pub use registry_key::RegistryKey;
pub use registry_utils::*;
pub use registry_error::{ConversionWarning, RegistryError};
pub use registry_events::{CodecOptions, ConversionEvent, EventSink, NullSink, TracingSink};
pub use registry_codec::{
    decode_data, decode_dword, decode_name, encode_data, encode_name, encode_value,
    parse_hex_bytes, pop_quoted, CONTINUATION_INDENT, HEX_WRAP_WIDTH,
};
pub use registry_parser::{LoadResult, RegistryParser, HEADER_PREFIX};
pub use registry_writer::{RegistryWriter, REG_HEADER};
pub use registry_json::{tree_from_json, tree_to_json};
pub use registry_editor::{ConversionReport, RegistryEditor};
