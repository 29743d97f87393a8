use encoding_rs::UTF_16LE;
use tracing::debug;

/// Byte-order mark written in front of every `.reg` file.
pub const UTF16LE_BOM: [u8; 2] = [0xff, 0xfe];

pub fn encode_utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|c| c.to_le_bytes()).collect()
}

/// Strict UTF-16LE decode; `None` on an odd byte count or unpaired surrogates.
pub fn decode_utf16le(bytes: &[u8]) -> Option<String> {
    UTF_16LE
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|s| s.into_owned())
}

/// Decodes a whole `.reg` document. A BOM selects the encoding; without one
/// the text is taken as UTF-16LE. Malformed sequences become U+FFFD.
pub fn decode_document(bytes: &[u8]) -> String {
    let (text, encoding, had_errors) = UTF_16LE.decode(bytes);
    if had_errors {
        debug!(encoding = encoding.name(), "document contained malformed sequences");
    }
    text.into_owned()
}

pub fn encode_document(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + text.len() * 2);
    out.extend_from_slice(&UTF16LE_BOM);
    out.extend(encode_utf16le(text));
    out
}
