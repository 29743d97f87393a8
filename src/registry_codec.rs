//! Per-type encoding of registry values to `.reg` line fragments and back.
//!
//! Encoders produce whole physical lines (hex data is wrapped with `\`
//! continuations); decoders take one logical fragment with any continuation
//! lines already joined by the parser.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::registry_utils::{decode_utf16le, encode_utf16le};
use crate::registry_value::{
    RegistryValue, RegistryValueData, REG_BINARY, REG_EXPAND_SZ, REG_MULTI_SZ, REG_QWORD,
};

/// A hex line is broken once it grows past this many characters.
pub const HEX_WRAP_WIDTH: usize = 76;

/// Indentation of a hex continuation line.
pub const CONTINUATION_INDENT: &str = "  ";

static HEX_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^hex(?:\(([0-9a-fA-F]+)\))?:").expect("valid hex header regex"));

static DWORD_DATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^dword:\s*([0-9a-fA-F]{1,8})\s*$").expect("valid dword regex"));

/// Escapes `\` and `"` for use inside a quoted `.reg` literal.
pub fn encode_name(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Reverses [`encode_name`]: every `\` takes the following character as is.
pub fn decode_name(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Reads a quoted literal from the start of `line`, returning the unescaped
/// contents and whatever follows the closing quote. `None` when `line` does
/// not open with a quote or the literal is never closed.
pub fn pop_quoted(line: &str) -> Option<(String, &str)> {
    let body = line.strip_prefix('"')?;
    let mut out = String::new();
    let mut chars = body.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => {
                let (_, escaped) = chars.next()?;
                out.push(escaped);
            }
            '"' => return Some((out, &body[idx + 1..])),
            _ => out.push(c),
        }
    }
    None
}

/// Renders a complete value as one or more physical lines.
pub fn encode_value(value: &RegistryValue) -> Vec<String> {
    let prefix = if value.is_default() {
        "@=".to_string()
    } else {
        format!("\"{}\"=", encode_name(&value.name))
    };
    encode_with_prefix(prefix, &value.data)
}

/// Renders only the data part (`dword:...`, `hex(2):...`, ...).
pub fn encode_data(data: &RegistryValueData) -> Vec<String> {
    encode_with_prefix(String::new(), data)
}

fn encode_with_prefix(mut line: String, data: &RegistryValueData) -> Vec<String> {
    match data {
        RegistryValueData::String(s) => {
            line.push('"');
            line.push_str(&encode_name(s));
            line.push('"');
            vec![line]
        }
        RegistryValueData::Dword(v) => {
            let _ = write!(line, "dword:{:08x}", v);
            vec![line]
        }
        RegistryValueData::Qword(v) => {
            line.push_str("hex(b):");
            let bytes: Vec<String> = v.to_le_bytes().iter().map(|b| format!("{:02x}", b)).collect();
            line.push_str(&bytes.join(","));
            vec![line]
        }
        RegistryValueData::Binary(bytes) => {
            line.push_str("hex:");
            wrap_hex(line, bytes, None)
        }
        RegistryValueData::ExpandString(s) => {
            line.push_str("hex(2):");
            wrap_hex(line, &encode_utf16le(s), Some("00,00"))
        }
        RegistryValueData::MultiString(parts) => {
            line.push_str("hex(7):");
            let mut bytes = Vec::new();
            for part in parts {
                bytes.extend(encode_utf16le(part));
                bytes.extend_from_slice(&[0, 0]);
            }
            wrap_hex(line, &bytes, None)
        }
    }
}

/// Writes `bytes` as `xx,` items, breaking the line once it passes
/// [`HEX_WRAP_WIDTH`] while more data follows. A `terminator` is appended
/// to the last line as is, outside the width check; without one the
/// trailing comma is trimmed.
fn wrap_hex(mut line: String, bytes: &[u8], terminator: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut width = line.chars().count();
    for (idx, b) in bytes.iter().enumerate() {
        let _ = write!(line, "{:02x},", b);
        width += 3;
        let more = idx + 1 != bytes.len() || terminator.is_some();
        if width > HEX_WRAP_WIDTH && more {
            line.push('\\');
            lines.push(std::mem::replace(&mut line, CONTINUATION_INDENT.to_string()));
            width = CONTINUATION_INDENT.len();
        }
    }
    match terminator {
        Some(tail) => line.push_str(tail),
        None => {
            if line.ends_with(',') {
                line.pop();
            }
        }
    }
    lines.push(line);
    lines
}

/// Decodes the data part of a value line, e.g. `dword:0000002a` or
/// `hex(7):61,00,00,00`. Hex continuations must already be joined.
pub fn decode_data(fragment: &str) -> Result<RegistryValueData, String> {
    if fragment.starts_with("dword:") {
        return decode_dword(fragment).map(RegistryValueData::Dword);
    }
    if fragment.starts_with('"') {
        let (s, _) = pop_quoted(fragment).ok_or("unterminated string literal")?;
        return Ok(RegistryValueData::String(s));
    }
    if let Some(caps) = HEX_HEADER.captures(fragment) {
        let ty = match caps.get(1) {
            Some(code) => u32::from_str_radix(code.as_str(), 16)
                .map_err(|_| format!("unsupported value type hex({})", code.as_str()))?,
            None => REG_BINARY,
        };
        let bytes = parse_hex_bytes(&fragment[caps.get(0).map_or(0, |m| m.end())..])?;
        return decode_hex_data(ty, bytes);
    }
    Err("unrecognized value data".into())
}

pub fn decode_dword(fragment: &str) -> Result<u32, String> {
    let caps = DWORD_DATA
        .captures(fragment)
        .ok_or_else(|| format!("malformed dword: {}", fragment))?;
    u32::from_str_radix(&caps[1], 16).map_err(|e| e.to_string())
}

fn decode_hex_data(ty: u32, bytes: Vec<u8>) -> Result<RegistryValueData, String> {
    match ty {
        REG_BINARY => Ok(RegistryValueData::Binary(bytes)),
        REG_QWORD => {
            if bytes.len() > 8 {
                return Err(format!("qword holds {} bytes, expected at most 8", bytes.len()));
            }
            let value = bytes
                .iter()
                .enumerate()
                .fold(0u64, |acc, (i, b)| acc | (u64::from(*b) << (8 * i)));
            Ok(RegistryValueData::Qword(value))
        }
        REG_EXPAND_SZ => {
            let text = decode_utf16le(&bytes).ok_or("invalid UTF-16LE data")?;
            // Every NUL goes, not only the terminator.
            Ok(RegistryValueData::ExpandString(text.replace('\0', "")))
        }
        REG_MULTI_SZ => {
            let text = decode_utf16le(&bytes).ok_or("invalid UTF-16LE data")?;
            let mut parts: Vec<String> = text.split('\0').map(str::to_string).collect();
            parts.pop();
            Ok(RegistryValueData::MultiString(parts))
        }
        other => Err(format!("unsupported value type hex({:x})", other)),
    }
}

/// Parses a comma-separated list of two-digit hex bytes; empty items are skipped.
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    for part in s.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.len() > 2 || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid hex byte '{}'", trimmed));
        }
        let byte = u8::from_str_radix(trimmed, 16).map_err(|e| e.to_string())?;
        bytes.push(byte);
    }
    Ok(bytes)
}
