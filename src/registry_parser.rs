use std::fs;
use std::path::Path;

use tracing::debug;

use crate::registry_codec::{decode_data, pop_quoted};
use crate::registry_error::{ConversionWarning, RegistryError};
use crate::registry_events::{CodecOptions, EventSink, Reporter};
use crate::registry_key::{split_path, RegistryKey};
use crate::registry_utils::decode_document;
use crate::registry_value::RegistryValue;

/// Any `Windows Registry Editor Version x.yz` header is accepted.
pub const HEADER_PREFIX: &str = "Windows Registry Editor Version";

#[derive(Debug)]
pub struct LoadResult {
    pub root_key: RegistryKey,
    pub warnings: Vec<ConversionWarning>,
}

#[derive(Debug, Clone, Default)]
pub struct RegistryParser {
    pub options: CodecOptions,
}

impl RegistryParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn load_from_file<P: AsRef<Path>>(
        &self,
        path: P,
        sink: &mut dyn EventSink,
    ) -> Result<LoadResult, RegistryError> {
        let bytes = fs::read(path)?;
        self.load_from_bytes(&bytes, sink)
    }

    pub fn load_from_bytes(
        &self,
        bytes: &[u8],
        sink: &mut dyn EventSink,
    ) -> Result<LoadResult, RegistryError> {
        let text = decode_document(bytes);
        self.load_from_text(&text, sink)
    }

    pub fn load_from_text(
        &self,
        text: &str,
        sink: &mut dyn EventSink,
    ) -> Result<LoadResult, RegistryError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<&str> = text.lines().collect();
        self.load_from_lines(&lines, sink)
    }

    /// Parses already split physical lines; the first one must be the header.
    pub fn load_from_lines<S: AsRef<str>>(
        &self,
        lines: &[S],
        sink: &mut dyn EventSink,
    ) -> Result<LoadResult, RegistryError> {
        let mut cursor = LineCursor::new(lines);

        match cursor.advance() {
            Some((_, header)) if header.starts_with(HEADER_PREFIX) => {}
            Some((_, header)) => {
                return Err(RegistryError::InvalidFormat(format!(
                    "expected '{}' header, found '{}'",
                    HEADER_PREFIX, header
                )));
            }
            None => return Err(RegistryError::InvalidFormat("empty registry file".into())),
        }

        let mut root = RegistryKey::create_root();
        let mut reporter = Reporter::new(self.options, sink);

        while let Some((line_no, line)) = cursor.advance() {
            if is_skippable(line) {
                continue;
            }
            if !line.starts_with('[') {
                reporter.warn(invalid_line(line_no, line, "value outside of any key"));
                continue;
            }
            match parse_key_header(line) {
                Ok(path) => {
                    reporter.key(&path);
                    let key = root.create_key_recursive(&path);
                    parse_key_block(&mut cursor, key, &path, &mut reporter);
                }
                Err(reason) => reporter.warn(invalid_line(line_no, line, reason)),
            }
        }

        debug!(lines = cursor.consumed(), "parsed registry file");
        Ok(LoadResult {
            root_key: root,
            warnings: reporter.into_warnings(),
        })
    }
}

/// Trimmed lines with a read position. Line numbers are 1-based.
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new<S: AsRef<str>>(lines: &'a [S]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.as_ref().trim()).collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<(usize, &'a str)> {
        let line = self.peek()?;
        self.pos += 1;
        Some((self.pos, line))
    }

    fn consumed(&self) -> usize {
        self.pos
    }
}

fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with(';')
}

fn invalid_line(line: usize, content: &str, reason: impl Into<String>) -> ConversionWarning {
    ConversionWarning::InvalidLine {
        line,
        content: content.to_string(),
        reason: reason.into(),
    }
}

fn parse_key_header(line: &str) -> Result<String, String> {
    let inner = line
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .ok_or("malformed key header")?;
    let segments: Vec<&str> = split_path(inner.trim()).collect();
    if segments.is_empty() {
        return Err("empty key path".into());
    }
    Ok(segments.join("\\"))
}

/// Consumes value lines up to, but not including, the next `[key]` line.
fn parse_key_block<'a>(
    cursor: &mut LineCursor<'a>,
    key: &mut RegistryKey,
    path: &str,
    reporter: &mut Reporter<'_>,
) {
    while cursor.peek().is_some_and(|l| !l.starts_with('[')) {
        let Some((line_no, line)) = cursor.advance() else {
            break;
        };
        if is_skippable(line) {
            continue;
        }
        match parse_value_line(line, cursor) {
            Ok(value) => {
                reporter.value(path, &value.name, value.reg_type());
                key.set_value(value);
            }
            Err(reason) => reporter.warn(invalid_line(line_no, line, reason)),
        }
    }
}

fn parse_value_line<'a>(line: &'a str, cursor: &mut LineCursor<'a>) -> Result<RegistryValue, String> {
    if !line.contains('=') {
        return Err("expected name=value".into());
    }
    let (name, rest) = if let Some(rest) = line.strip_prefix('@') {
        (String::new(), rest)
    } else if line.starts_with('"') {
        pop_quoted(line).ok_or("unterminated value name")?
    } else {
        return Err("expected @ or a quoted value name".into());
    };
    let data = rest
        .trim_start()
        .strip_prefix('=')
        .ok_or("expected = after value name")?
        .trim_start();

    let fragment = if data.starts_with("hex") {
        join_continuations(data, cursor)
    } else {
        data.to_string()
    };
    let data = decode_data(&fragment)?;
    Ok(RegistryValue::new(name, data))
}

/// Pulls hex continuation lines while the current one ends in `\`.
fn join_continuations<'a>(first: &'a str, cursor: &mut LineCursor<'a>) -> String {
    let mut fragment = String::new();
    let mut current = first;
    while let Some(body) = current.strip_suffix('\\') {
        fragment.push_str(body.trim_end());
        fragment.push(',');
        current = match cursor.advance() {
            Some((_, next)) => next,
            None => "",
        };
    }
    fragment.push_str(current);
    fragment
}
