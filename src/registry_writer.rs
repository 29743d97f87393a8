use std::fs;
use std::path::Path;

use tracing::debug;

use crate::registry_codec::encode_value;
use crate::registry_events::{CodecOptions, EventSink, Reporter};
use crate::registry_key::{join_path, RegistryKey};
use crate::registry_utils::encode_document;

/// First line of every file written.
pub const REG_HEADER: &str = "Windows Registry Editor Version 5.00";

#[derive(Debug, Clone, Default)]
pub struct RegistryWriter {
    pub options: CodecOptions,
}

impl RegistryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    /// Renders the hives below `root` as `.reg` lines, header included.
    pub fn write_lines(&self, root: &RegistryKey, sink: &mut dyn EventSink) -> Vec<String> {
        let mut reporter = Reporter::new(self.options, sink);
        let mut out = vec![REG_HEADER.to_string(), String::new()];
        for hive in root.subkeys() {
            write_key(hive, &hive.name, &mut reporter, &mut out);
        }
        out.push(String::new());
        debug!(lines = out.len(), "serialized registry tree");
        out
    }

    pub fn write_to_string(&self, root: &RegistryKey, sink: &mut dyn EventSink) -> String {
        self.write_lines(root, sink).join("\n")
    }

    /// The on-disk form: BOM followed by UTF-16LE text.
    pub fn write_to_bytes(&self, root: &RegistryKey, sink: &mut dyn EventSink) -> Vec<u8> {
        encode_document(&self.write_to_string(root, sink))
    }

    pub fn write_to_file<P: AsRef<Path>>(
        &self,
        root: &RegistryKey,
        path: P,
        sink: &mut dyn EventSink,
    ) -> std::io::Result<()> {
        let content = self.write_to_bytes(root, sink);
        let mut tmp = path.as_ref().to_path_buf();
        let file_name = tmp
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "registry.reg".into());
        tmp.set_file_name(format!("{}.tmp", file_name));
        fs::write(&tmp, content)?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

fn write_key(node: &RegistryKey, path: &str, reporter: &mut Reporter<'_>, out: &mut Vec<String>) {
    reporter.key(path);
    out.push(format!("[{}]", path));

    let default = node.default_value();
    let named = node.values().iter().filter(|v| !v.is_default());
    for value in default.into_iter().chain(named) {
        reporter.value(path, &value.name, value.reg_type());
        out.extend(encode_value(value));
    }
    out.push(String::new());

    for sub in node.subkeys() {
        write_key(sub, &join_path(path, &sub.name), reporter, out);
    }
}
