use std::fs;
use std::path::{Path, PathBuf};

use crate::registry_error::{ConversionWarning, RegistryError};
use crate::registry_events::{CodecOptions, EventSink};
use crate::registry_json::{tree_from_json, tree_to_json};
use crate::registry_parser::RegistryParser;
use crate::registry_writer::RegistryWriter;

/// Output of a conversion plus the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport<T> {
    pub output: T,
    pub warnings: Vec<ConversionWarning>,
}

/// Convenience facade tying the JSON loader, writer and parser together.
pub struct RegistryEditor;

impl RegistryEditor {
    /// JSON text to the bytes of a `.reg` file (BOM + UTF-16LE).
    pub fn json_to_reg(
        json: &str,
        options: CodecOptions,
        sink: &mut dyn EventSink,
    ) -> Result<ConversionReport<Vec<u8>>, RegistryError> {
        let loaded = tree_from_json(json, sink)?;
        let writer = RegistryWriter::with_options(options);
        Ok(ConversionReport {
            output: writer.write_to_bytes(&loaded.root_key, sink),
            warnings: loaded.warnings,
        })
    }

    /// Bytes of a `.reg` file to pretty-printed JSON text.
    pub fn reg_to_json(
        reg: &[u8],
        options: CodecOptions,
        sink: &mut dyn EventSink,
    ) -> Result<ConversionReport<String>, RegistryError> {
        let parser = RegistryParser::with_options(options);
        let loaded = parser.load_from_bytes(reg, sink)?;
        Ok(ConversionReport {
            output: tree_to_json(&loaded.root_key)?,
            warnings: loaded.warnings,
        })
    }

    /// Converts a JSON file to a `.reg` file. Without `output` the result is
    /// written next to the input with `.reg` appended.
    pub fn convert_json_file(
        input: &Path,
        output: Option<&Path>,
        options: CodecOptions,
        sink: &mut dyn EventSink,
    ) -> Result<ConversionReport<PathBuf>, RegistryError> {
        let output = output.map_or_else(|| Self::default_output_path(input, "reg"), Path::to_path_buf);
        let json = fs::read_to_string(input)?;
        let loaded = tree_from_json(&json, sink)?;
        let writer = RegistryWriter::with_options(options);
        writer.write_to_file(&loaded.root_key, &output, sink)?;
        Ok(ConversionReport {
            output,
            warnings: loaded.warnings,
        })
    }

    /// Converts a `.reg` file to a JSON file. Without `output` the result is
    /// written next to the input with `.json` appended.
    pub fn convert_reg_file(
        input: &Path,
        output: Option<&Path>,
        options: CodecOptions,
        sink: &mut dyn EventSink,
    ) -> Result<ConversionReport<PathBuf>, RegistryError> {
        let output = output.map_or_else(|| Self::default_output_path(input, "json"), Path::to_path_buf);
        let parser = RegistryParser::with_options(options);
        let loaded = parser.load_from_file(input, sink)?;
        fs::write(&output, tree_to_json(&loaded.root_key)?)?;
        Ok(ConversionReport {
            output,
            warnings: loaded.warnings,
        })
    }

    /// `input` with `.extension` appended, keeping the original extension.
    pub fn default_output_path(input: &Path, extension: &str) -> PathBuf {
        let mut name = input.as_os_str().to_os_string();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }
}
