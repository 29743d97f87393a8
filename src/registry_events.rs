use tracing::{info, warn};

use crate::registry_error::ConversionWarning;
use crate::registry_value::type_name;

/// Options shared by every conversion entry point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Report every key and value as it is discovered.
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionEvent {
    KeyFound {
        path: String,
    },
    ValueFound {
        key: String,
        name: String,
        reg_type: u32,
    },
    Warning(ConversionWarning),
}

/// Receives conversion events in the order they happen.
///
/// Parsing `.reg` text reports warnings inline, between the discoveries of
/// the surrounding lines. On the JSON side every type or data warning is
/// raised while the document is loaded, so all of them arrive before the
/// writer's first `KeyFound`.
pub trait EventSink {
    fn emit(&mut self, event: ConversionEvent);
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: ConversionEvent) {}
}

/// Forwards events to `tracing`: discoveries at info, warnings at warn.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: ConversionEvent) {
        match event {
            ConversionEvent::KeyFound { path } => info!("Found key: {}", path),
            ConversionEvent::ValueFound { name, reg_type, .. } => {
                let name = if name.is_empty() { "(Default)" } else { name.as_str() };
                info!("Found value: {} ({})", name, type_name(reg_type).unwrap_or("REG_NONE"));
            }
            ConversionEvent::Warning(w) => warn!("{}", w),
        }
    }
}

impl EventSink for Vec<ConversionEvent> {
    fn emit(&mut self, event: ConversionEvent) {
        self.push(event);
    }
}

/// Gates discovery events on [`CodecOptions::verbose`] and keeps a copy of
/// every warning for the caller's result.
pub(crate) struct Reporter<'a> {
    options: CodecOptions,
    sink: &'a mut dyn EventSink,
    warnings: Vec<ConversionWarning>,
}

impl<'a> Reporter<'a> {
    pub(crate) fn new(options: CodecOptions, sink: &'a mut dyn EventSink) -> Self {
        Self {
            options,
            sink,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn key(&mut self, path: &str) {
        if self.options.verbose {
            self.sink.emit(ConversionEvent::KeyFound {
                path: path.to_string(),
            });
        }
    }

    pub(crate) fn value(&mut self, key: &str, name: &str, reg_type: u32) {
        if self.options.verbose {
            self.sink.emit(ConversionEvent::ValueFound {
                key: key.to_string(),
                name: name.to_string(),
                reg_type,
            });
        }
    }

    pub(crate) fn warn(&mut self, warning: ConversionWarning) {
        self.warnings.push(warning.clone());
        self.sink.emit(ConversionEvent::Warning(warning));
    }

    pub(crate) fn into_warnings(self) -> Vec<ConversionWarning> {
        self.warnings
    }
}
