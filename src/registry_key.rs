use crate::registry_value::RegistryValue;

/// One registry key and everything below it.
///
/// Subkeys are owned by their parent, so a tree is always a strict hierarchy.
/// Values and subkeys keep insertion order, which is the order they are
/// written back out in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryKey {
    pub name: String,
    subkeys: Vec<RegistryKey>,
    values: Vec<RegistryValue>,
}

impl RegistryKey {
    /// Nameless container whose subkeys are the root hives.
    pub fn create_root() -> Self {
        Self::default()
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn subkeys(&self) -> &[RegistryKey] {
        &self.subkeys
    }

    pub fn values(&self) -> &[RegistryValue] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.subkeys.is_empty() && self.values.is_empty()
    }

    pub fn get_subkey(&self, name: &str) -> Option<&RegistryKey> {
        self.subkeys.iter().find(|k| k.name == name)
    }

    pub fn get_value(&self, name: &str) -> Option<&RegistryValue> {
        self.values.iter().find(|v| v.name == name)
    }

    pub fn default_value(&self) -> Option<&RegistryValue> {
        self.get_value("")
    }

    /// Stores `value` under its own name, replacing an existing value of the
    /// same name in place.
    pub fn set_value(&mut self, value: RegistryValue) {
        match self.values.iter_mut().find(|v| v.name == value.name) {
            Some(existing) => *existing = value,
            None => self.values.push(value),
        }
    }

    pub fn create_subkey(&mut self, name: &str) -> &mut RegistryKey {
        let idx = match self.subkeys.iter().position(|k| k.name == name) {
            Some(idx) => idx,
            None => {
                self.subkeys.push(RegistryKey::new(name));
                self.subkeys.len() - 1
            }
        };
        &mut self.subkeys[idx]
    }

    /// Walks `path` downwards, creating every missing key on the way.
    pub fn get_or_create_child<S: AsRef<str>>(&mut self, path: &[S]) -> &mut RegistryKey {
        let mut current = self;
        for segment in path {
            current = current.create_subkey(segment.as_ref());
        }
        current
    }

    pub fn create_key_recursive(&mut self, path: &str) -> &mut RegistryKey {
        let segments: Vec<&str> = split_path(path).collect();
        self.get_or_create_child(&segments)
    }

    pub fn find_key(&self, path: &str) -> Option<&RegistryKey> {
        let mut current = self;
        for segment in split_path(path) {
            current = current.get_subkey(segment)?;
        }
        Some(current)
    }
}

pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('\\').filter(|s| !s.is_empty())
}

pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}\\{}", parent, name)
    }
}
