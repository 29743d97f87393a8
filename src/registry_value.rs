pub const REG_SZ: u32 = 1;
pub const REG_EXPAND_SZ: u32 = 2;
pub const REG_BINARY: u32 = 3;
pub const REG_DWORD: u32 = 4;
pub const REG_MULTI_SZ: u32 = 7;
pub const REG_QWORD: u32 = 11;

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryValueData {
    String(String),
    ExpandString(String),
    MultiString(Vec<String>),
    Dword(u32),
    Qword(u64),
    Binary(Vec<u8>),
}

impl RegistryValueData {
    pub fn reg_type(&self) -> u32 {
        match self {
            RegistryValueData::String(_) => REG_SZ,
            RegistryValueData::ExpandString(_) => REG_EXPAND_SZ,
            RegistryValueData::MultiString(_) => REG_MULTI_SZ,
            RegistryValueData::Dword(_) => REG_DWORD,
            RegistryValueData::Qword(_) => REG_QWORD,
            RegistryValueData::Binary(_) => REG_BINARY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryValue {
    pub name: String,
    pub data: RegistryValueData,
}

impl RegistryValue {
    pub fn new(name: impl Into<String>, data: RegistryValueData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn reg_type(&self) -> u32 {
        self.data.reg_type()
    }

    /// The unnamed value of a key, written as `@=`.
    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }
}

/// JSON spelling of a registry type code.
pub fn type_name(ty: u32) -> Option<&'static str> {
    match ty {
        REG_SZ => Some("REG_SZ"),
        REG_EXPAND_SZ => Some("REG_EXPAND_SZ"),
        REG_BINARY => Some("REG_BINARY"),
        REG_DWORD => Some("REG_DWORD"),
        REG_MULTI_SZ => Some("REG_MULTI_SZ"),
        REG_QWORD => Some("REG_QWORD"),
        _ => None,
    }
}

pub fn type_from_name(name: &str) -> Option<u32> {
    match name {
        "REG_SZ" => Some(REG_SZ),
        "REG_EXPAND_SZ" => Some(REG_EXPAND_SZ),
        "REG_BINARY" => Some(REG_BINARY),
        "REG_DWORD" => Some(REG_DWORD),
        "REG_MULTI_SZ" => Some(REG_MULTI_SZ),
        "REG_QWORD" => Some(REG_QWORD),
        _ => None,
    }
}
