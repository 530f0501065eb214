//! Raw deserialization shapes for the catalogue document.
//!
//! These mirror the YAML/JSON shape verbatim and carry no validation —
//! [`super::loader`] is where undeclared names, bad enum values and
//! structural ambiguities are rejected. Keeping the two concerns apart
//! mirrors the "builder produces unchecked fields, a separate `validate()`
//! checks them" split used elsewhere for config-shaped structs in this
//! codebase.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;

#[derive(Debug, Deserialize)]
pub struct RawCatalogue {
    #[serde(default)]
    pub enums: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub types: IndexMap<String, RawTypeDef>,
    #[serde(default)]
    pub methods: IndexMap<String, RawMethod>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawTypeDef {
    #[serde(default)]
    pub params: IndexMap<String, RawParamDef>,
}

#[derive(Debug, Deserialize)]
pub struct RawParamDef {
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RawMethod {
    #[serde(default)]
    pub inputs: IndexMap<String, RawPort>,
    /// Either `portName -> RawPort` (canonical single-branch form) or
    /// `optionName -> (portName -> RawPort)` (legacy multi-branch form)
    /// — left as [`Value`] so [`super::loader`] can tell them apart
    /// structurally.
    #[serde(default)]
    pub outputs: IndexMap<String, Value>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawPort {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub params: IndexMap<String, Value>,
    #[serde(default)]
    pub tune: bool,
}

impl RawPort {
    /// Attempt to read a [`Value`] as a `RawPort`-shaped mapping: present
    /// iff it has a `type` key. Used to tell a direct output port record
    /// apart from a nested branch-group mapping.
    pub fn try_from_value(value: &Value) -> Option<RawPort> {
        let mapping = value.as_mapping()?;
        mapping.get("type")?;
        serde_yaml::from_value(Value::Mapping(mapping.clone())).ok()
    }
}
