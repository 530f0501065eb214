//! [`TypeDefinition`]: a named bundle of [`ParameterDefinition`]s.

use super::param::ParameterDefinition;
use indexmap::IndexMap;

/// A type name plus its parameter slots.
///
/// Equality is by name only: two `TypeDefinition`s with the
/// same name are the same type definition regardless of their parameter
/// maps, matching the name-based identity the catalogue loader enforces
/// (type names are unique across a document).
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    pub name: String,
    pub params: IndexMap<String, ParameterDefinition>,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, params: IndexMap<String, ParameterDefinition>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

impl PartialEq for TypeDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for TypeDefinition {}

impl std::hash::Hash for TypeDefinition {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
