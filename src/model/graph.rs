//! [`KnowledgeGraph`]: the immutable, request-scoped registries built by the
//! [`crate::catalogue`] loader.

use super::method::Method;
use super::param::ParameterType;
use super::type_def::TypeDefinition;
use indexmap::IndexMap;
use std::rc::Rc;

/// Parameter-type registry, type-definition registry and method registry,
/// keyed by name. Built once per planning request and discarded at the
/// end of it — no shared mutable state between requests.
#[derive(Debug, Clone)]
pub struct KnowledgeGraph {
    pub param_types: IndexMap<String, ParameterType>,
    pub types: IndexMap<String, Rc<TypeDefinition>>,
    pub methods: IndexMap<String, Rc<Method>>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        let mut param_types = IndexMap::new();
        param_types.insert("Int".to_string(), ParameterType::Int);
        Self {
            param_types,
            types: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }

    pub fn param_type(&self, name: &str) -> Option<&ParameterType> {
        self.param_types.get(name)
    }

    pub fn type_def(&self, name: &str) -> Option<&Rc<TypeDefinition>> {
        self.types.get(name)
    }

    /// Methods in catalogue declaration order — the order the search
    /// iterates them in.
    pub fn methods_in_order(&self) -> impl Iterator<Item = &Rc<Method>> {
        self.methods.values()
    }
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self::new()
    }
}
