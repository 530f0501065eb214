//! [`Method`]: a partial function from typed inputs to named output branches.

use super::param::ParameterValue;
use super::type_def::TypeDefinition;
use indexmap::IndexMap;
use std::rc::Rc;

/// One named input port of a [`Method`].
#[derive(Debug, Clone)]
pub struct MethodInput {
    pub type_def: Rc<TypeDefinition>,
    pub param_constraints: IndexMap<String, ParameterValue>,
    /// A `tune` input is never bound by the search; it represents a value
    /// supplied externally at procedure-execution time.
    pub tune: bool,
}

/// One named output port of a [`Method`].
///
/// Placeholders appearing in `param_statements` must, by construction
/// (enforced at load time), refer by name to a placeholder appearing in
/// one of the method's own `param_constraints`.
#[derive(Debug, Clone)]
pub struct MethodOutputPort {
    pub type_def: Rc<TypeDefinition>,
    pub param_statements: IndexMap<String, ParameterValue>,
}

/// A deterministic transformation: a fixed set of named inputs producing
/// a fixed set of named outputs, all at once.
///
/// The legacy multi-branch catalogue shape is expanded at
/// load time into one single-branch `Method` per branch; this type only
/// ever represents the canonical single-branch form.
///
/// Equality and hashing are by `name` alone, mirroring [`TypeDefinition`]:
/// method names are unique within a [`super::graph::KnowledgeGraph`], so
/// name identity is exactly object identity here.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: String,
    pub inputs: IndexMap<String, MethodInput>,
    pub outputs: IndexMap<String, MethodOutputPort>,
    pub description: Option<String>,
}

impl Method {
    /// Input ports the search is allowed to bind, in declaration order.
    pub fn bindable_inputs(&self) -> impl Iterator<Item = (&String, &MethodInput)> {
        self.inputs.iter().filter(|(_, input)| !input.tune)
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for Method {}

impl std::hash::Hash for Method {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}
