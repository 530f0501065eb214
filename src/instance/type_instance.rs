//! [`TypeInstance`]: a fully- or partially-parametrized artifact, and the
//! two predicates the search is built on.

use crate::model::{MethodInput, ParameterValue, TypeDefinition};
use std::collections::BTreeMap;
use std::rc::Rc;

/// A type definition bound to a mapping of parameter name to value.
///
/// Only [`ParameterValue::IntLiteral`] and [`ParameterValue::EnumLiteral`]
/// ever appear in `param_values` — this is an invariant upheld by every
/// constructor in this crate, not a runtime-checked constraint.
///
/// `param_values` is a `BTreeMap` rather than a `HashMap` so that
/// `#[derive(Hash)]` is deterministic: [`crate::search::CandidateNode`]
/// identity depends on hashing sets of `TypeInstance`s, and that only
/// works if two structurally-equal instances always hash the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInstance {
    pub type_def: Rc<TypeDefinition>,
    pub param_values: BTreeMap<String, ParameterValue>,
}

impl TypeInstance {
    pub fn new(type_def: Rc<TypeDefinition>, param_values: BTreeMap<String, ParameterValue>) -> Self {
        Self {
            type_def,
            param_values,
        }
    }

    /// True iff this instance could be bound to `input`.
    pub fn fits_input_description(&self, input: &MethodInput) -> bool {
        if self.type_def != input.type_def {
            return false;
        }

        for (param_name, constraint) in &input.param_constraints {
            match constraint {
                ParameterValue::Placeholder(_) => continue,
                ParameterValue::Unset => {
                    if self.param_values.contains_key(param_name) {
                        return false;
                    }
                }
                literal => match self.param_values.get(param_name) {
                    Some(value) if value == literal => {}
                    _ => return false,
                },
            }
        }

        true
    }

    /// True iff `self` makes `other` redundant: same type, and every
    /// binding in `other` is also present in `self` with the same value.
    /// Note the asymmetry — `self` may carry additional pinned parameters.
    pub fn subsumes(&self, other: &TypeInstance) -> bool {
        if self.type_def != other.type_def {
            return false;
        }
        other
            .param_values
            .iter()
            .all(|(k, v)| self.param_values.get(k) == Some(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ParameterDefinition, ParameterType};
    use indexmap::IndexMap;

    fn type_one() -> Rc<TypeDefinition> {
        let mut params = IndexMap::new();
        params.insert(
            "ValueOne".to_string(),
            ParameterDefinition {
                name: "ValueOne".to_string(),
                param_type: ParameterType::Int,
            },
        );
        Rc::new(TypeDefinition::new("TypeOne", params))
    }

    #[test]
    fn subsumes_allows_extra_params_on_the_subsumer() {
        let td = type_one();
        let specific = TypeInstance::new(
            td.clone(),
            BTreeMap::from([("ValueOne".to_string(), ParameterValue::IntLiteral(3))]),
        );
        let general = TypeInstance::new(td, BTreeMap::new());
        assert!(specific.subsumes(&general));
        assert!(!general.subsumes(&specific));
    }

    #[test]
    fn unset_constraint_rejects_present_and_accepts_absent() {
        let td = type_one();
        let present = TypeInstance::new(
            td.clone(),
            BTreeMap::from([("ValueOne".to_string(), ParameterValue::IntLiteral(3))]),
        );
        let absent = TypeInstance::new(td.clone(), BTreeMap::new());

        let input = MethodInput {
            type_def: td,
            param_constraints: IndexMap::from([(
                "ValueOne".to_string(),
                ParameterValue::Unset,
            )]),
            tune: false,
        };

        assert!(!present.fits_input_description(&input));
        assert!(absent.fits_input_description(&input));
    }
}
