//! The method applicator: turns a [`MethodApplication`]
//! into the set of [`TypeInstance`]s it produces.

use crate::instance::TypeInstance;
use crate::model::{Method, ParameterValue};
use indexmap::IndexMap;
use std::rc::Rc;

/// A method paired with a specific binding of each non-tuning input port
/// to a specific [`TypeInstance`].
///
/// Value-typed (structural equality/hash): two
/// applications of the same method to the same inputs are the same edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodApplication {
    pub method: Rc<Method>,
    pub inputs: IndexMap<String, TypeInstance>,
}

impl MethodApplication {
    pub fn new(method: Rc<Method>, inputs: IndexMap<String, TypeInstance>) -> Self {
        Self { method, inputs }
    }

    /// Compute every output [`TypeInstance`] this application produces,
    /// keyed by output-port name:
    ///
    /// 1. name-matched copying from an input port sharing the output's name;
    /// 2. declared `param_statements`, applied in order, literal values
    ///    assigned directly and placeholders resolved against the first
    ///    matching input constraint.
    pub fn resulting_types(&self) -> IndexMap<String, TypeInstance> {
        let mut outputs = IndexMap::new();

        for (output_name, output_port) in &self.method.outputs {
            let mut accumulator = std::collections::BTreeMap::new();

            // Step (b): name-matched structural propagation.
            if let Some(matching_input) = self.inputs.get(output_name) {
                for (param_name, value) in &matching_input.param_values {
                    accumulator.insert(param_name.clone(), value.clone());
                }
            }

            // Step (c): declared statements, in declaration order.
            for (param_name, statement) in &output_port.param_statements {
                match statement {
                    ParameterValue::IntLiteral(_) | ParameterValue::EnumLiteral(_, _) => {
                        accumulator.insert(param_name.clone(), statement.clone());
                    }
                    ParameterValue::Placeholder(placeholder_name) => {
                        if let Some(value) = self.resolve_placeholder(placeholder_name) {
                            accumulator.insert(param_name.clone(), value);
                        }
                        // Otherwise: skip. The parameter stays whatever
                        // name-matched copying produced, or absent.
                    }
                    ParameterValue::Unset => {
                        // Not a legal output statement; the loader rejects
                        // catalogues that would reach this. Treated as a
                        // no-op defensively rather than panicking here.
                    }
                }
            }

            outputs.insert(
                output_name.clone(),
                TypeInstance::new(output_port.type_def.clone(), accumulator),
            );
        }

        outputs
    }

    /// Find the first input constraint (in input declaration order) that is
    /// `Placeholder(placeholder_name)`, and return the bound input
    /// instance's value for that same parameter, if present.
    fn resolve_placeholder(&self, placeholder_name: &str) -> Option<ParameterValue> {
        for (input_name, input_def) in &self.method.inputs {
            for (in_param_name, constraint) in &input_def.param_constraints {
                if let ParameterValue::Placeholder(name) = constraint {
                    if name == placeholder_name {
                        let bound = self.inputs.get(input_name)?;
                        return bound.param_values.get(in_param_name).cloned();
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MethodInput, MethodOutputPort, ParameterDefinition, ParameterType, TypeDefinition};
    use std::collections::BTreeMap;

    fn type_with_n() -> Rc<TypeDefinition> {
        let mut params = IndexMap::new();
        params.insert(
            "n".to_string(),
            ParameterDefinition {
                name: "n".to_string(),
                param_type: ParameterType::Int,
            },
        );
        Rc::new(TypeDefinition::new("TypeOne", params))
    }

    #[test]
    fn propagation_law_copies_placeholder_value_through() {
        let td = type_with_n();

        let method = Rc::new(Method {
            name: "Convert".to_string(),
            inputs: IndexMap::from([(
                "in".to_string(),
                MethodInput {
                    type_def: td.clone(),
                    param_constraints: IndexMap::from([(
                        "n".to_string(),
                        ParameterValue::Placeholder("n".to_string()),
                    )]),
                    tune: false,
                },
            )]),
            outputs: IndexMap::from([(
                "out".to_string(),
                MethodOutputPort {
                    type_def: td.clone(),
                    param_statements: IndexMap::from([(
                        "n".to_string(),
                        ParameterValue::Placeholder("n".to_string()),
                    )]),
                },
            )]),
            description: None,
        });

        let bound_input = TypeInstance::new(
            td,
            BTreeMap::from([("n".to_string(), ParameterValue::IntLiteral(42))]),
        );

        let application = MethodApplication::new(
            method,
            IndexMap::from([("in".to_string(), bound_input)]),
        );

        let outputs = application.resulting_types();
        let out = &outputs["out"];
        assert_eq!(out.param_values.get("n"), Some(&ParameterValue::IntLiteral(42)));
    }

    #[test]
    fn name_copy_law_is_overridden_by_explicit_statement() {
        let td = type_with_n();

        let method = Rc::new(Method {
            name: "Touch".to_string(),
            inputs: IndexMap::from([(
                "obj".to_string(),
                MethodInput {
                    type_def: td.clone(),
                    param_constraints: IndexMap::new(),
                    tune: false,
                },
            )]),
            outputs: IndexMap::from([(
                "obj".to_string(),
                MethodOutputPort {
                    type_def: td.clone(),
                    param_statements: IndexMap::from([(
                        "n".to_string(),
                        ParameterValue::IntLiteral(7),
                    )]),
                },
            )]),
            description: None,
        });

        let bound_input = TypeInstance::new(
            td,
            BTreeMap::from([("n".to_string(), ParameterValue::IntLiteral(1))]),
        );

        let application = MethodApplication::new(
            method,
            IndexMap::from([("obj".to_string(), bound_input)]),
        );

        let outputs = application.resulting_types();
        assert_eq!(
            outputs["obj"].param_values.get("n"),
            Some(&ParameterValue::IntLiteral(7))
        );
    }
}
