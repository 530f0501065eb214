//! Resolves a [`RawCatalogue`] into a [`KnowledgeGraph`]: name resolution,
//! literal instantiation, legacy multi-branch output expansion, and
//! placeholder validation, in that order.

use super::document::{RawCatalogue, RawMethod, RawPort, RawTypeDef};
use super::literal;
use crate::errors::LoadError;
use crate::model::{
    EnumType, KnowledgeGraph, Method, MethodInput, MethodOutputPort, ParameterDefinition,
    ParameterType, ParameterValue, TypeDefinition,
};
use indexmap::IndexMap;
use serde_yaml::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// Build a [`KnowledgeGraph`] from a parsed document.
pub fn load(raw: &RawCatalogue) -> Result<KnowledgeGraph, LoadError> {
    let mut graph = KnowledgeGraph::new();

    for (enum_name, values) in &raw.enums {
        graph.param_types.insert(
            enum_name.clone(),
            ParameterType::Enum(EnumType::new(enum_name.clone(), values.clone())),
        );
    }

    for (type_name, raw_type) in &raw.types {
        let type_def = load_type_def(type_name, raw_type, &graph)?;
        graph.types.insert(type_name.clone(), Rc::new(type_def));
    }

    for (method_name, raw_method) in &raw.methods {
        for (name, method) in load_method(method_name, raw_method, &graph)? {
            graph.methods.insert(name, method);
        }
    }

    Ok(graph)
}

/// Parse a YAML or JSON catalogue document and build its [`KnowledgeGraph`].
pub fn load_str(text: &str) -> Result<KnowledgeGraph, LoadError> {
    let raw: RawCatalogue = serde_yaml::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?;
    load(&raw)
}

fn load_type_def(
    type_name: &str,
    raw_type: &RawTypeDef,
    graph: &KnowledgeGraph,
) -> Result<TypeDefinition, LoadError> {
    let mut params = IndexMap::new();
    for (param_name, raw_param) in &raw_type.params {
        let param_type = graph
            .param_type(&raw_param.type_name)
            .cloned()
            .ok_or_else(|| LoadError::UnknownParamType(raw_param.type_name.clone()))?;
        params.insert(
            param_name.clone(),
            ParameterDefinition {
                name: param_name.clone(),
                param_type,
            },
        );
    }
    Ok(TypeDefinition::new(type_name, params))
}

/// Resolve one port (input or output) against the already-built type registry.
fn resolve_port(
    raw_port: &RawPort,
    graph: &KnowledgeGraph,
) -> Result<(Rc<TypeDefinition>, IndexMap<String, ParameterValue>), LoadError> {
    let type_def = graph
        .type_def(&raw_port.type_name)
        .cloned()
        .ok_or_else(|| LoadError::UnknownType(raw_port.type_name.clone()))?;

    let mut values = IndexMap::new();
    for (param_name, raw_literal) in &raw_port.params {
        let param_def = type_def.params.get(param_name).ok_or_else(|| LoadError::UnknownParam {
            type_name: type_def.name.clone(),
            param_name: param_name.clone(),
        })?;
        let value = literal::instantiate(&param_def.param_type, raw_literal)?;
        values.insert(param_name.clone(), value);
    }
    Ok((type_def, values))
}

/// The two shapes a method's `outputs` section can take once classified.
enum OutputShape {
    Direct(IndexMap<String, RawPort>),
    Branches(IndexMap<String, IndexMap<String, RawPort>>),
}

/// Tell direct output ports apart from the legacy nested-branch form.
///
/// An empty `outputs` section, or one where every entry is itself a
/// `type`-bearing mapping, is direct. One where every entry is a mapping
/// of further `type`-bearing mappings is a branch group. Anything mixing
/// the two, or containing a value that is neither, is rejected.
fn classify_outputs(raw_outputs: &IndexMap<String, Value>, method_name: &str) -> Result<OutputShape, LoadError> {
    if raw_outputs.is_empty() {
        return Ok(OutputShape::Direct(IndexMap::new()));
    }

    let malformed = || LoadError::MalformedOutputs(method_name.to_string());

    let mut direct_count = 0usize;
    let mut branch_count = 0usize;
    for value in raw_outputs.values() {
        if RawPort::try_from_value(value).is_some() {
            direct_count += 1;
        } else {
            let mapping = value.as_mapping().ok_or_else(malformed)?;
            if mapping.is_empty() || !mapping.values().all(|sub| RawPort::try_from_value(sub).is_some()) {
                return Err(malformed());
            }
            branch_count += 1;
        }
    }

    if direct_count > 0 && branch_count > 0 {
        return Err(malformed());
    }

    if branch_count > 0 {
        let mut branches = IndexMap::new();
        for (branch_name, value) in raw_outputs {
            let mapping = value.as_mapping().ok_or_else(malformed)?;
            let mut ports = IndexMap::new();
            for (key, sub) in mapping {
                let port_name = key.as_str().ok_or_else(malformed)?.to_string();
                let port = RawPort::try_from_value(sub).ok_or_else(malformed)?;
                ports.insert(port_name, port);
            }
            branches.insert(branch_name.clone(), ports);
        }
        Ok(OutputShape::Branches(branches))
    } else {
        let mut ports = IndexMap::new();
        for (port_name, value) in raw_outputs {
            let port = RawPort::try_from_value(value).ok_or_else(malformed)?;
            ports.insert(port_name.clone(), port);
        }
        Ok(OutputShape::Direct(ports))
    }
}

fn build_inputs(raw_method: &RawMethod, graph: &KnowledgeGraph) -> Result<IndexMap<String, MethodInput>, LoadError> {
    let mut inputs = IndexMap::new();
    for (port_name, raw_port) in &raw_method.inputs {
        let (type_def, param_constraints) = resolve_port(raw_port, graph)?;
        inputs.insert(
            port_name.clone(),
            MethodInput {
                type_def,
                param_constraints,
                tune: raw_port.tune,
            },
        );
    }
    Ok(inputs)
}

fn build_outputs(
    ports: &IndexMap<String, RawPort>,
    graph: &KnowledgeGraph,
) -> Result<IndexMap<String, MethodOutputPort>, LoadError> {
    let mut outputs = IndexMap::new();
    for (port_name, raw_port) in ports {
        let (type_def, param_statements) = resolve_port(raw_port, graph)?;
        outputs.insert(port_name.clone(), MethodOutputPort { type_def, param_statements });
    }
    Ok(outputs)
}

/// Every placeholder an output statement references must appear in some
/// input constraint of the same method; two input constraints sharing a
/// placeholder name must agree on its parameter type.
fn validate_placeholders(
    method_name: &str,
    inputs: &IndexMap<String, MethodInput>,
    outputs: &IndexMap<String, MethodOutputPort>,
) -> Result<(), LoadError> {
    let mut seen: HashMap<String, ParameterType> = HashMap::new();

    for input in inputs.values() {
        for (param_name, constraint) in &input.param_constraints {
            let ParameterValue::Placeholder(name) = constraint else {
                continue;
            };
            let Some(param_def) = input.type_def.params.get(param_name) else {
                continue;
            };
            match seen.get(name) {
                Some(existing) if *existing != param_def.param_type => {
                    return Err(LoadError::DuplicatePlaceholder {
                        method: method_name.to_string(),
                        placeholder: name.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    seen.insert(name.clone(), param_def.param_type.clone());
                }
            }
        }
    }

    for (output_name, output) in outputs {
        for statement in output.param_statements.values() {
            if let ParameterValue::Placeholder(name) = statement {
                if !seen.contains_key(name) {
                    return Err(LoadError::DanglingPlaceholder {
                        method: method_name.to_string(),
                        output: output_name.clone(),
                        placeholder: name.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Build every [`Method`] a single catalogue entry expands to: one for the
/// canonical direct-output form, or one per branch for the legacy form
/// (named `"{method_name}.{branch_name}"`).
fn load_method(
    method_name: &str,
    raw_method: &RawMethod,
    graph: &KnowledgeGraph,
) -> Result<Vec<(String, Rc<Method>)>, LoadError> {
    let inputs = build_inputs(raw_method, graph)?;
    let shape = classify_outputs(&raw_method.outputs, method_name)?;

    match shape {
        OutputShape::Direct(ports) => {
            let outputs = build_outputs(&ports, graph)?;
            validate_placeholders(method_name, &inputs, &outputs)?;
            let method = Rc::new(Method {
                name: method_name.to_string(),
                inputs,
                outputs,
                description: raw_method.description.clone(),
            });
            Ok(vec![(method_name.to_string(), method)])
        }
        OutputShape::Branches(branches) => {
            let mut built = Vec::with_capacity(branches.len());
            for (branch_name, ports) in branches {
                let full_name = format!("{method_name}.{branch_name}");
                let outputs = build_outputs(&ports, graph)?;
                validate_placeholders(&full_name, &inputs, &outputs)?;
                let method = Rc::new(Method {
                    name: full_name.clone(),
                    inputs: inputs.clone(),
                    outputs,
                    description: raw_method.description.clone(),
                });
                built.push((full_name, method));
            }
            Ok(built)
        }
    }
}
