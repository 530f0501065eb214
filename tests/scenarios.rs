//! End-to-end scenarios against a small fixed catalogue: one type that
//! needs a two-step conversion to reach the target, one that's already
//! there, one with no path, and the load/request failure cases.

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use proc_planner::config::EngineConfig;
use proc_planner::errors::{BadRequest, PlanError, PlanOutcome};
use proc_planner::request::{RawObjectLiteral, RawTarget};
use proc_planner::response;

const CATALOGUE: &str = r#"
enums:
  MyEnum: [One, Two]
types:
  TypeOne:
    params:
      ValueOne: { type: Int }
  TypeTwo:
    params:
      ValueOne: { type: Int }
      ValueEnum: { type: MyEnum }
  TypeThree:
    params:
      ValueThree: { type: Int }
  TypeWithoutParams:
    params: {}
methods:
  Convert:
    inputs:
      in: { type: TypeOne, params: { ValueOne: n } }
    outputs:
      out: { type: TypeTwo, params: { ValueOne: n } }
  TestProperty:
    inputs:
      objectTwo: { type: TypeTwo, params: { ValueEnum: unset } }
    outputs:
      optionGood:
        objectTwo: { type: TypeTwo, params: { ValueEnum: One } }
      optionBad:
        objectTwo: { type: TypeTwo, params: { ValueEnum: Two } }
  Combine:
    inputs:
      objectOne: { type: TypeOne, params: { ValueOne: n } }
      objectTwo: { type: TypeTwo, params: { ValueEnum: One } }
    outputs:
      objectThree: { type: TypeThree, params: { ValueThree: n } }
"#;

fn start(yaml: &str) -> IndexMap<String, RawObjectLiteral> {
    serde_yaml::from_str(yaml).unwrap()
}

fn target(yaml: &str) -> RawTarget {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn reaches_type_three_through_convert_then_test_property_then_combine() {
    let raw_start = start("start: { type: TypeOne, params: { ValueOne: 42 } }");
    let raw_target = target("target: { type: TypeThree }");
    let config = EngineConfig::new();

    let (graph, outcome) = proc_planner::plan(CATALOGUE, &raw_start, &raw_target, &config).unwrap();

    let procedure = match outcome {
        PlanOutcome::Solved(procedure) => procedure,
        other => panic!("expected Solved, got {other:?}"),
    };

    let method_names: Vec<&str> = procedure.method_nodes.iter().map(|m| m.method.name.as_str()).collect();
    assert_eq!(method_names, vec!["Convert", "TestProperty.optionGood", "Combine"]);

    let terminal = procedure
        .type_nodes
        .iter()
        .find(|n| n.is_terminal)
        .expect("a terminal type node exists");
    assert_eq!(terminal.type_instance.type_def.name, "TypeThree");

    let response = response::render(&graph, &procedure);
    let final_object = response
        .objects
        .iter()
        .find(|o| o.type_name == "TypeThree")
        .expect("a TypeThree object in the rendered response");
    assert_eq!(final_object.params.get("ValueThree").map(String::as_str), Some("42"));
    assert!(final_object.is_end);
    assert!(!final_object.is_start);
}

#[test]
fn unreachable_parameter_value_yields_no_solution() {
    let raw_start = start("start: { type: TypeOne, params: { ValueOne: 42 } }");
    let raw_target = target("target: { type: TypeThree, params: { ValueThree: 7 } }");
    let config = EngineConfig::new();

    let (_graph, outcome) = proc_planner::plan(CATALOGUE, &raw_start, &raw_target, &config).unwrap();
    assert!(matches!(outcome, PlanOutcome::NoSolution));
}

#[test]
fn a_start_object_already_matching_the_target_needs_no_methods() {
    let raw_start = start("x: { type: TypeWithoutParams }");
    let raw_target = target("target: { type: TypeWithoutParams }");
    let config = EngineConfig::new();

    let (_graph, outcome) = proc_planner::plan(CATALOGUE, &raw_start, &raw_target, &config).unwrap();
    let procedure = match outcome {
        PlanOutcome::Solved(procedure) => procedure,
        other => panic!("expected Solved, got {other:?}"),
    };

    assert_eq!(procedure.method_nodes.len(), 0);
    assert_eq!(procedure.type_nodes.len(), 1);
    assert!(procedure.type_nodes[0].is_terminal);
}

#[test]
fn two_equally_good_start_objects_resolve_deterministically() {
    let raw_start = start(
        r#"
a: { type: TypeOne, params: { ValueOne: 1 } }
b: { type: TypeOne, params: { ValueOne: 2 } }
"#,
    );
    let raw_target = target("target: { type: TypeThree }");
    let config = EngineConfig::new();

    let (graph_a, outcome_a) = proc_planner::plan(CATALOGUE, &raw_start, &raw_target, &config).unwrap();
    let (graph_b, outcome_b) = proc_planner::plan(CATALOGUE, &raw_start, &raw_target, &config).unwrap();

    let (PlanOutcome::Solved(procedure_a), PlanOutcome::Solved(procedure_b)) = (outcome_a, outcome_b) else {
        panic!("expected both runs to solve");
    };

    let response_a = response::render(&graph_a, &procedure_a);
    let response_b = response::render(&graph_b, &procedure_b);
    assert_eq!(
        serde_json::to_string(&response_a).unwrap(),
        serde_json::to_string(&response_b).unwrap(),
        "replaying the same request must produce an identical procedure"
    );
}

#[test]
fn undeclared_enum_value_is_rejected_at_load_time() {
    let text = r#"
enums:
  MyEnum: [One, Two]
types:
  TypeTwo:
    params:
      ValueEnum: { type: MyEnum }
methods:
  Bad:
    inputs: {}
    outputs:
      out: { type: TypeTwo, params: { ValueEnum: Three } }
"#;
    let err = proc_planner::catalogue::load_str(text).unwrap_err();
    assert!(matches!(err, proc_planner::errors::LoadError::BadEnumValue { .. }));
}

#[test]
fn undeclared_target_type_is_a_bad_request_before_the_search_starts() {
    let raw_start = start("start: { type: TypeOne, params: { ValueOne: 1 } }");
    let raw_target = target("target: { type: NoSuchType }");
    let config = EngineConfig::new();

    let err = proc_planner::plan(CATALOGUE, &raw_start, &raw_target, &config).unwrap_err();
    match err {
        PlanError::BadRequest(BadRequest::UnknownTargetType(name)) => assert_eq!(name, "NoSuchType"),
        other => panic!("expected BadRequest::UnknownTargetType, got {other:?}"),
    }
}
