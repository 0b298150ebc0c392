// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end planning over small workflows.

use flowgen::{
    init_tracing, plan, CyclePolicy, DependencyIndex, ExpansionMode, GenerateError,
    GenerationOptions, OrderError, OrderOptions, PossibleTypesTable, ResolveOptions, ResolvedType,
    TypeExpr,
};
use pretty_assertions::assert_eq;

fn ty(text: &str) -> TypeExpr {
    TypeExpr::parse(text).unwrap()
}

fn pipeline_types() -> PossibleTypesTable {
    PossibleTypesTable::parse([
        ("source.out", vec!["[]int64"]),
        ("map.in", vec!["@from[source.out]", "@single"]),
        ("map.out", vec!["untyped string", "string"]),
        ("sink.in", vec!["@from[source.out]", "[]int64"]),
    ])
    .unwrap()
}

fn pipeline_deps() -> DependencyIndex {
    [("sink", vec!["map"]), ("map", vec!["source"])]
        .into_iter()
        .collect()
}

#[test]
fn plans_a_linear_pipeline() {
    init_tracing();

    let out = plan(
        &pipeline_types(),
        vec!["sink", "map", "source"],
        &pipeline_deps(),
        &GenerationOptions::default(),
    )
    .unwrap();

    assert_eq!(out.node_ids().collect::<Vec<_>>(), vec!["source", "map", "sink"]);
    assert_eq!(out.types.resolved("source.out"), Some(&ty("[]int64")));
    assert_eq!(out.types.resolved("map.in"), Some(&ty("int64")));
    assert_eq!(out.types.resolved("map.out"), Some(&ty("string")));
    assert_eq!(out.types.resolved("sink.in"), Some(&ty("[]int64")));
    assert!(out.is_complete());
}

#[test]
fn ambiguous_slot_is_reported_in_the_plan() {
    init_tracing();

    let types = PossibleTypesTable::parse([("x", vec!["string", "bool"])]).unwrap();
    let out = plan(
        &types,
        vec!["only".to_owned()],
        &DependencyIndex::new(),
        &GenerationOptions::default(),
    )
    .unwrap();

    assert!(!out.is_complete());
    assert_eq!(
        out.types.get("x"),
        Some(&ResolvedType::Ambiguous(vec![ty("bool"), ty("string")]))
    );
    assert_eq!(out.nodes, vec!["only".to_owned()]);
}

#[test]
fn node_cycle_fails_the_run() {
    init_tracing();

    let deps: DependencyIndex = [("a", vec!["b"]), ("b", vec!["a"])].into_iter().collect();
    let err = plan(
        &pipeline_types(),
        vec!["a", "b"],
        &deps,
        &GenerationOptions::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        GenerateError::Order(OrderError::Cycle {
            unordered: vec!["a".to_owned(), "b".to_owned()],
        })
    );
    assert_eq!(
        err.to_string(),
        "node ordering failed: dependency cycle among nodes: a, b"
    );
}

#[test]
fn node_cycle_can_be_tolerated() {
    init_tracing();

    let deps: DependencyIndex = [("a", vec!["b"]), ("b", vec!["a"]), ("c", vec!["d"])]
        .into_iter()
        .collect();
    let options = GenerationOptions::default().with_order(OrderOptions {
        on_cycle: CyclePolicy::AppendRemaining,
    });
    let out = plan(&pipeline_types(), vec!["a", "b", "c", "d"], &deps, &options).unwrap();

    assert_eq!(out.nodes, vec!["d", "c", "a", "b"]);
}

#[test]
fn reference_cycle_fails_under_fixed_point() {
    init_tracing();

    let types = PossibleTypesTable::parse([
        ("a", vec!["@from[b]"]),
        ("b", vec!["@from[a]", "int"]),
    ])
    .unwrap();
    let options = GenerationOptions::default()
        .with_resolve(ResolveOptions::default().with_expansion(ExpansionMode::FixedPoint));

    let err = plan(&types, Vec::<String>::new(), &DependencyIndex::new(), &options).unwrap_err();
    assert!(matches!(err, GenerateError::Resolve(_)));
    assert!(err.to_string().starts_with("type resolution failed: reference cycle"));
}

#[test]
fn single_pass_tolerates_the_same_references() {
    init_tracing();

    let types = PossibleTypesTable::parse([
        ("a", vec!["@from[b]"]),
        ("b", vec!["@from[a]", "int"]),
    ])
    .unwrap();

    let out = plan(
        &types,
        Vec::<String>::new(),
        &DependencyIndex::new(),
        &GenerationOptions::default(),
    )
    .unwrap();
    assert_eq!(out.types.len(), 2);
    assert!(out.nodes.is_empty());
}
