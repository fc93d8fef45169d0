//! End-to-end pipeline tests: real Prove source all the way through to
//! generated C, exercising the shapes unit tests inside each crate only
//! cover in isolation.

use prvc::{compile, has_errors, CompileError, ProveConfig};

fn ok_c_source(source: &str) -> String {
    let config = ProveConfig::default();
    match compile(source, &config) {
        Ok(out) => out.c_source,
        Err(CompileError::Diagnostics(diags)) => panic!("unexpected diagnostics: {:?}", diags),
        Err(e) => panic!("unexpected error: {}", e),
    }
}

#[test]
fn a_record_type_and_a_function_using_it_emit_together() {
    let source = "type Point = (x: Integer, y: Integer)\n\n\
                  transforms sum(p Point) Integer\n\
                  from\n    \
                  p.x + p.y\n";
    let c = ok_c_source(source);
    assert!(c.contains("Prove_Point"));
    assert!(c.contains("prv_transforms_sum"));
}

#[test]
fn a_match_over_an_algebraic_type_compiles_to_a_switch() {
    let source = "type Shape = Circle(Integer) | Square(Integer)\n\n\
                  transforms area(s Shape) Integer\n\
                  from\n    \
                  match s\n        \
                  Circle(r) => r * r\n        \
                  Square(side) => side * side\n";
    let c = ok_c_source(source);
    assert!(c.contains("Prove_Shape_Tag"));
    assert!(c.contains("switch"));
}

#[test]
fn self_tail_recursive_function_lowers_to_a_while_loop_not_a_call() {
    let source = "transforms count(n Integer, acc Integer) Integer\n\
                  from\n    \
                  match n == 0\n        \
                  true => acc\n        \
                  false => count(n - 1, acc + 1)\n";
    let c = ok_c_source(source);
    assert!(c.contains("while (1)"));
    assert!(!c.contains("count(n - 1"));
}

#[test]
fn a_failable_function_returns_a_wrapped_result() {
    let source = "inputs parse(n Integer) Integer!\nfrom\n    n\n";
    let c = ok_c_source(source);
    assert!(c.contains("Prove_Result"));
    assert!(c.contains("prove_result_ok"));
}

#[test]
fn undefined_name_is_reported_and_stops_before_emission() {
    let config = ProveConfig::default();
    let err = compile("transforms broken() Integer\nfrom\n    does_not_exist\n", &config).unwrap_err();
    match err {
        CompileError::Diagnostics(diags) => assert!(has_errors(&diags)),
        other => panic!("expected Diagnostics, got {:?}", other),
    }
}
