//! End-to-end conformance tests for the built-in fixtures.
//!
//! Each fixture is run through the public API with a buffer print handler
//! and its exact printed output is asserted.

use pretty_assertions::assert_eq;
use recast_eval::fixtures::{find, FIXTURES};
use recast_eval::{buffer_handler, get_attr, AttrOrigin, InterpreterBuilder, Value};

fn run_fixture(name: &str) -> String {
    let fixture = find(name).unwrap_or_else(|| panic!("fixture {name} must exist"));
    let program = (fixture.build)();
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new(&program)
        .print_handler(handler.clone())
        .build();
    interp
        .run()
        .unwrap_or_else(|err| panic!("{name} failed: {err}"));
    handler.get_output()
}

#[test]
fn test_shadowed_call_prints_11() {
    // The shadowing write makes the call plain: no receiver injection and
    // no `self.base` contribution.
    assert_eq!(run_fixture("shadowed-call"), "11\n");
}

#[test]
fn test_bound_call_prints_21() {
    assert_eq!(run_fixture("bound-call"), "21\n");
}

#[test]
fn test_instance_base_override_prints_111_then_21() {
    // The override only affects the written instance; the second instance
    // still resolves `base` from the class.
    assert_eq!(run_fixture("instance-base-override"), "111\n21\n");
}

#[test]
fn test_every_fixture_matches_its_expected_output() {
    for fixture in FIXTURES {
        let mut expected = fixture.expected.join("\n");
        expected.push('\n');
        assert_eq!(run_fixture(fixture.name), expected, "{}", fixture.name);
    }
}

#[test]
fn test_shadowed_call_never_touches_instance_contents() {
    // The plain call path bypasses the class method entirely, so the
    // method's `self.contents` write never happens.
    let fixture = find("shadowed-call").unwrap_or_else(|| panic!("fixture must exist"));
    let program = (fixture.build)();
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new(&program)
        .print_handler(handler)
        .build();
    interp.run().unwrap_or_else(|err| panic!("run failed: {err}"));

    let Some(Value::Instance(instance)) = interp.global("instance") else {
        panic!("instance must be bound at module level");
    };
    let contents = program.interner.intern("contents");
    assert!(get_attr(&instance, contents).is_none());
}

#[test]
fn test_bound_call_stores_instance_contents() {
    let fixture = find("bound-call").unwrap_or_else(|| panic!("fixture must exist"));
    let program = (fixture.build)();
    let handler = buffer_handler();
    let mut interp = InterpreterBuilder::new(&program)
        .print_handler(handler)
        .build();
    interp.run().unwrap_or_else(|err| panic!("run failed: {err}"));

    let Some(Value::Instance(instance)) = interp.global("instance") else {
        panic!("instance must be bound at module level");
    };
    let contents = program.interner.intern("contents");
    assert_eq!(
        get_attr(&instance, contents),
        Some((Value::int(21), AttrOrigin::Instance))
    );
}
