//! Built-in conformance fixtures.
//!
//! Each fixture is a small program whose printed output pins down one
//! corner of the dynamic object model: shadowing precedence, bound-method
//! receiver injection, and per-instance attribute overrides. The caster
//! must reproduce these programs' observable behavior exactly, so their
//! expected output is part of the fixture.

use recast_ir::{ClassMember, Program, ProgramBuilder};

/// A named conformance fixture.
pub struct Fixture {
    pub name: &'static str,
    pub description: &'static str,
    /// Expected stdout, one element per printed line.
    pub expected: &'static [&'static str],
    pub build: fn() -> Program,
}

/// All built-in fixtures.
pub const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "shadowed-call",
        description: "instance attribute shadows a class method; the call is plain",
        expected: &["11"],
        build: shadowed_call,
    },
    Fixture {
        name: "bound-call",
        description: "unshadowed class method call injects the receiver",
        expected: &["21"],
        build: bound_call,
    },
    Fixture {
        name: "instance-base-override",
        description: "per-instance attribute override leaves other instances untouched",
        expected: &["111", "21"],
        build: instance_base_override,
    },
];

/// Find a fixture by name.
pub fn find(name: &str) -> Option<&'static Fixture> {
    FIXTURES.iter().find(|fixture| fixture.name == name)
}

/// Shared preamble: module bindings, helper functions, and the class.
///
/// ```text
/// base_init = 10
/// def id(x): return x
/// def call(x, y): return x(y)
/// def foo(a, b): return call(id, a + b)
/// class Foo:
///     base = base_init
///     def foo(self, a, b):
///         self.contents = id(a + b + self.base)
///         return self.contents
/// ```
fn preamble(b: &mut ProgramBuilder) {
    let ten = b.int(10);
    let assign = b.assign("base_init", ten);
    b.push(assign);

    let x = b.ident("x");
    let ret = b.ret(x);
    let def_id = b.def("id", &["x"], vec![ret]);
    b.push(def_id);

    let x = b.ident("x");
    let y = b.ident("y");
    let apply = b.call(x, vec![y]);
    let ret = b.ret(apply);
    let def_call = b.def("call", &["x", "y"], vec![ret]);
    b.push(def_call);

    let a = b.ident("a");
    let bb = b.ident("b");
    let sum = b.add(a, bb);
    let call_ref = b.ident("call");
    let id_ref = b.ident("id");
    let apply = b.call(call_ref, vec![id_ref, sum]);
    let ret = b.ret(apply);
    let def_foo = b.def("foo", &["a", "b"], vec![ret]);
    b.push(def_foo);

    let base_init = b.ident("base_init");
    let attr = b.attr_member("base", base_init);

    let a = b.ident("a");
    let bb = b.ident("b");
    let ab = b.add(a, bb);
    let self_ref = b.ident("self");
    let base = b.field(self_ref, "base");
    let total = b.add(ab, base);
    let id_ref = b.ident("id");
    let id_call = b.call(id_ref, vec![total]);
    let self_ref = b.ident("self");
    let store = b.assign_field(self_ref, "contents", id_call);
    let self_ref = b.ident("self");
    let contents = b.field(self_ref, "contents");
    let ret = b.ret(contents);
    let method = ClassMember::Method(b.function_def("foo", &["self", "a", "b"], vec![store, ret]));

    let class = b.class("Foo", vec![attr, method]);
    b.push(class);
}

/// `instance.foo = foo` makes the attribute call plain: no receiver, no
/// `self.base`, so the result is `5 + 6`.
fn shadowed_call() -> Program {
    let mut b = ProgramBuilder::new();
    preamble(&mut b);

    let foo_class = b.ident("Foo");
    let construct = b.call(foo_class, vec![]);
    let assign = b.assign("instance", construct);
    b.push(assign);

    let instance = b.ident("instance");
    let foo_fn = b.ident("foo");
    let shadow = b.assign_field(instance, "foo", foo_fn);
    b.push(shadow);

    let instance = b.ident("instance");
    let method = b.field(instance, "foo");
    let five = b.int(5);
    let six = b.int(6);
    let result = b.call(method, vec![five, six]);
    let print = b.print(result);
    b.push(print);

    b.finish()
}

/// The same class without the shadowing write: the class method runs with
/// the instance injected, so the result is `5 + 6 + 10`.
fn bound_call() -> Program {
    let mut b = ProgramBuilder::new();
    preamble(&mut b);

    let foo_class = b.ident("Foo");
    let construct = b.call(foo_class, vec![]);
    let assign = b.assign("instance", construct);
    b.push(assign);

    let instance = b.ident("instance");
    let method = b.field(instance, "foo");
    let five = b.int(5);
    let six = b.int(6);
    let result = b.call(method, vec![five, six]);
    let print = b.print(result);
    b.push(print);

    b.finish()
}

/// Overriding `base` on one instance changes that instance's bound-call
/// result to `5 + 6 + 100` without affecting a second instance.
fn instance_base_override() -> Program {
    let mut b = ProgramBuilder::new();
    preamble(&mut b);

    let foo_class = b.ident("Foo");
    let construct = b.call(foo_class, vec![]);
    let assign = b.assign("first", construct);
    b.push(assign);

    let foo_class = b.ident("Foo");
    let construct = b.call(foo_class, vec![]);
    let assign = b.assign("second", construct);
    b.push(assign);

    let first = b.ident("first");
    let hundred = b.int(100);
    let override_base = b.assign_field(first, "base", hundred);
    b.push(override_base);

    let first = b.ident("first");
    let method = b.field(first, "foo");
    let five = b.int(5);
    let six = b.int(6);
    let result = b.call(method, vec![five, six]);
    let print = b.print(result);
    b.push(print);

    let second = b.ident("second");
    let method = b.field(second, "foo");
    let five = b.int(5);
    let six = b.int(6);
    let result = b.call(method, vec![five, six]);
    let print = b.print(result);
    b.push(print);

    b.finish()
}
