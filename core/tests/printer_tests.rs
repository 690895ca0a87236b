use kaiju::{Node, ParseOptions, Program, parse, parse_with_options, print};
use serde_json::Value;

/// Serialized tree with every position field removed.
fn shape(program: &Node<Program>) -> Value {
    let mut value = serde_json::to_value(program).expect("serialize");
    strip_positions(&mut value);
    value
}

fn strip_positions(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove("start");
            map.remove("end");
            map.remove("loc");
            map.values_mut().for_each(strip_positions);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_positions),
        _ => {}
    }
}

fn assert_round_trip_with(source: &str, options: &ParseOptions) {
    let original = parse_with_options(source, options)
        .unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"));
    let printed = print(&original);
    let reparsed = parse_with_options(&printed, options)
        .unwrap_or_else(|err| panic!("printed source does not parse: {err}\n{printed}"));
    assert_eq!(
        shape(&original),
        shape(&reparsed),
        "tree changed after printing {source:?} as:\n{printed}"
    );
}

fn assert_round_trip(source: &str) {
    assert_round_trip_with(source, &ParseOptions::default());
}

#[test]
fn test_simple_output() {
    let program = parse("a+b").expect("parse");
    assert_eq!(print(&program), "a + b;\n");

    let program = parse("if(x)y;else z").expect("parse");
    assert_eq!(print(&program), "if (x) y; else z;\n");

    let program = parse("").expect("parse");
    assert_eq!(print(&program), "");
}

#[test]
fn test_literals_keep_their_spelling() {
    let program = parse("x = [0x1F, 1e3, 'single', \"dbl\\n\", /a[/]b/gi, `t${y}\\n`];").expect("parse");
    let printed = print(&program);
    for raw in ["0x1F", "1e3", "'single'", "\"dbl\\n\"", "/a[/]b/gi", "`t${y}\\n`"] {
        assert!(printed.contains(raw), "{raw} missing from {printed}");
    }
}

#[test]
fn test_precedence_round_trips() {
    for source in [
        "a + b * c;",
        "(a + b) * c;",
        "a - (b - c);",
        "(a - b) - c;",
        "a ** b ** c;",
        "(a ** b) ** c;",
        "(-a) ** b;",
        "a || b && c;",
        "(a || b) && c;",
        "a ? b : c ? d : e;",
        "(a ? b : c) ? d : e;",
        "a = b ? (c, d) : e;",
        "(a = b) ? c : d;",
        "x = (a, b);",
        "f((a, b), c);",
        "- -a;",
        "+ +a;",
        "- --a;",
        "a + +b;",
        "a - -b;",
        "a++ + ++b;",
        "typeof typeof a;",
        "void 0, delete a[b];",
        "!(a instanceof B);",
        "(a in b) in c;",
        "a = b = c;",
        "a += b -= c;",
    ] {
        assert_round_trip(source);
    }
}

#[test]
fn test_call_and_member_round_trips() {
    for source in [
        "a.b.c();",
        "a[b][c](d)(e);",
        "new Foo;",
        "new Foo(a, ...b);",
        "new a.b.C();",
        "new (foo())();",
        "new (foo().bar)();",
        "new (foo.bar())();",
        "new new A()();",
        "(new A).b;",
        "(1).toString();",
        "1.5.toFixed();",
        "(a + b).c;",
        "(a, b).c;",
        "(() => a)();",
        "(async () => a)();",
        "(function () {})();",
        "tag`a${b}c`;",
        "a.b`x`;",
        "super_ = this.x;",
    ] {
        assert_round_trip(source);
    }
}

#[test]
fn test_statement_start_ambiguity() {
    for source in [
        "({});",
        "({ a } = b);",
        "({}).toString();",
        "(function () {});",
        "(function f() {}).call(x);",
        "(class {});",
        "(class A {}).name;",
        "({ a: 1 }).a + 1;",
        "[a] = b;",
        "let x = { a };",
        "x = function () {};",
        "(async function () {});",
        "a => ({ b });",
        "() => ({}).x;",
    ] {
        assert_round_trip(source);
    }
}

#[test]
fn test_function_and_class_round_trips() {
    for source in [
        "function f(a, b = 1, ...c) { return a; }",
        "function* g() { yield; yield a; yield* b; }",
        "async function h() { await a; return await b; }",
        "var f = async (a, { b }, [c] = []) => { return a; };",
        "var f = async x => x;",
        "var f = a => b => c;",
        "var f = () => {};",
        "class A extends B { constructor() { super(); super.m(); } static s() {} get g() { return 1; } set g(v) {} *gen() {} async am() {} [k]() {} static() {} }",
        "x = class extends mixin(A) {};",
        "x = { a, b: 1, [c]: 2, d() {}, get e() { return 1; }, set e(v) {}, async f() {}, *g() {}, ...h, 'str': 1, 3: 4, if: 5 };",
    ] {
        assert_round_trip(source);
    }
}

#[test]
fn test_statement_round_trips() {
    for source in [
        "var a = 1, b; let c; const d = 2;",
        "if (a) { b(); } else if (c) d(); else e();",
        "if (a) if (b) c; else d;",
        "for (var i = 0, n = (a in b); i < n; i++) {}",
        "for (x = (a in b); ; ) break;",
        "for ((a in b).c in d) ;",
        "for (const [k, v] of map) {}",
        "for (x in y) ;",
        "for (;;) break;",
        "outer: for (;;) { inner: while (true) { continue outer; } }",
        "while (a) b--;",
        "do x++; while (x < 10)",
        "switch (x) { case 1: a(); break; case 2: default: b(); }",
        "try { a(); } catch ({ message }) { b(); } finally { c(); }",
        "throw new Error('x');",
        "with (obj) { a; }",
        "debugger;",
        ";",
        "{ let a; { const b = 1; } }",
        "[a, , b] = [, , c];",
        "[a, ,] = d;",
        "let { a, b: [c, d = 1], ...rest } = obj;",
        "x = `a${`b${c}`}`;",
        "x = /=/g.test(s) ? a / b / c : /[/]/;",
    ] {
        assert_round_trip(source);
    }
}

#[test]
fn test_return_allowed_at_top_level() {
    let options = ParseOptions::new().with_allow_return_outside_function(true);
    assert_round_trip_with("return a, b;", &options);
}

#[test]
fn test_module_round_trips() {
    let options = ParseOptions::module();
    for source in [
        "import 'a';",
        "import a, { b as c, default as d } from 'm';",
        "import e, * as ns from 'm';",
        "export { a, b as c };",
        "export { default as x } from 'm';",
        "export * from 'm';",
        "export var a = 1;",
        "export function f() {}",
        "export async function g() {}",
        "export class C {}",
        "export default function () {}",
        "export default class {}",
        "export default (function () {});",
        "export default (class {});",
        "export default a + b;",
        "export default { a };",
    ] {
        assert_round_trip_with(source, &options);
    }
}

#[test]
fn test_printing_is_idempotent() {
    let source = "function f(a){if(a){return a*2}else{for(;;){break}}}x={a,b:[1,,2]};";
    let program = parse(source).expect("parse");
    let once = print(&program);
    let twice = print(&parse(&once).expect("reparse"));
    assert_eq!(once, twice);
}
