use kaiju::{ParseOptions, parse_to_json};
use serde_json::Value;

fn offsets(node: &Value) -> Option<(u64, u64)> {
    let start = node.get("start")?.as_u64()?;
    let end = node.get("end")?.as_u64()?;
    Some((start, end))
}

/// Walk every node under `value`, checking it lies within `parent` and
/// that nodes stored side by side in an array do not overlap.
fn check_nested(value: &Value, parent: (u64, u64), source: &str) {
    match value {
        Value::Object(map) => {
            let mut bounds = parent;
            if let Some((start, end)) = offsets(value) {
                assert!(start <= end, "inverted span {start}..{end} in {source:?}");
                assert!(
                    parent.0 <= start && end <= parent.1,
                    "{:?} at {start}..{end} escapes its parent {}..{} in {source:?}",
                    map.get("type"),
                    parent.0,
                    parent.1
                );
                bounds = (start, end);
            }
            for (key, child) in map {
                if key != "loc" {
                    check_nested(child, bounds, source);
                }
            }
        }
        Value::Array(items) => {
            let mut previous_end = parent.0;
            for item in items {
                if let Some((start, end)) = offsets(item) {
                    assert!(
                        previous_end <= start,
                        "sibling at {start}..{end} overlaps the one ending at {previous_end} in {source:?}"
                    );
                    previous_end = end;
                }
                check_nested(item, parent, source);
            }
        }
        _ => {}
    }
}

fn check_source(source: &str, options: &ParseOptions) {
    let text = parse_to_json(source, options)
        .unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"));
    let program: Value = serde_json::from_str(&text).expect("valid JSON");
    let root = offsets(&program).expect("file span");
    assert_eq!(root, (0, source.len() as u64), "file span of {source:?}");
    assert_eq!(offsets(&program["program"]), Some(root), "program span of {source:?}");
    check_nested(&program, root, source);
}

#[test]
fn test_script_spans_nest() {
    for source in [
        "1 + 2 * 3;",
        "let { a, b: [c, d = 1], ...rest } = obj, e = 2;",
        "function f(a, b = 1, ...c) { return a ? b : c; }",
        "x = async (a, [b]) => { await a; };",
        "y = a => b => a + b;",
        "class A extends B { constructor() { super(); } static get x() { return 1; } }",
        "o = { a, [b]: 1, c() {}, ...d, get e() { return 2; } };",
        "for (var i = 0; i < 10; i++) { if (i) continue; else break; }",
        "for (const k in obj) ; for ([a, b] of pairs) {}",
        "label: while (x) { do y--; while (y) }",
        "switch (x) { case 1: a(); default: b(); }",
        "try { a(); } catch ({ message }) { b(message); } finally { c(); }",
        "s = `head ${a + b} middle ${`inner ${c}`} tail`;",
        "t = tag`x${y}z`;",
        "r = /ab+c/gi.test(s) && new Foo(a, ...b).bar[baz]();",
        "[a, , b] = [, c];",
        "({ a = 1, b: { c } } = obj);",
        "function* g() { yield* other(); yield; }",
        "// leading comment\nvar a = 1; /* block */ a++;",
        "a = 1\nb = 2\n",
        "   \n  x  \n  ",
    ] {
        check_source(source, &ParseOptions::default());
    }
}

#[test]
fn test_module_spans_nest() {
    for source in [
        "import a, { b as c } from 'm';\nexport { c as d };",
        "import * as ns from 'ns';\nexport default class {}",
        "export var a = 1;\nexport function f() {}\nexport * from 'all';",
        "export default a + b;",
    ] {
        check_source(source, &ParseOptions::module());
    }
}

#[test]
fn test_loc_matches_offsets() {
    let source = "var a = 1;\nvar bb = 22;\n  c;";
    let text = parse_to_json(source, &ParseOptions::default()).expect("parse");
    let program: Value = serde_json::from_str(&text).expect("valid JSON");
    let third = &program["program"]["body"][2];
    assert_eq!(offsets(third), Some((26, 28)));
    assert_eq!(third["loc"]["start"]["line"], 3);
    assert_eq!(third["loc"]["start"]["column"], 2);
    assert_eq!(third["loc"]["end"]["column"], 4);

    let second = &program["program"]["body"][1]["declarations"][0]["init"];
    assert_eq!(offsets(second), Some((20, 22)));
    assert_eq!(second["loc"]["start"]["line"], 2);
    assert_eq!(second["loc"]["start"]["column"], 9);
}

#[test]
fn test_columns_count_characters() {
    let source = "s = 'héllo'; t;";
    let text = parse_to_json(source, &ParseOptions::default()).expect("parse");
    let program: Value = serde_json::from_str(&text).expect("valid JSON");
    let second = &program["program"]["body"][1];
    // byte offsets, but columns in characters
    assert_eq!(second["start"], 14);
    assert_eq!(second["loc"]["start"]["column"], 13);
}
