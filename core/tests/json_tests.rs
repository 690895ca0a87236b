use kaiju::{KaijuError, ParseOptions, parse, parse_to_json, to_json, to_json_pretty};
use serde_json::{Value, json};

fn file_with(source: &str, options: &ParseOptions) -> Value {
    let text = parse_to_json(source, options)
        .unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"));
    serde_json::from_str(&text).expect("output is valid JSON")
}

fn file(source: &str) -> Value {
    file_with(source, &ParseOptions::default())
}

/// The `Program` inside the `File` envelope.
fn tree(source: &str) -> Value {
    file(source)["program"].clone()
}

fn module_tree(source: &str) -> Value {
    file_with(source, &ParseOptions::module())["program"].clone()
}

/// Expression of the first statement.
fn first_expression(source: &str) -> Value {
    tree(source)["body"][0]["expression"].clone()
}

#[test]
fn test_program_shape() {
    let program = tree("1 + 2;");
    assert_eq!(program["type"], "Program");
    assert_eq!(program["sourceType"], "script");
    assert_eq!(program["start"], 0);
    assert_eq!(program["end"], 6);
    assert_eq!(program["loc"]["start"], json!({ "line": 1, "column": 0 }));
    assert_eq!(program["loc"]["end"], json!({ "line": 1, "column": 6 }));

    let statement = &program["body"][0];
    assert_eq!(statement["type"], "ExpressionStatement");
    let expression = &statement["expression"];
    assert_eq!(expression["type"], "BinaryExpression");
    assert_eq!(expression["operator"], "+");
    assert_eq!(expression["start"], 0);
    assert_eq!(expression["end"], 5);
}

#[test]
fn test_file_envelope() {
    let envelope = file("a;\n");
    assert_eq!(envelope["type"], "File");
    assert_eq!(envelope["start"], 0);
    assert_eq!(envelope["end"], 3);
    assert_eq!(envelope["loc"]["end"], json!({ "line": 2, "column": 0 }));
    assert_eq!(envelope["program"]["type"], "Program");
    assert_eq!(envelope["program"]["end"], 3);
    assert_eq!(envelope["program"]["directives"], json!([]));
    assert_eq!(envelope["comments"], json!([]));
}

#[test]
fn test_directives_stay_in_body() {
    let program = tree("'use strict';\nx;");
    assert_eq!(program["directives"], json!([]));
    assert_eq!(program["body"][0]["type"], "ExpressionStatement");
    assert_eq!(program["body"][0]["expression"]["value"], "use strict");
}

#[test]
fn test_comments() {
    let envelope = file("// line\nlet a = /* inline */ 1; /* block\n */");
    let comments = envelope["comments"].as_array().expect("comments");
    assert_eq!(comments.len(), 3);
    assert_eq!(comments[0]["type"], "CommentLine");
    assert_eq!(comments[0]["value"], " line");
    assert_eq!(comments[0]["start"], 0);
    assert_eq!(comments[0]["end"], 7);
    assert_eq!(comments[1]["type"], "CommentBlock");
    assert_eq!(comments[1]["value"], " inline ");
    assert_eq!(comments[1]["loc"]["start"], json!({ "line": 2, "column": 8 }));
    assert_eq!(comments[2]["value"], " block\n ");
    assert_eq!(comments[2]["loc"]["end"], json!({ "line": 3, "column": 3 }));
    // comments never appear inside the program itself
    assert!(envelope["program"].get("comments").is_none());
}

#[test]
fn test_identifier_name_in_loc() {
    let program = tree("console.log(x);");
    let callee = &program["body"][0]["expression"]["callee"];
    assert_eq!(callee["object"]["loc"]["identifierName"], "console");
    assert_eq!(callee["property"]["loc"]["identifierName"], "log");
    assert_eq!(callee["loc"].get("identifierName"), None);

    let declaration = &tree("function f([a]) { label: for (;;) break label; }")["body"][0];
    assert_eq!(declaration["id"]["loc"]["identifierName"], "f");
    assert_eq!(declaration["params"][0]["elements"][0]["loc"]["identifierName"], "a");
    assert_eq!(declaration["params"][0]["loc"].get("identifierName"), None);
    assert_eq!(declaration["body"]["body"][0]["label"]["loc"]["identifierName"], "label");
}

#[test]
fn test_module_source_type() {
    assert_eq!(module_tree("export {};")["sourceType"], "module");
}

#[test]
fn test_numeric_literal() {
    let literal = first_expression("0x1F;");
    assert_eq!(literal["type"], "NumericLiteral");
    assert_eq!(literal["value"], 31);
    assert!(literal["value"].is_i64());
    assert_eq!(literal["extra"]["raw"], "0x1F");

    let literal = first_expression("1.5;");
    assert_eq!(literal["value"], 1.5);
}

#[test]
fn test_string_literal() {
    let literal = first_expression(r#""a\nb";"#);
    assert_eq!(literal["type"], "StringLiteral");
    assert_eq!(literal["value"], "a\nb");
    assert_eq!(literal["extra"]["raw"], r#""a\nb""#);
}

#[test]
fn test_other_literals() {
    assert_eq!(first_expression("null;")["type"], "NullLiteral");
    assert_eq!(first_expression("true;")["value"], true);
    let regex = first_expression("/a+/g;");
    assert_eq!(regex["type"], "RegExpLiteral");
    assert_eq!(regex["pattern"], "a+");
    assert_eq!(regex["flags"], "g");
}

#[test]
fn test_template_literal() {
    let template = first_expression(r"`x\n${y}`;");
    assert_eq!(template["type"], "TemplateLiteral");
    let quasis = template["quasis"].as_array().expect("quasis");
    assert_eq!(quasis.len(), 2);
    assert_eq!(quasis[0]["type"], "TemplateElement");
    assert_eq!(quasis[0]["value"]["raw"], r"x\n");
    assert_eq!(quasis[0]["value"]["cooked"], "x\n");
    assert_eq!(quasis[0]["tail"], false);
    assert_eq!(quasis[1]["tail"], true);
    assert_eq!(template["expressions"][0]["name"], "y");
}

#[test]
fn test_missing_children_are_null() {
    let statement = &tree("if (a) b;")["body"][0];
    assert_eq!(statement["type"], "IfStatement");
    assert!(statement["alternate"].is_null());
    assert!(statement.as_object().expect("object").contains_key("alternate"));

    let array = first_expression("[a, , b];");
    assert!(array["elements"][1].is_null());
    assert_eq!(array["elements"].as_array().map(Vec::len), Some(3));

    let function = first_expression("(function () {});");
    assert!(function["id"].is_null());
}

#[test]
fn test_function_flags() {
    let function = &tree("async function f(a) {}")["body"][0];
    assert_eq!(function["type"], "FunctionDeclaration");
    assert_eq!(function["id"]["type"], "Identifier");
    assert_eq!(function["id"]["name"], "f");
    assert_eq!(function["async"], true);
    assert_eq!(function["generator"], false);
    assert_eq!(function["params"][0]["type"], "Identifier");
    assert_eq!(function["body"]["type"], "BlockStatement");

    let arrow = first_expression("(a) => a;");
    assert_eq!(arrow["type"], "ArrowFunctionExpression");
    assert_eq!(arrow["expression"], true);
    assert_eq!(arrow["body"]["type"], "Identifier");
}

#[test]
fn test_class_shape() {
    let class = &tree("class A extends B { static m() {} get x() { return 1; } }")["body"][0];
    assert_eq!(class["type"], "ClassDeclaration");
    assert_eq!(class["superClass"]["name"], "B");
    assert_eq!(class["body"]["type"], "ClassBody");
    let methods = class["body"]["body"].as_array().expect("methods");
    assert_eq!(methods[0]["type"], "ClassMethod");
    assert_eq!(methods[0]["static"], true);
    assert_eq!(methods[0]["kind"], "method");
    assert_eq!(methods[1]["kind"], "get");
    assert_eq!(methods[1]["computed"], false);
}

#[test]
fn test_object_and_pattern_shapes() {
    let object = first_expression("({ a, [b]: 1, c() {}, ...d });");
    let properties = object["properties"].as_array().expect("properties");
    assert_eq!(properties[0]["type"], "ObjectProperty");
    assert_eq!(properties[0]["shorthand"], true);
    assert_eq!(properties[1]["computed"], true);
    assert_eq!(properties[2]["type"], "ObjectMethod");
    assert_eq!(properties[2]["kind"], "method");
    assert_eq!(properties[3]["type"], "SpreadElement");

    let declaration = &tree("let { a = 1, ...r } = o;")["body"][0];
    assert_eq!(declaration["type"], "VariableDeclaration");
    assert_eq!(declaration["kind"], "let");
    let declarator = &declaration["declarations"][0];
    assert_eq!(declarator["type"], "VariableDeclarator");
    assert_eq!(declarator["id"]["type"], "ObjectPattern");
    assert_eq!(declarator["id"]["properties"][0]["value"]["type"], "AssignmentPattern");
    assert_eq!(declarator["id"]["properties"][1]["type"], "RestElement");
}

#[test]
fn test_statement_shapes() {
    let program = tree("for (x of y) ; label: while (a) break label; try {} catch (e) {}");
    let body = program["body"].as_array().expect("body");
    assert_eq!(body[0]["type"], "ForOfStatement");
    assert_eq!(body[0]["left"]["type"], "Identifier");
    assert_eq!(body[0]["body"]["type"], "EmptyStatement");
    assert_eq!(body[1]["type"], "LabeledStatement");
    assert_eq!(body[1]["label"]["name"], "label");
    assert_eq!(body[1]["body"]["body"]["label"]["name"], "label");
    assert_eq!(body[2]["handler"]["type"], "CatchClause");
    assert!(body[2]["finalizer"].is_null());
}

#[test]
fn test_module_shapes() {
    let program = module_tree("import a, * as b from 'm'; export default 1; export * from 'n';");
    let body = program["body"].as_array().expect("body");
    assert_eq!(body[0]["type"], "ImportDeclaration");
    assert_eq!(body[0]["specifiers"][0]["type"], "ImportDefaultSpecifier");
    assert_eq!(body[0]["specifiers"][1]["type"], "ImportNamespaceSpecifier");
    assert_eq!(body[0]["source"]["value"], "m");
    assert_eq!(body[1]["type"], "ExportDefaultDeclaration");
    assert_eq!(body[1]["declaration"]["type"], "NumericLiteral");
    assert_eq!(body[2]["type"], "ExportAllDeclaration");
}

#[test]
fn test_operator_spelling() {
    assert_eq!(first_expression("a >>>= b;")["operator"], ">>>=");
    assert_eq!(first_expression("typeof a;")["operator"], "typeof");
    assert_eq!(first_expression("typeof a;")["prefix"], true);
    assert_eq!(first_expression("a++;")["prefix"], false);
    assert_eq!(first_expression("a && b;")["type"], "LogicalExpression");
    assert_eq!(first_expression("a instanceof b;")["operator"], "instanceof");
}

#[test]
fn test_pretty_and_compact_agree() {
    let program = parse("let a = [1, { b: 2 }];").expect("parse");
    let compact = to_json(&program).expect("serialize");
    let pretty = to_json_pretty(&program).expect("serialize");
    assert!(compact.starts_with(r#"{"type":"File""#));
    assert!(!compact.contains('\n'));
    assert!(pretty.contains('\n'));
    let compact: Value = serde_json::from_str(&compact).expect("json");
    let pretty: Value = serde_json::from_str(&pretty).expect("json");
    assert_eq!(compact, pretty);
}

#[test]
fn test_parse_error_through_json_api() {
    match parse_to_json("let x = ;", &ParseOptions::default()) {
        Err(KaijuError::Parse(err)) => assert_eq!(err.offset, 8),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_serialization_is_deterministic() {
    let source = "function f({ a }, ...b) { return `t${a}` + b.length; }";
    assert_eq!(
        parse_to_json(source, &ParseOptions::default()).expect("json"),
        parse_to_json(source, &ParseOptions::default()).expect("json")
    );
}
