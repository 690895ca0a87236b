use kaiju::parser::ast::{ExportDefault, ExprKind, ImportSpecifier, Stmt, StmtKind};
use kaiju::{ParseError, ParseOptions, SourceType, parse_with_options};

fn parse_module(source: &str) -> Vec<Stmt> {
    let program = parse_with_options(source, &ParseOptions::module())
        .unwrap_or_else(|err| panic!("failed to parse {source:?}: {err}"));
    assert_eq!(program.kind.source_type, SourceType::Module);
    program.kind.body
}

fn module_err(source: &str) -> ParseError {
    match parse_with_options(source, &ParseOptions::module()) {
        Ok(program) => panic!("expected {source:?} to fail, got {program:?}"),
        Err(err) => err,
    }
}

fn import_specifiers(stmt: &Stmt) -> Vec<(&'static str, String)> {
    let StmtKind::ImportDeclaration { specifiers, .. } = &stmt.kind else {
        panic!("expected an import, got {:?}", stmt.kind);
    };
    specifiers
        .iter()
        .map(|specifier| match &specifier.kind {
            ImportSpecifier::ImportDefaultSpecifier { local } => ("default", local.kind.name.clone()),
            ImportSpecifier::ImportNamespaceSpecifier { local } => ("namespace", local.kind.name.clone()),
            ImportSpecifier::ImportSpecifier { imported, local } => {
                ("named", format!("{}:{}", imported.kind.name, local.kind.name))
            }
        })
        .collect()
}

#[test]
fn test_import_forms() {
    let body = parse_module(
        "import 'side-effect';\n\
         import a from './a.js';\n\
         import * as ns from './ns.js';\n\
         import { b, c as d, default as e } from './named.js';\n\
         import f, { g } from './mixed.js';\n\
         import h, * as i from './both.js';\n",
    );
    assert_eq!(body.len(), 6);
    assert!(import_specifiers(&body[0]).is_empty());
    assert_eq!(import_specifiers(&body[1]), vec![("default", "a".to_string())]);
    assert_eq!(import_specifiers(&body[2]), vec![("namespace", "ns".to_string())]);
    assert_eq!(
        import_specifiers(&body[3]),
        vec![
            ("named", "b:b".to_string()),
            ("named", "c:d".to_string()),
            ("named", "default:e".to_string()),
        ]
    );
    assert_eq!(
        import_specifiers(&body[4]),
        vec![("default", "f".to_string()), ("named", "g:g".to_string())]
    );
    assert_eq!(
        import_specifiers(&body[5]),
        vec![("default", "h".to_string()), ("namespace", "i".to_string())]
    );

    let StmtKind::ImportDeclaration { source, .. } = &body[1].kind else {
        unreachable!();
    };
    assert!(matches!(&source.kind, ExprKind::StringLiteral { value, .. } if value == "./a.js"));
}

#[test]
fn test_import_errors() {
    module_err("import { default } from 'm';");
    module_err("import a from m;");
    module_err("import a, b from 'm';");
    module_err("import * from 'm';");
    module_err("import { a } 'm';");
    module_err("import;");
}

#[test]
fn test_export_declarations() {
    let body = parse_module(
        "export var a = 1;\n\
         export let b, c;\n\
         export const d = 2;\n\
         export function e() {}\n\
         export async function f() {}\n\
         export class G {}\n",
    );
    assert_eq!(body.len(), 6);
    for stmt in &body {
        let StmtKind::ExportNamedDeclaration {
            declaration,
            specifiers,
            source,
        } = &stmt.kind
        else {
            panic!("expected a named export, got {:?}", stmt.kind);
        };
        assert!(declaration.is_some());
        assert!(specifiers.is_empty());
        assert!(source.is_none());
    }
    // the declaration span includes the terminating semicolon
    let StmtKind::ExportNamedDeclaration {
        declaration: Some(declaration),
        ..
    } = &body[0].kind
    else {
        unreachable!();
    };
    assert_eq!((declaration.span.start, declaration.span.end), (7, 17));
}

#[test]
fn test_export_lists() {
    let body = parse_module(
        "export { a, b as c };\n\
         export { default, x as if } from './m.js';\n\
         export * from './all.js';\n",
    );
    let StmtKind::ExportNamedDeclaration {
        specifiers, source, ..
    } = &body[0].kind
    else {
        panic!("expected named export");
    };
    assert_eq!(specifiers.len(), 2);
    assert_eq!(specifiers[1].kind.local.kind.name, "b");
    assert_eq!(specifiers[1].kind.exported.kind.name, "c");
    assert!(source.is_none());

    assert!(matches!(
        &body[1].kind,
        StmtKind::ExportNamedDeclaration { source: Some(_), .. }
    ));
    assert!(matches!(body[2].kind, StmtKind::ExportAllDeclaration { .. }));
}

#[test]
fn test_export_default_forms() {
    let body = parse_module(
        "export default function () {}\n\
         export default class {}\n\
         export default async function named() {}\n\
         export default a + b;\n",
    );
    let declarations: Vec<&ExportDefault> = body
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::ExportDefaultDeclaration { declaration } => declaration,
            other => panic!("expected default export, got {other:?}"),
        })
        .collect();

    let ExportDefault::Declaration(function) = declarations[0] else {
        panic!("expected a declaration");
    };
    assert!(matches!(&function.kind, StmtKind::FunctionDeclaration(f) if f.id.is_none()));
    let ExportDefault::Declaration(class) = declarations[1] else {
        panic!("expected a declaration");
    };
    assert!(matches!(&class.kind, StmtKind::ClassDeclaration(c) if c.id.is_none()));
    let ExportDefault::Declaration(function) = declarations[2] else {
        panic!("expected a declaration");
    };
    assert!(matches!(&function.kind, StmtKind::FunctionDeclaration(f) if f.is_async));
    assert!(matches!(
        declarations[3],
        ExportDefault::Expression(expr) if matches!(expr.kind, ExprKind::BinaryExpression { .. })
    ));
}

#[test]
fn test_export_errors() {
    module_err("export { default };");
    module_err("export { if as x };");
    module_err("export * as ns from 'm';");
    module_err("export a;");
    module_err("export async () => {};");
    module_err("export function () {}");
}

#[test]
fn test_imports_only_at_module_top_level() {
    let err = parse_with_options("import a from 'm';", &ParseOptions::default())
        .expect_err("scripts cannot import");
    assert_eq!(
        err.message,
        "`import` and `export` may only appear at the top level of a module"
    );
    module_err("{ import a from 'm'; }");
    module_err("function f() { export var a; }");
    module_err("if (x) export default 1;");
}

#[test]
fn test_module_code_still_parses_statements() {
    let body = parse_module("import a from 'a';\nconst b = a + 1;\nexport { b };");
    assert_eq!(body.len(), 3);
    assert!(matches!(body[1].kind, StmtKind::VariableDeclaration(_)));
}
