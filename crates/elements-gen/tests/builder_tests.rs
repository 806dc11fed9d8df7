//! Tests for the elements-gen builders

use elements_gen::{Allocator, FormatOptions, JsBuilder, ProgramBuilder, QuoteStyle};
use oxc_ast::ast::Statement;

#[test]
fn test_primitives() {
    let allocator = Allocator::default();
    let js = JsBuilder::new(&allocator);

    let stmt = js.const_decl("msg", js.string("hello"));
    let code = js.program(vec![stmt]).unwrap();
    assert!(code.contains(r#"const msg = "hello""#));

    let stmt = js.const_decl("flag", js.bool(true));
    let code = js.program(vec![stmt]).unwrap();
    assert!(code.contains("const flag = true"));
}

#[test]
fn test_objects_and_arrays() {
    let allocator = Allocator::default();
    let js = JsBuilder::new(&allocator);

    let entry = js.object(vec![
        js.prop("component", js.ident("IgxGridComponent")),
        js.prop("selector", js.string("igc-grid")),
        js.prop("parents", js.array(vec![])),
    ]);
    let stmt = js.const_decl("entries", js.array(vec![entry]));
    let code = js.program(vec![stmt]).unwrap();

    assert!(code.contains("const entries"));
    assert!(code.contains("component: IgxGridComponent"));
    assert!(code.contains(r#"selector: "igc-grid""#));
    assert!(code.contains("parents: []"));
}

#[test]
fn test_export_const() {
    let allocator = Allocator::default();
    let js = JsBuilder::new(&allocator);

    let decl = js.export_const("registerConfig", js.array(vec![js.ident("A")]));
    let code = js.program(vec![Statement::from(decl)]).unwrap();
    assert!(code.contains("export const registerConfig = [A]"));
}

#[test]
fn test_named_imports() {
    let allocator = Allocator::default();
    let js = JsBuilder::new(&allocator);

    let import_decl = js.import_named(vec!["IgxGridComponent", "IgxColumnComponent"], "./grid/grid.component");
    let code = js.program(vec![Statement::from(import_decl)]).unwrap();

    assert!(code.contains("import { IgxGridComponent, IgxColumnComponent }"));
    assert!(code.contains(r#"from "./grid/grid.component""#));
}

#[test]
fn test_single_quote_style() {
    let allocator = Allocator::default();
    let mut program = ProgramBuilder::new(&allocator);
    let stmt = program.js().const_decl("selector", program.js().string("igc-tabs"));
    program.push(stmt);

    let code = program
        .generate(&FormatOptions::with_quote_style(QuoteStyle::Single))
        .unwrap();
    assert!(code.contains("'igc-tabs'"));
}

#[test]
fn test_program_builder_tracks_len() {
    let allocator = Allocator::default();
    let mut program = ProgramBuilder::new(&allocator);
    assert!(program.is_empty());

    let a = program.js().const_decl("a", program.js().bool(false));
    let b = program.js().const_decl("b", program.js().bool(true));
    program.extend([a, b]);
    assert_eq!(program.len(), 2);

    let mut out = Vec::new();
    program.write_to(&mut out, &FormatOptions::default()).unwrap();
    let code = String::from_utf8(out).unwrap();
    assert!(code.contains("const a = false"));
    assert!(code.contains("const b = true"));
}

#[test]
fn test_strings_are_escaped() {
    let allocator = Allocator::default();
    let js = JsBuilder::new(&allocator);

    let stmt = js.const_decl("s", js.string("say \"hi\""));
    let code = js.program(vec![stmt]).unwrap();
    assert!(code.contains(r#"\"hi\""#) || code.contains(r#"'say "hi"'"#));
}
