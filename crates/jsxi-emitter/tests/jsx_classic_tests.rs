//! Classic factory-call lowering (`jsx: react`).

use jsxi_checker::{JsxEmitResolver, JsxEmitStrategy};
use jsxi_common::{EntityName, JsxEmit, JsxReferenceKind, ScriptTarget};
use jsxi_emitter::{PrinterOptions, emit_source_file};
use jsxi_parser::parser::VariableKeyword;
use jsxi_parser::{NodeIndex, SourceBuilder};

fn react_resolver() -> JsxEmitResolver {
    JsxEmitResolver::new(JsxEmitStrategy::Namespace {
        react_namespace: "React".to_string(),
        factory_entity: None,
        fragment_factory_entity: None,
    })
}

fn classic(target: ScriptTarget) -> PrinterOptions {
    PrinterOptions {
        target,
        jsx: JsxEmit::React,
        ..PrinterOptions::default()
    }
}

fn emit_with(b: SourceBuilder, resolver: &JsxEmitResolver, options: &PrinterOptions) -> String {
    let (arena, _) = b.finish();
    emit_source_file(&arena, resolver, options)
}

fn emit(b: SourceBuilder) -> String {
    emit_with(b, &react_resolver(), &classic(ScriptTarget::ESNext))
}

#[test]
fn element_without_attributes_passes_null_props() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| b.self_closing("div", |_| vec![]));
    assert_eq!(emit(b), "React.createElement(\"div\", null);\n");
}

#[test]
fn attributes_and_children_become_arguments() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| {
        b.element(
            "div",
            |b| {
                vec![
                    b.attr_string("id", "a"),
                    b.attr("disabled"),
                    b.attr_expr("onClick", |b| b.ident("handler")),
                ]
            },
            |b| vec![b.text("Hello &amp; bye"), b.expr_child(|b| b.ident("name"))],
        )
    });
    assert_eq!(
        emit(b),
        "React.createElement(\"div\", { id: \"a\", disabled: true, onClick: handler },\n    \"Hello & bye\",\n    name);\n"
    );
}

#[test]
fn single_child_stays_on_the_call_line() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| {
        b.element(
            "p",
            |_| vec![],
            |b| {
                vec![
                    b.text("\n  "),
                    b.self_closing("b", |_| vec![]),
                    b.text("\n"),
                ]
            },
        )
    });
    assert_eq!(
        emit(b),
        "React.createElement(\"p\", null, React.createElement(\"b\", null));\n"
    );
}

#[test]
fn multi_line_text_is_folded_into_one_string() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| {
        b.element("p", |_| vec![], |b| vec![b.text("\n    Hello\n\n    world  \n  ")])
    });
    assert_eq!(emit(b), "React.createElement(\"p\", null, \"Hello world\");\n");
}

#[test]
fn empty_expressions_are_dropped_or_undefined() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| {
        b.element(
            "div",
            |b| vec![b.attr_expr("title", |_| NodeIndex::NONE)],
            |b| vec![b.empty_expr_child()],
        )
    });
    assert_eq!(emit(b), "React.createElement(\"div\", { title: void 0 });\n");
}

#[test]
fn object_spread_is_kept_from_es2018() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| {
        b.self_closing("div", |b| {
            vec![
                b.spread(|b| b.ident("a")),
                b.attr_string("id", "x"),
                b.spread(|b| b.ident("b")),
            ]
        })
    });
    assert_eq!(
        emit_with(b, &react_resolver(), &classic(ScriptTarget::ES2018)),
        "React.createElement(\"div\", { ...a, id: \"x\", ...b });\n"
    );
}

#[test]
fn object_spread_uses_object_assign_before_es2018() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| {
        b.self_closing("div", |b| {
            vec![
                b.spread(|b| b.ident("a")),
                b.attr_string("id", "x"),
                b.spread(|b| b.ident("b")),
            ]
        })
    });
    assert_eq!(
        emit_with(b, &react_resolver(), &classic(ScriptTarget::ES2015)),
        "React.createElement(\"div\", Object.assign({}, a, { id: \"x\" }, b));\n"
    );

    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| {
        b.self_closing("div", |b| vec![b.attr_string("id", "x"), b.spread(|b| b.ident("rest"))])
    });
    assert_eq!(
        emit_with(b, &react_resolver(), &classic(ScriptTarget::ES5)),
        "React.createElement(\"div\", Object.assign({ id: \"x\" }, rest));\n"
    );
}

#[test]
fn lone_spread_before_es2018_is_copied_into_a_fresh_object() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| b.self_closing("div", |b| vec![b.spread(|b| b.ident("props"))]));
    assert_eq!(
        emit_with(b, &react_resolver(), &classic(ScriptTarget::ES5)),
        "React.createElement(\"div\", Object.assign({}, props));\n"
    );
}

#[test]
fn value_tags_are_expressions_and_namespaced_names_are_strings() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| {
        b.self_closing("Foo.Bar", |b| vec![b.attr_expr("x", |b| b.number_lit("1"))])
    });
    b.expression_statement(|b| {
        b.self_closing("svg:rect", |b| vec![b.attr_string("xlink:href", "#a")])
    });
    b.expression_statement(|b| b.self_closing("this.Comp", |_| vec![]));
    assert_eq!(
        emit(b),
        concat!(
            "React.createElement(Foo.Bar, { x: 1 });\n",
            "React.createElement(\"svg:rect\", { \"xlink:href\": \"#a\" });\n",
            "React.createElement(this.Comp, null);\n",
        )
    );
}

#[test]
fn checker_classification_decides_string_tags() {
    let mut b = SourceBuilder::new("app.tsx");
    let mut opening = NodeIndex::NONE;
    b.expression_statement(|b| b.self_closing("my-widget", |_| vec![]));
    b.expression_statement(|b| {
        opening = b.self_closing("Widget", |_| vec![]);
        opening
    });
    b.expression_statement(|b| b.self_closing("Widget", |_| vec![]));
    let mut resolver = react_resolver();
    resolver.set_reference_kind(opening, JsxReferenceKind::Intrinsic);
    assert_eq!(
        emit_with(b, &resolver, &classic(ScriptTarget::ESNext)),
        concat!(
            "React.createElement(\"my-widget\", null);\n",
            "React.createElement(\"Widget\", null);\n",
            "React.createElement(Widget, null);\n",
        )
    );
}

#[test]
fn nested_jsx_in_attributes_is_lowered() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| {
        b.self_closing("Layout", |b| {
            vec![b.attr_expr("header", |b| b.self_closing("h1", |_| vec![]))]
        })
    });
    assert_eq!(
        emit(b),
        "React.createElement(Layout, { header: React.createElement(\"h1\", null) });\n"
    );
}

#[test]
fn fragment_uses_the_namespace_fragment() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| b.fragment(|b| vec![b.self_closing("span", |_| vec![])]));
    assert_eq!(
        emit(b),
        "React.createElement(React.Fragment, null, React.createElement(\"span\", null));\n"
    );
}

#[test]
fn configured_factory_and_fragment_entities_are_used() {
    let resolver = JsxEmitResolver::new(JsxEmitStrategy::Namespace {
        react_namespace: "React".to_string(),
        factory_entity: EntityName::parse("h"),
        fragment_factory_entity: EntityName::parse("Fragment"),
    });
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| {
        b.fragment(|b| vec![b.self_closing("a", |_| vec![]), b.self_closing("b", |_| vec![])])
    });
    assert_eq!(
        emit_with(b, &resolver, &classic(ScriptTarget::ESNext)),
        "h(Fragment, null,\n    h(\"a\", null),\n    h(\"b\", null));\n"
    );
}

#[test]
fn react_namespace_option_prefixes_the_factory() {
    let resolver = JsxEmitResolver::new(JsxEmitStrategy::Namespace {
        react_namespace: "Preact".to_string(),
        factory_entity: None,
        fragment_factory_entity: None,
    });
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| b.self_closing("div", |_| vec![]));
    assert_eq!(
        emit_with(b, &resolver, &classic(ScriptTarget::ESNext)),
        "Preact.createElement(\"div\", null);\n"
    );
}

#[test]
fn statements_keep_their_shape() {
    let mut b = SourceBuilder::new("app.tsx");
    b.comment("// leading comment");
    b.variable_statement(VariableKeyword::Const, "el", |b| b.self_closing("div", |_| vec![]));
    b.opaque_statement("function render() {}");
    b.return_statement(|b| b.parenthesized(|b| b.self_closing("span", |_| vec![])));
    assert_eq!(
        emit(b),
        concat!(
            "// leading comment\n",
            "const el = React.createElement(\"div\", null);\n",
            "function render() {}\n",
            "return (React.createElement(\"span\", null));\n",
        )
    );
}

#[test]
fn preserve_and_declaration_files_are_left_alone() {
    let mut b = SourceBuilder::new("app.tsx");
    b.expression_statement(|b| b.self_closing("div", |_| vec![]));
    let preserve = PrinterOptions {
        jsx: JsxEmit::Preserve,
        ..PrinterOptions::default()
    };
    assert_eq!(emit_with(b, &react_resolver(), &preserve), "<div />;\n");

    let mut b = SourceBuilder::new("types.d.ts");
    b.opaque_statement("declare const x: number;");
    assert_eq!(emit(b), "declare const x: number;\n");
}
