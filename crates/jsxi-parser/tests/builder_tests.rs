use jsxi_parser::parser::node::VariableKeyword;
use jsxi_parser::{NodeIndex, SourceBuilder, syntax_kind_ext};

#[test]
fn element_spans_match_written_text() {
    let mut b = SourceBuilder::new("test.tsx");
    let mut element = NodeIndex::NONE;
    b.return_statement(|b| {
        element = b.element(
            "div",
            |b| vec![b.attr_string("class", "test2"), b.attr_expr("onkeydown", |b| b.opaque_expr("(ev) => {}"))],
            |b| vec![b.self_closing("span", |_| vec![])],
        );
        element
    });
    let (arena, _root) = b.finish();

    assert_eq!(
        arena.node_text(element),
        "<div class=\"test2\" onkeydown={(ev) => {}}><span /></div>"
    );
    let opening = arena.jsx_opening_like(element).expect("element has an opening tag");
    assert_eq!(arena.node_text(opening), "<div class=\"test2\" onkeydown={(ev) => {}}>");
    let opening_node = arena.get(opening).expect("opening node");
    let data = arena.get_jsx_opening(opening_node).expect("opening data");
    assert_eq!(arena.tag_name_text(data.tag_name).as_deref(), Some("div"));
    assert_eq!(arena.jsx_element_of_opening(opening), Some(element));

    let attrs = arena
        .get_jsx_attributes(arena.get(data.attributes).expect("attributes node"))
        .expect("attributes data");
    assert_eq!(attrs.properties.len(), 2);
    assert_eq!(arena.node_text(attrs.properties.nodes[0]), "class=\"test2\"");
    assert_eq!(
        arena.attribute_name_text(attrs.properties.nodes[1]).as_deref(),
        Some("onkeydown")
    );
    assert_eq!(arena.jsx_children(element).len(), 1);
}

#[test]
fn valueless_attribute_has_no_initializer() {
    let mut b = SourceBuilder::new("test.tsx");
    let mut attr = NodeIndex::NONE;
    b.expression_statement(|b| {
        b.self_closing("input", |b| {
            attr = b.attr("disabled");
            vec![attr]
        })
    });
    let (arena, _) = b.finish();
    assert_eq!(arena.node_text(attr), "disabled");
    let data = arena
        .get_jsx_attribute(arena.get(attr).expect("attr node"))
        .expect("attr data");
    assert!(data.initializer.is_none());
}

#[test]
fn dotted_and_namespaced_tag_names() {
    let mut b = SourceBuilder::new("test.tsx");
    let mut dotted = NodeIndex::NONE;
    let mut namespaced = NodeIndex::NONE;
    b.expression_statement(|b| {
        b.fragment(|b| {
            dotted = b.self_closing("Foo.Bar", |_| vec![]);
            namespaced = b.self_closing("svg:rect", |_| vec![]);
            vec![dotted, namespaced]
        })
    });
    let (arena, _) = b.finish();
    let tag = |idx: NodeIndex| {
        let node = arena.get(idx).expect("node");
        let data = arena.get_jsx_opening(node).expect("opening");
        (
            arena.kind_of(data.tag_name),
            arena.tag_name_text(data.tag_name),
        )
    };
    assert_eq!(
        tag(dotted),
        (
            Some(syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION),
            Some("Foo.Bar".to_string())
        )
    );
    assert_eq!(
        tag(namespaced),
        (
            Some(syntax_kind_ext::JSX_NAMESPACED_NAME),
            Some("svg:rect".to_string())
        )
    );
}

#[test]
fn whitespace_text_classification() {
    let mut b = SourceBuilder::new("test.tsx");
    let mut trivia = NodeIndex::NONE;
    let mut same_line = NodeIndex::NONE;
    let mut empty = NodeIndex::NONE;
    b.expression_statement(|b| {
        b.element("div", |_| vec![], |b| {
            trivia = b.text("\n    ");
            same_line = b.text(" ");
            empty = b.empty_expr_child();
            vec![trivia, same_line, empty]
        })
    });
    let (arena, _) = b.finish();
    assert!(!arena.is_semantic_jsx_child(trivia));
    assert!(arena.is_semantic_jsx_child(same_line));
    assert!(!arena.is_semantic_jsx_child(empty));
}

#[test]
fn source_file_carries_pragmas_and_statements() {
    let mut b = SourceBuilder::new("lib.d.ts");
    b.comment("/** @jsx h */");
    b.opaque_statement("declare function h(): void;");
    b.variable_statement(VariableKeyword::Const, "x", |b| b.number_lit("1"));
    let (arena, root) = b.finish();
    let (found, file) = arena.source_file().expect("source file");
    assert_eq!(found, root);
    assert!(file.is_declaration_file);
    assert_eq!(file.statements.len(), 2);
    assert_eq!(file.pragmas.jsx.as_ref().map(|p| p.value.as_str()), Some("h"));
    assert_eq!(arena.parent_of(file.statements.nodes[0]), root);
}
