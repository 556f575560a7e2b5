//! The attributes type builder and the attribute/children relation checks.

mod common;

use common::{JsxFixture, codes, single_expression, start_of, tag_of};
use jsxi_checker::jsx_names;
use jsxi_common::diagnostics::diagnostic_codes;
use jsxi_parser::NodeIndex;
use jsxi_solver::{TypeId, get_property_of_type};

/// React with `div: {}` and a single-member `ElementChildrenAttribute`.
fn react_with_children() -> JsxFixture {
    let mut f = JsxFixture::with_react(&[("div", TypeId::EMPTY_OBJECT)]);
    let children = vec![f.prop("children", TypeId::EMPTY_OBJECT)];
    f.jsx_interface(jsx_names::ELEMENT_CHILDREN_ATTRIBUTE, children, None);
    f
}

fn property_type(f: &JsxFixture, type_id: TypeId, name: &str) -> Option<TypeId> {
    get_property_of_type(&f.types, type_id, f.types.intern_string(name)).map(|p| p.type_id)
}

#[test]
fn spreads_keep_attribute_order() {
    let mut f = react_with_children();
    let s = f.object(&[("a", TypeId::STRING)]);
    f.declare_value("s", s);

    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.self_closing("div", |b| {
            vec![
                b.attr_expr("a", |b| b.number_lit("1")),
                b.spread(|b| b.ident("s")),
                b.attr_string("b", "x"),
            ]
        })
    });

    let mut checker = f.checker(&arena);
    let attributes = checker.create_jsx_attributes_type(element, None);
    assert!(!attributes.has_any_spread);
    assert_eq!(property_type(&f, attributes.type_id, "a"), Some(TypeId::STRING));
    assert_eq!(
        property_type(&f, attributes.type_id, "b"),
        Some(f.types.literal_string("x"))
    );
    let names: Vec<&str> = attributes.explicit.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn later_attribute_overrides_an_earlier_spread() {
    let mut f = react_with_children();
    let s = f.object(&[("a", TypeId::STRING)]);
    f.declare_value("s", s);

    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.self_closing("div", |b| vec![b.spread(|b| b.ident("s")), b.attr_expr("a", |b| b.number_lit("2"))])
    });

    let mut checker = f.checker(&arena);
    let attributes = checker.create_jsx_attributes_type(element, None);
    assert_eq!(
        property_type(&f, attributes.type_id, "a"),
        Some(f.types.literal_number(2.0))
    );
}

#[test]
fn valueless_attribute_is_true() {
    let f = react_with_children();
    let (arena, element) = single_expression("app.tsx", &[], |b| b.self_closing("div", |b| vec![b.attr("hidden")]));

    let mut checker = f.checker(&arena);
    let attributes = checker.create_jsx_attributes_type(element, None);
    assert_eq!(property_type(&f, attributes.type_id, "hidden"), Some(TypeId::BOOLEAN_TRUE));
}

#[test]
fn any_spread_makes_the_attributes_any() {
    let mut f = react_with_children();
    f.declare_value("props", TypeId::ANY);

    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.self_closing("div", |b| vec![b.attr_string("a", "1"), b.spread(|b| b.ident("props"))])
    });

    let mut checker = f.checker(&arena);
    let attributes = checker.create_jsx_attributes_type(element, None);
    assert!(attributes.has_any_spread);
    assert_eq!(attributes.type_id, TypeId::ANY);
}

#[test]
fn non_object_spread_is_intersected() {
    let mut f = react_with_children();
    f.declare_value("n", TypeId::NUMBER);

    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.self_closing("div", |b| vec![b.attr_string("a", "1"), b.spread(|b| b.ident("n"))])
    });

    let mut checker = f.checker(&arena);
    let attributes = checker.create_jsx_attributes_type(element, None);
    let members = f.types.intersection_members(attributes.type_id).unwrap_or_default();
    assert!(members.contains(&TypeId::NUMBER), "{members:?}");
    assert_eq!(members.len(), 2);
}

#[test]
fn single_child_is_the_children_type() {
    let f = react_with_children();
    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.element("div", |_| vec![], |b| vec![b.text("hi")])
    });

    let opening = arena.jsx_opening_like(element).unwrap_or(element);
    let mut checker = f.checker(&arena);
    let attributes = checker.create_jsx_attributes_type(opening, None);
    let children = attributes.children.expect("children prop");
    assert_eq!(children.prop_name, "children");
    assert_eq!(children.type_id, TypeId::STRING);
    assert_eq!(property_type(&f, attributes.type_id, "children"), Some(TypeId::STRING));
}

#[test]
fn several_children_form_an_array() {
    let f = react_with_children();
    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.element(
            "div",
            |_| vec![],
            |b| vec![b.text("hi"), b.expr_child(|b| b.number_lit("1"))],
        )
    });

    let opening = arena.jsx_opening_like(element).unwrap_or(element);
    let mut checker = f.checker(&arena);
    let attributes = checker.create_jsx_attributes_type(opening, None);
    let children = attributes.children.expect("children prop");
    let expected = f
        .types
        .array(f.types.union2(TypeId::STRING, f.types.literal_number(1.0)));
    assert_eq!(children.type_id, expected);
    assert_eq!(children.children.len(), 2);
}

#[test]
fn tuple_contextual_children_form_a_tuple() {
    let f = react_with_children();
    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.element(
            "div",
            |_| vec![],
            |b| vec![b.text("hi"), b.expr_child(|b| b.number_lit("1"))],
        )
    });
    let expected = f.types.tuple(vec![TypeId::STRING, TypeId::NUMBER]);
    let contextual = f.object(&[("children", expected)]);

    let opening = arena.jsx_opening_like(element).unwrap_or(element);
    let mut checker = f.checker(&arena);
    let attributes = checker.create_jsx_attributes_type(opening, Some(contextual));
    let children = attributes.children.expect("children prop");
    assert_eq!(
        children.type_id,
        f.types.tuple(vec![TypeId::STRING, f.types.literal_number(1.0)])
    );
}

#[test]
fn whitespace_only_children_still_synthesize_an_empty_children_array() {
    let f = react_with_children();
    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.element(
            "div",
            |b| vec![b.attr_string("children", "x")],
            |b| vec![b.text("\n    ")],
        )
    });

    let opening = arena.jsx_opening_like(element).unwrap_or(element);
    let mut checker = f.checker(&arena);
    let attributes = checker.create_jsx_attributes_type(opening, None);
    let children = attributes.children.expect("children prop");
    assert!(children.children.is_empty());
    assert_eq!(children.type_id, f.types.array(TypeId::NEVER));
    assert_eq!(property_type(&f, attributes.type_id, "children"), Some(children.type_id));
    assert_eq!(
        codes(&checker.ctx.diagnostics),
        vec![diagnostic_codes::ARE_SPECIFIED_TWICE_THE_ATTRIBUTE_NAMED_WILL_BE_OVERWRITTEN]
    );
}

#[test]
fn childless_element_has_no_children_prop() {
    let f = react_with_children();
    let (arena, element) = single_expression("app.tsx", &[], |b| b.element("div", |_| vec![], |_| vec![]));

    let opening = arena.jsx_opening_like(element).unwrap_or(element);
    let mut checker = f.checker(&arena);
    let attributes = checker.create_jsx_attributes_type(opening, None);
    assert!(attributes.children.is_none());
    assert_eq!(attributes.type_id, TypeId::EMPTY_OBJECT);
}

#[test]
fn attribute_symbols_point_back_at_their_attribute() {
    let f = react_with_children();
    let mut attr = NodeIndex::NONE;
    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.self_closing("div", |b| {
            attr = b.attr_string("title", "t");
            vec![attr]
        })
    });

    let mut checker = f.checker(&arena);
    let attributes = checker.create_jsx_attributes_type(element, None);
    let symbol = attributes.explicit[0].symbol;
    assert_eq!(checker.get_jsx_attribute_target(symbol), Some(attr));

    // Building again reuses the same symbol.
    let again = checker.create_jsx_attributes_type(element, None);
    assert_eq!(again.explicit[0].symbol, symbol);
}

#[test]
fn missing_required_prop_is_reported_at_the_tag() {
    let mut f = react_with_children();
    let props = f.object(&[("name", TypeId::STRING)]);
    let comp = f.function_component(props, f.element_type);
    f.declare_function("Comp", comp);

    let (arena, element) = single_expression("app.tsx", &[], |b| b.self_closing("Comp", |_| vec![]));
    let diagnostics = f.check(&arena);
    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::PROPERTY_IS_MISSING_IN_TYPE_BUT_REQUIRED_IN_TYPE]
    );
    assert_eq!(
        diagnostics[0].message_text,
        "Property 'name' is missing in type '{}' but required in type '{ name: string; }'."
    );
    assert_eq!(diagnostics[0].start, start_of(&arena, tag_of(&arena, element)));
}

#[test]
fn mismatched_component_prop_is_reported_on_the_attribute() {
    let mut f = react_with_children();
    let props = f.object(&[("name", TypeId::STRING)]);
    let comp = f.function_component(props, f.element_type);
    f.declare_function("Comp", comp);

    let mut attr = NodeIndex::NONE;
    let (arena, _) = single_expression("app.tsx", &[], |b| {
        b.self_closing("Comp", |b| {
            attr = b.attr_expr("name", |b| b.number_lit("4"));
            vec![attr]
        })
    });
    let diagnostics = f.check(&arena);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE]);
    assert_eq!(diagnostics[0].message_text, "Type '4' is not assignable to type 'string'.");
    let name_node = arena
        .get(attr)
        .and_then(|node| arena.get_jsx_attribute(node))
        .map_or(NodeIndex::NONE, |data| data.name);
    assert_eq!(diagnostics[0].start, start_of(&arena, name_node));
}

#[test]
fn single_child_for_an_array_children_prop() {
    let mut f = react_with_children();
    let props = f.object(&[("children", f.types.array(TypeId::STRING))]);
    let comp = f.function_component(props, f.element_type);
    f.declare_function("Comp", comp);

    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.element("Comp", |_| vec![], |b| vec![b.text("hi")])
    });
    let diagnostics = f.check(&arena);
    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::THIS_JSX_TAGS_PROP_EXPECTS_TYPE_WHICH_REQUIRES_MULTIPLE_CHILDREN_BUT_ONLY_A_SINGLE_CHILD_WAS_PROVIDED]
    );
    assert_eq!(
        diagnostics[0].message_text,
        "This JSX tag's 'children' prop expects type 'string[]' which requires multiple children, but only a single child was provided."
    );
    assert_eq!(diagnostics[0].start, start_of(&arena, tag_of(&arena, element)));
}

#[test]
fn several_children_for_a_single_child_prop() {
    let mut f = react_with_children();
    let props = f.object(&[("children", TypeId::STRING)]);
    let comp = f.function_component(props, f.element_type);
    f.declare_function("Comp", comp);

    let (arena, _) = single_expression("app.tsx", &[], |b| {
        b.element(
            "Comp",
            |_| vec![],
            |b| vec![b.expr_child(|b| b.string_lit("a")), b.expr_child(|b| b.string_lit("b"))],
        )
    });
    let diagnostics = f.check(&arena);
    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::THIS_JSX_TAGS_PROP_EXPECTS_A_SINGLE_CHILD_OF_TYPE_BUT_MULTIPLE_CHILDREN_WERE_PROVIDED]
    );
    assert_eq!(
        diagnostics[0].message_text,
        "This JSX tag's 'children' prop expects a single child of type 'string', but multiple children were provided."
    );
}

#[test]
fn each_bad_child_of_an_array_children_prop_is_reported() {
    let mut f = react_with_children();
    let props = f.object(&[("children", f.types.array(TypeId::STRING))]);
    let comp = f.function_component(props, f.element_type);
    f.declare_function("Comp", comp);

    let mut bad = NodeIndex::NONE;
    let (arena, _) = single_expression("app.tsx", &[], |b| {
        b.element(
            "Comp",
            |_| vec![],
            |b| {
                let ok = b.expr_child(|b| b.string_lit("a"));
                bad = b.expr_child(|b| b.number_lit("1"));
                vec![ok, bad]
            },
        )
    });
    let diagnostics = f.check(&arena);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE]);
    assert_eq!(diagnostics[0].message_text, "Type '1' is not assignable to type 'string'.");
    assert_eq!(diagnostics[0].start, start_of(&arena, bad));
}
