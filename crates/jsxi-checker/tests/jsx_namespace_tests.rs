//! Conventional-namespace JSX: `React.JSX` (or a global `JSX`) supplies the
//! element, intrinsic and attribute types.

mod common;

use common::{JsxFixture, codes, single_expression, start_of, tag_of};
use jsxi_binder::{Scope, SymbolFlags};
use jsxi_checker::jsx_names;
use jsxi_common::diagnostics::diagnostic_codes;
use jsxi_common::{DiagnosticCategory, JsxEmit, JsxReferenceKind};
use jsxi_parser::{NodeIndex, SourceBuilder};
use jsxi_parser::parser::AttributeValue;
use jsxi_solver::TypeId;

fn div_attributes(f: &JsxFixture) -> TypeId {
    f.types.object(vec![
        f.optional("class", TypeId::STRING),
        f.optional("id", TypeId::NUMBER),
    ])
}

fn react_with_div() -> JsxFixture {
    let mut f = JsxFixture::new();
    f.declare_react("React");
    let element = vec![f.prop("type", TypeId::STRING)];
    f.element_type = f.jsx_interface(jsx_names::ELEMENT, element, None);
    let intrinsics = vec![
        f.prop("div", div_attributes(&f)),
        f.prop("span", TypeId::EMPTY_OBJECT),
    ];
    f.jsx_interface(jsx_names::INTRINSIC_ELEMENTS, intrinsics, None);
    f
}

#[test]
fn intrinsic_element_checks_against_intrinsic_elements() {
    let f = react_with_div();
    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.self_closing("div", |b| vec![b.attr_string("class", "x"), b.attr_expr("id", |b| b.number_lit("1"))])
    });

    let mut checker = f.checker(&arena);
    checker.check_source_file();
    assert!(checker.ctx.diagnostics.is_empty(), "{:?}", checker.ctx.diagnostics);
    assert_eq!(checker.get_jsx_reference_kind(element), JsxReferenceKind::Intrinsic);
    assert_eq!(checker.get_type_of_node(element), f.element_type);
}

#[test]
fn intrinsic_attribute_type_mismatch_is_reported_on_the_attribute() {
    let f = react_with_div();
    let mut id_attr = NodeIndex::NONE;
    let (arena, _) = single_expression("app.tsx", &[], |b| {
        b.self_closing("div", |b| {
            id_attr = b.attr_string("id", "one");
            vec![id_attr]
        })
    });

    let diagnostics = f.check(&arena);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE]);
    assert_eq!(diagnostics[0].message_text, "Type '\"one\"' is not assignable to type 'number'.");
    let name = arena
        .get(id_attr)
        .and_then(|n| arena.get_jsx_attribute(n))
        .map(|a| a.name)
        .unwrap_or(NodeIndex::NONE);
    assert_eq!(diagnostics[0].start, start_of(&arena, name));
}

#[test]
fn excess_intrinsic_attribute_is_reported() {
    let f = react_with_div();
    let (arena, _) = single_expression("app.tsx", &[], |b| b.self_closing("div", |b| vec![b.attr_string("clas", "x")]));

    let diagnostics = f.check(&arena);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE]);
    assert!(
        diagnostics[0]
            .message_text
            .contains("Property 'clas' does not exist on type"),
        "{}",
        diagnostics[0].message_text
    );
}

#[test]
fn hyphenated_attributes_are_never_excess() {
    let f = react_with_div();
    let (arena, _) = single_expression("app.tsx", &[], |b| {
        b.self_closing("div", |b| vec![b.attr_string("data-role", "x"), b.attr("aria-hidden")])
    });
    assert!(f.check(&arena).is_empty());
}

#[test]
fn unknown_intrinsic_reports_missing_property_once() {
    let f = react_with_div();
    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.element("p", |b| vec![b.attr_string("class", "x")], |b| vec![b.text("hi")])
    });

    let diagnostics = f.check(&arena);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE]);
    assert_eq!(
        diagnostics[0].message_text,
        "Property 'p' does not exist on type 'JSX.IntrinsicElements'."
    );
    assert_eq!(diagnostics[0].start, start_of(&arena, tag_of(&arena, element)));
}

#[test]
fn intrinsic_lookups_are_shared_per_tag_name() {
    let mut f = JsxFixture::new();
    f.declare_react("React");
    f.jsx_interface(jsx_names::ELEMENT, vec![], None);
    let intrinsics = f.declare_jsx_symbol(jsx_names::INTRINSIC_ELEMENTS);
    let div = f
        .binder
        .declare(Scope::Members(intrinsics), "div", SymbolFlags::PROPERTY, NodeIndex::NONE);
    let div_prop = f.prop("div", TypeId::EMPTY_OBJECT).with_symbol(div);
    let intrinsics_type = f.types.interface(intrinsics, vec![div_prop], None);
    f.env.set_declared_type(intrinsics, intrinsics_type);

    let mut b = SourceBuilder::new("app.tsx");
    let mut elements = Vec::new();
    for tag in ["div", "p", "div", "p"] {
        b.expression_statement(|b| {
            let element = b.self_closing(tag, |_| vec![]);
            elements.push(element);
            element
        });
    }
    let (arena, _) = b.finish();

    let mut checker = f.checker(&arena);
    checker.check_source_file();
    assert_eq!(checker.get_jsx_intrinsic_symbol(elements[0]), Some(div));
    assert_eq!(checker.get_jsx_intrinsic_symbol(elements[2]), Some(div));

    // A miss is looked up again for each element, so every `<p />` is reported.
    let diagnostics = &checker.ctx.diagnostics;
    assert_eq!(
        codes(diagnostics),
        vec![
            diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
            diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
        ]
    );
    assert_eq!(diagnostics[0].start, start_of(&arena, tag_of(&arena, elements[1])));
    assert_eq!(diagnostics[1].start, start_of(&arena, tag_of(&arena, elements[3])));
}

#[test]
fn index_signature_tags_resolve_to_the_intrinsic_elements_symbol() {
    let mut f = JsxFixture::new();
    f.declare_react("React");
    f.jsx_interface(jsx_names::ELEMENT, vec![], None);
    let symbol = f.declare_jsx_symbol(jsx_names::INTRINSIC_ELEMENTS);
    let intrinsics = f.types.interface(symbol, vec![], Some(TypeId::ANY));
    f.env.set_declared_type(symbol, intrinsics);

    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.self_closing("anything", |b| vec![b.attr_string("whatever", "x")])
    });
    let mut checker = f.checker(&arena);
    checker.check_source_file();
    assert!(checker.ctx.diagnostics.is_empty());
    assert_eq!(checker.get_jsx_intrinsic_symbol(element), Some(symbol));
}

#[test]
fn declared_intrinsic_resolves_to_its_property_symbol() {
    let mut f = JsxFixture::new();
    f.declare_react("React");
    f.jsx_interface(jsx_names::ELEMENT, vec![], None);
    let intrinsics = f.declare_jsx_symbol(jsx_names::INTRINSIC_ELEMENTS);
    let div = f
        .binder
        .declare(Scope::Members(intrinsics), "div", SymbolFlags::PROPERTY, NodeIndex::NONE);
    let div_prop = f.prop("div", TypeId::EMPTY_OBJECT).with_symbol(div);
    let intrinsics_type = f.types.interface(intrinsics, vec![div_prop], None);
    f.env.set_declared_type(intrinsics, intrinsics_type);

    let (arena, element) = single_expression("app.tsx", &[], |b| b.self_closing("div", |_| vec![]));
    let mut checker = f.checker(&arena);
    checker.check_source_file();
    assert_eq!(checker.get_jsx_intrinsic_symbol(element), Some(div));
}

#[test]
fn missing_jsx_namespace_is_implicit_any_under_no_implicit_any() {
    let mut f = JsxFixture::new();
    f.declare_namespace("React");
    f.options.no_implicit_any = true;
    let (arena, element) = single_expression("app.tsx", &[], |b| b.self_closing("div", |_| vec![]));

    let diagnostics = f.check(&arena);
    assert_eq!(
        codes(&diagnostics),
        vec![
            diagnostic_codes::JSX_ELEMENT_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_NO_INTERFACE_JSX_EXISTS,
            diagnostic_codes::JSX_ELEMENT_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_NO_INTERFACE_JSX_EXISTS,
        ]
    );
    assert_eq!(
        diagnostics[0].message_text,
        "JSX element implicitly has type 'any' because no interface 'JSX.Element' exists."
    );
    assert_eq!(
        diagnostics[1].message_text,
        "JSX element implicitly has type 'any' because no interface 'JSX.IntrinsicElements' exists."
    );
    assert!(diagnostics.iter().all(|d| d.start == start_of(&arena, element)));
}

#[test]
fn missing_jsx_namespace_is_silent_without_no_implicit_any() {
    let mut f = JsxFixture::new();
    f.declare_namespace("React");
    let (arena, _) = single_expression("app.tsx", &[], |b| b.self_closing("div", |b| vec![b.attr("x")]));
    assert!(f.check(&arena).is_empty());
}

#[test]
fn jsx_without_the_jsx_flag_is_an_error() {
    let mut f = react_with_div();
    f.options.jsx = JsxEmit::None;
    let (arena, _) = single_expression("app.tsx", &[], |b| b.self_closing("div", |_| vec![]));
    assert_eq!(
        codes(&f.check(&arena)),
        vec![diagnostic_codes::CANNOT_USE_JSX_UNLESS_THE_JSX_FLAG_IS_PROVIDED]
    );
}

#[test]
fn missing_jsx_flag_stops_the_remaining_preconditions() {
    let mut f = JsxFixture::new();
    f.declare_react("React");
    f.jsx_interface(jsx_names::INTRINSIC_ELEMENTS, vec![f.prop("div", TypeId::EMPTY_OBJECT)], None);
    f.options.jsx = JsxEmit::None;
    f.options.no_implicit_any = true;
    let (arena, _) = single_expression("app.tsx", &[], |b| b.self_closing("div", |_| vec![]));
    assert_eq!(
        codes(&f.check(&arena)),
        vec![diagnostic_codes::CANNOT_USE_JSX_UNLESS_THE_JSX_FLAG_IS_PROVIDED]
    );
}

#[test]
fn factory_namespace_must_be_in_scope_for_classic_emit() {
    let mut f = JsxFixture::new();
    f.declare_global_jsx();
    f.jsx_interface(jsx_names::ELEMENT, vec![], None);
    f.jsx_interface(jsx_names::INTRINSIC_ELEMENTS, vec![], Some(TypeId::ANY));
    let (arena, element) = single_expression("app.tsx", &[], |b| b.self_closing("div", |_| vec![]));

    let diagnostics = f.check(&arena);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::CANNOT_FIND_NAME]);
    assert_eq!(diagnostics[0].message_text, "Cannot find name 'React'.");
    assert_eq!(diagnostics[0].start, start_of(&arena, tag_of(&arena, element)));

    f.options.jsx = JsxEmit::ReactJsx;
    assert!(f.check(&arena).is_empty());
}

#[test]
fn jsx_pragma_selects_the_namespace() {
    let mut f = JsxFixture::new();
    f.declare_react("h");
    f.jsx_interface(jsx_names::ELEMENT, vec![], None);
    f.jsx_interface(jsx_names::INTRINSIC_ELEMENTS, vec![], Some(TypeId::ANY));
    let (arena, _) = single_expression("app.tsx", &["/** @jsx h.createElement */"], |b| {
        b.self_closing("div", |_| vec![])
    });

    let mut checker = f.checker(&arena);
    checker.check_source_file();
    assert!(checker.ctx.diagnostics.is_empty(), "{:?}", checker.ctx.diagnostics);
    assert_eq!(checker.get_jsx_namespace(), "h");
    let resolver = checker.emit_resolver();
    assert_eq!(resolver.factory_entity().to_string(), "h.createElement");
}

#[test]
fn invalid_jsx_pragma_is_reported() {
    let f = react_with_div();
    let (arena, _) = single_expression("app.tsx", &["/** @jsx 1nvalid */"], |b| b.self_closing("div", |_| vec![]));
    let diagnostics = f.check(&arena);
    assert!(codes(&diagnostics).contains(&diagnostic_codes::INVALID_FACTORY_IN_JSX_PRAGMA));
}

#[test]
fn intrinsic_tag_names_follow_declaration_order() {
    let f = react_with_div();
    let (arena, _) = single_expression("app.tsx", &[], |b| b.self_closing("div", |_| vec![]));
    let mut checker = f.checker(&arena);
    assert_eq!(checker.get_jsx_namespace(), "React");
    assert_eq!(checker.get_jsx_intrinsic_tag_names(), vec!["div".to_string(), "span".to_string()]);
}

#[test]
fn tag_without_signatures_is_reported_once() {
    let mut f = react_with_div();
    f.declare_value("Num", TypeId::NUMBER);
    let (arena, element) = single_expression("app.tsx", &[], |b| b.self_closing("Num", |_| vec![]));

    let mut checker = f.checker(&arena);
    checker.check_source_file();
    assert_eq!(checker.get_jsx_reference_kind(element), JsxReferenceKind::Mixed);
    assert_eq!(checker.get_jsx_reference_kind(element), JsxReferenceKind::Mixed);
    let diagnostics = &checker.ctx.diagnostics;
    assert_eq!(
        codes(diagnostics),
        vec![diagnostic_codes::JSX_ELEMENT_TYPE_DOES_NOT_HAVE_ANY_CONSTRUCT_OR_CALL_SIGNATURES]
    );
    assert_eq!(
        diagnostics[0].message_text,
        "JSX element type 'Num' does not have any construct or call signatures."
    );
}

#[test]
fn function_component_must_return_an_element() {
    let mut f = react_with_div();
    let element = f.types.object(vec![f.prop("type", TypeId::STRING)]);
    let bad = f.function_component(TypeId::EMPTY_OBJECT, TypeId::NUMBER);
    let good = f.function_component(TypeId::EMPTY_OBJECT, element);
    f.declare_function("Bad", bad);
    f.declare_function("Good", good);

    let (arena, bad_element) = single_expression("app.tsx", &[], |b| b.self_closing("Bad", |_| vec![]));
    let diagnostics = f.check(&arena);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::CANNOT_BE_USED_AS_A_JSX_COMPONENT]);
    assert_eq!(diagnostics[0].message_text, "'Bad' cannot be used as a JSX component.");
    assert_eq!(diagnostics[0].start, start_of(&arena, tag_of(&arena, bad_element)));

    let (arena, good_element) = single_expression("app.tsx", &[], |b| b.self_closing("Good", |_| vec![]));
    let mut checker = f.checker(&arena);
    checker.check_source_file();
    assert!(checker.ctx.diagnostics.is_empty());
    assert_eq!(checker.get_jsx_reference_kind(good_element), JsxReferenceKind::Function);
    assert!(checker.get_resolved_jsx_signature(good_element).is_some());
}

#[test]
fn element_attributes_property_with_two_members_is_ambiguous() {
    let mut f = react_with_div();
    let props_type = f.object(&[("x", TypeId::NUMBER)]);
    let instance = f.object(&[("props", props_type)]);
    let component = f.class_component(props_type, instance);
    f.declare_class("MyComp", component);
    let eap = vec![f.prop("props", TypeId::EMPTY_OBJECT), f.prop("state", TypeId::EMPTY_OBJECT)];
    f.jsx_interface(jsx_names::ELEMENT_ATTRIBUTES_PROPERTY, eap, None);

    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.self_closing("MyComp", |b| vec![b.attr_expr("x", |b| b.number_lit("1"))])
    });
    let mut checker = f.checker(&arena);
    checker.check_source_file();
    assert_eq!(
        codes(&checker.ctx.diagnostics),
        vec![diagnostic_codes::THE_GLOBAL_TYPE_JSX_MAY_NOT_HAVE_MORE_THAN_ONE_PROPERTY]
    );
    assert_eq!(
        checker.ctx.diagnostics[0].message_text,
        "The global type 'JSX.ElementAttributesProperty' may not have more than one property."
    );
    assert_eq!(checker.get_jsx_reference_kind(element), JsxReferenceKind::Component);
}

#[test]
fn class_without_the_attributes_property_rejects_attributes() {
    let mut f = react_with_div();
    let instance = f.object(&[("render", TypeId::ANY)]);
    let component = f.class_component(TypeId::EMPTY_OBJECT, instance);
    f.declare_class("NoProps", component);
    let eap = vec![f.prop("props", TypeId::EMPTY_OBJECT)];
    f.jsx_interface(jsx_names::ELEMENT_ATTRIBUTES_PROPERTY, eap, None);

    let (arena, element) = single_expression("app.tsx", &[], |b| {
        b.self_closing("NoProps", |b| vec![b.attr_string("x", "1")])
    });
    let diagnostics = f.check(&arena);
    assert_eq!(
        codes(&diagnostics),
        vec![diagnostic_codes::JSX_ELEMENT_CLASS_DOES_NOT_SUPPORT_ATTRIBUTES_BECAUSE_IT_DOES_NOT_HAVE_A_PROPERTY]
    );
    assert_eq!(diagnostics[0].start, start_of(&arena, element));

    let (arena, _) = single_expression("app.tsx", &[], |b| b.self_closing("NoProps", |_| vec![]));
    assert!(f.check(&arena).is_empty());
}

#[test]
fn class_props_come_from_the_attributes_property_of_the_instance() {
    let mut f = react_with_div();
    let props_type = f.object(&[("label", TypeId::STRING)]);
    let instance = f.object(&[("props", props_type)]);
    let component = f.class_component(TypeId::ANY, instance);
    f.declare_class("Button", component);
    let eap = vec![f.prop("props", TypeId::EMPTY_OBJECT)];
    f.jsx_interface(jsx_names::ELEMENT_ATTRIBUTES_PROPERTY, eap, None);

    let (arena, _) = single_expression("app.tsx", &[], |b| {
        b.self_closing("Button", |b| vec![b.attr_expr("label", |b| b.number_lit("3"))])
    });
    let diagnostics = f.check(&arena);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE]);
    assert_eq!(diagnostics[0].message_text, "Type '3' is not assignable to type 'string'.");
}

#[test]
fn library_managed_attributes_rewrite_component_props() {
    let mut f = react_with_div();
    let component = f.types.type_param("C", None);
    let props = f.types.type_param("P", None);
    let key = f.types.object(vec![f.optional("key", TypeId::STRING)]);
    let managed = f.types.intersection2(props, key);
    let symbol = f.declare_jsx_symbol(jsx_names::LIBRARY_MANAGED_ATTRIBUTES);
    f.env.set_generic_declared_type(symbol, vec![component, props], managed);

    let props_type = f.object(&[("x", TypeId::NUMBER)]);
    let element = f.types.object(vec![f.prop("type", TypeId::STRING)]);
    let comp = f.function_component(props_type, element);
    f.declare_function("Comp", comp);

    let (arena, _) = single_expression("app.tsx", &[], |b| {
        b.self_closing("Comp", |b| {
            vec![b.attr_expr("x", |b| b.number_lit("1")), b.attr_string("key", "k")]
        })
    });
    assert!(f.check(&arena).is_empty());

    let (arena, _) = single_expression("app.tsx", &[], |b| {
        b.self_closing("Comp", |b| vec![b.attr_string("x", "1")])
    });
    assert_eq!(codes(&f.check(&arena)), vec![diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE]);
}

#[test]
fn duplicate_children_is_a_warning() {
    let mut f = JsxFixture::new();
    f.declare_react("React");
    f.jsx_interface(jsx_names::ELEMENT, vec![], None);
    let div = f.types.object(vec![f.optional("children", TypeId::STRING)]);
    let intrinsic = vec![f.prop("div", div)];
    f.jsx_interface(jsx_names::INTRINSIC_ELEMENTS, intrinsic, None);
    let eca = vec![f.prop("children", TypeId::EMPTY_OBJECT)];
    f.jsx_interface(jsx_names::ELEMENT_CHILDREN_ATTRIBUTE, eca, None);

    let (arena, _) = single_expression("app.tsx", &[], |b| {
        b.element(
            "div",
            |b| vec![b.attr_value("children", AttributeValue::String("a"))],
            |b| vec![b.text("text")],
        )
    });
    let mut checker = f.checker(&arena);
    checker.check_source_file();
    let diagnostics = &checker.ctx.diagnostics;
    assert_eq!(
        codes(diagnostics),
        vec![diagnostic_codes::ARE_SPECIFIED_TWICE_THE_ATTRIBUTE_NAMED_WILL_BE_OVERWRITTEN]
    );
    assert_eq!(diagnostics[0].category, DiagnosticCategory::Warning);
    assert_eq!(
        diagnostics[0].message_text,
        "'children' are specified twice. The attribute named 'children' will be overwritten."
    );
    assert_eq!(checker.error_count(), 0);
}

#[test]
fn fragments_check_their_children() {
    let mut f = react_with_div();
    f.options.no_implicit_any = true;
    let (arena, _) = single_expression("app.tsx", &[], |b| {
        b.fragment(|b| vec![b.self_closing("div", |_| vec![]), b.self_closing("nope", |_| vec![])])
    });
    let diagnostics = f.check(&arena);
    assert_eq!(codes(&diagnostics), vec![diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE]);
}
