use crate::types::*;
use crate::{TypeFormatter, TypeInterner};
use jsxi_binder::{BinderState, Scope, SymbolFlags};
use jsxi_parser::NodeIndex;

#[test]
fn formats_primitives_and_literals() {
    let interner = TypeInterner::new();
    let fmt = TypeFormatter::new(&interner);
    assert_eq!(fmt.format(TypeId::STRING), "string");
    assert_eq!(fmt.format(TypeId::ERROR), "any");
    assert_eq!(fmt.format(interner.literal_string("div")), "\"div\"");
    assert_eq!(fmt.format(interner.literal_number(42.0)), "42");
    assert_eq!(fmt.format(interner.literal_number(1.5)), "1.5");
    assert_eq!(fmt.format(TypeId::BOOLEAN_TRUE), "true");
}

#[test]
fn formats_compound_types() {
    let interner = TypeInterner::new();
    let fmt = TypeFormatter::new(&interner);
    let div = interner.literal_string("div");
    let span = interner.literal_string("span");
    let union = interner.union2(div, span);

    assert_eq!(fmt.format(union), "\"div\" | \"span\"");
    assert_eq!(fmt.format(interner.array(union)), "(\"div\" | \"span\")[]");
    assert_eq!(fmt.format(interner.tuple(vec![TypeId::STRING, TypeId::NUMBER])), "[string, number]");

    let props = interner.object(vec![
        PropertyInfo::new(interner.intern_string("class"), TypeId::STRING),
        PropertyInfo::optional(interner.intern_string("id"), TypeId::NUMBER),
    ]);
    assert_eq!(fmt.format(props), "{ class: string; id?: number; }");
    assert_eq!(fmt.format(TypeId::EMPTY_OBJECT), "{}");
}

#[test]
fn formats_signatures() {
    let interner = TypeInterner::new();
    let fmt = TypeFormatter::new(&interner);
    let props = interner.intern_string("props");
    let f = interner.function(CallSignature::new(vec![ParamInfo::new(props, TypeId::STRING)], TypeId::NULL));
    assert_eq!(fmt.format(f), "(props: string) => null");

    let ctor = interner.callable(CallableShape {
        construct_signatures: vec![CallSignature::new(
            vec![ParamInfo::optional(props, TypeId::NUMBER)],
            TypeId::EMPTY_OBJECT,
        )],
        ..CallableShape::default()
    });
    assert_eq!(fmt.format(ctor), "new (props?: number) => {}");
}

#[test]
fn named_types_use_symbol_names() {
    let interner = TypeInterner::new();
    let mut binder = BinderState::new();
    let attrs = binder.declare(Scope::Global, "Attrs", SymbolFlags::INTERFACE, NodeIndex(1));
    let comp = binder.declare(Scope::Global, "MyComp", SymbolFlags::CLASS, NodeIndex(2));

    let attrs_type = interner.interface(attrs, vec![], None);
    let comp_type = interner.callable(CallableShape {
        construct_signatures: vec![CallSignature::new(vec![], attrs_type)],
        symbol: Some(comp),
        ..CallableShape::default()
    });

    let fmt = TypeFormatter::with_symbols(&interner, &binder);
    assert_eq!(fmt.format(attrs_type), "Attrs");
    assert_eq!(fmt.format(comp_type), "typeof MyComp");
}
