use crate::types::*;
use crate::{TypeInterner, is_assignable_to};

fn obj(interner: &TypeInterner, props: &[(&str, TypeId, bool)]) -> TypeId {
    interner.object(
        props
            .iter()
            .map(|(name, t, optional)| {
                let atom = interner.intern_string(name);
                if *optional {
                    PropertyInfo::optional(atom, *t)
                } else {
                    PropertyInfo::new(atom, *t)
                }
            })
            .collect(),
    )
}

#[test]
fn literals_relate_to_their_primitive() {
    let interner = TypeInterner::new();
    let div = interner.literal_string("div");
    assert!(is_assignable_to(&interner, div, TypeId::STRING));
    assert!(!is_assignable_to(&interner, TypeId::STRING, div));
    assert!(!is_assignable_to(&interner, interner.literal_number(1.0), TypeId::STRING));
    assert!(is_assignable_to(&interner, TypeId::BOOLEAN_TRUE, TypeId::BOOLEAN));
}

#[test]
fn any_unknown_never() {
    let interner = TypeInterner::new();
    assert!(is_assignable_to(&interner, TypeId::ANY, TypeId::STRING));
    assert!(is_assignable_to(&interner, TypeId::STRING, TypeId::UNKNOWN));
    assert!(is_assignable_to(&interner, TypeId::NEVER, TypeId::STRING));
    assert!(!is_assignable_to(&interner, TypeId::UNKNOWN, TypeId::STRING));
    assert!(!is_assignable_to(&interner, TypeId::NULL, TypeId::STRING));
    assert!(is_assignable_to(&interner, TypeId::UNDEFINED, TypeId::VOID));
}

#[test]
fn unions_on_either_side() {
    let interner = TypeInterner::new();
    let div = interner.literal_string("div");
    let span = interner.literal_string("span");
    let tags = interner.union2(div, span);

    assert!(is_assignable_to(&interner, div, tags));
    assert!(!is_assignable_to(&interner, interner.literal_string("p"), tags));
    assert!(is_assignable_to(&interner, tags, TypeId::STRING));
    assert!(!is_assignable_to(&interner, interner.union2(div, TypeId::NUMBER), TypeId::STRING));
}

#[test]
fn object_properties_and_optionality() {
    let interner = TypeInterner::new();
    let target = obj(&interner, &[("a", TypeId::STRING, false), ("b", TypeId::NUMBER, true)]);

    let exact = obj(&interner, &[("a", TypeId::STRING, false)]);
    let wrong = obj(&interner, &[("a", TypeId::NUMBER, false)]);
    let missing = obj(&interner, &[("b", TypeId::NUMBER, false)]);
    let extra = obj(&interner, &[("a", TypeId::STRING, false), ("z", TypeId::BOOLEAN, false)]);

    assert!(is_assignable_to(&interner, exact, target));
    assert!(!is_assignable_to(&interner, wrong, target));
    assert!(!is_assignable_to(&interner, missing, target));
    assert!(is_assignable_to(&interner, extra, target));
}

#[test]
fn index_signatures_constrain_all_properties() {
    let interner = TypeInterner::new();
    let target = interner.object_with_shape(ObjectShape {
        properties: Vec::new(),
        string_index: Some(TypeId::STRING),
        symbol: None,
    });
    let strings = obj(&interner, &[("a", TypeId::STRING, false)]);
    let numbers = obj(&interner, &[("a", TypeId::NUMBER, false)]);
    assert!(is_assignable_to(&interner, strings, target));
    assert!(!is_assignable_to(&interner, numbers, target));
}

#[test]
fn arrays_and_tuples() {
    let interner = TypeInterner::new();
    let strings = interner.array(TypeId::STRING);
    let pair = interner.tuple(vec![TypeId::STRING, TypeId::STRING]);
    assert!(is_assignable_to(&interner, pair, strings));
    assert!(!is_assignable_to(&interner, strings, pair));
    assert!(!is_assignable_to(&interner, TypeId::STRING, strings));
    assert!(is_assignable_to(&interner, interner.array(interner.literal_string("x")), strings));
}

#[test]
fn intersections() {
    let interner = TypeInterner::new();
    let a = obj(&interner, &[("a", TypeId::STRING, false)]);
    let b = obj(&interner, &[("b", TypeId::NUMBER, false)]);
    let ab = interner.intersection2(a, b);
    let both = obj(&interner, &[("a", TypeId::STRING, false), ("b", TypeId::NUMBER, false)]);

    assert!(is_assignable_to(&interner, both, ab));
    assert!(!is_assignable_to(&interner, a, ab));
    assert!(is_assignable_to(&interner, ab, both));
}

#[test]
fn function_types() {
    let interner = TypeInterner::new();
    let ev = interner.intern_string("ev");
    let event = obj(&interner, &[("type", TypeId::STRING, false)]);
    let handler = interner.function(CallSignature::new(vec![ParamInfo::new(ev, event)], TypeId::VOID));
    let source = interner.function(CallSignature::new(vec![ParamInfo::new(ev, TypeId::ANY)], TypeId::NUMBER));
    let needs_two = interner.function(CallSignature::new(
        vec![ParamInfo::new(ev, event), ParamInfo::new(interner.intern_string("x"), TypeId::NUMBER)],
        TypeId::VOID,
    ));

    assert!(is_assignable_to(&interner, source, handler));
    assert!(!is_assignable_to(&interner, needs_two, handler));
    assert!(!is_assignable_to(&interner, TypeId::STRING, handler));
    assert!(is_assignable_to(&interner, handler, TypeId::OBJECT));
}

#[test]
fn type_parameters_relate_through_constraints() {
    let interner = TypeInterner::new();
    let t = interner.type_param("T", Some(TypeId::STRING));
    let u = interner.type_param("U", None);
    assert!(is_assignable_to(&interner, t, TypeId::STRING));
    assert!(!is_assignable_to(&interner, u, TypeId::STRING));
    assert!(!is_assignable_to(&interner, TypeId::STRING, t));
}
