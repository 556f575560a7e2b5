use crate::types::*;
use crate::{TypeInterner, get_property_of_type, get_spread_type};

fn obj(interner: &TypeInterner, props: &[(&str, TypeId)]) -> TypeId {
    interner.object(
        props
            .iter()
            .map(|(name, t)| PropertyInfo::new(interner.intern_string(name), *t))
            .collect(),
    )
}

#[test]
fn right_side_overrides_left() {
    let interner = TypeInterner::new();
    let left = obj(&interner, &[("a", TypeId::NUMBER), ("b", TypeId::NUMBER)]);
    let right = obj(&interner, &[("b", TypeId::STRING)]);

    let spread = get_spread_type(&interner, left, right);
    let b = interner.intern_string("b");
    let prop = get_property_of_type(&interner, spread, b).expect("b survives the spread");
    assert_eq!(prop.type_id, TypeId::STRING);
    assert_eq!(
        spread,
        obj(&interner, &[("a", TypeId::NUMBER), ("b", TypeId::STRING)])
    );
}

#[test]
fn optional_right_property_unions_with_left() {
    let interner = TypeInterner::new();
    let name = interner.intern_string("x");
    let left = interner.object(vec![PropertyInfo::new(name, TypeId::NUMBER)]);
    let right = interner.object(vec![PropertyInfo::optional(name, TypeId::STRING)]);

    let spread = get_spread_type(&interner, left, right);
    let prop = get_property_of_type(&interner, spread, name).expect("x present");
    assert_eq!(prop.type_id, interner.union2(TypeId::NUMBER, TypeId::STRING));
    assert!(!prop.optional);
}

#[test]
fn any_and_nullish_operands() {
    let interner = TypeInterner::new();
    let left = obj(&interner, &[("a", TypeId::NUMBER)]);

    assert_eq!(get_spread_type(&interner, left, TypeId::ANY), TypeId::ANY);
    assert_eq!(get_spread_type(&interner, left, TypeId::NULL), left);
    assert_eq!(get_spread_type(&interner, left, TypeId::UNDEFINED), left);
    assert_eq!(get_spread_type(&interner, TypeId::EMPTY_OBJECT, left), left);
}

#[test]
fn union_operand_distributes() {
    let interner = TypeInterner::new();
    let left = obj(&interner, &[("a", TypeId::NUMBER)]);
    let r1 = obj(&interner, &[("b", TypeId::NUMBER)]);
    let r2 = obj(&interner, &[("c", TypeId::NUMBER)]);

    let spread = get_spread_type(&interner, left, interner.union2(r1, r2));
    let members = interner.union_members(spread).expect("spread over a union is a union");
    assert_eq!(members.len(), 2);
}

#[test]
fn spread_results_are_not_readonly() {
    let interner = TypeInterner::new();
    let mut prop = PropertyInfo::new(interner.intern_string("id"), TypeId::STRING);
    prop.readonly = true;
    let right = interner.object(vec![prop]);

    let spread = get_spread_type(&interner, TypeId::EMPTY_OBJECT, right);
    let id = interner.intern_string("id");
    assert!(!get_property_of_type(&interner, spread, id).expect("id").readonly);
}
