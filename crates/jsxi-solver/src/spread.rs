//! Object spread (`{ ...left, ...right }`) at the type level.

use crate::TypeInterner;
use crate::operations_property::{get_index_type_of_type, get_properties_of_type};
use crate::types::*;
use tracing::trace;

/// Type of `{ ...left, ...right }`.
///
/// Properties of `right` override those of `left`; an optional property of
/// `right` may be absent at runtime so it unions with the left property it
/// shadows. Unions on either side distribute.
pub fn get_spread_type(db: &TypeInterner, left: TypeId, right: TypeId) -> TypeId {
    if left.is_any_like() || right.is_any_like() {
        return TypeId::ANY;
    }
    if right.is_nullish() || right == TypeId::NEVER {
        return left;
    }
    if left.is_nullish() || left == TypeId::NEVER {
        return get_spread_type(db, TypeId::EMPTY_OBJECT, right);
    }
    if let Some(members) = db.union_members(right) {
        let spread = members
            .into_iter()
            .map(|m| get_spread_type(db, left, m))
            .collect();
        return db.union(spread);
    }
    if let Some(members) = db.union_members(left) {
        let spread = members
            .into_iter()
            .map(|m| get_spread_type(db, m, right))
            .collect();
        return db.union(spread);
    }

    let mut properties = get_properties_of_type(db, left);
    for prop in get_properties_of_type(db, right) {
        match properties.iter_mut().find(|p| p.name == prop.name) {
            Some(existing) if prop.optional => {
                existing.type_id = db.union2(existing.type_id, db.remove_nullish(prop.type_id));
                existing.symbol = prop.symbol.or(existing.symbol);
            }
            Some(existing) => *existing = prop,
            None => properties.push(prop),
        }
    }
    // Spread results are never readonly.
    for prop in &mut properties {
        prop.readonly = false;
    }

    let string_index = match (get_index_type_of_type(db, left), get_index_type_of_type(db, right)) {
        (Some(l), Some(r)) => Some(db.union2(l, r)),
        (l, r) => l.or(r),
    };
    trace!(left = left.0, right = right.0, count = properties.len(), "spread object");
    if properties.is_empty() && string_index.is_none() {
        return TypeId::EMPTY_OBJECT;
    }
    db.object_with_shape(ObjectShape {
        properties,
        string_index,
        symbol: None,
    })
}

#[cfg(test)]
#[path = "tests/spread_tests.rs"]
mod tests;
