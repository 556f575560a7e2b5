//! Structural assignability.

use crate::TypeInterner;
use crate::operations_property::{
    get_call_signatures, get_construct_signatures, get_index_type_of_type, get_properties_of_type,
    get_property_of_type, is_object_like,
};
use crate::types::*;
use rustc_hash::FxHashSet;

const MAX_RELATION_DEPTH: u32 = 64;

/// Whether a value of type `source` may be assigned to a location of type `target`.
pub fn is_assignable_to(db: &TypeInterner, source: TypeId, target: TypeId) -> bool {
    AssignabilityChecker::new(db).check(source, target)
}

/// Relation checker. `in_progress` makes the relation coinductive: a pair
/// that is already being compared is assumed to hold.
pub struct AssignabilityChecker<'a> {
    db: &'a TypeInterner,
    depth: u32,
    in_progress: FxHashSet<(TypeId, TypeId)>,
}

impl<'a> AssignabilityChecker<'a> {
    pub fn new(db: &'a TypeInterner) -> Self {
        AssignabilityChecker {
            db,
            depth: 0,
            in_progress: FxHashSet::default(),
        }
    }

    pub fn check(&mut self, source: TypeId, target: TypeId) -> bool {
        if source == target {
            return true;
        }
        if target.is_any_like() || target == TypeId::UNKNOWN {
            return true;
        }
        if source == TypeId::NEVER {
            return true;
        }
        if source.is_any_like() {
            return target != TypeId::NEVER;
        }
        if self.depth > MAX_RELATION_DEPTH || !self.in_progress.insert((source, target)) {
            return true;
        }
        self.depth += 1;
        let result = self.check_structural(source, target);
        self.depth -= 1;
        self.in_progress.remove(&(source, target));
        result
    }

    fn check_structural(&mut self, source: TypeId, target: TypeId) -> bool {
        let db = self.db;
        let source_key = db.lookup(source);
        let target_key = db.lookup(target);

        if let Some(TypeKey::Union(members)) = &source_key {
            return members.iter().all(|&m| self.check(m, target));
        }
        if let Some(TypeKey::Union(members)) = &target_key {
            if members.iter().any(|&m| self.check(source, m)) {
                return true;
            }
            // `true | false` members were collapsed into `boolean`.
            return source == TypeId::BOOLEAN
                && members.contains(&TypeId::BOOLEAN_TRUE)
                && members.contains(&TypeId::BOOLEAN_FALSE);
        }
        if let Some(TypeKey::Intersection(members)) = &target_key {
            return members.iter().all(|&m| self.check(source, m));
        }
        if let Some(TypeKey::Intersection(members)) = &source_key {
            if members.iter().any(|&m| self.check(m, target)) {
                return true;
            }
            return is_object_like(db, target) && self.check_object_members(source, target);
        }
        if let Some(TypeKey::TypeParameter(info)) = &source_key {
            return self.check(info.constraint.unwrap_or(TypeId::UNKNOWN), target);
        }

        match (&source_key, &target_key) {
            (_, Some(TypeKey::TypeParameter(_))) => false,
            (Some(TypeKey::Literal(lit)), _) => match lit {
                LiteralValue::String(_) => target == TypeId::STRING || self.check_primitive_to_object(target),
                LiteralValue::Number(_) => target == TypeId::NUMBER || self.check_primitive_to_object(target),
                LiteralValue::Boolean(_) => target == TypeId::BOOLEAN || self.check_primitive_to_object(target),
            },
            (Some(TypeKey::Intrinsic(kind)), _) => match kind {
                IntrinsicKind::Undefined => target == TypeId::VOID,
                IntrinsicKind::Null | IntrinsicKind::Void | IntrinsicKind::Unknown => false,
                IntrinsicKind::String
                | IntrinsicKind::Number
                | IntrinsicKind::Boolean
                | IntrinsicKind::Bigint
                | IntrinsicKind::Symbol => self.check_primitive_to_object(target),
                IntrinsicKind::Object => target == TypeId::EMPTY_OBJECT,
                _ => false,
            },
            (_, Some(TypeKey::Intrinsic(IntrinsicKind::Object))) => matches!(
                source_key,
                Some(TypeKey::Object(_) | TypeKey::Callable(_) | TypeKey::Array(_) | TypeKey::Tuple(_))
            ),
            (_, Some(TypeKey::Intrinsic(_))) | (_, Some(TypeKey::Literal(_))) => false,
            (Some(TypeKey::Array(s)), Some(TypeKey::Array(t))) => self.check(*s, *t),
            (Some(TypeKey::Tuple(elements)), Some(TypeKey::Array(t))) => {
                let t = *t;
                elements.iter().all(|&e| self.check(e, t))
            }
            (Some(TypeKey::Tuple(s)), Some(TypeKey::Tuple(t))) => {
                s.len() == t.len() && s.iter().zip(t.iter()).all(|(&a, &b)| self.check(a, b))
            }
            (_, Some(TypeKey::Array(_))) | (_, Some(TypeKey::Tuple(_))) => false,
            (Some(TypeKey::Array(_)) | Some(TypeKey::Tuple(_)), Some(TypeKey::Object(shape))) => {
                shape.properties.iter().all(|p| p.optional)
            }
            (_, Some(TypeKey::Object(_))) => self.check_object_members(source, target),
            (_, Some(TypeKey::Callable(_))) => {
                self.check_signatures(source, target, false)
                    && self.check_signatures(source, target, true)
                    && self.check_object_members(source, target)
            }
            _ => false,
        }
    }

    /// Primitives relate to object types only through the empty object type.
    fn check_primitive_to_object(&self, target: TypeId) -> bool {
        target == TypeId::EMPTY_OBJECT
    }

    fn check_object_members(&mut self, source: TypeId, target: TypeId) -> bool {
        let db = self.db;
        for target_prop in get_properties_of_type(db, target) {
            match get_property_of_type(db, source, target_prop.name) {
                Some(source_prop) => {
                    if source_prop.optional && !target_prop.optional {
                        return false;
                    }
                    let target_type = if target_prop.optional {
                        db.union2(target_prop.type_id, TypeId::UNDEFINED)
                    } else {
                        target_prop.type_id
                    };
                    if !self.check(source_prop.type_id, target_type) {
                        return false;
                    }
                }
                None if target_prop.optional => {}
                None => return false,
            }
        }
        if let Some(target_index) = get_index_type_of_type(db, target) {
            for source_prop in get_properties_of_type(db, source) {
                if !self.check(source_prop.type_id, target_index) {
                    return false;
                }
            }
            if let Some(source_index) = get_index_type_of_type(db, source)
                && !self.check(source_index, target_index)
            {
                return false;
            }
        }
        true
    }

    fn check_signatures(&mut self, source: TypeId, target: TypeId, construct: bool) -> bool {
        let db = self.db;
        let (source_sigs, target_sigs) = if construct {
            (get_construct_signatures(db, source), get_construct_signatures(db, target))
        } else {
            (get_call_signatures(db, source), get_call_signatures(db, target))
        };
        target_sigs.iter().all(|target_sig| {
            source_sigs
                .iter()
                .any(|source_sig| self.check_signature(source_sig, target_sig))
        })
    }

    /// Parameters relate bivariantly; the return type covariantly unless the
    /// target returns `void`.
    fn check_signature(&mut self, source: &CallSignature, target: &CallSignature) -> bool {
        if source.min_argument_count() > target.params.len() && !target.params.iter().any(|p| p.rest) {
            return false;
        }
        for (s, t) in source.params.iter().zip(&target.params) {
            if !self.check(t.type_id, s.type_id) && !self.check(s.type_id, t.type_id) {
                return false;
            }
        }
        target.return_type == TypeId::VOID || self.check(source.return_type, target.return_type)
    }
}

#[cfg(test)]
#[path = "tests/relation_tests.rs"]
mod tests;
