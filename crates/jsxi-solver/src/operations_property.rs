//! Property, index signature and signature resolution on types.

use crate::TypeInterner;
use crate::types::*;
use jsxi_common::interner::Atom;

/// Result of looking up a named member of a type.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyAccessResult {
    /// A declared property.
    Found(PropertyInfo),
    /// No declared property, but a string index signature covers the name.
    FromIndexSignature(TypeId),
    /// The type is `any`-like; every member is `any`.
    IsAny,
    NotFound,
}

impl PropertyAccessResult {
    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            PropertyAccessResult::Found(prop) => Some(prop.type_id),
            PropertyAccessResult::FromIndexSignature(t) => Some(*t),
            PropertyAccessResult::IsAny => Some(TypeId::ANY),
            PropertyAccessResult::NotFound => None,
        }
    }
}

/// Declared property `name` of `type_id`, ignoring index signatures.
pub fn get_property_of_type(db: &TypeInterner, type_id: TypeId, name: Atom) -> Option<PropertyInfo> {
    match db.lookup(type_id)? {
        TypeKey::Object(shape) => shape.find_property(name).cloned(),
        TypeKey::Callable(shape) => shape.properties.iter().find(|p| p.name == name).cloned(),
        TypeKey::TypeParameter(info) => get_property_of_type(db, info.constraint?, name),
        TypeKey::Intersection(members) => {
            let found: Vec<PropertyInfo> = members
                .iter()
                .filter_map(|&m| get_property_of_type(db, m, name))
                .collect();
            merge_intersected_properties(db, found)
        }
        TypeKey::Union(members) => {
            let mut found = Vec::with_capacity(members.len());
            for member in members.into_iter().filter(|m| !m.is_nullish()) {
                found.push(get_property_of_type(db, member, name)?);
            }
            let first = found.first()?.clone();
            Some(PropertyInfo {
                type_id: db.union(found.iter().map(|p| p.type_id).collect()),
                optional: found.iter().any(|p| p.optional),
                readonly: found.iter().any(|p| p.readonly),
                ..first
            })
        }
        _ => None,
    }
}

fn merge_intersected_properties(db: &TypeInterner, found: Vec<PropertyInfo>) -> Option<PropertyInfo> {
    let first = found.first()?.clone();
    if found.len() == 1 {
        return Some(first);
    }
    Some(PropertyInfo {
        type_id: db.intersection(found.iter().map(|p| p.type_id).collect()),
        optional: found.iter().all(|p| p.optional),
        readonly: found.iter().all(|p| p.readonly),
        ..first
    })
}

/// String index signature type of `type_id`, if any.
pub fn get_index_type_of_type(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    if type_id.is_any_like() {
        return Some(TypeId::ANY);
    }
    match db.lookup(type_id)? {
        TypeKey::Object(shape) => shape.string_index,
        TypeKey::TypeParameter(info) => get_index_type_of_type(db, info.constraint?),
        TypeKey::Intersection(members) => {
            let found: Vec<TypeId> = members
                .iter()
                .filter_map(|&m| get_index_type_of_type(db, m))
                .collect();
            (!found.is_empty()).then(|| db.intersection(found))
        }
        TypeKey::Union(members) => {
            let mut found = Vec::with_capacity(members.len());
            for member in members {
                found.push(get_index_type_of_type(db, member)?);
            }
            Some(db.union(found))
        }
        _ => None,
    }
}

/// Property lookup falling back to the string index signature.
pub fn resolve_property_access(db: &TypeInterner, type_id: TypeId, name: Atom) -> PropertyAccessResult {
    if type_id.is_any_like() {
        return PropertyAccessResult::IsAny;
    }
    if let Some(prop) = get_property_of_type(db, type_id, name) {
        return PropertyAccessResult::Found(prop);
    }
    match get_index_type_of_type(db, type_id) {
        Some(index) => PropertyAccessResult::FromIndexSignature(index),
        None => PropertyAccessResult::NotFound,
    }
}

/// All declared properties, in declaration order.
pub fn get_properties_of_type(db: &TypeInterner, type_id: TypeId) -> Vec<PropertyInfo> {
    match db.lookup(type_id) {
        Some(TypeKey::Object(shape)) => shape.properties,
        Some(TypeKey::Callable(shape)) => shape.properties,
        Some(TypeKey::TypeParameter(TypeParamInfo {
            constraint: Some(constraint),
            ..
        })) => get_properties_of_type(db, constraint),
        Some(TypeKey::Intersection(members)) => {
            let mut names: Vec<Atom> = Vec::new();
            for member in &members {
                for prop in get_properties_of_type(db, *member) {
                    if !names.contains(&prop.name) {
                        names.push(prop.name);
                    }
                }
            }
            names
                .into_iter()
                .filter_map(|name| get_property_of_type(db, type_id, name))
                .collect()
        }
        Some(TypeKey::Union(members)) => {
            let Some(first) = members.iter().find(|m| !m.is_nullish()) else {
                return Vec::new();
            };
            get_properties_of_type(db, *first)
                .into_iter()
                .filter_map(|prop| get_property_of_type(db, type_id, prop.name))
                .collect()
        }
        _ => Vec::new(),
    }
}

fn collect_signatures(db: &TypeInterner, type_id: TypeId, construct: bool) -> Vec<CallSignature> {
    match db.lookup(type_id) {
        Some(TypeKey::Callable(shape)) => {
            if construct {
                shape.construct_signatures
            } else {
                shape.call_signatures
            }
        }
        Some(TypeKey::TypeParameter(TypeParamInfo {
            constraint: Some(constraint),
            ..
        })) => collect_signatures(db, constraint, construct),
        Some(TypeKey::Intersection(members)) => members
            .into_iter()
            .flat_map(|m| collect_signatures(db, m, construct))
            .collect(),
        Some(TypeKey::Union(members)) => {
            // A union is callable only when every member has the same signatures.
            let mut sets = members
                .into_iter()
                .filter(|m| !m.is_nullish())
                .map(|m| collect_signatures(db, m, construct));
            let Some(first) = sets.next() else {
                return Vec::new();
            };
            if sets.all(|s| s == first) { first } else { Vec::new() }
        }
        _ => Vec::new(),
    }
}

pub fn get_call_signatures(db: &TypeInterner, type_id: TypeId) -> Vec<CallSignature> {
    collect_signatures(db, type_id, false)
}

pub fn get_construct_signatures(db: &TypeInterner, type_id: TypeId) -> Vec<CallSignature> {
    collect_signatures(db, type_id, true)
}

/// Arrays, tuples, and unions/intersections made of them.
pub fn is_array_like(db: &TypeInterner, type_id: TypeId) -> bool {
    if type_id.is_any_like() {
        return true;
    }
    match db.lookup(type_id) {
        Some(TypeKey::Array(_)) | Some(TypeKey::Tuple(_)) => true,
        Some(TypeKey::Union(members)) => members.into_iter().all(|m| is_array_like(db, m)),
        Some(TypeKey::Intersection(members)) => members.into_iter().any(|m| is_array_like(db, m)),
        Some(TypeKey::TypeParameter(TypeParamInfo {
            constraint: Some(constraint),
            ..
        })) => is_array_like(db, constraint),
        _ => false,
    }
}

pub fn is_tuple_like(db: &TypeInterner, type_id: TypeId) -> bool {
    match db.lookup(type_id) {
        Some(TypeKey::Tuple(_)) => true,
        Some(TypeKey::Union(members)) => members.into_iter().any(|m| is_tuple_like(db, m)),
        _ => false,
    }
}

/// Element type of an array-like type (the union of tuple elements for tuples).
pub fn array_element_type(db: &TypeInterner, type_id: TypeId) -> Option<TypeId> {
    if type_id.is_any_like() {
        return Some(TypeId::ANY);
    }
    match db.lookup(type_id)? {
        TypeKey::Array(element) => Some(element),
        TypeKey::Tuple(elements) => Some(db.union(elements)),
        TypeKey::Union(members) => {
            let mut elements = Vec::with_capacity(members.len());
            for member in members {
                elements.push(array_element_type(db, member)?);
            }
            Some(db.union(elements))
        }
        TypeKey::TypeParameter(info) => array_element_type(db, info.constraint?),
        _ => None,
    }
}

/// Whether a value of this type can be spread into an object literal.
pub fn is_valid_spread_type(db: &TypeInterner, type_id: TypeId) -> bool {
    if type_id.is_any_like() || type_id.is_nullish() || type_id == TypeId::OBJECT || type_id == TypeId::NEVER {
        return true;
    }
    match db.lookup(type_id) {
        Some(TypeKey::Object(_)) | Some(TypeKey::Callable(_)) | Some(TypeKey::Array(_)) | Some(TypeKey::Tuple(_)) => true,
        Some(TypeKey::Union(members)) | Some(TypeKey::Intersection(members)) => {
            members.into_iter().all(|m| is_valid_spread_type(db, m))
        }
        Some(TypeKey::TypeParameter(info)) => info.constraint.is_none_or(|c| is_valid_spread_type(db, c)),
        _ => false,
    }
}

/// Object-like types: anything with properties to relate structurally.
pub fn is_object_like(db: &TypeInterner, type_id: TypeId) -> bool {
    if type_id == TypeId::OBJECT {
        return true;
    }
    match db.lookup(type_id) {
        Some(TypeKey::Object(_)) | Some(TypeKey::Callable(_)) => true,
        Some(TypeKey::Intersection(members)) => members.into_iter().all(|m| is_object_like(db, m)),
        _ => false,
    }
}
