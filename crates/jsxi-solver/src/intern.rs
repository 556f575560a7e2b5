//! Type interning.
//!
//! Every type is stored once; constructors normalize their input (flatten
//! nested unions, drop `never` from unions, absorb into `any`, ...) before
//! interning so that equivalent types share a [`TypeId`].

use crate::types::*;
use jsxi_binder::SymbolId;
use jsxi_common::interner::{Atom, Interner};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;

/// Unions wider than this are not distributed over intersections.
const MAX_DISTRIBUTION_SIZE: usize = 64;

#[derive(Debug, Default)]
struct TypeStore {
    map: FxHashMap<TypeKey, TypeId>,
    keys: Vec<TypeKey>,
}

/// Owner of all types and of the property-name atoms they reference.
///
/// Interior mutability lets every query take `&self`; checking is
/// single-threaded so a `RefCell` is enough.
#[derive(Debug)]
pub struct TypeInterner {
    store: RefCell<TypeStore>,
    atoms: RefCell<Interner>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        let interner = TypeInterner {
            store: RefCell::new(TypeStore::default()),
            atoms: RefCell::new(Interner::new()),
        };
        for (id, kind) in INTRINSIC_KEYS {
            let interned = interner.intern(TypeKey::Intrinsic(kind));
            debug_assert_eq!(interned, id);
        }
        let t = interner.intern(TypeKey::Literal(LiteralValue::Boolean(true)));
        let f = interner.intern(TypeKey::Literal(LiteralValue::Boolean(false)));
        let empty = interner.intern(TypeKey::Object(ObjectShape::default()));
        debug_assert_eq!((t, f, empty), (TypeId::BOOLEAN_TRUE, TypeId::BOOLEAN_FALSE, TypeId::EMPTY_OBJECT));
        interner
    }

    /// Intern a key as-is. Prefer the normalizing constructors below.
    pub fn intern(&self, key: TypeKey) -> TypeId {
        let mut store = self.store.borrow_mut();
        if let Some(&id) = store.map.get(&key) {
            return id;
        }
        let id = TypeId(store.keys.len() as u32);
        store.keys.push(key.clone());
        store.map.insert(key, id);
        id
    }

    pub fn lookup(&self, id: TypeId) -> Option<TypeKey> {
        self.store.borrow().keys.get(id.0 as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.store.borrow().keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Atoms
    // =========================================================================

    pub fn intern_string(&self, s: &str) -> Atom {
        self.atoms.borrow_mut().intern(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> String {
        self.atoms.borrow().resolve(atom).to_string()
    }

    /// Atom for `s` if it was interned before.
    pub fn get_atom(&self, s: &str) -> Option<Atom> {
        self.atoms.borrow().get(s)
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn literal_string(&self, value: &str) -> TypeId {
        let atom = self.intern_string(value);
        self.intern(TypeKey::Literal(LiteralValue::String(atom)))
    }

    pub fn literal_number(&self, value: f64) -> TypeId {
        self.intern(TypeKey::Literal(LiteralValue::number(value)))
    }

    pub fn literal_boolean(&self, value: bool) -> TypeId {
        if value {
            TypeId::BOOLEAN_TRUE
        } else {
            TypeId::BOOLEAN_FALSE
        }
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeKey::Array(element))
    }

    pub fn tuple(&self, elements: Vec<TypeId>) -> TypeId {
        self.intern(TypeKey::Tuple(elements))
    }

    pub fn object(&self, properties: Vec<PropertyInfo>) -> TypeId {
        if properties.is_empty() {
            return TypeId::EMPTY_OBJECT;
        }
        self.intern(TypeKey::Object(ObjectShape::new(properties)))
    }

    pub fn object_with_shape(&self, shape: ObjectShape) -> TypeId {
        self.intern(TypeKey::Object(shape))
    }

    /// Named interface/class instance type.
    pub fn interface(&self, symbol: SymbolId, properties: Vec<PropertyInfo>, string_index: Option<TypeId>) -> TypeId {
        self.intern(TypeKey::Object(ObjectShape {
            properties,
            string_index,
            symbol: Some(symbol),
        }))
    }

    pub fn callable(&self, shape: CallableShape) -> TypeId {
        self.intern(TypeKey::Callable(shape))
    }

    /// Plain function type with one call signature.
    pub fn function(&self, signature: CallSignature) -> TypeId {
        self.callable(CallableShape {
            call_signatures: vec![signature],
            ..CallableShape::default()
        })
    }

    pub fn type_param(&self, name: &str, constraint: Option<TypeId>) -> TypeId {
        let name = self.intern_string(name);
        self.intern(TypeKey::TypeParameter(TypeParamInfo {
            name,
            constraint,
            default: None,
        }))
    }

    pub fn type_param_with_default(&self, name: &str, constraint: Option<TypeId>, default: TypeId) -> TypeId {
        let name = self.intern_string(name);
        self.intern(TypeKey::TypeParameter(TypeParamInfo {
            name,
            constraint,
            default: Some(default),
        }))
    }

    pub fn union2(&self, a: TypeId, b: TypeId) -> TypeId {
        self.union(vec![a, b])
    }

    pub fn union(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat: SmallVec<[TypeId; 8]> = SmallVec::new();
        for member in members {
            match self.lookup(member) {
                Some(TypeKey::Union(inner)) => flat.extend(inner),
                _ => flat.push(member),
            }
        }

        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        if flat.contains(&TypeId::ERROR) {
            return TypeId::ERROR;
        }
        if flat.contains(&TypeId::UNKNOWN) {
            return TypeId::UNKNOWN;
        }
        flat.retain(|t| *t != TypeId::NEVER);
        flat.sort_unstable();
        flat.dedup();

        if flat.contains(&TypeId::BOOLEAN_TRUE) && flat.contains(&TypeId::BOOLEAN_FALSE) {
            flat.retain(|t| *t != TypeId::BOOLEAN_TRUE && *t != TypeId::BOOLEAN_FALSE);
            flat.push(TypeId::BOOLEAN);
            flat.sort_unstable();
            flat.dedup();
        }
        let has_string = flat.contains(&TypeId::STRING);
        let has_number = flat.contains(&TypeId::NUMBER);
        let has_boolean = flat.contains(&TypeId::BOOLEAN);
        if has_string || has_number || has_boolean {
            flat.retain(|t| match self.lookup(*t) {
                Some(TypeKey::Literal(LiteralValue::String(_))) => !has_string,
                Some(TypeKey::Literal(LiteralValue::Number(_))) => !has_number,
                Some(TypeKey::Literal(LiteralValue::Boolean(_))) => !has_boolean,
                _ => true,
            });
        }

        match flat.len() {
            0 => TypeId::NEVER,
            1 => flat[0],
            _ => self.intern(TypeKey::Union(flat.into_vec())),
        }
    }

    pub fn intersection2(&self, a: TypeId, b: TypeId) -> TypeId {
        self.intersection(vec![a, b])
    }

    pub fn intersection(&self, members: Vec<TypeId>) -> TypeId {
        let mut flat: SmallVec<[TypeId; 8]> = SmallVec::new();
        for member in members {
            let inner = match self.lookup(member) {
                Some(TypeKey::Intersection(inner)) => inner,
                _ => vec![member],
            };
            for t in inner {
                if !flat.contains(&t) {
                    flat.push(t);
                }
            }
        }

        if flat.contains(&TypeId::NEVER) {
            return TypeId::NEVER;
        }
        if flat.contains(&TypeId::ANY) {
            return TypeId::ANY;
        }
        if flat.contains(&TypeId::ERROR) {
            return TypeId::ERROR;
        }
        flat.retain(|t| *t != TypeId::UNKNOWN);
        if flat.len() > 1 {
            flat.retain(|t| *t != TypeId::EMPTY_OBJECT);
        }

        // (A | B) & C  ==>  (A & C) | (B & C)
        if let Some(pos) = flat
            .iter()
            .position(|t| matches!(self.lookup(*t), Some(TypeKey::Union(_))))
            && let Some(TypeKey::Union(options)) = self.lookup(flat[pos])
            && options.len() * flat.len() <= MAX_DISTRIBUTION_SIZE
        {
            let distributed = options
                .into_iter()
                .map(|option| {
                    let mut parts = flat.to_vec();
                    parts[pos] = option;
                    self.intersection(parts)
                })
                .collect();
            return self.union(distributed);
        }

        match flat.len() {
            0 => TypeId::UNKNOWN,
            1 => flat[0],
            _ => self.intern(TypeKey::Intersection(flat.into_vec())),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn union_members(&self, id: TypeId) -> Option<Vec<TypeId>> {
        match self.lookup(id)? {
            TypeKey::Union(members) => Some(members),
            _ => None,
        }
    }

    pub fn intersection_members(&self, id: TypeId) -> Option<Vec<TypeId>> {
        match self.lookup(id)? {
            TypeKey::Intersection(members) => Some(members),
            _ => None,
        }
    }

    pub fn string_literal_value(&self, id: TypeId) -> Option<String> {
        match self.lookup(id)? {
            TypeKey::Literal(LiteralValue::String(atom)) => Some(self.resolve_atom(atom)),
            _ => None,
        }
    }

    pub fn is_string_literal(&self, id: TypeId) -> bool {
        matches!(self.lookup(id), Some(TypeKey::Literal(LiteralValue::String(_))))
    }

    pub fn object_shape(&self, id: TypeId) -> Option<ObjectShape> {
        match self.lookup(id)? {
            TypeKey::Object(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn callable_shape(&self, id: TypeId) -> Option<CallableShape> {
        match self.lookup(id)? {
            TypeKey::Callable(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn type_param_info(&self, id: TypeId) -> Option<TypeParamInfo> {
        match self.lookup(id)? {
            TypeKey::TypeParameter(info) => Some(info),
            _ => None,
        }
    }

    /// Declaring symbol of a named object or callable type.
    pub fn type_symbol(&self, id: TypeId) -> Option<SymbolId> {
        match self.lookup(id)? {
            TypeKey::Object(shape) => shape.symbol,
            TypeKey::Callable(shape) => shape.symbol,
            _ => None,
        }
    }

    /// Remove `null`/`undefined`/`void` constituents.
    pub fn remove_nullish(&self, id: TypeId) -> TypeId {
        match self.union_members(id) {
            Some(members) => self.union(members.into_iter().filter(|t| !t.is_nullish()).collect()),
            None if id.is_nullish() => TypeId::NEVER,
            None => id,
        }
    }
}

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod tests;
