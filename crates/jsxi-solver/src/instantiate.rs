//! Type substitution for generic declarations.

use crate::TypeInterner;
use crate::types::*;
use rustc_hash::FxHashMap;

/// Mapping from type parameters to the types that replace them.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<TypeId, TypeId>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        TypeSubstitution::default()
    }

    /// Pair `type_params` with `type_args`. Missing arguments fall back to the
    /// parameter's default, then its constraint, then `unknown`.
    pub fn from_args(db: &TypeInterner, type_params: &[TypeId], type_args: &[TypeId]) -> Self {
        let mut subst = TypeSubstitution::new();
        for (i, &param) in type_params.iter().enumerate() {
            let arg = type_args.get(i).copied().unwrap_or_else(|| {
                db.type_param_info(param)
                    .and_then(|info| info.default.or(info.constraint))
                    .unwrap_or(TypeId::UNKNOWN)
            });
            subst.insert(param, arg);
        }
        subst
    }

    pub fn insert(&mut self, param: TypeId, arg: TypeId) {
        self.map.insert(param, arg);
    }

    pub fn get(&self, param: TypeId) -> Option<TypeId> {
        self.map.get(&param).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn without(&self, shadowed: &[TypeId]) -> TypeSubstitution {
        let mut inner = self.clone();
        for param in shadowed {
            inner.map.remove(param);
        }
        inner
    }
}

/// Replace type parameters in `type_id` according to `subst`.
pub fn instantiate_type(db: &TypeInterner, type_id: TypeId, subst: &TypeSubstitution) -> TypeId {
    if subst.is_empty() || type_id.is_intrinsic() {
        return type_id;
    }
    let Some(key) = db.lookup(type_id) else {
        return type_id;
    };
    match key {
        TypeKey::TypeParameter(_) => subst.get(type_id).unwrap_or(type_id),
        TypeKey::Intrinsic(_) | TypeKey::Literal(_) => type_id,
        TypeKey::Union(members) => db.union(
            members
                .into_iter()
                .map(|m| instantiate_type(db, m, subst))
                .collect(),
        ),
        TypeKey::Intersection(members) => db.intersection(
            members
                .into_iter()
                .map(|m| instantiate_type(db, m, subst))
                .collect(),
        ),
        TypeKey::Array(element) => db.array(instantiate_type(db, element, subst)),
        TypeKey::Tuple(elements) => db.tuple(
            elements
                .into_iter()
                .map(|e| instantiate_type(db, e, subst))
                .collect(),
        ),
        TypeKey::Object(shape) => db.object_with_shape(ObjectShape {
            properties: instantiate_properties(db, shape.properties, subst),
            string_index: shape.string_index.map(|t| instantiate_type(db, t, subst)),
            symbol: shape.symbol,
        }),
        TypeKey::Callable(shape) => db.callable(CallableShape {
            call_signatures: shape
                .call_signatures
                .into_iter()
                .map(|sig| instantiate_signature(db, sig, subst))
                .collect(),
            construct_signatures: shape
                .construct_signatures
                .into_iter()
                .map(|sig| instantiate_signature(db, sig, subst))
                .collect(),
            properties: instantiate_properties(db, shape.properties, subst),
            symbol: shape.symbol,
        }),
    }
}

fn instantiate_properties(db: &TypeInterner, properties: Vec<PropertyInfo>, subst: &TypeSubstitution) -> Vec<PropertyInfo> {
    properties
        .into_iter()
        .map(|prop| PropertyInfo {
            type_id: instantiate_type(db, prop.type_id, subst),
            ..prop
        })
        .collect()
}

/// Instantiate a signature. The signature's own type parameters shadow
/// entries of `subst` with the same id.
pub fn instantiate_signature(db: &TypeInterner, sig: CallSignature, subst: &TypeSubstitution) -> CallSignature {
    let inner;
    let subst = if sig.type_params.iter().any(|p| subst.get(*p).is_some()) {
        inner = subst.without(&sig.type_params);
        &inner
    } else {
        subst
    };
    CallSignature {
        params: sig
            .params
            .into_iter()
            .map(|param| ParamInfo {
                type_id: instantiate_type(db, param.type_id, subst),
                ..param
            })
            .collect(),
        return_type: instantiate_type(db, sig.return_type, subst),
        ..sig
    }
}
