//! Type argument inference for generic call and construct signatures.

use crate::TypeInterner;
use crate::instantiate::TypeSubstitution;
use crate::operations_property::{array_element_type, get_property_of_type};
use crate::types::*;
use rustc_hash::FxHashMap;

const MAX_INFERENCE_DEPTH: u32 = 32;

struct InferenceContext<'a> {
    db: &'a TypeInterner,
    type_params: &'a [TypeId],
    candidates: FxHashMap<TypeId, Vec<TypeId>>,
}

impl InferenceContext<'_> {
    fn infer(&mut self, source: TypeId, target: TypeId, depth: u32) {
        if depth > MAX_INFERENCE_DEPTH || source == TypeId::ERROR {
            return;
        }
        if self.type_params.contains(&target) {
            let entry = self.candidates.entry(target).or_default();
            if !entry.contains(&source) {
                entry.push(source);
            }
            return;
        }
        match self.db.lookup(target) {
            Some(TypeKey::Object(shape)) => {
                for prop in shape.properties {
                    if let Some(source_prop) = get_property_of_type(self.db, source, prop.name) {
                        self.infer(source_prop.type_id, prop.type_id, depth + 1);
                    }
                }
            }
            Some(TypeKey::Array(element)) => {
                if let Some(source_element) = array_element_type(self.db, source) {
                    self.infer(source_element, element, depth + 1);
                }
            }
            Some(TypeKey::Union(members)) | Some(TypeKey::Intersection(members)) => {
                for member in members {
                    self.infer(source, member, depth + 1);
                }
            }
            _ => {}
        }
    }
}

/// Infer type arguments for `type_params` by matching `source` against
/// `target`. Uninferred parameters fall back to their default or constraint.
pub fn infer_type_arguments(
    db: &TypeInterner,
    type_params: &[TypeId],
    source: TypeId,
    target: TypeId,
) -> TypeSubstitution {
    let mut ctx = InferenceContext {
        db,
        type_params,
        candidates: FxHashMap::default(),
    };
    ctx.infer(source, target, 0);

    let args: Vec<TypeId> = type_params
        .iter()
        .map(|param| match ctx.candidates.remove(param) {
            Some(candidates) => db.union(candidates),
            None => db
                .type_param_info(*param)
                .and_then(|info| info.default.or(info.constraint))
                .unwrap_or(TypeId::UNKNOWN),
        })
        .collect();
    TypeSubstitution::from_args(db, type_params, &args)
}
