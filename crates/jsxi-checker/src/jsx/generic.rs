//! Generic-factory JSX: the tag-name universe, attribute types, children
//! types and element types all come from the call signatures of the factory
//! named by `@jsx-intrinsic-factory`.
//!
//! ```text
//! /* @jsx-mode generic */
//! /* @jsx-intrinsic-factory createElement */
//! declare function createElement(tag: "div" | "span", attrs?: Attrs, ...children: Node[]): Node;
//! ```

use super::IntrinsicResolution;
use crate::state::CheckerState;
use indexmap::IndexMap;
use jsxi_binder::{Symbol, SymbolFlags, SymbolId};
use jsxi_common::EntityName;
use jsxi_common::diagnostics::diagnostic_codes;
use jsxi_common::names::{escape_leading_underscores, unescape_leading_underscores};
use jsxi_parser::NodeIndex;
use jsxi_solver::{
    CallSignature, TypeId, TypeInterner, array_element_type, get_call_signatures, get_construct_signatures,
    is_array_like,
};
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Key of the entry used for any tag without an entry of its own.
const WILDCARD_TAG: &str = "";

/// What one intrinsic tag resolves to.
#[derive(Clone, Debug)]
pub struct IntrinsicElementInfo {
    /// The factory overload that declared the tag.
    pub call_signature: CallSignature,
    pub returned_type: TypeId,
    /// `SymbolId::UNKNOWN` for the wildcard entry.
    pub intrinsic_symbol: SymbolId,
    pub attributes_type: TypeId,
    pub children_type: Option<TypeId>,
}

/// Intrinsic map derived once per file from the factory's signatures.
#[derive(Clone, Debug)]
pub struct IntrinsicFactory {
    pub factory_symbol: SymbolId,
    /// Escaped tag name (or `""`) to element info, in discovery order.
    pub elements: IndexMap<String, IntrinsicElementInfo, FxBuildHasher>,
}

impl IntrinsicFactory {
    /// Entry for `tag`, falling back to the wildcard entry.
    pub fn get(&self, tag: &str) -> Option<&IntrinsicElementInfo> {
        self.elements
            .get(&escape_leading_underscores(tag))
            .or_else(|| self.elements.get(WILDCARD_TAG))
    }
}

#[derive(Clone, Debug, Default)]
pub struct GenericJsx {
    pub factory_entity: Option<EntityName>,
    /// `None` when no usable factory was found; lookups then report
    /// "No JSX intrinsic factory defined".
    pub factory: Option<IntrinsicFactory>,
    factory_referenced: bool,
}

impl<'a> CheckerState<'a> {
    pub(crate) fn create_generic_jsx(&mut self) -> GenericJsx {
        let Some(pragma) = self.ctx.pragmas.jsx_intrinsic_factory.clone() else {
            debug!("generic JSX without an intrinsic factory pragma");
            return GenericJsx::default();
        };
        let pragma_span = (pragma.pos, pragma.end - pragma.pos);
        let factory_entity = EntityName::parse(&pragma.value);
        let factory = factory_entity.as_ref().and_then(|entity| {
            let symbol = self.ctx.binder.resolve_entity_name(entity, SymbolFlags::VALUE)?;
            self.build_intrinsic_factory(symbol, pragma_span)
        });
        if factory.is_none() {
            self.error_at_span(
                pragma_span.0,
                pragma_span.1,
                diagnostic_codes::INVALID_FACTORY_IN_JSX_INTRINSIC_FACTORY_PRAGMA,
                &[],
            );
        }
        GenericJsx {
            factory_entity,
            factory,
            factory_referenced: false,
        }
    }

    /// Derive the intrinsic map from the factory's call signatures.
    ///
    /// Each overload takes `(tag, attributes?, children?)`. Tags come from
    /// the first parameter: string literals name one tag each, `string`
    /// adds the wildcard entry and unions are expanded breadth first. A
    /// union member of any other type is reported and skipped. An
    /// overload with a bad shape is reported and contributes nothing more.
    fn build_intrinsic_factory(&mut self, factory_symbol: SymbolId, pragma_span: (u32, u32)) -> Option<IntrinsicFactory> {
        let factory_symbol = self.ctx.binder.resolve_alias(factory_symbol);
        let db = self.ctx.types;
        let signatures = self
            .ctx
            .env
            .value_type(factory_symbol)
            .map(|t| get_call_signatures(db, t))
            .unwrap_or_default();
        if signatures.is_empty() {
            return None;
        }

        let mut elements: IndexMap<String, IntrinsicElementInfo, FxBuildHasher> = IndexMap::default();
        for signature in signatures {
            let declaration = signature.declaration;
            if !(1..=3).contains(&signature.params.len()) {
                self.error_at_declaration(
                    declaration,
                    Some(pragma_span),
                    diagnostic_codes::INVALID_FACTORY_IN_JSX_INTRINSIC_FACTORY_PRAGMA,
                    &[],
                );
                continue;
            }

            let returned_type = signature.return_type;
            let attributes_type = signature
                .params
                .get(1)
                .map_or(TypeId::EMPTY_OBJECT, |p| db.remove_nullish(p.type_id));
            let children_type = match signature.params.get(2) {
                Some(param) if is_array_like(db, param.type_id) => array_element_type(db, param.type_id),
                Some(_) => {
                    self.error_at_declaration(
                        declaration,
                        Some(pragma_span),
                        diagnostic_codes::INVALID_JSX_INTRINSIC_FACTORY,
                        &[],
                    );
                    continue;
                }
                None => None,
            };

            let tag_type = signature.params[0].type_id;
            let mut queue = VecDeque::from([tag_type]);
            let mut seen = FxHashSet::from_iter([tag_type]);
            let mut reported_invalid_tag = false;
            while let Some(candidate) = queue.pop_front() {
                let (key, intrinsic_symbol) = if candidate == TypeId::STRING {
                    (WILDCARD_TAG.to_string(), SymbolId::UNKNOWN)
                } else if let Some(value) = db.string_literal_value(candidate) {
                    let escaped = escape_leading_underscores(&value);
                    let symbol = match elements.get(&escaped) {
                        Some(existing) => existing.intrinsic_symbol,
                        None => self
                            .ctx
                            .transient_symbols
                            .alloc(Symbol::new(SymbolFlags::PROPERTY | SymbolFlags::TRANSIENT, escaped.clone())),
                    };
                    (escaped, symbol)
                } else if let Some(members) = db.union_members(candidate) {
                    for member in members {
                        if seen.insert(member) {
                            queue.push_back(member);
                        }
                    }
                    continue;
                } else {
                    // One report per overload; the remaining members still register.
                    if !reported_invalid_tag {
                        reported_invalid_tag = true;
                        self.error_at_declaration(
                            declaration,
                            Some(pragma_span),
                            diagnostic_codes::INVALID_JSX_INTRINSIC_FACTORY,
                            &[],
                        );
                    }
                    continue;
                };
                trace!(tag = %key, "intrinsic factory entry");
                elements.insert(
                    key,
                    IntrinsicElementInfo {
                        call_signature: signature.clone(),
                        returned_type,
                        intrinsic_symbol,
                        attributes_type,
                        children_type,
                    },
                );
            }
        }
        debug!(entries = elements.len(), "built intrinsic factory");
        Some(IntrinsicFactory {
            factory_symbol,
            elements,
        })
    }

    fn generic_intrinsic_element(&self, tag: &str) -> Option<IntrinsicElementInfo> {
        self.generic_jsx()?.factory.as_ref()?.get(tag).cloned()
    }

    pub(crate) fn generic_intrinsic_tag_names(&mut self) -> Vec<String> {
        self.generic_jsx()
            .and_then(|g| g.factory.as_ref())
            .map(|factory| {
                factory
                    .elements
                    .iter()
                    .filter(|(_, info)| !info.intrinsic_symbol.is_unknown())
                    .map(|(key, _)| unescape_leading_underscores(key).to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Element type of an intrinsic tag. The first successful lookup marks
    /// the factory entity referenced.
    pub(crate) fn generic_intrinsic_element_type(&mut self, tag: &str) -> TypeId {
        let Some(info) = self.generic_intrinsic_element(tag) else {
            return TypeId::ERROR;
        };
        let entity = match self.ctx.jsx.as_mut() {
            Some(super::JsxImplementation::GenericFactory(generic)) if !generic.factory_referenced => {
                generic.factory_referenced = true;
                generic.factory_entity.clone()
            }
            _ => None,
        };
        if let Some(entity) = entity
            && let Some(symbol) = self.ctx.binder.resolve_name(entity.first(), SymbolFlags::VALUE | SymbolFlags::NAMESPACE)
        {
            trace!(factory = %entity, "marking intrinsic factory referenced");
            self.mark_symbol_referenced(symbol);
        }
        info.returned_type
    }

    /// Symbol of an intrinsic tag; on a miss, reports at `error_node` either
    /// that no factory exists or that the factory lacks the tag.
    pub(crate) fn generic_intrinsic_symbol(&mut self, tag: &str, error_node: Option<NodeIndex>) -> SymbolId {
        if let Some(info) = self.generic_intrinsic_element(tag) {
            return info.intrinsic_symbol;
        }
        if let Some(error_node) = error_node {
            let factory_name = self
                .generic_jsx()
                .filter(|g| g.factory.is_some())
                .and_then(|g| g.factory_entity.as_ref())
                .map(ToString::to_string);
            match factory_name {
                None => self.error_at_node(error_node, diagnostic_codes::NO_JSX_INTRINSIC_FACTORY_DEFINED, &[]),
                Some(factory_name) => {
                    let display = unescape_leading_underscores(tag).to_string();
                    self.error_at_node(
                        error_node,
                        diagnostic_codes::INTRINSIC_JSX_ELEMENT_DOES_NOT_EXIST_IN_FACTORY,
                        &[&display, &factory_name],
                    );
                }
            }
        }
        SymbolId::UNKNOWN
    }

    pub(crate) fn generic_intrinsic_children_type(&self, tag: &str) -> Option<TypeId> {
        self.generic_intrinsic_element(tag)?.children_type
    }

    /// The factory overload an intrinsic tag resolves to.
    pub fn generic_intrinsic_signature(&self, tag: &str) -> Option<CallSignature> {
        self.generic_intrinsic_element(tag).map(|info| info.call_signature)
    }

    pub(crate) fn generic_resolve_intrinsic(&mut self, opening: NodeIndex, tag: &str) -> IntrinsicResolution {
        let tag_node = self.jsx_tag_name_node(opening).unwrap_or(opening);
        let symbol = self.generic_intrinsic_symbol(tag, Some(tag_node));
        let attributes_type = self
            .generic_intrinsic_element(tag)
            .map_or(TypeId::ERROR, |info| info.attributes_type);
        IntrinsicResolution {
            symbol: (!symbol.is_unknown()).then_some(symbol),
            attributes_type,
            element_type: self.generic_intrinsic_element_type(tag),
            children_type: self.generic_intrinsic_children_type(tag),
        }
    }

    /// Union of the children types the component's signatures declare
    /// (`constructor(attrs?, ...children: T[])`).
    pub(crate) fn generic_component_children_type(&self, tag_type: TypeId, construct: bool) -> Option<TypeId> {
        let db = self.ctx.types;
        let signatures = if construct {
            get_construct_signatures(db, tag_type)
        } else {
            get_call_signatures(db, tag_type)
        };
        let children: Vec<TypeId> = signatures
            .iter()
            .filter_map(|sig| sig.params.get(1))
            .filter(|p| is_array_like(db, p.type_id))
            .filter_map(|p| array_element_type(db, p.type_id))
            .collect();
        (!children.is_empty()).then(|| db.union(children))
    }
}

/// First construct signature's return type, else first call signature's.
pub(crate) fn custom_element_type(db: &TypeInterner, tag_type: TypeId) -> TypeId {
    if let Some(signature) = get_construct_signatures(db, tag_type).first() {
        return signature.return_type;
    }
    get_call_signatures(db, tag_type)
        .first()
        .map_or(TypeId::ERROR, |sig| sig.return_type)
}
