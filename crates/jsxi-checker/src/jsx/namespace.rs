//! Conventional-namespace JSX: semantics come from the `JSX` namespace
//! exported by `React` (or whatever `@jsx`, `jsxFactory` or
//! `reactNamespace` name instead), falling back to a global `JSX`.

use super::IntrinsicResolution;
use crate::context::DeclaredType;
use crate::state::CheckerState;
use jsxi_binder::{SymbolFlags, SymbolId};
use jsxi_common::diagnostics::diagnostic_codes;
use jsxi_common::names::{escape_leading_underscores, unescape_leading_underscores};
use jsxi_common::{EntityName, JsxEmit, JsxReferenceKind};
use jsxi_parser::NodeIndex;
use jsxi_solver::{
    CallSignature, ParamInfo, TypeId, TypeSubstitution, get_index_type_of_type, get_properties_of_type,
    get_property_of_type, instantiate_type,
};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Well-known type names exported by the `JSX` namespace.
pub mod jsx_names {
    pub const JSX: &str = "JSX";
    pub const ELEMENT: &str = "Element";
    pub const ELEMENT_CLASS: &str = "ElementClass";
    pub const INTRINSIC_ELEMENTS: &str = "IntrinsicElements";
    pub const INTRINSIC_ATTRIBUTES: &str = "IntrinsicAttributes";
    pub const INTRINSIC_CLASS_ATTRIBUTES: &str = "IntrinsicClassAttributes";
    pub const LIBRARY_MANAGED_ATTRIBUTES: &str = "LibraryManagedAttributes";
    pub const ELEMENT_ATTRIBUTES_PROPERTY: &str = "ElementAttributesProperty";
    pub const ELEMENT_CHILDREN_ATTRIBUTE: &str = "ElementChildrenAttribute";
    /// Namespace name used after an unparsable `@jsx` pragma.
    pub const UNKNOWN_NAMESPACE: &str = "UNKNOWN_NAMESPACE";
    pub const DEFAULT_NAMESPACE: &str = "React";
}

/// Result of looking a tag up in `JSX.IntrinsicElements`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntrinsicAttributesInfo {
    pub symbol: Option<SymbolId>,
    pub attributes_type: TypeId,
}

#[derive(Clone, Debug, Default)]
pub struct NamespaceJsx {
    /// Namespace the `JSX` types are looked up in.
    pub namespace: String,
    /// Namespace of the default factory (`React.createElement`, `React.Fragment`).
    pub react_namespace: String,
    pub factory_entity: Option<EntityName>,
    pub fragment_factory_entity: Option<EntityName>,
    jsx_namespace_symbol: Option<Option<SymbolId>>,
    jsx_types: FxHashMap<&'static str, TypeId>,
    element_attributes_property: Option<Option<String>>,
    element_children_attribute: Option<Option<String>>,
    /// Keyed by escaped tag name.
    intrinsic_info: FxHashMap<String, IntrinsicAttributesInfo>,
}

impl<'a> CheckerState<'a> {
    pub(crate) fn create_namespace_jsx(&mut self) -> NamespaceJsx {
        let options = &self.ctx.options;
        let react_namespace = options
            .react_namespace
            .clone()
            .unwrap_or_else(|| jsx_names::DEFAULT_NAMESPACE.to_string());
        let option_factory = options.jsx_factory.as_deref().and_then(EntityName::parse);
        let fragment_factory_entity = self
            .ctx
            .pragmas
            .jsx_frag
            .as_ref()
            .and_then(|p| EntityName::parse(&p.value))
            .or_else(|| options.jsx_fragment_factory.as_deref().and_then(EntityName::parse));

        let (namespace, factory_entity) = match self.ctx.pragmas.jsx.clone() {
            Some(pragma) => match EntityName::parse(&pragma.value) {
                Some(entity) => (entity.first().to_string(), Some(entity)),
                None => {
                    self.error_at_span(
                        pragma.pos,
                        pragma.end - pragma.pos,
                        diagnostic_codes::INVALID_FACTORY_IN_JSX_PRAGMA,
                        &[],
                    );
                    (jsx_names::UNKNOWN_NAMESPACE.to_string(), None)
                }
            },
            None => match option_factory {
                Some(entity) => (entity.first().to_string(), Some(entity)),
                None => (react_namespace.clone(), None),
            },
        };
        debug!(%namespace, factory = ?factory_entity.as_ref().map(ToString::to_string), "namespace JSX");
        NamespaceJsx {
            namespace,
            react_namespace,
            factory_entity,
            fragment_factory_entity,
            ..NamespaceJsx::default()
        }
    }

    fn jsx_namespace_name(&mut self) -> String {
        self.namespace_jsx()
            .map(|ns| ns.namespace.clone())
            .unwrap_or_default()
    }

    /// `<Namespace>.JSX`, else the global `JSX`.
    pub(crate) fn get_jsx_namespace_symbol(&mut self) -> Option<SymbolId> {
        if let Some(cached) = self.namespace_jsx().and_then(|ns| ns.jsx_namespace_symbol) {
            return cached;
        }
        let namespace = self.jsx_namespace_name();
        let binder = self.ctx.binder;
        let symbol = binder
            .resolve_name(&namespace, SymbolFlags::NAMESPACE)
            .and_then(|ns| binder.get_export(ns, jsx_names::JSX, SymbolFlags::NAMESPACE))
            .or_else(|| binder.resolve_global(jsx_names::JSX, SymbolFlags::NAMESPACE))
            .map(|s| binder.resolve_alias(s));
        trace!(%namespace, ?symbol, "resolved JSX namespace");
        if let Some(ns) = self.namespace_jsx() {
            ns.jsx_namespace_symbol = Some(symbol);
        }
        symbol
    }

    fn get_jsx_declared(&mut self, name: &str) -> Option<(SymbolId, DeclaredType)> {
        let jsx = self.get_jsx_namespace_symbol()?;
        let symbol = self.ctx.binder.get_export(jsx, name, SymbolFlags::TYPE)?;
        let symbol = self.ctx.binder.resolve_alias(symbol);
        self.ctx.env.declared_type(symbol).map(|d| (symbol, d.clone()))
    }

    /// Declared type of `JSX.<name>`, or the error type when it is missing.
    pub(crate) fn get_jsx_type(&mut self, name: &'static str) -> TypeId {
        if let Some(&cached) = self.namespace_jsx().and_then(|ns| ns.jsx_types.get(name)) {
            return cached;
        }
        let type_id = self
            .get_jsx_declared(name)
            .map_or(TypeId::ERROR, |(_, declared)| declared.type_id);
        if let Some(ns) = self.namespace_jsx() {
            ns.jsx_types.insert(name, type_id);
        }
        type_id
    }

    // =========================================================================
    // Preconditions
    // =========================================================================

    pub(crate) fn namespace_check_preconditions(&mut self, node: NodeIndex) {
        if self.ctx.options.jsx == JsxEmit::None {
            self.error_at_node(
                node,
                diagnostic_codes::CANNOT_USE_JSX_UNLESS_THE_JSX_FLAG_IS_PROVIDED,
                &[],
            );
            return;
        }
        if self.get_jsx_type(jsx_names::ELEMENT) == TypeId::ERROR && self.ctx.no_implicit_any() {
            self.error_at_node(
                node,
                diagnostic_codes::JSX_ELEMENT_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_NO_INTERFACE_JSX_EXISTS,
                &[jsx_names::ELEMENT],
            );
        }

        let namespace = self.jsx_namespace_name();
        let location = self.jsx_tag_name_node(node).unwrap_or(node);
        match self.ctx.binder.resolve_name(&namespace, SymbolFlags::VALUE) {
            Some(symbol) => {
                self.mark_symbol_referenced(symbol);
            }
            None if self.ctx.options.jsx == JsxEmit::React => {
                let display = unescape_leading_underscores(&namespace).to_string();
                self.error_at_node(location, diagnostic_codes::CANNOT_FIND_NAME, &[&display]);
            }
            None => {}
        }
    }

    // =========================================================================
    // Well-known property names
    // =========================================================================

    /// Name of the single property of `JSX.<container>`: `Some("")` for an
    /// empty interface, `None` when undeclared or ambiguous (reported).
    fn jsx_property_name_from_container(&mut self, container: &'static str, error_node: NodeIndex) -> Option<String> {
        let (symbol, declared) = self.get_jsx_declared(container)?;
        let properties = get_properties_of_type(self.ctx.types, declared.type_id);
        match properties.as_slice() {
            [] => Some(String::new()),
            [single] => Some(self.ctx.types.resolve_atom(single.name)),
            _ => {
                let declaration = self
                    .ctx
                    .symbol(symbol)
                    .and_then(|s| s.declarations.first().copied())
                    .filter(|&decl| self.ctx.arena.get(decl).is_some())
                    .unwrap_or(error_node);
                self.error_at_node(
                    declaration,
                    diagnostic_codes::THE_GLOBAL_TYPE_JSX_MAY_NOT_HAVE_MORE_THAN_ONE_PROPERTY,
                    &[container],
                );
                None
            }
        }
    }

    pub(crate) fn namespace_element_attributes_property_name(&mut self, error_node: NodeIndex) -> Option<String> {
        if let Some(cached) = self
            .namespace_jsx()
            .and_then(|ns| ns.element_attributes_property.clone())
        {
            return cached;
        }
        let name = self.jsx_property_name_from_container(jsx_names::ELEMENT_ATTRIBUTES_PROPERTY, error_node);
        if let Some(ns) = self.namespace_jsx() {
            ns.element_attributes_property = Some(name.clone());
        }
        name
    }

    pub(crate) fn namespace_element_children_attribute_name(&mut self, error_node: NodeIndex) -> Option<String> {
        if let Some(cached) = self
            .namespace_jsx()
            .and_then(|ns| ns.element_children_attribute.clone())
        {
            return cached;
        }
        let name = self.jsx_property_name_from_container(jsx_names::ELEMENT_CHILDREN_ATTRIBUTE, error_node);
        if let Some(ns) = self.namespace_jsx() {
            ns.element_children_attribute = Some(name.clone());
        }
        name
    }

    // =========================================================================
    // Intrinsic elements
    // =========================================================================

    pub(crate) fn namespace_intrinsic_tag_names(&mut self) -> Vec<String> {
        let intrinsic_elements = self.get_jsx_type(jsx_names::INTRINSIC_ELEMENTS);
        if intrinsic_elements == TypeId::ERROR {
            return Vec::new();
        }
        get_properties_of_type(self.ctx.types, intrinsic_elements)
            .into_iter()
            .map(|p| self.ctx.types.resolve_atom(p.name))
            .collect()
    }

    /// Look `tag` up in `JSX.IntrinsicElements`. Cached per tag name; an
    /// entry computed without a symbol is recomputed when errors are wanted.
    pub(crate) fn namespace_intrinsic_attributes_info(
        &mut self,
        opening: NodeIndex,
        tag: &str,
        report_errors: bool,
    ) -> IntrinsicAttributesInfo {
        let key = escape_leading_underscores(tag);
        if let Some(cached) = self
            .namespace_jsx()
            .and_then(|ns| ns.intrinsic_info.get(&key).copied())
            && !(report_errors && cached.symbol.is_none())
        {
            return cached;
        }
        let info = self.compute_intrinsic_attributes_info(opening, tag, report_errors);
        if let Some(ns) = self.namespace_jsx() {
            ns.intrinsic_info.insert(key, info);
        }
        info
    }

    fn compute_intrinsic_attributes_info(
        &mut self,
        opening: NodeIndex,
        tag: &str,
        report_errors: bool,
    ) -> IntrinsicAttributesInfo {
        let intrinsic_elements = self.get_jsx_type(jsx_names::INTRINSIC_ELEMENTS);
        let db = self.ctx.types;
        if intrinsic_elements != TypeId::ERROR {
            let atom = db.intern_string(tag);
            if let Some(prop) = get_property_of_type(db, intrinsic_elements, atom) {
                return IntrinsicAttributesInfo {
                    symbol: prop.symbol,
                    attributes_type: prop.type_id,
                };
            }
            if let Some(index_type) = get_index_type_of_type(db, intrinsic_elements) {
                // Index-signature tags report the interface's own symbol.
                return IntrinsicAttributesInfo {
                    symbol: db.type_symbol(intrinsic_elements),
                    attributes_type: index_type,
                };
            }
            if report_errors {
                let tag_node = self.jsx_tag_name_node(opening).unwrap_or(opening);
                let container = format!("{}.{}", jsx_names::JSX, jsx_names::INTRINSIC_ELEMENTS);
                self.error_at_node(
                    tag_node,
                    diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
                    &[tag, &container],
                );
            }
            return IntrinsicAttributesInfo {
                symbol: None,
                attributes_type: TypeId::ERROR,
            };
        }
        if report_errors && self.ctx.no_implicit_any() {
            self.error_at_node(
                opening,
                diagnostic_codes::JSX_ELEMENT_IMPLICITLY_HAS_TYPE_ANY_BECAUSE_NO_INTERFACE_JSX_EXISTS,
                &[jsx_names::INTRINSIC_ELEMENTS],
            );
        }
        IntrinsicAttributesInfo {
            symbol: None,
            attributes_type: TypeId::ANY,
        }
    }

    pub(crate) fn namespace_resolve_intrinsic(&mut self, opening: NodeIndex, tag: &str) -> IntrinsicResolution {
        let info = self.namespace_intrinsic_attributes_info(opening, tag, true);
        let element_type = self.get_jsx_type(jsx_names::ELEMENT);
        let attributes_type = if info.attributes_type.is_any_like() {
            info.attributes_type
        } else {
            let signature = self.intrinsic_signature(info.attributes_type, element_type);
            let ctor_type = self.ctx.types.function(signature.clone());
            self.jsx_props_type_from_call_signature(&signature, ctor_type)
        };
        IntrinsicResolution {
            symbol: info.symbol,
            attributes_type,
            element_type,
            children_type: None,
        }
    }

    /// `(props: Attributes) => JSX.Element`, the signature an intrinsic tag behaves as.
    fn intrinsic_signature(&self, attributes_type: TypeId, element_type: TypeId) -> CallSignature {
        let props = self.ctx.types.intern_string("props");
        CallSignature::new(vec![ParamInfo::new(props, attributes_type)], element_type)
    }

    // =========================================================================
    // Component attributes
    // =========================================================================

    pub(crate) fn namespace_attributes_type(
        &mut self,
        kind: JsxReferenceKind,
        opening: NodeIndex,
        signature: &CallSignature,
        tag_type: TypeId,
    ) -> TypeId {
        if kind == JsxReferenceKind::Component {
            self.jsx_props_type_from_class_type(opening, signature, tag_type)
        } else {
            self.jsx_props_type_from_call_signature(signature, tag_type)
        }
    }

    fn jsx_props_type_from_call_signature(&mut self, signature: &CallSignature, ctor_type: TypeId) -> TypeId {
        let props = signature.params.first().map_or(TypeId::UNKNOWN, |p| p.type_id);
        let props = self.jsx_managed_attributes_type(ctor_type, props);
        let intrinsic_attributes = self.get_jsx_type(jsx_names::INTRINSIC_ATTRIBUTES);
        if intrinsic_attributes == TypeId::ERROR {
            props
        } else {
            self.ctx.types.intersection2(intrinsic_attributes, props)
        }
    }

    fn jsx_props_type_from_class_type(
        &mut self,
        opening: NodeIndex,
        signature: &CallSignature,
        tag_type: TypeId,
    ) -> TypeId {
        let db = self.ctx.types;
        let instance_type = signature.return_type;
        let forced = self.namespace_element_attributes_property_name(opening);
        let attributes = match forced.as_deref() {
            None => signature.params.first().map(|p| p.type_id),
            Some("") => Some(instance_type),
            Some(name) => get_property_of_type(db, instance_type, db.intern_string(name)).map(|p| p.type_id),
        };
        let Some(attributes) = attributes.or_else(|| forced.is_none().then_some(TypeId::UNKNOWN)) else {
            let has_attributes = self
                .jsx_attribute_nodes(opening)
                .is_some_and(|attrs| !attrs.is_empty());
            if let Some(name) = forced.as_deref()
                && has_attributes
            {
                self.error_at_node(
                    opening,
                    diagnostic_codes::JSX_ELEMENT_CLASS_DOES_NOT_SUPPORT_ATTRIBUTES_BECAUSE_IT_DOES_NOT_HAVE_A_PROPERTY,
                    &[name],
                );
            }
            return TypeId::UNKNOWN;
        };

        let attributes = self.jsx_managed_attributes_type(tag_type, attributes);
        if attributes == TypeId::ANY {
            return attributes;
        }

        let mut apparent = attributes;
        if let Some((_, class_attributes)) = self.get_jsx_declared(jsx_names::INTRINSIC_CLASS_ATTRIBUTES)
            && class_attributes.type_id != TypeId::ERROR
        {
            let class_attributes_type = if class_attributes.type_params.is_empty() {
                class_attributes.type_id
            } else {
                let subst = TypeSubstitution::from_args(db, &class_attributes.type_params, &[instance_type]);
                instantiate_type(db, class_attributes.type_id, &subst)
            };
            apparent = db.intersection2(class_attributes_type, apparent);
        }
        let intrinsic_attributes = self.get_jsx_type(jsx_names::INTRINSIC_ATTRIBUTES);
        if intrinsic_attributes != TypeId::ERROR {
            apparent = db.intersection2(intrinsic_attributes, apparent);
        }
        apparent
    }

    /// Apply `JSX.LibraryManagedAttributes<Component, Props>` when declared
    /// with (at least) those two type parameters.
    fn jsx_managed_attributes_type(&mut self, ctor_type: TypeId, attributes: TypeId) -> TypeId {
        let Some((_, managed)) = self.get_jsx_declared(jsx_names::LIBRARY_MANAGED_ATTRIBUTES) else {
            return attributes;
        };
        if managed.type_params.len() < 2 {
            return attributes;
        }
        let db = self.ctx.types;
        let subst = TypeSubstitution::from_args(db, &managed.type_params, &[ctor_type, attributes]);
        let result = instantiate_type(db, managed.type_id, &subst);
        trace!(ctor = ctor_type.0, attributes = attributes.0, result = result.0, "managed attributes");
        result
    }

    // =========================================================================
    // Element base types
    // =========================================================================

    pub(crate) fn namespace_element_base_type(&mut self, kind: JsxReferenceKind) -> Option<TypeId> {
        let db = self.ctx.types;
        let element = self.get_jsx_type(jsx_names::ELEMENT);
        let element_class = self.get_jsx_type(jsx_names::ELEMENT_CLASS);
        let function_bound = (element != TypeId::ERROR).then(|| db.union2(element, TypeId::NULL));
        let class_bound = (element_class != TypeId::ERROR).then_some(element_class);
        match kind {
            JsxReferenceKind::Function => function_bound,
            JsxReferenceKind::Component => class_bound,
            JsxReferenceKind::Mixed => match (function_bound, class_bound) {
                (Some(f), Some(c)) => Some(db.union2(f, c)),
                _ => None,
            },
            JsxReferenceKind::Intrinsic => None,
        }
    }
}
