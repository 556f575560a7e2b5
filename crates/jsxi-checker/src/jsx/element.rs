//! The JSX driver: classifies each element, picks the signature it resolves
//! to and validates attributes and children through the active strategy.

use crate::state::CheckerState;
use jsxi_binder::SymbolId;
use jsxi_common::JsxReferenceKind;
use jsxi_common::diagnostics::diagnostic_codes;
use jsxi_common::names::is_intrinsic_jsx_name;
use jsxi_parser::{NodeIndex, syntax_kind_ext};
use jsxi_solver::{
    CallSignature, TypeId, get_call_signatures, get_construct_signatures, infer_type_arguments,
    instantiate_signature, is_assignable_to,
};
use tracing::trace;

impl<'a> CheckerState<'a> {
    /// Type of a JSX element, self-closing element or fragment.
    #[tracing::instrument(level = "trace", skip(self), fields(node = idx.0))]
    pub(crate) fn check_jsx_expression(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let Some(node) = arena.get(idx) else {
            return TypeId::ERROR;
        };
        match node.kind {
            syntax_kind_ext::JSX_ELEMENT => match arena.get_jsx_element(node) {
                Some(element) => self.check_jsx_opening_like_element(element.opening_element),
                None => TypeId::ERROR,
            },
            syntax_kind_ext::JSX_SELF_CLOSING_ELEMENT => self.check_jsx_opening_like_element(idx),
            syntax_kind_ext::JSX_FRAGMENT => self.check_jsx_fragment(idx),
            _ => TypeId::ERROR,
        }
    }

    // =========================================================================
    // Reference kinds
    // =========================================================================

    /// How the tag of an opening-like element resolves. Computed once per
    /// element; later calls return the memoized kind.
    pub fn get_jsx_reference_kind(&mut self, opening: NodeIndex) -> JsxReferenceKind {
        if let Some(kind) = self.ctx.links(opening).and_then(|l| l.jsx_reference_kind) {
            return kind;
        }
        let kind = self.compute_jsx_reference_kind(opening);
        trace!(opening = opening.0, ?kind, "jsx reference kind");
        self.ctx.links_mut(opening).jsx_reference_kind = Some(kind);
        kind
    }

    fn compute_jsx_reference_kind(&mut self, opening: NodeIndex) -> JsxReferenceKind {
        let Some(tag_node) = self.jsx_tag_name_node(opening) else {
            return JsxReferenceKind::Mixed;
        };
        if self.is_jsx_intrinsic_tag_name(tag_node) {
            return JsxReferenceKind::Intrinsic;
        }
        let db = self.ctx.types;
        let tag_type = self.get_type_of_node(tag_node);
        if db.is_string_literal(tag_type) {
            return JsxReferenceKind::Intrinsic;
        }
        if tag_type.is_any_like() {
            return JsxReferenceKind::Mixed;
        }
        if !get_construct_signatures(db, tag_type).is_empty() {
            return JsxReferenceKind::Component;
        }
        if !get_call_signatures(db, tag_type).is_empty() {
            return JsxReferenceKind::Function;
        }
        let tag_text = self.ctx.arena.tag_name_text(tag_node).unwrap_or_default();
        self.error_at_node(
            tag_node,
            diagnostic_codes::JSX_ELEMENT_TYPE_DOES_NOT_HAVE_ANY_CONSTRUCT_OR_CALL_SIGNATURES,
            &[&tag_text],
        );
        JsxReferenceKind::Mixed
    }

    fn is_jsx_intrinsic_tag_name(&self, tag_node: NodeIndex) -> bool {
        let arena = self.ctx.arena;
        match arena.kind_of(tag_node) {
            Some(syntax_kind_ext::IDENTIFIER) => arena
                .identifier_text(tag_node)
                .is_some_and(is_intrinsic_jsx_name),
            Some(syntax_kind_ext::JSX_NAMESPACED_NAME) => true,
            _ => false,
        }
    }

    /// Tag name an intrinsic element is looked up by: the written name, or
    /// the value of a string-literal typed tag expression.
    fn jsx_intrinsic_tag(&mut self, opening: NodeIndex) -> String {
        let Some(tag_node) = self.jsx_tag_name_node(opening) else {
            return String::new();
        };
        let written = self.ctx.arena.tag_name_text(tag_node).unwrap_or_default();
        if self.is_jsx_intrinsic_tag_name(tag_node) {
            return written;
        }
        let tag_type = self.get_type_of_node(tag_node);
        self.ctx.types.string_literal_value(tag_type).unwrap_or(written)
    }

    /// Symbol an intrinsic element resolved to, once checked.
    pub fn get_jsx_intrinsic_symbol(&self, opening: NodeIndex) -> Option<SymbolId> {
        self.ctx.links(opening).and_then(|l| l.resolved_symbol)
    }

    /// Signature a component element resolved to, once checked.
    pub fn get_resolved_jsx_signature(&self, opening: NodeIndex) -> Option<&CallSignature> {
        self.ctx.links(opening).and_then(|l| l.resolved_signature.as_ref())
    }

    // =========================================================================
    // Elements
    // =========================================================================

    fn check_jsx_opening_like_element(&mut self, opening: NodeIndex) -> TypeId {
        self.jsx_mode();
        self.check_jsx_preconditions(opening);
        let element = self.ctx.arena.jsx_element_of_opening(opening);
        match self.get_jsx_reference_kind(opening) {
            JsxReferenceKind::Intrinsic => self.check_intrinsic_jsx_element(opening, element),
            kind @ (JsxReferenceKind::Component | JsxReferenceKind::Function) => {
                self.check_component_jsx_element(opening, element, kind)
            }
            JsxReferenceKind::Mixed => {
                self.create_jsx_attributes_type(opening, None);
                if let Some(element) = element {
                    self.check_jsx_children(element);
                }
                let tag_type = self
                    .jsx_tag_name_node(opening)
                    .map_or(TypeId::ERROR, |tag| self.get_type_of_node(tag));
                self.jsx_custom_element_type(tag_type)
            }
        }
    }

    fn check_intrinsic_jsx_element(&mut self, opening: NodeIndex, element: Option<NodeIndex>) -> TypeId {
        let tag = self.jsx_intrinsic_tag(opening);
        let resolution = self.resolve_jsx_intrinsic(opening, &tag);
        let signature = self.generic_intrinsic_signature(&tag);
        let links = self.ctx.links_mut(opening);
        links.resolved_symbol = resolution.symbol;
        if signature.is_some() {
            links.resolved_signature = signature;
        }

        let attributes = self.create_jsx_attributes_type(opening, Some(resolution.attributes_type));
        self.check_jsx_attributes_assignable(opening, &attributes, resolution.attributes_type, true);
        if let Some(element) = element
            && self.jsx_validates_children()
        {
            self.check_jsx_children_against(element, resolution.children_type);
        }
        resolution.element_type
    }

    fn check_component_jsx_element(
        &mut self,
        opening: NodeIndex,
        element: Option<NodeIndex>,
        kind: JsxReferenceKind,
    ) -> TypeId {
        let db = self.ctx.types;
        let Some(tag_node) = self.jsx_tag_name_node(opening) else {
            return TypeId::ERROR;
        };
        let tag_type = self.get_type_of_node(tag_node);
        let is_component = kind == JsxReferenceKind::Component;
        let candidates = if is_component {
            get_construct_signatures(db, tag_type)
        } else {
            get_call_signatures(db, tag_type)
        };

        let mut first_candidate = None;
        let mut selected = None;
        for candidate in &candidates {
            let signature = self.instantiate_jsx_signature(opening, candidate);
            let target = self.jsx_attributes_type_for_signature(kind, opening, &signature, tag_type);
            let attributes = self.create_jsx_attributes_type(opening, Some(target));
            if self.check_jsx_attributes_assignable(opening, &attributes, target, false) {
                selected = Some(signature);
                break;
            }
            if first_candidate.is_none() {
                first_candidate = Some((signature, target, attributes));
            }
        }
        let signature = match (selected, first_candidate) {
            (Some(signature), _) => signature,
            (None, Some((signature, target, attributes))) => {
                trace!(candidates = candidates.len(), "no signature accepts the attributes");
                self.check_jsx_attributes_assignable(opening, &attributes, target, true);
                signature
            }
            (None, None) => return TypeId::ERROR,
        };

        self.check_jsx_return_assignable_to_base(opening, kind, &signature);
        self.ctx.links_mut(opening).resolved_signature = Some(signature);
        if let Some(element) = element
            && self.jsx_validates_children()
        {
            let children_type = self.generic_component_children_type(tag_type, is_component);
            self.check_jsx_children_against(element, children_type);
        }
        self.jsx_custom_element_type(tag_type)
    }

    /// Infer a generic component's type arguments from the attributes.
    fn instantiate_jsx_signature(&mut self, opening: NodeIndex, signature: &CallSignature) -> CallSignature {
        let Some(props) = signature.params.first().map(|p| p.type_id) else {
            return signature.clone();
        };
        if signature.type_params.is_empty() {
            return signature.clone();
        }
        let attributes = self.create_jsx_attributes_type(opening, None);
        let db = self.ctx.types;
        let subst = infer_type_arguments(db, &signature.type_params, attributes.type_id, props);
        instantiate_signature(db, signature.clone(), &subst)
    }

    /// Component instances and function results must fit the strategy's
    /// element base type.
    fn check_jsx_return_assignable_to_base(&mut self, opening: NodeIndex, kind: JsxReferenceKind, signature: &CallSignature) {
        let Some(base) = self.jsx_element_base_type(kind) else {
            return;
        };
        let returned = signature.return_type;
        if returned.is_any_like() || is_assignable_to(self.ctx.types, returned, base) {
            return;
        }
        let Some(tag_node) = self.jsx_tag_name_node(opening) else {
            return;
        };
        let tag_text = self.ctx.arena.tag_name_text(tag_node).unwrap_or_default();
        self.error_at_node(
            tag_node,
            diagnostic_codes::CANNOT_BE_USED_AS_A_JSX_COMPONENT,
            &[&tag_text],
        );
    }

    // =========================================================================
    // Fragments
    // =========================================================================

    fn check_jsx_fragment(&mut self, fragment: NodeIndex) -> TypeId {
        self.jsx_mode();
        let arena = self.ctx.arena;
        let opening = arena
            .get(fragment)
            .and_then(|node| arena.get_jsx_fragment(node))
            .map_or(fragment, |data| data.opening_fragment);
        self.check_jsx_preconditions(opening);
        let child_types: Vec<TypeId> = self
            .check_jsx_children(fragment)
            .into_iter()
            .map(|(_, type_id)| type_id)
            .collect();
        self.jsx_fragment_type(&child_types)
    }
}
