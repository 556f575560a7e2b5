//! JSX checking.
//!
//! A file is checked against one of two JSX worlds, chosen per file:
//!
//! - [`NamespaceJsx`]: the conventional `React`-style namespace whose `JSX`
//!   export declares `Element`, `IntrinsicElements`, `ElementClass` and the
//!   other well-known types.
//! - [`GenericJsx`]: everything derived from the call signatures of one
//!   factory named by `@jsx-intrinsic-factory`.
//!
//! The driver in `element.rs` is strategy-agnostic and asks the active
//! [`JsxImplementation`] for the pieces that differ.

mod attributes;
mod children;
mod element;
mod generic;
mod namespace;

pub use attributes::{ExplicitAttribute, JsxAttributesType, SynthesizedChildren};
pub use generic::{GenericJsx, IntrinsicElementInfo, IntrinsicFactory};
pub use namespace::{IntrinsicAttributesInfo, NamespaceJsx, jsx_names};

use crate::state::CheckerState;
use jsxi_binder::SymbolId;
use jsxi_common::{JsxMode, JsxReferenceKind};
use jsxi_parser::NodeIndex;
use jsxi_solver::{CallSignature, TypeId};
use tracing::debug;

/// The JSX strategy active for one file.
#[derive(Clone, Debug)]
pub enum JsxImplementation {
    Namespace(NamespaceJsx),
    GenericFactory(GenericJsx),
}

impl JsxImplementation {
    pub fn mode(&self) -> JsxMode {
        match self {
            JsxImplementation::Namespace(_) => JsxMode::Namespace,
            JsxImplementation::GenericFactory(_) => JsxMode::GenericFactory,
        }
    }
}

/// What an intrinsic tag resolved to.
#[derive(Clone, Debug)]
pub(crate) struct IntrinsicResolution {
    pub symbol: Option<SymbolId>,
    pub attributes_type: TypeId,
    pub element_type: TypeId,
    pub children_type: Option<TypeId>,
}

impl<'a> CheckerState<'a> {
    // =========================================================================
    // Strategy selection
    // =========================================================================

    /// The file's JSX strategy, created on first use.
    ///
    /// A `@jsx-mode` pragma overrides the `jsx_mode` option.
    pub fn jsx_mode(&mut self) -> JsxMode {
        if let Some(jsx) = &self.ctx.jsx {
            return jsx.mode();
        }
        let mode = self
            .ctx
            .pragmas
            .jsx_mode
            .as_ref()
            .and_then(|pragma| JsxMode::from_config_str(&pragma.value))
            .unwrap_or(self.ctx.options.jsx_mode);
        debug!(?mode, file = %self.ctx.file_name, "selected JSX strategy");
        let implementation = match mode {
            JsxMode::Namespace => JsxImplementation::Namespace(self.create_namespace_jsx()),
            JsxMode::GenericFactory => JsxImplementation::GenericFactory(self.create_generic_jsx()),
        };
        self.ctx.jsx = Some(implementation);
        mode
    }

    pub(crate) fn namespace_jsx(&mut self) -> Option<&mut NamespaceJsx> {
        match self.ctx.jsx.as_mut()? {
            JsxImplementation::Namespace(ns) => Some(ns),
            JsxImplementation::GenericFactory(_) => None,
        }
    }

    pub(crate) fn generic_jsx(&self) -> Option<&GenericJsx> {
        match self.ctx.jsx.as_ref()? {
            JsxImplementation::GenericFactory(generic) => Some(generic),
            JsxImplementation::Namespace(_) => None,
        }
    }

    // =========================================================================
    // Info
    // =========================================================================

    /// Namespace name in effect (`React` unless overridden); empty in
    /// generic-factory mode.
    pub fn get_jsx_namespace(&mut self) -> String {
        match self.jsx_mode() {
            JsxMode::Namespace => self
                .namespace_jsx()
                .map(|ns| ns.namespace.clone())
                .unwrap_or_default(),
            JsxMode::GenericFactory => String::new(),
        }
    }

    /// Tag names a completion list would offer.
    pub fn get_jsx_intrinsic_tag_names(&mut self) -> Vec<String> {
        match self.jsx_mode() {
            JsxMode::Namespace => self.namespace_intrinsic_tag_names(),
            JsxMode::GenericFactory => self.generic_intrinsic_tag_names(),
        }
    }

    /// The attribute declaration a synthesized attribute symbol stands for.
    pub fn get_jsx_attribute_target(&self, symbol: SymbolId) -> Option<NodeIndex> {
        self.ctx
            .transient_symbols
            .get(symbol)
            .map(|s| s.value_declaration)
            .filter(|decl| decl.is_some())
    }

    // =========================================================================
    // Checker dispatch
    // =========================================================================

    pub(crate) fn check_jsx_preconditions(&mut self, node: NodeIndex) {
        match self.jsx_mode() {
            JsxMode::Namespace => self.namespace_check_preconditions(node),
            JsxMode::GenericFactory => {}
        }
    }

    /// Whether children are validated one by one against a declared
    /// children type instead of through a synthesized `children` prop.
    pub(crate) fn jsx_validates_children(&mut self) -> bool {
        self.jsx_mode() == JsxMode::GenericFactory
    }

    /// Name of the prop nested children are folded into, if any.
    pub(crate) fn jsx_children_property_name(&mut self, error_node: NodeIndex) -> Option<String> {
        match self.jsx_mode() {
            JsxMode::Namespace => self.namespace_element_children_attribute_name(error_node),
            JsxMode::GenericFactory => None,
        }
    }

    pub(crate) fn resolve_jsx_intrinsic(&mut self, opening: NodeIndex, tag: &str) -> IntrinsicResolution {
        match self.jsx_mode() {
            JsxMode::Namespace => self.namespace_resolve_intrinsic(opening, tag),
            JsxMode::GenericFactory => self.generic_resolve_intrinsic(opening, tag),
        }
    }

    /// Attributes type a component signature expects.
    pub(crate) fn jsx_attributes_type_for_signature(
        &mut self,
        kind: JsxReferenceKind,
        opening: NodeIndex,
        signature: &CallSignature,
        tag_type: TypeId,
    ) -> TypeId {
        match self.jsx_mode() {
            JsxMode::Namespace => self.namespace_attributes_type(kind, opening, signature, tag_type),
            JsxMode::GenericFactory => generic_attributes_type(self.ctx.types, kind, signature),
        }
    }

    /// Type of a component element expression.
    pub(crate) fn jsx_custom_element_type(&mut self, tag_type: TypeId) -> TypeId {
        match self.jsx_mode() {
            JsxMode::Namespace => self.get_jsx_type(jsx_names::ELEMENT),
            JsxMode::GenericFactory => generic::custom_element_type(self.ctx.types, tag_type),
        }
    }

    pub(crate) fn jsx_fragment_type(&mut self, child_types: &[TypeId]) -> TypeId {
        match self.jsx_mode() {
            JsxMode::Namespace => self.get_jsx_type(jsx_names::ELEMENT),
            JsxMode::GenericFactory => {
                let element = self.ctx.types.union(child_types.to_vec());
                self.ctx.types.array(element)
            }
        }
    }

    /// Upper bound for component instance / return types, `None` for "any".
    pub(crate) fn jsx_element_base_type(&mut self, kind: JsxReferenceKind) -> Option<TypeId> {
        match self.jsx_mode() {
            JsxMode::Namespace => self.namespace_element_base_type(kind),
            JsxMode::GenericFactory => None,
        }
    }
}

fn generic_attributes_type(
    db: &jsxi_solver::TypeInterner,
    kind: JsxReferenceKind,
    signature: &CallSignature,
) -> TypeId {
    match kind {
        JsxReferenceKind::Component | JsxReferenceKind::Function => signature
            .params
            .first()
            .map_or(TypeId::EMPTY_OBJECT, |p| db.remove_nullish(p.type_id)),
        _ => TypeId::EMPTY_OBJECT,
    }
}
