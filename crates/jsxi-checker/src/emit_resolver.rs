//! What the lowering pass needs to know about a checked file.

use crate::jsx::JsxImplementation;
use crate::state::CheckerState;
use jsxi_binder::SymbolId;
use jsxi_common::names::is_intrinsic_jsx_name;
use jsxi_common::{EntityName, JsxMode, JsxReferenceKind};
use jsxi_parser::{NodeArena, NodeIndex, syntax_kind_ext};
use rustc_hash::{FxHashMap, FxHashSet};

/// Factory name used when a generic-factory file names no usable factory.
pub const UNKNOWN_INTRINSIC_FACTORY: &str = "ERROR_UNKNOWN_INTRINSIC_FACTORY";

/// Strategy details the lowering reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JsxEmitStrategy {
    Namespace {
        /// `reactNamespace`, default `React`.
        react_namespace: String,
        factory_entity: Option<EntityName>,
        fragment_factory_entity: Option<EntityName>,
    },
    GenericFactory { factory_entity: Option<EntityName> },
}

/// Snapshot of the checker's JSX results for one file.
#[derive(Clone, Debug)]
pub struct JsxEmitResolver {
    pub strategy: JsxEmitStrategy,
    reference_kinds: FxHashMap<NodeIndex, JsxReferenceKind>,
    referenced_symbols: FxHashSet<SymbolId>,
}

impl JsxEmitResolver {
    pub fn new(strategy: JsxEmitStrategy) -> Self {
        JsxEmitResolver {
            strategy,
            reference_kinds: FxHashMap::default(),
            referenced_symbols: FxHashSet::default(),
        }
    }

    pub fn mode(&self) -> JsxMode {
        match self.strategy {
            JsxEmitStrategy::Namespace { .. } => JsxMode::Namespace,
            JsxEmitStrategy::GenericFactory { .. } => JsxMode::GenericFactory,
        }
    }

    /// Record a classification (used by hosts that lower without checking).
    pub fn set_reference_kind(&mut self, opening: NodeIndex, kind: JsxReferenceKind) {
        self.reference_kinds.insert(opening, kind);
    }

    /// The memoized classification of an opening-like element. Elements the
    /// checker never saw are classified by the shape of their tag name.
    pub fn reference_kind(&self, arena: &NodeArena, opening: NodeIndex) -> JsxReferenceKind {
        if let Some(&kind) = self.reference_kinds.get(&opening) {
            return kind;
        }
        let tag = arena
            .get(opening)
            .and_then(|node| arena.get_jsx_opening(node))
            .map(|data| data.tag_name);
        match tag.and_then(|tag| arena.kind_of(tag).map(|kind| (tag, kind))) {
            Some((_, syntax_kind_ext::JSX_NAMESPACED_NAME)) => JsxReferenceKind::Intrinsic,
            Some((tag, syntax_kind_ext::IDENTIFIER))
                if arena.identifier_text(tag).is_some_and(is_intrinsic_jsx_name) =>
            {
                JsxReferenceKind::Intrinsic
            }
            _ => JsxReferenceKind::Mixed,
        }
    }

    /// Whether a symbol was used by JSX and must not be elided.
    pub fn is_referenced(&self, symbol: SymbolId) -> bool {
        self.referenced_symbols.contains(&symbol)
    }

    /// Factory expression for classic calls: the configured entity, else
    /// `<reactNamespace>.createElement` (or the unknown-factory placeholder
    /// in generic-factory mode).
    pub fn factory_entity(&self) -> EntityName {
        match &self.strategy {
            JsxEmitStrategy::Namespace {
                react_namespace,
                factory_entity,
                ..
            } => factory_entity.clone().unwrap_or_else(|| {
                EntityName::from_identifier(react_namespace.clone()).with_member("createElement")
            }),
            JsxEmitStrategy::GenericFactory { factory_entity } => factory_entity
                .clone()
                .unwrap_or_else(|| EntityName::from_identifier(UNKNOWN_INTRINSIC_FACTORY)),
        }
    }

    /// Fragment tag for classic calls; `None` in generic-factory mode, where
    /// fragments become array literals.
    pub fn fragment_entity(&self) -> Option<EntityName> {
        match &self.strategy {
            JsxEmitStrategy::Namespace {
                react_namespace,
                fragment_factory_entity,
                ..
            } => Some(fragment_factory_entity.clone().unwrap_or_else(|| {
                EntityName::from_identifier(react_namespace.clone()).with_member("Fragment")
            })),
            JsxEmitStrategy::GenericFactory { .. } => None,
        }
    }
}

impl<'a> CheckerState<'a> {
    /// Snapshot the file's JSX results for the lowering pass.
    pub fn emit_resolver(&mut self) -> JsxEmitResolver {
        self.jsx_mode();
        let strategy = match &self.ctx.jsx {
            Some(JsxImplementation::GenericFactory(generic)) => JsxEmitStrategy::GenericFactory {
                factory_entity: generic.factory_entity.clone(),
            },
            Some(JsxImplementation::Namespace(ns)) => JsxEmitStrategy::Namespace {
                react_namespace: ns.react_namespace.clone(),
                factory_entity: ns.factory_entity.clone(),
                fragment_factory_entity: ns.fragment_factory_entity.clone(),
            },
            None => JsxEmitStrategy::Namespace {
                react_namespace: crate::jsx::jsx_names::DEFAULT_NAMESPACE.to_string(),
                factory_entity: None,
                fragment_factory_entity: None,
            },
        };
        let mut resolver = JsxEmitResolver::new(strategy);
        for (&node, links) in &self.ctx.node_links {
            if let Some(kind) = links.jsx_reference_kind {
                resolver.reference_kinds.insert(node, kind);
            }
        }
        resolver.referenced_symbols = self.ctx.referenced_symbols.clone();
        resolver
    }
}
