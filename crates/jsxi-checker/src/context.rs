//! Checker context: the shared inputs and side tables of one file check.

use crate::jsx::JsxImplementation;
use jsxi_binder::{BinderState, SymbolArena, SymbolId};
use jsxi_common::{Diagnostic, JsxEmit, JsxMode, JsxPragmas, JsxReferenceKind};
use jsxi_parser::{NodeArena, NodeIndex};
use jsxi_solver::{CallSignature, TypeId, TypeInterner};
use rustc_hash::{FxHashMap, FxHashSet};

/// Compiler options the JSX core reads.
#[derive(Clone, Debug, Default)]
pub struct CheckerOptions {
    pub jsx: JsxEmit,
    /// Strategy used when a file carries no `@jsx-mode` pragma.
    pub jsx_mode: JsxMode,
    pub jsx_factory: Option<String>,
    pub jsx_fragment_factory: Option<String>,
    pub jsx_import_source: Option<String>,
    pub react_namespace: Option<String>,
    pub no_implicit_any: bool,
}

/// A declared (type-side) type, possibly generic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclaredType {
    pub type_id: TypeId,
    pub type_params: Vec<TypeId>,
}

/// Types the host checker computed for declarations and expressions the
/// JSX core does not type itself.
#[derive(Clone, Debug, Default)]
pub struct TypeEnvironment {
    value_types: FxHashMap<SymbolId, TypeId>,
    declared_types: FxHashMap<SymbolId, DeclaredType>,
    expression_types: FxHashMap<NodeIndex, TypeId>,
    this_type: Option<TypeId>,
}

impl TypeEnvironment {
    pub fn new() -> Self {
        TypeEnvironment::default()
    }

    /// Type of a value symbol (variable, function, class constructor).
    pub fn set_value_type(&mut self, symbol: SymbolId, type_id: TypeId) {
        self.value_types.insert(symbol, type_id);
    }

    pub fn value_type(&self, symbol: SymbolId) -> Option<TypeId> {
        self.value_types.get(&symbol).copied()
    }

    /// Declared type of an interface, class instance or type alias.
    pub fn set_declared_type(&mut self, symbol: SymbolId, type_id: TypeId) {
        self.declared_types.insert(
            symbol,
            DeclaredType {
                type_id,
                type_params: Vec::new(),
            },
        );
    }

    pub fn set_generic_declared_type(&mut self, symbol: SymbolId, type_params: Vec<TypeId>, body: TypeId) {
        self.declared_types.insert(
            symbol,
            DeclaredType {
                type_id: body,
                type_params,
            },
        );
    }

    pub fn declared_type(&self, symbol: SymbolId) -> Option<&DeclaredType> {
        self.declared_types.get(&symbol)
    }

    /// Type of an expression the JSX core treats as opaque.
    pub fn set_expression_type(&mut self, node: NodeIndex, type_id: TypeId) {
        self.expression_types.insert(node, type_id);
    }

    pub fn expression_type(&self, node: NodeIndex) -> Option<TypeId> {
        self.expression_types.get(&node).copied()
    }

    pub fn set_this_type(&mut self, type_id: TypeId) {
        self.this_type = Some(type_id);
    }

    pub fn this_type(&self) -> Option<TypeId> {
        self.this_type
    }
}

/// Per-node facts computed once and reused.
#[derive(Clone, Debug, Default)]
pub struct NodeLinks {
    pub resolved_type: Option<TypeId>,
    pub jsx_reference_kind: Option<JsxReferenceKind>,
    pub resolved_signature: Option<CallSignature>,
    /// Symbol an intrinsic tag resolved to.
    pub resolved_symbol: Option<SymbolId>,
    /// Synthesized attribute symbol for a `JsxAttribute` node.
    pub attribute_symbol: Option<SymbolId>,
}

pub struct CheckerContext<'a> {
    pub arena: &'a NodeArena,
    pub binder: &'a BinderState,
    pub types: &'a TypeInterner,
    pub env: &'a TypeEnvironment,
    pub options: CheckerOptions,
    pub file_name: String,
    pub source_file: NodeIndex,
    pub pragmas: JsxPragmas,
    pub diagnostics: Vec<Diagnostic>,
    emitted: FxHashSet<(u32, u32, String)>,
    pub node_links: FxHashMap<NodeIndex, NodeLinks>,
    /// Symbols created while checking (synthesized attributes, intrinsic tags).
    pub transient_symbols: SymbolArena,
    /// Symbols whose import must survive emit.
    pub referenced_symbols: FxHashSet<SymbolId>,
    pub jsx: Option<JsxImplementation>,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        arena: &'a NodeArena,
        binder: &'a BinderState,
        types: &'a TypeInterner,
        env: &'a TypeEnvironment,
        options: CheckerOptions,
    ) -> Self {
        let (source_file, file_name, pragmas) = match arena.source_file() {
            Some((idx, data)) => (idx, data.file_name.clone(), data.pragmas.clone()),
            None => (NodeIndex::NONE, String::new(), JsxPragmas::default()),
        };
        CheckerContext {
            arena,
            binder,
            types,
            env,
            options,
            file_name,
            source_file,
            pragmas,
            diagnostics: Vec::new(),
            emitted: FxHashSet::default(),
            node_links: FxHashMap::default(),
            transient_symbols: SymbolArena::transient(),
            referenced_symbols: FxHashSet::default(),
            jsx: None,
        }
    }

    /// Append a diagnostic unless an identical one (same start, code and
    /// message) was already recorded.
    pub fn push_diagnostic(&mut self, diag: Diagnostic) {
        if self
            .emitted
            .insert((diag.start, diag.code, diag.message_text.clone()))
        {
            self.diagnostics.push(diag);
        }
    }

    pub fn no_implicit_any(&self) -> bool {
        self.options.no_implicit_any
    }

    pub fn links(&self, idx: NodeIndex) -> Option<&NodeLinks> {
        self.node_links.get(&idx)
    }

    pub fn links_mut(&mut self, idx: NodeIndex) -> &mut NodeLinks {
        self.node_links.entry(idx).or_default()
    }

    /// A symbol from either the binder or the transient arena.
    pub fn symbol(&self, id: SymbolId) -> Option<&jsxi_binder::Symbol> {
        if self.transient_symbols.owns(id) {
            self.transient_symbols.get(id)
        } else {
            self.binder.get_symbol(id)
        }
    }
}
