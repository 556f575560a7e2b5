//! Shared setup for the JSX checker tests: hand-bound symbols, an interner
//! and the host type environment the checker reads from.

#![allow(dead_code)]

use jsxi_binder::{BinderState, Scope, SymbolFlags, SymbolId};
use jsxi_checker::{CheckerOptions, CheckerState, TypeEnvironment, jsx_names};
use jsxi_common::{Diagnostic, JsxEmit};
use jsxi_parser::{NodeArena, NodeIndex, SourceBuilder};
use jsxi_solver::{CallSignature, CallableShape, ParamInfo, PropertyInfo, TypeId, TypeInterner};

pub struct JsxFixture {
    pub binder: BinderState,
    pub types: TypeInterner,
    pub env: TypeEnvironment,
    pub options: CheckerOptions,
    pub jsx_namespace: Option<SymbolId>,
    /// Declared type of `JSX.Element`, once declared.
    pub element_type: TypeId,
}

impl JsxFixture {
    pub fn new() -> Self {
        JsxFixture {
            binder: BinderState::new(),
            types: TypeInterner::new(),
            env: TypeEnvironment::new(),
            options: CheckerOptions {
                jsx: JsxEmit::React,
                ..CheckerOptions::default()
            },
            jsx_namespace: None,
            element_type: TypeId::ERROR,
        }
    }

    /// `React` with an `Element { type: string }` and the given intrinsic elements.
    pub fn with_react(intrinsics: &[(&str, TypeId)]) -> Self {
        let mut fixture = JsxFixture::new();
        fixture.declare_react("React");
        let element = vec![fixture.prop("type", TypeId::STRING)];
        fixture.element_type = fixture.jsx_interface(jsx_names::ELEMENT, element, None);
        let props = intrinsics
            .iter()
            .map(|&(tag, attrs)| fixture.prop(tag, attrs))
            .collect();
        fixture.jsx_interface(jsx_names::INTRINSIC_ELEMENTS, props, None);
        fixture
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Declare a value namespace `name` exporting an (empty) `JSX` namespace.
    pub fn declare_react(&mut self, name: &str) -> SymbolId {
        let react = self.declare_namespace(name);
        let jsx = self.binder.declare(
            Scope::Exports(react),
            "JSX",
            SymbolFlags::NAMESPACE_MODULE,
            NodeIndex::NONE,
        );
        self.jsx_namespace = Some(jsx);
        react
    }

    pub fn declare_namespace(&mut self, name: &str) -> SymbolId {
        self.binder.declare(
            Scope::Global,
            name,
            SymbolFlags::VALUE_MODULE | SymbolFlags::NAMESPACE_MODULE,
            NodeIndex::NONE,
        )
    }

    /// A global `JSX` namespace, used when no namespace exports one.
    pub fn declare_global_jsx(&mut self) -> SymbolId {
        let jsx = self
            .binder
            .declare(Scope::Global, "JSX", SymbolFlags::NAMESPACE_MODULE, NodeIndex::NONE);
        self.jsx_namespace = Some(jsx);
        jsx
    }

    pub fn declare_jsx_symbol(&mut self, name: &str) -> SymbolId {
        let jsx = self.jsx_namespace.expect("declare a JSX namespace first");
        self.binder
            .declare(Scope::Exports(jsx), name, SymbolFlags::INTERFACE, NodeIndex::NONE)
    }

    /// Declare `JSX.<name>` as an interface.
    pub fn jsx_interface(&mut self, name: &str, properties: Vec<PropertyInfo>, string_index: Option<TypeId>) -> TypeId {
        let symbol = self.declare_jsx_symbol(name);
        let type_id = self.types.interface(symbol, properties, string_index);
        self.env.set_declared_type(symbol, type_id);
        type_id
    }

    pub fn declare_value(&mut self, name: &str, type_id: TypeId) -> SymbolId {
        let symbol = self.binder.declare(
            Scope::FileLocal,
            name,
            SymbolFlags::BLOCK_SCOPED_VARIABLE,
            NodeIndex::NONE,
        );
        self.env.set_value_type(symbol, type_id);
        symbol
    }

    pub fn declare_function(&mut self, name: &str, type_id: TypeId) -> SymbolId {
        let symbol = self
            .binder
            .declare(Scope::FileLocal, name, SymbolFlags::FUNCTION, NodeIndex::NONE);
        self.env.set_value_type(symbol, type_id);
        symbol
    }

    pub fn declare_class(&mut self, name: &str, constructor_type: TypeId) -> SymbolId {
        let symbol = self
            .binder
            .declare(Scope::FileLocal, name, SymbolFlags::CLASS, NodeIndex::NONE);
        self.env.set_value_type(symbol, constructor_type);
        symbol
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub fn prop(&self, name: &str, type_id: TypeId) -> PropertyInfo {
        PropertyInfo::new(self.types.intern_string(name), type_id)
    }

    pub fn optional(&self, name: &str, type_id: TypeId) -> PropertyInfo {
        PropertyInfo::optional(self.types.intern_string(name), type_id)
    }

    /// Object type with required properties.
    pub fn object(&self, properties: &[(&str, TypeId)]) -> TypeId {
        self.types.object(
            properties
                .iter()
                .map(|&(name, type_id)| self.prop(name, type_id))
                .collect(),
        )
    }

    /// `(props: P) => R`
    pub fn function_component(&self, props: TypeId, returns: TypeId) -> TypeId {
        let name = self.types.intern_string("props");
        self.types
            .function(CallSignature::new(vec![ParamInfo::new(name, props)], returns))
    }

    /// `new (props: P) => I`
    pub fn class_component(&self, props: TypeId, instance: TypeId) -> TypeId {
        let name = self.types.intern_string("props");
        self.types.callable(CallableShape {
            construct_signatures: vec![CallSignature::new(vec![ParamInfo::new(name, props)], instance)],
            ..CallableShape::default()
        })
    }

    // =========================================================================
    // Checking
    // =========================================================================

    pub fn checker<'a>(&'a self, arena: &'a NodeArena) -> CheckerState<'a> {
        CheckerState::new(arena, &self.binder, &self.types, &self.env, self.options.clone())
    }

    pub fn check(&self, arena: &NodeArena) -> Vec<Diagnostic> {
        let mut checker = self.checker(arena);
        checker.check_source_file();
        checker.ctx.diagnostics
    }
}

/// Build a file holding one expression statement; returns the arena and the
/// expression node.
pub fn single_expression(
    file: &str,
    pragmas: &[&str],
    expr: impl FnOnce(&mut SourceBuilder) -> NodeIndex,
) -> (NodeArena, NodeIndex) {
    let mut b = SourceBuilder::new(file);
    for pragma in pragmas {
        b.comment(pragma);
    }
    let mut node = NodeIndex::NONE;
    b.expression_statement(|b| {
        node = expr(b);
        node
    });
    let (arena, _) = b.finish();
    (arena, node)
}

pub fn codes(diagnostics: &[Diagnostic]) -> Vec<u32> {
    diagnostics.iter().map(|d| d.code).collect()
}

/// Start offset of a node.
pub fn start_of(arena: &NodeArena, node: NodeIndex) -> u32 {
    arena.get(node).map_or(u32::MAX, |n| n.pos)
}

/// The tag name node of an element expression.
pub fn tag_of(arena: &NodeArena, element: NodeIndex) -> NodeIndex {
    let opening = arena.jsx_opening_like(element).unwrap_or(element);
    arena
        .get(opening)
        .and_then(|n| arena.get_jsx_opening(n))
        .map_or(NodeIndex::NONE, |data| data.tag_name)
}
