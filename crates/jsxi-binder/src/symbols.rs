use bitflags::bitflags;
use indexmap::IndexMap;
use jsxi_parser::NodeIndex;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

/// Index of a symbol in a [`SymbolArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);
    /// Stand-in for a symbol that could not be resolved.
    pub const UNKNOWN: SymbolId = SymbolId(u32::MAX - 1);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_unknown(self) -> bool {
        self.0 == u32::MAX - 1
    }
}

/// First id handed out by transient (checker-created) arenas.
pub const TRANSIENT_SYMBOL_BASE: u32 = 1 << 31;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SymbolFlags: u32 {
        const FUNCTION_SCOPED_VARIABLE = 1 << 0;
        const BLOCK_SCOPED_VARIABLE = 1 << 1;
        const PROPERTY = 1 << 2;
        const FUNCTION = 1 << 4;
        const CLASS = 1 << 5;
        const INTERFACE = 1 << 6;
        const VALUE_MODULE = 1 << 9;
        const NAMESPACE_MODULE = 1 << 10;
        const TYPE_ALIAS = 1 << 11;
        const TYPE_PARAMETER = 1 << 12;
        const ALIAS = 1 << 21;
        const TRANSIENT = 1 << 25;

        const VARIABLE = Self::FUNCTION_SCOPED_VARIABLE.bits() | Self::BLOCK_SCOPED_VARIABLE.bits();
        const VALUE = Self::VARIABLE.bits()
            | Self::PROPERTY.bits()
            | Self::FUNCTION.bits()
            | Self::CLASS.bits()
            | Self::VALUE_MODULE.bits();
        const TYPE = Self::CLASS.bits()
            | Self::INTERFACE.bits()
            | Self::TYPE_ALIAS.bits()
            | Self::TYPE_PARAMETER.bits();
        const NAMESPACE = Self::VALUE_MODULE.bits() | Self::NAMESPACE_MODULE.bits();
    }
}

/// Ordered name -> symbol map. Iteration follows declaration order.
pub type SymbolTable = IndexMap<String, SymbolId, FxBuildHasher>;

#[derive(Clone, Debug)]
pub struct Symbol {
    pub flags: SymbolFlags,
    /// Name in escaped form (see `jsxi_common::names`).
    pub escaped_name: String,
    pub declarations: Vec<NodeIndex>,
    pub value_declaration: NodeIndex,
    pub parent: SymbolId,
    /// Exported members of namespaces/modules.
    pub exports: SymbolTable,
    /// Instance members of classes/interfaces.
    pub members: SymbolTable,
    /// For aliases (imports), the aliased symbol once resolved.
    pub alias_target: SymbolId,
    /// For transient symbols, the symbol or declaration they were derived from.
    pub target: SymbolId,
}

impl Symbol {
    pub fn new(flags: SymbolFlags, escaped_name: impl Into<String>) -> Self {
        Symbol {
            flags,
            escaped_name: escaped_name.into(),
            declarations: Vec::new(),
            value_declaration: NodeIndex::NONE,
            parent: SymbolId::NONE,
            exports: SymbolTable::default(),
            members: SymbolTable::default(),
            alias_target: SymbolId::NONE,
            target: SymbolId::NONE,
        }
    }

    #[inline]
    pub fn has_any_flags(&self, flags: SymbolFlags) -> bool {
        self.flags.intersects(flags)
    }

    pub fn add_declaration(&mut self, decl: NodeIndex) {
        if decl.is_none() {
            return;
        }
        if self.value_declaration.is_none() {
            self.value_declaration = decl;
        }
        self.declarations.push(decl);
    }
}

/// Storage for symbols with ids starting at `base`.
#[derive(Clone, Debug, Default)]
pub struct SymbolArena {
    base: u32,
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        SymbolArena::default()
    }

    /// Arena for checker-created symbols; ids never collide with binder ids.
    pub fn transient() -> Self {
        SymbolArena {
            base: TRANSIENT_SYMBOL_BASE,
            symbols: Vec::new(),
        }
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.base + self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    #[inline]
    pub fn owns(&self, id: SymbolId) -> bool {
        id.0 >= self.base && ((id.0 - self.base) as usize) < self.symbols.len()
    }

    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        if id.0 < self.base {
            return None;
        }
        self.symbols.get((id.0 - self.base) as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        if id.0 < self.base {
            return None;
        }
        self.symbols.get_mut((id.0 - self.base) as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
