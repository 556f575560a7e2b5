//! Binder state: the symbol arena plus file-local and global scopes.

use crate::symbols::{Symbol, SymbolArena, SymbolFlags, SymbolId, SymbolTable};
use jsxi_common::EntityName;
use jsxi_common::names::escape_leading_underscores;
use jsxi_parser::NodeIndex;
use tracing::trace;

/// Where a new symbol is declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Top-level declarations of the file being checked.
    FileLocal,
    /// Lib and ambient declarations visible everywhere.
    Global,
    /// Exports of a namespace or module symbol.
    Exports(SymbolId),
    /// Instance members of a class or interface symbol.
    Members(SymbolId),
}

/// Upper bound on alias chains, so a cyclic import cannot hang resolution.
const MAX_ALIAS_DEPTH: usize = 32;

#[derive(Clone, Debug, Default)]
pub struct BinderState {
    pub symbols: SymbolArena,
    pub file_locals: SymbolTable,
    pub globals: SymbolTable,
}

impl BinderState {
    pub fn new() -> Self {
        BinderState::default()
    }

    #[inline]
    pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    fn table_mut(&mut self, scope: Scope) -> Option<&mut SymbolTable> {
        match scope {
            Scope::FileLocal => Some(&mut self.file_locals),
            Scope::Global => Some(&mut self.globals),
            Scope::Exports(parent) => self.symbols.get_mut(parent).map(|s| &mut s.exports),
            Scope::Members(parent) => self.symbols.get_mut(parent).map(|s| &mut s.members),
        }
    }

    /// Declare `name` in `scope`. Re-declaring an existing name merges the
    /// flags and declarations into the existing symbol (namespace + value
    /// merging, interface merging).
    pub fn declare(
        &mut self,
        scope: Scope,
        name: &str,
        flags: SymbolFlags,
        declaration: NodeIndex,
    ) -> SymbolId {
        let escaped = escape_leading_underscores(name);
        let existing = match scope {
            Scope::FileLocal => self.file_locals.get(&escaped).copied(),
            Scope::Global => self.globals.get(&escaped).copied(),
            Scope::Exports(parent) => self
                .symbols
                .get(parent)
                .and_then(|s| s.exports.get(&escaped).copied()),
            Scope::Members(parent) => self
                .symbols
                .get(parent)
                .and_then(|s| s.members.get(&escaped).copied()),
        };
        if let Some(id) = existing
            && let Some(symbol) = self.symbols.get_mut(id)
        {
            symbol.flags |= flags;
            symbol.add_declaration(declaration);
            return id;
        }

        let mut symbol = Symbol::new(flags, escaped.clone());
        symbol.add_declaration(declaration);
        if let Scope::Exports(parent) | Scope::Members(parent) = scope {
            symbol.parent = parent;
        }
        let id = self.symbols.alloc(symbol);
        if let Some(table) = self.table_mut(scope) {
            table.insert(escaped, id);
        }
        trace!(name, ?scope, id = id.0, "declared symbol");
        id
    }

    /// Declare an import alias `local` in file scope pointing at `target`.
    pub fn declare_alias(&mut self, local: &str, target: SymbolId, declaration: NodeIndex) -> SymbolId {
        let id = self.declare(Scope::FileLocal, local, SymbolFlags::ALIAS, declaration);
        if let Some(symbol) = self.symbols.get_mut(id) {
            symbol.alias_target = target;
        }
        id
    }

    /// Follow alias links to the aliased symbol.
    pub fn resolve_alias(&self, mut id: SymbolId) -> SymbolId {
        for _ in 0..MAX_ALIAS_DEPTH {
            match self.symbols.get(id) {
                Some(symbol)
                    if symbol.flags.contains(SymbolFlags::ALIAS) && !symbol.alias_target.is_none() =>
                {
                    id = symbol.alias_target;
                }
                _ => return id,
            }
        }
        id
    }

    /// Whether `id` (after alias resolution) has any of `meaning`'s flags.
    pub fn symbol_has_meaning(&self, id: SymbolId, meaning: SymbolFlags) -> bool {
        let resolved = self.resolve_alias(id);
        self.symbols
            .get(resolved)
            .is_some_and(|s| s.has_any_flags(meaning))
    }

    fn lookup_in(&self, table: &SymbolTable, name: &str, meaning: SymbolFlags) -> Option<SymbolId> {
        let escaped = escape_leading_underscores(name);
        table
            .get(&escaped)
            .copied()
            .filter(|&id| self.symbol_has_meaning(id, meaning))
    }

    /// Resolve a name from file scope, then global scope. The returned id may
    /// be an alias; use [`resolve_alias`](Self::resolve_alias) to see through it.
    pub fn resolve_name(&self, name: &str, meaning: SymbolFlags) -> Option<SymbolId> {
        self.lookup_in(&self.file_locals, name, meaning)
            .or_else(|| self.lookup_in(&self.globals, name, meaning))
    }

    pub fn resolve_global(&self, name: &str, meaning: SymbolFlags) -> Option<SymbolId> {
        self.lookup_in(&self.globals, name, meaning)
    }

    /// Look up an export of a namespace-like symbol.
    pub fn get_export(&self, namespace: SymbolId, name: &str, meaning: SymbolFlags) -> Option<SymbolId> {
        let resolved = self.resolve_alias(namespace);
        let symbol = self.symbols.get(resolved)?;
        self.lookup_in(&symbol.exports, name, meaning)
    }

    /// Look up an instance member of a class or interface symbol.
    pub fn get_member(&self, owner: SymbolId, name: &str) -> Option<SymbolId> {
        let resolved = self.resolve_alias(owner);
        let symbol = self.symbols.get(resolved)?;
        symbol.members.get(&escape_leading_underscores(name)).copied()
    }

    /// Resolve `a.b.c`: `a` as a namespace or value from scope, then each
    /// following part as an export, the last one with `meaning`.
    pub fn resolve_entity_name(&self, entity: &EntityName, meaning: SymbolFlags) -> Option<SymbolId> {
        let parts = entity.parts();
        let (last, leading) = parts.split_last()?;
        if leading.is_empty() {
            return self.resolve_name(last, meaning);
        }
        let mut current = self.resolve_name(&leading[0], SymbolFlags::NAMESPACE | SymbolFlags::VALUE | SymbolFlags::ALIAS)?;
        for part in &leading[1..] {
            current = self.get_export(current, part, SymbolFlags::NAMESPACE | SymbolFlags::VALUE)?;
        }
        self.get_export(current, last, meaning)
    }
}
