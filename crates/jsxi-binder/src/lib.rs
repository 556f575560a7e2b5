//! Symbols and scopes.
//!
//! Binding proper (walking declarations) belongs to the host; this crate
//! holds the resulting symbol arena and the two scopes the JSX core looks
//! names up in: the file's locals and the globals (lib files, ambient
//! declarations). The checker allocates its own transient symbols in a
//! second [`SymbolArena`] with a disjoint id range.

pub mod state;
pub mod symbols;

pub use state::{BinderState, Scope};
pub use symbols::{Symbol, SymbolArena, SymbolFlags, SymbolId, SymbolTable, TRANSIENT_SYMBOL_BASE};
