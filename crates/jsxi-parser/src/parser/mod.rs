//! Node arena, node data and the source builder.

pub mod base;
pub mod builder;
pub mod node;
mod node_access;
mod node_arena;

pub use base::{NodeIndex, NodeList};
pub use builder::{AttributeValue, SourceBuilder};
pub use node::*;

/// Node kinds understood by the JSX core.
///
/// Anything the core does not need to look into is stored as an opaque
/// expression or statement carrying its source text.
pub mod syntax_kind_ext {
    pub const UNKNOWN: u16 = 0;

    // Expressions
    pub const IDENTIFIER: u16 = 80;
    pub const NUMERIC_LITERAL: u16 = 9;
    pub const STRING_LITERAL: u16 = 11;
    pub const NULL_KEYWORD: u16 = 106;
    pub const TRUE_KEYWORD: u16 = 112;
    pub const FALSE_KEYWORD: u16 = 97;
    pub const THIS_KEYWORD: u16 = 110;
    pub const PROPERTY_ACCESS_EXPRESSION: u16 = 211;
    pub const PARENTHESIZED_EXPRESSION: u16 = 217;
    /// Host-typed expression kept as source text (arrow functions, calls, ...).
    pub const OPAQUE_EXPRESSION: u16 = 400;

    // Statements
    pub const VARIABLE_STATEMENT: u16 = 243;
    pub const EXPRESSION_STATEMENT: u16 = 244;
    pub const RETURN_STATEMENT: u16 = 253;
    /// Statement kept as source text (declarations, imports, ...).
    pub const OPAQUE_STATEMENT: u16 = 401;
    pub const SOURCE_FILE: u16 = 307;

    // JSX
    pub const JSX_ELEMENT: u16 = 284;
    pub const JSX_SELF_CLOSING_ELEMENT: u16 = 285;
    pub const JSX_OPENING_ELEMENT: u16 = 286;
    pub const JSX_CLOSING_ELEMENT: u16 = 287;
    pub const JSX_FRAGMENT: u16 = 288;
    pub const JSX_OPENING_FRAGMENT: u16 = 289;
    pub const JSX_CLOSING_FRAGMENT: u16 = 290;
    pub const JSX_ATTRIBUTE: u16 = 291;
    pub const JSX_ATTRIBUTES: u16 = 292;
    pub const JSX_SPREAD_ATTRIBUTE: u16 = 293;
    pub const JSX_EXPRESSION: u16 = 294;
    pub const JSX_NAMESPACED_NAME: u16 = 295;
    pub const JSX_TEXT: u16 = 12;

    pub const fn is_jsx_opening_like(kind: u16) -> bool {
        kind == JSX_OPENING_ELEMENT || kind == JSX_SELF_CLOSING_ELEMENT
    }

    pub const fn is_jsx_expression_root(kind: u16) -> bool {
        kind == JSX_ELEMENT || kind == JSX_SELF_CLOSING_ELEMENT || kind == JSX_FRAGMENT
    }
}
