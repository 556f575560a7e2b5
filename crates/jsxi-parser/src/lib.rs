//! AST storage for the jsxi JSX core.
//!
//! Parsing proper is done by the host; this crate holds the node arena the
//! host fills in (directly or through [`parser::SourceBuilder`]) and the
//! typed data pools for the JSX and expression nodes the checker and the
//! lowering engine walk.

pub mod parser;

pub use parser::{
    Node, NodeArena, NodeIndex, NodeList, SourceBuilder, syntax_kind_ext,
};
