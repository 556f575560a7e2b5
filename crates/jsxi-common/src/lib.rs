//! Common types and utilities for the jsxi JSX compiler core.
//!
//! This crate provides foundational types used across all jsxi crates:
//! - String interning (`Atom`, `Interner`)
//! - Shared enums (`JsxEmit`, `JsxMode`, `JsxReferenceKind`, `ScriptTarget`, `ModuleKind`)
//! - Diagnostics (`Diagnostic`, message table, `format_message`)
//! - Comment scanning and JSX pragma extraction
//! - Line/column mapping for source positions

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Shared enums and option values
pub mod common;
pub use common::{JsxEmit, JsxMode, JsxReferenceKind, ModuleKind, ScriptTarget};

// Diagnostics
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, format_message};

// Comment parsing utilities
pub mod comments;

// `@jsx`-family pragmas
pub mod pragmas;
pub use pragmas::{EntityName, JsxPragmas};

// Escaped identifier names
pub mod names;

// Line/column mapping
pub mod position;
pub use position::{LineMap, Position};
