//! JSX checker for the jsxi compiler core.
//!
//! This crate is organized into several submodules:
//! - `context` - `CheckerContext`, options, node links and the host-supplied
//!   `TypeEnvironment`
//! - `state` - `CheckerState` and the file-level entry point
//! - `expr` - the expression typing JSX needs (identifiers, literals,
//!   property access, host-typed opaque expressions)
//! - `jsx` - the two JSX strategies, the driver, the attributes type builder
//!   and children checking
//! - `error_reporter` - diagnostic helpers
//! - `emit_resolver` - the snapshot handed to the lowering pass

pub mod context;
pub mod emit_resolver;
pub mod error_reporter;
pub mod expr;
pub mod jsx;
pub mod state;

pub use context::{CheckerContext, CheckerOptions, DeclaredType, NodeLinks, TypeEnvironment};
pub use emit_resolver::{JsxEmitResolver, JsxEmitStrategy, UNKNOWN_INTRINSIC_FACTORY};
pub use jsx::{
    GenericJsx, IntrinsicAttributesInfo, IntrinsicElementInfo, IntrinsicFactory, JsxAttributesType,
    JsxImplementation, NamespaceJsx, jsx_names,
};
pub use state::CheckerState;
