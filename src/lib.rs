//! jsxi: JSX resolution, checking and lowering.
//!
//! The pipeline for one file is check, snapshot, lower:
//!
//! ```text
//! NodeArena + BinderState + TypeInterner + TypeEnvironment
//!     -> CheckerState::check_source_file   (diagnostics, reference kinds)
//!     -> CheckerState::emit_resolver       (what the lowering needs)
//!     -> emit_source_file                  (JavaScript text)
//! ```
//!
//! [`transform_jsx`] runs all three; the member crates are re-exported for
//! hosts that want the steps separately.

use serde::Serialize;
use tracing::{debug, instrument};

pub use jsxi_binder as binder;
pub use jsxi_checker as checker;
pub use jsxi_common as common;
pub use jsxi_emitter as emitter;
pub use jsxi_parser as parser;
pub use jsxi_solver as solver;

use jsxi_binder::BinderState;
use jsxi_checker::{CheckerState, TypeEnvironment};
use jsxi_common::Diagnostic;
use jsxi_parser::NodeArena;
use jsxi_solver::TypeInterner;

// tsconfig-style options
pub mod config;
pub use config::{ResolvedCompilerOptions, resolve_compiler_options, resolve_project_options};

// JSXI_LOG / JSXI_LOG_FORMAT subscriber
pub mod tracing_config;

/// Output of [`transform_jsx`] for one file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub output_text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Check the JSX of the file in `arena` and lower it to JavaScript.
///
/// Diagnostics never stop the lowering; the output is produced for every
/// file, the way a compiler without `noEmitOnError` does.
#[instrument(level = "trace", skip_all)]
pub fn transform_jsx(
    arena: &NodeArena,
    binder: &BinderState,
    types: &TypeInterner,
    env: &TypeEnvironment,
    options: &ResolvedCompilerOptions,
) -> TransformOutput {
    let mut checker = CheckerState::new(arena, binder, types, env, options.checker.clone());
    checker.check_source_file();
    let resolver = checker.emit_resolver();
    let diagnostics = std::mem::take(&mut checker.ctx.diagnostics);

    let output_text = jsxi_emitter::emit_source_file(arena, &resolver, &options.printer);
    debug!(
        diagnostics = diagnostics.len(),
        bytes = output_text.len(),
        "transformed file"
    );
    TransformOutput {
        output_text,
        diagnostics,
    }
}
