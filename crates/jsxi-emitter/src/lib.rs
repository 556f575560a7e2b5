//! JSX lowering and JavaScript printing for the jsxi compiler core.
//!
//! - [`transforms::jsx`] rewrites JSX into factory or runtime calls
//! - [`transforms::ir_printer`] prints the lowered IR
//! - [`emitter`] drives one source file through both
//! - [`module_specifiers`] synthesizes import paths between files

pub mod emitter;
pub mod module_specifiers;
pub mod transforms;

pub use emitter::{PrinterOptions, emit_source_file};
pub use transforms::jsx::{JsxEncoding, JsxTransformer};
pub use transforms::jsx_state::{JSX_FILE_NAME, JsxFileState};
