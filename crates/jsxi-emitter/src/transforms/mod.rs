//! Transforms
//!
//! JSX lowering builds an [`ir::IRNode`] tree per statement; the
//! [`ir_printer::IRPrinter`] turns the tree into JavaScript text.

pub mod ir;
pub mod ir_printer;
pub mod jsx;
pub mod jsx_state;
pub mod jsx_text;
