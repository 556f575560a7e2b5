//! Error emission helpers and type display.

use crate::context::CheckerContext;
use crate::state::CheckerState;
use jsxi_binder::SymbolId;
use jsxi_common::names::unescape_leading_underscores;
use jsxi_common::{Diagnostic, DiagnosticCategory};
use jsxi_parser::NodeIndex;
use jsxi_solver::{SymbolNames, TypeFormatter, TypeId};
use tracing::trace;

impl SymbolNames for CheckerContext<'_> {
    fn symbol_name(&self, symbol: SymbolId) -> Option<String> {
        self.symbol(symbol)
            .map(|s| unescape_leading_underscores(&s.escaped_name).to_string())
    }
}

impl<'a> CheckerState<'a> {
    /// Span of a node as `(start, length)`, or `None` for nodes outside the arena.
    pub(crate) fn node_span(&self, idx: NodeIndex) -> Option<(u32, u32)> {
        let node = self.ctx.arena.get(idx)?;
        Some((node.pos, node.end.saturating_sub(node.pos)))
    }

    pub(crate) fn format_type(&self, type_id: TypeId) -> String {
        TypeFormatter::with_symbols(self.ctx.types, &self.ctx).format(type_id)
    }

    /// Report a diagnostic from the message table at `idx`.
    pub(crate) fn error_at_node(&mut self, idx: NodeIndex, code: u32, args: &[&str]) {
        let Some((start, length)) = self.node_span(idx) else {
            trace!(code, "dropping diagnostic without a location");
            return;
        };
        self.error_at_span(start, length, code, args);
    }

    pub(crate) fn error_at_span(&mut self, start: u32, length: u32, code: u32, args: &[&str]) {
        let diag = Diagnostic::from_code(self.ctx.file_name.clone(), start, length, code, args);
        self.ctx.push_diagnostic(diag);
    }

    /// Report `code` with an already formatted message (elaborated relation errors).
    pub(crate) fn error_at_node_msg(&mut self, idx: NodeIndex, code: u32, message: String) {
        let Some((start, length)) = self.node_span(idx) else {
            return;
        };
        let diag = Diagnostic::error(self.ctx.file_name.clone(), start, length, message, code);
        self.ctx.push_diagnostic(diag);
    }

    /// Report at a host declaration handle, falling back to `fallback` when the
    /// handle is synthetic or not in this file's arena.
    pub(crate) fn error_at_declaration(
        &mut self,
        declaration: u32,
        fallback: Option<(u32, u32)>,
        code: u32,
        args: &[&str],
    ) {
        let span = self.node_span(NodeIndex(declaration)).or(fallback);
        let (start, length) = span.unwrap_or((0, 0));
        self.error_at_span(start, length, code, args);
    }

    // =========================================================================
    // Relation errors
    // =========================================================================

    /// TS2322 `Type 'S' is not assignable to type 'T'.` unless either side is
    /// already an error.
    pub(crate) fn report_type_not_assignable(&mut self, idx: NodeIndex, source: TypeId, target: TypeId) {
        if source.is_any_like() || target.is_any_like() || target == TypeId::UNKNOWN {
            return;
        }
        let source_str = self.format_type(source);
        let target_str = self.format_type(target);
        self.error_at_node(
            idx,
            jsxi_common::diagnostics::diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
            &[&source_str, &target_str],
        );
    }

    /// TS2322 elaborated with the excess property that caused it.
    pub(crate) fn report_excess_attribute(&mut self, idx: NodeIndex, name: &str, source: TypeId, target: TypeId) {
        use jsxi_common::diagnostics::{diagnostic_codes, diagnostic_messages};
        use jsxi_common::format_message;

        let source_str = self.format_type(source);
        let target_str = self.format_type(target);
        let head = format_message(
            diagnostic_messages::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
            &[&source_str, &target_str],
        );
        let detail = format_message(
            diagnostic_messages::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
            &[name, &target_str],
        );
        self.error_at_node_msg(
            idx,
            diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE_TO_TYPE,
            format!("{head}\n  {detail}"),
        );
    }

    /// Number of errors (warnings excluded) reported so far.
    pub fn error_count(&self) -> usize {
        self.ctx
            .diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
            .count()
    }
}
