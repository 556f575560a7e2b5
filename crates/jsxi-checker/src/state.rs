//! Checker state and the file-level entry point.

use crate::context::{CheckerContext, CheckerOptions, TypeEnvironment};
use jsxi_binder::BinderState;
use jsxi_parser::{NodeArena, NodeIndex, syntax_kind_ext};
use jsxi_solver::TypeInterner;
use tracing::debug;

/// Checks the JSX of one file.
///
/// The state borrows the node arena, the bound symbols and the type
/// interner; everything it learns while checking goes into
/// [`CheckerContext`] side tables.
pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
}

impl<'a> CheckerState<'a> {
    pub fn new(
        arena: &'a NodeArena,
        binder: &'a BinderState,
        types: &'a TypeInterner,
        env: &'a TypeEnvironment,
        options: CheckerOptions,
    ) -> Self {
        CheckerState {
            ctx: CheckerContext::new(arena, binder, types, env, options),
        }
    }

    /// Check every statement of the source file.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %self.ctx.file_name))]
    pub fn check_source_file(&mut self) {
        let root = self.ctx.source_file;
        let Some(file) = self
            .ctx
            .arena
            .get(root)
            .and_then(|node| self.ctx.arena.get_source_file(node))
        else {
            return;
        };
        if file.is_declaration_file {
            debug!("skipping declaration file");
            return;
        }
        for &stmt in &file.statements.nodes {
            self.check_statement(stmt);
        }
        debug!(
            diagnostics = self.ctx.diagnostics.len(),
            "finished checking file"
        );
    }

    fn check_statement(&mut self, stmt: NodeIndex) {
        let arena = self.ctx.arena;
        let Some(node) = arena.get(stmt) else {
            return;
        };
        let expression = match node.kind {
            syntax_kind_ext::EXPRESSION_STATEMENT => {
                arena.get_expression_statement(node).map(|s| s.expression)
            }
            syntax_kind_ext::RETURN_STATEMENT => arena.get_return_statement(node).map(|s| s.expression),
            syntax_kind_ext::VARIABLE_STATEMENT => {
                arena.get_variable_statement(node).map(|s| s.initializer)
            }
            _ => None,
        };
        if let Some(expression) = expression.filter(|e| e.is_some()) {
            self.get_type_of_node(expression);
        }
    }
}
