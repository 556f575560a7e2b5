//! Source file emitter.
//!
//! Drives one checked file through JSX lowering and prints the result:
//!
//! 1. leading comments and pragmas, as written
//! 2. the directive prologue (`"use strict";` and friends)
//! 3. runtime imports and the `_jsxFileName` constant collected while lowering
//! 4. every statement, lowered
//!
//! Files that keep their JSX (`preserve`, `react-native`) and declaration
//! files come back unchanged.

use crate::transforms::ir::{DeclarationKeyword, IRNode};
use crate::transforms::ir_printer::IRPrinter;
use crate::transforms::jsx::JsxTransformer;
use jsxi_checker::JsxEmitResolver;
use jsxi_common::{JsxEmit, ModuleKind, ScriptTarget};
use jsxi_parser::parser::VariableKeyword;
use jsxi_parser::{NodeArena, NodeIndex, syntax_kind_ext};
use tracing::{debug, instrument};

/// Output options for one emit.
#[derive(Clone, Debug, Default)]
pub struct PrinterOptions {
    pub target: ScriptTarget,
    pub module: ModuleKind,
    pub jsx: JsxEmit,
    /// `jsxImportSource` from the configuration.
    pub jsx_import_source: Option<String>,
    /// Directory a relative `jsx_import_source` is written against.
    pub jsx_import_source_base: Option<String>,
}

/// Lower and print the source file held by `arena`.
#[instrument(level = "trace", skip_all)]
pub fn emit_source_file(arena: &NodeArena, resolver: &JsxEmitResolver, options: &PrinterOptions) -> String {
    let Some((_, file)) = arena.source_file() else {
        return String::new();
    };
    if file.is_declaration_file || options.jsx.preserves_jsx() {
        debug!(file = %file.file_name, "jsx left in place");
        return file.text.clone();
    }

    let statements = &file.statements.nodes;
    let header_end = statements
        .first()
        .and_then(|&first| arena.get(first))
        .map_or(file.text.len(), |node| node.pos as usize);
    let header = file.text.get(..header_end).unwrap_or_default().trim_end();

    let prologue_len = statements
        .iter()
        .take_while(|&&stmt| is_prologue_directive(arena, stmt))
        .count();

    let mut transformer = JsxTransformer::new(arena, resolver, options);
    let body: Vec<IRNode> = statements[prologue_len..]
        .iter()
        .map(|&stmt| transform_statement(&mut transformer, stmt))
        .collect();
    let helpers = transformer.into_state().finish(options.module, options.target);

    let mut output = String::with_capacity(file.text.len() * 2);
    if !header.is_empty() {
        output.push_str(header);
        output.push('\n');
    }
    for &stmt in &statements[..prologue_len] {
        output.push_str(arena.node_text(stmt).trim_end());
        output.push('\n');
    }
    for node in helpers.iter().chain(body.iter()) {
        output.push_str(&IRPrinter::emit_to_string(node));
        output.push('\n');
    }
    output
}

/// A leading `"use strict";`-style statement.
fn is_prologue_directive(arena: &NodeArena, stmt: NodeIndex) -> bool {
    let Some(node) = arena.get(stmt) else {
        return false;
    };
    if node.kind != syntax_kind_ext::OPAQUE_STATEMENT {
        return false;
    }
    arena.get_opaque(node).is_some_and(|data| {
        let text = data.text.trim_start();
        text.starts_with("\"use ") || text.starts_with("'use ")
    })
}

fn transform_statement(transformer: &mut JsxTransformer<'_>, stmt: NodeIndex) -> IRNode {
    let arena = transformer.arena();
    let Some(node) = arena.get(stmt) else {
        return IRNode::Raw(String::new());
    };
    match node.kind {
        syntax_kind_ext::EXPRESSION_STATEMENT => match arena.get_expression_statement(node) {
            Some(data) => IRNode::expr_stmt(transformer.transform_expression(data.expression)),
            None => IRNode::Raw(arena.node_text(stmt).to_string()),
        },
        syntax_kind_ext::RETURN_STATEMENT => match arena.get_return_statement(node) {
            Some(data) if data.expression.is_some() => {
                IRNode::ret(Some(transformer.transform_expression(data.expression)))
            }
            _ => IRNode::ret(None),
        },
        syntax_kind_ext::VARIABLE_STATEMENT => match arena.get_variable_statement(node) {
            Some(data) => IRNode::VarDecl {
                keyword: match data.keyword {
                    VariableKeyword::Var => DeclarationKeyword::Var,
                    VariableKeyword::Let => DeclarationKeyword::Let,
                    VariableKeyword::Const => DeclarationKeyword::Const,
                },
                name: arena.identifier_text(data.name).unwrap_or_default().to_string(),
                initializer: data
                    .initializer
                    .into_option()
                    .map(|init| Box::new(transformer.transform_expression(init))),
            },
            None => IRNode::Raw(arena.node_text(stmt).to_string()),
        },
        _ => IRNode::Raw(arena.node_text(stmt).trim_end().to_string()),
    }
}
