//! Expression typing for the expressions JSX reaches into: tag names,
//! attribute initializers and children. Anything else is typed by the host
//! through [`TypeEnvironment`](crate::context::TypeEnvironment).

use crate::state::CheckerState;
use jsxi_binder::{SymbolFlags, SymbolId};
use jsxi_common::diagnostics::diagnostic_codes;
use jsxi_parser::{NodeIndex, syntax_kind_ext};
use jsxi_solver::{PropertyAccessResult, TypeId, resolve_property_access};
use tracing::trace;

impl<'a> CheckerState<'a> {
    /// Type of an expression node, computed once and cached in node links.
    pub fn get_type_of_node(&mut self, idx: NodeIndex) -> TypeId {
        if let Some(cached) = self.ctx.links(idx).and_then(|l| l.resolved_type) {
            return cached;
        }
        let type_id = self.compute_type_of_node(idx);
        self.ctx.links_mut(idx).resolved_type = Some(type_id);
        type_id
    }

    fn compute_type_of_node(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let Some(node) = arena.get(idx) else {
            return TypeId::ERROR;
        };
        match node.kind {
            syntax_kind_ext::IDENTIFIER => self.check_identifier(idx),
            syntax_kind_ext::STRING_LITERAL => match arena.get_literal(node) {
                Some(lit) => self.ctx.types.literal_string(&lit.text),
                None => TypeId::STRING,
            },
            syntax_kind_ext::NUMERIC_LITERAL => arena
                .get_literal(node)
                .and_then(|lit| lit.text.parse::<f64>().ok())
                .map_or(TypeId::NUMBER, |value| self.ctx.types.literal_number(value)),
            syntax_kind_ext::TRUE_KEYWORD => TypeId::BOOLEAN_TRUE,
            syntax_kind_ext::FALSE_KEYWORD => TypeId::BOOLEAN_FALSE,
            syntax_kind_ext::NULL_KEYWORD => TypeId::NULL,
            syntax_kind_ext::THIS_KEYWORD => self.ctx.env.this_type().unwrap_or(TypeId::ANY),
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => self.check_property_access(idx),
            syntax_kind_ext::PARENTHESIZED_EXPRESSION => match arena.get_parenthesized(node) {
                Some(paren) => self.get_type_of_node(paren.expression),
                None => TypeId::ERROR,
            },
            syntax_kind_ext::OPAQUE_EXPRESSION => {
                self.ctx.env.expression_type(idx).unwrap_or(TypeId::ANY)
            }
            syntax_kind_ext::JSX_ELEMENT
            | syntax_kind_ext::JSX_SELF_CLOSING_ELEMENT
            | syntax_kind_ext::JSX_FRAGMENT => self.check_jsx_expression(idx),
            syntax_kind_ext::JSX_EXPRESSION => match arena.get_jsx_expression(node) {
                Some(expr) if expr.expression.is_some() => self.get_type_of_node(expr.expression),
                _ => TypeId::UNDEFINED,
            },
            syntax_kind_ext::JSX_TEXT => TypeId::STRING,
            _ => {
                trace!(kind = node.kind, "untyped expression kind");
                TypeId::ANY
            }
        }
    }

    fn check_identifier(&mut self, idx: NodeIndex) -> TypeId {
        let Some(name) = self.ctx.arena.identifier_text(idx) else {
            return TypeId::ERROR;
        };
        if name == "undefined" {
            return TypeId::UNDEFINED;
        }
        let Some(symbol) = self.ctx.binder.resolve_name(name, SymbolFlags::VALUE) else {
            self.error_at_node(idx, diagnostic_codes::CANNOT_FIND_NAME, &[name]);
            return TypeId::ERROR;
        };
        let resolved = self.mark_symbol_referenced(symbol);
        self.ctx
            .env
            .value_type(resolved)
            .or_else(|| self.ctx.env.value_type(symbol))
            .unwrap_or(TypeId::ANY)
    }

    /// Record that `symbol` (and what it aliases) is used as a value.
    /// Returns the alias-resolved symbol.
    pub(crate) fn mark_symbol_referenced(&mut self, symbol: SymbolId) -> SymbolId {
        let resolved = self.ctx.binder.resolve_alias(symbol);
        self.ctx.referenced_symbols.insert(symbol);
        self.ctx.referenced_symbols.insert(resolved);
        resolved
    }

    /// Namespace-like symbol an entity expression (`a`, `a.b`) denotes, if any.
    fn namespace_symbol_of(&self, idx: NodeIndex) -> Option<SymbolId> {
        let arena = self.ctx.arena;
        let node = arena.get(idx)?;
        let binder = self.ctx.binder;
        let symbol = match node.kind {
            syntax_kind_ext::IDENTIFIER => {
                let name = arena.identifier_text(idx)?;
                binder.resolve_name(name, SymbolFlags::NAMESPACE)?
            }
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => {
                let access = arena.get_access_expr(node)?;
                let left = self.namespace_symbol_of(access.expression)?;
                let name = arena.identifier_text(access.name)?;
                binder.get_export(left, name, SymbolFlags::NAMESPACE)?
            }
            _ => return None,
        };
        Some(binder.resolve_alias(symbol))
    }

    fn check_property_access(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.ctx.arena;
        let Some(access) = arena.get(idx).and_then(|n| arena.get_access_expr(n)) else {
            return TypeId::ERROR;
        };
        let (left, name_node) = (access.expression, access.name);
        let Some(name) = arena.identifier_text(name_node) else {
            return TypeId::ERROR;
        };

        // `ns.Member` where `ns` is a namespace with no value type of its own.
        if let Some(namespace) = self.namespace_symbol_of(left)
            && self.ctx.env.value_type(namespace).is_none()
        {
            if let Some(root) = self.root_identifier_symbol(left) {
                self.mark_symbol_referenced(root);
            }
            return match self.ctx.binder.get_export(namespace, name, SymbolFlags::VALUE) {
                Some(member) => {
                    let member = self.ctx.binder.resolve_alias(member);
                    self.ctx.env.value_type(member).unwrap_or(TypeId::ANY)
                }
                None => {
                    let namespace_name = arena.tag_name_text(left).unwrap_or_default();
                    self.error_at_node(
                        name_node,
                        diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
                        &[name, &format!("typeof {namespace_name}")],
                    );
                    TypeId::ERROR
                }
            };
        }

        let object_type = self.get_type_of_node(left);
        let atom = self.ctx.types.intern_string(name);
        match resolve_property_access(self.ctx.types, object_type, atom) {
            PropertyAccessResult::Found(prop) => prop.type_id,
            PropertyAccessResult::FromIndexSignature(type_id) => type_id,
            PropertyAccessResult::IsAny => TypeId::ANY,
            PropertyAccessResult::NotFound => {
                if object_type != TypeId::ERROR {
                    let object_str = self.format_type(object_type);
                    self.error_at_node(
                        name_node,
                        diagnostic_codes::PROPERTY_DOES_NOT_EXIST_ON_TYPE,
                        &[name, &object_str],
                    );
                }
                TypeId::ERROR
            }
        }
    }

    fn root_identifier_symbol(&self, idx: NodeIndex) -> Option<SymbolId> {
        let arena = self.ctx.arena;
        let mut current = idx;
        loop {
            let node = arena.get(current)?;
            match node.kind {
                syntax_kind_ext::IDENTIFIER => {
                    let name = arena.identifier_text(current)?;
                    return self
                        .ctx
                        .binder
                        .resolve_name(name, SymbolFlags::NAMESPACE | SymbolFlags::VALUE);
                }
                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => {
                    current = arena.get_access_expr(node)?.expression;
                }
                _ => return None,
            }
        }
    }
}
