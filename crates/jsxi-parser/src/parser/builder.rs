//! Source builder.
//!
//! Hosts that already have a parse tree copy it into the arena with the
//! `add_*` methods. `SourceBuilder` is the convenient route for everything
//! else (tests, tools, generated code): it writes the source text and the
//! nodes side by side, so every node's `pos`/`end` covers exactly the text it
//! was written as.
//!
//! ```
//! use jsxi_parser::SourceBuilder;
//!
//! let mut b = SourceBuilder::new("app.tsx");
//! b.expression_statement(|b| {
//!     b.element("div", |b| vec![b.attr_string("class", "x")], |b| vec![b.text("hi")])
//! });
//! let (arena, root) = b.finish();
//! assert_eq!(arena.node_text(root), "<div class=\"x\">hi</div>;\n");
//! ```

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext;
use jsxi_common::JsxPragmas;

/// Value of a JSX attribute written through [`SourceBuilder::attr_value`].
#[derive(Clone, Copy, Debug)]
pub enum AttributeValue<'a> {
    /// `<a disabled />`
    Absent,
    /// `<a href="x" />`
    String(&'a str),
    /// `<a href={expr} />` with the expression kept as opaque text.
    Opaque(&'a str),
}

pub struct SourceBuilder {
    file_name: String,
    text: String,
    arena: NodeArena,
    statements: Vec<NodeIndex>,
}

impl SourceBuilder {
    pub fn new(file_name: impl Into<String>) -> Self {
        SourceBuilder {
            file_name: file_name.into(),
            text: String::new(),
            arena: NodeArena::new(),
            statements: Vec::new(),
        }
    }

    #[inline]
    fn pos(&self) -> u32 {
        self.text.len() as u32
    }

    /// Write text that does not become a node (whitespace, punctuation).
    pub fn raw(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Write a leading comment line such as `/* @jsx-mode generic */`.
    pub fn comment(&mut self, comment: &str) {
        self.text.push_str(comment);
        self.text.push('\n');
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn ident(&mut self, name: &str) -> NodeIndex {
        let pos = self.pos();
        self.raw(name);
        self.arena.add_identifier(
            pos,
            self.pos(),
            IdentifierData {
                text: name.to_string(),
            },
        )
    }

    pub fn string_lit(&mut self, value: &str) -> NodeIndex {
        let pos = self.pos();
        self.raw("\"");
        self.raw(value);
        self.raw("\"");
        self.arena.add_literal(
            syntax_kind_ext::STRING_LITERAL,
            pos,
            self.pos(),
            LiteralData {
                text: value.to_string(),
            },
        )
    }

    pub fn number_lit(&mut self, text: &str) -> NodeIndex {
        let pos = self.pos();
        self.raw(text);
        self.arena.add_literal(
            syntax_kind_ext::NUMERIC_LITERAL,
            pos,
            self.pos(),
            LiteralData {
                text: text.to_string(),
            },
        )
    }

    fn keyword(&mut self, kind: u16, text: &str) -> NodeIndex {
        let pos = self.pos();
        self.raw(text);
        self.arena.add_token(kind, pos, self.pos())
    }

    pub fn this_keyword(&mut self) -> NodeIndex {
        self.keyword(syntax_kind_ext::THIS_KEYWORD, "this")
    }

    pub fn null_literal(&mut self) -> NodeIndex {
        self.keyword(syntax_kind_ext::NULL_KEYWORD, "null")
    }

    pub fn bool_literal(&mut self, value: bool) -> NodeIndex {
        if value {
            self.keyword(syntax_kind_ext::TRUE_KEYWORD, "true")
        } else {
            self.keyword(syntax_kind_ext::FALSE_KEYWORD, "false")
        }
    }

    /// `a.b.c` as nested property accesses (`this` allowed as the first part).
    pub fn entity(&mut self, dotted: &str) -> NodeIndex {
        let pos = self.pos();
        let mut parts = dotted.split('.');
        let first = parts.next().unwrap_or("");
        let mut expr = if first == "this" {
            self.this_keyword()
        } else {
            self.ident(first)
        };
        for part in parts {
            self.raw(".");
            let name = self.ident(part);
            expr = self.arena.add_property_access(
                pos,
                self.pos(),
                AccessExprData {
                    expression: expr,
                    name,
                },
            );
        }
        expr
    }

    pub fn parenthesized(&mut self, inner: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        let pos = self.pos();
        self.raw("(");
        let expression = inner(self);
        self.raw(")");
        self.arena
            .add_parenthesized(pos, self.pos(), ParenthesizedData { expression })
    }

    /// An expression whose type the host supplies (arrow functions, calls, ...).
    pub fn opaque_expr(&mut self, text: &str) -> NodeIndex {
        let pos = self.pos();
        self.raw(text);
        self.arena.add_opaque(
            syntax_kind_ext::OPAQUE_EXPRESSION,
            pos,
            self.pos(),
            OpaqueData {
                text: text.to_string(),
            },
        )
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn expression_statement(&mut self, expr: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        let pos = self.pos();
        let expression = expr(self);
        self.raw(";");
        let stmt = self
            .arena
            .add_expression_statement(pos, self.pos(), ExprStatementData { expression });
        self.raw("\n");
        self.statements.push(stmt);
        stmt
    }

    pub fn return_statement(&mut self, expr: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        let pos = self.pos();
        self.raw("return ");
        let expression = expr(self);
        self.raw(";");
        let stmt = self
            .arena
            .add_return(pos, self.pos(), ReturnData { expression });
        self.raw("\n");
        self.statements.push(stmt);
        stmt
    }

    pub fn variable_statement(
        &mut self,
        keyword: VariableKeyword,
        name: &str,
        init: impl FnOnce(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        let pos = self.pos();
        self.raw(keyword.as_str());
        self.raw(" ");
        let name = self.ident(name);
        self.raw(" = ");
        let initializer = init(self);
        self.raw(";");
        let stmt = self.arena.add_variable_statement(
            pos,
            self.pos(),
            VariableData {
                keyword,
                name,
                initializer,
            },
        );
        self.raw("\n");
        self.statements.push(stmt);
        stmt
    }

    /// A statement copied to the output verbatim (declarations, imports, directives).
    pub fn opaque_statement(&mut self, text: &str) -> NodeIndex {
        let pos = self.pos();
        self.raw(text);
        let stmt = self.arena.add_opaque(
            syntax_kind_ext::OPAQUE_STATEMENT,
            pos,
            self.pos(),
            OpaqueData {
                text: text.to_string(),
            },
        );
        self.raw("\n");
        self.statements.push(stmt);
        stmt
    }

    // =========================================================================
    // JSX
    // =========================================================================

    fn tag_name(&mut self, tag: &str) -> NodeIndex {
        if let Some((namespace, name)) = tag.split_once(':') {
            let pos = self.pos();
            let namespace = self.ident(namespace);
            self.raw(":");
            let name = self.ident(name);
            return self.arena.add_jsx_namespaced_name(
                pos,
                self.pos(),
                JsxNamespacedNameData { namespace, name },
            );
        }
        self.entity(tag)
    }

    fn attributes(&mut self, attrs: impl FnOnce(&mut Self) -> Vec<NodeIndex>) -> NodeIndex {
        let pos = self.pos();
        let properties = attrs(self);
        self.arena.add_jsx_attributes(
            pos,
            self.pos(),
            JsxAttributesData {
                properties: NodeList::new(properties),
            },
        )
    }

    /// `<tag attrs>children</tag>`
    pub fn element(
        &mut self,
        tag: &str,
        attrs: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
        children: impl FnOnce(&mut Self) -> Vec<NodeIndex>,
    ) -> NodeIndex {
        let pos = self.pos();
        self.raw("<");
        let tag_name = self.tag_name(tag);
        let attributes = self.attributes(attrs);
        self.raw(">");
        let opening_element = self.arena.add_jsx_opening(
            syntax_kind_ext::JSX_OPENING_ELEMENT,
            pos,
            self.pos(),
            JsxOpeningData {
                tag_name,
                attributes,
            },
        );
        let children = children(self);
        let closing_pos = self.pos();
        self.raw("</");
        let closing_tag = self.tag_name(tag);
        self.raw(">");
        let closing_element = self.arena.add_jsx_closing(
            closing_pos,
            self.pos(),
            JsxClosingData {
                tag_name: closing_tag,
            },
        );
        self.arena.add_jsx_element(
            pos,
            self.pos(),
            JsxElementData {
                opening_element,
                children: NodeList::new(children),
                closing_element,
            },
        )
    }

    /// `<tag attrs />`
    pub fn self_closing(&mut self, tag: &str, attrs: impl FnOnce(&mut Self) -> Vec<NodeIndex>) -> NodeIndex {
        let pos = self.pos();
        self.raw("<");
        let tag_name = self.tag_name(tag);
        let attributes = self.attributes(attrs);
        self.raw(" />");
        self.arena.add_jsx_opening(
            syntax_kind_ext::JSX_SELF_CLOSING_ELEMENT,
            pos,
            self.pos(),
            JsxOpeningData {
                tag_name,
                attributes,
            },
        )
    }

    /// `<>children</>`
    pub fn fragment(&mut self, children: impl FnOnce(&mut Self) -> Vec<NodeIndex>) -> NodeIndex {
        let pos = self.pos();
        self.raw("<>");
        let opening_fragment =
            self.arena
                .add_token(syntax_kind_ext::JSX_OPENING_FRAGMENT, pos, self.pos());
        let children = children(self);
        let closing_pos = self.pos();
        self.raw("</>");
        let closing_fragment =
            self.arena
                .add_token(syntax_kind_ext::JSX_CLOSING_FRAGMENT, closing_pos, self.pos());
        self.arena.add_jsx_fragment(
            pos,
            self.pos(),
            JsxFragmentData {
                opening_fragment,
                children: NodeList::new(children),
                closing_fragment,
            },
        )
    }

    /// A JSX text child, written verbatim.
    pub fn text(&mut self, text: &str) -> NodeIndex {
        let pos = self.pos();
        self.raw(text);
        self.arena.add_jsx_text(
            pos,
            self.pos(),
            JsxTextData {
                text: text.to_string(),
                contains_only_trivia_white_spaces: JsxTextData::is_trivia_text(text),
            },
        )
    }

    /// `{expr}` as a child.
    pub fn expr_child(&mut self, expr: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        let pos = self.pos();
        self.raw("{");
        let expression = expr(self);
        self.raw("}");
        self.arena.add_jsx_expression(
            pos,
            self.pos(),
            JsxExpressionData {
                dot_dot_dot_token: false,
                expression,
            },
        )
    }

    /// `{}` (or a comment-only expression) as a child.
    pub fn empty_expr_child(&mut self) -> NodeIndex {
        let pos = self.pos();
        self.raw("{}");
        self.arena.add_jsx_expression(
            pos,
            self.pos(),
            JsxExpressionData {
                dot_dot_dot_token: false,
                expression: NodeIndex::NONE,
            },
        )
    }

    /// `{...expr}` as a child
    pub fn spread_child(&mut self, expr: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        let pos = self.pos();
        self.raw("{...");
        let expression = expr(self);
        self.raw("}");
        self.arena.add_jsx_expression(
            pos,
            self.pos(),
            JsxExpressionData {
                dot_dot_dot_token: true,
                expression,
            },
        )
    }

    /// ` name` (no initializer).
    pub fn attr(&mut self, name: &str) -> NodeIndex {
        self.attr_value(name, AttributeValue::Absent)
    }

    /// ` name="value"`
    pub fn attr_string(&mut self, name: &str, value: &str) -> NodeIndex {
        self.attr_value(name, AttributeValue::String(value))
    }

    pub fn attr_value(&mut self, name: &str, value: AttributeValue<'_>) -> NodeIndex {
        match value {
            AttributeValue::Absent => self.attr_with(name, |_| NodeIndex::NONE),
            AttributeValue::String(value) => self.attr_with(name, |b| b.string_lit(value)),
            AttributeValue::Opaque(text) => self.attr_expr(name, |b| b.opaque_expr(text)),
        }
    }

    /// ` name={expr}`
    pub fn attr_expr(&mut self, name: &str, expr: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        self.attr_with(name, |b| b.expr_child(expr))
    }

    fn attr_with(&mut self, name: &str, init: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        self.raw(" ");
        let pos = self.pos();
        let name_node = self.tag_name(name);
        let has_init = {
            let before = self.pos();
            self.raw("=");
            let initializer = init(self);
            if initializer.is_none() {
                self.text.truncate(before as usize);
            }
            initializer
        };
        self.arena.add_jsx_attribute(
            pos,
            self.pos(),
            JsxAttributeData {
                name: name_node,
                initializer: has_init,
            },
        )
    }

    /// ` {...expr}`
    pub fn spread(&mut self, expr: impl FnOnce(&mut Self) -> NodeIndex) -> NodeIndex {
        self.raw(" ");
        let pos = self.pos();
        self.raw("{...");
        let expression = expr(self);
        self.raw("}");
        self.arena
            .add_jsx_spread_attribute(pos, self.pos(), JsxSpreadAttributeData { expression })
    }

    // =========================================================================
    // Finish
    // =========================================================================

    /// Current source text (useful to compute expected positions in tests).
    pub fn source_text(&self) -> &str {
        &self.text
    }

    /// Access the arena while building (e.g. to look up a node's span).
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Wrap the statements in a source file node and hand out the arena.
    pub fn finish(mut self) -> (NodeArena, NodeIndex) {
        let end = self.pos();
        let pragmas = JsxPragmas::extract(&self.text);
        let is_declaration_file = self.file_name.ends_with(".d.ts")
            || self.file_name.ends_with(".d.tsx")
            || self.file_name.ends_with(".d.mts")
            || self.file_name.ends_with(".d.cts");
        tracing::trace!(
            file = %self.file_name,
            statements = self.statements.len(),
            "finish source file"
        );
        let root = self.arena.add_source_file(
            0,
            end,
            SourceFileData {
                file_name: self.file_name,
                text: self.text,
                statements: NodeList::new(self.statements),
                is_declaration_file,
                pragmas,
            },
        );
        (self.arena, root)
    }
}

impl JsxTextData {
    /// Whitespace-only text that spans a line break carries no meaning.
    ///
    /// Same-line whitespace (`<a> </a>`) is significant and stays a child.
    pub fn is_trivia_text(text: &str) -> bool {
        text.chars().all(char::is_whitespace) && text.contains(['\n', '\r'])
    }
}
