//! NodeArena accessors (get_* methods) and small syntactic queries.

use super::base::NodeIndex;
use super::node::*;
use super::syntax_kind_ext::*;

macro_rules! pool_getter {
    ($(#[$meta:meta])* $name:ident, $pool:ident, $data:ty, $($kind:ident)|+) => {
        $(#[$meta])*
        #[inline]
        pub fn $name(&self, node: &Node) -> Option<&$data> {
            if node.has_data() && ($(node.kind == $kind)||+) {
                self.$pool.get(node.data_index as usize)
            } else {
                None
            }
        }
    };
}

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    /// Parent of a node, or NONE for roots.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|n| n.kind)
    }

    pool_getter!(get_identifier, identifiers, IdentifierData, IDENTIFIER);
    pool_getter!(
        /// String or numeric literal data.
        get_literal, literals, LiteralData, STRING_LITERAL | NUMERIC_LITERAL
    );
    pool_getter!(get_access_expr, access_exprs, AccessExprData, PROPERTY_ACCESS_EXPRESSION);
    pool_getter!(get_parenthesized, parenthesized, ParenthesizedData, PARENTHESIZED_EXPRESSION);
    pool_getter!(get_opaque, opaque, OpaqueData, OPAQUE_EXPRESSION | OPAQUE_STATEMENT);
    pool_getter!(get_expression_statement, expr_statements, ExprStatementData, EXPRESSION_STATEMENT);
    pool_getter!(get_return_statement, returns, ReturnData, RETURN_STATEMENT);
    pool_getter!(get_variable_statement, variables, VariableData, VARIABLE_STATEMENT);
    pool_getter!(get_source_file, source_files, SourceFileData, SOURCE_FILE);
    pool_getter!(get_jsx_element, jsx_elements, JsxElementData, JSX_ELEMENT);
    pool_getter!(
        /// Opening or self-closing element data.
        get_jsx_opening, jsx_opening, JsxOpeningData, JSX_OPENING_ELEMENT | JSX_SELF_CLOSING_ELEMENT
    );
    pool_getter!(get_jsx_closing, jsx_closing, JsxClosingData, JSX_CLOSING_ELEMENT);
    pool_getter!(get_jsx_fragment, jsx_fragments, JsxFragmentData, JSX_FRAGMENT);
    pool_getter!(get_jsx_attributes, jsx_attributes, JsxAttributesData, JSX_ATTRIBUTES);
    pool_getter!(get_jsx_attribute, jsx_attribute, JsxAttributeData, JSX_ATTRIBUTE);
    pool_getter!(
        get_jsx_spread_attribute,
        jsx_spread_attributes,
        JsxSpreadAttributeData,
        JSX_SPREAD_ATTRIBUTE
    );
    pool_getter!(get_jsx_expression, jsx_expressions, JsxExpressionData, JSX_EXPRESSION);
    pool_getter!(get_jsx_text, jsx_text, JsxTextData, JSX_TEXT);
    pool_getter!(get_jsx_namespaced_name, jsx_namespaced_names, JsxNamespacedNameData, JSX_NAMESPACED_NAME);

    // =========================================================================
    // Queries
    // =========================================================================

    /// Text of an identifier node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|data| data.text.as_str())
    }

    /// The first source file in the arena.
    pub fn source_file(&self) -> Option<(NodeIndex, &SourceFileData)> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, node)| node.kind == SOURCE_FILE)
            .and_then(|(i, node)| {
                self.get_source_file(node)
                    .map(|data| (NodeIndex(i as u32), data))
            })
    }

    /// Source text covered by a node, or "" when no source file is present.
    pub fn node_text(&self, index: NodeIndex) -> &str {
        let Some(node) = self.get(index) else {
            return "";
        };
        self.source_file()
            .and_then(|(_, file)| file.text.get(node.pos as usize..node.end as usize))
            .unwrap_or("")
    }

    /// Strip any number of parentheses.
    pub fn skip_parentheses(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(node) = self.get(index) {
            match self.get_parenthesized(node) {
                Some(paren) => index = paren.expression,
                None => break,
            }
        }
        index
    }

    /// Text form of a JSX tag name: `div`, `Foo.Bar`, `this.Comp`, `svg:rect`.
    pub fn tag_name_text(&self, index: NodeIndex) -> Option<String> {
        let node = self.get(index)?;
        match node.kind {
            IDENTIFIER => self.get_identifier(node).map(|d| d.text.clone()),
            THIS_KEYWORD => Some("this".to_string()),
            PROPERTY_ACCESS_EXPRESSION => {
                let access = self.get_access_expr(node)?;
                let left = self.tag_name_text(access.expression)?;
                let right = self.identifier_text(access.name)?;
                Some(format!("{left}.{right}"))
            }
            JSX_NAMESPACED_NAME => {
                let ns = self.get_jsx_namespaced_name(node)?;
                let namespace = self.identifier_text(ns.namespace)?;
                let name = self.identifier_text(ns.name)?;
                Some(format!("{namespace}:{name}"))
            }
            _ => None,
        }
    }

    /// Attribute name text (`value` or `xlink:href`).
    pub fn attribute_name_text(&self, attribute: NodeIndex) -> Option<String> {
        let node = self.get(attribute)?;
        let data = self.get_jsx_attribute(node)?;
        self.tag_name_text(data.name)
    }

    /// For an opening-like element, the enclosing `JsxElement` if it is an
    /// opening element (self-closing elements have no separate parent element).
    pub fn jsx_element_of_opening(&self, opening: NodeIndex) -> Option<NodeIndex> {
        let node = self.get(opening)?;
        if node.kind != JSX_OPENING_ELEMENT {
            return None;
        }
        let parent = self.parent_of(opening);
        let parent_node = self.get(parent)?;
        (parent_node.kind == JSX_ELEMENT).then_some(parent)
    }

    /// Children of a JSX element or fragment; empty for self-closing elements.
    pub fn jsx_children(&self, index: NodeIndex) -> &[NodeIndex] {
        let Some(node) = self.get(index) else {
            return &[];
        };
        if let Some(element) = self.get_jsx_element(node) {
            &element.children.nodes
        } else if let Some(fragment) = self.get_jsx_fragment(node) {
            &fragment.children.nodes
        } else {
            &[]
        }
    }

    /// The opening-like node of an element expression (the element itself when self-closing).
    pub fn jsx_opening_like(&self, index: NodeIndex) -> Option<NodeIndex> {
        let node = self.get(index)?;
        match node.kind {
            JSX_ELEMENT => self.get_jsx_element(node).map(|e| e.opening_element),
            JSX_SELF_CLOSING_ELEMENT | JSX_OPENING_ELEMENT => Some(index),
            _ => None,
        }
    }

    /// Whether a child contributes to the element (whitespace-only text and
    /// empty `{}` expressions do not).
    pub fn is_semantic_jsx_child(&self, child: NodeIndex) -> bool {
        let Some(node) = self.get(child) else {
            return false;
        };
        if let Some(text) = self.get_jsx_text(node) {
            return !text.contains_only_trivia_white_spaces;
        }
        if let Some(expr) = self.get_jsx_expression(node) {
            return expr.expression.is_some();
        }
        true
    }
}
