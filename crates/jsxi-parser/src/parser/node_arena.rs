//! NodeArena creation methods (add_* methods).

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    fn push_node(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        NodeIndex(index)
    }

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
            info.parent = parent;
        }
    }

    fn set_parent_list(&mut self, list: &NodeList, parent: NodeIndex) {
        for &child in &list.nodes {
            self.set_parent(child, parent);
        }
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a token node (keywords such as `this`, `null`, `true`)
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(Node::new(kind, pos, end))
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, data: IdentifierData) -> NodeIndex {
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(data);
        self.push_node(Node::with_data(syntax_kind_ext::IDENTIFIER, pos, end, data_index))
    }

    /// Add a string or numeric literal
    pub fn add_literal(&mut self, kind: u16, pos: u32, end: u32, data: LiteralData) -> NodeIndex {
        let data_index = self.literals.len() as u32;
        self.literals.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_property_access(&mut self, pos: u32, end: u32, data: AccessExprData) -> NodeIndex {
        let (expression, name) = (data.expression, data.name);
        let data_index = self.access_exprs.len() as u32;
        self.access_exprs.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
            pos,
            end,
            data_index,
        ));
        self.set_parent(expression, parent);
        self.set_parent(name, parent);
        parent
    }

    pub fn add_parenthesized(&mut self, pos: u32, end: u32, data: ParenthesizedData) -> NodeIndex {
        let expression = data.expression;
        let data_index = self.parenthesized.len() as u32;
        self.parenthesized.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::PARENTHESIZED_EXPRESSION,
            pos,
            end,
            data_index,
        ));
        self.set_parent(expression, parent);
        parent
    }

    /// Add an opaque expression or statement (`OPAQUE_EXPRESSION` / `OPAQUE_STATEMENT`)
    pub fn add_opaque(&mut self, kind: u16, pos: u32, end: u32, data: OpaqueData) -> NodeIndex {
        let data_index = self.opaque.len() as u32;
        self.opaque.push(data);
        self.push_node(Node::with_data(kind, pos, end, data_index))
    }

    pub fn add_expression_statement(
        &mut self,
        pos: u32,
        end: u32,
        data: ExprStatementData,
    ) -> NodeIndex {
        let expression = data.expression;
        let data_index = self.expr_statements.len() as u32;
        self.expr_statements.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            pos,
            end,
            data_index,
        ));
        self.set_parent(expression, parent);
        parent
    }

    pub fn add_return(&mut self, pos: u32, end: u32, data: ReturnData) -> NodeIndex {
        let expression = data.expression;
        let data_index = self.returns.len() as u32;
        self.returns.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::RETURN_STATEMENT,
            pos,
            end,
            data_index,
        ));
        self.set_parent(expression, parent);
        parent
    }

    pub fn add_variable_statement(&mut self, pos: u32, end: u32, data: VariableData) -> NodeIndex {
        let (name, initializer) = (data.name, data.initializer);
        let data_index = self.variables.len() as u32;
        self.variables.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::VARIABLE_STATEMENT,
            pos,
            end,
            data_index,
        ));
        self.set_parent(name, parent);
        self.set_parent(initializer, parent);
        parent
    }

    pub fn add_source_file(&mut self, pos: u32, end: u32, data: SourceFileData) -> NodeIndex {
        let statements = data.statements.clone();
        let data_index = self.source_files.len() as u32;
        self.source_files.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::SOURCE_FILE,
            pos,
            end,
            data_index,
        ));
        self.set_parent_list(&statements, parent);
        parent
    }

    // ============================================================================
    // JSX
    // ============================================================================

    pub fn add_jsx_element(&mut self, pos: u32, end: u32, data: JsxElementData) -> NodeIndex {
        let opening_element = data.opening_element;
        let children = data.children.clone();
        let closing_element = data.closing_element;

        let data_index = self.jsx_elements.len() as u32;
        self.jsx_elements.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::JSX_ELEMENT,
            pos,
            end,
            data_index,
        ));
        self.set_parent(opening_element, parent);
        self.set_parent_list(&children, parent);
        self.set_parent(closing_element, parent);
        parent
    }

    /// Add an opening (`JSX_OPENING_ELEMENT`) or self-closing element
    pub fn add_jsx_opening(&mut self, kind: u16, pos: u32, end: u32, data: JsxOpeningData) -> NodeIndex {
        let (tag_name, attributes) = (data.tag_name, data.attributes);
        let data_index = self.jsx_opening.len() as u32;
        self.jsx_opening.push(data);
        let parent = self.push_node(Node::with_data(kind, pos, end, data_index));
        self.set_parent(tag_name, parent);
        self.set_parent(attributes, parent);
        parent
    }

    pub fn add_jsx_closing(&mut self, pos: u32, end: u32, data: JsxClosingData) -> NodeIndex {
        let tag_name = data.tag_name;
        let data_index = self.jsx_closing.len() as u32;
        self.jsx_closing.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::JSX_CLOSING_ELEMENT,
            pos,
            end,
            data_index,
        ));
        self.set_parent(tag_name, parent);
        parent
    }

    pub fn add_jsx_fragment(&mut self, pos: u32, end: u32, data: JsxFragmentData) -> NodeIndex {
        let opening = data.opening_fragment;
        let children = data.children.clone();
        let closing = data.closing_fragment;

        let data_index = self.jsx_fragments.len() as u32;
        self.jsx_fragments.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::JSX_FRAGMENT,
            pos,
            end,
            data_index,
        ));
        self.set_parent(opening, parent);
        self.set_parent_list(&children, parent);
        self.set_parent(closing, parent);
        parent
    }

    pub fn add_jsx_attributes(&mut self, pos: u32, end: u32, data: JsxAttributesData) -> NodeIndex {
        let properties = data.properties.clone();
        let data_index = self.jsx_attributes.len() as u32;
        self.jsx_attributes.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::JSX_ATTRIBUTES,
            pos,
            end,
            data_index,
        ));
        self.set_parent_list(&properties, parent);
        parent
    }

    pub fn add_jsx_attribute(&mut self, pos: u32, end: u32, data: JsxAttributeData) -> NodeIndex {
        let (name, initializer) = (data.name, data.initializer);
        let data_index = self.jsx_attribute.len() as u32;
        self.jsx_attribute.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::JSX_ATTRIBUTE,
            pos,
            end,
            data_index,
        ));
        self.set_parent(name, parent);
        self.set_parent(initializer, parent);
        parent
    }

    pub fn add_jsx_spread_attribute(
        &mut self,
        pos: u32,
        end: u32,
        data: JsxSpreadAttributeData,
    ) -> NodeIndex {
        let expression = data.expression;
        let data_index = self.jsx_spread_attributes.len() as u32;
        self.jsx_spread_attributes.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::JSX_SPREAD_ATTRIBUTE,
            pos,
            end,
            data_index,
        ));
        self.set_parent(expression, parent);
        parent
    }

    pub fn add_jsx_expression(&mut self, pos: u32, end: u32, data: JsxExpressionData) -> NodeIndex {
        let expression = data.expression;
        let data_index = self.jsx_expressions.len() as u32;
        self.jsx_expressions.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::JSX_EXPRESSION,
            pos,
            end,
            data_index,
        ));
        self.set_parent(expression, parent);
        parent
    }

    pub fn add_jsx_text(&mut self, pos: u32, end: u32, data: JsxTextData) -> NodeIndex {
        let data_index = self.jsx_text.len() as u32;
        self.jsx_text.push(data);
        self.push_node(Node::with_data(syntax_kind_ext::JSX_TEXT, pos, end, data_index))
    }

    pub fn add_jsx_namespaced_name(
        &mut self,
        pos: u32,
        end: u32,
        data: JsxNamespacedNameData,
    ) -> NodeIndex {
        let (namespace, name) = (data.namespace, data.name);
        let data_index = self.jsx_namespaced_names.len() as u32;
        self.jsx_namespaced_names.push(data);
        let parent = self.push_node(Node::with_data(
            syntax_kind_ext::JSX_NAMESPACED_NAME,
            pos,
            end,
            data_index,
        ));
        self.set_parent(namespace, parent);
        self.set_parent(name, parent);
        parent
    }
}
