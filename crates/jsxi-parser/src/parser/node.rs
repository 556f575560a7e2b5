//! Thin node headers and typed data pools.
//!
//! Each node is a small header (`kind`, `flags`, `pos`, `end`, `data_index`);
//! `data_index` points into the pool that matches `kind`. Nodes never change
//! after construction, so facts computed about them live in side-tables keyed
//! by [`NodeIndex`].

use super::base::{NodeIndex, NodeList};
use jsxi_common::JsxPragmas;
use serde::{Deserialize, Serialize};

/// A thin node header.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Node {
    pub kind: u16,
    pub flags: u16,
    /// Start position in source (byte offset)
    pub pos: u32,
    /// End position in source (byte offset)
    pub end: u32,
    /// Index into the type-specific storage pool (u32::MAX = no data)
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub fn new(kind: u16, pos: u32, end: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index: Self::NO_DATA,
        }
    }

    #[inline]
    pub fn with_data(kind: u16, pos: u32, end: u32, data_index: u32) -> Node {
        Node {
            kind,
            flags: 0,
            pos,
            end,
            data_index,
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }
}

/// Per-node information that is filled in after construction.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

// =============================================================================
// Expression data
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentifierData {
    /// Identifier text as written (unescaped).
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteralData {
    /// Cooked value for strings, source text for numbers.
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

/// An expression the core does not look into; its type comes from the host.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpaqueData {
    pub text: String,
}

// =============================================================================
// Statement data
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReturnData {
    /// `NodeIndex::NONE` for a bare `return;`
    pub expression: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKeyword {
    Var,
    Let,
    Const,
}

impl VariableKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKeyword::Var => "var",
            VariableKeyword::Let => "let",
            VariableKeyword::Const => "const",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableData {
    pub keyword: VariableKeyword,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceFileData {
    pub file_name: String,
    pub text: String,
    pub statements: NodeList,
    pub is_declaration_file: bool,
    pub pragmas: JsxPragmas,
}

// =============================================================================
// JSX data
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsxElementData {
    pub opening_element: NodeIndex,
    pub children: NodeList,
    pub closing_element: NodeIndex,
}

/// Opening or self-closing element.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsxOpeningData {
    pub tag_name: NodeIndex,
    pub attributes: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsxClosingData {
    pub tag_name: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsxFragmentData {
    pub opening_fragment: NodeIndex,
    pub children: NodeList,
    pub closing_fragment: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsxAttributesData {
    pub properties: NodeList,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsxAttributeData {
    /// Identifier or namespaced name.
    pub name: NodeIndex,
    /// String literal, `JsxExpression`, nested element, or NONE (`<a disabled />`).
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsxSpreadAttributeData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsxExpressionData {
    pub dot_dot_dot_token: bool,
    /// NONE for an empty `{}` / `{/* comment */}`.
    pub expression: NodeIndex,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsxTextData {
    pub text: String,
    pub contains_only_trivia_white_spaces: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsxNamespacedNameData {
    pub namespace: NodeIndex,
    pub name: NodeIndex,
}

// =============================================================================
// Arena
// =============================================================================

/// Arena holding node headers and their typed data pools.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub access_exprs: Vec<AccessExprData>,
    pub parenthesized: Vec<ParenthesizedData>,
    pub opaque: Vec<OpaqueData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub returns: Vec<ReturnData>,
    pub variables: Vec<VariableData>,
    pub source_files: Vec<SourceFileData>,
    pub jsx_elements: Vec<JsxElementData>,
    pub jsx_opening: Vec<JsxOpeningData>,
    pub jsx_closing: Vec<JsxClosingData>,
    pub jsx_fragments: Vec<JsxFragmentData>,
    pub jsx_attributes: Vec<JsxAttributesData>,
    pub jsx_attribute: Vec<JsxAttributeData>,
    pub jsx_spread_attributes: Vec<JsxSpreadAttributeData>,
    pub jsx_expressions: Vec<JsxExpressionData>,
    pub jsx_text: Vec<JsxTextData>,
    pub jsx_namespaced_names: Vec<JsxNamespacedNameData>,
}
