//! Lowered IR (Intermediate Representation) for the JSX transform
//!
//! The lowering engine turns JSX subtrees into `IRNode` trees instead of
//! strings; [`IRPrinter`](super::ir_printer::IRPrinter) walks them and writes
//! JavaScript.
//!
//! # IR Structure
//!
//! The IR only covers what lowered JSX and the statements around it need:
//! literals, identifiers, calls, `new`, member access, array and object
//! literals (with spread members), helper imports and variable statements.
//! Everything the lowering does not rewrite is carried through as `Raw`
//! source text.

/// Intermediate Representation node for transformed JavaScript
#[derive(Debug, Clone, PartialEq)]
pub enum IRNode {
    // =========================================================================
    // Literals
    // =========================================================================
    /// Numeric literal: `42`, `3.14`
    NumericLiteral(String),

    /// String literal: `"hello"` (the cooked value; the printer escapes it)
    StringLiteral(String),

    /// Boolean literal: `true`, `false`
    BooleanLiteral(bool),

    /// Null literal: `null`
    NullLiteral,

    /// Undefined: `void 0`
    Undefined,

    // =========================================================================
    // Identifiers
    // =========================================================================
    /// Identifier: `foo`, `_jsx`
    Identifier(String),

    /// This keyword
    This,

    // =========================================================================
    // Expressions
    // =========================================================================
    /// Call expression: `callee(args)`
    CallExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    /// New expression: `new Callee(args)`
    NewExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    /// Property access: `object.property`
    PropertyAccess { object: Box<Self>, property: String },

    /// Parenthesized expression: `(expr)`
    Parenthesized(Box<Self>),

    /// Array literal: `[a, b, c]`; `multi_line` puts every element on its own line
    ArrayLiteral { elements: Vec<Self>, multi_line: bool },

    /// Spread element: `...expr`
    SpreadElement(Box<Self>),

    /// Object literal: `{ key: value, ...spread }`
    ObjectLiteral(Vec<IRProperty>),

    /// An argument or element that starts on a new, indented line.
    StartOnNewLine(Box<Self>),

    // =========================================================================
    // Statements
    // =========================================================================
    /// `var x = init;` / `const x = init;`
    VarDecl {
        keyword: DeclarationKeyword,
        name: String,
        initializer: Option<Box<Self>>,
    },

    /// Expression statement: `expr;`
    ExpressionStatement(Box<Self>),

    /// Return statement: `return expr;`
    ReturnStatement(Option<Box<Self>>),

    // =========================================================================
    // Module IR Nodes
    // =========================================================================
    /// `import { jsx as _jsx, jsxs as _jsxs } from "react/jsx-runtime";`
    NamedImports {
        specifiers: Vec<ImportSpecifier>,
        module_spec: String,
    },

    /// `const { jsx: _jsx } = require("react/jsx-runtime");`
    RequireDestructuring {
        keyword: DeclarationKeyword,
        specifiers: Vec<ImportSpecifier>,
        module_spec: String,
    },

    /// `var _jsx = require("react/jsx-runtime").jsx;` (targets without destructuring)
    RequireMember {
        var_name: String,
        module_spec: String,
        import_name: String,
    },

    // =========================================================================
    // Special
    // =========================================================================
    /// Raw JavaScript string (source text the lowering does not rewrite)
    Raw(String),

    /// Sequence of statements/nodes
    Sequence(Vec<Self>),
}

/// `var`, `let` or `const`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKeyword {
    Var,
    Let,
    Const,
}

impl DeclarationKeyword {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

/// `imported as local`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub imported: String,
    pub local: String,
}

/// Member of an object literal
#[derive(Debug, Clone, PartialEq)]
pub enum IRProperty {
    /// `key: value`
    Init { key: IRPropertyKey, value: IRNode },
    /// `...expr`
    Spread(IRNode),
}

/// Object property key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IRPropertyKey {
    Identifier(String),
    StringLiteral(String),
}

// =========================================================================
// Builder helpers for IR construction
// =========================================================================

impl IRNode {
    /// Create an identifier node
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a string literal
    pub fn string(s: impl Into<String>) -> Self {
        Self::StringLiteral(s.into())
    }

    /// Create a numeric literal
    pub fn number(n: impl Into<String>) -> Self {
        Self::NumericLiteral(n.into())
    }

    /// Create a call expression
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::CallExpr {
            callee: Box::new(callee),
            arguments: args,
        }
    }

    /// Create a new expression: `new Constructor(args)`
    pub fn new_expr(callee: Self, args: Vec<Self>) -> Self {
        Self::NewExpr {
            callee: Box::new(callee),
            arguments: args,
        }
    }

    /// Create a property access
    pub fn prop(object: Self, property: impl Into<String>) -> Self {
        Self::PropertyAccess {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// `a.b.c` from its parts; `this` as the first part is the keyword.
    pub fn entity<S: AsRef<str>>(parts: &[S]) -> Self {
        let mut parts = parts.iter().map(AsRef::as_ref);
        let mut expr = match parts.next() {
            Some("this") => Self::This,
            Some(first) => Self::id(first),
            None => Self::Undefined,
        };
        for part in parts {
            expr = Self::prop(expr, part);
        }
        expr
    }

    /// Create a `var` declaration
    pub fn var_decl(name: impl Into<String>, init: Option<Self>) -> Self {
        Self::VarDecl {
            keyword: DeclarationKeyword::Var,
            name: name.into(),
            initializer: init.map(Box::new),
        }
    }

    /// Create a `const` declaration
    pub fn const_decl(name: impl Into<String>, init: Self) -> Self {
        Self::VarDecl {
            keyword: DeclarationKeyword::Const,
            name: name.into(),
            initializer: Some(Box::new(init)),
        }
    }

    /// Create a return statement
    pub fn ret(expr: Option<Self>) -> Self {
        Self::ReturnStatement(expr.map(Box::new))
    }

    /// Create `void 0`
    pub const fn void_0() -> Self {
        Self::Undefined
    }

    /// Wrap in parentheses
    pub fn paren(self) -> Self {
        Self::Parenthesized(Box::new(self))
    }

    /// Create an expression statement
    pub fn expr_stmt(expr: Self) -> Self {
        Self::ExpressionStatement(Box::new(expr))
    }

    /// Create an object literal
    pub const fn object(props: Vec<IRProperty>) -> Self {
        Self::ObjectLiteral(props)
    }

    /// Create an empty object literal
    pub const fn empty_object() -> Self {
        Self::ObjectLiteral(Vec::new())
    }

    /// Create an array literal
    pub const fn array(elements: Vec<Self>) -> Self {
        Self::ArrayLiteral {
            elements,
            multi_line: false,
        }
    }

    /// Create an array literal with one element per line
    pub const fn multi_line_array(elements: Vec<Self>) -> Self {
        Self::ArrayLiteral {
            elements,
            multi_line: true,
        }
    }

    /// Mark this node to start on a new line inside an argument list
    pub fn on_new_line(self) -> Self {
        match self {
            Self::StartOnNewLine(_) => self,
            other => Self::StartOnNewLine(Box::new(other)),
        }
    }

    /// Create a sequence of statements
    pub const fn sequence(nodes: Vec<Self>) -> Self {
        Self::Sequence(nodes)
    }
}

impl IRProperty {
    /// `key: value`, quoting the key when it is not a valid identifier
    pub fn init(key: impl Into<String>, value: IRNode) -> Self {
        let key = key.into();
        let key = if jsxi_common::pragmas::is_identifier_text(&key) {
            IRPropertyKey::Identifier(key)
        } else {
            IRPropertyKey::StringLiteral(key)
        };
        Self::Init { key, value }
    }

    /// `...expr`
    pub const fn spread(value: IRNode) -> Self {
        Self::Spread(value)
    }
}

impl ImportSpecifier {
    pub fn new(imported: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            imported: imported.into(),
            local: local.into(),
        }
    }
}
