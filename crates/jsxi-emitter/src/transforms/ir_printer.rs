//! IR Printer - Emits IR nodes as JavaScript strings
//!
//! This module takes IR nodes produced by the JSX lowering and emits them
//! as properly formatted JavaScript code.
//!
//! # Architecture
//!
//! The printer is a simple recursive emitter that:
//! 1. Walks the IR tree
//! 2. Writes each node to an output buffer
//! 3. Handles indentation for lines opened by `StartOnNewLine` and
//!    multi-line array literals
//!
//! # Example
//!
//! ```ignore
//! let ir = IRNode::call(IRNode::entity(&["React", "createElement"]), vec![IRNode::string("div")]);
//! let output = IRPrinter::emit_to_string(&ir);
//! assert_eq!(output, "React.createElement(\"div\")");
//! ```

use crate::transforms::ir::{IRNode, IRProperty, IRPropertyKey, ImportSpecifier};
use std::fmt::Write as _;

/// IR printer that emits JavaScript from IR nodes
pub struct IRPrinter {
    output: String,
    indent_level: u32,
    indent_str: &'static str,
}

impl IRPrinter {
    pub const fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    /// Set the base indentation used for continuation lines
    pub const fn set_indent_level(&mut self, level: u32) {
        self.indent_level = level;
    }

    /// Emit an IR node and return the output
    pub fn emit(&mut self, node: &IRNode) -> &str {
        self.emit_node(node);
        &self.output
    }

    /// Get the output
    pub fn get_output(&self) -> &str {
        &self.output
    }

    /// Take the output
    pub fn take_output(self) -> String {
        self.output
    }

    /// Emit a node to a fresh string
    pub fn emit_to_string(node: &IRNode) -> String {
        let mut printer = Self::new();
        printer.emit_node(node);
        printer.output
    }

    pub(crate) fn emit_node(&mut self, node: &IRNode) {
        match node {
            IRNode::NumericLiteral(n) => self.write(n),
            IRNode::StringLiteral(s) => {
                self.write("\"");
                self.write_escaped(s);
                self.write("\"");
            }
            IRNode::BooleanLiteral(b) => self.write(if *b { "true" } else { "false" }),
            IRNode::NullLiteral => self.write("null"),
            IRNode::Undefined => self.write("void 0"),
            IRNode::Identifier(name) => self.write(name),
            IRNode::This => self.write("this"),
            IRNode::CallExpr { callee, arguments } => {
                self.emit_node(callee);
                self.write("(");
                self.emit_arguments(arguments);
                self.write(")");
            }
            IRNode::NewExpr { callee, arguments } => {
                self.write("new ");
                self.emit_node(callee);
                self.write("(");
                self.emit_arguments(arguments);
                self.write(")");
            }
            IRNode::PropertyAccess { object, property } => {
                self.emit_node(object);
                self.write(".");
                self.write(property);
            }
            IRNode::Parenthesized(expr) => {
                self.write("(");
                self.emit_node(expr);
                self.write(")");
            }
            IRNode::ArrayLiteral {
                elements,
                multi_line,
            } => {
                if *multi_line && !elements.is_empty() {
                    self.emit_array_multiline(elements);
                } else {
                    self.write("[");
                    self.emit_arguments(elements);
                    self.write("]");
                }
            }
            IRNode::SpreadElement(expr) => {
                self.write("...");
                self.emit_node(expr);
            }
            IRNode::ObjectLiteral(properties) => {
                if properties.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (i, prop) in properties.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_property(prop);
                }
                self.write(" }");
            }
            // Outside an argument list the marker has no effect.
            IRNode::StartOnNewLine(inner) => self.emit_node(inner),
            IRNode::VarDecl {
                keyword,
                name,
                initializer,
            } => {
                self.write(keyword.as_str());
                self.write(" ");
                self.write(name);
                if let Some(init) = initializer {
                    self.write(" = ");
                    self.emit_node(init);
                }
                self.write(";");
            }
            IRNode::ExpressionStatement(expr) => {
                self.emit_node(expr);
                self.write(";");
            }
            IRNode::ReturnStatement(expr) => {
                self.write("return");
                if let Some(expr) = expr {
                    self.write(" ");
                    self.emit_node(expr);
                }
                self.write(";");
            }
            IRNode::NamedImports {
                specifiers,
                module_spec,
            } => {
                self.write("import { ");
                for (i, spec) in specifiers.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(&spec.imported);
                    if spec.imported != spec.local {
                        self.write(" as ");
                        self.write(&spec.local);
                    }
                }
                self.write(" } from ");
                self.emit_module_spec(module_spec);
                self.write(";");
            }
            IRNode::RequireDestructuring {
                keyword,
                specifiers,
                module_spec,
            } => {
                self.write(keyword.as_str());
                self.write(" { ");
                self.emit_binding_specifiers(specifiers);
                self.write(" } = require(");
                self.emit_module_spec(module_spec);
                self.write(");");
            }
            IRNode::RequireMember {
                var_name,
                module_spec,
                import_name,
            } => {
                self.write("var ");
                self.write(var_name);
                self.write(" = require(");
                self.emit_module_spec(module_spec);
                self.write(").");
                self.write(import_name);
                self.write(";");
            }
            IRNode::Raw(text) => self.write(text),
            IRNode::Sequence(nodes) => {
                for (i, node) in nodes.iter().enumerate() {
                    if i > 0 {
                        self.write_line();
                        self.write_indent();
                    }
                    self.emit_node(node);
                }
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Comma-separated arguments; `StartOnNewLine` entries go on their own
    /// line one level deeper than the call.
    fn emit_arguments(&mut self, arguments: &[IRNode]) {
        let mut indented = false;
        for (i, arg) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(",");
            }
            match arg {
                IRNode::StartOnNewLine(inner) => {
                    if !indented {
                        self.increase_indent();
                        indented = true;
                    }
                    self.write_line();
                    self.write_indent();
                    self.emit_node(inner);
                }
                _ => {
                    if i > 0 {
                        self.write(" ");
                    }
                    self.emit_node(arg);
                }
            }
        }
        if indented {
            self.decrease_indent();
        }
    }

    fn emit_array_multiline(&mut self, elements: &[IRNode]) {
        self.write("[");
        self.increase_indent();
        for (i, element) in elements.iter().enumerate() {
            self.write_line();
            self.write_indent();
            match element {
                IRNode::StartOnNewLine(inner) => self.emit_node(inner),
                _ => self.emit_node(element),
            }
            if i + 1 < elements.len() {
                self.write(",");
            }
        }
        self.decrease_indent();
        self.write_line();
        self.write_indent();
        self.write("]");
    }

    fn emit_property(&mut self, prop: &IRProperty) {
        match prop {
            IRProperty::Init { key, value } => {
                match key {
                    IRPropertyKey::Identifier(name) => self.write(name),
                    IRPropertyKey::StringLiteral(s) => {
                        self.write("\"");
                        self.write_escaped(s);
                        self.write("\"");
                    }
                }
                self.write(": ");
                self.emit_node(value);
            }
            IRProperty::Spread(value) => {
                self.write("...");
                self.emit_node(value);
            }
        }
    }

    fn emit_binding_specifiers(&mut self, specifiers: &[ImportSpecifier]) {
        for (i, spec) in specifiers.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&spec.imported);
            if spec.imported != spec.local {
                self.write(": ");
                self.write(&spec.local);
            }
        }
    }

    fn emit_module_spec(&mut self, module_spec: &str) {
        self.write("\"");
        self.write_escaped(module_spec);
        self.write("\"");
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Escape for a double-quoted literal; non-ASCII is written as `\uXXXX`.
    fn write_escaped(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\0' => self.output.push_str("\\0"),
                c if (c as u32) < 0x20 || c == '\x7F' => {
                    let _ = write!(self.output, "\\u{:04X}", c as u32);
                }
                c if !c.is_ascii() => {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        let _ = write!(self.output, "\\u{:04X}", unit);
                    }
                }
                _ => self.output.push(c),
            }
        }
    }

    fn write_line(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(self.indent_str);
        }
    }

    const fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    const fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

impl Default for IRPrinter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/ir_printer.rs"]
mod tests;
