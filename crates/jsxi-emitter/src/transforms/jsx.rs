//! JSX lowering.
//!
//! Turns JSX elements and fragments into plain calls. Three encodings:
//!
//! ```javascript
//! // classic (jsx: react)
//! React.createElement("div", { id: "a" }, child);
//! // optimized runtime (jsx: react-jsx / react-jsxdev)
//! _jsx("div", { id: "a", children: child });
//! // generic factory (@jsx-mode generic)
//! h("div", { id: "a" }, child);  new Comp(null, child);  func(null, child);
//! ```
//!
//! Which one applies is decided per file from the checker's strategy and
//! the `jsx` option. Tag classification (intrinsic, class or function
//! component) comes from the [`JsxEmitResolver`] snapshot.

use crate::emitter::PrinterOptions;
use crate::module_specifiers::relative_import_source;
use crate::transforms::ir::{IRNode, IRProperty};
use crate::transforms::jsx_state::JsxFileState;
use crate::transforms::jsx_text::{decode_entities, fixup_whitespace_and_decode_entities};
use jsxi_checker::JsxEmitResolver;
use jsxi_common::{JsxEmit, JsxMode, JsxReferenceKind, LineMap};
use jsxi_parser::{NodeArena, NodeIndex, syntax_kind_ext};
use tracing::{debug, trace};

/// How elements of one file are encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsxEncoding {
    /// `factory(tag, props, ...children)`
    Classic,
    /// `_jsx(tag, { ...props, children }, key)` or the dev variant
    Automatic { development: bool },
    /// Intrinsics through the intrinsic factory, components called or constructed
    GenericFactory,
}

/// One lowered attribute.
enum JsxProp {
    Named { name: String, value: IRNode },
    Spread(IRNode),
}

pub struct JsxTransformer<'a> {
    arena: &'a NodeArena,
    resolver: &'a JsxEmitResolver,
    options: &'a PrinterOptions,
    file_name: &'a str,
    source_text: &'a str,
    encoding: JsxEncoding,
    import_source: String,
    line_map: Option<LineMap>,
    state: JsxFileState,
}

impl<'a> JsxTransformer<'a> {
    pub fn new(arena: &'a NodeArena, resolver: &'a JsxEmitResolver, options: &'a PrinterOptions) -> Self {
        let file = arena.source_file().map(|(_, data)| data);
        let file_name = file.map_or("", |f| f.file_name.as_str());
        let source_text = file.map_or("", |f| f.text.as_str());

        let encoding = match resolver.mode() {
            JsxMode::GenericFactory => JsxEncoding::GenericFactory,
            JsxMode::Namespace => match options.jsx {
                JsxEmit::ReactJsx => JsxEncoding::Automatic { development: false },
                JsxEmit::ReactJsxDev => JsxEncoding::Automatic { development: true },
                _ => JsxEncoding::Classic,
            },
        };

        let pragma_source = file.and_then(|f| f.pragmas.jsx_import_source.as_ref());
        let import_source = match (pragma_source, &options.jsx_import_source) {
            (Some(pragma), _) => pragma.value.clone(),
            (None, Some(option)) if option.starts_with("./") || option.starts_with("../") => {
                match &options.jsx_import_source_base {
                    Some(base) => relative_import_source(file_name, base, option),
                    None => option.clone(),
                }
            }
            (None, Some(option)) => option.clone(),
            (None, None) => "react".to_string(),
        };
        debug!(file = file_name, ?encoding, import_source = %import_source, "jsx encoding");

        JsxTransformer {
            arena,
            resolver,
            options,
            file_name,
            source_text,
            encoding,
            import_source,
            line_map: None,
            state: JsxFileState::for_source_text(source_text),
        }
    }

    pub const fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    pub const fn encoding(&self) -> JsxEncoding {
        self.encoding
    }

    /// Hand out the accumulated helper imports once the file is lowered.
    pub fn into_state(self) -> JsxFileState {
        self.state
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Lower an expression, rewriting any JSX inside it.
    pub fn transform_expression(&mut self, idx: NodeIndex) -> IRNode {
        let arena = self.arena;
        let Some(node) = arena.get(idx) else {
            return IRNode::Undefined;
        };
        match node.kind {
            syntax_kind_ext::JSX_ELEMENT
            | syntax_kind_ext::JSX_SELF_CLOSING_ELEMENT
            | syntax_kind_ext::JSX_FRAGMENT => self.transform_jsx(idx),
            syntax_kind_ext::IDENTIFIER => arena
                .get_identifier(node)
                .map_or(IRNode::Undefined, |data| IRNode::id(data.text.clone())),
            syntax_kind_ext::STRING_LITERAL => arena
                .get_literal(node)
                .map_or(IRNode::Undefined, |data| IRNode::string(data.text.clone())),
            syntax_kind_ext::NUMERIC_LITERAL => arena
                .get_literal(node)
                .map_or(IRNode::Undefined, |data| IRNode::number(data.text.clone())),
            syntax_kind_ext::NULL_KEYWORD => IRNode::NullLiteral,
            syntax_kind_ext::TRUE_KEYWORD => IRNode::BooleanLiteral(true),
            syntax_kind_ext::FALSE_KEYWORD => IRNode::BooleanLiteral(false),
            syntax_kind_ext::THIS_KEYWORD => IRNode::This,
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => {
                let Some(access) = arena.get_access_expr(node) else {
                    return IRNode::Raw(arena.node_text(idx).to_string());
                };
                let object = self.transform_expression(access.expression);
                let name = arena.identifier_text(access.name).unwrap_or_default();
                IRNode::prop(object, name)
            }
            syntax_kind_ext::PARENTHESIZED_EXPRESSION => match arena.get_parenthesized(node) {
                Some(paren) => self.transform_expression(paren.expression).paren(),
                None => IRNode::Raw(arena.node_text(idx).to_string()),
            },
            syntax_kind_ext::OPAQUE_EXPRESSION => arena
                .get_opaque(node)
                .map_or(IRNode::Undefined, |data| IRNode::Raw(data.text.clone())),
            _ => IRNode::Raw(arena.node_text(idx).to_string()),
        }
    }

    /// Lower a JSX element, self-closing element or fragment.
    pub fn transform_jsx(&mut self, idx: NodeIndex) -> IRNode {
        let arena = self.arena;
        let Some(node) = arena.get(idx) else {
            return IRNode::Undefined;
        };
        match node.kind {
            syntax_kind_ext::JSX_ELEMENT => {
                let Some(element) = arena.get_jsx_element(node) else {
                    return IRNode::Undefined;
                };
                self.transform_element(element.opening_element, &element.children.nodes, node.pos)
            }
            syntax_kind_ext::JSX_SELF_CLOSING_ELEMENT => self.transform_element(idx, &[], node.pos),
            syntax_kind_ext::JSX_FRAGMENT => {
                let children = arena.jsx_children(idx);
                self.transform_fragment(children, node.pos)
            }
            _ => self.transform_expression(idx),
        }
    }

    // =========================================================================
    // Elements
    // =========================================================================

    fn transform_element(&mut self, opening: NodeIndex, children: &[NodeIndex], pos: u32) -> IRNode {
        let kind = self.resolver.reference_kind(self.arena, opening);
        let props = self.transform_attributes(opening);
        let children = self.transform_children(children);
        trace!(opening = opening.0, ?kind, children = children.len(), "lower jsx element");

        match self.encoding {
            JsxEncoding::Classic => {
                let tag = self.tag_expression(opening, kind);
                let factory = IRNode::entity(self.resolver.factory_entity().parts());
                let props = self.props_expression(props);
                IRNode::call(factory, create_arguments(vec![tag], props, children))
            }
            JsxEncoding::GenericFactory => {
                let props = self.props_expression(props);
                match kind {
                    JsxReferenceKind::Intrinsic => {
                        let tag = self.tag_expression(opening, kind);
                        let factory = IRNode::entity(self.resolver.factory_entity().parts());
                        IRNode::call(factory, create_arguments(vec![tag], props, children))
                    }
                    JsxReferenceKind::Component => {
                        let tag = self.tag_expression(opening, kind);
                        IRNode::new_expr(tag, create_arguments(Vec::new(), props, children))
                    }
                    JsxReferenceKind::Function | JsxReferenceKind::Mixed => {
                        let tag = self.tag_expression(opening, kind);
                        IRNode::call(tag, create_arguments(Vec::new(), props, children))
                    }
                }
            }
            JsxEncoding::Automatic { development } => {
                let tag = self.tag_expression(opening, kind);
                if has_key_after_props_spread(&props) {
                    // `key` after a spread must keep its position: use createElement.
                    let source = self.import_source.clone();
                    let callee = IRNode::id(self.state.get_implicit_import(&source, "createElement"));
                    let props = self.props_expression(props);
                    return IRNode::call(callee, create_arguments(vec![tag], props, children));
                }
                self.automatic_call(tag, props, children, development, pos)
            }
        }
    }

    fn transform_fragment(&mut self, children: &[NodeIndex], pos: u32) -> IRNode {
        let children = self.transform_children(children);
        match self.encoding {
            JsxEncoding::GenericFactory => IRNode::multi_line_array(children),
            JsxEncoding::Classic => {
                let factory = IRNode::entity(self.resolver.factory_entity().parts());
                let fragment = match self.resolver.fragment_entity() {
                    Some(entity) => IRNode::entity(entity.parts()),
                    None => IRNode::NullLiteral,
                };
                let mut args = vec![fragment, IRNode::NullLiteral];
                push_children(&mut args, children);
                IRNode::call(factory, args)
            }
            JsxEncoding::Automatic { development } => {
                let runtime = self.runtime_module(development);
                let fragment = IRNode::id(self.state.get_implicit_import(&runtime, "Fragment"));
                self.automatic_call(fragment, Vec::new(), children, development, pos)
            }
        }
    }

    /// `_jsx(tag, props, key)`, `_jsxs(...)` or
    /// `_jsxDEV(tag, props, key, isStatic, source, this)`.
    fn automatic_call(
        &mut self,
        tag: IRNode,
        props: Vec<JsxProp>,
        children: Vec<IRNode>,
        development: bool,
        pos: u32,
    ) -> IRNode {
        let mut key = None;
        let mut properties = Vec::with_capacity(props.len() + 1);
        for prop in props {
            match prop {
                JsxProp::Named { name, value } if name == "key" => key = Some(value),
                other => properties.push(other),
            }
        }

        let is_static_children =
            children.len() > 1 || matches!(children.as_slice(), [IRNode::SpreadElement(_)]);
        if !children.is_empty() {
            let value = if children.len() == 1 && !is_static_children {
                children.into_iter().next().unwrap_or(IRNode::Undefined)
            } else {
                IRNode::array(children)
            };
            properties.push(JsxProp::Named {
                name: "children".to_string(),
                value,
            });
        }
        let props = self.props_expression(properties).unwrap_or_else(IRNode::empty_object);

        let runtime = self.runtime_module(development);
        let helper = if development {
            "jsxDEV"
        } else if is_static_children {
            "jsxs"
        } else {
            "jsx"
        };
        let callee = IRNode::id(self.state.get_implicit_import(&runtime, helper));

        let mut args = vec![tag, props];
        if development {
            args.push(key.unwrap_or(IRNode::Undefined));
            args.push(IRNode::BooleanLiteral(is_static_children));
            let (line, column) = self.source_position(pos);
            let file_name = self.state.get_filename_declaration(self.file_name);
            args.push(IRNode::object(vec![
                IRProperty::init("fileName", IRNode::id(file_name)),
                IRProperty::init("lineNumber", IRNode::number(line.to_string())),
                IRProperty::init("columnNumber", IRNode::number(column.to_string())),
            ]));
            args.push(IRNode::This);
        } else if let Some(key) = key {
            args.push(key);
        }
        IRNode::call(callee, args)
    }

    fn runtime_module(&self, development: bool) -> String {
        if development {
            format!("{}/jsx-dev-runtime", self.import_source)
        } else {
            format!("{}/jsx-runtime", self.import_source)
        }
    }

    /// One-based line and column of an offset.
    fn source_position(&mut self, pos: u32) -> (u32, u32) {
        let source_text = self.source_text;
        let line_map = self.line_map.get_or_insert_with(|| LineMap::build(source_text));
        let position = line_map.offset_to_position(pos, source_text);
        (position.line + 1, position.character + 1)
    }

    // =========================================================================
    // Tags, attributes and children
    // =========================================================================

    /// String literal for intrinsic tags, the tag expression otherwise.
    fn tag_expression(&mut self, opening: NodeIndex, kind: JsxReferenceKind) -> IRNode {
        let arena = self.arena;
        let Some(tag) = arena
            .get(opening)
            .and_then(|node| arena.get_jsx_opening(node))
            .map(|data| data.tag_name)
        else {
            return IRNode::Undefined;
        };
        let is_namespaced = arena.kind_of(tag) == Some(syntax_kind_ext::JSX_NAMESPACED_NAME);
        if kind == JsxReferenceKind::Intrinsic || is_namespaced {
            return match arena.tag_name_text(tag) {
                Some(text) => IRNode::string(text),
                None => IRNode::Raw(arena.node_text(tag).to_string()),
            };
        }
        self.transform_expression(tag)
    }

    fn transform_attributes(&mut self, opening: NodeIndex) -> Vec<JsxProp> {
        let arena = self.arena;
        let Some(attributes) = arena
            .get(opening)
            .and_then(|node| arena.get_jsx_opening(node))
            .and_then(|data| arena.get(data.attributes))
            .and_then(|node| arena.get_jsx_attributes(node))
        else {
            return Vec::new();
        };

        let mut props = Vec::with_capacity(attributes.properties.len());
        for &attr_idx in &attributes.properties.nodes {
            let Some(node) = arena.get(attr_idx) else {
                continue;
            };
            if let Some(spread) = arena.get_jsx_spread_attribute(node) {
                props.push(JsxProp::Spread(self.transform_expression(spread.expression)));
            } else if let Some(attr) = arena.get_jsx_attribute(node) {
                let Some(name) = arena.tag_name_text(attr.name) else {
                    continue;
                };
                let value = self.transform_attribute_initializer(attr.initializer);
                props.push(JsxProp::Named { name, value });
            }
        }
        props
    }

    /// `<a b />` is `true`, `b="x"` is the decoded string, `b={}` is `void 0`.
    fn transform_attribute_initializer(&mut self, initializer: NodeIndex) -> IRNode {
        let arena = self.arena;
        let Some(node) = arena.get(initializer) else {
            return IRNode::BooleanLiteral(true);
        };
        match node.kind {
            syntax_kind_ext::STRING_LITERAL => arena.get_literal(node).map_or(IRNode::Undefined, |data| {
                IRNode::string(decode_entities(&data.text).into_owned())
            }),
            syntax_kind_ext::JSX_EXPRESSION => match arena.get_jsx_expression(node) {
                Some(expr) if expr.expression.is_some() => self.transform_expression(expr.expression),
                _ => IRNode::Undefined,
            },
            _ => self.transform_expression(initializer),
        }
    }

    fn transform_children(&mut self, children: &[NodeIndex]) -> Vec<IRNode> {
        children
            .iter()
            .filter_map(|&child| self.transform_child(child))
            .collect()
    }

    fn transform_child(&mut self, child: NodeIndex) -> Option<IRNode> {
        let arena = self.arena;
        let node = arena.get(child)?;
        match node.kind {
            syntax_kind_ext::JSX_TEXT => {
                let text = arena.get_jsx_text(node)?;
                fixup_whitespace_and_decode_entities(&text.text).map(IRNode::string)
            }
            syntax_kind_ext::JSX_EXPRESSION => {
                let expr = arena.get_jsx_expression(node)?;
                expr.expression.into_option()?;
                let lowered = self.transform_expression(expr.expression);
                Some(if expr.dot_dot_dot_token {
                    IRNode::SpreadElement(Box::new(lowered))
                } else {
                    lowered
                })
            }
            _ => Some(self.transform_expression(child)),
        }
    }

    /// Props argument: `None` without attributes, an object literal (with
    /// spread members from ES2018), or `Object.assign({}, ...)` segments.
    fn props_expression(&self, props: Vec<JsxProp>) -> Option<IRNode> {
        if props.is_empty() {
            return None;
        }
        if self.options.target.supports_object_spread() {
            let properties = props
                .into_iter()
                .map(|prop| match prop {
                    JsxProp::Named { name, value } => IRProperty::init(name, value),
                    JsxProp::Spread(expr) => IRProperty::spread(expr),
                })
                .collect();
            return Some(IRNode::object(properties));
        }

        let mut segments = Vec::new();
        let mut current = Vec::new();
        for prop in props {
            match prop {
                JsxProp::Named { name, value } => current.push(IRProperty::init(name, value)),
                JsxProp::Spread(expr) => {
                    if !current.is_empty() {
                        segments.push(IRNode::object(std::mem::take(&mut current)));
                    }
                    segments.push(expr);
                }
            }
        }
        if !current.is_empty() {
            segments.push(IRNode::object(current));
        }
        if !matches!(segments.first(), Some(IRNode::ObjectLiteral(_))) {
            segments.insert(0, IRNode::empty_object());
        }
        if segments.len() == 1 {
            return segments.pop();
        }
        Some(IRNode::call(
            IRNode::prop(IRNode::id("Object"), "assign"),
            segments,
        ))
    }
}

/// `key` written after a spread cannot move into the third argument.
fn has_key_after_props_spread(props: &[JsxProp]) -> bool {
    let mut seen_spread = false;
    for prop in props {
        match prop {
            JsxProp::Spread(_) => seen_spread = true,
            JsxProp::Named { name, .. } if name == "key" => return seen_spread,
            JsxProp::Named { .. } => {}
        }
    }
    false
}

/// Append props (`null` without attributes) and the children, each child on
/// its own line when there is more than one.
fn create_arguments(mut args: Vec<IRNode>, props: Option<IRNode>, children: Vec<IRNode>) -> Vec<IRNode> {
    args.push(props.unwrap_or(IRNode::NullLiteral));
    push_children(&mut args, children);
    args
}

fn push_children(args: &mut Vec<IRNode>, children: Vec<IRNode>) {
    if children.len() > 1 {
        args.extend(children.into_iter().map(IRNode::on_new_line));
    } else {
        args.extend(children);
    }
}
