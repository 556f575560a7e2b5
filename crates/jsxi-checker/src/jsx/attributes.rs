//! Attributes type builder and the attribute relation checks.
//!
//! `<C a={1} {...s} b="x">kids</C>` is typed as
//! `spread(spread(spread({}, { a: 1 }), typeof s), { b: "x", children: ... })`:
//! named attributes accumulate until a spread flushes them, so neither side
//! of a spread gets reordered.

use crate::state::CheckerState;
use jsxi_binder::{Symbol, SymbolFlags, SymbolId};
use jsxi_common::Atom;
use jsxi_common::diagnostics::diagnostic_codes;
use jsxi_common::names::{escape_leading_underscores, is_hyphenated_jsx_name};
use jsxi_parser::NodeIndex;
use jsxi_solver::{
    PropertyAccessResult, PropertyInfo, TypeId, TypeKey, array_element_type, get_properties_of_type,
    get_property_of_type, get_spread_type, is_array_like, is_assignable_to, is_tuple_like,
    is_valid_spread_type, resolve_property_access,
};
use smallvec::SmallVec;
use tracing::trace;

/// One `name={value}` attribute as it went into the attributes type.
#[derive(Clone, Debug)]
pub struct ExplicitAttribute {
    pub node: NodeIndex,
    pub name_node: NodeIndex,
    pub name: String,
    pub type_id: TypeId,
    pub symbol: SymbolId,
}

/// Nested children folded into the children prop.
#[derive(Clone, Debug)]
pub struct SynthesizedChildren {
    pub prop_name: String,
    pub children: Vec<(NodeIndex, TypeId)>,
    pub type_id: TypeId,
}

/// The synthesized type of an element's attributes.
#[derive(Clone, Debug)]
pub struct JsxAttributesType {
    pub type_id: TypeId,
    pub explicit: Vec<ExplicitAttribute>,
    /// A spread of type `any` was present; the whole type is `any`.
    pub has_any_spread: bool,
    pub children: Option<SynthesizedChildren>,
}

impl<'a> CheckerState<'a> {
    /// Build the attributes type of an opening-like element. `contextual` is
    /// the expected attributes type, used to type children as a tuple when
    /// the expected children prop is one.
    pub fn create_jsx_attributes_type(
        &mut self,
        opening: NodeIndex,
        contextual: Option<TypeId>,
    ) -> JsxAttributesType {
        let arena = self.ctx.arena;
        let db = self.ctx.types;
        let children_prop = self
            .jsx_children_property_name(opening)
            .filter(|name| !name.is_empty());

        let mut spread = TypeId::EMPTY_OBJECT;
        let mut pending: Vec<PropertyInfo> = Vec::new();
        let mut to_intersect: SmallVec<[TypeId; 4]> = SmallVec::new();
        let mut explicit: Vec<ExplicitAttribute> = Vec::new();
        let mut has_any_spread = false;
        let mut explicit_children = false;

        for attr in self.jsx_attribute_nodes(opening).unwrap_or_default() {
            let Some(node) = arena.get(attr) else {
                continue;
            };
            if let Some(data) = arena.get_jsx_attribute(node) {
                let Some(name) = arena.attribute_name_text(attr) else {
                    continue;
                };
                let type_id = if data.initializer.is_none() {
                    TypeId::BOOLEAN_TRUE
                } else {
                    self.get_type_of_node(data.initializer)
                };
                let symbol = self.jsx_attribute_symbol(attr, &name);
                let atom = db.intern_string(&name);
                let prop = PropertyInfo::new(atom, type_id).with_symbol(symbol);
                match pending.iter_mut().find(|p| p.name == atom) {
                    Some(existing) => *existing = prop,
                    None => pending.push(prop),
                }
                if children_prop.as_deref() == Some(name.as_str()) {
                    explicit_children = true;
                }
                explicit.push(ExplicitAttribute {
                    node: attr,
                    name_node: data.name,
                    name,
                    type_id,
                    symbol,
                });
            } else if let Some(data) = arena.get_jsx_spread_attribute(node) {
                if !pending.is_empty() {
                    spread = get_spread_type(db, spread, db.object(std::mem::take(&mut pending)));
                }
                let expr_type = self.get_type_of_node(data.expression);
                if expr_type.is_any_like() {
                    has_any_spread = true;
                } else if is_valid_spread_type(db, expr_type) {
                    spread = get_spread_type(db, spread, expr_type);
                } else {
                    to_intersect.push(expr_type);
                }
            }
        }
        if !has_any_spread && !pending.is_empty() {
            spread = get_spread_type(db, spread, db.object(pending));
        }

        let mut children = None;
        if let Some(element) = arena.jsx_element_of_opening(opening) {
            // Any child node counts, even when only whitespace survives the
            // filtering; the prop is then an empty array.
            let has_child_nodes = !arena.jsx_children(element).is_empty();
            let child_types = self.check_jsx_children(element);
            if has_child_nodes
                && !has_any_spread
                && let Some(prop_name) = children_prop
            {
                if explicit_children {
                    let attributes_node = self.jsx_attributes_node(opening).unwrap_or(opening);
                    self.error_at_node(
                        attributes_node,
                        diagnostic_codes::ARE_SPECIFIED_TWICE_THE_ATTRIBUTE_NAMED_WILL_BE_OVERWRITTEN,
                        &[&prop_name],
                    );
                }
                let atom = db.intern_string(&prop_name);
                let contextual_children = contextual
                    .and_then(|t| get_property_of_type(db, t, atom))
                    .map(|p| db.remove_nullish(p.type_id));
                let types: Vec<TypeId> = child_types.iter().map(|&(_, t)| t).collect();
                let children_type = match types.as_slice() {
                    [single] => *single,
                    _ if contextual_children.is_some_and(|c| is_tuple_like(db, c)) => db.tuple(types),
                    _ => db.array(db.union(types)),
                };
                let symbol = self.jsx_attribute_symbol(element, &prop_name);
                let prop = PropertyInfo::new(atom, children_type).with_symbol(symbol);
                spread = get_spread_type(db, spread, db.object(vec![prop]));
                children = Some(SynthesizedChildren {
                    prop_name,
                    children: child_types,
                    type_id: children_type,
                });
            }
        }

        let type_id = if has_any_spread {
            TypeId::ANY
        } else if !to_intersect.is_empty() {
            if spread != TypeId::EMPTY_OBJECT {
                to_intersect.push(spread);
            }
            db.intersection(to_intersect.into_vec())
        } else {
            spread
        };
        trace!(opening = opening.0, type_id = type_id.0, "jsx attributes type");
        JsxAttributesType {
            type_id,
            explicit,
            has_any_spread,
            children,
        }
    }

    /// The synthesized symbol for an attribute (or for the children prop of
    /// an element), created once. Its declaration is the attribute node.
    fn jsx_attribute_symbol(&mut self, node: NodeIndex, name: &str) -> SymbolId {
        if let Some(symbol) = self.ctx.links(node).and_then(|l| l.attribute_symbol) {
            return symbol;
        }
        let mut symbol = Symbol::new(
            SymbolFlags::PROPERTY | SymbolFlags::TRANSIENT,
            escape_leading_underscores(name),
        );
        symbol.add_declaration(node);
        let id = self.ctx.transient_symbols.alloc(symbol);
        self.ctx.links_mut(node).attribute_symbol = Some(id);
        id
    }

    // =========================================================================
    // Relation checks
    // =========================================================================

    /// Whether the attributes satisfy `target`. With `report`, every
    /// offending attribute, missing property and child gets its own
    /// diagnostic.
    pub(crate) fn check_jsx_attributes_assignable(
        &mut self,
        opening: NodeIndex,
        attributes: &JsxAttributesType,
        target: TypeId,
        report: bool,
    ) -> bool {
        if target.is_any_like() || target == TypeId::UNKNOWN || attributes.type_id.is_any_like() {
            return true;
        }
        let db = self.ctx.types;
        let tag_node = self.jsx_tag_name_node(opening).unwrap_or(opening);
        let children_name = attributes.children.as_ref().map(|c| c.prop_name.as_str());
        let mut ok = true;

        for attr in &attributes.explicit {
            if children_name == Some(attr.name.as_str()) {
                continue;
            }
            let atom = db.intern_string(&attr.name);
            let expected = match resolve_property_access(db, target, atom) {
                PropertyAccessResult::Found(prop) => Some((prop.type_id, prop.optional)),
                PropertyAccessResult::FromIndexSignature(type_id) => Some((type_id, false)),
                PropertyAccessResult::IsAny => None,
                PropertyAccessResult::NotFound => {
                    if !is_hyphenated_jsx_name(&attr.name) && !self.is_known_jsx_property(target, atom) {
                        ok = false;
                        if report {
                            self.report_excess_attribute(attr.name_node, &attr.name, attributes.type_id, target);
                        }
                    }
                    None
                }
            };
            if let Some((expected, optional)) = expected {
                let accepted = if optional {
                    db.union2(expected, TypeId::UNDEFINED)
                } else {
                    expected
                };
                if !is_assignable_to(db, attr.type_id, accepted) {
                    ok = false;
                    if report {
                        self.report_type_not_assignable(attr.name_node, attr.type_id, expected);
                    }
                }
            }
        }

        if let Some(children) = &attributes.children {
            ok &= self.check_synthesized_children(tag_node, attributes.type_id, children, target, report);
        }

        if !attributes.has_any_spread {
            for prop in get_properties_of_type(db, target) {
                if prop.optional || get_property_of_type(db, attributes.type_id, prop.name).is_some() {
                    continue;
                }
                ok = false;
                if report {
                    let name = db.resolve_atom(prop.name);
                    let source_str = self.format_type(attributes.type_id);
                    let target_str = self.format_type(target);
                    self.error_at_node(
                        tag_node,
                        diagnostic_codes::PROPERTY_IS_MISSING_IN_TYPE_BUT_REQUIRED_IN_TYPE,
                        &[&name, &source_str, &target_str],
                    );
                }
            }
        }

        if ok && !is_assignable_to(db, attributes.type_id, target) {
            ok = false;
            if report {
                self.report_type_not_assignable(tag_node, attributes.type_id, target);
            }
        }
        ok
    }

    fn check_synthesized_children(
        &mut self,
        tag_node: NodeIndex,
        attributes_type: TypeId,
        children: &SynthesizedChildren,
        target: TypeId,
        report: bool,
    ) -> bool {
        let db = self.ctx.types;
        let atom = db.intern_string(&children.prop_name);
        let Some(prop) = get_property_of_type(db, target, atom) else {
            if self.is_known_jsx_property(target, atom) {
                return true;
            }
            if report {
                self.report_excess_attribute(tag_node, &children.prop_name, attributes_type, target);
            }
            return false;
        };
        let accepted = if prop.optional {
            db.union2(prop.type_id, TypeId::UNDEFINED)
        } else {
            prop.type_id
        };
        if is_assignable_to(db, children.type_id, accepted) {
            return true;
        }
        if !report {
            return false;
        }

        let expected = db.remove_nullish(prop.type_id);
        let expected_str = self.format_type(expected);
        let expects_many = is_array_like(db, expected);
        match children.children.as_slice() {
            [_, _, ..] if !expects_many => {
                self.error_at_node(
                    tag_node,
                    diagnostic_codes::THIS_JSX_TAGS_PROP_EXPECTS_A_SINGLE_CHILD_OF_TYPE_BUT_MULTIPLE_CHILDREN_WERE_PROVIDED,
                    &[&children.prop_name, &expected_str],
                );
            }
            [(_, single)] if expects_many && !is_array_like(db, *single) => {
                self.error_at_node(
                    tag_node,
                    diagnostic_codes::THIS_JSX_TAGS_PROP_EXPECTS_TYPE_WHICH_REQUIRES_MULTIPLE_CHILDREN_BUT_ONLY_A_SINGLE_CHILD_WAS_PROVIDED,
                    &[&children.prop_name, &expected_str],
                );
            }
            _ if expects_many && !is_tuple_like(db, expected) => {
                let element = array_element_type(db, expected).unwrap_or(TypeId::ANY);
                for &(child, child_type) in &children.children {
                    if !is_assignable_to(db, child_type, element) {
                        self.report_type_not_assignable(child, child_type, element);
                    }
                }
            }
            [(child, single)] => self.report_type_not_assignable(*child, *single, expected),
            _ => self.report_type_not_assignable(tag_node, children.type_id, expected),
        }
        false
    }

    /// Whether `name` is declared somewhere in `target`, so writing it is not
    /// an excess attribute.
    fn is_known_jsx_property(&self, target: TypeId, name: Atom) -> bool {
        let db = self.ctx.types;
        match db.lookup(target) {
            Some(TypeKey::Object(shape)) => shape.string_index.is_some() || shape.find_property(name).is_some(),
            Some(TypeKey::Union(members)) | Some(TypeKey::Intersection(members)) => members
                .iter()
                .any(|&member| self.is_known_jsx_property(member, name)),
            Some(TypeKey::Callable(shape)) => shape.properties.iter().any(|p| p.name == name),
            Some(TypeKey::TypeParameter(info)) => info
                .constraint
                .is_none_or(|constraint| self.is_known_jsx_property(constraint, name)),
            _ => true,
        }
    }

    // =========================================================================
    // Syntax helpers
    // =========================================================================

    pub(crate) fn jsx_tag_name_node(&self, opening: NodeIndex) -> Option<NodeIndex> {
        let arena = self.ctx.arena;
        arena
            .get(opening)
            .and_then(|node| arena.get_jsx_opening(node))
            .map(|data| data.tag_name)
    }

    pub(crate) fn jsx_attributes_node(&self, opening: NodeIndex) -> Option<NodeIndex> {
        let arena = self.ctx.arena;
        arena
            .get(opening)
            .and_then(|node| arena.get_jsx_opening(node))
            .map(|data| data.attributes)
    }

    pub(crate) fn jsx_attribute_nodes(&self, opening: NodeIndex) -> Option<Vec<NodeIndex>> {
        let arena = self.ctx.arena;
        let attributes = self.jsx_attributes_node(opening)?;
        let data = arena.get(attributes).and_then(|node| arena.get_jsx_attributes(node))?;
        Some(data.properties.nodes.clone())
    }
}
