//! JSX children.

use crate::state::CheckerState;
use jsxi_parser::NodeIndex;
use jsxi_solver::{TypeId, is_assignable_to};

impl<'a> CheckerState<'a> {
    /// Types of the children that take part in checking, in source order.
    /// Line-spanning whitespace text and empty `{}` expressions are skipped.
    pub(crate) fn check_jsx_children(&mut self, parent: NodeIndex) -> Vec<(NodeIndex, TypeId)> {
        let arena = self.ctx.arena;
        arena
            .jsx_children(parent)
            .iter()
            .copied()
            .filter(|&child| arena.is_semantic_jsx_child(child))
            .map(|child| (child, self.get_type_of_node(child)))
            .collect()
    }

    /// Check every child against a declared children type, one diagnostic
    /// per incompatible child. Text made only of whitespace is never a child
    /// here, even on a single line.
    pub(crate) fn check_jsx_children_against(&mut self, parent: NodeIndex, children_type: Option<TypeId>) {
        let Some(expected) = children_type else {
            return;
        };
        if expected.is_any_like() {
            return;
        }
        let arena = self.ctx.arena;
        let db = self.ctx.types;
        for (child, child_type) in self.check_jsx_children(parent) {
            let whitespace_text = arena
                .get(child)
                .and_then(|node| arena.get_jsx_text(node))
                .is_some_and(|text| text.text.trim().is_empty());
            if whitespace_text {
                continue;
            }
            if !is_assignable_to(db, child_type, expected) {
                self.report_type_not_assignable(child, child_type, expected);
            }
        }
    }
}
