//! Traversals over a [`Tree`].
//!
//! All traversals are pre-order from the starting node (which is itself
//! visited) and never prune: a matching node's subtree is still searched.

use crate::pattern::{self, Bindings, Pattern};
use crate::position::Pos;
use crate::tree::{NodeId, Tree};

impl Tree {
    /// Every node under `from` (inclusive) for which `predicate` holds.
    pub fn collect_top_down<F>(&self, from: NodeId, mut predicate: F) -> Vec<NodeId>
    where
        F: FnMut(&Tree, NodeId) -> bool,
    {
        self.descendants(from)
            .into_iter()
            .filter(|&id| predicate(self, id))
            .collect()
    }

    /// Match a single node.
    pub fn match_node(&self, id: NodeId, pattern: &Pattern) -> Option<Bindings<'_>> {
        let mut bindings = Bindings::default();
        pattern::match_node(self, id, pattern, &mut bindings).then_some(bindings)
    }

    /// Every node under `from` (inclusive) matching `pattern`, with its
    /// bindings, in document order.
    pub fn collect_matches(&self, from: NodeId, pattern: &Pattern) -> Vec<(NodeId, Bindings<'_>)> {
        self.descendants(from)
            .into_iter()
            .filter_map(|id| self.match_node(id, pattern).map(|b| (id, b)))
            .collect()
    }

    /// Call `visitor` for each match in document order.
    ///
    /// A visitor that stores one binding overwrites it on every call, so the
    /// last match wins.
    pub fn for_each_match<'t, F>(&'t self, from: NodeId, pattern: &Pattern, mut visitor: F)
    where
        F: FnMut(&Bindings<'t>, NodeId),
    {
        for id in self.descendants(from) {
            if let Some(bindings) = self.match_node(id, pattern) {
                visitor(&bindings, id);
            }
        }
    }

    /// The innermost element whose span contains `pos`.
    pub fn element_at(&self, pos: Pos) -> Option<NodeId> {
        let mut found = None;
        let mut current = self.root();
        loop {
            let next = self.content_or_children(current).iter().copied().find(|&child| {
                self.is_element(child) && self.span(child).is_some_and(|span| span.contains(pos))
            });
            match next {
                Some(child) => {
                    found = Some(child);
                    current = child;
                }
                None => return found,
            }
        }
    }

    fn content_or_children(&self, id: NodeId) -> &[NodeId] {
        if self.is_element(id) {
            self.content(id)
        } else {
            self.children(id)
        }
    }
}
