//! Assembles a [`Tree`] from tokenizer events.

use crate::error::SyntaxError;
use crate::position::{NodePos, Pos, PositionTracker, Span};
use crate::sax::{OpenTag, SaxHandler};
use crate::tree::{Node, NodeId, NodeKind, Tree};

/// Elements whose direct text content is kept in the tree.
const TEXT_ELEMENTS: &[&str] = &["source", "target"];

/// Tree builder state.
///
/// `stack` holds one in-progress child list per open element, with the
/// document-level list at the bottom.
pub struct TreeBuilder {
    nodes: Vec<Node>,
    stack: Vec<Vec<NodeId>>,
    tracker: PositionTracker,
    capture_text: bool,
    tree: Option<Tree>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            stack: vec![Vec::new()],
            tracker: PositionTracker::new(),
            capture_text: false,
            tree: None,
        }
    }

    /// The finished tree. Finalizes now if `on_end` was never delivered.
    pub fn into_tree(mut self) -> Tree {
        match self.tree.take() {
            Some(tree) => tree,
            None => self.build(),
        }
    }

    fn alloc(&mut self, kind: NodeKind, children: Vec<NodeId>, pos: Option<NodePos>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(kind, children, pos));
        id
    }

    /// Wrap the document-level list and assign parent links.
    ///
    /// The reader closes every open element before ending, so only the
    /// bottom list is left; anything above it is dropped.
    fn build(&mut self) -> Tree {
        let mut stack = std::mem::take(&mut self.stack);
        let top_level = if stack.is_empty() {
            Vec::new()
        } else {
            stack.swap_remove(0)
        };
        let root = self.alloc(NodeKind::Document, top_level, None);
        let nodes = std::mem::take(&mut self.nodes);
        Tree::finalize(nodes, root)
    }

    fn top(&mut self) -> &mut Vec<NodeId> {
        if self.stack.is_empty() {
            self.stack.push(Vec::new());
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

impl SaxHandler for TreeBuilder {
    fn on_open_tag(&mut self, tag: &OpenTag, pos: Pos) {
        let start = self.tracker.bump(pos);
        let name = self.alloc(
            NodeKind::Name(tag.name.clone()),
            Vec::new(),
            Some(NodePos::Point(start)),
        );

        let attrs: Vec<NodeId> = tag
            .attributes
            .iter()
            .map(|attr| {
                self.alloc(
                    NodeKind::Attr {
                        name: attr.name.clone(),
                        value: attr.value.clone(),
                    },
                    Vec::new(),
                    None,
                )
            })
            .collect();
        let attributes = self.alloc(NodeKind::Attributes, attrs, None);

        self.stack.push(vec![name, attributes]);
        self.capture_text = TEXT_ELEMENTS.contains(&tag.name.as_str());
    }

    fn on_text(&mut self, text: &str, pos: Pos) {
        let start = self.tracker.bump(pos);
        if self.capture_text {
            let node = self.alloc(
                NodeKind::Text(text.to_string()),
                Vec::new(),
                Some(NodePos::Point(start)),
            );
            self.top().push(node);
        }
    }

    fn on_close_tag(&mut self, name: &str, pos: Pos) {
        if self.stack.len() < 2 {
            tracing::debug!(name, "close tag without an open element");
            return;
        }
        let children = self.stack.pop().unwrap_or_default();
        self.capture_text = false;

        let open = children
            .first()
            .and_then(|&n| self.nodes[n.index()].pos)
            .map_or(pos, |p| p.start());
        let element = self.alloc(
            NodeKind::Element,
            children,
            Some(NodePos::Span(Span::new(open, pos))),
        );
        self.tracker.bump(pos);
        self.top().push(element);
    }

    fn on_skipped(&mut self, pos: Pos) {
        self.tracker.bump(pos);
    }

    fn on_error(&mut self, error: &SyntaxError, pos: Pos) {
        let already_reported = self
            .stack
            .last()
            .and_then(|top| top.last())
            .is_some_and(|&last| matches!(self.nodes[last.index()].kind, NodeKind::Error(_)));
        if already_reported {
            return;
        }

        let at = self.tracker.bump(pos);
        let node = self.alloc(
            NodeKind::Error(error.to_string()),
            Vec::new(),
            Some(NodePos::Point(at)),
        );
        self.top().push(node);
    }

    fn on_end(&mut self, _pos: Pos) {
        let tree = self.build();
        self.tree = Some(tree);
    }
}
