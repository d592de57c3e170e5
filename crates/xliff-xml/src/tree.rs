//! The parsed tree: an arena of nodes addressed by [`NodeId`].
//!
//! Parents own their children through the child id lists. Parent links are
//! a separate, optional lookup filled in once when the tree is finalized.

use crate::position::{NodePos, Pos, Span};

/// Index of a node in its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node is, plus its scalar payload for leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root; children are top-level elements and errors.
    Document,
    /// Children are always `[Name, Attributes, ..content]`.
    Element,
    Name(String),
    /// Children are `Attr` nodes in source order.
    Attributes,
    Attr { name: String, value: String },
    Text(String),
    Error(String),
}

impl NodeKind {
    /// Constructor name, as written in patterns.
    pub fn cons(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Element => "Element",
            NodeKind::Name(_) => "Name",
            NodeKind::Attributes => "Attributes",
            NodeKind::Attr { .. } => "Attr",
            NodeKind::Text(_) => "Text",
            NodeKind::Error(_) => "Error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
    pub pos: Option<NodePos>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, children: Vec<NodeId>, pos: Option<NodePos>) -> Self {
        Self {
            kind,
            children,
            pos,
            parent: None,
        }
    }
}

/// An immutable, parent-linked tree.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Take ownership of built nodes and assign parent links in one walk.
    pub(crate) fn finalize(mut nodes: Vec<Node>, root: NodeId) -> Self {
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            let children = nodes[id.index()].children.clone();
            for child in children {
                nodes[child.index()].parent = Some(id);
                pending.push(child);
            }
        }
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Parent, grandparent, and so on up to the document.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    pub fn pos(&self, id: NodeId) -> Option<NodePos> {
        self.node(id).pos
    }

    /// Start position of a node, for elements and positioned leaves.
    pub fn start(&self, id: NodeId) -> Option<Pos> {
        self.pos(id).map(|p| p.start())
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.pos(id).and_then(|p| p.span())
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Element)
    }

    /// Tag name of an element.
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        if !self.is_element(id) {
            return None;
        }
        match self.children(id).first().map(|&n| self.kind(n)) {
            Some(NodeKind::Name(name)) => Some(name),
            _ => None,
        }
    }

    /// Attribute list node of an element.
    pub fn attributes_node(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_element(id) {
            return None;
        }
        self.children(id)
            .get(1)
            .copied()
            .filter(|&n| matches!(self.kind(n), NodeKind::Attributes))
    }

    /// `(name, value)` pairs of an element in source order.
    pub fn attributes(&self, id: NodeId) -> Vec<(&str, &str)> {
        let Some(list) = self.attributes_node(id) else {
            return Vec::new();
        };
        self.children(list)
            .iter()
            .filter_map(|&attr| match self.kind(attr) {
                NodeKind::Attr { name, value } => Some((name.as_str(), value.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Children after the fixed `[Name, Attributes]` prefix.
    pub fn content(&self, id: NodeId) -> &[NodeId] {
        let children = self.children(id);
        if self.is_element(id) {
            children.get(2..).unwrap_or_default()
        } else {
            children
        }
    }

    /// Scalar payload of a leaf (`Name`, `Text`, `Error`, or an `Attr` value).
    pub fn value(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Name(s) | NodeKind::Text(s) | NodeKind::Error(s) => Some(s),
            NodeKind::Attr { value, .. } => Some(value),
            _ => None,
        }
    }

    /// All node ids in document order (pre-order from the root).
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut pending = vec![from];
        while let Some(id) = pending.pop() {
            out.push(id);
            pending.extend(self.children(id).iter().rev());
        }
        out
    }
}
