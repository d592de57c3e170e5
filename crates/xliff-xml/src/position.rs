//! Line/column bookkeeping for tree nodes.

/// A point in the source text (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in characters not bytes)
    pub col: usize,
}

impl Pos {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Extent of an element, from its start tag to the end of its close tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    /// Start inclusive, end exclusive.
    pub fn contains(&self, pos: Pos) -> bool {
        self.start <= pos && pos < self.end
    }
}

/// Position annotation carried by a node.
///
/// Elements record a [`Span`]; leaves (names, text, errors) record the
/// point where they start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodePos {
    Point(Pos),
    Span(Span),
}

impl NodePos {
    pub fn start(&self) -> Pos {
        match self {
            NodePos::Point(pos) => *pos,
            NodePos::Span(span) => span.start,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            NodePos::Span(span) => Some(*span),
            NodePos::Point(_) => None,
        }
    }
}

/// The "last committed position" cursor.
///
/// A node's start is the position right after the previous token boundary,
/// not the tokenizer position when the node is built (which already points
/// past the token).
#[derive(Debug, Default)]
pub struct PositionTracker {
    committed: Pos,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the committed position and advance the cursor to `current`.
    pub fn bump(&mut self, current: Pos) -> Pos {
        std::mem::replace(&mut self.committed, current)
    }
}

/// Running line/column counters driven by monotonically increasing byte
/// offsets into the source.
#[derive(Debug)]
pub(crate) struct LineCounter<'a> {
    source: &'a str,
    offset: usize,
    pos: Pos,
}

impl<'a> LineCounter<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            pos: Pos::default(),
        }
    }

    /// Advance the counters to `offset` and return the position there.
    ///
    /// Offsets behind the current one leave the counters untouched.
    pub(crate) fn advance_to(&mut self, offset: usize) -> Pos {
        let offset = offset.min(self.source.len());
        if offset <= self.offset {
            return self.pos;
        }

        let chunk = self.source.get(self.offset..offset).unwrap_or_default();
        for ch in chunk.chars() {
            if ch == '\n' {
                self.pos.line += 1;
                self.pos.col = 0;
            } else {
                self.pos.col += 1;
            }
        }
        self.offset = offset;
        self.pos
    }
}
