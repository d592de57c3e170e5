//! Structural patterns over tree nodes.
//!
//! A [`Pattern`] mirrors the shape of a node: a constructor name with
//! argument patterns, string literals, capture variables, `_` and a
//! trailing `..` that accepts any remaining children. Patterns can be
//! built directly or read from text:
//!
//! ```rust
//! use xliff_xml::Pattern;
//!
//! let p: Pattern = r#"Element(Name("trans-unit"), ..)"#.parse().unwrap();
//! assert_eq!(p.to_string(), r#"Element(Name("trans-unit"), ..)"#);
//! ```

use crate::error::PatternError;
use crate::tree::{NodeId, NodeKind, Tree};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Node constructors a pattern can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cons {
    Document,
    Element,
    Name,
    Attributes,
    Attr,
    Text,
    Error,
}

impl Cons {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Document" => Cons::Document,
            "Element" => Cons::Element,
            "Name" => Cons::Name,
            "Attributes" => Cons::Attributes,
            "Attr" => Cons::Attr,
            "Text" => Cons::Text,
            "Error" => Cons::Error,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Cons::Document => "Document",
            Cons::Element => "Element",
            Cons::Name => "Name",
            Cons::Attributes => "Attributes",
            Cons::Attr => "Attr",
            Cons::Text => "Text",
            Cons::Error => "Error",
        }
    }

    fn matches(self, kind: &NodeKind) -> bool {
        self.as_str() == kind.cons()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// `_`: matches anything, binds nothing.
    Wildcard,
    /// `..`: as last argument, matches any remaining children.
    Rest,
    /// Lowercase identifier: matches anything and binds it.
    Var(String),
    /// `"literal"`: matches a string payload exactly.
    Str(String),
    Cons(Cons, Vec<Pattern>),
}

impl Pattern {
    /// Read a pattern from its textual form.
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let mut reader = PatternReader { text, offset: 0 };
        let pattern = reader.pattern()?;
        reader.skip_ws();
        if reader.offset < text.len() {
            return Err(PatternError::TrailingInput(reader.offset));
        }
        Ok(pattern)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Pattern::Var(name.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Pattern::Str(value.into())
    }

    /// `Element(Name("<tag>"), ..)`
    pub fn element(tag: &str) -> Self {
        Pattern::Cons(
            Cons::Element,
            vec![Pattern::Cons(Cons::Name, vec![Pattern::str(tag)]), Pattern::Rest],
        )
    }

    /// `Attr("<name>", value)`
    pub fn attr(name: &str, value: Pattern) -> Self {
        Pattern::Cons(Cons::Attr, vec![Pattern::str(name), value])
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => write!(f, "_"),
            Pattern::Rest => write!(f, ".."),
            Pattern::Var(name) => write!(f, "{name}"),
            Pattern::Str(value) => {
                write!(f, "\"")?;
                for ch in value.chars() {
                    if matches!(ch, '"' | '\\') {
                        write!(f, "\\")?;
                    }
                    write!(f, "{ch}")?;
                }
                write!(f, "\"")
            }
            Pattern::Cons(cons, args) => {
                write!(f, "{}(", cons.as_str())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A value captured by a pattern variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding<'t> {
    /// A string payload (tag name, attribute name or value, text, message).
    Str(&'t str),
    /// A whole subtree.
    Node(NodeId),
}

/// Variable name to captured value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings<'t> {
    values: HashMap<String, Binding<'t>>,
}

impl<'t> Bindings<'t> {
    pub fn get(&self, name: &str) -> Option<Binding<'t>> {
        self.values.get(name).copied()
    }

    /// A captured string payload.
    pub fn str(&self, name: &str) -> Option<&'t str> {
        match self.get(name)? {
            Binding::Str(s) => Some(s),
            Binding::Node(_) => None,
        }
    }

    /// A captured subtree.
    pub fn node(&self, name: &str) -> Option<NodeId> {
        match self.get(name)? {
            Binding::Node(id) => Some(id),
            Binding::Str(_) => None,
        }
    }

    fn bind(&mut self, name: &str, value: Binding<'t>) {
        self.values.insert(name.to_string(), value);
    }
}

/// Match `pattern` against node `id`, collecting bindings.
pub(crate) fn match_node<'t>(
    tree: &'t Tree,
    id: NodeId,
    pattern: &Pattern,
    bindings: &mut Bindings<'t>,
) -> bool {
    match pattern {
        Pattern::Wildcard => true,
        Pattern::Rest => false,
        Pattern::Var(name) => {
            bindings.bind(name, Binding::Node(id));
            true
        }
        Pattern::Str(literal) => tree.value(id) == Some(literal.as_str()),
        Pattern::Cons(cons, args) => {
            let kind = tree.kind(id);
            if !cons.matches(kind) {
                return false;
            }
            match kind {
                NodeKind::Name(s) | NodeKind::Text(s) | NodeKind::Error(s) => {
                    args.len() == 1 && match_str(s, &args[0], bindings)
                }
                NodeKind::Attr { name, value } => {
                    args.len() == 2
                        && match_str(name, &args[0], bindings)
                        && match_str(value, &args[1], bindings)
                }
                NodeKind::Document | NodeKind::Element | NodeKind::Attributes => {
                    match_children(tree, tree.children(id), args, bindings)
                }
            }
        }
    }
}

fn match_str<'t>(value: &'t str, pattern: &Pattern, bindings: &mut Bindings<'t>) -> bool {
    match pattern {
        Pattern::Wildcard => true,
        Pattern::Var(name) => {
            bindings.bind(name, Binding::Str(value));
            true
        }
        Pattern::Str(literal) => literal == value,
        Pattern::Rest | Pattern::Cons(..) => false,
    }
}

fn match_children<'t>(
    tree: &'t Tree,
    children: &[NodeId],
    args: &[Pattern],
    bindings: &mut Bindings<'t>,
) -> bool {
    let (args, open_ended) = match args.split_last() {
        Some((Pattern::Rest, head)) => (head, true),
        _ => (args, false),
    };
    if children.len() < args.len() || (!open_ended && children.len() != args.len()) {
        return false;
    }
    children
        .iter()
        .zip(args)
        .all(|(&child, arg)| match_node(tree, child, arg, bindings))
}

struct PatternReader<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> PatternReader<'a> {
    fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek().filter(|c| c.is_whitespace()) {
            self.offset += ch.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), PatternError> {
        self.skip_ws();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.offset += ch.len_utf8();
                Ok(())
            }
            Some(found) => Err(PatternError::UnexpectedChar {
                found,
                offset: self.offset,
            }),
            None => Err(PatternError::UnexpectedEnd),
        }
    }

    fn pattern(&mut self) -> Result<Pattern, PatternError> {
        self.skip_ws();
        match self.peek() {
            None => Err(PatternError::UnexpectedEnd),
            Some('"') => self.string().map(Pattern::Str),
            Some('.') => {
                self.expect('.')?;
                self.expect('.')?;
                Ok(Pattern::Rest)
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let ident = self.ident();
                if ident == "_" {
                    return Ok(Pattern::Wildcard);
                }
                if !ident.starts_with(|c: char| c.is_uppercase()) {
                    return Ok(Pattern::Var(ident.to_string()));
                }
                let cons = Cons::from_name(ident)
                    .ok_or_else(|| PatternError::UnknownConstructor(ident.to_string()))?;
                self.skip_ws();
                let args = if self.peek() == Some('(') {
                    self.args()?
                } else {
                    Vec::new()
                };
                Ok(Pattern::Cons(cons, args))
            }
            Some(found) => Err(PatternError::UnexpectedChar {
                found,
                offset: self.offset,
            }),
        }
    }

    fn args(&mut self) -> Result<Vec<Pattern>, PatternError> {
        self.expect('(')?;
        let mut args = Vec::new();
        self.skip_ws();
        if self.peek() == Some(')') {
            self.offset += 1;
            return Ok(args);
        }
        loop {
            let arg = self.pattern()?;
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    if arg == Pattern::Rest {
                        return Err(PatternError::MisplacedRest);
                    }
                    self.offset += 1;
                    args.push(arg);
                }
                Some(')') => {
                    self.offset += 1;
                    args.push(arg);
                    return Ok(args);
                }
                Some(found) => {
                    return Err(PatternError::UnexpectedChar {
                        found,
                        offset: self.offset,
                    });
                }
                None => return Err(PatternError::UnexpectedEnd),
            }
        }
    }

    fn ident(&mut self) -> &'a str {
        let text = self.text;
        let start = self.offset;
        while let Some(ch) = self
            .peek()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        {
            self.offset += ch.len_utf8();
        }
        &text[start..self.offset]
    }

    fn string(&mut self) -> Result<String, PatternError> {
        let start = self.offset;
        self.offset += 1;
        let mut value = String::new();
        let mut chars = self.text[self.offset..].char_indices();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '"' => {
                    self.offset += i + 1;
                    return Ok(value);
                }
                '\\' => match chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                _ => value.push(ch),
            }
        }
        Err(PatternError::UnterminatedString(start))
    }
}
