//! Error types reported while reading XML.
//!
//! None of these abort a parse. The tokenizer hands them to its handler,
//! and the tree builder records them as `Error` nodes at the point of
//! failure.

use thiserror::Error;

/// A recoverable problem found while tokenizing XML.
///
/// The `Display` output is the message stored in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Low-level syntax error from quick-xml.
    #[error("XML syntax error: {0}")]
    Xml(String),

    /// A closing tag closed an element further up the stack.
    #[error("Unexpected close tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    /// A closing tag with no open element of that name.
    #[error("Unmatched closing tag: </{0}>")]
    UnmatchedEndTag(String),

    /// An element still open at end of input.
    #[error("Unclosed tag: <{0}>")]
    UnclosedTag(String),

    /// A `<` in text that does not start a tag.
    #[error("Unencoded '<' in text")]
    UnencodedLessThan,

    /// Non-whitespace text before or after the root element.
    #[error("Text data outside of root node")]
    TextOutsideRoot,

    /// An attribute could not be read.
    #[error("Attribute error: {0}")]
    Attribute(String),

    /// Text or attribute value with a broken entity reference.
    #[error("Invalid character reference: {0}")]
    Escape(String),
}

impl From<quick_xml::Error> for SyntaxError {
    fn from(err: quick_xml::Error) -> Self {
        SyntaxError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for SyntaxError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        SyntaxError::Attribute(err.to_string())
    }
}

/// Failure to read a textual pattern such as `Attr("id", id)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unexpected end of pattern")]
    UnexpectedEnd,

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unknown constructor `{0}`")]
    UnknownConstructor(String),

    #[error("unterminated string literal starting at offset {0}")]
    UnterminatedString(usize),

    #[error("`..` is only allowed as the last argument")]
    MisplacedRest,

    #[error("trailing input at offset {0}")]
    TrailingInput(usize),
}
