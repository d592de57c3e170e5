//! Push-style XML events over quick-xml's pull reader.
//!
//! [`SaxReader`] drives a [`SaxHandler`] through a strict but
//! error-tolerant pass over the input: tag-balance problems are reported
//! and repaired instead of stopping the read, so a handler always sees a
//! balanced open/close sequence followed by exactly one `on_end`.

use crate::error::SyntaxError;
use crate::position::{LineCounter, Pos};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// An attribute as delivered by the tokenizer (value unescaped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A start tag with its attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// `<tag/>`; a close event follows immediately.
    pub self_closing: bool,
}

/// Receiver of tokenizer events.
///
/// Every callback gets the tokenizer's running position, which points just
/// past the token that produced the event.
pub trait SaxHandler {
    fn on_open_tag(&mut self, tag: &OpenTag, pos: Pos);

    /// Called for each attribute of a start tag, before `on_open_tag`.
    fn on_attribute(&mut self, _attr: &Attribute) {}

    fn on_text(&mut self, text: &str, pos: Pos);

    fn on_close_tag(&mut self, name: &str, pos: Pos);

    /// Comments, processing instructions, declarations and doctypes.
    fn on_skipped(&mut self, _pos: Pos) {}

    fn on_error(&mut self, error: &SyntaxError, pos: Pos);

    fn on_end(&mut self, pos: Pos);
}

/// Strict, recovering tokenizer.
pub struct SaxReader<'a> {
    reader: Reader<&'a [u8]>,
    lines: LineCounter<'a>,
    /// Names of currently open elements, innermost last.
    open: Vec<String>,
}

impl<'a> SaxReader<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.trim_text_start = false;
        config.trim_text_end = false;
        // Tag balance is tracked here so that mismatches can be repaired.
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        Self {
            reader,
            lines: LineCounter::new(source),
            open: Vec::new(),
        }
    }

    /// Feed the whole input to `handler`, then signal end of stream.
    pub fn run<H: SaxHandler>(mut self, handler: &mut H) {
        loop {
            let before = self.reader.buffer_position();

            match self.reader.read_event() {
                Ok(Event::Start(e)) => self.open_tag(&e, false, handler),
                Ok(Event::Empty(e)) => self.open_tag(&e, true, handler),
                Ok(Event::End(e)) => {
                    let name = decode(e.name().as_ref());
                    self.close_tag(&name, handler);
                }
                Ok(Event::Text(e)) => match e.unescape() {
                    Ok(text) => self.text(&text, handler),
                    Err(err) => {
                        // Reported after the text so the Text leaf keeps its start.
                        self.text(&decode(&e), handler);
                        let pos = self.here();
                        handler.on_error(&SyntaxError::Escape(err.to_string()), pos);
                    }
                },
                Ok(Event::CData(e)) => {
                    let text = decode(&e);
                    self.text(&text, handler);
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {
                    let pos = self.here();
                    handler.on_skipped(pos);
                }
                Ok(Event::Eof) => break,
                Err(err) => {
                    let pos = self.lines.advance_to(self.reader.error_position() as usize);
                    tracing::debug!(line = pos.line, col = pos.col, error = %err, "XML syntax error");
                    handler.on_error(&SyntaxError::from(err), pos);
                    if self.reader.buffer_position() == before {
                        // No progress possible; finish with what we have.
                        break;
                    }
                }
            }
        }

        let pos = self.here();
        while let Some(name) = self.open.pop() {
            handler.on_error(&SyntaxError::UnclosedTag(name.clone()), pos);
            handler.on_close_tag(&name, pos);
        }
        handler.on_end(pos);
    }

    fn here(&mut self) -> Pos {
        self.lines.advance_to(self.reader.buffer_position() as usize)
    }

    fn open_tag<H: SaxHandler>(&mut self, e: &BytesStart<'_>, self_closing: bool, handler: &mut H) {
        let name = decode(e.name().as_ref());
        if name.is_empty() {
            self.stray_less_than(&decode(e), self_closing, handler);
            return;
        }
        let mut attributes = Vec::new();
        let mut errors = Vec::new();

        let mut attrs = e.attributes();
        // Duplicate attributes are kept; consumers decide which one wins.
        attrs.with_checks(false);
        for attr in attrs {
            match attr {
                Ok(attr) => {
                    let value = match attr.unescape_value() {
                        Ok(value) => value.into_owned(),
                        Err(err) => {
                            errors.push(SyntaxError::Escape(err.to_string()));
                            decode(&attr.value)
                        }
                    };
                    attributes.push(Attribute {
                        name: decode(attr.key.as_ref()),
                        value,
                    });
                }
                Err(err) => errors.push(SyntaxError::from(err)),
            }
        }

        let pos = self.here();
        for attr in &attributes {
            handler.on_attribute(attr);
        }
        let tag = OpenTag {
            name,
            attributes,
            self_closing,
        };
        handler.on_open_tag(&tag, pos);
        for error in &errors {
            handler.on_error(error, pos);
        }

        if self_closing {
            handler.on_close_tag(&tag.name, pos);
        } else {
            self.open.push(tag.name);
        }
    }

    /// A `<` followed by whitespace is text, not a tag.
    ///
    /// quick-xml has already consumed everything up to the next `>`, so a
    /// close tag caught in that run (`a < b</target>`) is replayed.
    fn stray_less_than<H: SaxHandler>(
        &mut self,
        raw: &str,
        self_closing: bool,
        handler: &mut H,
    ) {
        let (text, closing) = match raw.find("</") {
            Some(i) if !self_closing => {
                (format!("<{}", &raw[..i]), Some(raw[i + 2..].trim_end()))
            }
            _ => {
                let end = if self_closing { "/>" } else { ">" };
                (format!("<{raw}{end}"), None)
            }
        };

        self.text(&text, handler);
        let pos = self.here();
        handler.on_error(&SyntaxError::UnencodedLessThan, pos);
        if let Some(name) = closing {
            self.close_tag(name, handler);
        }
    }

    fn close_tag<H: SaxHandler>(&mut self, name: &str, handler: &mut H) {
        let pos = self.here();
        match self.open.iter().rposition(|open| open == name) {
            Some(index) => {
                if let Some(innermost) = self.open.last().filter(|_| index + 1 != self.open.len()) {
                    let error = SyntaxError::MismatchedEndTag {
                        expected: innermost.clone(),
                        found: name.to_string(),
                    };
                    handler.on_error(&error, pos);
                }
                while self.open.len() > index {
                    if let Some(closed) = self.open.pop() {
                        handler.on_close_tag(&closed, pos);
                    }
                }
            }
            None => handler.on_error(&SyntaxError::UnmatchedEndTag(name.to_string()), pos),
        }
    }

    fn text<H: SaxHandler>(&mut self, text: &str, handler: &mut H) {
        let pos = self.here();
        if self.open.is_empty() && !text.trim().is_empty() {
            handler.on_error(&SyntaxError::TextOutsideRoot, pos);
        }
        handler.on_text(text, pos);
    }
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
