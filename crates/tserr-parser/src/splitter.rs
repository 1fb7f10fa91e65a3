//! Splitting a diagnostic blob into individual messages.
//!
//! A message starts at every line whose first character is not whitespace.
//! Lines that start with whitespace (including blank lines) continue the
//! message above them; `tsc` uses this indentation for the chain of causes
//! that elaborates an error:
//!
//! ```text
//! Argument of type '{}' is not assignable to parameter of type 'Foo'.
//!   Property 'wow' is missing in type '{}' but required in type 'Foo'.
//! ```
//!
//! Each [`RawMessage`] spans from the start of its head line to the byte
//! before the next head line, so offsets stay relative to the whole blob.

use crate::span::Span;

/// One logical message of a diagnostic blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage<'a> {
    source: &'a str,
    span: Span,
    lines: Vec<Span>,
}

impl<'a> RawMessage<'a> {
    /// The whole blob this message was taken from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The span of the message within the blob, trailing newline included.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The text of the message.
    pub fn text(&self) -> &'a str {
        &self.source[self.span.range()]
    }

    /// Spans of the non-blank lines of the message, whitespace trimmed.
    ///
    /// The first entry is the head line; the rest are continuation lines.
    pub fn lines(&self) -> &[Span] {
        &self.lines
    }

    /// Returns `true` if the message has continuation lines.
    pub fn is_chain(&self) -> bool {
        self.lines.len() > 1
    }

    /// Each non-blank line of the message as a message of its own.
    pub fn links(&self) -> impl Iterator<Item = RawMessage<'a>> + '_ {
        self.lines.iter().map(|&line| RawMessage {
            source: self.source,
            span: line,
            lines: vec![line],
        })
    }
}

/// Lazy iterator over the messages of a blob. Created by [`split_messages`].
#[derive(Debug, Clone)]
pub struct Messages<'a> {
    source: &'a str,
    pos: usize,
}

/// Split `source` into its messages, in blob order.
pub fn split_messages(source: &str) -> Messages<'_> {
    Messages { source, pos: 0 }
}

fn starts_message(line: &str) -> bool {
    line.chars().next().is_some_and(|c| !c.is_whitespace())
}

impl<'a> Iterator for Messages<'a> {
    type Item = RawMessage<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source;
        if self.pos >= source.len() {
            return None;
        }

        let start = self.pos;
        let mut lines = Vec::new();
        while self.pos < source.len() {
            let line_start = self.pos;
            let line_end = source[line_start..]
                .find('\n')
                .map_or(source.len(), |i| line_start + i + 1);
            let line = Span::new(line_start..line_end);

            if line_start != start && starts_message(&source[line.range()]) {
                break;
            }
            self.pos = line_end;

            let content = line.trim(source);
            if !content.is_empty() {
                lines.push(content);
            }
        }

        Some(RawMessage {
            source,
            span: Span::new(start..self.pos),
            lines,
        })
    }
}

impl std::iter::FusedIterator for Messages<'_> {}
