//! Reverse template matching.
//!
//! Given a concrete message, the [`Matcher`] recovers which [`Template`]
//! produced it and the text that filled each placeholder.
//!
//! # Algorithm
//!
//! Matching walks the template's [`Segment`]s left to right with a single
//! cursor into the message:
//!
//! - A literal that directly follows another literal (or opens the
//!   template) must appear exactly at the cursor.
//! - A literal that follows a placeholder is searched for from the cursor;
//!   its **first** occurrence closes the placeholder. Type signatures
//!   legitimately repeat punctuation such as `'` and `.`, so this tie-break
//!   is part of the contract: placeholder text is never assumed to be free
//!   of delimiter characters, and the scan never backtracks.
//! - A placeholder that ends the template takes the rest of the message.
//! - The template matches only if the cursor lands exactly on the end of
//!   the message.
//!
//! Templates are tried most specific first (more placeholders, then more
//! literal text, then lower code), and the first hit wins. This keeps a
//! short template such as `Property '{0}' is missing in type '{1}'.` from
//! shadowing `Property '{0}' is missing in type '{1}' but required in type
//! '{2}'.`, which it would otherwise swallow.

use std::cmp::Reverse;

use log::trace;

use crate::{
    registry::TemplateRegistry,
    span::Span,
    splitter::RawMessage,
    template::{Segment, Template},
};

/// Text that filled one placeholder, with its position in the blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    text: String,
    span: Span,
}

impl Capture {
    /// The captured text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Absolute span of the captured text.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// A successful match of a message against a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'r> {
    template: &'r Template,
    captures: Vec<Capture>,
    span: Span,
}

impl<'r> MatchResult<'r> {
    /// The matched template.
    pub fn template(&self) -> &'r Template {
        self.template
    }

    /// Diagnostic code of the matched template.
    pub fn code(&self) -> u32 {
        self.template.code()
    }

    /// Captures ordered by placeholder index; `captures()[i]` filled `{i}`.
    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    /// Captured texts ordered by placeholder index.
    pub fn items(&self) -> Vec<String> {
        self.captures.iter().map(|c| c.text.clone()).collect()
    }

    /// Absolute span of the matched message, surrounding whitespace excluded.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// Matches messages against a [`TemplateRegistry`].
#[derive(Debug, Clone)]
pub struct Matcher<'r> {
    order: Vec<&'r Template>,
}

impl<'r> Matcher<'r> {
    /// Create a matcher over every template in `registry`.
    pub fn new(registry: &'r TemplateRegistry) -> Self {
        let mut order: Vec<&'r Template> = registry.all().collect();
        order.sort_by_key(|t| (Reverse(t.arity()), Reverse(t.literal_len()), t.code()));
        Self { order }
    }

    /// Match a whole message.
    ///
    /// Returns `None` if no template accounts for the entire message.
    pub fn match_message(&self, message: &RawMessage<'_>) -> Option<MatchResult<'r>> {
        let source = message.source();
        let window = message.span().trim(source);
        if window.is_empty() {
            return None;
        }

        let found = self.order.iter().find_map(|&template| {
            match_template(template, source, window).map(|captures| MatchResult {
                template,
                captures,
                span: window,
            })
        });

        match &found {
            Some(result) => trace!(code = result.code(), span = result.span().to_string(); "Message matched"),
            None => trace!(span = window.to_string(); "No template matched message"),
        }
        found
    }
}

/// Scanning state for one template against one window.
struct Scan<'s> {
    source: &'s str,
    cursor: usize,
    end: usize,
    pending: Option<usize>,
    captures: Vec<Option<Capture>>,
}

impl Scan<'_> {
    /// Record `span` as the text of placeholder `index`.
    ///
    /// A recurring placeholder must capture the same text every time.
    fn fill(&mut self, index: usize, span: Span) -> Option<()> {
        let source = self.source;
        let text = &source[span.range()];
        if let Some(existing) = &self.captures[index] {
            return (existing.text == text).then_some(());
        }
        self.captures[index] = Some(Capture {
            text: text.to_string(),
            span,
        });
        Some(())
    }

    fn literal(&mut self, literal: &str) -> Option<()> {
        let rest = &self.source[self.cursor..self.end];
        let at = match self.pending.take() {
            None => rest.starts_with(literal).then_some(self.cursor)?,
            Some(index) => {
                let at = self.cursor + rest.find(literal)?;
                self.fill(index, Span::new(self.cursor..at))?;
                at
            }
        };
        self.cursor = at + literal.len();
        Some(())
    }

    fn placeholder(&mut self, index: usize) -> Option<()> {
        // Two adjacent placeholders: the first one captures nothing.
        if let Some(previous) = self.pending.replace(index) {
            self.fill(previous, Span::new(self.cursor..self.cursor))?;
        }
        Some(())
    }

    fn finish(mut self) -> Option<Vec<Capture>> {
        if let Some(index) = self.pending.take() {
            self.fill(index, Span::new(self.cursor..self.end))?;
            self.cursor = self.end;
        }
        if self.cursor != self.end {
            return None;
        }
        self.captures.into_iter().collect()
    }
}

/// Match one template against `source[window]`.
///
/// Returns the captures ordered by placeholder index, or `None` if the
/// template does not account for the whole window.
pub fn match_template(template: &Template, source: &str, window: Span) -> Option<Vec<Capture>> {
    let mut scan = Scan {
        source,
        cursor: window.start(),
        end: window.end(),
        pending: None,
        captures: vec![None; template.arity()],
    };

    for segment in template.segments() {
        match segment {
            Segment::Literal(text) => scan.literal(text)?,
            Segment::Placeholder(index) => scan.placeholder(*index)?,
        }
    }
    scan.finish()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::{prelude::*, test_runner::TestCaseError};

    use super::*;
    use crate::splitter::split_messages;

    /// Templates whose literals after a placeholder never start with an
    /// alphanumeric character, so alphanumeric items cannot collide.
    const ROUND_TRIP_TEMPLATES: &[(u32, &str)] = &[
        (2304, "Cannot find name '{0}'."),
        (2322, "Type '{0}' is not assignable to type '{1}'."),
        (2554, "Expected {0} arguments, but got {1}."),
        (
            2741,
            "Property '{0}' is missing in type '{1}' but required in type '{2}'.",
        ),
        (2693, "'{0}' only refers to a type, but is being used as a value here."),
        (
            6500,
            "The expected type comes from property '{0}' which is declared here on type '{1}'",
        ),
    ];

    fn item_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_]{1,12}"
    }

    fn check_round_trip(index: usize, items: &[String], indent: &str) -> Result<(), TestCaseError> {
        let (code, pattern) = ROUND_TRIP_TEMPLATES[index];
        let template = Template::new(code, pattern).unwrap();
        let items = &items[..template.arity()];
        let message = template.render(items);
        let source = format!("{indent}{message}\n");

        let registry = TemplateRegistry::from_templates([template]);
        let matcher = Matcher::new(&registry);
        let result = split_messages(&source)
            .next()
            .and_then(|message| matcher.match_message(&message));

        prop_assert!(result.is_some(), "`{source}` did not match `{pattern}`");
        let result = result.unwrap();
        prop_assert_eq!(result.code(), code);
        prop_assert_eq!(result.items(), items.to_vec());
        prop_assert_eq!(&source[result.span().range()], message.as_str());
        for capture in result.captures() {
            prop_assert_eq!(&source[capture.span().range()], capture.text());
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn rendered_messages_round_trip(
            index in 0..ROUND_TRIP_TEMPLATES.len(),
            items in prop::collection::vec(item_strategy(), 3),
            indent in "[ \t]{0,4}",
        ) {
            check_round_trip(index, &items, &indent)?;
        }
    }
}
