//! Diagnostic templates and their pattern grammar.
//!
//! A template pattern is literal text interleaved with positional
//! placeholders `{0}`, `{1}`, ... . The pattern is split once, at
//! construction, into a sequence of [`Segment`]s that the
//! [`Matcher`](crate::Matcher) walks left to right.
//!
//! A `{` that does not open a `{N}` placeholder is ordinary literal text, so
//! patterns such as `'{' expected.` are accepted as they are written.

use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, delimited, repeat},
    error::ModalResult,
    token::take_till,
};

use crate::{category::Category, error::TemplateError};

/// Upper bound on placeholder indices accepted in a pattern.
const MAX_PLACEHOLDER_INDEX: usize = 31;

/// One piece of a template pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text that must appear verbatim in a matching message.
    Literal(String),
    /// Slot `{N}`, filled by arbitrary text in a matching message.
    Placeholder(usize),
}

/// A diagnostic message template keyed by its numeric code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    code: u32,
    category: Category,
    pattern: String,
    segments: Vec<Segment>,
    arity: usize,
    literal_len: usize,
}

impl Template {
    /// Create a template from a code and a pattern string.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the pattern cannot be split into
    /// segments, or if its placeholder indices are not contiguous from `{0}`.
    pub fn new(code: u32, pattern: impl Into<String>) -> Result<Self, TemplateError> {
        let pattern = pattern.into();
        let segments = split_pattern(code, &pattern)?;

        let mut seen = [false; MAX_PLACEHOLDER_INDEX + 1];
        let mut arity = 0;
        let mut literal_len = 0;
        for segment in &segments {
            match segment {
                Segment::Literal(text) => literal_len += text.len(),
                Segment::Placeholder(index) => {
                    if *index > MAX_PLACEHOLDER_INDEX {
                        return Err(TemplateError::IndexTooLarge {
                            code,
                            index: *index,
                        });
                    }
                    seen[*index] = true;
                    arity = arity.max(index + 1);
                }
            }
        }
        if let Some(missing) = seen[..arity].iter().position(|&found| !found) {
            return Err(TemplateError::NonContiguous { code, missing });
        }

        Ok(Self {
            code,
            category: Category::default(),
            pattern,
            segments,
            arity,
            literal_len,
        })
    }

    /// Set the template category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Returns the numeric diagnostic code.
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Returns the diagnostic category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the pattern with its placeholders intact.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the pattern split into literal and placeholder segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of distinct placeholders.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the total byte length of the literal segments.
    pub fn literal_len(&self) -> usize {
        self.literal_len
    }

    /// Substitute `items[i]` for every `{i}` in the pattern.
    ///
    /// Placeholders without a corresponding item are left as written.
    pub fn render<S: AsRef<str>>(&self, items: &[S]) -> String {
        let mut out = String::with_capacity(self.pattern.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(index) => match items.get(*index) {
                    Some(item) => out.push_str(item.as_ref()),
                    None => {
                        out.push('{');
                        out.push_str(&index.to_string());
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

/// A raw piece borrowed from the pattern, before adjacent literals merge.
enum Piece<'a> {
    Literal(&'a str),
    Placeholder(usize),
}

fn placeholder<'a>(input: &mut &'a str) -> ModalResult<Piece<'a>> {
    delimited('{', digit1.try_map(str::parse::<usize>), '}')
        .map(Piece::Placeholder)
        .parse_next(input)
}

fn literal_run<'a>(input: &mut &'a str) -> ModalResult<Piece<'a>> {
    take_till(1.., '{').map(Piece::Literal).parse_next(input)
}

fn lone_brace<'a>(input: &mut &'a str) -> ModalResult<Piece<'a>> {
    "{".map(Piece::Literal).parse_next(input)
}

fn pieces<'a>(input: &mut &'a str) -> ModalResult<Vec<Piece<'a>>> {
    repeat(0.., alt((placeholder, literal_run, lone_brace))).parse_next(input)
}

fn split_pattern(code: u32, pattern: &str) -> Result<Vec<Segment>, TemplateError> {
    let pieces = pieces.parse(pattern).map_err(|err| TemplateError::Malformed {
        code,
        reason: format!("at offset {}: {}", err.offset(), err.inner()),
    })?;

    let mut segments: Vec<Segment> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match (piece, segments.last_mut()) {
            (Piece::Literal(text), Some(Segment::Literal(prev))) => prev.push_str(text),
            (Piece::Literal(text), _) => segments.push(Segment::Literal(text.to_string())),
            (Piece::Placeholder(index), _) => segments.push(Segment::Placeholder(index)),
        }
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(text: &str) -> Segment {
        Segment::Literal(text.to_string())
    }

    #[test]
    fn test_split_two_placeholders() {
        let template = Template::new(2322, "Type '{0}' is not assignable to type '{1}'.").unwrap();
        assert_eq!(
            template.segments(),
            &[
                lit("Type '"),
                Segment::Placeholder(0),
                lit("' is not assignable to type '"),
                Segment::Placeholder(1),
                lit("'."),
            ]
        );
        assert_eq!(template.arity(), 2);
        assert_eq!(template.literal_len(), "Type '' is not assignable to type ''.".len());
    }

    #[test]
    fn test_no_placeholders() {
        let template = Template::new(2532, "Object is possibly 'undefined'.").unwrap();
        assert_eq!(template.segments(), &[lit("Object is possibly 'undefined'.")]);
        assert_eq!(template.arity(), 0);
    }

    #[test]
    fn test_lone_brace_is_literal() {
        let template = Template::new(1005, "'{' expected.").unwrap();
        assert_eq!(template.segments(), &[lit("'{' expected.")]);
        assert_eq!(template.arity(), 0);
    }

    #[test]
    fn test_unclosed_placeholder_leaves_gap() {
        let err = Template::new(9999, "Value {0 and {1}.").unwrap_err();
        assert_eq!(
            err,
            TemplateError::NonContiguous {
                code: 9999,
                missing: 0
            }
        );
    }

    #[test]
    fn test_leading_placeholder() {
        let template = Template::new(2693, "{0} only refers to a type.").unwrap();
        assert_eq!(
            template.segments(),
            &[Segment::Placeholder(0), lit(" only refers to a type.")]
        );
    }

    #[test]
    fn test_repeated_placeholder() {
        let template = Template::new(
            2344,
            "'{0}' is assignable to the constraint of type '{1}', but '{1}' could be instantiated with a different subtype of constraint '{2}'.",
        )
        .unwrap();
        assert_eq!(template.arity(), 3);
    }

    #[test]
    fn test_non_contiguous_rejected() {
        let err = Template::new(1, "A '{0}' and '{2}'.").unwrap_err();
        assert_eq!(err, TemplateError::NonContiguous { code: 1, missing: 1 });
    }

    #[test]
    fn test_index_too_large() {
        let err = Template::new(1, "A '{99}'.").unwrap_err();
        assert_eq!(err, TemplateError::IndexTooLarge { code: 1, index: 99 });
    }

    #[test]
    fn test_render() {
        let template = Template::new(2322, "Type '{0}' is not assignable to type '{1}'.").unwrap();
        assert_eq!(
            template.render(&["string", "number"]),
            "Type 'string' is not assignable to type 'number'."
        );
        assert_eq!(
            template.render(&["string"]),
            "Type 'string' is not assignable to type '{1}'."
        );
    }

    #[test]
    fn test_with_category() {
        let template = Template::new(6500, "The expected type comes from here.")
            .unwrap()
            .with_category(Category::Message);
        assert_eq!(template.category(), Category::Message);
    }
}
