//! tserr - Structured TypeScript compiler diagnostics.
//!
//! Turns raw `tsc` diagnostic text into records holding the diagnostic code,
//! the message template, the values interpolated into the template, and an
//! optional human-authored explanation of the error.
//!
//! # Example
//!
//! ```
//! use tserr::{config::ParseOptions, parse_errors};
//!
//! let errors = parse_errors(
//!     "Property 'wow' is missing in type '{}' but required in type '{ wow: number; }'.",
//!     &ParseOptions::default(),
//! );
//!
//! assert_eq!(errors[0].code(), 2741);
//! assert_eq!(errors[0].parse_info().items(), ["wow", "{}", "{ wow: number; }"]);
//! ```

pub mod config;
pub mod explanation;
pub mod registry;

mod error;
mod output;

pub use error::TsErrError;
pub use output::{ParseInfo, ParsedError};
pub use tserr_parser::{Category, Template, TemplateRegistry};

use log::{debug, info, trace};

use tserr_parser::{MatchResult, Matcher, utf16_offset};

use config::{OffsetEncoding, ParseOptions};
use explanation::{DirectorySource, ExplanationLoader, ExplanationSource};

/// Parser for diagnostic blobs.
///
/// An `ErrorParser` borrows a [`TemplateRegistry`] and orders its templates
/// for matching once, so it should be reused across blobs.
///
/// # Examples
///
/// ```
/// use tserr::{ErrorParser, config::ParseOptions, registry};
///
/// let parser = ErrorParser::new(registry::builtin(), ParseOptions::default());
/// let errors = parser.parse("Cannot find name 'foo'.");
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].code(), 2304);
/// assert!(errors[0].improved_error().is_none());
/// ```
#[derive(Debug)]
pub struct ErrorParser<'r> {
    matcher: Matcher<'r>,
    options: ParseOptions,
    explanations: Option<ExplanationLoader>,
}

impl<'r> ErrorParser<'r> {
    /// Create a parser over `registry`.
    ///
    /// If `options` names an explanation directory, explanations are loaded
    /// from `<dir>/<code>.md`.
    ///
    /// # Arguments
    ///
    /// * `registry` - Known templates
    /// * `options` - Explanation directory and output settings
    pub fn new(registry: &'r TemplateRegistry, options: ParseOptions) -> Self {
        let explanations = options
            .dir()
            .map(|dir| ExplanationLoader::new(DirectorySource::new(dir)));
        Self {
            matcher: Matcher::new(registry),
            options,
            explanations,
        }
    }

    /// Load explanations from `source` instead of the configured directory.
    pub fn with_explanation_source(mut self, source: impl ExplanationSource + 'static) -> Self {
        self.explanations = Some(ExplanationLoader::new(source));
        self
    }

    /// Returns the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a diagnostic blob.
    ///
    /// Messages that match no template are dropped, and explanations that
    /// cannot be loaded are reported as `None`, so this never fails. See
    /// [`tserr_parser::match_all`] for the order of the results.
    ///
    /// # Arguments
    ///
    /// * `blob` - Raw diagnostic text, possibly holding several messages
    pub fn parse(&self, blob: &str) -> Vec<ParsedError> {
        info!(blob_len = blob.len(); "Parsing diagnostics");

        let parsed: Vec<ParsedError> = tserr_parser::match_all(blob, &self.matcher)
            .iter()
            .map(|found| self.to_parsed_error(blob, found))
            .collect();

        info!(errors_count = parsed.len(); "Diagnostics parsed");
        trace!(parsed:?; "Parsed errors");
        parsed
    }

    fn to_parsed_error(&self, blob: &str, found: &MatchResult<'_>) -> ParsedError {
        let code = found.code();
        let items = found.items();
        debug!(code = code, items_count = items.len(); "Matched diagnostic");

        let improved_error = self
            .explanations
            .as_ref()
            .and_then(|loader| loader.load_or_none(code, &items));

        let span = found.span();
        let (start_index, end_index) = match self.options.offsets() {
            OffsetEncoding::Utf8 => (span.start(), span.end()),
            OffsetEncoding::Utf16 => (
                utf16_offset(blob, span.start()),
                utf16_offset(blob, span.end()),
            ),
        };

        ParsedError::new(
            code,
            found.template().pattern(),
            improved_error,
            ParseInfo::new(
                start_index,
                end_index,
                items,
                self.options.legacy_item_fields(),
            ),
        )
    }
}

/// Parse a diagnostic blob against the bundled TypeScript templates.
///
/// # Arguments
///
/// * `blob` - Raw diagnostic text
/// * `options` - Explanation directory and output settings
pub fn parse_errors(blob: &str, options: &ParseOptions) -> Vec<ParsedError> {
    ErrorParser::new(registry::builtin(), options.clone()).parse(blob)
}
