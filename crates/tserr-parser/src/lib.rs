//! # tserr Parser
//!
//! Reverse template matching for TypeScript compiler diagnostics. Given the
//! registry of known message templates and a raw diagnostic blob, this crate
//! recovers the code of every message in the blob and the text that filled
//! each `{N}` placeholder, with byte offsets into the blob.
//!
//! ## Usage
//!
//! ```
//! # use tserr_parser::{Matcher, Template, TemplateRegistry, match_all};
//! let registry = TemplateRegistry::from_templates([
//!     Template::new(2304, "Cannot find name '{0}'.").unwrap(),
//! ]);
//! let matcher = Matcher::new(&registry);
//!
//! let matches = match_all("Cannot find name 'foo'.", &matcher);
//! assert_eq!(matches[0].code(), 2304);
//! assert_eq!(matches[0].items(), vec!["foo"]);
//! ```

mod category;
mod error;
mod matcher;
mod registry;
mod span;
mod splitter;
mod template;

pub use category::Category;
pub use error::TemplateError;
pub use matcher::{Capture, MatchResult, Matcher, match_template};
pub use registry::TemplateRegistry;
pub use span::{Span, utf16_offset};
pub use splitter::{Messages, RawMessage, split_messages};
pub use template::{Segment, Template};

use log::debug;

/// Match every message of a diagnostic blob.
///
/// This is the matching pipeline:
///
/// 1. **Split** - Break the blob into messages at non-indented lines
/// 2. **Match** - Match each message as a whole
/// 3. **Unchain** - If a message with continuation lines matched no template
///    as a whole, match each of its lines on its own
///
/// Messages are returned in blob order. Lines of an unchained message are
/// returned innermost cause first, so the head line of the chain comes last.
/// Messages and lines that match no template are dropped.
///
/// # Arguments
///
/// * `source` - The raw diagnostic blob
/// * `matcher` - Matcher over the known templates
pub fn match_all<'r>(source: &str, matcher: &Matcher<'r>) -> Vec<MatchResult<'r>> {
    let mut results = Vec::new();

    for message in split_messages(source) {
        if let Some(result) = matcher.match_message(&message) {
            results.push(result);
            continue;
        }
        if !message.is_chain() {
            debug!(span = message.span().to_string(); "Dropping unmatched message");
            continue;
        }

        debug!(
            span = message.span().to_string(),
            lines_count = message.lines().len();
            "Matching cause chain line by line"
        );
        let mut links: Vec<MatchResult<'r>> = message
            .links()
            .filter_map(|link| matcher.match_message(&link))
            .collect();
        links.reverse();
        results.extend(links);
    }

    results
}
