//! Error types for template construction.

use thiserror::Error;

/// Errors raised when a pattern string is not a valid template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The pattern could not be split into literal and placeholder segments.
    #[error("malformed pattern for code {code}: {reason}")]
    Malformed { code: u32, reason: String },

    /// Placeholder indices do not cover `0..k` without gaps.
    #[error("placeholders in code {code} are not contiguous from {{0}}: missing {{{missing}}}")]
    NonContiguous { code: u32, missing: usize },

    /// A placeholder index is too large to be a positional argument.
    #[error("placeholder {{{index}}} in code {code} exceeds the supported maximum")]
    IndexTooLarge { code: u32, index: usize },
}
