//! Diagnostic categories.
//!
//! TypeScript tags every diagnostic message with a category. The category is
//! carried on each [`Template`](crate::Template) so callers can tell errors
//! apart from suggestions and informational messages.

use std::{fmt, str::FromStr};

/// The category of a diagnostic template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// A compile error.
    #[default]
    Error,

    /// A non-fatal warning.
    Warning,

    /// An editor suggestion, usually not shown on the command line.
    Suggestion,

    /// Informational text, such as the related-information lines that
    /// follow an error.
    Message,
}

impl Category {
    /// Returns the category name as it appears in `diagnosticMessages.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Error => "Error",
            Category::Warning => "Warning",
            Category::Suggestion => "Suggestion",
            Category::Message => "Message",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Error" => Ok(Category::Error),
            "Warning" => Ok(Category::Warning),
            "Suggestion" => Ok(Category::Suggestion),
            "Message" => Ok(Category::Message),
            other => Err(format!("unknown diagnostic category `{other}`")),
        }
    }
}
