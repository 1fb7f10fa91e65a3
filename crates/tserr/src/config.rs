//! Options controlling how diagnostics are parsed and reported.
//!
//! All types implement [`serde::Deserialize`], so they can be embedded in an
//! application's configuration file.
//!
//! # Example
//!
//! ```
//! # use tserr::config::{OffsetEncoding, ParseOptions};
//! let options = ParseOptions::default()
//!     .with_dir("./errors")
//!     .with_offsets(OffsetEncoding::Utf16);
//! assert_eq!(options.offsets(), OffsetEncoding::Utf16);
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Unit used for `startIndex` and `endIndex` in parse results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetEncoding {
    /// UTF-8 byte offsets.
    #[default]
    Utf8,
    /// UTF-16 code unit offsets, as JavaScript string indices.
    Utf16,
}

/// Options for [`ErrorParser`](crate::ErrorParser).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Directory holding `<code>.md` explanation documents.
    dir: Option<PathBuf>,

    /// Unit of reported offsets.
    offsets: OffsetEncoding,

    /// Report items as `firstItem`, `secondItem`, ... instead of `items`.
    legacy_item_fields: bool,
}

impl ParseOptions {
    /// Set the explanation document directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Set the unit of reported offsets.
    pub fn with_offsets(mut self, offsets: OffsetEncoding) -> Self {
        self.offsets = offsets;
        self
    }

    /// Enable or disable the legacy named item fields.
    pub fn with_legacy_item_fields(mut self, enabled: bool) -> Self {
        self.legacy_item_fields = enabled;
        self
    }

    /// Returns the explanation document directory, if configured.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Returns the unit of reported offsets.
    pub fn offsets(&self) -> OffsetEncoding {
        self.offsets
    }

    /// Returns `true` if items are reported as named fields.
    pub fn legacy_item_fields(&self) -> bool {
        self.legacy_item_fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert!(options.dir().is_none());
        assert_eq!(options.offsets(), OffsetEncoding::Utf8);
        assert!(!options.legacy_item_fields());
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ParseOptions =
            serde_json::from_str(r#"{ "dir": "./errors", "offsets": "utf16" }"#).unwrap();
        assert_eq!(options.dir(), Some(Path::new("./errors")));
        assert_eq!(options.offsets(), OffsetEncoding::Utf16);
        assert!(!options.legacy_item_fields());
    }

    #[test]
    fn test_deserialize_rejects_unknown_encoding() {
        let result: Result<ParseOptions, _> = serde_json::from_str(r#"{ "offsets": "utf32" }"#);
        assert!(result.is_err());
    }
}
