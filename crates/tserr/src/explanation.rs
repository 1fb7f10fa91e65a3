//! Human-authored explanations for diagnostic codes.
//!
//! An explanation document is a markdown file named `<code>.md` that starts
//! with a YAML front matter block:
//!
//! ```markdown
//! ---
//! excerpt: "You can't use 'as' to convert '{0}' into a '{1}'."
//! ---
//!
//! It looks like you're trying to cast `{0}` to `{1}`.
//! ```
//!
//! Rendering fills the placeholders with the text captured from the matched
//! message. In the body every `{N}` is replaced by item `N` as is. In the
//! excerpt every `'{N}'` is replaced by item `N` in backticks. Substitution is
//! a single pass, so a value that contains `{N}` itself is left alone.

use std::{
    collections::BTreeMap,
    fs, io,
    path::PathBuf,
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delimiter line opening the front matter block.
const FENCE: &str = "---";

/// A rendered explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    body: String,
    excerpt: String,
}

impl Explanation {
    /// The rendered markdown body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The rendered one-line excerpt.
    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }
}

/// Errors raised while loading an explanation document.
#[derive(Debug, Error)]
pub enum ExplanationError {
    #[error("no explanation document for code {code}")]
    NotFound { code: u32 },

    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("explanation for code {code} has no front matter block")]
    MissingFrontMatter { code: u32 },

    #[error("invalid front matter in explanation for code {code}: {source}")]
    FrontMatter {
        code: u32,
        source: serde_yaml::Error,
    },
}

/// A store of explanation documents keyed by diagnostic code.
pub trait ExplanationSource: Send + Sync {
    /// Read the raw document for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`ExplanationError::NotFound`] if no document exists for the
    /// code, or another variant if it exists but cannot be read.
    fn read(&self, code: u32) -> Result<String, ExplanationError>;
}

/// Reads `<dir>/<code>.md` documents from a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Create a source over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExplanationSource for DirectorySource {
    fn read(&self, code: u32) -> Result<String, ExplanationError> {
        let path = self.dir.join(format!("{code}.md"));
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ExplanationError::NotFound { code },
            _ => ExplanationError::Io { path, source },
        })
    }
}

impl ExplanationSource for BTreeMap<u32, String> {
    fn read(&self, code: u32) -> Result<String, ExplanationError> {
        self.get(&code)
            .cloned()
            .ok_or(ExplanationError::NotFound { code })
    }
}

#[derive(Debug, Deserialize)]
struct FrontMatter {
    excerpt: String,
}

/// Loads and renders explanations from an [`ExplanationSource`].
pub struct ExplanationLoader {
    source: Box<dyn ExplanationSource>,
}

impl ExplanationLoader {
    /// Create a loader over `source`.
    pub fn new(source: impl ExplanationSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Load the explanation for `code` and fill in `items`.
    ///
    /// # Errors
    ///
    /// Returns [`ExplanationError`] if the document is missing, unreadable,
    /// has no front matter, or its front matter lacks an `excerpt`.
    pub fn load(&self, code: u32, items: &[String]) -> Result<Explanation, ExplanationError> {
        let document = self.source.read(code)?;
        let (front_matter, body) =
            split_front_matter(&document).ok_or(ExplanationError::MissingFrontMatter { code })?;
        let front_matter: FrontMatter = serde_yaml::from_str(front_matter)
            .map_err(|source| ExplanationError::FrontMatter { code, source })?;

        Ok(Explanation {
            body: substitute(body, items, false),
            excerpt: substitute(&front_matter.excerpt, items, true),
        })
    }

    /// Like [`load`](Self::load), but logs the failure and returns `None`.
    pub fn load_or_none(&self, code: u32, items: &[String]) -> Option<Explanation> {
        match self.load(code, items) {
            Ok(explanation) => Some(explanation),
            Err(err @ ExplanationError::NotFound { .. }) => {
                debug!(code = code, err:% = err; "No explanation available");
                None
            }
            Err(err) => {
                warn!(code = code, err:% = err; "Ignoring unreadable explanation");
                None
            }
        }
    }
}

impl std::fmt::Debug for ExplanationLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplanationLoader").finish_non_exhaustive()
    }
}

/// Split a document into its front matter and body.
///
/// The first line must be `---`. The block ends at the next line that is
/// `---` or `...`. The body starts at the first non-blank line after it.
fn split_front_matter(document: &str) -> Option<(&str, &str)> {
    let document = document.strip_prefix('\u{feff}').unwrap_or(document);
    let mut lines = document.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != FENCE {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == FENCE || trimmed == "..." {
            let body = skip_blank_lines(&document[offset + line.len()..]);
            return Some((&document[start..offset], body));
        }
        offset += line.len();
    }
    None
}

/// Drop leading lines that hold only whitespace.
fn skip_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some(end) = rest.find('\n') {
        if !rest[..end].trim().is_empty() {
            break;
        }
        rest = &rest[end + 1..];
    }
    if rest.trim().is_empty() { "" } else { rest }
}

/// Parse `{N}` at the start of `text`, returning its byte length and `N`.
fn placeholder_at(text: &str) -> Option<(usize, usize)> {
    let digits = text.strip_prefix('{')?;
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 || !digits[len..].starts_with('}') {
        return None;
    }
    let index = digits[..len].parse().ok()?;
    Some((len + 2, index))
}

/// Replace placeholders in `text` with `items`.
///
/// Unquoted mode replaces `{N}` with the item. Quoted mode replaces `'{N}'`
/// with the item wrapped in backticks. Indices without an item are kept.
fn substitute(text: &str, items: &[String], quoted: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        let (before, tail) = rest.split_at(open);
        let replacement = placeholder_at(tail)
            .and_then(|(len, index)| items.get(index).map(|item| (len, item)))
            .filter(|(len, _)| !quoted || (before.ends_with('\'') && tail[*len..].starts_with('\'')));

        match replacement {
            Some((len, item)) if quoted => {
                out.push_str(&before[..before.len() - 1]);
                out.push('`');
                out.push_str(item);
                out.push('`');
                rest = &tail[len + 1..];
            }
            Some((len, item)) => {
                out.push_str(before);
                out.push_str(item);
                rest = &tail[len..];
            }
            None => {
                out.push_str(before);
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
