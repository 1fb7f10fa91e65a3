//! Loading template registries.
//!
//! Templates are read from the shape of TypeScript's
//! `diagnosticMessages.json`: a JSON object mapping each message pattern to
//! its category and code.
//!
//! ```json
//! {
//!     "Cannot find name '{0}'.": {
//!         "category": "Error",
//!         "code": 2304
//!     }
//! }
//! ```
//!
//! Entries whose pattern is not a valid template are skipped with a warning
//! rather than failing the whole load.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use indexmap::IndexMap;
use log::{debug, error, info, warn};
use serde::Deserialize;
use thiserror::Error;

use tserr_parser::{Category, Template, TemplateRegistry};

/// Bundled corpus of common TypeScript diagnostics.
const BUILTIN_MESSAGES: &str = include_str!("../data/diagnostic_messages.json");

static BUILTIN: LazyLock<TemplateRegistry> = LazyLock::new(|| {
    load_json(BUILTIN_MESSAGES).unwrap_or_else(|err| {
        error!(err:% = err; "Bundled diagnostic messages are invalid");
        TemplateRegistry::default()
    })
});

/// Errors raised while loading a template registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid diagnostic messages JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct MessageEntry {
    category: String,
    code: u32,
}

/// Parse a registry from `diagnosticMessages.json` content.
///
/// # Errors
///
/// Returns [`RegistryError::Json`] if the content is not a JSON object of
/// `{ category, code }` entries.
pub fn load_json(content: &str) -> Result<TemplateRegistry, RegistryError> {
    let entries: IndexMap<String, MessageEntry> = serde_json::from_str(content)?;
    let total = entries.len();

    let templates: Vec<Template> = entries
        .into_iter()
        .filter_map(|(pattern, entry)| {
            let category = entry.category.parse().unwrap_or_else(|err: String| {
                warn!(code = entry.code, reason = err; "Unknown category, assuming Error");
                Category::Error
            });
            match Template::new(entry.code, pattern) {
                Ok(template) => Some(template.with_category(category)),
                Err(err) => {
                    warn!(code = entry.code, err:% = err; "Skipping invalid template");
                    None
                }
            }
        })
        .collect();

    debug!(entries_count = total, templates_count = templates.len(); "Diagnostic messages loaded");
    Ok(TemplateRegistry::from_templates(templates))
}

/// Read a registry from a `diagnosticMessages.json` file.
///
/// # Errors
///
/// Returns [`RegistryError::Io`] if the file cannot be read and
/// [`RegistryError::Json`] if it is not valid.
pub fn load_file(path: impl AsRef<Path>) -> Result<TemplateRegistry, RegistryError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading template registry");

    let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_json(&content)
}

/// The registry of bundled TypeScript diagnostics.
///
/// The bundled corpus is parsed on first use and shared afterwards.
pub fn builtin() -> &'static TemplateRegistry {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn test_load_json() {
        let registry = load_json(
            r#"{
                "Cannot find name '{0}'.": { "category": "Error", "code": 2304 },
                "The expected type comes from property '{0}' which is declared here on type '{1}'": {
                    "category": "Message",
                    "code": 6500
                }
            }"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        let template = registry.lookup(6500).unwrap();
        assert_eq!(template.category(), Category::Message);
        assert_eq!(template.arity(), 2);
    }

    #[test]
    fn test_load_json_skips_invalid_templates() {
        let registry = load_json(
            r#"{
                "Broken '{1}'.": { "category": "Error", "code": 1 },
                "Fine '{0}'.": { "category": "Error", "code": 2 }
            }"#,
        )
        .unwrap();

        assert!(registry.lookup(1).is_none());
        assert!(registry.lookup(2).is_some());
    }

    #[test]
    fn test_load_json_ignores_extra_fields() {
        let registry = load_json(
            r#"{
                "'{0}' is declared but its value is never read.": {
                    "category": "Error",
                    "code": 6133,
                    "reportsUnnecessary": true
                }
            }"#,
        )
        .unwrap();
        assert!(registry.lookup(6133).is_some());
    }

    #[test]
    fn test_load_json_rejects_malformed() {
        assert!(matches!(load_json("[1, 2, 3]"), Err(RegistryError::Json(_))));
        assert!(matches!(
            load_json(r#"{ "A.": { "code": 1 } }"#),
            Err(RegistryError::Json(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "Cannot find name '{{0}}'.": {{ "category": "Error", "code": 2304 }} }}"#
        )
        .unwrap();

        let registry = load_file(file.path()).unwrap();
        assert_eq!(
            registry.lookup(2304).map(Template::pattern),
            Some("Cannot find name '{0}'.")
        );
    }

    #[test]
    fn test_load_file_missing() {
        let err = load_file("/definitely/not/here/diagnosticMessages.json").unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
        assert!(err.to_string().contains("diagnosticMessages.json"));
    }

    #[test]
    fn test_builtin_corpus_is_valid() {
        let entries: IndexMap<String, MessageEntry> =
            serde_json::from_str(BUILTIN_MESSAGES).unwrap();
        for (pattern, entry) in &entries {
            assert!(
                Template::new(entry.code, pattern.as_str()).is_ok(),
                "invalid bundled template {}: {pattern}",
                entry.code
            );
        }
        assert_eq!(builtin().len(), entries.len());
    }

    #[test]
    fn test_builtin_contains_common_codes() {
        for code in [2304, 2322, 2324, 2345, 2352, 2741, 6500] {
            assert!(builtin().lookup(code).is_some(), "missing code {code}");
        }
    }
}
