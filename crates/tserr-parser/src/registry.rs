//! The in-memory table of known diagnostic templates.
//!
//! A [`TemplateRegistry`] is built once from whatever source holds the
//! templates and is read-only afterwards. It is `Send + Sync`, so a single
//! instance can be shared between threads without locking.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::template::Template;

/// Immutable mapping from diagnostic code to [`Template`].
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<u32, Template>,
}

impl TemplateRegistry {
    /// Build a registry from templates.
    ///
    /// When two templates share a code the later one wins.
    pub fn from_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        let mut map = BTreeMap::new();
        for template in templates {
            let code = template.code();
            if let Some(previous) = map.insert(code, template) {
                warn!(code = code, pattern = previous.pattern(); "Duplicate template code replaced");
            }
        }
        debug!(templates_count = map.len(); "Template registry built");
        Self { templates: map }
    }

    /// Look up the template for a code.
    pub fn lookup(&self, code: u32) -> Option<&Template> {
        self.templates.get(&code)
    }

    /// Iterate over all templates in ascending code order.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &Template> {
        self.templates.values()
    }

    /// Returns the number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns `true` if the registry holds no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<Template> for TemplateRegistry {
    fn from_iter<I: IntoIterator<Item = Template>>(iter: I) -> Self {
        Self::from_templates(iter)
    }
}
