//! Defines [`Templates`], the read-only mapping from key to
//! [`ComposedTemplate`] produced by a load.

use crate::compose::ComposedTemplate;
use crate::error::RenderError;
use gtmpl::Context;
use std::collections::btree_map::{self, BTreeMap};
use std::io::Write;

/// All composed templates of a tree, keyed by [`crate::key::key_of`]. The
/// mapping is never modified once loaded; reloading builds a new one.
#[derive(Debug, Default)]
pub struct Templates {
    templates: BTreeMap<String, ComposedTemplate>,
}

impl Templates {
    pub(crate) fn new(templates: BTreeMap<String, ComposedTemplate>) -> Templates {
        Templates { templates }
    }

    pub fn get(&self, key: &str) -> Option<&ComposedTemplate> {
        self.templates.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    /// The keys in lexical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ComposedTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Looks up `key` and renders it into `writer`.
    pub fn render<W: Write>(
        &self,
        key: &str,
        writer: &mut W,
        data: &Context,
    ) -> Result<(), RenderError> {
        self.get(key)
            .ok_or_else(|| RenderError::NotFound(key.to_owned()))?
            .render(writer, data)
    }

    /// Looks up `key` and renders it into a new string.
    pub fn render_to_string(&self, key: &str, data: &Context) -> Result<String, RenderError> {
        self.get(key)
            .ok_or_else(|| RenderError::NotFound(key.to_owned()))?
            .render_to_string(data)
    }
}

impl<'a> IntoIterator for &'a Templates {
    type Item = (&'a String, &'a ComposedTemplate);
    type IntoIter = btree_map::Iter<'a, String, ComposedTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}
