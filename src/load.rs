//! Exports [`load`] and [`Loader`], which stitch together the steps of
//! turning a template tree into [`Templates`]: classifying the tree
//! ([`crate::classify`]), matching each page against the include and layout
//! scopes ([`crate::scope`]), composing it ([`crate::compose`]) and
//! registering it under its key ([`crate::key`]).

use crate::classify::classify_tree;
use crate::compose::Composer;
use crate::config::Config;
use crate::error::LoadError;
use crate::key::key_of;
use crate::scope::match_scopes;
use crate::source::Source;
use crate::templates::Templates;
use std::collections::btree_map::{BTreeMap, Entry};

/// Loads every page of `source` as a composed template. Either the whole
/// mapping is returned or nothing is.
pub fn load<S: Source + ?Sized>(source: &S, config: &Config) -> Result<Templates, LoadError> {
    let classification = classify_tree(source, config).map_err(LoadError::Traversal)?;
    log::debug!(
        "found {} page(s), {} layout(s), {} include dir(s)",
        classification.pages.len(),
        classification.layouts.len(),
        classification.include_dirs.len()
    );

    let composer = Composer::new(source, config);
    let mut templates = BTreeMap::new();
    for page in &classification.pages {
        let key = key_of(page, &config.extension).ok_or_else(|| LoadError::InvalidKey(page.clone()))?;
        let matches = match_scopes(page, &classification.include_dirs, &classification.layouts);
        let composed = composer.compose(page, &key, &matches)?;
        match templates.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(composed);
            }
            Entry::Occupied(entry) => {
                return Err(LoadError::DuplicateKey {
                    key: entry.key().clone(),
                    first: entry.get().source_path().clone(),
                    second: page.clone(),
                })
            }
        }
    }

    log::info!("loaded {} template(s)", templates.len());
    Ok(Templates::new(templates))
}

/// Holds a [`Config`] for repeated loads.
#[derive(Clone, Debug, Default)]
pub struct Loader {
    config: Config,
}

impl Loader {
    /// A loader with the default naming conventions.
    pub fn new() -> Loader {
        Loader::default()
    }

    /// A loader with `config`; empty fields take their defaults.
    pub fn with_config(config: Config) -> Loader {
        Loader {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn load<S: Source + ?Sized>(&self, source: &S) -> Result<Templates, LoadError> {
        load(source, &self.config)
    }
}
