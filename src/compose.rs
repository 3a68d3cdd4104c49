//! Assembles one executable template per page. Every fragment is added to a
//! single [`gtmpl::Template`] under its own source path: first the files of
//! the matched include directories, then the matched layouts, then the page.
//! Because later additions replace earlier definitions of the same name, a
//! deeper layout or the page overrides whatever a shallower layout defined.
//!
//! Layouts and the page form a chain. A layout marks where the rest of the
//! chain goes with a block named after the entry template
//! (`{{block "layout.html" .}}{{end}}` by default). That block is renamed per
//! fragment and filled with the top-level body of the next fragment, so
//! `views/layout.html` wraps `views/admin/layout.html`, which wraps
//! `views/admin/dash.html`. The entry point (named by
//! [`Config::entry_name`]) renders the outermost fragment that parsed.

use crate::config::{Config, ParseMode};
use crate::error::{LoadError, RenderError};
use crate::path::SourcePath;
use crate::scope::Matches;
use crate::slot;
use crate::source::Source;
use gtmpl::{Context, Template};
use std::io::Write;

/// A page composed with its includes and layouts, ready to render.
pub struct ComposedTemplate {
    key: String,
    source_path: SourcePath,
    include_order: Vec<SourcePath>,
    layout_order: Vec<SourcePath>,
    skipped: Vec<SourcePath>,
    template: Template,
}

impl ComposedTemplate {
    /// The key the template is registered under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The page the template was composed for.
    pub fn source_path(&self) -> &SourcePath {
        &self.source_path
    }

    /// The include directories that were applied, least specific first.
    pub fn include_order(&self) -> &[SourcePath] {
        &self.include_order
    }

    /// The layouts that were applied, least specific first, followed by the
    /// page itself.
    pub fn layout_order(&self) -> &[SourcePath] {
        &self.layout_order
    }

    /// Layouts or pages left out because they failed to parse. Always empty
    /// in [`ParseMode::Strict`].
    pub fn skipped(&self) -> &[SourcePath] {
        &self.skipped
    }

    /// The underlying compiled template.
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Renders the template against `data` into `writer`.
    pub fn render<W: Write>(&self, writer: &mut W, data: &Context) -> Result<(), RenderError> {
        self.template
            .execute(writer, data)
            .map_err(|e| RenderError::Execute {
                key: self.key.clone(),
                message: e.to_string(),
            })
    }

    /// Renders the template against `data` into a new string.
    pub fn render_to_string(&self, data: &Context) -> Result<String, RenderError> {
        let mut out: Vec<u8> = Vec::new();
        self.render(&mut out, data)?;
        String::from_utf8(out).map_err(|e| RenderError::Execute {
            key: self.key.clone(),
            message: e.to_string(),
        })
    }
}

impl std::fmt::Debug for ComposedTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ComposedTemplate")
            .field("key", &self.key)
            .field("source_path", &self.source_path)
            .field("include_order", &self.include_order)
            .field("layout_order", &self.layout_order)
            .field("skipped", &self.skipped)
            .finish()
    }
}

/// Builds [`ComposedTemplate`]s from the fragments of one [`Source`].
pub struct Composer<'a, S: ?Sized> {
    source: &'a S,
    config: &'a Config,
}

impl<'a, S: Source + ?Sized> Composer<'a, S> {
    pub fn new(source: &'a S, config: &'a Config) -> Self {
        Composer { source, config }
    }

    /// Composes the template for `page` from the fragments in `matches`.
    pub fn compose(
        &self,
        page: &SourcePath,
        key: &str,
        matches: &Matches,
    ) -> Result<ComposedTemplate, LoadError> {
        let mut template = Template::with_name(self.config.entry_name());

        let pattern = format!("*{}", self.config.extension);
        for dir in &matches.includes {
            let files = self
                .source
                .glob(dir, &pattern)
                .map_err(|err| LoadError::IncludeGlob {
                    dir: dir.clone(),
                    err,
                })?;
            for file in files {
                let text = self.read(&file)?;
                template
                    .add_template(file.to_string(), text)
                    .map_err(|e| LoadError::IncludeParse {
                        path: file.clone(),
                        message: e.to_string(),
                    })?;
            }
        }

        let mut layout_order = matches.layouts.clone();
        layout_order.push(page.clone());

        let slot = self.config.entry_name();
        let mut skipped = Vec::new();
        let mut chain: Vec<(&SourcePath, bool)> = Vec::new();
        for fragment in &layout_order {
            let text = self.read(fragment)?;
            let renamed = slot::rename(&text, &slot, &slot_name(&slot, fragment));
            match template.add_template(fragment.to_string(), renamed.text) {
                Ok(()) => chain.push((fragment, renamed.count > 0)),
                Err(e) => match self.config.mode {
                    ParseMode::Strict => {
                        return Err(LoadError::LayoutOrPageParse {
                            key: key.to_owned(),
                            path: fragment.clone(),
                            message: e.to_string(),
                        })
                    }
                    ParseMode::Lenient => {
                        log::warn!("skipping `{}` for template `{}`: {}", fragment, key, e);
                        skipped.push(fragment.clone());
                    }
                },
            }
        }

        // Each fragment's slot renders the next fragment of the chain.
        for pair in chain.windows(2) {
            let ((outer, has_slot), (inner, _)) = (pair[0], pair[1]);
            if !has_slot {
                log::debug!(
                    "`{}` has no `{}` slot; `{}` only contributes its definitions",
                    outer,
                    slot,
                    inner
                );
            }
            template
                .add_template(slot_name(&slot, outer), reference(inner))
                .map_err(|e| glue_error(key, page, e))?;
        }

        // Parsed last so no fragment can redefine the entry point.
        let entry = match chain.first() {
            Some((outermost, _)) => reference(outermost),
            None => String::new(),
        };
        template
            .parse(entry)
            .map_err(|e| glue_error(key, page, e))?;

        log::debug!(
            "composed `{}` from {} include dir(s) and {} layout(s)",
            key,
            matches.includes.len(),
            matches.layouts.len()
        );
        Ok(ComposedTemplate {
            key: key.to_owned(),
            source_path: page.clone(),
            include_order: matches.includes.clone(),
            layout_order,
            skipped,
            template,
        })
    }

    fn read(&self, path: &SourcePath) -> Result<String, LoadError> {
        self.source.read(path).map_err(|err| LoadError::Read {
            path: path.clone(),
            err,
        })
    }
}

// The name a fragment's slot is registered under.
fn slot_name(slot: &str, fragment: &SourcePath) -> String {
    format!("{}@{}", slot, fragment)
}

// A template body rendering `fragment` against the current data.
fn reference(fragment: &SourcePath) -> String {
    format!("{{{{template {:?} .}}}}", fragment.to_string())
}

fn glue_error<E: ToString>(key: &str, page: &SourcePath, e: E) -> LoadError {
    LoadError::LayoutOrPageParse {
        key: key.to_owned(),
        path: page.clone(),
        message: e.to_string(),
    }
}
