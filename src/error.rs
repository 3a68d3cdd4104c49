//! The error types for loading ([`LoadError`]) and rendering
//! ([`RenderError`]) templates.

use crate::path::SourcePath;
use crate::source;
use thiserror::Error;

/// Errors that abort a load. No mapping is returned when any of these occur.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Returned when walking the source tree fails.
    #[error("Walking template tree: {0}")]
    Traversal(#[source] source::Error),

    /// Returned when looking up the files of a matched include directory
    /// fails.
    #[error("Looking up includes in '{dir}': {err}")]
    IncludeGlob {
        dir: SourcePath,
        #[source]
        err: source::Error,
    },

    /// Returned when a matched fragment can't be read.
    #[error("Reading template file '{path}': {err}")]
    Read {
        path: SourcePath,
        #[source]
        err: source::Error,
    },

    /// Returned when an include file fails to parse.
    #[error("Parsing include '{path}': {message}")]
    IncludeParse { path: SourcePath, message: String },

    /// Returned when a layout or page fails to parse in strict mode.
    #[error("Parsing '{path}' for template '{key}': {message}")]
    LayoutOrPageParse {
        key: String,
        path: SourcePath,
        message: String,
    },

    /// Returned when a page path leaves nothing to use as a key.
    #[error("Cannot derive a template key from '{0}'")]
    InvalidKey(SourcePath),

    /// Returned when two pages map onto the same key.
    #[error("Template key '{key}' is produced by both '{first}' and '{second}'")]
    DuplicateKey {
        key: String,
        first: SourcePath,
        second: SourcePath,
    },
}

/// Errors raised while rendering a loaded template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Returned when no template is registered under the requested key.
    #[error("No template named '{0}'")]
    NotFound(String),

    /// Returned when the template engine fails to execute the template.
    #[error("Rendering '{key}': {message}")]
    Execute { key: String, message: String },
}
