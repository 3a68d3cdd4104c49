//! `trellis` composes a directory of template fragments into independently
//! renderable templates. Composition is driven entirely by where files live:
//!
//! * a directory named `includes` holds reusable fragments for every page in
//!   the directory that contains it (and below),
//! * a file named `layout.html` wraps every page in its directory (and below)
//!   at its `{{block "layout.html" .}}{{end}}`,
//! * any other `.html` file is a page.
//!
//! Loading happens once and proceeds in four steps:
//!
//! 1. Classifying the tree into include directories, layouts and pages
//!    ([`crate::classify`])
//! 2. Matching each page against the scopes of those fragments, shallowest
//!    first ([`crate::scope`])
//! 3. Composing each page with its includes and layouts into one
//!    [`gtmpl::Template`] ([`crate::compose`])
//! 4. Registering the result under a key derived from the page path
//!    ([`crate::key`])
//!
//! The result is a read-only [`Templates`] mapping:
//!
//! ```no_run
//! use trellis::{Loader, DirSource};
//!
//! let templates = Loader::new().load(&DirSource::mounted("views").unwrap()).unwrap();
//! let html = templates
//!     .render_to_string("admin/index", &gtmpl::Context::empty())
//!     .unwrap();
//! ```
//!
//! The names `includes`, `layout` and `.html` are configurable through
//! [`Config`].

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod classify;
pub mod compose;
pub mod config;
pub mod error;
pub mod key;
pub mod load;
pub mod path;
pub mod scope;
pub mod slot;
pub mod source;
pub mod templates;
pub mod value;

mod util;

pub use compose::ComposedTemplate;
pub use config::{Config, ParseMode};
pub use error::{LoadError, RenderError};
pub use load::{load, Loader};
pub use path::SourcePath;
pub use source::{DirSource, MemorySource, Source};
pub use templates::Templates;
