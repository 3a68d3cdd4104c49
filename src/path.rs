//! Defines [`SourcePath`], the relative, `/`-separated path type used for
//! every entry of a template tree. Paths are held as explicit segment lists so
//! that scope depth and prefix checks never depend on string lengths.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Component, Path};

/// A path relative to the root of a [`crate::source::Source`]. The root itself
/// has zero segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePath {
    segments: Vec<String>,
}

impl SourcePath {
    /// The root of the tree.
    pub fn root() -> SourcePath {
        SourcePath::default()
    }

    /// Parses a `/`-separated path. Empty and `.` segments are dropped, so
    /// `"."`, `""` and `"/"` all denote the root.
    pub fn parse(path: &str) -> SourcePath {
        SourcePath {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty() && *s != ".")
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Converts a relative filesystem path. Only normal components are kept.
    pub fn from_path(path: &Path) -> SourcePath {
        SourcePath {
            segments: path
                .components()
                .filter_map(|c| match c {
                    Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The number of segments; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The containing directory. The parent of the root is the root.
    pub fn parent(&self) -> SourcePath {
        let mut segments = self.segments.clone();
        segments.pop();
        SourcePath { segments }
    }

    /// The last segment, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Appends one segment (which may itself contain `/`).
    pub fn join(&self, path: &str) -> SourcePath {
        let mut joined = self.clone();
        joined.segments.extend(SourcePath::parse(path).segments);
        joined
    }

    /// Segment-wise prefix test: `views/admin` is a prefix of
    /// `views/admin/index.html` but not of `views/admin2/index.html`.
    pub fn starts_with(&self, prefix: &SourcePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// True if any segment strictly above this entry equals `name`.
    pub fn has_ancestor_named(&self, name: &str) -> bool {
        match self.segments.split_last() {
            Some((_, ancestors)) => ancestors.iter().any(|s| s == name),
            None => false,
        }
    }

    /// Orders paths from least to most specific: shallower first, then
    /// lexically by segments.
    pub fn precedence(&self, other: &SourcePath) -> Ordering {
        self.depth()
            .cmp(&other.depth())
            .then_with(|| self.segments.cmp(&other.segments))
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            f.write_str(&self.segments.join("/"))
        }
    }
}

impl From<&str> for SourcePath {
    fn from(path: &str) -> SourcePath {
        SourcePath::parse(path)
    }
}
