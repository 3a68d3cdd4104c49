//! Decides which include directories and layouts apply to a page. A fragment
//! governs the directory that contains it; it applies to every page inside
//! that directory at any depth, and a fragment at the root of the tree applies
//! to every page.

use crate::path::SourcePath;

/// The directory a fragment governs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scope {
    dir: SourcePath,
}

impl Scope {
    /// The scope of an include directory or a layout file: its parent.
    pub fn of(fragment: &SourcePath) -> Scope {
        Scope {
            dir: fragment.parent(),
        }
    }

    pub fn dir(&self) -> &SourcePath {
        &self.dir
    }

    pub fn matches(&self, page: &SourcePath) -> bool {
        self.dir.is_root() || page.starts_with(&self.dir)
    }
}

/// The fragments that apply to one page, least specific first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Matches {
    /// Include directories whose files are parsed before anything else.
    pub includes: Vec<SourcePath>,

    /// Layout files, parsed before the page itself.
    pub layouts: Vec<SourcePath>,
}

/// Selects the include directories and layouts whose scope contains `page`.
/// The result is ordered by scope depth (root first), ties broken lexically.
pub fn match_scopes(
    page: &SourcePath,
    include_dirs: &[SourcePath],
    layouts: &[SourcePath],
) -> Matches {
    Matches {
        includes: matching(page, include_dirs),
        layouts: matching(page, layouts),
    }
}

fn matching(page: &SourcePath, fragments: &[SourcePath]) -> Vec<SourcePath> {
    let mut matched: Vec<(Scope, &SourcePath)> = fragments
        .iter()
        .map(|fragment| (Scope::of(fragment), fragment))
        .filter(|(scope, _)| scope.matches(page))
        .collect();
    matched.sort_by(|(a, a_path), (b, b_path)| {
        a.dir()
            .precedence(b.dir())
            .then_with(|| a_path.precedence(b_path))
    });
    matched.into_iter().map(|(_, path)| path.clone()).collect()
}
