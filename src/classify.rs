//! Partitions the entries of a [`Source`] into include scopes, layouts and
//! pages. The decision for each entry is made by [`classify`], which looks at
//! nothing but the entry's path, so the rules can be exercised without a
//! filesystem.

use crate::config::Config;
use crate::path::SourcePath;
use crate::source::{self, Source, SourceEntry};

/// The part an entry plays in composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// A directory named after [`Config::includes_dir`]. Its contents are
    /// only reached by globbing once a page matches its scope.
    IncludeScope,

    /// A file named [`Config::layout_file_name`].
    Layout,

    /// Any other file ending in [`Config::extension`].
    Page,

    /// Anything else, including everything beneath an include directory.
    Ignored,
}

/// Decides the [`Role`] of one entry.
pub fn classify(path: &SourcePath, is_dir: bool, config: &Config) -> Role {
    // Nothing beneath an include directory is classified.
    if path.has_ancestor_named(&config.includes_dir) {
        return Role::Ignored;
    }
    let name = match path.file_name() {
        Some(name) => name,
        None => return Role::Ignored,
    };
    if is_dir {
        return if name == config.includes_dir {
            Role::IncludeScope
        } else {
            Role::Ignored
        };
    }
    if !has_extension(name, &config.extension) {
        Role::Ignored
    } else if name == config.layout_file_name() {
        Role::Layout
    } else {
        Role::Page
    }
}

// A name qualifies if it ends in the extension and has something before it.
fn has_extension(name: &str, extension: &str) -> bool {
    name.len() > extension.len() && name.ends_with(extension)
}

/// The classified fragments of a tree, each list ordered from least to most
/// specific (see [`SourcePath::precedence`]).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    /// The include directories themselves, e.g. `views/includes`.
    pub include_dirs: Vec<SourcePath>,
    pub layouts: Vec<SourcePath>,
    pub pages: Vec<SourcePath>,
}

/// Walks `source` once and classifies every entry. Include directories are
/// not descended into.
pub fn classify_tree<S: Source + ?Sized>(
    source: &S,
    config: &Config,
) -> source::Result<Classification> {
    let descend =
        |entry: &SourceEntry| classify(&entry.path, entry.is_dir, config) != Role::IncludeScope;
    let mut classification = Classification::default();
    for entry in source.walk(&descend)? {
        match classify(&entry.path, entry.is_dir, config) {
            Role::IncludeScope => classification.include_dirs.push(entry.path),
            Role::Layout => classification.layouts.push(entry.path),
            Role::Page => classification.pages.push(entry.path),
            Role::Ignored => {}
        }
    }
    classification.include_dirs.sort_by(SourcePath::precedence);
    classification.layouts.sort_by(SourcePath::precedence);
    classification.pages.sort_by(SourcePath::precedence);
    Ok(classification)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::MemorySource;

    fn role(path: &str, is_dir: bool) -> Role {
        classify(&SourcePath::parse(path), is_dir, &Config::default())
    }

    #[test]
    fn test_classify_roles() {
        assert_eq!(role("views/includes", true), Role::IncludeScope);
        assert_eq!(role("views/admin/includes", true), Role::IncludeScope);
        assert_eq!(role("views/layout.html", false), Role::Layout);
        assert_eq!(role("views/admin/layout.html", false), Role::Layout);
        assert_eq!(role("views/index.html", false), Role::Page);
        assert_eq!(role("views/admin", true), Role::Ignored);
        assert_eq!(role("views/style.css", false), Role::Ignored);
        assert_eq!(role("views/.html", false), Role::Ignored);
    }

    #[test]
    fn test_classify_prunes_include_directories() {
        assert_eq!(role("views/includes/nav.html", false), Role::Ignored);
        assert_eq!(role("views/includes/layout.html", false), Role::Ignored);
        assert_eq!(role("views/includes/nested/includes", true), Role::Ignored);
    }

    #[test]
    fn test_classify_custom_names() {
        let config = Config::new(".tmpl", "partials", "base");
        let role = |path: &str, is_dir| classify(&SourcePath::parse(path), is_dir, &config);
        assert_eq!(role("views/partials", true), Role::IncludeScope);
        assert_eq!(role("views/includes", true), Role::Ignored);
        assert_eq!(role("views/base.tmpl", false), Role::Layout);
        assert_eq!(role("views/layout.tmpl", false), Role::Page);
        assert_eq!(role("views/index.html", false), Role::Ignored);
    }

    #[test]
    fn test_classify_tree() -> source::Result<()> {
        let source = MemorySource::new()
            .with_file("views/admin/layout.html", "")
            .with_file("views/layout.html", "")
            .with_file("views/includes/nav.html", "")
            .with_file("views/admin/includes/menu.html", "")
            .with_file("views/admin/dash.html", "")
            .with_file("views/index.html", "")
            .with_file("views/robots.txt", "");

        let classification = classify_tree(&source, &Config::default())?;
        let strings = |paths: &[SourcePath]| -> Vec<String> {
            paths.iter().map(ToString::to_string).collect()
        };
        assert_eq!(
            strings(&classification.include_dirs),
            vec!["views/includes", "views/admin/includes"]
        );
        assert_eq!(
            strings(&classification.layouts),
            vec!["views/layout.html", "views/admin/layout.html"]
        );
        assert_eq!(
            strings(&classification.pages),
            vec!["views/index.html", "views/admin/dash.html"]
        );
        Ok(())
    }

    // Fails if asked to enter `views/includes`, like an unreadable directory
    // there would.
    struct UnreadableIncludes;

    impl Source for UnreadableIncludes {
        fn walk(&self, descend: &dyn Fn(&SourceEntry) -> bool) -> source::Result<Vec<SourceEntry>> {
            let dir = |path: &str| SourceEntry {
                path: SourcePath::parse(path),
                is_dir: true,
            };
            let includes = dir("views/includes");
            if descend(&includes) {
                return Err(source::Error::Io {
                    path: includes.path,
                    err: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            Ok(vec![
                dir("views"),
                includes,
                SourceEntry {
                    path: SourcePath::parse("views/index.html"),
                    is_dir: false,
                },
            ])
        }

        fn glob(&self, _: &SourcePath, _: &str) -> source::Result<Vec<SourcePath>> {
            Ok(Vec::new())
        }

        fn read(&self, path: &SourcePath) -> source::Result<String> {
            Err(source::Error::NotFound(path.clone()))
        }
    }

    #[test]
    fn test_classify_tree_does_not_enter_include_directories() -> source::Result<()> {
        let classification = classify_tree(&UnreadableIncludes, &Config::default())?;
        assert_eq!(classification.include_dirs, vec![SourcePath::parse("views/includes")]);
        assert_eq!(classification.pages, vec![SourcePath::parse("views/index.html")]);
        Ok(())
    }
}
