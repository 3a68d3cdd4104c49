//! The filesystem abstraction templates are loaded from. A [`Source`] can walk
//! its whole tree, glob for files directly inside a directory, and read a
//! file's text. [`DirSource`] serves a directory on disk and [`MemorySource`]
//! serves an in-memory tree, the counterpart of a tree embedded in a binary.

use crate::path::SourcePath;
use globset::{GlobBuilder, GlobMatcher};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// One entry discovered during a walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEntry {
    pub path: SourcePath,
    pub is_dir: bool,
}

/// A tree of template files.
pub trait Source {
    /// Lists every entry below the root (the root itself excluded), parents
    /// before children. A directory for which `descend` returns `false` is
    /// listed, but nothing below it is visited.
    fn walk(&self, descend: &dyn Fn(&SourceEntry) -> bool) -> Result<Vec<SourceEntry>>;

    /// Lists the files directly inside `dir` whose names match `pattern`,
    /// sorted.
    fn glob(&self, dir: &SourcePath, pattern: &str) -> Result<Vec<SourcePath>>;

    /// Reads a file's contents.
    fn read(&self, path: &SourcePath) -> Result<String>;
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by a [`Source`].
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the directory walk fails part-way.
    #[error("Walking '{}': {err}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        err: walkdir::Error,
    },

    /// Returned for malformed glob patterns.
    #[error("Invalid pattern '{pattern}': {err}")]
    Pattern {
        pattern: String,
        #[source]
        err: globset::Error,
    },

    /// Returned for I/O problems reading a file or listing a directory.
    #[error("Reading '{path}': {err}")]
    Io {
        path: SourcePath,
        #[source]
        err: io::Error,
    },

    /// Returned when an in-memory file does not exist.
    #[error("No such file '{0}'")]
    NotFound(SourcePath),
}

fn matcher(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|err| Error::Pattern {
            pattern: pattern.to_owned(),
            err,
        })
}

/// Serves templates from a directory on disk.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
    mount: SourcePath,
}

impl DirSource {
    /// Paths are relative to `root`: `root/admin/index.html` is reported as
    /// `admin/index.html`.
    pub fn new<P: Into<PathBuf>>(root: P) -> DirSource {
        DirSource {
            root: root.into(),
            mount: SourcePath::root(),
        }
    }

    /// Paths are prefixed with the directory's own name, so `site/views`
    /// reports `views/index.html`. A directory without a usable name (such as
    /// `.`) is canonicalized first.
    pub fn mounted<P: Into<PathBuf>>(dir: P) -> io::Result<DirSource> {
        let root = dir.into();
        let name = match root.file_name() {
            Some(name) => Some(name.to_owned()),
            None => root.canonicalize()?.file_name().map(ToOwned::to_owned),
        };
        let mount = match name {
            Some(name) => SourcePath::parse(&name.to_string_lossy()),
            None => SourcePath::root(),
        };
        Ok(DirSource { root, mount })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // Maps a source path back onto the filesystem, or `None` if it lies
    // outside the mount.
    fn resolve(&self, path: &SourcePath) -> Option<PathBuf> {
        if !path.starts_with(&self.mount) {
            return None;
        }
        Some(
            path.segments()[self.mount.depth()..]
                .iter()
                .fold(self.root.clone(), |acc, segment| acc.join(segment)),
        )
    }

    fn not_found(path: &SourcePath) -> Error {
        Error::Io {
            path: path.clone(),
            err: io::Error::new(io::ErrorKind::NotFound, "outside of the source root"),
        }
    }
}

impl Source for DirSource {
    fn walk(&self, descend: &dyn Fn(&SourceEntry) -> bool) -> Result<Vec<SourceEntry>> {
        let mut entries = Vec::new();
        if !self.mount.is_root() {
            let mount = SourceEntry {
                path: self.mount.clone(),
                is_dir: true,
            };
            if !descend(&mount) {
                return Ok(vec![mount]);
            }
            entries.push(mount);
        }

        let mut walker = WalkDir::new(&self.root).min_depth(1).into_iter();
        while let Some(result) = walker.next() {
            let entry = result.map_err(|err| Error::Walk {
                root: self.root.clone(),
                err,
            })?;
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or_else(|_| entry.path());
            let mut path = self.mount.clone();
            for segment in SourcePath::from_path(relative).segments() {
                path = path.join(segment);
            }
            let entry = SourceEntry {
                path,
                is_dir: entry.file_type().is_dir(),
            };
            if entry.is_dir && !descend(&entry) {
                walker.skip_current_dir();
            }
            entries.push(entry);
        }
        Ok(entries)
    }

    fn glob(&self, dir: &SourcePath, pattern: &str) -> Result<Vec<SourcePath>> {
        let matcher = matcher(pattern)?;
        let fs_dir = self.resolve(dir).ok_or_else(|| Self::not_found(dir))?;
        let io_err = |err| Error::Io {
            path: dir.clone(),
            err,
        };

        let mut matches = Vec::new();
        for result in std::fs::read_dir(&fs_dir).map_err(io_err)? {
            let entry = result.map_err(io_err)?;
            if entry.file_type().map_err(io_err)?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if matcher.is_match(&*name) {
                matches.push(dir.join(&name));
            }
        }
        matches.sort();
        Ok(matches)
    }

    fn read(&self, path: &SourcePath) -> Result<String> {
        let fs_path = self.resolve(path).ok_or_else(|| Self::not_found(path))?;
        std::fs::read_to_string(fs_path).map_err(|err| Error::Io {
            path: path.clone(),
            err,
        })
    }
}

/// An in-memory tree. Directories are implied by the file paths.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: BTreeMap<SourcePath, String>,
}

impl MemorySource {
    pub fn new() -> MemorySource {
        MemorySource::default()
    }

    /// Adds a file, builder style.
    pub fn with_file(mut self, path: &str, contents: &str) -> MemorySource {
        self.insert(path, contents);
        self
    }

    pub fn insert(&mut self, path: &str, contents: &str) {
        self.files
            .insert(SourcePath::parse(path), contents.to_owned());
    }
}

impl<'a> std::iter::FromIterator<(&'a str, &'a str)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut source = MemorySource::new();
        for (path, contents) in iter {
            source.insert(path, contents);
        }
        source
    }
}

impl Source for MemorySource {
    fn walk(&self, descend: &dyn Fn(&SourceEntry) -> bool) -> Result<Vec<SourceEntry>> {
        let mut dirs: BTreeSet<SourcePath> = BTreeSet::new();
        for path in self.files.keys() {
            let mut dir = path.parent();
            while !dir.is_root() {
                let parent = dir.parent();
                dirs.insert(dir);
                dir = parent;
            }
        }

        let mut all: Vec<SourceEntry> = dirs
            .into_iter()
            .map(|path| SourceEntry { path, is_dir: true })
            .chain(self.files.keys().map(|path| SourceEntry {
                path: path.clone(),
                is_dir: false,
            }))
            .collect();
        // Parents before children, siblings in lexical order.
        all.sort_by(|a, b| a.path.cmp(&b.path));

        let mut pruned: Vec<SourcePath> = Vec::new();
        let mut entries = Vec::new();
        for entry in all {
            if pruned.iter().any(|dir| entry.path.starts_with(dir)) {
                continue;
            }
            if entry.is_dir && !descend(&entry) {
                pruned.push(entry.path.clone());
            }
            entries.push(entry);
        }
        Ok(entries)
    }

    fn glob(&self, dir: &SourcePath, pattern: &str) -> Result<Vec<SourcePath>> {
        let matcher = matcher(pattern)?;
        Ok(self
            .files
            .keys()
            .filter(|path| path.depth() == dir.depth() + 1 && path.starts_with(dir))
            .filter(|path| path.file_name().map_or(false, |name| matcher.is_match(name)))
            .cloned()
            .collect())
    }

    fn read(&self, path: &SourcePath) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(path.clone()))
    }
}
