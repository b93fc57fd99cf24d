//! Path normalization for the asset tree
//!
//! Every file is identified by a [`RelativePath`] using `\` as separator,
//! which is also the separator that scanned content is folded into. That way
//! a needle can be searched for verbatim in preprocessed content regardless
//! of how the host platform or the referencing file spells separators.

mod content;

pub use content::{preprocess, ScannedContent, MODEL_SIGNATURE};

use crate::error::{Result, SweepError};
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Canonical separator used for all relative paths and scanned content
pub const SEPARATOR: char = '\\';

/// A file path relative to the tree root, case preserving
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativePath(String);

impl RelativePath {
    /// Parse a configured path such as `maps/src/hc_t0a0.vmf` or
    /// `maps\src\hc_t0a0.vmf`
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.starts_with(['/', '\\']) || Path::new(trimmed).has_root() || has_drive(trimmed) {
            return Err(SweepError::AlreadyRooted(raw.to_string()));
        }

        let joined = trimmed
            .split(['/', '\\'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\\");

        Ok(Self(joined))
    }

    /// Build from already-relative path components
    fn from_components(path: &Path) -> Self {
        let joined = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\\");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form; two paths are the same file if their keys are equal
    pub fn key(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Render with the host's separator, for reports
    pub fn to_native(&self) -> String {
        self.0.replace(SEPARATOR, std::path::MAIN_SEPARATOR_STR)
    }

    /// Final path component
    pub fn file_name(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or(&self.0)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn has_drive(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// The absolute base directory every relative path is computed against
#[derive(Debug, Clone)]
pub struct TreeRoot {
    base: PathBuf,
}

impl TreeRoot {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Strip the tree root off an absolute path
    pub fn to_relative(&self, absolute: &Path) -> Result<RelativePath> {
        let stripped = absolute
            .strip_prefix(&self.base)
            .map_err(|_| SweepError::OutsideTree {
                path: absolute.to_path_buf(),
                root: self.base.clone(),
            })?;

        if stripped
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(SweepError::OutsideTree {
                path: absolute.to_path_buf(),
                root: self.base.clone(),
            });
        }

        Ok(RelativePath::from_components(stripped))
    }

    /// Join a relative path back onto the tree root
    pub fn to_absolute(&self, relative: &RelativePath) -> Result<PathBuf> {
        let raw = relative.as_str();
        if raw.starts_with(SEPARATOR) || Path::new(raw).has_root() || has_drive(raw) {
            return Err(SweepError::AlreadyRooted(raw.to_string()));
        }

        Ok(relative
            .as_str()
            .split(SEPARATOR)
            .fold(self.base.clone(), |acc, part| acc.join(part)))
    }
}

/// Drop the first component of a path
///
/// `materials\metal\wall.vtf` becomes `metal\wall.vtf`. A path with no
/// separator loses its only component and becomes empty.
pub fn strip_leading_segment(path: &str) -> String {
    let rest = path
        .split(['/', '\\'])
        .skip(1)
        .collect::<Vec<_>>()
        .join("\\");

    match rest.strip_prefix(SEPARATOR) {
        Some(trimmed) => trimmed.to_string(),
        None => rest,
    }
}

/// Memoized [`strip_leading_segment`], scoped to one sweep
///
/// The same candidate is stripped once per scanned file, so over a run the
/// number of distinct inputs is bounded by the universe size.
#[derive(Debug, Default)]
pub struct LeadingSegmentCache {
    memo: HashMap<String, String>,
}

impl LeadingSegmentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strip(&mut self, path: &str) -> &str {
        if !self.memo.contains_key(path) {
            self.memo
                .insert(path.to_string(), strip_leading_segment(path));
        }
        &self.memo[path]
    }

    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}
