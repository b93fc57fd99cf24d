use crate::config::Config;
use crate::error::Result;
use crate::paths::{RelativePath, TreeRoot};
use ignore::WalkBuilder;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Enumerates every file in the asset tree
///
/// All of ignore's standard filters are off: hidden files and files listed
/// in `.gitignore` are still assets that may or may not be referenced.
pub struct FileFinder<'a> {
    config: &'a Config,
    skipped: HashSet<String>,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            skipped: HashSet::new(),
        }
    }

    /// Leave these files out of the universe, such as the report a previous
    /// run wrote into the tree
    pub fn skipping(mut self, files: impl IntoIterator<Item = RelativePath>) -> Self {
        self.skipped.extend(files.into_iter().map(|f| f.key()));
        self
    }

    /// Find all files under the tree root, in a stable order
    pub fn find_files(&self, root: &TreeRoot) -> Result<Vec<RelativePath>> {
        debug!("Scanning for files in: {}", root.base().display());

        let excluded_dirs = self.config.exclude_dirs.clone();
        let walker = WalkBuilder::new(root.base())
            .standard_filters(false)
            .overrides(self.config.exclude_overrides(root.base())?)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                let name = entry.file_name().to_string_lossy();
                !(is_dir
                    && entry.depth() > 0
                    && excluded_dirs.iter().any(|d| d.eq_ignore_ascii_case(&name)))
            })
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let path = root.to_relative(entry.path())?;
            if self.skipped.contains(&path.key()) {
                debug!("Skipping own file: {}", path);
                continue;
            }

            trace!("Found: {}", path);
            files.push(path);
        }

        debug!("Found {} files", files.len());
        Ok(files)
    }
}
