//! assetsweep - find unreferenced files in a game asset tree
//!
//! The tree has no declared dependency graph. Instead, starting from a set
//! of root files, each reached file's content is searched for the paths of
//! files not yet reached, using a few naming conventions of the Source
//! engine (sound and material shorthand, compiled model skin tables) plus a
//! fixed table of dependencies that no content mentions.
//!
//! # Architecture
//!
//! 1. **File Discovery** - Enumerate every file under the tree root
//! 2. **Path Normalization** - Canonical, case-insensitive relative paths
//! 3. **Reference Matching** - Heuristic search of file content
//! 4. **Synthetic Rules** - Edges asserted by table
//! 5. **Sweep** - Stack-based mark and sweep from the roots
//! 6. **Reporting** - Sorted list of files never reached

pub mod analysis;
pub mod config;
pub mod discovery;
pub mod error;
pub mod paths;
pub mod report;

pub use analysis::{ContentSource, ReferenceMatcher, RuleSet, ScanPolicy, SweepOutcome, Sweeper, TreeContentSource};
pub use config::Config;
pub use discovery::FileFinder;
pub use error::{Result, SweepError};
pub use paths::{RelativePath, TreeRoot};
pub use report::{ReportFormat, Reporter};

use std::collections::HashSet;

/// Discover every file under `root` and sweep from the configured roots
///
/// The loaded config file and the report are not assets: when they live in
/// the tree they are left out of the universe, unless listed as roots, so a
/// rerun reports the same files.
pub fn sweep_tree(root: &TreeRoot, config: &Config) -> Result<SweepOutcome> {
    let roots = config.root_paths()?;
    let root_keys: HashSet<String> = roots.iter().map(RelativePath::key).collect();

    let own_files = config
        .own_files()
        .into_iter()
        .filter_map(|path| root.to_relative(&path).ok())
        .filter(|path| !root_keys.contains(&path.key()));

    let universe = FileFinder::new(config).skipping(own_files).find_files(root)?;
    tracing::info!("Found {} files in the asset tree", universe.len());

    let source = TreeContentSource::new(root);
    Sweeper::new(&config.rules, &config.scan).run(&universe, &roots, &source)
}
