use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SweepError>;

/// Fatal conditions that abort a sweep.
///
/// None of these are recoverable: an incomplete scan would make the
/// "unused" list untrustworthy, so the run stops instead of skipping.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Path {} is outside the asset tree {}", path.display(), root.display())]
    OutsideTree { path: PathBuf, root: PathBuf },

    #[error("Expected a tree-relative path, got rooted path: {0}")]
    AlreadyRooted(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk asset tree: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Invalid exclude pattern: {0}")]
    Pattern(#[source] ignore::Error),

    #[error("Root file {0} does not exist in the asset tree")]
    MissingRoot(String),

    #[error("No root files configured")]
    NoRoots,
}
