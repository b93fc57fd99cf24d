use super::matcher::{MatchKind, ReferenceMatcher};
use super::rules::RuleSet;
use crate::error::{Result, SweepError};
use crate::paths::{preprocess, RelativePath, TreeRoot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Where file bytes come from during a sweep
pub trait ContentSource {
    fn read(&self, path: &RelativePath) -> Result<Vec<u8>>;
}

/// Reads files from disk under a tree root
pub struct TreeContentSource<'a> {
    root: &'a TreeRoot,
}

impl<'a> TreeContentSource<'a> {
    pub fn new(root: &'a TreeRoot) -> Self {
        Self { root }
    }
}

impl ContentSource for TreeContentSource<'_> {
    fn read(&self, path: &RelativePath) -> Result<Vec<u8>> {
        let absolute = self.root.to_absolute(path)?;
        std::fs::read(&absolute).map_err(|source| SweepError::Read {
            path: absolute,
            source,
        })
    }
}

/// Which reached files are worth scanning for further references
///
/// Audio, compiled maps, textures and caches never name other assets in a
/// form the matcher understands, so they are marked reached but not read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanPolicy {
    /// File extensions that are never scanned
    pub skip_extensions: Vec<String>,

    /// Substrings that exclude a path from scanning wherever they appear
    pub skip_markers: Vec<String>,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            skip_extensions: vec![
                ".wav".to_string(),
                ".bsp".to_string(),
                ".vtf".to_string(),
                ".cache".to_string(),
            ],
            skip_markers: vec!["hc_changelog".to_string()],
        }
    }
}

impl ScanPolicy {
    pub fn is_pursuable(&self, path: &RelativePath) -> bool {
        let key = path.key();
        let skipped_extension = self
            .skip_extensions
            .iter()
            .any(|ext| key.ends_with(&ext.to_ascii_lowercase()));
        let skipped_marker = self
            .skip_markers
            .iter()
            .any(|marker| key.contains(&marker.to_ascii_lowercase()));
        !(skipped_extension || skipped_marker)
    }
}

/// How a reachability edge was established
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Reference(MatchKind),
    Synthetic,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Reference(kind) => kind.as_str(),
            EdgeKind::Synthetic => "synthetic",
        }
    }
}

/// A dependency found while scanning `from`
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: RelativePath,
    pub to: RelativePath,
    pub kind: EdgeKind,
}

/// Result of a completed sweep
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// Every file proven reachable, keyed by lowercased path
    pub reached: BTreeMap<String, RelativePath>,

    /// Files never reached, sorted
    pub unreached: Vec<RelativePath>,

    /// Files whose content was scanned, in scan order
    pub scanned: Vec<RelativePath>,

    /// Edges in discovery order
    pub edges: Vec<Edge>,
}

impl SweepOutcome {
    pub fn total_files(&self) -> usize {
        self.reached.len() + self.unreached.len()
    }
}

/// Stack-based mark and sweep over the implicit reference graph
pub struct Sweeper<'a> {
    rules: &'a RuleSet,
    policy: &'a ScanPolicy,
}

impl<'a> Sweeper<'a> {
    pub fn new(rules: &'a RuleSet, policy: &'a ScanPolicy) -> Self {
        Self { rules, policy }
    }

    /// Mark everything reachable from `roots`, returning what was never reached
    pub fn run(
        &self,
        universe: &[RelativePath],
        roots: &[RelativePath],
        source: &dyn ContentSource,
    ) -> Result<SweepOutcome> {
        let mut unreached: BTreeMap<String, RelativePath> = universe
            .iter()
            .map(|path| (path.key(), path.clone()))
            .collect();

        let mut reached = BTreeMap::new();
        let mut stack = Vec::with_capacity(roots.len());

        for root in roots {
            let key = root.key();
            let Some(path) = unreached.remove(&key) else {
                if reached.contains_key(&key) {
                    continue;
                }
                return Err(SweepError::MissingRoot(root.to_string()));
            };
            reached.insert(key, path.clone());
            stack.push(path);
        }

        let mut matcher = ReferenceMatcher::new();
        let mut scanned = Vec::new();
        let mut edges = Vec::new();

        while !unreached.is_empty() {
            let Some(path) = stack.pop() else {
                break;
            };

            info!("Scanning {}...", path);
            let content = preprocess(&source.read(&path)?);
            scanned.push(path.clone());

            let snapshot: Vec<String> = unreached.keys().cloned().collect();
            for key in snapshot {
                let candidate = &unreached[&key];

                let kind = match matcher.find(&content, candidate.as_str()) {
                    Some(kind) => EdgeKind::Reference(kind),
                    None if self.rules.implies(&path, candidate) => EdgeKind::Synthetic,
                    None => continue,
                };

                let Some(found) = unreached.remove(&key) else {
                    continue;
                };
                debug!("Found {} ({})", found, kind.as_str());

                if self.policy.is_pursuable(&found) {
                    stack.push(found.clone());
                }
                edges.push(Edge {
                    from: path.clone(),
                    to: found.clone(),
                    kind,
                });
                reached.insert(key, found);
            }
        }

        let mut unreached: Vec<RelativePath> = unreached.into_values().collect();
        unreached.sort();

        Ok(SweepOutcome {
            reached,
            unreached,
            scanned,
            edges,
        })
    }
}
