use crate::analysis::{RuleSet, ScanPolicy};
use crate::error::{Result as SweepResult, SweepError};
use crate::paths::RelativePath;
use ignore::overrides::{Override, OverrideBuilder};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for an asset sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Files that are always in use; the sweep starts here
    pub roots: Vec<String>,

    /// Directory names that are skipped entirely while walking the tree
    pub exclude_dirs: Vec<String>,

    /// Glob patterns for files left out of the universe
    pub exclude: Vec<String>,

    /// Report configuration
    pub report: ReportConfig,

    /// Dependencies asserted by rule rather than found by scanning
    pub rules: RuleSet,

    /// Which reached files get scanned for further references
    pub scan: ScanPolicy,

    /// File this configuration was loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: text, json
    pub format: String,

    /// Report file, relative to the working directory
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: vec![],
            exclude_dirs: vec![".svn".to_string()],
            exclude: vec![],
            report: ReportConfig::default(),
            rules: RuleSet::default(),
            scan: ScanPolicy::default(),
            source: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            output: PathBuf::from("sweep.txt"),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let mut config: Self = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str::<Self>(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }?;

        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Try to load configuration from default locations in the asset tree
    pub fn from_default_locations(tree_root: &Path) -> Result<Self> {
        let default_names = [
            ".assetsweep.yml",
            ".assetsweep.yaml",
            ".assetsweep.toml",
            "assetsweep.yml",
            "assetsweep.yaml",
            "assetsweep.toml",
        ];

        for name in &default_names {
            let path = tree_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    /// Parse the configured roots into tree-relative paths
    pub fn root_paths(&self) -> SweepResult<Vec<RelativePath>> {
        if self.roots.is_empty() {
            return Err(SweepError::NoRoots);
        }
        self.roots.iter().map(|r| RelativePath::parse(r)).collect()
    }

    /// Build the exclusion matcher for a walk rooted at `tree_root`
    ///
    /// Patterns use gitignore syntax relative to the tree root: `*.bak`
    /// matches at any depth, `maps/*.bak` only directly under `maps`. Either
    /// separator is accepted and matching ignores case.
    pub fn exclude_overrides(&self, tree_root: &Path) -> SweepResult<Override> {
        let mut builder = OverrideBuilder::new(tree_root);
        builder.case_insensitive(true).map_err(SweepError::Pattern)?;

        for pattern in &self.exclude {
            let pattern = pattern.trim().replace('\\', "/");
            if pattern.is_empty() {
                continue;
            }
            // A leading `!` makes an override glob exclude instead of include
            builder
                .add(&format!("!{}", pattern))
                .map_err(SweepError::Pattern)?;
        }

        builder.build().map_err(SweepError::Pattern)
    }

    /// Files the tool itself reads or writes: the loaded config and the
    /// report, as absolute paths
    ///
    /// A relative report path is resolved against the working directory,
    /// the same way it is written.
    pub fn own_files(&self) -> Vec<PathBuf> {
        self.source
            .iter()
            .chain(std::iter::once(&self.report.output))
            .filter_map(|path| resolve(path))
            .collect()
    }
}

/// Absolute path with a canonical parent; the file itself need not exist
fn resolve(path: &Path) -> Option<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(path)
    };

    let name = absolute.file_name()?;
    let parent = std::fs::canonicalize(absolute.parent()?).ok()?;
    Some(parent.join(name))
}
