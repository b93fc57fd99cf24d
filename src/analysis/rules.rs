//! Fixed dependency rules that no content scan can discover
//!
//! Compiled maps are never referenced by their own source, and a model's
//! vertex and physics data are found by the engine from the model's name.
//! These edges are asserted by table instead.

use crate::paths::{RelativePath, SEPARATOR};
use serde::{Deserialize, Serialize};

/// One exact file that implies a list of other exact files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedRule {
    pub source: String,
    pub implies: Vec<String>,
}

/// Any file with `extension` implies paths built from its stem
///
/// `{name}` in each template is replaced by the file name minus `extension`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DerivedRule {
    pub extension: String,
    pub implies: Vec<String>,
}

/// Any file with `extension` implies the same path with each sibling
/// extension substituted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiblingRule {
    pub extension: String,
    pub sibling_extensions: Vec<String>,
}

/// The closed table of synthetic dependencies for a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleSet {
    pub fixed: Vec<FixedRule>,
    pub derived: Vec<DerivedRule>,
    pub siblings: Vec<SiblingRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            fixed: vec![FixedRule {
                source: "hc_changelog.txt".to_string(),
                implies: vec![
                    "hc_changelog_chris.txt".to_string(),
                    "hc_changelog_dky.txt".to_string(),
                    "hc_changelog_jeff.txt".to_string(),
                ],
            }],
            derived: vec![DerivedRule {
                extension: ".vmf".to_string(),
                implies: vec![
                    "maps\\{name}.bsp".to_string(),
                    "maps\\graphs\\{name}.ain".to_string(),
                    "maps\\soundcache\\{name}.cache".to_string(),
                ],
            }],
            siblings: vec![SiblingRule {
                extension: ".mdl".to_string(),
                sibling_extensions: vec![
                    ".dx80.vtx".to_string(),
                    ".dx90.vtx".to_string(),
                    ".phy".to_string(),
                    ".sw.vtx".to_string(),
                    ".vvd".to_string(),
                ],
            }],
        }
    }
}

impl RuleSet {
    /// A rule set that asserts nothing
    pub fn empty() -> Self {
        Self {
            fixed: Vec::new(),
            derived: Vec::new(),
            siblings: Vec::new(),
        }
    }

    /// Does scanning `scanned` imply that `candidate` is used?
    ///
    /// Every rule whose source matches is consulted, so several rules may
    /// contribute to the same source file or extension.
    pub fn implies(&self, scanned: &RelativePath, candidate: &RelativePath) -> bool {
        let scanned_key = scanned.key();
        let candidate_key = candidate.key();
        let file_name = scanned.file_name().to_ascii_lowercase();

        let fixed = self
            .fixed
            .iter()
            .filter(|rule| normalize(&rule.source) == scanned_key)
            .any(|rule| rule.implies.iter().any(|p| normalize(p) == candidate_key));

        let derived = || {
            self.derived.iter().any(|rule| {
                let extension = rule.extension.to_ascii_lowercase();
                file_name.strip_suffix(&extension).is_some_and(|name| {
                    rule.implies
                        .iter()
                        .any(|template| normalize(&template.replace("{name}", name)) == candidate_key)
                })
            })
        };

        let siblings = || {
            self.siblings.iter().any(|rule| {
                let extension = rule.extension.to_ascii_lowercase();
                scanned_key.strip_suffix(&extension).is_some_and(|base| {
                    rule.sibling_extensions
                        .iter()
                        .any(|ext| format!("{}{}", base, ext.to_ascii_lowercase()) == candidate_key)
                })
            })
        };

        fixed || derived() || siblings()
    }
}

/// Lowercase and fold separators so configured paths compare like keys
fn normalize(path: &str) -> String {
    path.to_ascii_lowercase().replace('/', &SEPARATOR.to_string())
}
