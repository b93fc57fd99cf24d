//! Reachability analysis over the implicit asset reference graph
//!
//! A sweep starts from the configured root files, scans each reached file's
//! content for references to files not yet reached, and repeats until no
//! scannable file is left. Whatever was never reached is reported unused.

mod matcher;
mod rules;
mod sweep;

pub use matcher::{MatchKind, ReferenceMatcher};
pub use rules::{DerivedRule, FixedRule, RuleSet, SiblingRule};
pub use sweep::{ContentSource, Edge, EdgeKind, ScanPolicy, SweepOutcome, Sweeper, TreeContentSource};
