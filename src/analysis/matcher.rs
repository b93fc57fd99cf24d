//! Heuristic reference detection
//!
//! There is no parser here. A file "references" a candidate if any of a
//! handful of containment checks succeeds, so the matcher errs on the side
//! of keeping files. What it must never do is miss one of the shorthand
//! conventions below.

use crate::paths::{LeadingSegmentCache, ScannedContent, SEPARATOR};

const MATERIALS_DIR: &str = "materials\\";
const SOUND_DIR: &str = "sound\\";
const MATERIAL_EXT: &str = ".vmt";
const TEXTURE_EXT: &str = ".vtf";

/// Which heuristic recognised a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Material named by a compiled model's skin table
    ModelMaterial,
    /// Sound referenced without its `sound\` prefix
    SoundShorthand,
    /// Material referenced without `materials\` and `.vmt`
    MaterialShorthand,
    /// Texture referenced without `materials\` and `.vtf`
    TextureShorthand,
    /// Full path appears verbatim
    Verbatim,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::ModelMaterial => "model-material",
            MatchKind::SoundShorthand => "sound-shorthand",
            MatchKind::MaterialShorthand => "material-shorthand",
            MatchKind::TextureShorthand => "texture-shorthand",
            MatchKind::Verbatim => "verbatim",
        }
    }
}

/// Decides whether scanned content references a candidate path
#[derive(Debug, Default)]
pub struct ReferenceMatcher {
    segments: LeadingSegmentCache,
}

impl ReferenceMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Does `content` reference `needle`?
    pub fn contains(&mut self, content: &ScannedContent, needle: &str) -> bool {
        self.find(content, needle).is_some()
    }

    /// Like [`contains`](Self::contains), reporting which check matched
    pub fn find(&mut self, content: &ScannedContent, needle: &str) -> Option<MatchKind> {
        let needle = needle.to_ascii_lowercase();

        if content.is_model() && self.model_references(content, &needle) {
            return Some(MatchKind::ModelMaterial);
        }

        if needle.starts_with(SOUND_DIR) {
            let short = self.segments.strip(&needle);
            if content.contains(short) {
                return Some(MatchKind::SoundShorthand);
            }
        }

        if needle.starts_with(MATERIALS_DIR) {
            let short = self.segments.strip(&needle);
            if let Some(stem) = short.strip_suffix(MATERIAL_EXT) {
                if content.contains(stem) {
                    return Some(MatchKind::MaterialShorthand);
                }
            } else if let Some(stem) = short.strip_suffix(TEXTURE_EXT) {
                if content.contains(stem) {
                    return Some(MatchKind::TextureShorthand);
                }
            }
        }

        if content.contains(&needle) {
            return Some(MatchKind::Verbatim);
        }

        None
    }

    /// Compiled models store the material directory and the skin names as
    /// separate NUL-terminated strings, with the directory last
    fn model_references(&mut self, content: &ScannedContent, needle: &str) -> bool {
        if !needle.starts_with(MATERIALS_DIR) || !needle.ends_with(MATERIAL_EXT) {
            return false;
        }

        let Some((dir, skins)) = content.model_tokens().split_last() else {
            return false;
        };

        let short = self.segments.strip(needle).to_string();
        let dir = dir.trim_end_matches(SEPARATOR);
        let bare_dir = self.segments.strip(dir).to_string();

        skins.iter().any(|skin| {
            [dir, bare_dir.as_str()]
                .iter()
                .filter(|d| !d.is_empty())
                .any(|d| short == format!("{d}{SEPARATOR}{skin}{MATERIAL_EXT}"))
        })
    }
}
