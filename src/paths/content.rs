use super::SEPARATOR;

/// 4-byte magic number at the start of compiled model (`.mdl`) files
pub const MODEL_SIGNATURE: &[u8; 4] = b"IDST";

/// File content prepared for case and separator insensitive searching
#[derive(Debug, Clone)]
pub struct ScannedContent {
    text: String,
    is_model: bool,
    model_tokens: Vec<String>,
}

impl ScannedContent {
    /// Lowercased content with every `/` folded into `\`
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the raw bytes began with [`MODEL_SIGNATURE`]
    pub fn is_model(&self) -> bool {
        self.is_model
    }

    /// Printable NUL-delimited strings of a model, in file order; empty
    /// unless [`is_model`](Self::is_model)
    pub fn model_tokens(&self) -> &[String] {
        &self.model_tokens
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }
}

/// Normalize raw file bytes once, before any candidate is tested against them
///
/// The model signature is checked on the raw bytes since lowercasing would
/// erase it. Non-UTF-8 sequences are replaced, which never produces ASCII,
/// so ASCII path needles match exactly as they would against the bytes.
pub fn preprocess(raw: &[u8]) -> ScannedContent {
    let is_model = raw.starts_with(MODEL_SIGNATURE);

    let folded: Vec<u8> = raw
        .iter()
        .map(|b| match b {
            b'/' => SEPARATOR as u8,
            other => other.to_ascii_lowercase(),
        })
        .collect();

    let text = String::from_utf8_lossy(&folded).into_owned();
    let model_tokens = if is_model {
        split_model_tokens(&text)
    } else {
        Vec::new()
    };

    ScannedContent {
        text,
        is_model,
        model_tokens,
    }
}

/// Non-empty runs between NUL bytes that are entirely printable ASCII
fn split_model_tokens(text: &str) -> Vec<String> {
    text.split('\0')
        .filter(|token| !token.is_empty())
        .filter(|token| token.bytes().all(|b| b == b' ' || b.is_ascii_graphic()))
        .map(str::to_string)
        .collect()
}
