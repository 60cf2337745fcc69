use memchr::memmem;

/// Literal marker introducing a chart descriptor inside an answer.
pub const CHART_SENTINEL: &str = "Chart Data:";

const BLOCK_TERMINATOR: &str = "\n\n";

/// The serialized descriptor text captured after the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBlock {
    pub raw_text: String,
}

/// Result of splitting an answer into prose and an optional descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<'a> {
    pub prose: &'a str,
    pub block: Option<ChartBlock>,
}

impl<'a> Extraction<'a> {
    fn unchanged(raw: &'a str) -> Self {
        Self {
            prose: raw,
            block: None,
        }
    }
}

/// Split `raw` at the first chart sentinel.
///
/// The block runs from just after the sentinel to the first blank line
/// (`"\n\n"`) or the end of the text. The prose is only what precedes the
/// sentinel: anything after the block is dropped along with it.
///
/// A sentinel with nothing but whitespace behind it is not a chart; the
/// text comes back untouched.
pub fn extract(raw: &str) -> Extraction<'_> {
    let Some(start) = memmem::find(raw.as_bytes(), CHART_SENTINEL.as_bytes()) else {
        return Extraction::unchanged(raw);
    };

    let after = &raw[start + CHART_SENTINEL.len()..];
    let end = memmem::find(after.as_bytes(), BLOCK_TERMINATOR.as_bytes()).unwrap_or(after.len());
    let captured = &after[..end];

    if captured.trim().is_empty() {
        return Extraction::unchanged(raw);
    }

    Extraction {
        prose: &raw[..start],
        block: Some(ChartBlock {
            raw_text: captured.to_string(),
        }),
    }
}
