//! Strategies for locating a JSON object inside free-form model output.

/// One way of pulling a JSON candidate out of generated text.
pub trait ExtractionStrategy: Sync {
    fn name(&self) -> &'static str;

    /// The candidate substring, or `None` when this strategy does not apply.
    fn extract<'a>(&self, text: &'a str) -> Option<&'a str>;
}

/// Contents of a ```` ```json ```` fenced block.
pub struct FencedJsonBlock;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

impl ExtractionStrategy for FencedJsonBlock {
    fn name(&self) -> &'static str {
        "fenced_json_block"
    }

    fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = text.find(FENCE_OPEN)? + FENCE_OPEN.len();
        let rest = &text[start..];
        let end = rest.find(FENCE_CLOSE)?;
        let inner = rest[..end].trim();
        if inner.is_empty() {
            None
        } else {
            Some(inner)
        }
    }
}

/// Everything from the first `{` to the last `}`.
pub struct BraceSpan;

impl ExtractionStrategy for BraceSpan {
    fn name(&self) -> &'static str {
        "brace_span"
    }

    fn extract<'a>(&self, text: &'a str) -> Option<&'a str> {
        let first = text.find('{')?;
        let last = text.rfind('}')?;
        if last > first {
            Some(&text[first..=last])
        } else {
            None
        }
    }
}

/// Strategies in the order they are tried
pub static DEFAULT_STRATEGIES: &[&dyn ExtractionStrategy] = &[&FencedJsonBlock, &BraceSpan];

/// First candidate produced by `strategies`, with the name of the strategy
/// that found it.
pub fn find_candidate<'a>(
    text: &'a str,
    strategies: &[&dyn ExtractionStrategy],
) -> Option<(&'static str, &'a str)> {
    strategies
        .iter()
        .find_map(|strategy| strategy.extract(text).map(|c| (strategy.name(), c)))
}
