//! Classify free-text model output
//!
//! The model answers in loosely labelled lines. Parsing is deterministic:
//!
//! 1. Drop `<think>…</think>` reasoning blocks.
//! 2. The no-product sentinel anywhere wins over everything else.
//! 3. Otherwise the text after `New Product Name:` on its own line is the
//!    name, and the text after `Product Description:` is the description.
//! 4. No usable name means the response is malformed.

use crate::prompt::{DESCRIPTION_LABEL, NAME_LABEL, NO_PRODUCT_SENTINEL};
use crate::types::Outcome;
use herald_domain::ProductFinding;
use regex::Regex;
use std::sync::LazyLock;

static RE_REASONING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("reasoning pattern is valid"));

static RE_NAME: LazyLock<Regex> = LazyLock::new(|| label_pattern(NAME_LABEL));

static RE_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| label_pattern(DESCRIPTION_LABEL));

fn label_pattern(label: &str) -> Regex {
    // Value stays on the label's line
    Regex::new(&format!(r"{}[ \t]*(.*)", regex::escape(label))).expect("label pattern is valid")
}

/// Remove reasoning blocks and surrounding whitespace
pub fn strip_reasoning(raw: &str) -> String {
    RE_REASONING.replace_all(raw, "").trim().to_string()
}

/// Parse a raw model response into an [`Outcome`]
///
/// The description is truncated to `description_max_chars` characters.
pub fn parse_response(raw: &str, description_max_chars: usize) -> Outcome {
    let cleaned = strip_reasoning(raw);

    if cleaned.is_empty() {
        return Outcome::Malformed("empty response".to_string());
    }

    if cleaned.contains(NO_PRODUCT_SENTINEL) {
        return Outcome::NotFound;
    }

    let Some(name) = label_value(&RE_NAME, &cleaned) else {
        return Outcome::Malformed(format!("no '{}' line in response", NAME_LABEL));
    };
    let description = label_value(&RE_DESCRIPTION, &cleaned).unwrap_or_default();

    match ProductFinding::new(name, description, description_max_chars) {
        Some(finding) => Outcome::Found(finding),
        None => Outcome::Malformed(format!("'{}' line is blank", NAME_LABEL)),
    }
}

/// First labelled value, with markdown emphasis and whitespace trimmed
fn label_value(pattern: &Regex, text: &str) -> Option<String> {
    let captures = pattern.captures(text)?;
    let value = captures
        .get(1)?
        .as_str()
        .trim_matches(|c: char| c == '*' || c.is_whitespace());
    Some(value.to_string())
}
