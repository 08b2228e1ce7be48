//! Markup-to-text normalization
//!
//! Filing documents are HTML (often Word exports) sprinkled with
//! non-breaking spaces and form checkbox glyphs. Normalized text is a single
//! line: tags stripped, artifact glyphs turned into spaces, whitespace runs
//! collapsed, ends trimmed. Applying [`normalize`] twice yields the same text.
//!
//! Only input with something that reads as markup (a tag opener or a
//! character reference) goes through the HTML parser. Decoded text that would
//! read as markup again, such as `<NYSE>` from `&lt;NYSE&gt;`, gets a space
//! after its `<` or `&` so the output is never reparsed.

use regex::Regex;
use scraper::{Html, Node};
use std::sync::LazyLock;

static RE_TAG_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z/!?])").expect("tag pattern is valid"));

static RE_CHAR_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#|[A-Za-z0-9]+;)").expect("reference pattern is valid"));

/// Glyphs from the filing source that are replaced with an ordinary space
const ARTIFACT_GLYPHS: &[char] = &[
    '\u{00A0}', // no-break space
    '\u{2007}', // figure space
    '\u{202F}', // narrow no-break space
    '\u{2009}', // thin space
    '\u{2610}', // ballot box
    '\u{2611}', // ballot box with check
    '\u{2612}', // ballot box with x
];

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Convert raw markup into clean plain text
///
/// # Examples
///
/// ```
/// use herald_extractor::normalize;
///
/// let text = normalize("<p>Item&nbsp;8.01</p>\n<p>  Other   Events</p>");
/// assert_eq!(text, "Item 8.01 Other Events");
/// assert_eq!(normalize(&text), text);
/// ```
pub fn normalize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    if !looks_like_markup(raw) {
        return clean(raw);
    }

    let document = Html::parse_document(raw);
    let mut text = String::with_capacity(raw.len() / 2);

    for node in document.root_element().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        text.push_str(fragment);
        text.push(' ');
    }

    defuse(&clean(&text))
}

fn looks_like_markup(text: &str) -> bool {
    RE_TAG_OPEN.is_match(text) || RE_CHAR_REF.is_match(text)
}

/// Break up decoded sequences that would parse as markup on another pass
fn defuse(text: &str) -> String {
    let text = RE_TAG_OPEN.replace_all(text, "< $1");
    RE_CHAR_REF.replace_all(&text, "& $1").into_owned()
}

fn clean(text: &str) -> String {
    text.replace(ARTIFACT_GLYPHS, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
