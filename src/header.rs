use std::sync::LazyLock;

use regex::Regex;

use crate::domain::OrganismAnnotation;

// A bracketed `key=value` span on a single line; brackets themselves are excluded.
static ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]\r\n]+=[^\]\r\n]+)\]").expect("annotation pattern is valid")
});

/// Returns the interior of the first bracketed `key=value` span in `raw_text`.
///
/// The whole document is scanned, not only header lines, and later annotations are ignored.
/// `None` means the source carries no organism information.
pub fn extract(raw_text: &str) -> Option<OrganismAnnotation> {
    ANNOTATION_RE
        .captures(raw_text)
        .and_then(|caps| caps.get(1))
        .map(|value| OrganismAnnotation::new(value.as_str()))
}
