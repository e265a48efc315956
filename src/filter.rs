//! Selection of the keys that need translation in this run.

use crate::mapping::Mapping;

/// Key segment marking tool names, which are never translated.
const TOOL_SEGMENT: &str = ".tool.";

/// Key segment marking bibliographic sources.
const SOURCE_SEGMENT: &str = ".source.";

/// Source fields that hold bibliographic metadata rather than prose.
const SOURCE_METADATA_MARKERS: [&str; 4] = [".url", ".title", ".publisher", ".year"];

/// Whether a key's content is eligible for translation at all.
///
/// Tool names and bibliographic metadata (source url/title/publisher/year)
/// are kept verbatim.
pub fn should_translate_key(key: &str) -> bool {
    if key.contains(TOOL_SEGMENT) {
        return false;
    }
    if key.contains(SOURCE_SEGMENT)
        && SOURCE_METADATA_MARKERS
            .iter()
            .any(|marker| key.contains(marker))
    {
        return false;
    }
    true
}

/// Split a comma-separated prefix list, trimming whitespace around each entry.
///
/// An empty string means no prefix list. Empty entries are kept; an empty
/// prefix matches every key, so `"p011,"` selects all keys.
pub fn parse_prefixes(raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return None;
    }

    Some(raw.split(',').map(|p| p.trim().to_string()).collect())
}

/// Compute the keys to translate, in source order.
///
/// A key is selected when its content is eligible, it is not already
/// translated (unless `overwrite`), and it matches one of `prefixes` when a
/// prefix list is given. A target value that differs from the source value
/// counts as "already translated".
pub fn select_keys(
    source: &Mapping,
    target: &Mapping,
    overwrite: bool,
    prefixes: Option<&[String]>,
) -> Vec<String> {
    source
        .iter()
        .filter(|(key, _)| should_translate_key(key))
        .filter(|(key, value)| {
            overwrite
                || target
                    .get(key.as_str())
                    .map_or(true, |existing| existing == *value)
        })
        .filter(|(key, _)| {
            prefixes.map_or(true, |prefixes| {
                prefixes.iter().any(|prefix| key.starts_with(prefix.as_str()))
            })
        })
        .map(|(key, _)| key.clone())
        .collect()
}

/// Total number of characters that would be sent for `keys`.
pub fn character_count(source: &Mapping, keys: &[String]) -> usize {
    keys.iter()
        .filter_map(|key| source.get(key))
        .map(|text| text.chars().count())
        .sum()
}
