use crate::mapping::Mapping;

/// Build the catalog to write.
///
/// Starts from `prior`, overlays `translated`, fills any source key that is
/// still missing with its English text, then orders the result by `source`.
/// Keys that no longer exist in `source` are dropped.
pub fn merge_translations(source: &Mapping, mut prior: Mapping, translated: Mapping) -> Mapping {
    prior.extend(translated);

    source
        .iter()
        .map(|(key, english)| {
            let value = prior.swap_remove(key).unwrap_or_else(|| english.clone());
            (key.clone(), value)
        })
        .collect()
}
