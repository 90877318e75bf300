//! Folding flat key paths into one nested document per language.

use tracing::debug;

use crate::types::{Corpus, Node, Translations};

/// Separator used to split key paths when building documents.
pub const KEY_PATH_SEPARATOR: char = '.';

/// Splits a key path into its segments.
///
/// Empty segments (from `a..b`, or a leading/trailing dot) are kept as `""` keys.
pub fn split_key_path(key: &str) -> Vec<&str> {
    key.split(KEY_PATH_SEPARATOR).collect()
}

/// Picks the value written for `target`.
///
/// The target's value wins when present and non-empty, then the fallback's value under the
/// same condition, else the empty string. An empty target value counts as missing.
pub fn resolve_value<'a>(translations: &'a Translations, target: &str, fallback: &str) -> &'a str {
    translations
        .get(target)
        .filter(|value| !value.is_empty())
        .or_else(|| translations.get(fallback).filter(|value| !value.is_empty()))
        .map(String::as_str)
        .unwrap_or("")
}

/// Builds the document of `target` from every key of `corpus`.
///
/// Keys are applied in corpus order, so when two keys disagree on the shape of a path
/// (`a` as a leaf and `a.b` below it) the later key decides; see
/// [`Node::child_mut_or_coerce`] and [`Node::set_leaf`].
pub fn build_nested(corpus: &Corpus, target: &str, fallback: &str) -> Node {
    let mut root = Node::new();

    for (key, translations) in corpus.entries() {
        let segments = split_key_path(key);
        let Some((last, parents)) = segments.split_last() else {
            continue;
        };

        let value = resolve_value(translations, target, fallback);
        let mut current = &mut root;
        for segment in parents {
            current = current.child_mut_or_coerce(segment);
        }
        current.set_leaf(last, value);
    }

    debug!(
        target_language = target,
        fallback_language = fallback,
        keys = corpus.len(),
        "built nested document"
    );
    root
}
