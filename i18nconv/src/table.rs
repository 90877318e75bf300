//! Merging per-language flat mappings and laying them out as a table.
//!
//! Columns and rows use two different orderings on purpose: language codes are sorted by
//! code point ([`ordinal_compare`]) while keys are sorted with Unicode collation
//! ([`LocaleCollator`]). Both are plain comparators so callers can swap them through
//! [`tabulate_with`].

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    error::Error,
    types::{Corpus, Table},
};

/// Header label of the key column.
pub const KEY_HEADER: &str = "key";

/// Code point order.
pub fn ordinal_compare(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Locale-aware string comparison using the root collation at tertiary strength.
pub struct LocaleCollator {
    collator: Collator,
}

impl LocaleCollator {
    pub fn new() -> Result<Self, Error> {
        let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
            .map_err(|e| Error::Collation(e.to_string()))?;
        Ok(Self { collator })
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.collator.compare(a, b)
    }
}

impl std::fmt::Debug for LocaleCollator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleCollator").finish_non_exhaustive()
    }
}

/// Merges flat mappings, one per language, into a corpus.
///
/// The key set is the union of all mappings. A language appearing more than once keeps its
/// first position, and a value written twice for the same key and language is overwritten
/// by the later source.
pub fn merge<I>(sources: I) -> Corpus
where
    I: IntoIterator<Item = (String, IndexMap<String, String>)>,
{
    let mut corpus = Corpus::default();
    for (language, flat) in sources {
        debug!(language = %language, keys = flat.len(), "merging flattened document");
        corpus.add_language(language.clone());
        for (key, value) in flat {
            corpus.set(key, &language, value);
        }
    }
    corpus
}

/// Lays out a corpus as a table using the default orderings.
///
/// See [`tabulate_with`].
pub fn tabulate(corpus: &Corpus) -> Result<Table, Error> {
    let collator = LocaleCollator::new()?;
    tabulate_with(corpus, |a, b| collator.compare(a, b), ordinal_compare)
}

/// Lays out a corpus as a table.
///
/// The first row is `key` followed by the sorted languages; then one row per sorted key,
/// with an empty cell where a language has no value for the key. Every row has one cell
/// more than there are languages. Fails with [`Error::NoKeys`] on an empty corpus.
pub fn tabulate_with<K, L>(corpus: &Corpus, key_order: K, language_order: L) -> Result<Table, Error>
where
    K: Fn(&str, &str) -> Ordering,
    L: Fn(&str, &str) -> Ordering,
{
    if corpus.is_empty() {
        return Err(Error::NoKeys);
    }

    let mut languages: Vec<&str> = corpus.languages().iter().map(String::as_str).collect();
    languages.sort_by(|a, b| language_order(*a, *b));

    let mut keys: Vec<&str> = corpus.keys().collect();
    keys.sort_by(|a, b| key_order(*a, *b));

    let mut rows = Vec::with_capacity(keys.len() + 1);

    let mut header = vec![KEY_HEADER.to_string()];
    header.extend(languages.iter().map(|lang| lang.to_string()));
    rows.push(header);

    for key in keys {
        let translations = corpus.get(key);
        let mut row = Vec::with_capacity(languages.len() + 1);
        row.push(key.to_string());
        for lang in &languages {
            let value = translations
                .and_then(|values| values.get(*lang))
                .cloned()
                .unwrap_or_default();
            row.push(value);
        }
        rows.push(row);
    }

    debug!(
        languages = languages.len(),
        keys = rows.len() - 1,
        "tabulated corpus"
    );
    Ok(Table::new(rows))
}
