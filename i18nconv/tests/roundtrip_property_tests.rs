use i18nconv::{Corpus, Node, build_nested, flatten, merge, tabulate};
use indexmap::IndexMap;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

fn segment_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,7}").expect("valid segment regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?]{1,20}").expect("valid value regex")
}

fn language_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{2}(-[A-Z]{2})?").expect("valid language regex")
}

/// Nested documents up to three levels deep with non-empty string leaves.
fn document_strategy() -> impl Strategy<Value = Node> {
    let leaf = value_strategy().prop_map(Node::Leaf);
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map(segment_strategy(), inner, 1..4).prop_map(|children| {
            Node::Internal(children.into_iter().collect::<IndexMap<_, _>>())
        })
    })
    .prop_map(|node| match node {
        Node::Leaf(value) => {
            let mut root = Node::new();
            root.set_leaf("root", value);
            root
        }
        internal => internal,
    })
}

fn flat_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(segment_strategy(), value_strategy(), 1..8)
}

fn to_index_map(values: &BTreeMap<String, String>) -> IndexMap<String, String> {
    values
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Removes empty internal nodes, which carry no leaf and do not survive flattening.
fn prune(node: &Node) -> Option<Node> {
    match node {
        Node::Leaf(value) => Some(Node::Leaf(value.clone())),
        Node::Internal(children) => {
            let kept: IndexMap<String, Node> = children
                .iter()
                .filter_map(|(key, child)| prune(child).map(|child| (key.clone(), child)))
                .collect();
            (!kept.is_empty()).then_some(Node::Internal(kept))
        }
    }
}

proptest! {
    #[test]
    fn prop_flatten_then_build_restores_document(document in document_strategy()) {
        let flat = flatten(&document, ".");
        let corpus = Corpus::from_flat("en", flat);
        let rebuilt = build_nested(&corpus, "en", "en");

        prop_assert_eq!(prune(&rebuilt), prune(&document));
    }

    #[test]
    fn prop_flatten_single_level_is_identity(values in flat_strategy()) {
        let mut document = Node::new();
        for (key, value) in &values {
            document.set_leaf(key, value.clone());
        }

        let flat = flatten(&document, ".");
        prop_assert_eq!(flat, to_index_map(&values));
    }

    #[test]
    fn prop_build_nested_covers_exactly_corpus_keys(values in flat_strategy()) {
        let corpus = Corpus::from_flat("en", to_index_map(&values));
        let document = build_nested(&corpus, "en", "en");

        let flat = flatten(&document, ".");
        let produced: BTreeSet<_> = flat.keys().cloned().collect();
        let expected: BTreeSet<_> = values.keys().cloned().collect();
        prop_assert_eq!(produced, expected);
    }

    #[test]
    fn prop_tabulate_covers_union_of_keys(
        sources in prop::collection::vec((language_strategy(), flat_strategy()), 1..4)
    ) {
        let corpus = merge(
            sources
                .iter()
                .map(|(lang, values)| (lang.clone(), to_index_map(values))),
        );
        let table = tabulate(&corpus).unwrap();

        let languages: BTreeSet<_> = sources.iter().map(|(lang, _)| lang.clone()).collect();
        let keys: BTreeSet<_> = sources
            .iter()
            .flat_map(|(_, values)| values.keys().cloned())
            .collect();

        prop_assert_eq!(table.len(), keys.len() + 1);
        prop_assert!(table.rows.iter().all(|row| row.len() == languages.len() + 1));

        let tabulated: BTreeSet<_> = table.data_rows().iter().map(|row| row[0].clone()).collect();
        prop_assert_eq!(tabulated, keys);

        let header = table.header().unwrap();
        let mut sorted_languages: Vec<_> = languages.into_iter().collect();
        sorted_languages.sort();
        prop_assert_eq!(&header[1..], sorted_languages.as_slice());
    }

    #[test]
    fn prop_tabulate_is_deterministic(
        sources in prop::collection::vec((language_strategy(), flat_strategy()), 1..4)
    ) {
        let build = || {
            tabulate(&merge(
                sources
                    .iter()
                    .map(|(lang, values)| (lang.clone(), to_index_map(values))),
            ))
            .unwrap()
        };
        prop_assert_eq!(build(), build());
    }

    #[test]
    fn prop_fallback_fills_missing_language(values in flat_strategy()) {
        let mut corpus = Corpus::from_flat("en", to_index_map(&values));
        corpus.add_language("fr");
        let fr = build_nested(&corpus, "fr", "en");

        for (key, value) in &values {
            prop_assert_eq!(fr.leaf_at(key), Some(value.as_str()));
        }
    }
}
