//! Core, format-agnostic types for i18nconv.
//! The CSV reader decodes into [`Table`] and [`Corpus`]; the JSON reader decodes into [`Node`].

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Per-language values of one key, in the order the languages were seen.
pub type Translations = IndexMap<String, String>;

/// One key path together with its value in every language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    /// Separator-joined key path, e.g. `menu.file.open`.
    pub key: String,
    /// Language code to value.
    pub translations: Translations,
}

impl FlatEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            translations: Translations::new(),
        }
    }

    /// Sets the value for a language, replacing any previous value.
    pub fn with_translation(mut self, language: impl Into<String>, value: impl Into<String>) -> Self {
        self.translations.insert(language.into(), value.into());
        self
    }
}

/// Every key of one run with its per-language values, plus the participating languages.
///
/// Keys keep the position of their first insertion; re-inserting a key replaces its values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    languages: Vec<String>,
    entries: IndexMap<String, Translations>,
}

impl Corpus {
    pub fn new(languages: Vec<String>) -> Self {
        Self {
            languages,
            entries: IndexMap::new(),
        }
    }

    /// Builds a corpus holding a single language from a flat key/value mapping.
    pub fn from_flat(language: impl Into<String>, flat: IndexMap<String, String>) -> Self {
        let language = language.into();
        let mut corpus = Corpus::new(vec![language.clone()]);
        for (key, value) in flat {
            corpus.set(key, &language, value);
        }
        corpus
    }

    /// Inserts an entry, replacing the values of an existing key in place.
    ///
    /// Returns `true` when the key was already present.
    pub fn insert(&mut self, entry: FlatEntry) -> bool {
        self.entries
            .insert(entry.key, entry.translations)
            .is_some()
    }

    /// Sets one value, creating the key if needed. Later writes win.
    pub fn set(&mut self, key: impl Into<String>, language: &str, value: impl Into<String>) {
        self.entries
            .entry(key.into())
            .or_default()
            .insert(language.to_string(), value.into());
    }

    /// Registers a language unless it is already known.
    pub fn add_language(&mut self, language: impl Into<String>) {
        let language = language.into();
        if !self.languages.contains(&language) {
            self.languages.push(language);
        }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn get(&self, key: &str) -> Option<&Translations> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Translations)> {
        self.entries.iter().map(|(key, values)| (key.as_str(), values))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A nested language document: a tree whose leaves are strings.
///
/// Serializes as plain JSON: leaves become strings and internal nodes become objects
/// with their children in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Leaf(String),
    Internal(IndexMap<String, Node>),
}

impl Default for Node {
    fn default() -> Self {
        Node::new()
    }
}

impl Node {
    /// An empty internal node.
    pub fn new() -> Self {
        Node::Internal(IndexMap::new())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Internal(_) => None,
        }
    }

    pub fn children(&self) -> Option<&IndexMap<String, Node>> {
        match self {
            Node::Leaf(_) => None,
            Node::Internal(children) => Some(children),
        }
    }

    /// Follows `segments` from this node.
    pub fn get_path<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Node> {
        segments.iter().try_fold(self, |node, segment| {
            node.children()?.get(segment.as_ref())
        })
    }

    /// Looks up the leaf value at a `.`-separated path.
    pub fn leaf_at(&self, path: &str) -> Option<&str> {
        let segments: Vec<&str> = path.split('.').collect();
        self.get_path(&segments)?.as_leaf()
    }

    /// Returns the child internal node at `segment`, creating it when missing.
    ///
    /// An existing leaf at `segment` is replaced by an empty internal node and its value is
    /// lost: a deeper key always wins over a shallower one that was assigned earlier.
    pub fn child_mut_or_coerce(&mut self, segment: &str) -> &mut Node {
        let child = self
            .children_mut_or_coerce()
            .entry(segment.to_string())
            .or_insert_with(Node::new);
        if let Node::Leaf(previous) = &*child {
            warn!(
                segment,
                previous = %previous,
                "leaf value replaced by a nested object"
            );
            *child = Node::new();
        }
        child
    }

    /// Assigns a leaf at `segment`, replacing whatever was there, nested objects included.
    pub fn set_leaf(&mut self, segment: &str, value: impl Into<String>) {
        let previous = self
            .children_mut_or_coerce()
            .insert(segment.to_string(), Node::Leaf(value.into()));
        if let Some(Node::Internal(children)) = previous {
            warn!(
                segment,
                dropped = children.len(),
                "nested object replaced by a leaf value"
            );
        }
    }

    fn children_mut_or_coerce(&mut self) -> &mut IndexMap<String, Node> {
        if self.is_leaf() {
            *self = Node::new();
        }
        match self {
            Node::Internal(children) => children,
            Node::Leaf(_) => unreachable!("leaf was replaced by an internal node"),
        }
    }

    /// Converts a parsed JSON value into a document.
    ///
    /// Objects become internal nodes; every other value, arrays included, becomes a leaf
    /// holding its string form (see [`coerce_to_string`]).
    pub fn from_json(value: Value) -> Node {
        match value {
            Value::Object(map) => Node::Internal(
                map.into_iter()
                    .map(|(key, value)| (key, Node::from_json(value)))
                    .collect(),
            ),
            other => Node::Leaf(coerce_to_string(&other)),
        }
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Internal(children) => children.values().map(Node::leaf_count).sum(),
        }
    }
}

/// Renders a JSON value close to JavaScript's `String(value)`.
///
/// Arrays are joined with `,` (with `null` elements as empty strings), objects inside arrays
/// render as `[object Object]`, integral floats drop their fractional part and exponents carry
/// an explicit sign (`1e+21`). Integers keep every digit, even beyond 2^53 where JavaScript
/// would round them.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f == 0.0 => "0".to_string(),
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
                        format!("{:.0}", f)
                    }
                    _ => with_exponent_sign(n.to_string()),
                }
            }
        }
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                Value::Object(_) => "[object Object]".to_string(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn with_exponent_sign(number: String) -> String {
    match number.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with(['-', '+']) => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => number,
    }
}

/// Rows of string cells, e.g. a parsed CSV file or the output of tabulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// All rows after the first.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<S: Into<String>> FromIterator<Vec<S>> for Table {
    fn from_iter<I: IntoIterator<Item = Vec<S>>>(iter: I) -> Self {
        Table::new(
            iter.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}
