//! Immutable in-memory search index.
//!
//! The whole index is loaded at once and never changes afterwards. A rebuilt
//! index replaces the old file entirely, so there is no update path.

use std::{collections::HashSet, fs, path::Path};

use docindex_core::SearchRecord;
use tracing::{debug, info, warn};

use crate::{
    Result, SearchError,
    codec::{self, DEFAULT_VARIABLE, IndexFormat},
    query::{QueryResults, SearchQuery},
};

/// Case-folded copies of the searchable fields.
#[derive(Debug, Clone)]
pub(crate) struct FoldedText {
    pub(crate) title: String,
    pub(crate) text: String,
}

impl FoldedText {
    fn new(record: &SearchRecord) -> Self {
        Self {
            title: record.title.to_lowercase(),
            text: record.text.to_lowercase(),
        }
    }
}

/// An immutable, ordered collection of search records.
#[derive(Debug, Clone)]
pub struct SearchIndexStore {
    variable: String,
    records: Vec<SearchRecord>,
    folded: Vec<FoldedText>,
}

impl SearchIndexStore {
    /// Build a store from records already in memory.
    pub fn from_records(records: Vec<SearchRecord>) -> Self {
        Self::with_variable(DEFAULT_VARIABLE, records)
    }

    fn with_variable(variable: impl Into<String>, records: Vec<SearchRecord>) -> Self {
        let folded = records.iter().map(FoldedText::new).collect();
        Self {
            variable: variable.into(),
            records,
            folded,
        }
    }

    /// Parse a serialized index.
    ///
    /// Fails with [`SearchError::MalformedIndex`] if the outer structure is not a
    /// sequence of records or any record is invalid.
    pub fn load(raw: &str) -> Result<Self> {
        let decoded = codec::decode(raw)?;
        let variable = decoded
            .variable
            .unwrap_or_else(|| DEFAULT_VARIABLE.to_string());

        let store = Self::with_variable(variable, decoded.records);

        info!(
            records = store.len(),
            variable = %store.variable,
            "Loaded search index"
        );
        Ok(store)
    }

    /// Read and parse an index file.
    pub fn load_file(path: &Path) -> Result<Self> {
        debug!(?path, "Reading search index");
        let raw = fs::read_to_string(path).map_err(|e| SearchError::io(path, e))?;
        Self::load(&raw)
    }

    /// Variable name the index is assigned to in script form.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The same records under another script variable name.
    pub fn renamed(self, variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            ..self
        }
    }

    /// All records in index order.
    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `position`.
    pub fn get(&self, position: usize) -> Option<&SearchRecord> {
        self.records.get(position)
    }

    /// Distinct page names in order of first appearance.
    pub fn pages(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.page.as_str())
            .filter(|page| seen.insert(*page))
            .collect()
    }

    pub(crate) fn entry(&self, position: usize) -> Option<(&SearchRecord, &FoldedText)> {
        Some((self.records.get(position)?, self.folded.get(position)?))
    }

    /// Records whose title or text contains `term`, ignoring case.
    pub fn query(&self, term: &str) -> QueryResults<'_> {
        self.search(&SearchQuery::new(term))
    }

    /// Run a query with filters.
    pub fn search(&self, query: &SearchQuery) -> QueryResults<'_> {
        debug!(
            term = %query.term,
            categories = ?query.categories,
            limit = ?query.limit,
            "Prepared query"
        );
        QueryResults::new(self, query)
    }

    /// Serialize in script form under the original variable name.
    pub fn to_script(&self) -> Result<String> {
        codec::encode_script(&self.records, &self.variable)
    }

    /// Serialize in script form under another variable name.
    pub fn to_script_with(&self, variable: &str) -> Result<String> {
        codec::encode_script(&self.records, variable)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        codec::encode_json(&self.records, false)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        codec::encode_json(&self.records, true)
    }

    /// Serialize in the given format.
    pub fn serialize(&self, format: IndexFormat) -> Result<String> {
        codec::encode(&self.records, format, &self.variable)
    }

    /// Write the index to a file, warning when it exceeds `max_size` bytes.
    pub fn write_to_file(&self, path: &Path, format: IndexFormat, max_size: usize) -> Result<usize> {
        let output = self.serialize(format)?;

        if output.len() > max_size {
            warn!(
                size = output.len(),
                max = max_size,
                "Search index exceeds recommended size"
            );
        }

        fs::write(path, &output).map_err(|e| SearchError::io(path, e))?;
        Ok(output.len())
    }
}

impl Default for SearchIndexStore {
    fn default() -> Self {
        Self::from_records(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use docindex_core::Category;

    use super::*;

    const RAW: &str = concat!(
        "var documenterSearchIndex = {\"docs\":\n[",
        r#"{"location":"api/","page":"API","title":"API","text":"CurrentModule = Newton","category":"page"},"#,
        r#"{"location":"api/#Newton.getx","page":"API","title":"Newton.getx","text":"getx(cache)","category":"function"},"#,
        r#"{"location":"","page":"Home","title":"Home","text":"Define initial guess x","category":"page"}"#,
        "]\n}"
    );

    #[test]
    fn test_load() {
        let store = SearchIndexStore::load(RAW).unwrap();

        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
        assert_eq!(store.variable(), "documenterSearchIndex");
        assert_eq!(store.get(1).unwrap().category, Category::Function);
        assert_eq!(store.get(3), None);
        assert_eq!(store.pages(), vec!["API", "Home"]);
    }

    #[test]
    fn test_load_keeps_custom_variable() {
        let raw = RAW.replacen("documenterSearchIndex", "legacyIndex", 1);
        let store = SearchIndexStore::load(&raw).unwrap();
        assert_eq!(store.variable(), "legacyIndex");
        assert!(store.to_script().unwrap().starts_with("var legacyIndex = "));

        let store = store.renamed(DEFAULT_VARIABLE);
        assert_eq!(store.to_script().unwrap(), RAW);
    }

    #[test]
    fn test_load_json_uses_default_variable() {
        let store = SearchIndexStore::load(RAW).unwrap();
        let json = store.to_json().unwrap();
        let reloaded = SearchIndexStore::load(&json).unwrap();
        assert_eq!(reloaded.variable(), DEFAULT_VARIABLE);
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn test_round_trip_script() {
        let store = SearchIndexStore::load(RAW).unwrap();
        assert_eq!(store.to_script().unwrap(), RAW);
        assert!(
            store
                .to_script_with("renamed")
                .unwrap()
                .starts_with("var renamed = {\"docs\":\n[")
        );
    }

    #[test]
    fn test_load_rejects_whole_index() {
        let raw = RAW.replace(r#""category":"function""#, r#""category":"macro""#);
        let err = SearchIndexStore::load(&raw).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("search_index.js");
        std::fs::write(&path, RAW).expect("write");

        let store = SearchIndexStore::load_file(&path).unwrap();
        assert_eq!(store.len(), 3);

        let err = SearchIndexStore::load_file(&dir.path().join("missing.js")).unwrap_err();
        assert!(matches!(err, SearchError::Io { .. }));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SearchIndexStore::load(RAW).unwrap();

        let script_path = dir.path().join("out.js");
        let written = store
            .write_to_file(&script_path, IndexFormat::Script, 1024 * 1024)
            .unwrap();
        assert_eq!(written, RAW.len());
        assert_eq!(std::fs::read_to_string(&script_path).unwrap(), RAW);

        // Oversized output is still written
        let json_path = dir.path().join("out.json");
        store
            .write_to_file(&json_path, IndexFormat::JsonPretty, 16)
            .unwrap();
        let reloaded = SearchIndexStore::load_file(&json_path).unwrap();
        assert_eq!(reloaded.records(), store.records());
    }

    #[test]
    fn test_empty_store() {
        let store = SearchIndexStore::default();
        assert!(store.is_empty());
        assert!(store.query("").is_empty());
        assert!(store.pages().is_empty());
        assert_eq!(
            store.to_script().unwrap(),
            "var documenterSearchIndex = {\"docs\":\n[]\n}"
        );
    }

    #[test]
    fn test_from_records_folds_case_once() {
        let store = SearchIndexStore::from_records(vec![SearchRecord::new(
            "#Newton.NewtonCache",
            "Home",
            "Newton.NewtonCache",
            "",
            Category::Type,
        )]);
        let (_, folded) = store.entry(0).unwrap();
        assert_eq!(folded.title, "newton.newtoncache");
        assert!(store.entry(1).is_none());
    }
}
