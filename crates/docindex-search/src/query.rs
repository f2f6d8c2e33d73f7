//! Query construction and ranked match iteration.
//!
//! A record matches when its title or text contains the query term, compared
//! case-insensitively. Results come in two tiers: every record whose title
//! matches, then every record matched only in its text. Within a tier records
//! keep their index order.

use std::iter::FusedIterator;

use docindex_core::{Category, SearchRecord};
use serde::Serialize;

use crate::store::SearchIndexStore;

/// Bytes of context kept before the first match in a snippet.
const SNIPPET_CONTEXT: usize = 40;

/// A search query with optional filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Substring to look for.
    pub term: String,

    /// Categories to keep; empty keeps all.
    pub categories: Vec<Category>,

    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Create a query for `term` without filters.
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    /// Keep only records of `category` (cumulative with earlier calls).
    pub fn with_category(mut self, category: Category) -> Self {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    /// Keep only records of the given categories.
    pub fn with_categories(self, categories: impl IntoIterator<Item = Category>) -> Self {
        categories
            .into_iter()
            .fold(self, |query, category| query.with_category(category))
    }

    /// Stop after `limit` results.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether records of `category` pass the category filter.
    pub fn accepts(&self, category: Category) -> bool {
        self.categories.is_empty() || self.categories.contains(&category)
    }
}

/// Field a record matched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    /// The title contains the term (the text may too).
    Title,
    /// Only the text contains the term.
    Text,
}

/// A single ranked match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryMatch<'a> {
    /// The matching record.
    pub record: &'a SearchRecord,

    /// Position of the record in the index.
    pub position: usize,

    /// Tier the record was ranked in.
    pub field: MatchField,
}

/// Lazily evaluated results of a query.
///
/// Nothing is scanned until iteration starts, and every call to
/// [`QueryResults::iter`] starts over from the first match.
#[derive(Debug, Clone)]
pub struct QueryResults<'a> {
    store: &'a SearchIndexStore,
    term: String,
    needle: String,
    categories: Vec<Category>,
    limit: Option<usize>,
}

impl<'a> QueryResults<'a> {
    pub(crate) fn new(store: &'a SearchIndexStore, query: &SearchQuery) -> Self {
        Self {
            store,
            term: query.term.clone(),
            needle: query.term.to_lowercase(),
            categories: query.categories.clone(),
            limit: query.limit,
        }
    }

    /// The term as given.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Iterate over the ranked matches.
    pub fn iter(&self) -> Matches<'_, 'a> {
        Matches {
            store: self.store,
            needle: &self.needle,
            categories: &self.categories,
            remaining: self.limit,
            pass: Pass::Title,
            position: 0,
        }
    }

    /// Number of matches.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Whether there are no matches.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Matching records in ranked order.
    pub fn collect_records(&self) -> Vec<&'a SearchRecord> {
        self.iter().map(|m| m.record).collect()
    }
}

impl<'q, 'a> IntoIterator for &'q QueryResults<'a> {
    type Item = QueryMatch<'a>;
    type IntoIter = Matches<'q, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Title,
    Text,
}

/// Iterator over ranked matches, created by [`QueryResults::iter`].
#[derive(Debug, Clone)]
pub struct Matches<'q, 'a> {
    store: &'a SearchIndexStore,
    needle: &'q str,
    categories: &'q [Category],
    remaining: Option<usize>,
    pass: Pass,
    position: usize,
}

impl<'a> Iterator for Matches<'_, 'a> {
    type Item = QueryMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == Some(0) {
            return None;
        }

        loop {
            let Some((record, folded)) = self.store.entry(self.position) else {
                match self.pass {
                    Pass::Title => {
                        self.pass = Pass::Text;
                        self.position = 0;
                        continue;
                    }
                    Pass::Text => return None,
                }
            };

            let position = self.position;
            self.position += 1;

            if !self.categories.is_empty() && !self.categories.contains(&record.category) {
                continue;
            }

            let in_title = folded.title.contains(self.needle);
            let field = match self.pass {
                Pass::Title if in_title => MatchField::Title,
                Pass::Text if !in_title && folded.text.contains(self.needle) => MatchField::Text,
                _ => continue,
            };

            if let Some(remaining) = self.remaining.as_mut() {
                *remaining -= 1;
            }

            return Some(QueryMatch {
                record,
                position,
                field,
            });
        }
    }
}

impl FusedIterator for Matches<'_, '_> {}

/// Extract a short excerpt of `text` around the first occurrence of `term`.
///
/// Whitespace is collapsed. `...` marks text cut at either end. Without a match
/// the excerpt starts at the beginning of the text.
pub fn snippet(text: &str, term: &str, max_len: usize) -> Option<String> {
    if text.trim().is_empty() || max_len == 0 {
        return None;
    }

    let match_pos = match_position(text, term).unwrap_or(0);
    let context = SNIPPET_CONTEXT.min(max_len / 3);

    let mut start = floor_boundary(text, match_pos.saturating_sub(context));
    if start > 0 {
        // Skip the partial word at the window start
        if let Some((ws, c)) = text[start..match_pos]
            .char_indices()
            .find(|(_, c)| c.is_whitespace())
        {
            start += ws + c.len_utf8();
        }
    }

    let mut end = floor_boundary(text, start.saturating_add(max_len).min(text.len()));
    if end < text.len() {
        if let Some(ws) = text[start..end].rfind(char::is_whitespace) {
            if start + ws > match_pos {
                end = start + ws;
            }
        }
    }

    let body = text[start..end].split_whitespace().collect::<Vec<_>>().join(" ");
    if body.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(body.len() + 6);
    if start > 0 {
        out.push_str("...");
    }
    out.push_str(&body);
    if end < text.len() {
        out.push_str("...");
    }
    Some(out)
}

/// Byte position of the first case-insensitive occurrence of `term`.
fn match_position(text: &str, term: &str) -> Option<usize> {
    if term.is_empty() {
        return None;
    }

    let lower = text.to_lowercase();
    let pos = lower.find(&term.to_lowercase())?;

    if lower.len() == text.len() {
        return Some(floor_boundary(text, pos));
    }

    // Lowercasing changed byte lengths; map `pos` back onto `text`
    let mut folded = 0;
    for (idx, c) in text.char_indices() {
        if folded >= pos {
            return Some(idx);
        }
        folded += c.to_lowercase().map(char::len_utf8).sum::<usize>();
    }
    Some(text.len())
}

fn floor_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
