//! Index statistics.

use docindex_core::Category;
use serde::Serialize;

use crate::store::SearchIndexStore;

/// Number of records of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Number of records on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCount {
    pub page: String,
    pub count: usize,
}

/// Summary of an index's contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Total number of records.
    pub records: usize,

    /// Number of distinct pages.
    pub pages: usize,

    /// Records with an empty text excerpt.
    pub empty_text: usize,

    /// Counts for every category, in declaration order.
    pub per_category: Vec<CategoryCount>,

    /// Counts per page, in order of first appearance.
    pub per_page: Vec<PageCount>,
}

impl IndexStats {
    /// Compute statistics for a store.
    pub fn from_store(store: &SearchIndexStore) -> Self {
        let records = store.records();

        let per_category = Category::ALL
            .into_iter()
            .map(|category| CategoryCount {
                category,
                count: records.iter().filter(|r| r.category == category).count(),
            })
            .collect();

        let per_page: Vec<PageCount> = store
            .pages()
            .into_iter()
            .map(|page| PageCount {
                page: page.to_string(),
                count: records.iter().filter(|r| r.page == page).count(),
            })
            .collect();

        Self {
            records: records.len(),
            pages: per_page.len(),
            empty_text: records.iter().filter(|r| r.text.is_empty()).count(),
            per_category,
            per_page,
        }
    }

    /// Count for a single category.
    pub fn category(&self, category: Category) -> usize {
        self.per_category
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }
}

#[cfg(test)]
mod tests {
    use docindex_core::SearchRecord;

    use super::*;

    #[test]
    fn test_stats_from_store() {
        let store = SearchIndexStore::from_records(vec![
            SearchRecord::new("api/", "API", "API", "CurrentModule = Newton", Category::Page),
            SearchRecord::new("api/#API", "API", "API", "", Category::Section),
            SearchRecord::new("", "Home", "Home", "using Newton", Category::Page),
            SearchRecord::new("api/#Newton.getx", "API", "Newton.getx", "getx", Category::Function),
        ]);

        let stats = IndexStats::from_store(&store);

        assert_eq!(stats.records, 4);
        assert_eq!(stats.pages, 2);
        assert_eq!(stats.empty_text, 1);
        assert_eq!(stats.category(Category::Page), 2);
        assert_eq!(stats.category(Category::Section), 1);
        assert_eq!(stats.category(Category::Method), 0);
        assert_eq!(stats.per_category.len(), Category::ALL.len());
        assert_eq!(
            stats.per_page,
            vec![
                PageCount {
                    page: "API".to_string(),
                    count: 3
                },
                PageCount {
                    page: "Home".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_stats_empty_store() {
        let stats = IndexStats::from_store(&SearchIndexStore::default());
        assert_eq!(stats.records, 0);
        assert!(stats.per_page.is_empty());
        assert!(stats.per_category.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_stats_serialization() {
        let store = SearchIndexStore::from_records(vec![SearchRecord::new(
            "", "Home", "Home", "", Category::Page,
        )]);
        let json = serde_json::to_string(&IndexStats::from_store(&store)).unwrap();
        assert!(json.contains(r#""category":"page","count":1"#));
        assert!(json.contains(r#""page":"Home","count":1"#));
    }
}
