//! Search index records.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of documentation entry a record points at.
///
/// The set is closed: any other value in an index is a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Free text belonging to a whole page.
    Page,
    /// A heading within a page.
    Section,
    /// A documented method signature.
    Method,
    /// A documented type.
    Type,
    /// A documented function.
    Function,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::Page,
        Category::Section,
        Category::Method,
        Category::Type,
        Category::Function,
    ];

    /// Wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Section => "section",
            Self::Method => "method",
            Self::Type => "type",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a category name is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}`, expected one of page, section, method, type, function")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// One entry of a documentation search index.
///
/// Field order here is the order the generator writes them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchRecord {
    /// Page path plus optional `#fragment`, relative to the site root.
    pub location: String,

    /// Human-readable page name.
    pub page: String,

    /// Section or symbol title.
    pub title: String,

    /// Documentation excerpt; may be empty.
    pub text: String,

    /// Entry kind.
    pub category: Category,
}

impl SearchRecord {
    /// Create a record.
    pub fn new(
        location: impl Into<String>,
        page: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            text: text.into(),
            category,
        }
    }

    /// Page part of the location, without the fragment.
    ///
    /// Empty for the site root.
    pub fn path(&self) -> &str {
        match self.location.split_once('#') {
            Some((path, _)) => path,
            None => &self.location,
        }
    }

    /// Fragment identifier of the location, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.location.split_once('#').map(|(_, fragment)| fragment)
    }

    /// Full link to the record under a site base URL.
    pub fn href(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        let location = self.location.trim_start_matches('/');
        format!("{base}/{location}")
    }
}
