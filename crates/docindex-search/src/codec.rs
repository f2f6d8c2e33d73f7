//! Reading and writing the serialized index.
//!
//! Documentation builds write the index as a script that assigns a JSON object
//! to a global variable:
//!
//! ```text
//! var documenterSearchIndex = {"docs":
//! [{"location":"","page":"Home","title":"Home","text":"...","category":"page"},...]
//! }
//! ```
//!
//! Plain JSON (the object, or just the `docs` array) is accepted as well so that
//! exported indexes load back.

use std::{fmt, str::FromStr, sync::LazyLock};

use docindex_core::SearchRecord;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::{Result, SearchError};

/// Variable name used by Documenter.
pub const DEFAULT_VARIABLE: &str = "documenterSearchIndex";

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:var|let|const)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*")
        .expect("assignment pattern is valid")
});

/// Output format for a serialized index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexFormat {
    /// Script assignment, as written by the documentation generator.
    #[default]
    Script,
    /// Compact JSON object with a `docs` member.
    Json,
    /// Indented JSON object with a `docs` member.
    JsonPretty,
}

impl IndexFormat {
    /// Name used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Json => "json",
            Self::JsonPretty => "json-pretty",
        }
    }
}

impl fmt::Display for IndexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IndexFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "script" | "js" => Ok(Self::Script),
            "json" => Ok(Self::Json),
            "json-pretty" => Ok(Self::JsonPretty),
            other => Err(format!(
                "unknown index format `{other}`, expected script, json or json-pretty"
            )),
        }
    }
}

/// Records and wrapper details recovered from a serialized index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedIndex {
    /// Variable the index was assigned to, `None` for plain JSON input.
    pub variable: Option<String>,

    /// Records in input order.
    pub records: Vec<SearchRecord>,
}

/// Decode a serialized index.
///
/// Every record is validated. The first bad record aborts decoding.
pub fn decode(raw: &str) -> Result<DecodedIndex> {
    let (variable, body) = split_assignment(raw);

    let value: Value = serde_json::from_str(body)
        .map_err(|e| SearchError::malformed(format!("invalid JSON: {e}")))?;

    let docs = match value {
        Value::Array(docs) => docs,
        Value::Object(mut object) => match object.remove("docs") {
            Some(Value::Array(docs)) => docs,
            Some(other) => {
                return Err(SearchError::malformed(format!(
                    "`docs` is not a sequence of records (found {})",
                    kind_of(&other)
                )));
            }
            None => return Err(SearchError::malformed("missing `docs` member")),
        },
        other => {
            return Err(SearchError::malformed(format!(
                "expected a sequence of records (found {})",
                kind_of(&other)
            )));
        }
    };

    let records = docs
        .into_iter()
        .enumerate()
        .map(|(position, doc)| decode_record(position, doc))
        .collect::<Result<Vec<_>>>()?;

    Ok(DecodedIndex {
        variable: variable.map(str::to_string),
        records,
    })
}

/// Split an optional `var name = ...;` wrapper off the input.
fn split_assignment(raw: &str) -> (Option<&str>, &str) {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();

    match ASSIGNMENT.captures(trimmed) {
        Some(caps) => {
            let prefix_len = caps.get(0).map_or(0, |m| m.end());
            let variable = caps.get(1).map(|m| m.as_str());
            (variable, &trimmed[prefix_len..])
        }
        None => (None, trimmed),
    }
}

fn decode_record(position: usize, doc: Value) -> Result<SearchRecord> {
    if !doc.is_object() {
        return Err(SearchError::malformed_at(
            position,
            format!("expected a record object (found {})", kind_of(&doc)),
        ));
    }

    serde_json::from_value(doc).map_err(|e| SearchError::malformed_at(position, e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serialize records in the requested format.
pub fn encode(records: &[SearchRecord], format: IndexFormat, variable: &str) -> Result<String> {
    match format {
        IndexFormat::Script => encode_script(records, variable),
        IndexFormat::Json => encode_json(records, false),
        IndexFormat::JsonPretty => encode_json(records, true),
    }
}

/// Serialize records as a script assignment in the generator's layout.
pub fn encode_script(records: &[SearchRecord], variable: &str) -> Result<String> {
    let mut out = String::with_capacity(64 + records.len() * 256);
    out.push_str("var ");
    out.push_str(variable);
    out.push_str(" = {\"docs\":\n[");

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let json = serde_json::to_string(record)
            .map_err(|e| SearchError::Serialization(e.to_string()))?;
        out.push_str(&json);
    }

    out.push_str("]\n}");
    Ok(out)
}

#[derive(Serialize)]
struct Docs<'a> {
    docs: &'a [SearchRecord],
}

/// Serialize records as a JSON object with a `docs` member.
pub fn encode_json(records: &[SearchRecord], pretty: bool) -> Result<String> {
    let docs = Docs { docs: records };
    let json = if pretty {
        serde_json::to_string_pretty(&docs)
    } else {
        serde_json::to_string(&docs)
    };
    json.map_err(|e| SearchError::Serialization(e.to_string()))
}
