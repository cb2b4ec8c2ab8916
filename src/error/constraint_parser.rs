use std::sync::OnceLock;

use regex::Regex;

/// Parser for PostgreSQL constraint violation messages.
///
/// PostgreSQL reports the offending key in the `DETAIL` part of the error, for example
/// `Key (role_id, member_id)=(3, 7) already exists.`, and names constraints as
/// `<table>_<columns>_<suffix>`. Both sources are used, preferring the structured ones.
pub struct ConstraintParser;

/// Structured view of a constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub table: String,
    pub fields: Vec<String>,
    pub values: Vec<String>,
}

impl ConstraintViolation {
    pub fn field(&self) -> String {
        self.fields.join(",")
    }

    pub fn value(&self) -> String {
        self.values.join(",")
    }
}

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    relation_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (field, other)=(value, other)"
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid key pattern"),
            column_name: Regex::new(r#"column "([^"]+)""#).expect("valid column pattern"),
            // Both "table" and "relation" are used depending on the violation
            relation_name: Regex::new(r#"(?:table|relation) "([^"]+)""#)
                .expect("valid relation pattern"),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

const CONSTRAINT_SUFFIXES: [&str; 5] = ["_fkey", "_key", "_check", "_not_null", "_idx"];

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Parses a violation from the pieces diesel exposes on a database error.
    ///
    /// Returns `None` when neither the detail text nor the constraint name identify a column.
    pub fn parse(
        message: &str,
        details: Option<&str>,
        table_name: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<ConstraintViolation> {
        let table = table_name
            .map(str::to_string)
            .or_else(|| Self::extract_table(message))
            .or_else(|| {
                constraint_name
                    .and_then(|c| Self::split_constraint_name(c, None))
                    .map(|(table, _)| table)
            })
            .unwrap_or_else(|| "resource".to_string());

        let key_values = details
            .and_then(Self::extract_key_values)
            .or_else(|| Self::extract_key_values(message));
        if let Some((fields, values)) = key_values {
            return Some(ConstraintViolation {
                table,
                fields,
                values,
            });
        }

        if let Some(column) = Self::extract_column(message) {
            return Some(ConstraintViolation {
                table,
                fields: vec![column],
                values: Vec::new(),
            });
        }

        let (_, columns) = Self::split_constraint_name(constraint_name?, Some(&table))?;
        Some(ConstraintViolation {
            table,
            fields: vec![columns],
            values: Vec::new(),
        })
    }

    /// Splits `<table>_<columns>_<suffix>` into table and column part.
    ///
    /// Table names contain underscores themselves, so without a known table the split
    /// happens at the first underscore.
    pub fn split_constraint_name(constraint: &str, table: Option<&str>) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint.strip_suffix(suffix))?;

        if let Some(table) = table {
            let columns = stem.strip_prefix(table)?.strip_prefix('_')?;
            if columns.is_empty() {
                return None;
            }
            return Some((table.to_string(), columns.to_string()));
        }

        let (table, columns) = stem.split_once('_')?;
        if table.is_empty() || columns.is_empty() {
            return None;
        }
        Some((table.to_string(), columns.to_string()))
    }

    /// Extracts the columns and values of a `Key (..)=(..)` clause.
    pub fn extract_key_values(text: &str) -> Option<(Vec<String>, Vec<String>)> {
        let caps = Self::patterns().key_value.captures(text)?;
        let split = |s: &str| -> Vec<String> { s.split(", ").map(str::to_string).collect() };
        let fields = split(caps.get(1)?.as_str());
        let values = split(caps.get(2)?.as_str());
        Some((fields, values))
    }

    pub fn extract_column(text: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// First table or relation named in the message.
    pub fn extract_table(text: &str) -> Option<String> {
        Self::patterns()
            .relation_name
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
