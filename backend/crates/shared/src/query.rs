//! Query/Filter Builder
//!
//! Translates free-form listing query parameters into store-agnostic filter
//! predicates plus an offset/limit pair. Predicates are expressed over
//! *logical* field names; each repository maps them to its own columns when
//! rendering SQL, and the in-memory test stores evaluate them directly.
//!
//! The one hard rule: a caller can never filter on the password field. A
//! filter naming `password` is suppressed entirely (an empty, match-all
//! filter) instead of producing an error.

/// Default page size when `limit` is absent or non-numeric.
pub const DEFAULT_PAGE_SIZE: i64 = 30;

/// Field name that must never be filterable.
const DENYLISTED_FIELD: &str = "password";

// ============================================================================
// Pagination
// ============================================================================

/// Offset/limit pair derived from `page`/`limit` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: i64,
    pub limit: i64,
}

impl Pagination {
    /// Build from raw query-parameter strings.
    ///
    /// * `limit` defaults to [`DEFAULT_PAGE_SIZE`] when absent, non-numeric,
    ///   or below 1.
    /// * `page` is 1-based; page `n` maps to offset `(n - 1) * limit`.
    ///   Anything unparsable or below 1 maps to offset 0.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        let limit = limit
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let offset = page
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|n| *n >= 1)
            .map(|page| (page - 1) * limit)
            .unwrap_or(0);

        Self { offset, limit }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

// ============================================================================
// Predicates
// ============================================================================

/// A single filter predicate over a logical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Exact match on a field value.
    Equals { field: String, value: String },
    /// Case-insensitive partial (substring) match.
    Contains { field: String, value: String },
}

impl Predicate {
    pub fn field(&self) -> &str {
        match self {
            Predicate::Equals { field, .. } | Predicate::Contains { field, .. } => field,
        }
    }
}

/// An ordered set of predicates, all of which must hold (AND semantics).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    predicates: Vec<Predicate>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Add an exact-match predicate.
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.push(Predicate::Equals {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add a case-insensitive substring predicate.
    pub fn contains(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates.push(Predicate::Contains {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add a generic `key`/`value` predicate from query parameters.
    ///
    /// * `password` is denylisted: the intended filter is suppressed, the
    ///   rest of the query runs unfiltered.
    /// * `id` translates to an exact match on `id_field` (the entity's
    ///   primary key).
    /// * Keys outside `allowed` are suppressed the same way as `password`;
    ///   listing endpoints never reject a filter.
    pub fn key_value(
        self,
        key: &str,
        value: &str,
        allowed: &[&str],
        id_field: &'static str,
    ) -> Self {
        if key == DENYLISTED_FIELD {
            return self;
        }
        if key == "id" {
            return self.equals(id_field, value);
        }
        if allowed.contains(&key) {
            return self.equals(key, value);
        }
        self
    }

    /// Add an author-name search.
    ///
    /// The raw value is whitespace-tokenized: a single token matches the
    /// first name only; two or more tokens match first AND last name. All
    /// matches are case-insensitive and partial.
    pub fn person_name(
        self,
        raw: &str,
        first_field: &'static str,
        last_field: &'static str,
    ) -> Self {
        let mut tokens = raw.split_whitespace();

        let Some(first) = tokens.next() else {
            return self;
        };

        let filter = self.contains(first_field, first);
        match tokens.next() {
            Some(last) => filter.contains(last_field, last),
            None => filter,
        }
    }
}

/// Render a [`Predicate::Contains`] value as a SQL LIKE pattern.
///
/// Escapes the LIKE metacharacters so user input only ever matches
/// literally, then wraps it in `%`.
pub fn like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
