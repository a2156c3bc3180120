//! Search - Query resolver
//!
//! Resolution order (first match wins):
//! 1. `id:149`, `id=149`, `id 149` → exact ID
//! 2. `149` → exact ID
//! 3. anything else → case-insensitive substring of the entry's canonical
//!    serialized form (keys and values)
//!
//! Results keep store order. There is no ranking and no limit; pagination
//! happens in the formatter.

use super::entry::Entry;
use super::store::{EntryStore, Result};

/// A parsed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Exact ID lookup
    Id(u64),
    /// Lowercased substring (blank matches everything)
    Text(String),
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        if let Some(id) = parse_id_prefixed(&normalized).or_else(|| parse_digits(&normalized)) {
            return Query::Id(id);
        }

        Query::Text(normalized)
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            Query::Id(id) => entry.id == *id,
            Query::Text(needle) => entry.canonical().to_lowercase().contains(needle.as_str()),
        }
    }
}

/// `id` + optional `:`/`=` + optional whitespace + digits
fn parse_id_prefixed(s: &str) -> Option<u64> {
    let rest = s.strip_prefix("id")?;
    let rest = rest
        .strip_prefix(':')
        .or_else(|| rest.strip_prefix('='))
        .unwrap_or(rest);
    parse_digits(rest.trim_start())
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Filter already-loaded entries
pub fn filter(entries: Vec<Entry>, query: &Query) -> Vec<Entry> {
    entries.into_iter().filter(|e| query.matches(e)).collect()
}

/// Load the store and resolve a raw query against it
pub fn search(store: &EntryStore, raw: &str) -> Result<Vec<Entry>> {
    let query = Query::parse(raw);
    tracing::debug!(?query, "Resolving query");
    Ok(filter(store.load()?, &query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::Kind;

    fn fixture() -> Vec<Entry> {
        let mut entries = vec![
            Entry::new(Kind::Note, "Auth", "Login flow uses OAuth"),
            Entry::issue("1.2", "Crash on start", "Payments", "Null config", "Set default"),
            Entry::new(Kind::Logic, "Sync", "pull; merge; push"),
        ];
        for (i, e) in entries.iter_mut().enumerate() {
            e.id = i as u64 + 1;
        }
        entries
    }

    fn ids(entries: &[Entry]) -> Vec<u64> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_parse_id_forms() {
        assert_eq!(Query::parse("id:149"), Query::Id(149));
        assert_eq!(Query::parse("ID=149"), Query::Id(149));
        assert_eq!(Query::parse("  id 149 "), Query::Id(149));
        assert_eq!(Query::parse("149"), Query::Id(149));
        assert_eq!(Query::parse("idea"), Query::Text("idea".to_string()));
        assert_eq!(Query::parse("id:"), Query::Text("id:".to_string()));
        assert_eq!(Query::parse("   "), Query::Text(String::new()));
    }

    #[test]
    fn test_search_exact_id() {
        for q in ["id:2", "id=2", "2"] {
            let found = filter(fixture(), &Query::parse(q));
            assert_eq!(ids(&found), vec![2], "query {}", q);
        }
        assert!(filter(fixture(), &Query::parse("id:9")).is_empty());
    }

    #[test]
    fn test_search_substring_case_insensitive() {
        assert_eq!(ids(&filter(fixture(), &Query::parse("auth"))), vec![1]);
        assert_eq!(ids(&filter(fixture(), &Query::parse("AUTH"))), vec![1]);
        assert_eq!(ids(&filter(fixture(), &Query::parse("merge"))), vec![3]);
    }

    #[test]
    fn test_search_matches_keys_and_keeps_order() {
        // Every canonical form contains the "Module" key
        assert_eq!(ids(&filter(fixture(), &Query::parse("module"))), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_spans_key_and_value() {
        assert_eq!(ids(&filter(fixture(), &Query::parse(r#"module": "auth"#))), vec![1]);
        assert!(filter(fixture(), &Query::parse(r#""module":"auth"#)).is_empty());
    }

    #[test]
    fn test_blank_query_matches_everything() {
        assert_eq!(ids(&filter(fixture(), &Query::parse("  "))), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_non_ascii() {
        let mut entry = Entry::new(Kind::Note, "Đăng nhập", "Ghi chú");
        entry.id = 1;
        let found = filter(vec![entry], &Query::parse("ĐĂNG"));
        assert_eq!(found.len(), 1);
    }
}
