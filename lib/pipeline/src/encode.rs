//! Categorical encoder for post-treatment tags
//!
//! Two-pass: discovery unions the tag lists across the entire corpus
//! (the schema cannot be determined from a single record), projection
//! binary-encodes one record against the discovered universe. Tag
//! identity is exact-string match; no fuzzy merging of near-duplicate
//! spellings.

use std::collections::BTreeSet;

use drammatch_core::NormalizedRecord;

/// Pass 1: union of post-treatment tags across every record. A tag seen
/// in exactly one record still becomes a schema column.
pub fn discover_tags<'a, I>(records: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut tags = BTreeSet::new();
    for record in records {
        tags.extend(record.tags.iter().cloned());
    }
    tags
}

/// Pass 2: 1.0 where the record carries the tag, 0.0 otherwise, in the
/// given column order.
pub fn project_tags(record: &NormalizedRecord, tags: &[String]) -> Vec<f32> {
    tags.iter()
        .map(|tag| if record.tags.iter().any(|t| t == tag) { 1.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use drammatch_core::{AgeStatement, BottlingMeta, NoteMap};

    fn record(name: &str, tags: &[&str]) -> NormalizedRecord {
        NormalizedRecord {
            meta: BottlingMeta {
                full_name: name.to_string(),
                distillery: name.to_string(),
                url: None,
                country: None,
                region: None,
                whisky_type: None,
                bottler: None,
                age: AgeStatement::NoAgeStatement,
                abv: 40.0,
                rating: None,
                rating_count: None,
                review_count: 0,
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
            nosing: NoteMap::new(),
            tasting: NoteMap::new(),
            finish: NoteMap::new(),
        }
    }

    #[test]
    fn test_discovery_unions_all_records() {
        let records = vec![
            record("A", &["Sherry Cask"]),
            record("B", &["Port Finish", "Sherry Cask"]),
            record("C", &[]),
        ];
        let tags = discover_tags(&records);
        assert_eq!(
            tags.into_iter().collect::<Vec<_>>(),
            vec!["Port Finish".to_string(), "Sherry Cask".to_string()]
        );
    }

    #[test]
    fn test_singleton_tag_still_becomes_a_column() {
        let records = vec![record("A", &["Mizunara"]), record("B", &[])];
        let tags: Vec<String> = discover_tags(&records).into_iter().collect();
        assert_eq!(tags, vec!["Mizunara".to_string()]);

        assert_eq!(project_tags(&records[0], &tags), vec![1.0]);
        assert_eq!(project_tags(&records[1], &tags), vec![0.0]);
    }

    #[test]
    fn test_projection_is_exact_match() {
        let columns = vec!["Sherry Cask".to_string(), "sherry cask".to_string()];
        let r = record("A", &["Sherry Cask"]);
        assert_eq!(project_tags(&r, &columns), vec![1.0, 0.0]);
    }
}
