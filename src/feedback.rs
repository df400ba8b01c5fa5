//! Feedback persistence
//!
//! An excluded collaborator from the recommender's point of view: the
//! core never depends on this path and is unaffected by its failures.
//! Each submission is written as its own one-row CSV file, named by the
//! sanitized caller-supplied timestamp.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use drammatch_core::{Error, Result};

/// One feedback submission: the selections shown, the recommendation
/// made, and what the user thought of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub selections: Vec<String>,
    pub recommended: String,
    pub feedback: String,
    pub rating: Option<u8>,
    pub experience: Option<String>,
    /// Caller-supplied, e.g. "2024-05-17T19:03:12.345Z"
    pub timestamp: String,
}

#[derive(Debug)]
pub struct FeedbackStore {
    dir: PathBuf,
}

impl FeedbackStore {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Write one submission. Returns the path of the file created.
    pub fn save(&self, record: &FeedbackRecord) -> Result<PathBuf> {
        let stamp = sanitize_timestamp(&record.timestamp);
        if stamp.is_empty() {
            return Err(Error::malformed("timestamp", "empty after sanitization"));
        }
        let path = self.dir.join(format!("feedback_{}.csv", stamp));

        let mut writer = csv::Writer::from_path(&path).map_err(|e| Error::Csv(e.to_string()))?;
        writer
            .write_record([
                "selections",
                "recommended",
                "feedback",
                "rating",
                "experience",
                "timestamp",
            ])
            .map_err(|e| Error::Csv(e.to_string()))?;
        writer
            .write_record([
                record.selections.join("; ").as_str(),
                record.recommended.as_str(),
                record.feedback.as_str(),
                record
                    .rating
                    .map(|r| r.to_string())
                    .unwrap_or_default()
                    .as_str(),
                record.experience.as_deref().unwrap_or(""),
                record.timestamp.as_str(),
            ])
            .map_err(|e| Error::Csv(e.to_string()))?;
        writer.flush()?;

        Ok(path)
    }
}

/// Make an ISO-8601-ish timestamp filename-safe: drop `:`/`-`/`.`/`Z`,
/// map the `T` separator to `_`.
fn sanitize_timestamp(timestamp: &str) -> String {
    timestamp
        .chars()
        .filter_map(|c| match c {
            ':' | '-' | '.' | 'Z' => None,
            'T' => Some('_'),
            c => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_timestamp() {
        assert_eq!(
            sanitize_timestamp("2024-05-17T19:03:12.345Z"),
            "20240517_190312345"
        );
    }

    #[test]
    fn test_save_writes_one_file_per_submission() {
        let dir = tempfile::tempdir().unwrap();
        let store = FeedbackStore::new(dir.path().join("feedback")).unwrap();

        let record = FeedbackRecord {
            selections: vec!["Lagavulin 16".to_string(), "Talisker 10".to_string()],
            recommended: "Ardbeg 10 TEN".to_string(),
            feedback: "spot on".to_string(),
            rating: Some(5),
            experience: Some("enthusiast".to_string()),
            timestamp: "2024-05-17T19:03:12.345Z".to_string(),
        };
        let path = store.save(&record).unwrap();

        assert!(path.ends_with("feedback_20240517_190312345.csv"));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Ardbeg 10 TEN"));
        assert!(contents.contains("Lagavulin 16; Talisker 10"));
    }

    #[test]
    fn test_empty_timestamp_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = FeedbackStore::new(dir.path()).unwrap();
        let record = FeedbackRecord {
            selections: vec![],
            recommended: String::new(),
            feedback: String::new(),
            rating: None,
            experience: None,
            timestamp: "Z".to_string(),
        };
        assert!(store.save(&record).is_err());
    }
}
