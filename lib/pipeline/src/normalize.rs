//! Record normalizer
//!
//! Coerces one raw scraped record into a [`NormalizedRecord`]: numeric
//! scalars, an [`AgeStatement`], parsed tag/note collections, and the
//! derived unique full name. A required scalar that is absent or
//! unparseable fails the whole corpus build — a silently-skipped record
//! would make the schema discovery pass inconsistent across runs.

use ahash::AHashMap;
use tracing::debug;

use drammatch_core::{AgeStatement, BottlingMeta, Error, NormalizedRecord, NoteMap, RawRecord, Result};

use crate::parse::{parse_note_map, parse_tag_list};

/// Normalize one raw record.
pub fn normalize(raw: &RawRecord) -> Result<NormalizedRecord> {
    let distillery = match raw.distillery.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => return Err(Error::malformed("distillery", "missing distillery name")),
    };

    let age = parse_age(raw.age_text.as_deref())?;
    let abv = parse_strength(raw.strength_text.as_deref())?;
    let rating = parse_optional_float("rating", raw.rating_text.as_deref())?;
    let rating_count = parse_rating_count(raw.rating_count_text.as_deref())?;
    let review_count = parse_review_count(raw.review_count_text.as_deref());

    let tags = match nonblank(raw.post_treatment.as_deref()) {
        Some(literal) => parse_tag_list("post_treatment", literal)?,
        None => Vec::new(),
    };
    let nosing = parse_notes("nosing_notes", raw.nosing_notes.as_deref())?;
    let tasting = parse_notes("tasting_notes", raw.tasting_notes.as_deref())?;
    let finish = parse_notes("finish_notes", raw.finish_notes.as_deref())?;

    let full_name = full_name(&distillery, age, raw.name_suffix.as_deref());

    Ok(NormalizedRecord {
        meta: BottlingMeta {
            full_name,
            distillery,
            url: nonblank(raw.url.as_deref()).map(str::to_string),
            country: nonblank(raw.country.as_deref()).map(str::to_string),
            region: nonblank(raw.region.as_deref()).map(str::to_string),
            whisky_type: nonblank(raw.whisky_type.as_deref()).map(str::to_string),
            bottler: nonblank(raw.bottler.as_deref()).map(str::to_string),
            age,
            abv,
            rating,
            rating_count,
            review_count,
        },
        tags,
        nosing,
        tasting,
        finish,
    })
}

/// Normalize a whole corpus and collapse scrape-time duplicates: records
/// sharing identical (nosing, tasting, finish) dictionaries are treated
/// as the same bottling and only the first is retained. This is a
/// deliberate heuristic, not a guarantee of true bottling equivalence.
pub fn normalize_corpus(raws: &[RawRecord]) -> Result<Vec<NormalizedRecord>> {
    let mut seen: AHashMap<String, usize> = AHashMap::with_capacity(raws.len());
    let mut records: Vec<NormalizedRecord> = Vec::with_capacity(raws.len());

    for raw in raws {
        let record = normalize(raw)?;
        let key = notes_key(&record)?;
        if let Some(&first) = seen.get(&key) {
            debug!(
                dropped = %record.meta.full_name,
                kept = %records[first].meta.full_name,
                "dropping duplicate record with identical note dictionaries"
            );
            continue;
        }
        seen.insert(key, records.len());
        records.push(record);
    }

    Ok(records)
}

/// Canonical dedup key over the three note dictionaries. `BTreeMap`
/// serialization is deterministic, so equal dictionaries serialize
/// identically.
fn notes_key(record: &NormalizedRecord) -> Result<String> {
    serde_json::to_string(&(&record.nosing, &record.tasting, &record.finish))
        .map_err(|e| Error::Serialization(e.to_string()))
}

fn nonblank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Absent/blank age text means no age statement; otherwise the leading
/// whitespace-delimited token must be a year count.
fn parse_age(text: Option<&str>) -> Result<AgeStatement> {
    let text = match nonblank(text) {
        Some(t) => t,
        None => return Ok(AgeStatement::NoAgeStatement),
    };
    let token = text.split_whitespace().next().unwrap_or(text);
    token
        .parse::<u32>()
        .map(AgeStatement::Years)
        .map_err(|_| Error::malformed("age", format!("non-numeric age token '{}'", token)))
}

fn parse_strength(text: Option<&str>) -> Result<f64> {
    let text = nonblank(text)
        .ok_or_else(|| Error::malformed("alcohol_pct", "missing strength"))?;
    let stripped = text.strip_suffix('%').unwrap_or(text).trim();
    stripped
        .parse::<f64>()
        .map_err(|_| Error::malformed("alcohol_pct", format!("non-numeric strength '{}'", text)))
}

fn parse_optional_float(field: &str, text: Option<&str>) -> Result<Option<f64>> {
    match nonblank(text) {
        None => Ok(None),
        Some(t) => t
            .parse::<f64>()
            .map(Some)
            .map_err(|_| Error::malformed(field, format!("non-numeric value '{}'", t))),
    }
}

/// Rating counts arrive parenthesized and comma-grouped, e.g. "(1,234)".
fn parse_rating_count(text: Option<&str>) -> Result<Option<u32>> {
    let text = match nonblank(text) {
        Some(t) => t,
        None => return Ok(None),
    };
    let digits: String = text
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | ','))
        .collect();
    let digits = digits.trim();
    digits
        .parse::<u32>()
        .map(Some)
        .map_err(|_| Error::malformed("num_ratings", format!("non-numeric count '{}'", text)))
}

/// Review counts are frequently blank for rare bottlings; default to 0
/// rather than failing.
fn parse_review_count(text: Option<&str>) -> u32 {
    nonblank(text)
        .and_then(|t| t.replace(',', "").parse::<u32>().ok())
        .unwrap_or(0)
}

fn parse_notes(field: &str, text: Option<&str>) -> Result<NoteMap> {
    match nonblank(text) {
        Some(literal) => parse_note_map(field, literal),
        None => Ok(NoteMap::new()),
    }
}

/// Distillery, age token (omitted when NAS), name suffix (omitted when
/// absent), whitespace collapsed.
fn full_name(distillery: &str, age: AgeStatement, suffix: Option<&str>) -> String {
    let mut parts: Vec<String> = vec![distillery.to_string()];
    if let AgeStatement::Years(years) = age {
        parts.push(years.to_string());
    }
    if let Some(suffix) = nonblank(suffix) {
        parts.push(suffix.to_string());
    }
    parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawRecord {
        RawRecord {
            url: Some("https://example.com/w/lagavulin-16".to_string()),
            distillery: Some("Lagavulin".to_string()),
            country: Some("Scotland".to_string()),
            region: Some("Islay".to_string()),
            whisky_type: Some("Single Malt".to_string()),
            bottler: Some("Original bottling".to_string()),
            age_text: Some("16 years old".to_string()),
            strength_text: Some("43.0%".to_string()),
            rating_text: Some("4.6".to_string()),
            rating_count_text: Some("(1,234)".to_string()),
            review_count_text: Some("210".to_string()),
            name_suffix: None,
            post_treatment: Some("['Sherry Cask']".to_string()),
            nosing_notes: Some("{'smoke': 8, 'peat': 9}".to_string()),
            tasting_notes: Some("{'smoke': 9, 'sweet': 3}".to_string()),
            finish_notes: Some("{'smoke': 7}".to_string()),
        }
    }

    #[test]
    fn test_normalize_happy_path() {
        let record = normalize(&raw()).unwrap();
        assert_eq!(record.meta.full_name, "Lagavulin 16");
        assert_eq!(record.meta.age, AgeStatement::Years(16));
        assert_eq!(record.meta.abv, 43.0);
        assert_eq!(record.meta.rating, Some(4.6));
        assert_eq!(record.meta.rating_count, Some(1234));
        assert_eq!(record.meta.review_count, 210);
        assert_eq!(record.tags, vec!["Sherry Cask"]);
        assert_eq!(record.nosing.get("peat"), Some(&9.0));
    }

    #[test]
    fn test_missing_age_is_nas_and_omitted_from_name() {
        let mut r = raw();
        r.age_text = None;
        r.name_suffix = Some("Distiller's Edition".to_string());
        let record = normalize(&r).unwrap();
        assert_eq!(record.meta.age, AgeStatement::NoAgeStatement);
        assert_eq!(record.meta.full_name, "Lagavulin Distiller's Edition");
    }

    #[test]
    fn test_full_name_collapses_whitespace() {
        let mut r = raw();
        r.distillery = Some("  Glen   Scotia ".to_string());
        r.name_suffix = Some(" Victoriana  ".to_string());
        let record = normalize(&r).unwrap();
        assert_eq!(record.meta.full_name, "Glen Scotia 16 Victoriana");
    }

    #[test]
    fn test_non_numeric_age_token_fails() {
        let mut r = raw();
        r.age_text = Some("very old".to_string());
        assert!(matches!(
            normalize(&r),
            Err(Error::MalformedRecord { field, .. }) if field == "age"
        ));
    }

    #[test]
    fn test_missing_strength_fails() {
        let mut r = raw();
        r.strength_text = None;
        assert!(normalize(&r).is_err());

        let mut r = raw();
        r.strength_text = Some("abv%".to_string());
        assert!(normalize(&r).is_err());
    }

    #[test]
    fn test_missing_distillery_fails() {
        let mut r = raw();
        r.distillery = Some("   ".to_string());
        assert!(matches!(
            normalize(&r),
            Err(Error::MalformedRecord { field, .. }) if field == "distillery"
        ));
    }

    #[test]
    fn test_blank_review_count_defaults_to_zero() {
        let mut r = raw();
        r.review_count_text = None;
        assert_eq!(normalize(&r).unwrap().meta.review_count, 0);

        let mut r = raw();
        r.review_count_text = Some("n/a".to_string());
        assert_eq!(normalize(&r).unwrap().meta.review_count, 0);
    }

    #[test]
    fn test_non_numeric_rating_count_fails() {
        let mut r = raw();
        r.rating_count_text = Some("(many)".to_string());
        assert!(normalize(&r).is_err());
    }

    #[test]
    fn test_corpus_dedup_keeps_first() {
        let mut dupe = raw();
        dupe.distillery = Some("Lagavulin Imposter".to_string());

        let mut other = raw();
        other.distillery = Some("Talisker".to_string());
        other.age_text = Some("10".to_string());
        other.nosing_notes = Some("{'brine': 6}".to_string());
        other.tasting_notes = Some("{'pepper': 7}".to_string());
        other.finish_notes = Some("{'smoke': 4}".to_string());

        let records = normalize_corpus(&[raw(), dupe, other]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].meta.full_name, "Lagavulin 16");
        assert_eq!(records[1].meta.full_name, "Talisker 10");
    }
}
