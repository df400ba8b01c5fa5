//! Catalog, raw-record, and schema-artifact I/O
//!
//! The catalog travels as one CSV: the fixed metadata header followed by
//! the schema's feature columns in schema order. Column presence and
//! order are fixed at build time; an import whose header diverges from
//! the expected layout fails with `SchemaMismatch` instead of silently
//! truncating or padding. The schema itself is persisted as a JSON
//! artifact next to the catalog and shipped with it.

use ahash::AHashMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use drammatch_core::{
    AgeStatement, BottlingMeta, Catalog, CatalogEntry, Error, FeatureSchema, FeatureVector,
    RawRecord, Result,
};

/// Fixed metadata columns preceding the feature columns in a catalog CSV.
pub const METADATA_COLUMNS: [&str; 12] = [
    "full_name",
    "distillery",
    "url",
    "country",
    "region",
    "whisky_type",
    "bottler",
    "age",
    "abv",
    "rating",
    "num_ratings",
    "num_reviews",
];

/// One row of the scraped details file, column names as the scraper
/// emits them.
#[derive(Debug, Deserialize)]
struct DetailRow {
    whisky_url: Option<String>,
    distillery_name_inner: Option<String>,
    country: Option<String>,
    region: Option<String>,
    whisky_type: Option<String>,
    whisky_age_inner: Option<String>,
    alcohol_pct_inner: Option<String>,
    bottler: Option<String>,
    post_treatment: Option<String>,
    nosing_notes: Option<String>,
    tasting_notes: Option<String>,
    finish_notes: Option<String>,
}

/// One row of the main-page ratings file, merged into the details by URL.
#[derive(Debug, Deserialize)]
struct MainPageRow {
    whisky_link: Option<String>,
    whisky_name_suffix: Option<String>,
    whisky_rating: Option<String>,
    num_ratings: Option<String>,
    num_reviews: Option<String>,
}

/// Read a batch of raw records from the scraped details CSV, optionally
/// merging suffix/rating/count columns from the main-page CSV by URL.
/// Detail rows without a main-page match keep those fields absent.
pub fn read_raw_records(details: &Path, main_page: Option<&Path>) -> Result<Vec<RawRecord>> {
    let mut by_url: AHashMap<String, MainPageRow> = AHashMap::new();
    if let Some(path) = main_page {
        let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
        for row in reader.deserialize::<MainPageRow>() {
            let row = row.map_err(csv_err)?;
            if let Some(link) = row.whisky_link.clone() {
                by_url.insert(link, row);
            }
        }
    }

    let mut reader = csv::Reader::from_path(details).map_err(csv_err)?;
    let mut records = Vec::new();
    for row in reader.deserialize::<DetailRow>() {
        let row = row.map_err(csv_err)?;
        let merged = row.whisky_url.as_deref().and_then(|url| by_url.get(url));

        records.push(RawRecord {
            url: row.whisky_url.clone(),
            distillery: row.distillery_name_inner,
            country: row.country,
            region: row.region,
            whisky_type: row.whisky_type,
            bottler: row.bottler,
            age_text: row.whisky_age_inner,
            strength_text: row.alcohol_pct_inner,
            rating_text: merged.and_then(|m| m.whisky_rating.clone()),
            rating_count_text: merged.and_then(|m| m.num_ratings.clone()),
            review_count_text: merged.and_then(|m| m.num_reviews.clone()),
            name_suffix: merged.and_then(|m| m.whisky_name_suffix.clone()),
            post_treatment: row.post_treatment,
            nosing_notes: row.nosing_notes,
            tasting_notes: row.tasting_notes,
            finish_notes: row.finish_notes,
        });
    }

    info!(records = records.len(), path = %details.display(), "raw records loaded");
    Ok(records)
}

/// Export a catalog to CSV: metadata columns then feature columns in
/// schema order. Rebuilding from an unchanged corpus writes a
/// byte-identical file.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    let header: Vec<&str> = METADATA_COLUMNS
        .iter()
        .copied()
        .chain(catalog.schema().columns())
        .collect();
    writer.write_record(&header).map_err(csv_err)?;

    for entry in catalog.entries() {
        let meta = &entry.meta;
        let mut row: Vec<String> = vec![
            meta.full_name.clone(),
            meta.distillery.clone(),
            meta.url.clone().unwrap_or_default(),
            meta.country.clone().unwrap_or_default(),
            meta.region.clone().unwrap_or_default(),
            meta.whisky_type.clone().unwrap_or_default(),
            meta.bottler.clone().unwrap_or_default(),
            meta.age.to_string(),
            meta.abv.to_string(),
            meta.rating.map(|r| r.to_string()).unwrap_or_default(),
            meta.rating_count.map(|c| c.to_string()).unwrap_or_default(),
            meta.review_count.to_string(),
        ];
        row.extend(entry.vector.as_slice().iter().map(|v| v.to_string()));
        writer.write_record(&row).map_err(csv_err)?;
    }

    writer.flush()?;
    info!(entries = catalog.len(), path = %path.display(), "catalog written");
    Ok(())
}

/// Import a catalog CSV against a known schema. The header must match
/// the metadata columns followed by the schema columns exactly.
pub fn read_catalog(path: &Path, schema: &FeatureSchema) -> Result<Catalog> {
    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;

    let expected: Vec<&str> = METADATA_COLUMNS
        .iter()
        .copied()
        .chain(schema.columns())
        .collect();
    let header = reader.headers().map_err(csv_err)?.clone();
    let actual: Vec<&str> = header.iter().collect();
    if actual != expected {
        return Err(Error::SchemaMismatch {
            expected: format!(
                "{} columns (schema fp {:016x})",
                expected.len(),
                schema.fingerprint()
            ),
            actual: describe_header_divergence(&expected, &actual),
        });
    }

    let mut entries = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        entries.push(parse_catalog_row(&row, schema)?);
    }

    let catalog = Catalog::from_entries(schema.clone(), entries)?;
    info!(entries = catalog.len(), path = %path.display(), "catalog loaded");
    Ok(catalog)
}

fn parse_catalog_row(row: &csv::StringRecord, schema: &FeatureSchema) -> Result<CatalogEntry> {
    let field = |i: usize| row.get(i).unwrap_or("").trim();
    let opt = |i: usize| {
        let v = field(i);
        (!v.is_empty()).then(|| v.to_string())
    };

    let full_name = field(0).to_string();
    if full_name.is_empty() {
        return Err(Error::malformed("full_name", "missing full name"));
    }

    let age: AgeStatement = field(7).parse()?;
    let abv: f64 = field(8)
        .parse()
        .map_err(|_| Error::malformed("abv", format!("non-numeric '{}'", field(8))))?;
    let rating = match field(9) {
        "" => None,
        v => Some(v.parse::<f64>().map_err(|_| {
            Error::malformed("rating", format!("non-numeric '{}'", v))
        })?),
    };
    let rating_count = match field(10) {
        "" => None,
        v => Some(v.parse::<u32>().map_err(|_| {
            Error::malformed("num_ratings", format!("non-numeric '{}'", v))
        })?),
    };
    let review_count: u32 = match field(11) {
        "" => 0,
        v => v
            .parse()
            .map_err(|_| Error::malformed("num_reviews", format!("non-numeric '{}'", v)))?,
    };

    let mut data = Vec::with_capacity(schema.len());
    for (offset, column) in schema.columns().enumerate() {
        let raw = field(METADATA_COLUMNS.len() + offset);
        let value: f32 = raw
            .parse()
            .map_err(|_| Error::malformed(column, format!("non-numeric '{}'", raw)))?;
        data.push(value);
    }

    Ok(CatalogEntry {
        meta: BottlingMeta {
            full_name,
            distillery: field(1).to_string(),
            url: opt(2),
            country: opt(3),
            region: opt(4),
            whisky_type: opt(5),
            bottler: opt(6),
            age,
            abv,
            rating,
            rating_count,
            review_count,
        },
        vector: FeatureVector::new(data),
    })
}

fn describe_header_divergence(expected: &[&str], actual: &[&str]) -> String {
    if expected.len() != actual.len() {
        return format!("{} columns", actual.len());
    }
    for (i, (e, a)) in expected.iter().zip(actual).enumerate() {
        if e != a {
            return format!("column {} is '{}' where '{}' was expected", i, a, e);
        }
    }
    format!("{} columns", actual.len())
}

/// Persist the schema artifact as JSON, written to a temp file then
/// renamed so readers never observe a partial artifact.
pub fn save_schema(schema: &FeatureSchema, path: &Path) -> Result<()> {
    let json =
        serde_json::to_vec_pretty(schema).map_err(|e| Error::Serialization(e.to_string()))?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    info!(path = %path.display(), fingerprint = format!("{:016x}", schema.fingerprint()), "schema artifact written");
    Ok(())
}

pub fn load_schema(path: &Path) -> Result<FeatureSchema> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| Error::Serialization(e.to_string()))
}

fn csv_err(e: csv::Error) -> Error {
    Error::Csv(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_catalog;
    use drammatch_core::{NormalizedRecord, NoteMap};
    use std::io::Write;

    fn record(name: &str, tags: &[&str], nosing: &[(&str, f64)]) -> NormalizedRecord {
        NormalizedRecord {
            meta: BottlingMeta {
                full_name: name.to_string(),
                distillery: name.split(' ').next().unwrap_or(name).to_string(),
                url: Some(format!("https://example.com/{}", name.replace(' ', "-"))),
                country: Some("Scotland".to_string()),
                region: None,
                whisky_type: Some("Single Malt".to_string()),
                bottler: None,
                age: AgeStatement::Years(12),
                abv: 43.0,
                rating: Some(4.5),
                rating_count: Some(321),
                review_count: 17,
            },
            tags: tags.iter().map(|t| t.to_string()).collect(),
            nosing: nosing.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            tasting: NoteMap::new(),
            finish: NoteMap::new(),
        }
    }

    fn sample_catalog() -> Catalog {
        build_catalog(&[
            record("Aberlour 12", &["Sherry Cask"], &[("sherry", 9.0), ("honey", 6.0)]),
            record("Benromach 12", &[], &[("smoke", 6.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_catalog_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");

        let catalog = sample_catalog();
        write_catalog(&catalog, &path).unwrap();
        let loaded = read_catalog(&path, catalog.schema()).unwrap();

        assert_eq!(loaded.len(), catalog.len());
        for (a, b) in catalog.entries().iter().zip(loaded.entries()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_rebuild_writes_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");

        write_catalog(&sample_catalog(), &first).unwrap();
        write_catalog(&sample_catalog(), &second).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_import_against_wrong_schema_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");

        let catalog = sample_catalog();
        write_catalog(&catalog, &path).unwrap();

        let other = FeatureSchema::new(
            vec!["Port Finish".to_string()],
            vec!["smoke".to_string()],
        );
        assert!(matches!(
            read_catalog(&path, &other),
            Err(Error::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_schema_artifact_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");

        let schema = sample_catalog().schema().clone();
        save_schema(&schema, &path).unwrap();
        let loaded = load_schema(&path).unwrap();
        assert_eq!(schema, loaded);
        assert!(schema.ensure_matches(&loaded).is_ok());
    }

    #[test]
    fn test_raw_import_with_main_page_merge() {
        let dir = tempfile::tempdir().unwrap();
        let details = dir.path().join("details.csv");
        let main_page = dir.path().join("main.csv");

        let mut f = fs::File::create(&details).unwrap();
        writeln!(
            f,
            "whisky_url,distillery_name_inner,country,region,whisky_type,whisky_age_inner,alcohol_pct_inner,bottler,post_treatment,nosing_notes,tasting_notes,finish_notes"
        )
        .unwrap();
        writeln!(
            f,
            "https://x/lag16,Lagavulin,Scotland,Islay,Single Malt,16 years,43.0%,,\"['Sherry Cask']\",\"{{'smoke': 8}}\",\"{{'smoke': 9}}\",\"{{'smoke': 7}}\""
        )
        .unwrap();
        writeln!(
            f,
            "https://x/unknown,Talisker,Scotland,Skye,Single Malt,10 years,45.8%,,,\"{{'pepper': 7}}\",,"
        )
        .unwrap();

        let mut f = fs::File::create(&main_page).unwrap();
        writeln!(f, "whisky_link,whisky_name_suffix,whisky_rating,num_ratings,num_reviews").unwrap();
        writeln!(f, "https://x/lag16,,4.6,\"(1,234)\",210").unwrap();

        let raws = read_raw_records(&details, Some(&main_page)).unwrap();
        assert_eq!(raws.len(), 2);
        assert_eq!(raws[0].rating_text.as_deref(), Some("4.6"));
        assert_eq!(raws[0].rating_count_text.as_deref(), Some("(1,234)"));
        // no main-page match: merge fields stay absent
        assert!(raws[1].rating_text.is_none());
        assert!(raws[1].name_suffix.is_none());
    }
}
