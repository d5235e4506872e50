//! CSV loading and per-row normalization.
//!
//! Reads the catalog export into [`CatalogRecord`]s: dates become
//! `NaiveDate`s, multi-value fields are split once, and the mixed-unit
//! duration column is routed to seasons or minutes.

use std::io::Read;
use std::path::{Path, PathBuf};

use catalog_core::models::{split_multi_value, CatalogRecord, ContentType, Runtime};
use catalog_core::{CatalogError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "type",
    "title",
    "director",
    "cast",
    "country",
    "date_added",
    "release_year",
    "rating",
    "duration",
];

/// Header names under which the category column may appear.
const CATEGORY_COLUMNS: [&str; 2] = ["listed_in", "shows_movies"];

/// Date layouts accepted for `date_added`, tried in order.
const DATE_FORMATS: [&str; 3] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d"];

// ── Types ─────────────────────────────────────────────────────────────────────

/// One CSV row as found in the source, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogRow {
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: String,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
    pub release_year: String,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, alias = "shows_movies")]
    pub listed_in: Option<String>,
}

/// Counters reported after a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows: usize,
    pub episodic: usize,
    pub undated: usize,
}

/// The loaded, read-only table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    source: Option<PathBuf>,
}

impl Catalog {
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Path the catalog was read from, if it came from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> LoadSummary {
        LoadSummary {
            rows: self.records.len(),
            episodic: self
                .records
                .iter()
                .filter(|r| r.content_type.is_episodic())
                .count(),
            undated: self
                .records
                .iter()
                .filter(|r| r.date_added.is_none())
                .count(),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and normalize the catalog CSV at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let file = std::fs::File::open(path).map_err(|source| CatalogError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut catalog = parse_catalog(std::io::BufReader::new(file))?;
    catalog.source = Some(path.to_path_buf());

    let summary = catalog.summary();
    info!(
        "Loaded {} records from {} ({} episodic, {} without date)",
        summary.rows,
        path.display(),
        summary.episodic,
        summary.undated
    );

    Ok(catalog)
}

/// Parse a catalog from any CSV source with a header row.
///
/// Header cells are trimmed. Missing or repeated columns are reported
/// before any row is read.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Catalog> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    check_headers(&headers)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let raw = result?;
        let line = raw.position().map(|p| p.line()).unwrap_or_default();
        let row: CatalogRow = raw.deserialize(Some(&headers))?;
        let record =
            normalize_row(&row).map_err(|message| CatalogError::InvalidRow { line, message })?;
        records.push(record);
    }

    debug!("Parsed {} catalog rows", records.len());
    Ok(Catalog::new(records))
}

fn check_headers(headers: &csv::StringRecord) -> Result<()> {
    let occurrences = |names: &[&str]| headers.iter().filter(|h| names.contains(h)).count();

    for column in REQUIRED_COLUMNS {
        match occurrences(&[column][..]) {
            0 => return Err(CatalogError::MissingColumn(column.to_string())),
            1 => {}
            _ => return Err(CatalogError::DuplicateColumn(column.to_string())),
        }
    }
    if occurrences(&CATEGORY_COLUMNS[..]) > 1 {
        return Err(CatalogError::DuplicateColumn(CATEGORY_COLUMNS.join(" / ")));
    }
    Ok(())
}

/// Turn a raw row into a [`CatalogRecord`].
///
/// Pure function of its input, so normalizing the same row twice yields
/// identical records. Only an unparseable `release_year` is an error.
pub fn normalize_row(row: &CatalogRow) -> std::result::Result<CatalogRecord, String> {
    let release_year = row
        .release_year
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("release_year '{}' is not an integer", row.release_year))?;

    let date_added = row.date_added.as_deref().and_then(|raw| {
        let parsed = parse_date_added(raw);
        if parsed.is_none() && !raw.trim().is_empty() {
            debug!("Unparseable date_added '{}' for '{}'", raw, row.title);
        }
        parsed
    });

    let director = row.director.clone().unwrap_or_default();
    let country = row.country.clone().unwrap_or_default();
    let listed_in = row.listed_in.clone().unwrap_or_default().trim().to_string();

    Ok(CatalogRecord {
        content_type: ContentType::from(row.content_type.as_str()),
        title: row.title.clone(),
        directors: split_multi_value(&director),
        director,
        cast: split_multi_value(row.cast.as_deref().unwrap_or_default()),
        countries: split_multi_value(&country),
        country,
        date_added,
        release_year,
        rating: row.rating.clone().unwrap_or_default().trim().to_string(),
        categories: split_multi_value(&listed_in),
        listed_in,
        runtime: Runtime::parse(row.duration.as_deref().unwrap_or_default()),
    })
}

/// Parse a `date_added` value such as `"November 1, 2019"`.
///
/// Returns `None` for empty or unrecognised input.
pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
