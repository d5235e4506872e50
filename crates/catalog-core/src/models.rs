use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text marker identifying an episodic duration such as `"3 Seasons"`.
pub const SEASON_MARKER: &str = "Season";

/// Literal type value of episodic records.
pub const TV_SHOW: &str = "TV Show";

/// Literal type value of non-episodic records.
pub const MOVIE: &str = "Movie";

/// Kind of catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    /// A feature-length title measured in minutes.
    Movie,
    /// A multi-episode show measured in seasons.
    TvShow,
    /// Anything else found in the `type` column, kept verbatim.
    Other(String),
}

impl ContentType {
    /// The label as it appears in the source data.
    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Movie => MOVIE,
            ContentType::TvShow => TV_SHOW,
            ContentType::Other(s) => s,
        }
    }

    /// Whether this is the episodic type.
    pub fn is_episodic(&self) -> bool {
        matches!(self, ContentType::TvShow)
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        match value.trim() {
            MOVIE => ContentType::Movie,
            TV_SHOW => ContentType::TvShow,
            other => ContentType::Other(other.to_string()),
        }
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        ContentType::from(value.as_str())
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The duration column split by unit.
///
/// The payload is the leading whitespace-separated token of the raw text and
/// is not guaranteed to be numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Runtime {
    /// Season count of an episodic title, e.g. `"3"` from `"3 Seasons"`.
    Seasons(String),
    /// Run length in minutes, e.g. `"90"` from `"90 min"`.
    Minutes(String),
}

impl Runtime {
    /// Classify a raw duration value.
    pub fn parse(raw: &str) -> Self {
        let token = raw.split_whitespace().next().unwrap_or_default().to_string();
        if raw.contains(SEASON_MARKER) {
            Runtime::Seasons(token)
        } else {
            Runtime::Minutes(token)
        }
    }
}

/// Which side of the catalog a filter keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFilter {
    /// Records carrying a movie duration.
    #[default]
    Movies,
    /// Records carrying a season count.
    Shows,
    /// No filtering.
    All,
}

impl ContentFilter {
    /// Returns `true` when `record` passes the filter.
    pub fn accepts(self, record: &CatalogRecord) -> bool {
        match self {
            ContentFilter::Movies => !record.duration().is_empty(),
            ContentFilter::Shows => !record.season_count().is_empty(),
            ContentFilter::All => true,
        }
    }
}

/// A single normalized row of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Movie or TV show.
    pub content_type: ContentType,
    /// Display title.
    pub title: String,
    /// Raw director field as found in the source.
    #[serde(default)]
    pub director: String,
    /// Director names, split once at load.
    #[serde(default)]
    pub directors: Vec<String>,
    /// Cast names, split once at load.
    #[serde(default)]
    pub cast: Vec<String>,
    /// Raw country field as found in the source.
    #[serde(default)]
    pub country: String,
    /// Country names, split once at load.
    #[serde(default)]
    pub countries: Vec<String>,
    /// Date the title was added, `None` when missing or unparseable.
    #[serde(default)]
    pub date_added: Option<NaiveDate>,
    /// Year the title was originally released.
    pub release_year: i32,
    /// Audience rating code, empty when missing.
    #[serde(default)]
    pub rating: String,
    /// Raw category field as found in the source.
    #[serde(default)]
    pub listed_in: String,
    /// Genre / category labels, split once at load.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Season count or movie duration.
    pub runtime: Runtime,
}

impl CatalogRecord {
    /// Calendar year of [`Self::date_added`].
    pub fn year_added(&self) -> Option<i32> {
        self.date_added.map(|d| d.year())
    }

    /// Calendar month (1-12) of [`Self::date_added`].
    pub fn month_added(&self) -> Option<u32> {
        self.date_added.map(|d| d.month())
    }

    /// Season count token, or `""` for non-episodic durations.
    pub fn season_count(&self) -> &str {
        match &self.runtime {
            Runtime::Seasons(s) => s,
            Runtime::Minutes(_) => "",
        }
    }

    /// Movie duration token, or `""` for episodic durations.
    pub fn duration(&self) -> &str {
        match &self.runtime {
            Runtime::Minutes(m) => m,
            Runtime::Seasons(_) => "",
        }
    }

    /// Case-insensitive substring match against any listed country.
    pub fn is_from(&self, country: &str) -> bool {
        let needle = country.to_lowercase();
        self.countries
            .iter()
            .any(|c| c.to_lowercase().contains(&needle))
    }
}

/// Split a comma-delimited multi-value field, trimming each item.
///
/// An empty or whitespace-only field yields an empty list.
pub fn split_multi_value(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(content_type: &str, duration: &str) -> CatalogRecord {
        CatalogRecord {
            content_type: ContentType::from(content_type),
            title: "Example".to_string(),
            director: String::new(),
            directors: Vec::new(),
            cast: Vec::new(),
            country: "India, United States".to_string(),
            countries: split_multi_value("India, United States"),
            date_added: NaiveDate::from_ymd_opt(2019, 11, 1),
            release_year: 2018,
            rating: "TV-MA".to_string(),
            listed_in: String::new(),
            categories: Vec::new(),
            runtime: Runtime::parse(duration),
        }
    }

    #[test]
    fn test_content_type_from_str() {
        assert_eq!(ContentType::from("Movie"), ContentType::Movie);
        assert_eq!(ContentType::from("TV Show"), ContentType::TvShow);
        assert_eq!(
            ContentType::from("Short"),
            ContentType::Other("Short".to_string())
        );
        assert!(ContentType::TvShow.is_episodic());
        assert!(!ContentType::Movie.is_episodic());
    }

    #[test]
    fn test_content_type_serializes_as_label() {
        let json = serde_json::to_string(&ContentType::TvShow).unwrap();
        assert_eq!(json, "\"TV Show\"");
        let back: ContentType = serde_json::from_str("\"Movie\"").unwrap();
        assert_eq!(back, ContentType::Movie);
    }

    #[test]
    fn test_runtime_seasons() {
        let r = record("TV Show", "3 Seasons");
        assert_eq!(r.season_count(), "3");
        assert_eq!(r.duration(), "");
    }

    #[test]
    fn test_runtime_single_season() {
        assert_eq!(Runtime::parse("1 Season"), Runtime::Seasons("1".to_string()));
    }

    #[test]
    fn test_runtime_minutes() {
        let r = record("Movie", "90 min");
        assert_eq!(r.season_count(), "");
        assert_eq!(r.duration(), "90");
    }

    #[test]
    fn test_runtime_keeps_non_numeric_token() {
        assert_eq!(Runtime::parse("abc min"), Runtime::Minutes("abc".to_string()));
        assert_eq!(Runtime::parse(""), Runtime::Minutes(String::new()));
    }

    #[test]
    fn test_year_and_month_added() {
        let r = record("Movie", "90 min");
        assert_eq!(r.year_added(), Some(2019));
        assert_eq!(r.month_added(), Some(11));

        let mut undated = r.clone();
        undated.date_added = None;
        assert_eq!(undated.year_added(), None);
        assert_eq!(undated.month_added(), None);
    }

    #[test]
    fn test_is_from_case_insensitive_substring() {
        let r = record("Movie", "90 min");
        assert!(r.is_from("india"));
        assert!(r.is_from("STATES"));
        assert!(!r.is_from("Japan"));
    }

    #[test]
    fn test_content_filter() {
        let movie = record("Movie", "90 min");
        let show = record("TV Show", "2 Seasons");
        assert!(ContentFilter::Movies.accepts(&movie));
        assert!(!ContentFilter::Movies.accepts(&show));
        assert!(ContentFilter::Shows.accepts(&show));
        assert!(!ContentFilter::Shows.accepts(&movie));
        assert!(ContentFilter::All.accepts(&movie));
        assert!(ContentFilter::All.accepts(&show));
    }

    #[test]
    fn test_split_multi_value() {
        assert_eq!(split_multi_value("A, B, A"), vec!["A", "B", "A"]);
        assert_eq!(split_multi_value("Solo"), vec!["Solo"]);
        assert!(split_multi_value("").is_empty());
        assert!(split_multi_value("   ").is_empty());
    }
}
