//! Chart views over the loaded catalog.
//!
//! Every view filters the records, counts one or two keys, and packs the
//! result into a [`Figure`]. Views are independent of one another and only
//! read the record slice they are given.

use std::fmt;
use std::str::FromStr;

use catalog_core::figure::{
    Figure, Grid, Legend, Trace, DIRECTOR_COLOR, MOVIE_COLOR, TV_SHOW_COLOR,
};
use catalog_core::models::{CatalogRecord, ContentFilter, ContentType};
use catalog_core::{CatalogError, Result};

use crate::frequency::{percentages, top_tags, unzip_labels, value_counts, FrequencyTable};

/// Subplot titles of the cast panel grid; blanks are spacer cells.
pub const CAST_PANEL_TITLES: [&str; 10] = [
    "United States",
    "",
    "India",
    "",
    "United Kingdom",
    "Canada",
    "",
    "Spain",
    "",
    "Japan",
];
/// Grid cells receiving a cast panel, in title order.
const CAST_PANEL_CELLS: [(u16, u16); 6] = [(1, 1), (1, 3), (1, 5), (2, 1), (2, 3), (2, 5)];
pub const CAST_TOP_N: usize = 25;

/// Country whose movie directors are ranked.
pub const DIRECTOR_COUNTRY: &str = "India";
pub const DIRECTOR_TOP_N: usize = 12;

pub const COUNTRY_TOP_N: usize = 10;
pub const CATEGORY_TOP_N: usize = 10;
pub const TOP_DIRECTORS_N: usize = 6;

// ── View ──────────────────────────────────────────────────────────────────────

/// The named chart views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Types,
    Yearly,
    Monthly,
    Seasons,
    Ratings,
    Countries,
    Cast,
    Directors,
    Categories,
    TopDirectors,
    RatingCounts,
}

impl View {
    /// Every view in gallery order.
    pub const ALL: [View; 11] = [
        View::Types,
        View::Yearly,
        View::Monthly,
        View::Seasons,
        View::Ratings,
        View::Countries,
        View::Cast,
        View::Directors,
        View::Categories,
        View::TopDirectors,
        View::RatingCounts,
    ];

    /// Identifier used on the command line and in exported figures.
    pub fn id(self) -> &'static str {
        match self {
            View::Types => "types",
            View::Yearly => "yearly",
            View::Monthly => "monthly",
            View::Seasons => "seasons",
            View::Ratings => "ratings",
            View::Countries => "countries",
            View::Cast => "cast",
            View::Directors => "directors",
            View::Categories => "categories",
            View::TopDirectors => "top-directors",
            View::RatingCounts => "rating-counts",
        }
    }

    /// Build this view's figure.
    pub fn build(self, records: &[CatalogRecord]) -> Result<Figure> {
        match self {
            View::Types => type_distribution(records),
            View::Yearly => yearly_additions(records),
            View::Monthly => monthly_additions(records),
            View::Seasons => season_distribution(records),
            View::Ratings => rating_distribution(records),
            View::Countries => country_distribution(records),
            View::Cast => cast_by_country(records),
            View::Directors => directors_by_country(records),
            View::Categories => category_counts(records),
            View::TopDirectors => top_directors(records),
            View::RatingCounts => rating_counts(records),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for View {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        View::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| CatalogError::UnknownView(s.to_string()))
    }
}

/// Resolve a `--view` value: `"all"` or a single view id.
pub fn select_views(name: &str) -> Result<Vec<View>> {
    if name == "all" {
        Ok(View::ALL.to_vec())
    } else {
        Ok(vec![name.parse()?])
    }
}

// ── Views ─────────────────────────────────────────────────────────────────────

/// Share of movies vs. TV shows.
pub fn type_distribution(records: &[CatalogRecord]) -> Result<Figure> {
    let counts = value_counts(records.iter().map(|r| r.content_type.as_str()));
    let pct = percentages(&counts);
    let (labels, values) = unzip_labels(&counts);

    let trace = Trace::pie(labels, values)
        .with_pull(&[0.05, 0.0])
        .with_colors(&[MOVIE_COLOR, TV_SHOW_COLOR])
        .with_percentages(pct);
    let traces = ensure_data(View::Types, vec![trace])?;

    Ok(Figure::new(View::Types.id(), "", traces)
        .with_height(650)
        .with_legend(Legend::at(0.1, 1.1)))
}

/// Titles added per year, one line per type.
pub fn yearly_additions(records: &[CatalogRecord]) -> Result<Figure> {
    let series = |ty: ContentType| {
        let counts = sorted_by_key(value_counts(
            records
                .iter()
                .filter(|r| r.content_type == ty)
                .filter_map(CatalogRecord::year_added),
        ));
        let pct = percentages(&counts);
        let (labels, values) = unzip_labels(&counts);
        (labels, values, pct)
    };

    let (labels, values, pct) = series(ContentType::TvShow);
    let shows = Trace::line("TV Shows", labels, values)
        .with_color(TV_SHOW_COLOR)
        .with_percentages(pct);
    let (labels, values, pct) = series(ContentType::Movie);
    let movies = Trace::line("Movies", labels, values)
        .with_color(MOVIE_COLOR)
        .with_percentages(pct);

    let traces = ensure_data(View::Yearly, vec![shows, movies])?;
    Ok(
        Figure::new(View::Yearly.id(), "Content added over the years", traces)
            .with_legend(Legend::horizontal(0.1, 1.1)),
    )
}

/// TV shows added per calendar month.
pub fn monthly_additions(records: &[CatalogRecord]) -> Result<Figure> {
    let counts = sorted_by_key(value_counts(
        episodic(records).filter_map(CatalogRecord::month_added),
    ));
    let (labels, values) = unzip_labels(&counts);

    let trace = Trace::bar("TV Shows", labels, values).with_color(TV_SHOW_COLOR);
    let traces = ensure_data(View::Monthly, vec![trace])?;
    Ok(Figure::new(
        View::Monthly.id(),
        "In which month, the content is added the most?",
        traces,
    )
    .with_legend(Legend::horizontal(1.1, 2.1)))
}

/// TV shows per season count.
///
/// Season counts are text, so the key order is lexicographic ("10" before
/// "2").
pub fn season_distribution(records: &[CatalogRecord]) -> Result<Figure> {
    let counts = sorted_by_key(value_counts(
        episodic(records).map(|r| r.season_count().to_string()),
    ));
    let pct = percentages(&counts);
    let (labels, values) = unzip_labels(&counts);

    let trace = Trace::bar("TV Shows", labels, values)
        .with_color(TV_SHOW_COLOR)
        .with_percentages(pct);
    let traces = ensure_data(View::Seasons, vec![trace])?;
    Ok(Figure::new(View::Seasons.id(), "Seasons", traces)
        .with_legend(Legend::horizontal(0.1, 1.1)))
}

/// Rating frequency per type.
///
/// The TV series stays in frequency order while the movie series is sorted
/// by rating code.
pub fn rating_distribution(records: &[CatalogRecord]) -> Result<Figure> {
    let ratings = |ty: ContentType| {
        value_counts(
            records
                .iter()
                .filter(|r| r.content_type == ty && !r.rating.is_empty())
                .map(|r| r.rating.as_str()),
        )
    };

    let (labels, values) = unzip_labels(&ratings(ContentType::TvShow));
    let shows = Trace::bar("TV Shows", labels, values).with_color(TV_SHOW_COLOR);
    let (labels, values) = unzip_labels(&sorted_by_key(ratings(ContentType::Movie)));
    let movies = Trace::bar("Movies", labels, values).with_color(MOVIE_COLOR);

    let traces = ensure_data(View::Ratings, vec![shows, movies])?;
    Ok(Figure::new(View::Ratings.id(), "Ratings by type", traces)
        .with_legend(Legend::horizontal(0.1, 1.1)))
}

/// Share of the ten most frequent country values.
pub fn country_distribution(records: &[CatalogRecord]) -> Result<Figure> {
    let mut counts = value_counts(
        records
            .iter()
            .filter(|r| !r.country.is_empty())
            .map(|r| r.country.as_str()),
    );
    counts.truncate(COUNTRY_TOP_N);
    let pct = percentages(&counts);
    let (labels, values) = unzip_labels(&counts);

    let trace = Trace::pie(labels, values).with_percentages(pct);
    let traces = ensure_data(View::Countries, vec![trace])?;
    Ok(Figure::new(View::Countries.id(), "No. of Shows by Country", traces))
}

/// Most frequent cast members of records from `country`.
///
/// `country` is matched case-insensitively as a substring of any listed
/// country. Returns up to `n` non-empty names, most frequent first.
pub fn cast_frequency(
    records: &[CatalogRecord],
    country: &str,
    filter: ContentFilter,
    n: usize,
) -> Vec<(String, u64)> {
    top_tags(
        records
            .iter()
            .filter(|r| r.is_from(country) && filter.accepts(r))
            .flat_map(|r| r.cast.iter().map(String::as_str)),
        n,
    )
}

/// Top movie cast members for six countries, one panel each.
pub fn cast_by_country(records: &[CatalogRecord]) -> Result<Figure> {
    let countries = CAST_PANEL_TITLES.iter().filter(|t| !t.is_empty());

    let traces: Vec<Trace> = countries
        .zip(CAST_PANEL_CELLS)
        .map(|(country, (row, col))| {
            let tags = cast_frequency(records, country, ContentFilter::Movies, CAST_TOP_N);
            let (labels, values) = bottom_up(&tags, "  ");
            Trace::horizontal_bar("", labels, values)
                .with_color(TV_SHOW_COLOR)
                .in_cell(row, col)
        })
        .collect();
    let traces = ensure_data(View::Cast, traces)?;

    let grid = Grid {
        rows: 2,
        cols: 5,
        subplot_titles: CAST_PANEL_TITLES.iter().map(|t| t.to_string()).collect(),
    };
    Ok(Figure::new(View::Cast.id(), "Top cast by country", traces)
        .with_grid(grid)
        .with_height(2600)
        .without_legend())
}

/// Most frequent directors of movies whose country field is exactly
/// `country`.
pub fn director_frequency(records: &[CatalogRecord], country: &str, n: usize) -> Vec<(String, u64)> {
    top_tags(
        records
            .iter()
            .filter(|r| r.content_type == ContentType::Movie && r.country == country)
            .flat_map(|r| r.directors.iter().map(String::as_str)),
        n,
    )
}

/// Movie directors from [`DIRECTOR_COUNTRY`] with the most titles.
pub fn directors_by_country(records: &[CatalogRecord]) -> Result<Figure> {
    let tags = director_frequency(records, DIRECTOR_COUNTRY, DIRECTOR_TOP_N);
    let (labels, values) = bottom_up(&tags, "");

    let trace = Trace::horizontal_bar("Directors", labels, values).with_color(DIRECTOR_COLOR);
    let traces = ensure_data(View::Directors, vec![trace])?;
    Ok(Figure::new(
        View::Directors.id(),
        format!("Movie Directors from {DIRECTOR_COUNTRY} with most content"),
        traces,
    )
    .with_legend(Legend::horizontal(0.1, 1.1)))
}

/// Count plot of the ten most frequent category field values.
///
/// Counts the raw field like [`top_directors`], so a title listed under
/// several categories forms its own entry.
pub fn category_counts(records: &[CatalogRecord]) -> Result<Figure> {
    let mut counts = value_counts(
        records
            .iter()
            .filter(|r| !r.listed_in.is_empty())
            .map(|r| r.listed_in.clone()),
    );
    counts.truncate(CATEGORY_TOP_N);
    let (labels, values) = bottom_up(&counts, "");

    let trace = Trace::horizontal_bar("Categories", labels, values).with_count_labels();
    let traces = ensure_data(View::Categories, vec![trace])?;
    Ok(Figure::new(
        View::Categories.id(),
        "Value Counts of The Categories Variable",
        traces,
    ))
}

/// Count plot of the six most frequent director field values.
///
/// Counts the raw field, so co-directed titles form their own entry.
pub fn top_directors(records: &[CatalogRecord]) -> Result<Figure> {
    let mut counts = value_counts(
        records
            .iter()
            .filter(|r| !r.director.is_empty())
            .map(|r| r.director.as_str()),
    );
    counts.truncate(TOP_DIRECTORS_N);
    let (labels, values) = unzip_labels(&counts);

    let trace = Trace::bar("Director", labels, values).with_count_labels();
    let traces = ensure_data(View::TopDirectors, vec![trace])?;
    Ok(Figure::new(View::TopDirectors.id(), "Director", traces))
}

/// Count plot of ratings, one bar group per type.
///
/// Ratings and types appear in first-seen order; every type trace shares
/// the same rating axis, with zero where a type has no title.
pub fn rating_counts(records: &[CatalogRecord]) -> Result<Figure> {
    let rated: Vec<&CatalogRecord> = records.iter().filter(|r| !r.rating.is_empty()).collect();

    let axis: Vec<String> = rated
        .iter()
        .map(|r| r.rating.as_str())
        .collect::<FrequencyTable<&str>>()
        .into_entries()
        .into_iter()
        .map(|(rating, _)| rating.to_string())
        .collect();
    let types: Vec<ContentType> = rated
        .iter()
        .map(|r| r.content_type.clone())
        .collect::<FrequencyTable<ContentType>>()
        .into_entries()
        .into_iter()
        .map(|(ty, _)| ty)
        .collect();

    let traces: Vec<Trace> = types
        .into_iter()
        .map(|ty| {
            let table: FrequencyTable<&str> = rated
                .iter()
                .filter(|r| r.content_type == ty)
                .map(|r| r.rating.as_str())
                .collect();
            let values = axis.iter().map(|a| table.count(&a.as_str())).collect();
            let trace = Trace::bar(ty.as_str(), axis.clone(), values).with_count_labels();
            match ty {
                ContentType::Movie => trace.with_color(MOVIE_COLOR),
                ContentType::TvShow => trace.with_color(TV_SHOW_COLOR),
                ContentType::Other(_) => trace,
            }
        })
        .collect();

    let traces = ensure_data(View::RatingCounts, traces)?;
    Ok(Figure::new(
        View::RatingCounts.id(),
        "Value Counts of The Ratings Variable",
        traces,
    ))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn episodic(records: &[CatalogRecord]) -> impl Iterator<Item = &CatalogRecord> {
    records.iter().filter(|r| r.content_type.is_episodic())
}

fn sorted_by_key<K: Ord>(mut counts: Vec<(K, u64)>) -> Vec<(K, u64)> {
    counts.sort_by(|a, b| a.0.cmp(&b.0));
    counts
}

/// Horizontal bars list their labels bottom to top, so a ranking is
/// reversed to put the leader on top.
fn bottom_up(tags: &[(String, u64)], suffix: &str) -> (Vec<String>, Vec<u64>) {
    tags.iter()
        .rev()
        .map(|(name, count)| (format!("{name}{suffix}"), *count))
        .unzip()
}

fn ensure_data(view: View, traces: Vec<Trace>) -> Result<Vec<Trace>> {
    if traces.iter().all(Trace::is_empty) {
        return Err(CatalogError::empty(view.id()));
    }
    Ok(traces)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
