//! Builds a batch of views over one loaded catalog.
//!
//! A failing view only drops its own figure; the others are still returned,
//! and the failures are reported alongside.

use catalog_core::figure::Figure;
use catalog_core::{CatalogError, Result};
use serde::Serialize;
use tracing::{debug, warn};

use crate::reader::Catalog;
use crate::views::View;

/// Metadata describing one batch.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Where the records came from, if known.
    pub source: Option<String>,
    /// Number of records the views ran over.
    pub records: usize,
    /// Number of figures produced.
    pub figures: usize,
    /// Wall-clock seconds spent building all views.
    pub build_time_seconds: f64,
}

/// Figures built for the requested views plus the views that failed.
#[derive(Debug)]
pub struct ChartReport {
    pub figures: Vec<Figure>,
    pub failures: Vec<(View, CatalogError)>,
    pub metadata: ReportMetadata,
}

/// A view left out of the export and why.
#[derive(Debug, Serialize)]
struct SkippedView {
    view: &'static str,
    reason: String,
}

/// JSON document written by `--output json`.
#[derive(Debug, Serialize)]
struct ReportExport<'a> {
    metadata: &'a ReportMetadata,
    figures: &'a [Figure],
    skipped: Vec<SkippedView>,
}

impl ChartReport {
    /// Pretty-printed JSON with metadata, figures and skipped views.
    pub fn to_json(&self) -> Result<String> {
        let export = ReportExport {
            metadata: &self.metadata,
            figures: &self.figures,
            skipped: self
                .failures
                .iter()
                .map(|(view, err)| SkippedView {
                    view: view.id(),
                    reason: err.to_string(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }
}

/// Build every view in `views` over `catalog`, in order.
pub fn build_report(catalog: &Catalog, views: &[View]) -> ChartReport {
    let start = std::time::Instant::now();
    let mut figures = Vec::with_capacity(views.len());
    let mut failures = Vec::new();

    for &view in views {
        match view.build(catalog.records()) {
            Ok(figure) => {
                debug!("Built view {} with {} traces", view, figure.traces.len());
                figures.push(figure);
            }
            Err(e) => {
                warn!("Skipping view {}: {}", view, e);
                failures.push((view, e));
            }
        }
    }

    let metadata = ReportMetadata {
        source: catalog.source().map(|p| p.display().to_string()),
        records: catalog.len(),
        figures: figures.len(),
        build_time_seconds: start.elapsed().as_secs_f64(),
    };

    ChartReport {
        figures,
        failures,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_catalog;

    const DATA: &str = "type,title,director,cast,country,date_added,release_year,rating,duration\n\
        TV Show,S,,\"A, B\",United States,\"May 1, 2019\",2019,TV-MA,1 Season\n\
        Movie,M,Dir,C,India,\"June 2, 2018\",2017,PG,95 min\n";

    #[test]
    fn test_build_report_skips_failing_views() {
        let catalog = parse_catalog(DATA.as_bytes()).unwrap();
        let report = build_report(&catalog, &View::ALL);

        // No listed_in column, so only the category count plot has nothing to show.
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, View::Categories);
        assert_eq!(report.figures.len(), View::ALL.len() - 1);
        assert_eq!(report.metadata.records, 2);
        assert_eq!(report.metadata.figures, report.figures.len());
        assert!(report.metadata.source.is_none());
    }

    #[test]
    fn test_build_report_keeps_requested_order() {
        let catalog = parse_catalog(DATA.as_bytes()).unwrap();
        let report = build_report(&catalog, &[View::Seasons, View::Types]);
        let ids: Vec<&str> = report.figures.iter().map(|f| f.view.as_str()).collect();
        assert_eq!(ids, vec!["seasons", "types"]);
    }

    #[test]
    fn test_report_to_json() {
        let catalog = parse_catalog(DATA.as_bytes()).unwrap();
        let report = build_report(&catalog, &[View::Types, View::Categories]);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["metadata"]["records"], 2);
        assert_eq!(json["metadata"]["figures"], 1);
        assert_eq!(json["figures"][0]["view"], "types");
        assert_eq!(json["skipped"][0]["view"], "categories");
        assert_eq!(
            json["skipped"][0]["reason"],
            "View 'categories' has no data to plot"
        );
    }

    #[test]
    fn test_build_report_empty_catalog() {
        let catalog = Catalog::default();
        let report = build_report(&catalog, &View::ALL);
        assert!(report.figures.is_empty());
        assert_eq!(report.failures.len(), View::ALL.len());
    }
}
