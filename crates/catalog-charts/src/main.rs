mod bootstrap;

use anyhow::{Context, Result};
use catalog_core::settings::Settings;
use catalog_data::analysis::build_report;
use catalog_data::reader::load_catalog;
use catalog_data::views::select_views;
use catalog_ui::app::Gallery;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Catalog Charts v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, View: {}, Output: {}, Theme: {}",
        settings.input.display(),
        settings.view,
        settings.output,
        settings.theme
    );

    let views = select_views(&settings.view)?;

    let input = settings.input.clone();
    let catalog = tokio::task::spawn_blocking(move || load_catalog(&input))
        .await
        .context("catalog loader task failed")??;

    let mut report = build_report(&catalog, &views);
    tracing::info!(
        "Built {} of {} figures in {:.3}s",
        report.metadata.figures,
        views.len(),
        report.metadata.build_time_seconds
    );

    // A single requested view that cannot be drawn is an error, not an empty screen.
    if views.len() == 1 && !report.failures.is_empty() {
        let (_, err) = report.failures.swap_remove(0);
        return Err(err.into());
    }

    match settings.output.as_str() {
        "json" => {
            println!("{}", report.to_json()?);
        }
        _ => {
            let gallery = Gallery::new(&settings.theme, report.figures);

            // Raw mode turns Ctrl+C into a key press; the signal is a fallback
            // for when it arrives from outside the terminal.
            tokio::select! {
                result = gallery.run() => {
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                }
            }
        }
    }

    Ok(())
}
