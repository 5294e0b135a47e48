mod bootstrap;

use anyhow::{Context, Result};
use funnel_core::settings::Settings;
use funnel_data::analysis::analyze_events;
use funnel_ui::report_view::render_report;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Funnel report v{} starting", env!("CARGO_PKG_VERSION"));

    let result = analyze_events(&settings.input)
        .with_context(|| format!("Cannot build report from {}", settings.input.display()))?;

    let meta = &result.metadata;
    tracing::info!(
        "Analysed {} events ({} skipped, {} users) at {} in {:.3}s load / {:.3}s compute",
        meta.events_processed,
        meta.rows_skipped,
        meta.distinct_users,
        meta.generated_at.to_rfc3339(),
        meta.load_time_seconds,
        meta.compute_time_seconds
    );

    print!("{}", render_report(&result));

    Ok(())
}
