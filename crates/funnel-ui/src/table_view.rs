//! The cohort activation table.
//!
//! Borderless, every column right-aligned, one row per cohort.

use comfy_table::presets::NOTHING;
use comfy_table::{CellAlignment, Table};

use funnel_data::aggregator::CohortSummary;

/// Column headers of the cohort table, in display order.
pub const COHORT_HEADERS: [&str; 5] = [
    "cohort",
    "Users",
    "% Created Assignment",
    "% Activated (overall)",
    "% Activation post-creation",
];

/// Build the cohort activation table, one row per cohort.
pub fn cohort_table(summaries: &[CohortSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING).set_header(COHORT_HEADERS.to_vec());

    for s in summaries {
        table.add_row(vec![
            s.cohort.clone(),
            s.stats.users.to_string(),
            format!("{:.1}", s.pct_created()),
            format!("{:.1}", s.pct_activated()),
            format!("{:.1}", s.pct_activation_post_creation()),
        ]);
    }

    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Right);
    }

    table
}

/// Render the cohort table as text, one line per row, trailing blanks
/// trimmed and a final newline.
pub fn render_cohort_table(summaries: &[CohortSummary]) -> String {
    let mut out = cohort_table(summaries).trim_fmt();
    out.push('\n');
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
