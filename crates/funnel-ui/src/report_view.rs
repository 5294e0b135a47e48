//! The sectioned text report: funnel, decision point and cohorts.

use funnel_core::calculations::DropOff;
use funnel_core::formatting::{format_compact, format_percent};
use funnel_data::aggregator::CohortSummary;
use funnel_data::analysis::{
    AnalysisResult, Conversion, DecisionAnalysis, FunnelResult, StageResult,
};

use crate::table_view::render_cohort_table;

const WIDE_RULE: &str = "--------------------------------";
const NARROW_RULE: &str = "------------------------------";

/// Printed in place of the cohort table when the log has no `cohort` column.
pub const NO_COHORT_MESSAGE: &str =
    "No 'cohort' column present in the event log. Cannot perform cohort analysis.";

/// Render all three sections, in report order.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&render_funnel(&result.funnel));
    out.push_str(&render_decision(&result.decision));
    out.push_str(&render_cohorts(result.cohorts.as_deref()));
    out
}

/// "Funnel Analysis": one line per stage with its drop-off from the previous
/// stage.
pub fn render_funnel(funnel: &FunnelResult) -> String {
    let mut out = banner(WIDE_RULE, "Funnel Analysis");
    for stage in &funnel.stages {
        out.push_str(&stage_line(stage));
        out.push('\n');
    }
    out
}

/// "Decision Point Analysis": choice sizes, overlap and creation rates.
pub fn render_decision(decision: &DecisionAnalysis) -> String {
    let mut out = banner(WIDE_RULE, "Decision Point Analysis");
    out.push_str(&format!(
        "Users who clicked 'Try Sample': {}\n",
        decision.try_sample.len()
    ));
    out.push_str(&format!(
        "Users who clicked 'Skip for Later': {}\n",
        decision.skip_for_later.len()
    ));
    out.push_str(&format!(
        "Users who clicked BOTH 'Try Sample' and 'Skip for Later': {}\n",
        decision.both.len()
    ));
    out.push('\n');
    out.push_str(&conversion_line("Try Sample", &decision.try_sample_created));
    out.push_str(&conversion_line(
        "Skip for Later",
        &decision.skip_for_later_created,
    ));
    out
}

/// "Cohort Analysis": the activation table, or a single line when there is
/// no cohort column.
pub fn render_cohorts(cohorts: Option<&[CohortSummary]>) -> String {
    let mut out = String::from("\n");
    out.push_str(&banner(
        NARROW_RULE,
        "Cohort Analysis: Activation Rate by Acquisition Type",
    ));
    match cohorts {
        Some(summaries) => out.push_str(&render_cohort_table(summaries)),
        None => {
            out.push_str(NO_COHORT_MESSAGE);
            out.push('\n');
        }
    }
    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn banner(rule: &str, title: &str) -> String {
    format!("{rule}\n{title}\n{rule}\n")
}

fn stage_line(result: &StageResult) -> String {
    let stage = &result.stage;
    let mut line = match stage.description {
        Some(desc) => format!("{} ({}): {}", stage.label, desc, result.count()),
        None => format!("{}: {}", stage.label, result.count()),
    };
    if let Some(drop_off) = result.drop_off {
        line.push_str(&format!(" | Drop Off: {}", format_drop_off(drop_off)));
        if let Some(note) = stage.note {
            line.push_str(&format!(" ({})", note));
        }
    }
    line
}

fn format_drop_off(drop_off: DropOff) -> String {
    match drop_off {
        DropOff::Percent(p) => format!("{}%", format_compact(p, 2)),
        DropOff::Undefined => "undefined".to_string(),
    }
}

fn conversion_line(choice: &str, conversion: &Conversion) -> String {
    format!(
        "Assignment Creation Rate after clicking '{}': {}/{} = {}\n",
        choice,
        conversion.converted,
        conversion.total,
        format_percent(conversion.rate(), 1)
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
