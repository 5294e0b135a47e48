//! Main analysis pipeline for the funnel reporter.
//!
//! Loads the event log, walks the ordered funnel pairwise, analyses the
//! account-claimed decision point and, when possible, the cohorts, returning
//! an [`AnalysisResult`] ready for rendering.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use funnel_core::calculations::{conversion_rate, DropOff};
use funnel_core::error::Result;
use funnel_core::models::{
    DecisionPoint, FunnelStage, ACCOUNT_CLAIMED_DECISION, ASSIGNMENT_CREATED_STAGE,
    ONBOARDING_FUNNEL,
};
use tracing::{debug, info};

use crate::aggregator::{CohortAggregator, CohortSummary};
use crate::reader::{load_event_table, EventTable};
use crate::stages::stage_users;

// ── Public types ──────────────────────────────────────────────────────────────

/// Unique users reaching one funnel stage.
#[derive(Debug, Clone)]
pub struct StageResult {
    pub stage: FunnelStage,
    pub users: HashSet<String>,
    /// Loss relative to the previous stage; `None` for the first stage.
    pub drop_off: Option<DropOff>,
}

impl StageResult {
    pub fn count(&self) -> usize {
        self.users.len()
    }
}

/// The funnel in stage order.
#[derive(Debug, Clone, Default)]
pub struct FunnelResult {
    pub stages: Vec<StageResult>,
}

impl FunnelResult {
    /// Look a stage up by its label.
    pub fn stage(&self, label: &str) -> Option<&StageResult> {
        self.stages.iter().find(|s| s.stage.label == label)
    }
}

/// How often one decision choice led to a created assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub converted: usize,
    pub total: usize,
}

impl Conversion {
    /// Percentage of `total` that converted; `0.0` when `total` is zero.
    pub fn rate(&self) -> f64 {
        conversion_rate(self.converted, self.total)
    }
}

/// Overlap and outcome of the two decision-point choices.
#[derive(Debug, Clone)]
pub struct DecisionAnalysis {
    pub try_sample: HashSet<String>,
    pub skip_for_later: HashSet<String>,
    /// Users who clicked both, in any order.
    pub both: HashSet<String>,
    pub try_sample_created: Conversion,
    pub skip_for_later_created: Conversion,
}

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone)]
pub struct AnalysisMetadata {
    /// When this result was generated.
    pub generated_at: DateTime<Utc>,
    /// The CSV file that was analysed, if loaded from disk.
    pub source: Option<PathBuf>,
    /// Number of event rows kept after loading.
    pub events_processed: usize,
    /// Rows dropped for lacking a `user_id`.
    pub rows_skipped: usize,
    /// Distinct users across the whole log.
    pub distinct_users: usize,
    /// Wall-clock seconds spent reading the CSV.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent computing the report.
    pub compute_time_seconds: f64,
}

/// The complete output of [`analyze_events`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub funnel: FunnelResult,
    pub decision: DecisionAnalysis,
    /// `None` when the log has no `cohort` column.
    pub cohorts: Option<Vec<CohortSummary>>,
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline on the CSV at `path`.
pub fn analyze_events(path: &Path) -> Result<AnalysisResult> {
    let load_start = std::time::Instant::now();
    let table = load_event_table(path)?;
    let load_time = load_start.elapsed().as_secs_f64();
    info!("Loaded {} events from {}", table.len(), path.display());

    let mut result = analyze_table(&table);
    result.metadata.source = Some(path.to_path_buf());
    result.metadata.load_time_seconds = load_time;
    Ok(result)
}

/// Run every computation over an already-loaded table.
///
/// Pure: analysing the same table twice yields identical figures.
pub fn analyze_table(table: &EventTable) -> AnalysisResult {
    let compute_start = std::time::Instant::now();

    let funnel = compute_funnel(table, &ONBOARDING_FUNNEL);

    let empty = HashSet::new();
    let created = funnel
        .stage(ASSIGNMENT_CREATED_STAGE)
        .map(|s| &s.users)
        .unwrap_or(&empty);
    let decision = analyze_decision_point(table, &ACCOUNT_CLAIMED_DECISION, created);

    let cohorts = CohortAggregator::aggregate(table);

    let distinct_users = table
        .events()
        .iter()
        .map(|e| e.user_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let metadata = AnalysisMetadata {
        generated_at: Utc::now(),
        source: None,
        events_processed: table.len(),
        rows_skipped: table.skipped_rows(),
        distinct_users,
        load_time_seconds: 0.0,
        compute_time_seconds: compute_start.elapsed().as_secs_f64(),
    };

    AnalysisResult {
        funnel,
        decision,
        cohorts,
        metadata,
    }
}

/// Extract every stage in order and measure each against its predecessor.
pub fn compute_funnel(table: &EventTable, stages: &[FunnelStage]) -> FunnelResult {
    let mut results: Vec<StageResult> = Vec::with_capacity(stages.len());

    for stage in stages {
        let users = stage_users(table, &stage.predicate);
        let drop_off = results
            .last()
            .map(|prev| DropOff::between(prev.count(), users.len()));
        debug!("Stage '{}': {} users", stage.label, users.len());
        results.push(StageResult {
            stage: *stage,
            users,
            drop_off,
        });
    }

    FunnelResult { stages: results }
}

/// Compare the two decision choices and convert each against `created`.
///
/// No ordering between the clicks is assumed.
pub fn analyze_decision_point(
    table: &EventTable,
    decision: &DecisionPoint,
    created: &HashSet<String>,
) -> DecisionAnalysis {
    let try_sample = stage_users(table, &decision.try_sample);
    let skip_for_later = stage_users(table, &decision.skip_for_later);
    let both: HashSet<String> = try_sample.intersection(&skip_for_later).cloned().collect();

    let try_sample_created = Conversion {
        converted: try_sample.intersection(created).count(),
        total: try_sample.len(),
    };
    let skip_for_later_created = Conversion {
        converted: skip_for_later.intersection(created).count(),
        total: skip_for_later.len(),
    };

    DecisionAnalysis {
        try_sample,
        skip_for_later,
        both,
        try_sample_created,
        skip_for_later_created,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
