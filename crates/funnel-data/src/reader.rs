//! CSV event-log loading for the funnel reporter.
//!
//! Reads the onboarding event export into an in-memory [`EventTable`] after
//! checking that the mandatory columns are present.

use std::io::Read;
use std::path::Path;

use funnel_core::error::{FunnelError, Result};
use funnel_core::models::{EventRecord, COHORT_COLUMN, REQUIRED_COLUMNS};
use tracing::{debug, warn};

// ── EventTable ────────────────────────────────────────────────────────────────

/// The loaded event log. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    events: Vec<EventRecord>,
    has_cohort: bool,
    skipped_rows: usize,
}

impl EventTable {
    /// Build a table from already-parsed records.
    ///
    /// `has_cohort` states whether the source carried a `cohort` column at
    /// all, independently of whether any record has a value for it.
    pub fn new(events: Vec<EventRecord>, has_cohort: bool) -> Self {
        Self {
            events,
            has_cohort,
            skipped_rows: 0,
        }
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn has_cohort(&self) -> bool {
        self.has_cohort
    }

    /// Rows dropped during loading because they had no `user_id`.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the CSV event log at `path`.
///
/// Fails when the file cannot be opened, when one of `user_id`, `page_url`
/// or `event_name` is missing from the header, or when a row is malformed.
pub fn load_event_table(path: &Path) -> Result<EventTable> {
    let file = std::fs::File::open(path).map_err(|source| FunnelError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_event_table(file, path)
}

/// Parse a CSV event log from any reader. `source` is only used in error
/// messages and logs.
pub fn read_event_table<R: Read>(reader: R, source: &Path) -> Result<EventTable> {
    let csv_err = |source_err: csv::Error| FunnelError::Csv {
        path: source.to_path_buf(),
        source: source_err,
    };

    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();
    let has_cohort = check_headers(&headers, source)?;

    let mut events: Vec<EventRecord> = Vec::new();
    let mut skipped_rows = 0usize;

    for result in rdr.deserialize::<EventRecord>() {
        let record = result.map_err(csv_err)?;
        if record.user_id.trim().is_empty() {
            skipped_rows += 1;
            continue;
        }
        events.push(record);
    }

    if normalize_numeric_ids(&mut events) {
        debug!("user_id column is numeric; ids compared as integers");
    }

    if skipped_rows > 0 {
        warn!(
            "Skipped {} rows without a user_id in {}",
            skipped_rows,
            source.display()
        );
    }
    debug!(
        "Loaded {} events from {} (cohort column: {})",
        events.len(),
        source.display(),
        has_cohort
    );

    Ok(EventTable {
        events,
        has_cohort,
        skipped_rows,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Verify the mandatory columns and report whether `cohort` is present.
fn check_headers(headers: &csv::StringRecord, source: &Path) -> Result<bool> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(FunnelError::MissingColumn {
                path: source.to_path_buf(),
                column: column.to_string(),
            });
        }
    }
    Ok(headers.iter().any(|h| h == COHORT_COLUMN))
}

/// When every `user_id` is an integer, rewrite each in canonical form so
/// `01` and `1` name the same user. Mixed columns stay textual.
///
/// Returns whether the column was treated as numeric.
fn normalize_numeric_ids(events: &mut [EventRecord]) -> bool {
    if events.is_empty() {
        return false;
    }
    let parsed: Option<Vec<i64>> = events
        .iter()
        .map(|e| e.user_id.trim().parse::<i64>().ok())
        .collect();
    let Some(ids) = parsed else {
        return false;
    };
    for (event, id) in events.iter_mut().zip(ids) {
        event.user_id = id.to_string();
    }
    true
}

// ── Tests ─────────────────────────────────────────────────────────────────────
