//! Per-cohort activation aggregation.
//!
//! Events are first folded into one [`UserJourney`] per `(user_id, cohort)`
//! pair, then journeys are rolled up into one [`CohortSummary`] per cohort.

use std::collections::{BTreeMap, HashMap};

use funnel_core::formatting::percentage;
use funnel_core::models::{events, pages};
use tracing::{debug, warn};

use crate::reader::EventTable;

// ── UserJourney ───────────────────────────────────────────────────────────────

/// Everything one user did while tagged with one cohort, in log order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserJourney {
    pub user_id: String,
    pub cohort: String,
    pub page_urls: Vec<String>,
    pub event_names: Vec<String>,
}

impl UserJourney {
    fn new(user_id: &str, cohort: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            cohort: cohort.to_string(),
            page_urls: Vec::new(),
            event_names: Vec::new(),
        }
    }

    /// The user reached the assignment-created view.
    pub fn created_assignment(&self) -> bool {
        self.page_urls
            .iter()
            .any(|p| p == pages::ASSIGNMENT_CREATED_VIEW)
    }

    /// Either the activation page or the activation event was seen.
    pub fn activated(&self) -> bool {
        self.page_urls.iter().any(|p| p == pages::ASSIGNMENT_ACTIVATED)
            || self
                .event_names
                .iter()
                .any(|e| e == events::ASSIGNMENT_ACTIVATED)
    }
}

// ── CohortStats ───────────────────────────────────────────────────────────────

/// User counts accumulated for one cohort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CohortStats {
    pub users: usize,
    pub created: usize,
    pub activated: usize,
}

impl CohortStats {
    pub fn add_journey(&mut self, journey: &UserJourney) {
        self.users += 1;
        if journey.created_assignment() {
            self.created += 1;
        }
        if journey.activated() {
            self.activated += 1;
        }
    }
}

// ── CohortSummary ─────────────────────────────────────────────────────────────

/// One row of the cohort report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortSummary {
    pub cohort: String,
    pub stats: CohortStats,
}

impl CohortSummary {
    /// `% Created Assignment`, one decimal.
    pub fn pct_created(&self) -> f64 {
        percentage(self.stats.created as f64, self.stats.users as f64, 1)
    }

    /// `% Activated (overall)`, one decimal.
    pub fn pct_activated(&self) -> f64 {
        percentage(self.stats.activated as f64, self.stats.users as f64, 1)
    }

    /// `% Activation post-creation`, one decimal; `0.0` when nobody created
    /// an assignment.
    pub fn pct_activation_post_creation(&self) -> f64 {
        percentage(self.stats.activated as f64, self.stats.created as f64, 1)
    }
}

// ── CohortAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that groups events by acquisition cohort.
pub struct CohortAggregator;

impl CohortAggregator {
    /// Summarise `table` by cohort, or `None` when the log has no `cohort`
    /// column.
    pub fn aggregate(table: &EventTable) -> Option<Vec<CohortSummary>> {
        if !table.has_cohort() {
            debug!("No cohort column; skipping cohort aggregation");
            return None;
        }
        let journeys = Self::user_journeys(table);
        Some(Self::summarize(&journeys))
    }

    /// Fold events into one journey per `(user_id, cohort)` pair, sorted by
    /// user then cohort. Events without a cohort value are left out.
    pub fn user_journeys(table: &EventTable) -> Vec<UserJourney> {
        let mut map: BTreeMap<(&str, &str), UserJourney> = BTreeMap::new();

        for event in table.events() {
            let Some(cohort) = event.cohort.as_deref() else {
                continue;
            };
            let journey = map
                .entry((event.user_id.as_str(), cohort))
                .or_insert_with(|| UserJourney::new(&event.user_id, cohort));
            journey.page_urls.push(event.page_url.clone());
            journey.event_names.push(event.event_name.clone());
        }

        map.into_values().collect()
    }

    /// Roll journeys up into per-cohort rows, sorted by cohort label.
    ///
    /// A user seen under several cohorts is counted once in each of them.
    pub fn summarize(journeys: &[UserJourney]) -> Vec<CohortSummary> {
        let mut cohorts_per_user: HashMap<&str, usize> = HashMap::new();
        let mut map: BTreeMap<&str, CohortStats> = BTreeMap::new();

        for journey in journeys {
            *cohorts_per_user.entry(journey.user_id.as_str()).or_default() += 1;
            map.entry(journey.cohort.as_str())
                .or_default()
                .add_journey(journey);
        }

        let multi_cohort = cohorts_per_user.values().filter(|&&n| n > 1).count();
        if multi_cohort > 0 {
            warn!(
                "{} users appear under more than one cohort and are counted in each",
                multi_cohort
            );
        }

        map.into_iter()
            .map(|(cohort, stats)| CohortSummary {
                cohort: cohort.to_string(),
                stats,
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
