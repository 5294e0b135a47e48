use serde::Deserialize;

/// Page paths of the onboarding flow, matched by exact equality.
pub mod pages {
    pub const CLAIM_YOUR_ACCOUNT: &str = "/claim-your-account";
    pub const CONFIRM_PHONE_NUMBER: &str = "/confirm-phone-number";
    pub const CLASS_SELECTION: &str = "/class-selection";
    pub const ACCOUNT_CLAIMED: &str = "/account-claimed";
    pub const ASSIGNMENT_CREATION: &str = "/assignment-creation";
    pub const ASSIGNMENT_CREATED_VIEW: &str = "/assignment-created-view";
    pub const ASSIGNMENT_ACTIVATED: &str = "/assignment-activated";
}

/// Event labels, stored verbatim including their embedded quote characters.
pub mod events {
    pub const CLICKED_CONTINUE: &str = r#"Clicked "continue""#;
    pub const VALIDATED_CONFIRMATION_CODE: &str = "Validated confirmation code";
    pub const SELECTED_CLASS: &str = "Selected class";
    pub const TRY_SAMPLE: &str = r#"Clicked "Try Sample Algebra 1 Problem""#;
    pub const SKIP_FOR_LATER: &str = r#"Clicked "Skip for Later""#;
    pub const ASSIGNMENT_ACTIVATED: &str = "Assignment activated";
}

/// Names of the columns the loader requires, in the order they are checked.
pub const REQUIRED_COLUMNS: [&str; 3] = ["user_id", "page_url", "event_name"];

/// Name of the optional acquisition-cohort column.
pub const COHORT_COLUMN: &str = "cohort";

/// A single row of the onboarding event log.
///
/// Columns other than these four (device, timestamp, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventRecord {
    /// Opaque user identifier. An all-integer column is canonicalised on load.
    pub user_id: String,
    /// Page or screen where the event happened.
    #[serde(default)]
    pub page_url: String,
    /// Free-text action label.
    #[serde(default)]
    pub event_name: String,
    /// Acquisition source or test arm, when the column exists and is filled.
    #[serde(default)]
    pub cohort: Option<String>,
}

impl EventRecord {
    pub fn new(user_id: &str, page_url: &str, event_name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            page_url: page_url.to_string(),
            event_name: event_name.to_string(),
            cohort: None,
        }
    }

    pub fn with_cohort(mut self, cohort: &str) -> Self {
        self.cohort = Some(cohort.to_string());
        self
    }
}

/// Equality filter on `page_url` and, optionally, `event_name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagePredicate {
    pub page_url: &'static str,
    pub event_name: Option<&'static str>,
}

impl StagePredicate {
    /// Any event on `page_url`.
    pub const fn page(page_url: &'static str) -> Self {
        Self {
            page_url,
            event_name: None,
        }
    }

    /// A specific `event_name` on `page_url`.
    pub const fn event(page_url: &'static str, event_name: &'static str) -> Self {
        Self {
            page_url,
            event_name: Some(event_name),
        }
    }

    pub fn matches(&self, record: &EventRecord) -> bool {
        record.page_url == self.page_url
            && self
                .event_name
                .map_or(true, |name| record.event_name == name)
    }
}

/// One named milestone of the funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunnelStage {
    /// Short stage label, e.g. `"Clicked Continue"`.
    pub label: &'static str,
    /// Parenthesised explanation printed right after the label.
    pub description: Option<&'static str>,
    /// Trailing remark printed after the drop-off figure.
    pub note: Option<&'static str>,
    pub predicate: StagePredicate,
}

impl FunnelStage {
    pub const fn new(label: &'static str, predicate: StagePredicate) -> Self {
        Self {
            label,
            description: None,
            note: None,
            predicate,
        }
    }

    pub const fn described(self, description: &'static str) -> Self {
        Self {
            description: Some(description),
            ..self
        }
    }

    pub const fn noted(self, note: &'static str) -> Self {
        Self {
            note: Some(note),
            ..self
        }
    }
}

/// The onboarding funnel, in order. Each stage's drop-off is measured against
/// the stage immediately before it.
pub const ONBOARDING_FUNNEL: [FunnelStage; 8] = [
    FunnelStage::new("Visitors", StagePredicate::page(pages::CLAIM_YOUR_ACCOUNT)),
    FunnelStage::new(
        "Clicked Continue",
        StagePredicate::event(pages::CLAIM_YOUR_ACCOUNT, events::CLICKED_CONTINUE),
    )
    .described("Willing to give number"),
    FunnelStage::new(
        "Validated Code",
        StagePredicate::event(
            pages::CONFIRM_PHONE_NUMBER,
            events::VALIDATED_CONFIRMATION_CODE,
        ),
    )
    .described("Actually verified"),
    FunnelStage::new(
        "Class Selected",
        StagePredicate::event(pages::CLASS_SELECTION, events::SELECTED_CLASS),
    ),
    FunnelStage::new("Decision Point", StagePredicate::page(pages::ACCOUNT_CLAIMED))
        .noted("Skip for later vs try sample"),
    FunnelStage::new("Entered Editor", StagePredicate::page(pages::ASSIGNMENT_CREATION)),
    FunnelStage::new(
        "Assignment Created",
        StagePredicate::page(pages::ASSIGNMENT_CREATED_VIEW),
    ),
    FunnelStage::new(
        "Activated",
        StagePredicate::event(pages::ASSIGNMENT_ACTIVATED, events::ASSIGNMENT_ACTIVATED),
    ),
];

/// Label of the stage the decision-point choices are converted against.
pub const ASSIGNMENT_CREATED_STAGE: &str = "Assignment Created";

/// The two non-exclusive choices offered on the confetti page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionPoint {
    pub try_sample: StagePredicate,
    pub skip_for_later: StagePredicate,
}

pub const ACCOUNT_CLAIMED_DECISION: DecisionPoint = DecisionPoint {
    try_sample: StagePredicate::event(pages::ACCOUNT_CLAIMED, events::TRY_SAMPLE),
    skip_for_later: StagePredicate::event(pages::ACCOUNT_CLAIMED, events::SKIP_FOR_LATER),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_predicate_ignores_event_name() {
        let p = StagePredicate::page(pages::ACCOUNT_CLAIMED);
        assert!(p.matches(&EventRecord::new("u1", "/account-claimed", "anything")));
        assert!(!p.matches(&EventRecord::new("u1", "/class-selection", "anything")));
    }

    #[test]
    fn test_event_predicate_requires_both() {
        let p = StagePredicate::event(pages::CLAIM_YOUR_ACCOUNT, events::CLICKED_CONTINUE);
        assert!(p.matches(&EventRecord::new(
            "u1",
            "/claim-your-account",
            "Clicked \"continue\""
        )));
        // Same label without the quotes is a different event.
        assert!(!p.matches(&EventRecord::new(
            "u1",
            "/claim-your-account",
            "Clicked continue"
        )));
        assert!(!p.matches(&EventRecord::new(
            "u1",
            "/confirm-phone-number",
            "Clicked \"continue\""
        )));
    }

    #[test]
    fn test_funnel_order_and_labels() {
        let labels: Vec<&str> = ONBOARDING_FUNNEL.iter().map(|s| s.label).collect();
        assert_eq!(
            labels,
            vec![
                "Visitors",
                "Clicked Continue",
                "Validated Code",
                "Class Selected",
                "Decision Point",
                "Entered Editor",
                "Assignment Created",
                "Activated",
            ]
        );
        assert!(ONBOARDING_FUNNEL
            .iter()
            .any(|s| s.label == ASSIGNMENT_CREATED_STAGE));
    }

    #[test]
    fn test_decision_events_keep_quotes() {
        assert_eq!(
            ACCOUNT_CLAIMED_DECISION.try_sample.event_name,
            Some("Clicked \"Try Sample Algebra 1 Problem\"")
        );
        assert_eq!(
            ACCOUNT_CLAIMED_DECISION.skip_for_later.event_name,
            Some("Clicked \"Skip for Later\"")
        );
    }

    #[test]
    fn test_with_cohort() {
        let r = EventRecord::new("u1", "/a", "e").with_cohort("organic");
        assert_eq!(r.cohort.as_deref(), Some("organic"));
    }
}
