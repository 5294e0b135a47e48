//! Stage extraction: the unique users behind a page/event predicate.

use std::collections::HashSet;

use funnel_core::models::StagePredicate;

use crate::reader::EventTable;

/// Unique `user_id`s of all events matching `predicate`.
///
/// A user counts once however many qualifying events they produced.
pub fn stage_users(table: &EventTable, predicate: &StagePredicate) -> HashSet<String> {
    table
        .events()
        .iter()
        .filter(|e| predicate.matches(e))
        .map(|e| e.user_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_core::models::{events, pages, EventRecord};

    fn table() -> EventTable {
        EventTable::new(
            vec![
                EventRecord::new("u1", pages::CLAIM_YOUR_ACCOUNT, "Viewed page"),
                EventRecord::new("u1", pages::CLAIM_YOUR_ACCOUNT, "Viewed page"),
                EventRecord::new("u1", pages::CLAIM_YOUR_ACCOUNT, events::CLICKED_CONTINUE),
                EventRecord::new("u2", pages::CLAIM_YOUR_ACCOUNT, "Viewed page"),
                EventRecord::new("u3", pages::CONFIRM_PHONE_NUMBER, "Viewed page"),
            ],
            false,
        )
    }

    #[test]
    fn test_page_stage_deduplicates_users() {
        let users = stage_users(&table(), &StagePredicate::page(pages::CLAIM_YOUR_ACCOUNT));
        assert_eq!(users.len(), 2);
        assert!(users.contains("u1"));
        assert!(users.contains("u2"));
    }

    #[test]
    fn test_event_stage_filters_event_name() {
        let users = stage_users(
            &table(),
            &StagePredicate::event(pages::CLAIM_YOUR_ACCOUNT, events::CLICKED_CONTINUE),
        );
        assert_eq!(users, HashSet::from(["u1".to_string()]));
    }

    #[test]
    fn test_unmatched_stage_is_empty() {
        let users = stage_users(&table(), &StagePredicate::page(pages::ASSIGNMENT_ACTIVATED));
        assert!(users.is_empty());
    }
}
