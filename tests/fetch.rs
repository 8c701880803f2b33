//! Tests for the stale-response discard guard.
use katachi::fetch::{LatestOnly, RequestSequence};

#[test]
fn test_stale_response_discarded() {
    let mut results: LatestOnly<Vec<&str>> = LatestOnly::new();

    // Fetch A dispatched, then fetch B before A resolves.
    let ticket_a = results.dispatch();
    let ticket_b = results.dispatch();

    // B resolves first and is accepted; A resolves later and is discarded.
    assert!(results.accept(ticket_b, vec!["fresh"]));
    assert!(!results.accept(ticket_a, vec!["stale"]));

    assert_eq!(results.get(), Some(&vec!["fresh"]));
}

#[test]
fn test_in_order_responses_both_accepted() {
    let mut results: LatestOnly<u32> = LatestOnly::new();
    let ticket_a = results.dispatch();
    assert!(results.accept(ticket_a, 1));
    let ticket_b = results.dispatch();
    assert!(results.accept(ticket_b, 2));
    assert_eq!(results.get(), Some(&2));
}

#[test]
fn test_sequence_is_monotonic() {
    let mut sequence = RequestSequence::new();
    let first = sequence.issue();
    let second = sequence.issue();
    assert!(!sequence.is_current(first));
    assert!(sequence.is_current(second));
}
