//! State machine tests for the service moderation lifecycle.

use wayfinder::models::ServiceStatus;
use wayfinder::services::moderation::{apply, ModerationAction, Transition};

use ModerationAction::{Approve, Deactivate, Reject};
use ServiceStatus::{Approved, Inactive, Pending, Rejected};

#[test]
fn approve_is_only_legal_from_pending() {
    assert_eq!(apply(Pending, Approve), Transition::Applied(Approved));
    assert_eq!(apply(Approved, Approve), Transition::NotModified);
    assert_eq!(apply(Rejected, Approve), Transition::Blocked);
    assert_eq!(apply(Inactive, Approve), Transition::Blocked);
}

#[test]
fn reject_is_only_legal_from_pending() {
    assert_eq!(apply(Pending, Reject), Transition::Applied(Rejected));
    assert_eq!(apply(Rejected, Reject), Transition::NotModified);
    assert_eq!(apply(Approved, Reject), Transition::Blocked);
    assert_eq!(apply(Inactive, Reject), Transition::Blocked);
}

#[test]
fn deactivate_is_only_legal_from_approved() {
    assert_eq!(apply(Approved, Deactivate), Transition::Applied(Inactive));
    assert_eq!(apply(Pending, Deactivate), Transition::Blocked);
    assert_eq!(apply(Rejected, Deactivate), Transition::Blocked);
    assert_eq!(apply(Inactive, Deactivate), Transition::Blocked);
}

#[test]
fn repeated_deactivate_is_blocked_not_neutral() {
    // Inactive is terminal for directory purposes; a second DELETE is a
    // precondition failure, not a 304.
    assert_eq!(apply(Inactive, Deactivate), Transition::Blocked);
}
