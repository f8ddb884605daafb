//! Booking status transition policy.
//!
//! Staff may currently move a booking from any status to any other status.
//! The rule is kept as an explicit table so tightening it (e.g. making
//! `completed` terminal) only means editing a row.

use carcare_types::booking::BookingStatus;
use carcare_types::error::TransitionError;

use BookingStatus::{Cancelled, Completed, Confirmed, Pending};

/// `(from, permitted targets)`. A status is never a target of itself.
const TRANSITIONS: [(BookingStatus, &[BookingStatus]); 4] = [
    (Pending, &[Confirmed, Completed, Cancelled]),
    (Confirmed, &[Pending, Completed, Cancelled]),
    (Completed, &[Pending, Confirmed, Cancelled]),
    (Cancelled, &[Pending, Confirmed, Completed]),
];

/// Statuses a booking in `from` may be moved to.
pub fn allowed_targets(from: BookingStatus) -> &'static [BookingStatus] {
    TRANSITIONS
        .iter()
        .find(|(status, _)| *status == from)
        .map(|(_, targets)| *targets)
        .unwrap_or(&[])
}

/// Whether `from -> to` is permitted.
pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    allowed_targets(from).contains(&to)
}

/// Like [`can_transition`], as a `Result` for `?` propagation.
pub fn check_transition(from: BookingStatus, to: BookingStatus) -> Result<(), TransitionError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(TransitionError::NotAllowed { from, to })
    }
}
