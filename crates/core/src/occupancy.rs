//! Occupancy aggregation for trainings and rooms.
//!
//! Pure, deterministic helpers with no I/O: the read paths fetch raw rows
//! and booking references from the store, then use these to compute
//! booked/free seat counts per training and assigned-training counts per
//! room. All functions are O(inputs).

use std::collections::HashMap;

use crate::types::DbId;

/// Booked-vs-capacity usage for a single training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatUsage {
    pub booked: i64,
    pub free: i64,
}

/// Compute seat usage for a training held in a room of `capacity` seats.
///
/// `free` never goes negative even if overbooking slipped in historically.
pub fn seat_usage(capacity: i32, booked: i64) -> SeatUsage {
    SeatUsage {
        booked,
        free: (i64::from(capacity) - booked).max(0),
    }
}

/// Whether one more booking fits within the room capacity.
pub fn has_free_seat(capacity: i32, booked: i64) -> bool {
    booked < i64::from(capacity)
}

/// Count bookings per training from a flat list of booking -> training
/// references. Trainings with no bookings are simply absent; callers treat
/// a missing key as 0.
pub fn bookings_per_training(booking_training_ids: &[DbId]) -> HashMap<DbId, i64> {
    let mut counts = HashMap::new();
    for id in booking_training_ids {
        *counts.entry(*id).or_insert(0) += 1;
    }
    counts
}

/// Count assigned trainings per room from a flat list of training -> room
/// references.
pub fn trainings_per_room(training_room_ids: &[DbId]) -> HashMap<DbId, i64> {
    // Same shape as bookings_per_training; kept separate so call sites read
    // in domain terms.
    bookings_per_training(training_room_ids)
}
