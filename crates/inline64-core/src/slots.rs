//! Queue slots held by batches that are still encoding.
//!
//! A batch reserves its slots before encoding starts and releases them
//! once it settles, just before its records are appended. Capacity
//! checks count queued records plus reserved slots, so a second drop
//! that arrives mid-encode cannot push the queue past its limit.

use crate::intake::fits;

/// Count of slots reserved by in-flight batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slots {
    reserved: usize,
}

/// Slots held by one batch, handed back through [`Slots::release`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a reservation must be released once its batch settles"]
pub struct Reservation {
    occupied: usize,
    held: usize,
}

impl Reservation {
    /// Slots already taken when the reservation was made, not counting
    /// this batch. Pass this to intake as `occupied`.
    #[must_use]
    pub const fn occupied(&self) -> usize {
        self.occupied
    }

    /// Slots this batch holds. Zero when the batch did not fit.
    #[must_use]
    pub const fn held(&self) -> usize {
        self.held
    }
}

impl Slots {
    /// No reservations.
    #[must_use]
    pub const fn new() -> Self {
        Self { reserved: 0 }
    }

    /// Slots currently reserved.
    #[must_use]
    pub const fn reserved(&self) -> usize {
        self.reserved
    }

    /// Queued records plus reserved slots.
    #[must_use]
    pub const fn occupied(&self, queued: usize) -> usize {
        queued.saturating_add(self.reserved)
    }

    /// Whether no further batch can be accepted.
    #[must_use]
    pub const fn is_full(&self, queued: usize, max: usize) -> bool {
        self.occupied(queued) >= max
    }

    /// Reserve `incoming` slots if they fit.
    ///
    /// A batch that does not fit holds nothing; intake will refuse it
    /// using the returned [`Reservation::occupied`].
    pub fn reserve(&mut self, queued: usize, incoming: usize, max: usize) -> Reservation {
        let occupied = self.occupied(queued);
        let held = if fits(occupied, incoming, max) {
            incoming
        } else {
            0
        };
        self.reserved += held;
        Reservation { occupied, held }
    }

    /// Give back the slots of a settled batch.
    pub fn release(&mut self, reservation: Reservation) {
        self.reserved = self.reserved.saturating_sub(reservation.held);
    }
}
