//! What one hand does for one point of attention.

use super::{direction::CutDirection, grid::GridCoordinate, hand::Hand};

/// One cut, or one held arc, performed by a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoreographyRecord {
    /// When the cut happens, in milliseconds.
    pub start: i64,
    /// When the hand is free again, in milliseconds. Equal to `start` for a plain cut.
    pub finish: i64,
    /// Where the cut happens.
    pub coordinate: GridCoordinate,
    /// Where an arc ends. Equal to `coordinate` until a following cut extends the arc to it.
    pub coordinate_end: GridCoordinate,
    /// Which hand cuts.
    pub hand: Hand,
    /// Direction of the cut.
    pub direction: CutDirection,
}

impl ChoreographyRecord {
    /// Whether the record spans time, making it an arc.
    #[must_use]
    pub const fn is_arc(&self) -> bool {
        self.start != self.finish
    }

    /// Whether the hand is still busy with this record at `now`.
    #[must_use]
    pub const fn is_active_at(&self, now: i64) -> bool {
        now < self.finish
    }
}
