//! The two hands and where they are.

use super::{
    canvas::CanvasPosition,
    direction::CutDirection,
    grid::{GridCoordinate, LineIndex, LineLayer},
    record::ChoreographyRecord,
};

/// A hand, and the colour of the notes it cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hand {
    /// The left hand, red notes.
    Left = 0,
    /// The right hand, blue notes.
    Right = 1,
}

impl Hand {
    /// Both hands, left first.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// Note type written into the difficulty file.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Slot of the hand in per-hand arrays.
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize
    }

    /// The other hand.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// `Left` for even `n`, `Right` for odd.
    #[must_use]
    pub const fn from_parity(n: usize) -> Self {
        if n % 2 == 0 { Self::Left } else { Self::Right }
    }

    /// `(self, self.other())`, the preference order starting with this hand.
    #[must_use]
    pub const fn preferred_order(self) -> [Self; 2] {
        [self, self.other()]
    }
}

/// One value per hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerHand<T> {
    /// Value of the left hand.
    pub left: T,
    /// Value of the right hand.
    pub right: T,
}

impl<T> PerHand<T> {
    /// Builds both values from the hand they belong to.
    pub fn from_fn(mut f: impl FnMut(Hand) -> T) -> Self {
        Self {
            left: f(Hand::Left),
            right: f(Hand::Right),
        }
    }

    /// Value of `hand`.
    pub const fn get(&self, hand: Hand) -> &T {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    /// Mutable value of `hand`.
    pub const fn get_mut(&mut self, hand: Hand) -> &mut T {
        match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        }
    }
}

/// Where a hand is and which way it last swung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandState {
    /// Columns added to a canvas column, so each hand reaches its own side of the grid.
    pub offset: i32,
    /// Current position.
    pub coordinate: GridCoordinate,
    /// Direction of the last cut.
    pub direction: CutDirection,
    /// Whether the hand is following a held arc.
    pub on_arc: bool,
}

impl HandState {
    /// The resting state of `hand` before the first note: raised in its own inner column, ready to
    /// cut down.
    #[must_use]
    pub const fn initial(hand: Hand) -> Self {
        let (offset, index) = match hand {
            Hand::Left => (0, LineIndex::LightLeft),
            Hand::Right => (1, LineIndex::LightRight),
        };
        Self {
            offset,
            coordinate: GridCoordinate::new(index, LineLayer::Top),
            direction: CutDirection::Down,
            on_arc: true,
        }
    }

    /// The grid cell this hand uses for `zone`: the zone's column shifted by the hand offset, rows
    /// flipped to the bottom-left origin.
    #[must_use]
    pub fn adapt(&self, zone: CanvasPosition) -> GridCoordinate {
        GridCoordinate::from_values(zone.column() + self.offset, 2 - zone.row())
            .expect("canvas zones map inside the grid for either hand offset")
    }

    /// Plans the cut of `zone` over `(start, finish)` without moving the hand.
    ///
    /// The direction is the move from the current position to the target. When that move is
    /// empty and an arc is involved, the hand keeps swinging the way it faces, else swings back,
    /// else swings down.
    #[must_use]
    pub fn check_cut(
        &self,
        (start, finish): (i64, i64),
        zone: CanvasPosition,
        hand: Hand,
    ) -> ChoreographyRecord {
        let is_arc = start != finish;
        let target = self.adapt(zone);
        let mut direction = self.coordinate.direction_towards(target);
        if (is_arc || self.on_arc) && direction.is_any() {
            let (dx, dy) = self.direction.movement();
            direction = CutDirection::from_movement(dx, dy);
        }
        if (is_arc || self.on_arc) && direction.is_any() {
            direction = self.direction.opposite();
        }
        if (is_arc || self.on_arc) && direction.is_any() {
            direction = CutDirection::Down;
        }
        ChoreographyRecord {
            start,
            finish,
            coordinate: target,
            coordinate_end: target,
            hand,
            direction,
        }
    }

    /// Moves the hand through `record`: it ends one step past the cut, facing its direction.
    pub fn cut(&mut self, record: &ChoreographyRecord) {
        self.coordinate = record.coordinate.follow(record.direction);
        self.direction = record.direction;
        self.on_arc = record.is_arc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones_map_to_each_hand_side() {
        let left = HandState::initial(Hand::Left);
        let right = HandState::initial(Hand::Right);
        assert_eq!(
            left.adapt(CanvasPosition::TopLft),
            GridCoordinate::new(LineIndex::FarLeft, LineLayer::Top)
        );
        assert_eq!(
            right.adapt(CanvasPosition::BotRgt),
            GridCoordinate::new(LineIndex::FarRight, LineLayer::Bottom)
        );
        assert_eq!(
            left.adapt(CanvasPosition::MidRgt),
            GridCoordinate::new(LineIndex::LightRight, LineLayer::Middle)
        );
    }

    #[test]
    fn arc_without_movement_keeps_facing() {
        let mut hand = HandState::initial(Hand::Left);
        hand.coordinate = GridCoordinate::new(LineIndex::FarLeft, LineLayer::Middle);
        hand.direction = CutDirection::Left;
        hand.on_arc = false;
        let record = hand.check_cut((0, 500), CanvasPosition::MidLft, Hand::Left);
        assert!(record.is_arc());
        assert_eq!(record.direction, CutDirection::Left);

        // Plain notes with no movement stay undetermined.
        let record = hand.check_cut((0, 0), CanvasPosition::MidLft, Hand::Left);
        assert_eq!(record.direction, CutDirection::Any);

        // Facing nowhere falls back to a down swing.
        hand.direction = CutDirection::Any;
        let record = hand.check_cut((0, 500), CanvasPosition::MidLft, Hand::Left);
        assert_eq!(record.direction, CutDirection::Down);
    }

    #[test]
    fn cut_follows_through() {
        let mut hand = HandState::initial(Hand::Right);
        let record = hand.check_cut((0, 0), CanvasPosition::BotRgt, Hand::Right);
        assert_eq!(record.direction, CutDirection::DownRight);
        hand.cut(&record);
        assert_eq!(
            hand.coordinate,
            GridCoordinate::new(LineIndex::OffRight, LineLayer::OffBottom)
        );
        assert!(!hand.on_arc);
    }
}
