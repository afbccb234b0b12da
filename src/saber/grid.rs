//! Positions on the 4×3 grid notes are placed on.
//!
//! The origin is the bottom-left cell. The `Off*` values lie one cell outside the playable area;
//! a hand passes there after following through a cut, but no note is ever placed there.

use super::direction::CutDirection;

/// Column of the grid, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineIndex {
    /// Left of the grid.
    OffLeft = -1,
    /// The leftmost column.
    FarLeft = 0,
    /// The column left of the middle.
    LightLeft = 1,
    /// The column right of the middle.
    LightRight = 2,
    /// The rightmost column.
    FarRight = 3,
    /// Right of the grid.
    OffRight = 4,
}

impl LineIndex {
    /// Every column, left to right.
    pub const ALL: [Self; 6] = [
        Self::OffLeft,
        Self::FarLeft,
        Self::LightLeft,
        Self::LightRight,
        Self::FarRight,
        Self::OffRight,
    ];

    /// Numeric column, `-1..=4`.
    #[must_use]
    pub const fn value(self) -> i32 {
        self as i32
    }

    /// Whether a note may be placed in this column.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        !matches!(self, Self::OffLeft | Self::OffRight)
    }
}

impl TryFrom<i32> for LineIndex {
    type Error = i32;
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|index| index.value() == value)
            .ok_or(value)
    }
}

/// Row of the grid, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineLayer {
    /// Below the grid.
    OffBottom = -1,
    /// The bottom row.
    Bottom = 0,
    /// The middle row.
    Middle = 1,
    /// The top row.
    Top = 2,
    /// Above the grid.
    OffTop = 3,
}

impl LineLayer {
    /// Every row, bottom to top.
    pub const ALL: [Self; 5] = [
        Self::OffBottom,
        Self::Bottom,
        Self::Middle,
        Self::Top,
        Self::OffTop,
    ];

    /// Numeric row, `-1..=3`.
    #[must_use]
    pub const fn value(self) -> i32 {
        self as i32
    }

    /// Whether a note may be placed in this row.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        !matches!(self, Self::OffBottom | Self::OffTop)
    }
}

impl TryFrom<i32> for LineLayer {
    type Error = i32;
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|layer| layer.value() == value)
            .ok_or(value)
    }
}

/// A cell of the grid, possibly one step outside of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoordinate {
    /// Column.
    pub index: LineIndex,
    /// Row.
    pub layer: LineLayer,
}

impl GridCoordinate {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(index: LineIndex, layer: LineLayer) -> Self {
        Self { index, layer }
    }

    /// Creates a coordinate from numeric column and row, `None` if either is out of range.
    #[must_use]
    pub fn from_values(index: i32, layer: i32) -> Option<Self> {
        Some(Self::new(
            LineIndex::try_from(index).ok()?,
            LineLayer::try_from(layer).ok()?,
        ))
    }

    /// Whether a note may be placed here.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        self.index.is_playable() && self.layer.is_playable()
    }

    /// The direction of the move from `self` to `target`.
    #[must_use]
    pub const fn direction_towards(self, target: Self) -> CutDirection {
        CutDirection::from_movement(
            target.index.value() - self.index.value(),
            target.layer.value() - self.layer.value(),
        )
    }

    /// The cell reached by moving one step in `direction`, `None` if it leaves the extended grid.
    #[must_use]
    pub fn checked_follow(self, direction: CutDirection) -> Option<Self> {
        let (dx, dy) = direction.movement();
        Self::from_values(self.index.value() + dx, self.layer.value() + dy)
    }

    /// The cell reached by moving one step in `direction`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is already off the playable area and the step leaves the extended grid.
    /// Callers only follow through from playable cells, so this is a logic error.
    #[must_use]
    pub fn follow(self, direction: CutDirection) -> Self {
        self.checked_follow(direction)
            .expect("following through from a playable cell stays within one step of the grid")
    }
}

impl std::fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.index.value(), self.layer.value())
    }
}
