//! Cut directions of a note.

/// The direction a note must be cut in, with the numbering of the difficulty file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CutDirection {
    /// Upwards.
    Up = 0,
    /// Downwards.
    #[default]
    Down = 1,
    /// To the left.
    Left = 2,
    /// To the right.
    Right = 3,
    /// Up and to the left.
    UpLeft = 4,
    /// Up and to the right.
    UpRight = 5,
    /// Down and to the left.
    DownLeft = 6,
    /// Down and to the right.
    DownRight = 7,
    /// Any direction (a dot note).
    Any = 8,
}

impl CutDirection {
    /// The eight concrete directions.
    pub const CONCRETE: [Self; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
    ];

    /// Number written into the difficulty file.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// The direction pointing the other way. [`CutDirection::Any`] is its own opposite.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::UpLeft => Self::DownRight,
            Self::UpRight => Self::DownLeft,
            Self::DownLeft => Self::UpRight,
            Self::DownRight => Self::UpLeft,
            Self::Any => Self::Any,
        }
    }

    /// Unit step `(dx, dy)` on the grid, with `y` growing upwards. `(0, 0)` for
    /// [`CutDirection::Any`].
    #[must_use]
    pub const fn movement(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::UpLeft => (-1, 1),
            Self::UpRight => (1, 1),
            Self::DownLeft => (-1, -1),
            Self::DownRight => (1, -1),
            Self::Any => (0, 0),
        }
    }

    /// Quantizes a move on the grid into one of the eight directions by the signs of its
    /// components. No move at all is [`CutDirection::Any`].
    #[must_use]
    pub const fn from_movement(dx: i32, dy: i32) -> Self {
        match (dx.signum(), dy.signum()) {
            (0, 1) => Self::Up,
            (0, -1) => Self::Down,
            (-1, 0) => Self::Left,
            (1, 0) => Self::Right,
            (-1, 1) => Self::UpLeft,
            (1, 1) => Self::UpRight,
            (-1, -1) => Self::DownLeft,
            (1, -1) => Self::DownRight,
            _ => Self::Any,
        }
    }

    /// Whether this is [`CutDirection::Any`].
    #[must_use]
    pub const fn is_any(self) -> bool {
        matches!(self, Self::Any)
    }
}

impl TryFrom<u8> for CutDirection {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::CONCRETE
            .into_iter()
            .chain([Self::Any])
            .find(|direction| direction.value() == value)
            .ok_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for direction in CutDirection::CONCRETE {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
        assert_eq!(CutDirection::Any.opposite(), CutDirection::Any);
    }

    #[test]
    fn movement_round_trips_through_quantization() {
        for direction in CutDirection::CONCRETE {
            let (dx, dy) = direction.movement();
            assert_eq!(CutDirection::from_movement(dx, dy), direction);
            assert_eq!(CutDirection::from_movement(dx * 3, dy * 2), direction);
        }
        assert_eq!(CutDirection::from_movement(0, 0), CutDirection::Any);
    }

    #[test]
    fn file_numbering() {
        assert_eq!(CutDirection::DownRight.value(), 7);
        assert_eq!(CutDirection::try_from(8), Ok(CutDirection::Any));
        assert_eq!(CutDirection::try_from(9), Err(9));
    }
}
