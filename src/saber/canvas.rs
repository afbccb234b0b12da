//! The 3×3 canvas an instant of the source chart is summarised on.

/// One of nine zones, numbered row by row from the top-left like the source playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CanvasPosition {
    /// Top left.
    TopLft = 1,
    /// Top center.
    TopCtr = 2,
    /// Top right.
    TopRgt = 3,
    /// Middle left.
    MidLft = 4,
    /// Center.
    MidCtr = 5,
    /// Middle right.
    MidRgt = 6,
    /// Bottom left.
    BotLft = 7,
    /// Bottom center.
    BotCtr = 8,
    /// Bottom right.
    BotRgt = 9,
}

impl CanvasPosition {
    /// Every zone in numbering order.
    pub const ALL: [Self; 9] = [
        Self::TopLft,
        Self::TopCtr,
        Self::TopRgt,
        Self::MidLft,
        Self::MidCtr,
        Self::MidRgt,
        Self::BotLft,
        Self::BotCtr,
        Self::BotRgt,
    ];

    /// Zone id, `1..=9`.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Column on the canvas, `0..=2` from the left.
    #[must_use]
    pub const fn column(self) -> i32 {
        (self.value() as i32 - 1) % 3
    }

    /// Row on the canvas, `0..=2` from the top.
    #[must_use]
    pub const fn row(self) -> i32 {
        (self.value() as i32 - 1) / 3
    }
}

impl TryFrom<u8> for CanvasPosition {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|zone| zone.value() == value)
            .ok_or(value)
    }
}
