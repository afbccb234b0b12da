//! The per-difficulty document, format version 2.6.0.
//!
//! Fields keep the numbering of the file format so the structures serialize to it directly; typed
//! constructors and accessors convert from and to the enums of this crate.

use super::{direction::CutDirection, grid::GridCoordinate, hand::Hand};

/// Format version written into every difficulty document.
pub const DIFFICULTY_VERSION: &str = "2.6.0";

/// Kind of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObstacleType {
    /// A wall spanning the whole height.
    FullHeightWall = 0,
    /// A wall overhead, to crouch under.
    CrouchWall = 1,
}

/// How the middle of a slider bends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SliderMidAnchorMode {
    /// No bend.
    Straight = 0,
    /// Bends clockwise.
    Clockwise = 1,
    /// Bends counter-clockwise.
    CounterClockwise = 2,
}

/// A note to cut.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Time in beats.
    #[cfg_attr(feature = "serde", serde(rename = "_time"))]
    pub time: f64,
    /// Column.
    #[cfg_attr(feature = "serde", serde(rename = "_lineIndex"))]
    pub line_index: i32,
    /// Row.
    #[cfg_attr(feature = "serde", serde(rename = "_lineLayer"))]
    pub line_layer: i32,
    /// `0` for red (left), `1` for blue (right), `3` for a bomb.
    #[cfg_attr(feature = "serde", serde(rename = "_type"))]
    pub note_type: u8,
    /// Cut direction number.
    #[cfg_attr(feature = "serde", serde(rename = "_cutDirection"))]
    pub cut_direction: u8,
}

impl Note {
    /// Creates a note for `hand` at `coordinate`.
    #[must_use]
    pub const fn new(
        time: f64,
        coordinate: GridCoordinate,
        hand: Hand,
        direction: CutDirection,
    ) -> Self {
        Self {
            time,
            line_index: coordinate.index.value(),
            line_layer: coordinate.layer.value(),
            note_type: hand.value(),
            cut_direction: direction.value(),
        }
    }

    /// The hand cutting this note, `None` for bombs and unknown types.
    #[must_use]
    pub const fn hand(&self) -> Option<Hand> {
        match self.note_type {
            0 => Some(Hand::Left),
            1 => Some(Hand::Right),
            _ => None,
        }
    }

    /// The cut direction, `None` if the number is unknown.
    #[must_use]
    pub fn direction(&self) -> Option<CutDirection> {
        CutDirection::try_from(self.cut_direction).ok()
    }

    /// The grid cell, `None` if off the grid.
    #[must_use]
    pub fn coordinate(&self) -> Option<GridCoordinate> {
        GridCoordinate::from_values(self.line_index, self.line_layer)
    }
}

/// A slider (arc) joining a head note to a tail.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slider {
    /// `0` for red, `1` for blue.
    #[cfg_attr(feature = "serde", serde(rename = "_colorType"))]
    pub color_type: u8,
    /// Head time in beats.
    #[cfg_attr(feature = "serde", serde(rename = "_headTime"))]
    pub head_time: f64,
    /// Head column.
    #[cfg_attr(feature = "serde", serde(rename = "_headLineIndex"))]
    pub head_line_index: i32,
    /// Head row.
    #[cfg_attr(feature = "serde", serde(rename = "_headLineLayer"))]
    pub head_line_layer: i32,
    /// How far the curve leaves the head straight.
    #[cfg_attr(feature = "serde", serde(rename = "_headControlPointLengthMultiplier"))]
    pub head_control_point_length_multiplier: f64,
    /// Head cut direction number.
    #[cfg_attr(feature = "serde", serde(rename = "_headCutDirection"))]
    pub head_cut_direction: u8,
    /// Tail time in beats.
    #[cfg_attr(feature = "serde", serde(rename = "_tailTime"))]
    pub tail_time: f64,
    /// Tail column.
    #[cfg_attr(feature = "serde", serde(rename = "_tailLineIndex"))]
    pub tail_line_index: i32,
    /// Tail row.
    #[cfg_attr(feature = "serde", serde(rename = "_tailLineLayer"))]
    pub tail_line_layer: i32,
    /// How far the curve enters the tail straight.
    #[cfg_attr(feature = "serde", serde(rename = "_tailControlPointLengthMultiplier"))]
    pub tail_control_point_length_multiplier: f64,
    /// Tail cut direction number.
    #[cfg_attr(feature = "serde", serde(rename = "_tailCutDirection"))]
    pub tail_cut_direction: u8,
    /// Mid anchor mode number.
    #[cfg_attr(feature = "serde", serde(rename = "_sliderMidAnchorMode"))]
    pub slider_mid_anchor_mode: u8,
}

/// One end of a [`Slider`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderEnd {
    /// Time in beats.
    pub time: f64,
    /// Grid cell.
    pub coordinate: GridCoordinate,
    /// Cut direction.
    pub direction: CutDirection,
}

impl Slider {
    /// Control point multiplier used for both ends of generated sliders.
    pub const CONTROL_POINT_LENGTH_MULTIPLIER: f64 = 0.4;

    /// Creates a straight slider for `hand` from `head` to `tail`.
    #[must_use]
    pub const fn straight(hand: Hand, head: SliderEnd, tail: SliderEnd) -> Self {
        Self {
            color_type: hand.value(),
            head_time: head.time,
            head_line_index: head.coordinate.index.value(),
            head_line_layer: head.coordinate.layer.value(),
            head_control_point_length_multiplier: Self::CONTROL_POINT_LENGTH_MULTIPLIER,
            head_cut_direction: head.direction.value(),
            tail_time: tail.time,
            tail_line_index: tail.coordinate.index.value(),
            tail_line_layer: tail.coordinate.layer.value(),
            tail_control_point_length_multiplier: Self::CONTROL_POINT_LENGTH_MULTIPLIER,
            tail_cut_direction: tail.direction.value(),
            slider_mid_anchor_mode: SliderMidAnchorMode::Straight as u8,
        }
    }
}

/// A wall.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    /// Start in beats.
    #[cfg_attr(feature = "serde", serde(rename = "_time"))]
    pub time: f64,
    /// Leftmost column covered.
    #[cfg_attr(feature = "serde", serde(rename = "_lineIndex"))]
    pub line_index: i32,
    /// Obstacle type number.
    #[cfg_attr(feature = "serde", serde(rename = "_type"))]
    pub obstacle_type: u8,
    /// Length in beats.
    #[cfg_attr(feature = "serde", serde(rename = "_duration"))]
    pub duration: f64,
    /// Number of columns covered.
    #[cfg_attr(feature = "serde", serde(rename = "_width"))]
    pub width: i32,
}

impl Obstacle {
    /// Creates a wall of `kind` in `column`.
    #[must_use]
    pub const fn new(
        time: f64,
        column: super::grid::LineIndex,
        kind: ObstacleType,
        duration: f64,
        width: i32,
    ) -> Self {
        Self {
            time,
            line_index: column.value(),
            obstacle_type: kind as u8,
            duration,
            width,
        }
    }
}

/// A lighting event. The converter emits none, but documents may carry them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicEvent {
    /// Time in beats.
    #[cfg_attr(feature = "serde", serde(rename = "_time"))]
    pub time: f64,
    /// Event type number.
    #[cfg_attr(feature = "serde", serde(rename = "_type"))]
    pub event_type: i32,
    /// Event value.
    #[cfg_attr(feature = "serde", serde(rename = "_value"))]
    pub value: i32,
}

/// A waypoint for custom paths. The converter emits none, but documents may carry them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    /// Time in beats.
    #[cfg_attr(feature = "serde", serde(rename = "_time"))]
    pub time: f64,
    /// Column.
    #[cfg_attr(feature = "serde", serde(rename = "_lineIndex"))]
    pub line_index: i32,
    /// Row.
    #[cfg_attr(feature = "serde", serde(rename = "_lineLayer"))]
    pub line_layer: i32,
    /// Offset direction number.
    #[cfg_attr(feature = "serde", serde(rename = "_offsetDirection"))]
    pub offset_direction: u8,
}

/// One difficulty of a level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyV260 {
    /// Format version.
    #[cfg_attr(feature = "serde", serde(rename = "_version"))]
    pub version: String,
    /// Notes in choreography order.
    #[cfg_attr(feature = "serde", serde(rename = "_notes"))]
    pub notes: Vec<Note>,
    /// Sliders in choreography order.
    #[cfg_attr(feature = "serde", serde(rename = "_sliders", default))]
    pub sliders: Vec<Slider>,
    /// Walls.
    #[cfg_attr(feature = "serde", serde(rename = "_obstacles"))]
    pub obstacles: Vec<Obstacle>,
    /// Lighting events.
    #[cfg_attr(feature = "serde", serde(rename = "_events", default))]
    pub events: Vec<BasicEvent>,
    /// Custom path waypoints.
    #[cfg_attr(feature = "serde", serde(rename = "_waypoints", default))]
    pub waypoints: Vec<Waypoint>,
    /// Name shown in game, usually the source difficulty name. Written into the info document.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub label: String,
}

impl Default for DifficultyV260 {
    fn default() -> Self {
        Self {
            version: DIFFICULTY_VERSION.to_string(),
            notes: Vec::new(),
            sliders: Vec::new(),
            obstacles: Vec::new(),
            events: Vec::new(),
            waypoints: Vec::new(),
            label: "Normal".to_string(),
        }
    }
}

impl DifficultyV260 {
    /// Sets the label shown in game.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}
