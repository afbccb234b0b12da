//! Prelude module for the target model.
//!
//! You can use `use osu2saber_rs::saber::prelude::*;` to import all target types at once.

pub use super::{
    canvas::CanvasPosition,
    difficulty::{
        BasicEvent, DIFFICULTY_VERSION, DifficultyV260, Note, Obstacle, ObstacleType, Slider,
        SliderEnd, SliderMidAnchorMode, Waypoint,
    },
    direction::CutDirection,
    grid::{GridCoordinate, LineIndex, LineLayer},
    hand::{Hand, HandState, PerHand},
    info::{
        DifficultyBeatmap, DifficultyBeatmapSet, DifficultyCountError, DifficultyCustomData,
        DifficultyRank, INFO_VERSION, Info, MAX_DIFFICULTIES, SourceInfo,
    },
    record::ChoreographyRecord,
    simulator::{DEFAULT_ARC_FUZZ, HandsPositionsSimulator, PointOfAttention, RecordKey},
    tempo::{InvalidTempoError, STEPS_PER_BEAT, Tempo},
};
