//! The Beat Saber side: grid model, choreography and documents.
//!
//! Notes sit on a 4×3 grid with the origin at the bottom-left and are cut by one of two hands in
//! one of eight directions (or any). A level is an [`info::Info`] document listing up to five
//! [`difficulty::DifficultyV260`] documents.
//!
//! The choreography is derived by [`simulator::HandsPositionsSimulator`], fed with points of
//! attention on a coarse [`canvas::CanvasPosition`] canvas, and assembled into a difficulty by
//! [`simulator::HandsPositionsSimulator::build_choreography`]. All simulation happens in
//! beat-quantized milliseconds; [`tempo::Tempo`] converts to beats only when assembling.

mod assembler;
pub mod canvas;
pub mod difficulty;
pub mod direction;
pub mod grid;
pub mod hand;
pub mod info;
pub mod prelude;
pub mod record;
pub mod simulator;
pub mod tempo;

pub use self::{
    difficulty::DifficultyV260, info::Info, simulator::HandsPositionsSimulator, tempo::Tempo,
};
