//! Prelude module for the conversion.
//!
//! You can use `use osu2saber_rs::convert::prelude::*;` to import all conversion types at once.

#[cfg(feature = "json")]
pub use super::package::{INFO_FILE_NAME, read_difficulty, read_info};
pub use super::{
    ConvertConfig, ConvertOutput, ConvertWarning,
    attention::{AttentionEvent, Choreography, build_attention_index, choreograph},
    convert_beatmaps,
    package::{ConvertError, LevelPackage, package},
    tempo::{FALLBACK_BPM, figure_out_bpm, fold_bpm},
};
