//! The osu! to Beat Saber beatmap converter.
//!
//! Raw `.osu` text == [`osu::parse_osu`] ==> [`osu::OsuBeatmap`] == [`convert::convert_beatmaps`]
//! ==> [`saber::DifficultyV260`]s (in [`convert::ConvertOutput`]) == [`convert::package::package`] ==>
//! `Info.dat` and `Standard*.dat` documents.
//!
//! The two games share nothing but the music, so the conversion keeps the timing of every hit and
//! re-derives the choreography: each moment of the source chart is turned into *points of
//! attention* on a coarse 3×3 canvas, and a two-hand simulator decides which saber cuts each of
//! them and in which direction.
//!
//! - [`timeline`] provides [`timeline::IntervalIndex`], the point/span container every step is
//!   queried from.
//! - [`osu`] parses the source format.
//! - [`saber`] holds the target model, the [`saber::HandsPositionsSimulator`] and the assembler.
//! - [`convert`] drives the whole pass and packs the results into level folders.
//!
//! # Example
//!
//! ```
//! use osu2saber_rs::{convert::{ConvertConfig, convert_beatmaps}, osu::parse_osu};
//!
//! let source = "osu file format v14\n\n[General]\nMode: 0\n\n[Metadata]\nTitle:Song\nVersion:Easy\n\n[Difficulty]\nSliderMultiplier:1.4\n\n[TimingPoints]\n0,500,4,2,0,100,1,0\n\n[HitObjects]\n256,192,0,5,0\n320,192,250,1,0\n";
//! let parsed = parse_osu(source);
//! assert!(parsed.warnings.is_empty());
//!
//! let output = convert_beatmaps(&[parsed.beatmap], &ConvertConfig::default());
//! assert_eq!(output.difficulties.len(), 1);
//! assert_eq!(output.difficulties[0].notes.len(), 2);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod convert;
pub mod diagnostics;
pub mod osu;
pub mod saber;
pub mod timeline;
pub mod util;
