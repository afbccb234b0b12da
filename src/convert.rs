//! Conversion of a set of osu! beatmaps into one Beat Saber level.
//!
//! Every difficulty of the set goes through the same steps:
//!
//! 1. its hit objects, cut into beat-sized pieces, are laid on an
//!    [`IntervalIndex`](crate::timeline::IntervalIndex) by milliseconds ([`attention`]);
//! 2. a tempo common to the whole set is estimated from the gaps between notes ([`tempo`]);
//! 3. the index is quantized to quarter beats of that tempo;
//! 4. each point of interest is summarised on the 3×3 canvas and fed to the simulator, which also
//!    yields the breaks of the map ([`attention::choreograph`]);
//! 5. the choreography is assembled into a difficulty document, labelled after the source.
//!
//! The results are split into levels of at most five difficulties by [`package::package`].

pub mod attention;
pub mod package;
pub mod prelude;
pub mod tempo;

use std::ops::RangeInclusive;

use log::info;
use thiserror::Error;

use self::{
    attention::{Choreography, build_attention_index, choreograph},
    tempo::figure_out_bpm,
};
use crate::{
    osu::{
        OsuBeatmap,
        metadata::{OsuMetadata, OsuMode},
    },
    saber::{
        difficulty::DifficultyV260,
        info::{Info, MAX_DIFFICULTIES, SourceInfo},
        simulator::DEFAULT_ARC_FUZZ,
        tempo::Tempo,
    },
};

/// Tunables of the conversion.
///
/// # Example
///
/// ```
/// use osu2saber_rs::convert::ConvertConfig;
///
/// let config = ConvertConfig::default().future_look(2400).arc_fuzz(500);
/// assert_eq!(config.break_margin, 400);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertConfig {
    /// How far ahead, in milliseconds, upcoming notes widen the canvas.
    pub future_look: i64,
    /// How far back, in milliseconds, activity is looked for before declaring a break.
    pub past_look: i64,
    /// How much each break is shrunk at both ends, in milliseconds.
    pub break_margin: i64,
    /// Acceptable tempo; estimates outside are doubled or halved into it.
    pub bpm_range: RangeInclusive<f64>,
    /// Gap, in milliseconds, under which a cut following an arc continues its swing.
    pub arc_fuzz: i64,
    /// Most difficulties packed into one level.
    pub max_difficulties_per_package: usize,
    /// Shortest gap between notes, in milliseconds, used for tempo estimation.
    pub min_note_gap: i64,
    /// Longest gap between notes, in milliseconds, used for tempo estimation.
    pub max_note_gap: i64,
    /// Largest difference, in milliseconds, between gaps of one tempo cluster.
    pub cluster_eps: i64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            future_look: 3000,
            past_look: 3000,
            break_margin: 500,
            bpm_range: 60.0..=410.0,
            arc_fuzz: DEFAULT_ARC_FUZZ,
            max_difficulties_per_package: MAX_DIFFICULTIES,
            min_note_gap: 50,
            max_note_gap: 600,
            cluster_eps: 5,
        }
    }
}

impl ConvertConfig {
    /// Sets the look-ahead window, and the break margin to a sixth of it.
    #[must_use]
    pub const fn future_look(mut self, future_look: i64) -> Self {
        self.future_look = future_look;
        self.break_margin = future_look / 6;
        self
    }

    /// Sets the look-behind window used for break detection.
    #[must_use]
    pub const fn past_look(mut self, past_look: i64) -> Self {
        self.past_look = past_look;
        self
    }

    /// Sets the break margin.
    #[must_use]
    pub const fn break_margin(mut self, break_margin: i64) -> Self {
        self.break_margin = break_margin;
        self
    }

    /// Sets the acceptable tempo range.
    #[must_use]
    pub fn bpm_range(mut self, bpm_range: RangeInclusive<f64>) -> Self {
        self.bpm_range = bpm_range;
        self
    }

    /// Sets the arc continuation gap.
    #[must_use]
    pub const fn arc_fuzz(mut self, arc_fuzz: i64) -> Self {
        self.arc_fuzz = arc_fuzz;
        self
    }

    /// Sets the most difficulties per level, clamped to what a level holds.
    #[must_use]
    pub fn max_difficulties_per_package(mut self, max: usize) -> Self {
        self.max_difficulties_per_package = max.clamp(1, MAX_DIFFICULTIES);
        self
    }

    /// Sets the note gaps considered for tempo estimation.
    #[must_use]
    pub const fn note_gaps(mut self, min_note_gap: i64, max_note_gap: i64) -> Self {
        self.min_note_gap = min_note_gap;
        self.max_note_gap = max_note_gap;
        self
    }

    /// Sets the tempo cluster width.
    #[must_use]
    pub const fn cluster_eps(mut self, cluster_eps: i64) -> Self {
        self.cluster_eps = cluster_eps;
        self
    }
}

/// A recoverable problem met while converting.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvertWarning {
    /// The difficulty was made for a mode that cannot be converted.
    #[error("skipped [{difficulty}]: {mode:?} mode is not supported")]
    UnsupportedMode {
        /// Source difficulty name.
        difficulty: String,
        /// Its mode.
        mode: OsuMode,
    },
    /// The difficulty has nothing to convert.
    #[error("skipped [{difficulty}]: no hit objects")]
    NoHitObjects {
        /// Source difficulty name.
        difficulty: String,
    },
    /// Some notes arrived while both hands were busy and were left out.
    #[error("[{difficulty}]: dropped {count} notes arriving while both hands were busy")]
    DroppedNotes {
        /// Source difficulty name.
        difficulty: String,
        /// How many.
        count: usize,
    },
}

/// Output of converting a beatmap set.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOutput {
    /// Metadata merged over the converted difficulties.
    pub metadata: OsuMetadata,
    /// Tempo of the level.
    pub tempo: Tempo,
    /// Info document of the level, without difficulties.
    pub info: Info,
    /// One difficulty per converted source difficulty, in input order.
    pub difficulties: Vec<DifficultyV260>,
    /// Warnings that occurred during conversion.
    pub warnings: Vec<ConvertWarning>,
}

/// Converts the difficulties of one beatmap set.
///
/// Taiko maps and maps without hit objects are skipped with a warning. The result carries no
/// difficulty at all when nothing was eligible.
#[must_use]
pub fn convert_beatmaps(beatmaps: &[OsuBeatmap], config: &ConvertConfig) -> ConvertOutput {
    let mut warnings = Vec::new();
    let eligible: Vec<&OsuBeatmap> = beatmaps
        .iter()
        .filter(|beatmap| {
            let difficulty = beatmap.metadata.difficulty.clone();
            if beatmap.metadata.mode == OsuMode::Taiko {
                warnings.push(ConvertWarning::UnsupportedMode {
                    difficulty,
                    mode: beatmap.metadata.mode,
                });
                false
            } else if beatmap.hit_objects.is_empty() {
                warnings.push(ConvertWarning::NoHitObjects { difficulty });
                false
            } else {
                info!("  |> {:?} ~ {}", beatmap.metadata.mode, beatmap.metadata.difficulty);
                true
            }
        })
        .collect();

    let metadata =
        OsuMetadata::merge(eligible.iter().map(|beatmap| &beatmap.metadata)).unwrap_or_default();
    info!("  ~> {metadata}");

    let mut next_id = 0;
    let indices: Vec<_> = eligible
        .iter()
        .map(|beatmap| build_attention_index(&beatmap.hit_objects, &mut next_id))
        .collect();
    let bpm = figure_out_bpm(&indices, config);
    let tempo = Tempo::new(bpm).unwrap_or_default();

    let info = Info {
        song_name: metadata.title.clone(),
        song_author_name: metadata.artist.clone(),
        level_author_name: metadata.creator.clone(),
        beats_per_minute: tempo.bpm(),
        custom_data: Some(SourceInfo::osu(metadata.beatmap_id, metadata.beatmap_set_id)),
        ..Default::default()
    };

    let difficulties = eligible
        .iter()
        .zip(&indices)
        .map(|(beatmap, index)| {
            let quantized = index.map_keys(|time| tempo.round_to_beat(time));
            let multi_key = beatmap.metadata.mode == OsuMode::Mania;
            let Choreography {
                simulator, breaks, ..
            } = choreograph(&quantized, &tempo, multi_key, config);
            let label = &beatmap.metadata.difficulty;
            if simulator.dropped() > 0 {
                warnings.push(ConvertWarning::DroppedNotes {
                    difficulty: label.clone(),
                    count: simulator.dropped(),
                });
            }
            info!("      +-> {:6} {label}", simulator.len());
            simulator
                .build_choreography(&breaks, &tempo)
                .with_label(label.clone())
        })
        .collect();

    ConvertOutput {
        metadata,
        tempo,
        info,
        difficulties,
        warnings,
    }
}
