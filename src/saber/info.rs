//! The level info document (`Info.dat`), format version 2.0.0.

use thiserror::Error;

use super::difficulty::DifficultyV260;

/// Format version written into every info document.
pub const INFO_VERSION: &str = "2.0.0";

/// Most difficulties one level can hold.
pub const MAX_DIFFICULTIES: usize = 5;

/// Difficulty slot of a level, with its rank number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DifficultyRank {
    /// Rank 1.
    Easy = 1,
    /// Rank 3.
    Normal = 3,
    /// Rank 5.
    Hard = 5,
    /// Rank 7.
    Expert = 7,
    /// Rank 9.
    ExpertPlus = 9,
}

/// Error type for [`DifficultyRank::pick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a level holds 1 to 5 difficulties, got {0}")]
pub struct DifficultyCountError(pub usize);

impl DifficultyRank {
    /// Rank number.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Name used in file names and in the info document.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
            Self::ExpertPlus => "ExpertPlus",
        }
    }

    /// File name of the difficulty document in this slot.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("Standard{}.dat", self.name())
    }

    /// Slots used by a level holding `count` difficulties, easiest first.
    ///
    /// # Errors
    ///
    /// Returns [`DifficultyCountError`] unless `count` is in `1..=5`.
    pub const fn pick(count: usize) -> Result<&'static [Self], DifficultyCountError> {
        use DifficultyRank::*;
        match count {
            1 => Ok(&[Hard]),
            2 => Ok(&[Normal, Hard]),
            3 => Ok(&[Normal, Hard, Expert]),
            4 => Ok(&[Easy, Normal, Hard, Expert]),
            5 => Ok(&[Easy, Normal, Hard, Expert, ExpertPlus]),
            _ => Err(DifficultyCountError(count)),
        }
    }
}

impl std::fmt::Display for DifficultyRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a level came from, stored as custom data of the info document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceInfo {
    /// Tool that produced the level.
    pub generator: String,
    /// Game the level was converted from.
    pub source: String,
    /// Id of the most common source difficulty.
    #[cfg_attr(feature = "serde", serde(rename = "beatmapID"))]
    pub beatmap_id: i64,
    /// Id of the source set.
    #[cfg_attr(feature = "serde", serde(rename = "beatmapSetID"))]
    pub beatmap_set_id: i64,
    /// Page of the source difficulty.
    pub link: String,
    /// Page of the source set.
    pub link2: String,
    /// Mirror download of the source set.
    pub link3: String,
}

impl SourceInfo {
    /// Custom data describing an osu! beatmap set.
    #[must_use]
    pub fn osu(beatmap_id: i64, beatmap_set_id: i64) -> Self {
        Self {
            generator: "osu2saber".to_string(),
            source: "osu!".to_string(),
            beatmap_id,
            beatmap_set_id,
            link: format!("https://osu.ppy.sh/beatmaps/{beatmap_id}"),
            link2: format!("https://osu.ppy.sh/beatmapsets/{beatmap_set_id}"),
            link3: format!("https://chimu.moe/d/{beatmap_set_id}"),
        }
    }
}

/// Custom data of one difficulty entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyCustomData {
    /// Name shown in game.
    #[cfg_attr(feature = "serde", serde(rename = "_difficultyLabel"))]
    pub difficulty_label: String,
    /// Editor offset.
    #[cfg_attr(feature = "serde", serde(rename = "_editorOffset"))]
    pub editor_offset: i64,
    /// Previous editor offset.
    #[cfg_attr(feature = "serde", serde(rename = "_editorOldOffset"))]
    pub editor_old_offset: i64,
}

/// One difficulty entry of the info document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyBeatmap {
    /// Slot name.
    #[cfg_attr(feature = "serde", serde(rename = "_difficulty"))]
    pub difficulty: String,
    /// Slot rank number.
    #[cfg_attr(feature = "serde", serde(rename = "_difficultyRank"))]
    pub difficulty_rank: u8,
    /// File holding the difficulty document.
    #[cfg_attr(feature = "serde", serde(rename = "_beatmapFilename"))]
    pub beatmap_filename: String,
    /// Note speed.
    #[cfg_attr(feature = "serde", serde(rename = "_noteJumpMovementSpeed"))]
    pub note_jump_movement_speed: f64,
    /// Note spawn offset in beats.
    #[cfg_attr(feature = "serde", serde(rename = "_noteJumpStartBeatOffset"))]
    pub note_jump_start_beat_offset: f64,
    /// Label and editor data.
    #[cfg_attr(feature = "serde", serde(rename = "_customData"))]
    pub custom_data: DifficultyCustomData,
}

impl DifficultyBeatmap {
    /// Entry for a difficulty in `rank` shown as `label`.
    #[must_use]
    pub fn new(rank: DifficultyRank, label: impl Into<String>) -> Self {
        Self {
            difficulty: rank.name().to_string(),
            difficulty_rank: rank.value(),
            beatmap_filename: rank.file_name(),
            note_jump_movement_speed: 10.0,
            note_jump_start_beat_offset: 0.0,
            custom_data: DifficultyCustomData {
                difficulty_label: label.into(),
                ..Default::default()
            },
        }
    }
}

/// The difficulties of one characteristic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyBeatmapSet {
    /// Characteristic name, always `Standard` here.
    #[cfg_attr(feature = "serde", serde(rename = "_beatmapCharacteristicName"))]
    pub beatmap_characteristic_name: String,
    /// Difficulties, easiest first.
    #[cfg_attr(feature = "serde", serde(rename = "_difficultyBeatmaps"))]
    pub difficulty_beatmaps: Vec<DifficultyBeatmap>,
}

/// The info document of a level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Info {
    /// Format version.
    #[cfg_attr(feature = "serde", serde(rename = "_version"))]
    pub version: String,
    /// Song title.
    #[cfg_attr(feature = "serde", serde(rename = "_songName"))]
    pub song_name: String,
    /// Subtitle, used for the part number of split sets.
    #[cfg_attr(feature = "serde", serde(rename = "_songSubName"))]
    pub song_sub_name: String,
    /// Song artist.
    #[cfg_attr(feature = "serde", serde(rename = "_songAuthorName"))]
    pub song_author_name: String,
    /// Level author.
    #[cfg_attr(feature = "serde", serde(rename = "_levelAuthorName"))]
    pub level_author_name: String,
    /// Tempo every time of the level is expressed in.
    #[cfg_attr(feature = "serde", serde(rename = "_beatsPerMinute"))]
    pub beats_per_minute: f64,
    /// Preview shuffle.
    #[cfg_attr(feature = "serde", serde(rename = "_shuffle"))]
    pub shuffle: i64,
    /// Preview shuffle period.
    #[cfg_attr(feature = "serde", serde(rename = "_shufflePeriod"))]
    pub shuffle_period: f64,
    /// Preview start in seconds.
    #[cfg_attr(feature = "serde", serde(rename = "_previewStartTime"))]
    pub preview_start_time: f64,
    /// Preview length in seconds.
    #[cfg_attr(feature = "serde", serde(rename = "_previewDuration"))]
    pub preview_duration: f64,
    /// Audio file name.
    #[cfg_attr(feature = "serde", serde(rename = "_songFilename"))]
    pub song_filename: String,
    /// Cover image file name.
    #[cfg_attr(feature = "serde", serde(rename = "_coverImageFilename"))]
    pub cover_image_filename: String,
    /// Environment.
    #[cfg_attr(feature = "serde", serde(rename = "_environmentName"))]
    pub environment_name: String,
    /// Environment of the 360° and 90° characteristics.
    #[cfg_attr(feature = "serde", serde(rename = "_allDirectionsEnvironmentName"))]
    pub all_directions_environment_name: String,
    /// Audio offset.
    #[cfg_attr(feature = "serde", serde(rename = "_songTimeOffset"))]
    pub song_time_offset: i64,
    /// Origin of the level.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "_customData",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub custom_data: Option<SourceInfo>,
    /// Difficulties by characteristic.
    #[cfg_attr(feature = "serde", serde(rename = "_difficultyBeatmapSets"))]
    pub difficulty_beatmap_sets: Vec<DifficultyBeatmapSet>,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            version: INFO_VERSION.to_string(),
            song_name: String::new(),
            song_sub_name: String::new(),
            song_author_name: String::new(),
            level_author_name: String::new(),
            beats_per_minute: 150.0,
            shuffle: 0,
            shuffle_period: 0.5,
            preview_start_time: 20.25,
            preview_duration: 10.0,
            song_filename: "song.egg".to_string(),
            cover_image_filename: "cover.jpg".to_string(),
            environment_name: "DefaultEnvironment".to_string(),
            all_directions_environment_name: "DefaultEnvironment".to_string(),
            song_time_offset: 0,
            custom_data: None,
            difficulty_beatmap_sets: Vec::new(),
        }
    }
}

impl Info {
    /// Lists `difficulties` in the standard characteristic, giving them slots by their count.
    ///
    /// Returns the slots used, in the order of `difficulties`.
    ///
    /// # Errors
    ///
    /// Returns [`DifficultyCountError`] if there are no difficulties or more than a level holds.
    pub fn set_difficulties(
        &mut self,
        difficulties: &[&DifficultyV260],
    ) -> Result<&'static [DifficultyRank], DifficultyCountError> {
        let ranks = DifficultyRank::pick(difficulties.len())?;
        self.difficulty_beatmap_sets = vec![DifficultyBeatmapSet {
            beatmap_characteristic_name: "Standard".to_string(),
            difficulty_beatmaps: ranks
                .iter()
                .zip(difficulties)
                .map(|(&rank, difficulty)| DifficultyBeatmap::new(rank, difficulty.label.clone()))
                .collect(),
        }];
        Ok(ranks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_count() {
        assert_eq!(DifficultyRank::pick(1), Ok(&[DifficultyRank::Hard][..]));
        assert_eq!(
            DifficultyRank::pick(3),
            Ok(&[
                DifficultyRank::Normal,
                DifficultyRank::Hard,
                DifficultyRank::Expert
            ][..])
        );
        assert_eq!(DifficultyRank::pick(5).map(<[_]>::len), Ok(5));
        assert_eq!(DifficultyRank::pick(0), Err(DifficultyCountError(0)));
        assert_eq!(DifficultyRank::pick(6), Err(DifficultyCountError(6)));
        assert_eq!(DifficultyRank::ExpertPlus.file_name(), "StandardExpertPlus.dat");
    }

    #[test]
    fn difficulties_get_labels_and_files() {
        let easy = DifficultyV260::default().with_label("Easy One");
        let hard = DifficultyV260::default().with_label("Hard One");
        let mut info = Info::default();
        let ranks = info.set_difficulties(&[&easy, &hard]).expect("two fit");
        assert_eq!(ranks, &[DifficultyRank::Normal, DifficultyRank::Hard]);
        let entries = &info.difficulty_beatmap_sets[0].difficulty_beatmaps;
        assert_eq!(entries[0].beatmap_filename, "StandardNormal.dat");
        assert_eq!(entries[1].custom_data.difficulty_label, "Hard One");
        assert_eq!(entries[1].difficulty_rank, 5);
    }
}
