//! Beatmap metadata and its merge across the difficulties of a set.

use crate::util::pick_most_frequent;

/// Game mode the beatmap was made for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OsuMode {
    /// osu!standard, circles on a 2D playfield.
    #[default]
    Standard,
    /// osu!taiko, drum hits without position.
    Taiko,
    /// osu!catch.
    Catch,
    /// osu!mania, multi-key columns.
    Mania,
}

impl OsuMode {
    /// Reads the `Mode` property value.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            0 => Some(Self::Standard),
            1 => Some(Self::Taiko),
            2 => Some(Self::Catch),
            3 => Some(Self::Mania),
            _ => None,
        }
    }
}

/// The metadata kept for conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OsuMetadata {
    /// Game mode.
    pub mode: OsuMode,
    /// Difficulty name, `Version` in the file.
    pub difficulty: String,
    /// Song title.
    pub title: String,
    /// Song artist.
    pub artist: String,
    /// Beatmap author.
    pub creator: String,
    /// Id of the set on the osu! website, `0` if unknown.
    pub beatmap_set_id: i64,
    /// Id of this difficulty on the osu! website, `0` if unknown.
    pub beatmap_id: i64,
}

impl OsuMetadata {
    /// Merges the metadata of several difficulties, taking the most frequent value of each field.
    ///
    /// Returns `None` when `metadatas` is empty.
    #[must_use]
    pub fn merge<'a>(metadatas: impl IntoIterator<Item = &'a Self>) -> Option<Self> {
        let metadatas: Vec<&Self> = metadatas.into_iter().collect();
        Some(Self {
            mode: pick_most_frequent(metadatas.iter().map(|m| m.mode))?,
            difficulty: pick_most_frequent(metadatas.iter().map(|m| &m.difficulty))?.clone(),
            title: pick_most_frequent(metadatas.iter().map(|m| &m.title))?.clone(),
            artist: pick_most_frequent(metadatas.iter().map(|m| &m.artist))?.clone(),
            creator: pick_most_frequent(metadatas.iter().map(|m| &m.creator))?.clone(),
            beatmap_set_id: pick_most_frequent(metadatas.iter().map(|m| m.beatmap_set_id))?,
            beatmap_id: pick_most_frequent(metadatas.iter().map(|m| m.beatmap_id))?,
        })
    }

    /// Fills an empty title, artist or set id from `fallback`.
    #[must_use]
    pub fn or_defaults(mut self, fallback: &Self) -> Self {
        if self.title.is_empty() {
            self.title.clone_from(&fallback.title);
        }
        if self.artist.is_empty() {
            self.artist.clone_from(&fallback.artist);
        }
        if self.beatmap_set_id == 0 {
            self.beatmap_set_id = fallback.beatmap_set_id;
        }
        self
    }
}

impl std::fmt::Display for OsuMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} [{}] {} - {} by {} (set {}, map {})",
            self.mode,
            self.difficulty,
            self.artist,
            self.title,
            self.creator,
            self.beatmap_set_id,
            self.beatmap_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(difficulty: &str, title: &str, set: i64) -> OsuMetadata {
        OsuMetadata {
            difficulty: difficulty.into(),
            title: title.into(),
            artist: "Artist".into(),
            beatmap_set_id: set,
            ..Default::default()
        }
    }

    #[test]
    fn merge_takes_most_frequent_fields() {
        let all = [
            meta("Hard", "Title", 10),
            meta("Easy", "Title", 10),
            meta("Insane", "Other", 11),
        ];
        let merged = OsuMetadata::merge(&all).expect("non-empty");
        assert_eq!(merged.title, "Title");
        assert_eq!(merged.beatmap_set_id, 10);
        // All labels tie, the smallest wins.
        assert_eq!(merged.difficulty, "Easy");
        assert!(OsuMetadata::merge(&[]).is_none());
    }

    #[test]
    fn defaults_fill_empty_fields_only() {
        let filled = meta("Hard", "", 0).or_defaults(&meta("", "Folder Title", 42));
        assert_eq!(filled.title, "Folder Title");
        assert_eq!(filled.beatmap_set_id, 42);
        assert_eq!(filled.difficulty, "Hard");
    }
}
