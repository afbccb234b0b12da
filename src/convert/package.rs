//! Splitting a converted set into levels, and their files.
//!
//! A level holds at most five difficulties, so larger sets are dealt over several levels: the
//! difficulties are sorted from fewest to most notes, and level `i` of `n` takes every `n`-th one
//! starting at the `i`-th. Each level then spans the whole range of the set.

use thiserror::Error;

use super::{ConvertConfig, ConvertOutput};
use crate::saber::{
    difficulty::DifficultyV260,
    info::{DifficultyCountError, DifficultyRank, Info},
};

/// One level, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelPackage {
    /// Name of the folder the level is written to.
    pub folder_name: String,
    /// The info document, listing the difficulties.
    pub info: Info,
    /// The difficulties with their slots, easiest first.
    pub difficulties: Vec<(DifficultyRank, DifficultyV260)>,
}

/// Error type for writing and reading level files.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A level would hold an unsupported number of difficulties.
    #[error(transparent)]
    DifficultyCount(#[from] DifficultyCountError),
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to encode a document.
    #[cfg(feature = "json")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// A document does not have the expected shape.
    #[cfg(feature = "json")]
    #[error("invalid document at {}: {}", .error.path(), .error.inner())]
    Deserialize {
        /// The error with the path to the offending field.
        error: serde_path_to_error::Error<serde_json::Error>,
    },
}

/// Deals the difficulties of `output` over as few levels as `config` allows.
///
/// # Errors
///
/// Returns [`DifficultyCountError`] when `output` has no difficulty.
pub fn package(
    output: &ConvertOutput,
    config: &ConvertConfig,
) -> Result<Vec<LevelPackage>, DifficultyCountError> {
    let total = output.difficulties.len();
    if total == 0 {
        return Err(DifficultyCountError(0));
    }
    let mut sorted: Vec<&DifficultyV260> = output.difficulties.iter().collect();
    sorted.sort_by(|a, b| (a.notes.len(), &a.label).cmp(&(b.notes.len(), &b.label)));

    let parts = total.div_ceil(config.max_difficulties_per_package.max(1));
    let base_name = folder_base_name(output);
    (1..=parts)
        .map(|part| {
            let chosen: Vec<&DifficultyV260> =
                sorted.iter().copied().skip(part - 1).step_by(parts).collect();
            let mut info = output.info.clone();
            if parts > 1 {
                info.song_sub_name = format!("[{part} of {parts}]");
            }
            let ranks = info.set_difficulties(&chosen)?;
            Ok(LevelPackage {
                folder_name: format!("{base_name} #{part}"),
                info,
                difficulties: ranks
                    .iter()
                    .copied()
                    .zip(chosen.into_iter().cloned())
                    .collect(),
            })
        })
        .collect()
}

fn folder_base_name(output: &ConvertOutput) -> String {
    let metadata = &output.metadata;
    let name = format!(
        "osu {} ({} - {}) [saberized]",
        metadata.beatmap_set_id, metadata.title, metadata.artist
    );
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(feature = "json")]
mod files {
    use std::{
        fs::{self, File},
        io::{BufReader, BufWriter, Read, Write},
        path::{Path, PathBuf},
    };

    use log::info;
    use serde::de::DeserializeOwned;

    use super::{ConvertError, LevelPackage};
    use crate::saber::{difficulty::DifficultyV260, info::Info};

    /// File name of the info document.
    pub const INFO_FILE_NAME: &str = "Info.dat";

    impl LevelPackage {
        /// Writes the level into its folder under `parent`, creating it if needed.
        ///
        /// The info document is pretty-printed, the difficulties are compact. Returns the folder.
        ///
        /// # Errors
        ///
        /// Returns [`ConvertError`] on filesystem or encoding failure.
        pub fn write_to(&self, parent: &Path) -> Result<PathBuf, ConvertError> {
            let folder = parent.join(&self.folder_name);
            fs::create_dir_all(&folder)?;

            let mut writer = BufWriter::new(File::create(folder.join(INFO_FILE_NAME))?);
            serde_json::to_writer_pretty(&mut writer, &self.info)?;
            writer.flush()?;

            for (rank, difficulty) in &self.difficulties {
                let mut writer = BufWriter::new(File::create(folder.join(rank.file_name()))?);
                serde_json::to_writer(&mut writer, difficulty)?;
                writer.flush()?;
            }
            info!(
                "wrote {} difficulties into {}",
                self.difficulties.len(),
                folder.display()
            );
            Ok(folder)
        }
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConvertError> {
        let mut source = String::new();
        BufReader::new(File::open(path)?).read_to_string(&mut source)?;
        let deserializer = &mut serde_json::Deserializer::from_str(&source);
        serde_path_to_error::deserialize(deserializer)
            .map_err(|error| ConvertError::Deserialize { error })
    }

    /// Reads an info document.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] if the file cannot be read or is not an info document.
    pub fn read_info(path: &Path) -> Result<Info, ConvertError> {
        read_json(path)
    }

    /// Reads a difficulty document. Its label is left empty; the info document holds it.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] if the file cannot be read or is not a difficulty document.
    pub fn read_difficulty(path: &Path) -> Result<DifficultyV260, ConvertError> {
        read_json(path)
    }
}

#[cfg(feature = "json")]
pub use self::files::{INFO_FILE_NAME, read_difficulty, read_info};
