//! The parser module of osu! beatmap (.osu) files.
//!
//! A `.osu` file is a list of `[Section]`s holding either `Key: Value` properties or
//! comma-separated records. Only what the conversion needs is read: the mode and names from
//! `[General]` and `[Metadata]`, the slider multiplier from `[Difficulty]`, the background from
//! `[Events]`, and every `[TimingPoints]` and `[HitObjects]` record.
//!
//! Parsing never fails as a whole. A line that cannot be read is skipped and reported as an
//! [`OsuWarningWithRange`] pointing at the offending bytes of the source.

pub mod hit_object;
pub mod metadata;
pub mod mixin;
pub mod prelude;
pub mod section;
pub mod timing;

use thiserror::Error;

use self::{
    hit_object::HitObject,
    metadata::{OsuMetadata, OsuMode},
    mixin::SourceRangeMixin,
    section::Sections,
    timing::TimingPoint,
};

/// Slider multiplier used when the file does not define one.
pub const DEFAULT_SLIDER_MULTIPLIER: f64 = 1.4;

/// A recoverable problem found while parsing a `.osu` file.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OsuWarning {
    /// A `[TimingPoints]` line could not be read.
    #[error("invalid timing point {line:?}: {reason}")]
    InvalidTimingPoint {
        /// The offending line.
        line: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A `[HitObjects]` line could not be read.
    #[error("invalid hit object {line:?}: {reason}")]
    InvalidHitObject {
        /// The offending line.
        line: String,
        /// What was wrong with it.
        reason: String,
    },
    /// A hit object appeared while no timing point was defined.
    #[error("hit object without any timing point")]
    MissingTimingPoint,
    /// A property held a value of the wrong shape.
    #[error("invalid value {value:?} for property {key}")]
    InvalidProperty {
        /// Property name.
        key: String,
        /// Its raw value.
        value: String,
    },
    /// A section the conversion relies on is absent.
    #[error("missing section [{0}]")]
    MissingSection(String),
}

/// [`OsuWarning`] with the byte range of the source it is about.
pub type OsuWarningWithRange = SourceRangeMixin<OsuWarning>;

/// Everything read out of one `.osu` file.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OsuBeatmap {
    /// Names, ids and mode.
    pub metadata: OsuMetadata,
    /// File name of the song, relative to the beatmap folder.
    pub audio_filename: Option<String>,
    /// File name of the background image, relative to the beatmap folder.
    pub background: Option<String>,
    /// Base slider velocity in hundreds of osu! pixels per beat.
    pub slider_multiplier: f64,
    /// Timing points sorted by time.
    pub timing_points: Vec<TimingPoint>,
    /// Hit objects in file order.
    pub hit_objects: Vec<HitObject>,
}

/// Output of parsing a `.osu` file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OsuParseOutput {
    /// The parsed beatmap.
    pub beatmap: OsuBeatmap,
    /// Warnings that occurred during parsing.
    pub warnings: Vec<OsuWarningWithRange>,
}

/// Parses a `.osu` file from source text.
///
/// # Example
///
/// ```
/// use osu2saber_rs::osu::{OsuParseOutput, metadata::OsuMode, parse_osu};
///
/// let source = "osu file format v14\n[General]\nMode: 3\n[Metadata]\nTitle:Song\n[TimingPoints]\n0,500,4,2,0,100,1,0\n[HitObjects]\n64,192,0,1,0\nnot a hit object\n";
/// let OsuParseOutput { beatmap, warnings } = parse_osu(source);
/// assert_eq!(beatmap.metadata.mode, OsuMode::Mania);
/// assert_eq!(beatmap.metadata.title, "Song");
/// assert_eq!(beatmap.hit_objects.len(), 1);
/// assert_eq!(warnings.len(), 1);
/// ```
#[must_use]
pub fn parse_osu(source: &str) -> OsuParseOutput {
    let sections = Sections::split(source);
    let mut warnings = Vec::new();

    let metadata = parse_metadata(&sections, &mut warnings);
    let audio_filename = sections
        .property_line("General", "AudioFilename")
        .map(|value| value.content().to_string())
        .filter(|name| !name.is_empty());
    let background = sections.lines("Events").iter().find_map(|line| {
        line.content()
            .strip_prefix("0,0,")
            .and_then(|rest| rest.split(',').next())
            .map(|name| name.trim().trim_matches('"').to_string())
    });

    let slider_multiplier = match sections.property_line("Difficulty", "SliderMultiplier") {
        Some(value) => match value.content().parse::<f64>() {
            Ok(multiplier) if multiplier.is_finite() && multiplier > 0.0 => multiplier,
            _ => {
                warnings.push(value.map(|raw| OsuWarning::InvalidProperty {
                    key: "SliderMultiplier".into(),
                    value: raw.into(),
                }));
                DEFAULT_SLIDER_MULTIPLIER
            }
        },
        None => DEFAULT_SLIDER_MULTIPLIER,
    };

    let timing_points = parse_timing_points(&sections, &mut warnings);
    let hit_objects = if sections.contains("HitObjects") {
        parse_hit_objects(&sections, &timing_points, slider_multiplier, &mut warnings)
    } else {
        warnings.push(SourceRangeMixin::new(
            OsuWarning::MissingSection("HitObjects".into()),
            source.len(),
            source.len(),
        ));
        Vec::new()
    };

    OsuParseOutput {
        beatmap: OsuBeatmap {
            metadata,
            audio_filename,
            background,
            slider_multiplier,
            timing_points,
            hit_objects,
        },
        warnings,
    }
}

fn parse_metadata(sections: &Sections<'_>, warnings: &mut Vec<OsuWarningWithRange>) -> OsuMetadata {
    let text = |section: &str, key: &str| {
        sections
            .property_line(section, key)
            .map(|value| value.content().to_string())
            .unwrap_or_default()
    };
    let mut number = |section: &str, key: &str| -> Option<i64> {
        let value = sections.property_line(section, key)?;
        match value.content().parse() {
            Ok(number) => Some(number),
            Err(_) => {
                warnings.push(value.map(|raw| OsuWarning::InvalidProperty {
                    key: key.into(),
                    value: raw.into(),
                }));
                None
            }
        }
    };

    let mode = match number("General", "Mode") {
        Some(raw) => u8::try_from(raw).ok().and_then(OsuMode::from_number),
        None => Some(OsuMode::Standard),
    };
    let beatmap_set_id = number("Metadata", "BeatmapSetID").unwrap_or_default();
    let beatmap_id = number("Metadata", "BeatmapID").unwrap_or_default();
    let mode = mode.unwrap_or_else(|| {
        if let Some(value) = sections.property_line("General", "Mode") {
            warnings.push(value.map(|raw| OsuWarning::InvalidProperty {
                key: "Mode".into(),
                value: raw.into(),
            }));
        }
        OsuMode::Standard
    });

    OsuMetadata {
        mode,
        difficulty: text("Metadata", "Version"),
        title: text("Metadata", "Title"),
        artist: text("Metadata", "Artist"),
        creator: text("Metadata", "Creator"),
        beatmap_set_id: beatmap_set_id.max(0),
        beatmap_id: beatmap_id.max(0),
    }
}

fn parse_timing_points(
    sections: &Sections<'_>,
    warnings: &mut Vec<OsuWarningWithRange>,
) -> Vec<TimingPoint> {
    let mut points = Vec::new();
    let mut last_uninherited: Option<TimingPoint> = None;
    for line in sections.lines("TimingPoints") {
        match TimingPoint::from_line(line.content(), last_uninherited.as_ref()) {
            Ok(point) => {
                if !point.inherited {
                    last_uninherited = Some(point);
                }
                points.push(point);
            }
            Err(warning) => warnings.push(line.map(|_| warning)),
        }
    }
    points.sort_by(|a, b| a.time.total_cmp(&b.time));
    points
}

fn parse_hit_objects(
    sections: &Sections<'_>,
    timing_points: &[TimingPoint],
    slider_multiplier: f64,
    warnings: &mut Vec<OsuWarningWithRange>,
) -> Vec<HitObject> {
    sections
        .lines("HitObjects")
        .iter()
        .filter_map(
            |line| match HitObject::from_line(line.content(), timing_points, slider_multiplier) {
                Ok(obj) => Some(obj),
                Err(warning) => {
                    warnings.push(line.map(|_| warning));
                    None
                }
            },
        )
        .collect()
}
