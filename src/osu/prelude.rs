//! Prelude module for the osu! parser.
//!
//! You can use `use osu2saber_rs::osu::prelude::*;` to import all osu! types at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, collect_osu_reports, emit_osu_warnings};

pub use super::{
    DEFAULT_SLIDER_MULTIPLIER, OsuBeatmap, OsuParseOutput, OsuWarning, OsuWarningWithRange,
    hit_object::{HitObject, HitObjectKind},
    metadata::{OsuMetadata, OsuMode},
    mixin::SourceRangeMixin,
    parse_osu,
    section::{SectionLines, Sections},
    timing::TimingPoint,
};
