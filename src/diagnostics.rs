//! Fancy diagnostics support using `ariadne`.
//!
//! Parse warnings of a `.osu` file carry the byte range of the line they are about
//! ([`OsuWarningWithRange`](crate::osu::OsuWarningWithRange)). This module turns them into
//! `ariadne::Report`s, and ariadne works out lines and columns from the ranges.
//!
//! # Usage Example
//!
//! ```rust
//! # #[cfg(feature = "diagnostics")]
//! # {
//! use osu2saber_rs::{diagnostics::emit_osu_warnings, osu::parse_osu};
//!
//! let source = "[General]\nMode: 9\n\n[HitObjects]\n256,192,oops,1,0\n";
//! let output = parse_osu(source);
//!
//! emit_osu_warnings("broken.osu", source, &output.warnings);
//! # }
//! ```

#[cfg(feature = "diagnostics")]
use ariadne::{Color, Label, Report, ReportKind, Source};

#[cfg(feature = "diagnostics")]
use crate::osu::{OsuWarning, OsuWarningWithRange};

/// Source file name and text, the context a report is rendered against.
///
/// ```rust
/// use osu2saber_rs::diagnostics::SimpleSource;
///
/// let source = SimpleSource::new("map.osu", "[General]\nMode: 0\n");
/// assert_eq!(source.name(), "map.osu");
/// assert_eq!(source.text(), "[General]\nMode: 0\n");
/// ```
pub struct SimpleSource<'a> {
    name: &'a str,
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Creates a source container.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// The whole text of the source.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// The file name of the source.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting positioned warnings to `ariadne::Report`.
#[cfg(feature = "diagnostics")]
pub trait ToAriadne {
    /// Converts into a report against `src`.
    fn to_report<'a>(&self, src: &SimpleSource<'a>)
    -> Report<'a, (String, std::ops::Range<usize>)>;
}

/// Builds a styled `Report` with one label over `range`.
#[cfg(feature = "diagnostics")]
#[must_use]
pub fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: std::ops::Range<usize>,
    title: &str,
    label_message: impl ToString,
    color: Color,
) -> Report<'a, (String, std::ops::Range<usize>)> {
    let filename = src.name().to_string();
    Report::build(kind, (filename.clone(), range.clone()))
        .with_message(title)
        .with_label(
            Label::new((filename, range))
                .with_message(label_message.to_string())
                .with_color(color),
        )
        .finish()
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for OsuWarningWithRange {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        let (title, color) = match self.content() {
            OsuWarning::InvalidTimingPoint { .. } => ("Invalid timing point", Color::Yellow),
            OsuWarning::InvalidHitObject { .. } => ("Invalid hit object", Color::Yellow),
            OsuWarning::MissingTimingPoint => ("Missing timing point", Color::Red),
            OsuWarning::InvalidProperty { .. } => ("Invalid property", Color::Yellow),
            OsuWarning::MissingSection(_) => ("Missing section", Color::Red),
        };
        build_report(
            src,
            ReportKind::Warning,
            self.as_range(),
            title,
            self.content(),
            color,
        )
    }
}

/// Prints every warning of a parsed `.osu` file to stderr.
#[cfg(feature = "diagnostics")]
pub fn emit_osu_warnings<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a OsuWarningWithRange>,
) {
    let ariadne_source = Source::from(source);
    for report in collect_osu_reports(name, source, warnings) {
        let _ = report.eprint((name.to_string(), ariadne_source.clone()));
    }
}

/// Builds the reports of every warning without printing them.
#[cfg(feature = "diagnostics")]
#[must_use]
pub fn collect_osu_reports<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a OsuWarningWithRange>,
) -> Vec<Report<'a, (String, std::ops::Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    warnings.into_iter().map(|w| w.to_report(&simple)).collect()
}
