//! `[TimingPoints]` entries.

use super::OsuWarning;

/// One timing point, with inherited values already resolved against the last uninherited one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingPoint {
    /// Start time in milliseconds.
    pub time: f64,
    /// Duration of a beat in milliseconds, taken from the governing uninherited point.
    pub beat_length: f64,
    /// Slider velocity multiplier, `1.0` for uninherited points.
    pub slider_velocity: f64,
    /// Beats per measure.
    pub meter: u32,
    /// Default sample set.
    pub sample_set: u8,
    /// Custom sample index.
    pub sample_index: u32,
    /// Volume percentage.
    pub volume: u8,
    /// Whether this point inherits its tempo.
    pub inherited: bool,
    /// Effect bit flags.
    pub effects: u8,
}

impl TimingPoint {
    /// Parses `time,beatLength,meter,sampleSet,sampleIndex,volume,uninherited,effects`.
    ///
    /// Missing trailing fields read as `0`. Inherited points take the tempo and meter of
    /// `last_uninherited` and turn their negative beat length into a slider velocity.
    ///
    /// # Errors
    ///
    /// Returns [`OsuWarning::InvalidTimingPoint`] if a field is not a number, or if an inherited
    /// point (or one with a zero beat length) has nothing to inherit from.
    pub fn from_line(line: &str, last_uninherited: Option<&Self>) -> Result<Self, OsuWarning> {
        let invalid = |reason: &str| OsuWarning::InvalidTimingPoint {
            line: line.to_string(),
            reason: reason.to_string(),
        };
        let mut fields = line.split(',').map(str::trim);
        let mut next_field = || fields.next().filter(|field| !field.is_empty()).unwrap_or("0");

        let time: f64 = next_field().parse().map_err(|_| invalid("time"))?;
        let raw_beat_length: f64 = next_field().parse().map_err(|_| invalid("beat length"))?;
        let meter: u32 = next_field().parse().map_err(|_| invalid("meter"))?;
        let sample_set: u8 = next_field().parse().map_err(|_| invalid("sample set"))?;
        let sample_index: u32 = next_field().parse().map_err(|_| invalid("sample index"))?;
        let volume: u8 = next_field().parse().map_err(|_| invalid("volume"))?;
        let uninherited: u8 = next_field().parse().map_err(|_| invalid("uninherited"))?;
        let effects: u8 = next_field().parse().map_err(|_| invalid("effects"))?;
        if !time.is_finite() || !raw_beat_length.is_finite() {
            return Err(invalid("non-finite number"));
        }
        let time = time.round();
        // Files older than v6 carry only the first two fields and are always uninherited.
        let inherited = uninherited == 0 && line.split(',').count() > 6;

        let (beat_length, slider_velocity, meter) = if inherited {
            let base = last_uninherited.ok_or_else(|| invalid("nothing to inherit from"))?;
            let velocity = if raw_beat_length < 0.0 {
                (-100.0 / raw_beat_length).clamp(0.1, 10.0)
            } else {
                1.0
            };
            (base.beat_length, velocity, base.meter)
        } else if raw_beat_length == 0.0 {
            let base = last_uninherited.ok_or_else(|| invalid("zero beat length"))?;
            (base.beat_length, 1.0, meter)
        } else {
            (raw_beat_length.abs(), 1.0, meter)
        };

        Ok(Self {
            time,
            beat_length,
            slider_velocity,
            meter: if meter == 0 { 4 } else { meter },
            sample_set,
            sample_index,
            volume,
            inherited,
            effects,
        })
    }

    /// Whether the highlight (kiai) effect is on.
    #[must_use]
    pub const fn is_kiai(&self) -> bool {
        self.effects & 1 != 0
    }

    /// The last point starting at or before `time`, or the first point when `time` precedes all of
    /// them.
    #[must_use]
    pub fn governing(points: &[Self], time: f64) -> Option<&Self> {
        points
            .iter()
            .take_while(|point| point.time <= time)
            .last()
            .or_else(|| points.first())
    }
}
