//! `[HitObjects]` entries and the sub-objects derived from long ones.

use super::{OsuWarning, timing::TimingPoint};

/// Most beats a spinner or slider may span, so that cutting it into pieces stays bounded.
pub const MAX_PIECES: usize = 10_000;

/// Kind of a hit object.
///
/// [`HitObjectKind::SliderEdge`] and [`HitObjectKind::SliderHuff`] never appear in a file. They
/// are the pieces a slider is cut into by [`HitObject::derive_hold_subobjects`]: an edge on the
/// first beat of each measure, a huff on the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitObjectKind {
    /// A single tap.
    HitCircle,
    /// A path followed for a while.
    Slider,
    /// A spin lasting until an end time.
    Spinner,
    /// A held key of the multi-key mode.
    Hold,
    /// Derived from a slider, first beat of a measure.
    SliderEdge,
    /// Derived from a slider, any other beat.
    SliderHuff,
}

impl HitObjectKind {
    const CIRCLE: u32 = 1 << 0;
    const SLIDER: u32 = 1 << 1;
    const NEW_COMBO: u32 = 1 << 2;
    const SPINNER: u32 = 1 << 3;
    const COMBO_SKIP: u32 = 0b0111_0000;
    const HOLD: u32 = 1 << 7;

    /// Reads the kind out of the type bit flags.
    #[must_use]
    pub const fn from_type_flags(flags: u32) -> Option<Self> {
        if flags & Self::CIRCLE != 0 {
            Some(Self::HitCircle)
        } else if flags & Self::SLIDER != 0 {
            Some(Self::Slider)
        } else if flags & Self::SPINNER != 0 {
            Some(Self::Spinner)
        } else if flags & Self::HOLD != 0 {
            Some(Self::Hold)
        } else {
            None
        }
    }

    /// Reads the combo boundary marker: `0` for none, otherwise `1 +` the colours skipped.
    #[must_use]
    pub const fn new_combo_from_type_flags(flags: u32) -> u8 {
        if flags & Self::NEW_COMBO != 0 {
            1 + ((flags & Self::COMBO_SKIP) >> 4) as u8
        } else {
            0
        }
    }
}

/// A parsed hit object.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitObject {
    /// Horizontal position in osu! pixels, `0..=512`.
    pub x: i32,
    /// Vertical position in osu! pixels, `0..=384`, growing downwards.
    pub y: i32,
    /// Start time in milliseconds.
    pub time: f64,
    /// Finish time in milliseconds.
    pub finish_time: f64,
    /// Kind of object.
    pub kind: HitObjectKind,
    /// Combo boundary marker, `0` if none.
    pub new_combo: u8,
    /// Hitsound bit flags.
    pub hitsound: u8,
    /// Number of slides of a slider, `1` otherwise.
    pub slides: u32,
    /// The timing point governing this object.
    pub timing_point: TimingPoint,
}

impl HitObject {
    /// Parses `x,y,time,type,hitSound,objectParams…`.
    ///
    /// # Errors
    ///
    /// Returns [`OsuWarning::InvalidHitObject`] on a malformed line, and
    /// [`OsuWarning::MissingTimingPoint`] when `timing_points` is empty.
    pub fn from_line(
        line: &str,
        timing_points: &[TimingPoint],
        slider_multiplier: f64,
    ) -> Result<Self, OsuWarning> {
        let invalid = |reason: &str| OsuWarning::InvalidHitObject {
            line: line.to_string(),
            reason: reason.to_string(),
        };
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [x, y, time, flags, hitsound, extras @ ..] = fields.as_slice() else {
            return Err(invalid("expected at least five fields"));
        };
        let x: i32 = x.parse().map_err(|_| invalid("x"))?;
        let y: i32 = y.parse().map_err(|_| invalid("y"))?;
        let time: f64 = time.parse().map_err(|_| invalid("time"))?;
        let flags: u32 = flags.parse().map_err(|_| invalid("type"))?;
        let hitsound: u8 = hitsound.parse().map_err(|_| invalid("hitsound"))?;
        if !time.is_finite() {
            return Err(invalid("time"));
        }
        let kind = HitObjectKind::from_type_flags(flags).ok_or_else(|| invalid("type"))?;
        let timing_point = *TimingPoint::governing(timing_points, time)
            .ok_or(OsuWarning::MissingTimingPoint)?;

        let (finish_time, slides) = match kind {
            HitObjectKind::HitCircle => (time, 1),
            HitObjectKind::Spinner => {
                let end: f64 = extras
                    .first()
                    .and_then(|end| end.parse().ok())
                    .filter(|end: &f64| end.is_finite())
                    .ok_or_else(|| invalid("spinner end time"))?;
                (end.max(time), 1)
            }
            HitObjectKind::Hold => {
                let end: f64 = extras
                    .first()
                    .and_then(|params| params.split(':').next())
                    .and_then(|end| end.parse().ok())
                    .filter(|end: &f64| end.is_finite())
                    .ok_or_else(|| invalid("hold end time"))?;
                (end.max(time), 1)
            }
            HitObjectKind::Slider => {
                let slides: u32 = extras
                    .get(1)
                    .and_then(|slides| slides.parse().ok())
                    .ok_or_else(|| invalid("slides"))?;
                let length: f64 = extras
                    .get(2)
                    .and_then(|length| length.parse().ok())
                    .filter(|length: &f64| length.is_finite())
                    .ok_or_else(|| invalid("slider length"))?;
                let pixels_per_beat =
                    slider_multiplier * 100.0 * timing_point.slider_velocity;
                let duration = length / pixels_per_beat * timing_point.beat_length;
                let slides = slides.max(1);
                (time + duration.max(0.0) * f64::from(slides), slides)
            }
            HitObjectKind::SliderEdge | HitObjectKind::SliderHuff => {
                (time + timing_point.beat_length, 1)
            }
        };
        if !finish_time.is_finite() {
            return Err(invalid("end time"));
        }

        let object = Self {
            x,
            y,
            time,
            finish_time,
            kind,
            new_combo: HitObjectKind::new_combo_from_type_flags(flags),
            hitsound,
            slides,
            timing_point,
        };
        if matches!(kind, HitObjectKind::Spinner | HitObjectKind::Slider)
            && object
                .beats_spanned()
                .is_some_and(|beats| beats > MAX_PIECES as f64)
        {
            return Err(invalid("too many beats to split"));
        }
        Ok(object)
    }

    /// Whether the highlight (kiai) effect governs this object.
    #[must_use]
    pub const fn is_kiai(&self) -> bool {
        self.timing_point.is_kiai()
    }

    /// Beat length of the governing timing point.
    #[must_use]
    pub const fn beat_length(&self) -> f64 {
        self.timing_point.beat_length
    }

    /// Cuts long objects into beat-sized pieces.
    ///
    /// A spinner becomes one circle per beat across its span. A slider becomes one
    /// [`HitObjectKind::SliderEdge`] or [`HitObjectKind::SliderHuff`] per beat, each lasting a
    /// beat, with the last piece ending where the slider does. The first piece keeps the combo
    /// marker of the whole object. Anything else is returned as is, and so is an object spanning
    /// more than [`MAX_PIECES`] beats or governed by a non-positive beat length.
    #[must_use]
    pub fn derive_hold_subobjects(&self) -> Vec<Self> {
        let beat_length = self.beat_length();
        let Some(beats) = self
            .beats_spanned()
            .filter(|&beats| beats <= MAX_PIECES as f64)
        else {
            return vec![self.clone()];
        };
        let starts = (0..=beats.floor() as usize).map(|beat| self.time + beat as f64 * beat_length);
        match self.kind {
            HitObjectKind::Spinner => starts
                .enumerate()
                .map(|(beat, time)| self.piece(time, time, HitObjectKind::HitCircle, beat == 0))
                .collect(),
            HitObjectKind::Slider => {
                let meter = self.timing_point.meter.max(1) as usize;
                let mut objs: Vec<Self> = starts
                    .enumerate()
                    .map(|(beat, time)| {
                        let kind = if beat % meter == 0 {
                            HitObjectKind::SliderEdge
                        } else {
                            HitObjectKind::SliderHuff
                        };
                        self.piece(time, time + beat_length, kind, beat == 0)
                    })
                    .collect();
                if let Some(last) = objs.last_mut() {
                    last.finish_time = self.finish_time;
                }
                objs
            }
            _ => vec![self.clone()],
        }
    }

    /// Beats between start and finish, `None` without a usable beat length.
    fn beats_spanned(&self) -> Option<f64> {
        let beat_length = self.beat_length();
        let beats = (self.finish_time - self.time) / beat_length;
        (beat_length > 0.0 && beats.is_finite()).then_some(beats)
    }

    fn piece(&self, time: f64, finish_time: f64, kind: HitObjectKind, first: bool) -> Self {
        Self {
            time,
            finish_time,
            kind,
            new_combo: if first { self.new_combo } else { 0 },
            slides: 1,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> Vec<TimingPoint> {
        vec![TimingPoint::from_line("0,500,4,2,0,100,1,0", None).expect("valid line")]
    }

    #[test]
    fn circle_with_new_combo() {
        let obj = HitObject::from_line("256,192,1000,37,0", &timing(), 1.4).expect("valid line");
        assert_eq!(obj.kind, HitObjectKind::HitCircle);
        assert_eq!(obj.new_combo, 3);
        assert_eq!(obj.finish_time, 1000.0);
        assert_eq!(obj.derive_hold_subobjects(), vec![obj]);
    }

    #[test]
    fn slider_duration_and_pieces() {
        // 140px at multiplier 1.4 is one beat; two slides are two beats.
        let obj = HitObject::from_line("0,0,1000,6,0,B|100:0,2,140", &timing(), 1.4)
            .expect("valid line");
        assert_eq!(obj.kind, HitObjectKind::Slider);
        assert_eq!(obj.finish_time, 2000.0);
        assert_eq!(obj.new_combo, 1);

        let pieces = obj.derive_hold_subobjects();
        let kinds: Vec<_> = pieces.iter().map(|piece| piece.kind).collect();
        assert_eq!(
            kinds,
            vec![
                HitObjectKind::SliderEdge,
                HitObjectKind::SliderHuff,
                HitObjectKind::SliderHuff
            ]
        );
        let spans: Vec<_> = pieces
            .iter()
            .map(|piece| (piece.time, piece.finish_time))
            .collect();
        assert_eq!(
            spans,
            vec![(1000.0, 1500.0), (1500.0, 2000.0), (2000.0, 2000.0)]
        );
        assert_eq!(
            pieces.iter().map(|piece| piece.new_combo).collect::<Vec<_>>(),
            vec![1, 0, 0]
        );
    }

    #[test]
    fn spinner_becomes_circles() {
        let obj = HitObject::from_line("256,192,0,12,0,1200", &timing(), 1.4).expect("valid line");
        assert_eq!(obj.kind, HitObjectKind::Spinner);
        let times: Vec<_> = obj
            .derive_hold_subobjects()
            .iter()
            .map(|piece| (piece.kind, piece.time, piece.finish_time))
            .collect();
        assert_eq!(
            times,
            vec![
                (HitObjectKind::HitCircle, 0.0, 0.0),
                (HitObjectKind::HitCircle, 500.0, 500.0),
                (HitObjectKind::HitCircle, 1000.0, 1000.0),
            ]
        );
    }

    #[test]
    fn mania_hold_end_time() {
        let obj = HitObject::from_line("64,192,300,128,0,900:0:0:0:0:", &timing(), 1.4)
            .expect("valid line");
        assert_eq!(obj.kind, HitObjectKind::Hold);
        assert_eq!(obj.finish_time, 900.0);
    }

    #[test]
    fn malformed_lines() {
        assert!(matches!(
            HitObject::from_line("1,2,3", &timing(), 1.4),
            Err(OsuWarning::InvalidHitObject { .. })
        ));
        assert!(matches!(
            HitObject::from_line("1,2,3,0,0", &timing(), 1.4),
            Err(OsuWarning::InvalidHitObject { .. })
        ));
        assert_eq!(
            HitObject::from_line("1,2,3,1,0", &[], 1.4),
            Err(OsuWarning::MissingTimingPoint)
        );
    }

    fn reason(result: Result<HitObject, OsuWarning>) -> String {
        match result {
            Err(OsuWarning::InvalidHitObject { reason, .. }) => reason,
            other => panic!("expected an invalid hit object, got {other:?}"),
        }
    }

    #[test]
    fn endless_objects_are_rejected() {
        assert_eq!(
            reason(HitObject::from_line("256,192,0,12,0,inf", &timing(), 1.4)),
            "spinner end time"
        );
        assert_eq!(
            reason(HitObject::from_line("64,192,0,128,0,inf:0:0:0:0:", &timing(), 1.4)),
            "hold end time"
        );
        assert_eq!(
            reason(HitObject::from_line("256,192,0,12,0,1e13", &timing(), 1.4)),
            "too many beats to split"
        );
        assert_eq!(
            reason(HitObject::from_line("0,0,0,2,0,L|100:0,1,1e308", &timing(), 1.4)),
            "end time"
        );
        assert_eq!(
            reason(HitObject::from_line("0,0,0,2,0,L|100:0,1,1e12", &timing(), 1.4)),
            "too many beats to split"
        );

        let tiny_beat =
            vec![TimingPoint::from_line("0,1e-300,4,2,0,100,1,0", None).expect("valid line")];
        assert_eq!(
            reason(HitObject::from_line("256,192,0,12,0,1200", &tiny_beat, 1.4)),
            "too many beats to split"
        );
    }

    #[test]
    fn longest_spinner_still_splits() {
        // Exactly the largest span accepted: one circle per beat, both ends included.
        let end = 500 * MAX_PIECES;
        let obj = HitObject::from_line(&format!("256,192,0,12,0,{end}"), &timing(), 1.4)
            .expect("valid line");
        assert_eq!(obj.derive_hold_subobjects().len(), MAX_PIECES + 1);

        let mut longer = obj;
        longer.finish_time = 1e13;
        assert_eq!(longer.derive_hold_subobjects(), vec![longer]);

        // Adding a beat no longer moves a time this far out.
        let far = HitObject::from_line("256,192,1e17,12,0,1e17", &timing(), 1.4)
            .expect("valid line");
        assert_eq!(far.derive_hold_subobjects().len(), 1);
    }
}
