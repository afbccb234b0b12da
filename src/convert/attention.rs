//! Attention windows: what the player looks at, one point of interest at a time.
//!
//! At every step the events arriving or ongoing are framed by their bounding box on the source
//! playfield, widened towards what comes next, and each of them lands in one zone of the 3×3
//! canvas. The zones then drive the hands simulator. Steps where nothing else happened in the
//! look-behind window delimit breaks.

use std::{cmp::Reverse, collections::HashSet};

use log::debug;
use num::clamp;

use super::ConvertConfig;
use crate::{
    osu::hit_object::HitObject,
    saber::{
        canvas::CanvasPosition,
        hand::Hand,
        simulator::{HandsPositionsSimulator, PointOfAttention},
        tempo::Tempo,
    },
    timeline::{EventId, IntervalIndex, TimelineEvent},
};

/// A hit object, or a piece of one, with its identity on the timeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttentionEvent {
    /// Identity, unique across the whole beatmap set.
    pub id: EventId,
    /// The object.
    pub object: HitObject,
}

impl TimelineEvent for AttentionEvent {
    fn id(&self) -> EventId {
        self.id
    }

    fn start_time(&self) -> i64 {
        self.object.time.round() as i64
    }

    fn finish_time(&self) -> i64 {
        self.object.finish_time.round() as i64
    }

    fn coord_x(&self) -> i32 {
        self.object.x
    }

    fn coord_y(&self) -> i32 {
        self.object.y
    }

    fn is_kiai(&self) -> bool {
        self.object.is_kiai()
    }

    fn new_combo(&self) -> u8 {
        self.object.new_combo
    }
}

/// Lays the hit objects of one difficulty on a millisecond timeline.
///
/// Long objects are cut into beat-sized pieces first. Every piece takes the next identity from
/// `next_id`, so identities stay distinct across the difficulties of a set.
#[must_use]
pub fn build_attention_index(
    hit_objects: &[HitObject],
    next_id: &mut u64,
) -> IntervalIndex<AttentionEvent> {
    let mut index = IntervalIndex::new();
    for object in hit_objects.iter().flat_map(HitObject::derive_hold_subobjects) {
        let event = AttentionEvent {
            id: EventId(*next_id),
            object,
        };
        *next_id += 1;
        if event.is_point() {
            index.append_point(event.start_time(), event);
        } else {
            index.append_span((event.start_time(), event.finish_time()), event);
        }
    }
    index
}

/// Inclusive bounds of a set of playfield positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoundingBox {
    x: (i32, i32),
    y: (i32, i32),
}

impl BoundingBox {
    fn around<V: TimelineEvent>(events: &[&V]) -> Option<Self> {
        let mut iter = events.iter();
        let first = iter.next()?;
        let init = Self {
            x: (first.coord_x(), first.coord_x()),
            y: (first.coord_y(), first.coord_y()),
        };
        Some(iter.fold(init, |acc, event| Self {
            x: (acc.x.0.min(event.coord_x()), acc.x.1.max(event.coord_x())),
            y: (acc.y.0.min(event.coord_y()), acc.y.1.max(event.coord_y())),
        }))
    }

    /// Widens the box towards `(x, y)` by `weight` of the distance, truncated.
    fn nudge(&mut self, x: i32, y: i32, weight: f64) {
        Self::nudge_axis(&mut self.x, x, weight);
        Self::nudge_axis(&mut self.y, y, weight);
    }

    fn nudge_axis((min, max): &mut (i32, i32), coord: i32, weight: f64) {
        if coord < *min {
            *min -= (f64::from(*min - coord) * weight) as i32;
        }
        if coord > *max {
            *max += (f64::from(coord - *max) * weight) as i32;
        }
    }

    /// Zone of `(x, y)` relative to the box. A flat dimension puts everything in its middle.
    fn zone(&self, x: i32, y: i32) -> CanvasPosition {
        let fraction = |(min, max): (i32, i32), coord: i32| {
            (3.0 * f64::from(coord - min) / f64::from(max - min)).floor() as u8
        };
        let column = if self.x.0 == self.x.1 {
            2
        } else if x <= self.x.0 {
            1
        } else if x >= self.x.1 {
            3
        } else {
            1 + fraction(self.x, x)
        };
        let row = if self.y.0 == self.y.1 {
            3
        } else if y <= self.y.0 {
            0
        } else if y >= self.y.1 {
            6
        } else {
            3 * fraction(self.y, y)
        };
        CanvasPosition::try_from(column + row).expect("column and row stay within the canvas")
    }
}

/// Result of walking one difficulty.
#[derive(Debug, Clone)]
pub struct Choreography {
    /// The simulator after the last step.
    pub simulator: HandsPositionsSimulator,
    /// Breaks in beat-quantized milliseconds, already shrunk by the break margin.
    pub breaks: Vec<(i64, i64)>,
    /// Every change of the highlight state, with the step it happened at.
    pub kiais: Vec<(i64, bool)>,
    /// Every combo boundary arriving, with the step it arrived at.
    pub combos: Vec<(i64, u8)>,
}

/// Walks the points of interest of a beat-quantized index and simulates the hands over them.
///
/// Both hands strike together while the highlight is on, except for multi-key sources. Otherwise
/// the preferred hand alternates with each combo boundary.
#[must_use]
pub fn choreograph<V: TimelineEvent>(
    index: &IntervalIndex<V>,
    tempo: &Tempo,
    multi_key: bool,
    config: &ConvertConfig,
) -> Choreography {
    let future_look = config.future_look.max(1);
    let mut simulator = HandsPositionsSimulator::new(config.arc_fuzz);
    let mut raw_breaks = Vec::new();
    let mut kiais: Vec<(i64, bool)> = Vec::new();
    let mut combos = Vec::new();
    let mut last_poi = 0;

    for poi in index.points_of_interest() {
        let mut current = index.active_at_point(poi);
        current.sort_by_key(|event| (event.start_time(), event.new_combo(), event.is_kiai()));

        let past = index.active_at_span((poi - config.past_look, poi));
        if past.len() <= current.len() {
            raw_breaks.push((last_poi, poi));
        }
        last_poi = poi;

        let Some(mut frame) = BoundingBox::around(&current) else {
            continue;
        };
        let current_ids: HashSet<_> = current.iter().map(|event| event.id()).collect();
        let mut seen = HashSet::new();
        let mut upcoming: Vec<_> = index
            .active_at_span((poi, poi + future_look))
            .into_iter()
            .filter(|event| !current_ids.contains(&event.id()) && seen.insert(event.id()))
            .collect();
        upcoming.sort_by_key(|event| (Reverse(event.start_time()), event.id()));
        for event in upcoming {
            let ahead = tempo.round_to_beat(event.start_time()) - poi;
            let relevance = clamp(1.0 - ahead as f64 / future_look as f64, 0.0, 1.0).powf(1.5);
            frame.nudge(event.coord_x(), event.coord_y(), relevance);
        }

        let mut points = Vec::with_capacity(current.len());
        for event in &current {
            if kiais.last().is_none_or(|&(_, on)| on != event.is_kiai()) {
                kiais.push((poi, event.is_kiai()));
            }
            let start = tempo.round_to_beat(event.start_time());
            if start == poi && event.new_combo() != 0 {
                combos.push((poi, event.new_combo()));
            }
            points.push(PointOfAttention::new(
                event.id(),
                (start, tempo.round_to_beat(event.finish_time())),
                frame.zone(event.coord_x(), event.coord_y()),
            ));
        }

        let both_hands = kiais.last().is_some_and(|&(_, on)| on) && !multi_key;
        let preferred = Hand::from_parity(combos.len()).preferred_order();
        let moved = simulator.move_to(poi, both_hands, preferred, &points);
        debug!(
            "step {poi}: {} points, {moved} moved, both hands: {both_hands}",
            points.len()
        );
    }

    let breaks = adjust_breaks(&raw_breaks, config.break_margin);
    Choreography {
        simulator,
        breaks,
        kiais,
        combos,
    }
}

/// Drops a break opening the map, then shrinks the others by `margin` on both ends, dropping
/// those left empty.
fn adjust_breaks(breaks: &[(i64, i64)], margin: i64) -> Vec<(i64, i64)> {
    let skip = usize::from(breaks.first().is_some_and(|&(start, _)| start == 0));
    breaks
        .iter()
        .skip(skip)
        .map(|&(start, end)| (start + margin, end - margin))
        .filter(|(start, end)| start < end)
        .collect()
}
