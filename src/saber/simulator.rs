//! The two-hand choreography simulator.
//!
//! [`HandsPositionsSimulator::move_to`] is called once per point of interest, in increasing time
//! order, with the points of attention active at that instant. Each new arrival is given to a free
//! hand, which swings from where it is towards the target. The result is a list of
//! [`ChoreographyRecord`]s in assignment order.
//!
//! A hand is busy while its last record is unfinished. A point arriving while no hand is free is
//! dropped, never queued.

use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
};

use log::{debug, warn};

use super::{
    canvas::CanvasPosition,
    direction::CutDirection,
    hand::{Hand, HandState, PerHand},
    record::ChoreographyRecord,
};
use crate::timeline::EventId;

/// Gap, in milliseconds, under which a cut following an arc continues its swing.
pub const DEFAULT_ARC_FUZZ: i64 = 750;

/// A target the simulator must give to a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfAttention {
    /// Identity of the source event.
    pub id: EventId,
    /// `(start, finish)` in quantized milliseconds.
    pub span: (i64, i64),
    /// Where the target lies on the canvas.
    pub zone: CanvasPosition,
}

impl PointOfAttention {
    /// Creates a point of attention.
    #[must_use]
    pub const fn new(id: EventId, span: (i64, i64), zone: CanvasPosition) -> Self {
        Self { id, span, zone }
    }

    /// Start time.
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.span.0
    }

    /// Finish time.
    #[must_use]
    pub const fn finish(&self) -> i64 {
        self.span.1
    }

    /// Whether the target is held over time.
    #[must_use]
    pub const fn is_arc(&self) -> bool {
        self.span.0 != self.span.1
    }

    /// Held duration.
    #[must_use]
    pub const fn length(&self) -> i64 {
        self.span.1 - self.span.0
    }
}

/// Key of a stored record: the event it serves and the hand serving it.
pub type RecordKey = (EventId, Hand);

/// Assigns points of attention to hands and keeps the resulting choreography.
#[derive(Debug, Clone)]
pub struct HandsPositionsSimulator {
    hands: PerHand<HandState>,
    arc_fuzz: i64,
    records: HashMap<RecordKey, ChoreographyRecord>,
    order: Vec<RecordKey>,
    assigned: HashSet<EventId>,
    active: PerHand<Option<RecordKey>>,
    last: PerHand<Option<RecordKey>>,
    dropped: usize,
}

impl Default for HandsPositionsSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_ARC_FUZZ)
    }
}

impl HandsPositionsSimulator {
    /// Creates a simulator with both hands resting, continuing arcs across gaps up to `arc_fuzz`
    /// milliseconds.
    #[must_use]
    pub fn new(arc_fuzz: i64) -> Self {
        Self {
            hands: PerHand::from_fn(HandState::initial),
            arc_fuzz,
            records: HashMap::new(),
            order: Vec::new(),
            assigned: HashSet::new(),
            active: PerHand::default(),
            last: PerHand::default(),
            dropped: 0,
        }
    }

    /// Current state of `hand`.
    #[must_use]
    pub const fn hand(&self, hand: Hand) -> &HandState {
        self.hands.get(hand)
    }

    /// The record `hand` is busy with, if any.
    #[must_use]
    pub fn active_record(&self, hand: Hand) -> Option<&ChoreographyRecord> {
        self.active
            .get(hand)
            .as_ref()
            .and_then(|key| self.records.get(key))
    }

    /// Records in assignment order.
    pub fn records(&self) -> impl Iterator<Item = &ChoreographyRecord> {
        self.order.iter().filter_map(|key| self.records.get(key))
    }

    /// Keys of the records in assignment order.
    #[must_use]
    pub fn record_keys(&self) -> &[RecordKey] {
        &self.order
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing was assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of points dropped because no hand was free.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Advances to `now` and assigns the points of attention arriving at it.
    ///
    /// `preferred` orders the hands to try in single-hand mode. With `both_hands` every arrival is
    /// cut by both hands in that order, a busy hand leaving its record for the new one. An arrival
    /// finding no free hand at all is dropped. `now` must never decrease between calls.
    ///
    /// Returns how many arrivals made a hand actually move, which is only meant for diagnostics.
    pub fn move_to(
        &mut self,
        now: i64,
        both_hands: bool,
        preferred: [Hand; 2],
        points: &[PointOfAttention],
    ) -> usize {
        self.release_finished(now);

        let mut sorted: Vec<&PointOfAttention> = points.iter().collect();
        sorted.sort_by_key(|point| {
            (
                !point.is_arc(),
                Reverse(point.length()),
                point.start(),
                point.zone,
            )
        });

        let mut moves = 0;
        for point in sorted {
            if point.start() != now || self.assigned.contains(&point.id) {
                continue;
            }
            let available: Vec<Hand> = Hand::BOTH
                .into_iter()
                .filter(|&hand| self.active.get(hand).is_none())
                .collect();
            let Some(&first_available) = preferred.iter().find(|hand| available.contains(hand))
            else {
                warn!("busy hands dropped {} at {now}", point.id);
                self.dropped += 1;
                continue;
            };
            let selected: Vec<Hand> = if both_hands {
                preferred.to_vec()
            } else {
                vec![first_available]
            };

            let mut moved = true;
            let mut locked_direction: Option<CutDirection> = None;
            for hand in selected {
                let mut record = self.hands.get(hand).check_cut(point.span, point.zone, hand);
                let last = (*self.last.get(hand)).and_then(|key| self.records.get_mut(&key));
                match last {
                    Some(last)
                        if last.is_arc()
                            && (last.finish - record.start).abs() <= self.arc_fuzz =>
                    {
                        last.coordinate_end = record.coordinate;
                        last.finish = record.start;
                        record.direction = last.direction.opposite();
                        if both_hands {
                            match locked_direction {
                                Some(direction) => record.direction = direction,
                                None => locked_direction = Some(record.direction),
                            }
                        }
                    }
                    Some(last)
                        if !last.is_arc()
                            && !record.is_arc()
                            && last.coordinate == record.coordinate =>
                    {
                        record.direction = CutDirection::Any;
                        moved = false;
                    }
                    _ => {}
                }
                if record.is_arc() {
                    moved = false;
                }
                self.commit(point.id, record);
            }
            self.assigned.insert(point.id);
            if moved {
                moves += 1;
            }
        }
        debug!("moved {moves} of {} points at {now}", points.len());
        moves
    }

    fn release_finished(&mut self, now: i64) {
        for hand in Hand::BOTH {
            let Some(key) = *self.active.get(hand) else {
                continue;
            };
            if self
                .records
                .get(&key)
                .is_some_and(|record| record.is_active_at(now))
            {
                continue;
            }
            *self.last.get_mut(hand) = Some(key);
            *self.active.get_mut(hand) = None;
            self.hands.get_mut(hand).on_arc = false;
        }
    }

    /// Stores `record` and makes it the active one of its hand, replacing any unfinished record.
    fn commit(&mut self, id: EventId, record: ChoreographyRecord) {
        let key = (id, record.hand);
        self.hands.get_mut(record.hand).cut(&record);
        *self.active.get_mut(record.hand) = Some(key);
        if self.records.insert(key, record).is_none() {
            self.order.push(key);
        }
    }
}
