//! Turns a simulated choreography into a difficulty document.

use super::{
    difficulty::{DifficultyV260, Note, Obstacle, ObstacleType, Slider, SliderEnd},
    grid::LineIndex,
    simulator::HandsPositionsSimulator,
    tempo::Tempo,
};

impl HandsPositionsSimulator {
    /// Builds the difficulty document of the choreography recorded so far.
    ///
    /// Every record becomes a note, and every arc also a straight slider whose tail swings back
    /// against the head. Each break `(start, end)`, in milliseconds, fences both outer columns
    /// with full-height walls.
    ///
    /// The label is left at its default; the caller names the difficulty.
    #[must_use]
    pub fn build_choreography(&self, breaks: &[(i64, i64)], tempo: &Tempo) -> DifficultyV260 {
        let mut difficulty = DifficultyV260::default();
        for record in self.records() {
            let head_time = tempo.convert_to_beat(record.start);
            difficulty.notes.push(Note::new(
                head_time,
                record.coordinate,
                record.hand,
                record.direction,
            ));
            if record.is_arc() {
                difficulty.sliders.push(Slider::straight(
                    record.hand,
                    SliderEnd {
                        time: head_time,
                        coordinate: record.coordinate,
                        direction: record.direction,
                    },
                    SliderEnd {
                        time: tempo.convert_to_beat(record.finish),
                        coordinate: record.coordinate_end,
                        direction: record.direction.opposite(),
                    },
                ));
            }
        }
        for &(start, end) in breaks {
            for column in [LineIndex::FarLeft, LineIndex::FarRight] {
                difficulty.obstacles.push(Obstacle::new(
                    tempo.convert_to_beat(start),
                    column,
                    ObstacleType::FullHeightWall,
                    tempo.convert_to_beat(end - start),
                    1,
                ));
            }
        }
        difficulty
    }
}
