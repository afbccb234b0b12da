use osu2saber_rs::{
    convert::prelude::*,
    osu::prelude::*,
    saber::prelude::*,
    timeline::{EventId, IntervalIndex, TimelineEvent},
};
use pretty_assertions::assert_eq;

fn fixture_set() -> Vec<OsuBeatmap> {
    [
        include_str!("files/standard_normal.osu"),
        include_str!("files/mania_hard.osu"),
        include_str!("files/taiko_oni.osu"),
    ]
    .into_iter()
    .map(|source| parse_osu(source).beatmap)
    .collect()
}

#[test]
fn converts_a_beatmap_set() {
    let output = convert_beatmaps(&fixture_set(), &ConvertConfig::default());

    assert_eq!(
        output.warnings,
        vec![
            ConvertWarning::UnsupportedMode {
                difficulty: "Oni".to_string(),
                mode: OsuMode::Taiko,
            },
            // Two holds and a note arrive together at 3500ms, one hand short.
            ConvertWarning::DroppedNotes {
                difficulty: "Hard".to_string(),
                count: 1,
            },
        ]
    );
    assert_eq!(output.tempo.bpm(), 120.0);
    assert_eq!(output.info.beats_per_minute, 120.0);
    assert_eq!(output.info.song_name, "Sample Song");
    assert_eq!(output.info.song_author_name, "Sample Artist");
    assert_eq!(output.info.level_author_name, "mapper");
    assert_eq!(
        output.info.custom_data.as_ref().map(|data| data.beatmap_set_id),
        Some(500)
    );

    let labels: Vec<_> = output
        .difficulties
        .iter()
        .map(|difficulty| difficulty.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Normal", "Hard"]);

    for difficulty in &output.difficulties {
        assert!(!difficulty.notes.is_empty());
        assert!(
            difficulty
                .notes
                .iter()
                .all(|note| note.coordinate().is_some_and(|cell| cell.is_playable())),
            "{:?}",
            difficulty.notes
        );
        for slider in &difficulty.sliders {
            let head = CutDirection::try_from(slider.head_cut_direction).expect("known direction");
            assert_eq!(slider.tail_cut_direction, head.opposite().value());
            assert!(slider.head_time <= slider.tail_time);
        }
    }
}

#[test]
fn long_gap_becomes_one_pair_of_walls() {
    let output = convert_beatmaps(&fixture_set(), &ConvertConfig::default());
    let standard = &output.difficulties[0];

    // Last activity before the gap ends at 3000ms, the next starts at 8000ms. Each side gives up
    // 500ms of margin, leaving 3500ms..7500ms.
    let walls: Vec<_> = standard
        .obstacles
        .iter()
        .map(|wall| (wall.time, wall.line_index, wall.obstacle_type, wall.duration, wall.width))
        .collect();
    assert_eq!(walls, vec![(7.0, 0, 0, 8.0, 1), (7.0, 3, 0, 8.0, 1)]);
}

#[test]
fn highlight_strikes_with_both_hands() {
    let output = convert_beatmaps(&fixture_set(), &ConvertConfig::default());
    let standard = &output.difficulties[0];

    let at = |beat: f64| -> Vec<Option<Hand>> {
        standard
            .notes
            .iter()
            .filter(|note| note.time == beat)
            .map(Note::hand)
            .collect()
    };
    // 8000ms is beat 16, inside the highlight. Five combos arrived so far, so the right hand leads.
    assert_eq!(at(16.0), vec![Some(Hand::Right), Some(Hand::Left)]);
    // 1000ms is beat 2, outside of it.
    assert_eq!(at(2.0).len(), 1);
}

#[derive(Debug, Clone, PartialEq)]
struct Beat {
    id: u64,
    time: i64,
}

impl TimelineEvent for Beat {
    fn id(&self) -> EventId {
        EventId(self.id)
    }
    fn start_time(&self) -> i64 {
        self.time
    }
    fn finish_time(&self) -> i64 {
        self.time
    }
    fn coord_x(&self) -> i32 {
        (self.id % 2) as i32 * 256
    }
    fn coord_y(&self) -> i32 {
        192
    }
    fn is_kiai(&self) -> bool {
        false
    }
    fn new_combo(&self) -> u8 {
        1
    }
}

#[test]
fn breaks_between_bursts() {
    let mut index = IntervalIndex::new();
    for (id, time) in [0, 250, 500, 4500, 4750, 5000].into_iter().enumerate() {
        index.append_point(time, Beat { id: id as u64, time });
    }
    let choreography = choreograph(&index, &Tempo::default(), false, &ConvertConfig::default());
    assert_eq!(choreography.breaks, vec![(1000, 4000)]);
    assert_eq!(choreography.simulator.len(), 6);
    assert_eq!(choreography.combos.len(), 6);

    let hands: Vec<_> = choreography
        .simulator
        .records()
        .map(|record| record.hand)
        .collect();
    assert_eq!(
        hands,
        vec![Hand::Right, Hand::Left, Hand::Right, Hand::Left, Hand::Right, Hand::Left]
    );
}

#[test]
fn nothing_eligible() {
    let taiko = parse_osu(include_str!("files/taiko_oni.osu")).beatmap;
    let empty = OsuBeatmap::default();
    let output = convert_beatmaps(&[taiko, empty], &ConvertConfig::default());
    assert!(output.difficulties.is_empty());
    assert_eq!(output.warnings.len(), 2);
    assert_eq!(output.tempo.bpm(), FALLBACK_BPM);
    assert!(package(&output, &ConvertConfig::default()).is_err());
}
