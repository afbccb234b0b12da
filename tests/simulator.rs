use osu2saber_rs::{saber::prelude::*, timeline::EventId};
use pretty_assertions::assert_eq;

fn point(id: u64, span: (i64, i64), zone: CanvasPosition) -> PointOfAttention {
    PointOfAttention::new(EventId(id), span, zone)
}

#[test]
fn alternating_hands_follow_their_previous_cut() {
    let mut sim = HandsPositionsSimulator::default();
    let zones = [
        CanvasPosition::MidLft,
        CanvasPosition::MidRgt,
        CanvasPosition::MidLft,
        CanvasPosition::MidRgt,
    ];
    let moves: Vec<usize> = [0, 250, 500, 750]
        .into_iter()
        .zip(zones)
        .enumerate()
        .map(|(i, (time, zone))| {
            sim.move_to(
                time,
                false,
                Hand::from_parity(i).preferred_order(),
                &[point(i as u64, (time, time), zone)],
            )
        })
        .collect();
    assert_eq!(moves, vec![1, 1, 0, 0]);

    let notes: Vec<_> = sim
        .records()
        .map(|record| (record.start, record.hand, record.direction))
        .collect();
    assert_eq!(
        notes,
        vec![
            (0, Hand::Left, CutDirection::DownLeft),
            (250, Hand::Right, CutDirection::DownRight),
            (500, Hand::Left, CutDirection::Any),
            (750, Hand::Right, CutDirection::Any),
        ]
    );

    let difficulty = sim.build_choreography(&[], &Tempo::default());
    assert_eq!(difficulty.notes.len(), 4);
    assert!(difficulty.sliders.is_empty());
    assert!(difficulty.obstacles.is_empty());
    assert_eq!(
        difficulty.notes[0].coordinate(),
        Some(GridCoordinate::new(LineIndex::FarLeft, LineLayer::Middle))
    );
    assert_eq!(
        difficulty.notes[1].coordinate(),
        Some(GridCoordinate::new(LineIndex::FarRight, LineLayer::Middle))
    );
}

#[test]
fn third_simultaneous_point_is_dropped() {
    let run = || {
        let mut sim = HandsPositionsSimulator::default();
        sim.move_to(
            1000,
            false,
            Hand::Left.preferred_order(),
            &[
                point(3, (1000, 1000), CanvasPosition::BotRgt),
                point(1, (1000, 1000), CanvasPosition::TopLft),
                point(2, (1000, 1000), CanvasPosition::MidCtr),
            ],
        );
        sim
    };
    let sim = run();
    assert_eq!(sim.dropped(), 1);
    assert_eq!(
        sim.record_keys(),
        &[(EventId(1), Hand::Left), (EventId(2), Hand::Right)]
    );
    assert_eq!(run().record_keys(), sim.record_keys());
}

#[test]
fn busy_hands_drop_arrivals_until_released() {
    let mut sim = HandsPositionsSimulator::default();
    sim.move_to(
        0,
        false,
        Hand::Left.preferred_order(),
        &[
            point(0, (0, 2000), CanvasPosition::MidLft),
            point(1, (0, 1000), CanvasPosition::MidRgt),
        ],
    );
    sim.move_to(
        500,
        false,
        Hand::Left.preferred_order(),
        &[point(2, (500, 500), CanvasPosition::MidCtr)],
    );
    assert_eq!(sim.dropped(), 1);

    sim.move_to(
        1000,
        false,
        Hand::Left.preferred_order(),
        &[point(3, (1000, 1000), CanvasPosition::MidCtr)],
    );
    assert_eq!(sim.dropped(), 1);
    let served: Vec<_> = sim.record_keys().to_vec();
    assert_eq!(
        served,
        vec![
            (EventId(0), Hand::Left),
            (EventId(1), Hand::Right),
            (EventId(3), Hand::Right),
        ]
    );
}

#[test]
fn each_hand_serves_one_record_at_a_time() {
    let mut sim = HandsPositionsSimulator::default();
    let steps: [(i64, Vec<PointOfAttention>); 4] = [
        (
            0,
            vec![
                point(0, (0, 750), CanvasPosition::TopLft),
                point(1, (0, 0), CanvasPosition::TopRgt),
                point(2, (0, 0), CanvasPosition::BotCtr),
            ],
        ),
        (
            250,
            vec![
                point(0, (0, 750), CanvasPosition::TopLft),
                point(3, (250, 500), CanvasPosition::MidCtr),
            ],
        ),
        (500, vec![point(4, (500, 500), CanvasPosition::BotLft)]),
        (750, vec![point(5, (750, 750), CanvasPosition::BotRgt)]),
    ];
    for (i, (time, points)) in steps.iter().enumerate() {
        sim.move_to(*time, i == 2, Hand::from_parity(i).preferred_order(), points);
        for hand in Hand::BOTH {
            let active: Vec<_> = sim
                .records()
                .filter(|record| record.hand == hand)
                .filter(|record| record.start <= *time && *time < record.finish)
                .collect();
            assert!(active.len() <= 1, "{hand:?} serves {active:?} at {time}");
        }
    }

    let mut ids: Vec<_> = sim.record_keys().to_vec();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn slider_tails_swing_back() {
    let mut sim = HandsPositionsSimulator::default();
    sim.move_to(
        0,
        false,
        Hand::Right.preferred_order(),
        &[point(0, (0, 1000), CanvasPosition::TopRgt)],
    );
    sim.move_to(
        1000,
        false,
        Hand::Right.preferred_order(),
        &[point(1, (1000, 2000), CanvasPosition::BotRgt)],
    );
    let difficulty = sim.build_choreography(&[], &Tempo::default());
    assert_eq!(difficulty.sliders.len(), 2);
    for slider in &difficulty.sliders {
        let head = CutDirection::try_from(slider.head_cut_direction).expect("known direction");
        let tail = CutDirection::try_from(slider.tail_cut_direction).expect("known direction");
        assert_eq!(tail, head.opposite());
        assert_eq!(tail.opposite(), head);
    }
    for direction in CutDirection::CONCRETE {
        assert_eq!(direction.opposite().opposite(), direction);
    }
    assert_eq!(CutDirection::Any.opposite(), CutDirection::Any);
}
