use osu2saber_rs::timeline::IntervalIndex;
use pretty_assertions::assert_eq;

#[test]
fn spans_contain_their_bounds() {
    let mut index = IntervalIndex::new();
    index.append_span((10, 20), "span");
    for time in 10..=20 {
        assert_eq!(index.active_at_point(time), vec![&"span"], "at {time}");
    }
    assert!(index.active_at_point(9).is_empty());
    assert!(index.active_at_point(21).is_empty());
}

#[test]
fn span_queries_overlap_inclusively() {
    let mut index = IntervalIndex::new();
    index.append_span((10, 20), "span");
    index.append_point(25, "point");

    assert_eq!(index.active_at_span((20, 30)), vec![&"point", &"span"]);
    assert_eq!(index.active_at_span((21, 30)), vec![&"point"]);
    assert_eq!(index.active_at_span((0, 10)), vec![&"span"]);
    assert_eq!(index.active_at_span((12, 18)), vec![&"span"]);
    assert_eq!(index.active_at_span((0, 100)), vec![&"point", &"span"]);
    assert!(index.active_at_span((0, 9)).is_empty());
    assert!(index.active_at_span((30, 20)).is_empty());
}

#[test]
fn only_starts_are_points_of_interest() {
    let mut index = IntervalIndex::new();
    index.append_span((5, 9), "span");
    assert_eq!(index.points_of_interest(), vec![5]);

    index.append_point(9, "point");
    index.append_point(5, "another");
    assert_eq!(index.points_of_interest(), vec![5, 9]);
}

#[test]
fn collapsed_spans_become_points() {
    let mut index = IntervalIndex::new();
    index.append_span((100, 140), "short");
    index.append_span((100, 400), "long");

    let quantized = index.map_keys(|time| (time + 50) / 125 * 125);
    assert_eq!(quantized.points().collect::<Vec<_>>(), vec![(125, &"short")]);
    assert_eq!(quantized.spans().collect::<Vec<_>>(), vec![((125, 375), &"long")]);
    assert_eq!(quantized.len(), index.len());
}

#[test]
fn retained_values_keep_their_keys() {
    let mut index = IntervalIndex::new();
    index.append_point(0, 1);
    index.append_point(0, 2);
    index.append_span((0, 10), 3);
    index.append_span((5, 10), 4);

    let even = index.retain_value(|value| value % 2 == 0);
    assert_eq!(even.points().collect::<Vec<_>>(), vec![(0, &2)]);
    assert_eq!(even.spans().collect::<Vec<_>>(), vec![((5, 10), &4)]);
    assert_eq!(index.len(), 4);
}
