#![cfg(feature = "json")]

use std::fs;

use osu2saber_rs::{convert::prelude::*, osu::prelude::*, saber::prelude::*};
use pretty_assertions::assert_eq;

fn converted() -> ConvertOutput {
    let beatmaps: Vec<_> = [
        include_str!("files/standard_normal.osu"),
        include_str!("files/mania_hard.osu"),
    ]
    .into_iter()
    .map(|source| parse_osu(source).beatmap)
    .collect();
    convert_beatmaps(&beatmaps, &ConvertConfig::default())
}

#[test]
fn level_is_written_and_read_back() {
    let output = converted();
    let levels = package(&output, &ConvertConfig::default()).expect("two difficulties fit");
    let [level] = levels.as_slice() else {
        panic!("expected one level, got {}", levels.len());
    };
    assert_eq!(level.folder_name, "osu 500 (Sample Song - Sample Artist) [saberized] #1");

    let dir = tempfile::tempdir().expect("temporary directory");
    let folder = level.write_to(dir.path()).expect("level written");
    assert_eq!(folder, dir.path().join(&level.folder_name));

    let mut files: Vec<_> = fs::read_dir(&folder)
        .expect("folder listed")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(files, vec!["Info.dat", "StandardHard.dat", "StandardNormal.dat"]);

    let info = read_info(&folder.join(INFO_FILE_NAME)).expect("info read back");
    assert_eq!(info, level.info);
    let filenames: Vec<_> = info.difficulty_beatmap_sets[0]
        .difficulty_beatmaps
        .iter()
        .map(|beatmap| beatmap.beatmap_filename.as_str())
        .collect();
    assert_eq!(filenames, vec!["StandardNormal.dat", "StandardHard.dat"]);

    for (rank, difficulty) in &level.difficulties {
        let read = read_difficulty(&folder.join(rank.file_name())).expect("difficulty read back");
        assert!(read.label.is_empty());
        assert_eq!(read.notes, difficulty.notes);
        assert_eq!(read.sliders, difficulty.sliders);
        assert_eq!(read.obstacles, difficulty.obstacles);
    }
}

#[test]
fn info_is_pretty_and_difficulties_are_compact() {
    let output = converted();
    let levels = package(&output, &ConvertConfig::default()).expect("two difficulties fit");
    let dir = tempfile::tempdir().expect("temporary directory");
    let folder = levels[0].write_to(dir.path()).expect("level written");

    let info = fs::read_to_string(folder.join(INFO_FILE_NAME)).expect("info text");
    assert!(info.lines().count() > 1);
    assert!(info.contains("\"_songName\": \"Sample Song\""));

    let difficulty = fs::read_to_string(folder.join("StandardHard.dat")).expect("difficulty text");
    assert_eq!(difficulty.lines().count(), 1);
    assert!(difficulty.starts_with("{\"_version\""));
}

#[test]
fn broken_document_reports_where() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("StandardExpert.dat");
    fs::write(
        &path,
        r#"{"_version":"2.6.0","_notes":[{"_time":"soon","_lineIndex":0,"_lineLayer":0,"_type":0,"_cutDirection":1}],"_obstacles":[]}"#,
    )
    .expect("fixture written");

    let error = read_difficulty(&path).expect_err("time is not a number");
    let ConvertError::Deserialize { error } = &error else {
        panic!("unexpected error {error:?}");
    };
    assert_eq!(error.path().to_string(), "_notes[0]._time");

    let missing = read_info(&dir.path().join(INFO_FILE_NAME)).expect_err("no info written");
    assert!(matches!(missing, ConvertError::Io(_)));
}

#[test]
fn many_difficulties_split_into_levels() {
    let mut output = converted();
    let template = output.difficulties[0].clone();
    output.difficulties = (0..7)
        .map(|i| template.clone().with_label(format!("Extra {i}")))
        .collect();

    let levels = package(&output, &ConvertConfig::default().max_difficulties_per_package(4))
        .expect("seven difficulties split");
    let sub_names: Vec<_> = levels
        .iter()
        .map(|level| level.info.song_sub_name.as_str())
        .collect();
    assert_eq!(sub_names, vec!["[1 of 2]", "[2 of 2]"]);
    let counts: Vec<_> = levels.iter().map(|level| level.difficulties.len()).collect();
    assert_eq!(counts, vec![4, 3]);
}
