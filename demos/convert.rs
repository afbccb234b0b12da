//! Convert osu! beatmap set folders into Beat Saber custom levels.
//!
//! Usage:
//!   cargo run --example convert -- <`set_folder`> [`output_folder`]
//!   cargo run --example convert -- --songs <`songs_folder`> <`output_folder`>
//!
//! Set folders are named as osu! names them, `<id> <artist> - <title>`. Set `RUST_LOG=info` to
//! follow the progress.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use log::{info, warn};
use osu2saber_rs::{
    convert::prelude::*,
    diagnostics::emit_osu_warnings,
    osu::{OsuBeatmap, metadata::OsuMetadata, parse_osu},
};

#[derive(Parser, Debug)]
#[command(name = "convert", about = "Converts osu! beatmap sets into Beat Saber levels")]
struct Args {
    /// A beatmap set folder inside the osu! `Songs` folder, or the `Songs` folder itself with
    /// `--songs`.
    osu_path: PathBuf,

    /// Where the level folders are written. Defaults to the parent of a single set.
    saber_path: Option<PathBuf>,

    /// Convert every set folder found in `osu_path`.
    #[arg(long)]
    songs: bool,

    /// Largest number of difficulties in one level.
    #[arg(long, default_value_t = 5)]
    max_difficulties: usize,
}

/// Splits `<id> <artist> - <title>` into its parts.
fn parse_folder_name(name: &str) -> Option<(i64, &str, &str)> {
    let (id, rest) = name.split_once(' ')?;
    let id = id.parse().ok()?;
    let (artist, title) = rest.split_once(" - ")?;
    (!artist.is_empty() && !title.is_empty()).then_some((id, artist, title))
}

fn read_beatmaps(folder: &Path) -> Result<Vec<OsuBeatmap>, Box<dyn std::error::Error>> {
    let mut paths: Vec<_> = fs::read_dir(folder)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "osu"))
        .collect();
    paths.sort();

    let mut beatmaps = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = fs::read(&path)?;
        let source = String::from_utf8_lossy(&bytes);
        let output = parse_osu(&source);
        let name = path.to_string_lossy();
        emit_osu_warnings(&name, &source, &output.warnings);
        beatmaps.push(output.beatmap);
    }
    Ok(beatmaps)
}

fn convert_set(
    set_folder: &Path,
    saber_path: &Path,
    config: &ConvertConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = set_folder
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (id, artist, title) =
        parse_folder_name(&name).ok_or_else(|| format!("not a beatmap set folder: {name}"))?;
    info!("{name}");

    let fallback = OsuMetadata {
        title: title.to_string(),
        artist: artist.to_string(),
        beatmap_set_id: id,
        ..Default::default()
    };
    let beatmaps: Vec<_> = read_beatmaps(set_folder)?
        .into_iter()
        .map(|mut beatmap| {
            beatmap.metadata = beatmap.metadata.or_defaults(&fallback);
            beatmap
        })
        .collect();

    let output = convert_beatmaps(&beatmaps, config);
    for warning in &output.warnings {
        warn!("{name}: {warning}");
    }
    for level in package(&output, config)? {
        let folder = level.write_to(saber_path)?;
        println!("{}", folder.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = ConvertConfig::default().max_difficulties_per_package(args.max_difficulties);

    if args.songs {
        let saber_path = args
            .saber_path
            .ok_or("an output folder is required with --songs")?;
        let mut sets: Vec<_> = fs::read_dir(&args.osu_path)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        sets.sort();
        for set in sets {
            let is_set = set
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(parse_folder_name)
                .is_some();
            if !is_set {
                continue;
            }
            if let Err(error) = convert_set(&set, &saber_path, &config) {
                warn!("skipping {}: {error}", set.display());
            }
        }
        Ok(())
    } else {
        let saber_path = match args.saber_path {
            Some(path) => path,
            None => args
                .osu_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        };
        convert_set(&args.osu_path, &saber_path, &config)
    }
}
