use std::{fs::File, io::Write, path::Path};

use clap::Parser;
use q3::commands::Commands;
use q3_bsp::BspWriter;
use tracing_test::traced_test;
use zip::write::SimpleFileOptions;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn run(args: &[&str]) -> miette::Result<()> {
    Cli::parse_from(args).command.handle()
}

fn create_pk3(path: &Path, entries: &[(&str, &[u8])]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    for (name, data) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
}

#[traced_test]
#[test]
fn check_local_map() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().to_str().unwrap();
    create_pk3(
        &dir.path().join("baseq3").join("pak0-demo.pk3"),
        &[("textures/base_wall/metal.tga", b"")],
    );

    let bsp = BspWriter::new()
        .texture("textures/base_wall/metal")
        .finish()
        .unwrap();
    let map = dir.path().join("metal.pk3");
    create_pk3(&map, &[("maps/metal.bsp", bsp.as_slice())]);
    let map = map.to_str().unwrap();

    run(&["q3", "check", map, "--base-dir", base]).unwrap();
    run(&["q3", "check", map, "--base-dir", base, "--format", "json", "--details"]).unwrap();
    run(&["q3", "deps", map]).unwrap();
    run(&["q3", "index", map, "--texture-folders"]).unwrap();

    assert!(logs_contain("checked map"));
}

#[traced_test]
#[test]
fn check_map_without_bsp_fails() {
    let dir = tempfile::tempdir().unwrap();
    let map = dir.path().join("empty.pk3");
    create_pk3(&map, &[("levelshots/empty.jpg", b"")]);

    let err = run(&["q3", "check", map.to_str().unwrap()]).unwrap_err();
    assert!(format!("{:?}", err).contains("no bsp found in map pk3"));
}

#[test]
fn index_of_missing_archive_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.pk3");

    assert!(run(&["q3", "index", missing.to_str().unwrap()]).is_err());
}
