use std::{
    fs::File,
    io::{Cursor, Write},
    path::{Path, PathBuf},
};

use pretty_assertions::assert_eq;
use q3_bsp::BspWriter;
use q3_deps::{
    config::{CheckerConfig, ReferenceSets},
    error::{Error, Result},
    Bucket, Verdict,
};
use q3_pk3::{ArchiveIndex, Pk3Archive};
use tracing_test::traced_test;
use zip::write::SimpleFileOptions;

fn write_pk3<W: Write + std::io::Seek>(out: W, entries: &[(&str, &[u8])]) -> W {
    let mut writer = zip::ZipWriter::new(out);
    for (name, data) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap()
}

fn create_pk3(path: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    write_pk3(File::create(path).unwrap(), entries);
    path.to_owned()
}

fn index(paths: &[&str]) -> ArchiveIndex {
    paths.iter().collect()
}

#[traced_test]
#[test]
fn scenario_texture_found_in_map() -> Result<()> {
    let bsp = BspWriter::new().texture("textures/foo/bar").finish()?;
    let input = write_pk3(
        Cursor::new(Vec::new()),
        &[
            ("maps/foo.bsp", bsp.as_slice()),
            ("textures/foo/bar.jpg", b"\xff\xd8"),
        ],
    )
    .into_inner();
    let mut archive = Pk3Archive::new(Cursor::new(input))?;

    let report = q3_deps::check_archive(
        "foo.pk3",
        &mut archive,
        &ReferenceSets::default(),
        &CheckerConfig::default(),
    )?;

    assert_eq!(report.classification.map, vec!["textures/foo/bar"]);
    assert_eq!(report.counts.get(Bucket::Map), 1);
    assert_eq!(report.verdict, Verdict::Playable);
    assert!(logs_contain("checked map"));

    Ok(())
}

#[traced_test]
#[test]
fn scenario_model_only_in_full() -> Result<()> {
    let bsp = BspWriter::new()
        .entity(&[("classname", "worldspawn")])
        .entity(&[
            ("classname", "func_static"),
            ("model", "*1"),
            ("model2", "models/weapons2/gauntlet/gauntlet.md3"),
        ])
        .finish()?;
    let input = write_pk3(Cursor::new(Vec::new()), &[("maps/gauntlet.bsp", bsp.as_slice())])
        .into_inner();
    let mut archive = Pk3Archive::new(Cursor::new(input))?;
    let references = ReferenceSets {
        demo: index(&["models/weapons2/machinegun/machinegun.md3"]),
        full: index(&["models/weapons2/gauntlet/gauntlet.md3"]),
        ..Default::default()
    };

    let report = q3_deps::check_archive(
        "gauntlet.pk3",
        &mut archive,
        &references,
        &CheckerConfig::default(),
    )?;

    assert_eq!(
        report.classification.full,
        vec!["models/weapons2/gauntlet/gauntlet.md3"]
    );
    assert_eq!(report.verdict, Verdict::Probably(1));

    Ok(())
}

#[traced_test]
#[test]
fn scenario_playable_from_files() -> Result<()> {
    let dir = tempfile::tempdir().map_err(q3_pk3::error::Error::from)?;
    let config = CheckerConfig::with_base_dir(dir.path());

    create_pk3(
        &config.demo_pak,
        &[
            ("textures/base_wall/metal.tga", b""),
            ("sound/world/hum.wav", b""),
        ],
    );
    create_pk3(
        &config.patch_paks[0],
        &[("models/mapobjects/tree.md3", b"")],
    );
    create_pk3(
        &config.full_pak,
        &[
            ("textures/base_wall/metal.tga", b""),
            ("textures/gothic/block.jpg", b""),
        ],
    );

    let bsp = BspWriter::new()
        .texture("textures/base_wall/metal")
        .texture("textures/common/caulk")
        .texture("textures/tig/floor")
        .entity(&[("classname", "misc_model"), ("model", "models/mapobjects/tree.md3")])
        .entity(&[("classname", "target_speaker"), ("noise", "sound/world/hum.wav")])
        .finish()?;
    let shader = b"textures/tig/glow\n{\n\tqer_editorImage textures/tig/glow.tga\n}\n";
    let map = create_pk3(
        &dir.path().join("maps").join("tig.pk3"),
        &[
            ("maps/tig.bsp", bsp.as_slice()),
            ("scripts/tig.shader", &shader[..]),
            ("textures/tig/floor.jpg", b""),
            ("textures/tig/glow.jpg", b""),
        ],
    );

    let references = ReferenceSets::load(&config)?;
    let report = q3_deps::check_map(&map, &references, &config)?;

    assert_eq!(report.map, map);
    assert_eq!(report.dependencies.bsp, "maps/tig.bsp");
    assert_eq!(
        report.classification.map,
        vec!["textures/tig/floor", "textures/tig/glow.tga"]
    );
    assert_eq!(
        report.classification.demo,
        vec!["sound/world/hum.wav", "textures/base_wall/metal"]
    );
    assert_eq!(report.classification.patch, vec!["models/mapobjects/tree.md3"]);
    assert!(report.classification.full.is_empty());
    assert!(report.classification.missing.is_empty());
    assert_eq!(report.ignored(), 1);
    assert_eq!(report.verdict, Verdict::Playable);

    Ok(())
}

#[traced_test]
#[test]
fn check_map_without_bsp() -> Result<()> {
    let dir = tempfile::tempdir().map_err(q3_pk3::error::Error::from)?;
    let map = create_pk3(
        &dir.path().join("empty.pk3"),
        &[("levelshots/empty.jpg", b"")],
    );

    assert!(matches!(
        q3_deps::check_map(&map, &ReferenceSets::default(), &CheckerConfig::default()),
        Err(Error::NoBspFound)
    ));

    Ok(())
}

#[traced_test]
#[test]
fn check_map_not_an_archive() -> Result<()> {
    let dir = tempfile::tempdir().map_err(q3_pk3::error::Error::from)?;
    let map = dir.path().join("broken.pk3");
    std::fs::write(&map, b"not a zip").map_err(q3_pk3::error::Error::from)?;

    assert!(matches!(
        q3_deps::check_map(&map, &ReferenceSets::default(), &CheckerConfig::default()),
        Err(Error::Archive(q3_pk3::error::Error::InvalidArchive(_)))
    ));

    Ok(())
}

#[test]
fn report_serializes_to_json() -> Result<()> {
    let bsp = BspWriter::new()
        .texture("textures/gothic/block")
        .texture("noshader")
        .finish()?;
    let input = write_pk3(Cursor::new(Vec::new()), &[("maps/a.bsp", bsp.as_slice())])
        .into_inner();
    let mut archive = Pk3Archive::new(Cursor::new(input))?;
    let references = ReferenceSets {
        full: index(&["textures/gothic/block.jpg"]),
        ..Default::default()
    };

    let report =
        q3_deps::check_archive("a.pk3", &mut archive, &references, &CheckerConfig::default())?;
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["map"], "a.pk3");
    assert_eq!(json["counts"]["full"], 1);
    assert_eq!(json["classification"]["full"][0], "textures/gothic/block");
    assert_eq!(json["classification"]["ignored"][0], "noshader");
    assert_eq!(
        json["verdict"],
        serde_json::json!({ "verdict": "probably", "full_only": 1 })
    );

    Ok(())
}
