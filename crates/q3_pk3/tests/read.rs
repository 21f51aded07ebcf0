use std::fs::File;
use std::io::Write;
use std::path::Path;

use pretty_assertions::assert_eq;
use q3_pk3::{error::Error, ArchiveIndex, Pk3Archive};
use tracing::info;
use tracing_test::traced_test;
use zip::write::SimpleFileOptions;

fn write_pk3(path: &Path, entries: &[(&str, &[u8])]) -> Result<(), Error> {
    info!("writing {}", path.display());

    let mut writer = zip::ZipWriter::new(File::create(path)?);
    for (name, data) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .map_err(Error::InvalidArchive)?;
        writer.write_all(data)?;
    }
    writer.finish().map_err(Error::InvalidArchive)?;

    Ok(())
}

#[traced_test]
#[test]
fn load_missing_archive_is_empty() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;

    let index = ArchiveIndex::load(dir.path().join("baseq3/pak7.pk3"))?;
    assert!(index.is_empty());

    Ok(())
}

#[traced_test]
#[test]
fn load_lower_cases_entries() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("map-tig_den.pk3");
    write_pk3(
        &path,
        &[
            ("maps/TIG_DEN.bsp", b"IBSP"),
            ("Textures/Tig_Den/Wall.JPG", b""),
            ("sound/world/hum.wav", b""),
        ],
    )?;

    let index = ArchiveIndex::load(&path)?;
    assert_eq!(
        index.iter().collect::<Vec<_>>(),
        vec![
            "maps/tig_den.bsp",
            "textures/tig_den/wall.jpg",
            "sound/world/hum.wav"
        ]
    );
    assert!(index.iter().all(|p| p == p.to_lowercase()));

    Ok(())
}

#[traced_test]
#[test]
fn load_corrupt_archive_fails() -> Result<(), Error> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("pak0.pk3");
    std::fs::write(&path, b"definitely not a zip file")?;

    assert!(matches!(
        ArchiveIndex::load(&path),
        Err(Error::InvalidArchive(_))
    ));
    assert!(matches!(
        Pk3Archive::open(&path),
        Err(Error::InvalidArchive(_))
    ));

    Ok(())
}
