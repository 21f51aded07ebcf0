//! Where a map archive comes from

use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info, instrument};

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Diagnostic, Debug)]
pub enum SourceError {
    /// The map could not be fetched or saved
    #[error("failed to download {url}")]
    #[diagnostic(help("check the url, or download the map by hand and pass its path"))]
    DownloadFailed {
        url: String,
        #[source]
        reason: DownloadError,
    },
}

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("url has no file name")]
    NoFileName,

    #[error(transparent)]
    IOError(#[from] io::Error),
}

/// A map given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapSource {
    LocalPath(PathBuf),
    RemoteUrl(String),
}

impl MapSource {
    /// `http://` and `https://` arguments are urls, anything else is a path.
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            MapSource::RemoteUrl(s.to_owned())
        } else {
            MapSource::LocalPath(PathBuf::from(s))
        }
    }

    /// Local path of the map, downloading it into `download_dir` first when remote.
    pub fn fetch(&self, download_dir: &Path) -> Result<PathBuf, SourceError> {
        match self {
            MapSource::LocalPath(path) => Ok(path.clone()),
            MapSource::RemoteUrl(url) => {
                download(url, download_dir).map_err(|reason| SourceError::DownloadFailed {
                    url: url.clone(),
                    reason,
                })
            }
        }
    }
}

impl fmt::Display for MapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapSource::LocalPath(path) => write!(f, "{}", path.display()),
            MapSource::RemoteUrl(url) => f.write_str(url),
        }
    }
}

/// Last non-empty path segment of `url`, without query or fragment
pub fn file_name(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    let path = path.split_once("://").map_or(path, |(_, rest)| rest);
    let (_, path) = path.split_once('/')?;
    path.rsplit('/').find(|segment| !segment.is_empty())
}

#[instrument(skip(download_dir))]
fn download(url: &str, download_dir: &Path) -> Result<PathBuf, DownloadError> {
    let name = file_name(url).ok_or(DownloadError::NoFileName)?;
    fs::create_dir_all(download_dir)?;
    let target = download_dir.join(name);
    info!(path = %target.display(), "downloading map");

    let client = reqwest::blocking::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let mut response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(DownloadError::Status(response.status()));
    }

    // written under a temporary name until the transfer completes
    let partial = target.with_extension("part");
    let mut out = fs::File::create(&partial)?;
    let size = response.copy_to(&mut out)?;
    out.flush()?;
    fs::rename(&partial, &target)?;

    debug!(bytes = size, "download complete");
    Ok(target)
}

#[cfg(test)]
mod test {
    use std::path::{Path, PathBuf};

    use pretty_assertions::assert_eq;

    use crate::source::{file_name, MapSource};

    #[test]
    fn parse_sources() {
        assert_eq!(
            MapSource::parse("https://ws.q3df.org/maps/downloads/tig_den.pk3"),
            MapSource::RemoteUrl("https://ws.q3df.org/maps/downloads/tig_den.pk3".into())
        );
        assert_eq!(
            MapSource::parse("downloads/tig_den.pk3"),
            MapSource::LocalPath(PathBuf::from("downloads/tig_den.pk3"))
        );
        assert_eq!(
            MapSource::parse("ftp://example.com/a.pk3"),
            MapSource::LocalPath(PathBuf::from("ftp://example.com/a.pk3"))
        );
    }

    #[test]
    fn url_file_names() {
        assert_eq!(
            file_name("https://ws.q3df.org/maps/downloads/tig_den.pk3"),
            Some("tig_den.pk3")
        );
        assert_eq!(file_name("http://example.com/a/b.pk3?dl=1#top"), Some("b.pk3"));
        assert_eq!(file_name("http://example.com/maps/"), Some("maps"));
        assert_eq!(file_name("http://example.com"), None);
        assert_eq!(file_name("http://example.com/"), None);
    }

    #[test]
    fn local_path_is_not_fetched() {
        let source = MapSource::parse("maps/tig_den.pk3");

        assert_eq!(
            source.fetch(Path::new("never-created")).unwrap(),
            PathBuf::from("maps/tig_den.pk3")
        );
        assert!(!Path::new("never-created").exists());
    }
}
