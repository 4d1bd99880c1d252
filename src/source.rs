// source.rs - Where the game library comes from.
//
// Two cases, picked by looking at the configured fetch URL:
//   1. Remote URLs    -> GET with ureq
//   2. Local paths    -> read the JSON file from disk (also `file://` URLs)
//
// Both return the parsed Steam payload as a `LoadedLibrary`.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LoadError;
use crate::models::{LibraryResponse, LoadedLibrary};

/// Anything that can produce the user's library once.
///
/// RUST NOTE: `Send + Sync` lets a boxed source move onto the loader thread.
pub trait DataSource: Send + Sync {
    fn fetch(&self) -> Result<LoadedLibrary, LoadError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        HttpSource { url: url.into() }
    }
}

impl DataSource for HttpSource {
    fn fetch(&self) -> Result<LoadedLibrary, LoadError> {
        // ureq turns 4xx/5xx into `Error::Status`, so anything Ok here is a 2xx.
        let response = ureq::get(&self.url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => LoadError::Status {
                code,
                url: self.url.clone(),
            },
            other => LoadError::Http(other.to_string()),
        })?;

        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;
        debug!(url = %self.url, bytes = bytes.len(), "library response received");

        parse_library(&bytes)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<LoadedLibrary, LoadError> {
        let bytes = std::fs::read(&self.path)?;
        parse_library(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Decode the `{ response: { game_count, games } }` envelope.
pub fn parse_library(bytes: &[u8]) -> Result<LoadedLibrary, LoadError> {
    let body: LibraryResponse = serde_json::from_slice(bytes)?;
    Ok(LoadedLibrary::from(body))
}

fn is_remote_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Pick the source matching `fetch_url`.
pub fn source_for(fetch_url: &str) -> Box<dyn DataSource> {
    if is_remote_url(fetch_url) {
        return Box::new(HttpSource::new(fetch_url));
    }
    let path = fetch_url.strip_prefix("file://").unwrap_or(fetch_url);
    Box::new(FileSource::new(Path::new(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{"response":{"game_count":3,"games":[
        {"appid":10,"name":"Counter-Strike","playtime_forever":0},
        {"appid":570,"name":"Dota 2","playtime_forever":30},
        {"appid":620,"name":"Portal 2","playtime_forever":120}
    ]}}"#;

    #[test]
    fn file_source_reads_library() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let loaded = FileSource::new(file.path()).fetch().unwrap();
        assert_eq!(loaded.total_games, 3);
        assert_eq!(loaded.games[2].name, "Portal 2");
    }

    #[test]
    fn file_url_prefix_is_stripped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let url = format!("file://{}", file.path().display());

        let source = source_for(&url);
        assert_eq!(source.describe(), file.path().display().to_string());
        assert_eq!(source.fetch().unwrap().games.len(), 3);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = FileSource::new("/definitely/not/here.json").fetch().unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(parse_library(b"<html>"), Err(LoadError::Parse(_))));
    }

    #[test]
    fn remote_urls_use_http() {
        assert_eq!(source_for("https://example.com/g.json").describe(), "https://example.com/g.json");
        assert!(is_remote_url("http://localhost/g.json"));
        assert!(!is_remote_url("./data/steam-games-with-names.json"));
    }
}
