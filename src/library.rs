//! Loading a song library from JSON.

use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{AppError, Result};
use crate::types::Song;

/// Parse a JSON array of songs, rejecting duplicate ids.
pub fn parse_library(json: &str) -> Result<Vec<Song>> {
    let songs: Vec<Song> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    for song in &songs {
        if !seen.insert(song.id.as_str()) {
            return Err(AppError::Library(format!("duplicate song id {}", song.id)));
        }
    }
    Ok(songs)
}

/// Read and parse a library file
pub fn load_library(path: &Path) -> Result<Vec<Song>> {
    let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let songs = parse_library(&json)?;
    info!(path = %path.display(), songs = songs.len(), "Library loaded");
    Ok(songs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::Emotion;

    #[test]
    fn test_parse_library() {
        let json = r#"[
            {"id": "1", "title": "A", "segments": [{"position": 0, "text": "x", "label": "sad"}]},
            {"id": "2", "title": "B"}
        ]"#;
        let songs = parse_library(json).unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].trajectory(), vec![Some(Emotion::Sad)]);
        assert!(songs[1].segments.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[{"id": "1", "title": "A"}, {"id": "1", "title": "B"}]"#;
        let err = parse_library(json).unwrap_err();
        assert_eq!(err.code(), "LIBRARY_ERROR");
    }

    #[test]
    fn test_missing_file() {
        let err = load_library(Path::new("/nonexistent/library.json")).unwrap_err();
        assert_eq!(err.code(), "IO_ERROR");
    }
}
