//! Level files and grid construction
//!
//! A level is authored as a grid of short tile codes. `format` reads and
//! writes descriptions and decodes individual codes; `build` turns a
//! description into a live `LevelGrid`.

mod build;
pub mod format;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use format::{LevelDescription, TileCode, TileKind, TileVariant};

/// Errors loading or building a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level index {index} is out of range ({count} levels)")]
    InvalidIndex { index: usize, count: usize },

    #[error("failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("level JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level is missing its {0} line")]
    MissingDimension(&'static str),

    #[error("invalid level {name}: {value:?}")]
    InvalidDimension { name: &'static str, value: String },

    #[error("level of {width}x{height} tiles is too large")]
    TooLarge { width: usize, height: usize },

    #[error("level data ends before tile ({x}, {y})")]
    MissingTile { x: usize, y: usize },

    #[error("level has {found} tiles, expected {expected}")]
    TileCount { expected: usize, found: usize },

    #[error("unknown channel in tile code {code:?}")]
    UnknownChannel { code: String },

    #[error("unknown variant in tile code {code:?}")]
    UnknownVariant { code: String },

    #[error("invalid platform code {code:?}")]
    InvalidPlatform { code: String },
}

/// Where a level description comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSource {
    /// Text or `.json` file on disk
    File(PathBuf),
    /// Level text held in memory
    Inline(String),
}

impl LevelSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Read and parse the description
    pub fn load(&self) -> Result<LevelDescription, LevelError> {
        match self {
            Self::File(path) => load_file(path),
            Self::Inline(text) => LevelDescription::parse(text),
        }
    }

    /// Short name for logs
    pub fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline(_) => "<inline>".to_string(),
        }
    }
}

fn load_file(path: &Path) -> Result<LevelDescription, LevelError> {
    let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "json") {
        LevelDescription::from_json(&text)
    } else {
        LevelDescription::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_source() {
        let source = LevelSource::Inline("1\n2\n1b\n3\n".to_string());
        let desc = source.load().unwrap();
        assert_eq!((desc.width, desc.height), (1, 2));
        assert_eq!(source.label(), "<inline>");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = LevelSource::file("/nonexistent/level_one.level");
        assert!(matches!(source.load(), Err(LevelError::Io { .. })));
    }

    #[test]
    fn test_json_file_round_trip() {
        let desc = LevelDescription::parse("2\n1\n3\n1b\n").unwrap();
        let path = std::env::temp_dir().join(format!("gravity_snail_level_{}.json", std::process::id()));
        std::fs::write(&path, desc.to_json().unwrap()).unwrap();
        let loaded = LevelSource::file(&path).load();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.unwrap(), desc);
    }
}
