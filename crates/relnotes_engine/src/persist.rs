use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use engine_logging::{engine_info, engine_warn};
use relnotes_core::{Timestamp, WatermarkError, WatermarkStore, NEVER_UPDATED};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

const WATERMARK_FILENAME: &str = "watermark.ron";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("state directory missing or not writable: {0}")]
    StateDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialize error: {0}")]
    Serialize(String),
}

/// Creates `dir` if missing; an existing non-directory is an error.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(PersistError::StateDir(format!(
            "{} is not a directory",
            dir.display()
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|err| PersistError::StateDir(err.to_string()))
        }
        Err(err) => Err(PersistError::StateDir(err.to_string())),
    }
}

/// Writes `{dir}/{filename}` through a synced temp file and a rename.
/// Readers see either the old or the new content.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(content.as_bytes())?;
        staged.as_file().sync_all()?;

        let target = self.dir.join(filename);
        staged
            .persist(&target)
            .map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedWatermark {
    last_update: Timestamp,
}

/// Watermark kept as a small RON file in the state directory.
///
/// Unreadable or corrupt files read as [`NEVER_UPDATED`].
#[derive(Debug, Clone)]
pub struct FileWatermarkStore {
    path: PathBuf,
    writer: AtomicFileWriter,
}

impl FileWatermarkStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            path: state_dir.join(WATERMARK_FILENAME),
            writer: AtomicFileWriter::new(state_dir),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, timestamp: Timestamp) -> Result<PathBuf, PersistError> {
        let state = PersistedWatermark {
            last_update: timestamp,
        };
        let content = ron::ser::to_string_pretty(&state, ron::ser::PrettyConfig::new())
            .map_err(|err| PersistError::Serialize(err.to_string()))?;
        self.writer.write(WATERMARK_FILENAME, &content)
    }
}

impl WatermarkStore for FileWatermarkStore {
    fn get(&self) -> Timestamp {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return NEVER_UPDATED,
            Err(err) => {
                engine_warn!("Failed to read watermark from {:?}: {}", self.path, err);
                return NEVER_UPDATED;
            }
        };

        match ron::from_str::<PersistedWatermark>(&content) {
            Ok(state) => state.last_update,
            Err(err) => {
                engine_warn!("Failed to parse watermark from {:?}: {}", self.path, err);
                NEVER_UPDATED
            }
        }
    }

    fn set(&mut self, timestamp: Timestamp) -> Result<(), WatermarkError> {
        let path = self
            .save(timestamp)
            .map_err(|err| WatermarkError::Persist(err.to_string()))?;
        engine_info!("Stored watermark {} in {:?}", timestamp, path);
        Ok(())
    }
}
