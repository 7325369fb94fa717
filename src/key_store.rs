// Persistence of the service key: a single line in a single text file.

use crate::error::{FaceError, Result};
use log::{debug, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        KeyStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the key file with `value` and a trailing newline.
    pub fn write(&self, value: &str) -> Result<()> {
        debug!("writing key file {}", self.path.display());
        std::fs::write(&self.path, format!("{value}\n")).map_err(|e| FaceError::io(&self.path, e))
    }

    /// First line of the key file, without its line terminator.
    pub fn try_read(&self) -> Result<String> {
        let data = std::fs::read_to_string(&self.path).map_err(|source| FaceError::KeyMissing {
            path: self.path.clone(),
            source,
        })?;
        let first = data.lines().next().unwrap_or("");
        Ok(first.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Like `try_read`, but a missing or unreadable file yields an empty
    /// key. The remote service then rejects the calls made with it.
    pub fn read(&self) -> String {
        match self.try_read() {
            Ok(key) => key,
            Err(err) => {
                warn!("{err}");
                println!("Cannot read face api key from {}", self.path.display());
                String::new()
            }
        }
    }
}
