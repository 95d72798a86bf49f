//! A read-only text file whose handle can be observed as open or closed.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Path opened by [`TextFile::open_default`], relative to the working directory.
pub const DEFAULT_PATH: &str = "file.txt";

#[derive(Debug)]
pub struct TextFile {
    path: PathBuf,
    file: Option<File>,
}

impl TextFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        debug!("opened {}", path.display());
        Ok(Self {
            path,
            file: Some(file),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(DEFAULT_PATH)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read from the current position to the end of the file.
    pub fn read_contents(&mut self) -> Result<String> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| Error::Closed(self.path.clone()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|source| Error::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(contents)
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Release the handle. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.file.take().is_some() {
            debug!("closed {}", self.path.display());
        }
    }
}

impl Drop for TextFile {
    fn drop(&mut self) {
        self.close();
    }
}
