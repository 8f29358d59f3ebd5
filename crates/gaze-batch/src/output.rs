//! Atomic output files.

use gaze_core::{Error, Result};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Fully written temporary file waiting to be moved onto its target.
///
/// Dropping it without [`persist`](Self::persist) removes the temporary
/// file and leaves the target untouched.
#[derive(Debug)]
pub struct StagedFile {
    tmp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Rename the temporary file onto the target
    pub fn persist(self) -> Result<()> {
        self.tmp.persist(&self.target).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

/// Write the contents of `path` to a temporary file in the same directory
/// without touching `path` itself.
///
/// On any error the temporary file is removed and `path` is left as it
/// was.
pub fn stage<F>(path: &Path, write: F) -> Result<StagedFile>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;

    Ok(StagedFile {
        tmp,
        target: path.to_path_buf(),
    })
}
