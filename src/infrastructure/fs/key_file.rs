//! Service account key file for `gcloud auth activate-service-account`

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A credential file that is removed when dropped
///
/// Removal failures are logged, not raised: the plugin normally runs in an
/// ephemeral container that discards the file anyway.
#[derive(Debug)]
pub struct KeyFile {
    path: PathBuf,
}

impl KeyFile {
    /// Write `token` to `path`, readable by the owner only.
    pub fn write(path: &Path, token: &str) -> io::Result<Self> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(path)?;
        file.write_all(token.as_bytes())?;
        file.sync_all()?;

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort removal of a key file at `path`
    pub fn remove(path: &Path) {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => log::warn!("error removing token file {}: {}", path.display(), err),
        }
    }
}

impl Drop for KeyFile {
    fn drop(&mut self) {
        Self::remove(&self.path);
    }
}
