//! File-backed session persistence.
//!
//! The signed-in user lives in `user.json` inside a session directory. All
//! access goes through a capability handle on that directory, and writes land
//! in a hidden temp file that is renamed over the target, so a crash never
//! leaves a half-written session behind.

use std::io::{self, Write};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::domain::User;
use crate::domain::ports::{SessionStore, SessionStoreError};

/// File name of the persisted session inside the session directory.
pub const SESSION_FILE: &str = "user.json";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// [`SessionStore`] adapter writing JSON into a directory.
///
/// # Examples
/// ```
/// use camino::Utf8PathBuf;
/// use exchange::domain::ports::SessionStore;
/// use exchange::outbound::FileSessionStore;
///
/// let tmp = tempfile::tempdir().expect("temp dir");
/// let root = Utf8PathBuf::from_path_buf(tmp.path().join("session")).expect("utf-8 path");
/// let store = FileSessionStore::new(root);
/// assert_eq!(store.load(), Ok(None));
/// ```
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    root: Utf8PathBuf,
}

impl FileSessionStore {
    /// Store sessions under `root`, created on first save.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding [`SESSION_FILE`].
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn open_existing(&self) -> Result<Option<Dir>, SessionStoreError> {
        match Dir::open_ambient_dir(&self.root, ambient_authority()) {
            Ok(dir) => Ok(Some(dir)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(&err)),
        }
    }

    fn open_or_create(&self) -> Result<Dir, SessionStoreError> {
        Dir::create_ambient_dir_all(&self.root, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(&self.root, ambient_authority()))
            .map_err(|err| self.io_error(&err))
    }

    fn io_error(&self, err: &io::Error) -> SessionStoreError {
        SessionStoreError::io(format!("{}: {err}", self.root))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<User>, SessionStoreError> {
        let Some(dir) = self.open_existing()? else {
            return Ok(None);
        };
        let raw = match dir.read_to_string(SESSION_FILE) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(&err)),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| SessionStoreError::corrupt(err.to_string()))
    }

    fn save(&self, user: &User) -> Result<(), SessionStoreError> {
        let dir = self.open_or_create()?;
        let contents = serde_json::to_string_pretty(user)
            .map_err(|err| SessionStoreError::corrupt(err.to_string()))?;
        write_atomic(&dir, SESSION_FILE, &contents).map_err(|err| self.io_error(&err))?;
        debug!(root = %self.root, "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let Some(dir) = self.open_existing()? else {
            return Ok(());
        };
        match dir.remove_file(SESSION_FILE) {
            Ok(()) => {
                debug!(root = %self.root, "session cleared");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(&err)),
        }
    }
}

/// Write `contents` to `file_name` via a uniquely named sibling temp file.
fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{file_name}.tmp.{}.{counter}", process::id());

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let written = dir.open_with(&tmp_name, &options).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|()| replace(dir, &tmp_name, file_name)) {
        // The temp file may not exist if opening failed.
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }

    // Directory sync is advisory; some platforms refuse it.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
    Ok(())
}

#[cfg(windows)]
fn replace(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target)
}
