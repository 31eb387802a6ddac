//! Compiled column cache.
//!
//! One artifact per entity type, holding either the annotation-derived
//! column set or the `Absent` sentinel. Artifacts are written through a
//! temporary file and renamed into place, so readers never observe a
//! partially written artifact.

mod codec;
mod path;


pub use codec::CodecError;
pub use path::{ArtifactLocation, ensure_dir};

use crate::{CACHE_SUBDIR, error::Error, model::column::ColumnSet, model::entity::EntityHandle};
use std::{
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    time::SystemTime,
};
use tempfile::Builder;
use tracing::{debug, warn};

///
/// CacheArtifact
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CacheArtifact {
    /// Annotation discovery found nothing; callers fall back to reflection.
    Absent,
    Columns(ColumnSet),
}

impl CacheArtifact {
    #[must_use]
    pub fn into_columns(self) -> Option<ColumnSet> {
        match self {
            Self::Absent => None,
            Self::Columns(columns) => Some(columns),
        }
    }
}

impl From<Option<ColumnSet>> for CacheArtifact {
    fn from(columns: Option<ColumnSet>) -> Self {
        columns.map_or(Self::Absent, Self::Columns)
    }
}

///
/// LoadOutcome
///

#[derive(Debug)]
pub enum LoadOutcome {
    Hit(CacheArtifact),
    NotFound,
    /// Debug mode only: the artifact predates its source or the engine.
    Stale,
    /// The artifact exists but failed validation.
    Corrupt(CodecError),
}

///
/// CompiledCacheStore
///

#[derive(Clone, Debug)]
pub struct CompiledCacheStore {
    root: PathBuf,
    engine_mtime: Option<SystemTime>,
}

impl CompiledCacheStore {
    /// Store rooted at `cache_dir/colgrid`.
    ///
    /// The engine mtime defaults to the running executable's, so rebuilding
    /// the binary invalidates debug-mode artifacts.
    pub fn new(cache_dir: impl AsRef<Path>) -> Self {
        Self {
            root: cache_dir.as_ref().join(CACHE_SUBDIR),
            engine_mtime: current_exe_mtime(),
        }
    }

    #[must_use]
    pub const fn with_engine_mtime(mut self, mtime: Option<SystemTime>) -> Self {
        self.engine_mtime = mtime;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn engine_mtime(&self) -> Option<SystemTime> {
        self.engine_mtime
    }

    /// Resolve the artifact path for an entity, creating its directory.
    pub fn artifact_path(&self, handle: &EntityHandle) -> Result<PathBuf, Error> {
        let location = ArtifactLocation::resolve(&self.root, handle)?;
        ensure_dir(&location.dir)?;

        Ok(location.file)
    }

    /// Load the artifact at `path`.
    ///
    /// Outside debug mode any present artifact is trusted. In debug mode it
    /// must be at least as new as both the entity source and the engine.
    pub fn load(
        &self,
        path: &Path,
        handle: &EntityHandle,
        debug: bool,
    ) -> Result<LoadOutcome, Error> {
        let meta = match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => return Ok(LoadOutcome::NotFound),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadOutcome::NotFound),
            Err(e) => return Err(Error::cache_io("stat", path, &e)),
        };

        if debug {
            let artifact_mtime = meta
                .modified()
                .map_err(|e| Error::cache_io("read mtime of", path, &e))?;

            if !self.is_fresh(artifact_mtime, handle) {
                debug!(entity = %handle.qualified_name, path = %path.display(), "stale artifact");
                return Ok(LoadOutcome::Stale);
            }
        }

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadOutcome::NotFound),
            Err(e) => return Err(Error::cache_io("read", path, &e)),
        };

        match codec::decode(&handle.qualified_name, &bytes) {
            Ok(artifact) => Ok(LoadOutcome::Hit(artifact)),
            Err(err) => {
                warn!(entity = %handle.qualified_name, path = %path.display(), %err, "corrupt artifact");
                Ok(LoadOutcome::Corrupt(err))
            }
        }
    }

    /// Write `artifact` to `path`, replacing any existing artifact atomically.
    pub fn save(
        &self,
        path: &Path,
        handle: &EntityHandle,
        artifact: &CacheArtifact,
    ) -> Result<(), Error> {
        let bytes = codec::encode(&handle.qualified_name, artifact)?;

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(dir)?;

        let mut tmp = temp_builder()
            .tempfile_in(dir)
            .map_err(|e| Error::cache_io("create", dir, &e))?;
        tmp.write_all(&bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| Error::cache_io("write", tmp.path(), &e))?;

        tmp.persist(path)
            .map_err(|e| Error::cache_io("replace", path, &e.error))?;

        debug!(
            entity = %handle.qualified_name,
            path = %path.display(),
            bytes = bytes.len(),
            "artifact written"
        );

        Ok(())
    }

    // artifact_mtime >= max(source, engine); an unknown source is never fresh
    fn is_fresh(&self, artifact_mtime: SystemTime, handle: &EntityHandle) -> bool {
        let Some(source_mtime) = handle.resolve_source_mtime() else {
            return false;
        };
        let threshold = self
            .engine_mtime
            .map_or(source_mtime, |engine| engine.max(source_mtime));

        artifact_mtime >= threshold
    }
}

// temp files in the artifact dir, created with the artifact's final mode
fn temp_builder() -> Builder<'static, 'static> {
    let mut builder = Builder::new();
    builder.prefix(".cgc-");

    #[cfg(unix)]
    {
        use std::{fs::Permissions, os::unix::fs::PermissionsExt};
        builder.permissions(Permissions::from_mode(path::FILE_MODE));
    }

    builder
}

fn current_exe_mtime() -> Option<SystemTime> {
    let exe = std::env::current_exe().ok()?;

    std::fs::metadata(exe).ok()?.modified().ok()
}
