use crate::{ARTIFACT_EXTENSION, error::Error, model::entity::EntityHandle};
use std::path::{Path, PathBuf};

///
/// ArtifactLocation
///
/// Directory + file for one entity's artifact. The directory mirrors the
/// entity's module path; the file name is the full qualified name, so two
/// entity types never share an artifact.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArtifactLocation {
    pub dir: PathBuf,
    pub file: PathBuf,
}

impl ArtifactLocation {
    /// Resolve the location under `root` without touching the filesystem.
    pub fn resolve(root: &Path, handle: &EntityHandle) -> Result<Self, Error> {
        let mut dir = root.to_path_buf();
        for segment in handle.module_path.split("::").filter(|s| !s.is_empty()) {
            validate_segment(segment, handle)?;
            dir.push(segment);
        }

        let leaf = handle.qualified_name.replace("::", ".");
        validate_segment(&leaf, handle)?;
        let file = dir.join(format!("{leaf}.{ARTIFACT_EXTENSION}"));

        Ok(Self { dir, file })
    }
}

// reject anything that would escape or alias the cache hierarchy
fn validate_segment(segment: &str, handle: &EntityHandle) -> Result<(), Error> {
    let bad = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0']);

    if bad {
        return Err(Error::cache_unsupported(format!(
            "entity '{}' has a path segment unusable as a cache path: '{segment}'",
            handle.qualified_name
        )));
    }

    Ok(())
}

/// Requested mode for cache directories; the kernel clears the umask bits.
pub(crate) const DIRECTORY_MODE: u32 = 0o777;

/// Requested mode for artifact files; the kernel clears the umask bits.
pub(crate) const FILE_MODE: u32 = 0o666;

/// Create `dir` and any missing parents with [`DIRECTORY_MODE`] less the
/// process umask. Existing directories are left alone.
pub fn ensure_dir(dir: &Path) -> Result<(), Error> {
    if dir.is_dir() {
        return Ok(());
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIRECTORY_MODE);
    }

    builder
        .create(dir)
        .map_err(|e| Error::cache_io("create", dir, &e))
}

///
/// directory_mode
///
/// What the kernel yields for [`DIRECTORY_MODE`] under `umask`: one octal
/// digit at a time (owner, group, other), special bits ignored.
///

#[cfg(test)]
pub(crate) const fn directory_mode(umask: u32) -> u32 {
    let mut mode = 0;
    let mut shift = 0;
    while shift <= 6 {
        let digit = (umask >> shift) & 0o7;
        mode |= ((DIRECTORY_MODE >> shift) & 0o7 & !digit) << shift;
        shift += 3;
    }

    mode
}

/// What the kernel yields for [`FILE_MODE`] under `umask`.
#[cfg(test)]
pub(crate) const fn file_mode(umask: u32) -> u32 {
    FILE_MODE & !umask & 0o777
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_mode_subtracts_each_digit() {
        assert_eq!(directory_mode(0o022), 0o755);
        assert_eq!(directory_mode(0o027), 0o750);
        assert_eq!(directory_mode(0o002), 0o775);
        assert_eq!(directory_mode(0o077), 0o700);
        assert_eq!(directory_mode(0), 0o777);
    }

    #[test]
    fn directory_mode_ignores_special_bits() {
        assert_eq!(directory_mode(0o7022), 0o755);
    }

    #[test]
    fn file_mode_clears_umask_bits() {
        assert_eq!(file_mode(0o022), 0o644);
        assert_eq!(file_mode(0o077), 0o600);
    }

    #[test]
    fn location_mirrors_module_path() {
        let handle = EntityHandle::new("app::model::User", "app::model");
        let loc = ArtifactLocation::resolve(Path::new("/cache/colgrid"), &handle).unwrap();

        assert_eq!(loc.dir, PathBuf::from("/cache/colgrid/app/model"));
        assert_eq!(
            loc.file,
            PathBuf::from("/cache/colgrid/app/model/app.model.User.cgc")
        );
    }

    #[test]
    fn root_module_entity_lives_at_root() {
        let handle = EntityHandle::new("User", "");
        let loc = ArtifactLocation::resolve(Path::new("/cache"), &handle).unwrap();

        assert_eq!(loc.dir, PathBuf::from("/cache"));
        assert_eq!(loc.file, PathBuf::from("/cache/User.cgc"));
    }

    #[test]
    fn traversal_segments_are_rejected() {
        let handle = EntityHandle::new("app::User", "app::..");
        let err = ArtifactLocation::resolve(Path::new("/cache"), &handle).unwrap_err();

        assert_eq!(err.class, crate::error::ErrorClass::Unsupported);

        let handle = EntityHandle::new("a/b::User", "a/b");
        assert!(ArtifactLocation::resolve(Path::new("/cache"), &handle).is_err());
    }
}
