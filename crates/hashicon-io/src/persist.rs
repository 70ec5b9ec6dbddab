//! Writing encoded identicons to disk.
//!
//! The output file name is the input string plus an extension, placed in
//! a caller-chosen directory. Bytes are first written to a temporary file
//! in that same directory, synced, and then renamed over the target, so
//! a failed write never leaves a truncated file behind and readers only
//! ever observe a complete image.
//!
//! Because the input string becomes part of a path, names containing a
//! path separator or NUL are rejected instead of being written outside
//! the target directory.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Errors that can occur while persisting an identicon.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The name cannot be used as a single file name.
    #[error("invalid output name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The filesystem refused the write.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// File or directory the failing operation targeted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// On-disk encoding, which decides the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Raster PNG.
    #[default]
    Png,
    /// Vector SVG.
    Svg,
}

impl OutputFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The path `name` would be written to inside `dir`.
///
/// # Errors
///
/// Returns [`PersistError::InvalidName`] if `name` contains `/`, `\`,
/// or a NUL byte.
pub fn output_path(dir: &Path, name: &str, format: OutputFormat) -> Result<PathBuf, PersistError> {
    let reason = if name.contains(['/', '\\']) {
        Some("contains a path separator")
    } else if name.contains('\0') {
        Some("contains a NUL byte")
    } else {
        None
    };
    if let Some(reason) = reason {
        return Err(PersistError::InvalidName {
            name: name.to_owned(),
            reason,
        });
    }
    Ok(dir.join(format!("{name}.{}", format.extension())))
}

/// Write PNG bytes to `dir/<name>.png`, replacing any existing file.
///
/// Returns the path written.
///
/// # Errors
///
/// See [`save_as`].
pub fn save(bytes: &[u8], name: &str, dir: &Path) -> Result<PathBuf, PersistError> {
    save_as(bytes, name, OutputFormat::Png, dir)
}

/// Write `bytes` to `dir/<name>.<ext>`, replacing any existing file.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns [`PersistError::InvalidName`] if `name` is not a plain file
/// name, or [`PersistError::Io`] if any filesystem operation fails. On
/// error the target file is left untouched.
pub fn save_as(
    bytes: &[u8],
    name: &str,
    format: OutputFormat,
    dir: &Path,
) -> Result<PathBuf, PersistError> {
    let path = output_path(dir, name, format)?;
    write_atomic(&path, dir, bytes)?;
    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}

fn write_atomic(path: &Path, dir: &Path, bytes: &[u8]) -> Result<(), PersistError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| PersistError::Io { path, source }
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err(dir))?;
    tmp.write_all(bytes).map_err(io_err(tmp.path()))?;
    tmp.as_file().sync_all().map_err(io_err(tmp.path()))?;
    tmp.persist(path).map_err(|e| PersistError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn extension_per_format() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Svg.to_string(), "svg");
        assert_eq!(OutputFormat::default(), OutputFormat::Png);
    }

    #[test]
    fn output_path_appends_extension() {
        let path = output_path(Path::new("out"), "apple", OutputFormat::Png).unwrap();
        assert_eq!(path, Path::new("out").join("apple.png"));
    }

    #[test]
    fn dots_and_spaces_are_plain_names() {
        let dir = Path::new("out");
        assert!(output_path(dir, "..", OutputFormat::Png).is_ok());
        assert!(output_path(dir, "", OutputFormat::Png).is_ok());
        assert!(output_path(dir, "my name", OutputFormat::Svg).is_ok());
    }

    #[test]
    fn separators_are_rejected() {
        for name in ["a/b", "../escape", "a\\b", "/abs"] {
            assert!(
                matches!(
                    output_path(Path::new("out"), name, OutputFormat::Png),
                    Err(PersistError::InvalidName { .. })
                ),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn nul_is_rejected() {
        assert!(matches!(
            output_path(Path::new("out"), "a\0b", OutputFormat::Png),
            Err(PersistError::InvalidName {
                reason: "contains a NUL byte",
                ..
            })
        ));
    }

    #[test_log::test]
    fn save_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = save(b"png-bytes", "apple", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("apple.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
    }

    #[test_log::test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("apple.png"), b"old contents, longer").unwrap();
        save(b"new", "apple", dir.path()).unwrap();
        assert_eq!(std::fs::read(dir.path().join("apple.png")).unwrap(), b"new");
    }

    #[test_log::test]
    fn no_temporary_files_remain() {
        let dir = tempfile::tempdir().unwrap();
        save(b"x", "a", dir.path()).unwrap();
        save_as(b"y", "a", OutputFormat::Svg, dir.path()).unwrap();
        assert_eq!(entries(dir.path()), vec!["a.png", "a.svg"]);
    }

    #[test_log::test]
    fn missing_directory_is_io_error_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = save(b"x", "apple", &missing).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
        assert!(!missing.exists());
        assert!(entries(dir.path()).is_empty());
    }

    #[test_log::test]
    fn invalid_name_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = save(b"x", "../apple", dir.path()).unwrap_err();
        assert!(matches!(err, PersistError::InvalidName { .. }));
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn io_error_message_names_path() {
        let err = PersistError::Io {
            path: PathBuf::from("/nowhere/apple.png"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/nowhere/apple.png"));
    }
}
