//! hashicon-io: Filesystem side of identicon generation.
//!
//! Wraps the pure `hashicon-pipeline` crate with the one piece of I/O it
//! needs: writing encoded images next to each other in an output
//! directory, named after the input they were derived from.

pub mod persist;

use std::path::{Path, PathBuf};

use hashicon_pipeline::{IdenticonConfig, IdenticonError};

pub use persist::{OutputFormat, PersistError, output_path, save, save_as};

/// Errors from [`create`].
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    /// Generating the image failed.
    #[error(transparent)]
    Identicon(#[from] IdenticonError),

    /// Writing the image failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Generate the identicon for `input` and write it to `dir/<input>.png`.
///
/// Returns the path written. Running twice with the same input and
/// configuration leaves a byte-identical file in place.
///
/// # Errors
///
/// Returns [`CreateError::Persist`] if `input` cannot be used as a file
/// name or the write fails, and [`CreateError::Identicon`] if the
/// pipeline rejects `config`.
pub fn create(input: &str, dir: &Path, config: &IdenticonConfig) -> Result<PathBuf, CreateError> {
    // Reject unusable names before spending time on the pipeline.
    output_path(dir, input, OutputFormat::Png)?;

    let png = hashicon_pipeline::generate(input, config)?;
    let path = save(&png, input, dir)?;
    log::info!("created {} for {input:?}", path.display());
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hashicon_pipeline::{Background, HashAlgorithm};

    use super::*;

    #[test_log::test]
    fn create_writes_decodable_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = create("apple", dir.path(), &IdenticonConfig::default()).unwrap();
        assert_eq!(path, dir.path().join("apple.png"));

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(
            bytes,
            hashicon_pipeline::generate("apple", &IdenticonConfig::default()).unwrap()
        );
    }

    #[test_log::test]
    fn create_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = IdenticonConfig::default();
        let first = std::fs::read(create("ball", dir.path(), &config).unwrap()).unwrap();
        let second = std::fs::read(create("ball", dir.path(), &config).unwrap()).unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test_log::test]
    fn create_respects_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = IdenticonConfig {
            hash_algorithm: HashAlgorithm::SipHash13 { k0: 1, k1: 2 },
            background: Background::Transparent,
            cell_size: 10,
        };
        let path = create("apple", dir.path(), &config).unwrap();
        assert_eq!(
            std::fs::read(path).unwrap(),
            hashicon_pipeline::generate("apple", &config).unwrap()
        );
    }

    #[test_log::test]
    fn invalid_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = IdenticonConfig {
            cell_size: 0,
            ..IdenticonConfig::default()
        };
        let err = create("apple", dir.path(), &config).unwrap_err();
        assert!(matches!(
            err,
            CreateError::Identicon(IdenticonError::InvalidConfig(_))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test_log::test]
    fn unsafe_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = create("../apple", dir.path(), &IdenticonConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            CreateError::Persist(PersistError::InvalidName { .. })
        ));
    }
}
