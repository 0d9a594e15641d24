use crate::core::config::MolinoConfig;
use crate::core::cosmology::Cosmology;
use crate::core::redshift::Redshift;
use crate::error::{MolinoError, Result};
use std::fs;
use std::path::PathBuf;

/// How many mock files of a cosmology are present on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadStatus {
    pub cosmology: Cosmology,
    pub dir: PathBuf,
    pub found: usize,
    pub expected: usize,
}

impl DownloadStatus {
    /// A download is complete only with exactly the expected file count;
    /// extra files mean the directory holds something else too.
    pub fn is_complete(&self) -> bool {
        self.found == self.expected
    }

    pub fn missing(&self) -> usize {
        self.expected.saturating_sub(self.found)
    }

    pub fn surplus(&self) -> usize {
        self.found.saturating_sub(self.expected)
    }
}

/// Count `*.hdf5` files under `<root>/z=<label>/<cosmology>`. A missing
/// directory counts as zero files.
pub fn check_download(
    config: &MolinoConfig,
    cosmology: Cosmology,
    redshift: Redshift,
) -> Result<DownloadStatus> {
    let dir = config.catalog_dir(redshift, cosmology)?;
    let found = if dir.is_dir() {
        let mut count = 0;
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "hdf5") {
                count += 1;
            }
        }
        count
    } else {
        0
    };

    let status = DownloadStatus {
        cosmology,
        dir,
        found,
        expected: cosmology.expected_mock_count(),
    };
    if !status.is_complete() {
        tracing::warn!(
            cosmology = %cosmology,
            missing = status.missing(),
            surplus = status.surplus(),
            "incomplete Molino download"
        );
    }
    Ok(status)
}

/// `check_download` that turns an incomplete download into an error.
pub fn require_download(
    config: &MolinoConfig,
    cosmology: Cosmology,
    redshift: Redshift,
) -> Result<DownloadStatus> {
    let status = check_download(config, cosmology, redshift)?;
    if status.is_complete() {
        Ok(status)
    } else {
        Err(MolinoError::NotFound {
            path: status.dir.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(found: usize) -> DownloadStatus {
        DownloadStatus {
            cosmology: Cosmology::OmP,
            dir: PathBuf::from("/mocks/z=0/Om_p"),
            found,
            expected: Cosmology::OmP.expected_mock_count(),
        }
    }

    #[test]
    fn test_exact_count_is_complete() {
        assert!(status(2500).is_complete());
        assert_eq!(status(2500).missing(), 0);
        assert_eq!(status(2500).surplus(), 0);
    }

    #[test]
    fn test_extra_files_are_incomplete() {
        let s = status(2503);
        assert!(!s.is_complete());
        assert_eq!(s.missing(), 0);
        assert_eq!(s.surplus(), 3);
    }

    #[test]
    fn test_missing_files() {
        let s = status(10);
        assert!(!s.is_complete());
        assert_eq!(s.missing(), 2490);
        assert_eq!(s.surplus(), 0);
    }
}
