use crate::core::column::UnknownColumnPolicy;
use crate::core::cosmology::Cosmology;
use crate::core::redshift::Redshift;
use crate::error::{MolinoError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MOLINO_DIR_ENV: &str = "MOLINO_DIR";
pub const DEFAULT_CONFIG_FILE: &str = "molino.toml";

/// Side length of the Quijote simulation box in Mpc/h.
pub const DEFAULT_BOX_SIZE: f64 = 1000.0;

/// Where the mocks live and how requests against them are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MolinoConfig {
    pub root_dir: Option<PathBuf>,
    pub box_size: f64,
    pub unknown_columns: UnknownColumnPolicy,
}

impl Default for MolinoConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            box_size: DEFAULT_BOX_SIZE,
            unknown_columns: UnknownColumnPolicy::default(),
        }
    }
}

impl MolinoConfig {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: Some(root_dir.into()),
            ..Default::default()
        }
    }

    /// Defaults with the root taken from `MOLINO_DIR`. A missing variable
    /// is only a warning; reads fail later with a config error.
    pub fn from_env() -> Self {
        Self {
            root_dir: root_from_env(),
            ..Default::default()
        }
    }

    /// Parse a TOML config file. `MOLINO_DIR` fills in an absent `root_dir`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config: MolinoConfig = toml::from_str(&content).map_err(|e| {
            MolinoError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        if config.root_dir.is_none() {
            config.root_dir = root_from_env();
        }
        config.validate()?;
        Ok(config)
    }

    /// Use `molino.toml` from the working directory if present, otherwise
    /// fall back to `from_env`.
    pub fn load_or_default() -> Self {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            match Self::load(DEFAULT_CONFIG_FILE) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(
                    "Failed to load {}: {}. Using defaults.",
                    DEFAULT_CONFIG_FILE,
                    e
                ),
            }
        }
        Self::from_env()
    }

    pub fn with_box_size(mut self, box_size: f64) -> Result<Self> {
        self.box_size = box_size;
        self.validate()?;
        Ok(self)
    }

    pub fn with_unknown_columns(mut self, policy: UnknownColumnPolicy) -> Self {
        self.unknown_columns = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.box_size.is_finite() || self.box_size <= 0.0 {
            return Err(MolinoError::Config(format!(
                "box_size must be a positive finite length, got {}",
                self.box_size
            )));
        }
        Ok(())
    }

    pub fn root(&self) -> Result<&Path> {
        self.root_dir.as_deref().ok_or_else(|| {
            MolinoError::Config(format!(
                "no catalog root directory configured; set {}",
                MOLINO_DIR_ENV
            ))
        })
    }

    /// `<root>/z=<label>/<cosmology>`
    pub fn catalog_dir(&self, redshift: Redshift, cosmology: Cosmology) -> Result<PathBuf> {
        Ok(self
            .root()?
            .join(format!("z={}", redshift.label()))
            .join(cosmology.tag()))
    }

    /// `<root>/z=<label>/<cosmo>/molino.z<label>.<cosmo>.nbody<i>.hod<j>.hdf5`
    pub fn catalog_path(
        &self,
        redshift: Redshift,
        cosmology: Cosmology,
        nbody: u32,
        hod: u32,
    ) -> Result<PathBuf> {
        Ok(self
            .catalog_dir(redshift, cosmology)?
            .join(catalog_file_name(redshift, cosmology, nbody, hod)))
    }
}

pub fn catalog_file_name(redshift: Redshift, cosmology: Cosmology, nbody: u32, hod: u32) -> String {
    format!(
        "molino.z{}.{}.nbody{}.hod{}.hdf5",
        redshift.label(),
        cosmology.tag(),
        nbody,
        hod
    )
}

fn root_from_env() -> Option<PathBuf> {
    match std::env::var_os(MOLINO_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => {
            tracing::warn!(
                "please set environment variable `{}` to the directory holding the Molino mocks",
                MOLINO_DIR_ENV
            );
            None
        }
    }
}
