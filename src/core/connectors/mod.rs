pub mod hdf5_connector;

pub use hdf5_connector::Hdf5Connector;

use crate::core::column::{DatasetNeeds, Source};
use crate::error::{MolinoError, Result};
use ndarray::{Array1, Array2};
use std::path::Path;

/// Arrays loaded from one mock file. Optional fields are only populated
/// when the request's `DatasetNeeds` asked for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCatalog {
    pub pos: Array2<f64>,
    pub vel: Option<Array2<f64>>,
    pub halo_pos: Option<Array2<f64>>,
    pub halo_vel: Option<Array2<f64>>,
    pub gal_type: Option<Array1<f64>>,
    pub m_halo: Option<Array1<f64>>,
    pub r_halo: Option<Array1<f64>>,
    pub vel_offset: Option<Array2<f64>>,
}

impl RawCatalog {
    pub fn num_rows(&self) -> usize {
        self.pos.nrows()
    }

    pub fn vector(&self, source: Source) -> Option<&Array2<f64>> {
        match source {
            Source::Pos => Some(&self.pos),
            Source::Vel => self.vel.as_ref(),
            Source::HaloPos => self.halo_pos.as_ref(),
            Source::HaloVel => self.halo_vel.as_ref(),
            _ => None,
        }
    }

    pub fn scalar(&self, source: Source) -> Option<&Array1<f64>> {
        match source {
            Source::GalType => self.gal_type.as_ref(),
            Source::MHalo => self.m_halo.as_ref(),
            Source::RHalo => self.r_halo.as_ref(),
            _ => None,
        }
    }

    /// Every loaded array must be N x 3 (vectors) or N (scalars) with the
    /// same N as `pos`.
    pub fn check_shapes(&self) -> Result<()> {
        let n = self.num_rows();
        let vectors = [
            ("pos", Some(&self.pos)),
            ("vel", self.vel.as_ref()),
            ("halo_pos", self.halo_pos.as_ref()),
            ("halo_vel", self.halo_vel.as_ref()),
            ("vel_offset", self.vel_offset.as_ref()),
        ];
        for (name, arr) in vectors {
            if let Some(arr) = arr {
                if arr.dim() != (n, 3) {
                    return Err(MolinoError::Format(format!(
                        "dataset '{}' has shape {:?}, expected ({}, 3)",
                        name,
                        arr.dim(),
                        n
                    )));
                }
            }
        }
        let scalars = [
            ("gal_type", self.gal_type.as_ref()),
            ("m_halo", self.m_halo.as_ref()),
            ("r_halo", self.r_halo.as_ref()),
        ];
        for (name, arr) in scalars {
            if let Some(arr) = arr {
                if arr.len() != n {
                    return Err(MolinoError::Format(format!(
                        "dataset '{}' has {} rows, expected {}",
                        name,
                        arr.len(),
                        n
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Storage backend a `GalaxyCatalog` reads mock files through.
pub trait Connector: Send + Sync {
    /// Unique name of the connector (e.g., "hdf5")
    fn name(&self) -> &str;

    /// Check if this connector can handle the given path
    fn can_handle(&self, path: &Path) -> bool;

    /// Load the datasets selected by `needs` from the file at `path`.
    /// A missing file is `MolinoError::NotFound`.
    fn read_fields(&self, path: &Path, needs: &DatasetNeeds) -> Result<RawCatalog>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn test_check_shapes() {
        let mut raw = RawCatalog {
            pos: Array2::zeros((4, 3)),
            m_halo: Some(Array1::zeros(4)),
            ..Default::default()
        };
        assert!(raw.check_shapes().is_ok());

        raw.vel = Some(Array2::zeros((4, 2)));
        assert!(matches!(raw.check_shapes(), Err(MolinoError::Format(_))));

        raw.vel = None;
        raw.r_halo = Some(array![1.0, 2.0]);
        let err = raw.check_shapes().unwrap_err();
        assert!(err.to_string().contains("r_halo"));
    }

    #[test]
    fn test_accessors() {
        let raw = RawCatalog {
            pos: Array2::zeros((2, 3)),
            gal_type: Some(array![0.0, 1.0]),
            ..Default::default()
        };
        assert!(raw.vector(Source::Pos).is_some());
        assert!(raw.vector(Source::Vel).is_none());
        assert!(raw.vector(Source::GalType).is_none());
        assert_eq!(raw.scalar(Source::GalType).unwrap()[1], 1.0);
    }
}
