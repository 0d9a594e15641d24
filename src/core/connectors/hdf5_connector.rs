use crate::core::column::{DatasetNeeds, Source};
use crate::core::connectors::{Connector, RawCatalog};
use crate::error::{MolinoError, Result};
use hdf5::{Dataset, File};
use ndarray::{Array1, Array2};
use std::path::Path;

pub struct Hdf5Connector;

impl Connector for Hdf5Connector {
    fn name(&self) -> &str {
        "hdf5"
    }

    fn can_handle(&self, path: &Path) -> bool {
        matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("h5") | Some("hdf5")
        )
    }

    fn read_fields(&self, path: &Path, needs: &DatasetNeeds) -> Result<RawCatalog> {
        if !path.is_file() {
            return Err(MolinoError::NotFound {
                path: path.to_path_buf(),
            });
        }
        // Handle is dropped on every return path below.
        let file = File::open(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "failed to open catalog");
            MolinoError::NotFound {
                path: path.to_path_buf(),
            }
        })?;

        Ok(RawCatalog {
            pos: self.read_vector(&file, Source::Pos.dataset_name())?,
            vel: self.read_vector_if(&file, Source::Vel, needs)?,
            halo_pos: self.read_vector_if(&file, Source::HaloPos, needs)?,
            halo_vel: self.read_vector_if(&file, Source::HaloVel, needs)?,
            gal_type: self.read_scalar_if(&file, Source::GalType, needs)?,
            m_halo: self.read_scalar_if(&file, Source::MHalo, needs)?,
            r_halo: self.read_scalar_if(&file, Source::RHalo, needs)?,
            vel_offset: needs
                .vel_offset
                .then(|| self.read_vector(&file, "vel_offset"))
                .transpose()?,
        })
    }
}

impl Hdf5Connector {
    fn dataset(&self, file: &File, name: &str) -> Result<Dataset> {
        file.dataset(name).map_err(|e| {
            MolinoError::Format(format!(
                "missing dataset '{}' in {}: {}",
                name,
                file.filename(),
                e
            ))
        })
    }

    fn read_vector(&self, file: &File, name: &str) -> Result<Array2<f64>> {
        let ds = self.dataset(file, name)?;
        if ds.ndim() != 2 {
            return Err(MolinoError::Format(format!(
                "dataset '{}' has shape {:?}, expected (N, 3)",
                name,
                ds.shape()
            )));
        }
        match ds.read_2d::<f64>() {
            Ok(arr) => Ok(arr),
            // Integer-typed datasets are cast rather than rejected
            Err(_) => Ok(ds.read_2d::<i64>()?.mapv(|v| v as f64)),
        }
    }

    fn read_scalar(&self, file: &File, name: &str) -> Result<Array1<f64>> {
        let ds = self.dataset(file, name)?;
        if ds.ndim() != 1 {
            return Err(MolinoError::Format(format!(
                "dataset '{}' has shape {:?}, expected (N,)",
                name,
                ds.shape()
            )));
        }
        match ds.read_1d::<f64>() {
            Ok(arr) => Ok(arr),
            Err(_) => Ok(ds.read_1d::<i64>()?.mapv(|v| v as f64)),
        }
    }

    fn read_vector_if(
        &self,
        file: &File,
        source: Source,
        needs: &DatasetNeeds,
    ) -> Result<Option<Array2<f64>>> {
        needs
            .needs(source)
            .then(|| self.read_vector(file, source.dataset_name()))
            .transpose()
    }

    fn read_scalar_if(
        &self,
        file: &File,
        source: Source,
        needs: &DatasetNeeds,
    ) -> Result<Option<Array1<f64>>> {
        needs
            .needs(source)
            .then(|| self.read_scalar(file, source.dataset_name()))
            .transpose()
    }
}
