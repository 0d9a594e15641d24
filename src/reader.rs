//! Entry point for reading Molino galaxy catalogs.
//!
//! A read validates everything it can up front (cosmology, redshift, RSD
//! axis, column names) and only then touches the file system, once per
//! (nbody, hod) pair.

use crate::core::column::{Column, DatasetNeeds};
use crate::core::config::MolinoConfig;
use crate::core::connectors::{Connector, Hdf5Connector, RawCatalog};
use crate::core::cosmology::Cosmology;
use crate::core::redshift::Redshift;
use crate::core::rsd::{apply_rsd, RsdAxis};
use crate::core::table::{CatalogTable, Catalogs, Realization};
use crate::error::{MolinoError, Result};
use ndarray::{Array2, ArrayView1, Axis};
use std::ops::{Range, RangeInclusive};

/// One realization index or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Realizations(Vec<u32>);

impl Realizations {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Realizations {
    fn default() -> Self {
        Realizations(vec![1])
    }
}

impl From<u32> for Realizations {
    fn from(i: u32) -> Self {
        Realizations(vec![i])
    }
}

impl From<Vec<u32>> for Realizations {
    fn from(v: Vec<u32>) -> Self {
        Realizations(v)
    }
}

impl From<&[u32]> for Realizations {
    fn from(v: &[u32]) -> Self {
        Realizations(v.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for Realizations {
    fn from(v: [u32; N]) -> Self {
        Realizations(v.to_vec())
    }
}

impl From<Range<u32>> for Realizations {
    fn from(r: Range<u32>) -> Self {
        Realizations(r.collect())
    }
}

impl From<RangeInclusive<u32>> for Realizations {
    fn from(r: RangeInclusive<u32>) -> Self {
        Realizations(r.collect())
    }
}

/// A logical catalog request, kept as the caller wrote it. Nothing is
/// checked until `GalaxyCatalog::read`.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRequest {
    pub cosmology: String,
    pub nbody: Realizations,
    pub hod: Realizations,
    pub redshift: f64,
    pub rsd: Option<String>,
    pub columns: Vec<String>,
}

impl CatalogRequest {
    /// Defaults: nbody 1, hod 1, z = 0, no RSD, columns x, y, z.
    pub fn new(cosmology: impl Into<String>) -> Self {
        Self {
            cosmology: cosmology.into(),
            nbody: Realizations::default(),
            hod: Realizations::default(),
            redshift: 0.0,
            rsd: None,
            columns: vec!["x".to_string(), "y".to_string(), "z".to_string()],
        }
    }

    pub fn nbody(mut self, nbody: impl Into<Realizations>) -> Self {
        self.nbody = nbody.into();
        self
    }

    pub fn hod(mut self, hod: impl Into<Realizations>) -> Self {
        self.hod = hod.into();
        self
    }

    pub fn redshift(mut self, z: f64) -> Self {
        self.redshift = z;
        self
    }

    pub fn rsd(mut self, direction: impl Into<String>) -> Self {
        self.rsd = Some(direction.into());
        self
    }

    pub fn no_rsd(mut self) -> Self {
        self.rsd = None;
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// A request after validation; every field is typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub cosmology: Cosmology,
    pub nbody: Vec<u32>,
    pub hod: Vec<u32>,
    pub redshift: Redshift,
    pub rsd: Option<RsdAxis>,
    pub columns: Vec<Column>,
    pub needs: DatasetNeeds,
}

impl ResolvedRequest {
    /// (nbody, hod) pairs, nbody outer.
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.nbody
            .iter()
            .flat_map(move |&i| self.hod.iter().map(move |&j| (i, j)))
    }
}

/// Reads Molino mocks from the directory tree described by a `MolinoConfig`.
pub struct GalaxyCatalog {
    config: MolinoConfig,
    connector: Box<dyn Connector>,
}

impl GalaxyCatalog {
    pub fn new(config: MolinoConfig) -> Result<Self> {
        Self::with_connector(config, Box::new(Hdf5Connector))
    }

    pub fn with_connector(config: MolinoConfig, connector: Box<dyn Connector>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, connector })
    }

    pub fn config(&self) -> &MolinoConfig {
        &self.config
    }

    pub fn connector_name(&self) -> &str {
        self.connector.name()
    }

    /// Check every scalar argument and the column list without any I/O.
    pub fn resolve(&self, request: &CatalogRequest) -> Result<ResolvedRequest> {
        let cosmology: Cosmology = request.cosmology.parse()?;
        let redshift = Redshift::try_from(request.redshift)?;
        let rsd = RsdAxis::parse_optional(request.rsd.as_deref())?;
        let columns = self.config.unknown_columns.resolve(&request.columns)?;
        let needs = DatasetNeeds::from_columns(&columns, rsd.is_some());

        Ok(ResolvedRequest {
            cosmology,
            nbody: request.nbody.as_slice().to_vec(),
            hod: request.hod.as_slice().to_vec(),
            redshift,
            rsd,
            columns,
            needs,
        })
    }

    /// Read one table per (nbody, hod) pair. The first failing file aborts
    /// the whole read.
    pub fn read(&self, request: &CatalogRequest) -> Result<Catalogs> {
        let resolved = self.resolve(request)?;
        // Surface a missing root before the loop rather than per pair.
        self.config.root()?;

        let mut tables = Vec::with_capacity(resolved.nbody.len() * resolved.hod.len());
        for (nbody, hod) in resolved.pairs() {
            tables.push(self.read_one(&resolved, nbody, hod)?);
        }
        Ok(Catalogs::from_tables(tables))
    }

    /// Read the single catalog at (`nbody`, `hod`) for an already resolved request.
    pub fn read_one(&self, resolved: &ResolvedRequest, nbody: u32, hod: u32) -> Result<CatalogTable> {
        let path = self
            .config
            .catalog_path(resolved.redshift, resolved.cosmology, nbody, hod)?;
        tracing::debug!(path = %path.display(), "reading catalog");

        if !self.connector.can_handle(&path) {
            return Err(MolinoError::Config(format!(
                "connector '{}' cannot read {}",
                self.connector.name(),
                path.display()
            )));
        }
        let mut raw = self.connector.read_fields(&path, &resolved.needs)?;
        raw.check_shapes()?;

        if let Some(axis) = resolved.rsd {
            let offset = raw.vel_offset.take().ok_or_else(|| {
                MolinoError::Format(format!("{} has no 'vel_offset' dataset", path.display()))
            })?;
            tracing::debug!(axis = %axis, "applying redshift-space distortion");
            apply_rsd(&mut raw.pos, offset.view(), axis, self.config.box_size);
        }

        let data = assemble(&raw, &resolved.columns)?;
        Ok(CatalogTable::new(
            Realization {
                cosmology: resolved.cosmology,
                nbody,
                hod,
            },
            resolved.columns.clone(),
            data,
        ))
    }
}

/// Lay out the requested columns side by side, in request order.
fn assemble(raw: &RawCatalog, columns: &[Column]) -> Result<Array2<f64>> {
    let n = raw.num_rows();
    let mut data = Array2::<f64>::zeros((n, columns.len()));
    for (j, col) in columns.iter().enumerate() {
        let source = column_view(raw, *col)?;
        data.index_axis_mut(Axis(1), j).assign(&source);
    }
    Ok(data)
}

fn column_view(raw: &RawCatalog, column: Column) -> Result<ArrayView1<'_, f64>> {
    let desc = column.descriptor();
    let missing = || {
        MolinoError::Format(format!(
            "dataset '{}' for column '{}' was not loaded",
            desc.source.dataset_name(),
            column
        ))
    };
    if desc.source.is_vector() {
        let axis = desc.axis.ok_or_else(missing)?;
        raw.vector(desc.source)
            .map(|arr| arr.index_axis(Axis(1), axis))
            .ok_or_else(missing)
    } else {
        raw.scalar(desc.source).map(|arr| arr.view()).ok_or_else(missing)
    }
}

/// Read Molino catalogs in one call.
///
/// `rsd` is `None` for real-space positions or one of `"x"`, `"y"`, `"z"`.
/// Returns a single table when exactly one (nbody, hod) pair is requested.
pub fn read_catalog(
    config: &MolinoConfig,
    cosmology: &str,
    nbody: impl Into<Realizations>,
    hod: impl Into<Realizations>,
    redshift: f64,
    rsd: Option<&str>,
    columns: &[&str],
) -> Result<Catalogs> {
    let mut request = CatalogRequest::new(cosmology)
        .nbody(nbody)
        .hod(hod)
        .redshift(redshift)
        .columns(columns.iter().copied());
    if let Some(direction) = rsd {
        request = request.rsd(direction);
    }
    GalaxyCatalog::new(config.clone())?.read(&request)
}
