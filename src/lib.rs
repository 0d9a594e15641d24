// src/lib.rs

pub mod core;
pub mod download;
pub mod error;
pub mod reader;

pub use crate::core::column::{Column, DatasetNeeds, UnknownColumnPolicy};
pub use crate::core::config::{MolinoConfig, DEFAULT_BOX_SIZE, MOLINO_DIR_ENV};
pub use crate::core::connectors::{Connector, Hdf5Connector, RawCatalog};
pub use crate::core::cosmology::Cosmology;
pub use crate::core::redshift::Redshift;
pub use crate::core::rsd::RsdAxis;
pub use crate::core::table::{CatalogTable, Catalogs, Realization};
pub use download::{check_download, require_download, DownloadStatus};
pub use error::{MolinoError, Result};
pub use reader::{read_catalog, CatalogRequest, GalaxyCatalog, Realizations};
