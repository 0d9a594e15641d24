pub mod column;
pub mod config;
pub mod connectors;
pub mod cosmology;
pub mod redshift;
pub mod rsd;
pub mod table;
