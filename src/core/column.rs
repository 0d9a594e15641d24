use crate::error::{MolinoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HDF5 dataset a column is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Pos,
    Vel,
    HaloPos,
    HaloVel,
    GalType,
    MHalo,
    RHalo,
}

impl Source {
    pub fn dataset_name(&self) -> &'static str {
        match self {
            Source::Pos => "pos",
            Source::Vel => "vel",
            Source::HaloPos => "halo_pos",
            Source::HaloVel => "halo_vel",
            Source::GalType => "gal_type",
            Source::MHalo => "m_halo",
            Source::RHalo => "r_halo",
        }
    }

    /// True for the N x 3 datasets.
    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            Source::Pos | Source::Vel | Source::HaloPos | Source::HaloVel
        )
    }
}

/// Galaxy property that can be requested from a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    X,
    Y,
    Z,
    Vx,
    Vy,
    Vz,
    GalType,
    XHalo,
    YHalo,
    ZHalo,
    VxHalo,
    VyHalo,
    VzHalo,
    MHalo,
    RHalo,
}

/// Where a column lives: dataset plus the axis for N x 3 datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub source: Source,
    pub axis: Option<usize>,
}

static DESCRIPTORS: [(Column, &str, ColumnDescriptor); 15] = [
    (Column::X, "x", vector(Source::Pos, 0)),
    (Column::Y, "y", vector(Source::Pos, 1)),
    (Column::Z, "z", vector(Source::Pos, 2)),
    (Column::Vx, "vx", vector(Source::Vel, 0)),
    (Column::Vy, "vy", vector(Source::Vel, 1)),
    (Column::Vz, "vz", vector(Source::Vel, 2)),
    (Column::GalType, "gal_type", scalar(Source::GalType)),
    (Column::XHalo, "x_halo", vector(Source::HaloPos, 0)),
    (Column::YHalo, "y_halo", vector(Source::HaloPos, 1)),
    (Column::ZHalo, "z_halo", vector(Source::HaloPos, 2)),
    (Column::VxHalo, "vx_halo", vector(Source::HaloVel, 0)),
    (Column::VyHalo, "vy_halo", vector(Source::HaloVel, 1)),
    (Column::VzHalo, "vz_halo", vector(Source::HaloVel, 2)),
    (Column::MHalo, "m_halo", scalar(Source::MHalo)),
    (Column::RHalo, "r_halo", scalar(Source::RHalo)),
];

const fn vector(source: Source, axis: usize) -> ColumnDescriptor {
    ColumnDescriptor {
        source,
        axis: Some(axis),
    }
}

const fn scalar(source: Source) -> ColumnDescriptor {
    ColumnDescriptor { source, axis: None }
}

impl Column {
    pub fn all() -> impl Iterator<Item = Column> {
        DESCRIPTORS.iter().map(|(c, _, _)| *c)
    }

    pub fn name(&self) -> &'static str {
        self.entry().1
    }

    pub fn descriptor(&self) -> ColumnDescriptor {
        self.entry().2
    }

    fn entry(&self) -> &'static (Column, &'static str, ColumnDescriptor) {
        // Every variant has exactly one row in DESCRIPTORS.
        &DESCRIPTORS[*self as usize]
    }

    pub fn vocabulary() -> Vec<&'static str> {
        DESCRIPTORS.iter().map(|(_, name, _)| *name).collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = MolinoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        DESCRIPTORS
            .iter()
            .find(|(_, name, _)| *name == s)
            .map(|(c, _, _)| *c)
            .ok_or_else(|| {
                MolinoError::InvalidArgument(format!(
                    "unknown column '{}'; available columns: {}",
                    s,
                    Column::vocabulary().join(", ")
                ))
            })
    }
}

/// What to do with requested column names outside the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownColumnPolicy {
    #[default]
    Reject,
    Warn,
    Ignore,
}

impl UnknownColumnPolicy {
    /// Parse requested names in order, applying the policy to unknown ones.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Column>> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            match name.parse::<Column>() {
                Ok(col) => columns.push(col),
                Err(e) => match self {
                    UnknownColumnPolicy::Reject => return Err(e),
                    UnknownColumnPolicy::Warn => {
                        tracing::warn!(column = name, "dropping unrecognized column");
                    }
                    UnknownColumnPolicy::Ignore => {}
                },
            }
        }
        Ok(columns)
    }
}

/// Which optional datasets a set of columns requires.
///
/// `pos` is always read, so it has no flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DatasetNeeds {
    pub vel: bool,
    pub halo_pos: bool,
    pub halo_vel: bool,
    pub gal_type: bool,
    pub m_halo: bool,
    pub r_halo: bool,
    pub vel_offset: bool,
}

impl DatasetNeeds {
    pub fn from_columns(columns: &[Column], rsd: bool) -> Self {
        let mut needs = DatasetNeeds {
            vel_offset: rsd,
            ..Default::default()
        };
        for col in columns {
            match col.descriptor().source {
                Source::Pos => {}
                Source::Vel => needs.vel = true,
                Source::HaloPos => needs.halo_pos = true,
                Source::HaloVel => needs.halo_vel = true,
                Source::GalType => needs.gal_type = true,
                Source::MHalo => needs.m_halo = true,
                Source::RHalo => needs.r_halo = true,
            }
        }
        needs
    }

    pub fn needs(&self, source: Source) -> bool {
        match source {
            Source::Pos => true,
            Source::Vel => self.vel,
            Source::HaloPos => self.halo_pos,
            Source::HaloVel => self.halo_vel,
            Source::GalType => self.gal_type,
            Source::MHalo => self.m_halo,
            Source::RHalo => self.r_halo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_matches_variants() {
        for (i, col) in Column::all().enumerate() {
            assert_eq!(col as usize, i);
            assert_eq!(col.name().parse::<Column>().unwrap(), col);
        }
        assert_eq!(Column::vocabulary().len(), 15);
    }

    #[test]
    fn test_descriptors() {
        assert_eq!(Column::Y.descriptor(), vector(Source::Pos, 1));
        assert_eq!(Column::VzHalo.descriptor(), vector(Source::HaloVel, 2));
        assert_eq!(Column::MHalo.descriptor(), scalar(Source::MHalo));
        assert!(Column::XHalo.descriptor().source.is_vector());
        assert!(!Column::GalType.descriptor().source.is_vector());
    }

    #[test]
    fn test_policy_reject() {
        let err = UnknownColumnPolicy::Reject
            .resolve(&["x", "mass", "z"])
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("mass"));
    }

    #[test]
    fn test_policy_drop_keeps_order() {
        for policy in [UnknownColumnPolicy::Warn, UnknownColumnPolicy::Ignore] {
            let cols = policy.resolve(&["z", "mass", "vx", "x"]).unwrap();
            assert_eq!(cols, vec![Column::Z, Column::Vx, Column::X]);
        }
    }

    #[test]
    fn test_needs_from_columns() {
        let needs = DatasetNeeds::from_columns(&[Column::X, Column::Y, Column::Z], false);
        assert_eq!(needs, DatasetNeeds::default());
        assert!(needs.needs(Source::Pos));

        let needs = DatasetNeeds::from_columns(&[Column::Vx, Column::MHalo, Column::YHalo], true);
        assert!(needs.vel && needs.m_halo && needs.halo_pos && needs.vel_offset);
        assert!(!needs.halo_vel && !needs.gal_type && !needs.r_halo);
    }
}
