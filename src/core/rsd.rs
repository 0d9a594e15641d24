use crate::error::MolinoError;
use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Line-of-sight axis along which redshift-space distortions are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsdAxis {
    X,
    Y,
    Z,
}

impl RsdAxis {
    pub const ALL: [RsdAxis; 3] = [RsdAxis::X, RsdAxis::Y, RsdAxis::Z];

    pub fn index(&self) -> usize {
        match self {
            RsdAxis::X => 0,
            RsdAxis::Y => 1,
            RsdAxis::Z => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RsdAxis::X => "x",
            RsdAxis::Y => "y",
            RsdAxis::Z => "z",
        }
    }

    /// `None` disables RSD; anything else must name an axis.
    pub fn parse_optional(direction: Option<&str>) -> Result<Option<Self>, MolinoError> {
        direction.map(str::parse).transpose()
    }
}

impl fmt::Display for RsdAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RsdAxis {
    type Err = MolinoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(RsdAxis::X),
            "y" => Ok(RsdAxis::Y),
            "z" => Ok(RsdAxis::Z),
            other => Err(MolinoError::InvalidArgument(format!(
                "invalid RSD direction '{}'; expected one of 'x', 'y', 'z'",
                other
            ))),
        }
    }
}

/// Wrap a coordinate into `[0, box_size)`.
pub fn wrap_periodic(value: f64, box_size: f64) -> f64 {
    let wrapped = value.rem_euclid(box_size);
    // rem_euclid can round up to box_size for tiny negative inputs
    if wrapped >= box_size {
        0.0
    } else {
        wrapped
    }
}

/// Shift positions along `axis` by the matching component of `vel_offset`,
/// then wrap that axis back into the periodic box. Other axes are untouched.
pub fn apply_rsd(
    positions: &mut Array2<f64>,
    vel_offset: ArrayView2<'_, f64>,
    axis: RsdAxis,
    box_size: f64,
) {
    let offset = vel_offset.index_axis(Axis(1), axis.index());
    let mut coord = positions.index_axis_mut(Axis(1), axis.index());
    coord.zip_mut_with(&offset, |p, &dv| {
        *p = wrap_periodic(*p + dv, box_size);
    });
}
