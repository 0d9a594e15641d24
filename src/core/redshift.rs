use crate::error::MolinoError;
use std::fmt;

/// Snapshot redshift of a catalog. Only z = 0 mocks are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Redshift {
    #[default]
    Zero,
}

impl Redshift {
    /// Label used in directory and file names.
    pub fn label(&self) -> &'static str {
        match self {
            Redshift::Zero => "0",
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Redshift::Zero => 0.0,
        }
    }
}

impl TryFrom<f64> for Redshift {
    type Error = MolinoError;

    fn try_from(z: f64) -> Result<Self, Self::Error> {
        if z == 0.0 {
            Ok(Redshift::Zero)
        } else {
            let known = match redshift_label(z) {
                Some(_) => " (not yet available)",
                None => "",
            };
            Err(MolinoError::InvalidArgument(format!(
                "unsupported redshift z={}{}; only z=0 is currently supported",
                z, known
            )))
        }
    }
}

impl fmt::Display for Redshift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "z={}", self.label())
    }
}

/// Directory label for every snapshot the suite is laid out for.
pub fn redshift_label(z: f64) -> Option<&'static str> {
    if z == 0.0 {
        Some("0")
    } else if z == 0.5 {
        Some("0.5")
    } else if z == 1.0 {
        Some("1")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_zero_supported() {
        assert_eq!(Redshift::try_from(0.0).unwrap(), Redshift::Zero);
        assert_eq!(Redshift::try_from(-0.0).unwrap(), Redshift::Zero);
        for z in [0.5, 1.0, 2.0, f64::NAN] {
            let err = Redshift::try_from(z).unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_error_names_redshift() {
        let msg = Redshift::try_from(0.5).unwrap_err().to_string();
        assert!(msg.contains("z=0.5"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(redshift_label(0.0), Some("0"));
        assert_eq!(redshift_label(0.5), Some("0.5"));
        assert_eq!(redshift_label(1.0), Some("1"));
        assert_eq!(redshift_label(3.0), None);
        assert_eq!(Redshift::Zero.label(), "0");
        assert_eq!(Redshift::Zero.to_string(), "z=0");
    }
}
