use crate::error::MolinoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cosmology (or HOD parameter) variation a mock catalog was generated at.
///
/// `_p`/`_m` suffixes are the plus/minus steps around the fiducial value
/// used for finite-difference derivatives. `Mnu` has three positive steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cosmology {
    OmP,
    Ob2P,
    HP,
    NsP,
    S8P,
    OmM,
    Ob2M,
    HM,
    NsM,
    S8M,
    MnuP,
    MnuPp,
    MnuPpp,
    LogMminM,
    LogMminP,
    SigmaLogMM,
    SigmaLogMP,
    LogM0M,
    LogM0P,
    AlphaM,
    AlphaP,
    LogM1M,
    LogM1P,
    FiducialZa,
    Fiducial,
}

impl Cosmology {
    pub const ALL: [Cosmology; 25] = [
        Cosmology::OmP,
        Cosmology::Ob2P,
        Cosmology::HP,
        Cosmology::NsP,
        Cosmology::S8P,
        Cosmology::OmM,
        Cosmology::Ob2M,
        Cosmology::HM,
        Cosmology::NsM,
        Cosmology::S8M,
        Cosmology::MnuP,
        Cosmology::MnuPp,
        Cosmology::MnuPpp,
        Cosmology::LogMminM,
        Cosmology::LogMminP,
        Cosmology::SigmaLogMM,
        Cosmology::SigmaLogMP,
        Cosmology::LogM0M,
        Cosmology::LogM0P,
        Cosmology::AlphaM,
        Cosmology::AlphaP,
        Cosmology::LogM1M,
        Cosmology::LogM1P,
        Cosmology::FiducialZa,
        Cosmology::Fiducial,
    ];

    /// Tag used in directory and file names.
    pub fn tag(&self) -> &'static str {
        match self {
            Cosmology::OmP => "Om_p",
            Cosmology::Ob2P => "Ob2_p",
            Cosmology::HP => "h_p",
            Cosmology::NsP => "ns_p",
            Cosmology::S8P => "s8_p",
            Cosmology::OmM => "Om_m",
            Cosmology::Ob2M => "Ob2_m",
            Cosmology::HM => "h_m",
            Cosmology::NsM => "ns_m",
            Cosmology::S8M => "s8_m",
            Cosmology::MnuP => "Mnu_p",
            Cosmology::MnuPp => "Mnu_pp",
            Cosmology::MnuPpp => "Mnu_ppp",
            Cosmology::LogMminM => "logMmin_m",
            Cosmology::LogMminP => "logMmin_p",
            Cosmology::SigmaLogMM => "sigma_logM_m",
            Cosmology::SigmaLogMP => "sigma_logM_p",
            Cosmology::LogM0M => "logM0_m",
            Cosmology::LogM0P => "logM0_p",
            Cosmology::AlphaM => "alpha_m",
            Cosmology::AlphaP => "alpha_p",
            Cosmology::LogM1M => "logM1_m",
            Cosmology::LogM1P => "logM1_p",
            Cosmology::FiducialZa => "fiducial_ZA",
            Cosmology::Fiducial => "fiducial",
        }
    }

    pub fn all_tags() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.tag()).collect()
    }

    /// Number of mock files a complete download holds for this cosmology.
    pub fn expected_mock_count(&self) -> usize {
        match self {
            Cosmology::Fiducial => 150_000,
            _ => 2_500,
        }
    }
}

impl fmt::Display for Cosmology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Cosmology {
    type Err = MolinoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.tag() == s)
            .ok_or_else(|| {
                MolinoError::InvalidArgument(format!(
                    "unknown cosmology '{}'; please choose among one of the following cosmologies: {}",
                    s,
                    Self::all_tags().join(", ")
                ))
            })
    }
}
