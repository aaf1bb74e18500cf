use std::{fmt, str::FromStr};

use crate::error::SerialError;

/// Engine releases, oldest first.
///
/// Ordering is meaningful: layouts compare against it to include or drop fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FormatVersion {
    Test,
    Mik,
    Dave,
    Matt,
    AoEBeta,
    AoE,
    RoR,
    AoKE3,
    AoKAlpha,
    AoKBeta,
    AoK,
    TC,
    /// HD edition
    Cysion,
    SWGB,
    CC,
    De1,
    #[default]
    De2,
}

static NAMES: &[(FormatVersion, &str)] = &[
    (FormatVersion::Test, "test"),
    (FormatVersion::Mik, "mik"),
    (FormatVersion::Dave, "dave"),
    (FormatVersion::Matt, "matt"),
    (FormatVersion::AoEBeta, "aoeb"),
    (FormatVersion::AoE, "aoe"),
    (FormatVersion::RoR, "ror"),
    (FormatVersion::AoKE3, "aoke3"),
    (FormatVersion::AoKAlpha, "aoka"),
    (FormatVersion::AoKBeta, "aokb"),
    (FormatVersion::AoK, "aok"),
    (FormatVersion::TC, "tc"),
    (FormatVersion::Cysion, "hd"),
    (FormatVersion::SWGB, "swgb"),
    (FormatVersion::CC, "cc"),
    (FormatVersion::De1, "de1"),
    (FormatVersion::De2, "de2"),
];

impl FormatVersion {
    pub const LATEST: FormatVersion = FormatVersion::De2;

    pub fn name(&self) -> &'static str {
        NAMES
            .iter()
            .find(|(version, _)| version == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown")
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatVersion {
    type Err = SerialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();

        NAMES
            .iter()
            .find(|(_, name)| *name == lower)
            .map(|(version, _)| *version)
            .ok_or(SerialError::UnknownVersion { name: s.to_string() })
    }
}
