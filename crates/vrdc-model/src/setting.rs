#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::enums::SettingFormat;
use crate::error::ModelError;

/// A Medicare claims benefit setting.
///
/// The set is closed: adding a setting means adding a variant here and a
/// block in the catalog data, and the catalog loader rejects data for any
/// name that does not parse into this enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BenefitSetting {
    Bcarrier,
    Dme,
    Inpatient,
    Outpatient,
    Snf,
    Hospice,
    Hha,
}

impl BenefitSetting {
    pub const ALL: [BenefitSetting; 7] = [
        BenefitSetting::Bcarrier,
        BenefitSetting::Dme,
        BenefitSetting::Inpatient,
        BenefitSetting::Outpatient,
        BenefitSetting::Snf,
        BenefitSetting::Hospice,
        BenefitSetting::Hha,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BenefitSetting::Bcarrier => "bcarrier",
            BenefitSetting::Dme => "dme",
            BenefitSetting::Inpatient => "inpatient",
            BenefitSetting::Outpatient => "outpatient",
            BenefitSetting::Snf => "snf",
            BenefitSetting::Hospice => "hospice",
            BenefitSetting::Hha => "hha",
        }
    }

    pub fn format(&self) -> SettingFormat {
        match self {
            BenefitSetting::Bcarrier | BenefitSetting::Dme => SettingFormat::NonInstitutional,
            BenefitSetting::Inpatient
            | BenefitSetting::Outpatient
            | BenefitSetting::Snf
            | BenefitSetting::Hospice
            | BenefitSetting::Hha => SettingFormat::Institutional,
        }
    }

    pub fn is_institutional(&self) -> bool {
        self.format().is_institutional()
    }

    /// Comma-separated list of every setting name, for error messages.
    pub fn available_names() -> String {
        BenefitSetting::ALL
            .iter()
            .map(BenefitSetting::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for BenefitSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BenefitSetting {
    type Err = ModelError;

    /// Exact, case-sensitive match against the lowercase setting names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BenefitSetting::ALL
            .iter()
            .copied()
            .find(|setting| setting.as_str() == s)
            .ok_or_else(|| ModelError::UnknownSetting {
                name: s.to_string(),
                available: BenefitSetting::available_names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_lowercase_names() {
        for setting in BenefitSetting::ALL {
            assert_eq!(setting.as_str().parse::<BenefitSetting>(), Ok(setting));
        }
    }

    #[test]
    fn rejects_other_case() {
        let err = "BCARRIER".parse::<BenefitSetting>().unwrap_err();
        assert!(matches!(err, ModelError::UnknownSetting { ref name, .. } if name == "BCARRIER"));
        assert!(err.to_string().contains("bcarrier, dme, inpatient"));
    }

    #[test]
    fn format_classification() {
        assert!(!BenefitSetting::Bcarrier.is_institutional());
        assert!(!BenefitSetting::Dme.is_institutional());
        assert!(BenefitSetting::Snf.is_institutional());
        assert!(BenefitSetting::Hha.is_institutional());
    }
}
