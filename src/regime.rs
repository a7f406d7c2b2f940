//! Charge regime classification.

use serde::{Deserialize, Serialize};

/// Electron-count regime of a charge region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeRegime {
    /// No electron in the dot.
    Electron0,
    /// One electron.
    Electron1,
    /// Two electrons.
    Electron2,
    /// Three electrons.
    Electron3,
    /// Four electrons or more.
    Electron4Plus,
    /// Regime not covered by any labeled region, or unrecognized label.
    Unknown,
}

impl ChargeRegime {
    /// Get all regime variants.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Electron0,
            Self::Electron1,
            Self::Electron2,
            Self::Electron3,
            Self::Electron4Plus,
            Self::Unknown,
        ]
    }

    /// Parse an annotation label into a regime.
    ///
    /// Total over all inputs: unrecognized labels map to [`Self::Unknown`]
    /// rather than failing, so new upstream label vocabularies degrade
    /// gracefully instead of aborting a load.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "0_electron" | "0_electrons" => Self::Electron0,
            "1_electron" | "1_electrons" => Self::Electron1,
            "2_electron" | "2_electrons" => Self::Electron2,
            "3_electron" | "3_electrons" => Self::Electron3,
            "4+_electron" | "4+_electrons" | "4_electron" | "4_electrons" => Self::Electron4Plus,
            _ => Self::Unknown,
        }
    }

    /// Number of electrons in this regime, if defined.
    ///
    /// [`Self::Electron4Plus`] reports its lower bound.
    #[must_use]
    pub fn electron_count(self) -> Option<u8> {
        match self {
            Self::Electron0 => Some(0),
            Self::Electron1 => Some(1),
            Self::Electron2 => Some(2),
            Self::Electron3 => Some(3),
            Self::Electron4Plus => Some(4),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for ChargeRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Electron0 => write!(f, "0_electron"),
            Self::Electron1 => write!(f, "1_electron"),
            Self::Electron2 => write!(f, "2_electron"),
            Self::Electron3 => write!(f, "3_electron"),
            Self::Electron4Plus => write!(f, "4+_electrons"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
