//! Closed tag sets used to classify catalog products.
//!
//! Each tag has a canonical kebab-case spelling used for serialization and
//! display. Parsing also accepts the French tags of the legacy storefront
//! (`osmoseur`, `blanc`, ...) so saved carts and filter URLs keep working.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a known tag.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} tag: {value}")]
pub struct TagError {
    /// Which tag set was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl TagError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Reverse-osmosis system.
    #[serde(alias = "osmoseur")]
    OsmosisSystem,
    /// Standalone filter.
    #[serde(alias = "filtre")]
    Filter,
    /// Replacement cartridge or membrane.
    #[serde(alias = "cartouche")]
    Cartridge,
    /// Tap, cleaning kit and other accessories.
    #[serde(alias = "accessoire")]
    Accessory,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 4] = [
        Self::OsmosisSystem,
        Self::Filter,
        Self::Cartridge,
        Self::Accessory,
    ];

    /// Canonical tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OsmosisSystem => "osmosis-system",
            Self::Filter => "filter",
            Self::Cartridge => "cartridge",
            Self::Accessory => "accessory",
        }
    }

    /// Customer-facing label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OsmosisSystem => "Osmoseur",
            Self::Filter => "Filtre",
            Self::Cartridge => "Cartouche",
            Self::Accessory => "Accessoire",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "osmosis-system" | "osmoseur" => Ok(Self::OsmosisSystem),
            "filter" | "filtre" => Ok(Self::Filter),
            "cartridge" | "cartouche" => Ok(Self::Cartridge),
            "accessory" | "accessoire" => Ok(Self::Accessory),
            _ => Err(TagError::new("category", s)),
        }
    }
}

/// Which water-quality problem a product addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaterColor {
    /// Visually clear source water.
    #[serde(alias = "blanc")]
    Clear,
    /// Turbid, yellow or brown source water.
    #[serde(alias = "couleur")]
    Colored,
}

impl WaterColor {
    /// Both classes.
    pub const ALL: [Self; 2] = [Self::Clear, Self::Colored];

    /// Canonical tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Colored => "colored",
        }
    }

    /// Customer-facing label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Eau Claire/Blanche",
            Self::Colored => "Eau Colorée/Trouble",
        }
    }
}

impl fmt::Display for WaterColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaterColor {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clear" | "blanc" => Ok(Self::Clear),
            "colored" | "couleur" => Ok(Self::Colored),
            _ => Err(TagError::new("water color", s)),
        }
    }
}

/// Delivery region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Casablanca,
    Rabat,
    Marrakech,
    Fes,
    Tanger,
    Agadir,
}

impl Region {
    /// Every served region.
    pub const ALL: [Self; 6] = [
        Self::Casablanca,
        Self::Rabat,
        Self::Marrakech,
        Self::Fes,
        Self::Tanger,
        Self::Agadir,
    ];

    /// Canonical tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Casablanca => "casablanca",
            Self::Rabat => "rabat",
            Self::Marrakech => "marrakech",
            Self::Fes => "fes",
            Self::Tanger => "tanger",
            Self::Agadir => "agadir",
        }
    }

    /// City name, capitalized.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Casablanca => "Casablanca",
            Self::Rabat => "Rabat",
            Self::Marrakech => "Marrakech",
            Self::Fes => "Fes",
            Self::Tanger => "Tanger",
            Self::Agadir => "Agadir",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|region| region.as_str() == lower)
            .ok_or_else(|| TagError::new("region", s))
    }
}
