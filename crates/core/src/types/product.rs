//! Catalog product records.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::tag::{Category, Region, TagError, WaterColor};

/// Tag of the all-regions sentinel.
pub const ALL_REGIONS_TAG: &str = "all-regions";

/// Legacy spelling of the all-regions sentinel.
const LEGACY_ALL_REGIONS_TAG: &str = "tous";

/// Where a product can be delivered.
///
/// Serialized either as the `"all-regions"` sentinel or as a list of region
/// tags. A list containing the sentinel collapses to [`Availability::Everywhere`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAvailability", into = "RawAvailability")]
pub enum Availability {
    /// Available in every region.
    Everywhere,
    /// Available in the listed regions only.
    Regions(Vec<Region>),
}

impl Availability {
    /// Whether the product can be delivered to `region`.
    #[must_use]
    pub fn covers(&self, region: Region) -> bool {
        match self {
            Self::Everywhere => true,
            Self::Regions(regions) => regions.contains(&region),
        }
    }

    /// Whether this is the all-regions sentinel.
    #[must_use]
    pub const fn is_everywhere(&self) -> bool {
        matches!(self, Self::Everywhere)
    }

    /// Explicitly listed regions (empty for [`Availability::Everywhere`]).
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        match self {
            Self::Everywhere => &[],
            Self::Regions(regions) => regions,
        }
    }
}

#[derive(Deserialize, Serialize)]
#[serde(untagged)]
enum RawAvailability {
    Tag(String),
    List(Vec<String>),
}

fn is_all_regions(tag: &str) -> bool {
    let tag = tag.trim();
    tag.eq_ignore_ascii_case(ALL_REGIONS_TAG) || tag.eq_ignore_ascii_case(LEGACY_ALL_REGIONS_TAG)
}

impl TryFrom<RawAvailability> for Availability {
    type Error = TagError;

    fn try_from(raw: RawAvailability) -> Result<Self, Self::Error> {
        match raw {
            RawAvailability::Tag(tag) if is_all_regions(&tag) => Ok(Self::Everywhere),
            RawAvailability::Tag(tag) => Ok(Self::Regions(vec![tag.parse()?])),
            RawAvailability::List(tags) => {
                if tags.iter().any(|tag| is_all_regions(tag)) {
                    return Ok(Self::Everywhere);
                }
                let regions = tags
                    .iter()
                    .map(|tag| tag.parse())
                    .collect::<Result<Vec<Region>, _>>()?;
                Ok(Self::Regions(regions))
            }
        }
    }
}

impl From<Availability> for RawAvailability {
    fn from(availability: Availability) -> Self {
        match availability {
            Availability::Everywhere => Self::Tag(ALL_REGIONS_TAG.to_owned()),
            Availability::Regions(regions) => Self::List(
                regions
                    .into_iter()
                    .map(|region| region.as_str().to_owned())
                    .collect(),
            ),
        }
    }
}

/// An immutable catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identity key.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Product type.
    pub category: Category,
    /// Unit price.
    pub price: Price,
    /// Delivery regions.
    pub availability: Availability,
    /// Water-quality problem addressed.
    pub water_color: WaterColor,
    /// Short marketing description.
    pub description: String,
    /// Card icon (an emoji).
    pub icon: String,
    /// Price before discount, if discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Average customer rating, 0.0 to 5.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Number of customer reviews.
    #[serde(default)]
    pub review_count: u32,
    /// Feature bullet points.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Product {
    /// Highest accepted rating.
    pub const MAX_RATING: f32 = 5.0;

    /// Discount relative to `original_price`, in whole percent.
    ///
    /// `None` when there is no original price or it is not above the current
    /// price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u8> {
        let original = self.original_price?.amount();
        let current = self.price.amount();
        if original <= current {
            return None;
        }
        let off = (original - current).saturating_mul(100) / original;
        u8::try_from(off).ok()
    }
}
