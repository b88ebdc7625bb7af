//! Recommended items and their display metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of thing an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Clothing,
    Accessory,
    Essential,
    Footwear,
}

/// Symbol token rendered next to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemIcon {
    Sunglasses,
    Lotion,
    Cap,
    Shirt,
    Droplet,
    Coat,
    Trousers,
    Umbrella,
    ClosedUmbrella,
    Boot,
}

impl ItemIcon {
    /// Emoji used by text and SVG renderers
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Sunglasses => "🕶️",
            Self::Lotion => "🧴",
            Self::Cap => "🧢",
            Self::Shirt => "👕",
            Self::Droplet => "💧",
            Self::Coat => "🧥",
            Self::Trousers => "👖",
            Self::Umbrella => "☔",
            Self::ClosedUmbrella => "🌂",
            Self::Boot => "👢",
        }
    }
}

/// Every item the advisory rules can recommend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Sunglasses,
    Sunscreen,
    CapOrHat,
    LightShirt,
    WaterBottle,
    Hat,
    TShirt,
    Water,
    Jacket,
    Pants,
    Umbrella,
    /// Recommended for moderate rain; shares the "Umbrella" name
    CompactUmbrella,
    RainBoots,
    Raincoat,
    LightJacket,
}

impl ItemKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sunglasses => "Sunglasses",
            Self::Sunscreen => "Sunscreen",
            Self::CapOrHat => "Cap/Hat",
            Self::LightShirt => "Light shirt",
            Self::WaterBottle => "Water bottle",
            Self::Hat => "Hat",
            Self::TShirt => "T-shirt",
            Self::Water => "Water",
            Self::Jacket => "Jacket",
            Self::Pants => "Pants",
            Self::Umbrella | Self::CompactUmbrella => "Umbrella",
            Self::RainBoots => "Rain boots",
            Self::Raincoat => "Raincoat",
            Self::LightJacket => "Light jacket",
        }
    }

    #[must_use]
    pub fn icon(&self) -> ItemIcon {
        match self {
            Self::Sunglasses => ItemIcon::Sunglasses,
            Self::Sunscreen => ItemIcon::Lotion,
            Self::CapOrHat | Self::Hat => ItemIcon::Cap,
            Self::LightShirt | Self::TShirt => ItemIcon::Shirt,
            Self::WaterBottle | Self::Water => ItemIcon::Droplet,
            Self::Jacket | Self::Raincoat | Self::LightJacket => ItemIcon::Coat,
            Self::Pants => ItemIcon::Trousers,
            Self::Umbrella => ItemIcon::Umbrella,
            Self::CompactUmbrella => ItemIcon::ClosedUmbrella,
            Self::RainBoots => ItemIcon::Boot,
        }
    }

    #[must_use]
    pub fn category(&self) -> ItemCategory {
        match self {
            Self::Sunglasses | Self::CapOrHat | Self::Hat => ItemCategory::Accessory,
            Self::Sunscreen
            | Self::WaterBottle
            | Self::Water
            | Self::Umbrella
            | Self::CompactUmbrella => ItemCategory::Essential,
            Self::LightShirt
            | Self::TShirt
            | Self::Jacket
            | Self::Pants
            | Self::Raincoat
            | Self::LightJacket => ItemCategory::Clothing,
            Self::RainBoots => ItemCategory::Footwear,
        }
    }
}

/// A recommended item. Two items are the same item when their names match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryItem {
    pub icon: ItemIcon,
    pub name: String,
    pub category: ItemCategory,
}

impl From<ItemKind> for AdvisoryItem {
    fn from(kind: ItemKind) -> Self {
        Self {
            icon: kind.icon(),
            name: kind.name().to_string(),
            category: kind.category(),
        }
    }
}

impl fmt::Display for AdvisoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon.symbol(), self.name)
    }
}
