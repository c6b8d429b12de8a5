//! Shop catalog enumerations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemRarity {
    Common,
    Rare,
    Epic,
}

/// Cosmetic slot an item is drawn in. Purely descriptive: equipping does
/// not enforce one item per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Hat,
    Accessory,
    Outfit,
    Background,
}

impl ItemRarity {
    pub const ALL: [ItemRarity; 3] = [ItemRarity::Common, ItemRarity::Rare, ItemRarity::Epic];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemRarity::Common => "common",
            ItemRarity::Rare => "rare",
            ItemRarity::Epic => "epic",
        }
    }
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [
        ItemType::Hat,
        ItemType::Accessory,
        ItemType::Outfit,
        ItemType::Background,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Hat => "hat",
            ItemType::Accessory => "accessory",
            ItemType::Outfit => "outfit",
            ItemType::Background => "background",
        }
    }
}

macro_rules! impl_str_enum {
    ($ty:ident, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| CoreError::Validation(format!("Invalid {} '{s}'", $label)))
            }
        }

        impl TryFrom<String> for $ty {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

impl_str_enum!(ItemRarity, "item rarity");
impl_str_enum!(ItemType, "item type");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_parse() {
        assert_eq!("epic".parse::<ItemRarity>().unwrap(), ItemRarity::Epic);
        assert!("legendary".parse::<ItemRarity>().is_err());
    }

    #[test]
    fn test_item_type_parse() {
        for ty in ItemType::ALL {
            assert_eq!(ItemType::try_from(ty.to_string()).unwrap(), ty);
        }
        assert!("shoes".parse::<ItemType>().is_err());
    }
}
