//! Character classes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The class a character belongs to. Restricts which skills it may cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RpgClass {
    #[default]
    Knight,
    Mage,
    Cleric,
}

impl RpgClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Knight => "Knight",
            Self::Mage => "Mage",
            Self::Cleric => "Cleric",
        }
    }
}

impl fmt::Display for RpgClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RpgClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "knight" => Ok(Self::Knight),
            "mage" => Ok(Self::Mage),
            "cleric" => Ok(Self::Cleric),
            other => Err(DomainError::parse(format!("Unknown class: {}", other))),
        }
    }
}
