use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed set of creature variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Species {
    Wolf,
    Bison,
    Boar,
    Bear,
    Walrus,
    Tiger,
    Crocodile,
    Behemoth,
}

impl Species {
    pub const ALL: [Species; 8] = [
        Species::Wolf,
        Species::Bison,
        Species::Boar,
        Species::Bear,
        Species::Walrus,
        Species::Tiger,
        Species::Crocodile,
        Species::Behemoth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Species::Wolf => "wolf",
            Species::Bison => "bison",
            Species::Boar => "boar",
            Species::Bear => "bear",
            Species::Walrus => "walrus",
            Species::Tiger => "tiger",
            Species::Crocodile => "crocodile",
            Species::Behemoth => "behemoth",
        }
    }

    /// Species that never pick a fight on sight.
    pub fn is_passive(self) -> bool {
        matches!(self, Species::Bison | Species::Walrus)
    }

    pub fn is_boss(self) -> bool {
        matches!(self, Species::Behemoth)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSpecies(pub String);

impl fmt::Display for UnknownSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown species: {}", self.0)
    }
}

impl std::error::Error for UnknownSpecies {}

impl FromStr for Species {
    type Err = UnknownSpecies;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Species::ALL
            .into_iter()
            .find(|sp| sp.name() == lower)
            .ok_or(UnknownSpecies(s.to_string()))
    }
}
