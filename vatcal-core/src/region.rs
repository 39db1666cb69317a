//! VATSIM event regions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VatcalError;

/// A partition of the upstream event feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "all")]
    All,
    #[default]
    #[serde(rename = "EMEA")]
    Emea,
}

impl Region {
    /// Every region, in the order they are offered to users.
    pub const ALL: [Region; 2] = [Region::Emea, Region::All];

    /// Identifier used in query strings and preferences.
    pub fn id(&self) -> &'static str {
        match self {
            Region::All => "all",
            Region::Emea => "EMEA",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::All => "All Regions",
            Region::Emea => "Europe, Middle East & Africa",
        }
    }

    /// Path of this region's feed, relative to the upstream API base.
    pub fn feed_path(&self) -> &'static str {
        match self {
            Region::All => "events/latest",
            Region::Emea => "events/view/region/EMEA",
        }
    }

    /// Parse a user-supplied value, falling back to `default` when it is
    /// missing or not one of the known regions.
    pub fn parse_or(value: Option<&str>, default: Region) -> Region {
        value.and_then(|v| v.parse().ok()).unwrap_or(default)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Region {
    type Err = VatcalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.id() == s)
            .ok_or_else(|| VatcalError::Config(format!("Unknown region '{}'", s)))
    }
}
