use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four belief dimensions tracked for every skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// How relevant the skill is to the user's target roles.
    Relevance,
    /// Whether the user enjoys using the skill.
    Passion,
    /// Whether the skill is part of how the user presents themselves.
    Identity,
    /// How strongly requirements that name this skill are meant.
    Requirement,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Relevance,
        Dimension::Passion,
        Dimension::Identity,
        Dimension::Requirement,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Passion => "passion",
            Self::Identity => "identity",
            Self::Requirement => "requirement",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(Self::Relevance),
            "passion" => Ok(Self::Passion),
            "identity" => Ok(Self::Identity),
            "requirement" => Ok(Self::Requirement),
            other => Err(format!("unknown dimension: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for dim in Dimension::ALL {
            assert_eq!(dim.as_str().parse::<Dimension>().unwrap(), dim);
        }
        assert!("salary".parse::<Dimension>().is_err());
    }
}
