use std::fmt;

use serde::{Deserialize, Serialize};

/// Functional classification of a road, from the source data's highway tag. The variants are
/// ordered by priority; `Major` sorts first.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub enum RoadClass {
    Major,
    Primary,
    Secondary,
    Tertiary,
    Residential,
}

impl RoadClass {
    /// Maps an OSM-style highway tag to a class. Unrecognized tags fail soft to `Residential`.
    pub fn from_highway(highway: &str) -> RoadClass {
        match highway {
            "motorway" | "trunk" => RoadClass::Major,
            "primary" => RoadClass::Primary,
            "secondary" => RoadClass::Secondary,
            "tertiary" => RoadClass::Tertiary,
            _ => RoadClass::Residential,
        }
    }

    pub fn category(self) -> ClassCategory {
        if self == RoadClass::Residential {
            ClassCategory::Local
        } else {
            ClassCategory::Major
        }
    }
}

impl fmt::Display for RoadClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let x = match self {
            RoadClass::Major => "major",
            RoadClass::Primary => "primary",
            RoadClass::Secondary => "secondary",
            RoadClass::Tertiary => "tertiary",
            RoadClass::Residential => "residential",
        };
        write!(f, "{}", x)
    }
}

/// The coarse view of [`RoadClass`] used for difficulty gating: everything down through tertiary
/// counts as major, residential and unknown count as local.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ClassCategory {
    Major,
    Local,
}
