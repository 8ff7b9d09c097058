//! Game logic for the street discovery game: picking a random intersection for the player to
//! find, scoring their guess, and tracking what they've found so far. All of the map rendering
//! and input plumbing lives in the host application; this crate is pure computation over a
//! [`map_model::StreetCatalog`].

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod intersections;
mod score;
mod session;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::Distance;
use map_model::ClassCategory;

pub use crate::intersections::{generate_candidate, CrossingPoint, IntersectionCandidate};
pub use crate::score::{score_guess, GuessResult};
pub use crate::session::Session;

// These constants define observable behavior -- what counts as "no intersection found" -- so
// don't tweak them casually.

/// How many shuffled primary streets one generation round will try before giving up.
pub const MAX_PRIMARY_TRIES: usize = 50;
/// How many neighbor streets get checked against each primary.
pub const MAX_NEIGHBORS_CHECKED: usize = 200;
/// Two streets passing within this are considered crossing during the initial broad scan.
pub const COARSE_CROSSING_DIST: Distance = Distance::const_meters(50.0);
/// Crossing points closer together than this collapse into one.
pub const CROSSING_DEDUPE_DIST: Distance = Distance::const_meters(20.0);
/// A crossing only becomes a valid answer if the two streets approach within this.
pub const ACCEPT_CROSSING_DIST: Distance = Distance::const_meters(5.0);

/// Which road-class combinations are acceptable at a crossing. Changing this mid-session only
/// affects the next generation round, not the current candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Difficulty {
    /// Both streets must be major at the crossing.
    MajorMajor,
    /// At least one street must be major at the crossing.
    MajorAny,
    /// Anything goes.
    AnyAny,
}

impl Difficulty {
    pub fn allows(self, category1: ClassCategory, category2: ClassCategory) -> bool {
        match self {
            Difficulty::MajorMajor => {
                category1 == ClassCategory::Major && category2 == ClassCategory::Major
            }
            Difficulty::MajorAny => {
                category1 == ClassCategory::Major || category2 == ClassCategory::Major
            }
            Difficulty::AnyAny => true,
        }
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(x: &str) -> Result<Difficulty> {
        match x {
            "major-major" => Ok(Difficulty::MajorMajor),
            "major-all" => Ok(Difficulty::MajorAny),
            "all-all" => Ok(Difficulty::AnyAny),
            _ => bail!("Unknown difficulty {}", x),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let x = match self {
            Difficulty::MajorMajor => "major-major",
            Difficulty::MajorAny => "major-all",
            Difficulty::AnyAny => "all-all",
        };
        write!(f, "{}", x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_gating() {
        use ClassCategory::{Local, Major};

        assert!(Difficulty::MajorMajor.allows(Major, Major));
        assert!(!Difficulty::MajorMajor.allows(Major, Local));
        assert!(Difficulty::MajorAny.allows(Major, Local));
        assert!(Difficulty::MajorAny.allows(Local, Major));
        assert!(!Difficulty::MajorAny.allows(Local, Local));
        assert!(Difficulty::AnyAny.allows(Local, Local));
    }

    #[test]
    fn difficulty_roundtrips() {
        for difficulty in [Difficulty::MajorMajor, Difficulty::MajorAny, Difficulty::AnyAny] {
            assert_eq!(
                difficulty,
                difficulty.to_string().parse::<Difficulty>().unwrap()
            );
        }
        assert!("expert".parse::<Difficulty>().is_err());
    }
}
