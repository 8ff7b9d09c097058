use serde::{Deserialize, Serialize};

use geom::{Distance, LonLat};

use crate::IntersectionCandidate;

/// How close a guess landed to the nearest valid crossing, and the points it earned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuessResult {
    pub dist: Distance,
    /// 1000 for a perfect hit, dropping a point per meter, bottoming out at 0 beyond a
    /// kilometer.
    pub score: u32,
    /// The crossing the guess was scored against.
    pub closest: LonLat,
}

/// Scores a click against the candidate's crossing locations. When the streets cross more than
/// once, the nearest location wins; the player isn't required to find a specific one.
pub fn score_guess(candidate: &IntersectionCandidate, guess: LonLat) -> GuessResult {
    let closest = candidate
        .locations
        .iter()
        .min_by_key(|loc| guess.gps_dist(loc.pt))
        .unwrap()
        .pt;
    let dist = guess.gps_dist(closest);
    let score = (1000.0 - dist.inner_meters()).floor().max(0.0) as u32;
    GuessResult {
        dist,
        score,
        closest,
    }
}

#[cfg(test)]
mod tests {
    use map_model::RoadClass;

    use crate::CrossingPoint;

    use super::*;

    fn candidate(locations: Vec<LonLat>) -> IntersectionCandidate {
        IntersectionCandidate {
            street1: "Main St".to_string(),
            street2: "1st Ave".to_string(),
            locations: locations
                .into_iter()
                .map(|pt| CrossingPoint {
                    pt,
                    approach_dist: Distance::ZERO,
                })
                .collect(),
            class1: RoadClass::Major,
            class2: RoadClass::Major,
        }
    }

    // How far north to move for the given real-world distance.
    fn lat_offset(meters: f64) -> f64 {
        meters / (6_371_000.0 * std::f64::consts::PI / 180.0)
    }

    #[test]
    fn perfect_hit() {
        let pt = LonLat::new(-122.33, 47.60);
        let result = score_guess(&candidate(vec![pt]), pt);
        assert_eq!(result.dist, Distance::ZERO);
        assert_eq!(result.score, 1000);
    }

    #[test]
    fn twelve_meters_off() {
        let pt = LonLat::new(-122.33, 47.60);
        let guess = LonLat::new(-122.33, 47.60 + lat_offset(12.0));
        let result = score_guess(&candidate(vec![pt]), guess);
        assert_eq!(result.dist, Distance::meters(12.0));
        assert_eq!(result.score, 988);
    }

    #[test]
    fn beyond_a_kilometer() {
        let pt = LonLat::new(-122.33, 47.60);
        let guess = LonLat::new(-122.33, 47.60 + lat_offset(5_000.0));
        let result = score_guess(&candidate(vec![pt]), guess);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn nearest_of_several_locations() {
        let near = LonLat::new(-122.33, 47.60);
        let far = LonLat::new(-122.33, 47.65);
        let guess = LonLat::new(-122.33, 47.60 + lat_offset(30.0));
        let result = score_guess(&candidate(vec![far, near]), guess);
        assert_eq!(result.closest, near);
        assert_eq!(result.score, 970);
    }
}
