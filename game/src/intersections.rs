use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use geom::{Distance, LonLat};
use map_model::{normalize_street_name, RoadClass, RoadFeature, StreetCatalog};

use crate::{
    Difficulty, ACCEPT_CROSSING_DIST, COARSE_CROSSING_DIST, CROSSING_DEDUPE_DIST,
    MAX_NEIGHBORS_CHECKED, MAX_PRIMARY_TRIES,
};

/// One physical location where two streets come within tolerance of each other.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrossingPoint {
    pub pt: LonLat,
    /// How close the two streets actually get here. Zero for a genuine geometric crossing.
    pub approach_dist: Distance,
}

/// The current round's target: a pair of street names and every place they cross. When the
/// streets cross more than once, any of the locations counts as a correct answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionCandidate {
    pub street1: String,
    pub street2: String,
    /// Never empty; pairwise separated by more than [`CROSSING_DEDUPE_DIST`].
    pub locations: Vec<CrossingPoint>,
    /// The classes of the two streets at the primary location.
    pub class1: RoadClass,
    pub class2: RoadClass,
}

impl IntersectionCandidate {
    /// The canonical display location: the crossing where the streets approach closest.
    pub fn primary(&self) -> &CrossingPoint {
        self.locations
            .iter()
            .min_by_key(|loc| loc.approach_dist)
            .unwrap()
    }

    /// The found-set key for this pair, in generation order.
    pub fn pair_key(&self) -> String {
        pair_key(&self.street1, &self.street2)
    }
}

pub(crate) fn pair_key(street1: &str, street2: &str) -> String {
    format!("{}|{}", street1, street2)
}

/// Every place two features pass within the coarse threshold, checking all segment pairs and
/// collapsing near-duplicate hits. This tolerates near-misses; an overpass 40m from an underpass
/// still "crosses" at this stage, and the refinement threshold downstream sorts it out.
fn all_crossings_between(feature1: &RoadFeature, feature2: &RoadFeature) -> Vec<CrossingPoint> {
    let mut crossings: Vec<CrossingPoint> = Vec::new();

    for segment1 in &feature1.segments {
        for segment2 in &feature2.segments {
            for line1 in segment1.lines() {
                for line2 in segment2.lines() {
                    let (pt1, pt2) = line1.closest_points(&line2);
                    let approach_dist = pt1.gps_dist(pt2);
                    if approach_dist > COARSE_CROSSING_DIST {
                        continue;
                    }

                    let pt = LonLat::new(
                        (pt1.longitude + pt2.longitude) / 2.0,
                        (pt1.latitude + pt2.latitude) / 2.0,
                    );
                    let duplicate = crossings
                        .iter()
                        .any(|existing| existing.pt.gps_dist(pt) < CROSSING_DEDUPE_DIST);
                    if !duplicate {
                        crossings.push(CrossingPoint { pt, approach_dist });
                    }
                }
            }
        }
    }

    crossings
}

/// Neighbors of the primary street with at least one crossing that survives refinement: the
/// streets must approach within the acceptance threshold there, and their classes at that
/// specific location must satisfy the difficulty.
fn find_intersecting_neighbors<'a, R: Rng>(
    catalog: &'a StreetCatalog,
    primary: &RoadFeature,
    difficulty: Difficulty,
    found_pairs: &BTreeSet<String>,
    rng: &mut R,
) -> Vec<(&'a RoadFeature, Vec<CrossingPoint>)> {
    // Normalized names catch directional aliases; "E Broadway" crossing "Broadway" isn't a real
    // intersection.
    let primary_normalized = normalize_street_name(&primary.name);

    let mut pool: Vec<&RoadFeature> = catalog
        .features()
        .filter(|other| normalize_street_name(&other.name) != primary_normalized)
        .filter(|other| {
            !found_pairs.contains(&pair_key(&primary.name, &other.name))
                && !found_pairs.contains(&pair_key(&other.name, &primary.name))
        })
        .collect();
    pool.shuffle(rng);
    pool.truncate(MAX_NEIGHBORS_CHECKED);

    let mut neighbors = Vec::new();
    for other in pool {
        let mut crossings = all_crossings_between(primary, other);
        crossings.retain(|crossing| {
            if crossing.approach_dist > ACCEPT_CROSSING_DIST {
                return false;
            }
            let class1 = catalog.classify_at(&primary.name, crossing.pt);
            let class2 = catalog.classify_at(&other.name, crossing.pt);
            difficulty.allows(class1.category(), class2.category())
        });
        if !crossings.is_empty() {
            neighbors.push((other, crossings));
        }
    }

    debug!(
        "{}: {} intersecting neighbors after refinement",
        primary.name,
        neighbors.len()
    );
    neighbors
}

/// Searches for a random street pair crossing somewhere in the area, subject to the difficulty.
///
/// The round is bounded: up to [`MAX_PRIMARY_TRIES`] shuffled primary streets, each probed
/// against up to [`MAX_NEIGHBORS_CHECKED`] neighbors. Exhausting the attempts returns None, which
/// the caller should present as "no more intersections available" -- it's a normal outcome, not
/// an error.
pub fn generate_candidate<R: Rng>(
    catalog: &StreetCatalog,
    difficulty: Difficulty,
    found_pairs: &BTreeSet<String>,
    rng: &mut R,
) -> Option<IntersectionCandidate> {
    if catalog.is_empty() {
        return None;
    }

    // For the harder difficulties, only streets with at least one major stretch can anchor a
    // valid crossing, so don't waste tries on the rest.
    let mut primaries: Vec<&RoadFeature> = match difficulty {
        Difficulty::MajorMajor | Difficulty::MajorAny => catalog
            .features()
            .filter(|feature| feature.has_major_segment())
            .collect(),
        Difficulty::AnyAny => catalog.features().collect(),
    };
    if primaries.is_empty() {
        info!("No suitable primary streets for difficulty {}", difficulty);
        return None;
    }

    primaries.shuffle(rng);
    primaries.truncate(MAX_PRIMARY_TRIES);

    for primary in primaries {
        let neighbors = find_intersecting_neighbors(catalog, primary, difficulty, found_pairs, rng);
        let (other, locations) = match neighbors.choose(rng) {
            Some(x) => x.clone(),
            None => {
                continue;
            }
        };

        // Report the classes at the actual crossing, not the overall feature classes.
        let primary_pt = locations
            .iter()
            .min_by_key(|loc| loc.approach_dist)
            .unwrap()
            .pt;
        let candidate = IntersectionCandidate {
            street1: primary.name.clone(),
            street2: other.name.clone(),
            class1: catalog.classify_at(&primary.name, primary_pt),
            class2: catalog.classify_at(&other.name, primary_pt),
            locations,
        };

        info!(
            "Selected intersection: {} & {} ({} location(s))",
            candidate.street1,
            candidate.street2,
            candidate.locations.len()
        );
        return Some(candidate);
    }

    info!(
        "No valid intersection found after trying {} primary streets",
        MAX_PRIMARY_TRIES
    );
    None
}
