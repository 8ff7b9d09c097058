use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use geom::{polyline_length, Distance, LonLat};

use crate::{normalize_street_name, Boundary, RawRoad, RoadClass, RoadFeature, RoadSegment};

/// All named roads in the loaded play area, grouped by name. Built once per area load, immutable
/// afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreetCatalog {
    roads: BTreeMap<String, RoadFeature>,
}

impl StreetCatalog {
    /// Groups raw ways by name, classifying and measuring each one. With a boundary, ways are
    /// kept only if at least one sample point falls inside; without one, everything is kept.
    ///
    /// The build is deterministic: identical input records yield an identical catalog.
    pub fn build(raw_roads: Vec<RawRoad>, boundary: Option<&Boundary>) -> StreetCatalog {
        let mut segments_per_name: BTreeMap<String, Vec<RoadSegment>> = BTreeMap::new();
        let mut total_ways = 0;
        let mut rejected_by_boundary = 0;

        for road in raw_roads {
            let class = RoadClass::from_highway(&road.highway);
            for pts in road.geometry.into_lines() {
                let pts: Vec<LonLat> = pts.into_iter().filter(|pt| pt.is_valid()).collect();
                if pts.len() < 2 {
                    continue;
                }
                total_ways += 1;

                if let Some(boundary) = boundary {
                    if !samples_inside(&pts, boundary) {
                        rejected_by_boundary += 1;
                        continue;
                    }
                }

                let length = polyline_length(&pts);
                if length <= Distance::ZERO {
                    continue;
                }

                segments_per_name
                    .entry(road.name.clone())
                    .or_insert_with(Vec::new)
                    .push(RoadSegment { pts, class, length });
            }
        }

        let roads: BTreeMap<String, RoadFeature> = segments_per_name
            .into_iter()
            .map(|(name, segments)| {
                // Highest priority sorts first.
                let class = segments.iter().map(|s| s.class).min().unwrap();
                let length = segments.iter().map(|s| s.length).sum();
                (
                    name.clone(),
                    RoadFeature {
                        name,
                        segments,
                        class,
                        length,
                    },
                )
            })
            .collect();

        info!(
            "Built catalog: {} streets from {} ways ({} rejected by boundary)",
            roads.len(),
            total_ways,
            rejected_by_boundary
        );
        let mut distribution: BTreeMap<RoadClass, usize> = BTreeMap::new();
        for feature in roads.values() {
            *distribution.entry(feature.class).or_insert(0) += 1;
        }
        for (class, count) in distribution {
            debug!("  {}: {} streets", class, count);
        }

        StreetCatalog { roads }
    }

    pub fn get(&self, name: &str) -> Option<&RoadFeature> {
        self.roads.get(name)
    }

    pub fn features(&self) -> impl Iterator<Item = &RoadFeature> {
        self.roads.values()
    }

    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub fn total_length(&self) -> Distance {
        self.roads.values().map(|feature| feature.length).sum()
    }

    /// The road's class at one specific location: the class of whichever of its segments passes
    /// closest. Unknown streets fail soft to `Residential`.
    pub fn classify_at(&self, name: &str, pt: LonLat) -> RoadClass {
        match self.roads.get(name) {
            Some(feature) => feature
                .segments
                .iter()
                .min_by_key(|segment| segment.dist_to(pt))
                .map(|segment| segment.class)
                .unwrap_or(RoadClass::Residential),
            None => RoadClass::Residential,
        }
    }

    /// Matches free-text input to road features: exact case-insensitive name equality first, then
    /// normalized-name equality, so "5th" finds "5th Avenue". No match is an empty list, not an
    /// error.
    pub fn resolve(&self, input: &str) -> Vec<&RoadFeature> {
        let input_lower = input.to_lowercase();
        let exact: Vec<&RoadFeature> = self
            .roads
            .values()
            .filter(|feature| feature.name.to_lowercase() == input_lower)
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        let input_normalized = normalize_street_name(input);
        self.roads
            .values()
            .filter(|feature| normalize_street_name(&feature.name) == input_normalized)
            .collect()
    }
}

/// True if any of the way's sample points (first, last, roughly four interior) is inside the
/// boundary.
fn samples_inside(pts: &[LonLat], boundary: &Boundary) -> bool {
    let step = (pts.len() / 5).max(1);
    pts.iter()
        .step_by(step)
        .chain(pts.last())
        .any(|pt| boundary.contains(*pt))
}
