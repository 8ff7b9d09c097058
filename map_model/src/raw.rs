//! Raw road records, the input contract for building a [`crate::StreetCatalog`]. Storing this
//! intermediate structure keeps the catalog build independent of where the data came from; the
//! host can feed it an Overpass API response, a fixture, or anything else shaped like one.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::{LonLat, Ring};

/// One or more point chains making up a road's geometry. Source data distinguishes LineString
/// from MultiLineString; everything downstream works on the multi form, so normalize here and
/// never branch on shape again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Polyline {
    Single(Vec<LonLat>),
    Multi(Vec<Vec<LonLat>>),
}

impl Polyline {
    pub fn into_lines(self) -> Vec<Vec<LonLat>> {
        match self {
            Polyline::Single(pts) => vec![pts],
            Polyline::Multi(lines) => lines,
        }
    }
}

/// One named way from the source data, not yet filtered or classified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawRoad {
    pub name: String,
    pub geometry: Polyline,
    /// The source road-type label, like OSM's highway tag.
    pub highway: String,
}

#[derive(Deserialize)]
struct OsmResponse {
    #[serde(default)]
    elements: Vec<OsmElement>,
}

#[derive(Deserialize)]
struct OsmElement {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(default)]
    geometry: Vec<OsmNode>,
}

#[derive(Deserialize)]
struct OsmNode {
    lon: f64,
    lat: f64,
}

/// Extracts raw roads from an Overpass-style JSON response. Keeps named ways with at least two
/// finite coordinates; everything else, including non-way elements, is silently dropped.
pub fn extract_osm_roads(payload: &str) -> Result<Vec<RawRoad>> {
    let response: OsmResponse = serde_json::from_str(payload)?;

    let mut roads = Vec::new();
    for element in response.elements {
        if element.kind != "way" {
            continue;
        }
        let name = match element.tags.get("name") {
            Some(x) => x.to_string(),
            None => {
                continue;
            }
        };
        let pts: Vec<LonLat> = element
            .geometry
            .into_iter()
            .map(|node| LonLat::new(node.lon, node.lat))
            .filter(|pt| pt.is_valid())
            .collect();
        if pts.len() < 2 {
            continue;
        }
        let highway = element
            .tags
            .get("highway")
            .cloned()
            .unwrap_or_else(String::new);
        roads.push(RawRoad {
            name,
            geometry: Polyline::Single(pts),
            highway,
        });
    }
    info!("Extracted {} named ways from the source payload", roads.len());
    Ok(roads)
}

/// The playable area: a single outer ring. Multipolygon sources collapse to their largest part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    ring: Ring,
}

impl Boundary {
    pub fn new(ring: Ring) -> Boundary {
        Boundary { ring }
    }

    /// Parses a GeoJSON Polygon or MultiPolygon, keeping only the largest outer ring. Geocoders
    /// sometimes return a multipolygon where one part is a degenerate sliver; skip those parts
    /// and keep the largest valid one. Only when nothing valid remains is it an error, and the
    /// caller should fall back to building the catalog without a boundary.
    pub fn from_geojson(geometry: &geojson::Geometry) -> Result<Boundary> {
        let rings = match &geometry.value {
            geojson::Value::Polygon(rings) => vec![parse_outer_ring(rings)?],
            geojson::Value::MultiPolygon(polygons) => {
                let mut result = Vec::new();
                for rings in polygons {
                    match parse_outer_ring(rings) {
                        Ok(ring) => result.push(ring),
                        Err(err) => {
                            warn!("Skipping a degenerate boundary part: {}", err);
                        }
                    }
                }
                result
            }
            x => bail!("Unsupported boundary geometry: {:?}", x),
        };

        let ring =
            Ring::pick_largest(rings).ok_or_else(|| anyhow!("Boundary has no valid rings"))?;
        if ring
            .points()
            .iter()
            .all(|pt| pt.longitude.abs() <= 0.001 && pt.latitude.abs() <= 0.001)
        {
            bail!("Boundary coordinates are all zero-ish");
        }
        Ok(Boundary { ring })
    }

    pub fn contains(&self, pt: LonLat) -> bool {
        self.ring.contains(pt)
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn center(&self) -> LonLat {
        self.ring.center()
    }
}

fn parse_outer_ring(rings: &[Vec<Vec<f64>>]) -> Result<Ring> {
    // Inner rings are holes; not supported, so just ignore them.
    let outer = rings
        .first()
        .ok_or_else(|| anyhow!("Polygon has no rings"))?;
    let pts: Vec<LonLat> = outer
        .iter()
        .map(|pair| {
            if pair.len() < 2 {
                bail!("Malformed coordinate {:?}", pair);
            }
            Ok(LonLat::new(pair[0], pair[1]))
        })
        .collect::<Result<Vec<_>>>()?;
    Ring::new(pts)
}
