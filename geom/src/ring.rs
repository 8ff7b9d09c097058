use std::fmt;

use anyhow::Result;
use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::LonLat;

/// A closed polygon ring in GPS space, used for area boundaries. The first and last point are
/// equal. Holes aren't supported.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    // first equals last
    pts: Vec<LonLat>,
}

impl Ring {
    pub fn new(pts: Vec<LonLat>) -> Result<Ring> {
        if pts.len() < 4 {
            bail!("Can't make a ring with only {} points", pts.len());
        }
        if pts[0] != *pts.last().unwrap() {
            bail!("Can't make a ring with mismatching first/last points");
        }
        if pts.iter().any(|pt| !pt.is_valid()) {
            bail!("Can't make a ring with non-finite points");
        }
        Ok(Ring { pts })
    }

    pub fn must_new(pts: Vec<LonLat>) -> Ring {
        Ring::new(pts).unwrap()
    }

    pub fn points(&self) -> &Vec<LonLat> {
        &self.pts
    }

    /// True if the point is inside the ring, by even-odd ray casting.
    pub fn contains(&self, pt: LonLat) -> bool {
        let x = pt.longitude;
        let y = pt.latitude;
        let mut inside = false;

        let mut j = self.pts.len() - 1;
        for i in 0..self.pts.len() {
            let (xi, yi) = (self.pts[i].longitude, self.pts[i].latitude);
            let (xj, yj) = (self.pts[j].longitude, self.pts[j].latitude);

            if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
            j = i;
        }

        inside
    }

    /// Shoelace-formula area of the ring, in square degrees. Only useful for comparing rings
    /// against each other, not as a real-world area.
    pub fn area(&self) -> f64 {
        let mut area = 0.0;
        for pair in self.pts.windows(2) {
            let (x1, y1) = (pair[0].longitude, pair[0].latitude);
            let (x2, y2) = (pair[1].longitude, pair[1].latitude);
            area += x1 * y2 - x2 * y1;
        }
        (area / 2.0).abs()
    }

    /// The midpoint of the ring's bounding box.
    pub fn center(&self) -> LonLat {
        let mut min_lon = f64::MAX;
        let mut max_lon = f64::MIN;
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        for pt in &self.pts {
            min_lon = min_lon.min(pt.longitude);
            max_lon = max_lon.max(pt.longitude);
            min_lat = min_lat.min(pt.latitude);
            max_lat = max_lat.max(pt.latitude);
        }
        LonLat::new((min_lon + max_lon) / 2.0, (min_lat + max_lat) / 2.0)
    }

    /// When source data is a multipolygon, only the part with the greatest area is kept.
    pub fn pick_largest(rings: Vec<Ring>) -> Option<Ring> {
        // All points are finite by construction, so the area is too.
        rings
            .into_iter()
            .max_by_key(|ring| NotNan::new(ring.area()).unwrap())
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Ring::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  LonLat::new({}, {}),", pt.longitude, pt.latitude)?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn square(size: f64) -> Ring {
        Ring::must_new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(size, 0.0),
            LonLat::new(size, size),
            LonLat::new(0.0, size),
            LonLat::new(0.0, 0.0),
        ])
    }

    // Same even-odd rule, written as differently as possible: count crossings of a ray going
    // straight up from the query point.
    fn contains_reference(ring: &Ring, pt: LonLat) -> bool {
        let mut crossings = 0;
        for pair in ring.points().windows(2) {
            let (x1, y1) = (pair[0].longitude, pair[0].latitude);
            let (x2, y2) = (pair[1].longitude, pair[1].latitude);
            if (x1 <= pt.longitude) == (x2 <= pt.longitude) {
                continue;
            }
            let y_at = y1 + (pt.longitude - x1) / (x2 - x1) * (y2 - y1);
            if y_at > pt.latitude {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    #[test]
    fn contains_basic() {
        let ring = square(10.0);
        assert!(ring.contains(LonLat::new(5.0, 5.0)));
        assert!(!ring.contains(LonLat::new(15.0, 5.0)));
        assert!(!ring.contains(LonLat::new(-1.0, -1.0)));
    }

    #[test]
    fn contains_matches_reference() {
        // An L-shaped (concave) ring, so the ray test actually gets exercised.
        let ring = Ring::must_new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(10.0, 0.0),
            LonLat::new(10.0, 4.0),
            LonLat::new(4.0, 4.0),
            LonLat::new(4.0, 10.0),
            LonLat::new(0.0, 10.0),
            LonLat::new(0.0, 0.0),
        ]);

        let mut rng = XorShiftRng::seed_from_u64(42);
        for _ in 0..100 {
            let pt = LonLat::new(rng.gen_range(-2.0..12.0), rng.gen_range(-2.0..12.0));
            assert_eq!(
                ring.contains(pt),
                contains_reference(&ring, pt),
                "disagreement at {}",
                pt
            );
        }
    }

    #[test]
    fn area_square() {
        assert!((square(2.0).area() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn pick_largest_by_area() {
        // Areas 5, 100, 3.
        let rings = vec![
            Ring::must_new(vec![
                LonLat::new(0.0, 0.0),
                LonLat::new(5.0, 0.0),
                LonLat::new(5.0, 1.0),
                LonLat::new(0.0, 1.0),
                LonLat::new(0.0, 0.0),
            ]),
            square(10.0),
            Ring::must_new(vec![
                LonLat::new(0.0, 0.0),
                LonLat::new(3.0, 0.0),
                LonLat::new(3.0, 1.0),
                LonLat::new(0.0, 1.0),
                LonLat::new(0.0, 0.0),
            ]),
        ];
        let largest = Ring::pick_largest(rings).unwrap();
        assert!((largest.area() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn bad_rings() {
        assert!(Ring::new(vec![LonLat::new(0.0, 0.0); 3]).is_err());
        assert!(Ring::new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(1.0, 1.0),
            LonLat::new(0.5, 0.5),
        ])
        .is_err());
    }
}
