use serde::{Deserialize, Serialize};

use geom::{Distance, Line, LonLat};

use crate::RoadClass;

/// A contiguous stretch of a named road sharing one classification, from one source way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    /// Always at least two points.
    pub pts: Vec<LonLat>,
    pub class: RoadClass,
    pub length: Distance,
}

impl RoadSegment {
    /// The consecutive point pairs making up this segment.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.pts.windows(2).map(|pair| Line::new(pair[0], pair[1]))
    }

    /// Real-world distance from a point to the nearest spot on this segment.
    pub fn dist_to(&self, pt: LonLat) -> Distance {
        self.lines()
            .map(|line| line.dist_to(pt))
            .min()
            .unwrap_or(Distance::ZERO)
    }
}

/// All of the ways sharing one name inside the play area. A feature may have several segments,
/// disconnected or differently classified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadFeature {
    pub name: String,
    /// Always at least one segment.
    pub segments: Vec<RoadSegment>,
    /// The highest-priority class among the segments.
    pub class: RoadClass,
    pub length: Distance,
}

impl RoadFeature {
    /// True if any stretch of this road counts as major for difficulty purposes.
    pub fn has_major_segment(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.class.category() == crate::ClassCategory::Major)
    }
}
