//! The street catalog for one loaded play area: raw road records grouped into named features,
//! each way classified by its source highway tag, with tolerant name matching on top.
//!
//! Nothing here does I/O. The host fetches Overpass-style road data and a boundary polygon
//! however it likes, hands the payloads to `raw`, and builds a [`StreetCatalog`] from the result.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod catalog;
mod classification;
mod normalize;
pub mod raw;
mod road;

pub use crate::catalog::StreetCatalog;
pub use crate::classification::{ClassCategory, RoadClass};
pub use crate::normalize::normalize_street_name;
pub use crate::raw::{Boundary, Polyline, RawRoad};
pub use crate::road::{RoadFeature, RoadSegment};
