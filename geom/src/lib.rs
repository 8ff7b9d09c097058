//! The geometry kernel for the street discovery game. Everything operates on raw GPS coordinates;
//! planar math happens directly in lon/lat space (fine at city scale), and anything converted to
//! a real-world distance goes through the haversine formula.

#[macro_use]
extern crate anyhow;

mod distance;
mod gps;
mod line;
mod ring;

pub use crate::distance::Distance;
pub use crate::gps::LonLat;
pub use crate::line::{polyline_length, Line};
pub use crate::ring::Ring;

/// Reduce the precision of an f64. This helps ensure serialization is idempotent (everything is
/// exactly the same before and after saving/loading).
pub fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

pub(crate) fn serialize_f64<S: serde::Serializer>(x: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(trim_f64(*x))
}

pub(crate) fn deserialize_f64<'de, D: serde::Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    use serde::Deserialize;
    f64::deserialize(d)
}
