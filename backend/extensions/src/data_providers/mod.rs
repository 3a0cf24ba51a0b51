//! Data-source providers: where activities come from.

pub mod gpx_import;
pub mod strava;
