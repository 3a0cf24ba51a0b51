//! Slot extensions. One module per plugin; each registers itself.

pub mod gear;
pub mod heart_rate_zones;
pub mod personal_records;
pub mod route_map;
pub mod weekly_summary;
