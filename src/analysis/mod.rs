pub mod consolidation;
pub mod indicators;
pub mod inflections;
pub mod levels;
pub mod smoothing;

pub use consolidation::find_consolidation_zones;
pub use indicators::{normalize, rsi};
pub use inflections::find_inflection_points;
pub use levels::find_levels;
pub use smoothing::{smooth, trend_strength};
