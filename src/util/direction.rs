//! Cardinal direction conversion for wind inputs.

/// The 16 compass points, clockwise from north
pub const DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const SECTOR: f64 = 360.0 / 16.0;

/// Converts between degrees and compass point names
pub struct DirectionConverter;

impl DirectionConverter {
    /// Whether `direction` is one of the 16 compass point names
    pub fn is_cardinal_direction(direction: &str) -> bool {
        DIRECTIONS.contains(&direction)
    }

    /// Compass point nearest to `degree`; `None` for non-finite input
    pub fn cardinal_name(degree: f64) -> Option<&'static str> {
        if !degree.is_finite() {
            return None;
        }
        let idx = ((degree + SECTOR / 2.0) / SECTOR).floor().rem_euclid(16.0) as usize;
        DIRECTIONS.get(idx).copied()
    }

    /// Degrees for a compass point name (case-insensitive)
    pub fn degree(cardinal_direction: &str) -> Option<f64> {
        let name = cardinal_direction.trim().to_ascii_uppercase();
        DIRECTIONS
            .iter()
            .position(|d| *d == name)
            .map(|idx| SECTOR * idx as f64)
    }
}
